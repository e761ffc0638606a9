use super::domain::{AccountId, Staff, User};
use crate::repository::RepositoryError;

/// Storage abstraction over the user and staff collections.
///
/// `insert_*` and `update_*` must reject a username or email already held by
/// another account of the same kind with [`RepositoryError::Conflict`].
/// `update_*` and `delete_*` return `Ok(None)` when the id is unknown.
pub trait AccountRepository: Send + Sync {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError>;
    fn update_user(&self, user: User) -> Result<Option<User>, RepositoryError>;
    fn fetch_user(&self, id: &AccountId) -> Result<Option<User>, RepositoryError>;
    fn list_users(&self) -> Result<Vec<User>, RepositoryError>;
    fn delete_user(&self, id: &AccountId) -> Result<Option<User>, RepositoryError>;

    fn insert_staff(&self, staff: Staff) -> Result<Staff, RepositoryError>;
    fn update_staff(&self, staff: Staff) -> Result<Option<Staff>, RepositoryError>;
    fn fetch_staff(&self, id: &AccountId) -> Result<Option<Staff>, RepositoryError>;
    fn list_staff(&self) -> Result<Vec<Staff>, RepositoryError>;
    fn delete_staff(&self, id: &AccountId) -> Result<Option<Staff>, RepositoryError>;
}
