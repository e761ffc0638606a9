use super::domain::{Rsl, RslId};
use crate::repository::RepositoryError;

/// Storage abstraction for the scope catalogue.
pub trait RslRepository: Send + Sync {
    fn insert_rsl(&self, rsl: Rsl) -> Result<Rsl, RepositoryError>;
    fn update_rsl(&self, rsl: Rsl) -> Result<Option<Rsl>, RepositoryError>;
    fn fetch_rsl(&self, id: &RslId) -> Result<Option<Rsl>, RepositoryError>;
    fn list_rsls(&self) -> Result<Vec<Rsl>, RepositoryError>;
    fn delete_rsl(&self, id: &RslId) -> Result<Option<Rsl>, RepositoryError>;
}
