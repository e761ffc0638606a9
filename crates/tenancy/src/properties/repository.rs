use super::domain::{Property, PropertyId};
use crate::accounts::AccountId;
use crate::repository::RepositoryError;

/// Storage abstraction for properties. Reads hand out owned copies, so callers
/// may narrow them freely without touching the stored record.
pub trait PropertyRepository: Send + Sync {
    fn insert_property(&self, property: Property) -> Result<Property, RepositoryError>;
    fn update_property(&self, property: Property) -> Result<Option<Property>, RepositoryError>;
    fn fetch_property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;
    fn list_properties(&self) -> Result<Vec<Property>, RepositoryError>;
    fn list_properties_added_by(
        &self,
        account: &AccountId,
    ) -> Result<Vec<Property>, RepositoryError>;
    fn delete_property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;
}
