use super::domain::{Tenant, TenantId};
use crate::accounts::AccountId;
use crate::properties::PropertyId;
use crate::repository::RepositoryError;

/// Storage abstraction for tenant records.
///
/// `insert_tenant` and `update_tenant` must reject, under the same write that
/// stores the record, a tenant whose room is already held by another active
/// tenant of the same property with [`RepositoryError::RoomTaken`].
pub trait TenantRepository: Send + Sync {
    fn insert_tenant(&self, tenant: Tenant) -> Result<Tenant, RepositoryError>;
    fn update_tenant(&self, tenant: Tenant) -> Result<Option<Tenant>, RepositoryError>;
    fn fetch_tenant(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError>;
    fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError>;
    fn list_tenants_added_by(&self, owner: &AccountId) -> Result<Vec<Tenant>, RepositoryError>;
    fn list_tenants_by_property(
        &self,
        property: &PropertyId,
    ) -> Result<Vec<Tenant>, RepositoryError>;
    fn delete_tenant(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError>;
}
