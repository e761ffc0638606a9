use std::sync::Arc;

use chrono::Utc;

use super::domain::{RoomNumber, Tenant, TenantId, TenantProfile};
use super::export::{tenants_to_csv, ExportError};
use super::listing::{run_query, TenantPage, TenantQuery};
use super::report::TenantReport;
use super::repository::TenantRepository;
use super::rooms::{available_rooms, occupied_rooms};
use super::validation::validate_profile;
use crate::accounts::{AccountId, AccountRepository, Actor, IdentityResolver, ResolveError, Role};
use crate::config::ListingConfig;
use crate::properties::{Property, PropertyId, PropertyRepository};
use crate::repository::{next_record_id, RepositoryError};
use crate::validation::{FieldErrors, ValidationFailure};

/// Tenant lifecycle: validated writes, owner-scoped reads, room bookkeeping.
pub struct TenantService<T, P, A> {
    tenants: Arc<T>,
    properties: Arc<P>,
    resolver: IdentityResolver<A>,
    listing: ListingConfig,
}

impl<T, P, A> TenantService<T, P, A>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    pub fn new(tenants: Arc<T>, properties: Arc<P>, accounts: Arc<A>, listing: ListingConfig) -> Self {
        Self {
            tenants,
            properties,
            resolver: IdentityResolver::new(accounts),
            listing,
        }
    }

    pub fn create(
        &self,
        actor_id: &AccountId,
        profile: TenantProfile,
    ) -> Result<Tenant, TenantServiceError> {
        let actor = self.resolver.resolve(actor_id)?;
        self.check_profile(&profile)?;

        let now = Utc::now();
        let tenant = Tenant {
            id: TenantId(next_record_id("tenant")),
            profile,
            added_by: actor.id,
            created_at: now,
            updated_at: now,
        };
        let stored = self.tenants.insert_tenant(tenant).map_err(room_conflict)?;
        tracing::info!(tenant = %stored.id.as_str(), added_by = %stored.added_by, "tenant created");
        Ok(stored)
    }

    pub fn get(&self, id: &TenantId) -> Result<Tenant, TenantServiceError> {
        self.tenants
            .fetch_tenant(id)?
            .ok_or(TenantServiceError::NotFound)
    }

    /// The printable summary of one tenant. A deleted property shows as `N/A`.
    pub fn report(&self, id: &TenantId) -> Result<TenantReport, TenantServiceError> {
        let tenant = self.get(id)?;
        let property = match tenant.profile.property.as_ref() {
            Some(property_id) => self.properties.fetch_property(property_id)?,
            None => None,
        };
        Ok(TenantReport::build(&tenant, property.as_ref()))
    }

    /// Administrators list every tenant; everyone else lists the tenants they added.
    pub fn list(
        &self,
        actor_id: &AccountId,
        query: &TenantQuery,
    ) -> Result<TenantPage, TenantServiceError> {
        let tenants = self.owned_tenants(actor_id)?;
        Ok(run_query(tenants, query, self.listing.default_page_size)?)
    }

    pub fn list_by_property(&self, property_id: &PropertyId) -> Result<Vec<Tenant>, TenantServiceError> {
        self.property(property_id)?;
        Ok(self.tenants.list_tenants_by_property(property_id)?)
    }

    /// Rooms still free at the property. `exclude` names the tenant being
    /// edited so its own room stays selectable.
    pub fn available_rooms(
        &self,
        property_id: &PropertyId,
        exclude: Option<&TenantId>,
    ) -> Result<Vec<RoomNumber>, TenantServiceError> {
        let property = self.property(property_id)?;
        let tenants = self.tenants.list_tenants_by_property(property_id)?;
        let occupied = occupied_rooms(&tenants, property_id, exclude);
        Ok(available_rooms(property.no_of_bedrooms, &occupied))
    }

    /// Replaces the questionnaire; id, owner and creation time are kept.
    pub fn update(&self, id: &TenantId, profile: TenantProfile) -> Result<Tenant, TenantServiceError> {
        let mut tenant = self
            .tenants
            .fetch_tenant(id)?
            .ok_or(TenantServiceError::NotFound)?;
        self.check_profile(&profile)?;

        tenant.profile = profile;
        tenant.updated_at = Utc::now();
        self.tenants
            .update_tenant(tenant)
            .map_err(room_conflict)?
            .ok_or(TenantServiceError::NotFound)
    }

    pub fn delete(&self, id: &TenantId) -> Result<Tenant, TenantServiceError> {
        let deleted = self
            .tenants
            .delete_tenant(id)?
            .ok_or(TenantServiceError::NotFound)?;
        tracing::info!(tenant = %deleted.id.as_str(), "tenant deleted");
        Ok(deleted)
    }

    /// CSV of the caller's tenants after search and sort; pagination is ignored.
    pub fn export(
        &self,
        actor_id: &AccountId,
        query: &TenantQuery,
    ) -> Result<Vec<u8>, TenantServiceError> {
        let tenants = self.owned_tenants(actor_id)?;
        let everything = TenantQuery {
            page: Some(1),
            per_page: Some(tenants.len().max(1)),
            ..query.clone()
        };
        let page = run_query(tenants, &everything, self.listing.default_page_size)?;
        Ok(tenants_to_csv(&page.items)?)
    }

    fn owned_tenants(&self, actor_id: &AccountId) -> Result<Vec<Tenant>, TenantServiceError> {
        let actor: Actor = self.resolver.resolve(actor_id)?;
        let tenants = if actor.role == Role::Administrator {
            self.tenants.list_tenants()?
        } else {
            self.tenants.list_tenants_added_by(&actor.id)?
        };
        Ok(tenants)
    }

    fn property(&self, id: &PropertyId) -> Result<Property, TenantServiceError> {
        self.properties
            .fetch_property(id)?
            .ok_or(TenantServiceError::PropertyNotFound)
    }

    /// Field validation, then the referenced property and room bounds.
    fn check_profile(&self, profile: &TenantProfile) -> Result<(), TenantServiceError> {
        validate_profile(profile)?;
        let (Some(property_id), Some(room)) = (&profile.property, profile.room_number) else {
            return Ok(());
        };

        let mut errors = FieldErrors::new();
        match self.properties.fetch_property(property_id)? {
            None => errors.insert("property", "Property not found"),
            Some(property) if room.0 > property.no_of_bedrooms => errors.insert(
                "roomNumber",
                format!("Property has only {} bedrooms", property.no_of_bedrooms),
            ),
            Some(_) => {}
        }
        Ok(errors.into_result()?)
    }
}

fn room_conflict(err: RepositoryError) -> TenantServiceError {
    match err {
        RepositoryError::RoomTaken(reason) => TenantServiceError::RoomTaken(reason),
        other => TenantServiceError::Repository(other),
    }
}

/// Error raised by the tenant service.
#[derive(Debug, thiserror::Error)]
pub enum TenantServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("caller {0} is not a known user or staff member")]
    ActorNotFound(AccountId),
    #[error("tenant not found")]
    NotFound,
    #[error("property not found")]
    PropertyNotFound,
    #[error("{0}")]
    RoomTaken(String),
    #[error("failed to evaluate tenant query: {0}")]
    Listing(#[from] serde_json::Error),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ResolveError> for TenantServiceError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::NotFound(id) => Self::ActorNotFound(id),
            ResolveError::Repository(err) => Self::Repository(err),
        }
    }
}
