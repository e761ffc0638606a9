use std::sync::Arc;

use chrono::Utc;

use super::domain::{NewProperty, Property, PropertyId, PropertyUpdate};
use super::repository::PropertyRepository;
use crate::accounts::{AccountId, AccountRepository, IdentityResolver, ResolveError};
use crate::repository::{next_record_id, RepositoryError};
use crate::visibility::VisibilityPolicy;

/// Property CRUD with role-scoped reads.
pub struct PropertyService<P, A> {
    properties: Arc<P>,
    resolver: IdentityResolver<A>,
}

impl<P, A> PropertyService<P, A>
where
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    pub fn new(properties: Arc<P>, accounts: Arc<A>) -> Self {
        Self {
            properties,
            resolver: IdentityResolver::new(accounts),
        }
    }

    /// Rejects a missing creator before touching storage.
    pub fn create(&self, payload: NewProperty) -> Result<Property, PropertyServiceError> {
        let creator = payload.creator().ok_or(PropertyServiceError::MissingAddedBy)?;
        if self.resolver.find(&creator)?.is_none() {
            return Err(PropertyServiceError::CreatorNotFound(creator));
        }

        let now = Utc::now();
        let property = Property {
            id: PropertyId(next_record_id("prop")),
            name: payload.name,
            address: payload.address,
            postcode: payload.postcode,
            no_of_bedrooms: payload.no_of_bedrooms,
            rsls: payload.rsls,
            added_by: creator,
            created_at: now,
            updated_at: now,
        };

        let stored = self.properties.insert_property(property)?;
        tracing::info!(property = %stored.id.as_str(), added_by = %stored.added_by, "property created");
        Ok(stored)
    }

    pub fn get(
        &self,
        actor_id: &AccountId,
        id: &PropertyId,
    ) -> Result<Property, PropertyServiceError> {
        let policy = self.policy_for(actor_id)?;
        let property = self
            .properties
            .fetch_property(id)?
            .ok_or(PropertyServiceError::NotFound)?;
        Ok(policy.apply(property))
    }

    pub fn list(&self, actor_id: &AccountId) -> Result<Vec<Property>, PropertyServiceError> {
        let policy = self.policy_for(actor_id)?;
        let properties = self.properties.list_properties()?;
        Ok(narrow_all(&policy, properties))
    }

    /// Properties the caller added, narrowed the same way as [`list`](Self::list).
    pub fn list_mine(&self, actor_id: &AccountId) -> Result<Vec<Property>, PropertyServiceError> {
        let policy = self.policy_for(actor_id)?;
        let properties = self.properties.list_properties_added_by(actor_id)?;
        Ok(narrow_all(&policy, properties))
    }

    pub fn update(
        &self,
        id: &PropertyId,
        update: PropertyUpdate,
    ) -> Result<Property, PropertyServiceError> {
        let mut property = self
            .properties
            .fetch_property(id)?
            .ok_or(PropertyServiceError::NotFound)?;
        property.apply(update, Utc::now());
        self.properties
            .update_property(property)?
            .ok_or(PropertyServiceError::NotFound)
    }

    pub fn delete(&self, id: &PropertyId) -> Result<Property, PropertyServiceError> {
        let deleted = self
            .properties
            .delete_property(id)?
            .ok_or(PropertyServiceError::NotFound)?;
        tracing::info!(property = %deleted.id.as_str(), "property deleted");
        Ok(deleted)
    }

    fn policy_for(&self, actor_id: &AccountId) -> Result<VisibilityPolicy, PropertyServiceError> {
        let actor = self.resolver.resolve(actor_id)?;
        Ok(VisibilityPolicy::for_actor(&actor, &self.resolver)?)
    }
}

fn narrow_all(policy: &VisibilityPolicy, properties: Vec<Property>) -> Vec<Property> {
    properties
        .into_iter()
        .map(|property| policy.apply(property))
        .collect()
}

/// Error raised by the property service.
#[derive(Debug, thiserror::Error)]
pub enum PropertyServiceError {
    #[error("addedBy is required")]
    MissingAddedBy,
    #[error("no user or staff account with id {0}")]
    CreatorNotFound(AccountId),
    #[error("caller {0} is not a known user or staff member")]
    ActorNotFound(AccountId),
    #[error("property not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ResolveError> for PropertyServiceError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::NotFound(id) => Self::ActorNotFound(id),
            ResolveError::Repository(err) => Self::Repository(err),
        }
    }
}
