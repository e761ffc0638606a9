use std::sync::Arc;

use super::domain::{AccountId, Actor};
use super::repository::AccountRepository;
use crate::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no user or staff account with id {0}")]
    NotFound(AccountId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Finds the account behind an id: users first, then staff.
pub struct IdentityResolver<A> {
    accounts: Arc<A>,
}

impl<A> Clone for IdentityResolver<A> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
        }
    }
}

impl<A> IdentityResolver<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub fn resolve(&self, id: &AccountId) -> Result<Actor, ResolveError> {
        self.find(id)?
            .ok_or_else(|| ResolveError::NotFound(id.clone()))
    }

    /// Like [`resolve`](Self::resolve) but reports absence as `Ok(None)`.
    pub fn find(&self, id: &AccountId) -> Result<Option<Actor>, RepositoryError> {
        if let Some(user) = self.accounts.fetch_user(id)? {
            return Ok(Some(Actor::from(&user)));
        }
        Ok(self
            .accounts
            .fetch_staff(id)?
            .map(|staff| Actor::from(&staff)))
    }
}
