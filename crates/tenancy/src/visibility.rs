//! Role-based narrowing of a record's embedded scope list.
//!
//! Administrators see every entry. Managers see the entries in their own scope
//! set. Delegates inherit from their creator: an administrator creator leaves
//! the list untouched, a manager creator narrows it by the creator's scope set.

use std::collections::BTreeSet;

use crate::accounts::{AccountRepository, Actor, IdentityResolver, Role};
use crate::repository::RepositoryError;
use crate::rsls::RslId;

/// An element of an embedded scope list.
pub trait ScopeEntry {
    fn scope_id(&self) -> &RslId;
}

impl ScopeEntry for RslId {
    fn scope_id(&self) -> &RslId {
        self
    }
}

/// A record carrying a scope list subject to visibility filtering.
pub trait Scoped {
    type Entry: ScopeEntry;

    fn scope_entries_mut(&mut self) -> &mut Vec<Self::Entry>;
}

/// Outcome of evaluating the role hierarchy for one caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityPolicy {
    Unrestricted,
    Restricted(BTreeSet<RslId>),
}

impl VisibilityPolicy {
    /// Evaluates the caller once so a listing can reuse the result per record.
    ///
    /// A delegate whose creator is missing, unknown, or itself a delegate is
    /// left unrestricted.
    pub fn for_actor<A>(
        actor: &Actor,
        resolver: &IdentityResolver<A>,
    ) -> Result<Self, RepositoryError>
    where
        A: AccountRepository,
    {
        match actor.role {
            Role::Administrator => Ok(Self::Unrestricted),
            Role::Manager => Ok(Self::Restricted(actor.rsls.clone())),
            Role::Delegate => {
                let Some(creator_id) = actor.added_by.as_ref() else {
                    tracing::debug!(actor = %actor.id, "delegate without creator; scope list unfiltered");
                    return Ok(Self::Unrestricted);
                };
                let Some(creator) = resolver.find(creator_id)? else {
                    tracing::debug!(actor = %actor.id, creator = %creator_id, "delegate creator not found; scope list unfiltered");
                    return Ok(Self::Unrestricted);
                };
                Ok(match creator.role {
                    Role::Administrator => Self::Unrestricted,
                    Role::Manager => Self::Restricted(creator.rsls),
                    Role::Delegate => {
                        tracing::warn!(
                            actor = %actor.id,
                            creator = %creator.id,
                            "delegate created by another delegate; scope list unfiltered"
                        );
                        Self::Unrestricted
                    }
                })
            }
        }
    }

    pub fn permits(&self, id: &RslId) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Restricted(allowed) => allowed.contains(id),
        }
    }

    /// Narrows an owned copy of `record`, preserving the original entry order.
    pub fn apply<R: Scoped>(&self, mut record: R) -> R {
        if matches!(self, Self::Restricted(_)) {
            record
                .scope_entries_mut()
                .retain(|entry| self.permits(entry.scope_id()));
        }
        record
    }
}
