use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::AccountId;
use crate::rsls::RslId;
use crate::visibility::{ScopeEntry, Scoped};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

impl PropertyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Scope catalogue entry embedded in a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: RslId,
    #[serde(default)]
    pub name: String,
}

impl ScopeEntry for ScopeRef {
    fn scope_id(&self) -> &RslId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id", alias = "id")]
    pub id: PropertyId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub no_of_bedrooms: u16,
    #[serde(default)]
    pub rsls: Vec<ScopeRef>,
    pub added_by: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scoped for Property {
    type Entry = ScopeRef;

    fn scope_entries_mut(&mut self) -> &mut Vec<ScopeRef> {
        &mut self.rsls
    }
}

/// Creation payload. `added_by` is the only field the service insists on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub added_by: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub no_of_bedrooms: u16,
    #[serde(default)]
    pub rsls: Vec<ScopeRef>,
}

impl NewProperty {
    pub fn creator(&self) -> Option<AccountId> {
        self.added_by
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(AccountId::from)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub no_of_bedrooms: Option<u16>,
    pub rsls: Option<Vec<ScopeRef>>,
}

impl Property {
    pub(crate) fn apply(&mut self, update: PropertyUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(postcode) = update.postcode {
            self.postcode = postcode;
        }
        if let Some(bedrooms) = update.no_of_bedrooms {
            self.no_of_bedrooms = bedrooms;
        }
        if let Some(rsls) = update.rsls {
            self.rsls = rsls;
        }
        self.updated_at = now;
    }
}
