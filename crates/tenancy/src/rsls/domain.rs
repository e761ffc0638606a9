use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a scope catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RslId(pub String);

impl RslId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RslId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsl {
    #[serde(rename = "_id", alias = "id")]
    pub id: RslId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRsl {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RslUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Rsl {
    pub(crate) fn apply(&mut self, update: RslUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description).filter(|value| !value.is_empty());
        }
        self.updated_at = now;
    }
}
