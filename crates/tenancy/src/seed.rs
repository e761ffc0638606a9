//! JSON seed files: accounts, catalogue entries, properties and tenants with
//! fixed ids, loaded into a store at startup or checked offline.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;

use crate::accounts::password::{hash_password, PasswordError};
use crate::accounts::{AccountId, AccountRepository, Gender, Role, Staff, User};
use crate::properties::{Property, PropertyId, PropertyRepository, ScopeRef};
use crate::repository::{reserve_record_id, RepositoryError};
use crate::rsls::{Rsl, RslId, RslRepository};
use crate::tenants::{Tenant, TenantId, TenantProfile, TenantRepository};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("seed file is inconsistent: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("failed to store seed record: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub users: Vec<SeedUser>,
    pub staff: Vec<SeedStaff>,
    pub rsls: Vec<SeedRsl>,
    pub properties: Vec<SeedProperty>,
    pub tenants: Vec<SeedTenant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
    #[serde(alias = "_id")]
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub rsls: Vec<RslId>,
    #[serde(default)]
    pub added_by: Option<AccountId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedStaff {
    #[serde(alias = "_id")]
    pub id: AccountId,
    pub job_title: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub gender: Gender,
    pub username: String,
    pub email: String,
    pub corresponding_email: String,
    pub password: String,
    #[serde(default)]
    pub rsls: Vec<RslId>,
    pub added_by: AccountId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRsl {
    #[serde(alias = "_id")]
    pub id: RslId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProperty {
    #[serde(alias = "_id")]
    pub id: PropertyId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
    pub no_of_bedrooms: u16,
    #[serde(default)]
    pub rsls: Vec<ScopeRef>,
    pub added_by: AccountId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTenant {
    #[serde(alias = "_id")]
    pub id: TenantId,
    pub added_by: AccountId,
    #[serde(flatten)]
    pub profile: TenantProfile,
}

/// Record counts per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub staff: usize,
    pub rsls: usize,
    pub properties: usize,
    pub tenants: usize,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users, {} staff, {} rsls, {} properties, {} tenants",
            self.users, self.staff, self.rsls, self.properties, self.tenants
        )
    }
}

impl SeedFile {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn summary(&self) -> SeedSummary {
        SeedSummary {
            users: self.users.len(),
            staff: self.staff.len(),
            rsls: self.rsls.len(),
            properties: self.properties.len(),
            tenants: self.tenants.len(),
        }
    }

    /// Every record id with its collection; users and staff share one namespace.
    fn record_ids(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.users
            .iter()
            .map(|user| ("account", user.id.as_str()))
            .chain(self.staff.iter().map(|staff| ("account", staff.id.as_str())))
            .chain(self.rsls.iter().map(|rsl| ("rsl", rsl.id.as_str())))
            .chain(
                self.properties
                    .iter()
                    .map(|property| ("property", property.id.as_str())),
            )
            .chain(self.tenants.iter().map(|tenant| ("tenant", tenant.id.as_str())))
    }

    /// Cross-references within the file: creators, catalogue entries and
    /// tenant properties must all be defined in it.
    pub fn check(&self) -> Result<SeedSummary, SeedError> {
        let accounts: BTreeSet<&AccountId> = self
            .users
            .iter()
            .map(|user| &user.id)
            .chain(self.staff.iter().map(|staff| &staff.id))
            .collect();
        let rsls: BTreeSet<&RslId> = self.rsls.iter().map(|rsl| &rsl.id).collect();
        let properties: BTreeSet<&PropertyId> =
            self.properties.iter().map(|property| &property.id).collect();

        let mut problems = Vec::new();
        let mut seen = BTreeSet::new();
        for (kind, id) in self.record_ids() {
            if !seen.insert((kind, id)) {
                problems.push(format!("{kind} id {id} appears more than once"));
            }
        }

        let creators = self
            .users
            .iter()
            .filter_map(|user| user.added_by.as_ref().map(|creator| ("user", user.id.as_str(), creator)))
            .chain(self.staff.iter().map(|staff| ("staff", staff.id.as_str(), &staff.added_by)))
            .chain(
                self.properties
                    .iter()
                    .map(|property| ("property", property.id.as_str(), &property.added_by)),
            )
            .chain(
                self.tenants
                    .iter()
                    .map(|tenant| ("tenant", tenant.id.as_str(), &tenant.added_by)),
            );
        for (kind, id, creator) in creators {
            if !accounts.contains(creator) {
                problems.push(format!("{kind} {id} names unknown creator {creator}"));
            }
        }

        for user in &self.users {
            if user.role == Role::Delegate && user.added_by.is_none() {
                problems.push(format!("user {} has role 3 but no creator", user.id));
            }
        }

        let scope_lists = self
            .users
            .iter()
            .map(|user| (user.id.as_str(), &user.rsls))
            .chain(self.staff.iter().map(|staff| (staff.id.as_str(), &staff.rsls)));
        for (owner, scope) in scope_lists {
            for rsl in scope.iter().filter(|rsl| !rsls.contains(rsl)) {
                problems.push(format!("account {owner} references unknown rsl {}", rsl.as_str()));
            }
        }
        for property in &self.properties {
            for entry in property.rsls.iter().filter(|entry| !rsls.contains(&entry.id)) {
                problems.push(format!(
                    "property {} references unknown rsl {}",
                    property.id.as_str(),
                    entry.id.as_str()
                ));
            }
        }

        for tenant in &self.tenants {
            match tenant.profile.property.as_ref() {
                Some(property) if !properties.contains(property) => problems.push(format!(
                    "tenant {} references unknown property {}",
                    tenant.id.as_str(),
                    property.as_str()
                )),
                _ => {}
            }
        }

        if problems.is_empty() {
            Ok(self.summary())
        } else {
            Err(SeedError::Invalid(problems))
        }
    }

    /// Checks the file, then writes every record with hashed passwords.
    pub fn apply<S>(self, store: &S) -> Result<SeedSummary, SeedError>
    where
        S: AccountRepository + PropertyRepository + TenantRepository + RslRepository,
    {
        let summary = self.check()?;
        for (_, id) in self.record_ids() {
            reserve_record_id(id);
        }
        let now = Utc::now();

        for rsl in self.rsls {
            store.insert_rsl(Rsl {
                id: rsl.id,
                name: rsl.name,
                description: rsl.description,
                created_at: now,
                updated_at: now,
            })?;
        }

        for user in self.users {
            store.insert_user(User {
                id: user.id,
                first_name: user.first_name,
                last_name: user.last_name,
                username: user.username,
                email: user.email,
                role: user.role,
                rsls: user.rsls,
                added_by: user.added_by,
                password_hash: hash_password(&user.password)?,
                created_at: now,
                updated_at: now,
            })?;
        }

        for staff in self.staff {
            store.insert_staff(Staff {
                id: staff.id,
                job_title: staff.job_title,
                first_name: staff.first_name,
                last_name: staff.last_name,
                phone: staff.phone,
                gender: staff.gender,
                username: staff.username,
                email: staff.email,
                corresponding_email: staff.corresponding_email,
                role: Role::Delegate,
                rsls: staff.rsls,
                added_by: staff.added_by,
                password_hash: hash_password(&staff.password)?,
                created_at: now,
                updated_at: now,
            })?;
        }

        for property in self.properties {
            store.insert_property(Property {
                id: property.id,
                name: property.name,
                address: property.address,
                postcode: property.postcode,
                no_of_bedrooms: property.no_of_bedrooms,
                rsls: property.rsls,
                added_by: property.added_by,
                created_at: now,
                updated_at: now,
            })?;
        }

        for tenant in self.tenants {
            store.insert_tenant(Tenant {
                id: tenant.id,
                profile: tenant.profile,
                added_by: tenant.added_by,
                created_at: now,
                updated_at: now,
            })?;
        }

        tracing::info!(%summary, "seed data loaded");
        Ok(summary)
    }
}
