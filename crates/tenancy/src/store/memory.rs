use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::accounts::{AccountId, AccountRepository, Staff, User};
use crate::properties::{Property, PropertyId, PropertyRepository};
use crate::repository::RepositoryError;
use crate::rsls::{Rsl, RslId, RslRepository};
use crate::tenants::{room_holder, Tenant, TenantId, TenantRepository};

#[derive(Debug, Default)]
struct Collections {
    users: BTreeMap<AccountId, User>,
    staff: BTreeMap<AccountId, Staff>,
    properties: BTreeMap<PropertyId, Property>,
    tenants: BTreeMap<TenantId, Tenant>,
    rsls: BTreeMap<RslId, Rsl>,
}

/// Process-local store backing every repository trait. Each call takes the
/// single lock once, so uniqueness checks and the write they guard are atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Collections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(
        &self,
        f: impl FnOnce(&mut Collections) -> Result<R, RepositoryError>,
    ) -> Result<R, RepositoryError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))?;
        f(&mut guard)
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn duplicate_id(id: &str) -> RepositoryError {
    RepositoryError::DuplicateId(id.to_string())
}

/// Username and email must be unique among the other accounts of one kind.
fn check_credentials<'a>(
    others: impl Iterator<Item = (&'a AccountId, &'a str, &'a str)>,
    id: &AccountId,
    username: &str,
    email: &str,
) -> Result<(), RepositoryError> {
    for (other_id, other_username, other_email) in others {
        if other_id == id {
            continue;
        }
        if same_text(other_username, username) {
            return Err(RepositoryError::Conflict(format!(
                "Username '{username}' is already taken"
            )));
        }
        if same_text(other_email, email) {
            return Err(RepositoryError::Conflict(format!(
                "Email '{email}' is already registered"
            )));
        }
    }
    Ok(())
}

fn check_room(tenants: &BTreeMap<TenantId, Tenant>, tenant: &Tenant) -> Result<(), RepositoryError> {
    match room_holder(tenants.values(), tenant) {
        Some(holder) => Err(RepositoryError::RoomTaken(format!(
            "room {} is already held by tenant {}",
            tenant.profile.room_number.map(|room| room.0).unwrap_or_default(),
            holder.id.as_str()
        ))),
        None => Ok(()),
    }
}

impl AccountRepository for InMemoryStore {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        self.with(|store| {
            if store.users.contains_key(&user.id) {
                return Err(duplicate_id(user.id.as_str()));
            }
            check_credentials(
                store
                    .users
                    .values()
                    .map(|other| (&other.id, other.username.as_str(), other.email.as_str())),
                &user.id,
                &user.username,
                &user.email,
            )?;
            store.users.insert(user.id.clone(), user.clone());
            Ok(user)
        })
    }

    fn update_user(&self, user: User) -> Result<Option<User>, RepositoryError> {
        self.with(|store| {
            if !store.users.contains_key(&user.id) {
                return Ok(None);
            }
            check_credentials(
                store
                    .users
                    .values()
                    .map(|other| (&other.id, other.username.as_str(), other.email.as_str())),
                &user.id,
                &user.username,
                &user.email,
            )?;
            store.users.insert(user.id.clone(), user.clone());
            Ok(Some(user))
        })
    }

    fn fetch_user(&self, id: &AccountId) -> Result<Option<User>, RepositoryError> {
        self.with(|store| Ok(store.users.get(id).cloned()))
    }

    fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        self.with(|store| Ok(store.users.values().cloned().collect()))
    }

    fn delete_user(&self, id: &AccountId) -> Result<Option<User>, RepositoryError> {
        self.with(|store| Ok(store.users.remove(id)))
    }

    fn insert_staff(&self, staff: Staff) -> Result<Staff, RepositoryError> {
        self.with(|store| {
            if store.staff.contains_key(&staff.id) {
                return Err(duplicate_id(staff.id.as_str()));
            }
            check_credentials(
                store
                    .staff
                    .values()
                    .map(|other| (&other.id, other.username.as_str(), other.email.as_str())),
                &staff.id,
                &staff.username,
                &staff.email,
            )?;
            store.staff.insert(staff.id.clone(), staff.clone());
            Ok(staff)
        })
    }

    fn update_staff(&self, staff: Staff) -> Result<Option<Staff>, RepositoryError> {
        self.with(|store| {
            if !store.staff.contains_key(&staff.id) {
                return Ok(None);
            }
            check_credentials(
                store
                    .staff
                    .values()
                    .map(|other| (&other.id, other.username.as_str(), other.email.as_str())),
                &staff.id,
                &staff.username,
                &staff.email,
            )?;
            store.staff.insert(staff.id.clone(), staff.clone());
            Ok(Some(staff))
        })
    }

    fn fetch_staff(&self, id: &AccountId) -> Result<Option<Staff>, RepositoryError> {
        self.with(|store| Ok(store.staff.get(id).cloned()))
    }

    fn list_staff(&self) -> Result<Vec<Staff>, RepositoryError> {
        self.with(|store| Ok(store.staff.values().cloned().collect()))
    }

    fn delete_staff(&self, id: &AccountId) -> Result<Option<Staff>, RepositoryError> {
        self.with(|store| Ok(store.staff.remove(id)))
    }
}

impl PropertyRepository for InMemoryStore {
    fn insert_property(&self, property: Property) -> Result<Property, RepositoryError> {
        self.with(|store| {
            if store.properties.contains_key(&property.id) {
                return Err(duplicate_id(property.id.as_str()));
            }
            store.properties.insert(property.id.clone(), property.clone());
            Ok(property)
        })
    }

    fn update_property(&self, property: Property) -> Result<Option<Property>, RepositoryError> {
        self.with(|store| match store.properties.get_mut(&property.id) {
            Some(slot) => {
                *slot = property.clone();
                Ok(Some(property))
            }
            None => Ok(None),
        })
    }

    fn fetch_property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        self.with(|store| Ok(store.properties.get(id).cloned()))
    }

    fn list_properties(&self) -> Result<Vec<Property>, RepositoryError> {
        self.with(|store| Ok(store.properties.values().cloned().collect()))
    }

    fn list_properties_added_by(
        &self,
        owner: &AccountId,
    ) -> Result<Vec<Property>, RepositoryError> {
        self.with(|store| {
            Ok(store
                .properties
                .values()
                .filter(|property| &property.added_by == owner)
                .cloned()
                .collect())
        })
    }

    fn delete_property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        self.with(|store| Ok(store.properties.remove(id)))
    }
}

impl TenantRepository for InMemoryStore {
    fn insert_tenant(&self, tenant: Tenant) -> Result<Tenant, RepositoryError> {
        self.with(|store| {
            if store.tenants.contains_key(&tenant.id) {
                return Err(duplicate_id(tenant.id.as_str()));
            }
            check_room(&store.tenants, &tenant)?;
            store.tenants.insert(tenant.id.clone(), tenant.clone());
            Ok(tenant)
        })
    }

    fn update_tenant(&self, tenant: Tenant) -> Result<Option<Tenant>, RepositoryError> {
        self.with(|store| {
            if !store.tenants.contains_key(&tenant.id) {
                return Ok(None);
            }
            check_room(&store.tenants, &tenant)?;
            store.tenants.insert(tenant.id.clone(), tenant.clone());
            Ok(Some(tenant))
        })
    }

    fn fetch_tenant(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        self.with(|store| Ok(store.tenants.get(id).cloned()))
    }

    fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError> {
        self.with(|store| Ok(store.tenants.values().cloned().collect()))
    }

    fn list_tenants_added_by(&self, owner: &AccountId) -> Result<Vec<Tenant>, RepositoryError> {
        self.with(|store| {
            Ok(store
                .tenants
                .values()
                .filter(|tenant| &tenant.added_by == owner)
                .cloned()
                .collect())
        })
    }

    fn list_tenants_by_property(
        &self,
        property: &PropertyId,
    ) -> Result<Vec<Tenant>, RepositoryError> {
        self.with(|store| {
            Ok(store
                .tenants
                .values()
                .filter(|tenant| tenant.profile.property.as_ref() == Some(property))
                .cloned()
                .collect())
        })
    }

    fn delete_tenant(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        self.with(|store| Ok(store.tenants.remove(id)))
    }
}

impl RslRepository for InMemoryStore {
    fn insert_rsl(&self, rsl: Rsl) -> Result<Rsl, RepositoryError> {
        self.with(|store| {
            if store.rsls.contains_key(&rsl.id) {
                return Err(duplicate_id(rsl.id.as_str()));
            }
            if store.rsls.values().any(|other| same_text(&other.name, &rsl.name)) {
                return Err(RepositoryError::Conflict(format!(
                    "RSL '{}' already exists",
                    rsl.name
                )));
            }
            store.rsls.insert(rsl.id.clone(), rsl.clone());
            Ok(rsl)
        })
    }

    fn update_rsl(&self, rsl: Rsl) -> Result<Option<Rsl>, RepositoryError> {
        self.with(|store| match store.rsls.get_mut(&rsl.id) {
            Some(slot) => {
                *slot = rsl.clone();
                Ok(Some(rsl))
            }
            None => Ok(None),
        })
    }

    fn fetch_rsl(&self, id: &RslId) -> Result<Option<Rsl>, RepositoryError> {
        self.with(|store| Ok(store.rsls.get(id).cloned()))
    }

    fn list_rsls(&self) -> Result<Vec<Rsl>, RepositoryError> {
        self.with(|store| Ok(store.rsls.values().cloned().collect()))
    }

    fn delete_rsl(&self, id: &RslId) -> Result<Option<Rsl>, RepositoryError> {
        self.with(|store| Ok(store.rsls.remove(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::Role;
    use crate::tenants::{RoomNumber, TenantProfile, TenantStatus};
    use chrono::Utc;

    fn user(id: &str, username: &str, email: &str) -> User {
        let now = Utc::now();
        User {
            id: AccountId::from(id),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role: Role::Manager,
            rsls: Vec::new(),
            added_by: None,
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn tenant(id: &str, room: u16, status: TenantStatus) -> Tenant {
        let now = Utc::now();
        let mut profile = TenantProfile::default();
        profile.property = Some(PropertyId::from("prop-1"));
        profile.room_number = Some(RoomNumber(room));
        profile.status = status;
        Tenant {
            id: TenantId::from(id),
            profile,
            added_by: AccountId::from("user-1"),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn usernames_are_unique_ignoring_case() {
        let store = InMemoryStore::new();
        store.insert_user(user("u1", "jreid", "jo@example.org")).expect("first");
        let err = store
            .insert_user(user("u2", "JReid", "other@example.org"))
            .expect_err("duplicate username");
        assert!(matches!(err, RepositoryError::Conflict(message) if message.contains("Username")));
    }

    #[test]
    fn an_account_may_keep_its_own_username_on_update() {
        let store = InMemoryStore::new();
        let mut stored = store.insert_user(user("u1", "jreid", "jo@example.org")).expect("insert");
        stored.first_name = "Joanne".to_string();
        assert!(store.update_user(stored).expect("update").is_some());
        assert!(store
            .update_user(user("ghost", "ghost", "ghost@example.org"))
            .expect("update")
            .is_none());
    }

    #[test]
    fn active_room_is_exclusive_but_vacated_room_is_not() {
        let store = InMemoryStore::new();
        store.insert_tenant(tenant("t1", 1, TenantStatus::Active)).expect("first");
        store.insert_tenant(tenant("t2", 2, TenantStatus::Inactive)).expect("vacated");

        let err = store
            .insert_tenant(tenant("t3", 1, TenantStatus::Active))
            .expect_err("room 1 taken");
        assert!(matches!(err, RepositoryError::RoomTaken(_)));
        store.insert_tenant(tenant("t4", 2, TenantStatus::Active)).expect("room 2 free");

        // Moving t1 onto t4's room fails; staying in place succeeds.
        assert!(store.update_tenant(tenant("t1", 2, TenantStatus::Active)).is_err());
        assert!(store.update_tenant(tenant("t1", 1, TenantStatus::Active)).is_ok());
    }

    #[test]
    fn deleting_unknown_records_reports_none() {
        let store = InMemoryStore::new();
        assert!(store.delete_property(&PropertyId::from("nope")).expect("delete").is_none());
        assert!(store.delete_tenant(&TenantId::from("nope")).expect("delete").is_none());
        assert!(store.delete_rsl(&RslId::from("nope")).expect("delete").is_none());
    }

    #[test]
    fn reused_ids_are_not_room_clashes() {
        let store = InMemoryStore::new();
        store.insert_tenant(tenant("t1", 1, TenantStatus::Active)).expect("first");
        let err = store
            .insert_tenant(tenant("t1", 5, TenantStatus::Active))
            .expect_err("id reused");
        assert_eq!(err, RepositoryError::DuplicateId("t1".to_string()));
    }
}
