//! Fixtures shared by the module test suites.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::accounts::{AccountId, AccountRepository, Gender, Role, Staff, User};
use crate::api::ACTOR_HEADER;
use crate::properties::{Property, PropertyId, PropertyRepository, ScopeRef};
use crate::rsls::RslId;
use crate::store::InMemoryStore;
use crate::tenants::{RoomNumber, TenantProfile};

pub(crate) use crate::api::test_support::read_json_body;

pub(crate) const ADMIN: &str = "user-admin";
pub(crate) const MANAGER: &str = "user-manager";
pub(crate) const MANAGERS_STAFF: &str = "staff-of-manager";
pub(crate) const ADMINS_STAFF: &str = "staff-of-admin";

pub(crate) fn user(id: &str, role: Role, rsls: &[&str], added_by: Option<&str>) -> User {
    let now = Utc::now();
    User {
        id: AccountId::from(id),
        first_name: "First".to_string(),
        last_name: id.to_string(),
        username: id.to_string(),
        email: format!("{id}@example.org"),
        role,
        rsls: rsls.iter().map(|rsl| RslId::from(*rsl)).collect(),
        added_by: added_by.map(AccountId::from),
        password_hash: String::new(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn staff(id: &str, added_by: &str) -> Staff {
    let now = Utc::now();
    Staff {
        id: AccountId::from(id),
        job_title: "Support worker".to_string(),
        first_name: "First".to_string(),
        last_name: id.to_string(),
        phone: "07700900000".to_string(),
        gender: Gender::Other,
        username: id.to_string(),
        email: format!("{id}@example.org"),
        corresponding_email: format!("{id}.alt@example.org"),
        role: Role::Delegate,
        rsls: Vec::new(),
        added_by: AccountId::from(added_by),
        password_hash: String::new(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn property(id: &str, added_by: &str, bedrooms: u16, rsls: &[&str]) -> Property {
    let now = Utc::now();
    Property {
        id: PropertyId::from(id),
        name: format!("{id} house"),
        address: "1 High Street".to_string(),
        postcode: "AB1 2CD".to_string(),
        no_of_bedrooms: bedrooms,
        rsls: rsls
            .iter()
            .map(|rsl| ScopeRef {
                id: RslId::from(*rsl),
                name: rsl.to_uppercase(),
            })
            .collect(),
        added_by: AccountId::from(added_by),
        created_at: now,
        updated_at: now,
    }
}

/// A profile that passes validation for `property` and `room`.
pub(crate) fn complete_profile(property: &str, room: u16) -> TenantProfile {
    let mut profile = TenantProfile::default();
    profile.property = Some(PropertyId::from(property));
    profile.room_number = Some(RoomNumber(room));
    profile.sign_in_date = NaiveDate::from_ymd_opt(2024, 3, 1);
    profile.date_of_assessment = NaiveDate::from_ymd_opt(2024, 2, 27);
    profile.debts = Some(false);
    profile.full_check_completed = Some(true);
    let personal = &mut profile.personal_details;
    personal.first_name = "Sam".to_string();
    personal.last_name = format!("Room{room}");
    personal.national_insurance_number = "QQ123456C".to_string();
    personal.gender = "Male".to_string();
    personal.date_of_birth = NaiveDate::from_ymd_opt(1988, 7, 9);
    personal.marital_status = "Single".to_string();
    profile
}

/// Administrator, manager scoped to `b` and `c`, and one staff member under each.
pub(crate) fn store_with_accounts() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store
        .insert_user(user(ADMIN, Role::Administrator, &[], None))
        .expect("admin stored");
    store
        .insert_user(user(MANAGER, Role::Manager, &["b", "c"], None))
        .expect("manager stored");
    store
        .insert_staff(staff(MANAGERS_STAFF, MANAGER))
        .expect("staff stored");
    store
        .insert_staff(staff(ADMINS_STAFF, ADMIN))
        .expect("staff stored");
    store
}

pub(crate) fn store_with_property(bedrooms: u16) -> Arc<InMemoryStore> {
    let store = store_with_accounts();
    store
        .insert_property(property("prop-1", ADMIN, bedrooms, &["a", "b", "c"]))
        .expect("property stored");
    store
}

pub(crate) fn json_request(
    method: &str,
    uri: &str,
    actor: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds")
}
