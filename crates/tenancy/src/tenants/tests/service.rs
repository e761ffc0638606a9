use std::sync::Arc;

use crate::accounts::AccountId;
use crate::config::ListingConfig;
use crate::properties::PropertyId;
use crate::store::InMemoryStore;
use crate::tenants::{
    RoomNumber, TenantId, TenantProfile, TenantQuery, TenantService, TenantServiceError,
    TenantStatus,
};
use crate::testing::{complete_profile, store_with_property, ADMIN, MANAGER, MANAGERS_STAFF};

type Service = TenantService<InMemoryStore, InMemoryStore, InMemoryStore>;

fn service(store: Arc<InMemoryStore>) -> Service {
    TenantService::new(store.clone(), store.clone(), store, ListingConfig::default())
}

fn rooms(raw: &[u16]) -> Vec<RoomNumber> {
    raw.iter().copied().map(RoomNumber).collect()
}

#[test]
fn create_reports_every_missing_field() {
    let service = service(store_with_property(3));
    match service.create(&AccountId::from(ADMIN), TenantProfile::default()) {
        Err(TenantServiceError::Validation(failure)) => {
            assert_eq!(failure.fields.len(), 12);
            assert_eq!(failure.fields.get("property"), Some("Property is required"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn create_checks_the_property_and_room_bounds() {
    let service = service(store_with_property(3));
    let actor = AccountId::from(ADMIN);

    match service.create(&actor, complete_profile("prop-ghost", 1)) {
        Err(TenantServiceError::Validation(failure)) => {
            assert_eq!(failure.fields.get("property"), Some("Property not found"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    match service.create(&actor, complete_profile("prop-1", 4)) {
        Err(TenantServiceError::Validation(failure)) => {
            assert_eq!(
                failure.fields.get("roomNumber"),
                Some("Property has only 3 bedrooms")
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn an_occupied_room_cannot_be_taken_twice() {
    let service = service(store_with_property(3));
    let actor = AccountId::from(MANAGER);

    let first = service
        .create(&actor, complete_profile("prop-1", 2))
        .expect("first tenant");
    assert!(first.id.as_str().starts_with("tenant-"));
    assert_eq!(first.added_by, actor);

    let err = service
        .create(&actor, complete_profile("prop-1", 2))
        .expect_err("room taken");
    assert!(matches!(err, TenantServiceError::RoomTaken(_)));
}

#[test]
fn vacating_frees_the_room() {
    let service = service(store_with_property(2));
    let actor = AccountId::from(ADMIN);
    let first = service
        .create(&actor, complete_profile("prop-1", 1))
        .expect("first tenant");

    let mut vacated = first.profile.clone();
    vacated.status = TenantStatus::Inactive;
    vacated.sign_out_date = chrono::NaiveDate::from_ymd_opt(2024, 6, 30);
    let updated = service.update(&first.id, vacated).expect("vacated");
    assert_eq!(updated.added_by, first.added_by);
    assert_eq!(updated.created_at, first.created_at);

    service
        .create(&actor, complete_profile("prop-1", 1))
        .expect("room reused");
}

#[test]
fn available_rooms_exclude_active_tenants_except_the_one_edited() {
    let service = service(store_with_property(4));
    let actor = AccountId::from(ADMIN);
    let property = PropertyId::from("prop-1");
    let first = service
        .create(&actor, complete_profile("prop-1", 1))
        .expect("tenant");
    service
        .create(&actor, complete_profile("prop-1", 3))
        .expect("tenant");

    assert_eq!(
        service.available_rooms(&property, None).expect("rooms"),
        rooms(&[2, 4])
    );
    assert_eq!(
        service
            .available_rooms(&property, Some(&first.id))
            .expect("rooms"),
        rooms(&[1, 2, 4])
    );
    assert!(matches!(
        service.available_rooms(&PropertyId::from("prop-ghost"), None),
        Err(TenantServiceError::PropertyNotFound)
    ));
}

#[test]
fn listing_is_scoped_to_the_owner_unless_administrator() {
    let service = service(store_with_property(5));
    service
        .create(&AccountId::from(ADMIN), complete_profile("prop-1", 1))
        .expect("admin tenant");
    service
        .create(&AccountId::from(MANAGER), complete_profile("prop-1", 2))
        .expect("manager tenant");
    service
        .create(&AccountId::from(MANAGERS_STAFF), complete_profile("prop-1", 3))
        .expect("staff tenant");

    let query = TenantQuery::default();
    let managers = service
        .list(&AccountId::from(MANAGER), &query)
        .expect("listed");
    assert_eq!(managers.total, 1);
    assert_eq!(managers.items[0].added_by, AccountId::from(MANAGER));

    let everyone = service.list(&AccountId::from(ADMIN), &query).expect("listed");
    assert_eq!(everyone.total, 3);
    assert_eq!(everyone.per_page, 5);
}

#[test]
fn export_ignores_pagination() {
    let service = service(store_with_property(8));
    let actor = AccountId::from(ADMIN);
    for room in 1..=7 {
        service
            .create(&actor, complete_profile("prop-1", room))
            .expect("tenant");
    }

    let query = TenantQuery {
        per_page: Some(2),
        ..TenantQuery::default()
    };
    let csv = String::from_utf8(service.export(&actor, &query).expect("csv")).expect("utf8");
    assert_eq!(csv.lines().count(), 8);
    assert!(csv.starts_with("id,firstName,lastName"));
}

#[test]
fn missing_tenants_are_not_found() {
    let service = service(store_with_property(1));
    let missing = TenantId::from("tenant-ghost");
    assert!(matches!(service.get(&missing), Err(TenantServiceError::NotFound)));
    assert!(matches!(service.delete(&missing), Err(TenantServiceError::NotFound)));
    assert!(matches!(
        service.update(&missing, complete_profile("prop-1", 1)),
        Err(TenantServiceError::NotFound)
    ));
}
