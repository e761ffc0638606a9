use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::accounts::AccountId;
use crate::properties::{
    NewProperty, Property, PropertyId, PropertyRepository, PropertyService, PropertyServiceError,
    PropertyUpdate,
};
use crate::repository::RepositoryError;
use crate::store::InMemoryStore;
use crate::testing::{
    property, store_with_accounts, store_with_property, ADMIN, ADMINS_STAFF, MANAGER,
    MANAGERS_STAFF,
};

/// Counts every storage call so tests can prove none happened.
#[derive(Default)]
struct CountingRepository {
    calls: AtomicUsize,
}

impl CountingRepository {
    fn touched(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::Unavailable("counting only".to_string()))
    }
}

impl PropertyRepository for CountingRepository {
    fn insert_property(&self, property: Property) -> Result<Property, RepositoryError> {
        self.touched().map(|_| property)
    }

    fn update_property(&self, _property: Property) -> Result<Option<Property>, RepositoryError> {
        self.touched().map(|_| None)
    }

    fn fetch_property(&self, _id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        self.touched().map(|_| None)
    }

    fn list_properties(&self) -> Result<Vec<Property>, RepositoryError> {
        self.touched().map(|_| Vec::new())
    }

    fn list_properties_added_by(
        &self,
        _account: &AccountId,
    ) -> Result<Vec<Property>, RepositoryError> {
        self.touched().map(|_| Vec::new())
    }

    fn delete_property(&self, _id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        self.touched().map(|_| None)
    }
}

fn scope_ids(property: &Property) -> Vec<&str> {
    property.rsls.iter().map(|entry| entry.id.as_str()).collect()
}

fn service(store: Arc<InMemoryStore>) -> PropertyService<InMemoryStore, InMemoryStore> {
    PropertyService::new(store.clone(), store)
}

#[test]
fn create_without_added_by_never_reaches_storage() {
    let properties = Arc::new(CountingRepository::default());
    let service = PropertyService::new(properties.clone(), store_with_accounts());

    for added_by in [None, Some(String::new()), Some("   ".to_string())] {
        let payload = NewProperty {
            added_by,
            name: "Elm House".to_string(),
            no_of_bedrooms: 3,
            ..NewProperty::default()
        };
        assert!(matches!(
            service.create(payload),
            Err(PropertyServiceError::MissingAddedBy)
        ));
    }
    assert_eq!(properties.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn create_with_unknown_creator_is_rejected() {
    let service = service(store_with_accounts());
    let payload = NewProperty {
        added_by: Some("user-ghost".to_string()),
        ..NewProperty::default()
    };
    assert!(matches!(
        service.create(payload),
        Err(PropertyServiceError::CreatorNotFound(id)) if id.as_str() == "user-ghost"
    ));
}

#[test]
fn staff_may_create_properties() {
    let service = service(store_with_accounts());
    let created = service
        .create(NewProperty {
            added_by: Some(MANAGERS_STAFF.to_string()),
            name: "Oak Court".to_string(),
            no_of_bedrooms: 2,
            ..NewProperty::default()
        })
        .expect("created");
    assert!(created.id.as_str().starts_with("prop-"));
    assert_eq!(created.added_by, AccountId::from(MANAGERS_STAFF));
}

#[test]
fn reads_are_narrowed_per_role() {
    let service = service(store_with_property(3));
    let id = PropertyId::from("prop-1");

    let cases = [
        (ADMIN, vec!["a", "b", "c"]),
        (MANAGER, vec!["b", "c"]),
        (MANAGERS_STAFF, vec!["b", "c"]),
        (ADMINS_STAFF, vec!["a", "b", "c"]),
    ];
    for (actor, expected) in cases {
        let property = service.get(&AccountId::from(actor), &id).expect("visible");
        assert_eq!(scope_ids(&property), expected, "{actor}");
    }
}

#[test]
fn narrowing_leaves_the_stored_record_intact() {
    let store = store_with_property(3);
    let service = service(store.clone());

    let narrowed = service
        .get(&AccountId::from(MANAGER), &PropertyId::from("prop-1"))
        .expect("visible");
    assert_eq!(scope_ids(&narrowed), vec!["b", "c"]);

    let stored = store
        .fetch_property(&PropertyId::from("prop-1"))
        .expect("fetch")
        .expect("stored");
    assert_eq!(scope_ids(&stored), vec!["a", "b", "c"]);
}

#[test]
fn list_mine_only_returns_the_callers_properties() {
    let store = store_with_property(3);
    store
        .insert_property(property("prop-2", MANAGER, 1, &["c", "x"]))
        .expect("stored");
    let service = service(store);

    let mine = service.list_mine(&AccountId::from(MANAGER)).expect("listed");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, PropertyId::from("prop-2"));
    assert_eq!(scope_ids(&mine[0]), vec!["c"]);

    let all = service.list(&AccountId::from(ADMIN)).expect("listed");
    assert_eq!(all.len(), 2);
}

#[test]
fn unknown_caller_cannot_read() {
    let service = service(store_with_property(3));
    assert!(matches!(
        service.list(&AccountId::from("nobody")),
        Err(PropertyServiceError::ActorNotFound(_))
    ));
}

#[test]
fn update_and_delete_report_missing_records() {
    let service = service(store_with_accounts());
    let missing = PropertyId::from("prop-ghost");
    assert!(matches!(
        service.update(&missing, PropertyUpdate::default()),
        Err(PropertyServiceError::NotFound)
    ));
    assert!(matches!(
        service.delete(&missing),
        Err(PropertyServiceError::NotFound)
    ));
}
