use crate::accounts::password::verify_password;
use crate::accounts::{
    AccountId, AccountRepository, AccountService, AccountServiceError, Gender, NewStaff, NewUser,
    Role, StaffUpdate, UserUpdate,
};
use crate::repository::RepositoryError;
use crate::testing::{store_with_accounts, ADMIN, MANAGER, MANAGERS_STAFF};

fn new_user(username: &str) -> NewUser {
    NewUser {
        first_name: "Nia".to_string(),
        last_name: "Brown".to_string(),
        username: username.to_string(),
        email: format!("{username}@example.org"),
        password: "first-password".to_string(),
        role: Some(Role::Manager),
        rsls: Vec::new(),
        added_by: None,
    }
}

fn new_staff(username: &str) -> NewStaff {
    NewStaff {
        job_title: "Housing officer".to_string(),
        first_name: "Tomi".to_string(),
        last_name: "Ola".to_string(),
        phone: "07700900123".to_string(),
        gender: Some(Gender::Male),
        username: username.to_string(),
        email: format!("{username}@example.org"),
        corresponding_email: format!("{username}.alt@example.org"),
        password: "staff-password".to_string(),
        rsls: Vec::new(),
    }
}

#[test]
fn create_user_hashes_the_password() {
    let store = store_with_accounts();
    let service = AccountService::new(store.clone());

    let created = service.create_user(new_user("nbrown")).expect("created");
    assert!(created.id.as_str().starts_with("user-"));
    assert!(verify_password("first-password", &created.password_hash).expect("verify"));

    let stored = store.fetch_user(&created.id).expect("fetch").expect("stored");
    assert_eq!(stored.password_hash, created.password_hash);
}

#[test]
fn create_user_rejects_unknown_creator() {
    let service = AccountService::new(store_with_accounts());
    let mut payload = new_user("delegate");
    payload.role = Some(Role::Delegate);
    payload.added_by = Some(AccountId::from("user-ghost"));

    match service.create_user(payload) {
        Err(AccountServiceError::Validation(failure)) => {
            assert_eq!(failure.fields.get("addedBy"), Some("Creator not found"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn duplicate_username_surfaces_as_conflict() {
    let service = AccountService::new(store_with_accounts());
    service.create_user(new_user("taken")).expect("first");

    let err = service.create_user(new_user("taken")).expect_err("duplicate");
    assert!(matches!(
        err,
        AccountServiceError::Repository(RepositoryError::Conflict(_))
    ));
}

#[test]
fn update_user_rehashes_a_new_password_and_ignores_blanks() {
    let service = AccountService::new(store_with_accounts());
    let created = service.create_user(new_user("rehash")).expect("created");

    let updated = service
        .update_user(
            &created.id,
            UserUpdate {
                first_name: Some("   ".to_string()),
                password: Some("second-password".to_string()),
                ..UserUpdate::default()
            },
        )
        .expect("updated");

    assert_eq!(updated.first_name, "Nia");
    assert!(verify_password("second-password", &updated.password_hash).expect("verify"));
    assert!(!verify_password("first-password", &updated.password_hash).expect("verify"));
}

#[test]
fn staff_are_owned_by_their_creator_and_always_delegates() {
    let service = AccountService::new(store_with_accounts());
    let created = service
        .create_staff(&AccountId::from(MANAGER), new_staff("tola"))
        .expect("created");

    assert_eq!(created.role, Role::Delegate);
    assert_eq!(created.added_by, AccountId::from(MANAGER));

    let updated = service
        .update_staff(
            &created.id,
            StaffUpdate {
                job_title: Some("Team lead".to_string()),
                ..StaffUpdate::default()
            },
        )
        .expect("updated");
    assert_eq!(updated.job_title, "Team lead");
    assert_eq!(updated.role, Role::Delegate);
}

#[test]
fn staff_listing_is_scoped_to_the_creator() {
    let service = AccountService::new(store_with_accounts());

    let mine: Vec<String> = service
        .list_staff(&AccountId::from(MANAGER))
        .expect("list")
        .into_iter()
        .map(|member| member.id.0)
        .collect();
    assert_eq!(mine, vec![MANAGERS_STAFF.to_string()]);

    let everyone = service.list_staff(&AccountId::from(ADMIN)).expect("list");
    assert_eq!(everyone.len(), 2);
}

#[test]
fn create_staff_requires_a_known_caller() {
    let service = AccountService::new(store_with_accounts());
    let err = service
        .create_staff(&AccountId::from("nobody"), new_staff("orphan"))
        .expect_err("unknown caller");
    assert!(matches!(err, AccountServiceError::ActorNotFound(id) if id.as_str() == "nobody"));
}

#[test]
fn me_resolves_staff_before_failing() {
    let service = AccountService::new(store_with_accounts());
    let actor = service.me(&AccountId::from(MANAGERS_STAFF)).expect("staff found");
    assert_eq!(actor.role, Role::Delegate);
    assert_eq!(actor.added_by, Some(AccountId::from(MANAGER)));

    assert!(matches!(
        service.me(&AccountId::from("nobody")),
        Err(AccountServiceError::ActorNotFound(_))
    ));
}

#[test]
fn update_cannot_demote_to_delegate_without_a_creator() {
    let service = AccountService::new(store_with_accounts());
    let created = service.create_user(new_user("orphan")).expect("created");

    let update = UserUpdate {
        role: Some(Role::Delegate),
        ..UserUpdate::default()
    };
    match service.update_user(&created.id, update) {
        Err(AccountServiceError::Validation(failure)) => {
            assert_eq!(failure.fields.get("addedBy"), Some("Delegated accounts need a creator"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(service.get_user(&created.id).expect("stored").role, Role::Manager);
}

#[test]
fn update_rejects_unknown_or_self_creator() {
    let service = AccountService::new(store_with_accounts());
    let created = service.create_user(new_user("reassigned")).expect("created");

    for creator in ["user-ghost", created.id.as_str()] {
        let update = UserUpdate {
            role: Some(Role::Delegate),
            added_by: Some(AccountId::from(creator)),
            ..UserUpdate::default()
        };
        let err = service
            .update_user(&created.id, update)
            .expect_err("creator rejected");
        assert!(matches!(err, AccountServiceError::Validation(_)), "{creator}");
    }

    let update = UserUpdate {
        role: Some(Role::Delegate),
        added_by: Some(AccountId::from(MANAGER)),
        ..UserUpdate::default()
    };
    let updated = service.update_user(&created.id, update).expect("known creator");
    assert_eq!(updated.added_by, Some(AccountId::from(MANAGER)));
}
