use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::domain::{AccountId, Actor, NewStaff, NewUser, Staff, StaffUpdate, User, UserUpdate};
use super::repository::AccountRepository;
use super::service::{AccountService, AccountServiceError};
use crate::api::{ActorId, ApiError, ApiJson, ApiResponse};

type Accounts<A> = State<Arc<AccountService<A>>>;

pub fn user_router<A>(service: Arc<AccountService<A>>) -> Router
where
    A: AccountRepository + 'static,
{
    Router::new()
        .route(
            "/api/users",
            get(list_users_handler::<A>).post(create_user_handler::<A>),
        )
        .route("/api/users/me", get(me_handler::<A>))
        .route(
            "/api/users/:id",
            get(get_user_handler::<A>)
                .put(update_user_handler::<A>)
                .delete(delete_user_handler::<A>),
        )
        .with_state(service)
}

pub fn staff_router<A>(service: Arc<AccountService<A>>) -> Router
where
    A: AccountRepository + 'static,
{
    Router::new()
        .route(
            "/api/staff",
            get(list_staff_handler::<A>).post(create_staff_handler::<A>),
        )
        .route(
            "/api/staff/:id",
            get(get_staff_handler::<A>)
                .put(update_staff_handler::<A>)
                .delete(delete_staff_handler::<A>),
        )
        .with_state(service)
}

fn api_error(err: AccountServiceError, subject: &str, internal: &str) -> ApiError {
    match err {
        AccountServiceError::Validation(failure) => failure.into(),
        AccountServiceError::NotFound => ApiError::not_found(format!("{subject} not found")),
        AccountServiceError::ActorNotFound(_) => ApiError::not_found("User not found"),
        AccountServiceError::Repository(crate::repository::RepositoryError::Conflict(reason)) => {
            ApiError::conflict(reason)
        }
        other => ApiError::internal(internal, &other),
    }
}

/// Runs account writes on the blocking pool; they hash passwords.
async fn off_runtime<A, T>(
    service: Arc<AccountService<A>>,
    work: impl FnOnce(&AccountService<A>) -> Result<T, AccountServiceError> + Send + 'static,
) -> Result<T, AccountServiceError>
where
    A: AccountRepository + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&service)).await?
}

pub(crate) async fn me_handler<A>(
    State(service): Accounts<A>,
    ActorId(actor): ActorId,
) -> Result<ApiResponse<Actor>, ApiError>
where
    A: AccountRepository + 'static,
{
    service
        .me(&actor)
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "User", "Error retrieving user"))
}

pub(crate) async fn create_user_handler<A>(
    State(service): Accounts<A>,
    ActorId(_actor): ActorId,
    ApiJson(payload): ApiJson<NewUser>,
) -> Result<ApiResponse<User>, ApiError>
where
    A: AccountRepository + 'static,
{
    off_runtime(service, move |service| service.create_user(payload))
        .await
        .map(|user| ApiResponse::created("User created successfully", user))
        .map_err(|err| api_error(err, "User", "Something went wrong while creating user."))
}

pub(crate) async fn list_users_handler<A>(
    State(service): Accounts<A>,
    ActorId(_actor): ActorId,
) -> Result<ApiResponse<Vec<User>>, ApiError>
where
    A: AccountRepository + 'static,
{
    service
        .list_users()
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "User", "Error retrieving users"))
}

pub(crate) async fn get_user_handler<A>(
    State(service): Accounts<A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<User>, ApiError>
where
    A: AccountRepository + 'static,
{
    service
        .get_user(&AccountId(id))
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "User", "Error retrieving user"))
}

pub(crate) async fn update_user_handler<A>(
    State(service): Accounts<A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> Result<ApiResponse<User>, ApiError>
where
    A: AccountRepository + 'static,
{
    off_runtime(service, move |service| service.update_user(&AccountId(id), update))
        .await
        .map(|user| ApiResponse::ok_with_message("User updated successfully", user))
        .map_err(|err| api_error(err, "User", "Error updating user"))
}

pub(crate) async fn delete_user_handler<A>(
    State(service): Accounts<A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError>
where
    A: AccountRepository + 'static,
{
    service
        .delete_user(&AccountId(id))
        .map(|_| ApiResponse::message("User deleted successfully"))
        .map_err(|err| api_error(err, "User", "Error deleting user"))
}

pub(crate) async fn create_staff_handler<A>(
    State(service): Accounts<A>,
    ActorId(actor): ActorId,
    ApiJson(payload): ApiJson<NewStaff>,
) -> Result<ApiResponse<Staff>, ApiError>
where
    A: AccountRepository + 'static,
{
    off_runtime(service, move |service| service.create_staff(&actor, payload))
        .await
        .map(|staff| ApiResponse::created("Staff created successfully", staff))
        .map_err(|err| api_error(err, "Staff", "Something went wrong while creating staff."))
}

pub(crate) async fn list_staff_handler<A>(
    State(service): Accounts<A>,
    ActorId(actor): ActorId,
) -> Result<ApiResponse<Vec<Staff>>, ApiError>
where
    A: AccountRepository + 'static,
{
    service
        .list_staff(&actor)
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Staff", "Error retrieving staff"))
}

pub(crate) async fn get_staff_handler<A>(
    State(service): Accounts<A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<Staff>, ApiError>
where
    A: AccountRepository + 'static,
{
    service
        .get_staff(&AccountId(id))
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Staff", "Error retrieving staff"))
}

pub(crate) async fn update_staff_handler<A>(
    State(service): Accounts<A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<StaffUpdate>,
) -> Result<ApiResponse<Staff>, ApiError>
where
    A: AccountRepository + 'static,
{
    off_runtime(service, move |service| service.update_staff(&AccountId(id), update))
        .await
        .map(|staff| ApiResponse::ok_with_message("Staff updated successfully", staff))
        .map_err(|err| api_error(err, "Staff", "Error updating staff"))
}

pub(crate) async fn delete_staff_handler<A>(
    State(service): Accounts<A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError>
where
    A: AccountRepository + 'static,
{
    service
        .delete_staff(&AccountId(id))
        .map(|_| ApiResponse::message("Staff deleted successfully"))
        .map_err(|err| api_error(err, "Staff", "Error deleting staff"))
}
