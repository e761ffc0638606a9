use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::domain::{NewProperty, Property, PropertyId, PropertyUpdate};
use super::repository::PropertyRepository;
use super::service::{PropertyService, PropertyServiceError};
use crate::accounts::AccountRepository;
use crate::api::{ActorId, ApiError, ApiJson, ApiResponse};

type Properties<P, A> = State<Arc<PropertyService<P, A>>>;

/// Router builder exposing property CRUD under `/api/properties`.
pub fn property_router<P, A>(service: Arc<PropertyService<P, A>>) -> Router
where
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    Router::new()
        .route(
            "/api/properties",
            get(list_handler::<P, A>).post(create_handler::<P, A>),
        )
        .route("/api/properties/mine", get(list_mine_handler::<P, A>))
        .route(
            "/api/properties/:id",
            get(get_handler::<P, A>)
                .put(update_handler::<P, A>)
                .delete(delete_handler::<P, A>),
        )
        .with_state(service)
}

fn api_error(err: PropertyServiceError, internal: &str) -> ApiError {
    match err {
        PropertyServiceError::MissingAddedBy => ApiError::bad_request("AddedBy field is required."),
        PropertyServiceError::CreatorNotFound(_) => {
            ApiError::not_found("User or Staff not found for the given addedBy ID.")
        }
        PropertyServiceError::ActorNotFound(_) => ApiError::not_found("User not found"),
        PropertyServiceError::NotFound => ApiError::not_found("Property not found"),
        PropertyServiceError::Repository(err) => ApiError::internal(internal, &err),
    }
}

pub(crate) async fn create_handler<P, A>(
    State(service): Properties<P, A>,
    ActorId(_actor): ActorId,
    ApiJson(payload): ApiJson<NewProperty>,
) -> Result<ApiResponse<Property>, ApiError>
where
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .create(payload)
        .map(|property| ApiResponse::created("Property created successfully", property))
        .map_err(|err| api_error(err, "Something went wrong while creating property."))
}

pub(crate) async fn get_handler<P, A>(
    State(service): Properties<P, A>,
    ActorId(actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<Property>, ApiError>
where
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .get(&actor, &PropertyId(id))
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving property"))
}

pub(crate) async fn list_handler<P, A>(
    State(service): Properties<P, A>,
    ActorId(actor): ActorId,
) -> Result<ApiResponse<Vec<Property>>, ApiError>
where
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .list(&actor)
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving properties"))
}

pub(crate) async fn list_mine_handler<P, A>(
    State(service): Properties<P, A>,
    ActorId(actor): ActorId,
) -> Result<ApiResponse<Vec<Property>>, ApiError>
where
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .list_mine(&actor)
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving properties"))
}

pub(crate) async fn update_handler<P, A>(
    State(service): Properties<P, A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<PropertyUpdate>,
) -> Result<ApiResponse<Property>, ApiError>
where
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .update(&PropertyId(id), update)
        .map(|property| ApiResponse::ok_with_message("Property updated successfully", property))
        .map_err(|err| api_error(err, "Error updating property"))
}

pub(crate) async fn delete_handler<P, A>(
    State(service): Properties<P, A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError>
where
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .delete(&PropertyId(id))
        .map(|_| ApiResponse::message("Property deleted successfully"))
        .map_err(|err| api_error(err, "Error deleting property"))
}
