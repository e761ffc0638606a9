use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::domain::{NewRsl, Rsl, RslId, RslUpdate};
use super::repository::RslRepository;
use super::service::{RslService, RslServiceError};
use crate::api::{ActorId, ApiError, ApiJson, ApiResponse};
use crate::repository::RepositoryError;

type Rsls<R> = State<Arc<RslService<R>>>;

pub fn rsl_router<R>(service: Arc<RslService<R>>) -> Router
where
    R: RslRepository + 'static,
{
    Router::new()
        .route("/api/rsl", get(list_handler::<R>).post(create_handler::<R>))
        .route(
            "/api/rsl/:id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

fn api_error(err: RslServiceError, internal: &str) -> ApiError {
    match err {
        RslServiceError::Validation(failure) => failure.into(),
        RslServiceError::NotFound => ApiError::not_found("RSL not found"),
        RslServiceError::Repository(RepositoryError::Conflict(reason)) => ApiError::conflict(reason),
        RslServiceError::Repository(err) => ApiError::internal(internal, &err),
    }
}

async fn create_handler<R>(
    State(service): Rsls<R>,
    ActorId(_actor): ActorId,
    ApiJson(payload): ApiJson<NewRsl>,
) -> Result<ApiResponse<Rsl>, ApiError>
where
    R: RslRepository + 'static,
{
    service
        .create(payload)
        .map(|rsl| ApiResponse::created("RSL created successfully", rsl))
        .map_err(|err| api_error(err, "Something went wrong while creating RSL."))
}

async fn list_handler<R>(
    State(service): Rsls<R>,
    ActorId(_actor): ActorId,
) -> Result<ApiResponse<Vec<Rsl>>, ApiError>
where
    R: RslRepository + 'static,
{
    service
        .list()
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving RSLs"))
}

async fn get_handler<R>(
    State(service): Rsls<R>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<Rsl>, ApiError>
where
    R: RslRepository + 'static,
{
    service
        .get(&RslId(id))
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving RSL"))
}

async fn update_handler<R>(
    State(service): Rsls<R>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<RslUpdate>,
) -> Result<ApiResponse<Rsl>, ApiError>
where
    R: RslRepository + 'static,
{
    service
        .update(&RslId(id), update)
        .map(|rsl| ApiResponse::ok_with_message("RSL updated successfully", rsl))
        .map_err(|err| api_error(err, "Error updating RSL"))
}

async fn delete_handler<R>(
    State(service): Rsls<R>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError>
where
    R: RslRepository + 'static,
{
    service
        .delete(&RslId(id))
        .map(|_| ApiResponse::message("RSL deleted successfully"))
        .map_err(|err| api_error(err, "Error deleting RSL"))
}
