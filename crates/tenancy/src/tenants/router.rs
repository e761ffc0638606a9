use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use super::domain::{RoomNumber, Tenant, TenantId, TenantProfile};
use super::listing::{TenantPage, TenantQuery};
use super::report::{ReportFormat, TenantReport};
use super::repository::TenantRepository;
use super::service::{TenantService, TenantServiceError};
use crate::accounts::AccountRepository;
use crate::api::{ActorId, ApiError, ApiJson, ApiQuery, ApiResponse};
use crate::properties::{PropertyId, PropertyRepository};

type Tenants<T, P, A> = State<Arc<TenantService<T, P, A>>>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RoomQuery {
    exclude: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    format: ReportFormat,
}

/// Router builder exposing tenant CRUD, listing, export and room lookup.
pub fn tenant_router<T, P, A>(service: Arc<TenantService<T, P, A>>) -> Router
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    Router::new()
        .route(
            "/api/tenants",
            get(list_handler::<T, P, A>).post(create_handler::<T, P, A>),
        )
        .route("/api/tenants/export", get(export_handler::<T, P, A>))
        .route(
            "/api/tenants/property/:property_id",
            get(by_property_handler::<T, P, A>),
        )
        .route(
            "/api/tenants/property/:property_id/rooms",
            get(rooms_handler::<T, P, A>),
        )
        .route("/api/tenants/:id/report", get(report_handler::<T, P, A>))
        .route(
            "/api/tenants/:id",
            get(get_handler::<T, P, A>)
                .put(update_handler::<T, P, A>)
                .delete(delete_handler::<T, P, A>),
        )
        .with_state(service)
}

fn api_error(err: TenantServiceError, internal: &str) -> ApiError {
    match err {
        TenantServiceError::Validation(failure) => failure.into(),
        TenantServiceError::ActorNotFound(_) => ApiError::not_found("User not found"),
        TenantServiceError::NotFound => ApiError::not_found("Tenant not found"),
        TenantServiceError::PropertyNotFound => ApiError::not_found("Property not found"),
        TenantServiceError::RoomTaken(_) => {
            ApiError::conflict("This room is already occupied by an active tenant")
        }
        other => ApiError::internal(internal, &other),
    }
}

pub(crate) async fn create_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(actor): ActorId,
    ApiJson(profile): ApiJson<TenantProfile>,
) -> Result<ApiResponse<Tenant>, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .create(&actor, profile)
        .map(|tenant| ApiResponse::created("Tenant created successfully", tenant))
        .map_err(|err| api_error(err, "Something went wrong while creating tenant."))
}

pub(crate) async fn list_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(actor): ActorId,
    ApiQuery(query): ApiQuery<TenantQuery>,
) -> Result<ApiResponse<TenantPage>, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .list(&actor, &query)
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving tenants"))
}

pub(crate) async fn export_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(actor): ActorId,
    ApiQuery(query): ApiQuery<TenantQuery>,
) -> Result<Response, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    let body = service
        .export(&actor, &query)
        .map_err(|err| api_error(err, "Error exporting tenants"))?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"tenants.csv\""),
        ],
        body,
    )
        .into_response())
}

/// JSON sections by default; `?format=text` downloads the rendered text.
pub(crate) async fn report_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<Response, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    let report: TenantReport = service
        .report(&TenantId(id))
        .map_err(|err| api_error(err, "Error generating tenant report"))?;
    Ok(match query.format {
        ReportFormat::Json => ApiResponse::ok(report).into_response(),
        ReportFormat::Text => {
            let disposition = format!("attachment; filename=\"{}\"", report.file_name);
            (
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                report.to_string(),
            )
                .into_response()
        }
    })
}

pub(crate) async fn get_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<Tenant>, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .get(&TenantId(id))
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving tenant"))
}

pub(crate) async fn by_property_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(_actor): ActorId,
    Path(property_id): Path<String>,
) -> Result<ApiResponse<Vec<Tenant>>, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .list_by_property(&PropertyId(property_id))
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving tenants"))
}

pub(crate) async fn rooms_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(_actor): ActorId,
    Path(property_id): Path<String>,
    ApiQuery(query): ApiQuery<RoomQuery>,
) -> Result<ApiResponse<Vec<RoomNumber>>, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    let exclude = query
        .exclude
        .filter(|value| !value.trim().is_empty())
        .map(TenantId);
    service
        .available_rooms(&PropertyId(property_id), exclude.as_ref())
        .map(ApiResponse::ok)
        .map_err(|err| api_error(err, "Error retrieving available rooms"))
}

pub(crate) async fn update_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
    ApiJson(profile): ApiJson<TenantProfile>,
) -> Result<ApiResponse<Tenant>, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .update(&TenantId(id), profile)
        .map(|tenant| ApiResponse::ok_with_message("Tenant updated successfully", tenant))
        .map_err(|err| api_error(err, "Error updating tenant"))
}

pub(crate) async fn delete_handler<T, P, A>(
    State(service): Tenants<T, P, A>,
    ActorId(_actor): ActorId,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError>
where
    T: TenantRepository + 'static,
    P: PropertyRepository + 'static,
    A: AccountRepository + 'static,
{
    service
        .delete(&TenantId(id))
        .map(|_| ApiResponse::message("Tenant deleted successfully"))
        .map_err(|err| api_error(err, "Error deleting tenant"))
}
