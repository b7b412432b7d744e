use axum::extract::State;
use tracing::info;

use common::types::{ApiResponse, Location, LocationInput, LocationQuery};

use crate::errors::{ApiError, Envelope};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[utoipa::path(get, path = "/api/locations", tag = "locations", params(LocationQuery), responses((status = 200, description = "Filtered, sorted page of locations", body = crate::openapi::LocationListEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<LocationQuery>,
) -> Result<Envelope<Vec<Location>>, ApiError> {
    let page = state.locations.list(q).await?;
    info!(count = page.items.len(), total = page.total_count, "list locations");
    Ok(Envelope(ApiResponse::paged("Locations retrieved successfully", page)))
}

#[utoipa::path(get, path = "/api/locations/{id}", tag = "locations", params(("id" = i32, Path, description = "Location id")), responses((status = 200, description = "Location", body = crate::openapi::LocationEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Envelope<Location>, ApiError> {
    let l = state.locations.get(id).await?;
    Ok(Envelope(ApiResponse::success(200, "Location retrieved successfully", l)))
}

#[utoipa::path(post, path = "/api/locations", tag = "locations", request_body = LocationInput, responses((status = 201, description = "Created", body = crate::openapi::LocationEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LocationInput>,
) -> Result<Envelope<Location>, ApiError> {
    let l = state.locations.create(input).await?;
    Ok(Envelope(ApiResponse::success(201, "Location created successfully", l)))
}

#[utoipa::path(put, path = "/api/locations/{id}", tag = "locations", params(("id" = i32, Path, description = "Location id")), request_body = LocationInput, responses((status = 200, description = "Updated", body = crate::openapi::LocationEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<LocationInput>,
) -> Result<Envelope<Location>, ApiError> {
    let l = state.locations.update(id, input).await?;
    Ok(Envelope(ApiResponse::success(200, "Location updated successfully", l)))
}

#[utoipa::path(delete, path = "/api/locations/{id}", tag = "locations", params(("id" = i32, Path, description = "Location id")), responses((status = 200, description = "Deleted", body = crate::openapi::EmptyEnvelope), (status = 400, description = "Location still has shifts", body = crate::openapi::EmptyEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Envelope<()>, ApiError> {
    state.locations.delete(id).await?;
    Ok(Envelope(ApiResponse::empty(200, format!("Location {} deleted successfully", id))))
}

#[utoipa::path(get, path = "/api/locations/by-country/{country}", tag = "locations", params(("country" = String, Path, description = "Country, matched exactly ignoring case")), responses((status = 200, description = "Matching locations", body = crate::openapi::LocationListEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn by_country(
    State(state): State<AppState>,
    ApiPath(country): ApiPath<String>,
) -> Result<Envelope<Vec<Location>>, ApiError> {
    let items = state.locations.by_country(&country).await?;
    Ok(Envelope(ApiResponse::list("Locations retrieved successfully", items)))
}

#[utoipa::path(get, path = "/api/locations/by-county/{county}", tag = "locations", params(("county" = String, Path, description = "County, matched exactly ignoring case")), responses((status = 200, description = "Matching locations", body = crate::openapi::LocationListEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn by_county(
    State(state): State<AppState>,
    ApiPath(county): ApiPath<String>,
) -> Result<Envelope<Vec<Location>>, ApiError> {
    let items = state.locations.by_county(&county).await?;
    Ok(Envelope(ApiResponse::list("Locations retrieved successfully", items)))
}
