use axum::extract::State;
use tracing::info;

use common::types::{ApiResponse, DateRangeQuery, Shift, ShiftInput, ShiftQuery};

use crate::errors::{ApiError, Envelope};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[utoipa::path(get, path = "/api/shifts", tag = "shifts", params(ShiftQuery), responses((status = 200, description = "Filtered, sorted page of shifts", body = crate::openapi::ShiftListEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ShiftQuery>,
) -> Result<Envelope<Vec<Shift>>, ApiError> {
    let page = state.shifts.list(q).await?;
    info!(count = page.items.len(), total = page.total_count, "list shifts");
    Ok(Envelope(ApiResponse::paged("Shifts retrieved successfully", page)))
}

#[utoipa::path(get, path = "/api/shifts/{id}", tag = "shifts", params(("id" = i32, Path, description = "Shift id")), responses((status = 200, description = "Shift", body = crate::openapi::ShiftEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Envelope<Shift>, ApiError> {
    let s = state.shifts.get(id).await?;
    Ok(Envelope(ApiResponse::success(200, "Shift retrieved successfully", s)))
}

/// Rejected when the worker already has an overlapping shift at the location.
#[utoipa::path(post, path = "/api/shifts", tag = "shifts", request_body = ShiftInput, responses((status = 201, description = "Created", body = crate::openapi::ShiftEnvelope), (status = 400, description = "Invalid times, unknown references or overlap", body = crate::openapi::EmptyEnvelope)))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ShiftInput>,
) -> Result<Envelope<Shift>, ApiError> {
    let s = state.shifts.create(input).await?;
    Ok(Envelope(ApiResponse::success(201, "Shift created successfully", s)))
}

#[utoipa::path(put, path = "/api/shifts/{id}", tag = "shifts", params(("id" = i32, Path, description = "Shift id")), request_body = ShiftInput, responses((status = 200, description = "Updated", body = crate::openapi::ShiftEnvelope), (status = 400, description = "Invalid times, unknown references or overlap", body = crate::openapi::EmptyEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<ShiftInput>,
) -> Result<Envelope<Shift>, ApiError> {
    let s = state.shifts.update(id, input).await?;
    Ok(Envelope(ApiResponse::success(200, "Shift updated successfully", s)))
}

#[utoipa::path(delete, path = "/api/shifts/{id}", tag = "shifts", params(("id" = i32, Path, description = "Shift id")), responses((status = 200, description = "Deleted", body = crate::openapi::EmptyEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Envelope<()>, ApiError> {
    state.shifts.delete(id).await?;
    Ok(Envelope(ApiResponse::empty(200, format!("Shift {} deleted successfully", id))))
}

#[utoipa::path(get, path = "/api/shifts/by-date-range", tag = "shifts", params(DateRangeQuery), responses((status = 200, description = "Shifts inside the range", body = crate::openapi::ShiftListEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn by_date_range(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<DateRangeQuery>,
) -> Result<Envelope<Vec<Shift>>, ApiError> {
    let items = state.shifts.by_date_range(q.start_date, q.end_date).await?;
    Ok(Envelope(ApiResponse::list("Shifts retrieved successfully", items)))
}

#[utoipa::path(get, path = "/api/shifts/by-worker/{id}", tag = "shifts", params(("id" = i32, Path, description = "Worker id")), responses((status = 200, description = "Shifts of the worker", body = crate::openapi::ShiftListEnvelope)))]
pub async fn by_worker(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Envelope<Vec<Shift>>, ApiError> {
    let items = state.shifts.by_worker(id).await?;
    Ok(Envelope(ApiResponse::list("Shifts retrieved successfully", items)))
}

#[utoipa::path(get, path = "/api/shifts/by-location/{id}", tag = "shifts", params(("id" = i32, Path, description = "Location id")), responses((status = 200, description = "Shifts at the location", body = crate::openapi::ShiftListEnvelope)))]
pub async fn by_location(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Envelope<Vec<Shift>>, ApiError> {
    let items = state.shifts.by_location(id).await?;
    Ok(Envelope(ApiResponse::list("Shifts retrieved successfully", items)))
}
