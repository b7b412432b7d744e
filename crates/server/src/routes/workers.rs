use axum::extract::State;
use tracing::info;

use common::types::{ApiResponse, Worker, WorkerInput, WorkerQuery};

use crate::errors::{ApiError, Envelope};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[utoipa::path(get, path = "/api/workers", tag = "workers", params(WorkerQuery), responses((status = 200, description = "Filtered, sorted page of workers", body = crate::openapi::WorkerListEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<WorkerQuery>,
) -> Result<Envelope<Vec<Worker>>, ApiError> {
    let page = state.workers.list(q).await?;
    info!(count = page.items.len(), total = page.total_count, "list workers");
    Ok(Envelope(ApiResponse::paged("Workers retrieved successfully", page)))
}

#[utoipa::path(get, path = "/api/workers/{id}", tag = "workers", params(("id" = i32, Path, description = "Worker id")), responses((status = 200, description = "Worker", body = crate::openapi::WorkerEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Envelope<Worker>, ApiError> {
    let w = state.workers.get(id).await?;
    Ok(Envelope(ApiResponse::success(200, "Worker retrieved successfully", w)))
}

#[utoipa::path(post, path = "/api/workers", tag = "workers", request_body = WorkerInput, responses((status = 201, description = "Created", body = crate::openapi::WorkerEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<WorkerInput>,
) -> Result<Envelope<Worker>, ApiError> {
    let w = state.workers.create(input).await?;
    Ok(Envelope(ApiResponse::success(201, "Worker created successfully", w)))
}

#[utoipa::path(put, path = "/api/workers/{id}", tag = "workers", params(("id" = i32, Path, description = "Worker id")), request_body = WorkerInput, responses((status = 200, description = "Updated", body = crate::openapi::WorkerEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<WorkerInput>,
) -> Result<Envelope<Worker>, ApiError> {
    let w = state.workers.update(id, input).await?;
    Ok(Envelope(ApiResponse::success(200, "Worker updated successfully", w)))
}

#[utoipa::path(delete, path = "/api/workers/{id}", tag = "workers", params(("id" = i32, Path, description = "Worker id")), responses((status = 200, description = "Deleted", body = crate::openapi::EmptyEnvelope), (status = 400, description = "Worker still has shifts", body = crate::openapi::EmptyEnvelope), (status = 404, description = "Not Found", body = crate::openapi::EmptyEnvelope)))]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Envelope<()>, ApiError> {
    state.workers.delete(id).await?;
    Ok(Envelope(ApiResponse::empty(200, format!("Worker {} deleted successfully", id))))
}

#[utoipa::path(get, path = "/api/workers/by-email-domain/{domain}", tag = "workers", params(("domain" = String, Path, description = "Domain after the @")), responses((status = 200, description = "Matching workers", body = crate::openapi::WorkerListEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn by_email_domain(
    State(state): State<AppState>,
    ApiPath(domain): ApiPath<String>,
) -> Result<Envelope<Vec<Worker>>, ApiError> {
    let items = state.workers.by_email_domain(&domain).await?;
    Ok(Envelope(ApiResponse::list("Workers retrieved successfully", items)))
}

#[utoipa::path(get, path = "/api/workers/by-phone-area-code/{code}", tag = "workers", params(("code" = String, Path, description = "Leading digits of the phone number")), responses((status = 200, description = "Matching workers", body = crate::openapi::WorkerListEnvelope), (status = 400, description = "Bad Request", body = crate::openapi::EmptyEnvelope)))]
pub async fn by_phone_area_code(
    State(state): State<AppState>,
    ApiPath(code): ApiPath<String>,
) -> Result<Envelope<Vec<Worker>>, ApiError> {
    let items = state.workers.by_phone_area_code(&code).await?;
    Ok(Envelope(ApiResponse::list("Workers retrieved successfully", items)))
}
