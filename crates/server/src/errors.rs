use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use common::types::ApiResponse;
use service::ServiceError;

use crate::metrics::FAILURES_TOTAL;

const INTERNAL_MESSAGE: &str = "an internal error occurred";

/// Envelope response; the HTTP status follows `response_code`.
pub struct Envelope<T>(pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.response_code).unwrap_or(StatusCode::OK);
        (status, Json(self.0)).into_response()
    }
}

/// Every handler failure, rendered as a failure envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Service(ServiceError::Validation(_) | ServiceError::Model(_)) => {
                (StatusCode::BAD_REQUEST, self.detail())
            }
            ApiError::Service(ServiceError::NotFound(_)) => (StatusCode::NOT_FOUND, self.detail()),
            ApiError::Service(ServiceError::Db(_)) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into()),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Service(e) => e.detail(),
            ApiError::BadRequest(m) => m.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            // detail stays in the log
            error!(error = %self, "request_failed");
        } else {
            info!(status = status.as_u16(), message = %message, "request_rejected");
        }
        FAILURES_TOTAL.with_label_values(&[status.as_str()]).inc();
        Envelope(ApiResponse::<()>::failure(status.as_u16(), message)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(format!("invalid request body: {}", e.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(format!("invalid query string: {}", e.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(format!("invalid path parameter: {}", e.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    fn status_of(e: ApiError) -> (StatusCode, String) {
        e.status_and_message()
    }

    #[test]
    fn maps_service_errors_to_status() {
        let (s, m) = status_of(ServiceError::Validation("overlap".into()).into());
        assert_eq!((s, m.as_str()), (StatusCode::BAD_REQUEST, "overlap"));

        let (s, m) = status_of(ServiceError::Model(ModelError::Validation("name is required".into())).into());
        assert_eq!((s, m.as_str()), (StatusCode::BAD_REQUEST, "name is required"));

        let (s, _) = status_of(ServiceError::not_found("worker", 3).into());
        assert_eq!(s, StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_detail_is_not_exposed() {
        let (s, m) = status_of(ServiceError::Db("connection refused on 10.0.0.5".into()).into());
        assert_eq!(s, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(m, INTERNAL_MESSAGE);
    }

    #[test]
    fn envelope_status_follows_code() {
        let res = Envelope(ApiResponse::success(201, "created", 1)).into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
        let res = ApiError::BadRequest("bad".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
