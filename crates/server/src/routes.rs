use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{ApiResponse, Health};

use crate::errors::Envelope;
use crate::metrics;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod locations;
pub mod shifts;
pub mod workers;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok".into() })
}

async fn not_found(uri: Uri) -> Envelope<()> {
    Envelope(ApiResponse::failure(StatusCode::NOT_FOUND.as_u16(), format!("no route for {}", uri.path())))
}

/// Rewrites the router's bare 405 into a failure envelope, keeping `Allow`.
async fn method_not_allowed(res: Response) -> Response {
    if res.status() != StatusCode::METHOD_NOT_ALLOWED {
        return res;
    }
    let allow = res.headers().get(header::ALLOW).cloned();
    let mut envelope =
        Envelope(ApiResponse::<()>::failure(StatusCode::METHOD_NOT_ALLOWED.as_u16(), "method not allowed")).into_response();
    if let Some(allow) = allow {
        envelope.headers_mut().insert(header::ALLOW, allow);
    }
    envelope
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/workers", get(workers::list).post(workers::create))
        .route("/api/workers/:id", get(workers::get).put(workers::update).delete(workers::delete))
        .route("/api/workers/by-email-domain/:domain", get(workers::by_email_domain))
        .route("/api/workers/by-phone-area-code/:code", get(workers::by_phone_area_code))
        .route("/api/locations", get(locations::list).post(locations::create))
        .route("/api/locations/:id", get(locations::get).put(locations::update).delete(locations::delete))
        .route("/api/locations/by-country/:country", get(locations::by_country))
        .route("/api/locations/by-county/:county", get(locations::by_county))
        .route("/api/shifts", get(shifts::list).post(shifts::create))
        .route("/api/shifts/by-date-range", get(shifts::by_date_range))
        .route("/api/shifts/by-worker/:id", get(shifts::by_worker))
        .route("/api/shifts/by-location/:id", get(shifts::by_location))
        .route("/api/shifts/:id", get(shifts::get).put(shifts::update).delete(shifts::delete))
}

/// Build the full application router: API, health and OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let api = api_routes()
        .route_layer(middleware::from_fn(metrics::track))
        .with_state(state);

    public
        .merge(api)
        .fallback(not_found)
        .layer(middleware::map_response(method_not_allowed))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use configs::DatabaseConfig;
    use tower::ServiceExt;

    use crate::startup::{build_app, prepare_database};

    async fn app() -> axum::Router {
        let db = prepare_database(&DatabaseConfig::with_url("sqlite::memory:")).await.unwrap();
        build_app(db)
    }

    async fn call(app: axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn static_segments_win_over_id_routes() {
        let req = Request::get("/api/shifts/by-date-range?start_date=01-01-2025%2000:00&end_date=02-01-2025%2000:00")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(app().await, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_count"], 0);
    }

    #[tokio::test]
    async fn missing_range_bound_is_bad_request() {
        let req = Request::get("/api/shifts/by-date-range?start_date=01-01-2025%2000:00").body(Body::empty()).unwrap();
        let (status, body) = call(app().await, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["request_failed"], true);
    }

    #[tokio::test]
    async fn unknown_shift_is_not_found() {
        let req = Request::delete("/api/shifts/41").body(Body::empty()).unwrap();
        let (status, body) = call(app().await, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "shift 41 not found");
    }

    #[tokio::test]
    async fn unmatched_path_gets_failure_envelope() {
        let req = Request::get("/api/nope").body(Body::empty()).unwrap();
        let (status, body) = call(app().await, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["request_failed"], true);
        assert_eq!(body["response_code"], 404);
        assert_eq!(body["message"], "no route for /api/nope");
    }

    #[tokio::test]
    async fn wrong_method_gets_failure_envelope() {
        let req = Request::delete("/api/workers").body(Body::empty()).unwrap();
        let res = app().await.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        let allow = res.headers().get(axum::http::header::ALLOW).unwrap().to_str().unwrap().to_string();
        assert!(allow.contains("GET") && allow.contains("POST"), "{allow}");
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["request_failed"], true);
        assert_eq!(body["response_code"], 405);
        assert_eq!(body["message"], "method not allowed");
    }

    #[tokio::test]
    async fn wrong_content_type_is_bad_request() {
        let req = Request::post("/api/locations").body(Body::from("name=x")).unwrap();
        let (status, body) = call(app().await, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("invalid request body"));
    }
}
