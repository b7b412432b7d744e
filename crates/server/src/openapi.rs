use common::types::{Location, LocationInput, Shift, ShiftInput, SortOrder, Worker, WorkerInput};
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Failure envelope, also returned by delete.
#[derive(ToSchema)]
pub struct EmptyEnvelope {
    pub request_failed: bool,
    pub response_code: u16,
    pub message: String,
}

// documentation-only shapes of `ApiResponse<T>` per payload
macro_rules! envelope_docs {
    ($one:ident, $many:ident, $t:ident) => {
        #[derive(ToSchema)]
        pub struct $one {
            pub request_failed: bool,
            pub response_code: u16,
            pub message: String,
            pub data: $t,
        }

        #[derive(ToSchema)]
        pub struct $many {
            pub request_failed: bool,
            pub response_code: u16,
            pub message: String,
            pub data: Vec<$t>,
            pub total_count: u64,
            pub page_number: Option<u64>,
            pub page_size: Option<u64>,
        }
    };
}

envelope_docs!(WorkerEnvelope, WorkerListEnvelope, Worker);
envelope_docs!(LocationEnvelope, LocationListEnvelope, Location);
envelope_docs!(ShiftEnvelope, ShiftListEnvelope, Shift);

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::workers::list,
        crate::routes::workers::get,
        crate::routes::workers::create,
        crate::routes::workers::update,
        crate::routes::workers::delete,
        crate::routes::workers::by_email_domain,
        crate::routes::workers::by_phone_area_code,
        crate::routes::locations::list,
        crate::routes::locations::get,
        crate::routes::locations::create,
        crate::routes::locations::update,
        crate::routes::locations::delete,
        crate::routes::locations::by_country,
        crate::routes::locations::by_county,
        crate::routes::shifts::list,
        crate::routes::shifts::get,
        crate::routes::shifts::create,
        crate::routes::shifts::update,
        crate::routes::shifts::delete,
        crate::routes::shifts::by_date_range,
        crate::routes::shifts::by_worker,
        crate::routes::shifts::by_location,
    ),
    components(
        schemas(
            HealthResponse,
            EmptyEnvelope,
            Worker,
            WorkerInput,
            Location,
            LocationInput,
            Shift,
            ShiftInput,
            SortOrder,
            WorkerEnvelope,
            WorkerListEnvelope,
            LocationEnvelope,
            LocationListEnvelope,
            ShiftEnvelope,
            ShiftListEnvelope,
        )
    ),
    tags(
        (name = "health"),
        (name = "workers"),
        (name = "locations"),
        (name = "shifts")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in [
            "/health",
            "/api/workers",
            "/api/workers/{id}",
            "/api/locations/by-county/{county}",
            "/api/shifts/by-date-range",
            "/api/shifts/by-location/{id}",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        assert!(doc["components"]["schemas"]["ShiftInput"].is_object());
    }
}
