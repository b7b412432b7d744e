use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{non_blank, PageRequest, SortOrder};
use crate::datetime::{wire, wire_opt};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Shift {
    pub shift_id: i32,
    pub worker_id: i32,
    pub location_id: i32,
    #[serde(with = "wire")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub start_time: NaiveDateTime,
    #[serde(with = "wire")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShiftInput {
    pub worker_id: i32,
    pub location_id: i32,
    #[serde(with = "wire")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub start_time: NaiveDateTime,
    #[serde(with = "wire")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub end_time: NaiveDateTime,
}

/// Query string of `GET /api/shifts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams), into_params(parameter_in = Query))]
pub struct ShiftQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i32>,
    /// Shifts starting at or after this time.
    #[serde(default, with = "wire_opt", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", param(value_type = Option<String>))]
    pub start_date: Option<NaiveDateTime>,
    /// Shifts ending at or before this time.
    #[serde(default, with = "wire_opt", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", param(value_type = Option<String>))]
    pub end_date: Option<NaiveDateTime>,
    /// Case-insensitive match on the worker name or location name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

impl ShiftQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn normalized(&self) -> Self {
        Self {
            search: non_blank(self.search.clone()),
            sort_by: non_blank(self.sort_by.clone()),
            ..self.clone()
        }
    }
}

/// Query string of `GET /api/shifts/by-date-range`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams), into_params(parameter_in = Query))]
pub struct DateRangeQuery {
    #[serde(with = "wire")]
    #[cfg_attr(feature = "openapi", param(value_type = String))]
    pub start_date: NaiveDateTime,
    #[serde(with = "wire")]
    #[cfg_attr(feature = "openapi", param(value_type = String))]
    pub end_date: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_input_accepts_both_date_styles() {
        let s: ShiftInput = serde_json::from_str(
            r#"{"worker_id":1,"location_id":2,"start_time":"01/01/2025 09:00","end_time":"01-01-2025 17:00"}"#,
        )
        .unwrap();
        assert_eq!(crate::datetime::format(&s.start_time), "01-01-2025 09:00");
        assert_eq!(crate::datetime::format(&s.end_time), "01-01-2025 17:00");
    }

    #[test]
    fn shift_input_rejects_bad_date() {
        let r = serde_json::from_str::<ShiftInput>(
            r#"{"worker_id":1,"location_id":2,"start_time":"2025/13/45","end_time":"01-01-2025 17:00"}"#,
        );
        assert!(r.is_err());
    }
}
