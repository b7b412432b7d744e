use serde::{Deserialize, Serialize};

use super::{non_blank, PageRequest, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Worker {
    pub worker_id: i32,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Body of `POST /api/workers` and `PUT /api/workers/:id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WorkerInput {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl WorkerInput {
    /// Trim fields; blank contact details become `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: non_blank(self.email),
            phone_number: non_blank(self.phone_number),
        }
    }
}

/// Query string of `GET /api/workers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams), into_params(parameter_in = Query))]
pub struct WorkerQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Case-insensitive match on name, email or phone number.
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

impl WorkerQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    /// Copy with blank text filters dropped.
    pub fn normalized(&self) -> Self {
        Self {
            name: non_blank(self.name.clone()),
            email: non_blank(self.email.clone()),
            phone_number: non_blank(self.phone_number.clone()),
            search: non_blank(self.search.clone()),
            sort_by: non_blank(self.sort_by.clone()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_drops_blank_contacts() {
        let input = WorkerInput { name: "  Ann  ".into(), email: Some("   ".into()), phone_number: Some(" 0123456789 ".into()) };
        let n = input.normalized();
        assert_eq!(n.name, "Ann");
        assert_eq!(n.email, None);
        assert_eq!(n.phone_number.as_deref(), Some("0123456789"));
    }

    #[test]
    fn empty_query_serializes_to_nothing() {
        let v = serde_json::to_value(WorkerQuery::default()).unwrap();
        assert_eq!(v, serde_json::json!({}));
    }
}
