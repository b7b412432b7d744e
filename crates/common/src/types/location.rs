use serde::{Deserialize, Serialize};

use super::{non_blank, PageRequest, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Location {
    pub location_id: i32,
    pub name: String,
    pub address: String,
    pub town: String,
    pub county: String,
    pub post_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LocationInput {
    pub name: String,
    pub address: String,
    pub town: String,
    pub county: String,
    pub post_code: String,
    pub country: String,
}

impl LocationInput {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            town: self.town.trim().to_string(),
            county: self.county.trim().to_string(),
            post_code: self.post_code.trim().to_string(),
            country: self.country.trim().to_string(),
        }
    }
}

/// Query string of `GET /api/locations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams), into_params(parameter_in = Query))]
pub struct LocationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Case-insensitive match on any address column or the name.
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

impl LocationQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    pub fn normalized(&self) -> Self {
        Self {
            name: non_blank(self.name.clone()),
            address: non_blank(self.address.clone()),
            town: non_blank(self.town.clone()),
            county: non_blank(self.county.clone()),
            post_code: non_blank(self.post_code.clone()),
            country: non_blank(self.country.clone()),
            search: non_blank(self.search.clone()),
            sort_by: non_blank(self.sort_by.clone()),
            ..self.clone()
        }
    }
}
