use serde::{Deserialize, Serialize};

use super::Page;

/// Uniform response body returned by every API endpoint.
///
/// `response_code` mirrors the HTTP status. `data` is absent on failures and
/// the paging fields are only present on list responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub request_failed: bool,
    pub response_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn success(response_code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            request_failed: false,
            response_code,
            message: message.into(),
            data: Some(data),
            total_count: None,
            page_number: None,
            page_size: None,
        }
    }

    /// Success without a payload (e.g. delete).
    pub fn empty(response_code: u16, message: impl Into<String>) -> Self {
        Self {
            request_failed: false,
            response_code,
            message: message.into(),
            data: None,
            total_count: None,
            page_number: None,
            page_size: None,
        }
    }

    pub fn failure(response_code: u16, message: impl Into<String>) -> Self {
        Self {
            request_failed: true,
            response_code,
            message: message.into(),
            data: None,
            total_count: None,
            page_number: None,
            page_size: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn paged(message: impl Into<String>, page: Page<T>) -> Self {
        Self {
            request_failed: false,
            response_code: 200,
            message: message.into(),
            data: Some(page.items),
            total_count: Some(page.total_count),
            page_number: Some(page.page_number),
            page_size: Some(page.page_size),
        }
    }

    /// Unpaged list: total equals the number of items returned.
    pub fn list(message: impl Into<String>, items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            request_failed: false,
            response_code: 200,
            message: message.into(),
            data: Some(items),
            total_count: Some(total),
            page_number: None,
            page_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_omits_payload_fields() {
        let r: ApiResponse<u32> = ApiResponse::failure(404, "worker 7 not found");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["request_failed"], true);
        assert_eq!(v["response_code"], 404);
        assert!(v.get("data").is_none());
        assert!(v.get("total_count").is_none());
    }

    #[test]
    fn paged_carries_counts() {
        let page = Page { items: vec![1, 2], total_count: 12, page_number: 2, page_size: 2 };
        let r = ApiResponse::paged("ok", page);
        assert_eq!(r.data.as_deref(), Some(&[1, 2][..]));
        assert_eq!(r.total_count, Some(12));
        assert_eq!(r.page_number, Some(2));
        assert_eq!(r.page_size, Some(2));
        assert!(!r.request_failed);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let r: ApiResponse<Vec<u8>> =
            serde_json::from_str(r#"{"request_failed":true,"response_code":400,"message":"bad"}"#).unwrap();
        assert!(r.data.is_none());
        assert_eq!(r.message, "bad");
    }
}
