//! Wire types: response envelope, entity DTOs, inputs and list queries.

use serde::{Deserialize, Serialize};

mod envelope;
mod paging;
mod worker;
mod location;
mod shift;

pub use envelope::ApiResponse;
pub use paging::{Page, PageRequest, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use worker::{Worker, WorkerInput, WorkerQuery};
pub use location::{Location, LocationInput, LocationQuery};
pub use shift::{DateRangeQuery, Shift, ShiftInput, ShiftQuery};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Health {
    pub status: String,
}

/// Trim an optional text field; blank means absent.
pub fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
