use chrono::NaiveDateTime;

use common::types::{DateRangeQuery, Page, Shift, ShiftInput, ShiftQuery};

use super::{into_data, into_page, ApiClient, ClientResult};

/// `/api/shifts` endpoints.
#[derive(Clone, Debug)]
pub struct ShiftClient {
    api: ApiClient,
}

impl ShiftClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &ShiftQuery) -> ClientResult<Page<Shift>> {
        self.api.get_query(&["api", "shifts"], query).await.map(into_page)
    }

    pub async fn get(&self, id: i32) -> ClientResult<Shift> {
        into_data(self.api.get(&["api", "shifts", id.to_string().as_str()]).await?)
    }

    pub async fn create(&self, input: &ShiftInput) -> ClientResult<Shift> {
        into_data(self.api.post(&["api", "shifts"], input).await?)
    }

    pub async fn update(&self, id: i32, input: &ShiftInput) -> ClientResult<Shift> {
        into_data(self.api.put(&["api", "shifts", id.to_string().as_str()], input).await?)
    }

    pub async fn delete(&self, id: i32) -> ClientResult<String> {
        self.api.delete(&["api", "shifts", id.to_string().as_str()]).await
    }

    pub async fn by_date_range(&self, start_date: NaiveDateTime, end_date: NaiveDateTime) -> ClientResult<Vec<Shift>> {
        let query = DateRangeQuery { start_date, end_date };
        self.api.get_query(&["api", "shifts", "by-date-range"], &query).await.map(|env| into_page(env).items)
    }

    pub async fn by_worker(&self, worker_id: i32) -> ClientResult<Vec<Shift>> {
        self.api.get(&["api", "shifts", "by-worker", worker_id.to_string().as_str()]).await.map(|env| into_page(env).items)
    }

    pub async fn by_location(&self, location_id: i32) -> ClientResult<Vec<Shift>> {
        self.api.get(&["api", "shifts", "by-location", location_id.to_string().as_str()]).await.map(|env| into_page(env).items)
    }
}
