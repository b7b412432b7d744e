use common::types::{Location, LocationInput, LocationQuery, Page};

use super::{into_data, into_page, ApiClient, ClientResult};

/// `/api/locations` endpoints.
#[derive(Clone, Debug)]
pub struct LocationClient {
    api: ApiClient,
}

impl LocationClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &LocationQuery) -> ClientResult<Page<Location>> {
        self.api.get_query(&["api", "locations"], query).await.map(into_page)
    }

    pub async fn get(&self, id: i32) -> ClientResult<Location> {
        into_data(self.api.get(&["api", "locations", id.to_string().as_str()]).await?)
    }

    pub async fn create(&self, input: &LocationInput) -> ClientResult<Location> {
        into_data(self.api.post(&["api", "locations"], input).await?)
    }

    pub async fn update(&self, id: i32, input: &LocationInput) -> ClientResult<Location> {
        into_data(self.api.put(&["api", "locations", id.to_string().as_str()], input).await?)
    }

    pub async fn delete(&self, id: i32) -> ClientResult<String> {
        self.api.delete(&["api", "locations", id.to_string().as_str()]).await
    }

    pub async fn by_country(&self, country: &str) -> ClientResult<Vec<Location>> {
        self.api.get(&["api", "locations", "by-country", country]).await.map(|env| into_page(env).items)
    }

    pub async fn by_county(&self, county: &str) -> ClientResult<Vec<Location>> {
        self.api.get(&["api", "locations", "by-county", county]).await.map(|env| into_page(env).items)
    }
}
