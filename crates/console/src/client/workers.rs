use common::types::{Page, Worker, WorkerInput, WorkerQuery};

use super::{into_data, into_page, ApiClient, ClientResult};

/// `/api/workers` endpoints.
#[derive(Clone, Debug)]
pub struct WorkerClient {
    api: ApiClient,
}

impl WorkerClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &WorkerQuery) -> ClientResult<Page<Worker>> {
        self.api.get_query(&["api", "workers"], query).await.map(into_page)
    }

    pub async fn get(&self, id: i32) -> ClientResult<Worker> {
        into_data(self.api.get(&["api", "workers", id.to_string().as_str()]).await?)
    }

    pub async fn create(&self, input: &WorkerInput) -> ClientResult<Worker> {
        into_data(self.api.post(&["api", "workers"], input).await?)
    }

    pub async fn update(&self, id: i32, input: &WorkerInput) -> ClientResult<Worker> {
        into_data(self.api.put(&["api", "workers", id.to_string().as_str()], input).await?)
    }

    pub async fn delete(&self, id: i32) -> ClientResult<String> {
        self.api.delete(&["api", "workers", id.to_string().as_str()]).await
    }

    pub async fn by_email_domain(&self, domain: &str) -> ClientResult<Vec<Worker>> {
        self.api.get(&["api", "workers", "by-email-domain", domain]).await.map(|env| into_page(env).items)
    }

    pub async fn by_phone_area_code(&self, code: &str) -> ClientResult<Vec<Worker>> {
        self.api.get(&["api", "workers", "by-phone-area-code", code]).await.map(|env| into_page(env).items)
    }
}
