//! HTTP client over the API. Every call returns the envelope payload or a
//! [`ClientError`]; failure envelopes never reach the menus as data.

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use common::types::{ApiResponse, Page};
use configs::ClientConfig;

mod locations;
mod shifts;
mod workers;

pub use locations::LocationClient;
pub use shifts::ShiftClient;
pub use workers::WorkerClient;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot reach the API: {0}")]
    Network(String),
    #[error("{message} (code {code})")]
    Api { code: u16, message: String },
    #[error("unexpected response from the API: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(cfg: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&cfg.base_url).map_err(|e| ClientError::Network(format!("{}: {}", cfg.base_url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn workers(&self) -> WorkerClient {
        WorkerClient::new(self.clone())
    }

    pub fn locations(&self) -> LocationClient {
        LocationClient::new(self.clone())
    }

    pub fn shifts(&self) -> ShiftClient {
        ShiftClient::new(self.clone())
    }

    /// Join path segments onto the base URL; each segment is percent-encoded.
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Network(format!("{} cannot be used as a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<ApiResponse<T>> {
        let res = req.send().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let status = res.status();
        let bytes = res.bytes().await.map_err(|e| ClientError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), len = bytes.len(), "api_response");

        let envelope: ApiResponse<T> = match serde_json::from_slice(&bytes) {
            Ok(env) => env,
            // 非 envelope 的错误响应（例如代理返回的 502）
            Err(_) if !status.is_success() => {
                return Err(ClientError::Api {
                    code: status.as_u16(),
                    message: String::from_utf8_lossy(&bytes).trim().to_string(),
                })
            }
            Err(e) => return Err(ClientError::Decode(e.to_string())),
        };
        if envelope.request_failed {
            warn!(code = envelope.response_code, message = %envelope.message, "api_request_failed");
            return Err(ClientError::Api { code: envelope.response_code, message: envelope.message });
        }
        Ok(envelope)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<ApiResponse<T>> {
        self.send(self.http.get(self.url(segments)?)).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned, Q: Serialize>(&self, segments: &[&str], query: &Q) -> ClientResult<ApiResponse<T>> {
        self.send(self.http.get(self.url(segments)?).query(query)).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(&self, segments: &[&str], body: &B) -> ClientResult<ApiResponse<T>> {
        self.send(self.http.post(self.url(segments)?).json(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(&self, segments: &[&str], body: &B) -> ClientResult<ApiResponse<T>> {
        self.send(self.http.put(self.url(segments)?).json(body)).await
    }

    /// Returns the server's confirmation message.
    pub(crate) async fn delete(&self, segments: &[&str]) -> ClientResult<String> {
        let env: ApiResponse<serde_json::Value> = self.send(self.http.delete(self.url(segments)?)).await?;
        Ok(env.message)
    }
}

/// Payload of a single-entity envelope.
pub(crate) fn into_data<T>(env: ApiResponse<T>) -> ClientResult<T> {
    env.data.ok_or_else(|| ClientError::Decode(format!("'{}' carried no data", env.message)))
}

/// List envelope as a page; unpaged lists become a single page.
pub(crate) fn into_page<T>(env: ApiResponse<Vec<T>>) -> Page<T> {
    let items = env.data.unwrap_or_default();
    let len = items.len() as u64;
    Page {
        total_count: env.total_count.unwrap_or(len),
        page_number: env.page_number.unwrap_or(1),
        page_size: env.page_size.unwrap_or(len.max(1)),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig { base_url: base.into(), timeout_secs: 5 }).unwrap()
    }

    #[test]
    fn url_encodes_segments() {
        let c = client("http://localhost:8080");
        let url = c.url(&["api", "locations", "by-country", "United Kingdom"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/locations/by-country/United%20Kingdom");
    }

    #[test]
    fn url_keeps_base_path() {
        let c = client("http://localhost:8080/shift-manager/");
        let url = c.url(&["api", "workers", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/shift-manager/api/workers/7");
    }

    #[test]
    fn unpaged_list_becomes_single_page() {
        let page = into_page(ApiResponse::list("ok", vec![1, 2, 3]));
        assert_eq!(page.total_count, 3);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 3);
    }

    #[test]
    fn missing_data_is_decode_error() {
        let env: ApiResponse<u8> = ApiResponse::empty(200, "nothing");
        assert!(matches!(into_data(env), Err(ClientError::Decode(_))));
    }

    #[test]
    fn api_error_shows_message_and_code() {
        let e = ClientError::Api { code: 404, message: "worker 9 not found".into() };
        assert_eq!(e.to_string(), "worker 9 not found (code 404)");
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        // port 9 (discard) is closed on test machines
        let c = client("http://127.0.0.1:9");
        let err = c.workers().get(1).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)), "{err:?}");
    }
}
