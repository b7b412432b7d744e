//! Lightweight admin HTTP server spawner
//!
//! Exposes `/healthz` and `/metrics` on a separate listener, with metrics
//! rendered by the caller.

use std::thread;

use axum::http::StatusCode;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tracing::{error, info};

async fn healthz() -> &'static str {
    "OK"
}

async fn metrics_handler(f: fn() -> (StatusCode, String)) -> (StatusCode, String) {
    f()
}

pub fn admin_router(metrics_fn: fn() -> (StatusCode, String)) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(move || metrics_handler(metrics_fn)))
}

/// Spawn the admin server on its own thread and runtime so it keeps answering
/// even when the main runtime is saturated.
pub fn spawn_admin_server(addr: &str, metrics_fn: fn() -> (StatusCode, String)) -> thread::JoinHandle<()> {
    let addr = addr.to_string();
    thread::spawn(move || {
        let rt = match Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                error!(error = %e, "failed to build admin runtime");
                return;
            }
        };
        rt.block_on(async move {
            let listener = match TcpListener::bind(&addr).await {
                Ok(l) => l,
                Err(e) => {
                    error!(%addr, error = %e, "admin server bind failed");
                    return;
                }
            };
            info!(%addr, "admin server listening");
            if let Err(e) = axum::serve(listener, admin_router(metrics_fn)).await {
                error!(%addr, error = %e, "admin server stopped");
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_metrics() -> (StatusCode, String) {
        (StatusCode::OK, "requests_total 3\n".into())
    }

    #[tokio::test]
    async fn serves_health_and_metrics() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, admin_router(fake_metrics)).await;
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /metrics HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut buf = String::new();
        stream.read_to_string(&mut buf).await.unwrap();
        assert!(buf.starts_with("HTTP/1.1 200"));
        assert!(buf.contains("requests_total 3"));
    }
}
