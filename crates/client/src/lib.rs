//! Outbound HTTP client for the backend book and user services.
//!
//! All gateway routes funnel through [`RemoteCallClient`]: one shared
//! `reqwest::Client` with a connection pool, addressed by [`Backend`] variant
//! and resolved through an injected [`ServiceResolver`]. Reads come back as
//! opaque JSON for pass-through; writes are typed so the assigned id can be
//! extracted. Backend failures are never swallowed here; they surface as
//! [`ClientError`] and the HTTP layer maps them onto gateway responses.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use gateway_kernel::settings::ClientSettings;

pub mod backend;
pub mod resolver;

pub use backend::Backend;
pub use resolver::{ServiceResolver, StaticResolver};

/// Failures raised by the remote call layer.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no address registered for service '{0}'")]
    Unresolved(String),

    /// Backend answered with a non-success status; body kept for pass-through.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    #[error("remote call failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Shared client for all outbound calls. Constructed once at startup and
/// cloned behind `Arc` into every handler; holds no per-request state.
pub struct RemoteCallClient {
    http: reqwest::Client,
    resolver: Arc<dyn ServiceResolver>,
}

impl RemoteCallClient {
    pub fn new(
        settings: &ClientSettings,
        resolver: Arc<dyn ServiceResolver>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .build()?;

        Ok(Self { http, resolver })
    }

    /// Build the target URL for a backend collection or a single entity.
    fn url(&self, backend: Backend, id: Option<i64>) -> Result<String, ClientError> {
        let address = self.resolver.resolve(backend.service())?;
        let base = address.trim_end_matches('/');

        Ok(match id {
            Some(id) => format!("{}{}/{}", base, backend.collection(), id),
            None => format!("{}{}", base, backend.collection()),
        })
    }

    /// Issue one HTTP call; non-2xx statuses become `ClientError::Status`
    /// with the backend body preserved.
    async fn send(
        &self,
        method: Method,
        backend: Backend,
        id: Option<i64>,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.url(backend, id)?;
        tracing::debug!(method = %method, %url, "forwarding remote call");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// GET the full collection; body passed through untouched.
    pub async fn list(&self, backend: Backend) -> Result<Value, ClientError> {
        let response = self.send(Method::GET, backend, None, None).await?;
        Ok(response.json().await?)
    }

    /// GET a single entity; body passed through untouched.
    pub async fn fetch(&self, backend: Backend, id: i64) -> Result<Value, ClientError> {
        let response = self.send(Method::GET, backend, Some(id), None).await?;
        Ok(response.json().await?)
    }

    /// POST a new entity and decode the backend's echo, which carries the
    /// identifier the backend assigned.
    pub async fn create<E>(&self, backend: Backend, entity: &E) -> Result<E, ClientError>
    where
        E: Serialize + DeserializeOwned,
    {
        let body = serde_json::to_value(entity)?;
        let response = self.send(Method::POST, backend, None, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// PUT an entity at its id; the backend response body is discarded.
    pub async fn update<E>(&self, backend: Backend, id: i64, entity: &E) -> Result<(), ClientError>
    where
        E: Serialize,
    {
        let body = serde_json::to_value(entity)?;
        self.send(Method::PUT, backend, Some(id), Some(body)).await?;
        Ok(())
    }

    /// DELETE an entity at its id; the backend response body is discarded.
    pub async fn delete(&self, backend: Backend, id: i64) -> Result<(), ClientError> {
        self.send(Method::DELETE, backend, Some(id), None).await?;
        Ok(())
    }
}
