//! HTTP implementation of the backend gateway.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{
    ChatReply, ChatRequest, ChatResponse, ClearHistoryRequest, ClearHistoryResponse, ErrorBody,
    HealthInfo, HealthResponse,
};

/// Fallback when the backend reports a failure without saying why.
const UNKNOWN_SERVER_ERROR: &str = "Error desconocido del servidor";

/// Errors that can occur talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The backend answered, but with an error. `status` is `None` when the
    /// HTTP exchange succeeded and the body carried `success: false`.
    Server {
        status: Option<u16>,
        message: String,
    },
    /// Failed to decode the backend's response body.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Server {
                status: Some(status),
                message,
            } => write!(f, "server error (HTTP {status}): {message}"),
            BackendError::Server {
                status: None,
                message,
            } => write!(f, "server error: {message}"),
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `GET /health`. The only call with a timeout.
    async fn health(&self) -> Result<HealthInfo, BackendError>;

    /// `POST /chat`. No timeout, no retry; one call per user submit.
    async fn send_message(&self, message: &str, user_id: &str) -> Result<ChatReply, BackendError>;

    /// `POST /clear-history`.
    async fn clear_history(&self, user_id: &str) -> Result<(), BackendError>;
}

pub struct HttpBackend {
    base_url: String,
    health_timeout: Duration,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: String, health_timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            health_timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Extracts a server error from a non-2xx response, preferring the
    /// FastAPI `detail` field.
    async fn server_error(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|e| e.detail)
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
        warn!("Backend error: HTTP {status} - {message}");
        BackendError::Server {
            status: Some(status),
            message,
        }
    }
}

fn network_error(e: reqwest::Error) -> BackendError {
    BackendError::Network(e.to_string())
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn health(&self) -> Result<HealthInfo, BackendError> {
        debug!("GET {}/health", self.base_url);
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let body: HealthResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        if body.status != "healthy" {
            return Err(BackendError::Server {
                status: None,
                message: format!("estado del backend: {}", body.status),
            });
        }
        info!(
            "Backend healthy: model={:?}, features={:?}",
            body.model, body.features
        );
        Ok(HealthInfo {
            model: body.model.unwrap_or_default(),
            features: body.features,
        })
    }

    async fn send_message(&self, message: &str, user_id: &str) -> Result<ChatReply, BackendError> {
        info!("POST /chat ({} chars, user={user_id})", message.len());
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&ChatRequest { message, user_id })
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        if !body.success {
            return Err(BackendError::Server {
                status: None,
                message: body.error.unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
            });
        }
        Ok(ChatReply {
            reply: body.response.unwrap_or_default(),
            history_length: body.history_length,
        })
    }

    async fn clear_history(&self, user_id: &str) -> Result<(), BackendError> {
        info!("POST /clear-history (user={user_id})");
        let response = self
            .client
            .post(format!("{}/clear-history", self.base_url))
            .json(&ClearHistoryRequest { user_id })
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let body: ClearHistoryResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        if !body.success {
            return Err(BackendError::Server {
                status: None,
                message: body.error.unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
            });
        }
        Ok(())
    }
}
