//! Wire types for the backend's three endpoints, plus the typed results the
//! rest of the app consumes.

use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Types
// ============================================================================

/// `GET /health` response body.
#[derive(Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    #[allow(dead_code)]
    pub service: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// `POST /chat` request body.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub user_id: &'a str,
}

/// `POST /chat` response body. `success: false` carries `error` instead of
/// `response`.
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub success: bool,
    pub response: Option<String>,
    pub history_length: Option<usize>,
    pub error: Option<String>,
}

/// `POST /clear-history` request body.
#[derive(Serialize, Debug)]
pub struct ClearHistoryRequest<'a> {
    pub user_id: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// FastAPI-style error body on non-2xx statuses.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

// ============================================================================
// Domain Results
// ============================================================================

/// What a healthy backend reports about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthInfo {
    pub model: String,
    pub features: Vec<String>,
}

/// A successful chat exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    /// Backend-side history length after this exchange, when reported.
    pub history_length: Option<usize>,
}
