use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use chrono::Utc;
use serde::Serialize;

/// Guidance shown to an operator when the model provider rejects a call for quota reasons.
pub const QUOTA_GUIDANCE: &str = "Check your API quota in the provider console, \
wait a few minutes before trying again, or use a different API key";

#[derive(Serialize)]
pub struct ErrorResponse {
    detail: String,
    timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch data: {0}")]
    Fetch(String),

    #[error("Error parsing content: {0}")]
    Parse(String),

    #[error("LLM processing error: {0}")]
    Llm(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("API quota exceeded. {} ({0})", QUOTA_GUIDANCE)]
    QuotaExceeded(String),

    #[error("Failed to generate summary: {0}")]
    Summary(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the provider reported quota or rate-limit exhaustion.
    pub fn is_quota(&self) -> bool {
        matches!(self, AppError::QuotaExceeded(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            detail: self.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
