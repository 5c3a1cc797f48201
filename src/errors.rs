// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::services::otp::OtpError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Required auth fields missing or blank; reported before any outbound
    /// call is made.
    #[error("Missing required fields")]
    MissingFields(BTreeMap<&'static str, String>),

    /// Malformed request to the mock email service (bad action, no email).
    #[error("{0}")]
    MockRequest(String),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Upstream unreachable, timed out, or answered with a non-JSON body.
    #[error("Upstream request failed: {0}")]
    Upstream(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::MockRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Otp(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The JSON body sent to the caller. Each error class keeps the envelope
    /// the frontend already understands.
    pub fn body_json(&self) -> Value {
        match self {
            AppError::MissingFields(details) => json!({
                "error": "Missing required fields",
                "details": details,
            }),
            AppError::MockRequest(message) => json!({
                "status": 0,
                "message": message,
                "result": null,
            }),
            AppError::Otp(err) => json!({
                "status": 0,
                "message": err.to_string(),
                "result": null,
            }),
            AppError::MethodNotAllowed => json!({
                "error": "Method not allowed",
            }),
            AppError::Upstream(message) => json!({
                "error": "Upstream request failed",
                "message": message,
                "status": 0,
                "type": "SERVICE_UNAVAILABLE",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body_json())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
