pub mod auth;
pub mod mock_email;
pub mod proxy;

use axum::http::StatusCode;

use crate::errors::AppError;

/// CORS preflight; every endpoint answers OPTIONS with an empty 200.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for methods a route does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
