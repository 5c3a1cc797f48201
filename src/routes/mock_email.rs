use axum::{routing::get, Router};

use crate::handlers::{method_not_allowed, mock_email, preflight};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/mock-email-service",
        get(mock_email::status)
            .post(mock_email::dispatch)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}
