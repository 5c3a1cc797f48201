use axum::{routing::post, Router};

use crate::handlers::{auth, method_not_allowed, preflight};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/auth/userLogin",
            post(auth::login).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/auth/register",
            post(auth::register).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/auth/forgot-password",
            post(auth::forgot_password)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/auth/forgot-password-enhanced",
            post(auth::forgot_password_enhanced)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/auth/verify-code",
            post(auth::verify_code)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/auth/reset-password",
            post(auth::reset_password)
                .options(preflight)
                .fallback(method_not_allowed),
        )
}
