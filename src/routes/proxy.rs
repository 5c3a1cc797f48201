use axum::{routing::get, Router};

use crate::handlers::{method_not_allowed, preflight, proxy};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let forward = get(proxy::proxy)
        .post(proxy::proxy)
        .put(proxy::proxy)
        .delete(proxy::proxy)
        .options(preflight)
        .fallback(method_not_allowed);

    Router::new()
        // Legacy /api?type=... shape plus everything under /api/.
        .route("/api", forward.clone())
        .route("/api/*path", forward)
}
