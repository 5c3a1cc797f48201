// handlers/proxy.rs
use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::Json,
};
use serde_json::Value;
use tracing::info;

use crate::errors::Result;
use crate::state::AppState;

/// Catch-all proxy: translate the inbound path/query to an upstream URL,
/// forward, and relay the upstream's status and body verbatim.
pub async fn proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>)> {
    let pathname = uri.path().strip_prefix("/api").unwrap_or(uri.path());
    let query = uri.query().unwrap_or("");

    let plan = state
        .translator
        .resolve(method, pathname, query, body.map(|Json(value)| value));

    info!("[Proxy] {} {}", plan.method, plan.target_url);

    let (status, data) = state
        .forwarder
        .forward(&plan, headers.get(header::AUTHORIZATION))
        .await?;

    Ok((status, Json(data)))
}
