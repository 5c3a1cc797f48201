// services/forwarder.rs
use axum::http::{header, HeaderValue, Method, StatusCode};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, warn};

use crate::errors::{AppError, Result};
use crate::services::translator::ForwardPlan;

const USER_AGENT: &str = concat!("news-gateway/", env!("CARGO_PKG_VERSION"));

/// Executes forwarding plans against the upstream backend and relays the
/// response. One shared client; timeouts are the client's only deadline.
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Forwarder { client }
    }

    /// Send the plan upstream and return `(status, body)` for verbatim
    /// relay. If the plan carries a GET fallback and the upstream rejects
    /// the rewritten POST with 404/405, retry once as the original GET and
    /// return that result instead. Network-level failures are terminal here.
    pub async fn forward(
        &self,
        plan: &ForwardPlan,
        authorization: Option<&HeaderValue>,
    ) -> Result<(StatusCode, Value)> {
        let (status, body) = self
            .send(&plan.target_url, plan.method.clone(), plan.body.as_ref(), authorization)
            .await?;

        if let Some(fallback_url) = &plan.get_fallback {
            if should_fall_back(status) {
                warn!(
                    "upstream answered {} to rewritten POST, retrying {} as GET",
                    status, fallback_url
                );
                return self.send(fallback_url, Method::GET, None, authorization).await;
            }
        }

        Ok((status, body))
    }

    async fn send(
        &self,
        url: &str,
        method: Method,
        body: Option<&Value>,
        authorization: Option<&HeaderValue>,
    ) -> Result<(StatusCode, Value)> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT);

        // Only the caller's Authorization crosses the boundary; everything
        // else stays on this side to avoid hop-by-hop header leakage.
        if let Some(auth) = authorization {
            request = request.header(header::AUTHORIZATION, auth.clone());
        }

        if method != Method::GET {
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        let response = request.send().await.map_err(|e| {
            error!("upstream request to {} failed: {}", url, e);
            AppError::Upstream(e.to_string())
        })?;

        let status = response.status();
        let data: Value = response.json().await.map_err(|e| {
            error!("upstream {} returned a non-JSON body: {}", url, e);
            AppError::Upstream(format!("invalid JSON from upstream: {e}"))
        })?;

        Ok((status, data))
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new()
    }
}

/// The filter-advanced POST rewrite is speculative; these statuses mean the
/// upstream wants the original GET.
pub fn should_fall_back(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::METHOD_NOT_ALLOWED
}
