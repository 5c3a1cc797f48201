// client.rs
//
// Library-level client for the gateway's auth surface, mirroring what the
// web frontend does: login/register are single calls; the password-recovery
// flows fall back across enhanced -> plain -> mock endpoints, consulting a
// later tier only when the earlier one failed.
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("API error {status}")]
    Api { status: StatusCode, body: Value },
}

pub struct AuthClient {
    base_url: String,
    client: Client,
}

impl AuthClient {
    /// `base_url` is the gateway origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        AuthClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub async fn login(&self, email_or_phone: &str, password: &str) -> Result<Value, ClientError> {
        self.post_json(
            "/api/auth/userLogin",
            json!({ "emailOrPhone": email_or_phone, "password": password }),
        )
        .await
    }

    pub async fn register(&self, payload: Value) -> Result<Value, ClientError> {
        self.post_json("/api/auth/register", payload).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Value, ClientError> {
        let payload = json!({ "email": email });

        match self
            .post_json("/api/auth/forgot-password-enhanced", payload.clone())
            .await
        {
            Ok(body) => Ok(body),
            Err(enhanced_err) => {
                warn!(
                    "enhanced forgot-password failed ({}), trying plain endpoint",
                    enhanced_err
                );
                match self.post_json("/api/auth/forgot-password", payload).await {
                    Ok(body) => Ok(body),
                    Err(plain_err) => {
                        warn!(
                            "plain forgot-password failed ({}), falling back to mock email service",
                            plain_err
                        );
                        let mut body = self
                            .post_json(
                                "/api/mock-email-service",
                                json!({ "email": email, "action": "send-otp" }),
                            )
                            .await?;
                        if body.is_object() {
                            body["_source"] = json!("mock-email-service");
                            body["_message"] =
                                json!("Using mock email service - check console for OTP");
                        }
                        Ok(body)
                    }
                }
            }
        }
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> Result<Value, ClientError> {
        match self
            .post_json("/api/auth/verify-code", json!({ "email": email, "code": code }))
            .await
        {
            Ok(body) => Ok(body),
            Err(backend_err) => {
                warn!(
                    "backend verify-code failed ({}), falling back to mock email service",
                    backend_err
                );
                self.post_json(
                    "/api/mock-email-service",
                    json!({ "email": email, "code": code, "action": "verify-otp" }),
                )
                .await
            }
        }
    }

    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<Value, ClientError> {
        match self
            .post_json(
                "/api/auth/reset-password",
                json!({ "email": email, "code": code, "newPassword": new_password }),
            )
            .await
        {
            Ok(body) => Ok(body),
            Err(backend_err) => {
                warn!(
                    "backend reset-password failed ({}), falling back to mock email service",
                    backend_err
                );
                self.post_json(
                    "/api/mock-email-service",
                    json!({
                        "email": email,
                        "code": code,
                        "newPassword": new_password,
                        "action": "reset-password",
                    }),
                )
                .await
            }
        }
    }

    async fn post_json(&self, path: &str, payload: Value) -> Result<Value, ClientError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ClientError::Api { status, body })
        }
    }
}
