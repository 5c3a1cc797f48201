// handlers/mock_email.rs
//
// Local-only mock email endpoints, used when the upstream cannot deliver
// OTP emails. The GET dump deliberately leaks stored codes for debugging;
// never expose this outside local development.
use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::state::AppState;
use crate::validation::non_blank;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct MockEmailRequest {
    pub email: Option<String>,
    pub action: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

pub async fn dispatch(
    State(state): State<AppState>,
    Json(req): Json<MockEmailRequest>,
) -> Result<Json<Value>> {
    let email = non_blank(&req.email)
        .ok_or_else(|| AppError::MockRequest("email is required".to_string()))?;

    match req.action.as_deref() {
        Some("send-otp") => {
            let record = state.mock_email.send_otp(&email).await;
            Ok(Json(json!({
                "status": 1,
                "message": "OTP sent successfully to your email address",
                "result": {
                    "email": email,
                    "otp": record.code,
                    "timestamp": record.created_at.to_rfc3339(),
                },
            })))
        }
        Some("verify-otp") => {
            let code = req.code.unwrap_or_default();
            state.mock_email.verify_otp(&email, &code).await?;
            Ok(Json(json!({
                "status": 1,
                "message": "OTP verified successfully",
                "result": {
                    "email": email,
                    "verified": true,
                },
            })))
        }
        Some("reset-password") => {
            let new_password = req.new_password.unwrap_or_default();
            state.mock_email.reset_password(&email, &new_password).await?;
            Ok(Json(json!({
                "status": 1,
                "message": "Password reset successfully",
                "result": {
                    "email": email,
                    "reset": true,
                },
            })))
        }
        _ => Err(AppError::MockRequest("Invalid action".to_string())),
    }
}

pub async fn status(State(state): State<AppState>) -> Json<Value> {
    let records = state.mock_email.records().await;
    let otps: Vec<Value> = records
        .iter()
        .map(|(email, record)| {
            json!({
                "email": email,
                "otp": record.code,
                "timestamp": record.created_at.to_rfc3339(),
                "verified": record.verified,
                "attempts": record.attempts,
            })
        })
        .collect();

    Json(json!({
        "message": "Mock email service status",
        "storedOTPs": otps,
        "total": otps.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state() -> AppState {
        AppState::new(&AppConfig {
            upstream_base_url: "https://backend.example.com/api/v1".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
        })
    }

    #[tokio::test]
    async fn send_then_verify_then_reset_via_handler() {
        let state = state();

        let Json(sent) = dispatch(
            State(state.clone()),
            Json(MockEmailRequest {
                email: Some("a@b.com".to_string()),
                action: Some("send-otp".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(sent["status"], 1);
        let code = sent["result"]["otp"].as_str().unwrap().to_string();

        let Json(verified) = dispatch(
            State(state.clone()),
            Json(MockEmailRequest {
                email: Some("a@b.com".to_string()),
                action: Some("verify-otp".to_string()),
                code: Some(code),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(verified["result"]["verified"], true);

        let Json(reset) = dispatch(
            State(state.clone()),
            Json(MockEmailRequest {
                email: Some("a@b.com".to_string()),
                action: Some("reset-password".to_string()),
                new_password: Some("pw".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(reset["result"]["reset"], true);

        let Json(dump) = status(State(state)).await;
        assert_eq!(dump["total"], 0);
    }

    #[tokio::test]
    async fn unknown_action_is_rejected() {
        let err = dispatch(
            State(state()),
            Json(MockEmailRequest {
                email: Some("a@b.com".to_string()),
                action: Some("resend".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.body_json()["message"], "Invalid action");
    }

    #[tokio::test]
    async fn missing_email_is_rejected() {
        let err = dispatch(State(state()), Json(MockEmailRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(err.body_json()["message"], "email is required");
    }

    #[tokio::test]
    async fn debug_dump_lists_issued_codes() {
        let state = state();
        state.mock_email.send_otp("a@b.com").await;

        let Json(dump) = status(State(state)).await;
        assert_eq!(dump["total"], 1);
        assert_eq!(dump["storedOTPs"][0]["email"], "a@b.com");
        assert_eq!(dump["storedOTPs"][0]["attempts"], 0);
        assert_eq!(dump["storedOTPs"][0]["verified"], false);
    }
}
