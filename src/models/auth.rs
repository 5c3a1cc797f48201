// models/auth.rs
//
// Inbound auth request DTOs. Fields are optional so presence checks can
// report every missing field at once instead of failing on deserialization;
// `upstream_payload` validates and builds the exact body the backend wants
// (trimmed values, passwords untouched).
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::Result;
use crate::validation::{check_required, non_blank};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(rename = "emailOrPhone")]
    pub email_or_phone: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn upstream_payload(&self) -> Result<Value> {
        let email_or_phone = non_blank(&self.email_or_phone);
        let password = non_blank(&self.password);
        check_required(&[
            ("emailOrPhone", email_or_phone.is_some()),
            ("password", password.is_some()),
        ])?;

        // Backend expects only these two keys; password goes through
        // untrimmed.
        Ok(json!({
            "emailOrPhone": email_or_phone,
            "password": self.password,
        }))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    /// The upstream accepts both string and numeric role ids.
    #[serde(rename = "roleId")]
    pub role_id: Option<Value>,
}

impl RegisterRequest {
    pub fn upstream_payload(&self) -> Result<Value> {
        let first_name = non_blank(&self.first_name);
        let last_name = non_blank(&self.last_name);
        let email = non_blank(&self.email);
        let phone = non_blank(&self.phone);
        let password = non_blank(&self.password);
        let role_id = self.role_id.as_ref().filter(|v| role_id_present(v));

        check_required(&[
            ("firstName", first_name.is_some()),
            ("lastName", last_name.is_some()),
            ("email", email.is_some()),
            ("phone", phone.is_some()),
            ("password", password.is_some()),
            ("roleId", role_id.is_some()),
        ])?;

        Ok(json!({
            "firstName": first_name,
            "lastName": last_name,
            "email": email,
            "phone": phone,
            "password": self.password,
            "roleId": role_id,
        }))
    }
}

fn role_id_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

impl ForgotPasswordRequest {
    pub fn upstream_payload(&self) -> Result<Value> {
        let email = non_blank(&self.email);
        check_required(&[("email", email.is_some())])?;
        Ok(json!({ "email": email }))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct VerifyCodeRequest {
    pub email: Option<String>,
    pub code: Option<String>,
}

impl VerifyCodeRequest {
    pub fn upstream_payload(&self) -> Result<Value> {
        let email = non_blank(&self.email);
        let code = non_blank(&self.code);
        check_required(&[("email", email.is_some()), ("code", code.is_some())])?;
        Ok(json!({ "email": email, "code": code }))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

impl ResetPasswordRequest {
    pub fn upstream_payload(&self) -> Result<Value> {
        let email = non_blank(&self.email);
        let code = non_blank(&self.code);
        let new_password = non_blank(&self.new_password);
        check_required(&[
            ("email", email.is_some()),
            ("code", code.is_some()),
            ("newPassword", new_password.is_some()),
        ])?;

        Ok(json!({
            "email": email,
            "code": code,
            "newPassword": self.new_password,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn login_blank_identifier_is_rejected() {
        let req = LoginRequest {
            email_or_phone: Some(String::new()),
            password: Some("x".to_string()),
        };
        match req.upstream_payload().unwrap_err() {
            AppError::MissingFields(details) => {
                assert_eq!(details["emailOrPhone"], "emailOrPhone is required");
                assert!(!details.contains_key("password"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn login_payload_trims_identifier_but_not_password() {
        let req = LoginRequest {
            email_or_phone: Some(" a@b.com ".to_string()),
            password: Some(" pw ".to_string()),
        };
        let payload = req.upstream_payload().unwrap();
        assert_eq!(payload["emailOrPhone"], "a@b.com");
        assert_eq!(payload["password"], " pw ");
    }

    #[test]
    fn register_reports_all_missing_fields() {
        let req = RegisterRequest::default();
        match req.upstream_payload().unwrap_err() {
            AppError::MissingFields(details) => {
                assert_eq!(details.len(), 6);
                assert_eq!(details["roleId"], "roleId is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn register_accepts_numeric_role_id() {
        let req = RegisterRequest {
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            email: Some("a@b.com".to_string()),
            phone: Some("123".to_string()),
            password: Some("pw".to_string()),
            role_id: Some(json!(3)),
        };
        let payload = req.upstream_payload().unwrap();
        assert_eq!(payload["roleId"], 3);
    }

    #[test]
    fn verify_code_trims_both_fields() {
        let req = VerifyCodeRequest {
            email: Some(" a@b.com ".to_string()),
            code: Some(" 12345 ".to_string()),
        };
        let payload = req.upstream_payload().unwrap();
        assert_eq!(payload["email"], "a@b.com");
        assert_eq!(payload["code"], "12345");
    }

    #[test]
    fn reset_password_requires_every_field() {
        let req = ResetPasswordRequest {
            email: Some("a@b.com".to_string()),
            code: None,
            new_password: Some("pw".to_string()),
        };
        match req.upstream_payload().unwrap_err() {
            AppError::MissingFields(details) => {
                assert_eq!(details.len(), 1);
                assert!(details.contains_key("code"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
