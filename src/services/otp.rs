// services/otp.rs
//
// Local-only stand-in for the upstream's email delivery: issues one-time
// codes, verifies them, and gates password resets on a verified code. Never
// deployed against real traffic.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct OtpRecord {
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub attempts: u32,
    pub verified: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    #[error("No OTP found for this email address")]
    NoRecord,

    #[error("Invalid OTP code")]
    InvalidCode,

    #[error("OTP not verified or expired")]
    NotVerified,
}

/// Keyed code storage, one record per email. Behind a trait so the
/// in-memory map can be swapped for a real cache without touching the
/// service or handlers.
#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn get(&self, email: &str) -> Option<OtpRecord>;
    async fn set(&self, email: &str, record: OtpRecord);
    async fn delete(&self, email: &str);
    async fn all(&self) -> Vec<(String, OtpRecord)>;
}

/// Process-local map. Not shared across instances and gone on restart;
/// concurrent verifies for the same email race, which is tolerated for a
/// debugging aid.
#[derive(Default)]
pub struct InMemoryOtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, email: &str) -> Option<OtpRecord> {
        self.records.read().unwrap().get(email).cloned()
    }

    async fn set(&self, email: &str, record: OtpRecord) {
        self.records
            .write()
            .unwrap()
            .insert(email.to_string(), record);
    }

    async fn delete(&self, email: &str) {
        self.records.write().unwrap().remove(email);
    }

    async fn all(&self) -> Vec<(String, OtpRecord)> {
        self.records
            .read()
            .unwrap()
            .iter()
            .map(|(email, record)| (email.clone(), record.clone()))
            .collect()
    }
}

pub struct MockEmailService {
    store: Arc<dyn OtpStore>,
}

impl MockEmailService {
    pub fn new(store: Arc<dyn OtpStore>) -> Self {
        MockEmailService { store }
    }

    // Generate 5-digit OTP. Not a cryptographic source; this never guards
    // a production secret path.
    pub fn generate_otp() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(10_000..100_000).to_string()
    }

    /// Issue a fresh code, overwriting any previous record for the email.
    pub async fn send_otp(&self, email: &str) -> OtpRecord {
        let record = OtpRecord {
            code: Self::generate_otp(),
            created_at: Utc::now(),
            attempts: 0,
            verified: false,
        };
        self.store.set(email, record.clone()).await;

        info!("[MockEmail] OTP issued for {}: {}", email, record.code);
        record
    }

    /// A mismatch counts an attempt and leaves the record issued; there is
    /// no lockout after N attempts.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<OtpRecord, OtpError> {
        let mut record = self.store.get(email).await.ok_or(OtpError::NoRecord)?;

        if record.code != code {
            record.attempts += 1;
            self.store.set(email, record).await;
            return Err(OtpError::InvalidCode);
        }

        record.verified = true;
        self.store.set(email, record.clone()).await;
        Ok(record)
    }

    /// Requires a verified code; deletes the record on success. The new
    /// password is neither stored nor validated here.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), OtpError> {
        match self.store.get(email).await {
            Some(record) if record.verified => {
                self.store.delete(email).await;
                debug!(
                    "[MockEmail] password reset for {} (new password: {})",
                    email, new_password
                );
                Ok(())
            }
            _ => Err(OtpError::NotVerified),
        }
    }

    pub async fn records(&self) -> Vec<(String, OtpRecord)> {
        self.store.all().await
    }
}
