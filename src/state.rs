use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::forwarder::Forwarder;
use crate::services::otp::{InMemoryOtpStore, MockEmailService, OtpStore};
use crate::services::translator::RouteTranslator;

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<RouteTranslator>,
    pub forwarder: Arc<Forwarder>,
    pub mock_email: Arc<MockEmailService>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryOtpStore::default()))
    }

    /// The OTP store is injectable so a deployment can swap the in-memory
    /// map for a real cache without touching handler code.
    pub fn with_store(config: &AppConfig, store: Arc<dyn OtpStore>) -> Self {
        AppState {
            translator: Arc::new(RouteTranslator::new(config.upstream_base_url.clone())),
            forwarder: Arc::new(Forwarder::new()),
            mock_email: Arc::new(MockEmailService::new(store)),
        }
    }
}
