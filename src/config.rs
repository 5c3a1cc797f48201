// config.rs
use std::env;

/// Base URL of the upstream REST backend that owns the real auth and news
/// data. Overridable so staging/local backends can be pointed at without a
/// rebuild.
pub const DEFAULT_UPSTREAM_BASE_URL: &str =
    "https://phpstack-1520234-5847937.cloudwaysapps.com/api/v1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upstream_base_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .map(|url| normalize_base_url(&url))
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

/// Target URLs are built by appending the inbound path, so the base must not
/// end with a slash.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("https://backend.example.com/api/v1/"),
            "https://backend.example.com/api/v1"
        );
        assert_eq!(
            normalize_base_url("https://backend.example.com/api/v1"),
            "https://backend.example.com/api/v1"
        );
    }
}
