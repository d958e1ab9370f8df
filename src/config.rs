use std::env;

use tracing::{info, warn};

/// Runtime settings for the console. Every field has a sensible default so
/// the binary runs against a local backend with no configuration at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub session_file: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            base_url: var_or("PARCEL_API_URL", "http://localhost:8080/api"),
            timeout_secs: var_or("PARCEL_API_TIMEOUT_SECS", "30")
                .parse()
                .unwrap_or_else(|e| {
                    warn!("invalid PARCEL_API_TIMEOUT_SECS: {e}, using 30");
                    30
                }),
            session_file: var_or("PARCEL_SESSION_FILE", ".parcel-session.json"),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
