//! Centralized configuration (environment variables + defaults).

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Origin of the marketplace backend REST API.
pub fn backend_base_url() -> String {
    env::var("REBAY_BACKEND_URL").unwrap_or_else(|_| {
        info!("REBAY_BACKEND_URL not set, using default: http://localhost:8050");
        "http://localhost:8050".to_string()
    })
}

/// Port the frontend server binds.
pub fn frontend_port() -> u16 {
    load_or_default("REBAY_PORT", "3000")
}

/// Lifetime of a frontend session, in hours.
pub fn session_ttl_hours() -> i64 {
    load_or_default("REBAY_SESSION_TTL_HOURS", "24")
}

fn load_or_default<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}");
        panic!("Environment misconfigured: {key}")
    })
}
