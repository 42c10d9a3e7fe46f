//! CORS layer for the browser front-end.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use repairdesk_core::config::CorsConfig;

/// Entries that do not parse as header values or methods are skipped
/// with a warning.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(&config.allowed_origins, "origin"))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(parse_all::<Method>(&config.allowed_methods, "method"))
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn parse_all<T: std::str::FromStr>(values: &[String], what: &str) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| match v.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(value = %v, "Ignoring invalid CORS {what}");
                None
            }
        })
        .collect()
}
