use axum::http::{HeaderValue, Method, header};
use core_config::{Environment, server::ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// CORS layer for an explicit list of origins.
///
/// Allows GET, POST, PUT, DELETE and OPTIONS with JSON content headers,
/// cached for one hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Resolve the CORS policy from `CORS_ALLOWED_ORIGIN`.
///
/// Unset or empty is permissive in development and an error in production.
pub fn cors_layer(server_config: &ServerConfig, environment: Environment) -> io::Result<CorsLayer> {
    let origins = server_config.allowed_origins();

    if origins.is_empty() {
        if environment.is_production() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "CORS_ALLOWED_ORIGIN is required in production. Example: CORS_ALLOWED_ORIGIN=https://shop.example.com",
            ));
        }
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(CorsLayer::permissive());
    }

    let parsed = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS origin '{}': {}", origin, e),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()?;

    info!(origins = ?origins, "CORS configured");
    Ok(create_cors_layer(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(origins: Option<&str>) -> ServerConfig {
        ServerConfig {
            cors_allowed_origin: origins.map(str::to_string),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_unset_origins_permissive_in_development() {
        assert!(cors_layer(&config(None), Environment::Development).is_ok());
    }

    #[test]
    fn test_unset_origins_rejected_in_production() {
        let err = cors_layer(&config(None), Environment::Production).unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }

    #[test]
    fn test_explicit_origins_accepted_in_production() {
        let result = cors_layer(
            &config(Some("https://shop.example.com,https://admin.example.com")),
            Environment::Production,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let result = cors_layer(&config(Some("https://bad\norigin")), Environment::Development);
        assert!(result.is_err());
    }
}
