//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// HMAC algorithms accepted for token signing.
pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Longest accepted access token lifetime (one year).
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: u64 = 365 * 24 * 60;

/// Longest accepted refresh token lifetime (ten years).
pub const MAX_REFRESH_TOKEN_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Token and session configuration.
///
/// Access and refresh tokens are signed with independent secrets but share
/// one algorithm. The two TTLs use different units on purpose: access
/// tokens live for minutes, refresh tokens are configured in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret for signing access tokens.
    pub access_token_secret: String,
    /// Secret for signing refresh tokens.
    pub refresh_token_secret: String,
    /// JWT algorithm name (`HS256`, `HS384` or `HS512`).
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token TTL in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// Name of the HttpOnly cookie carrying the refresh token.
    #[serde(default = "default_cookie_name")]
    pub refresh_cookie_name: String,
    /// Whether the refresh cookie is marked `Secure`.
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Reject configurations that would make every token unusable or unsafe.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_token_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.access_token_secret must be set"));
        }
        if self.refresh_token_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.refresh_token_secret must be set"));
        }
        if !SUPPORTED_ALGORITHMS.contains(&self.algorithm.as_str()) {
            return Err(AppError::configuration(format!(
                "auth.algorithm '{}' is not supported (expected one of {})",
                self.algorithm,
                SUPPORTED_ALGORITHMS.join(", ")
            )));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&self.access_token_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_minutes must be between 1 and {MAX_ACCESS_TOKEN_TTL_MINUTES}"
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_TTL_SECONDS).contains(&self.refresh_token_ttl_seconds) {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_seconds must be between 1 and {MAX_REFRESH_TOKEN_TTL_SECONDS}"
            )));
        }
        Ok(())
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl() -> u64 {
    30
}

fn default_refresh_ttl() -> u64 {
    86_400
}

fn default_cookie_name() -> String {
    "refresh_token".to_string()
}

fn default_cookie_secure() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access".into(),
            refresh_token_secret: "refresh".into(),
            algorithm: default_algorithm(),
            access_token_ttl_minutes: 30,
            refresh_token_ttl_seconds: 3600,
            refresh_cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_secret() {
        let mut config = sample();
        config.refresh_token_secret = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let mut config = sample();
        config.algorithm = "RS256".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let mut config = sample();
        config.access_token_ttl_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_ttl() {
        let mut config = sample();
        config.refresh_token_ttl_seconds = 10_000_000_000_000;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.access_token_ttl_minutes = u64::MAX;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.access_token_ttl_minutes = MAX_ACCESS_TOKEN_TTL_MINUTES;
        config.refresh_token_ttl_seconds = MAX_REFRESH_TOKEN_TTL_SECONDS;
        assert!(config.validate().is_ok());
    }
}
