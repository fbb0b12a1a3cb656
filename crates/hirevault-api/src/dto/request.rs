//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request. `login` matches either the email or the username.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email or username.
    #[serde(alias = "email", alias = "username")]
    #[validate(length(min = 1, message = "Email or username is required"))]
    pub login: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh or logout request body, used when the refresh cookie is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_email_or_username_key() {
        let by_email: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.test","password":"pw"}"#).unwrap();
        assert_eq!(by_email.login, "a@b.test");

        let by_name: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw"}"#).unwrap();
        assert_eq!(by_name.login, "alice");
    }

    #[test]
    fn test_empty_password_fails_validation() {
        let req = LoginRequest {
            login: "alice".into(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
