//! Encoding and decoding of [`Payload`]s as compact JWTs.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use hirevault_core::error::AppError;

use super::payload::Payload;

/// Why a token string could not be turned into a [`Payload`].
///
/// Never leaves the token layer; callers see one of the uniform
/// authentication errors instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The signature does not match the codec's secret.
    #[error("invalid token signature")]
    InvalidSignature,
    /// Not a JWT, wrong algorithm, or claims that do not form a payload.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// `expires_at` is not after `issued_at`.
    #[error("token expires before it was issued")]
    InvalidWindow,
}

impl From<jsonwebtoken::errors::Error> for DecodeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// A JWT codec bound to one HMAC secret and algorithm. Pure, no I/O.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl TokenCodec {
    /// Bind a codec to `secret` and an HMAC `algorithm`.
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, AppError> {
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AppError::configuration(format!(
                "Unsupported token algorithm {algorithm:?}: only HS256, HS384 and HS512 are allowed"
            )));
        }
        if secret.is_empty() {
            return Err(AppError::configuration("Token secret must not be empty"));
        }

        // Expiry is judged by the token service against its own clock, and
        // the payload carries no registered claims.
        let mut validation = Validation::new(algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// The algorithm this codec signs with.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign `payload` into a compact token string.
    pub fn encode(&self, payload: &Payload) -> Result<String, AppError> {
        encode(&Header::new(self.algorithm), payload, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Verify and decode a compact token string.
    pub fn decode(&self, token: &str) -> Result<Payload, DecodeError> {
        let data = decode::<Payload>(token, &self.decoding_key, &self.validation)?;
        if !data.claims.has_valid_window() {
            return Err(DecodeError::InvalidWindow);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::payload::TokenType;
    use chrono::{Duration, TimeZone, Utc};
    use hirevault_entity::user::AccountType;
    use uuid::Uuid;

    fn payload() -> Payload {
        let issued_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
            + Duration::microseconds(123_456);
        Payload {
            id: Uuid::new_v4(),
            user_id: 42,
            token_type: TokenType::Access,
            account_type: AccountType::Recruiter,
            issued_at,
            expires_at: issued_at + Duration::minutes(30),
            is_revoked: false,
            role_id: Some(7),
        }
    }

    #[test]
    fn test_round_trip_is_field_for_field() {
        for algorithm in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let codec = TokenCodec::new(b"secret", algorithm).unwrap();
            let original = payload();
            let token = codec.encode(&original).unwrap();
            assert_eq!(codec.decode(&token).unwrap(), original);
        }
    }

    #[test]
    fn test_claims_are_flat_rfc3339() {
        let codec = TokenCodec::new(b"secret", Algorithm::HS256).unwrap();
        let token = codec.encode(&payload()).unwrap();
        let json = decode::<serde_json::Value>(&token, &codec.decoding_key, &codec.validation)
            .unwrap()
            .claims;
        assert_eq!(json["user_id"], 42);
        assert_eq!(json["token_type"], "access");
        assert_eq!(json["account_type"], "recruiter");
        assert!(json["issued_at"].as_str().unwrap().starts_with("2024-03-01T12:00:00.123456"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signer = TokenCodec::new(b"secret", Algorithm::HS256).unwrap();
        let other = TokenCodec::new(b"other", Algorithm::HS256).unwrap();
        let token = signer.encode(&payload()).unwrap();
        assert!(matches!(other.decode(&token), Err(DecodeError::InvalidSignature)));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = TokenCodec::new(b"secret", Algorithm::HS256).unwrap();
        assert!(matches!(codec.decode("not.a.token"), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_empty_window_is_rejected() {
        let codec = TokenCodec::new(b"secret", Algorithm::HS256).unwrap();
        let mut p = payload();
        p.expires_at = p.issued_at;
        let token = codec.encode(&p).unwrap();
        assert!(matches!(codec.decode(&token), Err(DecodeError::InvalidWindow)));
    }

    #[test]
    fn test_rejects_non_hmac_algorithm() {
        assert!(TokenCodec::new(b"secret", Algorithm::RS256).is_err());
        assert!(TokenCodec::new(b"", Algorithm::HS256).is_err());
    }
}
