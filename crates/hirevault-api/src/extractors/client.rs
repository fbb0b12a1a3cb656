//! Client metadata recorded on new sessions.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

const UNKNOWN: &str = "unknown";

/// User agent and originating address of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// `User-Agent` header, or `"unknown"`.
    pub user_agent: String,
    /// First `X-Forwarded-For` hop, then `X-Real-IP`, or `"unknown"`.
    pub client_ip: String,
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let client_ip = header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .or_else(|| header("x-real-ip"))
            .unwrap_or(UNKNOWN)
            .to_string();

        let user_agent = header(USER_AGENT.as_str()).unwrap_or(UNKNOWN).to_string();

        Ok(ClientInfo {
            user_agent,
            client_ip,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> ClientInfo {
        let (mut parts, _) = request.into_parts();
        ClientInfo::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_forwarded_for_takes_first_hop() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-real-ip", "10.0.0.2")
            .header("user-agent", "curl/8.0")
            .body(())
            .unwrap();
        let info = extract(request).await;
        assert_eq!(info.client_ip, "203.0.113.7");
        assert_eq!(info.user_agent, "curl/8.0");
    }

    #[tokio::test]
    async fn test_missing_headers_are_unknown() {
        let info = extract(Request::builder().body(()).unwrap()).await;
        assert_eq!(info.client_ip, "unknown");
        assert_eq!(info.user_agent, "unknown");
    }
}
