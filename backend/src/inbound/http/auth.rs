//! API-key extraction and verification for protected handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by
//! concentrating header handling here. A missing header is a
//! request-validation failure; a present-but-wrong key is rejected by the
//! access guard.

use actix_web::HttpRequest;

use crate::domain::{AccessGuard, Error, FieldViolation};

use super::ApiResult;

/// Header carrying the shared API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Require a valid API key on the request.
pub fn require_api_key(request: &HttpRequest, guard: &AccessGuard) -> ApiResult<()> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            Error::validation_failed(vec![FieldViolation::new(
                "x-api-key",
                format!("{API_KEY_HEADER} header is required"),
            )])
        })?;

    guard.authenticate(presented)
}

/// Request-origin address for audit storage.
///
/// Prefers the first element of `X-Forwarded-For` so deployments behind a
/// proxy record the caller rather than the proxy; falls back to the peer
/// address.
pub fn origin_address(request: &HttpRequest) -> Option<String> {
    let forwarded = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match forwarded {
        Some(address) => Some(address.to_owned()),
        None => request
            .connection_info()
            .realip_remote_addr()
            .map(ToOwned::to_owned),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{AdminCredentials, ErrorCode};
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn guard() -> AccessGuard {
        AccessGuard::new("launch-key", AdminCredentials::new("admin", "admin123"))
    }

    #[test]
    fn accepts_the_configured_key() {
        let request = TestRequest::default()
            .insert_header((API_KEY_HEADER, "launch-key"))
            .to_http_request();

        assert!(require_api_key(&request, &guard()).is_ok());
    }

    #[test]
    fn missing_header_is_a_validation_failure() {
        let request = TestRequest::default().to_http_request();

        let err = require_api_key(&request, &guard()).expect_err("header absent");
        assert_eq!(err.code(), ErrorCode::Unprocessable);
    }

    #[test]
    fn wrong_key_is_unauthorized() {
        let request = TestRequest::default()
            .insert_header((API_KEY_HEADER, "wrong"))
            .to_http_request();

        let err = require_api_key(&request, &guard()).expect_err("key mismatch");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case("203.0.113.9", Some("203.0.113.9"))]
    #[case("203.0.113.9, 10.0.0.1", Some("203.0.113.9"))]
    #[case("  203.0.113.9 ,10.0.0.1", Some("203.0.113.9"))]
    fn forwarded_for_wins_over_peer_address(
        #[case] header: &str,
        #[case] expected: Option<&str>,
    ) {
        let request = TestRequest::default()
            .insert_header(("X-Forwarded-For", header))
            .to_http_request();

        assert_eq!(origin_address(&request).as_deref(), expected);
    }

    #[test]
    fn falls_back_to_peer_address() {
        let request = TestRequest::default()
            .peer_addr("192.0.2.7:9000".parse().expect("socket addr"))
            .to_http_request();

        assert_eq!(origin_address(&request).as_deref(), Some("192.0.2.7"));
    }
}
