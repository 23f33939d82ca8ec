//! Maps a raw HTTP response onto success or a typed [`Error`].

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiErrorInfo, Error, Result};

/// Response header carrying the server-side correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id from the response headers, empty when absent.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `Retry-After` in whole seconds; 0 when absent or not an integer.
pub fn retry_after(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Classifies a response by status code. `Ok(())` means the body can be decoded.
pub fn classify(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Result<()> {
    if status.as_u16() < 400 {
        return Ok(());
    }

    let request_id = request_id(headers);
    let error_body = parse_error_body(body);
    let detail = error_body
        .as_ref()
        .and_then(|m| m.get("detail"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let info = |default: String| {
        ApiErrorInfo::new(detail.clone().unwrap_or(default), status.as_u16(), &request_id)
            .with_response_data(error_body.clone())
    };

    let err = match status {
        StatusCode::UNAUTHORIZED => {
            Error::Authentication(info("Invalid or missing API key".to_string()))
        }
        StatusCode::NOT_FOUND => Error::NotFound(info("Resource not found".to_string())),
        StatusCode::UNPROCESSABLE_ENTITY => Error::Validation {
            info: info("Validation error".to_string()),
            errors: error_body
                .as_ref()
                .and_then(|m| m.get("errors"))
                .and_then(Value::as_object)
                .cloned(),
        },
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimit {
            info: info("Rate limit exceeded".to_string()),
            retry_after: retry_after(headers),
        },
        s if s.is_server_error() || s.as_u16() >= 600 => {
            Error::Server(info(format!("Server error: {}", s.as_u16())))
        }
        s => Error::Api(info(format!("API error: {}", s.as_u16()))),
    };

    Err(err)
}

/// Decodes a success body. An empty body yields `None`.
pub fn decode<T: DeserializeOwned>(body: &[u8], request_id: &str) -> Result<Option<T>> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|source| Error::Decode {
            source,
            request_id: request_id.to_string(),
        })
}

/// Error bodies are best effort: anything that isn't a JSON object is ignored.
fn parse_error_body(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    fn classify_status(status: u16, body: &str) -> Error {
        classify(
            StatusCode::from_u16(status).unwrap(),
            &headers(&[("x-request-id", "req-1")]),
            body.as_bytes(),
        )
        .unwrap_err()
    }

    #[test]
    fn test_success_statuses() {
        for status in [200, 201, 204, 302] {
            let status = StatusCode::from_u16(status).unwrap();
            assert!(classify(status, &HeaderMap::new(), b"").is_ok());
        }
    }

    #[test]
    fn test_default_messages_without_detail() {
        let cases = [
            (401, "Invalid or missing API key"),
            (404, "Resource not found"),
            (422, "Validation error"),
            (429, "Rate limit exceeded"),
            (500, "Server error: 500"),
            (503, "Server error: 503"),
            (400, "API error: 400"),
        ];
        for (status, message) in cases {
            let err = classify_status(status, "{}");
            let info = err.info().unwrap();
            assert_eq!(info.message, message, "status {}", status);
            assert_eq!(info.status, status);
            assert_eq!(info.request_id, "req-1");
        }
    }

    #[test]
    fn test_variants_by_status() {
        assert!(matches!(classify_status(401, ""), Error::Authentication(_)));
        assert!(matches!(classify_status(404, ""), Error::NotFound(_)));
        assert!(matches!(classify_status(422, ""), Error::Validation { .. }));
        assert!(matches!(classify_status(429, ""), Error::RateLimit { .. }));
        assert!(matches!(classify_status(500, ""), Error::Server(_)));
        assert!(matches!(classify_status(503, ""), Error::Server(_)));
        assert!(matches!(classify_status(403, ""), Error::Api(_)));
        assert!(matches!(classify_status(409, ""), Error::Api(_)));
    }

    #[test]
    fn test_detail_overrides_default() {
        let err = classify_status(404, r#"{"detail": "Identity abc not found"}"#);
        assert_eq!(err.info().unwrap().message, "Identity abc not found");
    }

    #[test]
    fn test_non_string_detail_is_ignored() {
        // FastAPI sends a list of issues as `detail` on some 422s
        let err = classify_status(422, r#"{"detail": [{"loc": ["body"], "msg": "bad"}]}"#);
        assert_eq!(err.info().unwrap().message, "Validation error");
    }

    #[test]
    fn test_unparsable_body_uses_default() {
        let err = classify_status(500, "<html>Bad Gateway</html>");
        assert_eq!(err.info().unwrap().message, "Server error: 500");
        assert!(err.info().unwrap().response_data.is_none());
    }

    #[test]
    fn test_validation_field_errors() {
        let err = classify_status(
            422,
            r#"{"detail": "Invalid request", "errors": {"image_url": "must be a URL"}}"#,
        );
        match err {
            Error::Validation { info, errors } => {
                assert_eq!(info.message, "Invalid request");
                let errors = errors.unwrap();
                assert_eq!(errors["image_url"], "must be a URL");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_limit_retry_after() {
        let err = classify(
            StatusCode::TOO_MANY_REQUESTS,
            &headers(&[("retry-after", "17")]),
            b"",
        )
        .unwrap_err();
        assert_eq!(err.retry_after(), Some(17));
        assert_eq!(err.request_id(), "");

        let err = classify(
            StatusCode::TOO_MANY_REQUESTS,
            &headers(&[("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT")]),
            b"",
        )
        .unwrap_err();
        assert_eq!(err.retry_after(), Some(0));

        let err = classify(StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new(), b"").unwrap_err();
        assert_eq!(err.retry_after(), Some(0));
    }

    #[test]
    fn test_generic_error_keeps_raw_body() {
        let err = classify_status(409, r#"{"detail": "Already licensed", "code": "DUPLICATE"}"#);
        match err {
            Error::Api(info) => {
                assert_eq!(info.message, "Already licensed");
                assert_eq!(info.status, 409);
                let data = info.response_data.unwrap();
                assert_eq!(data["code"], "DUPLICATE");
            }
            other => panic!("Expected generic API error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_body_is_none() {
        let decoded: Option<serde_json::Value> = decode(b"", "req").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_decode_whitespace_body_is_decode_error() {
        let err = decode::<serde_json::Value>(b"  \n", "req-ws").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(err.request_id(), "req-ws");
    }

    #[test]
    fn test_decode_failure_carries_request_id() {
        #[derive(serde::Deserialize, Debug)]
        struct Shape {
            #[allow(dead_code)]
            id: String,
        }

        let err = decode::<Shape>(b"not json", "req-9").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(err.request_id(), "req-9");
        assert!(!err.is_retryable());
    }
}
