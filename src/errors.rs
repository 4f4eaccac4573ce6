use serde_json::Value;
use std::fmt;

/// Message used when neither the backend nor the transport said anything useful.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// The single error type surfaced by the scoring gateway.
///
/// Covers transport failures, non-2xx responses and malformed bodies. The
/// message is always human-readable; the HTTP status is kept as metadata when
/// the backend answered at all.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayError {
    message: String,
    status: Option<u16>,
}

impl GatewayError {
    /// Creates an error with a message and no HTTP status.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            message,
            status: None,
        }
    }

    /// Builds the error for a non-2xx response.
    ///
    /// Message priority:
    /// 1. `detail` is a list: every entry's `msg` joined with `", "`.
    /// 2. `detail` is present: used as-is.
    /// 3. `Request failed with status code <status>`.
    ///
    /// # Arguments
    ///
    /// * `status` - The HTTP status code returned by the backend.
    /// * `body` - The raw response body (may be empty or not JSON at all).
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| extract_detail(&value))
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        Self {
            status: Some(status),
            ..Self::new(message)
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, if the failure came from a backend response.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    /// Converts a transport failure, keeping only its message.
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            ..Self::new(err.to_string())
        }
    }
}

/// Extracts a message from a FastAPI-style error body.
///
/// Returns `None` when there is no usable `detail`, so the caller can fall
/// back to the transport message.
pub fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(detail) if detail.trim().is_empty() => None,
        Value::String(detail) => Some(detail.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::String(s) => Some(s.as_str()),
                    other => other.get("msg").and_then(Value::as_str),
                })
                .collect();

            if messages.is_empty() {
                None
            } else {
                Some(messages.join(", "))
            }
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_list_joined() {
        let body = json!({"detail": [{"msg": "age required"}, {"msg": "limit required"}]});
        assert_eq!(
            extract_detail(&body).as_deref(),
            Some("age required, limit required")
        );
    }

    #[test]
    fn test_detail_string_used_directly() {
        let body = json!({"detail": "invalid token"});
        assert_eq!(extract_detail(&body).as_deref(), Some("invalid token"));
    }

    #[test]
    fn test_detail_list_skips_entries_without_msg() {
        let body = json!({"detail": [{"loc": ["body", "AGE"]}, {"msg": "limit required"}]});
        assert_eq!(extract_detail(&body).as_deref(), Some("limit required"));
    }

    #[test]
    fn test_missing_detail() {
        assert_eq!(extract_detail(&json!({"error": "nope"})), None);
        assert_eq!(extract_detail(&json!({"detail": null})), None);
        assert_eq!(extract_detail(&json!({"detail": []})), None);
        assert_eq!(extract_detail(&json!("plain")), None);
    }

    #[test]
    fn test_non_string_detail_serialized() {
        let body = json!({"detail": {"code": 7}});
        assert_eq!(extract_detail(&body).as_deref(), Some(r#"{"code":7}"#));
    }

    #[test]
    fn test_error_body_fallback_to_status() {
        let err = GatewayError::from_error_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.message(), "Request failed with status code 502");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_error_body_with_detail() {
        let err = GatewayError::from_error_body(422, r#"{"detail": "Input data missing expected features: ['AGE']"}"#);
        assert_eq!(
            err.to_string(),
            "Input data missing expected features: ['AGE']"
        );
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_empty_message_uses_generic_fallback() {
        let err = GatewayError::new("   ");
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }
}
