use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured error information extracted from a Google API error response.
///
/// Firestore answers failed requests with a body of the form
/// `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorInfo {
    /// HTTP status code reported by the API.
    #[serde(default)]
    pub code: u16,
    /// Canonical status name, e.g. `PERMISSION_DENIED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorInfo,
}

impl ApiErrorInfo {
    /// Extract error info from a response status and raw body.
    ///
    /// Falls back to the raw body text when it is not a Google error envelope.
    pub fn from_response(code: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let mut info = envelope.error;
                if info.code == 0 {
                    info.code = code;
                }
                info
            }
            Err(_) => {
                let trimmed = body.trim();
                Self {
                    code,
                    status: None,
                    message: (!trimmed.is_empty()).then(|| trimmed.to_string()),
                }
            }
        }
    }
}

impl fmt::Display for ApiErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(status) = &self.status {
            write!(f, " {status}")?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_google_error_envelope() {
        let body = r#"{"error":{"code":403,"message":"Missing permissions","status":"PERMISSION_DENIED"}}"#;
        let info = ApiErrorInfo::from_response(403, body);
        assert_eq!(info.code, 403);
        assert_eq!(info.status.as_deref(), Some("PERMISSION_DENIED"));
        assert_eq!(info.to_string(), "403 PERMISSION_DENIED: Missing permissions");
    }

    #[test]
    fn test_falls_back_to_raw_body() {
        let info = ApiErrorInfo::from_response(502, "Bad Gateway\n");
        assert_eq!(info.code, 502);
        assert_eq!(info.status, None);
        assert_eq!(info.message.as_deref(), Some("Bad Gateway"));
    }

    #[test]
    fn test_empty_body_has_no_message() {
        let info = ApiErrorInfo::from_response(500, "");
        assert_eq!(info.to_string(), "500");
    }
}
