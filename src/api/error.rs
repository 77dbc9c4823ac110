//! Error taxonomy for run-service requests.

use serde::Deserialize;

/// Failure modes surfaced to the operator.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the request payload (HTTP 400/422).
    #[error("Invalid request: {0}")]
    Validation(String),
    /// The referenced run or plugin no longer exists (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),
    /// The server failed internally (HTTP 5xx).
    #[error("Server error: {0}")]
    Server(String),
    /// The request never produced a usable response.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Map an HTTP error status plus body to the taxonomy, preferring the
/// server-provided detail message when the body carries one.
pub(super) fn from_status(code: u16, body: String) -> ApiError {
    let message = extract_detail(&body);
    match code {
        400 | 422 => ApiError::Validation(message),
        404 => ApiError::NotFound(message),
        500..=599 => ApiError::Server(message),
        _ => ApiError::Transport(format!("HTTP {code}: {message}")),
    }
}

fn extract_detail(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty response body)".to_string();
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(trimmed) {
        if let Some(detail) = parsed.detail {
            return detail;
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_detail_from_json_bodies() {
        let err = from_status(422, r#"{"detail": "Unknown plugin 'nope'"}"#.to_string());
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid request: Unknown plugin 'nope'");
    }

    #[test]
    fn falls_back_to_raw_body_text() {
        let err = from_status(500, "boom".to_string());
        assert!(matches!(err, ApiError::Server(_)));
        assert_eq!(err.to_string(), "Server error: boom");
    }

    #[test]
    fn maps_not_found() {
        let err = from_status(404, r#"{"detail": "Run not found"}"#.to_string());
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn unexpected_statuses_fall_back_to_transport() {
        let err = from_status(301, String::new());
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
