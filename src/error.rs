// src/error.rs
// Standardized error types for the CommonTrace client

use thiserror::Error;

/// Main error type for the commontrace library
#[derive(Error, Debug)]
pub enum TraceError {
    /// Non-2xx response from the CommonTrace API, with the detail message
    /// extracted from the response body.
    #[error("API error {status}: {detail}")]
    Api { status: u16, detail: String },

    /// Circuit breaker is open - the upstream is being skipped.
    #[error("CommonTrace API temporarily unavailable (circuit open)")]
    CircuitOpen,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown error: {0}")]
    Other(String),
}

/// Convenience type alias for Result using TraceError
pub type Result<T> = std::result::Result<T, TraceError>;

impl TraceError {
    /// Map any failure onto the `(status_code, detail)` pair consumed by
    /// `formatters::format_error`. API errors pass through unchanged;
    /// everything else gets a gateway-style status so agents always see a
    /// formatted error line instead of a fault.
    pub fn as_status_detail(&self) -> (u16, String) {
        match self {
            TraceError::Api { status, detail } => (*status, detail.clone()),
            TraceError::CircuitOpen => (503, self.to_string()),
            TraceError::Http(e) if e.is_timeout() => (504, format!("request timed out: {}", e)),
            TraceError::Http(e) => (502, format!("transport error: {}", e)),
            other => (500, other.to_string()),
        }
    }
}

impl From<String> for TraceError {
    fn from(s: String) -> Self {
        TraceError::Other(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = TraceError::Api {
            status: 404,
            detail: "trace not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("trace not found"));
    }

    #[test]
    fn test_api_error_status_detail_passthrough() {
        let err = TraceError::Api {
            status: 422,
            detail: "missing title".to_string(),
        };
        assert_eq!(err.as_status_detail(), (422, "missing title".to_string()));
    }

    #[test]
    fn test_circuit_open_maps_to_503() {
        let (status, detail) = TraceError::CircuitOpen.as_status_detail();
        assert_eq!(status, 503);
        assert!(detail.contains("circuit open"));
    }

    #[test]
    fn test_config_error_display() {
        let err = TraceError::Config("bad transport".to_string());
        assert!(err.to_string().contains("configuration error"));
        assert!(err.to_string().contains("bad transport"));
    }

    #[test]
    fn test_other_maps_to_500() {
        let err: TraceError = "something odd".to_string().into();
        assert!(matches!(err, TraceError::Other(_)));
        let (status, detail) = err.as_status_detail();
        assert_eq!(status, 500);
        assert!(detail.contains("something odd"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: TraceError = json_err.into();
        assert!(matches!(err, TraceError::Json(_)));
        let (status, _) = err.as_status_detail();
        assert_eq!(status, 500);
    }
}
