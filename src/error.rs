use serde::Deserialize;
use thiserror::Error;

/// Everything a backend call can fail with. None of these are fatal to the
/// caller; the console surfaces the message and stays interactive.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("server rejected request ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Validation(String),
}

// Spring error bodies usually carry a `message` field; anything else is
// passed through raw.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.message,
            Err(_) => body,
        };
        let message = if message.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            message
        };
        match status.as_u16() {
            404 => ApiError::NotFound(message),
            401 | 403 => ApiError::Unauthorized(message),
            code => ApiError::Status {
                status: code,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_mapping_picks_specific_kinds() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, String::new());
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = ApiError::from_status(StatusCode::FORBIDDEN, "nope".to_string());
        assert!(matches!(err, ApiError::Unauthorized(m) if m == "nope"));

        let err = ApiError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"boom"}"#.to_string(),
        );
        assert!(matches!(err, ApiError::Status { status: 500, message } if message == "boom"));
    }
}
