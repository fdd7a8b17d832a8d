// Error types for the medchat relay
// Author: kelexine (https://github.com/kelexine)

use crate::models::FormattedResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Problems with what the caller sent. Always rendered as HTTP 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing input")]
    MissingInput,

    #[error("invalid image data")]
    InvalidImageData,

    #[error("image too large ({size} bytes, limit {limit})")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("missing image")]
    MissingImage,

    #[error("empty image filename")]
    EmptyFilename,

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingInput => {
                "Please provide a message or an image to analyze.".to_string()
            }
            ValidationError::InvalidImageData => {
                "Invalid image data. Please re-upload the image.".to_string()
            }
            ValidationError::ImageTooLarge { limit, .. } => format!(
                "The image is too large (max {}MB). Please upload a smaller file.",
                limit / (1024 * 1024)
            ),
            ValidationError::MissingImage => "Please attach an image to analyze.".to_string(),
            ValidationError::EmptyFilename => {
                "Please choose an image file to upload.".to_string()
            }
            ValidationError::MalformedBody(_) => {
                "We couldn't understand that request. Please try again.".to_string()
            }
        }
    }
}

/// Failure of a single outbound call to the LLM gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream unreachable: {0}")]
    Network(String),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Status(code) => format!(
                "The AI service returned an error (HTTP {}). Please try again.",
                code
            ),
            GatewayError::Timeout => "Request timed out. Please try again.".to_string(),
            GatewayError::Network(_) => {
                "We couldn't reach the AI service. Please check your connection and try again."
                    .to_string()
            }
            GatewayError::MalformedResponse(_) => {
                "Something went wrong while processing your request. Please try again."
                    .to_string()
            }
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Status(_) => "status",
            GatewayError::Timeout => "timeout",
            GatewayError::Network(_) => "network",
            GatewayError::MalformedResponse(_) => "malformed",
        }
    }
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("No model variant produced a usable answer")]
    Upstream,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// HTTP status and the message that is safe to show the caller.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            RelayError::Validation(e) => (StatusCode::BAD_REQUEST, e.user_message()),
            RelayError::InvalidImage(_) => (
                StatusCode::BAD_REQUEST,
                "We couldn't read that image. Please upload a valid JPG or PNG.".to_string(),
            ),
            RelayError::Gateway(e) => {
                let status = match e {
                    GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, e.user_message())
            }
            RelayError::Upstream => (
                StatusCode::BAD_GATEWAY,
                "Something went wrong. Please try again.".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong on our side. Please try again.".to_string(),
            ),
        }
    }
}

// Convert RelayError to HTTP responses for Axum
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Full detail stays in the log, the body only carries the safe message
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, axum::Json(FormattedResponse::failure(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: RelayError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_renders_bad_request() {
        let (status, body) = render(ValidationError::MissingInput.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please provide a message or an image to analyze.");
        assert!(body.get("response").is_none());
    }

    #[tokio::test]
    async fn test_internal_detail_not_exposed() {
        let (status, body) =
            render(RelayError::Internal("panic in worker: secret path /etc".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().unwrap();
        assert!(!message.contains("/etc"));
    }

    #[tokio::test]
    async fn test_timeout_renders_gateway_timeout() {
        let (status, body) = render(GatewayError::Timeout.into()).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "Request timed out. Please try again.");
    }

    #[test]
    fn test_image_too_large_message_uses_limit() {
        let err = ValidationError::ImageTooLarge {
            size: 11 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert!(err.user_message().contains("max 10MB"));
    }
}
