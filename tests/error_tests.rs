// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use medchat_relay::error::{GatewayError, RelayError, ValidationError};

#[test]
fn test_error_display_messages() {
    let errors = vec![
        RelayError::Validation(ValidationError::MissingInput),
        RelayError::InvalidImage("bad magic".to_string()),
        RelayError::Gateway(GatewayError::Status(500)),
        RelayError::Gateway(GatewayError::Timeout),
        RelayError::Upstream,
        RelayError::Config("GROQ_API_KEY is not set".to_string()),
        RelayError::Internal("join error".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_validation_errors_are_bad_request() {
    let cases = vec![
        (
            ValidationError::MissingInput,
            "Please provide a message or an image to analyze.",
        ),
        (
            ValidationError::InvalidImageData,
            "Invalid image data. Please re-upload the image.",
        ),
        (
            ValidationError::MissingImage,
            "Please attach an image to analyze.",
        ),
        (
            ValidationError::EmptyFilename,
            "Please choose an image file to upload.",
        ),
    ];

    for (error, expected) in cases {
        let (status, message) = RelayError::from(error).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, expected);
    }
}

#[test]
fn test_invalid_image_message() {
    let (status, message) =
        RelayError::InvalidImage("Format error decoding Png".to_string()).status_and_message();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        "We couldn't read that image. Please upload a valid JPG or PNG."
    );
}

#[test]
fn test_gateway_status_message_is_safe() {
    let (status, message) = RelayError::Gateway(GatewayError::Status(503)).status_and_message();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        message,
        "The AI service returned an error (HTTP 503). Please try again."
    );
}

#[test]
fn test_network_error_hides_detail() {
    let err = RelayError::Gateway(GatewayError::Network(
        "error trying to connect: tcp connect error: Connection refused (os error 111)".to_string(),
    ));
    let (status, message) = err.status_and_message();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!message.contains("os error"));
    assert!(message.contains("couldn't reach the AI service"));
}

#[test]
fn test_all_variants_failed_is_generic() {
    let (status, message) = RelayError::Upstream.status_and_message();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(message, "Something went wrong. Please try again.");
}

#[test]
fn test_startup_errors_map_to_internal() {
    let (status, message) =
        RelayError::Config("GROQ_API_KEY is not set".to_string()).status_and_message();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!message.contains("GROQ_API_KEY"));
}
