//! Request normalization.
//!
//! Turns the two inbound shapes (JSON body, form fields) into a single
//! [`InboundRequest`], applying whitespace rules, size limits, and the default
//! image prompt. Nothing here touches the network or decodes pixels; image
//! verification happens later in [`crate::vision`].
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LimitsConfig;
use crate::error::{Result, ValidationError};
use crate::models::{ChatJsonBody, FormInput, InboundRequest, RequestSource, UploadedFile};
use crate::vision::decode_data_url;
use crate::vision::models::validate_image_size;
use tracing::debug;

/// Prompt used when an image arrives without a question.
pub const DEFAULT_IMAGE_PROMPT: &str =
    "Please analyze this medical image and explain your findings.";

/// Normalize a `POST /chat` JSON body.
pub fn from_json(body: ChatJsonBody, limits: &LimitsConfig) -> Result<InboundRequest> {
    let text = non_blank(body.text);
    let image = match non_blank(body.image_data_url) {
        Some(data_url) => Some(decode_checked(&data_url, limits)?),
        None => None,
    };

    finish(text, image, RequestSource::Json)
}

/// Normalize a `POST /chat` form. `text` wins over `query` when both are sent.
pub fn from_form(form: FormInput, limits: &LimitsConfig) -> Result<InboundRequest> {
    let text = non_blank(form.text).or_else(|| non_blank(form.query));

    // Browsers send an unnamed, empty part when no file was chosen
    let upload = form
        .image
        .filter(|file| has_file_name(file) || !file.bytes.is_empty());

    let image = match (upload, non_blank(form.image_data_url)) {
        (Some(file), _) => {
            check_size(file.bytes.len(), limits)?;
            Some(file.bytes.to_vec())
        }
        (None, Some(data_url)) => Some(decode_checked(&data_url, limits)?),
        (None, None) => None,
    };

    finish(text, image, RequestSource::Form)
}

/// Normalize a `POST /analyze` form, where the image file is mandatory.
pub fn for_analysis(form: FormInput, limits: &LimitsConfig) -> Result<InboundRequest> {
    let file = form.image.as_ref().ok_or(ValidationError::MissingImage)?;

    if !has_file_name(file) {
        return Err(ValidationError::EmptyFilename.into());
    }

    from_form(form, limits)
}

fn finish(
    text: Option<String>,
    image: Option<Vec<u8>>,
    source: RequestSource,
) -> Result<InboundRequest> {
    let text = match (text, &image) {
        (None, None) => return Err(ValidationError::MissingInput.into()),
        (None, Some(_)) => Some(DEFAULT_IMAGE_PROMPT.to_string()),
        (text, _) => text,
    };

    debug!(
        ?source,
        image_bytes = image.as_ref().map(Vec::len),
        "Normalized inbound request"
    );

    Ok(InboundRequest {
        text,
        image,
        source,
    })
}

fn decode_checked(data_url: &str, limits: &LimitsConfig) -> Result<Vec<u8>> {
    let bytes = decode_data_url(data_url)?;
    check_size(bytes.len(), limits)?;
    Ok(bytes)
}

fn check_size(len: usize, limits: &LimitsConfig) -> Result<()> {
    validate_image_size(len, limits.max_image_bytes)
        .map_err(|(size, limit)| ValidationError::ImageTooLarge { size, limit }.into())
}

fn has_file_name(file: &UploadedFile) -> bool {
    file.file_name
        .as_deref()
        .map(|name| !name.trim().is_empty())
        .unwrap_or(false)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
