//! Inbound request shapes.
//!
//! The browser may post JSON or a multipart form. Both are resolved by the
//! normalizer into a single [`InboundRequest`].

// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;
use serde::Deserialize;

/// `POST /chat` JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatJsonBody {
    #[serde(default)]
    pub text: Option<String>,

    /// `data:<mime>;base64,<payload>`
    #[serde(default)]
    pub image_data_url: Option<String>,
}

/// A file part from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Fields collected from a multipart or urlencoded form.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub text: Option<String>,
    pub query: Option<String>,
    pub image: Option<UploadedFile>,
    pub image_data_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    Json,
    Form,
}

/// A validated request. At least one of `text`/`image` is present, and when
/// an image is present `text` carries either the caller's question or the
/// default analysis prompt.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub text: Option<String>,
    pub image: Option<Vec<u8>>,
    pub source: RequestSource,
}
