//! Data models for the inbound HTTP API and the upstream chat-completions API.
//!
//! - `inbound`: request bodies accepted from the browser and the normalized request
//! - `chat`: OpenAI-compatible chat-completions wire types
//! - `response`: the JSON envelope returned to the browser

// Author: kelexine (https://github.com/kelexine)

pub mod chat;
pub mod inbound;
pub mod response;

pub use chat::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, Role};
pub use inbound::{ChatJsonBody, FormInput, InboundRequest, RequestSource, UploadedFile};
pub use response::FormattedResponse;
