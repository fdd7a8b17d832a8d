// Prompt assembly (inbound → chat messages) and answer formatting (raw text → bullets)
// Author: kelexine (https://github.com/kelexine)

pub mod request;
pub mod response;

pub use request::{build_completion_request, build_messages};
pub use response::{format_as_bullets, merge_replies, ModelReply};
