// Request building (normalized input → chat-completions messages)
// Author: kelexine (https://github.com/kelexine)

use crate::config::GatewayConfig;
use crate::models::chat::{ChatCompletionRequest, ChatMessage, ContentPart, ImageUrl, Role};
use crate::vision::{DecodedImage, OUTBOUND_IMAGE_MIME};
use base64::Engine;
use tracing::debug;

pub const SYSTEM_PROMPT: &str = "You are a helpful medical assistant. Respond ONLY in concise bullet points. Each point should be a short, clear sentence.";

const USER_PREFIX: &str = "Please answer in concise bullet points.\n\n";

/// Build the message sequence for one question.
///
/// Pure: the same text and image always produce the same messages, so the
/// result can be shared across model variants.
pub fn build_messages(text: &str, image: Option<&DecodedImage>) -> Vec<ChatMessage> {
    let mut user_parts = vec![ContentPart::Text {
        text: format!("{}{}", USER_PREFIX, text),
    }];

    if let Some(image) = image {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        debug!(
            source_format = image.format.map(|f| f.mime_type()).unwrap_or("unknown"),
            sent_as = OUTBOUND_IMAGE_MIME,
            bytes = image.len(),
            "Attaching inline image"
        );
        user_parts.push(ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:{};base64,{}", OUTBOUND_IMAGE_MIME, encoded),
            },
        });
    }

    vec![
        ChatMessage::text(Role::System, SYSTEM_PROMPT),
        ChatMessage {
            role: Role::User,
            content: user_parts,
        },
    ]
}

/// Wrap messages into the outbound payload for one model.
pub fn build_completion_request<'a>(
    model: &'a str,
    messages: &'a [ChatMessage],
    config: &GatewayConfig,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}
