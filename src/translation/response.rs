// Response formatting (raw model text → bullet list)
// Author: kelexine (https://github.com/kelexine)

use crate::error::{GatewayError, RelayError, Result};
use tracing::{debug, warn};

/// Outcome of one gateway call: raw model text or the reason there is none.
pub type ModelReply = std::result::Result<String, GatewayError>;

const BULLET_CHARS: &[char] = &['*', '-', '•', ' '];

/// Normalize freeform text into `- ` prefixed lines.
///
/// Blank lines are dropped and existing bullet markers are stripped before
/// re-prefixing. When nothing survives, the input is returned unchanged so
/// the caller never sends back an empty answer for non-empty text.
pub fn format_as_bullets(text: &str) -> String {
    let bullets: Vec<String> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.trim_start_matches(BULLET_CHARS))
        .filter(|clean| !clean.is_empty())
        .map(|clean| format!("- {}", clean))
        .collect();

    if bullets.is_empty() {
        text.to_string()
    } else {
        bullets.join("\n")
    }
}

/// Combine replies, in call order, into one bulleted answer.
///
/// - A lone reply that failed propagates its own gateway error.
/// - With several replies, failed or blank ones are skipped; if none are
///   left the result is [`RelayError::Upstream`].
pub fn merge_replies(replies: Vec<ModelReply>) -> Result<String> {
    let single_source = replies.len() == 1;
    let mut texts = Vec::with_capacity(replies.len());
    let mut first_error = None;

    for (index, reply) in replies.into_iter().enumerate() {
        match reply {
            Ok(text) if !text.trim().is_empty() => texts.push(text),
            Ok(_) => warn!(variant = index, "Model returned a blank answer"),
            Err(e) => {
                warn!(variant = index, error = %e, "Model variant failed");
                first_error.get_or_insert(e);
            }
        }
    }

    if texts.is_empty() {
        return Err(match first_error {
            Some(e) if single_source => RelayError::Gateway(e),
            _ => RelayError::Upstream,
        });
    }

    debug!("Merging {} model answer(s)", texts.len());
    Ok(format_as_bullets(&texts.join("\n")))
}
