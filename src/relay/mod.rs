//! End-to-end relay pipeline.
//!
//! Ties the pieces together for a normalized request: verify the image (if
//! any), build messages, query one or two model variants, and merge the
//! answers into bullet points. Every failure is returned as a
//! [`RelayError`]; rendering to HTTP is left to the server layer.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::error::{RelayError, Result};
use crate::gateway::GatewayClient;
use crate::metrics;
use crate::models::InboundRequest;
use crate::normalizer::DEFAULT_IMAGE_PROMPT;
use crate::translation::{build_messages, merge_replies};
use crate::vision::verify_image;
use futures::future::join_all;
use tracing::{info, warn};

pub struct Relay {
    client: GatewayClient,
}

impl Relay {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// Models queried for image questions, in merge order.
    pub fn image_variants(&self) -> [&str; 2] {
        let config = self.client.config();
        [config.primary_model.as_str(), config.secondary_model.as_str()]
    }

    /// Route a normalized request to the text or image path.
    pub async fn handle(&self, request: InboundRequest) -> Result<String> {
        match request.image {
            Some(bytes) => {
                let text = request
                    .text
                    .unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string());
                self.process_image(&text, bytes).await
            }
            None => {
                // The normalizer guarantees text when there is no image
                let text = request
                    .text
                    .ok_or_else(|| RelayError::Internal("request without input".to_string()))?;
                self.process_text(&text).await
            }
        }
    }

    /// Answer a text question with the primary model.
    pub async fn process_text(&self, text: &str) -> Result<String> {
        let model = &self.client.config().primary_model;
        info!(model = %model, chars = text.len(), "Processing text question");

        let messages = build_messages(text, None);
        let reply = self.client.complete(&messages, model).await;

        merge_replies(vec![reply])
    }

    /// Verify an image, then ask every image variant concurrently.
    ///
    /// An unreadable image is rejected before any outbound call.
    pub async fn process_image(&self, text: &str, bytes: Vec<u8>) -> Result<String> {
        let image = tokio::task::spawn_blocking(move || verify_image(bytes))
            .await
            .map_err(|e| RelayError::Internal(format!("Image verification task failed: {}", e)))?
            .map_err(|e| {
                warn!("Rejected unreadable image: {}", e);
                metrics::record_image_rejection("undecodable");
                e
            })?;

        let variants = self.image_variants();
        info!(
            bytes = image.len(),
            format = image.format.map(|f| f.mime_type()).unwrap_or("unknown"),
            variants = ?variants,
            "Processing image question"
        );

        let messages = build_messages(text, Some(&image));
        let replies = join_all(
            variants
                .iter()
                .map(|model| self.client.complete(&messages, model)),
        )
        .await;

        merge_replies(replies)
    }
}
