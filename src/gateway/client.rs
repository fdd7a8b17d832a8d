// Chat-completions client for the upstream LLM gateway
// Author: kelexine (https://github.com/kelexine)

use crate::config::{ApiKey, GatewayConfig};
use crate::error::{GatewayError, RelayError, Result};
use crate::metrics;
use crate::models::chat::{ChatCompletionResponse, ChatMessage};
use crate::translation::{build_completion_request, ModelReply};
use crate::utils::logging::sanitize;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// One [`complete`](Self::complete) call is exactly one HTTP attempt bounded
/// by the configured timeout. Failures come back as values, never as panics,
/// and upstream bodies are only ever logged.
pub struct GatewayClient {
    http_client: Client,
    config: GatewayConfig,
    api_key: ApiKey,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig, api_key: ApiKey) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created gateway client for {} (timeout {}s)",
            config.api_url, config.timeout_seconds
        );

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send one completion request and return the first choice's text.
    pub async fn complete(&self, messages: &[ChatMessage], model: &str) -> ModelReply {
        let start = Instant::now();
        let reply = self.send(messages, model).await;

        let outcome = match &reply {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::record_gateway_call(model, outcome, start.elapsed().as_secs_f64());

        reply
    }

    async fn send(&self, messages: &[ChatMessage], model: &str) -> ModelReply {
        let payload = build_completion_request(model, messages, &self.config);
        debug!("Calling chat completions for model: {}", model);

        let response = self
            .http_client
            .post(&self.config.api_url)
            .bearer_auth(self.api_key.expose())
            .json(&payload)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        // Only a plain 200 carries a completion
        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gateway error for {}: HTTP {} - Response body: {}",
                model,
                status,
                sanitize(&error_text)
            );
            return Err(GatewayError::Status(status.as_u16()));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse gateway response: {}", e);
            debug!(
                "Response body (first 500 chars): {}",
                response_text.chars().take(500).collect::<String>()
            );
            GatewayError::MalformedResponse(e.to_string())
        })?;

        parsed.first_content().ok_or_else(|| {
            warn!("Gateway response for {} had no choices", model);
            GatewayError::MalformedResponse("no choices in response".to_string())
        })
    }
}

fn classify_transport_error(e: &reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        warn!("Gateway request timed out: {}", e);
        GatewayError::Timeout
    } else {
        warn!("Gateway request failed: {}", e);
        GatewayError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

    fn client_for(server_uri: &str, timeout_seconds: u64) -> GatewayClient {
        let config = GatewayConfig {
            api_url: format!("{}{}", server_uri, COMPLETIONS_PATH),
            timeout_seconds,
            ..Default::default()
        };
        GatewayClient::new(&config, ApiKey::new("test-key").unwrap()).unwrap()
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::text(Role::User, "hello")]
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "scout", "max_tokens": 1000})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "- Stay hydrated"},
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), 30);
        let reply = client.complete(&messages(), "scout").await;
        assert_eq!(reply.unwrap(), "- Stay hydrated");
    }

    #[tokio::test]
    async fn test_non_success_status_is_typed_and_body_hidden() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(429).set_body_string("rate limited for key gsk_secret"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), 30);
        let err = client.complete(&messages(), "scout").await.unwrap_err();
        assert_eq!(err, GatewayError::Status(429));
        assert!(!err.user_message().contains("gsk_secret"));
    }

    #[tokio::test]
    async fn test_non_ok_success_status_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "queued"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), 30);
        let err = client.complete(&messages(), "scout").await.unwrap_err();
        assert_eq!(err, GatewayError::Status(202));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), 1);
        let err = client.complete(&messages(), "scout").await.unwrap_err();
        assert_eq!(err, GatewayError::Timeout);
        assert_eq!(err.user_message(), "Request timed out. Please try again.");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_network_error() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr), 5);
        let err = client.complete(&messages(), "scout").await.unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), 30);
        let err = client.complete(&messages(), "scout").await.unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }
}
