// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{RelayError, Result, ValidationError};
use crate::metrics;
use crate::models::{ChatJsonBody, FormInput, FormattedResponse, InboundRequest, UploadedFile};
use crate::normalizer;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Handler for `GET /`: the chat page
pub async fn home_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;
    let gateway = &state.config.gateway;

    checks.insert(
        "configuration".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "Gateway: {} (timeout {}s)",
                gateway.api_url, gateway.timeout_seconds
            ),
        },
    );

    let models_check = if gateway.primary_model.trim().is_empty()
        || gateway.secondary_model.trim().is_empty()
    {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: "A model variant is not configured".to_string(),
        }
    } else {
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "Models: {}, {}",
                gateway.primary_model, gateway.secondary_model
            ),
        }
    };
    checks.insert("models".to_string(), models_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for `GET /metrics` (Prometheus text format)
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

/// Handler for `POST /chat`: JSON `{text, image_data_url}` or a form with
/// `text`/`query`, an `image` file, or an `image_data_url` field
pub async fn chat_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let result = async {
        let inbound = read_chat_request(&state, request).await?;
        state.relay.handle(inbound).await
    }
    .await;

    respond("/chat", start, result)
}

/// Handler for `POST /analyze`: multipart form with a required `image` file
pub async fn analyze_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let result = async {
        let form = read_multipart(&state, request).await?;
        let inbound = normalizer::for_analysis(form, &state.config.limits)?;
        state.relay.handle(inbound).await
    }
    .await;

    respond("/analyze", start, result)
}

pub async fn not_found_handler() -> (StatusCode, Json<FormattedResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(FormattedResponse::failure("Sorry, we couldn't find that page.")),
    )
}

/// Render the pipeline outcome and record request metrics.
fn respond(endpoint: &str, start: Instant, result: Result<String>) -> Response {
    if let Err(RelayError::Validation(reason)) = &result {
        match reason {
            ValidationError::ImageTooLarge { .. } => metrics::record_image_rejection("too_large"),
            ValidationError::InvalidImageData => metrics::record_image_rejection("invalid_data"),
            _ => {}
        }
    }

    let response = match result {
        Ok(text) => Json(FormattedResponse::success(text)).into_response(),
        Err(e) => e.into_response(),
    };

    let elapsed = start.elapsed().as_secs_f64();
    metrics::record_request(endpoint, response.status().as_u16(), elapsed);
    info!(
        endpoint,
        status = response.status().as_u16(),
        elapsed_ms = (elapsed * 1000.0) as u64,
        "Request completed"
    );

    response
}

/// Resolve the body shape once, by content type, into an [`InboundRequest`].
async fn read_chat_request(state: &AppState, request: Request) -> Result<InboundRequest> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let declared_len = declared_length(&request);
    let limits = &state.config.limits;

    if content_type.starts_with("application/json") {
        let raw = Bytes::from_request(request, state)
            .await
            .map_err(|e| body_rejection(state, declared_len, e.status(), e.body_text()))?;
        // Unparseable or `null` JSON counts as an empty object
        let body = serde_json::from_slice::<Option<ChatJsonBody>>(&raw)
            .unwrap_or_else(|e| {
                debug!("Ignoring unparseable JSON body: {}", e);
                None
            })
            .unwrap_or_default();
        normalizer::from_json(body, limits)
    } else if content_type.starts_with("multipart/form-data") {
        let form = read_multipart(state, request).await?;
        normalizer::from_form(form, limits)
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(mut fields) = Form::<HashMap<String, String>>::from_request(request, state)
            .await
            .map_err(|e| body_rejection(state, declared_len, e.status(), e.body_text()))?;
        let form = FormInput {
            text: fields.remove("text"),
            query: fields.remove("query"),
            image: None,
            image_data_url: fields.remove("image_data_url"),
        };
        normalizer::from_form(form, limits)
    } else {
        debug!("Unsupported content type {:?}, treating as empty", content_type);
        Err(ValidationError::MissingInput.into())
    }
}

/// Collect the known fields of a multipart form. Unknown fields are skipped.
async fn read_multipart(state: &AppState, request: Request) -> Result<FormInput> {
    let declared_len = declared_length(&request);
    let reject = |status: StatusCode, detail: String| {
        body_rejection(state, declared_len, status, detail)
    };

    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|e| reject(e.status(), e.body_text()))?;
    let mut form = FormInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| reject(e.status(), e.body_text()))?;
                form.image = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            "text" => {
                form.text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| reject(e.status(), e.body_text()))?,
                )
            }
            "query" => {
                form.query = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| reject(e.status(), e.body_text()))?,
                )
            }
            "image_data_url" => {
                form.image_data_url = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| reject(e.status(), e.body_text()))?,
                )
            }
            other => debug!("Ignoring unknown form field: {}", other),
        }
    }

    Ok(form)
}

fn declared_length(request: &Request) -> Option<usize> {
    request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Map a body extraction failure. Hitting the body cap means the image was
/// too large, whatever shape it arrived in.
fn body_rejection(
    state: &AppState,
    declared_len: Option<usize>,
    status: StatusCode,
    detail: String,
) -> RelayError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        let limits = &state.config.limits;
        return ValidationError::ImageTooLarge {
            size: declared_len.unwrap_or(limits.max_body_bytes),
            limit: limits.max_image_bytes,
        }
        .into();
    }
    malformed(detail)
}

fn malformed(detail: String) -> RelayError {
    ValidationError::MalformedBody(detail).into()
}
