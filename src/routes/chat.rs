//! Chat completions endpoint
//!
//! OpenAI-compatible chat completions API endpoint. The request is translated
//! into an upstream payload, sent upstream once, and the upstream's NDJSON
//! stream is re-framed as SSE chunks (or collected into one completion when
//! the client disables streaming).

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::Instrument;

use crate::{
    error::AppError,
    proxy::{ByteStream, RequestContext},
    streaming::{collect_completion, reframe_to_sse, StreamReframer},
    translate::{present_credential, ChatRequest, SessionIdPolicy},
    AppState,
};

/// Handle chat completion requests
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let credential = present_credential(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
    );

    // Credential presence is checked before anything else
    let policy = SessionIdPolicy::for_request(
        state.config.session_id_mode,
        state.config.require_auth,
        credential,
    )?;

    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::invalid_request(format!("Invalid request body: {}", e)))?;

    let payload = state.translator.translate(&request, &policy)?;

    let ctx = RequestContext::new(state.upstream.name(), request.model.clone())
        .with_streaming(request.is_streaming());
    ctx.log_request_start(&payload.model, request.messages.len());

    // A token consumed as the session id is not forwarded
    let forwarded = if policy.consumes_credential() {
        None
    } else {
        credential
    };

    let upstream = state
        .upstream
        .invoke(&payload, forwarded)
        .instrument(ctx.create_span())
        .await
        .map_err(|e| {
            ctx.log_error(&e.to_string());
            e
        })?;

    ctx.log_upstream_response(upstream.status);

    if request.is_streaming() {
        handle_streaming(ctx, request.model, upstream.body)
    } else {
        handle_non_streaming(ctx, StreamReframer::new(request.model), upstream.body).await
    }
}

/// Re-frame the upstream stream as SSE
fn handle_streaming(
    ctx: RequestContext,
    model: String,
    upstream: ByteStream,
) -> Result<Response, AppError> {
    let body = Body::from_stream(reframe_to_sse(upstream, model));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header("X-Accel-Buffering", "no")
        .body(body)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {}", e)))?;

    ctx.log_stream_started();

    Ok(response)
}

/// Collect the upstream stream into a single completion
async fn handle_non_streaming(
    ctx: RequestContext,
    reframer: StreamReframer,
    upstream: ByteStream,
) -> Result<Response, AppError> {
    let identity = reframer.identity().clone();
    let completion = collect_completion(&identity, reframer.into_stream(upstream)).await;

    ctx.log_request_complete(
        completion
            .choices
            .first()
            .map(|c| c.message.content.len())
            .unwrap_or_default(),
    );

    Ok((StatusCode::OK, Json(completion)).into_response())
}
