//! HTTP route handlers: health, predict, fallback.

use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use dfguard_engine::{evaluate_with, AnalysisRequest, MediaKind};

use super::json_error;
use super::state::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// POST /api/predict/{type}
///
/// Accepts a multipart form with a `file` field and answers with the
/// verdict payload. The media kind segment is validated for routing but
/// never influences the verdict; neither does the uploaded content.
pub(crate) async fn handle_predict(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    let kind: MediaKind = match kind.parse() {
        Ok(kind) => kind,
        Err(e) => return json_error(StatusCode::NOT_FOUND, &e.to_string()).into_response(),
    };

    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                &format!("expected multipart form data: {}", e),
            )
            .into_response()
        }
    };

    let request = match read_file_field(&mut multipart).await {
        Ok(Some(request)) => request,
        Ok(None) => return json_error(StatusCode::BAD_REQUEST, "No file uploaded").into_response(),
        Err(message) => return json_error(StatusCode::BAD_REQUEST, &message).into_response(),
    };

    tracing::info!(
        %kind,
        file_name = request.file_name(),
        bytes = request.content_len(),
        "analysis request"
    );

    let result = evaluate_with(request.file_name(), &state.latency).await;

    tracing::info!(
        %kind,
        file_name = request.file_name(),
        result = %result.status(),
        confidence = result.confidence(),
        "analysis complete"
    );

    let response = serde_json::json!({
        "result": result.status(),
        "confidence": result.confidence(),
        "details": result.details(),
    });
    (StatusCode::OK, Json(response)).into_response()
}

/// Pull the `file` field out of a multipart body.
///
/// Returns `Ok(None)` when the body carries no `file` field and `Err`
/// with a message when the body itself cannot be read.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<AnalysisRequest>, String> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => return Err(format!("malformed multipart body: {}", e)),
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| format!("failed to read file field: {}", e))?;
        return Ok(Some(AnalysisRequest::new(file_name, content.to_vec())));
    }
}
