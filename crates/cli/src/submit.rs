//! HTTP client for posting a file to a running DFGuard server.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use dfguard_engine::MediaKind;

/// Default server base URL for `dfguard submit`.
pub(crate) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8787";

/// Request timeout for a single submission.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced by `dfguard submit`. Every failure is terminal for
/// the submission; there are no retries.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SubmitError {
    /// The input path does not name a readable file. Reported before
    /// anything goes on the wire.
    #[error("no file selected: {path}: {reason}")]
    NoFileSelected { path: String, reason: String },

    /// Transport-level failure reaching the server.
    #[error("network failure: {0}")]
    Network(#[from] ureq::Error),

    /// The server answered with a non-success status.
    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },
}

/// Verdict payload returned by the predict endpoint. Only `result` is
/// guaranteed; the other fields are kept optional so older servers that
/// send a bare verdict still parse.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PredictResponse {
    pub(crate) result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<String>,
}

/// Error payload carried by every non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// POST the file at `path` to `<base_url>/api/predict/<kind>` as a
/// multipart form with a single `file` field.
pub(crate) fn submit(
    base_url: &str,
    kind: MediaKind,
    path: &Path,
) -> Result<PredictResponse, SubmitError> {
    let content = std::fs::read(path).map_err(|e| SubmitError::NoFileSelected {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.bin");

    let boundary = boundary();
    let body = encode_multipart(&boundary, file_name, &content);
    let url = format!("{}/api/predict/{}", base_url.trim_end_matches('/'), kind);
    let content_type = format!("multipart/form-data; boundary={}", boundary);

    let config = Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build();
    let agent: Agent = config.into();

    let mut response = agent
        .post(&url)
        .header("content-type", content_type.as_str())
        .send(&body[..])?;

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        let message = response
            .body_mut()
            .read_json::<ErrorBody>()
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("HTTP {}", status));
        return Err(SubmitError::Server { status, message });
    }

    response
        .body_mut()
        .read_json::<PredictResponse>()
        .map_err(|_| SubmitError::Server {
            status,
            message: "malformed response body".to_string(),
        })
}

/// Fresh multipart boundary marker.
fn boundary() -> String {
    format!("----dfguard{:016x}", rand::random::<u64>())
}

/// Encode a single-field `multipart/form-data` body.
///
/// ureq v3 does not bundle multipart support, so the body is constructed
/// manually around a custom boundary.
fn encode_multipart(boundary: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name.replace('"', "_")
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}
