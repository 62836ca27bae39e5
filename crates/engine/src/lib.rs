//! DFGuard mock verdict engine -- produces a FAKE/NORMAL verdict for a
//! submission from its file name alone, after simulating processing
//! latency.
//!
//! There is no detection here: the verdict comes from a case-insensitive
//! keyword check on the file name, with a weighted random fallback for
//! names that match nothing. Confidence is a uniform draw from a
//! per-verdict band. The engine exists so the surrounding transports
//! (CLI, HTTP API) share one swappable core.
//!
//! # Public API
//!
//! - [`classify`] / [`classify_with_rng`] -- synchronous decision
//! - [`evaluate`] / [`evaluate_with`] -- decision behind the artificial delay
//! - [`AnalysisRequest`], [`AnalysisResult`], [`Verdict`], [`MediaKind`]
//! - [`LatencyPolicy`] -- the configurable delay

pub mod decision;
pub mod latency;
pub mod types;

pub use decision::{classify, classify_with_rng};
pub use latency::{LatencyPolicy, DEFAULT_DELAY_MS};
pub use types::{AnalysisRequest, AnalysisResult, MediaKind, UnknownMediaKind, Verdict};

/// Classify `file_name` after the default artificial delay.
///
/// The mock never fails, so the result is returned directly rather than
/// wrapped in a `Result`.
pub async fn evaluate(file_name: &str) -> AnalysisResult {
    evaluate_with(file_name, &LatencyPolicy::default()).await
}

/// Classify `file_name` after the delay configured by `latency`.
pub async fn evaluate_with(file_name: &str, latency: &LatencyPolicy) -> AnalysisResult {
    latency.wait().await;
    classify(file_name)
}

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
