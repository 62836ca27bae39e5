//! Core data model: verdicts, analysis requests and results, media kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Explanation attached to every FAKE verdict.
pub const FAKE_DETAILS: &str = "Anomalies detected in high-frequency spectrum.";

/// Explanation attached to every NORMAL verdict.
pub const NORMAL_DETAILS: &str = "No manipulation artifacts found.";

/// Binary classification output.
///
/// Serializes to the wire values `"FAKE"` / `"NORMAL"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Fake,
    Normal,
}

impl Verdict {
    /// Wire form of the verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Fake => "FAKE",
            Verdict::Normal => "NORMAL",
        }
    }

    /// Fixed human-readable explanation for this verdict.
    pub fn details(&self) -> &'static str {
        match self {
            Verdict::Fake => FAKE_DETAILS,
            Verdict::Normal => NORMAL_DETAILS,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single submission: file name plus opaque content.
///
/// The content bytes never influence the verdict; they are carried so
/// callers can log sizes and so the request models what a client sends.
/// One request is built per submission and consumed by one evaluation.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    file_name: String,
    content: Vec<u8>,
}

impl AnalysisRequest {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// Name of the submitted file. This is the only input the verdict
    /// engine looks at.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size of the submitted content in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Outcome of one analysis.
///
/// Constructed only through [`AnalysisResult::new`], which derives
/// `details` from `status`, so the pair can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "result")]
    status: Verdict,
    confidence: f64,
    details: &'static str,
}

impl AnalysisResult {
    pub(crate) fn new(status: Verdict, confidence: f64) -> Self {
        Self {
            status,
            confidence,
            details: status.details(),
        }
    }

    /// The verdict.
    pub fn status(&self) -> Verdict {
        self.status
    }

    /// Synthetic confidence percentage, one decimal place, always in (0, 100].
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Fixed explanation keyed by the verdict.
    pub fn details(&self) -> &'static str {
        self.details
    }
}

/// Media category of a submission, from the `{type}` segment of the
/// predict route. Validated for routing only; it never influences the
/// verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a route segment that names no supported media kind.
#[derive(Debug, thiserror::Error)]
#[error("unknown media kind: {0}")]
pub struct UnknownMediaKind(pub String);

impl FromStr for MediaKind {
    type Err = UnknownMediaKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "audio" => Ok(MediaKind::Audio),
            "video" => Ok(MediaKind::Video),
            other => Err(UnknownMediaKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Verdict --

    #[test]
    fn verdict_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(Verdict::Fake).unwrap(),
            serde_json::json!("FAKE")
        );
        assert_eq!(
            serde_json::to_value(Verdict::Normal).unwrap(),
            serde_json::json!("NORMAL")
        );
    }

    #[test]
    fn verdict_details_are_distinct_and_fixed() {
        assert_eq!(Verdict::Fake.details(), FAKE_DETAILS);
        assert_eq!(Verdict::Normal.details(), NORMAL_DETAILS);
        assert_ne!(FAKE_DETAILS, NORMAL_DETAILS);
    }

    // -- AnalysisResult --

    #[test]
    fn result_serializes_contract_shape() {
        let result = AnalysisResult::new(Verdict::Fake, 97.3);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["result"], "FAKE");
        assert_eq!(json["confidence"], 97.3);
        assert_eq!(json["details"], FAKE_DETAILS);
    }

    #[test]
    fn result_details_follow_status() {
        let fake = AnalysisResult::new(Verdict::Fake, 96.0);
        let normal = AnalysisResult::new(Verdict::Normal, 90.0);
        assert_eq!(fake.details(), Verdict::Fake.details());
        assert_eq!(normal.details(), Verdict::Normal.details());
    }

    // -- AnalysisRequest --

    #[test]
    fn request_reports_name_and_size() {
        let request = AnalysisRequest::new("clip.mov", vec![0u8; 64]);
        assert_eq!(request.file_name(), "clip.mov");
        assert_eq!(request.content_len(), 64);
    }

    // -- MediaKind --

    #[test]
    fn media_kind_parses_route_segments() {
        assert_eq!("image".parse::<MediaKind>().unwrap(), MediaKind::Image);
        assert_eq!("audio".parse::<MediaKind>().unwrap(), MediaKind::Audio);
        assert_eq!("video".parse::<MediaKind>().unwrap(), MediaKind::Video);
    }

    #[test]
    fn media_kind_rejects_unknown_segment() {
        let err = "text".parse::<MediaKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown media kind: text");
    }

    #[test]
    fn media_kind_is_case_sensitive() {
        assert!("Image".parse::<MediaKind>().is_err());
    }
}
