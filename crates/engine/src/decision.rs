//! The keyword decision procedure behind every verdict.
//!
//! The verdict is determined entirely by the submitted file name,
//! matched case-insensitively:
//!
//! 1. Names containing `fake` or `deepfake` force FAKE, with confidence
//!    redrawn from the high band.
//! 2. Otherwise, names containing `real` or `normal` force NORMAL.
//! 3. Otherwise the verdict is a weighted coin flip: NORMAL with
//!    probability 0.7, FAKE with probability 0.3.
//!
//! Confidence starts as a uniform draw from the default band, made before
//! the keyword check; only a forced FAKE replaces it. All confidences are
//! rounded to one decimal place. The fallback weighting is a placeholder
//! standing in for a real classifier, not a signal.

use rand::Rng;

use crate::types::{AnalysisResult, Verdict};

/// File-name substrings that force a FAKE verdict. `deepfake` is subsumed
/// by `fake` but belongs to the documented keyword set.
pub const FAKE_KEYWORDS: [&str; 2] = ["fake", "deepfake"];

/// File-name substrings that force a NORMAL verdict.
pub const NORMAL_KEYWORDS: [&str; 2] = ["real", "normal"];

/// Confidence band for forced FAKE verdicts: [95.0, 99.9).
pub const FAKE_CONFIDENCE_BAND: (f64, f64) = (95.0, 99.9);

/// Default confidence band, kept by every other verdict: [85.0, 99.0).
pub const DEFAULT_CONFIDENCE_BAND: (f64, f64) = (85.0, 99.0);

/// Probability that an unmatched file name draws a FAKE verdict.
pub const FALLBACK_FAKE_PROBABILITY: f64 = 0.3;

/// Classify a file name using the thread-local RNG.
pub fn classify(file_name: &str) -> AnalysisResult {
    classify_with_rng(file_name, &mut rand::thread_rng())
}

/// Classify a file name, drawing randomness from the supplied RNG.
///
/// The draw sequence is fixed: one confidence from the default band, then
/// either a redraw (forced FAKE) or a weighted coin (fallback). Callers
/// seeding the RNG can rely on that order.
pub fn classify_with_rng<R: Rng>(file_name: &str, rng: &mut R) -> AnalysisResult {
    let name = file_name.to_lowercase();

    let mut confidence = rng.gen_range(DEFAULT_CONFIDENCE_BAND.0..DEFAULT_CONFIDENCE_BAND.1);

    let status = if FAKE_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        confidence = rng.gen_range(FAKE_CONFIDENCE_BAND.0..FAKE_CONFIDENCE_BAND.1);
        Verdict::Fake
    } else if NORMAL_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        Verdict::Normal
    } else if rng.gen_bool(FALLBACK_FAKE_PROBABILITY) {
        Verdict::Fake
    } else {
        Verdict::Normal
    };

    AnalysisResult::new(status, round_to_tenth(confidence))
}

/// Round a confidence value to one decimal place.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(0x0df6)
    }

    // -- Keyword forcing --

    #[test]
    fn fake_keyword_forces_fake() {
        let mut rng = seeded();
        for name in ["fake.png", "FAKE_clip.mov", "My_Deepfake_Video.mp4", "somefakery.wav"] {
            let result = classify_with_rng(name, &mut rng);
            assert_eq!(result.status(), Verdict::Fake, "name: {}", name);
            assert!(
                (FAKE_CONFIDENCE_BAND.0..=FAKE_CONFIDENCE_BAND.1).contains(&result.confidence()),
                "confidence {} out of band for {}",
                result.confidence(),
                name
            );
        }
    }

    #[test]
    fn normal_keyword_forces_normal() {
        let mut rng = seeded();
        for name in ["real_photo.jpg", "REAL.mov", "perfectly_normal.mp3", "surreal.png"] {
            let result = classify_with_rng(name, &mut rng);
            assert_eq!(result.status(), Verdict::Normal, "name: {}", name);
            assert!(
                (DEFAULT_CONFIDENCE_BAND.0..=DEFAULT_CONFIDENCE_BAND.1)
                    .contains(&result.confidence()),
                "confidence {} out of band for {}",
                result.confidence(),
                name
            );
        }
    }

    #[test]
    fn fake_keyword_wins_over_normal_keyword() {
        let mut rng = seeded();
        let result = classify_with_rng("real_fake_footage.mp4", &mut rng);
        assert_eq!(result.status(), Verdict::Fake);
    }

    // -- Fallback path --

    #[test]
    fn ambiguous_name_yields_valid_result_either_way() {
        let mut rng = seeded();
        for _ in 0..200 {
            let result = classify_with_rng("clip.mov", &mut rng);
            assert!(
                (DEFAULT_CONFIDENCE_BAND.0..=DEFAULT_CONFIDENCE_BAND.1)
                    .contains(&result.confidence()),
                "fallback confidence {} out of the default band",
                result.confidence()
            );
            assert_eq!(result.details(), result.status().details());
        }
    }

    #[test]
    fn fallback_fake_rate_approaches_thirty_percent() {
        let mut rng = seeded();
        let trials = 10_000;
        let fakes = (0..trials)
            .filter(|_| classify_with_rng("clip.mov", &mut rng).status() == Verdict::Fake)
            .count();
        let rate = fakes as f64 / trials as f64;
        assert!(
            (0.27..0.33).contains(&rate),
            "fallback FAKE rate {} strayed from 0.30",
            rate
        );
    }

    // -- Confidence invariants --

    #[test]
    fn confidence_always_in_percentage_range() {
        let mut rng = seeded();
        for name in ["fake.png", "real.png", "clip.mov", ""] {
            for _ in 0..100 {
                let confidence = classify_with_rng(name, &mut rng).confidence();
                assert!(confidence > 0.0 && confidence <= 100.0);
            }
        }
    }

    #[test]
    fn confidence_carries_one_decimal_place() {
        let mut rng = seeded();
        for _ in 0..100 {
            let confidence = classify_with_rng("clip.mov", &mut rng).confidence();
            let tenths = confidence * 10.0;
            assert!(
                (tenths - tenths.round()).abs() < 1e-9,
                "confidence {} has more than one decimal place",
                confidence
            );
        }
    }

    // -- Determinism --

    #[test]
    fn seeded_rng_reproduces_results() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for name in ["fake.png", "real.png", "clip.mov"] {
            assert_eq!(
                classify_with_rng(name, &mut a),
                classify_with_rng(name, &mut b)
            );
        }
    }
}
