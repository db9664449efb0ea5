//! Maintainability index synthesis.
//!
//! Blends Halstead volume, cyclomatic complexity, line count, and comment
//! density into one 0-100 score:
//!
//! MI = 171 - 5.2 * ln(V + 1) - 0.23 * CC - 16.2 * ln(LOC + 1)
//!      + 50 * sin(sqrt(2.4 * comment_ratio))
//!
//! A non-finite intermediate resolves to the neutral 50.0; synthesis must
//! never abort a batch run.

use codegauge_patterns::is_comment_line;
use codegauge_types::{MaintainabilityIndex, MaintainabilityRating};

/// Neutral score used when the formula degenerates on malformed input.
const NEUTRAL_SCORE: f64 = 50.0;

/// Synthesize the index from per-unit metrics. The result is clamped to
/// [0, 100] and rounded to two decimals.
pub fn synthesize(
    volume: f64,
    cyclomatic: usize,
    lines: usize,
    comment_ratio: f64,
) -> MaintainabilityIndex {
    let raw = 171.0 - 5.2 * (volume + 1.0).ln() - 0.23 * cyclomatic as f64
        - 16.2 * (lines as f64 + 1.0).ln()
        + 50.0 * (2.4 * comment_ratio).sqrt().sin();

    let score = if raw.is_finite() {
        round2(raw.clamp(0.0, 100.0))
    } else {
        NEUTRAL_SCORE
    };

    MaintainabilityIndex {
        score,
        rating: rating_for_score(score),
    }
}

/// Fixed rating bands: >=76 highly, 51-75 moderately, <51 difficult.
/// Project-level overrides belong to the excluded configuration layer.
pub fn rating_for_score(score: f64) -> MaintainabilityRating {
    if score >= 76.0 {
        MaintainabilityRating::HighlyMaintainable
    } else if score >= 51.0 {
        MaintainabilityRating::ModeratelyMaintainable
    } else {
        MaintainabilityRating::DifficultToMaintain
    }
}

/// Comment lines over total lines for a unit; 0.0 for empty text.
pub fn comment_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut comments = 0usize;
    for line in text.lines() {
        total += 1;
        if is_comment_line(line.trim_start()) {
            comments += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        comments as f64 / total as f64
    }
}

fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}
