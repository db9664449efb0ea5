//! Severity classification and categorized improvement suggestions.
//!
//! Every function here is a pure mapping from a finding's shape to a
//! label or a suggestion list; severity is computed where the finding is
//! built and never stored on its own.

use codegauge_types::{
    ComplexityDistribution, DuplicateReason, GaugeConfig, Severity, Suggestion, SuggestionCategory,
};

/// Severity of a repeated-block finding from its repeat count:
/// >5 high, >2 medium, else low.
pub fn block_severity(count: usize) -> Severity {
    if count > 5 {
        Severity::High
    } else if count > 2 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Severity of a long-parameter-list smell from the maximum parameter
/// count among matches: >7 high, >5 medium, else low.
pub fn parameter_severity(max_params: usize) -> Severity {
    if max_params > 7 {
        Severity::High
    } else if max_params > 5 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Severity of a length smell: over triple the limit is high, over
/// double is medium, anything else merely over the line is low.
pub fn length_severity(lines: usize, limit: usize) -> Severity {
    if lines > limit * 3 {
        Severity::High
    } else if lines > limit * 2 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Severity of a fuzzy duplicate: a near-identical implementation is a
/// high-confidence defect; a context-confirmed one ranks below it.
pub fn duplicate_function_severity(reason: DuplicateReason) -> Severity {
    match reason {
        DuplicateReason::Implementation => Severity::High,
        DuplicateReason::Context => Severity::Medium,
    }
}

/// Inputs the suggestion synthesis needs; the orchestrator aggregates
/// these from per-file results.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionInputs {
    pub distribution: ComplexityDistribution,
    pub mean_comment_ratio: f64,
    pub functions_over_limit: usize,
    pub files_over_limit: usize,
    pub smell_count: usize,
    pub violation_count: usize,
}

/// Generate remediation text per category. A category with nothing
/// triggered emits no suggestions at all.
pub fn build_suggestions(inputs: &SuggestionInputs, cfg: &GaugeConfig) -> Vec<Suggestion> {
    let mut out = Vec::new();

    if inputs.functions_over_limit > 0 {
        push_all(
            &mut out,
            SuggestionCategory::Organization,
            &[
                "Refactor long functions to improve readability and maintainability",
                "Consider extracting repeated code into helper functions",
                "Break down large functions into smaller, focused functions",
            ],
        );
    }
    if inputs.files_over_limit > 0 {
        push_all(
            &mut out,
            SuggestionCategory::Organization,
            &[
                "Consider splitting large files into smaller modules",
                "Group related functionality into separate files",
            ],
        );
    }

    if inputs.distribution.high + inputs.distribution.very_high > 0 {
        push_all(
            &mut out,
            SuggestionCategory::Complexity,
            &[
                "Consider breaking down complex functions into smaller, more manageable pieces",
                "Look for opportunities to simplify conditional logic",
                "Consider extracting complex calculations into separate utility functions",
            ],
        );
    }

    if inputs.mean_comment_ratio < cfg.min_comment_ratio {
        out.push(Suggestion {
            category: SuggestionCategory::Documentation,
            text: format!(
                "Increase code documentation (current comment ratio: {:.1}%)",
                inputs.mean_comment_ratio * 100.0
            ),
        });
        push_all(
            &mut out,
            SuggestionCategory::Documentation,
            &[
                "Add descriptive comments for complex logic",
                "Consider adding more function/method documentation",
            ],
        );
    }

    if inputs.smell_count > 0 || inputs.violation_count > 0 {
        push_all(
            &mut out,
            SuggestionCategory::BestPractices,
            &[
                "Address identified code smells to improve code quality",
                "Review and refactor duplicate code",
            ],
        );
    }

    out
}

fn push_all(out: &mut Vec<Suggestion>, category: SuggestionCategory, texts: &[&str]) {
    for text in texts {
        out.push(Suggestion {
            category,
            text: (*text).to_string(),
        });
    }
}
