//! Cyclomatic and cognitive complexity estimation.
//!
//! Both scores come from token scanning, not AST inspection: every match
//! of a decision-point pattern counts, including matches inside strings.
//! Precision is deliberately traded for language-agnosticism.

use codegauge_patterns::{COGNITIVE_PATTERNS, DECISION_PATTERNS};
use codegauge_types::{ComplexityDistribution, ComplexityScore};

/// Estimate both complexity scores for a unit's full text.
///
/// Never fails: text with no pattern matches yields the base score
/// (cyclomatic 1, cognitive 0), and so does empty or comment-only text.
pub fn estimate(text: &str) -> ComplexityScore {
    let cyclomatic = cyclomatic(text);
    let cognitive = cognitive(text);
    ComplexityScore {
        cyclomatic,
        cognitive,
        total: cyclomatic + cognitive,
    }
}

/// Base 1 plus one per decision-point match, each pattern counted
/// independently. A line with both `if` and `&&` contributes twice.
pub fn cyclomatic(text: &str) -> usize {
    let mut complexity = 1usize;
    for pattern in DECISION_PATTERNS.iter() {
        complexity += pattern.find_iter(text).count();
    }
    complexity
}

/// Weighted sum over the cognitive pattern set. Patterns are counted
/// independently, so an `else if` scores its own weight of 2 on top of
/// the plain `if` it contains.
pub fn cognitive(text: &str) -> usize {
    let mut complexity = 0usize;
    for (pattern, weight) in COGNITIVE_PATTERNS.iter() {
        complexity += pattern.find_iter(text).count() * weight;
    }
    complexity
}

/// Bucket per-file totals into the project-wide distribution:
/// <=10 low, <=20 medium, <=30 high, >30 very_high.
pub fn build_distribution<I>(totals: I) -> ComplexityDistribution
where
    I: IntoIterator<Item = usize>,
{
    let mut dist = ComplexityDistribution::default();
    for total in totals {
        if total <= 10 {
            dist.low += 1;
        } else if total <= 20 {
            dist.medium += 1;
        } else if total <= 30 {
            dist.high += 1;
        } else {
            dist.very_high += 1;
        }
    }
    dist
}
