//! Halstead software-science estimation.
//!
//! Operators are contiguous symbol runs plus a fixed control-flow keyword
//! set; operands are identifier-like tokens, integer literals, and quoted
//! strings. The derived metrics degrade to exactly zero when either
//! vocabulary is empty; a logarithm of zero or a division by zero is
//! never evaluated.

use std::collections::BTreeSet;

use codegauge_patterns::{OPERAND_TOKENS, OPERATOR_KEYWORDS, OPERATOR_RUNS};
use codegauge_types::HalsteadMetrics;

/// Estimate Halstead metrics for a unit's full text.
pub fn estimate(text: &str) -> HalsteadMetrics {
    let mut operators: BTreeSet<&str> = BTreeSet::new();
    let mut operands: BTreeSet<&str> = BTreeSet::new();
    let mut total_operators = 0usize;
    let mut total_operands = 0usize;

    for m in OPERATOR_RUNS.find_iter(text) {
        operators.insert(m.as_str());
        total_operators += 1;
    }
    for m in OPERATOR_KEYWORDS.find_iter(text) {
        operators.insert(m.as_str());
        total_operators += 1;
    }
    for m in OPERAND_TOKENS.find_iter(text) {
        operands.insert(m.as_str());
        total_operands += 1;
    }

    let n1 = operators.len();
    let n2 = operands.len();

    // Degenerate vocabulary: defined-zero outputs, never log(0) or x/0.
    if n1 == 0 || n2 == 0 {
        return HalsteadMetrics {
            distinct_operators: n1,
            distinct_operands: n2,
            total_operators,
            total_operands,
            volume: 0.0,
            difficulty: 0.0,
            effort: 0.0,
        };
    }

    let length = (total_operators + total_operands) as f64;
    let vocabulary = (n1 + n2) as f64;
    let volume = length * vocabulary.log2();
    let difficulty = (n1 as f64 * total_operands as f64) / (2.0 * n2 as f64);
    let effort = difficulty * volume;

    HalsteadMetrics {
        distinct_operators: n1,
        distinct_operands: n2,
        total_operators,
        total_operands,
        volume,
        difficulty,
        effort,
    }
}
