//! Fuzzy function-level duplication detection.
//!
//! Pipeline: extract named function-like units project-wide, normalize
//! their bodies down to shape, then compare same-named cross-file pairs
//! with an LCS-based similarity ratio. High-ratio pairs are duplicates on
//! their own; mid-band pairs must also share call/variable context.
//! Whole-file similarity runs independently on cleaned file text.
//!
//! Name bucketing is a deliberate tradeoff: only same-named functions are
//! ever compared, which keeps the pair space linear in practice and makes
//! the recurring-name signal explicit.

mod extract;
mod normalize;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use codegauge_severity::duplicate_function_severity;
use codegauge_types::{
    DuplicateFunctionFinding, DuplicateReason, FileSimilarity, FileSimilarityKind, FunctionUnit,
    GaugeConfig, SourceUnit,
};

pub use extract::extract_functions;
pub use normalize::{clean_content, normalize_body};

/// Findings plus the warnings produced while computing them (truncated
/// buckets, oversized bodies). Callers decide whether to log or attach.
#[derive(Debug, Default)]
pub struct FuzzyOutcome {
    pub findings: Vec<DuplicateFunctionFinding>,
    pub warnings: Vec<String>,
}

/// LCS-based similarity over normalized body lines, in [0, 1].
///
/// Symmetric by construction; 1.0 for identical non-empty inputs, 0.0
/// when either side is empty. Inputs longer than `max_lines` are
/// truncated before the quadratic LCS.
pub fn similarity_ratio(a: &str, b: &str, max_lines: usize) -> f64 {
    let a_lines: Vec<&str> = a.lines().take(max_lines).collect();
    let b_lines: Vec<&str> = b.lines().take(max_lines).collect();
    if a_lines.is_empty() || b_lines.is_empty() {
        return 0.0;
    }
    let lcs = lcs_len(&a_lines, &b_lines);
    2.0 * lcs as f64 / (a_lines.len() + b_lines.len()) as f64
}

fn lcs_len(a: &[&str], b: &[&str]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for line_a in a {
        for (j, line_b) in b.iter().enumerate() {
            curr[j + 1] = if line_a == line_b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
        curr[0] = 0;
    }
    prev[b.len()]
}

static CALL_NAMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\w+)\(").expect("valid regex literal"));

static ASSIGN_TARGETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\w+)\s*(\+=|-=|==|=)").expect("valid regex literal"));

/// Secondary context check over raw bodies: overlap of called-function
/// names and of assignment-target names, averaged.
pub fn context_similarity(a: &str, b: &str) -> f64 {
    let calls_a = capture_set(&CALL_NAMES, a);
    let calls_b = capture_set(&CALL_NAMES, b);
    let vars_a = assignment_targets(a);
    let vars_b = assignment_targets(b);

    (overlap(&calls_a, &calls_b) + overlap(&vars_a, &vars_b)) / 2.0
}

fn capture_set<'t>(re: &Regex, text: &'t str) -> BTreeSet<&'t str> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Names on the left of `=`, `+=`, or `-=`. A name followed by `==` is a
/// comparison operand, not an assignment target.
fn assignment_targets(text: &str) -> BTreeSet<&str> {
    ASSIGN_TARGETS
        .captures_iter(text)
        .filter(|c| c.get(2).map(|m| m.as_str()) != Some("=="))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn overlap(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    let shared = a.intersection(b).count();
    shared as f64 / a.len().max(b.len()).max(1) as f64
}

/// Compare same-named cross-file pairs and report qualifying duplicates.
///
/// ratio >= implementation_threshold reports unconditionally; the
/// [candidate, implementation) band reports only when the context check
/// confirms; anything below is coincidental and suppressed. Allow-listed
/// names never report.
pub fn find_duplicate_functions(functions: &[FunctionUnit], cfg: &GaugeConfig) -> FuzzyOutcome {
    let mut buckets: BTreeMap<&str, Vec<&FunctionUnit>> = BTreeMap::new();
    for f in functions {
        if codegauge_patterns::is_allowed_duplicate(&f.name) {
            continue;
        }
        buckets.entry(f.name.as_str()).or_default().push(f);
    }

    let mut outcome = FuzzyOutcome::default();

    let oversized = functions
        .iter()
        .filter(|f| f.normalized_body.lines().count() > cfg.max_compare_lines)
        .count();
    if oversized > 0 {
        outcome.warnings.push(format!(
            "{oversized} function bodies exceed {} lines; similarity compared on the leading lines only",
            cfg.max_compare_lines
        ));
    }

    for (name, group) in buckets {
        if group.len() < 2 {
            continue;
        }
        let mut compared = 0usize;
        'bucket: for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let (a, b) = (group[i], group[j]);
                if a.file == b.file {
                    continue;
                }
                if compared >= cfg.max_pairs_per_name {
                    outcome.warnings.push(format!(
                        "duplicate scan truncated for '{}': more than {} candidate pairs",
                        name, cfg.max_pairs_per_name
                    ));
                    break 'bucket;
                }
                compared += 1;

                let ratio = similarity_ratio(
                    &a.normalized_body,
                    &b.normalized_body,
                    cfg.max_compare_lines,
                );
                let reason = if ratio >= cfg.implementation_threshold {
                    Some(DuplicateReason::Implementation)
                } else if ratio >= cfg.context_candidate_threshold
                    && context_similarity(&a.body, &b.body) >= cfg.context_confirm_threshold
                {
                    Some(DuplicateReason::Context)
                } else {
                    None
                };

                if let Some(reason) = reason {
                    outcome.findings.push(DuplicateFunctionFinding {
                        name: name.to_string(),
                        left: a.file.clone(),
                        right: b.file.clone(),
                        similarity: round4(ratio),
                        reason,
                        severity: duplicate_function_severity(reason),
                    });
                }
            }
        }
    }

    outcome.findings.sort_by(|x, y| {
        x.name
            .cmp(&y.name)
            .then_with(|| x.left.cmp(&y.left))
            .then_with(|| x.right.cmp(&y.right))
    });
    outcome
}

/// Whole-file similarity over cleaned text, independent of the
/// function-level pass. Above the near-duplicate threshold is a defect;
/// the related band is only a hint.
pub fn compare_files(units: &[SourceUnit], cfg: &GaugeConfig) -> Vec<FileSimilarity> {
    let cleaned: Vec<String> = units.iter().map(|u| clean_content(&u.text)).collect();

    let mut out = Vec::new();
    for i in 0..units.len() {
        for j in (i + 1)..units.len() {
            let ratio = similarity_ratio(&cleaned[i], &cleaned[j], cfg.max_compare_lines);
            let kind = if ratio > cfg.near_duplicate_file_threshold {
                FileSimilarityKind::NearDuplicate
            } else if ratio > cfg.related_file_threshold {
                FileSimilarityKind::Related
            } else {
                continue;
            };
            out.push(FileSimilarity {
                left: units[i].path.clone(),
                right: units[j].path.clone(),
                similarity: round4(ratio),
                kind,
            });
        }
    }

    out.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.left.cmp(&b.left))
            .then_with(|| a.right.cmp(&b.right))
    });
    out
}

fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}
