//! Exact block duplication via fixed-size sliding windows.
//!
//! A window of `block_lines` lines slides over the file one line at a
//! time; each window is hashed into a frequency map keyed by its content.
//! Overlapping windows are independently hashed, so a duplicated region
//! seeds several phase-shifted repeat groups; findings are deduped by
//! block text and then overlap-suppressed so one region yields one
//! finding. O(L * N) time, O(L) extra memory. No false negatives for
//! verbatim repeats; formatting drift is the fuzzy detector's job.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use codegauge_severity::block_severity;
use codegauge_types::{DuplicateBlockFinding, GaugeConfig};

/// Occurrences of one distinct window content.
struct BlockGroup {
    /// Trimmed first content line, kept as the finding label.
    label: String,
    /// 0-indexed window start lines, in scan order.
    starts: Vec<usize>,
    /// Offset of the first non-blank line inside the window.
    lead_blanks: usize,
}

/// Detect repeated blocks in one unit's text.
///
/// Each distinct block content that occurs more than once is reported
/// exactly once, with its repeat count and the first line at which it
/// starts. Blank-only windows are excluded.
pub fn detect(path: &str, text: &str, cfg: &GaugeConfig) -> Vec<DuplicateBlockFinding> {
    let window = cfg.block_lines.max(1);
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < window {
        return Vec::new();
    }

    let mut groups: BTreeMap<u64, BlockGroup> = BTreeMap::new();

    for start in 0..=(lines.len() - window) {
        let block = &lines[start..start + window];
        let lead = block.iter().take_while(|l| l.trim().is_empty()).count();
        if lead == block.len() {
            continue;
        }
        let tail = block
            .iter()
            .rev()
            .take_while(|l| l.trim().is_empty())
            .count();
        let content = &block[lead..block.len() - tail];

        let mut hasher = FxHasher::default();
        for line in content {
            line.hash(&mut hasher);
        }
        let key = hasher.finish();

        groups
            .entry(key)
            .or_insert_with(|| BlockGroup {
                label: content[0].trim().to_string(),
                starts: Vec::new(),
                lead_blanks: lead,
            })
            .starts
            .push(start);
    }

    let mut repeated: Vec<&BlockGroup> = groups.values().filter(|g| g.starts.len() > 1).collect();

    // Emit highest repeat counts first so phase-shifted echoes of the
    // same region lose the overlap check against the real block.
    repeated.sort_by(|a, b| {
        b.starts
            .len()
            .cmp(&a.starts.len())
            .then_with(|| a.starts[0].cmp(&b.starts[0]))
    });

    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut findings = Vec::new();

    for group in repeated {
        let ranges: Vec<(usize, usize)> = group.starts.iter().map(|&s| (s, s + window)).collect();
        let overlaps = ranges
            .iter()
            .any(|r| claimed.iter().any(|c| r.0 < c.1 && c.0 < r.1));
        if overlaps {
            continue;
        }
        claimed.extend(ranges);
        findings.push(DuplicateBlockFinding {
            path: path.to_string(),
            first_line: group.starts[0] + group.lead_blanks + 1,
            count: group.starts.len(),
            label: group.label.clone(),
            severity: block_severity(group.starts.len()),
        });
    }

    findings.sort_by(|a, b| a.first_line.cmp(&b.first_line));
    findings
}
