//! Best-practice pattern checks.
//!
//! Each check is its own pattern family, isolated from the others: a
//! family that finds nothing on malformed text simply contributes no
//! violations, and the remaining families still run.

use std::sync::LazyLock;

use regex::Regex;

use codegauge_types::{GaugeConfig, PracticeViolation, SourceUnit, ViolationKind};

/// camelCase names declared with `def`/`class` in Python-tagged files.
static PY_CAMEL_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:def|class)\s+([a-z_]\w*[A-Z]\w*)").expect("valid regex literal")
});

/// Leading-underscore bindings in JS/TS-tagged files. PascalCase is
/// exempt: component declarations legitimately use it.
static JS_BAD_BINDINGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:let|const|var|function)\s+(_\w+)\b").expect("valid regex literal")
});

/// A catch clause whose braced body is empty or comment-only.
static CATCH_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"catch\s*\([^)]*\)\s*\{([^}]*)\}").expect("valid regex literal")
});

/// Run every practice family over one unit.
pub fn check_practices(unit: &SourceUnit, cfg: &GaugeConfig) -> Vec<PracticeViolation> {
    let mut out = Vec::new();
    out.extend(check_line_length(unit, cfg));
    out.extend(check_naming(unit));
    out.extend(check_empty_catch(unit));
    out
}

/// One violation per file, listing every line over the limit.
fn check_line_length(unit: &SourceUnit, cfg: &GaugeConfig) -> Option<PracticeViolation> {
    let long_lines: Vec<String> = unit
        .text
        .lines()
        .enumerate()
        .filter(|(_, line)| line.trim().len() > cfg.max_line_chars)
        .map(|(i, _)| (i + 1).to_string())
        .collect();

    if long_lines.is_empty() {
        return None;
    }
    Some(PracticeViolation {
        kind: ViolationKind::LineLength,
        path: unit.path.clone(),
        detail: format!(
            "lines exceeding {} characters: {}",
            cfg.max_line_chars,
            long_lines.join(", ")
        ),
    })
}

fn check_naming(unit: &SourceUnit) -> Option<PracticeViolation> {
    let pattern = match unit.lang.as_str() {
        "python" => &*PY_CAMEL_NAMES,
        "javascript" | "typescript" => &*JS_BAD_BINDINGS,
        _ => return None,
    };

    let mut bad: Vec<&str> = pattern
        .captures_iter(&unit.text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    bad.sort_unstable();
    bad.dedup();

    if bad.is_empty() {
        return None;
    }
    Some(PracticeViolation {
        kind: ViolationKind::NamingConvention,
        path: unit.path.clone(),
        detail: format!("non-conventional names found: {}", bad.join(", ")),
    })
}

fn check_empty_catch(unit: &SourceUnit) -> Option<PracticeViolation> {
    for caps in CATCH_BLOCKS.captures_iter(&unit.text) {
        let body = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let empty = body
            .lines()
            .map(str::trim)
            .all(|l| l.is_empty() || l.starts_with('/') || l.starts_with('#') || l.starts_with('*'));
        if empty {
            return Some(PracticeViolation {
                kind: ViolationKind::EmptyCatch,
                path: unit.path.clone(),
                detail: "empty catch blocks found".to_string(),
            });
        }
    }
    None
}
