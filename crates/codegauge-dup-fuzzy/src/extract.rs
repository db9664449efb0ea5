//! Function-like unit extraction.
//!
//! Language-keyed signature patterns identify function/class/component
//! declarations and capture the declared name. The body is the
//! balanced-brace span after the signature for brace-delimited languages,
//! or the indentation-delimited block for indentation-delimited ones.

use std::collections::BTreeMap;

use codegauge_patterns::{BodyStyle, language_for_tag};
use codegauge_types::{FunctionUnit, SourceUnit};

use crate::normalize::normalize_body;

/// Extract every named function-like span from a unit.
///
/// A signature without a reachable body (trait methods, abstract
/// declarations) is skipped. When several patterns match the same
/// (line, name) pair, the first pattern in the language table wins; the
/// result carries that family tag.
pub fn extract_functions(unit: &SourceUnit) -> Vec<FunctionUnit> {
    let Some(spec) = language_for_tag(&unit.lang) else {
        return Vec::new();
    };

    let text = unit.text.as_str();
    let lines: Vec<&str> = text.lines().collect();
    let mut seen: BTreeMap<(usize, String), FunctionUnit> = BTreeMap::new();

    for sig in &spec.signatures {
        for caps in sig.regex.captures_iter(text) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let line_idx = text[..whole.start()].bytes().filter(|&b| b == b'\n').count();
            let key = (line_idx, name.as_str().to_string());
            if seen.contains_key(&key) {
                continue;
            }

            let body = match spec.body_style {
                BodyStyle::Braced => braced_body(text, whole.start()),
                BodyStyle::Indented => Some(indented_body(&lines, line_idx)),
            };
            let Some(body) = body else {
                continue;
            };

            let params = extract_params(lines.get(line_idx).copied().unwrap_or(""));
            let normalized_body = normalize_body(&body);
            seen.insert(
                key,
                FunctionUnit {
                    name: name.as_str().to_string(),
                    family: sig.family,
                    file: unit.path.clone(),
                    start_line: line_idx + 1,
                    body,
                    normalized_body,
                    params,
                },
            );
        }
    }

    seen.into_values().collect()
}

/// Balanced-brace span starting at the first `{` after `from`.
/// `None` when no opening brace exists (declaration without a body).
fn braced_body(text: &str, from: usize) -> Option<String> {
    let bytes = text.as_bytes();
    let open = bytes[from..].iter().position(|&b| b == b'{')? + from;

    let mut depth = 0usize;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(text[open..=open + offset].to_string());
                }
            }
            _ => {}
        }
    }
    // Unclosed braces: malformed text, no usable body.
    None
}

/// Indentation-delimited block: the declaration line plus every following
/// line indented deeper than it. Blank lines and comments do not end the
/// block.
fn indented_body(lines: &[&str], decl_idx: usize) -> String {
    let decl = lines.get(decl_idx).copied().unwrap_or("");
    let base_indent = indent_of(decl);

    let mut end = decl_idx;
    for (i, line) in lines.iter().enumerate().skip(decl_idx + 1) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if indent_of(line) <= base_indent {
            break;
        }
        end = i;
    }

    lines[decl_idx..=end].join("\n")
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Parameter names from the signature line's parenthesized list.
fn extract_params(line: &str) -> Vec<String> {
    let Some(open) = line.find('(') else {
        return Vec::new();
    };
    let close = line[open + 1..]
        .find(')')
        .map(|i| open + 1 + i)
        .unwrap_or(line.len());
    line[open + 1..close]
        .split(',')
        .map(|p| {
            p.split(':')
                .next()
                .unwrap_or_default()
                .split('=')
                .next()
                .unwrap_or_default()
                .trim()
                .trim_start_matches(['*', '&'])
                .trim_start_matches("mut ")
                .trim()
        })
        .filter(|p| !p.is_empty() && *p != "self")
        .map(|p| p.to_string())
        .collect()
}
