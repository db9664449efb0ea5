//! Body normalization for shape comparison.
//!
//! The goal is to compare structure, not identifiers: comments go away,
//! string literals collapse to empty placeholders, declared-variable
//! names vanish from assignments, blank lines drop. Normalizing an
//! already-normalized body is a no-op; the mid-band duplicate decision
//! depends on that.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex literal"));

static SLASH_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)//.*$").expect("valid regex literal"));

static HASH_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)#.*$").expect("valid regex literal"));

static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*""#).expect("valid regex literal"));

static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^']*'").expect("valid regex literal"));

/// An assignment target with any same-line qualifier words before it
/// (`const`, `let`, a C-style type, ...). The optional second `=` lets
/// the replacement recognize an equality comparison and leave it alone;
/// separators stay within the line so a replacement can never splice a
/// new match together.
static ASSIGNMENT_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\w+[ \t]+)*\w+[ \t]*==?").expect("valid regex literal"));

/// Normalize one function body (or whole file) for similarity scoring.
pub fn normalize_body(body: &str) -> String {
    let s = BLOCK_COMMENTS.replace_all(body, "");
    let s = SLASH_COMMENTS.replace_all(&s, "");
    let s = HASH_COMMENTS.replace_all(&s, "");
    let s = DOUBLE_QUOTED.replace_all(&s, "\"\"");
    let s = SINGLE_QUOTED.replace_all(&s, "''");
    let s = ASSIGNMENT_BINDING.replace_all(&s, |caps: &regex::Captures| {
        // `==` is a comparison, not a binding; keep it verbatim.
        if caps[0].ends_with("==") {
            caps[0].to_string()
        } else {
            "=".to_string()
        }
    });

    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lighter whole-file cleaning for file-level similarity: comments and
/// blank lines go, identifiers stay.
pub fn clean_content(text: &str) -> String {
    let s = BLOCK_COMMENTS.replace_all(text, "");
    let s = SLASH_COMMENTS.replace_all(&s, "");
    let s = HASH_COMMENTS.replace_all(&s, "");

    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
