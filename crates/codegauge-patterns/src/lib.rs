//! # codegauge-patterns
//!
//! **Tier 0 (Pattern Library)**
//!
//! The declarative catalogue every scanner draws from: decision-point
//! tokens, operator/operand tokens, and per-language signature tables.
//! Pure data, compiled once behind `LazyLock`; no scoring logic.
//!
//! Scanners work on raw text. Keywords inside strings or comments are
//! counted (fast but imperfect); that tradeoff is the point of a
//! language-agnostic engine.

use std::sync::LazyLock;

use regex::Regex;

use codegauge_types::PatternFamily;

// ---------------------
// Decision-point tokens
// ---------------------

/// Tokens that each add one to cyclomatic complexity. Counted
/// independently and summed: a line with both `if` and `&&` contributes
/// twice.
const DECISION_TOKENS: &[&str] = &[
    r"\bif\b",
    r"\belse\b",
    r"\bfor\b",
    r"\bwhile\b",
    r"\bcase\b",
    r"\bcatch\b",
    r"&&",
    r"\|\|",
];

pub static DECISION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DECISION_TOKENS
        .iter()
        .map(|t| Regex::new(t).expect("valid regex literal"))
        .collect()
});

/// Weighted tokens for cognitive complexity. `else if` carries double
/// weight to penalize nesting indicators more than flat branches.
const COGNITIVE_TOKENS: &[(&str, usize)] = &[
    (r"\bif\b", 1),
    (r"\belse if\b|\belseif\b", 2),
    (r"\bfor\b", 1),
    (r"\bwhile\b", 1),
    (r"\bcatch\b", 1),
    (r"\?", 1),
    (r"&&|\|\|", 1),
];

pub static COGNITIVE_PATTERNS: LazyLock<Vec<(Regex, usize)>> = LazyLock::new(|| {
    COGNITIVE_TOKENS
        .iter()
        .map(|(t, w)| (Regex::new(t).expect("valid regex literal"), *w))
        .collect()
});

// ---------------
// Halstead tokens
// ---------------

/// Contiguous runs of symbol characters, counted as one operator each.
pub static OPERATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\-*/=<>!&|^~%]+").expect("valid regex literal"));

/// Control-flow keywords treated as operators.
pub static OPERATOR_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:if|else|for|while|do|switch|case|break|continue|return|try|catch|throw)\b")
        .expect("valid regex literal")
});

/// Identifier-like tokens, integer literals, and quoted string literals.
pub static OPERAND_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b[A-Za-z_]\w*\b|\b\d+\b|"[^"]*"|'[^']*'"#).expect("valid regex literal")
});

// --------------
// Comment lines
// --------------

/// Prefixes that mark a trimmed line as a comment, across every language
/// the engine scans.
pub const COMMENT_PREFIXES: &[&str] = &["#", "//", "/*", "*"];

pub fn is_comment_line(trimmed: &str) -> bool {
    COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

// ------------------
// Language registry
// ------------------

/// How a language delimits function bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// Body is the balanced-brace span following the signature.
    Braced,
    /// Body ends at the first line whose indentation is <= the
    /// declaration's.
    Indented,
}

/// One signature pattern: the family tag plus a regex whose first capture
/// group is the declared name.
pub struct SignaturePattern {
    pub family: PatternFamily,
    pub regex: Regex,
}

pub struct LanguageSpec {
    pub tag: &'static str,
    pub extensions: &'static [&'static str],
    pub body_style: BodyStyle,
    pub signatures: Vec<SignaturePattern>,
}

fn sig(family: PatternFamily, pattern: &str) -> SignaturePattern {
    SignaturePattern {
        family,
        regex: Regex::new(pattern).expect("valid regex literal"),
    }
}

/// Signature tables for JS-family syntax, shared by javascript and
/// typescript. Order matters: the first pattern to claim a (line, name)
/// pair wins, so components and hooks outrank plain functions.
fn js_family_signatures() -> Vec<SignaturePattern> {
    vec![
        sig(
            PatternFamily::Component,
            r"(?m)^\s*(?:export\s+(?:default\s+)?)?(?:const|class|function)\s+([A-Z][A-Za-z0-9]*)",
        ),
        sig(
            PatternFamily::Hook,
            r"(?m)^\s*(?:export\s+(?:default\s+)?)?(?:const|function)\s+(use[A-Z][A-Za-z0-9]*)",
        ),
        sig(
            PatternFamily::Function,
            r"(?m)^\s*(?:export\s+(?:default\s+)?)?(?:async\s+)?(?:function|const|let|var)\s+([a-z_$][\w$]*)\s*(?:=|\()",
        ),
    ]
}

static LANGUAGES: LazyLock<Vec<LanguageSpec>> = LazyLock::new(|| {
    vec![
        LanguageSpec {
            tag: "python",
            extensions: &["py", "pyi"],
            body_style: BodyStyle::Indented,
            signatures: vec![
                sig(PatternFamily::Class, r"(?m)^\s*class\s+([A-Za-z_]\w*)"),
                sig(
                    PatternFamily::Function,
                    r"(?m)^\s*(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(",
                ),
            ],
        },
        LanguageSpec {
            tag: "javascript",
            extensions: &["js", "jsx", "mjs", "cjs"],
            body_style: BodyStyle::Braced,
            signatures: js_family_signatures(),
        },
        LanguageSpec {
            tag: "typescript",
            extensions: &["ts", "tsx"],
            body_style: BodyStyle::Braced,
            signatures: js_family_signatures(),
        },
        LanguageSpec {
            tag: "rust",
            extensions: &["rs"],
            body_style: BodyStyle::Braced,
            signatures: vec![sig(
                PatternFamily::Function,
                r"(?m)^\s*(?:pub(?:\([^)]+\))?\s+)?(?:(?:async|unsafe|const)\s+)*fn\s+([A-Za-z_]\w*)",
            )],
        },
        LanguageSpec {
            tag: "go",
            extensions: &["go"],
            body_style: BodyStyle::Braced,
            signatures: vec![sig(
                PatternFamily::Function,
                r"(?m)^\s*func\s+(?:\([^)]*\)\s*)?([A-Za-z_]\w*)",
            )],
        },
    ]
});

pub fn language_for_tag(tag: &str) -> Option<&'static LanguageSpec> {
    LANGUAGES.iter().find(|spec| spec.tag == tag)
}

/// Language tag for a path: a registry tag when the extension is known,
/// otherwise the lowercased extension itself, otherwise "text".
pub fn tag_for_path(path: &str) -> String {
    let ext = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if ext.is_empty() {
        return "text".to_string();
    }
    for spec in LANGUAGES.iter() {
        if spec.extensions.contains(&ext.as_str()) {
            return spec.tag.to_string();
        }
    }
    ext
}

// -------------------------
// Duplicate-name allow-list
// -------------------------

/// Names expected to recur across files: framework lifecycle methods,
/// constructors, test hooks, common interface methods. Hand-tuned; kept
/// as data so callers can audit it.
pub const ALLOWED_DUPLICATE_NAMES: &[&str] = &[
    // Framework lifecycle
    "getLayout",
    "getInitialProps",
    "getStaticProps",
    "getServerSideProps",
    "layout",
    "loading",
    "error",
    "notFound",
    // Common hooks
    "useEffect",
    "useState",
    "useMemo",
    "useCallback",
    // Common utility names
    "init",
    "setup",
    "configure",
    "getConfig",
    "getData",
    // Constructors and dunder methods
    "constructor",
    "new",
    "__init__",
    "__str__",
    "__repr__",
    "__len__",
    "toString",
    // Test hooks
    "setUp",
    "tearDown",
    "beforeEach",
    "afterEach",
];

pub fn is_allowed_duplicate(name: &str) -> bool {
    ALLOWED_DUPLICATE_NAMES.contains(&name)
}
