//! BDD-style scenario tests for fuzzy duplication detection.

use codegauge_dup_fuzzy::{extract_functions, find_duplicate_functions};
use codegauge_types::{DuplicateReason, FunctionUnit, GaugeConfig, SourceUnit};

// ── Helpers ──────────────────────────────────────────────────────

fn unit(path: &str, lang: &str, text: &str) -> SourceUnit {
    SourceUnit {
        path: path.to_string(),
        text: text.to_string(),
        lines: text.lines().count(),
        lang: lang.to_string(),
    }
}

fn extract_all(units: &[SourceUnit]) -> Vec<FunctionUnit> {
    units.iter().flat_map(|u| extract_functions(u)).collect()
}

// ── Cross-file duplicates ────────────────────────────────────────

mod cross_file_duplicates {
    use super::*;

    #[test]
    fn given_verbatim_copies_then_implementation_finding_reports() {
        let body = "function loadUsers(db) {\n  const rows = db.query();\n  const out = rows.map(toUser);\n  return out;\n}\n";
        let units = vec![
            unit("src/a.js", "javascript", body),
            unit("src/b.js", "javascript", body),
        ];
        let funcs = extract_all(&units);
        let outcome = find_duplicate_functions(&funcs, &GaugeConfig::default());

        assert_eq!(outcome.findings.len(), 1);
        let f = &outcome.findings[0];
        assert_eq!(f.name, "loadUsers");
        assert_eq!(f.reason, DuplicateReason::Implementation);
        assert!(f.similarity >= 0.8);
        assert_eq!(f.left, "src/a.js");
        assert_eq!(f.right, "src/b.js");
    }

    #[test]
    fn given_renamed_locals_then_still_reports_implementation() {
        // Same shape, different binding names: normalization strips the
        // assignment targets, so the bodies compare equal.
        let left = "function warmup() {\n  let cache = load();\n  mark();\n  return done();\n}\n";
        let right = "function warmup() {\n  let primed = load();\n  mark();\n  return done();\n}\n";
        let units = vec![
            unit("src/a.js", "javascript", left),
            unit("src/b.js", "javascript", right),
        ];
        let outcome = find_duplicate_functions(&extract_all(&units), &GaugeConfig::default());

        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].reason, DuplicateReason::Implementation);
    }

    #[test]
    fn given_same_body_under_different_names_then_no_finding() {
        // Name bucketing by design: only same-named functions are ever
        // compared. This pins that tradeoff.
        let units = vec![
            unit(
                "src/a.js",
                "javascript",
                "function add(a, b) {\n  return a + b;\n}\n",
            ),
            unit(
                "src/b.js",
                "javascript",
                "function plus(a, b) {\n  return a + b;\n}\n",
            ),
        ];
        let outcome = find_duplicate_functions(&extract_all(&units), &GaugeConfig::default());
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn given_comment_and_string_drift_then_still_near_identical() {
        let left = "def fetch_rows(db):\n    # grab everything\n    rows = db.all()\n    send(\"starting\")\n    return rows\n";
        let right = "def fetch_rows(db):\n    rows = db.all()\n    send(\"resuming\")\n    return rows\n";
        let units = vec![
            unit("a.py", "python", left),
            unit("b.py", "python", right),
        ];
        let outcome = find_duplicate_functions(&extract_all(&units), &GaugeConfig::default());
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].reason, DuplicateReason::Implementation);
    }

    #[test]
    fn given_lifecycle_names_then_no_finding_even_for_copies() {
        let body = "def setUp(self):\n    self.db = connect()\n    self.user = make_user()\n";
        let units = vec![unit("a_test.py", "python", body), unit("b_test.py", "python", body)];
        // setUp recurs legitimately across test files.
        let funcs: Vec<FunctionUnit> = units.iter().flat_map(|u| extract_functions(u)).collect();
        let outcome = find_duplicate_functions(&funcs, &GaugeConfig::default());
        assert!(outcome.findings.is_empty());
    }
}

// ── Pair-space bounds ────────────────────────────────────────────

mod pair_space {
    use super::*;

    #[test]
    fn given_oversized_name_bucket_then_truncation_warns() {
        let body = "function poll() {\n  const t = tick();\n  return t;\n}\n";
        let units: Vec<SourceUnit> = (0..20)
            .map(|i| unit(&format!("src/f{i}.js"), "javascript", body))
            .collect();
        let cfg = GaugeConfig {
            max_pairs_per_name: 10,
            ..GaugeConfig::default()
        };
        let outcome = find_duplicate_functions(&extract_all(&units), &cfg);

        assert_eq!(outcome.findings.len(), 10);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("poll"));
    }

    #[test]
    fn given_three_copies_then_every_cross_file_pair_reports() {
        let body = "function norm(v) {\n  const m = mag(v);\n  return div(v, m);\n}\n";
        let units = vec![
            unit("src/a.js", "javascript", body),
            unit("src/b.js", "javascript", body),
            unit("src/c.js", "javascript", body),
        ];
        let outcome = find_duplicate_functions(&extract_all(&units), &GaugeConfig::default());
        // (a,b), (a,c), (b,c)
        assert_eq!(outcome.findings.len(), 3);
        assert!(outcome.warnings.is_empty());
    }
}
