//! Property-based tests for receipt-level invariants.

use proptest::prelude::*;

use codegauge_analysis::analyze;
use codegauge_types::{AnalysisStatus, GaugeConfig, SourceInput};

// ── Strategies ───────────────────────────────────────────────────

fn arb_path() -> impl Strategy<Value = String> {
    ("[a-z]{1,8}", prop_oneof!["py", "js", "ts", "rs", "txt"])
        .prop_map(|(stem, ext)| format!("src/{stem}.{ext}"))
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,8}\\(\\);",
            "if \\([a-z]{1,4}\\) \\{ [a-z]{1,6}\\(\\); \\}",
            "let [a-z]{1,6} = [0-9]{1,3};",
            "// [a-z ]{0,10}",
            "# [a-z ]{0,10}",
            Just(String::new()),
            "def [a-z_]{1,8}\\(\\):",
            "    return [a-z]{1,5}",
        ],
        0..30,
    )
    .prop_map(|lines| lines.join("\n"))
}

fn arb_inputs() -> impl Strategy<Value = Vec<SourceInput>> {
    prop::collection::vec((arb_path(), arb_text()), 0..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(path, text)| SourceInput::new(path, text))
            .collect()
    })
}

// ── Invariants ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_input_gets_a_row(inputs in arb_inputs()) {
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        prop_assert_eq!(receipt.files.len(), inputs.len());
    }

    #[test]
    fn cyclomatic_at_least_one_cognitive_at_least_zero(inputs in arb_inputs()) {
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        for row in &receipt.files {
            prop_assert!(row.complexity.cyclomatic >= 1);
            prop_assert_eq!(
                row.complexity.total,
                row.complexity.cyclomatic + row.complexity.cognitive
            );
        }
    }

    #[test]
    fn halstead_outputs_are_finite_and_non_negative(inputs in arb_inputs()) {
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        for row in &receipt.files {
            prop_assert!(row.halstead.volume.is_finite() && row.halstead.volume >= 0.0);
            prop_assert!(row.halstead.difficulty.is_finite() && row.halstead.difficulty >= 0.0);
            prop_assert!(row.halstead.effort.is_finite() && row.halstead.effort >= 0.0);
        }
    }

    #[test]
    fn maintainability_stays_in_band(inputs in arb_inputs()) {
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        for row in &receipt.files {
            prop_assert!((0.0..=100.0).contains(&row.maintainability.score));
        }
        prop_assert!((0.0..=100.0).contains(&receipt.summary.maintainability.score));
    }

    #[test]
    fn distribution_covers_every_file(inputs in arb_inputs()) {
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        prop_assert_eq!(receipt.distribution.files(), receipt.files.len());
    }

    #[test]
    fn complete_status_means_no_warnings(inputs in arb_inputs()) {
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        match receipt.status {
            AnalysisStatus::Complete => prop_assert!(receipt.warnings.is_empty()),
            AnalysisStatus::Partial => prop_assert!(!receipt.warnings.is_empty()),
        }
    }

    #[test]
    fn files_are_sorted_most_complex_first(inputs in arb_inputs()) {
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        for pair in receipt.files.windows(2) {
            prop_assert!(pair[0].complexity.total >= pair[1].complexity.total);
        }
    }

    #[test]
    fn similarities_stay_in_unit_interval(inputs in arb_inputs()) {
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        for s in &receipt.file_similarities {
            prop_assert!((0.0..=1.0).contains(&s.similarity));
        }
        for d in &receipt.duplicate_functions {
            prop_assert!((0.0..=1.0).contains(&d.similarity));
        }
    }
}
