//! Property-based tests for exact block detection invariants.

use proptest::prelude::*;

use codegauge_dup_exact::detect;
use codegauge_types::GaugeConfig;

fn arb_line() -> impl Strategy<Value = String> {
    // Small alphabet so collisions (real repeats) actually happen.
    prop_oneof![
        Just("alpha();".to_string()),
        Just("beta();".to_string()),
        Just("gamma();".to_string()),
        Just(String::new()),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..60).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn detection_never_panics_and_counts_are_sane(text in arb_text()) {
        let findings = detect("f.js", &text, &GaugeConfig::default());
        for f in &findings {
            prop_assert!(f.count >= 2);
            prop_assert!(f.first_line >= 1);
            prop_assert!(!f.label.is_empty());
        }
    }

    #[test]
    fn findings_never_overlap(text in arb_text()) {
        let cfg = GaugeConfig::default();
        let findings = detect("f.js", &text, &cfg);
        // Dedup by block text plus overlap suppression: reported first
        // lines are strictly increasing by at least one line.
        for pair in findings.windows(2) {
            prop_assert!(pair[0].first_line < pair[1].first_line);
        }
    }

    #[test]
    fn detection_is_deterministic(text in arb_text()) {
        let cfg = GaugeConfig::default();
        let a = detect("f.js", &text, &cfg);
        let b = detect("f.js", &text, &cfg);
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(x.first_line, y.first_line);
            prop_assert_eq!(x.count, y.count);
            prop_assert_eq!(&x.label, &y.label);
        }
    }

    #[test]
    fn exact_k_contiguous_repeats_report_once(k in 2usize..6) {
        let block: String = (0..6).map(|i| format!("line_{i}();\n")).collect();
        let text = block.repeat(k);
        let findings = detect("f.js", &text, &GaugeConfig::default());
        prop_assert_eq!(findings.len(), 1);
        prop_assert_eq!(findings[0].count, k);
    }
}
