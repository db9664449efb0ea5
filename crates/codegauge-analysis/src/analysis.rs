//! Receipt assembly.
//!
//! Per-file metrics depend only on that file's text, so the first pass is
//! a straight map with one accumulation point. The fuzzy pass needs
//! global visibility and runs after every extraction has landed. Output
//! ordering is imposed once, here, at assembly time.

use std::collections::BTreeMap;

use anyhow::Result;

use codegauge_severity::{SuggestionInputs, block_severity, length_severity, parameter_severity};
use codegauge_types::{
    AnalysisStatus, CodeSmell, DuplicateBlockFinding, FileQuality, FunctionUnit, GaugeConfig,
    MaintainabilityIndex, MaintainabilityRating, QualityReceipt, QualitySummary,
    RECEIPT_SCHEMA_VERSION, SmellKind, SourceInput, SourceUnit,
};

use crate::practices::check_practices;

/// Run the full analysis over already-read inputs.
///
/// Every entity is created fresh for this pass; re-running is the only
/// way to refresh results. Inputs arrive pre-filtered, so an empty batch
/// is legal and produces an empty, complete receipt.
pub fn analyze(inputs: &[SourceInput], cfg: &GaugeConfig) -> Result<QualityReceipt> {
    let mut warnings: Vec<String> = Vec::new();

    let units: Vec<SourceUnit> = inputs
        .iter()
        .map(|input| SourceUnit {
            path: input.path.clone(),
            lang: codegauge_patterns::tag_for_path(&input.path),
            lines: input.text.lines().count(),
            text: input.text.clone(),
        })
        .collect();

    // Per-file pass.
    let mut files: Vec<FileQuality> = Vec::with_capacity(units.len());
    let mut duplicate_blocks: Vec<DuplicateBlockFinding> = Vec::new();
    let mut violations = Vec::new();
    let mut functions: Vec<FunctionUnit> = Vec::new();

    for unit in &units {
        let complexity = codegauge_complexity::estimate(&unit.text);
        let halstead = codegauge_halstead::estimate(&unit.text);
        let comment_ratio = codegauge_maintainability::comment_ratio(&unit.text);
        let maintainability = codegauge_maintainability::synthesize(
            halstead.volume,
            complexity.cyclomatic,
            unit.lines,
            comment_ratio,
        );

        duplicate_blocks.extend(codegauge_dup_exact::detect(&unit.path, &unit.text, cfg));
        violations.extend(check_practices(unit, cfg));
        functions.extend(codegauge_dup_fuzzy::extract_functions(unit));

        files.push(FileQuality {
            path: unit.path.clone(),
            lang: unit.lang.clone(),
            lines: unit.lines,
            comment_ratio,
            complexity,
            halstead,
            maintainability,
        });
    }

    let distribution =
        codegauge_complexity::build_distribution(files.iter().map(|f| f.complexity.total));

    // Cross-file pass: all extractions are in; compare within name
    // buckets, then whole files.
    let fuzzy = codegauge_dup_fuzzy::find_duplicate_functions(&functions, cfg);
    warnings.extend(fuzzy.warnings);
    let file_similarities = codegauge_dup_fuzzy::compare_files(&units, cfg);

    let smells = build_smells(&units, &functions, &duplicate_blocks, cfg);
    let summary = build_summary(&files, &functions, cfg);

    // An empty batch has no metric to cross a threshold.
    let suggestions = if files.is_empty() {
        Vec::new()
    } else {
        codegauge_severity::build_suggestions(
            &SuggestionInputs {
                distribution,
                mean_comment_ratio: summary.mean_comment_ratio,
                functions_over_limit: summary.functions_over_limit,
                files_over_limit: summary.files_over_limit,
                smell_count: smells.len(),
                violation_count: violations.len(),
            },
            cfg,
        )
    };

    // "Most complex first" is a report-stage ordering, not an analysis
    // concern.
    files.sort_by(|a, b| {
        b.complexity
            .total
            .cmp(&a.complexity.total)
            .then_with(|| a.path.cmp(&b.path))
    });

    let status = if warnings.is_empty() {
        AnalysisStatus::Complete
    } else {
        AnalysisStatus::Partial
    };

    Ok(QualityReceipt {
        schema_version: RECEIPT_SCHEMA_VERSION,
        status,
        warnings,
        files,
        distribution,
        summary,
        duplicate_blocks,
        duplicate_functions: fuzzy.findings,
        file_similarities,
        smells,
        violations,
        suggestions,
    })
}

fn build_smells(
    units: &[SourceUnit],
    functions: &[FunctionUnit],
    blocks: &[DuplicateBlockFinding],
    cfg: &GaugeConfig,
) -> Vec<CodeSmell> {
    let mut smells = Vec::new();

    for unit in units {
        if unit.lines > cfg.max_file_lines {
            smells.push(CodeSmell {
                kind: SmellKind::LongFile,
                path: unit.path.clone(),
                detail: format!(
                    "{} lines exceeds the recommended {}",
                    unit.lines, cfg.max_file_lines
                ),
                severity: length_severity(unit.lines, cfg.max_file_lines),
            });
        }
    }

    for f in functions {
        let lines = f.body_lines();
        if lines > cfg.max_function_lines {
            smells.push(CodeSmell {
                kind: SmellKind::LongFunction,
                path: f.file.clone(),
                detail: format!("{} ({} lines)", f.name, lines),
                severity: length_severity(lines, cfg.max_function_lines),
            });
        }
    }

    // One long-parameter smell per file, rated by the worst offender.
    let mut long_params: BTreeMap<&str, Vec<(&str, usize)>> = BTreeMap::new();
    for f in functions {
        if f.params.len() > cfg.max_params {
            long_params
                .entry(f.file.as_str())
                .or_default()
                .push((f.name.as_str(), f.params.len()));
        }
    }
    for (path, offenders) in long_params {
        let max = offenders.iter().map(|(_, n)| *n).max().unwrap_or(0);
        let detail = offenders
            .iter()
            .map(|(name, n)| format!("{name} has {n} parameters"))
            .collect::<Vec<_>>()
            .join("; ");
        smells.push(CodeSmell {
            kind: SmellKind::LongParameterList,
            path: path.to_string(),
            detail,
            severity: parameter_severity(max),
        });
    }

    // One duplicate-block smell per file, rated by how many distinct
    // blocks repeat there.
    let mut blocks_by_file: BTreeMap<&str, usize> = BTreeMap::new();
    for b in blocks {
        *blocks_by_file.entry(b.path.as_str()).or_insert(0) += 1;
    }
    for (path, count) in blocks_by_file {
        smells.push(CodeSmell {
            kind: SmellKind::DuplicateBlocks,
            path: path.to_string(),
            detail: format!("{count} repeated block(s)"),
            severity: block_severity(count),
        });
    }

    smells.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.kind.cmp(&b.kind)));
    smells
}

fn build_summary(
    files: &[FileQuality],
    functions: &[FunctionUnit],
    cfg: &GaugeConfig,
) -> QualitySummary {
    let total_lines: usize = files.iter().map(|f| f.lines).sum();
    let lengths: Vec<usize> = functions.iter().map(|f| f.body_lines()).collect();
    let max_function_length = lengths.iter().copied().max().unwrap_or(0);
    let avg_function_length = if lengths.is_empty() {
        0.0
    } else {
        round2(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
    };
    let functions_over_limit = lengths
        .iter()
        .filter(|&&l| l > cfg.max_function_lines)
        .count();
    let files_over_limit = files.iter().filter(|f| f.lines > cfg.max_file_lines).count();

    let mean_comment_ratio = if files.is_empty() {
        0.0
    } else {
        files.iter().map(|f| f.comment_ratio).sum::<f64>() / files.len() as f64
    };

    // An empty scan has nothing to penalize.
    let maintainability = if files.is_empty() {
        MaintainabilityIndex {
            score: 100.0,
            rating: MaintainabilityRating::HighlyMaintainable,
        }
    } else {
        let mean =
            files.iter().map(|f| f.maintainability.score).sum::<f64>() / files.len() as f64;
        let score = round2(mean);
        MaintainabilityIndex {
            score,
            rating: codegauge_maintainability::rating_for_score(score),
        }
    };

    QualitySummary {
        files: files.len(),
        total_lines,
        total_functions: functions.len(),
        avg_function_length,
        max_function_length,
        functions_over_limit,
        files_over_limit,
        mean_comment_ratio,
        maintainability,
    }
}

fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegauge_types::{ComplexityDistribution, Severity};

    #[test]
    fn empty_batch_yields_empty_complete_receipt() {
        let receipt = analyze(&[], &GaugeConfig::default()).unwrap();
        assert_eq!(receipt.status, AnalysisStatus::Complete);
        assert!(receipt.files.is_empty());
        assert!(receipt.warnings.is_empty());
        assert_eq!(receipt.distribution, ComplexityDistribution::default());
        assert!(receipt.suggestions.is_empty());
        assert_eq!(receipt.summary.files, 0);
    }

    #[test]
    fn empty_file_still_produces_a_row() {
        let inputs = vec![SourceInput::new("src/empty.py", "")];
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        assert_eq!(receipt.files.len(), 1);
        let row = &receipt.files[0];
        assert_eq!(row.complexity.cyclomatic, 1);
        assert_eq!(row.complexity.cognitive, 0);
        assert_eq!(row.halstead.volume, 0.0);
    }

    #[test]
    fn files_sort_most_complex_first_with_path_tiebreak() {
        let busy = "if (a && b) { x(); }\nif (c || d) { y(); }\n";
        let quiet = "plain();\n";
        let inputs = vec![
            SourceInput::new("src/quiet.js", quiet),
            SourceInput::new("src/busy.js", busy),
            SourceInput::new("src/also_quiet.js", quiet),
        ];
        let receipt = analyze(&inputs, &GaugeConfig::default()).unwrap();
        assert_eq!(receipt.files[0].path, "src/busy.js");
        assert_eq!(receipt.files[1].path, "src/also_quiet.js");
        assert_eq!(receipt.files[2].path, "src/quiet.js");
    }

    #[test]
    fn long_file_smell_fires_past_the_limit() {
        let text: String = (0..40).map(|i| format!("call_{i}();\n")).collect();
        let cfg = GaugeConfig {
            max_file_lines: 30,
            ..GaugeConfig::default()
        };
        let receipt = analyze(&[SourceInput::new("src/big.js", text)], &cfg).unwrap();
        assert!(
            receipt
                .smells
                .iter()
                .any(|s| s.kind == SmellKind::LongFile && s.severity == Severity::Low)
        );
        assert_eq!(receipt.summary.files_over_limit, 1);
    }

    #[test]
    fn long_parameter_list_smell_rates_by_worst_offender() {
        let text = "def wide(a, b, c, d, e, f, g, h, i):\n    return a\n\ndef narrow(x):\n    return x\n";
        let receipt = analyze(&[SourceInput::new("src/m.py", text)], &GaugeConfig::default())
            .unwrap();
        let smell = receipt
            .smells
            .iter()
            .find(|s| s.kind == SmellKind::LongParameterList)
            .unwrap();
        assert!(smell.detail.contains("wide has 9 parameters"));
        assert_eq!(smell.severity, Severity::High);
    }

    #[test]
    fn warnings_flip_status_to_partial() {
        let body = "function poll() {\n  const t = tick();\n  return t;\n}\n";
        let inputs: Vec<SourceInput> = (0..6)
            .map(|i| SourceInput::new(format!("src/f{i}.js"), body))
            .collect();
        let cfg = GaugeConfig {
            max_pairs_per_name: 3,
            ..GaugeConfig::default()
        };
        let receipt = analyze(&inputs, &cfg).unwrap();
        assert_eq!(receipt.status, AnalysisStatus::Partial);
        assert!(!receipt.warnings.is_empty());
    }
}
