//! # codegauge-types
//!
//! **Tier 0 (Quality Contract)**
//!
//! Pure data structures for quality receipts. No I/O or scoring logic.
//!
//! ## What belongs here
//! * Receipt and finding types produced by the analysis pass
//! * Classification enums (severity, ratings, buckets)
//! * The `GaugeConfig` threshold object threaded through every entry point
//!
//! ## What does NOT belong here
//! * Metric computation (use the estimator crates)
//! * Pattern tables (use codegauge-patterns)
//! * File I/O of any kind

use serde::{Deserialize, Serialize};

/// Schema version for quality receipts.
/// v3: Added best-practice violations and file-similarity hints.
pub const RECEIPT_SCHEMA_VERSION: u32 = 3;

// -------------
// Configuration
// -------------

/// Thresholds for every detector, passed explicitly to each entry point.
///
/// Defaults mirror the tuning the detectors were calibrated against. The
/// similarity cutoffs are hand-tuned values, not derived constants; tests
/// pin them as defaults rather than asserting they are optimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Sliding-window size for exact block duplication, in lines.
    pub block_lines: usize,
    /// Similarity at or above which a same-named pair is a near-identical
    /// implementation, regardless of context.
    pub implementation_threshold: f64,
    /// Lower similarity bound for context-confirmed duplicates.
    pub context_candidate_threshold: f64,
    /// Context-overlap score required to confirm a mid-band candidate.
    pub context_confirm_threshold: f64,
    /// Whole-file similarity above which two files are near-duplicates.
    pub near_duplicate_file_threshold: f64,
    /// Whole-file similarity above which two files are merely related.
    pub related_file_threshold: f64,
    /// Function body length (lines) beyond which a long-function smell fires.
    pub max_function_lines: usize,
    /// File length (lines) beyond which a long-file smell fires.
    pub max_file_lines: usize,
    /// Parameter count beyond which a long-parameter-list smell fires.
    pub max_params: usize,
    /// Comment-line ratio below which a documentation suggestion fires.
    pub min_comment_ratio: f64,
    /// Line length (chars, trimmed) beyond which a line-length violation fires.
    pub max_line_chars: usize,
    /// Cap on lines fed to one similarity comparison; longer bodies are
    /// truncated and the truncation is surfaced as a warning.
    pub max_compare_lines: usize,
    /// Cap on same-named pairs compared per name bucket.
    pub max_pairs_per_name: usize,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            block_lines: 6,
            implementation_threshold: 0.8,
            context_candidate_threshold: 0.6,
            context_confirm_threshold: 0.7,
            near_duplicate_file_threshold: 0.7,
            related_file_threshold: 0.3,
            max_function_lines: 30,
            max_file_lines: 300,
            max_params: 4,
            min_comment_ratio: 0.1,
            max_line_chars: 100,
            max_compare_lines: 400,
            max_pairs_per_name: 64,
        }
    }
}

// -----------
// Scan inputs
// -----------

/// One `(relative path, raw text)` pair handed over by the discovery
/// collaborator. Already filtered: no binaries, no ignored files.
#[derive(Debug, Clone)]
pub struct SourceInput {
    pub path: String,
    pub text: String,
}

impl SourceInput {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// A scanned file, alive only for the duration of one analysis pass.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: String,
    pub text: String,
    pub lines: usize,
    pub lang: String,
}

/// Which signature table produced an extraction match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    Component,
    Hook,
    Function,
    Class,
}

/// A named function-like span extracted from a `SourceUnit`.
///
/// Many units may share a name across files; that is a signal, not an
/// error. Derived data, owned by the extraction step.
#[derive(Debug, Clone)]
pub struct FunctionUnit {
    pub name: String,
    pub family: PatternFamily,
    pub file: String,
    /// 1-indexed line of the signature.
    pub start_line: usize,
    pub body: String,
    pub normalized_body: String,
    pub params: Vec<String>,
}

impl FunctionUnit {
    /// Body length in lines.
    pub fn body_lines(&self) -> usize {
        self.body.lines().count()
    }
}

// ---------------
// Per-file scores
// ---------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityScore {
    /// Base 1 plus one per decision point; never below 1.
    pub cyclomatic: usize,
    pub cognitive: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalsteadMetrics {
    pub distinct_operators: usize,
    pub distinct_operands: usize,
    pub total_operators: usize,
    pub total_operands: usize,
    /// 0.0 (never NaN or infinite) when either vocabulary is empty.
    pub volume: f64,
    pub difficulty: f64,
    pub effort: f64,
}

impl HalsteadMetrics {
    pub fn zero() -> Self {
        Self {
            distinct_operators: 0,
            distinct_operands: 0,
            total_operators: 0,
            total_operands: 0,
            volume: 0.0,
            difficulty: 0.0,
            effort: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintainabilityRating {
    HighlyMaintainable,
    ModeratelyMaintainable,
    DifficultToMaintain,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintainabilityIndex {
    /// Clamped to [0, 100]; neutral 50.0 when synthesis degenerates.
    pub score: f64,
    pub rating: MaintainabilityRating,
}

// --------
// Findings
// --------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Verbatim repeated block within a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateBlockFinding {
    pub path: String,
    /// 1-indexed first content line of the earliest occurrence.
    pub first_line: usize,
    pub count: usize,
    /// First non-blank line of the block, trimmed.
    pub label: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateReason {
    /// Bodies are near-identical on their own.
    Implementation,
    /// Bodies are similar and share call/variable context.
    Context,
}

/// Near-identical function implementation across two files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateFunctionFinding {
    pub name: String,
    pub left: String,
    pub right: String,
    pub similarity: f64,
    pub reason: DuplicateReason,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSimilarityKind {
    /// Above the near-duplicate threshold: flagged as a defect.
    NearDuplicate,
    /// In the related band: a hint, not a defect.
    Related,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSimilarity {
    pub left: String,
    pub right: String,
    pub similarity: f64,
    pub kind: FileSimilarityKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmellKind {
    DuplicateBlocks,
    LongParameterList,
    LongFunction,
    LongFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSmell {
    pub kind: SmellKind,
    pub path: String,
    pub detail: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    LineLength,
    NamingConvention,
    EmptyCatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeViolation {
    pub kind: ViolationKind,
    pub path: String,
    pub detail: String,
}

// -----------
// Aggregation
// -----------

/// Project-wide histogram over `cyclomatic + cognitive` totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityDistribution {
    /// total <= 10
    pub low: usize,
    /// total <= 20
    pub medium: usize,
    /// total <= 30
    pub high: usize,
    /// total > 30
    pub very_high: usize,
}

impl ComplexityDistribution {
    pub fn files(&self) -> usize {
        self.low + self.medium + self.high + self.very_high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Organization,
    Complexity,
    Documentation,
    BestPractices,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub text: String,
}

// -------
// Receipt
// -------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    Partial,
}

/// Per-file quality row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileQuality {
    pub path: String,
    pub lang: String,
    pub lines: usize,
    pub comment_ratio: f64,
    pub complexity: ComplexityScore,
    pub halstead: HalsteadMetrics,
    pub maintainability: MaintainabilityIndex,
}

/// Project-level roll-up of size and structure metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualitySummary {
    pub files: usize,
    pub total_lines: usize,
    pub total_functions: usize,
    pub avg_function_length: f64,
    pub max_function_length: usize,
    pub functions_over_limit: usize,
    pub files_over_limit: usize,
    pub mean_comment_ratio: f64,
    /// Mean of per-file maintainability scores, re-rated.
    pub maintainability: MaintainabilityIndex,
}

/// The consumable report model handed to the rendering collaborator.
///
/// Recomputed fully on every run; entities have no identity beyond one
/// pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReceipt {
    pub schema_version: u32,
    pub status: AnalysisStatus,
    pub warnings: Vec<String>,
    /// Sorted by complexity total descending, then path.
    pub files: Vec<FileQuality>,
    pub distribution: ComplexityDistribution,
    pub summary: QualitySummary,
    pub duplicate_blocks: Vec<DuplicateBlockFinding>,
    pub duplicate_functions: Vec<DuplicateFunctionFinding>,
    pub file_similarities: Vec<FileSimilarity>,
    pub smells: Vec<CodeSmell>,
    pub violations: Vec<PracticeViolation>,
    pub suggestions: Vec<Suggestion>,
}
