// Run configuration. Every constant the parser relies on lives here so it can
// be overridden in tests instead of being baked into the extractors.
use crate::classifier::Classifier;
use chrono::Weekday;
use std::path::PathBuf;

/// Maximum number of entries kept per list-shaped section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub categories: usize,
    pub tags: usize,
    pub tag_combinations: usize,
    pub top_events: usize,
    pub title_keywords: usize,
    pub red_ocean: usize,
    pub blue_ocean: usize,
    pub learning_submarket: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            categories: 10,
            tags: 9,
            tag_combinations: 3,
            top_events: 10,
            title_keywords: 8,
            red_ocean: 6,
            blue_ocean: 5,
            learning_submarket: 8,
        }
    }
}

/// Values used when a report lacks the corresponding line.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefaults {
    pub total: u32,
    pub date_range: String,
    pub days: u32,
    pub avg_interval: f64,
    pub avg_monthly: f64,
    pub most_popular_day: Weekday,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            total: 50,
            date_range: "2025-11-01 至 2026-01-01".to_string(),
            days: 90,
            avg_interval: 2.0,
            avg_monthly: 15.0,
            most_popular_day: Weekday::Sat,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    pub classifier: Classifier,
    pub limits: ExtractionLimits,
    pub defaults: FieldDefaults,
}

/// Names used in the generated TypeScript module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    pub type_import: String,
    pub type_name: String,
    pub const_name: String,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            type_import: "../types/report".to_string(),
            type_name: "ReportData".to_string(),
            const_name: "reportsData".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    /// Without the leading dot.
    pub extension: String,
    pub json_output: Option<PathBuf>,
    pub summary_csv: Option<PathBuf>,
    pub dry_run: bool,
    pub parser: ParserConfig,
    pub emitter: EmitterConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data_report"),
            output: PathBuf::from("app/data/reportsData.ts"),
            extension: "txt".to_string(),
            json_output: None,
            summary_csv: None,
            dry_run: false,
            parser: ParserConfig::default(),
            emitter: EmitterConfig::default(),
        }
    }
}
