// Discovery -> per-file parse -> emit. Fully sequential: each file is read
// and parsed before the next one is opened, and the output is written once
// at the end.
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::loader::{discover_reports, load_report};
use crate::output::{render_csv, render_json, render_typescript, write_atomic};
use crate::reports::{build_index, build_report};
use crate::types::ReportRecord;
use crate::util::format_int;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file that was discovered but left out of the output.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub discovered: usize,
    pub reports: Vec<ReportRecord>,
    pub skipped: Vec<SkippedFile>,
    /// `false` for dry runs.
    pub written: bool,
}

pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let files = discover_reports(&config.input_dir, &config.extension)?;
    if files.is_empty() {
        return Err(PipelineError::NoInputFiles {
            path: config.input_dir.clone(),
            extension: config.extension.trim_start_matches('.').to_string(),
        });
    }

    info!(
        count = files.len(),
        dir = %config.input_dir.display(),
        "Found report files"
    );
    for path in &files {
        debug!(file = %path.display(), "Queued");
    }

    let mut reports: Vec<ReportRecord> = Vec::new();
    let mut skipped: Vec<SkippedFile> = Vec::new();
    for path in &files {
        let file = match load_report(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping unreadable report");
                skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let record = build_report(&file.content, &file.filename, &config.parser);
        info!(
            file = %file.path.display(),
            title = %record.title,
            total = %format_int(record.overview.total),
            date_range = %record.overview.date_range,
            "Parsed report"
        );
        reports.push(record);
    }

    if reports.is_empty() {
        return Err(PipelineError::NoReportsParsed {
            attempted: files.len(),
        });
    }

    // Render everything before touching disk so a serialization failure
    // leaves every previous artifact in place.
    let code = render_typescript(&reports, &config.emitter)?;
    let mut extras: Vec<(&Path, Vec<u8>)> = Vec::new();
    if let Some(path) = &config.json_output {
        extras.push((path.as_path(), render_json("reports", &reports)?.into_bytes()));
    }
    if let Some(path) = &config.summary_csv {
        extras.push((path.as_path(), render_csv(path, &build_index(&reports))?));
    }

    if config.dry_run {
        info!(reports = reports.len(), "Dry run, nothing written");
    } else {
        // The report module is replaced last, only once every export landed.
        for (path, bytes) in &extras {
            write_atomic(path, bytes)?;
            info!(path = %path.display(), "Wrote export");
        }
        write_atomic(&config.output, &code)?;
        info!(path = %config.output.display(), reports = reports.len(), "Wrote report module");
    }

    Ok(RunSummary {
        discovered: files.len(),
        reports,
        skipped,
        written: !config.dry_run,
    })
}
