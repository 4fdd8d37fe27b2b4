use crate::config::EmitterConfig;
use crate::error::PipelineError;
use crate::types::{ReportIndexRow, ReportRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tabled::{settings::Style, Table};
use tempfile::NamedTempFile;

// `"key":` at the start of a pretty-printed JSON line
static RE_QUOTED_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^(\s*)"([A-Za-z_$][A-Za-z0-9_$]*)":"#).expect("valid regex"));

/// Drop the quotes around object keys that are plain identifiers.
pub fn unquote_keys(json: &str) -> String {
    RE_QUOTED_KEY.replace_all(json, "${1}${2}:").into_owned()
}

/// Render the TypeScript module holding every record, each preceded by a
/// comment naming its title.
pub fn render_typescript(reports: &[ReportRecord], emitter: &EmitterConfig) -> Result<String, PipelineError> {
    let mut code = format!(
        "import {{ {} }} from '{}';\n\n",
        emitter.type_name, emitter.type_import
    );
    code.push_str(&format!(
        "export const {}: {}[] = [\n",
        emitter.const_name, emitter.type_name
    ));
    for (idx, report) in reports.iter().enumerate() {
        let json = serde_json::to_string_pretty(report).map_err(|source| PipelineError::Serialize {
            id: report.id.clone(),
            source,
        })?;
        code.push_str(&format!("  // {}\n", report.title));
        code.push_str("  ");
        code.push_str(&unquote_keys(&json));
        code.push_str(if idx + 1 < reports.len() { ",\n\n" } else { "\n" });
    }
    code.push_str("];\n");
    Ok(code)
}

/// Replace `path` with `contents`. The data goes to a temporary file next to
/// the target first, so a failed write leaves the old file in place.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), PipelineError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| PipelineError::write(path, e))?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| PipelineError::write(path, e))?;
    tmp.write_all(contents.as_ref())
        .map_err(|e| PipelineError::write(path, e))?;
    tmp.persist(path)
        .map_err(|e| PipelineError::write(path, e.error))?;
    Ok(())
}

pub fn render_json<T: Serialize>(id: &str, value: &T) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(value).map_err(|source| PipelineError::Serialize {
        id: id.to_string(),
        source,
    })
}

/// CSV bytes with a header row taken from `T`'s serde names. `path` only
/// labels errors; nothing is written here.
pub fn render_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<Vec<u8>, PipelineError> {
    let to_err = |source| PipelineError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for r in rows {
        wtr.serialize(r).map_err(to_err)?;
    }
    wtr.into_inner()
        .map_err(|e| PipelineError::write(path, e.into_error()))
}

/// Print the report listing as a markdown table.
pub fn print_report_index(rows: &[ReportIndexRow]) {
    if rows.is_empty() {
        println!("(no reports)\n");
        return;
    }
    let table = Table::new(rows.to_vec()).with(Style::markdown()).to_string();
    println!("{table}\n");
}
