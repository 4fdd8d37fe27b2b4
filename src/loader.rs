use crate::error::{PipelineError, ReportFileError};
use std::path::{Path, PathBuf};

/// A report export read into memory. Dropped once it has been parsed.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub path: PathBuf,
    pub filename: String,
    pub content: String,
}

/// Report files directly inside `dir` whose name ends in `.{extension}`,
/// sorted by filename. Subdirectories are not searched.
pub fn discover_reports(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, PipelineError> {
    let to_err = |source| PipelineError::InputDir {
        path: dir.to_path_buf(),
        source,
    };
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(to_err)? {
        let entry = entry.map_err(to_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(&suffix))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read a report as UTF-8 text.
pub fn load_report(path: &Path) -> Result<ReportFile, ReportFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ReportFile {
        path: path.to_path_buf(),
        filename,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn discovers_matching_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b_藝文.txt"), "b").unwrap();
        fs::write(dir.path().join("a_學習.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::write(dir.path().join("archive.txt.bak"), "skip").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let files = discover_reports(dir.path(), "txt").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_學習.txt", "b_藝文.txt"]);

        let dotted = discover_reports(dir.path(), ".txt").unwrap();
        assert_eq!(dotted, files);
    }

    #[test]
    fn empty_directory_yields_no_files() {
        let dir = TempDir::new().unwrap();
        assert!(discover_reports(dir.path(), "txt").unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = discover_reports(&missing, "txt").unwrap_err();
        assert!(matches!(err, PipelineError::InputDir { .. }));
    }

    #[test]
    fn load_reads_content_and_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("科技.txt");
        fs::write(&path, "活動總數: 7\n").unwrap();
        let file = load_report(&path).unwrap();
        assert_eq!(file.filename, "科技.txt");
        assert_eq!(file.content, "活動總數: 7\n");
        assert_eq!(file.path, path);
    }

    #[test]
    fn non_utf8_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0xffu8, 0xfe, 0x00, 0xc3]).unwrap();
        let err = load_report(&path).unwrap_err();
        assert!(err.to_string().contains("bad.txt"));
    }
}
