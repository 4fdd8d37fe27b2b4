use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a run. The output artifact is never touched when one
/// of these is returned before the write step.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input directory {}: {source}", .path.display())]
    InputDir { path: PathBuf, source: io::Error },

    #[error("No .{extension} report files found in {}", .path.display())]
    NoInputFiles { path: PathBuf, extension: String },

    #[error("None of the {attempted} report files could be parsed")]
    NoReportsParsed { attempted: usize },

    #[error("Failed to serialize report '{id}': {source}")]
    Serialize { id: String, source: serde_json::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to write CSV {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

impl PipelineError {
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }
}

/// A single report file that could not be used; the run skips it.
#[derive(Error, Debug)]
pub enum ReportFileError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = PipelineError::NoInputFiles {
            path: PathBuf::from("data_report"),
            extension: "txt".to_string(),
        };
        assert_eq!(err.to_string(), "No .txt report files found in data_report");

        let err = PipelineError::write(
            "out/reportsData.ts",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write out/reportsData.ts: denied");
    }

    #[test]
    fn read_error_keeps_io_kind() {
        let err = ReportFileError::Read {
            path: PathBuf::from("a.txt"),
            source: io::Error::new(io::ErrorKind::InvalidData, "not utf-8"),
        };
        assert_eq!(err.to_string(), "Failed to read a.txt: not utf-8");
        let ReportFileError::Read { source, .. } = err;
        assert_eq!(source.kind(), io::ErrorKind::InvalidData);
    }
}
