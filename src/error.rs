use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Must read from a CSV file: {}", .0.display())]
    NotCsv(PathBuf),

    #[error("Failed to open input file {}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Column '{column}' not found in header of {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow { line: u64, expected: u64, found: u64 },

    #[error("Failed to write {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV: {0}")]
    Csv(csv::Error),

    #[error("Invalid column pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to serialize run manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl ConvertError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

/// Row-length mismatches get their own variant; everything else stays a CSV error.
impl From<csv::Error> for ConvertError {
    fn from(err: csv::Error) -> Self {
        if let csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } = err.kind()
        {
            return Self::MalformedRow {
                line: pos.as_ref().map_or(0, |p| p.line()),
                expected: *expected_len,
                found: *len,
            };
        }
        Self::Csv(err)
    }
}
