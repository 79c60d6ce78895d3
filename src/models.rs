use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFile {
    pub identifier: String,
    pub path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub files: Vec<WrittenFile>,
    pub skipped_rows: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    pub input_file: PathBuf,
    pub id_column: String,
    pub content_column: Option<String>,
    pub output_dir: PathBuf,
    pub processing_timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub metadata: Metadata,
    pub files: Vec<WrittenFile>,
    pub skipped_rows: usize,
}
