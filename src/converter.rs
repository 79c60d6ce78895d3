use crate::answers;
use crate::config::{Config, Layout};
use crate::error::ConvertError;
use crate::models::{ConversionSummary, Metadata, RunManifest, WrittenFile};
use crate::utils;
use chrono::Utc;
use csv::{Reader, ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const ANSWERS_FILE_NAME: &str = "written_answers.txt";

pub struct Converter;

impl Converter {
    pub fn run(config: &Config) -> Result<ConversionSummary, ConvertError> {
        if !config.is_csv_input() {
            return Err(ConvertError::NotCsv(config.input_path.clone()));
        }

        let summary = match &config.layout {
            Layout::Column { content_column } => Self::convert(
                &config.input_path,
                &config.id_column,
                content_column,
                &config.output_dir,
            )?,
            Layout::Answers => {
                Self::convert_answers(&config.input_path, &config.id_column, &config.output_dir)?
            }
        };

        if let Some(manifest_path) = &config.manifest_path {
            Self::write_manifest(manifest_path, config, &summary)?;
            info!("Manifest written to {}", manifest_path.display());
        }

        Ok(summary)
    }

    /// Writes `<output_dir>/<id>.txt` for every row, holding the raw value of
    /// `content_column`. Later rows overwrite earlier rows with the same id.
    pub fn convert(
        input_path: &Path,
        id_column: &str,
        content_column: &str,
        output_dir: &Path,
    ) -> Result<ConversionSummary, ConvertError> {
        let mut reader = Self::open(input_path)?;
        let headers = reader.headers()?.clone();
        let id_idx = Self::column_index(&headers, id_column, input_path)?;
        let content_idx = Self::column_index(&headers, content_column, input_path)?;

        utils::ensure_directory_exists(output_dir)
            .map_err(|e| ConvertError::output(output_dir, e))?;

        let mut tally = Tally::default();
        for result in reader.records() {
            let record = result?;
            let Some(name) = tally.claim(&record, id_idx) else {
                continue;
            };

            let path = output_dir.join(format!("{name}.txt"));
            let content = record.get(content_idx).unwrap_or_default();
            utils::write_atomic(&path, content.as_bytes())
                .map_err(|e| ConvertError::output(&path, e))?;
            debug!("Wrote {} ({} bytes)", path.display(), content.len());
            tally.record(name, path);
        }

        Ok(tally.finish())
    }

    /// Writes `<output_dir>/<id>/written_answers.txt` for every row, one
    /// banner block per id or question-response column.
    pub fn convert_answers(
        input_path: &Path,
        id_column: &str,
        output_dir: &Path,
    ) -> Result<ConversionSummary, ConvertError> {
        let mut reader = Self::open(input_path)?;
        let headers = reader.headers()?.clone();
        let id_idx = Self::column_index(&headers, id_column, input_path)?;

        let pattern = answers::column_pattern(id_column)?;
        let selected: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| pattern.is_match(name))
            .map(|(i, _)| i)
            .collect();
        let width = answers::banner_width(selected.iter().map(|&i| &headers[i]));
        debug!("Selected {} columns, banner width {}", selected.len(), width);

        utils::ensure_directory_exists(output_dir)
            .map_err(|e| ConvertError::output(output_dir, e))?;

        let mut tally = Tally::default();
        for result in reader.records() {
            let record = result?;
            let Some(name) = tally.claim(&record, id_idx) else {
                continue;
            };

            let submission_dir = output_dir.join(&name);
            utils::ensure_directory_exists(&submission_dir)
                .map_err(|e| ConvertError::output(&submission_dir, e))?;

            let body = answers::render(
                selected
                    .iter()
                    .map(|&i| (&headers[i], record.get(i).unwrap_or_default())),
                width,
            );
            let path = submission_dir.join(ANSWERS_FILE_NAME);
            utils::write_atomic(&path, body.as_bytes())
                .map_err(|e| ConvertError::output(&path, e))?;
            tally.record(name, path);
        }

        Ok(tally.finish())
    }

    pub fn write_manifest(
        path: &Path,
        config: &Config,
        summary: &ConversionSummary,
    ) -> Result<(), ConvertError> {
        let manifest = RunManifest {
            metadata: Metadata {
                input_file: config.input_path.clone(),
                id_column: config.id_column.clone(),
                content_column: config.content_column().map(str::to_string),
                output_dir: config.output_dir.clone(),
                processing_timestamp: Utc::now().to_rfc3339(),
            },
            files: summary.files.clone(),
            skipped_rows: summary.skipped_rows,
        };
        let json = serde_json::to_string_pretty(&manifest)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            utils::ensure_directory_exists(parent)
                .map_err(|e| ConvertError::output(parent, e))?;
        }
        utils::write_atomic(path, json.as_bytes()).map_err(|e| ConvertError::output(path, e))
    }

    fn open(input_path: &Path) -> Result<Reader<File>, ConvertError> {
        let not_found = |source: std::io::Error| ConvertError::InputNotFound {
            path: input_path.to_path_buf(),
            source,
        };
        // Directories open fine on Linux and only fail on the first read.
        if !std::fs::metadata(input_path).map_err(not_found)?.is_file() {
            return Err(not_found(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let file = File::open(input_path).map_err(not_found)?;
        Ok(ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(file))
    }

    fn column_index(
        headers: &StringRecord,
        column: &str,
        input_path: &Path,
    ) -> Result<usize, ConvertError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ConvertError::MissingColumn {
                column: column.to_string(),
                path: input_path.to_path_buf(),
            })
    }
}

/// Running bookkeeping for one conversion: skipped rows and names already used.
#[derive(Default)]
struct Tally {
    summary: ConversionSummary,
    seen: HashSet<String>,
}

impl Tally {
    fn claim(&mut self, record: &StringRecord, id_idx: usize) -> Option<String> {
        let raw = record.get(id_idx).unwrap_or_default();
        let name = utils::sanitize_filename(raw);
        match &name {
            None => {
                let line = record.position().map_or(0, |p| p.line());
                debug!("Skipping row at line {} without an identifier", line);
                self.summary.skipped_rows += 1;
            }
            Some(sanitized) if sanitized != raw.trim() => {
                debug!("Identifier '{}' sanitized to '{}'", raw, sanitized);
            }
            Some(_) => {}
        }
        name
    }

    fn record(&mut self, identifier: String, path: PathBuf) {
        if self.seen.insert(identifier.clone()) {
            self.summary.files.push(WrittenFile { identifier, path });
        } else {
            warn!(
                "Duplicate identifier '{}': {} overwritten by a later row",
                identifier,
                path.display()
            );
        }
    }

    fn finish(self) -> ConversionSummary {
        info!(
            "Number of submissions parsed: {} ({} rows skipped)",
            self.summary.files.len(),
            self.summary.skipped_rows
        );
        self.summary
    }
}
