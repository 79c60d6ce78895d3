use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "submission_splitter",
    about = "Parse and clean student submissions."
)]
pub struct Cli {
    /// The filename of the CSV file to read data from.
    #[arg(long, default_value = "submission_metadata.csv")]
    pub filename: PathBuf,

    /// The name of the column in the CSV file that contains the submission IDs.
    #[arg(long, default_value = "Submission ID")]
    pub id_column: String,

    /// The path to the directory where the output files will be written.
    #[arg(short, long, default_value = "submissions")]
    pub output: PathBuf,

    /// Column whose value becomes each `<id>.txt`. Without it, every
    /// question response is collected into `<id>/written_answers.txt`.
    #[arg(long)]
    pub content_column: Option<String>,

    /// Write a JSON summary of the run to this path.
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// One `<id>.txt` holding a single column's value.
    Column { content_column: String },
    /// One `<id>/written_answers.txt` holding every question response.
    Answers,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub id_column: String,
    pub output_dir: PathBuf,
    pub layout: Layout,
    pub manifest_path: Option<PathBuf>,
}

impl Config {
    pub fn content_column(&self) -> Option<&str> {
        match &self.layout {
            Layout::Column { content_column } => Some(content_column),
            Layout::Answers => None,
        }
    }

    pub fn is_csv_input(&self) -> bool {
        self.input_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let layout = match cli.content_column {
            Some(content_column) => Layout::Column { content_column },
            None => Layout::Answers,
        };
        Self {
            input_path: cli.filename,
            id_column: cli.id_column,
            output_dir: cli.output,
            layout,
            manifest_path: cli.manifest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from(Cli::try_parse_from(["submission_splitter"]).unwrap());
        assert_eq!(config.input_path, PathBuf::from("submission_metadata.csv"));
        assert_eq!(config.id_column, "Submission ID");
        assert_eq!(config.output_dir, PathBuf::from("submissions"));
        assert_eq!(config.layout, Layout::Answers);
        assert!(config.manifest_path.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "submission_splitter",
            "--filename",
            "export.csv",
            "--id-column",
            "SubmissionID",
            "-o",
            "out",
            "--content-column",
            "Text",
            "--manifest",
            "run.json",
        ])
        .unwrap();
        let config = Config::from(cli);
        assert_eq!(config.input_path, PathBuf::from("export.csv"));
        assert_eq!(config.id_column, "SubmissionID");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.content_column(), Some("Text"));
        assert_eq!(config.manifest_path, Some(PathBuf::from("run.json")));
    }

    #[test]
    fn test_long_output_flag() {
        let cli = Cli::try_parse_from(["submission_splitter", "--output", "graded"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("graded"));
    }

    #[test]
    fn test_csv_extension_check() {
        let mut config = Config::from(Cli::try_parse_from(["submission_splitter"]).unwrap());
        assert!(config.is_csv_input());
        config.input_path = PathBuf::from("EXPORT.CSV");
        assert!(config.is_csv_input());
        config.input_path = PathBuf::from("export.xlsx");
        assert!(!config.is_csv_input());
        config.input_path = PathBuf::from("csv");
        assert!(!config.is_csv_input());
    }
}
