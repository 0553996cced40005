//! Directory-to-CSV pipeline
//!
//! Lists the `.json` files of a directory, extracts them in parallel batches
//! and writes the merged table as a single CSV file.

pub mod batch;
pub mod dispatch;
pub mod writer;

pub use batch::{process_batch, BatchOutput};
pub use dispatch::{BatchFailure, DispatchOutcome, Dispatcher, DEFAULT_BATCH_SIZE, DEFAULT_WORKER_COUNT};
pub use writer::{render_cell, TableWriter};

use crate::extractor::RecordExtractor;
use crate::schema::Schema;
use crate::types::ExtractConfig;
use anyhow::{Context, Result};
use log::{error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Everything a run needs
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub batch_size: usize,
    pub worker_count: usize,
    pub extract: ExtractConfig,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            worker_count: DEFAULT_WORKER_COUNT,
            extract: ExtractConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub files_found: usize,
    pub rows_written: usize,
    pub files_skipped: usize,
    pub failed_batches: Vec<BatchFailure>,
    pub elapsed_ms: u64,
}

/// All regular files in `dir` whose name ends in `.json`, sorted by name
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        let is_json = entry.file_name().to_string_lossy().ends_with(".json");
        if is_json && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Extract every listing in `config.input_dir` and write them to `config.output_path`
pub fn run(config: &PipelineConfig, schema: Arc<Schema>) -> Result<RunSummary> {
    let start = Instant::now();

    let files = list_json_files(&config.input_dir)?;
    info!(
        "Found {} JSON files in {}",
        files.len(),
        config.input_dir.display()
    );

    let extractor = RecordExtractor::new(schema, config.extract.clone());
    let dispatcher = Dispatcher::new(extractor, config.batch_size, config.worker_count)?;
    let outcome = dispatcher.run(&files)?;

    let mut writer = TableWriter::create(&config.output_path)?;
    writer.write_table(&outcome.table)?;
    writer.flush()?;

    if !outcome.failed_batches.is_empty() {
        let lost: usize = outcome.failed_batches.iter().map(|f| f.len).sum();
        error!(
            "{} batches failed; {} files were not processed",
            outcome.failed_batches.len(),
            lost
        );
    }

    let summary = RunSummary {
        files_found: files.len(),
        rows_written: outcome.table.len(),
        files_skipped: outcome.skipped,
        failed_batches: outcome.failed_batches,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Data processing complete. Output saved to {} ({} rows), took {} ms",
        config.output_path.display(),
        summary.rows_written,
        summary.elapsed_ms
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_list_json_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", "{}");
        write(dir.path(), "a.json", "{}");
        write(dir.path(), "notes.txt", "");
        write(dir.path(), "c.json.bak", "");
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = list_json_files(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("a.json"), dir.path().join("b.json")]
        );
    }

    #[test]
    fn test_missing_input_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_json_files(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_run_end_to_end() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let bean: serde_json::Map<String, serde_json::Value> = Schema::default()
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), json!(format!("v{}", i))))
            .collect();

        write(
            input.path(),
            "1.json",
            &json!({"propertyDetailInfoBeanData": {"propertyDetail": {"detailBean": bean}}}).to_string(),
        );
        write(input.path(), "2.json", &json!({"error": "not found"}).to_string());
        write(input.path(), "3.json", "{\"truncated\": [");

        let mut config = PipelineConfig::new(input.path(), output.path().join("listings.csv"));
        config.batch_size = 2;
        config.worker_count = 2;

        let summary = run(&config, Arc::new(Schema::default())).unwrap();

        assert_eq!(summary.files_found, 3);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(summary.files_skipped, 2);
        assert!(summary.failed_batches.is_empty());

        let csv = std::fs::read_to_string(&config.output_path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], Schema::default().columns().join(","));
        let expected: Vec<String> = (0..33).map(|i| format!("v{}", i)).collect();
        assert_eq!(lines[1], expected.join(","));
    }

    #[test]
    fn test_run_empty_directory_writes_headers() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("out.csv");
        let config = PipelineConfig::new(input.path(), &output);

        let summary = run(&config, Arc::new(Schema::new(["price", "url"]))).unwrap();

        assert_eq!(summary.files_found, 0);
        assert_eq!(summary.rows_written, 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "price,url\n");
    }

    #[test]
    fn test_run_rejects_zero_workers() {
        let input = tempfile::tempdir().unwrap();
        let mut config = PipelineConfig::new(input.path(), input.path().join("out.csv"));
        config.worker_count = 0;

        let err = run(&config, Arc::new(Schema::default())).unwrap_err();

        assert_eq!(
            err.downcast_ref::<crate::error::ConfigError>(),
            Some(&crate::error::ConfigError::ZeroWorkers)
        );
    }
}
