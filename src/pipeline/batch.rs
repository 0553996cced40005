use crate::extractor::RecordExtractor;
use crate::types::Row;
use log::{debug, info, warn};
use std::path::Path;

/// Rows produced by one batch, in input order
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub rows: Vec<Row>,

    /// Files that produced no row
    pub skipped: usize,
}

/// Extract every file of a batch in order, skipping the ones that fail
pub fn process_batch<P: AsRef<Path>>(extractor: &RecordExtractor, paths: &[P]) -> BatchOutput {
    let mut output = BatchOutput {
        rows: Vec::with_capacity(paths.len()),
        skipped: 0,
    };

    for path in paths {
        let path = path.as_ref();
        match extractor.extract_file(path) {
            Ok(row) => {
                debug!("Processing done for {}", path.display());
                output.rows.push(row);
            }
            Err(e) => {
                warn!("Skipping file: {}", e);
                output.skipped += 1;
            }
        }
    }

    info!("Batch processing done for {} files", output.rows.len());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use crate::types::ExtractConfig;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_failures_are_skipped_and_order_kept() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: String| {
            let path = dir.path().join(name);
            std::fs::write(&path, body).unwrap();
            path
        };

        let paths = vec![
            write(
                "1.json",
                json!({"propertyDetailInfoBeanData": {"propertyDetail": {"detailBean": {"propertyId": "first"}}}})
                    .to_string(),
            ),
            write("2.json", "not json".to_string()),
            write("3.json", json!({"unrelated": 1}).to_string()),
            write(
                "4.json",
                json!({"propertyDetailInfoBeanData": {"propertyDetail": {"detailBean": {"propertyId": "second"}}}})
                    .to_string(),
            ),
        ];

        let extractor = RecordExtractor::new(
            Arc::new(Schema::new(["propertyId"])),
            ExtractConfig::default(),
        );
        let output = process_batch(&extractor, &paths);

        assert_eq!(output.skipped, 2);
        assert_eq!(output.rows.len(), 2);
        assert_eq!(output.rows[0].values(), &[json!("first")]);
        assert_eq!(output.rows[1].values(), &[json!("second")]);
    }

    #[test]
    fn test_empty_batch() {
        let extractor = RecordExtractor::new(Arc::new(Schema::default()), ExtractConfig::default());
        let paths: Vec<&Path> = Vec::new();

        let output = process_batch(&extractor, &paths);

        assert!(output.rows.is_empty());
        assert_eq!(output.skipped, 0);
    }
}
