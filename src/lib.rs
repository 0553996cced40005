//! # listing-melt - flatten property listings into one table
//!
//! Reads a directory of per-property JSON documents, pulls a fixed set of
//! columns out of `propertyDetailInfoBeanData.propertyDetail.detailBean`, and
//! writes every listing as one CSV row.
//!
//! ## Modules
//!
//! - **schema**: the ordered output columns
//! - **extractor**: one document in, one row (or a typed error) out
//! - **pipeline**: batching, the worker pool, and CSV output
//!
//! ## Quick Start
//!
//! ```rust
//! use listing_melt::{ExtractConfig, RecordExtractor, Schema};
//! use serde_json::json;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = json!({
//!     "propertyDetailInfoBeanData": {
//!         "propertyDetail": {
//!             "detailBean": {"price": 5500000, "bedrooms": "3"}
//!         }
//!     }
//! });
//!
//! let schema = Arc::new(Schema::new(["price", "bedrooms", "facing"]));
//! let extractor = RecordExtractor::new(schema, ExtractConfig::default());
//! let row = extractor.extract_document(&doc, Path::new("listing.json"))?;
//!
//! // row = [5500000, "3", null]
//! assert!(row.values()[2].is_null());
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod schema;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{ConfigError, ExtractError};
pub use extractor::RecordExtractor;
pub use pipeline::{Dispatcher, PipelineConfig, RunSummary, TableWriter};
pub use schema::{Schema, PROPERTY_DETAIL_COLUMNS};
pub use types::{ExtractConfig, FieldPolicy, Row, Table};

/// Main entry point: melt every listing in `input_dir` into one CSV at `output_path`
/// using the default columns, batch size and worker count
pub fn melt_directory<P: AsRef<Path>, Q: AsRef<Path>>(input_dir: P, output_path: Q) -> Result<RunSummary> {
    let config = PipelineConfig::new(input_dir.as_ref(), output_path.as_ref());
    pipeline::run(&config, Arc::new(Schema::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_melt_directory() {
        let input = tempfile::tempdir().unwrap();
        let doc = json!({
            "propertyDetailInfoBeanData": {
                "propertyDetail": {
                    "detailBean": {"localityName": "Sector 54", "price": 12000000}
                }
            }
        });
        std::fs::write(input.path().join("p1.json"), doc.to_string()).unwrap();
        let output = input.path().join("listings.csv");

        let summary = melt_directory(input.path(), &output).unwrap();
        assert_eq!(summary.rows_written, 1);

        let csv = std::fs::read_to_string(&output).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("Sector 54,,,12000000,"));
        assert_eq!(row.split(',').count(), PROPERTY_DETAIL_COLUMNS.len());
    }
}
