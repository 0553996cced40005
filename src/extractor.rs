use crate::error::ExtractError;
use crate::schema::Schema;
use crate::types::{ExtractConfig, FieldPolicy, Row};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Pulls the schema columns out of one listing document
pub struct RecordExtractor {
    schema: Arc<Schema>,
    config: ExtractConfig,
}

impl RecordExtractor {
    pub fn new(schema: Arc<Schema>, config: ExtractConfig) -> Self {
        RecordExtractor { schema, config }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Read, parse and flatten a single JSON file
    pub fn extract_file(&self, path: &Path) -> Result<Row, ExtractError> {
        let mut content = std::fs::read(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document: Value = match simd_json::serde::from_slice(&mut content) {
            Ok(document) => document,
            // simd-json rejects numbers outside u64/f64 range and leaves the
            // buffer rewritten, so read the file again for serde_json
            Err(_) => Self::parse_fallback(path)?,
        };

        self.extract_document(&document, path)
    }

    fn parse_fallback(path: &Path) -> Result<Value, ExtractError> {
        let content = std::fs::read(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_slice(&content).map_err(|e| ExtractError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Flatten an already parsed document; `path` is only used for error reporting
    pub fn extract_document(&self, document: &Value, path: &Path) -> Result<Row, ExtractError> {
        let data = match document.get(&self.config.root_key) {
            Some(data) if !data.is_null() => data,
            _ => {
                return Err(ExtractError::MissingTopLevelKey {
                    path: path.to_path_buf(),
                    key: self.config.root_key.clone(),
                })
            }
        };

        let mut values = Vec::with_capacity(self.schema.len());
        for field in self.schema.columns() {
            match self.lookup(data, field) {
                Ok(value) => values.push(value),
                Err(segment) => match self.config.field_policy {
                    // The columns gathered so far are discarded with the document
                    FieldPolicy::Abort => {
                        return Err(ExtractError::FieldLookup {
                            path: path.to_path_buf(),
                            field: field.clone(),
                            segment,
                        })
                    }
                    FieldPolicy::Independent => values.push(Value::Null),
                },
            }
        }

        Ok(Row::new(values))
    }

    /// Follow the detail path down to `field`.
    ///
    /// Every step must land on an object; the name of the step that didn't is
    /// returned as the error. A missing leaf is just null.
    fn lookup(&self, data: &Value, field: &str) -> Result<Value, String> {
        let mut node = data;
        for segment in &self.config.detail_path {
            node = match node.get(segment) {
                Some(next) if next.is_object() => next,
                _ => return Err(segment.clone()),
            };
        }

        match node {
            Value::Object(bean) => Ok(bean.get(field).cloned().unwrap_or(Value::Null)),
            _ => Err(field.to_string()),
        }
    }
}
