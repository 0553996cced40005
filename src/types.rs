use crate::schema::Schema;
use serde_json::Value;
use std::sync::Arc;

/// One flattened listing - one value per schema column, in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn is_all_null(&self) -> bool {
        self.values.iter().all(Value::is_null)
    }
}

/// The merged result of a run: a header plus rows in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

impl Table {
    /// A table with headers and no rows
    pub fn empty(schema: Arc<Schema>) -> Self {
        Table {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(schema: Arc<Schema>, rows: Vec<Row>) -> Self {
        Table { schema, rows }
    }

    /// Append rows after the existing ones, keeping their order
    pub fn extend(&mut self, rows: Vec<Row>) {
        self.rows.extend(rows);
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a cell by row index and column name
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.schema.position(column)?;
        self.rows.get(row)?.get(index)
    }
}

/// What to do when the nested detail path cannot be followed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// Stop at the first failing column and drop the whole document
    #[default]
    Abort,
    /// Fill the failing column with null and keep going
    Independent,
}

/// Where to find the columns inside a listing document
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Top-level key that must be present for a document to count
    pub root_key: String,

    /// Object path below the root key that holds the columns
    pub detail_path: Vec<String>,

    pub field_policy: FieldPolicy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            root_key: String::from("propertyDetailInfoBeanData"),
            detail_path: vec![String::from("propertyDetail"), String::from("detailBean")],
            field_policy: FieldPolicy::default(),
        }
    }
}
