use crate::types::Table;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a result table as CSV: a header row, then one line per row, no index column
pub struct TableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl TableWriter<File> {
    /// Create (or truncate) the output file, creating parent directories as needed
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        TableWriter {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        self.writer
            .write_record(table.schema().columns())
            .context("Failed to write header")?;

        for row in table.rows() {
            for value in row.values() {
                self.writer
                    .write_field(render_cell(value).as_bytes())
                    .context("Failed to write row")?;
            }
            // An empty record terminates the fields written above
            self.writer
                .write_record(None::<&[u8]>)
                .context("Failed to write row")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush writer: {}", e.error()))
    }
}

/// Text form of one cell: null is empty, strings are raw, everything else is JSON
pub fn render_cell(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
