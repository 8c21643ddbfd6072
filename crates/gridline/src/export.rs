//! Flat-file (CSV) export.
//!
//! The export writes the visible columns of the derived rows: one header line
//! of column labels, then one line per row. Lines are joined with `\n` and
//! there is no trailing newline, so an empty grid exports just its header.
//!
//! # Quoting
//!
//! The default [`QuotePolicy::ByType`] decides quoting from the cell kind,
//! not its content: string cells are always wrapped in double quotes and
//! nothing is ever escaped. A string containing a comma, a quote or a line
//! break therefore produces a line that does not parse back into the right
//! number of fields. This matches the grid's established export format and
//! is kept as is.
//!
//! [`QuotePolicy::Rfc4180`] quotes fields only when needed and doubles
//! embedded quotes.
//!
//! Both policies go through one `csv` writer. A record whose only field is
//! empty comes out as `""`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::column::Column;
use crate::error::Result;
use crate::row::GridRow;
use crate::value::Value;

/// File name given to export artifacts unless configured otherwise.
pub const DEFAULT_FILE_NAME: &str = "data-export.csv";

/// MIME type of export artifacts.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// How cell values are quoted in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotePolicy {
    /// Quote every string cell, never escape, never quote other kinds.
    #[default]
    ByType,
    /// Quote when the content requires it and double embedded quotes.
    Rfc4180,
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the produced artifact.
    pub file_name: String,
    /// Quoting rule.
    pub quote: QuotePolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            file_name: DEFAULT_FILE_NAME.to_string(),
            quote: QuotePolicy::default(),
        }
    }
}

impl QuotePolicy {
    fn quote_style(self) -> csv::QuoteStyle {
        match self {
            QuotePolicy::ByType => csv::QuoteStyle::Never,
            QuotePolicy::Rfc4180 => csv::QuoteStyle::Necessary,
        }
    }

    fn field(self, value: &Value<'_>) -> String {
        match (self, value) {
            (QuotePolicy::ByType, Value::String(s)) => format!("\"{s}\""),
            _ => value.to_text(),
        }
    }
}

/// Renders rows as CSV text using [`QuotePolicy::ByType`].
///
/// ```
/// use gridline::{to_csv, Column, Record};
///
/// let rows = vec![Record::new().with("id", 1).with("name", "Ann")];
/// let id = Column::new("id", "ID");
/// let name = Column::new("name", "Name");
///
/// assert_eq!(to_csv(&rows, &[&id, &name]).unwrap(), "ID,Name\n1,\"Ann\"");
/// ```
pub fn to_csv<R: GridRow>(rows: &[R], columns: &[&Column]) -> Result<String> {
    write_csv(rows, columns, QuotePolicy::ByType)
}

fn write_csv<R: GridRow>(rows: &[R], columns: &[&Column], policy: QuotePolicy) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(policy.quote_style())
        .from_writer(vec![]);

    wtr.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for row in rows {
        wtr.write_record(columns.iter().map(|c| policy.field(&row.cell(&c.key))))?;
    }

    let bytes = wtr.into_inner()?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// A finished export, ready to hand to a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type, always [`CSV_MIME_TYPE`].
    pub mime_type: &'static str,
    /// The full CSV text as bytes.
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// The artifact contents as text.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Writes the artifact into `dir` under its file name and returns the
    /// full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        debug!(path = %path.display(), bytes = self.bytes.len(), "export written");
        Ok(path)
    }
}

/// Serializes visible columns and rows according to an [`ExportConfig`].
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: ExportConfig,
}

impl CsvExporter {
    /// Creates an exporter with the given settings.
    pub fn new(config: ExportConfig) -> Self {
        CsvExporter { config }
    }

    /// The exporter's settings.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Renders CSV text.
    pub fn render<R: GridRow>(&self, rows: &[R], columns: &[&Column]) -> Result<String> {
        trace!(
            policy = ?self.config.quote,
            rows = rows.len(),
            columns = columns.len(),
            "rendering csv"
        );
        write_csv(rows, columns, self.config.quote)
    }

    /// Renders CSV and wraps it in a downloadable artifact.
    pub fn export<R: GridRow>(&self, rows: &[R], columns: &[&Column]) -> Result<ExportArtifact> {
        let text = self.render(rows, columns)?;
        debug!(
            file_name = %self.config.file_name,
            rows = rows.len(),
            bytes = text.len(),
            "export prepared"
        );
        Ok(ExportArtifact {
            file_name: self.config.file_name.clone(),
            mime_type: CSV_MIME_TYPE,
            bytes: text.into_bytes(),
        })
    }
}
