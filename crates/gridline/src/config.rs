//! Grid configuration.
//!
//! [`GridConfig`] collects the knobs that change engine behavior. Every
//! field has a default, so an empty document is a valid configuration.
//!
//! ```yaml
//! filter_scope: filterable_only
//! export:
//!   file_name: papers.csv
//!   quote: rfc4180
//! ```

use serde::{Deserialize, Serialize};

use crate::column::ColumnRegistry;
use crate::error::Result;
use crate::export::ExportConfig;
use crate::search::FilterScope;

/// Engine settings for one grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Which visible columns take part in search.
    pub filter_scope: FilterScope,
    /// CSV export settings.
    pub export: ExportConfig,
}

impl GridConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses a configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// A complete grid description: columns plus settings.
///
/// ```
/// use gridline::GridDefinition;
///
/// let def = GridDefinition::from_yaml(r#"
/// columns:
///   - { key: name, label: Name, sortable: true }
///   - { key: email, label: Email, hidden: true }
/// "#).unwrap();
///
/// assert_eq!(def.columns.len(), 2);
/// assert_eq!(def.config.export.file_name, "data-export.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDefinition {
    /// The column registry.
    pub columns: ColumnRegistry,
    /// Engine settings.
    #[serde(flatten)]
    pub config: GridConfig,
}

impl GridDefinition {
    /// Parses a definition from JSON.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses a definition from YAML.
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }
}
