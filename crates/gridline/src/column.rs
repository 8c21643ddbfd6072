//! Column declarations.
//!
//! A [`Column`] describes one field a grid can show: the key used to read
//! the cell from a row, the header label, and three flags. A
//! [`ColumnRegistry`] is the ordered, immutable list of every column a grid
//! knows about; its order is the rendering order.
//!
//! ```rust
//! use gridline::{Column, ColumnRegistry};
//!
//! let registry = ColumnRegistry::new(vec![
//!     Column::new("id", "ID"),
//!     Column::new("name", "Name").sortable(),
//!     Column::new("email", "Email").hidden(),
//! ])
//! .unwrap();
//!
//! assert_eq!(registry.len(), 3);
//! assert!(registry.get("name").unwrap().sortable);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

fn default_filterable() -> bool {
    true
}

/// Declaration of a single grid column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Key used to read the cell from each row.
    pub key: String,
    /// Header label, used for rendering and as the CSV header.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    #[serde(default)]
    pub sortable: bool,
    /// Whether this column takes part in search.
    ///
    /// Only consulted under [`FilterScope::FilterableOnly`](crate::FilterScope).
    #[serde(default = "default_filterable")]
    pub filterable: bool,
    /// Whether the column starts out hidden.
    #[serde(default)]
    pub hidden: bool,
}

impl Column {
    /// Creates a visible, filterable, non-sortable column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            label: label.into(),
            sortable: false,
            filterable: true,
            hidden: false,
        }
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets whether the column takes part in search.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Marks the column as hidden by default.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// The ordered set of columns a grid is built with.
///
/// Keys are unique and non-empty. The registry is immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct ColumnRegistry {
    columns: Vec<Column>,
}

impl ColumnRegistry {
    /// Builds a registry, rejecting empty or duplicate keys.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (idx, column) in columns.iter().enumerate() {
            if column.key.is_empty() {
                return Err(GridError::EmptyColumnKey(idx));
            }
            if !seen.insert(column.key.as_str()) {
                return Err(GridError::DuplicateColumn(column.key.clone()));
            }
        }
        Ok(ColumnRegistry { columns })
    }

    /// Looks up a column by key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns `true` if a column with this key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if the key names a sortable column.
    pub fn is_sortable(&self, key: &str) -> bool {
        self.get(key).is_some_and(|c| c.sortable)
    }

    /// Iterates columns in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Returns all columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the registry has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<Column>> for ColumnRegistry {
    type Error = GridError;

    fn try_from(columns: Vec<Column>) -> Result<Self> {
        ColumnRegistry::new(columns)
    }
}

impl From<ColumnRegistry> for Vec<Column> {
    fn from(registry: ColumnRegistry) -> Self {
        registry.columns
    }
}

impl<'a> IntoIterator for &'a ColumnRegistry {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
