//! Free-text search across columns.
//!
//! A row matches a query when the canonical text of any searched column
//! contains the query, ignoring case. There is no column-scoped syntax: the
//! query is one literal substring.
//!
//! Which columns are searched depends on [`FilterScope`]. The default,
//! [`FilterScope::AllVisible`], searches every visible column and ignores
//! [`Column::filterable`]. [`FilterScope::FilterableOnly`] skips columns
//! whose `filterable` flag is off.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::column::Column;
use crate::row::GridRow;

/// Which visible columns take part in search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterScope {
    /// Every visible column, regardless of its `filterable` flag.
    #[default]
    AllVisible,
    /// Visible columns with `filterable = true` only.
    FilterableOnly,
}

impl FilterScope {
    /// Returns `true` if `column` is searched under this scope.
    pub fn includes(self, column: &Column) -> bool {
        match self {
            FilterScope::AllVisible => true,
            FilterScope::FilterableOnly => column.filterable,
        }
    }
}

/// A compiled search query.
///
/// ```
/// use gridline::{Column, Record, SearchFilter};
///
/// let name = Column::new("name", "Name");
/// let filter = SearchFilter::new("AN");
///
/// assert!(filter.matches(&Record::new().with("name", "Ann"), &[&name]));
/// assert!(!filter.matches(&Record::new().with("name", "Bob"), &[&name]));
/// assert!(SearchFilter::new("  ").is_identity());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
    scope: FilterScope,
}

impl SearchFilter {
    /// Compiles a query. A blank query makes the filter an identity
    /// pass-through; otherwise the whole query, whitespace included, is the
    /// needle.
    pub fn new(query: &str) -> Self {
        SearchFilter {
            needle: (!query.trim().is_empty()).then(|| query.to_lowercase()),
            scope: FilterScope::default(),
        }
    }

    /// Sets the column scope.
    pub fn with_scope(mut self, scope: FilterScope) -> Self {
        self.scope = scope;
        self
    }

    /// Returns `true` if this filter keeps every row.
    pub fn is_identity(&self) -> bool {
        self.needle.is_none()
    }

    /// The lowercased needle, if any.
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    /// Tests one row against the given visible columns.
    pub fn matches<R: GridRow + ?Sized>(&self, row: &R, columns: &[&Column]) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        columns
            .iter()
            .filter(|column| self.scope.includes(column))
            .any(|column| {
                row.cell(&column.key)
                    .to_text()
                    .to_lowercase()
                    .contains(needle.as_str())
            })
    }

    /// Drops the rows that do not match, keeping the rest in order.
    pub fn retain<T: GridRow>(&self, rows: &mut Vec<T>, columns: &[&Column]) {
        let total = rows.len();
        if !self.is_identity() {
            rows.retain(|row| self.matches(row, columns));
        }
        trace!(
            needle = ?self.needle,
            kept = rows.len(),
            total,
            "search filter applied"
        );
    }

    /// Filters a slice, returning references to matching rows in their
    /// original order.
    pub fn apply<'a, R: GridRow>(&self, rows: &'a [R], columns: &[&Column]) -> Vec<&'a R> {
        let mut results: Vec<&'a R> = rows.iter().collect();
        self.retain(&mut results, columns);
        results
    }
}

/// Keeps the rows whose visible columns contain `query`, case-insensitively.
///
/// An empty or whitespace-only query returns every row.
pub fn filter<'a, R: GridRow>(rows: &'a [R], query: &str, columns: &[&Column]) -> Vec<&'a R> {
    SearchFilter::new(query).apply(rows, columns)
}
