//! Gridline - tabular data engine for in-memory rows.
//!
//! Gridline powers a data grid: it takes a fixed set of rows and a column
//! registry, and derives what the grid shows as the user searches, sorts,
//! checks rows and hides columns. It supports:
//!
//! - Free-text search across visible columns, case-insensitive
//! - Single-key sorting with header-toggle semantics
//! - Row selection by stable identity, with full-dataset select-all
//! - Column show/hide in registry order
//! - CSV export of the visible columns of the derived rows
//!
//! # Quick Start
//!
//! ```rust
//! use gridline::{Column, ColumnRegistry, Grid, GridRow, Record, RowId};
//!
//! let registry = ColumnRegistry::new(vec![
//!     Column::new("id", "ID"),
//!     Column::new("name", "Name").sortable(),
//!     Column::new("age", "Age").sortable(),
//! ])
//! .unwrap();
//!
//! let rows = vec![
//!     Record::new().with("id", 1).with("name", "Bob").with("age", 30),
//!     Record::new().with("id", 2).with("name", "Ann").with("age", 25),
//! ];
//!
//! let mut grid = Grid::new(rows, registry);
//! grid.toggle_sort("name");
//! grid.toggle_row(RowId::new(0), true);
//!
//! assert_eq!(grid.derived_rows()[0].cell("name").to_text(), "Ann");
//! assert_eq!(grid.selected_rows()[0].cell("name").to_text(), "Bob");
//! assert_eq!(grid.to_csv().unwrap(), "ID,Name,Age\n2,\"Ann\",25\n1,\"Bob\",30");
//! ```
//!
//! # Data Flow
//!
//! ```text
//! raw rows ─▶ search(query, visible columns) ─▶ sort(key, dir) ─▶ derived rows
//!                                                                    │
//!                                  visible columns ──────────────────┴─▶ CSV
//! ```
//!
//! Raw rows never change after construction. Every action goes through
//! [`GridState::reduce`] and the derived rows are recomputed from scratch.
//!
//! # Rows
//!
//! Anything implementing [`GridRow`] can be displayed. [`Record`] is the
//! owned, serde-friendly row type; `serde_json` objects work as well, and
//! custom structs implement [`GridRow::cell`] directly:
//!
//! ```rust
//! use gridline::{GridRow, Number, Value};
//!
//! struct Paper {
//!     title: String,
//!     year: i64,
//! }
//!
//! impl GridRow for Paper {
//!     fn cell(&self, key: &str) -> Value<'_> {
//!         match key {
//!             "title" => Value::String(&self.title),
//!             "year" => Value::Number(Number::I64(self.year)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//! ```
//!
//! # Cell Kinds
//!
//! | Kind | Search text | CSV (default) | Sort rank |
//! |------|-------------|---------------|-----------|
//! | Bool | `true` / `false` | bare | 0 |
//! | Number | decimal | bare | 1 |
//! | Timestamp | RFC 3339, UTC | bare | 2 |
//! | String | as is | always quoted, never escaped | 3 |
//! | None | empty | empty | 4 |

mod column;
mod config;
mod error;
mod export;
mod grid;
mod row;
mod search;
mod selection;
mod sort;
mod value;
mod visibility;

// Re-export public API
pub use column::{Column, ColumnRegistry};
pub use config::{GridConfig, GridDefinition};
pub use error::{GridError, Result};
pub use export::{
    to_csv, CsvExporter, ExportArtifact, ExportConfig, QuotePolicy, CSV_MIME_TYPE,
    DEFAULT_FILE_NAME,
};
pub use grid::{Action, Change, Grid, GridState, GridView, ReduceContext};
pub use row::{index_rows, Cell, GridRow, Record, RowId, RowRef};
pub use search::{filter, FilterScope, SearchFilter};
pub use selection::SelectionTracker;
pub use sort::{sort, sort_in_place, Dir, SortConfig};
pub use value::{compare_values, Number, Timestamp, Value};
pub use visibility::VisibilityState;
