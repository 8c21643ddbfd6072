//! Grid state and the grid session.
//!
//! All mutable grid state (search query, sort, selection, column
//! visibility) lives in one [`GridState`] value. Each user action is an
//! [`Action`], and [`GridState::reduce`] turns the current state plus an
//! action into the next state without touching anything else.
//!
//! [`Grid`] owns a session: the raw rows and column registry (both immutable
//! after construction), the configuration, the current state, and the
//! derived row order. After every dispatched action it recomputes the
//! derived rows from scratch:
//!
//! ```text
//! raw rows ─▶ search ─▶ sort ─▶ derived rows
//! ```
//!
//! # Example
//!
//! ```
//! use gridline::{Action, Column, ColumnRegistry, Grid, GridRow, Record};
//!
//! let registry = ColumnRegistry::new(vec![
//!     Column::new("id", "ID"),
//!     Column::new("name", "Name").sortable(),
//!     Column::new("age", "Age").sortable(),
//! ])
//! .unwrap();
//! let rows = vec![
//!     Record::new().with("id", 1).with("name", "Bob").with("age", 30),
//!     Record::new().with("id", 2).with("name", "Ann").with("age", 25),
//! ];
//!
//! let mut grid = Grid::new(rows, registry);
//! grid.dispatch(Action::ToggleSort("age".into()));
//!
//! let names: Vec<String> = grid
//!     .derived_rows()
//!     .iter()
//!     .map(|r| r.cell("name").to_text())
//!     .collect();
//! assert_eq!(names, ["Ann", "Bob"]);
//! ```

use std::fmt;

use tracing::debug;

use crate::column::{Column, ColumnRegistry};
use crate::config::{GridConfig, GridDefinition};
use crate::error::Result;
use crate::export::{CsvExporter, ExportArtifact};
use crate::row::{index_rows, GridRow, RowId, RowRef};
use crate::search::{FilterScope, SearchFilter};
use crate::selection::SelectionTracker;
use crate::sort::{sort_in_place, SortConfig};
use crate::visibility::VisibilityState;

/// A user action on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The search box changed.
    SetQuery(String),
    /// A column header was clicked.
    ToggleSort(String),
    /// A row checkbox was clicked.
    ToggleRow {
        /// Row identity.
        id: RowId,
        /// New checkbox state.
        checked: bool,
    },
    /// The select-all checkbox was clicked.
    SelectAll(bool),
    /// A column was shown or hidden.
    ToggleColumn(String),
}

/// Which parts of the state an action changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Change {
    /// The search query changed.
    pub query: bool,
    /// The sort changed.
    pub sort: bool,
    /// The selection changed.
    pub selection: bool,
    /// Column visibility changed.
    pub visibility: bool,
}

impl Change {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        !(self.query || self.sort || self.selection || self.visibility)
    }

    /// Returns `true` if the derived rows need recomputing.
    pub fn affects_rows(&self) -> bool {
        self.query || self.sort || self.visibility
    }
}

/// What a reducer may look at besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    /// The grid's columns.
    pub registry: &'a ColumnRegistry,
    /// Number of raw rows.
    pub row_count: usize,
}

/// The complete mutable state of a grid, as one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    query: String,
    sort: Option<SortConfig>,
    selection: SelectionTracker,
    visibility: VisibilityState,
}

impl GridState {
    /// Initial state: no query, no sort, nothing selected, default-hidden
    /// columns hidden.
    pub fn initial(registry: &ColumnRegistry) -> Self {
        GridState {
            query: String::new(),
            sort: None,
            selection: SelectionTracker::new(),
            visibility: VisibilityState::from_registry(registry),
        }
    }

    /// The current search query, as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The active sort, if any.
    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// The current column visibility.
    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    /// Computes the state that follows `action`.
    pub fn reduce(&self, action: &Action, ctx: &ReduceContext<'_>) -> GridState {
        let mut next = self.clone();
        match action {
            Action::SetQuery(query) => next.query = query.clone(),
            Action::ToggleSort(key) => {
                next.sort = SortConfig::toggle(self.sort.as_ref(), key, ctx.registry);
            }
            Action::ToggleRow { id, checked } => {
                next.selection.toggle_row(*id, *checked, ctx.row_count);
            }
            Action::SelectAll(checked) => {
                next.selection.select_all(*checked, ctx.row_count);
            }
            Action::ToggleColumn(key) => {
                next.visibility.toggle(key, ctx.registry);
            }
        }
        next
    }

    /// Reports which parts differ between `self` and `next`.
    pub fn diff(&self, next: &GridState) -> Change {
        Change {
            query: self.query != next.query,
            sort: self.sort != next.sort,
            selection: self.selection != next.selection,
            visibility: self.visibility != next.visibility,
        }
    }

    /// Derives the visible row sequence from the raw rows: search across
    /// the visible columns, then sort.
    pub fn derive<'r, R: GridRow>(
        &self,
        rows: &'r [R],
        registry: &ColumnRegistry,
        scope: FilterScope,
    ) -> Vec<RowRef<'r, R>> {
        let columns = self.visibility.visible_columns(registry);
        let search = SearchFilter::new(&self.query).with_scope(scope);

        let mut derived = index_rows(rows);
        search.retain(&mut derived, &columns);
        if let Some(sort) = &self.sort {
            sort_in_place(&mut derived, &sort.key, sort.dir);
        }
        derived
    }
}

/// Snapshot of everything a renderer needs after a recomputation.
#[derive(Debug)]
pub struct GridView<'g, R> {
    /// Derived rows in display order.
    pub rows: Vec<RowRef<'g, R>>,
    /// Visible columns in registry order.
    pub columns: Vec<&'g Column>,
    /// The active sort.
    pub sort: Option<&'g SortConfig>,
    /// The search query.
    pub query: &'g str,
    /// Selected rows, resolved, in raw order.
    pub selected: Vec<&'g R>,
    /// Whether every raw row is selected.
    pub all_selected: bool,
}

type SelectionListener<R> = Box<dyn FnMut(&[&R])>;

/// A grid session over a fixed set of rows.
pub struct Grid<R> {
    rows: Vec<R>,
    registry: ColumnRegistry,
    config: GridConfig,
    state: GridState,
    derived: Vec<RowId>,
    listeners: Vec<SelectionListener<R>>,
}

impl<R: fmt::Debug> fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("derived", &self.derived)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<R: GridRow> Grid<R> {
    /// Creates a grid with the default configuration.
    pub fn new(rows: Vec<R>, registry: ColumnRegistry) -> Self {
        Grid::with_config(rows, registry, GridConfig::default())
    }

    /// Creates a grid with an explicit configuration.
    pub fn with_config(rows: Vec<R>, registry: ColumnRegistry, config: GridConfig) -> Self {
        let state = GridState::initial(&registry);
        let mut grid = Grid {
            rows,
            registry,
            config,
            state,
            derived: Vec::new(),
            listeners: Vec::new(),
        };
        grid.recompute();
        debug!(
            rows = grid.rows.len(),
            columns = grid.registry.len(),
            "grid created"
        );
        grid
    }

    /// Creates a grid from a parsed [`GridDefinition`].
    pub fn from_definition(rows: Vec<R>, definition: GridDefinition) -> Self {
        Grid::with_config(rows, definition.columns, definition.config)
    }

    /// Applies an action and recomputes derived data.
    ///
    /// Selection listeners run if the selection changed.
    pub fn dispatch(&mut self, action: Action) -> Change {
        let ctx = ReduceContext {
            registry: &self.registry,
            row_count: self.rows.len(),
        };
        let next = self.state.reduce(&action, &ctx);
        let change = self.state.diff(&next);
        self.state = next;

        if change.affects_rows() {
            self.recompute();
        }
        debug!(
            ?action,
            ?change,
            derived = self.derived.len(),
            selected = self.state.selection.len(),
            "action dispatched"
        );

        if change.selection {
            let selected = self.state.selection.resolve(&self.rows);
            for listener in self.listeners.iter_mut() {
                listener(&selected);
            }
        }
        change
    }

    /// Sets the search query.
    pub fn set_query(&mut self, query: impl Into<String>) -> Change {
        self.dispatch(Action::SetQuery(query.into()))
    }

    /// Handles a click on a column header.
    pub fn toggle_sort(&mut self, key: impl Into<String>) -> Change {
        self.dispatch(Action::ToggleSort(key.into()))
    }

    /// Checks or unchecks one row.
    pub fn toggle_row(&mut self, id: RowId, checked: bool) -> Change {
        self.dispatch(Action::ToggleRow { id, checked })
    }

    /// Checks every raw row, or clears the selection.
    pub fn select_all(&mut self, checked: bool) -> Change {
        self.dispatch(Action::SelectAll(checked))
    }

    /// Shows or hides a column.
    pub fn toggle_column(&mut self, key: impl Into<String>) -> Change {
        self.dispatch(Action::ToggleColumn(key.into()))
    }

    /// Registers a callback that receives the resolved selected rows every
    /// time the selection changes.
    pub fn on_selection_change<F>(&mut self, listener: F)
    where
        F: FnMut(&[&R]) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn recompute(&mut self) {
        let derived: Vec<RowId> = self
            .state
            .derive(&self.rows, &self.registry, self.config.filter_scope)
            .iter()
            .map(|r| r.id)
            .collect();
        self.derived = derived;
    }

    /// The raw rows, in load order.
    pub fn raw_rows(&self) -> &[R] {
        &self.rows
    }

    /// The column registry.
    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// The grid configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The current state value.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// The current search query.
    pub fn query(&self) -> &str {
        self.state.query()
    }

    /// The active sort.
    pub fn sort_config(&self) -> Option<&SortConfig> {
        self.state.sort()
    }

    /// Ids of the derived rows, in display order.
    pub fn derived_ids(&self) -> &[RowId] {
        &self.derived
    }

    /// The derived rows, in display order.
    pub fn derived_rows(&self) -> Vec<RowRef<'_, R>> {
        self.derived
            .iter()
            .filter_map(|id| self.rows.get(id.index()).map(|row| RowRef { id: *id, row }))
            .collect()
    }

    /// Visible columns in registry order.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.state.visibility.visible_columns(&self.registry)
    }

    /// Returns `true` if the column is visible.
    pub fn is_column_visible(&self, key: &str) -> bool {
        self.state.visibility.is_visible(key)
    }

    /// Selected rows, resolved, in raw order.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.state.selection.resolve(&self.rows)
    }

    /// Selected row ids, ascending.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.state.selection.ids().collect()
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, id: RowId) -> bool {
        self.state.selection.is_selected(id)
    }

    /// Returns `true` if every raw row is selected and there is at least one.
    pub fn is_all_selected(&self) -> bool {
        self.state.selection.is_all_selected(self.rows.len())
    }

    /// Everything a renderer needs, in one snapshot.
    pub fn view(&self) -> GridView<'_, R> {
        GridView {
            rows: self.derived_rows(),
            columns: self.visible_columns(),
            sort: self.sort_config(),
            query: self.query(),
            selected: self.selected_rows(),
            all_selected: self.is_all_selected(),
        }
    }

    fn exporter(&self) -> CsvExporter {
        CsvExporter::new(self.config.export.clone())
    }

    /// Renders the visible columns of the derived rows as CSV text.
    pub fn to_csv(&self) -> Result<String> {
        self.exporter()
            .render(&self.derived_rows(), &self.visible_columns())
    }

    /// Exports the visible columns of the derived rows as a downloadable
    /// artifact.
    pub fn export(&self) -> Result<ExportArtifact> {
        self.exporter()
            .export(&self.derived_rows(), &self.visible_columns())
    }
}
