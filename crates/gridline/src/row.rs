//! Row access and row identity.
//!
//! The engine never inspects a row directly. It reads cells through the
//! [`GridRow`] trait, which maps a column key to a borrowed [`Value`].
//! Any type can be a row: implement the trait by hand for your own structs,
//! or use the provided [`Record`] (an owned key/value map that deserializes
//! from JSON or YAML) or a raw `serde_json` object.
//!
//! Every raw row receives a stable [`RowId`] when a grid is built: its
//! position in the raw sequence at load time. Filtering and sorting move
//! [`RowRef`]s around, so the identity travels with the row no matter how
//! the derived sequence is reordered.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Number, Timestamp, Value};

/// Trait for types that can be shown as a grid row.
///
/// # Example
///
/// ```
/// use gridline::{GridRow, Value, Number};
///
/// struct Paper {
///     title: String,
///     year: u16,
/// }
///
/// impl GridRow for Paper {
///     fn cell(&self, key: &str) -> Value<'_> {
///         match key {
///             "title" => Value::String(&self.title),
///             "year" => Value::Number(Number::from(self.year)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait GridRow {
    /// Returns the value of the cell under `key`.
    ///
    /// Unknown keys and null cells return [`Value::None`].
    fn cell(&self, key: &str) -> Value<'_>;
}

impl<T: GridRow + ?Sized> GridRow for &T {
    fn cell(&self, key: &str) -> Value<'_> {
        (**self).cell(key)
    }
}

impl GridRow for serde_json::Map<String, serde_json::Value> {
    fn cell(&self, key: &str) -> Value<'_> {
        use serde_json::Value as Json;

        match self.get(key) {
            Some(Json::String(s)) => Value::String(s),
            Some(Json::Bool(b)) => Value::Bool(*b),
            Some(Json::Number(n)) => n
                .as_i64()
                .map(Number::I64)
                .or_else(|| n.as_u64().map(Number::U64))
                .or_else(|| n.as_f64().map(Number::F64))
                .map_or(Value::None, Value::Number),
            // Null, missing, and nested values have no cell representation
            _ => Value::None,
        }
    }
}

/// Stable identity of a raw row: its position in the raw sequence at load
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(usize);

impl RowId {
    /// Creates a row id for the given raw position.
    pub fn new(index: usize) -> Self {
        RowId(index)
    }

    /// Returns the raw position this id refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for RowId {
    fn from(index: usize) -> Self {
        RowId(index)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A borrowed row annotated with its stable [`RowId`].
#[derive(Debug)]
pub struct RowRef<'r, R> {
    /// Identity assigned at load time.
    pub id: RowId,
    /// The row itself.
    pub row: &'r R,
}

impl<R> Clone for RowRef<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RowRef<'_, R> {}

impl<R> PartialEq for RowRef<'_, R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<R> Eq for RowRef<'_, R> {}

impl<R: GridRow> GridRow for RowRef<'_, R> {
    fn cell(&self, key: &str) -> Value<'_> {
        self.row.cell(key)
    }
}

/// Annotates every row with its positional [`RowId`].
pub fn index_rows<R>(rows: &[R]) -> Vec<RowRef<'_, R>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| RowRef {
            id: RowId(idx),
            row,
        })
        .collect()
}

/// An owned cell value, as stored in a [`Record`].
///
/// Deserializes untagged: `null`, booleans, numbers and strings map to the
/// matching variant. Timestamps have no JSON form of their own and are only
/// created from Rust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Null cell.
    Null,
    /// Boolean cell.
    Bool(bool),
    /// Numeric cell.
    Number(Number),
    /// Text cell.
    Text(String),
    /// Date-like cell.
    #[serde(skip_deserializing)]
    Timestamp(Timestamp),
}

impl Cell {
    /// Borrows this cell as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Cell::Null => Value::None,
            Cell::Bool(b) => Value::Bool(*b),
            Cell::Number(n) => Value::Number(*n),
            Cell::Text(s) => Value::String(s),
            Cell::Timestamp(t) => Value::Timestamp(*t),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(n.into())
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Number(n.into())
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n.into())
    }
}

impl From<Number> for Cell {
    fn from(n: Number) -> Self {
        Cell::Number(n)
    }
}

impl From<Timestamp> for Cell {
    fn from(t: Timestamp) -> Self {
        Cell::Timestamp(t)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// An owned row: a map from column key to [`Cell`].
///
/// ```
/// use gridline::{GridRow, Record, Value};
///
/// let row = Record::new().with("name", "Ann").with("age", 25);
/// assert_eq!(row.cell("name"), Value::String("Ann"));
///
/// let parsed: Record = serde_json::from_str(r#"{"name": "Bob", "age": 30}"#).unwrap();
/// assert_eq!(parsed.cell("age").to_text(), "30");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Cell>);

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Adds a cell, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a cell.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Cell>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the cell stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.0.get(key)
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl GridRow for Record {
    fn cell(&self, key: &str) -> Value<'_> {
        self.0.get(key).map_or(Value::None, Cell::as_value)
    }
}
