//! Single-key sorting with header-toggle semantics.
//!
//! Provides [`Dir`] for sort direction, [`SortConfig`] for the active sort
//! key, and the header-click policy in [`SortConfig::toggle`]:
//!
//! - clicking the sorted column flips its direction
//! - clicking another sortable column sorts it ascending
//! - clicking a non-sortable (or unknown) column changes nothing
//!
//! Only one key is ever active. Sorting is stable and total: cells of mixed
//! kinds are ordered by [`compare_values`] and never panic.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::column::ColumnRegistry;
use crate::row::GridRow;
use crate::value::{compare_values, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active sort: one column key and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// The column to sort by.
    pub key: String,
    /// The sort direction.
    pub dir: Dir,
}

impl SortConfig {
    /// Creates an ascending sort on `key`.
    pub fn asc(key: impl Into<String>) -> Self {
        SortConfig {
            key: key.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a descending sort on `key`.
    pub fn desc(key: impl Into<String>) -> Self {
        SortConfig {
            key: key.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a sort with the given direction.
    pub fn new(key: impl Into<String>, dir: Dir) -> Self {
        SortConfig {
            key: key.into(),
            dir,
        }
    }

    /// Compares two cell values according to this sort.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        self.dir.apply(compare_values(a, b))
    }

    /// Resolves a header click on `key` against the current sort.
    ///
    /// Returns the new sort. Non-sortable and unknown columns leave
    /// `current` untouched.
    pub fn toggle(
        current: Option<&SortConfig>,
        key: &str,
        registry: &ColumnRegistry,
    ) -> Option<SortConfig> {
        if !registry.is_sortable(key) {
            return current.cloned();
        }
        match current {
            Some(active) if active.key == key => Some(SortConfig::new(key, active.dir.flip())),
            _ => Some(SortConfig::asc(key)),
        }
    }
}

/// Sorts rows in place by one key. The sort is stable.
pub fn sort_in_place<T: GridRow>(rows: &mut [T], key: &str, dir: Dir) {
    rows.sort_by(|a, b| dir.apply(compare_values(&a.cell(key), &b.cell(key))));
    trace!(key, dir = %dir, rows = rows.len(), "rows sorted");
}

/// Returns references to `rows` ordered by one key.
///
/// ```
/// use gridline::{sort, Dir, GridRow, Record};
///
/// let rows = vec![
///     Record::new().with("name", "Bob").with("age", 30),
///     Record::new().with("name", "Ann").with("age", 25),
/// ];
/// let sorted = sort(&rows, "age", Dir::Asc);
/// assert_eq!(sorted[0].cell("name").to_text(), "Ann");
/// ```
pub fn sort<'a, R: GridRow>(rows: &'a [R], key: &str, dir: Dir) -> Vec<&'a R> {
    let mut results: Vec<&'a R> = rows.iter().collect();
    sort_in_place(&mut results, key, dir);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::row::Record;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new(vec![
            Column::new("id", "ID"),
            Column::new("name", "Name").sortable(),
            Column::new("age", "Age").sortable(),
        ])
        .unwrap()
    }

    fn ages(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.cell("age").to_text()).collect()
    }

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_flip_and_display() {
        assert_eq!(Dir::Asc.flip(), Dir::Desc);
        assert_eq!(Dir::Desc.flip(), Dir::Asc);
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn toggle_same_column_flips() {
        let registry = registry();
        let first = SortConfig::toggle(None, "age", &registry);
        assert_eq!(first, Some(SortConfig::asc("age")));

        let second = SortConfig::toggle(first.as_ref(), "age", &registry);
        assert_eq!(second, Some(SortConfig::desc("age")));

        let third = SortConfig::toggle(second.as_ref(), "age", &registry);
        assert_eq!(third, Some(SortConfig::asc("age")));
    }

    #[test]
    fn toggle_other_column_resets_to_asc() {
        let registry = registry();
        let current = SortConfig::desc("age");
        assert_eq!(
            SortConfig::toggle(Some(&current), "name", &registry),
            Some(SortConfig::asc("name"))
        );
    }

    #[test]
    fn toggle_non_sortable_is_noop() {
        let registry = registry();
        let current = SortConfig::desc("age");

        assert_eq!(
            SortConfig::toggle(Some(&current), "id", &registry),
            Some(current.clone())
        );
        assert_eq!(SortConfig::toggle(None, "id", &registry), None);
        assert_eq!(SortConfig::toggle(None, "missing", &registry), None);
    }

    #[test]
    fn sort_by_number() {
        let rows = vec![
            Record::new().with("age", 30),
            Record::new().with("age", 25),
            Record::new().with("age", 41),
        ];
        assert_eq!(ages(&sort(&rows, "age", Dir::Asc)), vec!["25", "30", "41"]);
        assert_eq!(ages(&sort(&rows, "age", Dir::Desc)), vec!["41", "30", "25"]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let rows = vec![
            Record::new().with("k", 1).with("tag", "a"),
            Record::new().with("k", 0).with("tag", "b"),
            Record::new().with("k", 1).with("tag", "c"),
        ];
        let tags: Vec<String> = sort(&rows, "k", Dir::Asc)
            .iter()
            .map(|r| r.cell("tag").to_text())
            .collect();
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn heterogeneous_column_does_not_panic() {
        let rows = vec![
            Record::new().with("v", "ten"),
            Record::new().with("v", 3),
            Record::new().with("v", true),
            Record::new(),
            Record::new().with("v", f64::NAN),
            Record::new().with("v", 1.5),
        ];
        let sorted = sort(&rows, "v", Dir::Asc);
        let texts: Vec<String> = sorted.iter().map(|r| r.cell("v").to_text()).collect();
        assert_eq!(texts, vec!["true", "1.5", "3", "NaN", "ten", ""]);

        let reversed = sort(&rows, "v", Dir::Desc);
        assert_eq!(reversed.len(), rows.len());
    }

    #[test]
    fn sort_config_compare() {
        let a = Value::String("a");
        let b = Value::String("b");
        assert_eq!(SortConfig::asc("x").compare(&a, &b), Ordering::Less);
        assert_eq!(SortConfig::desc("x").compare(&a, &b), Ordering::Greater);
    }
}
