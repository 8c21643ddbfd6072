//! Row selection bookkeeping.
//!
//! Selection is tracked by [`RowId`], the identity a row receives at load
//! time, so a checked row stays checked however the current filter and sort
//! rearrange the derived rows.
//!
//! Select-all is deliberately wider than what is on screen: it checks
//! **every row of the full dataset**, including rows the active search is
//! hiding. [`SelectionTracker::is_all_selected`] is measured against the
//! same full dataset.

use std::collections::BTreeSet;

use crate::row::RowId;

/// The set of checked rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: BTreeSet<RowId>,
}

impl SelectionTracker {
    /// Creates an empty selection.
    pub fn new() -> Self {
        SelectionTracker::default()
    }

    /// Checks or unchecks one row of a dataset with `total` rows.
    ///
    /// Ids outside the dataset are ignored. Returns `true` if the set
    /// changed.
    pub fn toggle_row(&mut self, id: RowId, checked: bool, total: usize) -> bool {
        if id.index() >= total {
            return false;
        }
        if checked {
            self.selected.insert(id)
        } else {
            self.selected.remove(&id)
        }
    }

    /// Checks every row of a dataset with `total` rows, or clears the set.
    ///
    /// Returns `true` if the set changed.
    pub fn select_all(&mut self, checked: bool, total: usize) -> bool {
        let next: BTreeSet<RowId> = if checked {
            (0..total).map(RowId::new).collect()
        } else {
            BTreeSet::new()
        };
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    /// Returns `true` if every row of a non-empty dataset is checked.
    pub fn is_all_selected(&self, total: usize) -> bool {
        total > 0 && self.selected.len() == total
    }

    /// Returns `true` if `id` is checked.
    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of checked rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is checked.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Checked ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.selected.iter().copied()
    }

    /// Resolves the checked ids back into rows, in raw order.
    pub fn resolve<'a, R>(&self, rows: &'a [R]) -> Vec<&'a R> {
        self.selected
            .iter()
            .filter_map(|id| rows.get(id.index()))
            .collect()
    }
}
