//! Column visibility.
//!
//! [`VisibilityState`] records which registry columns are shown. It stores
//! membership only; the rendering order is always recovered by walking the
//! registry, so toggling columns off and on in any order never reorders
//! them.

use std::collections::BTreeSet;

use crate::column::{Column, ColumnRegistry};

/// The set of currently visible column keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityState {
    visible: BTreeSet<String>,
}

impl VisibilityState {
    /// Initial visibility: every column not declared `hidden`.
    pub fn from_registry(registry: &ColumnRegistry) -> Self {
        VisibilityState {
            visible: registry
                .iter()
                .filter(|c| !c.hidden)
                .map(|c| c.key.clone())
                .collect(),
        }
    }

    /// Flips the visibility of `key`.
    ///
    /// Keys the registry does not know are ignored, so the visible set stays
    /// a subset of the registry. Returns `true` if anything changed.
    pub fn toggle(&mut self, key: &str, registry: &ColumnRegistry) -> bool {
        if !registry.contains(key) {
            return false;
        }
        if !self.visible.remove(key) {
            self.visible.insert(key.to_string());
        }
        true
    }

    /// Returns `true` if `key` is currently shown.
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    /// Returns the number of visible columns.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Returns `true` if no column is visible.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Visible columns in registry order.
    pub fn visible_columns<'a>(&self, registry: &'a ColumnRegistry) -> Vec<&'a Column> {
        registry
            .iter()
            .filter(|c| self.visible.contains(&c.key))
            .collect()
    }
}
