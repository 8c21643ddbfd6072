//! Property-based tests for gridline using proptest.

use gridline::{
    filter, sort, Column, ColumnRegistry, Dir, Grid, GridRow, Record, RowId, VisibilityState,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn registry() -> ColumnRegistry {
    ColumnRegistry::new(vec![
        Column::new("n", "N").sortable(),
        Column::new("s", "S").sortable(),
        Column::new("b", "B"),
    ])
    .unwrap()
}

fn record((n, s, b): (i64, String, bool)) -> Record {
    Record::new().with("n", n).with("s", s).with("b", b)
}

// Strategy to generate rows
fn rows_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((any::<i64>(), "[a-zA-Z ]{0,8}", any::<bool>()), 0..40)
        .prop_map(|items| items.into_iter().map(record).collect())
}

fn ids<R: GridRow>(grid: &Grid<R>) -> Vec<RowId> {
    grid.derived_ids().to_vec()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Blank queries keep every row in raw order.
    #[test]
    fn blank_query_is_identity(rows in rows_strategy(), pad in " {0,4}") {
        let registry = registry();
        let columns: Vec<&Column> = registry.iter().collect();
        let results = filter(&rows, &pad, &columns);
        prop_assert_eq!(results.len(), rows.len());
        for (kept, raw) in results.iter().zip(rows.iter()) {
            prop_assert!(std::ptr::eq(*kept, raw));
        }
    }

    /// Extending a query never adds rows.
    #[test]
    fn longer_query_narrows(
        rows in rows_strategy(),
        prefix in "[a-z]{0,3}",
        suffix in "[a-z]{1,3}",
    ) {
        let registry = registry();
        let columns: Vec<&Column> = registry.iter().collect();
        let wide = filter(&rows, &prefix, &columns);
        let narrow = filter(&rows, &format!("{prefix}{suffix}"), &columns);

        prop_assert!(narrow.len() <= wide.len());
        for row in &narrow {
            prop_assert!(wide.iter().any(|w| std::ptr::eq(*w, *row)));
        }
    }

    /// Every kept row really contains the query somewhere.
    #[test]
    fn kept_rows_contain_query(rows in rows_strategy(), query in "[a-z]{1,2}") {
        let registry = registry();
        let columns: Vec<&Column> = registry.iter().collect();
        for row in filter(&rows, &query, &columns) {
            let hit = ["n", "s", "b"]
                .iter()
                .any(|key| row.cell(key).to_text().to_lowercase().contains(&query));
            prop_assert!(hit);
        }
    }

    /// Sorting sorted output changes nothing.
    #[test]
    fn sort_is_idempotent(rows in rows_strategy(), desc in any::<bool>()) {
        let dir = if desc { Dir::Desc } else { Dir::Asc };
        let once = sort(&rows, "s", dir);
        let twice = sort(&once, "s", dir);
        prop_assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            prop_assert!(std::ptr::eq(*a, **b));
        }
    }

    /// With distinct keys, descending is ascending reversed.
    #[test]
    fn desc_is_reversed_asc(keys in prop::collection::btree_set(any::<i64>(), 0..40)) {
        let rows: Vec<Record> = keys.iter().rev().map(|k| Record::new().with("n", *k)).collect();
        let asc: Vec<String> = sort(&rows, "n", Dir::Asc).iter().map(|r| r.cell("n").to_text()).collect();
        let mut desc: Vec<String> = sort(&rows, "n", Dir::Desc).iter().map(|r| r.cell("n").to_text()).collect();
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    /// Sorting is a permutation of its input.
    #[test]
    fn sort_preserves_rows(rows in rows_strategy()) {
        let sorted = sort(&rows, "n", Dir::Asc);
        prop_assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            let a = pair[0].cell("n").as_number().map(|n| n.to_f64());
            let b = pair[1].cell("n").as_number().map(|n| n.to_f64());
            prop_assert!(a <= b);
        }
    }

    /// Visible columns always come out in registry order.
    #[test]
    fn visibility_keeps_registry_order(toggles in prop::collection::vec(0usize..4, 0..20)) {
        let registry = registry();
        let keys = ["n", "s", "b", "missing"];
        let mut visibility = VisibilityState::from_registry(&registry);
        for t in toggles {
            visibility.toggle(keys[t], &registry);
        }

        let visible: Vec<&str> = visibility
            .visible_columns(&registry)
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        let expected: Vec<&str> = registry
            .iter()
            .map(|c| c.key.as_str())
            .filter(|k| visibility.is_visible(k))
            .collect();
        prop_assert_eq!(visible, expected);
    }

    /// Toggling a column twice restores the previous visibility.
    #[test]
    fn double_toggle_is_identity(idx in 0usize..3) {
        let registry = registry();
        let key = ["n", "s", "b"][idx];
        let before = VisibilityState::from_registry(&registry);
        let mut after = before.clone();
        after.toggle(key, &registry);
        after.toggle(key, &registry);
        prop_assert_eq!(before, after);
    }

    /// Select-all covers the full dataset whatever the query hides.
    #[test]
    fn select_all_ignores_query(rows in rows_strategy(), query in "[a-z]{0,3}") {
        let total = rows.len();
        let mut grid = Grid::new(rows, registry());
        grid.set_query(query);
        grid.select_all(true);

        prop_assert!(grid.derived_rows().len() <= total);
        prop_assert_eq!(grid.selected_ids().len(), total);
        prop_assert_eq!(grid.is_all_selected(), total > 0);
    }

    /// Derived rows are filtered then sorted, and ids stay unique.
    #[test]
    fn derived_ids_are_unique(rows in rows_strategy(), query in "[a-z]{0,2}", sorts in 0usize..3) {
        let mut grid = Grid::new(rows, registry());
        grid.set_query(query);
        for _ in 0..sorts {
            grid.toggle_sort("n");
        }

        let mut seen = ids(&grid);
        let len = seen.len();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), len);
    }

    /// One CSV line per derived row plus the header.
    #[test]
    fn csv_line_count(rows in rows_strategy(), query in "[a-z]{0,2}") {
        let mut grid = Grid::new(rows, registry());
        grid.set_query(query);
        let text = grid.to_csv().unwrap();
        prop_assert_eq!(text.split('\n').count(), grid.derived_rows().len() + 1);
    }
}
