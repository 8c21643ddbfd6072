use gridline::{
    Column, ColumnRegistry, Grid, GridConfig, GridDefinition, GridRow, Record, RowId, Timestamp,
};
use insta::{assert_json_snapshot, assert_snapshot, assert_yaml_snapshot};

fn papers() -> Grid<Record> {
    let registry = ColumnRegistry::new(vec![
        Column::new("title", "Title").sortable(),
        Column::new("year", "Year").sortable(),
        Column::new("open", "Open Access"),
        Column::new("added", "Added").sortable(),
        Column::new("doi", "DOI").hidden(),
    ])
    .unwrap();

    let rows = vec![
        Record::new()
            .with("title", "Bloom Filters")
            .with("year", 1970)
            .with("open", false)
            .with("added", Timestamp::from_secs(1_700_000_000))
            .with("doi", "10.1145/362686.362692"),
        Record::new()
            .with("title", "Graph Search, Revisited")
            .with("year", 2019)
            .with("open", true)
            .with("added", Timestamp::from_millis(1_600_000_000_250)),
        Record::new()
            .with("title", "The \"Quoted\" Paper")
            .with("year", 2001.5)
            .with("open", true),
    ];
    Grid::new(rows, registry)
}

#[test]
fn test_snapshots_default_export() {
    let mut grid = papers();
    grid.toggle_sort("year");

    assert_snapshot!(grid.to_csv().unwrap(), @r#"
    Title,Year,Open Access,Added
    "Bloom Filters",1970,false,2023-11-14T22:13:20.000Z
    "The "Quoted" Paper",2001.5,true,
    "Graph Search, Revisited",2019,true,2020-09-13T12:26:40.250Z
    "#);
}

#[test]
fn test_snapshots_rfc4180_export() {
    let config = GridConfig::from_json(r#"{"export": {"quote": "rfc4180"}}"#).unwrap();
    let base = papers();
    let mut grid = Grid::with_config(base.raw_rows().to_vec(), base.registry().clone(), config);
    grid.toggle_column("doi");
    grid.toggle_sort("title");
    grid.toggle_sort("title");

    assert_snapshot!(grid.to_csv().unwrap(), @r#"
    Title,Year,Open Access,Added,DOI
    "The ""Quoted"" Paper",2001.5,true,,
    "Graph Search, Revisited",2019,true,2020-09-13T12:26:40.250Z,
    Bloom Filters,1970,false,2023-11-14T22:13:20.000Z,10.1145/362686.362692
    "#);
}

#[test]
fn test_snapshots_filtered_selection() {
    let mut grid = papers();
    grid.set_query("2019");
    grid.toggle_row(RowId::new(0), true);

    let selected: Vec<String> = grid
        .selected_rows()
        .iter()
        .map(|r| r.cell("title").to_text())
        .collect();
    assert_snapshot!(grid.to_csv().unwrap(), @r#"
    Title,Year,Open Access,Added
    "Graph Search, Revisited",2019,true,2020-09-13T12:26:40.250Z
    "#);
    assert_yaml_snapshot!(selected, @r#"
    - Bloom Filters
    "#);
}

#[test]
fn test_snapshots_default_config() {
    assert_json_snapshot!(GridConfig::default(), @r#"
    {
      "filter_scope": "all_visible",
      "export": {
        "file_name": "data-export.csv",
        "quote": "by_type"
      }
    }
    "#);
}

#[test]
fn test_snapshots_definition_round_trip() {
    let definition = GridDefinition::from_yaml(
        "columns:\n  - { key: title, label: Title, sortable: true }\nfilter_scope: filterable_only\n",
    )
    .unwrap();

    assert_yaml_snapshot!(definition, @r#"
    columns:
      - key: title
        label: Title
        sortable: true
        filterable: true
        hidden: false
    filter_scope: filterable_only
    export:
      file_name: data-export.csv
      quote: by_type
    "#);
}
