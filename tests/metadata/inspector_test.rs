//! Integration tests for catalog introspection.

use grid_ops::metadata::{CatalogView, MetadataInspector, MetadataProvider};
use grid_ops::{Database, SchemaManager, SeedLoader, GRID_OPS_SCHEMA};

fn seeded() -> Database {
    let db = Database::open_in_memory().unwrap();
    let manager = SchemaManager::new(&db);
    manager.drop_schema(GRID_OPS_SCHEMA).unwrap();
    manager.init_schema().unwrap();
    SeedLoader::new(&db).insert_sample_data().unwrap();
    db
}

fn strings<'a>(rows: &'a [grid_ops::CatalogRow], column: &str) -> Vec<&'a str> {
    rows.iter().filter_map(|row| row.get_str(column)).collect()
}

#[test]
fn test_list_columns_for_substations() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);

    let rows = inspector.list_columns("substations", Some("grid_ops")).unwrap();
    assert_eq!(
        strings(&rows, "column_name"),
        ["substation_id", "name", "location", "capacity_mw"]
    );
    assert_eq!(
        strings(&rows, "data_type"),
        ["INTEGER", "VARCHAR", "VARCHAR", "DOUBLE"]
    );
    assert!(rows
        .iter()
        .all(|row| row.get_str("table_name") == Some("substations")));
}

#[test]
fn test_list_columns_for_unknown_table_is_empty() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);
    assert!(inspector.list_columns("no_such_table", None).unwrap().is_empty());
    assert!(inspector
        .list_columns("substations", Some("main"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_list_tables_within_grid_ops() {
    let db = seeded();
    let rows = MetadataInspector::new(&db).list_tables().unwrap();

    let mut names: Vec<&str> = rows
        .iter()
        .filter(|row| row.get_str("schema_name") == Some(GRID_OPS_SCHEMA))
        .filter_map(|row| row.get_str("table_name"))
        .collect();
    names.sort_unstable();
    assert_eq!(
        names,
        [
            "generator_connections",
            "generators",
            "maintenance_records",
            "substations",
            "transmission_lines"
        ]
    );
}

#[test]
fn test_list_schemas_contains_grid_ops() {
    let db = seeded();
    let rows = MetadataInspector::new(&db).list_schemas().unwrap();
    let names = strings(&rows, "schema_name");
    assert!(names.contains(&GRID_OPS_SCHEMA));
    assert!(names.contains(&"main"));
}

#[test]
fn test_list_views_shows_user_view() {
    let db = seeded();
    db.execute(
        "CREATE VIEW grid_ops.high_voltage_lines AS \
         SELECT * FROM grid_ops.transmission_lines WHERE voltage_kv >= 220",
    )
    .unwrap();

    let rows = MetadataInspector::new(&db).list_views().unwrap();
    assert!(rows.iter().any(|row| {
        row.get_str("schema_name") == Some(GRID_OPS_SCHEMA)
            && row.get_str("view_name") == Some("high_voltage_lines")
    }));
}

#[test]
fn test_catalog_calls_do_not_mutate() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);

    let before = inspector.list_tables().unwrap();
    for view in CatalogView::ALL {
        if view != CatalogView::Columns {
            inspector.list(view).unwrap();
        }
    }
    inspector.list_dependencies().unwrap();
    inspector.list_databases().unwrap();

    let after = inspector.list_tables().unwrap();
    assert_eq!(strings(&before, "table_name"), strings(&after, "table_name"));
    assert_eq!(
        SchemaManager::new(&db)
            .row_count(grid_ops::GridTable::MaintenanceRecords)
            .unwrap(),
        6
    );
}

#[test]
fn test_rows_serialize_as_objects() {
    let db = seeded();
    let rows = MetadataInspector::new(&db)
        .list_columns("generators", None)
        .unwrap();
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[2]["column_name"], "type");
    assert_eq!(json[2]["schema_name"], GRID_OPS_SCHEMA);
}

#[test]
fn test_map_columns_serialize_as_objects() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);

    let databases = serde_json::to_value(inspector.list_databases().unwrap()).unwrap();
    let memory = databases
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["database_name"] == "memory")
        .unwrap();
    assert_eq!(memory["tags"], serde_json::json!({}));

    let tables = serde_json::to_value(inspector.list_tables().unwrap()).unwrap();
    for table in tables.as_array().unwrap() {
        assert!(table["tags"].is_object(), "tags of {}", table["table_name"]);
    }
}
