//! Integration tests for schema creation and removal.

use grid_ops::metadata::{MetadataInspector, MetadataProvider};
use grid_ops::{Database, GridTable, SchemaManager, GRID_OPS_SCHEMA};

fn grid_tables(db: &Database) -> Vec<String> {
    let mut names: Vec<String> = MetadataInspector::new(db)
        .list_tables()
        .unwrap()
        .iter()
        .filter(|row| row.get_str("schema_name") == Some(GRID_OPS_SCHEMA))
        .filter_map(|row| row.get_str("table_name").map(str::to_string))
        .collect();
    names.sort();
    names
}

fn expected_tables() -> Vec<String> {
    let mut names: Vec<String> = GridTable::ALL.iter().map(|t| t.name().to_string()).collect();
    names.sort();
    names
}

fn column_names(db: &Database, table: GridTable) -> Vec<String> {
    MetadataInspector::new(db)
        .list_columns(table.name(), None)
        .unwrap()
        .iter()
        .filter_map(|row| row.get_str("column_name").map(str::to_string))
        .collect()
}

#[test]
fn test_drop_then_init_yields_five_empty_tables() {
    let db = Database::open_in_memory().unwrap();
    let manager = SchemaManager::new(&db);

    manager.drop_schema(GRID_OPS_SCHEMA).unwrap();
    manager.init_schema().unwrap();

    assert_eq!(grid_tables(&db), expected_tables());
    for table in GridTable::ALL {
        assert_eq!(manager.row_count(table).unwrap(), 0, "{} not empty", table);
    }
}

#[test]
fn test_column_sets_match_definitions() {
    let db = Database::open_in_memory().unwrap();
    SchemaManager::new(&db).init_schema().unwrap();

    for table in GridTable::ALL {
        let expected: Vec<String> = table
            .definition()
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(column_names(&db, table), expected, "columns of {}", table);
    }

    assert_eq!(
        column_names(&db, GridTable::MaintenanceRecords),
        ["record_id", "line_id", "date", "description"]
    );
    assert_eq!(
        column_names(&db, GridTable::GeneratorConnections),
        ["conn_id", "generator_id", "substation_id"]
    );
}

#[test]
fn test_init_twice_is_harmless() {
    let db = Database::open_in_memory().unwrap();
    let manager = SchemaManager::new(&db);

    manager.init_schema().unwrap();
    manager.init_schema().unwrap();

    assert_eq!(grid_tables(&db), expected_tables());
}

#[test]
fn test_drop_removes_populated_schema() {
    let db = Database::open_in_memory().unwrap();
    let manager = SchemaManager::new(&db);
    manager.init_schema().unwrap();
    grid_ops::SeedLoader::new(&db).insert_sample_data().unwrap();

    manager.drop_schema(GRID_OPS_SCHEMA).unwrap();
    assert!(grid_tables(&db).is_empty());

    let schemas = MetadataInspector::new(&db).list_schemas().unwrap();
    assert!(!schemas
        .iter()
        .any(|row| row.get_str("schema_name") == Some(GRID_OPS_SCHEMA)));

    // Re-initializing after a drop starts from empty tables.
    manager.init_schema().unwrap();
    assert_eq!(manager.row_count(GridTable::Substations).unwrap(), 0);
}

#[test]
fn test_drop_other_schema_leaves_grid_ops() {
    let db = Database::open_in_memory().unwrap();
    let manager = SchemaManager::new(&db);
    manager.init_schema().unwrap();
    db.execute("CREATE SCHEMA scratch; CREATE TABLE scratch.t (x INTEGER);")
        .unwrap();

    manager.drop_schema("scratch").unwrap();
    manager.drop_schema("never_existed").unwrap();

    assert_eq!(grid_tables(&db), expected_tables());
}

#[test]
fn test_schema_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("grid.duckdb");

    {
        let db = Database::open(&path).unwrap();
        SchemaManager::new(&db).init_schema().unwrap();
        grid_ops::SeedLoader::new(&db).insert_sample_data().unwrap();
        db.close().unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.path(), Some(path.as_path()));
    assert_eq!(grid_tables(&db), expected_tables());
    assert_eq!(
        SchemaManager::new(&db).row_count(GridTable::Substations).unwrap(),
        3
    );
}
