//! Integration tests for sample data seeding.

use duckdb::params;
use grid_ops::seed::{insert_transmission_line, TransmissionLine};
use grid_ops::{Database, GridTable, SampleData, SchemaManager, SeedLoader, GRID_OPS_SCHEMA};

fn initialized() -> Database {
    let db = Database::open_in_memory().unwrap();
    let manager = SchemaManager::new(&db);
    manager.drop_schema(GRID_OPS_SCHEMA).unwrap();
    manager.init_schema().unwrap();
    db
}

#[test]
fn test_row_counts_after_seed() {
    let db = initialized();
    let summary = SeedLoader::new(&db).insert_sample_data().unwrap();
    assert_eq!(summary.total(), 16);

    let manager = SchemaManager::new(&db);
    let counts: Vec<u64> = GridTable::ALL
        .iter()
        .map(|t| manager.row_count(*t).unwrap())
        .collect();
    assert_eq!(counts, [3, 3, 6, 2, 2]);
}

#[test]
fn test_seeded_values_are_literal() {
    let db = initialized();
    SeedLoader::new(&db).insert_sample_data().unwrap();

    let (name, capacity): (String, f64) = db
        .connection()
        .query_row(
            "SELECT name, capacity_mw FROM grid_ops.substations WHERE substation_id = 2",
            params![],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "Rotterdam Noord Substation");
    assert_eq!(capacity, 350.0);

    let (kind, date): (String, String) = db
        .connection()
        .query_row(
            "SELECT g.\"type\", CAST(m.\"date\" AS VARCHAR) \
             FROM grid_ops.generators g, grid_ops.maintenance_records m \
             WHERE g.generator_id = 1 AND m.record_id = 6",
            params![],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(kind, "Wind");
    assert_eq!(date, "2025-04-15");
}

#[test]
fn test_second_seed_violates_uniqueness() {
    let db = initialized();
    let loader = SeedLoader::new(&db);
    loader.insert_sample_data().unwrap();

    let err = loader.insert_sample_data().unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);

    // The first row of the first table fails, nothing new lands.
    assert_eq!(
        SchemaManager::new(&db).row_count(GridTable::Substations).unwrap(),
        3
    );
}

#[test]
fn test_dangling_substation_reference_is_rejected() {
    let db = initialized();
    SeedLoader::new(&db).insert_sample_data().unwrap();

    let dangling = TransmissionLine {
        line_id: 4,
        from_sub_id: 99,
        to_sub_id: 1,
        length_km: 10.0,
        voltage_kv: 110.0,
    };
    let err = insert_transmission_line(&db, &dangling).unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {}", err);

    let valid = TransmissionLine {
        from_sub_id: 2,
        ..dangling
    };
    insert_transmission_line(&db, &valid).unwrap();
    assert_eq!(
        SchemaManager::new(&db)
            .row_count(GridTable::TransmissionLines)
            .unwrap(),
        4
    );
}

#[test]
fn test_seed_without_schema_fails() {
    let db = Database::open_in_memory().unwrap();
    let err = SeedLoader::new(&db).insert_sample_data().unwrap_err();
    assert!(!err.is_constraint_violation());
}

#[test]
fn test_custom_data_set() {
    let db = initialized();
    let mut data = SampleData::grid_ops();
    data.maintenance_records.clear();
    data.generator_connections.truncate(1);

    let summary = SeedLoader::new(&db).insert(&data).unwrap();
    assert_eq!(summary.maintenance_records, 0);
    assert_eq!(summary.generator_connections, 1);
    assert_eq!(summary.total(), 3 + 3 + 2 + 1);
}
