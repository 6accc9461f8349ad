//! Integration tests for the tool registry against a live catalog.

use grid_ops::metadata::MetadataInspector;
use grid_ops::tools::{descriptors, invoke_json, ToolCall, ToolError, TOOL_NAMES};
use grid_ops::{Database, SchemaManager, SeedLoader};
use serde_json::{json, Value};

fn seeded() -> Database {
    let db = Database::open_in_memory().unwrap();
    SchemaManager::new(&db).init_schema().unwrap();
    SeedLoader::new(&db).insert_sample_data().unwrap();
    db
}

#[test]
fn test_every_registered_tool_dispatches() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);
    let args = json!({ "table_name": "substations" });

    for name in TOOL_NAMES {
        let value = invoke_json(&inspector, name, &args)
            .unwrap_or_else(|e| panic!("{} failed: {}", name, e));
        assert!(value.is_array(), "{} did not return an array", name);
    }
}

#[test]
fn test_list_columns_tool() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);

    let value = invoke_json(
        &inspector,
        "list_columns",
        &json!({ "table_name": "substations", "schema_name": "grid_ops" }),
    )
    .unwrap();
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|row| row["column_name"].as_str())
        .collect();
    assert_eq!(names, ["substation_id", "name", "location", "capacity_mw"]);

    let defaulted = invoke_json(
        &inspector,
        "list_columns",
        &json!({ "table_name": "substations" }),
    )
    .unwrap();
    assert_eq!(defaulted, value);
}

#[test]
fn test_typed_call_matches_json_call() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);

    let rows = ToolCall::ListTables.invoke(&inspector).unwrap();
    let value = invoke_json(&inspector, "list_tables", &Value::Null).unwrap();
    assert_eq!(serde_json::to_value(rows).unwrap(), value);
}

#[test]
fn test_unknown_tool_is_rejected() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);

    let err = invoke_json(&inspector, "insert_sample_data", &Value::Null).unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "insert_sample_data"));
}

#[test]
fn test_missing_table_name_is_rejected() {
    let db = seeded();
    let inspector = MetadataInspector::new(&db);

    let err = invoke_json(&inspector, "list_columns", &json!({})).unwrap_err();
    assert!(matches!(
        err,
        ToolError::MissingArgument {
            tool: "list_columns",
            argument: "table_name"
        }
    ));
    assert_eq!(
        err.to_string(),
        "Tool 'list_columns' requires argument 'table_name'"
    );
}

#[test]
fn test_descriptors_serialize() {
    let value = serde_json::to_value(descriptors()).unwrap();
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert_eq!(names, TOOL_NAMES);
    assert_eq!(
        value[4]["parameters"]["properties"]["schema_name"]["default"],
        "grid_ops"
    );
}
