//! Tool registry for agent callers.
//!
//! Each catalog operation is one [`ToolCall`] variant, and [`ToolCall::invoke`]
//! dispatches all of them through a single `match`, so the registered set is
//! closed and checked at compile time. Agents that only have a tool name and
//! a JSON argument object go through [`ToolCall::from_json`] or
//! [`invoke_json`].

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::db::DbError;
use crate::metadata::{CatalogRow, MetadataProvider};
use crate::schema::GRID_OPS_SCHEMA;

/// Errors raised while resolving or running a tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool '{tool}' requires argument '{argument}'")]
    MissingArgument {
        tool: &'static str,
        argument: &'static str,
    },

    #[error("Tool '{tool}' argument '{argument}' must be {expected}")]
    InvalidArgument {
        tool: &'static str,
        argument: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// Names of every registered tool.
pub const TOOL_NAMES: [&str; 6] = [
    "list_databases",
    "list_schemas",
    "list_tables",
    "list_views",
    "list_columns",
    "list_dependencies",
];

/// A resolved invocation of one registered tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    ListDatabases,
    ListSchemas,
    ListTables,
    ListViews,
    ListColumns {
        table_name: String,
        schema_name: Option<String>,
    },
    ListDependencies,
}

impl ToolCall {
    /// Registered name of this tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::ListDatabases => "list_databases",
            ToolCall::ListSchemas => "list_schemas",
            ToolCall::ListTables => "list_tables",
            ToolCall::ListViews => "list_views",
            ToolCall::ListColumns { .. } => "list_columns",
            ToolCall::ListDependencies => "list_dependencies",
        }
    }

    /// Build a call from a tool name and its JSON arguments.
    ///
    /// `args` may be `null` or an object; unknown keys are ignored.
    pub fn from_json(name: &str, args: &Value) -> ToolResult<Self> {
        let empty = Map::new();
        let args = match args {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => {
                return Err(ToolError::InvalidArgument {
                    tool: registered_name(name)?,
                    argument: "arguments",
                    expected: "a JSON object",
                })
            }
        };

        match name {
            "list_databases" => Ok(ToolCall::ListDatabases),
            "list_schemas" => Ok(ToolCall::ListSchemas),
            "list_tables" => Ok(ToolCall::ListTables),
            "list_views" => Ok(ToolCall::ListViews),
            "list_columns" => {
                let table_name = string_arg(args, "list_columns", "table_name")?.ok_or(
                    ToolError::MissingArgument {
                        tool: "list_columns",
                        argument: "table_name",
                    },
                )?;
                let schema_name = string_arg(args, "list_columns", "schema_name")?;
                Ok(ToolCall::ListColumns {
                    table_name,
                    schema_name,
                })
            }
            "list_dependencies" => Ok(ToolCall::ListDependencies),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// Run the call against a metadata provider.
    pub fn invoke<P: MetadataProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> ToolResult<Vec<CatalogRow>> {
        debug!(tool = self.name(), "invoke tool");
        let rows = match self {
            ToolCall::ListDatabases => provider.list_databases()?,
            ToolCall::ListSchemas => provider.list_schemas()?,
            ToolCall::ListTables => provider.list_tables()?,
            ToolCall::ListViews => provider.list_views()?,
            ToolCall::ListColumns {
                table_name,
                schema_name,
            } => provider.list_columns(table_name, schema_name.as_deref())?,
            ToolCall::ListDependencies => provider.list_dependencies()?,
        };
        Ok(rows)
    }
}

fn registered_name(name: &str) -> ToolResult<&'static str> {
    TOOL_NAMES
        .iter()
        .copied()
        .find(|n| *n == name)
        .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
}

fn string_arg(
    args: &Map<String, Value>,
    tool: &'static str,
    argument: &'static str,
) -> ToolResult<Option<String>> {
    match args.get(argument) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::InvalidArgument {
            tool,
            argument,
            expected: "a string",
        }),
    }
}

/// Resolve, run and serialize a tool call in one step.
pub fn invoke_json<P: MetadataProvider + ?Sized>(
    provider: &P,
    name: &str,
    args: &Value,
) -> ToolResult<Value> {
    let call = ToolCall::from_json(name, args)?;
    let rows = call.invoke(provider)?;
    Ok(serde_json::to_value(rows)?)
}

/// Name, description and parameter schema of a tool, as handed to an agent.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Descriptors for every registered tool, in [`TOOL_NAMES`] order.
pub fn descriptors() -> Vec<ToolDescriptor> {
    let no_params = || json!({ "type": "object", "properties": {} });

    TOOL_NAMES
        .iter()
        .map(|&name| {
            let (description, parameters) = match name {
                "list_databases" => ("List accessible databases.", no_params()),
                "list_schemas" => ("List schemas in the current database.", no_params()),
                "list_tables" => ("List base tables in the current database.", no_params()),
                "list_views" => ("List views in the current database.", no_params()),
                "list_columns" => (
                    "List columns for a given table.",
                    json!({
                        "type": "object",
                        "properties": {
                            "table_name": { "type": "string" },
                            "schema_name": { "type": "string", "default": GRID_OPS_SCHEMA }
                        },
                        "required": ["table_name"]
                    }),
                ),
                _ => ("List dependencies between objects.", no_params()),
            };
            ToolDescriptor {
                name,
                description,
                parameters,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{CatalogValue, MetadataResult};
    use std::cell::RefCell;

    /// Records which provider method ran.
    #[derive(Default)]
    struct RecordingProvider {
        calls: RefCell<Vec<String>>,
    }

    impl RecordingProvider {
        fn record(&self, call: String) -> MetadataResult<Vec<CatalogRow>> {
            self.calls.borrow_mut().push(call.clone());
            Ok(vec![CatalogRow::new(vec![(
                "call".to_string(),
                CatalogValue::Text(call),
            )])])
        }
    }

    impl MetadataProvider for RecordingProvider {
        fn list_databases(&self) -> MetadataResult<Vec<CatalogRow>> {
            self.record("databases".into())
        }
        fn list_schemas(&self) -> MetadataResult<Vec<CatalogRow>> {
            self.record("schemas".into())
        }
        fn list_tables(&self) -> MetadataResult<Vec<CatalogRow>> {
            self.record("tables".into())
        }
        fn list_views(&self) -> MetadataResult<Vec<CatalogRow>> {
            self.record("views".into())
        }
        fn list_columns(
            &self,
            table_name: &str,
            schema_name: Option<&str>,
        ) -> MetadataResult<Vec<CatalogRow>> {
            self.record(format!("columns:{}:{}", schema_name.unwrap_or("-"), table_name))
        }
        fn list_dependencies(&self) -> MetadataResult<Vec<CatalogRow>> {
            self.record("dependencies".into())
        }
    }

    #[test]
    fn test_every_name_resolves_to_its_call() {
        let args = json!({ "table_name": "substations" });
        for name in TOOL_NAMES {
            let call = ToolCall::from_json(name, &args).unwrap();
            assert_eq!(call.name(), name);
        }
    }

    #[test]
    fn test_dispatch_reaches_provider() {
        let provider = RecordingProvider::default();
        for name in TOOL_NAMES {
            ToolCall::from_json(name, &json!({ "table_name": "lines" }))
                .unwrap()
                .invoke(&provider)
                .unwrap();
        }
        assert_eq!(
            *provider.calls.borrow(),
            vec![
                "databases",
                "schemas",
                "tables",
                "views",
                "columns:-:lines",
                "dependencies"
            ]
        );
    }

    #[test]
    fn test_list_columns_arguments() {
        let call = ToolCall::from_json(
            "list_columns",
            &json!({ "table_name": "generators", "schema_name": "main" }),
        )
        .unwrap();
        assert_eq!(
            call,
            ToolCall::ListColumns {
                table_name: "generators".into(),
                schema_name: Some("main".into()),
            }
        );

        let err = ToolCall::from_json("list_columns", &Value::Null).unwrap_err();
        assert!(matches!(
            err,
            ToolError::MissingArgument {
                argument: "table_name",
                ..
            }
        ));

        let err = ToolCall::from_json("list_columns", &json!({ "table_name": 3 })).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[test]
    fn test_unknown_tool() {
        let err = ToolCall::from_json("drop_everything", &Value::Null).unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref n) if n == "drop_everything"));

        let err = ToolCall::from_json("drop_everything", &json!([1])).unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }

    #[test]
    fn test_non_object_arguments() {
        let err = ToolCall::from_json("list_tables", &json!("x")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[test]
    fn test_invoke_json() {
        let provider = RecordingProvider::default();
        let value = invoke_json(&provider, "list_views", &Value::Null).unwrap();
        assert_eq!(value, json!([{ "call": "views" }]));
    }

    #[test]
    fn test_descriptors_cover_registry() {
        let descriptors = descriptors();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name).collect();
        assert_eq!(names, TOOL_NAMES);
        let columns = &descriptors[4];
        assert_eq!(columns.parameters["required"], json!(["table_name"]));
        assert_eq!(
            descriptors[5].description,
            "List dependencies between objects."
        );
    }
}
