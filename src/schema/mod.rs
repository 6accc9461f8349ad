//! Schema manager for the `grid_ops` namespace.
//!
//! The grid model is five tables linked by foreign keys:
//!
//! ```text
//! substations <─┬── transmission_lines <── maintenance_records
//!               └── generator_connections ──> generators
//! ```
//!
//! [`GridTable`] lists them in creation order, which is also the order rows
//! must be inserted in. Creation uses `IF NOT EXISTS` throughout, so
//! [`SchemaManager::init_schema`] can be re-run safely; dropping always
//! removes the whole namespace. Because creation never alters an existing
//! table, [`SchemaManager::verify_schema`] compares the live catalog with the
//! declared definitions and reports every difference.

use std::fmt;

use tracing::{info, warn};

use crate::db::{Database, DbResult};
use crate::metadata::{MetadataInspector, MetadataProvider};
use crate::sql::ddl::{ColumnDef, CreateSchema, CreateTable, DataType, DdlStatement, DropSchema};

/// Name of the grid-operator namespace.
pub const GRID_OPS_SCHEMA: &str = "grid_ops";

/// The tables of the grid model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridTable {
    Substations,
    TransmissionLines,
    MaintenanceRecords,
    Generators,
    GeneratorConnections,
}

impl GridTable {
    /// Every table, referenced tables before referencing ones.
    pub const ALL: [GridTable; 5] = [
        GridTable::Substations,
        GridTable::TransmissionLines,
        GridTable::MaintenanceRecords,
        GridTable::Generators,
        GridTable::GeneratorConnections,
    ];

    /// Table name inside the namespace.
    pub fn name(&self) -> &'static str {
        match self {
            GridTable::Substations => "substations",
            GridTable::TransmissionLines => "transmission_lines",
            GridTable::MaintenanceRecords => "maintenance_records",
            GridTable::Generators => "generators",
            GridTable::GeneratorConnections => "generator_connections",
        }
    }

    /// Look a table up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// `CREATE TABLE IF NOT EXISTS` definition of this table.
    pub fn definition(&self) -> CreateTable {
        let table = CreateTable::new(self.name())
            .schema(GRID_OPS_SCHEMA)
            .if_not_exists();

        match self {
            GridTable::Substations => table.columns([
                ColumnDef::new("substation_id", DataType::Int32).primary_key(),
                ColumnDef::new("name", DataType::Varchar),
                ColumnDef::new("location", DataType::Varchar),
                ColumnDef::new("capacity_mw", DataType::Float64),
            ]),
            GridTable::TransmissionLines => table.columns([
                ColumnDef::new("line_id", DataType::Int32).primary_key(),
                ColumnDef::new("from_sub_id", DataType::Int32).references_in(
                    GRID_OPS_SCHEMA,
                    "substations",
                    "substation_id",
                ),
                ColumnDef::new("to_sub_id", DataType::Int32).references_in(
                    GRID_OPS_SCHEMA,
                    "substations",
                    "substation_id",
                ),
                ColumnDef::new("length_km", DataType::Float64),
                ColumnDef::new("voltage_kv", DataType::Float64),
            ]),
            GridTable::MaintenanceRecords => table.columns([
                ColumnDef::new("record_id", DataType::Int32).primary_key(),
                ColumnDef::new("line_id", DataType::Int32).references_in(
                    GRID_OPS_SCHEMA,
                    "transmission_lines",
                    "line_id",
                ),
                ColumnDef::new("date", DataType::Date),
                ColumnDef::new("description", DataType::Varchar),
            ]),
            GridTable::Generators => table.columns([
                ColumnDef::new("generator_id", DataType::Int32).primary_key(),
                ColumnDef::new("name", DataType::Varchar),
                ColumnDef::new("type", DataType::Varchar),
                ColumnDef::new("max_output_mw", DataType::Float64),
            ]),
            GridTable::GeneratorConnections => table.columns([
                ColumnDef::new("conn_id", DataType::Int32).primary_key(),
                ColumnDef::new("generator_id", DataType::Int32).references_in(
                    GRID_OPS_SCHEMA,
                    "generators",
                    "generator_id",
                ),
                ColumnDef::new("substation_id", DataType::Int32).references_in(
                    GRID_OPS_SCHEMA,
                    "substations",
                    "substation_id",
                ),
            ]),
        }
    }
}

impl fmt::Display for GridTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every statement `init_schema` runs, in order.
pub fn init_statements() -> Vec<DdlStatement> {
    let mut statements: Vec<DdlStatement> =
        vec![CreateSchema::new(GRID_OPS_SCHEMA).if_not_exists().into()];
    statements.extend(GridTable::ALL.iter().map(|t| t.definition().into()));
    statements
}

/// The full DDL as a `;`-terminated script.
pub fn ddl_script() -> String {
    let mut ddl = String::new();
    for stmt in init_statements() {
        ddl.push_str(&stmt.to_sql());
        ddl.push_str(";\n");
    }
    ddl
}

/// Creates and drops the grid namespace on a [`Database`].
pub struct SchemaManager<'a> {
    db: &'a Database,
}

impl<'a> SchemaManager<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Drop a namespace and everything in it. Succeeds when it is absent.
    pub fn drop_schema(&self, name: &str) -> DbResult<()> {
        let sql = DropSchema::new(name).if_exists().cascade().to_sql();
        self.db.execute(&sql)?;
        info!(schema = name, "dropped schema");
        Ok(())
    }

    /// Ensure the namespace and its five tables exist.
    ///
    /// Existing objects are left alone; a pre-existing table with a
    /// different definition is not reconciled.
    pub fn init_schema(&self) -> DbResult<()> {
        for stmt in init_statements() {
            self.db.execute(&stmt.to_sql())?;
        }
        info!(
            schema = GRID_OPS_SCHEMA,
            tables = GridTable::ALL.len(),
            "initialized schema"
        );
        Ok(())
    }

    /// Number of rows currently in a grid table.
    pub fn row_count(&self, table: GridTable) -> DbResult<u64> {
        self.db.count_rows(GRID_OPS_SCHEMA, table.name())
    }

    /// Compare the catalog's view of `grid_ops` with [`GridTable::definition`].
    ///
    /// An empty result means every table exists with exactly the declared
    /// columns and types.
    pub fn verify_schema(&self) -> DbResult<Vec<SchemaDrift>> {
        let inspector = MetadataInspector::new(self.db);
        let mut drift = Vec::new();

        for table in GridTable::ALL {
            let rows = inspector.list_columns(table.name(), None)?;
            if rows.is_empty() {
                drift.push(SchemaDrift::MissingTable(table));
                continue;
            }

            let found: Vec<(&str, &str)> = rows
                .iter()
                .filter_map(|row| {
                    Some((row.get_str("column_name")?, row.get_str("data_type")?))
                })
                .collect();
            let definition = table.definition();

            for col in &definition.columns {
                match found.iter().find(|(name, _)| *name == col.name) {
                    None => drift.push(SchemaDrift::MissingColumn {
                        table,
                        column: col.name.clone(),
                    }),
                    Some((_, data_type)) if DataType::parse(data_type) != Some(col.data_type) => {
                        drift.push(SchemaDrift::TypeMismatch {
                            table,
                            column: col.name.clone(),
                            expected: col.data_type,
                            found: data_type.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }

            for (name, _) in &found {
                if !definition.columns.iter().any(|c| c.name == *name) {
                    drift.push(SchemaDrift::UnexpectedColumn {
                        table,
                        column: name.to_string(),
                    });
                }
            }
        }

        if !drift.is_empty() {
            warn!(schema = GRID_OPS_SCHEMA, differences = drift.len(), "schema drift");
        }
        Ok(drift)
    }
}

/// One difference between the live catalog and the declared grid tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDrift {
    MissingTable(GridTable),
    MissingColumn {
        table: GridTable,
        column: String,
    },
    UnexpectedColumn {
        table: GridTable,
        column: String,
    },
    TypeMismatch {
        table: GridTable,
        column: String,
        expected: DataType,
        found: String,
    },
}

impl fmt::Display for SchemaDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDrift::MissingTable(table) => write!(f, "{}: table missing", table),
            SchemaDrift::MissingColumn { table, column } => {
                write!(f, "{}.{}: column missing", table, column)
            }
            SchemaDrift::UnexpectedColumn { table, column } => {
                write!(f, "{}.{}: column not declared", table, column)
            }
            SchemaDrift::TypeMismatch {
                table,
                column,
                expected,
                found,
            } => write!(f, "{}.{}: expected {}, found {}", table, column, expected, found),
        }
    }
}
