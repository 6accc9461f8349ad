//! MetadataProvider trait definition.

use crate::db::DbError;

use super::types::CatalogRow;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, DbError>;

/// The catalog table functions the provider reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogView {
    Databases,
    Schemas,
    Tables,
    Views,
    Columns,
    Dependencies,
}

impl CatalogView {
    pub const ALL: [CatalogView; 6] = [
        CatalogView::Databases,
        CatalogView::Schemas,
        CatalogView::Tables,
        CatalogView::Views,
        CatalogView::Columns,
        CatalogView::Dependencies,
    ];

    /// Name of the DuckDB table function backing this view.
    pub fn function_name(&self) -> &'static str {
        match self {
            CatalogView::Databases => "duckdb_databases",
            CatalogView::Schemas => "duckdb_schemas",
            CatalogView::Tables => "duckdb_tables",
            CatalogView::Views => "duckdb_views",
            CatalogView::Columns => "duckdb_columns",
            CatalogView::Dependencies => "duckdb_dependencies",
        }
    }
}

/// Read-only access to catalog metadata.
///
/// Every method returns the engine's rows in the order the engine produced
/// them and performs no mutation.
pub trait MetadataProvider {
    /// Databases attached to the connection.
    fn list_databases(&self) -> MetadataResult<Vec<CatalogRow>>;

    /// Schemas (namespaces) across attached databases.
    fn list_schemas(&self) -> MetadataResult<Vec<CatalogRow>>;

    /// Base tables.
    fn list_tables(&self) -> MetadataResult<Vec<CatalogRow>>;

    /// Views, including the engine's own.
    fn list_views(&self) -> MetadataResult<Vec<CatalogRow>>;

    /// Columns of one table, matched exactly on schema and table name.
    ///
    /// `schema_name` defaults to `grid_ops` when `None`.
    fn list_columns(
        &self,
        table_name: &str,
        schema_name: Option<&str>,
    ) -> MetadataResult<Vec<CatalogRow>>;

    /// Dependencies between catalog objects.
    fn list_dependencies(&self) -> MetadataResult<Vec<CatalogRow>>;
}
