//! DuckDB-backed [`MetadataProvider`].

use duckdb::types::Value;
use duckdb::{params, ToSql};
use tracing::debug;

use crate::db::Database;
use crate::schema::GRID_OPS_SCHEMA;
use crate::sql::query::CatalogQuery;

use super::provider::{CatalogView, MetadataProvider, MetadataResult};
use super::types::{CatalogRow, CatalogValue};

/// Reads catalog table functions through a borrowed [`Database`].
pub struct MetadataInspector<'a> {
    db: &'a Database,
}

impl<'a> MetadataInspector<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All rows of a catalog view.
    pub fn list(&self, view: CatalogView) -> MetadataResult<Vec<CatalogRow>> {
        self.query(&CatalogQuery::from_function(view.function_name()), params![])
    }

    fn query(&self, query: &CatalogQuery, args: &[&dyn ToSql]) -> MetadataResult<Vec<CatalogRow>> {
        let sql = query.to_sql();
        debug!(sql = %sql, "catalog query");

        let mut stmt = self.db.connection().prepare(&sql)?;
        let mut rows = stmt.query(args)?;
        let columns: Vec<String> = rows
            .as_ref()
            .map(|stmt| stmt.column_names())
            .unwrap_or_default();

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut fields = Vec::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                let value: Value = row.get(idx)?;
                fields.push((name.clone(), CatalogValue::from(value)));
            }
            out.push(CatalogRow::new(fields));
        }

        debug!(function = %query.function, rows = out.len(), "catalog rows");
        Ok(out)
    }
}

impl MetadataProvider for MetadataInspector<'_> {
    fn list_databases(&self) -> MetadataResult<Vec<CatalogRow>> {
        self.list(CatalogView::Databases)
    }

    fn list_schemas(&self) -> MetadataResult<Vec<CatalogRow>> {
        self.list(CatalogView::Schemas)
    }

    fn list_tables(&self) -> MetadataResult<Vec<CatalogRow>> {
        self.list(CatalogView::Tables)
    }

    fn list_views(&self) -> MetadataResult<Vec<CatalogRow>> {
        self.list(CatalogView::Views)
    }

    fn list_columns(
        &self,
        table_name: &str,
        schema_name: Option<&str>,
    ) -> MetadataResult<Vec<CatalogRow>> {
        let schema_name = schema_name.unwrap_or(GRID_OPS_SCHEMA);
        let query = CatalogQuery::from_function(CatalogView::Columns.function_name())
            .filter_eq("schema_name")
            .filter_eq("table_name");
        self.query(&query, params![schema_name, table_name])
    }

    fn list_dependencies(&self) -> MetadataResult<Vec<CatalogRow>> {
        self.list(CatalogView::Dependencies)
    }
}
