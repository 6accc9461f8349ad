//! Catalog introspection.
//!
//! DuckDB describes itself through table functions. This module wraps the
//! six the grid tooling needs behind [`MetadataProvider`]:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   MetadataProvider                        │
//! │  list_databases()     -> duckdb_databases()               │
//! │  list_schemas()       -> duckdb_schemas()                 │
//! │  list_tables()        -> duckdb_tables()                  │
//! │  list_views()         -> duckdb_views()                   │
//! │  list_columns(t, s)   -> duckdb_columns() WHERE s, t      │
//! │  list_dependencies()  -> duckdb_dependencies()            │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!                  MetadataInspector (&Database)
//! ```
//!
//! Rows keep whatever columns the engine reports; nothing here fixes their
//! shape.
//!
//! # Example
//!
//! ```no_run
//! use grid_ops::db::Database;
//! use grid_ops::metadata::{MetadataInspector, MetadataProvider};
//!
//! let db = Database::open("grid.duckdb")?;
//! let inspector = MetadataInspector::new(&db);
//! for row in inspector.list_columns("substations", None)? {
//!     println!("{}", row.get_str("column_name").unwrap_or_default());
//! }
//! # Ok::<(), grid_ops::db::DbError>(())
//! ```

mod inspector;
mod provider;
mod types;

pub use inspector::MetadataInspector;
pub use provider::{CatalogView, MetadataProvider, MetadataResult};
pub use types::{CatalogRow, CatalogValue};
