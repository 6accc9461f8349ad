//! SQL generation module.
//!
//! Every statement the crate sends to DuckDB is built here:
//!
//! - [`ddl`] - CREATE/DROP SCHEMA, CREATE TABLE
//! - [`dml`] - INSERT with positional placeholders
//! - [`query`] - SELECT over catalog table functions
//! - [`token`] - Token types for SQL generation
//! - [`types`] - Column data types

pub mod ddl;
pub mod dml;
pub mod query;
pub mod token;
pub mod types;

pub use ddl::{ColumnConstraint, ColumnDef, CreateSchema, CreateTable, DdlStatement, DropSchema};
pub use dml::Insert;
pub use query::CatalogQuery;
pub use token::{Token, TokenStream};
pub use types::DataType;
