//! # grid-ops
//!
//! Bootstraps a grid-operator schema in DuckDB, seeds it with sample rows and
//! exposes the engine catalog as a small set of agent-callable tools.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Database (one connection)                │
//! └──────────────────────────────────────────────────────────┘
//!        │ borrowed by          │                    │
//!        ▼                      ▼                    ▼
//! ┌──────────────┐     ┌────────────────┐   ┌────────────────────┐
//! │ SchemaManager│     │   SeedLoader   │   │ MetadataInspector  │
//! │ drop / init  │     │ sample rows    │   │ duckdb_* functions │
//! └──────────────┘     └────────────────┘   └────────────────────┘
//!        │ DDL                 │ INSERT              ▲
//!        └───────── sql ───────┘                     │ ToolCall::invoke
//!                                           ┌────────────────────┐
//!                                           │   tools registry   │
//!                                           └────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod metadata;
pub mod schema;
pub mod seed;
pub mod sql;
pub mod telemetry;
pub mod tools;

pub use db::{Database, DbError, DbResult};
pub use metadata::{CatalogRow, CatalogValue, MetadataInspector, MetadataProvider};
pub use schema::{GridTable, SchemaDrift, SchemaManager, GRID_OPS_SCHEMA};
pub use seed::{SampleData, SeedLoader, SeedSummary};
pub use tools::{ToolCall, ToolError, TOOL_NAMES};
