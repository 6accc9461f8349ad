//! Owned DuckDB connection.
//!
//! [`Database`] wraps the single connection every component works through.
//! It is opened once by the caller, borrowed by the schema manager, the seed
//! loader and the metadata inspector, and released when dropped (or through
//! [`Database::close`], which reports close failures).
//!
//! Engine errors are surfaced as-is: constraint violations and catalog
//! failures reach the caller inside [`DbError::DuckDb`] unchanged.

use std::path::{Path, PathBuf};

use duckdb::{params, Connection};
use tracing::{debug, info};

use crate::sql::token::Token;

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    /// Whether the engine rejected the statement for a unique, primary-key
    /// or foreign-key constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            DbError::DuckDb(err) => {
                let msg = err.to_string().to_lowercase();
                msg.contains("constraint error") || msg.contains("violates")
            }
            DbError::Io(_) => false,
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// A DuckDB database with its one connection.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open or create a database file.
    ///
    /// Missing parent directories are created first.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened database");

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        debug!("opened in-memory database");
        Ok(Self { conn, path: None })
    }

    /// Path of the database file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Execute one or more statements that return no rows.
    pub fn execute(&self, sql: &str) -> DbResult<()> {
        debug!(sql, "execute");
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// `SELECT COUNT(*)` of a table.
    pub fn count_rows(&self, schema: &str, table: &str) -> DbResult<u64> {
        let name = Token::QualifiedIdent {
            schema: Some(schema.to_string()),
            name: table.to_string(),
        };
        let sql = format!("SELECT COUNT(*) FROM {}", name.serialize());
        debug!(sql = %sql, "count");
        let count: i64 = self.conn.query_row(&sql, params![], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Close the connection, reporting any error the engine raises.
    pub fn close(self) -> DbResult<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, err)| DbError::from(err))?;
        if let Some(path) = path {
            info!(path = %path.display(), "closed database");
        }
        Ok(())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish()
    }
}
