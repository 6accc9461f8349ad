//! Column data types for DDL generation.
//!
//! The set is limited to the DuckDB types the grid schema uses. `Display`
//! renders the same spelling DuckDB reports in `duckdb_columns().data_type`,
//! and [`DataType::parse`] reads that spelling back, so declared columns can
//! be checked against the live catalog.

use std::fmt;

/// DuckDB column data type.
///
/// # Examples
///
/// ```
/// use grid_ops::sql::types::DataType;
///
/// assert_eq!(DataType::parse("integer"), Some(DataType::Int32));
/// assert_eq!(DataType::Float64.to_string(), "DOUBLE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 32-bit signed integer (INTEGER).
    Int32,

    /// 64-bit floating point (DOUBLE).
    Float64,

    /// Variable-length string without a length limit (VARCHAR).
    Varchar,

    /// Date without time.
    Date,
}

impl DataType {
    /// Parse a data type name as written in DDL or reported by the catalog.
    ///
    /// Accepts the DuckDB spelling plus the common aliases
    /// (`int`, `int4`, `float8`, `text`, `string`). Types outside the grid
    /// schema yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "int" | "integer" | "int4" | "int32" | "signed" => Some(DataType::Int32),
            "double" | "float8" | "float64" | "double precision" => Some(DataType::Float64),
            "varchar" | "text" | "string" | "char" | "bpchar" => Some(DataType::Varchar),
            "date" => Some(DataType::Date),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int32 => write!(f, "INTEGER"),
            DataType::Float64 => write!(f, "DOUBLE"),
            DataType::Varchar => write!(f, "VARCHAR"),
            DataType::Date => write!(f, "DATE"),
        }
    }
}
