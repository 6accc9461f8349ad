//! DDL (Data Definition Language) support.
//!
//! This module provides types and builders for the DDL statements the grid
//! schema needs (CREATE/DROP SCHEMA, CREATE TABLE), rendered as DuckDB SQL.
//!
//! # Examples
//!
//! ```
//! use grid_ops::sql::ddl::{ColumnDef, CreateTable, DataType};
//!
//! let table = CreateTable::new("generators")
//!     .schema("grid_ops")
//!     .if_not_exists()
//!     .column(ColumnDef::new("generator_id", DataType::Int32).primary_key())
//!     .column(ColumnDef::new("name", DataType::Varchar));
//!
//! assert!(table.to_sql().starts_with("CREATE TABLE IF NOT EXISTS"));
//! ```

use super::token::{Token, TokenStream};

pub use super::types::DataType;

/// DDL statement types.
#[derive(Debug, Clone)]
pub enum DdlStatement {
    CreateSchema(CreateSchema),
    DropSchema(DropSchema),
    CreateTable(CreateTable),
}

impl DdlStatement {
    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        match self {
            DdlStatement::CreateSchema(cs) => cs.to_tokens(),
            DdlStatement::DropSchema(ds) => ds.to_tokens(),
            DdlStatement::CreateTable(ct) => ct.to_tokens(),
        }
    }
}

impl From<CreateSchema> for DdlStatement {
    fn from(stmt: CreateSchema) -> Self {
        DdlStatement::CreateSchema(stmt)
    }
}

impl From<DropSchema> for DdlStatement {
    fn from(stmt: DropSchema) -> Self {
        DdlStatement::DropSchema(stmt)
    }
}

impl From<CreateTable> for DdlStatement {
    fn from(stmt: CreateTable) -> Self {
        DdlStatement::CreateTable(stmt)
    }
}

// ============================================================================
// CREATE SCHEMA / DROP SCHEMA
// ============================================================================

/// CREATE SCHEMA statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateSchema {
    pub if_not_exists: bool,
    pub name: String,
}

impl CreateSchema {
    /// Create a new CREATE SCHEMA statement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            if_not_exists: false,
            name: name.into(),
        }
    }

    /// Add IF NOT EXISTS clause.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Create).space().push(Token::Schema);
        if self.if_not_exists {
            ts.space()
                .push(Token::If)
                .space()
                .push(Token::Not)
                .space()
                .push(Token::Exists);
        }
        ts.space().push(Token::Ident(self.name.clone()));
        ts
    }
}

/// DROP SCHEMA statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct DropSchema {
    pub if_exists: bool,
    pub name: String,
    pub cascade: bool,
}

impl DropSchema {
    /// Create a new DROP SCHEMA statement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            if_exists: false,
            name: name.into(),
            cascade: false,
        }
    }

    /// Add IF EXISTS clause.
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Add CASCADE clause, dropping every object in the schema.
    pub fn cascade(mut self) -> Self {
        self.cascade = true;
        self
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Drop).space().push(Token::Schema);
        if self.if_exists {
            ts.space().push(Token::If).space().push(Token::Exists);
        }
        ts.space().push(Token::Ident(self.name.clone()));
        if self.cascade {
            ts.space().push(Token::Cascade);
        }
        ts
    }
}

// ============================================================================
// CREATE TABLE
// ============================================================================

/// CREATE TABLE statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateTable {
    pub if_not_exists: bool,
    pub schema: Option<String>,
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl CreateTable {
    /// Create a new CREATE TABLE statement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            if_not_exists: false,
            schema: None,
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Set the schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add IF NOT EXISTS clause.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Add a column definition.
    pub fn column(mut self, col: ColumnDef) -> Self {
        self.columns.push(col);
        self
    }

    /// Add multiple column definitions.
    pub fn columns(mut self, cols: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(cols);
        self
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Create).space().push(Token::Table);

        if self.if_not_exists {
            ts.space()
                .push(Token::If)
                .space()
                .push(Token::Not)
                .space()
                .push(Token::Exists);
        }

        ts.space().push(Token::QualifiedIdent {
            schema: self.schema.clone(),
            name: self.name.clone(),
        });

        ts.space().lparen();
        let mut first = true;
        for col in &self.columns {
            if !first {
                ts.comma().space();
            }
            first = false;
            ts.append(&col.to_tokens());
        }
        ts.rparen();

        ts
    }
}

// ============================================================================
// Column Definition
// ============================================================================

/// Column definition for CREATE TABLE.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDef {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: Vec::new(),
        }
    }

    /// Add PRIMARY KEY constraint.
    pub fn primary_key(mut self) -> Self {
        self.constraints.push(ColumnConstraint::PrimaryKey);
        self
    }

    /// Add REFERENCES constraint to a column of a schema-qualified table.
    pub fn references_in(
        mut self,
        schema: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        self.constraints.push(ColumnConstraint::References {
            schema: Some(schema.into()),
            table: table.into(),
            column: column.into(),
        });
        self
    }

    /// Returns true if the column carries a PRIMARY KEY constraint.
    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, ColumnConstraint::PrimaryKey))
    }

    /// The referenced `(table, column)` if this column is a foreign key.
    pub fn foreign_key_target(&self) -> Option<(&str, &str)> {
        self.constraints.iter().find_map(|c| match c {
            ColumnConstraint::References { table, column, .. } => {
                Some((table.as_str(), column.as_str()))
            }
            ColumnConstraint::PrimaryKey => None,
        })
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Ident(self.name.clone()))
            .space()
            .push(Token::Type(self.data_type));

        for constraint in &self.constraints {
            match constraint {
                ColumnConstraint::PrimaryKey => {
                    ts.space().push(Token::Primary).space().push(Token::Key);
                }
                ColumnConstraint::References {
                    schema,
                    table,
                    column,
                } => {
                    ts.space()
                        .push(Token::References)
                        .space()
                        .push(Token::QualifiedIdent {
                            schema: schema.clone(),
                            name: table.clone(),
                        })
                        .lparen()
                        .push(Token::Ident(column.clone()))
                        .rparen();
                }
            }
        }

        ts
    }
}

/// Column-level constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    PrimaryKey,
    References {
        schema: Option<String>,
        table: String,
        column: String,
    },
}

// ============================================================================
// Tests
// ============================================================================
