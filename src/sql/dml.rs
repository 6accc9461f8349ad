//! DML (Data Manipulation Language) support.
//!
//! Only INSERT is needed: rows are always bound as positional parameters,
//! so an [`Insert`] renders one placeholder tuple that is prepared once and
//! executed per row.
//!
//! # Examples
//!
//! ```
//! use grid_ops::sql::dml::Insert;
//!
//! let insert = Insert::into("generators")
//!     .schema("grid_ops")
//!     .columns(["generator_id", "name"]);
//!
//! assert_eq!(
//!     insert.to_sql(),
//!     r#"INSERT INTO "grid_ops"."generators" ("generator_id", "name") VALUES (?, ?)"#
//! );
//! ```

use super::token::{Token, TokenStream};

/// INSERT statement with positional placeholders.
#[derive(Debug, Clone)]
#[must_use = "DML statements have no effect until converted to SQL with to_sql()"]
pub struct Insert {
    pub schema: Option<String>,
    pub table: String,
    pub columns: Vec<String>,
}

impl Insert {
    /// Create a new INSERT statement.
    pub fn into(table: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: table.into(),
            columns: Vec::new(),
        }
    }

    /// Set the schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the columns to insert.
    pub fn columns(mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = cols.into_iter().map(|c| c.into()).collect();
        self
    }

    /// Number of parameters a row must bind.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Insert)
            .space()
            .push(Token::Into)
            .space()
            .push(Token::QualifiedIdent {
                schema: self.schema.clone(),
                name: self.table.clone(),
            });

        if !self.columns.is_empty() {
            ts.space().lparen();
            for (i, col) in self.columns.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.push(Token::Ident(col.clone()));
            }
            ts.rparen();
        }

        ts.space().push(Token::Values).space().lparen();
        for i in 0..self.columns.len() {
            if i > 0 {
                ts.comma().space();
            }
            ts.push(Token::Placeholder);
        }
        ts.rparen();

        ts
    }
}
