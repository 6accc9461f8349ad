//! Catalog SELECT builder.
//!
//! DuckDB exposes its catalog through table functions such as
//! `duckdb_tables()`. [`CatalogQuery`] renders `SELECT *` over one of them,
//! with optional equality filters whose values are bound as parameters.

use super::token::{Token, TokenStream};

/// `SELECT * FROM <function>() [WHERE col = ? AND ...]`.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "queries have no effect until converted to SQL with to_sql()"]
pub struct CatalogQuery {
    pub function: String,
    pub filters: Vec<String>,
}

impl CatalogQuery {
    /// Select every row of a catalog table function.
    pub fn from_function(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            filters: Vec::new(),
        }
    }

    /// Restrict to rows where `column` equals the next bound parameter.
    pub fn filter_eq(mut self, column: impl Into<String>) -> Self {
        self.filters.push(column.into());
        self
    }

    /// Number of parameters the query expects.
    pub fn arity(&self) -> usize {
        self.filters.len()
    }

    /// Convert to SQL.
    pub fn to_sql(&self) -> String {
        self.to_tokens().serialize()
    }

    /// Convert to token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.push(Token::Select)
            .space()
            .push(Token::Star)
            .space()
            .push(Token::From)
            .space()
            .push(Token::TableFunction(self.function.clone()));

        for (i, column) in self.filters.iter().enumerate() {
            ts.space();
            if i == 0 {
                ts.push(Token::Where);
            } else {
                ts.push(Token::And);
            }
            ts.space()
                .push(Token::Ident(column.clone()))
                .space()
                .push(Token::Eq)
                .space()
                .push(Token::Placeholder);
        }

        ts
    }
}
