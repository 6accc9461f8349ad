//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens serialize to DuckDB SQL: identifiers are double-quoted and
//! values are never inlined, they travel as `?` placeholders.

use super::types::DataType;

/// SQL Token - every element the crate's statements are built from.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    And,
    Not,

    // === DDL Keywords ===
    Create,
    Drop,
    Schema,
    Table,
    Primary,
    Key,
    References,
    Cascade,
    If,
    Exists,

    // === DML Keywords ===
    Insert,
    Into,
    Values,

    // === Punctuation ===
    Comma,
    Star,
    LParen,
    RParen,
    Eq,

    // === Whitespace ===
    Space,

    // === Dynamic Content ===
    /// Simple identifier (schema, table, column)
    Ident(String),
    /// Qualified identifier: schema.table or just table
    QualifiedIdent {
        schema: Option<String>,
        name: String,
    },
    /// Column data type keyword
    Type(DataType),
    /// Positional parameter marker
    Placeholder,
    /// Table function call without arguments, e.g. `duckdb_tables()`
    TableFunction(String),
}

impl Token {
    /// Serialize this token to DuckDB SQL.
    pub fn serialize(&self) -> String {
        match self {
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Not => "NOT".into(),

            Token::Create => "CREATE".into(),
            Token::Drop => "DROP".into(),
            Token::Schema => "SCHEMA".into(),
            Token::Table => "TABLE".into(),
            Token::Primary => "PRIMARY".into(),
            Token::Key => "KEY".into(),
            Token::References => "REFERENCES".into(),
            Token::Cascade => "CASCADE".into(),
            Token::If => "IF".into(),
            Token::Exists => "EXISTS".into(),

            Token::Insert => "INSERT".into(),
            Token::Into => "INTO".into(),
            Token::Values => "VALUES".into(),

            Token::Comma => ",".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Eq => "=".into(),

            Token::Space => " ".into(),

            Token::Ident(name) => quote_identifier(name),
            Token::QualifiedIdent { schema, name } => match schema {
                Some(s) => format!("{}.{}", quote_identifier(s), quote_identifier(name)),
                None => quote_identifier(name),
            },
            Token::Type(dt) => dt.to_string(),
            Token::Placeholder => "?".into(),
            Token::TableFunction(name) => format!("{}()", name),
        }
    }
}

/// Quote an identifier with ANSI double quotes, doubling embedded quotes.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(Token::serialize).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
