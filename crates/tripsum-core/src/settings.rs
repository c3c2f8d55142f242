use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::{DEFAULT_OUTPUT_PATH, DEFAULT_TABLE};

/// Connection parameters for the Postgres server.
#[derive(Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: "db".to_string(),
            port: 5432,
            user: "appuser".to_string(),
            password: "secretpw".to_string(),
            database: "appdb".to_string(),
        }
    }
}

impl DbSettings {
    /// Connection target without credentials, safe for logs.
    pub fn redacted(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Where the report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub output_path: PathBuf,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

/// A table name that is safe to splice into SQL.
///
/// Accepts `name` or `schema.name`, each part matching `[A-Za-z_][A-Za-z0-9_]*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    schema: Option<String>,
    name: String,
}

impl TableName {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.split('.');
        let first = parts.next().unwrap_or_default();
        let second = parts.next();
        if parts.next().is_some() {
            return Err(invalid_table(raw));
        }

        let (schema, name) = match second {
            Some(name) => (Some(first), name),
            None => (None, first),
        };

        if !is_identifier(name) || schema.is_some_and(|schema| !is_identifier(schema)) {
            return Err(invalid_table(raw));
        }

        Ok(Self {
            schema: schema.map(str::to_string),
            name: name.to_string(),
        })
    }

    /// Unqualified table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Double-quoted form for use in SQL text.
    pub fn quoted(&self) -> String {
        match &self.schema {
            Some(schema) => format!("\"{schema}\".\"{}\"", self.name),
            None => format!("\"{}\"", self.name),
        }
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self {
            schema: None,
            name: DEFAULT_TABLE.to_string(),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn invalid_table(raw: &str) -> Error {
    Error::InvalidConfig(format!(
        "table name '{raw}' must be an identifier, optionally schema-qualified"
    ))
}
