use thiserror::Error;

/// Core error type shared across tripsum crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The database stayed unreachable for the whole retry budget.
    #[error("failed to connect to Postgres after {attempts} attempt(s): {last}")]
    Connection { attempts: u32, last: String },
    /// The table being summarized does not exist.
    #[error("table '{table}' not found. Did the database initializer run?")]
    MissingTable { table: String },
    /// Any other database failure.
    #[error("database error: {0}")]
    Db(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// Settings rejected before any work started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Process exit code for this error. Every failure is terminal.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Connection { .. } | Error::MissingTable { .. } => 1,
            Error::Db(_) | Error::Io(_) | Error::Json(_) | Error::InvalidConfig(_) => 1,
        }
    }
}

/// Convenience alias for results returned by tripsum crates.
pub type Result<T> = std::result::Result<T, Error>;
