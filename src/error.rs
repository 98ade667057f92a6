use thiserror::Error;

/// Main error type for Metacat
#[derive(Error, Debug)]
pub enum MetacatError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entity GUID does not resolve in the catalog
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// Invalid input (malformed direction, negative depth, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal consistency violation (a visited GUID stopped resolving)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenient Result type using MetacatError
pub type Result<T> = std::result::Result<T, MetacatError>;
