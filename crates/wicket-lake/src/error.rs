//! Lake error types.

/// Errors that can occur while querying the cricket database.
#[derive(Debug, thiserror::Error)]
pub enum LakeError {
    /// `DuckDB` rejected the query or could not open the file.
    #[error("{0}")]
    DuckDb(#[from] duckdb::Error),

    /// The database file does not exist.
    #[error("Database not found: {0}")]
    NotFound(String),

    /// The blocking worker running the query panicked or was cancelled.
    #[error("Query worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
