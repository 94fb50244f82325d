//! # wicket-lake
//!
//! Read-only access to the cricket `DuckDB` database.
//!
//! Every query opens its own read-only connection on a blocking worker
//! thread. There is no pool: queries are few and the file is never written.

mod error;
mod rows;
mod schema;

pub use error::LakeError;
pub use rows::value_to_json;
pub use schema::SCHEMA_DESCRIPTION;

use std::path::{Path, PathBuf};

use duckdb::{AccessMode, Config, Connection};
use wicket_core::Row;

/// Handle to the cricket database file.
#[derive(Debug, Clone)]
pub struct CricketLake {
    path: PathBuf,
}

impl CricketLake {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the database file is present.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Description of the database for SQL-writing prompts.
    #[must_use]
    pub const fn schema_description(&self) -> &'static str {
        SCHEMA_DESCRIPTION
    }

    /// Run `sql` and return every row as an ordered column → value map.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::NotFound`] when the file is missing,
    /// [`LakeError::DuckDb`] when `DuckDB` rejects the SQL, and
    /// [`LakeError::Worker`] if the blocking task fails.
    pub async fn query(&self, sql: &str) -> Result<Vec<Row>, LakeError> {
        let path = self.path.clone();
        let sql = sql.to_string();
        tokio::task::spawn_blocking(move || Self::query_blocking(&path, &sql)).await?
    }

    fn query_blocking(path: &Path, sql: &str) -> Result<Vec<Row>, LakeError> {
        if !path.is_file() {
            return Err(LakeError::NotFound(path.display().to_string()));
        }
        let config = Config::default().access_mode(AccessMode::ReadOnly)?;
        let conn = Connection::open_with_flags(path, config)?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let columns: Vec<String> = rows
            .as_ref()
            .map(duckdb::Statement::column_names)
            .unwrap_or_default();

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Row::new();
            for (index, column) in columns.iter().enumerate() {
                let value: duckdb::types::Value = row.get(index)?;
                record.insert(column.clone(), value_to_json(value));
            }
            out.push(record);
        }
        tracing::debug!(rows = out.len(), "query complete");
        Ok(out)
    }
}
