pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Invalid page size {0}, must be at least 1")]
    InvalidPageSize(i64),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}
