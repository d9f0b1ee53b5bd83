#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Schema mismatch: table '{table}' is missing column '{column}'")]
    SchemaMismatch { table: String, column: String },
}
