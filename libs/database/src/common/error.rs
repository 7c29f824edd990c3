#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Database health check failed: {0}")]
    HealthCheckFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
