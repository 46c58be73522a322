// ==========================================
// Tournament Scoring - Repository Errors
// ==========================================
// Tool: thiserror derive
// ==========================================

use thiserror::Error;

/// Repository layer error type
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Database errors =====
    #[error("registro no encontrado: {entity} con id={id}")]
    NotFound { entity: String, id: String },

    #[error("fallo de conexión a la base de datos: {0}")]
    DatabaseConnectionError(String),

    #[error("no se pudo obtener el bloqueo de la base de datos: {0}")]
    LockError(String),

    #[error("fallo de transacción: {0}")]
    DatabaseTransactionError(String),

    #[error("fallo de consulta: {0}")]
    DatabaseQueryError(String),

    #[error("restricción de unicidad violada: {0}")]
    UniqueConstraintViolation(String),

    #[error("restricción de clave foránea violada: {0}")]
    ForeignKeyViolation(String),

    // ===== Generic =====
    #[error("error interno: {0}")]
    InternalError(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
