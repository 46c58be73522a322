// ==========================================
// Tournament Scoring - API Errors
// ==========================================
// Facade-level failures. Rejected rows and halted files are NOT errors
// here: they travel inside a successful response.
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("entrada inválida: {0}")]
    InvalidInput(String),

    #[error("no se pudo leer el archivo '{path}': {message}")]
    IoError { path: String, message: String },

    #[error("la importación falló: {0}")]
    ImportError(#[from] ImportError),

    #[error("error de base de datos: {0}")]
    DatabaseError(String),

    #[error("error interno: {0}")]
    InternalError(String),
}

// ==========================================
// From RepositoryError
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("no se pudo obtener el bloqueo: {}", msg))
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::from(RepositoryError::from(err))
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ImportError(ImportError::Config(err))
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;
