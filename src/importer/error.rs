// ==========================================
// Tournament Scoring - Importer Errors
// ==========================================
// Tool: thiserror derive
// Three levels:
// - RowError: one rejected (or skipped) row, message goes into the outcome
// - ImportHalt: whole-file stop, single message in the outcome
// - ImportError: the call itself fails (config, persistence)
// ==========================================

use crate::config::ConfigError;
use crate::repository::RepositoryError;
use thiserror::Error;

// ==========================================
// RowError - row-local failure
// ==========================================
// Display is the user-facing message, always prefixed with "Línea <n>: "
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    // ===== decoding =====
    #[error("Línea {line}: se esperaban {expected} columnas, se encontraron {actual}")]
    ColumnCount {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Línea {line}: valor no numérico en {field}: '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Línea {line}: no se pudo leer la línea: {message}")]
    Unreadable { line: usize, message: String },

    // ===== range rules =====
    #[error("Línea {line}: puntaje {value} fuera de rango ({min}-{max})")]
    ScoreOutOfRange {
        line: usize,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("Línea {line}: {field} debe ser mayor que 0 (valor: {value})")]
    NotPositive {
        line: usize,
        field: &'static str,
        value: i32,
    },

    // ===== reference resolution =====
    #[error("Línea {line}: no se encontró {entity} con {field} '{value}'")]
    ReferenceNotFound {
        line: usize,
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Línea {line}: la modalidad '{modality}' requiere equipo")]
    TeamRequired { line: usize, modality: String },

    // ===== duplicates (counted as skipped) =====
    #[error("Línea {line}: registro duplicado omitido ({description})")]
    Duplicate { line: usize, description: String },

    // ===== anything else while processing the row =====
    #[error("Línea {line}: error inesperado: {message}")]
    Unexpected { line: usize, message: String },
}

impl RowError {
    /// 1-based source line
    pub fn line(&self) -> usize {
        match self {
            RowError::ColumnCount { line, .. }
            | RowError::InvalidNumber { line, .. }
            | RowError::Unreadable { line, .. }
            | RowError::ScoreOutOfRange { line, .. }
            | RowError::NotPositive { line, .. }
            | RowError::ReferenceNotFound { line, .. }
            | RowError::TeamRequired { line, .. }
            | RowError::Duplicate { line, .. }
            | RowError::Unexpected { line, .. } => *line,
        }
    }

    /// Duplicates are expected: counted as skipped, not as failures
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RowError::Duplicate { .. })
    }

    /// Wraps a persistence failure hit while processing one row
    pub fn unexpected(line: usize, err: RepositoryError) -> Self {
        RowError::Unexpected {
            line,
            message: err.to_string(),
        }
    }
}

// ==========================================
// ImportHalt - whole-file stop
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportHalt {
    #[error("No hay filas válidas para procesar")]
    NoValidRows,

    #[error("Línea {line}: el archivo contiene múltiples torneos ('{first}' y '{other}'); importe un torneo por archivo")]
    MultipleTournaments {
        line: usize,
        first: String,
        other: String,
    },

    #[error("Línea {line}: torneo no encontrado: '{name}'")]
    TournamentNotFound { line: usize, name: String },

    #[error("Línea {line}: error inesperado al buscar el torneo '{name}': {message}")]
    TournamentLookupFailed {
        line: usize,
        name: String,
        message: String,
    },
}

// ==========================================
// ImportError - the import call failed
// ==========================================
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("error de configuración: {0}")]
    Config(#[from] ConfigError),

    #[error("fallo al guardar el lote {batch} ({size} registros): {source}")]
    BatchPersistence {
        batch: usize,
        size: usize,
        #[source]
        source: RepositoryError,
    },
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
