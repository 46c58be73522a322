// ==========================================
// Tournament Scoring - Import Configuration Reader
// ==========================================
// Read-only configuration contract of the import pipeline.
// No writes and no business logic here.
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default rows per persisted batch
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Default upper bound of a bowling line score (inclusive)
pub const DEFAULT_MAX_SCORE: i32 = 300;

/// Default keywords marking a modality as individual
pub const DEFAULT_INDIVIDUAL_KEYWORDS: [&str; 2] = ["individual", "sencillo"];

// ==========================================
// ConfigError
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("fallo al leer la configuración (key: {key}): {message}")]
    ReadError { key: String, message: String },

    #[error("valor de configuración inválido (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ImportConfigReader
// ==========================================
// Implementors: ImportSettings (static), ConfigManager (config_kv table)
pub trait ImportConfigReader {
    /// Rows buffered before a flush
    ///
    /// # Default
    /// - 500
    fn get_batch_size(&self) -> ConfigResult<usize>;

    /// Maximum accepted score (minimum is always 0)
    ///
    /// # Default
    /// - 300
    fn get_max_score(&self) -> ConfigResult<i32>;

    /// Case-insensitive substrings that make a modality individual
    ///
    /// # Default
    /// - ["individual", "sencillo"]
    fn get_individual_keywords(&self) -> ConfigResult<Vec<String>>;

    /// Reads every value once; an import works on this snapshot.
    fn load_import_settings(&self) -> ConfigResult<ImportSettings> {
        Ok(ImportSettings {
            batch_size: self.get_batch_size()?,
            max_score: self.get_max_score()?,
            individual_keywords: self.get_individual_keywords()?,
        })
    }
}

// ==========================================
// ImportSettings - resolved values
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSettings {
    pub batch_size: usize,
    pub max_score: i32,
    pub individual_keywords: Vec<String>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_score: DEFAULT_MAX_SCORE,
            individual_keywords: DEFAULT_INDIVIDUAL_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl ImportConfigReader for ImportSettings {
    fn get_batch_size(&self) -> ConfigResult<usize> {
        Ok(self.batch_size)
    }

    fn get_max_score(&self) -> ConfigResult<i32> {
        Ok(self.max_score)
    }

    fn get_individual_keywords(&self) -> ConfigResult<Vec<String>> {
        Ok(self.individual_keywords.clone())
    }
}
