// ==========================================
// Tournament Scoring - Configuration Manager
// ==========================================
// Storage: config_kv table (key-value + scope)
// Only the 'global' scope is read by the importers.
// ==========================================

use crate::config::import_config_trait::{
    ConfigError, ConfigResult, ImportConfigReader, DEFAULT_BATCH_SIZE,
    DEFAULT_INDIVIDUAL_KEYWORDS, DEFAULT_MAX_SCORE,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// config_kv keys
pub mod config_keys {
    pub const IMPORT_BATCH_SIZE: &str = "import.batch_size";
    pub const IMPORT_SCORE_MAX: &str = "import.score_max";
    pub const IMPORT_INDIVIDUAL_KEYWORDS: &str = "import.individual_keywords";
}

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Shares an existing connection
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Reads a value from config_kv (scope_id='global')
    ///
    /// # Returns
    /// - Some(String): stored value
    /// - None: key not set
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| ConfigError::ReadError {
            key: key.to_string(),
            message: format!("no se pudo obtener el bloqueo: {}", e),
        })?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ConfigError::ReadError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Inserts or replaces a global value
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| ConfigError::ReadError {
            key: key.to_string(),
            message: format!("no se pudo obtener el bloqueo: {}", e),
        })?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )
        .map_err(|e| ConfigError::ReadError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

impl ImportConfigReader for ConfigManager {
    fn get_batch_size(&self) -> ConfigResult<usize> {
        let key = config_keys::IMPORT_BATCH_SIZE;
        match self.get_config_value(key)? {
            None => Ok(DEFAULT_BATCH_SIZE),
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size >= 1 => Ok(size),
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw,
                    message: "se espera un entero mayor que 0".to_string(),
                }),
            },
        }
    }

    fn get_max_score(&self) -> ConfigResult<i32> {
        let key = config_keys::IMPORT_SCORE_MAX;
        match self.get_config_value(key)? {
            None => Ok(DEFAULT_MAX_SCORE),
            Some(raw) => match raw.trim().parse::<i32>() {
                Ok(max) if max >= 0 => Ok(max),
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw,
                    message: "se espera un entero no negativo".to_string(),
                }),
            },
        }
    }

    fn get_individual_keywords(&self) -> ConfigResult<Vec<String>> {
        let key = config_keys::IMPORT_INDIVIDUAL_KEYWORDS;
        let raw = match self.get_config_value(key)? {
            None => {
                return Ok(DEFAULT_INDIVIDUAL_KEYWORDS
                    .iter()
                    .map(|k| k.to_string())
                    .collect())
            }
            Some(raw) => raw,
        };

        let keywords: Vec<String> = raw
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
                message: "se espera al menos una palabra clave".to_string(),
            });
        }
        Ok(keywords)
    }
}
