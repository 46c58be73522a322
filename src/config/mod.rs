// ==========================================
// Tournament Scoring - Configuration Layer
// ==========================================
// Storage: config_kv table, static defaults otherwise
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::{
    ConfigError, ConfigResult, ImportConfigReader, ImportSettings, DEFAULT_BATCH_SIZE,
    DEFAULT_MAX_SCORE,
};
