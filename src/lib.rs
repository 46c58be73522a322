// ==========================================
// Tournament Scoring - Core Library
// ==========================================
// Tabular ingestion of bowling tournament data:
// results, team members, tournament registrations.
// Stack: Rust + SQLite
// ==========================================

// ==========================================
// Modules
// ==========================================

// domain: entities, rows, records
pub mod domain;

// data access
pub mod repository;

// import pipelines
pub mod importer;

// config_kv backed settings
pub mod config;

// connection setup and schema
pub mod db;

// tracing subscriber setup
pub mod logging;

// async facade
pub mod api;

// ==========================================
// Re-exports
// ==========================================

pub use api::{ApiError, ImportApi, ImportApiResponse, ImportKind};
pub use config::{ConfigManager, ImportConfigReader, ImportSettings};
pub use domain::{ImportOutcome, ScoreRecord};
pub use importer::{
    CsvImporter, ImportError, RegistrationImporter, ResultImporter, TeamMemberImporter,
};
pub use repository::ImportRepositoryImpl;

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "tournament-scoring";
