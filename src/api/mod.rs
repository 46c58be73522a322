// ==========================================
// Tournament Scoring - API Layer
// ==========================================
// Entry points for the HTTP layer and the CLI
// ==========================================

pub mod error;
pub mod import_api;

pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse, ImportKind};
