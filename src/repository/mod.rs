// ==========================================
// Tournament Scoring - Repository Layer
// ==========================================
// Data access only, no business rules.
// Every query is parameterised.
// ==========================================

pub mod error;
pub mod import_repo;
pub mod import_repo_impl;

pub use error::{RepositoryError, RepositoryResult};
pub use import_repo::{
    BatchSink, ReferenceLookup, RegistrationImportRepository, ScoreImportRepository,
    TeamMemberImportRepository,
};
pub use import_repo_impl::ImportRepositoryImpl;
