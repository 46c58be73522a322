// ==========================================
// Tournament Scoring - Import Layer
// ==========================================
// Uploaded comma-separated files -> persisted records
// Importers: results, team members, tournament registrations
// ==========================================

pub mod batch_writer;
pub mod business_rules;
pub mod coordinator;
pub mod duplicate_detector;
pub mod error;
pub mod field_mapper;
pub mod importer_trait;
pub mod invariant_checker;
pub mod reference_resolver;
pub mod registration_importer;
pub mod result_importer;
pub mod row_decoder;
pub mod team_member_importer;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch_writer::BatchWriter;
pub use business_rules::{BusinessRules, TeamDecision, MIN_SCORE};
pub use coordinator::Phase;
pub use duplicate_detector::DuplicateDetector;
pub use error::{ImportError, ImportHalt, ImportResult, RowError};
pub use importer_trait::CsvImporter;
pub use invariant_checker::InvariantChecker;
pub use reference_resolver::ReferenceResolver;
pub use registration_importer::RegistrationImporter;
pub use result_importer::ResultImporter;
pub use row_decoder::{DecodedRows, RowDecoder, TabularRow};
pub use team_member_importer::TeamMemberImporter;
