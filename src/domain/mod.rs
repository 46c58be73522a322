// ==========================================
// Tournament Scoring - Domain Layer
// ==========================================
// Entities, import rows/records and shared enums.
// No data access and no pipeline logic here.
// ==========================================

pub mod entities;
pub mod membership;
pub mod score;
pub mod types;

pub use entities::{Branch, Category, Modality, Person, Team, Tournament};
pub use membership::{RegistrationRow, TeamMemberRow, TeamMembership, TournamentRegistration};
pub use score::{ImportOutcome, ScoreImportRow, ScoreKey, ScoreRecord};
pub use types::{EntityStatus, ModalityKind};
