// ==========================================
// Tournament Scoring - Import Repository Traits
// ==========================================
// Data access contracts consumed by the import pipeline.
// Repositories do CRUD only; no business rules here.
// ==========================================

use crate::domain::{
    Branch, Category, Modality, Person, ScoreRecord, Team, TeamMembership, Tournament,
    TournamentRegistration,
};
use crate::repository::error::RepositoryResult;

// ==========================================
// ReferenceLookup
// ==========================================
// Natural-key finders shared by every importer.
// Exact (case-sensitive) match except branch.
pub trait ReferenceLookup {
    /// Active person by document number
    fn find_person_by_document(&self, document: &str) -> RepositoryResult<Option<Person>>;

    /// Active tournament by exact name
    fn find_tournament_by_name(&self, name: &str) -> RepositoryResult<Option<Tournament>>;

    /// Active (not soft-deleted) category by exact name
    fn find_category_by_name_active(&self, name: &str) -> RepositoryResult<Option<Category>>;

    /// Active (not soft-deleted) modality by exact name
    fn find_modality_by_name_active(&self, name: &str) -> RepositoryResult<Option<Modality>>;

    /// Branch by name, ignoring case
    fn find_branch_by_name_case_insensitive(&self, name: &str)
        -> RepositoryResult<Option<Branch>>;

    /// Active team by exact name
    fn find_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>>;
}

// ==========================================
// BatchSink
// ==========================================
// Bulk persistence of one buffered chunk.
pub trait BatchSink<T> {
    /// Persists all records atomically.
    ///
    /// # Returns
    /// - Ok(usize): rows written
    /// - Err: nothing from this batch is kept
    fn save_batch(&self, records: &[T]) -> RepositoryResult<usize>;
}

// ==========================================
// Per-importer repositories
// ==========================================

/// Result importer: lookups + duplicate probe + score_result writes
pub trait ScoreImportRepository: ReferenceLookup + BatchSink<ScoreRecord> {
    fn exists_score_record(
        &self,
        person_id: i64,
        tournament_id: i64,
        round_number: i32,
        line_number: i32,
    ) -> RepositoryResult<bool>;
}

/// Team-membership importer
pub trait TeamMemberImportRepository: ReferenceLookup + BatchSink<TeamMembership> {
    fn exists_team_member(&self, person_id: i64, team_id: i64) -> RepositoryResult<bool>;
}

/// Tournament-registration importer
pub trait RegistrationImportRepository:
    ReferenceLookup + BatchSink<TournamentRegistration>
{
    fn exists_registration(
        &self,
        person_id: i64,
        tournament_id: i64,
        category_id: i64,
        modality_id: i64,
    ) -> RepositoryResult<bool>;
}
