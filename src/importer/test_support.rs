// ==========================================
// Tournament Scoring - Importer Test Support
// ==========================================
// In-memory repository used by the importer unit tests.
// ==========================================

use crate::domain::{
    Branch, Category, EntityStatus, Modality, Person, ScoreImportRow, ScoreRecord, Team,
    TeamMembership, Tournament, TournamentRegistration,
};
use crate::repository::{
    BatchSink, ReferenceLookup, RegistrationImportRepository, RepositoryError, RepositoryResult,
    ScoreImportRepository, TeamMemberImportRepository,
};
use std::cell::{Cell, RefCell};

/// Score row for "123" in Juvenil/Dobles/Masculino with team Eagles.
/// The numeroLinea column follows the source line.
pub fn score_row(line: usize, tournament: &str, score: i32) -> ScoreImportRow {
    ScoreImportRow {
        document: "123".to_string(),
        tournament_name: tournament.to_string(),
        category_name: "Juvenil".to_string(),
        modality_name: "Dobles".to_string(),
        branch_name: "Masculino".to_string(),
        team_name: Some("Eagles".to_string()),
        round_number: 1,
        lane_number: 5,
        line_number: line as i32,
        score,
        source_line: line,
    }
}

#[derive(Default)]
pub struct FakeImportRepository {
    persons: Vec<Person>,
    tournaments: Vec<Tournament>,
    categories: Vec<Category>,
    modalities: Vec<Modality>,
    branches: Vec<Branch>,
    teams: Vec<Team>,

    scores: RefCell<Vec<ScoreRecord>>,
    members: RefCell<Vec<TeamMembership>>,
    registrations: RefCell<Vec<TournamentRegistration>>,

    lookup_calls: Cell<usize>,
    save_calls: Cell<usize>,
    fail_lookups: Cell<bool>,
    fail_saves: Cell<bool>,
}

fn person(id: i64, document: &str, status: EntityStatus) -> Person {
    Person {
        id,
        document: document.to_string(),
        first_name: "Nombre".to_string(),
        last_name: "Apellido".to_string(),
        status,
    }
}

impl FakeImportRepository {
    /// persons 123, 456 (active) and 999 (deleted); tournaments Spring Open
    /// and Fall Open; category Juvenil; modalities Dobles and Individual
    /// Masculino; branch Masculino; team Eagles
    pub fn seeded() -> Self {
        let active = EntityStatus::Active;
        Self {
            persons: vec![
                person(1, "123", active),
                person(2, "456", active),
                person(3, "999", EntityStatus::Deleted),
            ],
            tournaments: vec![
                Tournament {
                    id: 1,
                    name: "Spring Open".to_string(),
                    status: active,
                },
                Tournament {
                    id: 2,
                    name: "Fall Open".to_string(),
                    status: active,
                },
            ],
            categories: vec![Category {
                id: 1,
                name: "Juvenil".to_string(),
                status: active,
            }],
            modalities: vec![
                Modality {
                    id: 1,
                    name: "Dobles".to_string(),
                    status: active,
                },
                Modality {
                    id: 2,
                    name: "Individual Masculino".to_string(),
                    status: active,
                },
            ],
            branches: vec![Branch {
                id: 1,
                name: "Masculino".to_string(),
            }],
            teams: vec![Team {
                id: 1,
                name: "Eagles".to_string(),
                status: active,
            }],
            ..Default::default()
        }
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.set(fail);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.get()
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.get()
    }

    pub fn saved_scores(&self) -> Vec<ScoreRecord> {
        self.scores.borrow().clone()
    }

    pub fn saved_members(&self) -> Vec<TeamMembership> {
        self.members.borrow().clone()
    }

    pub fn saved_registrations(&self) -> Vec<TournamentRegistration> {
        self.registrations.borrow().clone()
    }

    fn lookup<T: Clone>(
        &self,
        items: &[T],
        matches: impl Fn(&T) -> bool,
    ) -> RepositoryResult<Option<T>> {
        self.lookup_calls.set(self.lookup_calls.get() + 1);
        if self.fail_lookups.get() {
            return Err(RepositoryError::DatabaseQueryError(
                "lookup failure".to_string(),
            ));
        }
        Ok(items.iter().find(|item| matches(item)).cloned())
    }

    fn save<T: Clone>(&self, target: &RefCell<Vec<T>>, records: &[T]) -> RepositoryResult<usize> {
        self.save_calls.set(self.save_calls.get() + 1);
        if self.fail_saves.get() {
            return Err(RepositoryError::DatabaseTransactionError(
                "save failure".to_string(),
            ));
        }
        target.borrow_mut().extend_from_slice(records);
        Ok(records.len())
    }
}

impl ReferenceLookup for FakeImportRepository {
    fn find_person_by_document(&self, document: &str) -> RepositoryResult<Option<Person>> {
        self.lookup(&self.persons, |p| {
            p.document == document && p.status.is_active()
        })
    }

    fn find_tournament_by_name(&self, name: &str) -> RepositoryResult<Option<Tournament>> {
        self.lookup(&self.tournaments, |t| t.name == name && t.status.is_active())
    }

    fn find_category_by_name_active(&self, name: &str) -> RepositoryResult<Option<Category>> {
        self.lookup(&self.categories, |c| c.name == name && c.status.is_active())
    }

    fn find_modality_by_name_active(&self, name: &str) -> RepositoryResult<Option<Modality>> {
        self.lookup(&self.modalities, |m| m.name == name && m.status.is_active())
    }

    fn find_branch_by_name_case_insensitive(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<Branch>> {
        self.lookup(&self.branches, |b| b.name.to_lowercase() == name.to_lowercase())
    }

    fn find_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
        self.lookup(&self.teams, |t| t.name == name && t.status.is_active())
    }
}

impl BatchSink<ScoreRecord> for FakeImportRepository {
    fn save_batch(&self, records: &[ScoreRecord]) -> RepositoryResult<usize> {
        self.save(&self.scores, records)
    }
}

impl BatchSink<TeamMembership> for FakeImportRepository {
    fn save_batch(&self, records: &[TeamMembership]) -> RepositoryResult<usize> {
        self.save(&self.members, records)
    }
}

impl BatchSink<TournamentRegistration> for FakeImportRepository {
    fn save_batch(&self, records: &[TournamentRegistration]) -> RepositoryResult<usize> {
        self.save(&self.registrations, records)
    }
}

impl ScoreImportRepository for FakeImportRepository {
    fn exists_score_record(
        &self,
        person_id: i64,
        tournament_id: i64,
        round_number: i32,
        line_number: i32,
    ) -> RepositoryResult<bool> {
        Ok(self.scores.borrow().iter().any(|s| {
            s.person_id == person_id
                && s.tournament_id == tournament_id
                && s.round_number == round_number
                && s.line_number == line_number
        }))
    }
}

impl TeamMemberImportRepository for FakeImportRepository {
    fn exists_team_member(&self, person_id: i64, team_id: i64) -> RepositoryResult<bool> {
        Ok(self
            .members
            .borrow()
            .iter()
            .any(|m| m.person_id == person_id && m.team_id == team_id))
    }
}

impl RegistrationImportRepository for FakeImportRepository {
    fn exists_registration(
        &self,
        person_id: i64,
        tournament_id: i64,
        category_id: i64,
        modality_id: i64,
    ) -> RepositoryResult<bool> {
        Ok(self
            .registrations
            .borrow()
            .iter()
            .any(|r| r.key() == (person_id, tournament_id, category_id, modality_id)))
    }
}
