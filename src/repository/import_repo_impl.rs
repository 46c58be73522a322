// ==========================================
// Tournament Scoring - Import Repository (rusqlite)
// ==========================================
// Implements every import repository trait over one shared connection.
// Batches are written inside a SAVEPOINT so they nest in the caller's
// transaction and stay atomic on their own.
// ==========================================

use crate::domain::{
    Branch, Category, EntityStatus, Modality, Person, ScoreRecord, Team, TeamMembership,
    Tournament, TournamentRegistration,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::import_repo::{
    BatchSink, ReferenceLookup, RegistrationImportRepository, ScoreImportRepository,
    TeamMemberImportRepository,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// ImportRepositoryImpl
// ==========================================
pub struct ImportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ImportRepositoryImpl {
    /// Shares an existing connection (and therefore its open transaction)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

// ==========================================
// Reference lookups
// ==========================================
impl ReferenceLookup for ImportRepositoryImpl {
    fn find_person_by_document(&self, document: &str) -> RepositoryResult<Option<Person>> {
        let conn = self.get_conn()?;
        let person = conn
            .query_row(
                r#"
                SELECT person_id, document, first_name, last_name, status
                FROM person
                WHERE document = ?1 AND status = 'ACTIVE'
                "#,
                params![document],
                |row| {
                    Ok(Person {
                        id: row.get(0)?,
                        document: row.get(1)?,
                        first_name: row.get(2)?,
                        last_name: row.get(3)?,
                        status: EntityStatus::from_db_str(&row.get::<_, String>(4)?),
                    })
                },
            )
            .optional()?;
        Ok(person)
    }

    fn find_tournament_by_name(&self, name: &str) -> RepositoryResult<Option<Tournament>> {
        let conn = self.get_conn()?;
        let tournament = conn
            .query_row(
                r#"
                SELECT tournament_id, name, status
                FROM tournament
                WHERE name = ?1 AND status = 'ACTIVE'
                ORDER BY tournament_id
                LIMIT 1
                "#,
                params![name],
                |row| {
                    Ok(Tournament {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        status: EntityStatus::from_db_str(&row.get::<_, String>(2)?),
                    })
                },
            )
            .optional()?;
        Ok(tournament)
    }

    fn find_category_by_name_active(&self, name: &str) -> RepositoryResult<Option<Category>> {
        let conn = self.get_conn()?;
        let category = conn
            .query_row(
                r#"
                SELECT category_id, name, status
                FROM category
                WHERE name = ?1 AND status = 'ACTIVE'
                ORDER BY category_id
                LIMIT 1
                "#,
                params![name],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        status: EntityStatus::from_db_str(&row.get::<_, String>(2)?),
                    })
                },
            )
            .optional()?;
        Ok(category)
    }

    fn find_modality_by_name_active(&self, name: &str) -> RepositoryResult<Option<Modality>> {
        let conn = self.get_conn()?;
        let modality = conn
            .query_row(
                r#"
                SELECT modality_id, name, status
                FROM modality
                WHERE name = ?1 AND status = 'ACTIVE'
                ORDER BY modality_id
                LIMIT 1
                "#,
                params![name],
                |row| {
                    Ok(Modality {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        status: EntityStatus::from_db_str(&row.get::<_, String>(2)?),
                    })
                },
            )
            .optional()?;
        Ok(modality)
    }

    fn find_branch_by_name_case_insensitive(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<Branch>> {
        // NOCASE/LOWER only fold ASCII; fold in Rust so 'Única' == 'única'
        let wanted = name.to_lowercase();
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT branch_id, name
            FROM branch
            ORDER BY branch_id
            "#,
        )?;
        let branches = stmt.query_map([], |row| {
            Ok(Branch {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        for branch in branches {
            let branch = branch?;
            if branch.name.to_lowercase() == wanted {
                return Ok(Some(branch));
            }
        }
        Ok(None)
    }

    fn find_team_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
        let conn = self.get_conn()?;
        let team = conn
            .query_row(
                r#"
                SELECT team_id, name, status
                FROM team
                WHERE name = ?1 AND status = 'ACTIVE'
                ORDER BY team_id
                LIMIT 1
                "#,
                params![name],
                |row| {
                    Ok(Team {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        status: EntityStatus::from_db_str(&row.get::<_, String>(2)?),
                    })
                },
            )
            .optional()?;
        Ok(team)
    }
}

// ==========================================
// Batch writes
// ==========================================
impl BatchSink<ScoreRecord> for ImportRepositoryImpl {
    fn save_batch(&self, records: &[ScoreRecord]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let sp = conn.savepoint()?;

        let mut count = 0;
        {
            let mut stmt = sp.prepare(
                r#"
                INSERT INTO score_result (
                    person_id, team_id, tournament_id, category_id, modality_id, branch_id,
                    round_number, lane_number, line_number, score, created_by, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
            )?;

            for record in records {
                stmt.execute(params![
                    record.person_id,
                    record.team_id,
                    record.tournament_id,
                    record.category_id,
                    record.modality_id,
                    record.branch_id,
                    record.round_number,
                    record.lane_number,
                    record.line_number,
                    record.score,
                    record.created_by,
                    record.created_at.to_rfc3339(),
                ])?;
                count += 1;
            }
        }

        sp.commit()?;
        debug!(count = count, "score_result batch written");
        Ok(count)
    }
}

impl BatchSink<TeamMembership> for ImportRepositoryImpl {
    fn save_batch(&self, records: &[TeamMembership]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let sp = conn.savepoint()?;

        let mut count = 0;
        {
            let mut stmt = sp.prepare(
                r#"
                INSERT INTO team_member (person_id, team_id, created_by, created_at)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )?;

            for record in records {
                stmt.execute(params![
                    record.person_id,
                    record.team_id,
                    record.created_by,
                    record.created_at.to_rfc3339(),
                ])?;
                count += 1;
            }
        }

        sp.commit()?;
        debug!(count = count, "team_member batch written");
        Ok(count)
    }
}

impl BatchSink<TournamentRegistration> for ImportRepositoryImpl {
    fn save_batch(&self, records: &[TournamentRegistration]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let sp = conn.savepoint()?;

        let mut count = 0;
        {
            let mut stmt = sp.prepare(
                r#"
                INSERT INTO tournament_registration (
                    person_id, tournament_id, category_id, modality_id, branch_id,
                    created_by, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )?;

            for record in records {
                stmt.execute(params![
                    record.person_id,
                    record.tournament_id,
                    record.category_id,
                    record.modality_id,
                    record.branch_id,
                    record.created_by,
                    record.created_at.to_rfc3339(),
                ])?;
                count += 1;
            }
        }

        sp.commit()?;
        debug!(count = count, "tournament_registration batch written");
        Ok(count)
    }
}

// ==========================================
// Duplicate probes
// ==========================================
impl ScoreImportRepository for ImportRepositoryImpl {
    fn exists_score_record(
        &self,
        person_id: i64,
        tournament_id: i64,
        round_number: i32,
        line_number: i32,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let exists: bool = conn.query_row(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM score_result
                WHERE person_id = ?1 AND tournament_id = ?2
                  AND round_number = ?3 AND line_number = ?4
            )
            "#,
            params![person_id, tournament_id, round_number, line_number],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl TeamMemberImportRepository for ImportRepositoryImpl {
    fn exists_team_member(&self, person_id: i64, team_id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM team_member WHERE person_id = ?1 AND team_id = ?2)",
            params![person_id, team_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl RegistrationImportRepository for ImportRepositoryImpl {
    fn exists_registration(
        &self,
        person_id: i64,
        tournament_id: i64,
        category_id: i64,
        modality_id: i64,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let exists: bool = conn.query_row(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tournament_registration
                WHERE person_id = ?1 AND tournament_id = ?2
                  AND category_id = ?3 AND modality_id = ?4
            )
            "#,
            params![person_id, tournament_id, category_id, modality_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
