// ==========================================
// Tournament Scoring - Team Member Importer
// ==========================================
// Rows: documento, equipo
// No cross-row rule; every row stands alone.
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::{ImportOutcome, TeamMemberRow, TeamMembership};
use crate::importer::coordinator::{self, Phase};
use crate::importer::duplicate_detector::DuplicateDetector;
use crate::importer::error::{ImportHalt, ImportResult, RowError};
use crate::importer::importer_trait::CsvImporter;
use crate::importer::reference_resolver::ReferenceResolver;
use crate::importer::row_decoder::RowDecoder;
use crate::repository::TeamMemberImportRepository;
use chrono::Utc;
use tracing::{info, instrument};

pub struct TeamMemberImporter<R, C>
where
    R: TeamMemberImportRepository,
    C: ImportConfigReader,
{
    repo: R,
    config: C,
    decoder: RowDecoder,
    resolver: ReferenceResolver,
}

impl<R, C> TeamMemberImporter<R, C>
where
    R: TeamMemberImportRepository,
    C: ImportConfigReader,
{
    pub fn new(repo: R, config: C) -> Self {
        Self {
            repo,
            config,
            decoder: RowDecoder,
            resolver: ReferenceResolver,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn process_row(
        &self,
        row: &TeamMemberRow,
        actor_id: i64,
        duplicates: &mut DuplicateDetector<(i64, i64)>,
    ) -> Result<TeamMembership, RowError> {
        let line = row.source_line;
        let person = self.resolver.person(&self.repo, &row.document, line)?;
        let team = self.resolver.team(&self.repo, &row.team_name, line)?;

        duplicates.check_and_remember(
            (person.id, team.id),
            line,
            || format!("documento {}, equipo {}", row.document, row.team_name),
            |&(person_id, team_id)| self.repo.exists_team_member(person_id, team_id),
        )?;

        Ok(TeamMembership {
            person_id: person.id,
            team_id: team.id,
            created_by: actor_id,
            created_at: Utc::now(),
        })
    }
}

impl<R, C> CsvImporter for TeamMemberImporter<R, C>
where
    R: TeamMemberImportRepository,
    C: ImportConfigReader,
{
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    fn import_csv(
        &self,
        bytes: &[u8],
        actor_id: i64,
        skip_header: bool,
    ) -> ImportResult<ImportOutcome> {
        let batch_size = self.config.get_batch_size()?;

        Phase::ReadingRows.enter();
        let decoded = self.decoder.decode::<TeamMemberRow>(bytes, skip_header);
        if decoded.rows.is_empty() {
            return Ok(coordinator::halt(ImportHalt::NoValidRows, &decoded.errors));
        }

        let mut duplicates = DuplicateDetector::new();
        let outcome = coordinator::process_rows(
            &decoded.rows,
            &decoded.errors,
            &self.repo,
            batch_size,
            |row| self.process_row(row, actor_id, &mut duplicates),
        )?;

        info!(
            rows = decoded.rows.len(),
            created = outcome.created_count,
            skipped = outcome.skipped_count,
            errors = outcome.errors.len(),
            "team member import finished"
        );
        Ok(outcome)
    }
}
