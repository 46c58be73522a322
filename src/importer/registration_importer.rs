// ==========================================
// Tournament Scoring - Registration Importer
// ==========================================
// Rows: documento, nombreTorneo, categoria, modalidad, rama
// Rows may point at different tournaments.
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::{ImportOutcome, RegistrationRow, TournamentRegistration};
use crate::importer::coordinator::{self, Phase};
use crate::importer::duplicate_detector::DuplicateDetector;
use crate::importer::error::{ImportHalt, ImportResult, RowError};
use crate::importer::importer_trait::CsvImporter;
use crate::importer::reference_resolver::ReferenceResolver;
use crate::importer::row_decoder::RowDecoder;
use crate::repository::RegistrationImportRepository;
use chrono::Utc;
use tracing::{info, instrument};

type RegistrationKey = (i64, i64, i64, i64);

pub struct RegistrationImporter<R, C>
where
    R: RegistrationImportRepository,
    C: ImportConfigReader,
{
    repo: R,
    config: C,
    decoder: RowDecoder,
    resolver: ReferenceResolver,
}

impl<R, C> RegistrationImporter<R, C>
where
    R: RegistrationImportRepository,
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
        row: &RegistrationRow,
        actor_id: i64,
        duplicates: &mut DuplicateDetector<RegistrationKey>,
    ) -> Result<TournamentRegistration, RowError> {
        let refs = self.resolver.resolve_registration_refs(&self.repo, row)?;

        let registration = TournamentRegistration {
            person_id: refs.person.id,
            tournament_id: refs.tournament.id,
            category_id: refs.category.id,
            modality_id: refs.modality.id,
            branch_id: refs.branch.id,
            created_by: actor_id,
            created_at: Utc::now(),
        };

        duplicates.check_and_remember(
            registration.key(),
            row.source_line,
            || {
                format!(
                    "documento {}, torneo {}, categoría {}, modalidad {}",
                    row.document, row.tournament_name, row.category_name, row.modality_name
                )
            },
            |&(person_id, tournament_id, category_id, modality_id)| {
                self.repo
                    .exists_registration(person_id, tournament_id, category_id, modality_id)
            },
        )?;

        Ok(registration)
    }
}

impl<R, C> CsvImporter for RegistrationImporter<R, C>
where
    R: RegistrationImportRepository,
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
        let decoded = self.decoder.decode::<RegistrationRow>(bytes, skip_header);
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
            "registration import finished"
        );
        Ok(outcome)
    }
}
