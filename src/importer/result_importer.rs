// ==========================================
// Tournament Scoring - Result Importer
// ==========================================
// Bowling result files: one tournament per file, one record per
// (person, round, line).
// Flow: decode -> single tournament -> range rules -> references
//       -> team rule -> duplicates -> batch writes
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::{ImportOutcome, ScoreImportRow, ScoreKey, ScoreRecord, Tournament};
use crate::importer::business_rules::{BusinessRules, TeamDecision};
use crate::importer::coordinator::{self, Phase};
use crate::importer::duplicate_detector::DuplicateDetector;
use crate::importer::error::{ImportResult, RowError};
use crate::importer::importer_trait::CsvImporter;
use crate::importer::invariant_checker::InvariantChecker;
use crate::importer::reference_resolver::ReferenceResolver;
use crate::importer::row_decoder::RowDecoder;
use crate::repository::ScoreImportRepository;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{info, instrument};

/// Values shared by every row of one run
struct RunContext {
    tournament: Tournament,
    rules: BusinessRules,
    actor_id: i64,
    created_at: DateTime<Utc>,
}

// ==========================================
// ResultImporter
// ==========================================
pub struct ResultImporter<R, C>
where
    R: ScoreImportRepository,
    C: ImportConfigReader,
{
    repo: R,
    config: C,
    decoder: RowDecoder,
    invariant_checker: InvariantChecker,
    resolver: ReferenceResolver,
}

impl<R, C> ResultImporter<R, C>
where
    R: ScoreImportRepository,
    C: ImportConfigReader,
{
    /// # Arguments
    /// - repo: lookups, duplicate probe, score_result writes
    /// - config: batch size, score bound, individual keywords
    pub fn new(repo: R, config: C) -> Self {
        Self {
            repo,
            config,
            decoder: RowDecoder,
            invariant_checker: InvariantChecker,
            resolver: ReferenceResolver,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// One row -> one record, or the reason it was not accepted.
    fn process_row(
        &self,
        row: &ScoreImportRow,
        ctx: &RunContext,
        duplicates: &mut DuplicateDetector<ScoreKey>,
    ) -> Result<ScoreRecord, RowError> {
        let line = row.source_line;

        // no repository access before this passes
        ctx.rules.check_ranges(row)?;

        let refs = self.resolver.resolve_score_refs(
            &self.repo,
            &row.document,
            &row.category_name,
            &row.modality_name,
            &row.branch_name,
            line,
        )?;

        let team = match ctx
            .rules
            .team_decision(&refs.modality, row.team_name.as_deref(), line)?
        {
            TeamDecision::NoTeam => None,
            TeamDecision::Resolve(name) => Some(self.resolver.team(&self.repo, name, line)?),
        };

        let record = ScoreRecord {
            person_id: refs.person.id,
            team_id: team.map(|t| t.id),
            tournament_id: ctx.tournament.id,
            category_id: refs.category.id,
            modality_id: refs.modality.id,
            branch_id: refs.branch.id,
            round_number: row.round_number,
            lane_number: row.lane_number,
            line_number: row.line_number,
            score: row.score,
            created_by: ctx.actor_id,
            created_at: ctx.created_at,
        };

        duplicates.check_and_remember(
            record.key(),
            line,
            || {
                format!(
                    "documento {}, ronda {}, línea {}",
                    row.document, row.round_number, row.line_number
                )
            },
            |key| {
                self.repo.exists_score_record(
                    key.person_id,
                    key.tournament_id,
                    key.round_number,
                    key.line_number,
                )
            },
        )?;

        Ok(record)
    }
}

impl<R, C> CsvImporter for ResultImporter<R, C>
where
    R: ScoreImportRepository,
    C: ImportConfigReader,
{
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    fn import_csv(
        &self,
        bytes: &[u8],
        actor_id: i64,
        skip_header: bool,
    ) -> ImportResult<ImportOutcome> {
        let started = Instant::now();
        let settings = self.config.load_import_settings()?;

        Phase::ReadingRows.enter();
        let decoded = self.decoder.decode::<ScoreImportRow>(bytes, skip_header);

        Phase::EnforcingInvariant.enter();
        let tournament = match self
            .invariant_checker
            .check_single_tournament(&decoded.rows, &self.repo)
        {
            Ok(tournament) => tournament,
            Err(reason) => return Ok(coordinator::halt(reason, &decoded.errors)),
        };

        let ctx = RunContext {
            tournament,
            rules: BusinessRules::new(settings.max_score, settings.individual_keywords),
            actor_id,
            created_at: Utc::now(),
        };
        let mut duplicates = DuplicateDetector::new();

        let outcome = coordinator::process_rows(
            &decoded.rows,
            &decoded.errors,
            &self.repo,
            settings.batch_size,
            |row| self.process_row(row, &ctx, &mut duplicates),
        )?;

        info!(
            tournament_id = ctx.tournament.id,
            rows = decoded.rows.len(),
            created = outcome.created_count,
            skipped = outcome.skipped_count,
            errors = outcome.errors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "result import finished"
        );
        Ok(outcome)
    }
}
