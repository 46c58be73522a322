// ==========================================
// Tournament Scoring - Cross-Row Invariant Checker
// ==========================================
// One file = one tournament. All-or-nothing: any failure halts
// the import before a single row is processed.
// ==========================================

use crate::domain::{ScoreImportRow, Tournament};
use crate::importer::error::ImportHalt;
use crate::repository::ReferenceLookup;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct InvariantChecker;

impl InvariantChecker {
    /// Checks the single-tournament rule and resolves that tournament.
    ///
    /// # Arguments
    /// - rows: decoded rows, source order
    /// - lookup: reference finders
    ///
    /// # Returns
    /// - Ok(Tournament): the tournament shared by every row
    /// - Err(ImportHalt): empty set, conflicting names, unknown tournament
    pub fn check_single_tournament<L>(
        &self,
        rows: &[ScoreImportRow],
        lookup: &L,
    ) -> Result<Tournament, ImportHalt>
    where
        L: ReferenceLookup + ?Sized,
    {
        let first = rows.first().ok_or(ImportHalt::NoValidRows)?;
        let name = first.tournament_name.as_str();

        // exact match, no normalisation
        if let Some(other) = rows.iter().find(|r| r.tournament_name != name) {
            warn!(
                first = %name,
                other = %other.tournament_name,
                line = other.source_line,
                "more than one tournament in file"
            );
            return Err(ImportHalt::MultipleTournaments {
                line: other.source_line,
                first: name.to_string(),
                other: other.tournament_name.clone(),
            });
        }

        match lookup.find_tournament_by_name(name) {
            Ok(Some(tournament)) => {
                debug!(tournament_id = tournament.id, name = %name, "tournament resolved");
                Ok(tournament)
            }
            Ok(None) => Err(ImportHalt::TournamentNotFound {
                line: first.source_line,
                name: name.to_string(),
            }),
            Err(e) => Err(ImportHalt::TournamentLookupFailed {
                line: first.source_line,
                name: name.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
