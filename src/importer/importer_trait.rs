// ==========================================
// Tournament Scoring - Importer Trait
// ==========================================
// Interface only; implementations live next to their pipelines.
// ==========================================

use crate::domain::ImportOutcome;
use crate::importer::error::ImportResult;

// ==========================================
// CsvImporter
// ==========================================
// Implementors: ResultImporter, TeamMemberImporter, RegistrationImporter
pub trait CsvImporter {
    /// Imports one uploaded file.
    ///
    /// # Arguments
    /// - bytes: raw file content
    /// - actor_id: user recorded as creator of every new record
    /// - skip_header: physical line 1 is a header
    ///
    /// # Returns
    /// - Ok(ImportOutcome): created/skipped counts and ordered messages,
    ///   including whole-file halts and rejected rows
    /// - Err(ImportError): configuration or batch persistence failure;
    ///   the caller must roll back
    ///
    /// # Pipeline
    /// 1. decode rows
    /// 2. cross-row invariant (result files only)
    /// 3. per row: range rules, references, team rule, duplicates
    /// 4. batch writes + final flush
    fn import_csv(
        &self,
        bytes: &[u8],
        actor_id: i64,
        skip_header: bool,
    ) -> ImportResult<ImportOutcome>;
}
