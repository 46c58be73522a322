// ==========================================
// Tournament Scoring - Import Coordinator
// ==========================================
// ReadingRows -> EnforcingInvariant -> (Halted | ProcessingEachRow)
//             -> Flushing -> Done
// Strictly linear, one pass over the rows.
// ==========================================

use crate::domain::ImportOutcome;
use crate::importer::batch_writer::BatchWriter;
use crate::importer::error::{ImportHalt, ImportResult, RowError};
use crate::repository::BatchSink;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ReadingRows,
    EnforcingInvariant,
    Halted,
    ProcessingEachRow,
    Flushing,
    Done,
}

impl Phase {
    pub fn enter(self) -> Self {
        debug!(phase = %self, "import phase");
        self
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::ReadingRows => "reading_rows",
            Phase::EnforcingInvariant => "enforcing_invariant",
            Phase::Halted => "halted",
            Phase::ProcessingEachRow => "processing_each_row",
            Phase::Flushing => "flushing",
            Phase::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a whole-file stop. Decoder errors are logged, not returned.
pub fn halt(reason: ImportHalt, decode_errors: &[RowError]) -> ImportOutcome {
    Phase::Halted.enter();
    warn!(
        reason = %reason,
        decoder_errors = decode_errors.len(),
        "import halted"
    );
    ImportOutcome::halted(reason.to_string())
}

/// Runs every row through `process` and writes the accepted records.
///
/// # Arguments
/// - rows: decoded rows, source order
/// - decode_errors: decoder errors, merged with row errors by source line
/// - sink: batch persistence
/// - batch_size: records per flush
/// - process: per-row pipeline; a Duplicate error counts as skipped
///
/// # Returns
/// - Ok(ImportOutcome): counts and ordered messages
/// - Err(ImportError): a flush failed
pub fn process_rows<Row, Rec, S, F>(
    rows: &[Row],
    decode_errors: &[RowError],
    sink: &S,
    batch_size: usize,
    mut process: F,
) -> ImportResult<ImportOutcome>
where
    S: BatchSink<Rec> + ?Sized,
    F: FnMut(&Row) -> Result<Rec, RowError>,
{
    Phase::ProcessingEachRow.enter();

    let mut outcome = ImportOutcome::default();
    let mut row_errors: Vec<RowError> = decode_errors.to_vec();
    let mut writer = BatchWriter::new(sink, batch_size);

    for row in rows {
        match process(row) {
            Ok(record) => writer.push(record)?,
            Err(e) if e.is_duplicate() => {
                debug!(line = e.line(), "duplicate row skipped");
                outcome.skipped_count += 1;
                row_errors.push(e);
            }
            Err(e) => {
                warn!(line = e.line(), error = %e, "row rejected");
                row_errors.push(e);
            }
        }
    }

    Phase::Flushing.enter();
    outcome.created_count = writer.finish()?;

    // stable: one line never carries more than one message anyway
    row_errors.sort_by_key(RowError::line);
    outcome.errors = row_errors.iter().map(ToString::to_string).collect();

    Phase::Done.enter();
    Ok(outcome)
}
