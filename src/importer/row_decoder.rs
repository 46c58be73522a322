// ==========================================
// Tournament Scoring - Row Decoder
// ==========================================
// Stage 0: raw bytes -> fixed-arity typed rows + line errors
// Format: comma separated, no quoting, no escaping
// Never aborts on bad data; every problem is tied to its 1-based line
// ==========================================

use crate::importer::error::RowError;
use csv::{ByteRecord, ReaderBuilder, Terminator};
use tracing::{debug, warn};

// ==========================================
// TabularRow - one typed row of a fixed arity
// ==========================================
// Implementors: ScoreImportRow (10), TeamMemberRow (2), RegistrationRow (5)
pub trait TabularRow: Sized {
    /// Minimum number of positional fields
    const COLUMNS: usize;

    /// Builds the row from trimmed fields.
    ///
    /// `fields.len() >= COLUMNS` is guaranteed by the decoder.
    fn from_fields(fields: &[&str], line: usize) -> Result<Self, RowError>;
}

/// Rows in source order, plus the errors of the rejected lines.
#[derive(Debug)]
pub struct DecodedRows<T> {
    pub rows: Vec<T>,
    pub errors: Vec<RowError>,
}

impl<T> DecodedRows<T> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            errors: Vec::new(),
        }
    }
}

// ==========================================
// RowDecoder
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RowDecoder;

impl RowDecoder {
    /// Decodes the whole file.
    ///
    /// # Arguments
    /// - bytes: file content
    /// - skip_header: the first non-blank line is a header and is ignored
    ///
    /// # Rules
    /// - blank lines (after trim) are skipped silently
    /// - fewer than `T::COLUMNS` fields -> ColumnCount error, row dropped
    /// - extra trailing fields are ignored
    /// - non UTF-8 content -> Unreadable error, row dropped
    pub fn decode<T: TabularRow>(&self, bytes: &[u8], skip_header: bool) -> DecodedRows<T> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // arity is checked per line below
            .quoting(false)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(bytes);

        // The reader drops zero-length lines and yields exactly one record for
        // every other '\n'-terminated line, so records map 1:1 onto these.
        let mut line_numbers = bytes
            .split(|b| *b == b'\n')
            .enumerate()
            .filter(|(_, raw)| !raw.is_empty())
            .map(|(idx, _)| idx + 1);

        let mut decoded = DecodedRows::new();
        let mut record = ByteRecord::new();
        let mut header_pending = skip_header;

        loop {
            match reader.read_byte_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {
                    let line = line_numbers.next().unwrap_or_default();

                    if header_pending && !Self::is_blank(&record) {
                        header_pending = false;
                        debug!(line = line, "header line skipped");
                        continue;
                    }

                    match Self::decode_record::<T>(&record, line) {
                        Ok(Some(row)) => decoded.rows.push(row),
                        Ok(None) => {}
                        Err(e) => {
                            warn!(line = line, error = %e, "line rejected by decoder");
                            decoded.errors.push(e);
                        }
                    }
                }
                Err(e) => {
                    let line = line_numbers.next().unwrap_or_default();
                    warn!(line = line, error = %e, "unreadable input, decoding stopped");
                    decoded.errors.push(RowError::Unreadable {
                        line,
                        message: e.to_string(),
                    });
                    break;
                }
            }
        }

        debug!(
            rows = decoded.rows.len(),
            errors = decoded.errors.len(),
            "decoding finished"
        );
        decoded
    }

    /// Whitespace only, including a lone '\r'
    fn is_blank(record: &ByteRecord) -> bool {
        record.len() <= 1
            && record
                .iter()
                .all(|raw| raw.iter().all(|b| b.is_ascii_whitespace()))
    }

    /// Ok(None) means a blank line.
    fn decode_record<T: TabularRow>(
        record: &ByteRecord,
        line: usize,
    ) -> Result<Option<T>, RowError> {
        let fields = record
            .iter()
            .map(|raw| std::str::from_utf8(raw).map(str::trim))
            .collect::<Result<Vec<&str>, _>>()
            .map_err(|e| RowError::Unreadable {
                line,
                message: e.to_string(),
            })?;

        if fields.iter().all(|f| f.is_empty()) && fields.len() <= 1 {
            return Ok(None);
        }

        if fields.len() < T::COLUMNS {
            return Err(RowError::ColumnCount {
                line,
                expected: T::COLUMNS,
                actual: fields.len(),
            });
        }

        T::from_fields(&fields, line).map(Some)
    }
}
