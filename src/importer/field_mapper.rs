// ==========================================
// Tournament Scoring - Field Mapper
// ==========================================
// Positional fields -> typed import rows
// Column names below are the ones used in the upload templates
// ==========================================

use crate::domain::{RegistrationRow, ScoreImportRow, TeamMemberRow};
use crate::importer::error::RowError;
use crate::importer::row_decoder::TabularRow;

// result file columns
const COL_DOCUMENT: usize = 0;
const COL_TOURNAMENT: usize = 1;
const COL_CATEGORY: usize = 2;
const COL_MODALITY: usize = 3;
const COL_BRANCH: usize = 4;
const COL_TEAM: usize = 5;
const COL_ROUND: usize = 6;
const COL_LANE: usize = 7;
const COL_LINE: usize = 8;
const COL_SCORE: usize = 9;

/// Parses one integer column; the error names the column.
fn parse_int(value: &str, field: &'static str, line: usize) -> Result<i32, RowError> {
    value.parse::<i32>().map_err(|_| RowError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

/// Blank -> None
fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ==========================================
// Result rows
// ==========================================
// documento, nombreTorneo, categoria, modalidad, rama, equipo,
// numeroRonda, numeroCarril, numeroLinea, puntaje
impl TabularRow for ScoreImportRow {
    const COLUMNS: usize = 10;

    fn from_fields(fields: &[&str], line: usize) -> Result<Self, RowError> {
        // first failing column wins; one message per row
        let round_number = parse_int(fields[COL_ROUND], "numeroRonda", line)?;
        let lane_number = parse_int(fields[COL_LANE], "numeroCarril", line)?;
        let line_number = parse_int(fields[COL_LINE], "numeroLinea", line)?;
        let score = parse_int(fields[COL_SCORE], "puntaje", line)?;

        Ok(ScoreImportRow {
            document: fields[COL_DOCUMENT].to_string(),
            tournament_name: fields[COL_TOURNAMENT].to_string(),
            category_name: fields[COL_CATEGORY].to_string(),
            modality_name: fields[COL_MODALITY].to_string(),
            branch_name: fields[COL_BRANCH].to_string(),
            team_name: optional_text(fields[COL_TEAM]),
            round_number,
            lane_number,
            line_number,
            score,
            source_line: line,
        })
    }
}

// ==========================================
// Team membership rows
// ==========================================
// documento, equipo
impl TabularRow for TeamMemberRow {
    const COLUMNS: usize = 2;

    fn from_fields(fields: &[&str], line: usize) -> Result<Self, RowError> {
        Ok(TeamMemberRow {
            document: fields[0].to_string(),
            team_name: fields[1].to_string(),
            source_line: line,
        })
    }
}

// ==========================================
// Registration rows
// ==========================================
// documento, nombreTorneo, categoria, modalidad, rama
impl TabularRow for RegistrationRow {
    const COLUMNS: usize = 5;

    fn from_fields(fields: &[&str], line: usize) -> Result<Self, RowError> {
        Ok(RegistrationRow {
            document: fields[0].to_string(),
            tournament_name: fields[1].to_string(),
            category_name: fields[2].to_string(),
            modality_name: fields[3].to_string(),
            branch_name: fields[4].to_string(),
            source_line: line,
        })
    }
}
