// ==========================================
// Tournament Scoring - Score Result Model
// ==========================================
// ScoreImportRow: transient, one per decoded line
// ScoreRecord: persisted outcome of a valid row (score_result table)
// ImportOutcome: summary returned to the caller, never persisted
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ScoreImportRow - decoded result line
// ==========================================
// Column order: documento, nombreTorneo, categoria, modalidad, rama,
//               equipo, numeroRonda, numeroCarril, numeroLinea, puntaje
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreImportRow {
    pub document: String,
    pub tournament_name: String,
    pub category_name: String,
    pub modality_name: String,
    pub branch_name: String,
    pub team_name: Option<String>, // None when the column is blank
    pub round_number: i32,
    pub lane_number: i32,
    pub line_number: i32,
    pub score: i32,

    // 1-based line in the source file
    pub source_line: usize,
}

// ==========================================
// ScoreRecord - one bowler line result
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub person_id: i64,
    pub team_id: Option<i64>,
    pub tournament_id: i64,
    pub category_id: i64,
    pub modality_id: i64,
    pub branch_id: i64,
    pub round_number: i32,
    pub lane_number: i32,
    pub line_number: i32,
    pub score: i32,

    // audit
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn key(&self) -> ScoreKey {
        ScoreKey {
            person_id: self.person_id,
            tournament_id: self.tournament_id,
            round_number: self.round_number,
            line_number: self.line_number,
        }
    }
}

/// Natural uniqueness key of a score result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub person_id: i64,
    pub tournament_id: i64,
    pub round_number: i32,
    pub line_number: i32,
}

// ==========================================
// ImportOutcome - summary of one import call
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub created_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<String>, // ordered by source line
}

impl ImportOutcome {
    /// Outcome of a whole-file halt: nothing created, exactly one message.
    pub fn halted(message: impl Into<String>) -> Self {
        Self {
            created_count: 0,
            skipped_count: 0,
            errors: vec![message.into()],
        }
    }
}
