// ==========================================
// Tournament Scoring - Business Rule Evaluator
// ==========================================
// Range checks: pure, run before any lookup
// Team rule: depends on the resolved modality
// ==========================================

use crate::domain::{Modality, ModalityKind, ScoreImportRow};
use crate::importer::error::RowError;

/// Lowest accepted score
pub const MIN_SCORE: i32 = 0;

/// What the row must do about its team column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamDecision<'a> {
    /// Blank team on an individual modality
    NoTeam,
    /// Resolve this name and attach it
    Resolve(&'a str),
}

#[derive(Debug, Clone)]
pub struct BusinessRules {
    max_score: i32,
    individual_keywords: Vec<String>,
}

impl BusinessRules {
    pub fn new(max_score: i32, individual_keywords: Vec<String>) -> Self {
        Self {
            max_score,
            individual_keywords,
        }
    }

    /// score in [0, max]; round, lane and line strictly positive.
    pub fn check_ranges(&self, row: &ScoreImportRow) -> Result<(), RowError> {
        let line = row.source_line;

        if row.score < MIN_SCORE || row.score > self.max_score {
            return Err(RowError::ScoreOutOfRange {
                line,
                value: row.score,
                min: MIN_SCORE,
                max: self.max_score,
            });
        }

        for (field, value) in [
            ("numeroRonda", row.round_number),
            ("numeroCarril", row.lane_number),
            ("numeroLinea", row.line_number),
        ] {
            if value <= 0 {
                return Err(RowError::NotPositive { line, field, value });
            }
        }

        Ok(())
    }

    pub fn classify(&self, modality: &Modality) -> ModalityKind {
        ModalityKind::classify(&modality.name, &self.individual_keywords)
    }

    /// Team-required modalities need a team; a supplied team is always resolved.
    pub fn team_decision<'a>(
        &self,
        modality: &Modality,
        team_name: Option<&'a str>,
        line: usize,
    ) -> Result<TeamDecision<'a>, RowError> {
        match team_name {
            Some(name) => Ok(TeamDecision::Resolve(name)),
            None if self.classify(modality).requires_team() => Err(RowError::TeamRequired {
                line,
                modality: modality.name.clone(),
            }),
            None => Ok(TeamDecision::NoTeam),
        }
    }
}
