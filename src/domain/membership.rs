// ==========================================
// Tournament Scoring - Team Membership & Registration Model
// ==========================================
// Rows and records of the two lighter importers
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Team membership (team_member table)
// ==========================================
// Columns: documento, equipo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberRow {
    pub document: String,
    pub team_name: String,
    pub source_line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub person_id: i64,
    pub team_id: i64,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// Tournament registration (tournament_registration table)
// ==========================================
// Columns: documento, nombreTorneo, categoria, modalidad, rama
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRow {
    pub document: String,
    pub tournament_name: String,
    pub category_name: String,
    pub modality_name: String,
    pub branch_name: String,
    pub source_line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRegistration {
    pub person_id: i64,
    pub tournament_id: i64,
    pub category_id: i64,
    pub modality_id: i64,
    pub branch_id: i64,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl TournamentRegistration {
    /// (person, tournament, category, modality)
    pub fn key(&self) -> (i64, i64, i64, i64) {
        (
            self.person_id,
            self.tournament_id,
            self.category_id,
            self.modality_id,
        )
    }
}
