// ==========================================
// Tournament Scoring - Domain Types
// ==========================================
// Enumerations shared by the entities and the import pipeline
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Entity status (soft delete)
// ==========================================
// Stored as ACTIVE / DELETED; lookups filter with an explicit predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    Active,
    Deleted,
}

impl EntityStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::Deleted => "DELETED",
        }
    }

    /// Unknown values are read as Deleted so they never match an active lookup.
    pub fn from_db_str(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "ACTIVE" => EntityStatus::Active,
            _ => EntityStatus::Deleted,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, EntityStatus::Active)
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Modality kind
// ==========================================
// Individual modalities do not require a team on the result row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalityKind {
    Individual,
    TeamRequired,
}

impl ModalityKind {
    /// Classifies a modality name by case-insensitive substring match.
    pub fn classify<S: AsRef<str>>(modality_name: &str, individual_keywords: &[S]) -> Self {
        let name = modality_name.to_lowercase();
        let is_individual = individual_keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .any(|k| name.contains(&k));

        if is_individual {
            ModalityKind::Individual
        } else {
            ModalityKind::TeamRequired
        }
    }

    pub fn requires_team(&self) -> bool {
        matches!(self, ModalityKind::TeamRequired)
    }
}

impl fmt::Display for ModalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalityKind::Individual => write!(f, "INDIVIDUAL"),
            ModalityKind::TeamRequired => write!(f, "TEAM_REQUIRED"),
        }
    }
}
