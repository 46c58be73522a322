// ==========================================
// Tournament Scoring - Import API
// ==========================================
// Async facade over the synchronous importers.
// One call = one file = one SQLite transaction.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::domain::ImportOutcome;
use crate::importer::{
    CsvImporter, ImportResult, RegistrationImporter, ResultImporter, TeamMemberImporter,
};
use crate::repository::ImportRepositoryImpl;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{error, info, info_span};
use uuid::Uuid;

// ==========================================
// ImportKind
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    Results,
    TeamMembers,
    Registrations,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Results => "results",
            ImportKind::TeamMembers => "team-members",
            ImportKind::Registrations => "registrations",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "results" => Ok(ImportKind::Results),
            "team-members" => Ok(ImportKind::TeamMembers),
            "registrations" => Ok(ImportKind::Registrations),
            other => Err(ApiError::InvalidInput(format!(
                "tipo de importación desconocido: '{}' (results, team-members, registrations)",
                other
            ))),
        }
    }
}

/// Import API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// Correlates the log lines of this call
    pub import_id: String,
    pub kind: ImportKind,
    pub created: usize,
    pub skipped: usize,
    /// Ordered messages; a halted file carries exactly one
    pub errors: Vec<String>,
    pub elapsed_ms: i64,
}

// ==========================================
// ImportApi
// ==========================================
pub struct ImportApi {
    db_path: String,
}

impl ImportApi {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Imports a bowling result file.
    ///
    /// # Arguments
    /// - file_path: path of a `.csv` file
    /// - actor_id: user recorded as creator
    /// - skip_header: first line is a header
    ///
    /// # Returns
    /// - Ok(ImportApiResponse): committed counts and messages
    /// - Err(ApiError): bad path, unreadable file, config or persistence
    ///   failure (rolled back)
    pub async fn import_results(
        &self,
        file_path: &str,
        actor_id: i64,
        skip_header: bool,
    ) -> ApiResult<ImportApiResponse> {
        self.import(ImportKind::Results, file_path, actor_id, skip_header)
            .await
    }

    /// Imports a team membership file (documento, equipo).
    pub async fn import_team_members(
        &self,
        file_path: &str,
        actor_id: i64,
        skip_header: bool,
    ) -> ApiResult<ImportApiResponse> {
        self.import(ImportKind::TeamMembers, file_path, actor_id, skip_header)
            .await
    }

    /// Imports a tournament registration file.
    pub async fn import_registrations(
        &self,
        file_path: &str,
        actor_id: i64,
        skip_header: bool,
    ) -> ApiResult<ImportApiResponse> {
        self.import(ImportKind::Registrations, file_path, actor_id, skip_header)
            .await
    }

    pub async fn import(
        &self,
        kind: ImportKind,
        file_path: &str,
        actor_id: i64,
        skip_header: bool,
    ) -> ApiResult<ImportApiResponse> {
        validate_csv_path(file_path)?;

        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| ApiError::IoError {
                path: file_path.to_string(),
                message: e.to_string(),
            })?;

        let started = Instant::now();
        let import_id = Uuid::new_v4().to_string();
        let span = info_span!("import", import_id = %import_id, kind = %kind);
        info!(
            import_id = %import_id,
            kind = %kind,
            file_path = %file_path,
            bytes = bytes.len(),
            "import started"
        );

        let db_path = self.db_path.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            span.in_scope(|| run_in_transaction(&db_path, kind, &bytes, actor_id, skip_header))
        })
        .await
        .map_err(|e| ApiError::InternalError(format!("la tarea de importación falló: {}", e)))??;

        let elapsed_ms = started.elapsed().as_millis() as i64;
        info!(
            import_id = %import_id,
            created = outcome.created_count,
            skipped = outcome.skipped_count,
            errors = outcome.errors.len(),
            elapsed_ms = elapsed_ms,
            "import committed"
        );

        Ok(ImportApiResponse {
            import_id,
            kind,
            created: outcome.created_count,
            skipped: outcome.skipped_count,
            errors: outcome.errors,
            elapsed_ms,
        })
    }
}

/// Only `.csv` files are accepted (case-insensitive).
fn validate_csv_path(file_path: &str) -> ApiResult<()> {
    if file_path.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "la ruta del archivo está vacía".to_string(),
        ));
    }

    let is_csv = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if !is_csv {
        return Err(ApiError::InvalidInput(format!(
            "solo se admiten archivos .csv: '{}'",
            file_path
        )));
    }
    Ok(())
}

/// BEGIN IMMEDIATE -> importer -> COMMIT, or ROLLBACK on ImportError.
fn run_in_transaction(
    db_path: &str,
    kind: ImportKind,
    bytes: &[u8],
    actor_id: i64,
    skip_header: bool,
) -> ApiResult<ImportOutcome> {
    let conn = open_sqlite_connection(db_path)?;
    conn.execute_batch("BEGIN IMMEDIATE")?;

    let conn = Arc::new(Mutex::new(conn));
    let result = run_importer(kind, conn.clone(), bytes, actor_id, skip_header);

    let guard = conn
        .lock()
        .map_err(|e| ApiError::DatabaseError(format!("no se pudo obtener el bloqueo: {}", e)))?;

    match result {
        Ok(outcome) => {
            guard.execute_batch("COMMIT")?;
            Ok(outcome)
        }
        Err(e) => {
            error!(error = %e, "import aborted, rolling back");
            if let Err(rollback_err) = guard.execute_batch("ROLLBACK") {
                error!(error = %rollback_err, "rollback failed");
            }
            Err(e.into())
        }
    }
}

fn run_importer(
    kind: ImportKind,
    conn: Arc<Mutex<Connection>>,
    bytes: &[u8],
    actor_id: i64,
    skip_header: bool,
) -> ImportResult<ImportOutcome> {
    let repo = ImportRepositoryImpl::from_connection(conn.clone());
    let config = ConfigManager::from_connection(conn);

    match kind {
        ImportKind::Results => {
            ResultImporter::new(repo, config).import_csv(bytes, actor_id, skip_header)
        }
        ImportKind::TeamMembers => {
            TeamMemberImporter::new(repo, config).import_csv(bytes, actor_id, skip_header)
        }
        ImportKind::Registrations => {
            RegistrationImporter::new(repo, config).import_csv(bytes, actor_id, skip_header)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_csv_paths_are_accepted() {
        assert!(validate_csv_path("/tmp/results.csv").is_ok());
        assert!(validate_csv_path("/tmp/RESULTS.CSV").is_ok());
        assert!(matches!(
            validate_csv_path("/tmp/results.xlsx"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(validate_csv_path("/tmp/results").is_err());
        assert!(validate_csv_path("  ").is_err());
    }

    #[test]
    fn test_import_kind_parsing() {
        assert_eq!(
            "team-members".parse::<ImportKind>().unwrap(),
            ImportKind::TeamMembers
        );
        assert_eq!(ImportKind::Registrations.to_string(), "registrations");
        assert!("scores".parse::<ImportKind>().is_err());
    }

    #[test]
    fn test_response_serializes_kind_in_kebab_case() {
        let response = ImportApiResponse {
            import_id: "id".to_string(),
            kind: ImportKind::TeamMembers,
            created: 1,
            skipped: 0,
            errors: vec![],
            elapsed_ms: 3,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["kind"], "team-members");
    }
}
