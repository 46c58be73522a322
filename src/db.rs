// ==========================================
// Tournament Scoring - SQLite connection setup
// ==========================================
// Goals:
// - every Connection::open goes through the same PRAGMAs
// - one busy_timeout for all writers
// - explicit schema bootstrap for empty databases (no automatic migration)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::path::PathBuf;
use std::time::Duration;

/// Overrides the default database location
pub const DB_PATH_ENV: &str = "TOURNAMENT_SCORING_DB_PATH";

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version this code expects.
///
/// Only used to warn; a mismatched database is never migrated in place.
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Tables read and written by the import pipeline.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS person (
    person_id INTEGER PRIMARY KEY AUTOINCREMENT,
    document TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'ACTIVE'
);

CREATE TABLE IF NOT EXISTS tournament (
    tournament_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'ACTIVE'
);

CREATE TABLE IF NOT EXISTS category (
    category_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'ACTIVE'
);

CREATE TABLE IF NOT EXISTS modality (
    modality_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'ACTIVE'
);

CREATE TABLE IF NOT EXISTS branch (
    branch_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS team (
    team_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'ACTIVE'
);

CREATE TABLE IF NOT EXISTS score_result (
    result_id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES person(person_id),
    team_id INTEGER REFERENCES team(team_id),
    tournament_id INTEGER NOT NULL REFERENCES tournament(tournament_id),
    category_id INTEGER NOT NULL REFERENCES category(category_id),
    modality_id INTEGER NOT NULL REFERENCES modality(modality_id),
    branch_id INTEGER NOT NULL REFERENCES branch(branch_id),
    round_number INTEGER NOT NULL CHECK (round_number > 0),
    lane_number INTEGER NOT NULL CHECK (lane_number > 0),
    line_number INTEGER NOT NULL CHECK (line_number > 0),
    score INTEGER NOT NULL CHECK (score >= 0),
    created_by INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (person_id, tournament_id, round_number, line_number)
);

CREATE TABLE IF NOT EXISTS team_member (
    person_id INTEGER NOT NULL REFERENCES person(person_id),
    team_id INTEGER NOT NULL REFERENCES team(team_id),
    created_by INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (person_id, team_id)
);

CREATE TABLE IF NOT EXISTS tournament_registration (
    registration_id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES person(person_id),
    tournament_id INTEGER NOT NULL REFERENCES tournament(tournament_id),
    category_id INTEGER NOT NULL REFERENCES category(category_id),
    modality_id INTEGER NOT NULL REFERENCES modality(modality_id),
    branch_id INTEGER NOT NULL REFERENCES branch(branch_id),
    created_by INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (person_id, tournament_id, category_id, modality_id)
);
"#;

/// Applies the shared PRAGMAs.
///
/// foreign_keys and busy_timeout are per connection, so every open must call this.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Opens a SQLite connection with the shared configuration
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Creates the pipeline tables on an empty database and stamps the schema version.
///
/// Idempotent (CREATE IF NOT EXISTS). Existing tables are left untouched.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Reads schema_version (None when the table does not exist)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Database path used when none is given.
///
/// Order: `$TOURNAMENT_SCORING_DB_PATH`, then the user data directory,
/// then `./tournament_scoring.db`.
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./tournament_scoring.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("tournament-scoring");
        // fall back to the working directory when the folder cannot be created
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("tournament_scoring.db");
        }
    }

    path.to_string_lossy().to_string()
}
