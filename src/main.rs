// ==========================================
// Tournament Scoring - Import CLI
// ==========================================
// Usage:
//   tournament-import <results|team-members|registrations> <file.csv>
//       [--actor <id>] [--skip-header] [--db <path>] [--init-schema]
//
// Prints the import response as JSON. Rejected rows do not change the
// exit code; only failed imports (nothing committed) do.
// ==========================================

use anyhow::{bail, Context, Result};
use tournament_scoring::api::{ImportApi, ImportKind};
use tournament_scoring::db::{
    get_default_db_path, init_schema, open_sqlite_connection, read_schema_version,
    CURRENT_SCHEMA_VERSION,
};
use tournament_scoring::logging;

/// Recorded as creator when --actor is not given
const SYSTEM_ACTOR_ID: i64 = 0;

const USAGE: &str = "uso: tournament-import <results|team-members|registrations> <archivo.csv> \
                     [--actor <id>] [--skip-header] [--db <ruta>] [--init-schema]";

#[derive(Debug)]
struct CliArgs {
    kind: ImportKind,
    file_path: String,
    actor_id: i64,
    skip_header: bool,
    db_path: String,
    init_schema: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut actor_id = SYSTEM_ACTOR_ID;
    let mut skip_header = false;
    let mut db_path = None;
    let mut init_schema = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--actor" => {
                let raw = args.next().context("--actor requiere un valor")?;
                actor_id = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("--actor inválido: '{}'", raw))?;
            }
            "--db" => db_path = Some(args.next().context("--db requiere una ruta")?),
            "--skip-header" => skip_header = true,
            "--init-schema" => init_schema = true,
            flag if flag.starts_with("--") => bail!("opción desconocida: {}\n{}", flag, USAGE),
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        bail!("{}", USAGE);
    }
    let file_path = positional.pop().unwrap_or_default();
    let kind: ImportKind = positional.pop().unwrap_or_default().parse()?;

    Ok(CliArgs {
        kind,
        file_path,
        actor_id,
        skip_header,
        db_path: db_path.unwrap_or_else(get_default_db_path),
        init_schema,
    })
}

/// Creates the tables when asked, warns on a schema mismatch.
fn prepare_database(db_path: &str, create: bool) -> Result<()> {
    let conn = open_sqlite_connection(db_path)
        .with_context(|| format!("no se pudo abrir la base de datos '{}'", db_path))?;

    if create {
        init_schema(&conn).context("no se pudo crear el esquema")?;
        tracing::info!(db_path = %db_path, "schema initialised");
    }

    match read_schema_version(&conn)? {
        Some(version) if version == CURRENT_SCHEMA_VERSION => {}
        Some(version) => tracing::warn!(
            found = version,
            expected = CURRENT_SCHEMA_VERSION,
            "schema version mismatch"
        ),
        None => tracing::warn!(
            db_path = %db_path,
            "schema_version table missing; run with --init-schema on a new database"
        ),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var_os("TOURNAMENT_SCORING_LOG_JSON").is_some() {
        logging::init_json();
    } else {
        logging::init();
    }

    let args = parse_args(std::env::args().skip(1))?;
    tracing::info!(
        app = tournament_scoring::APP_NAME,
        version = tournament_scoring::VERSION,
        db_path = %args.db_path,
        kind = %args.kind,
        "tournament-import"
    );

    prepare_database(&args.db_path, args.init_schema)?;

    let api = ImportApi::new(args.db_path.clone());
    let response = api
        .import(args.kind, &args.file_path, args.actor_id, args.skip_header)
        .await
        .with_context(|| format!("importación de '{}' fallida", args.file_path))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_full_command_line() {
        let parsed = parse_args(args(&[
            "results",
            "scores.csv",
            "--actor",
            "42",
            "--skip-header",
            "--db",
            "/tmp/t.db",
            "--init-schema",
        ]))
        .unwrap();

        assert_eq!(parsed.kind, ImportKind::Results);
        assert_eq!(parsed.file_path, "scores.csv");
        assert_eq!(parsed.actor_id, 42);
        assert!(parsed.skip_header);
        assert_eq!(parsed.db_path, "/tmp/t.db");
        assert!(parsed.init_schema);
    }

    #[test]
    fn test_defaults() {
        let parsed = parse_args(args(&["team-members", "m.csv", "--db", "x.db"])).unwrap();
        assert_eq!(parsed.actor_id, SYSTEM_ACTOR_ID);
        assert!(!parsed.skip_header);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(args(&["results"])).is_err());
        assert!(parse_args(args(&["scores", "a.csv"])).is_err());
        assert!(parse_args(args(&["results", "a.csv", "--actor", "x"])).is_err());
        assert!(parse_args(args(&["results", "a.csv", "--verbose"])).is_err());
    }
}
