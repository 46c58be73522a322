// ==========================================
// Result import integration tests
// ==========================================
// ResultImporter over the SQLite repository and config_kv settings
// ==========================================

use tournament_scoring::config::{config_keys, ConfigManager};
use tournament_scoring::importer::{CsvImporter, ImportError, ResultImporter};
use tournament_scoring::repository::ImportRepositoryImpl;

use test_helpers::{count_rows, create_test_db, result_line, set_config, shared_connection};

fn importer(db_path: &str) -> ResultImporter<ImportRepositoryImpl, ConfigManager> {
    let conn = shared_connection(db_path).unwrap();
    ResultImporter::new(
        ImportRepositoryImpl::from_connection(conn.clone()),
        ConfigManager::from_connection(conn),
    )
}

#[test]
fn test_valid_rows_are_all_created() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let input = [
        result_line("123", 1, 1, 245),
        result_line("456", 1, 1, 198),
        result_line("789", 1, 1, 210),
        result_line("123", 1, 2, 187),
    ]
    .join("\n");

    let outcome = importer(&db_path)
        .import_csv(input.as_bytes(), 7, false)
        .unwrap();

    assert_eq!(outcome.created_count, 4);
    assert_eq!(outcome.skipped_count, 0);
    assert!(outcome.errors.is_empty());
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 4);
}

#[test]
fn test_reference_row_is_stored_field_by_field() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let outcome = importer(&db_path)
        .import_csv(
            b"123,Spring Open,Juvenil,Dobles,Masculino,Eagles,1,5,1,245",
            7,
            false,
        )
        .unwrap();
    assert_eq!(outcome.created_count, 1);

    let conn = shared_connection(&db_path).unwrap();
    let conn = conn.lock().unwrap();
    let (score, round, lane, line, team_id, created_by): (i32, i32, i32, i32, Option<i64>, i64) =
        conn.query_row(
            "SELECT score, round_number, lane_number, line_number, team_id, created_by FROM score_result",
            [],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            },
        )
        .unwrap();

    assert_eq!((score, round, lane, line), (245, 1, 5, 1));
    assert_eq!(team_id, Some(1));
    assert_eq!(created_by, 7);
}

#[test]
fn test_two_tournaments_halt_the_file() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let input = format!(
        "{}\n456,Fall Open,Juvenil,Dobles,Masculino,Eagles,1,6,1,200\n",
        result_line("123", 1, 1, 245)
    );

    let outcome = importer(&db_path)
        .import_csv(input.as_bytes(), 1, false)
        .unwrap();

    assert_eq!(outcome.created_count, 0);
    assert_eq!(outcome.skipped_count, 0);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].contains("múltiples torneos"));
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 0);
}

#[test]
fn test_unknown_or_deleted_tournament_halts() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let input = "123,Old Cup,Juvenil,Dobles,Masculino,Eagles,1,5,1,245";

    let outcome = importer(&db_path)
        .import_csv(input.as_bytes(), 1, false)
        .unwrap();

    assert_eq!(outcome.created_count, 0);
    assert_eq!(outcome.errors, vec!["Línea 1: torneo no encontrado: 'Old Cup'"]);
}

#[test]
fn test_only_bad_lines_produce_no_valid_rows() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let outcome = importer(&db_path)
        .import_csv(b"123,Spring Open\n\n456,Spring Open,Juvenil\n", 1, false)
        .unwrap();

    assert_eq!(outcome.errors, vec!["No hay filas válidas para procesar"]);
}

#[test]
fn test_out_of_range_score_rejects_only_that_row() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let input = [
        result_line("123", 1, 1, 350),
        result_line("456", 1, 1, 300),
        result_line("789", 1, 1, 0),
    ]
    .join("\n");

    let outcome = importer(&db_path)
        .import_csv(input.as_bytes(), 1, false)
        .unwrap();

    assert_eq!(outcome.created_count, 2);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Línea 1: "));
    assert!(outcome.errors[0].contains("fuera de rango"));
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 2);
}

#[test]
fn test_configured_score_bound() {
    let (_tmp, db_path) = create_test_db().unwrap();
    set_config(&db_path, config_keys::IMPORT_SCORE_MAX, "400").unwrap();

    let outcome = importer(&db_path)
        .import_csv(result_line("123", 1, 1, 350).as_bytes(), 1, false)
        .unwrap();

    assert_eq!(outcome.created_count, 1);
}

#[test]
fn test_team_rules() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let input = "\
123,Spring Open,Juvenil,Dobles,Masculino,,1,5,1,200
456,Spring Open,Juvenil,Individual Masculino,Masculino,,1,5,1,200
789,Spring Open,Juvenil,Sencillo Damas,Femenino,Hawks,1,5,1,200
123,Spring Open,Juvenil,Individual Masculino,Masculino,Owls,1,5,2,200
";

    let outcome = importer(&db_path)
        .import_csv(input.as_bytes(), 1, false)
        .unwrap();

    assert_eq!(outcome.created_count, 2);
    assert_eq!(
        outcome.errors,
        vec![
            "Línea 1: la modalidad 'Dobles' requiere equipo",
            "Línea 4: no se encontró equipo con equipo 'Owls'",
        ]
    );

    let conn = shared_connection(&db_path).unwrap();
    let conn = conn.lock().unwrap();
    let individual_team: Option<i64> = conn
        .query_row(
            "SELECT team_id FROM score_result WHERE person_id = 2",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(individual_team, None);
}

#[test]
fn test_reference_resolution_rules() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let input = "\
123,Spring Open,Juvenil,Dobles,MASCULINO,Eagles,1,5,1,200
456,Spring Open,juvenil,Dobles,Masculino,Eagles,1,5,1,200
789,Spring Open,Infantil,Dobles,Masculino,Eagles,1,5,1,200
999,Spring Open,Juvenil,Dobles,Masculino,Eagles,1,5,1,200
";

    let outcome = importer(&db_path)
        .import_csv(input.as_bytes(), 1, false)
        .unwrap();

    assert_eq!(outcome.created_count, 1);
    assert_eq!(
        outcome.errors,
        vec![
            "Línea 2: no se encontró categoría con categoria 'juvenil'",
            "Línea 3: no se encontró categoría con categoria 'Infantil'",
            "Línea 4: no se encontró persona con documento '999'",
        ]
    );
}

#[test]
fn test_reimport_counts_duplicates_as_skipped() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let input = [result_line("123", 1, 1, 245), result_line("456", 1, 1, 198)].join("\n");

    let first = importer(&db_path)
        .import_csv(input.as_bytes(), 1, false)
        .unwrap();
    assert_eq!(first.created_count, 2);

    let second = importer(&db_path)
        .import_csv(input.as_bytes(), 1, false)
        .unwrap();
    assert_eq!(second.created_count, 0);
    assert_eq!(second.skipped_count, 2);
    assert_eq!(
        second.errors[0],
        "Línea 1: registro duplicado omitido (documento 123, ronda 1, línea 1)"
    );
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 2);
}

#[test]
fn test_identical_rows_in_one_file() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let row = result_line("123", 2, 3, 245);
    let input = format!("{}\n{}\n", row, row);

    let outcome = importer(&db_path)
        .import_csv(input.as_bytes(), 1, false)
        .unwrap();

    assert_eq!(outcome.created_count, 1);
    assert_eq!(outcome.skipped_count, 1);
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 1);
}

#[test]
fn test_header_and_line_numbers() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let input = format!(
        "documento,nombreTorneo,categoria,modalidad,rama,equipo,numeroRonda,numeroCarril,numeroLinea,puntaje\n\
         {}\n\
         \n\
         123,Spring Open,Juvenil,Dobles,Masculino,Eagles,uno,5,2,200\n\
         456,Spring Open\n",
        result_line("123", 1, 1, 245)
    );

    let outcome = importer(&db_path)
        .import_csv(input.as_bytes(), 1, true)
        .unwrap();

    assert_eq!(outcome.created_count, 1);
    assert_eq!(
        outcome.errors,
        vec![
            "Línea 4: valor no numérico en numeroRonda: 'uno'",
            "Línea 5: se esperaban 10 columnas, se encontraron 2",
        ]
    );
}

#[test]
fn test_large_file_with_small_batches() {
    let (_tmp, db_path) = create_test_db().unwrap();
    set_config(&db_path, config_keys::IMPORT_BATCH_SIZE, "100").unwrap();

    let input: Vec<String> = (1..=1001).map(|i| result_line("123", 1, i, 150)).collect();
    let outcome = importer(&db_path)
        .import_csv(input.join("\n").as_bytes(), 1, false)
        .unwrap();

    assert_eq!(outcome.created_count, 1001);
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 1001);
}

#[test]
fn test_invalid_configuration_fails_the_call() {
    let (_tmp, db_path) = create_test_db().unwrap();
    set_config(&db_path, config_keys::IMPORT_BATCH_SIZE, "abc").unwrap();

    let err = importer(&db_path)
        .import_csv(result_line("123", 1, 1, 245).as_bytes(), 1, false)
        .unwrap_err();

    assert!(matches!(err, ImportError::Config(_)));
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 0);
}
