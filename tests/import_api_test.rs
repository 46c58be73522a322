// ==========================================
// Import API tests
// ==========================================
// Full path: file on disk -> async facade -> transaction -> SQLite
// ==========================================

use tournament_scoring::api::{ApiError, ImportApi, ImportKind};
use tournament_scoring::config::config_keys;
use tournament_scoring::importer::ImportError;

use test_helpers::{count_rows, create_test_db, result_line, set_config, write_upload};

#[tokio::test]
async fn test_results_are_committed() {
    tournament_scoring::logging::init_test();
    let (_tmp, db_path) = create_test_db().unwrap();
    let upload = write_upload(
        &[result_line("123", 1, 1, 245), result_line("456", 1, 1, 350)].join("\n"),
        "csv",
    )
    .unwrap();

    let api = ImportApi::new(db_path.clone());
    let response = api
        .import_results(upload.path().to_str().unwrap(), 5, false)
        .await
        .unwrap();

    assert_eq!(response.kind, ImportKind::Results);
    assert_eq!(response.created, 1);
    assert_eq!(response.skipped, 0);
    assert_eq!(response.errors.len(), 1);
    assert!(uuid::Uuid::parse_str(&response.import_id).is_ok());

    // visible through a fresh connection
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 1);
}

#[tokio::test]
async fn test_halted_file_is_a_successful_call() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let upload = write_upload(
        "123,Spring Open,Juvenil,Dobles,Masculino,Eagles,1,5,1,245\n\
         456,Fall Open,Juvenil,Dobles,Masculino,Eagles,1,5,1,245\n",
        "csv",
    )
    .unwrap();

    let response = ImportApi::new(db_path.clone())
        .import_results(upload.path().to_str().unwrap(), 1, false)
        .await
        .unwrap();

    assert_eq!(response.created, 0);
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].contains("múltiples torneos"));
}

#[tokio::test]
async fn test_team_members_and_registrations() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = ImportApi::new(db_path.clone());

    let members = write_upload("123,Eagles\n456,Hawks\n", "csv").unwrap();
    let response = api
        .import_team_members(members.path().to_str().unwrap(), 1, false)
        .await
        .unwrap();
    assert_eq!(response.created, 2);

    let registrations = write_upload("123,Spring Open,Juvenil,Dobles,Masculino\n", "CSV").unwrap();
    let response = api
        .import_registrations(registrations.path().to_str().unwrap(), 1, false)
        .await
        .unwrap();
    assert_eq!(response.kind, ImportKind::Registrations);
    assert_eq!(response.created, 1);

    assert_eq!(count_rows(&db_path, "team_member").unwrap(), 2);
    assert_eq!(count_rows(&db_path, "tournament_registration").unwrap(), 1);
}

#[tokio::test]
async fn test_non_csv_path_is_rejected() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let upload = write_upload(&result_line("123", 1, 1, 245), "xlsx").unwrap();

    let err = ImportApi::new(db_path)
        .import_results(upload.path().to_str().unwrap(), 1, false)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let err = ImportApi::new(db_path)
        .import_results("/nonexistent/dir/results.csv", 1, false)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::IoError { .. }));
}

#[tokio::test]
async fn test_config_failure_rolls_back() {
    let (_tmp, db_path) = create_test_db().unwrap();
    set_config(&db_path, config_keys::IMPORT_SCORE_MAX, "-5").unwrap();
    let upload = write_upload(&result_line("123", 1, 1, 245), "csv").unwrap();

    let err = ImportApi::new(db_path.clone())
        .import_results(upload.path().to_str().unwrap(), 1, false)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::ImportError(ImportError::Config(_))));
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 0);
}

#[tokio::test]
async fn test_persistence_failure_rolls_back_earlier_batches() {
    let (_tmp, db_path) = create_test_db().unwrap();
    set_config(&db_path, config_keys::IMPORT_BATCH_SIZE, "2").unwrap();

    // the third record fails after the first batch is already written
    {
        let conn = tournament_scoring::db::open_sqlite_connection(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER fail_third BEFORE INSERT ON score_result \
             WHEN NEW.line_number = 3 BEGIN SELECT RAISE(ABORT, 'forced failure'); END;",
        )
        .unwrap();
    }

    let input: Vec<String> = (1..=4).map(|i| result_line("123", 1, i, 200)).collect();
    let upload = write_upload(&input.join("\n"), "csv").unwrap();

    let err = ImportApi::new(db_path.clone())
        .import_results(upload.path().to_str().unwrap(), 1, false)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::ImportError(ImportError::BatchPersistence { batch: 2, .. })
    ));
    assert_eq!(count_rows(&db_path, "score_result").unwrap(), 0);
}
