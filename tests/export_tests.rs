use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_staff, run_full_day, setup_test_db, stc, temp_out};

#[test]
fn test_export_records_csv_all() {
    let db_path = setup_test_db("export_records_csv_all");
    init_db_with_staff(&db_path);
    run_full_day(&db_path, "2025-10-13");
    run_full_day_next(&db_path);

    let out = temp_out("export_records_csv_all", "csv");

    stc()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,staff_id,date,status"));
    assert!(content.contains("2025-10-13"));
    assert!(content.contains("2025-10-14"));
    assert!(content.contains("45.464200,9.190000"));
}

#[test]
fn test_export_records_json_range() {
    let db_path = setup_test_db("export_records_json_range");
    init_db_with_staff(&db_path);
    run_full_day(&db_path, "2025-10-13");
    run_full_day_next(&db_path);

    let out = temp_out("export_records_json_range", "json");

    stc()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "json",
            "--file",
            &out,
            "--range",
            "2025-10-14",
            "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = parsed.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["date"], "2025-10-14");
    assert_eq!(rows[0]["arrival_location"], "Depot North");
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_staff(&db_path);
    run_full_day(&db_path, "2025-10-13");

    stc()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "csv",
            "--file",
            "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

/// Second day for alice after completing the first one.
fn run_full_day_next(db_path: &str) {
    stc()
        .args([
            "--db",
            db_path,
            "--staff",
            "alice",
            "--today",
            "2025-10-13",
            "complete",
            "--yes",
        ])
        .assert()
        .success();
    run_full_day(db_path, "2025-10-14");
}
