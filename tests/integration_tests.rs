use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_staff, run_full_day, setup_test_db, stc};

#[test]
fn test_init_applies_migrations() {
    let db_path = setup_test_db("int_init");

    stc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied"))
        .stdout(contains("initialization completed"));

    // second run has nothing left to apply
    stc()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("0 applied"));
}

#[test]
fn test_staff_add_and_list() {
    let db_path = setup_test_db("int_staff");
    init_db_with_staff(&db_path);

    stc()
        .args(["--db", &db_path, "staff", "list"])
        .assert()
        .success()
        .stdout(contains("Alice Rossi"))
        .stdout(contains("manager"));

    stc()
        .args(["--db", &db_path, "staff", "add", "alice", "--name", "Again"])
        .assert()
        .failure()
        .stderr(contains("ALREADY_RECORDED"));
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("int_db_info");
    init_db_with_staff(&db_path);
    run_full_day(&db_path, "2025-10-14");

    stc()
        .args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Attendance records:"));
}

#[test]
fn test_log_print_shows_operations() {
    let db_path = setup_test_db("int_log_print");
    init_db_with_staff(&db_path);
    run_full_day(&db_path, "2025-10-14");

    stc()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("staff_add"))
        .stdout(contains("wakeup"))
        .stdout(contains("link"))
        .stdout(contains("report"));
}

#[test]
fn test_staff_flag_is_required_without_default() {
    let db_path = setup_test_db("int_no_staff");
    init_db_with_staff(&db_path);

    stc()
        .args(["--db", &db_path, "--today", "2025-10-14", "status"])
        .assert()
        .failure()
        .stderr(contains("MISSING_REQUIRED_FIELD").or(contains("NOT_FOUND")));
}

#[test]
fn test_status_output_starts_with_the_staff_line() {
    let db_path = setup_test_db("int_no_leading_blank");
    init_db_with_staff(&db_path);

    stc()
        .args([
            "--db",
            &db_path,
            "--staff",
            "alice",
            "--today",
            "2025-10-14",
            "status",
        ])
        .assert()
        .success()
        .stdout(predicates::str::starts_with("Staff: alice | Date: 2025-10-14"));
}
