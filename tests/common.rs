#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn stc() -> Command {
    cargo_bin_cmd!("staffcheck")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_staffcheck.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Command acting for `staff` on a fixed calendar date.
pub fn as_staff(db_path: &str, staff: &str, today: &str) -> Command {
    let mut cmd = stc();
    cmd.args(["--db", db_path, "--staff", staff, "--today", today]);
    cmd
}

/// Initialize the DB and register `alice` (staff) and `mario` (manager).
pub fn init_db_with_staff(db_path: &str) {
    stc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    stc()
        .args(["--db", db_path, "staff", "add", "alice", "--name", "Alice Rossi"])
        .assert()
        .success();

    stc()
        .args([
            "--db",
            db_path,
            "staff",
            "add",
            "mario",
            "--name",
            "Mario Bianchi",
            "--manager",
        ])
        .assert()
        .success();
}

/// Walk `alice` through every stage of `today` (plan filed for the same day).
pub fn run_full_day(db_path: &str, today: &str) {
    as_staff(db_path, "alice", today)
        .args(["plan", "--for", today, "--wake", "06:00"])
        .assert()
        .success();
    as_staff(db_path, "alice", today)
        .args(["wakeup", "06:05"])
        .assert()
        .success();
    as_staff(db_path, "alice", today)
        .args(["depart", "07:10", "--route-photo", "route.jpg"])
        .assert()
        .success();
    as_staff(db_path, "alice", today)
        .args([
            "arrive",
            "08:00",
            "--location",
            "Depot North",
            "--gps",
            "45.4642,9.19",
        ])
        .assert()
        .success();
    as_staff(db_path, "alice", today)
        .args(["report", "--content", "Unloaded two trucks"])
        .assert()
        .success();
}
