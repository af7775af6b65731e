#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rbc() -> Command {
    cargo_bin_cmd!("rbillcheck")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rbillcheck.sqlite", name));
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

/// Write an input fixture file and return its path
pub fn write_fixture(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fixture", name));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, content).expect("write fixture");
    p
}

/// Small but representative CSV batch: a flagged Saturday entry, a coded
/// motion entry and a sub-hour conference entry.
pub const SAMPLE_CSV: &str = "\
Date,Attorney,Description,Hours,Rate
2024-01-06,J. Smith,review documents,7.5,300
2024-01-08,J. Smith,Draft motion to compel discovery responses,3.2,300
2024-01-08,A. Jones,Telephone conference with expert regarding damages analysis,0.5,350
";

/// Initialize DB and verify the sample batch (batch id 1)
pub fn init_db_with_batch(db_path: &str, name: &str) -> String {
    rbc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    let input = write_fixture(name, SAMPLE_CSV);

    rbc()
        .args(["--db", db_path, "--test", "check", &input])
        .assert()
        .success();

    input
}
