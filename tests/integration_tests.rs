use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_batch, rbc, setup_test_db, write_fixture};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    rbc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_check_reports_flags_and_saves_batch() {
    let db_path = setup_test_db("check_sample");

    rbc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let input = write_fixture("check_sample", common::SAMPLE_CSV);

    rbc()
        .args(["--db", &db_path, "--test", "check", &input])
        .assert()
        .success()
        .stdout(contains("Loaded 3 entries"))
        .stdout(contains("[long_entry]"))
        .stdout(contains("[weekend]"))
        .stdout(contains("[vague]"))
        .stdout(contains("L350"))
        .stdout(contains("Confidence: 2 high / 0 medium / 1 low"))
        .stdout(contains("Saved as batch 1."));
}

#[test]
fn test_check_no_save_keeps_database_empty() {
    let db_path = setup_test_db("check_no_save");

    rbc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let input = write_fixture("check_no_save", common::SAMPLE_CSV);

    rbc()
        .args(["--db", &db_path, "--test", "check", &input, "--no-save"])
        .assert()
        .success()
        .stdout(contains("Batch not saved"));

    rbc()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("No batches saved yet"));
}

#[test]
fn test_check_missing_file_fails_with_ingest_error() {
    let db_path = setup_test_db("check_missing");

    rbc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rbc()
        .args(["--db", &db_path, "--test", "check", "/nonexistent/input.csv"])
        .assert()
        .failure()
        .stderr(contains("Ingestion error"));
}

#[test]
fn test_check_header_only_file_fails() {
    let db_path = setup_test_db("check_header_only");

    rbc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let input = write_fixture("check_header_only", "Date,Attorney,Description,Hours\n");

    rbc()
        .args(["--db", &db_path, "--test", "check", &input])
        .assert()
        .failure()
        .stderr(contains("Ingestion error"));

    // a failed ingest must not leave a partial batch behind
    rbc()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("No batches saved yet"));
}

#[test]
fn test_list_batches_and_entries() {
    let db_path = setup_test_db("list_flow");
    init_db_with_batch(&db_path, "list_flow");

    // batch listing
    rbc()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("list_flow_fixture"))
        .stdout(contains("Flagged"));

    // entry listing, flagged only
    rbc()
        .args(["--db", &db_path, "--test", "list", "--batch", "1", "--flagged"])
        .assert()
        .success()
        .stdout(contains("E0001"))
        .stdout(contains("E0002").not());

    // confidence filter
    rbc()
        .args([
            "--db",
            &db_path,
            "--test",
            "list",
            "--batch",
            "1",
            "--confidence",
            "high",
        ])
        .assert()
        .success()
        .stdout(contains("E0002"))
        .stdout(contains("E0001").not());
}

#[test]
fn test_list_summary_and_daily_views() {
    let db_path = setup_test_db("list_views");
    init_db_with_batch(&db_path, "list_views");

    rbc()
        .args(["--db", &db_path, "--test", "list", "--batch", "1", "--summary"])
        .assert()
        .success()
        .stdout(contains("3 total"))
        .stdout(contains("1 flagged"));

    rbc()
        .args(["--db", &db_path, "--test", "list", "--batch", "1", "--daily"])
        .assert()
        .success()
        .stdout(contains("2024-01-06"))
        .stdout(contains("2024-01-08"));
}

#[test]
fn test_review_approve_and_confirm() {
    let db_path = setup_test_db("review_flow");
    init_db_with_batch(&db_path, "review_flow");

    rbc()
        .args([
            "--db", &db_path, "--test", "review", "--batch", "1", "--entry", "E0002",
            "--approve", "--confirm",
        ])
        .assert()
        .success()
        .stdout(contains("Entry E0002 approved, confirmed."));

    // unknown entry id must fail cleanly
    rbc()
        .args([
            "--db", &db_path, "--test", "review", "--batch", "1", "--entry", "E9999",
            "--approve",
        ])
        .assert()
        .failure()
        .stderr(contains("No entry 'E9999' in batch 1"));

    // no action flags at all
    rbc()
        .args([
            "--db", &db_path, "--test", "review", "--batch", "1", "--entry", "E0002",
        ])
        .assert()
        .failure()
        .stderr(contains("nothing to do"));
}

#[test]
fn test_recheck_preserves_review_state() {
    let db_path = setup_test_db("recheck_flow");
    init_db_with_batch(&db_path, "recheck_flow");

    rbc()
        .args([
            "--db", &db_path, "--test", "review", "--batch", "1", "--entry", "E0001",
            "--write-off",
        ])
        .assert()
        .success();

    rbc()
        .args(["--db", &db_path, "--test", "recheck", "1"])
        .assert()
        .success()
        .stdout(contains("Batch 1 re-verified."));

    // the write-off survives the re-run
    rbc()
        .args(["--db", &db_path, "--test", "list", "--batch", "1", "--summary"])
        .assert()
        .success()
        .stdout(contains("1 written off"));
}

#[test]
fn test_recheck_unknown_batch_fails() {
    let db_path = setup_test_db("recheck_unknown");

    rbc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rbc()
        .args(["--db", &db_path, "--test", "recheck", "7"])
        .assert()
        .failure()
        .stderr(contains("No batch found with id 7"));
}

#[test]
fn test_del_batch_with_confirmation_skip() {
    let db_path = setup_test_db("del_flow");
    init_db_with_batch(&db_path, "del_flow");

    rbc()
        .args(["--db", &db_path, "--test", "del", "--batch", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted batch 1 (3 entries)."));

    rbc()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("No batches saved yet"));
}

#[test]
fn test_del_prompt_cancel_keeps_batch() {
    let db_path = setup_test_db("del_cancel");
    init_db_with_batch(&db_path, "del_cancel");

    rbc()
        .args(["--db", &db_path, "--test", "del", "--batch", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Deletion cancelled"));

    rbc()
        .args(["--db", &db_path, "--test", "list", "--batch", "1", "--summary"])
        .assert()
        .success()
        .stdout(contains("3 total"));
}

#[test]
fn test_profile_roundtrip() {
    let db_path = setup_test_db("profile_flow");

    rbc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rbc()
        .args(["--db", &db_path, "--test", "profile", "--save", "standard"])
        .assert()
        .success()
        .stdout(contains("Profile 'standard' saved."));

    rbc()
        .args(["--db", &db_path, "--test", "profile", "--list"])
        .assert()
        .success()
        .stdout(contains("standard"));

    rbc()
        .args(["--db", &db_path, "--test", "profile", "--show", "standard"])
        .assert()
        .success()
        .stdout(contains("hourly_rate"));

    // a saved profile is usable by check
    let input = write_fixture("profile_flow", common::SAMPLE_CSV);
    rbc()
        .args([
            "--db", &db_path, "--test", "check", &input, "--profile", "standard",
        ])
        .assert()
        .success()
        .stdout(contains("Saved as batch 1."));

    rbc()
        .args(["--db", &db_path, "--test", "profile", "--delete", "standard"])
        .assert()
        .success()
        .stdout(contains("Profile 'standard' deleted."));

    rbc()
        .args([
            "--db", &db_path, "--test", "check", &input, "--profile", "standard",
        ])
        .assert()
        .failure()
        .stderr(contains("No profile named 'standard'"));
}

#[test]
fn test_internal_log_records_operations() {
    let db_path = setup_test_db("log_flow");
    init_db_with_batch(&db_path, "log_flow");

    rbc()
        .args(["--db", &db_path, "--test", "del", "--batch", "1", "--yes"])
        .assert()
        .success();

    rbc()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("check"))
        .stdout(contains("del"));
}

#[test]
fn test_db_maintenance_commands() {
    let db_path = setup_test_db("db_maint");
    init_db_with_batch(&db_path, "db_maint");

    rbc()
        .args(["--db", &db_path, "--test", "db", "--check", "--info", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Batches:"))
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_check_with_client_override_flags_leak() {
    let db_path = setup_test_db("client_override");

    rbc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let input = write_fixture(
        "client_override",
        "Date,Attorney,Description,Hours,Rate\n\
         2024-01-08,J. Smith,Conference with Acme Corp management about timeline,1.0,300\n",
    );

    rbc()
        .args([
            "--db", &db_path, "--test", "check", &input, "--client", "Acme Corp", "-v",
        ])
        .assert()
        .success()
        .stdout(contains("Mentions 'Acme Corp' by name"));
}
