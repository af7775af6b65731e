use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_batch, rbc, setup_test_db, temp_out};

const CSV_HEADER: &str = "Date,Attorney,Description,Hours,Rounded Hours,Rate,Amount,\
Adjusted Amount,UTBMS Code,Phase,Confidence,Flags,Quality Issues,Approved";

#[test]
fn test_export_csv_schema_and_content() {
    let db_path = setup_test_db("export_csv");
    init_db_with_batch(&db_path, "export_csv");

    let out = temp_out("export_csv", "csv");

    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
            "--batch", "1",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();

    assert_eq!(lines.next().unwrap(), CSV_HEADER);
    assert_eq!(lines.clone().count(), 3);

    let first = lines.next().unwrap();
    assert!(first.starts_with("2024-01-06,J. Smith,review documents,7.50,7.50,300.00,2250.00,2250.00"));
    assert!(first.contains("low"));
    assert!(first.ends_with(",No"));
}

#[test]
fn test_export_csv_reflects_approval() {
    let db_path = setup_test_db("export_csv_approved");
    init_db_with_batch(&db_path, "export_csv_approved");

    rbc()
        .args([
            "--db", &db_path, "--test", "review", "--batch", "1", "--entry", "E0002",
            "--approve",
        ])
        .assert()
        .success();

    let out = temp_out("export_csv_approved", "csv");

    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
            "--batch", "1",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let approved_line = content
        .lines()
        .find(|l| l.contains("motion to compel"))
        .expect("entry line");
    assert!(approved_line.ends_with(",Yes"));
}

#[test]
fn test_export_json_document_shape() {
    let db_path = setup_test_db("export_json");
    init_db_with_batch(&db_path, "export_json");

    let out = temp_out("export_json", "json");

    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "json", "--file", &out,
            "--batch", "1",
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read exported json");
    let doc: serde_json::Value = serde_json::from_str(&content).expect("valid json");

    assert_eq!(doc["entries"].as_array().unwrap().len(), 3);
    assert_eq!(doc["summary"]["total_entries"], 3);
    assert_eq!(doc["summary"]["flagged_entries"], 1);
    assert!(doc["settings"]["hourly_rate"].is_number());
    assert!(doc["exported_at"].is_string());

    // annotated fields survive the round trip
    let first = &doc["entries"][0];
    assert_eq!(first["id"], "E0001");
    assert_eq!(first["confidence"], "low");
    assert!(!first["flags"].as_array().unwrap().is_empty());
}

#[test]
fn test_export_range_spans_batches() {
    let db_path = setup_test_db("export_range");
    init_db_with_batch(&db_path, "export_range");

    let out = temp_out("export_range", "csv");

    // only January 8 entries fall inside the window
    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
            "--range", "2024-01-08",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert_eq!(content.lines().count(), 3); // header + 2 entries
    assert!(!content.contains("2024-01-06"));
}

#[test]
fn test_export_pdf_and_xlsx_write_files() {
    let db_path = setup_test_db("export_binary");
    init_db_with_batch(&db_path, "export_binary");

    let pdf = temp_out("export_binary", "pdf");
    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "pdf", "--file", &pdf,
            "--batch", "1",
        ])
        .assert()
        .success()
        .stdout(contains("PDF export completed"));

    let pdf_bytes = fs::read(&pdf).expect("read pdf");
    assert!(pdf_bytes.starts_with(b"%PDF"));

    let xlsx = temp_out("export_binary", "xlsx");
    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "xlsx", "--file", &xlsx,
            "--batch", "1",
        ])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    assert!(fs::metadata(&xlsx).expect("xlsx metadata").len() > 0);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_batch(&db_path, "export_relative");

    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file",
            "relative_out.csv", "--batch", "1",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_requires_selection() {
    let db_path = setup_test_db("export_no_selection");
    init_db_with_batch(&db_path, "export_no_selection");

    let out = temp_out("export_no_selection", "csv");

    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
        ])
        .assert()
        .failure()
        .stderr(contains("pass --batch N or --range"));
}

#[test]
fn test_export_force_overwrites_existing_file() {
    let db_path = setup_test_db("export_force");
    init_db_with_batch(&db_path, "export_force");

    let out = temp_out("export_force", "csv");
    fs::write(&out, "stale").expect("seed existing file");

    rbc()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
            "--batch", "1", "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("Date,"));
}
