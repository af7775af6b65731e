//! Ingestion-boundary tests: the delimited state machine, format sniffing,
//! column-role detection, JSON synonym handling and failure modes.

use rbillcheck::core::ingest::table::{parse_delimited, split_line};
use rbillcheck::core::ingest::{InputFormat, parse_input};
use rbillcheck::errors::AppError;
use rbillcheck::models::settings::VerifierSettings;


fn settings() -> VerifierSettings {
    VerifierSettings::default()
}

#[test]
fn test_quoted_field_with_delimiter_and_doubled_quotes() {
    let raw = "a,\"say \"\"hello\"\", ok\",c\n";
    let rows = parse_delimited(raw, ',');

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], vec!["a", "say \"hello\", ok", "c"]);
}

#[test]
fn test_quoted_field_with_embedded_newline() {
    let raw = "a,\"line one\nline two\",c\r\nd,e,f\n";
    let rows = parse_delimited(raw, ',');

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], "line one\nline two");
    assert_eq!(rows[1], vec!["d", "e", "f"]);
}

#[test]
fn test_blank_rows_are_dropped() {
    let raw = "a,b\n,\n  ,  \nc,d\n";
    let rows = parse_delimited(raw, ',');
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_split_line_keeps_quoted_commas() {
    let fields = split_line("2024-01-05,\"Jones, Alice\",Draft brief", ',');
    assert_eq!(fields, vec!["2024-01-05", "Jones, Alice", "Draft brief"]);
}

#[test]
fn test_csv_with_synonym_headers() {
    let raw = "\
Service Date,Timekeeper,Narrative,Hrs,Hourly Rate
2024-03-04,J. Smith,Draft protective order motion,1.5,275
";
    let entries = parse_input(raw, InputFormat::Auto, &settings()).unwrap();
    assert_eq!(entries.len(), 1);

    let e = &entries[0];
    assert_eq!(e.id, "E0001");
    assert_eq!(e.date, "2024-03-04");
    assert_eq!(e.attorney, "J. Smith");
    assert_eq!(e.hours, 1.5);
    assert_eq!(e.rate, 275.0);
    assert_eq!(e.amount, 412.5);
}

#[test]
fn test_headers_out_of_order_are_remapped() {
    let raw = "\
Hours,Description,Date,Attorney
2.0,Draft settlement agreement,2024-03-04,A. Jones
";
    let entries = parse_input(raw, InputFormat::Csv, &settings()).unwrap();
    let e = &entries[0];
    assert_eq!(e.hours, 2.0);
    assert_eq!(e.description, "Draft settlement agreement");
    assert_eq!(e.attorney, "A. Jones");
}

#[test]
fn test_rate_defaults_from_settings_and_amount_derives() {
    let raw = "\
Date,Attorney,Description,Hours
2024-03-04,J. Smith,Draft discovery requests,2.0
";
    let s = VerifierSettings {
        hourly_rate: 200.0,
        ..settings()
    };
    let entries = parse_input(raw, InputFormat::Csv, &s).unwrap();
    assert_eq!(entries[0].rate, 200.0);
    assert_eq!(entries[0].amount, 400.0);
}

#[test]
fn test_supplied_amount_wins_over_derivation() {
    let raw = "\
Date,Attorney,Description,Hours,Rate,Amount
2024-03-04,J. Smith,Draft discovery requests,2.0,300,450.00
";
    let entries = parse_input(raw, InputFormat::Csv, &settings()).unwrap();
    assert_eq!(entries[0].amount, 450.0);
}

#[test]
fn test_currency_symbols_and_separators_parse() {
    let raw = "\
Date,Attorney,Description,Hours,Rate,Amount
2024-03-04,J. Smith,Prepare fee application exhibits,2.0,$350,\"$1,200.50\"
";
    let entries = parse_input(raw, InputFormat::Csv, &settings()).unwrap();
    assert_eq!(entries[0].rate, 350.0);
    assert_eq!(entries[0].amount, 1200.5);
}

#[test]
fn test_tsv_sniffed_from_first_line() {
    let raw = "Date\tAttorney\tDescription\tHours\n2024-03-04\tJ. Smith\tDraft brief outline\t1.0\n";
    let entries = parse_input(raw, InputFormat::Auto, &settings()).unwrap();
    assert_eq!(entries[0].description, "Draft brief outline");
}

#[test]
fn test_json_array_with_synonym_keys() {
    let raw = r#"[
        {"serviceDate": "2024-03-04", "timekeeper": "J. Smith", "narrative": "Draft brief", "hrs": 1.5, "billingRate": 300},
        {"date": "2024-03-05", "attorney": "A. Jones", "description": "Review deposition transcript", "hours": "2.5"}
    ]"#;

    let entries = parse_input(raw, InputFormat::Auto, &settings()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rate, 300.0);
    assert_eq!(entries[1].hours, 2.5);
}

#[test]
fn test_json_object_wrappers() {
    for key in ["entries", "data", "timeEntries"] {
        let raw = format!(
            r#"{{"{key}": [{{"date": "2024-03-04", "attorney": "J. Smith", "description": "Draft brief", "hours": 1.0}}]}}"#
        );
        let entries = parse_input(&raw, InputFormat::Json, &settings()).unwrap();
        assert_eq!(entries.len(), 1, "wrapper key {key}");
    }
}

#[test]
fn test_plain_text_lines() {
    let raw = "\
2024-03-04,J. Smith,Draft complaint,1.5,300
2024-03-05,A. Jones,Review answer,0.5
";
    let entries = parse_input(raw, InputFormat::Text, &settings()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rate, 300.0);
    // missing rate falls back to the settings default
    assert_eq!(entries[1].rate, settings().hourly_rate);
}

#[test]
fn test_empty_input_is_an_error() {
    let err = parse_input("   \n  ", InputFormat::Auto, &settings()).unwrap_err();
    assert!(matches!(err, AppError::Ingest(_)));
}

#[test]
fn test_header_only_csv_is_an_error() {
    let err = parse_input(
        "Date,Attorney,Description,Hours\n",
        InputFormat::Csv,
        &settings(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Ingest(_)));
}

#[test]
fn test_zero_hour_entries_filtered_then_error() {
    let raw = "\
Date,Attorney,Description,Hours
2024-03-04,J. Smith,Draft brief,0
2024-03-05,A. Jones,,2.0
";
    // first row has no hours, second has no description: nothing survives
    let err = parse_input(raw, InputFormat::Csv, &settings()).unwrap_err();
    assert!(matches!(err, AppError::Ingest(_)));
}

#[test]
fn test_invalid_json_is_an_error() {
    let err = parse_input("{not json", InputFormat::Json, &settings()).unwrap_err();
    assert!(matches!(err, AppError::Ingest(_)));
}

#[test]
fn test_date_window_filters_parseable_dates_only() {
    let raw = "\
Date,Attorney,Description,Hours
2024-03-04,J. Smith,Draft discovery plan outline,1.0
2024-06-01,J. Smith,Review scheduling order updates,1.0
last week,J. Smith,Summarize hearing transcript notes,1.0
";
    let s = VerifierSettings {
        date_from: Some("2024-01-01".to_string()),
        date_to: Some("2024-03-31".to_string()),
        ..settings()
    };

    let entries = parse_input(raw, InputFormat::Csv, &s).unwrap();
    // the June entry is dropped; the unparseable date is kept
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, "2024-03-04");
    assert_eq!(entries[1].date, "last week");
}

#[test]
fn test_source_code_column_is_captured() {
    let raw = "\
Date,Attorney,Description,Hours,UTBMS Code
2024-03-04,J. Smith,Work on case tasks,1.0,L160
";
    let entries = parse_input(raw, InputFormat::Csv, &settings()).unwrap();
    assert_eq!(entries[0].source_code, "L160");
}
