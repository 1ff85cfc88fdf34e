//! Tests for the rejection artifact, sinks and run report.

use insta::assert_snapshot;
use userfeed_model::{RawRecord, User, Violation};
use userfeed_output::{
    AcceptedSink, CollectingSink, JsonLinesSink, OutputError, RunReport, TextLineSink,
    rejection_rows, remove_stale_rejections, write_rejections, write_rejections_to,
    write_run_report,
};
use userfeed_validate::{RecordValidator, ViolationLedger};

fn make_record(line: u64, values: [&str; 13]) -> RawRecord {
    RawRecord::new(line, values.iter().map(|v| (*v).to_string()).collect()).unwrap()
}

fn sample_ledger() -> (ViolationLedger, Vec<User>) {
    let records = [
        make_record(
            1,
            [
                "", "Jo", "Lee", "555", "DOC1", "10.5", "20.5", "", "", "Lima", "", "", "PE",
            ],
        ),
        make_record(
            2,
            [
                "ok@b.com", "Ann", "Ray", "", "D2", "1", "2", "", "", "Cusco", "", "", "PE",
            ],
        ),
        make_record(
            3,
            [
                "a@b.com", "Jo", "Lee", "", "DOC1", "abc", "20.5", "", "", "Lima", "", "", "PER",
            ],
        ),
    ];
    let validator = RecordValidator::default();
    let mut ledger = ViolationLedger::new();
    let accepted = records
        .iter()
        .filter_map(|record| validator.check(record, &mut ledger))
        .collect();
    (ledger, accepted)
}

#[test]
fn test_rejection_artifact_contents() {
    let (ledger, accepted) = sample_ledger();
    assert_eq!(accepted.len(), 1);

    let mut buffer = Vec::new();
    let rows = write_rejections_to(&mut buffer, &ledger).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert_eq!(rows, 5);
    assert_snapshot!(text.trim_end(), @r"
    email is required: ,Jo,Lee,555,DOC1,10.5,20.5,,,Lima,,,PE
    length email error: ,Jo,Lee,555,DOC1,10.5,20.5,,,Lima,,,PE
    incorrect format email: ,Jo,Lee,555,DOC1,10.5,20.5,,,Lima,,,PE
    error in latitude is not a float number: a@b.com,Jo,Lee,,DOC1,abc,20.5,,,Lima,,,PER
    country length error : a@b.com,Jo,Lee,,DOC1,abc,20.5,,,Lima,,,PER
    ");
}

#[test]
fn test_each_row_carries_a_single_prefix() {
    let (ledger, _) = sample_ledger();
    let rows: Vec<Vec<String>> = rejection_rows(&ledger).collect();

    let for_line_three: Vec<&String> = rows
        .iter()
        .filter(|row| row[0].ends_with("a@b.com"))
        .map(|row| &row[0])
        .collect();
    assert_eq!(
        for_line_three,
        vec![
            "error in latitude is not a float number: a@b.com",
            "country length error : a@b.com"
        ]
    );
    for row in &rows {
        let prefixes = Violation::ALL
            .iter()
            .filter(|v| row[0].contains(v.reason()))
            .count();
        assert_eq!(prefixes, 1, "{row:?}");
    }
    // the ledger still holds the untouched source values
    assert_eq!(ledger.records_for(Violation::CountryLength)[0].fields()[0], "a@b.com");
}

#[test]
fn test_write_rejections_is_reproducible() {
    let (ledger, _) = sample_ledger();
    let dir = tempfile::tempdir().unwrap();
    let first_path = dir.path().join("first/users_errors.csv");
    let second_path = dir.path().join("users_errors.csv");

    let first = write_rejections(&first_path, &ledger).unwrap();
    let second = write_rejections(&second_path, &ledger).unwrap();

    assert_eq!(first.rows, 5);
    assert_eq!(first.sha256, second.sha256);
    assert_eq!(first.sha256.len(), 64);
    assert_eq!(
        std::fs::read(&first_path).unwrap(),
        std::fs::read(&second_path).unwrap()
    );
}

#[test]
fn test_write_rejections_reports_create_failure() {
    let (ledger, _) = sample_ledger();
    let dir = tempfile::tempdir().unwrap();
    // a directory cannot be replaced by a file
    let result = write_rejections(dir.path(), &ledger);
    assert!(matches!(result, Err(OutputError::Create { .. })));
}

#[test]
fn test_remove_stale_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users_errors.csv");
    std::fs::write(&path, "email is required: ,Jo\n").unwrap();

    assert!(remove_stale_rejections(&path).unwrap());
    assert!(!path.exists());
    // already gone
    assert!(!remove_stale_rejections(&path).unwrap());
    // a directory cannot be removed as a file
    assert!(matches!(
        remove_stale_rejections(dir.path()),
        Err(OutputError::Remove { .. })
    ));
}

#[test]
fn test_text_sink_writes_summary_lines() {
    let (_, accepted) = sample_ledger();
    let mut sink = TextLineSink::new(Vec::new());
    for user in &accepted {
        sink.accept(user).unwrap();
    }
    sink.finish().unwrap();
    assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "ok@b.com Ann Ray\n");
}

#[test]
fn test_json_sink_writes_one_object_per_line() {
    let (_, accepted) = sample_ledger();
    let mut sink = JsonLinesSink::new(Vec::new());
    for user in &accepted {
        sink.accept(user).unwrap();
    }
    let text = String::from_utf8(sink.into_inner()).unwrap();
    let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
    assert_eq!(value["email"], "ok@b.com");
    assert_eq!(value["is_phone_verified"], false);
    assert_eq!(value["latitude"], 1.0);
}

#[test]
fn test_json_sink_keeps_non_finite_coordinates() {
    let record = make_record(
        1,
        [
            "b@b.com", "Jo", "Lee", "", "DOC1", "NaN", "inf", "", "", "Lima", "", "", "PE",
        ],
    );
    let mut ledger = ViolationLedger::new();
    let user = RecordValidator::default()
        .check(&record, &mut ledger)
        .expect("accepted");

    let mut sink = JsonLinesSink::new(Vec::new());
    sink.accept(&user).unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert!(text.contains(r#""latitude":"NaN","longitude":"inf""#), "{text}");

    let read_back: User = serde_json::from_str(text.trim_end()).unwrap();
    assert!(read_back.latitude.is_nan());
    assert_eq!(read_back.longitude, f32::INFINITY);
}

fn hand_off<S: AcceptedSink>(mut sink: S, users: &[User]) {
    for user in users {
        sink.accept(user).unwrap();
    }
    sink.finish().unwrap();
}

#[test]
fn test_collecting_sink_through_mut_ref() {
    let (_, accepted) = sample_ledger();
    let mut collected = CollectingSink::default();
    hand_off(&mut collected, &accepted);
    assert_eq!(collected.users, accepted);
}

#[test]
fn test_run_report_counts() {
    let (ledger, accepted) = sample_ledger();
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_rejections(&dir.path().join("users_errors.csv"), &ledger).unwrap();
    let report = RunReport::new(
        std::path::Path::new("users.csv"),
        3,
        accepted.len(),
        &ledger,
        Some(&artifact),
    );

    assert_eq!(report.rejected_count, 2);
    assert_eq!(report.rejection_rows, 5);
    assert_eq!(report.reasons.len(), 5);
    assert_eq!(report.reasons[0].reason, "email is required");
    assert_eq!(report.reasons[0].field, "email");

    let path = write_run_report(&dir.path().join("report.json"), &report).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["schema"], "userfeed.run-report");
    assert_eq!(json["accepted_count"], 1);
    assert_eq!(json["reasons"][4]["violation"], "country_length");
    assert_eq!(json["rejection_artifact"]["sha256"], artifact.sha256);
}
