use std::sync::{Arc, Mutex};

use rust_data_extraction::ingestion::{
    ContentFormat, ExtractionContext, ExtractionObserver, ExtractionOptions, ExtractionSeverity, ExtractionStats,
    FileObserver, extract_from_path, extract_from_str,
};
use rust_data_extraction::types::Schema;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<ExtractionStats>>,
    failures: Mutex<Vec<ExtractionSeverity>>,
    alerts: Mutex<Vec<ExtractionSeverity>>,
}

impl ExtractionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &ExtractionContext, stats: ExtractionStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(
        &self,
        _ctx: &ExtractionContext,
        severity: ExtractionSeverity,
        _error: &rust_data_extraction::ExtractionError,
    ) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(
        &self,
        _ctx: &ExtractionContext,
        severity: ExtractionSeverity,
        _error: &rust_data_extraction::ExtractionError,
    ) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: Arc<RecordingObserver>) -> ExtractionOptions {
    ExtractionOptions {
        observer: Some(obs),
        alert_at_or_above: ExtractionSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let schema: Schema = [("a", "$.a[*]"), ("b", "$.b")].into_iter().collect();
    extract_from_str(r#"{"a": [1, 2, 3], "b": 0}"#, ContentFormat::Json, &schema, &options(obs.clone())).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![ExtractionStats { columns: 2, rows: Some(3) }]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let schema: Schema = [("id", "$[0]")].into_iter().collect();

    // Missing file -> Io error -> Critical
    let _ = extract_from_path("tests/fixtures/does_not_exist.csv", &schema, &options(obs.clone())).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![ExtractionSeverity::Critical]);
    assert_eq!(alerts, vec![ExtractionSeverity::Critical]);
}

#[test]
fn broadcast_mismatch_is_error_without_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let schema: Schema = [("a", "$.a[*]"), ("b", "$.b[*]")].into_iter().collect();
    let _ = extract_from_str(r#"{"a": [1], "b": [1, 2]}"#, ContentFormat::Json, &schema, &options(obs.clone()))
        .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![ExtractionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_configuration_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ExtractionOptions {
        alert_at_or_above: ExtractionSeverity::Error,
        ..options(obs.clone())
    };
    let schema: Schema = [("weight", "$[weight]")].into_iter().collect();
    let _ = extract_from_path("tests/fixtures/items.csv", &schema, &opts).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![ExtractionSeverity::Error]);
}

#[test]
fn file_observer_appends_lines() {
    let log = std::env::temp_dir().join(format!("rust-data-extraction-observer-{}.log", std::process::id()));
    let _ = std::fs::remove_file(&log);

    let opts = ExtractionOptions {
        observer: Some(Arc::new(FileObserver::new(&log))),
        ..Default::default()
    };
    let schema: Schema = [("a", "$.a")].into_iter().collect();
    extract_from_str(r#"{"a": 1}"#, ContentFormat::Json, &schema, &opts).unwrap();
    let _ = extract_from_str("{", ContentFormat::Json, &schema, &opts).unwrap_err();

    let contents = std::fs::read_to_string(&log).unwrap();
    let _ = std::fs::remove_file(&log);
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(" ok format=Json"));
    assert!(lines[1].contains(" fail severity=Error kind=malformed_document"));
}

#[test]
fn file_observer_logs_mismatch_kind_and_paths() {
    let log = std::env::temp_dir().join(format!("rust-data-extraction-mismatch-{}.log", std::process::id()));
    let _ = std::fs::remove_file(&log);

    let opts = ExtractionOptions {
        observer: Some(Arc::new(FileObserver::new(&log))),
        ..Default::default()
    };
    let schema: Schema = [("a", "$.a[*]"), ("b", "$.b[*]")].into_iter().collect();
    let err = extract_from_str(r#"{"a": [1], "b": [1, 2]}"#, ContentFormat::Json, &schema, &opts).unwrap_err();
    assert_eq!(err.kind(), "broadcast_mismatch");

    let contents = std::fs::read_to_string(&log).unwrap();
    let _ = std::fs::remove_file(&log);
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("kind=broadcast_mismatch format=Json mode=DataSet"));
    assert!(contents.contains("$.b[*] (2) and $.a[*] (1)"));
}
