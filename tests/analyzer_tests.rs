use trace_detective::analyzer::analyze;

const APP_LOG: &str = "\
2024-03-01 10:00:00 INFO [app.boot] Service starting
2024-03-01 10:00:01,337 ERROR [app.db] Connection refused
2024-03-01 10:00:02 WARNING [app.db] Retrying connection
2024-03-01 10:00:03.500 ERROR [app.db] Connection refused
2024-03-01 10:00:04 INFO [app.http] Listening on :8080
2024-03-01 10:00:05 CRITICAL [app.db] Giving up after 3 attempts
";

#[test]
fn test_severity_counting_and_grouping() {
    let analysis = analyze(APP_LOG, None);

    assert_eq!(analysis.total_lines, 6);
    assert_eq!(analysis.total_errors(), 3);
    assert_eq!(analysis.total_warnings(), 1);

    // Both ERROR lines normalize to the same key despite different
    // timestamps and fractional-second separators.
    assert_eq!(analysis.errors.get("Connection refused"), Some(&2));
    assert_eq!(analysis.errors.get("Giving up after 3 attempts"), Some(&1));
    assert_eq!(analysis.warnings.get("Retrying connection"), Some(&1));
}

#[test]
fn test_timestamps_collected_in_encounter_order() {
    let analysis = analyze(APP_LOG, None);

    assert_eq!(analysis.timestamps.len(), 6);
    assert_eq!(analysis.timestamps[0], "2024-03-01 10:00:00");
    assert_eq!(analysis.timestamps[5], "2024-03-01 10:00:05");
}

#[test]
fn test_custom_pattern_is_case_sensitive_literal() {
    let analysis = analyze(APP_LOG, Some("Connection"));
    let hits = analysis.patterns.get("Connection").unwrap();

    // "Retrying connection" has a lowercase c and must not match.
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].line_number, 2);
    assert_eq!(hits[1].line_number, 4);
    assert_eq!(
        hits[0].content,
        "2024-03-01 10:00:01,337 ERROR [app.db] Connection refused"
    );
}

#[test]
fn test_analysis_json_shape() {
    let analysis = analyze(APP_LOG, Some("Connection"));
    let value = serde_json::to_value(&analysis).unwrap();

    assert_eq!(value["total_lines"], 6);
    assert_eq!(value["errors"]["Connection refused"], 2);
    assert_eq!(value["warnings"]["Retrying connection"], 1);
    assert_eq!(value["patterns"]["Connection"][0]["line_number"], 2);
    assert!(value["patterns"]["Connection"][0]["content"]
        .as_str()
        .unwrap()
        .ends_with("Connection refused"));
    assert_eq!(value["timestamps"][0], "2024-03-01 10:00:00");
}

#[test]
fn test_log_without_findings() {
    let analysis = analyze("all quiet\nnothing to report\n", None);

    assert_eq!(analysis.total_lines, 2);
    assert_eq!(analysis.total_errors(), 0);
    assert_eq!(analysis.total_warnings(), 0);
    assert!(analysis.timestamps.is_empty());
    assert!(analysis.patterns.is_empty());
}
