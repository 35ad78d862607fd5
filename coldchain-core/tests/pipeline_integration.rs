//! Integration tests for the compliance pipeline
//!
//! Exercises the complete flow from raw ingested tuples through
//! normalization, evaluation, and aggregation, plus serialization of the
//! result model as a presentation layer would consume it.

use coldchain_core::{
    check_reading, evaluate, normalize, recommended_setpoint, run, run_per_sensor, summarize,
    AlertKind, ComplianceReport, ConfigError, RawReading, SensorId, TempUnit, ThresholdPolicy,
    TimeWindow, ViolationEpisode,
};

fn raw(id: &str, timestamp: u64, value: f32) -> RawReading {
    RawReading {
        sensor_id: SensorId::new(id),
        timestamp: Some(timestamp),
        value,
    }
}

#[test]
fn worked_excursion_example() {
    // Two readings at 9.0 against a 2-8 band, one tick minimum duration
    let policy = ThresholdPolicy::new(2.0, 8.0, 1, TempUnit::Celsius).unwrap();
    let batch = normalize(
        vec![
            raw("t", 0, 4.0),
            raw("t", 1, 4.0),
            raw("t", 2, 9.0),
            raw("t", 3, 9.0),
            raw("t", 4, 4.0),
        ],
        TempUnit::Celsius,
    );

    let evaluation = evaluate(&batch.readings, &policy);
    assert_eq!(
        evaluation.episodes,
        vec![ViolationEpisode {
            start: 2,
            end: 3,
            peak_deviation: 1.0,
            sample_count: 2,
            open: false,
        }]
    );

    let summary = summarize(&batch.readings, &evaluation.episodes, &policy, None);
    assert_eq!(summary.violation_count(), 1);
    assert_eq!(summary.time_in_band_fraction, 3.0 / 5.0);
}

#[test]
fn lone_out_of_band_reading() {
    let policy = ThresholdPolicy::new(2.0, 8.0, 0, TempUnit::Celsius).unwrap();
    let batch = normalize(vec![raw("t", 5, 9.0)], TempUnit::Celsius);

    let evaluation = evaluate(&batch.readings, &policy);
    assert_eq!(evaluation.episodes.len(), 1);
    let episode = evaluation.episodes[0];
    assert_eq!(episode.start, 5);
    assert_eq!(episode.end, 5);
    assert_eq!(episode.sample_count, 1);
}

#[test]
fn all_in_band_sequence() {
    let policy = ThresholdPolicy::new(2.0, 8.0, 0, TempUnit::Celsius).unwrap();
    let input: Vec<RawReading> = (0..10).map(|i| raw("t", i * 1000, 4.0)).collect();

    let report = run(input, TempUnit::Celsius, &policy, None);
    assert!(report.summary.episodes.is_empty());
    assert_eq!(report.summary.time_in_band_fraction, 1.0);
    assert_eq!(report.in_band_count, 10);
}

#[test]
fn empty_window_summary() {
    let policy = ThresholdPolicy::milk();
    let report = run(
        vec![raw("t", 0, 3.0)],
        TempUnit::Celsius,
        &policy,
        Some(TimeWindow::new(10_000, 20_000)),
    );

    assert_eq!(report.summary.time_in_band_fraction, 1.0);
    assert_eq!(report.summary.mean, None);
    assert_eq!(report.summary.min, None);
    assert_eq!(report.summary.max, None);
}

#[test]
fn windowed_summary_restricts_readings() {
    let policy = ThresholdPolicy::new(2.0, 8.0, 1, TempUnit::Celsius).unwrap();
    let input = vec![
        raw("t", 0, 4.0),
        raw("t", 1, 4.0),
        raw("t", 2, 9.0),
        raw("t", 3, 9.0),
        raw("t", 4, 4.0),
    ];

    let report = run(
        input,
        TempUnit::Celsius,
        &policy,
        Some(TimeWindow::new(2, 4)),
    );

    assert_eq!(report.summary.sample_count, 2);
    assert_eq!(report.summary.mean, Some(9.0));
    assert_eq!(report.summary.time_in_band_fraction, 0.0);
    // The episode overlaps the window and is reported whole
    assert_eq!(report.summary.violation_count(), 1);
}

#[test]
fn malformed_and_unordered_input() {
    let policy = ThresholdPolicy::milk().with_min_excursion(0);
    let input = vec![
        raw("t", 3000, 3.5),
        RawReading {
            sensor_id: SensorId::new("t"),
            timestamp: None,
            value: 3.0,
        },
        raw("t", 1000, 3.0),
        raw("t", 2000, f32::NAN),
        raw("t", 4000, 9.0),
    ];

    let report = run(input, TempUnit::Celsius, &policy, None);
    assert_eq!(report.dropped.missing_timestamp, 1);
    assert_eq!(report.dropped.non_finite, 1);
    assert_eq!(report.reading_count, 3);
    assert_eq!(report.summary.window_start, 1000);
    assert_eq!(report.summary.window_end, 4000);
    assert_eq!(report.summary.violation_count(), 1);
}

#[test]
fn fahrenheit_end_to_end() {
    // 35.6-39.2 °F is the 2-4 °C milk band; readings arrive in Fahrenheit
    let policy = ThresholdPolicy::new(35.6, 39.2, 0, TempUnit::Fahrenheit).unwrap();
    let report = run(
        vec![raw("t", 0, 37.4), raw("t", 1000, 42.8)],
        TempUnit::Fahrenheit,
        &policy,
        None,
    );

    assert_eq!(report.in_band_count, 1);
    assert_eq!(report.summary.violation_count(), 1);
    // 42.8 °F is 6 °C, two degrees over the 4 °C ceiling
    let peak = report.summary.episodes[0].peak_deviation;
    assert!((peak - 2.0).abs() < 1e-3);
}

#[test]
fn per_sensor_streams_are_independent() {
    let policy = ThresholdPolicy::milk().with_min_excursion(0);
    let report = run_per_sensor(
        vec![
            raw("room_1", 0, 3.0),
            raw("room_2", 0, 3.1),
            raw("room_1", 60_000, 3.2),
            raw("room_2", 60_000, 8.9),
            raw("room_1", 120_000, 3.1),
            raw("room_2", 120_000, 3.0),
        ],
        TempUnit::Celsius,
        &policy,
        None,
    );

    assert_eq!(report.streams.len(), 2);
    assert_eq!(report.streams[0].summary.violation_count(), 0);
    assert_eq!(report.streams[1].summary.violation_count(), 1);
    assert_eq!(report.streams[1].summary.episodes[0].start, 60_000);
}

#[test]
fn invalid_policies_never_construct() {
    assert!(matches!(
        ThresholdPolicy::new(8.0, 2.0, 0, TempUnit::Celsius),
        Err(ConfigError::InvalidBand { .. })
    ));
    assert!(matches!(
        ThresholdPolicy::new(f32::NAN, 2.0, 0, TempUnit::Celsius),
        Err(ConfigError::NonFiniteBound)
    ));
}

#[test]
fn report_serializes_losslessly() {
    let policy = ThresholdPolicy::milk().with_min_excursion(0);
    let report = run(
        vec![
            raw("room_1", 0, 3.0),
            raw("room_1", 60_000, 9.0),
            raw("room_1", 120_000, 3.0),
        ],
        TempUnit::Celsius,
        &policy,
        None,
    );

    let json = serde_json::to_string(&report).unwrap();
    let restored: ComplianceReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, report);
}

#[test]
fn deserialized_policies_are_validated() {
    // An inverted band must not sneak in through the wire
    let json = r#"{
        "lower_bound": 8.0,
        "upper_bound": 2.0,
        "min_excursion_ms": 0,
        "unit": "Celsius"
    }"#;
    assert!(serde_json::from_str::<ThresholdPolicy>(json).is_err());

    let json = r#"{
        "lower_bound": 2.0,
        "upper_bound": 4.0,
        "min_excursion_ms": 300000,
        "unit": "Celsius"
    }"#;
    let policy: ThresholdPolicy = serde_json::from_str(json).unwrap();
    assert_eq!(policy, ThresholdPolicy::milk());
}

#[test]
fn advisor_matches_dashboard_behavior() {
    let policy = ThresholdPolicy::milk();

    // Live banner the moment a reading is out of band
    let alert = check_reading(5.2, &policy).unwrap();
    assert_eq!(alert.kind, AlertKind::TooWarm);
    assert!(check_reading(3.0, &policy).is_none());

    // Setpoint guidance shifts with ambient conditions
    assert_eq!(recommended_setpoint(&policy, 35.0), 2.0);
    assert_eq!(recommended_setpoint(&policy, 22.0), 3.0);
}
