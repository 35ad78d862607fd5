//! End-to-end compliance pipeline
//!
//! Wires the stages together for callers that just want a report:
//!
//! ```text
//! raw tuples → normalize → evaluate → summarize → ComplianceReport
//! ```
//!
//! Each run is a fresh value built from its inputs; nothing persists between
//! calls, so a host serving several dashboard sessions can run pipelines
//! concurrently without sharing or locking. For sites with several rooms on
//! one feed, [`run_per_sensor`] fans the batch out into independent streams
//! first.

use alloc::vec::Vec;

use crate::{
    aggregator::{summarize, ComplianceSummary},
    evaluator::evaluate,
    normalizer::{normalize, partition_by_sensor, DropCounts},
    policy::ThresholdPolicy,
    reading::{RawReading, SensorId},
    time::TimeWindow,
    units::TempUnit,
};

/// Everything a presentation layer needs to render one sensor stream
///
/// Passive and serializable; the renderer never re-derives compliance logic
/// from raw data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplianceReport {
    /// Policy the readings were judged against
    pub policy: ThresholdPolicy,
    /// Windowed statistics and violation episodes
    pub summary: ComplianceSummary,
    /// Readings rejected during normalization, by reason
    pub dropped: DropCounts,
    /// Valid readings evaluated (whole sequence, not just the window)
    pub reading_count: u32,
    /// Excursion-free readings (whole sequence)
    pub in_band_count: u32,
}

/// Report for one sensor stream within a multi-sensor run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReport {
    /// Stream this report covers
    pub sensor_id: SensorId,
    /// Windowed statistics and violation episodes for this stream
    pub summary: ComplianceSummary,
    /// Valid readings evaluated in this stream
    pub reading_count: u32,
    /// Excursion-free readings in this stream
    pub in_band_count: u32,
}

/// Result of evaluating a mixed batch per sensor
///
/// Drop counts are batch-wide: a reading rejected for a missing sensor id
/// cannot be attributed to any stream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiSensorReport {
    /// Policy applied to every stream
    pub policy: ThresholdPolicy,
    /// Readings rejected during normalization, by reason
    pub dropped: DropCounts,
    /// Per-sensor reports, in first-appearance order
    pub streams: Vec<SensorReport>,
}

/// Run the full pipeline over one batch as a single stream
///
/// `unit` declares the unit of the raw values; `window` optionally restricts
/// the summary (see [`summarize`]).
pub fn run<I>(
    raw: I,
    unit: TempUnit,
    policy: &ThresholdPolicy,
    window: Option<TimeWindow>,
) -> ComplianceReport
where
    I: IntoIterator<Item = RawReading>,
{
    let batch = normalize(raw, unit);
    let evaluation = evaluate(&batch.readings, policy);
    let summary = summarize(&batch.readings, &evaluation.episodes, policy, window);

    ComplianceReport {
        policy: *policy,
        summary,
        dropped: batch.dropped,
        reading_count: evaluation.sample_count,
        in_band_count: evaluation.in_band_count,
    }
}

/// Run the full pipeline over one batch, split per sensor
///
/// Readings from different sensors never blend into one excursion: each
/// stream is normalized once, then evaluated and summarized on its own.
pub fn run_per_sensor<I>(
    raw: I,
    unit: TempUnit,
    policy: &ThresholdPolicy,
    window: Option<TimeWindow>,
) -> MultiSensorReport
where
    I: IntoIterator<Item = RawReading>,
{
    let batch = normalize(raw, unit);
    let mut streams = Vec::new();

    for (sensor_id, readings) in partition_by_sensor(&batch.readings) {
        let evaluation = evaluate(&readings, policy);
        let summary = summarize(&readings, &evaluation.episodes, policy, window);
        streams.push(SensorReport {
            sensor_id,
            summary,
            reading_count: evaluation.sample_count,
            in_band_count: evaluation.in_band_count,
        });
    }

    MultiSensorReport {
        policy: *policy,
        dropped: batch.dropped,
        streams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, timestamp: u64, value: f32) -> RawReading {
        RawReading {
            sensor_id: SensorId::new(id),
            timestamp: Some(timestamp),
            value,
        }
    }

    #[test]
    fn single_stream_report() {
        let policy = ThresholdPolicy::milk().with_min_excursion(0);
        let report = run(
            vec![raw("room_1", 0, 3.0), raw("room_1", 1000, 9.0)],
            TempUnit::Celsius,
            &policy,
            None,
        );

        assert_eq!(report.reading_count, 2);
        assert_eq!(report.in_band_count, 1);
        assert_eq!(report.summary.violation_count(), 1);
        assert_eq!(report.dropped.total(), 0);
    }

    #[test]
    fn streams_do_not_blend() {
        // room_1 stays in band; freezer_1 breaches. Interleaved on the wire.
        let policy = ThresholdPolicy::milk().with_min_excursion(0);
        let report = run_per_sensor(
            vec![
                raw("room_1", 0, 3.0),
                raw("freezer_1", 500, 9.0),
                raw("room_1", 1000, 3.2),
                raw("freezer_1", 1500, 9.5),
            ],
            TempUnit::Celsius,
            &policy,
            None,
        );

        assert_eq!(report.streams.len(), 2);
        let room = &report.streams[0];
        let freezer = &report.streams[1];
        assert_eq!(room.sensor_id, SensorId::new("room_1").unwrap());
        assert_eq!(room.summary.violation_count(), 0);
        assert_eq!(freezer.summary.violation_count(), 1);
        assert_eq!(freezer.in_band_count, 0);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let input = || {
            vec![
                raw("a", 0, 3.0),
                raw("a", 1000, 9.0),
                raw("a", 2000, 3.0),
            ]
        };
        let policy = ThresholdPolicy::milk().with_min_excursion(0);

        let first = run(input(), TempUnit::Celsius, &policy, None);
        let second = run(input(), TempUnit::Celsius, &policy, None);
        assert_eq!(first, second);
    }
}
