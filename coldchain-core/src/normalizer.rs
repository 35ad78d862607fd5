//! Reading normalization
//!
//! ## Overview
//!
//! The normalizer is the only gate between raw ingested tuples and the
//! evaluation pipeline. It enforces, per item:
//!
//! - a timestamp is present
//! - a sensor id is present
//! - the value is a finite number
//!
//! and then canonicalizes: values convert to Celsius, and the batch is
//! sorted by timestamp with a stable sort, so readings sharing a timestamp
//! keep their arrival order.
//!
//! ## Failure model
//!
//! Validation fails per-item, never per-batch. A malformed entry is dropped
//! and counted under its [`RejectReason`]; it is never coerced into a
//! plausible-looking value. The caller gets both the clean sequence and the
//! drop counts, so a dashboard can show "3 readings discarded" instead of
//! silently thinning the data.
//!
//! When several checks would fail for the same item, the first one in the
//! order above is the one counted.

use alloc::vec::Vec;

use crate::{
    errors::RejectReason,
    reading::{RawReading, Reading, SensorId},
    units::TempUnit,
};

/// Per-reason counts of readings dropped during normalization
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropCounts {
    /// Readings whose value was NaN or infinite
    pub non_finite: u32,
    /// Readings without a timestamp
    pub missing_timestamp: u32,
    /// Readings without a usable sensor id
    pub missing_sensor: u32,
}

impl DropCounts {
    /// Record one rejection
    pub fn record(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::NonFiniteValue => self.non_finite += 1,
            RejectReason::MissingTimestamp => self.missing_timestamp += 1,
            RejectReason::MissingSensorId => self.missing_sensor += 1,
        }
    }

    /// Total readings dropped, across all reasons
    pub fn total(&self) -> u32 {
        self.non_finite + self.missing_timestamp + self.missing_sensor
    }
}

/// Result of normalizing one raw batch
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch {
    /// Valid readings, Celsius, sorted by timestamp (stable on ties)
    pub readings: Vec<Reading>,
    /// What was dropped, and why
    pub dropped: DropCounts,
}

/// Validate and canonicalize a batch of raw readings
///
/// `unit` declares the unit every value in this batch is expressed in.
/// Invariant: `readings.len() + dropped.total() == input length`.
pub fn normalize<I>(raw: I, unit: TempUnit) -> NormalizedBatch
where
    I: IntoIterator<Item = RawReading>,
{
    let mut readings = Vec::new();
    let mut dropped = DropCounts::default();

    for item in raw {
        let Some(timestamp) = item.timestamp else {
            dropped.record(RejectReason::MissingTimestamp);
            continue;
        };
        let Some(sensor_id) = item.sensor_id else {
            dropped.record(RejectReason::MissingSensorId);
            continue;
        };
        if !item.value.is_finite() {
            dropped.record(RejectReason::NonFiniteValue);
            continue;
        }

        readings.push(Reading {
            sensor_id,
            timestamp,
            value: unit.to_celsius(item.value),
        });
    }

    if dropped.total() > 0 {
        log::debug!(
            "normalizer dropped {} of {} readings: {:?}",
            dropped.total(),
            readings.len() + dropped.total() as usize,
            dropped
        );
    }

    // Stable sort: equal timestamps keep arrival order
    readings.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    NormalizedBatch { readings, dropped }
}

/// Split a normalized batch into independent per-sensor sequences
///
/// Streams come back in first-appearance order; within each stream the
/// readings keep their normalized (sorted) order. Each stream satisfies the
/// evaluator's precondition on its own, so the caller may evaluate them in
/// parallel without coordination.
pub fn partition_by_sensor(readings: &[Reading]) -> Vec<(SensorId, Vec<Reading>)> {
    let mut streams: Vec<(SensorId, Vec<Reading>)> = Vec::new();

    for reading in readings {
        match streams.iter_mut().find(|(id, _)| *id == reading.sensor_id) {
            Some((_, stream)) => stream.push(*reading),
            None => {
                let mut stream = Vec::new();
                stream.push(*reading);
                streams.push((reading.sensor_id, stream));
            }
        }
    }

    streams
}
