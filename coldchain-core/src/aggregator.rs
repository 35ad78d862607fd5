//! Windowed summary statistics over evaluated sequences
//!
//! Produces the [`ComplianceSummary`] a presentation layer renders: central
//! tendency, extremes, dispersion, the time-in-band fraction, and the
//! violation episodes that touch the requested window. The aggregator never
//! re-derives compliance logic; band membership comes from the same policy
//! deviation the evaluator used.

use alloc::vec::Vec;

use crate::{
    constants::MIN_STDDEV_SAMPLES,
    evaluator::ViolationEpisode,
    policy::ThresholdPolicy,
    reading::Reading,
    time::{TimeWindow, Timestamp},
};

/// Summary of compliance over one time window
///
/// Owned by the caller that requested it; immutable once produced. With no
/// readings in the window the statistics are reported as absent (`None`),
/// never as a sentinel number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplianceSummary {
    /// Start of the summarized window
    pub window_start: Timestamp,
    /// End of the summarized window
    pub window_end: Timestamp,
    /// Readings inside the window
    pub sample_count: u32,
    /// Mean temperature in Celsius, absent for an empty window
    pub mean: Option<f32>,
    /// Minimum temperature in Celsius, absent for an empty window
    pub min: Option<f32>,
    /// Maximum temperature in Celsius, absent for an empty window
    pub max: Option<f32>,
    /// Sample standard deviation in Celsius, absent below two readings
    pub std_dev: Option<f32>,
    /// Fraction of in-window readings inside the band
    ///
    /// Deliberate edge-case policy: an empty window is vacuously compliant
    /// and reports 1.0, so a dashboard tile over a quiet period shows green
    /// rather than an error.
    pub time_in_band_fraction: f32,
    /// Violation episodes overlapping the window, in chronological order
    pub episodes: Vec<ViolationEpisode>,
}

impl ComplianceSummary {
    /// Number of violation episodes in the window
    pub fn violation_count(&self) -> usize {
        self.episodes.len()
    }
}

/// Sample standard deviation, absent below [`MIN_STDDEV_SAMPLES`] readings
fn std_dev(values: &[f32], mean: f32) -> Option<f32> {
    if values.len() < MIN_STDDEV_SAMPLES {
        return None;
    }
    let variance: f32 = values
        .iter()
        .map(|&v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f32>()
        / (values.len() - 1) as f32;
    Some(libm::sqrtf(variance))
}

/// Summarize a normalized sequence and its episodes over a window
///
/// `window` restricts the summary to readings with
/// `window.start <= t < window.end`; `None` summarizes the full sequence,
/// reporting the first and last reading timestamps as the window bounds
/// (both zero for an empty sequence). Episodes are included whole whenever
/// they overlap the window.
pub fn summarize(
    readings: &[Reading],
    episodes: &[ViolationEpisode],
    policy: &ThresholdPolicy,
    window: Option<TimeWindow>,
) -> ComplianceSummary {
    let in_window: Vec<&Reading> = match window {
        Some(w) => readings.iter().filter(|r| w.contains(r.timestamp)).collect(),
        None => readings.iter().collect(),
    };

    let (window_start, window_end) = match window {
        Some(w) => (w.start, w.end),
        None => match (readings.first(), readings.last()) {
            (Some(first), Some(last)) => (first.timestamp, last.timestamp),
            _ => (0, 0),
        },
    };

    let selected_episodes: Vec<ViolationEpisode> = match window {
        Some(w) => episodes.iter().filter(|e| e.overlaps(w)).copied().collect(),
        None => episodes.to_vec(),
    };

    if in_window.is_empty() {
        // Vacuously compliant: no readings means nothing out of band
        return ComplianceSummary {
            window_start,
            window_end,
            sample_count: 0,
            mean: None,
            min: None,
            max: None,
            std_dev: None,
            time_in_band_fraction: 1.0,
            episodes: selected_episodes,
        };
    }

    let values: Vec<f32> = in_window.iter().map(|r| r.value).collect();
    let sum: f32 = values.iter().sum();
    let mean = sum / values.len() as f32;
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let in_band = in_window
        .iter()
        .filter(|r| policy.deviation(r.value) == 0.0)
        .count();
    let time_in_band_fraction = in_band as f32 / in_window.len() as f32;

    ComplianceSummary {
        window_start,
        window_end,
        sample_count: in_window.len() as u32,
        mean: Some(mean),
        min: Some(min),
        max: Some(max),
        std_dev: std_dev(&values, mean),
        time_in_band_fraction,
        episodes: selected_episodes,
    }
}
