//! Compliance evaluation over normalized reading sequences
//!
//! ## Overview
//!
//! The evaluator walks a sorted reading sequence once and reduces it to the
//! episodes an operator actually cares about: contiguous runs outside the
//! policy band that lasted long enough to threaten product. Everything is a
//! function of its inputs - no state survives between calls, so concurrent
//! evaluations of independent streams need no coordination.
//!
//! ## Algorithm
//!
//! One linear pass with a small amount of carried state:
//!
//! ```text
//! in band ──deviation > 0──► excursion open ──back in band──► duration test
//!    ▲                         │    ▲                              │
//!    │                         └────┘ accumulate                  │
//!    └──────── < min duration: discard as transient ◄─────────────┘
//!                              ≥ min duration: emit episode
//! ```
//!
//! An excursion still running when the data ends is closed against the last
//! reading and emitted with `open = true`, so a dashboard can flag "breach in
//! progress" distinctly from a resolved one.
//!
//! ## Boundary semantics
//!
//! The duration test is inclusive: an excursion lasting exactly the policy
//! minimum is reported. A lone out-of-band reading under a zero-minimum
//! policy therefore yields a zero-duration episode.
//!
//! ## Preconditions
//!
//! The input must come from the normalizer: sorted by timestamp, finite,
//! Celsius. Handing the evaluator an unsorted sequence is a programming
//! error and panics rather than producing quietly wrong episodes.

use alloc::vec::Vec;

use crate::{
    policy::ThresholdPolicy,
    reading::Reading,
    time::{delta_ms, TimeWindow, Timestamp},
};

/// A compliance breach: an excursion that met the policy's minimum duration
///
/// `start` and `end` are the timestamps of the first and last out-of-band
/// readings of the excursion, so `end >= start` always holds and a
/// single-reading episode has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViolationEpisode {
    /// Timestamp of the first out-of-band reading
    pub start: Timestamp,
    /// Timestamp of the last out-of-band reading
    pub end: Timestamp,
    /// Largest distance outside the band seen during the episode, in Celsius
    pub peak_deviation: f32,
    /// Number of out-of-band readings in the episode
    pub sample_count: u32,
    /// True when the sequence ended while the excursion was still running
    pub open: bool,
}

impl ViolationEpisode {
    /// Episode duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        delta_ms(self.start, self.end)
    }

    /// Whether the episode overlaps a summary window
    pub fn overlaps(&self, window: TimeWindow) -> bool {
        self.start < window.end && self.end >= window.start
    }
}

/// Outcome of evaluating one reading sequence against one policy
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Violation episodes in chronological order
    pub episodes: Vec<ViolationEpisode>,
    /// Readings that sat inside the band
    pub in_band_count: u32,
    /// Excursions discarded for ending before the policy minimum
    pub transient_excursions: u32,
    /// Total readings evaluated
    pub sample_count: u32,
}

/// Running excursion state carried through the scan
struct Excursion {
    start: Timestamp,
    last_out: Timestamp,
    peak: f32,
    count: u32,
}

impl Excursion {
    /// Apply the inclusive duration test and emit or discard
    fn close(
        self,
        open: bool,
        policy: &ThresholdPolicy,
        episodes: &mut Vec<ViolationEpisode>,
        transient: &mut u32,
    ) {
        let duration = delta_ms(self.start, self.last_out);
        if duration >= policy.min_excursion_ms() {
            log::trace!(
                "violation episode: {}ms out of band from t={}, peak {:.2}°C",
                duration,
                self.start,
                self.peak
            );
            episodes.push(ViolationEpisode {
                start: self.start,
                end: self.last_out,
                peak_deviation: self.peak,
                sample_count: self.count,
                open,
            });
        } else {
            *transient += 1;
        }
    }
}

/// Scan a normalized sequence and produce its violation episodes
///
/// # Panics
///
/// Panics if the sequence is not sorted by timestamp. Run
/// [`normalize`](crate::normalizer::normalize) first.
pub fn evaluate(readings: &[Reading], policy: &ThresholdPolicy) -> Evaluation {
    let mut episodes = Vec::new();
    let mut in_band_count = 0u32;
    let mut transient_excursions = 0u32;
    let mut current: Option<Excursion> = None;
    let mut prev_timestamp: Option<Timestamp> = None;

    for reading in readings {
        if let Some(prev) = prev_timestamp {
            assert!(
                reading.timestamp >= prev,
                "reading sequence is not sorted by timestamp; run the normalizer first"
            );
        }
        prev_timestamp = Some(reading.timestamp);

        let deviation = policy.deviation(reading.value);
        if deviation > 0.0 {
            match current.as_mut() {
                Some(excursion) => {
                    excursion.last_out = reading.timestamp;
                    excursion.peak = excursion.peak.max(deviation);
                    excursion.count += 1;
                }
                None => {
                    // Tentative until it survives the duration test
                    current = Some(Excursion {
                        start: reading.timestamp,
                        last_out: reading.timestamp,
                        peak: deviation,
                        count: 1,
                    });
                }
            }
        } else {
            in_band_count += 1;
            if let Some(excursion) = current.take() {
                excursion.close(false, policy, &mut episodes, &mut transient_excursions);
            }
        }
    }

    // Sequence ended mid-excursion: report it as open
    if let Some(excursion) = current.take() {
        excursion.close(true, policy, &mut episodes, &mut transient_excursions);
    }

    Evaluation {
        episodes,
        in_band_count,
        transient_excursions,
        sample_count: readings.len() as u32,
    }
}
