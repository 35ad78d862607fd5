//! Operator guidance: instantaneous alerts and setpoint recommendations
//!
//! The evaluator answers "what happened"; this module answers "what now".
//! [`check_reading`] gives a live dashboard its red banner the moment a
//! reading lands outside the band, without waiting for the excursion to
//! mature into an episode. [`recommended_setpoint`] suggests where to hold
//! the room given the weather outside: hot days get cooling headroom below
//! the band midpoint, cold days relax upward to save compressor duty.

use core::fmt;

use crate::{
    constants::{COLD_AMBIENT_C, HOT_AMBIENT_C, SETPOINT_BIAS_C},
    policy::{BandStatus, ThresholdPolicy},
};

/// Which way a reading violated the band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlertKind {
    /// Reading under the lower bound
    TooCold,
    /// Reading over the upper bound
    TooWarm,
}

/// Displayable out-of-band alert for a single reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alert {
    /// Direction of the violation
    pub kind: AlertKind,
    /// The offending reading, in Celsius
    pub value: f32,
    /// The bound that was crossed, in Celsius
    pub bound: f32,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AlertKind::TooCold => write!(
                f,
                "temperature too low: current {:.1}°C, minimum {:.1}°C",
                self.value, self.bound
            ),
            AlertKind::TooWarm => write!(
                f,
                "temperature too high: current {:.1}°C, maximum {:.1}°C",
                self.value, self.bound
            ),
        }
    }
}

/// Check a single Celsius reading against the band, immediately
///
/// Returns `None` for in-band readings, and for non-finite values - those
/// are the normalizer's to reject and count; an instantaneous check stays
/// quiet rather than alarming on garbage.
pub fn check_reading(celsius: f32, policy: &ThresholdPolicy) -> Option<Alert> {
    if !celsius.is_finite() {
        return None;
    }

    match policy.classify(celsius) {
        BandStatus::Within => None,
        BandStatus::Below => Some(Alert {
            kind: AlertKind::TooCold,
            value: celsius,
            bound: policy.lower_celsius(),
        }),
        BandStatus::Above => Some(Alert {
            kind: AlertKind::TooWarm,
            value: celsius,
            bound: policy.upper_celsius(),
        }),
    }
}

/// Recommend a hold temperature (°C) for the room, given ambient conditions
///
/// Ambient above [`HOT_AMBIENT_C`] biases the setpoint [`SETPOINT_BIAS_C`]
/// below the band midpoint for headroom against door openings; ambient below
/// [`COLD_AMBIENT_C`] relaxes it the same amount upward. The result is always
/// clamped inside the band.
pub fn recommended_setpoint(policy: &ThresholdPolicy, ambient_celsius: f32) -> f32 {
    let lower = policy.lower_celsius();
    let upper = policy.upper_celsius();
    let midpoint = (lower + upper) / 2.0;

    if ambient_celsius > HOT_AMBIENT_C {
        (midpoint - SETPOINT_BIAS_C).max(lower)
    } else if ambient_celsius < COLD_AMBIENT_C {
        (midpoint + SETPOINT_BIAS_C).min(upper)
    } else {
        midpoint
    }
}
