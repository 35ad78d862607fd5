//! Constants for the compliance engine
//!
//! Centralized, documented values used across the crate. Always use these
//! instead of magic numbers; when adding one, note where it comes from.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

// ===== EXCURSION ACCOUNTING =====

/// Default minimum excursion duration (milliseconds) for preset policies.
///
/// Refrigerated product tolerates brief door-open spikes; five minutes
/// out of band is where storage guidance starts counting a breach.
///
/// Source: cold-chain storage practice for dairy product
pub const DEFAULT_MIN_EXCURSION_MS: u64 = 5 * MS_PER_MINUTE;

// ===== SETPOINT RECOMMENDATION =====

/// Ambient temperature (°C) above which cooling headroom is biased in.
pub const HOT_AMBIENT_C: f32 = 30.0;

/// Ambient temperature (°C) below which the setpoint relaxes upward.
pub const COLD_AMBIENT_C: f32 = 10.0;

/// Setpoint bias (°C) applied off the band midpoint at ambient extremes.
pub const SETPOINT_BIAS_C: f32 = 1.0;

// ===== STATISTICS =====

/// Minimum samples for a meaningful standard deviation.
///
/// Below two samples the n-1 divisor is degenerate; the statistic is
/// reported as absent instead.
pub const MIN_STDDEV_SAMPLES: usize = 2;
