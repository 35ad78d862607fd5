//! Error types for compliance evaluation
//!
//! The engine distinguishes three failure classes and handles each where it
//! belongs:
//!
//! - Per-reading problems ([`RejectReason`]) are recovered locally: the
//!   normalizer drops the offending item, counts it, and keeps going. A batch
//!   is never aborted because one logger row was garbage.
//! - Configuration problems ([`ConfigError`]) are fatal at construction time.
//!   A [`ThresholdPolicy`](crate::ThresholdPolicy) that fails validation never
//!   exists, so the evaluator can assume its policy is sound.
//! - Precondition violations (an unsorted sequence handed to the evaluator)
//!   are programming errors and panic. They are not represented here because
//!   they are not recoverable conditions to match on.
//!
//! All variants are small and `Copy`, with their data inline, so they can be
//! returned from hot paths and stored without allocation.

use thiserror_no_std::Error;

/// Why a raw reading was rejected by the normalizer
///
/// Rejections are counted per reason in
/// [`DropCounts`](crate::normalizer::DropCounts) so an operator can tell a
/// flaky sensor (non-finite values) from a broken export (missing fields).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Value is NaN or infinite
    #[error("reading value is not a finite number")]
    NonFiniteValue,

    /// Reading carries no timestamp
    #[error("reading has no timestamp")]
    MissingTimestamp,

    /// Reading carries no usable sensor identifier
    #[error("reading has no sensor id")]
    MissingSensorId,
}

/// Invalid threshold policy configuration
///
/// Raised only by [`ThresholdPolicy::new`](crate::ThresholdPolicy::new);
/// preset constructors carry known-good bands and cannot fail.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Lower bound is not strictly below the upper bound
    #[error("invalid band: lower bound {lower} must be below upper bound {upper}")]
    InvalidBand {
        /// Configured lower bound
        lower: f32,
        /// Configured upper bound
        upper: f32,
    },

    /// A bound is NaN or infinite
    #[error("band bounds must be finite numbers")]
    NonFiniteBound,
}
