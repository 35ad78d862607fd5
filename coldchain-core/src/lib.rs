//! Core compliance engine for ColdChain
//!
//! Turns a raw stream of timestamped temperature readings into compliance
//! verdicts for refrigerated dairy storage: violation episodes, windowed
//! summary statistics, and displayable alerts.
//!
//! Key constraints:
//! - Pure computation, no I/O - ingestion and persistence live in the host
//! - Stateless per evaluation call, safe to run streams in parallel
//! - Single linear pass over each reading sequence
//!
//! ```
//! use coldchain_core::{RawReading, SensorId, TempUnit, ThresholdPolicy};
//! use coldchain_core::pipeline::run;
//!
//! let policy = ThresholdPolicy::milk();
//! let raw = vec![
//!     RawReading { sensor_id: SensorId::new("room_1"), timestamp: Some(0), value: 3.5 },
//!     RawReading { sensor_id: SensorId::new("room_1"), timestamp: Some(60_000), value: 9.2 },
//! ];
//!
//! let report = run(raw, TempUnit::Celsius, &policy, None);
//! assert_eq!(report.dropped.total(), 0);
//! assert_eq!(report.reading_count, 2);
//! assert_eq!(report.in_band_count, 1);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod advisor;
pub mod aggregator;
pub mod constants;
pub mod errors;
pub mod evaluator;
pub mod normalizer;
pub mod pipeline;
pub mod policy;
pub mod reading;
pub mod time;
pub mod units;

// Public API
pub use errors::{ConfigError, RejectReason};
pub use reading::{RawReading, Reading, SensorId};
pub use units::TempUnit;
pub use policy::{BandStatus, ThresholdPolicy};
pub use normalizer::{normalize, DropCounts, NormalizedBatch};
pub use evaluator::{evaluate, Evaluation, ViolationEpisode};
pub use aggregator::{summarize, ComplianceSummary};
pub use advisor::{check_reading, recommended_setpoint, Alert, AlertKind};
pub use pipeline::{run, run_per_sensor, ComplianceReport, MultiSensorReport, SensorReport};
pub use time::{DurationMs, TimeWindow, Timestamp};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
