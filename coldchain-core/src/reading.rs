//! Reading types for the compliance pipeline
//!
//! ## Overview
//!
//! Two shapes of the same measurement flow through the engine:
//!
//! 1. [`RawReading`] is the wire shape - whatever the ingestion collaborator
//!    scraped out of a logger export or live feed. Fields may be missing,
//!    values may be NaN, order is whatever the source produced.
//! 2. [`Reading`] is the canonical shape - finite, Celsius, fully populated.
//!    Only the normalizer constructs these, so downstream code (evaluator,
//!    aggregator) can take their validity as given.
//!
//! Keeping the two as distinct types makes "has this been validated?" a
//! compile-time question rather than a runtime convention.
//!
//! ## Memory model
//!
//! Readings are `Copy` and small (32 bytes): sensor ids are stored inline
//! rather than on the heap, so a million-row batch is a flat allocation with
//! no per-item indirection.

use crate::time::Timestamp;
use core::fmt;

/// Maximum length in bytes for inline sensor IDs
///
/// IDs longer than this are rejected at construction.
pub const MAX_SENSOR_ID_LEN: usize = 15;

/// Opaque sensor identifier, stored inline
///
/// Avoids heap allocation for the id lengths real deployments use
/// ("room_1", "freezer_1"). Identifiers are compared byte-for-byte and
/// never interpreted by the engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorId {
    len: u8,
    data: [u8; MAX_SENSOR_ID_LEN],
}

impl SensorId {
    /// Create from a string slice
    ///
    /// Returns `None` when the id exceeds [`MAX_SENSOR_ID_LEN`] bytes.
    pub fn new(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() > MAX_SENSOR_ID_LEN {
            return None;
        }

        let mut data = [0u8; MAX_SENSOR_ID_LEN];
        data[..bytes.len()].copy_from_slice(bytes);

        Some(Self {
            len: bytes.len() as u8,
            data,
        })
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        // Only valid UTF-8 enters through new(), so this cannot panic
        core::str::from_utf8(&self.data[..self.len as usize])
            .expect("SensorId contains invalid UTF-8")
    }
}

impl fmt::Debug for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SensorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SensorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = SensorId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a sensor id of at most {} bytes", MAX_SENSOR_ID_LEN)
            }

            fn visit_str<E>(self, v: &str) -> Result<SensorId, E>
            where
                E: serde::de::Error,
            {
                SensorId::new(v).ok_or_else(|| E::invalid_length(v.len(), &self))
            }
        }

        deserializer.deserialize_str(IdVisitor)
    }
}

/// Raw reading as delivered by an ingestion collaborator (wire shape)
///
/// Mirrors the upstream tuple 1:1; no validation or unit conversion has
/// happened yet. Feed batches of these to
/// [`normalize`](crate::normalizer::normalize), which drops and counts the
/// malformed ones.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawReading {
    /// Sensor the reading came from, if the source provided one
    pub sensor_id: Option<SensorId>,
    /// Capture timestamp in milliseconds, if the source provided one
    pub timestamp: Option<Timestamp>,
    /// Measured temperature, in the unit declared for the batch
    pub value: f32,
}

/// Validated reading in canonical form
///
/// Invariants, established by the normalizer and relied on downstream:
/// - `value` is finite and in Celsius
/// - within one normalized sequence, timestamps are non-decreasing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Sensor the reading came from
    pub sensor_id: SensorId,
    /// Capture timestamp in milliseconds
    pub timestamp: Timestamp,
    /// Temperature in Celsius
    pub value: f32,
}
