//! Threshold policy for temperature compliance
//!
//! A [`ThresholdPolicy`] is a pure configuration value: the acceptable band,
//! the unit the band is written in, and how long an excursion must persist
//! before it counts as a violation. Validation happens once, at construction;
//! the evaluator assumes any policy it receives is sound.
//!
//! Presets carry the storage bands for common dairy products, in the same
//! spirit as hardware validators shipping with indoor/industrial profiles:
//!
//! ```
//! use coldchain_core::ThresholdPolicy;
//!
//! let policy = ThresholdPolicy::ice_cream();
//! assert!(policy.deviation(-20.0) == 0.0);  // in band
//! assert!(policy.deviation(-10.0) > 0.0);   // freezer failing
//! ```

use crate::{
    constants::DEFAULT_MIN_EXCURSION_MS,
    errors::ConfigError,
    time::DurationMs,
    units::TempUnit,
};

/// Where a value sits relative to a policy band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BandStatus {
    /// Below the lower bound
    Below,
    /// Inside the acceptable band
    Within,
    /// Above the upper bound
    Above,
}

/// Immutable compliance configuration for one product or storage room
///
/// Equality is by value. The policy is `Copy`; pass it by value or shared
/// reference, never mutate one mid-pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PolicyFields"))]
pub struct ThresholdPolicy {
    lower_bound: f32,
    upper_bound: f32,
    min_excursion_ms: DurationMs,
    unit: TempUnit,
}

/// Unvalidated mirror of [`ThresholdPolicy`] for deserialization
///
/// Keeps the band invariant intact when policies arrive from a settings
/// file or UI form: deserialization funnels through [`ThresholdPolicy::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PolicyFields {
    lower_bound: f32,
    upper_bound: f32,
    min_excursion_ms: DurationMs,
    unit: TempUnit,
}

#[cfg(feature = "serde")]
impl TryFrom<PolicyFields> for ThresholdPolicy {
    type Error = ConfigError;

    fn try_from(fields: PolicyFields) -> Result<Self, ConfigError> {
        ThresholdPolicy::new(
            fields.lower_bound,
            fields.upper_bound,
            fields.min_excursion_ms,
            fields.unit,
        )
    }
}

impl ThresholdPolicy {
    /// Create a policy, validating the band
    ///
    /// Rejects non-finite bounds and `lower_bound >= upper_bound`. A negative
    /// excursion duration is unrepresentable: the field is unsigned
    /// milliseconds.
    pub fn new(
        lower_bound: f32,
        upper_bound: f32,
        min_excursion_ms: DurationMs,
        unit: TempUnit,
    ) -> Result<Self, ConfigError> {
        if !lower_bound.is_finite() || !upper_bound.is_finite() {
            return Err(ConfigError::NonFiniteBound);
        }
        if lower_bound >= upper_bound {
            return Err(ConfigError::InvalidBand {
                lower: lower_bound,
                upper: upper_bound,
            });
        }

        Ok(Self {
            lower_bound,
            upper_bound,
            min_excursion_ms,
            unit,
        })
    }

    /// Fresh milk: 2-4 °C refrigerated storage
    pub fn milk() -> Self {
        Self {
            lower_bound: 2.0,
            upper_bound: 4.0,
            min_excursion_ms: DEFAULT_MIN_EXCURSION_MS,
            unit: TempUnit::Celsius,
        }
    }

    /// Cultured curd: 2-4 °C refrigerated storage
    pub fn curd() -> Self {
        Self {
            lower_bound: 2.0,
            upper_bound: 4.0,
            min_excursion_ms: DEFAULT_MIN_EXCURSION_MS,
            unit: TempUnit::Celsius,
        }
    }

    /// Butter: -15 to -10 °C frozen storage
    pub fn butter() -> Self {
        Self {
            lower_bound: -15.0,
            upper_bound: -10.0,
            min_excursion_ms: DEFAULT_MIN_EXCURSION_MS,
            unit: TempUnit::Celsius,
        }
    }

    /// Cheese: 1-4 °C cave or refrigerated storage
    pub fn cheese() -> Self {
        Self {
            lower_bound: 1.0,
            upper_bound: 4.0,
            min_excursion_ms: DEFAULT_MIN_EXCURSION_MS,
            unit: TempUnit::Celsius,
        }
    }

    /// Ice cream: -25 to -18 °C deep-frozen storage
    pub fn ice_cream() -> Self {
        Self {
            lower_bound: -25.0,
            upper_bound: -18.0,
            min_excursion_ms: DEFAULT_MIN_EXCURSION_MS,
            unit: TempUnit::Celsius,
        }
    }

    /// Same band with a different excursion tolerance
    pub fn with_min_excursion(mut self, min_excursion_ms: DurationMs) -> Self {
        self.min_excursion_ms = min_excursion_ms;
        self
    }

    /// Lower bound as configured, in the policy's unit
    pub fn lower_bound(&self) -> f32 {
        self.lower_bound
    }

    /// Upper bound as configured, in the policy's unit
    pub fn upper_bound(&self) -> f32 {
        self.upper_bound
    }

    /// Minimum excursion duration before a violation is declared
    pub fn min_excursion_ms(&self) -> DurationMs {
        self.min_excursion_ms
    }

    /// Unit the configured bounds are written in
    pub fn unit(&self) -> TempUnit {
        self.unit
    }

    /// Lower bound in Celsius
    pub fn lower_celsius(&self) -> f32 {
        self.unit.to_celsius(self.lower_bound)
    }

    /// Upper bound in Celsius
    pub fn upper_celsius(&self) -> f32 {
        self.unit.to_celsius(self.upper_bound)
    }

    /// Distance outside the band for a Celsius value, zero when in band
    ///
    /// Always reported in Celsius, whatever unit the band was configured in.
    pub fn deviation(&self, celsius: f32) -> f32 {
        (self.lower_celsius() - celsius)
            .max(celsius - self.upper_celsius())
            .max(0.0)
    }

    /// Classify a Celsius value against the band
    pub fn classify(&self, celsius: f32) -> BandStatus {
        if celsius < self.lower_celsius() {
            BandStatus::Below
        } else if celsius > self.upper_celsius() {
            BandStatus::Above
        } else {
            BandStatus::Within
        }
    }
}
