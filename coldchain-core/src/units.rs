//! Temperature unit handling
//!
//! Every policy declares the unit its band is written in, and the normalizer
//! declares the unit of each incoming batch. Internally the engine works in
//! Celsius only; conversion happens exactly once, at the boundary, so the
//! evaluator never has to reason about mixed units.

/// Temperature unit for readings and policy bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TempUnit {
    /// Degrees Celsius
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
}

impl TempUnit {
    /// Convert a value in this unit to Celsius
    pub fn to_celsius(self, value: f32) -> f32 {
        match self {
            TempUnit::Celsius => value,
            TempUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }

    /// Convert a Celsius value into this unit
    pub fn from_celsius(self, celsius: f32) -> f32 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Display symbol for this unit
    pub const fn symbol(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_is_identity() {
        assert_eq!(TempUnit::Celsius.to_celsius(4.0), 4.0);
        assert_eq!(TempUnit::Celsius.from_celsius(-18.0), -18.0);
    }

    #[test]
    fn fahrenheit_fixed_points() {
        assert_eq!(TempUnit::Fahrenheit.to_celsius(32.0), 0.0);
        assert_eq!(TempUnit::Fahrenheit.to_celsius(212.0), 100.0);
        assert_eq!(TempUnit::Fahrenheit.from_celsius(0.0), 32.0);
    }

    #[test]
    fn fahrenheit_round_trip() {
        let celsius = TempUnit::Fahrenheit.to_celsius(39.2);
        let back = TempUnit::Fahrenheit.from_celsius(celsius);
        assert!((back - 39.2).abs() < 1e-4);
    }

    #[test]
    fn symbols() {
        assert_eq!(TempUnit::Celsius.symbol(), "°C");
        assert_eq!(TempUnit::Fahrenheit.symbol(), "°F");
    }
}
