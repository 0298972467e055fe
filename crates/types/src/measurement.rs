//! Finite numeric measurements.
//!
//! Form fields arrive as free text. A value that is blank, not a number, or not finite is
//! never silently turned into zero: it fails to become a [`Measurement`] and the caller
//! treats the field as absent.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Errors produced when a value cannot become a [`Measurement`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeasurementError {
    #[error("value is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("value is not finite")]
    NotFinite,
}

/// A finite `f64` value (never `NaN` or infinite).
///
/// Comparisons against plain `f64` thresholds are supported directly, so rule code reads as
/// `egfr < 60.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Measurement(f64);

impl Measurement {
    /// Wrap a float, rejecting `NaN` and infinities.
    pub fn new(value: f64) -> Result<Self, MeasurementError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(MeasurementError::NotFinite)
        }
    }

    /// Parse a decimal number from text.
    ///
    /// Surrounding whitespace is ignored. `"NaN"`, `"inf"` and friends are rejected as
    /// [`MeasurementError::NotFinite`].
    pub fn parse(input: &str) -> Result<Self, MeasurementError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MeasurementError::Empty);
        }
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| MeasurementError::NotANumber(trimmed.to_owned()))?;
        Self::new(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Measurement {
    type Err = MeasurementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for Measurement {
    type Error = MeasurementError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Measurement> for f64 {
    fn from(m: Measurement) -> Self {
        m.0
    }
}

impl PartialEq<f64> for Measurement {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for Measurement {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Measurement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Measurement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Measurement::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_text() {
        let m = Measurement::parse(" 4.25 ").expect("valid number");
        assert_eq!(m, 4.25);
        assert_eq!(m.to_string(), "4.25");
    }

    #[test]
    fn rejects_blank_text() {
        assert_eq!(Measurement::parse("  "), Err(MeasurementError::Empty));
    }

    #[test]
    fn rejects_garbage_text() {
        let err = Measurement::parse("12abc").expect_err("should reject trailing junk");
        assert!(matches!(err, MeasurementError::NotANumber(s) if s == "12abc"));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(Measurement::parse("NaN"), Err(MeasurementError::NotFinite));
        assert_eq!(Measurement::parse("inf"), Err(MeasurementError::NotFinite));
        assert_eq!(Measurement::new(f64::NAN), Err(MeasurementError::NotFinite));
    }

    #[test]
    fn compares_against_thresholds() {
        let egfr = Measurement::new(59.9).expect("finite");
        assert!(egfr < 60.0);
        assert!(egfr >= 45.0);
        assert!(!(egfr > 60.0));
    }

    #[test]
    fn serializes_as_bare_number() {
        let m = Measurement::new(5.5).expect("finite");
        assert_eq!(serde_json::to_string(&m).expect("serialize"), "5.5");
        let back: Measurement = serde_json::from_str("5.5").expect("deserialize");
        assert_eq!(back, m);
    }
}
