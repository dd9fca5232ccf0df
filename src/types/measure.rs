//! Distance and cost quantities that may be unreachable

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative quantity (km, liters, currency) or the unreachable
/// sentinel.
///
/// Unreachable absorbs addition and scaling, and orders after every
/// known value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Known(f64),
    Unreachable,
}

impl Measure {
    pub const ZERO: Measure = Measure::Known(0.0);

    /// Known value, or `None` when unreachable
    pub fn known(self) -> Option<f64> {
        match self {
            Measure::Known(value) => Some(value),
            Measure::Unreachable => None,
        }
    }

    pub fn is_unreachable(self) -> bool {
        matches!(self, Measure::Unreachable)
    }

    /// Apply `f` to a known value; unreachable stays unreachable
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Measure {
        match self {
            Measure::Known(value) => Measure::Known(f(value)),
            Measure::Unreachable => Measure::Unreachable,
        }
    }

    /// Strict ordering used by the solver: any known value is shorter
    /// than unreachable, and unreachable is never shorter than anything.
    pub fn is_shorter_than(self, other: Measure) -> bool {
        match (self, other) {
            (Measure::Known(a), Measure::Known(b)) => a < b,
            (Measure::Known(_), Measure::Unreachable) => true,
            (Measure::Unreachable, _) => false,
        }
    }
}

impl Default for Measure {
    fn default() -> Self {
        Measure::ZERO
    }
}

impl Add for Measure {
    type Output = Measure;

    fn add(self, rhs: Measure) -> Measure {
        match (self, rhs) {
            (Measure::Known(a), Measure::Known(b)) => Measure::Known(a + b),
            _ => Measure::Unreachable,
        }
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Measure::Unreachable, Measure::Known)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Known(value) => write!(f, "{}", value),
            Measure::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Serialized as a plain number, or `null` when unreachable
impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.known().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(Measure::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_absorbs_addition() {
        assert_eq!(Measure::Known(2.0) + Measure::Known(3.5), Measure::Known(5.5));
        assert_eq!(Measure::Known(2.0) + Measure::Unreachable, Measure::Unreachable);
        assert_eq!(Measure::Unreachable + Measure::Known(1.0), Measure::Unreachable);
    }

    #[test]
    fn test_ordering_puts_unreachable_last() {
        assert!(Measure::Known(1.0).is_shorter_than(Measure::Known(2.0)));
        assert!(!Measure::Known(2.0).is_shorter_than(Measure::Known(2.0)));
        assert!(Measure::Known(1e12).is_shorter_than(Measure::Unreachable));
        assert!(!Measure::Unreachable.is_shorter_than(Measure::Unreachable));
        assert!(!Measure::Unreachable.is_shorter_than(Measure::Known(0.0)));
    }

    #[test]
    fn test_map_keeps_unreachable() {
        assert_eq!(Measure::Known(120.0).map(|v| v / 12.0), Measure::Known(10.0));
        assert_eq!(Measure::Unreachable.map(|v| v / 12.0), Measure::Unreachable);
    }

    #[test]
    fn test_json_uses_null_for_unreachable() {
        assert_eq!(serde_json::to_string(&Measure::Known(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Measure::Unreachable).unwrap(), "null");

        let parsed: Vec<Measure> = serde_json::from_str("[0, 4.25, null]").unwrap();
        assert_eq!(parsed, vec![Measure::ZERO, Measure::Known(4.25), Measure::Unreachable]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Measure::Known(12.5).to_string(), "12.5");
        assert_eq!(Measure::Unreachable.to_string(), "unreachable");
    }
}
