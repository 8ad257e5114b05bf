//! Calendar granularity levels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{UnitError, UnitResult};

/// One of the eight calendar granularities, ordered coarsest to finest.
///
/// The order value (`0..=7`) is part of the serialized form of unit ids and
/// ranges, so variants must never be reordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Century,
    Decade,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// All units from coarsest to finest.
    pub const ALL: [Self; 8] = [
        Self::Century,
        Self::Decade,
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// ## Summary
    /// Returns the unit at position `order` in the coarsest-to-finest sequence.
    ///
    /// ## Errors
    /// Returns `UnitError::Range` if `order` is greater than 7.
    pub fn from_order(order: u8) -> UnitResult<Self> {
        Self::ALL
            .get(usize::from(order))
            .copied()
            .ok_or_else(|| UnitError::Range(format!("expected order in 0..=7, got {order}")))
    }

    /// ## Summary
    /// Returns the unit with the given lowercase name.
    ///
    /// ## Errors
    /// Returns `UnitError::Range` if `name` is not one of the eight unit names.
    pub fn from_name(name: &str) -> UnitResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str() == name)
            .ok_or_else(|| UnitError::Range(format!("unknown unit name `{name}`")))
    }

    #[must_use]
    pub const fn order(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Century => "century",
            Self::Decade => "decade",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }

    /// The next coarser unit, or `None` for century.
    #[must_use]
    pub const fn upper(self) -> Option<Self> {
        match self {
            Self::Century => None,
            Self::Decade => Some(Self::Century),
            Self::Year => Some(Self::Decade),
            Self::Month => Some(Self::Year),
            Self::Day => Some(Self::Month),
            Self::Hour => Some(Self::Day),
            Self::Minute => Some(Self::Hour),
            Self::Second => Some(Self::Minute),
        }
    }

    /// The next finer unit, or `None` for second.
    #[must_use]
    pub const fn lower(self) -> Option<Self> {
        match self {
            Self::Century => Some(Self::Decade),
            Self::Decade => Some(Self::Year),
            Self::Year => Some(Self::Month),
            Self::Month => Some(Self::Day),
            Self::Day => Some(Self::Hour),
            Self::Hour => Some(Self::Minute),
            Self::Minute => Some(Self::Second),
            Self::Second => None,
        }
    }

    #[must_use]
    pub fn is_same(self, other: Self) -> bool {
        self == other
    }

    /// Whether `self` is coarser than `other`.
    #[must_use]
    pub fn is_upper(self, other: Self) -> bool {
        self < other
    }

    /// Whether `self` is finer than `other`.
    #[must_use]
    pub fn is_lower(self, other: Self) -> bool {
        self > other
    }

    /// Whether this unit is a native calendar field rather than a derived
    /// multi-year bucket.
    #[must_use]
    pub const fn is_native(self) -> bool {
        !matches!(self, Self::Century | Self::Decade)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<u8> for Unit {
    type Error = UnitError;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        Self::from_order(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_and_name_are_bijective() {
        for (index, unit) in Unit::ALL.iter().enumerate() {
            let order = u8::try_from(index).unwrap();
            assert_eq!(unit.order(), order);
            assert_eq!(Unit::from_order(order).unwrap(), *unit);
            assert_eq!(Unit::from_name(unit.as_str()).unwrap(), *unit);
        }
    }

    #[test]
    fn from_order_out_of_range() {
        assert!(matches!(Unit::from_order(8), Err(UnitError::Range(_))));
        assert!(matches!(Unit::try_from(200), Err(UnitError::Range(_))));
    }

    #[test]
    fn from_name_unknown() {
        assert!(matches!(Unit::from_name("week"), Err(UnitError::Range(_))));
        assert!(matches!("Month".parse::<Unit>(), Err(UnitError::Range(_))));
        assert_eq!("month".parse::<Unit>().unwrap(), Unit::Month);
    }

    #[test]
    fn hierarchy_boundaries() {
        assert_eq!(Unit::Century.upper(), None);
        assert_eq!(Unit::Second.lower(), None);
        assert_eq!(Unit::Decade.upper(), Some(Unit::Century));
        assert_eq!(Unit::Decade.lower(), Some(Unit::Year));
        assert_eq!(Unit::Minute.lower(), Some(Unit::Second));
    }

    #[test]
    fn upper_and_lower_are_inverse() {
        for unit in Unit::ALL {
            if let Some(upper) = unit.upper() {
                assert_eq!(upper.lower(), Some(unit));
            }
            if let Some(lower) = unit.lower() {
                assert_eq!(lower.upper(), Some(unit));
            }
        }
    }

    #[test]
    fn comparisons_follow_order() {
        assert!(Unit::Year.is_upper(Unit::Month));
        assert!(!Unit::Year.is_upper(Unit::Year));
        assert!(Unit::Second.is_lower(Unit::Hour));
        assert!(Unit::Day.is_same(Unit::Day));
        assert!(!Unit::Day.is_same(Unit::Hour));
    }

    #[test]
    fn native_fields() {
        assert!(!Unit::Century.is_native());
        assert!(!Unit::Decade.is_native());
        assert!(Unit::Year.is_native());
        assert!(Unit::Second.is_native());
    }

    #[test]
    fn serde_uses_names() {
        assert_eq!(serde_json::to_string(&Unit::Hour).unwrap(), "\"hour\"");
        let parsed: Unit = serde_json::from_str("\"decade\"").unwrap();
        assert_eq!(parsed, Unit::Decade);
        assert_eq!(Unit::Minute.to_string(), "minute");
    }
}
