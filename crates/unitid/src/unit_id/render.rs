//! Human-readable labels for unit ids.

use chrono::{Datelike, Timelike};
use unitid_core::config::LabelConfig;

use super::UnitId;
use crate::unit::Unit;

impl UnitId {
    /// Renders only this unit's own field, e.g. `"2024年"` or `"9月"`.
    #[must_use]
    pub fn to_unit_string(&self) -> String {
        self.to_unit_string_with(&LabelConfig::default())
    }

    #[must_use]
    pub fn to_unit_string_with(&self, labels: &LabelConfig) -> String {
        let instant = self.instant;
        let year = instant.year();
        match self.unit {
            Unit::Century => format!("{}{}", year.div_euclid(100) + 1, labels.century),
            Unit::Decade => {
                let decade = year.rem_euclid(100) - year.rem_euclid(10);
                if decade == 0 {
                    labels.century_start.clone()
                } else {
                    format!("{decade}{}", labels.decade)
                }
            }
            Unit::Year => format!("{year}{}", labels.year),
            Unit::Month => format!("{}{}", instant.month(), labels.month),
            Unit::Day => format!("{}{}", instant.day(), labels.day),
            Unit::Hour => format!("{}{}", instant.hour(), labels.hour),
            Unit::Minute => format!("{}{}", instant.minute(), labels.minute),
            Unit::Second => format!("{}{}", instant.second(), labels.second),
        }
    }

    /// Concatenates the unit labels from the top of the hierarchy down to
    /// this unit. Ids finer than a decade start at the year.
    #[must_use]
    pub fn to_string_with(&self, labels: &LabelConfig) -> String {
        let first = if self.unit.is_lower(Unit::Decade) {
            Unit::Year
        } else {
            Unit::Century
        };

        Unit::ALL
            .iter()
            .filter(|unit| **unit >= first && **unit <= self.unit)
            .map(|unit| self.as_unit(*unit).to_unit_string_with(labels))
            .collect()
    }

    /// Short label: the unit label for century and year, the first year plus
    /// a suffix for a decade, and the parent label plus the unit label below
    /// that.
    #[must_use]
    pub fn to_brief_string(&self) -> String {
        self.to_brief_string_with(&LabelConfig::default())
    }

    #[must_use]
    pub fn to_brief_string_with(&self, labels: &LabelConfig) -> String {
        match self.unit {
            Unit::Century | Unit::Year => self.to_unit_string_with(labels),
            Unit::Decade => format!(
                "{}{}",
                self.start().as_unit(Unit::Year).to_string_with(labels),
                labels.decade_brief
            ),
            unit => {
                let parent = unit
                    .upper()
                    .map(|upper| self.as_unit(upper).to_unit_string_with(labels))
                    .unwrap_or_default();
                format!("{parent}{}", self.to_unit_string_with(labels))
            }
        }
    }
}
