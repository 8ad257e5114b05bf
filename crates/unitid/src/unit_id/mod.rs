//! Calendar instants tagged with a granularity.
//!
//! ## Summary
//! A [`UnitId`] pairs a wall-clock instant with a [`Unit`]. Two ids are equal
//! when they share a unit and fall in the same bucket of that unit, whatever
//! their finer fields hold. Every transformation returns a new id.

mod calendar;
mod render;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use unitid_core::error::CoreError;

pub use calendar::{IntoInstant, SUPPORTED_YEARS, parse_instant};

use crate::error::{UnitError, UnitResult};
use crate::range::UnitIdRange;
use crate::unit::Unit;

/// Interval bounds for [`UnitId::is_between`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inclusivity {
    /// `()` - both bounds excluded.
    #[default]
    Open,
    /// `[]` - both bounds included.
    Closed,
    /// `[)` - start included, end excluded.
    ClosedOpen,
    /// `(]` - start excluded, end included.
    OpenClosed,
}

impl Inclusivity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "()",
            Self::Closed => "[]",
            Self::ClosedOpen => "[)",
            Self::OpenClosed => "(]",
        }
    }

    const fn includes_start(self) -> bool {
        matches!(self, Self::Closed | Self::ClosedOpen)
    }

    const fn includes_end(self) -> bool {
        matches!(self, Self::Closed | Self::OpenClosed)
    }
}

impl fmt::Display for Inclusivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Inclusivity {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "()" => Ok(Self::Open),
            "[]" => Ok(Self::Closed),
            "[)" => Ok(Self::ClosedOpen),
            "(]" => Ok(Self::OpenClosed),
            other => Err(CoreError::InvalidInput(format!(
                "expected one of (), [], [), (], got `{other}`"
            ))
            .into()),
        }
    }
}

/// A calendar instant tagged with the granularity it stands for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitId {
    instant: NaiveDateTime,
    unit: Unit,
    uid: String,
}

impl UnitId {
    /// ## Summary
    /// Builds an id from a date configuration and a unit.
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` if `date` cannot be parsed or lies
    /// outside [`SUPPORTED_YEARS`].
    pub fn from_instant(date: impl IntoInstant, unit: Unit) -> UnitResult<Self> {
        let instant = calendar::normalize(date.into_instant()?)?;
        Ok(Self::from_valid(instant, unit))
    }

    /// ## Summary
    /// Builds an id from hierarchical coordinates, the inverse of
    /// [`UnitId::coordinates`].
    ///
    /// The unit is implied by the length: one coordinate names a century,
    /// two a decade, and so on down to eight for a second.
    ///
    /// ## Errors
    /// Returns `UnitError::Range` if `coords` is empty, longer than eight, or
    /// holds a decade or year digit outside `0..=9`, and
    /// `UnitError::InvalidDate` if the fields are not a supported date.
    pub fn from_coordinates(coords: &[i64]) -> UnitResult<Self> {
        let order = coords
            .len()
            .checked_sub(1)
            .and_then(|order| u8::try_from(order).ok())
            .ok_or_else(|| {
                UnitError::Range(format!("expected 1 to 8 coordinates, got {}", coords.len()))
            })?;
        let unit = Unit::from_order(order)?;

        Ok(Self::from_valid(calendar::from_coordinates(coords)?, unit))
    }

    /// Wraps an instant already known to be normalized.
    fn from_valid(instant: NaiveDateTime, unit: Unit) -> Self {
        let uid = hash_fields(&fields_of(instant, unit));
        Self { instant, unit, uid }
    }

    #[must_use]
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Stable identity of this id's bucket.
    ///
    /// Derived only from the calendar fields at or above the unit, so finer
    /// fields never change it.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// The calendar fields the uid is derived from, coarsest first.
    ///
    /// Century yields `[year / 100]`, decade `[year / 100, year / 10]` (both
    /// floored), and native units the fields from year down to the unit.
    #[must_use]
    pub fn fields(&self) -> Vec<i64> {
        fields_of(self.instant, self.unit)
    }

    /// Hierarchical coordinates of this bucket, coarsest first: century
    /// (counted from 1), decade digit, year digit, then month down to the
    /// unit's own field.
    ///
    /// `2024-03` at month unit yields `[21, 2, 4, 3]`.
    #[must_use]
    pub fn coordinates(&self) -> Vec<i64> {
        calendar::coordinates(self.instant)[..=usize::from(self.unit.order())].to_vec()
    }

    /// The same instant under a different unit.
    #[must_use]
    pub fn as_unit(&self, unit: Unit) -> Self {
        Self::from_valid(self.instant, unit)
    }

    /// ## Summary
    /// Shifts the instant by `count` units of this id's own granularity.
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` if the result leaves
    /// [`SUPPORTED_YEARS`].
    pub fn add(&self, count: i64) -> UnitResult<Self> {
        let instant = calendar::shift(self.instant, self.unit, count)?;
        Ok(Self::from_valid(instant, self.unit))
    }

    /// ## Summary
    /// Equivalent to `add(-count)`.
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` if the result leaves
    /// [`SUPPORTED_YEARS`] or `count` cannot be negated.
    pub fn sub(&self, count: i64) -> UnitResult<Self> {
        let negated = count
            .checked_neg()
            .ok_or_else(|| UnitError::InvalidDate(format!("cannot negate {count}")))?;
        self.add(negated)
    }

    /// ## Summary
    /// The following bucket.
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` past the last supported year.
    pub fn next(&self) -> UnitResult<Self> {
        self.add(1)
    }

    /// ## Summary
    /// The preceding bucket.
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` before the first supported year.
    pub fn prev(&self) -> UnitResult<Self> {
        self.sub(1)
    }

    /// ## Summary
    /// Number of buckets from `other` to `self`.
    ///
    /// Both ids are measured from the start of their buckets, so
    /// `other.add(self.diff(other))` always lands in `self`'s bucket.
    ///
    /// ## Errors
    /// Returns `UnitError::UnitMismatch` if the units differ.
    pub fn diff(&self, other: &Self) -> UnitResult<i64> {
        self.check_unit(other)?;
        Ok(self.diff_unchecked(other))
    }

    /// ## Summary
    /// Milliseconds from `other` to `self`, regardless of unit.
    ///
    /// ## Errors
    /// Returns `UnitError::UnitMismatch` if the units differ.
    pub fn diff_millis(&self, other: &Self) -> UnitResult<i64> {
        self.check_unit(other)?;
        Ok((self.instant - other.instant).num_milliseconds())
    }

    pub(crate) fn diff_unchecked(&self, other: &Self) -> i64 {
        calendar::diff(
            calendar::start_of(self.instant, self.unit),
            calendar::start_of(other.instant, self.unit),
            self.unit,
        )
    }

    fn check_unit(&self, other: &Self) -> UnitResult<()> {
        if self.unit == other.unit {
            Ok(())
        } else {
            Err(UnitError::UnitMismatch {
                expected: self.unit,
                found: other.unit,
            })
        }
    }

    /// The first instant of this bucket; the unit is unchanged.
    #[must_use]
    pub fn start(&self) -> Self {
        Self::from_valid(calendar::start_of(self.instant, self.unit), self.unit)
    }

    /// The last whole-second instant of this bucket; the unit is unchanged.
    #[must_use]
    pub fn end(&self) -> Self {
        Self::from_valid(calendar::end_of(self.instant, self.unit), self.unit)
    }

    #[must_use]
    pub fn is_start(&self) -> bool {
        calendar::start_of(self.instant, self.unit) == self.instant
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        calendar::end_of(self.instant, self.unit) == self.instant
    }

    /// ## Summary
    /// The same instant at the next coarser unit.
    ///
    /// ## Errors
    /// Returns `UnitError::NoParent` for century ids.
    pub fn parent(&self) -> UnitResult<Self> {
        self.unit
            .upper()
            .map(|upper| self.as_unit(upper))
            .ok_or(UnitError::NoParent)
    }

    /// ## Summary
    /// The buckets of the next finer unit that make up this bucket, in order.
    ///
    /// ## Errors
    /// Returns `UnitError::NoChildren` for second ids.
    pub fn children(&self) -> UnitResult<Vec<Self>> {
        Ok(self.children_range()?.ids().collect())
    }

    /// ## Summary
    /// The children of this id as a range at the next finer unit.
    ///
    /// ## Errors
    /// Returns `UnitError::NoChildren` for second ids.
    pub fn children_range(&self) -> UnitResult<UnitIdRange> {
        let lower = self.unit.lower().ok_or(UnitError::NoChildren)?;
        Ok(UnitIdRange::from_bounds(
            self.start().as_unit(lower),
            self.end().as_unit(lower),
        ))
    }

    /// ## Summary
    /// The first id that shares this id's parent.
    ///
    /// ## Errors
    /// Returns `UnitError::NoParent` for century ids.
    pub fn first_sibling(&self) -> UnitResult<Self> {
        Ok(self.parent()?.start().as_unit(self.unit))
    }

    /// ## Summary
    /// The last id that shares this id's parent.
    ///
    /// ## Errors
    /// Returns `UnitError::NoParent` for century ids.
    pub fn last_sibling(&self) -> UnitResult<Self> {
        Ok(self.parent()?.end().as_unit(self.unit).start())
    }

    /// Whether this bucket is strictly earlier than `other`'s; `false` across
    /// units.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Less)
    }

    /// Whether this bucket is strictly later than `other`'s; `false` across
    /// units.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Greater)
    }

    /// Whether both ids name the same bucket of the same unit.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        self == other
    }

    /// ## Summary
    /// Whether this bucket lies between the buckets of `start` and `end`.
    ///
    /// Returns `false` if any unit differs or `end` precedes `start`.
    #[must_use]
    pub fn is_between(&self, start: &Self, end: &Self, inclusivity: Inclusivity) -> bool {
        if self.unit != start.unit || self.unit != end.unit || end.is_before(start) {
            return false;
        }

        let after_start = match self.cmp_bucket(start) {
            Ordering::Greater => true,
            Ordering::Equal => inclusivity.includes_start(),
            Ordering::Less => false,
        };
        let before_end = match self.cmp_bucket(end) {
            Ordering::Less => true,
            Ordering::Equal => inclusivity.includes_end(),
            Ordering::Greater => false,
        };

        after_start && before_end
    }

    fn cmp_bucket(&self, other: &Self) -> Ordering {
        fields_of(self.instant, self.unit).cmp(&fields_of(other.instant, other.unit))
    }

    /// Renders `"<unit order>_<ISO-8601 instant>"`.
    #[must_use]
    pub fn serialize(&self) -> String {
        format!("{}_{}", self.unit.order(), self.iso())
    }

    pub(crate) fn iso(&self) -> String {
        self.instant.format(calendar::ISO_FORMAT).to_string()
    }

    /// ## Summary
    /// Parses the output of [`UnitId::serialize`].
    ///
    /// ## Errors
    /// Returns `UnitError::Deserialization` if the separator is missing, the
    /// order is not a unit order, or the instant cannot be parsed.
    pub fn deserialize(input: &str) -> UnitResult<Self> {
        let (order, iso) = input.split_once('_').ok_or_else(|| {
            tracing::debug!(input, "Serialized unit id has no separator");
            UnitError::Deserialization(format!("missing `_` separator in `{input}`"))
        })?;

        let unit = parse_unit_order(order)?;
        Self::parse_serialized_instant(iso, unit)
    }

    pub(crate) fn parse_serialized_instant(iso: &str, unit: Unit) -> UnitResult<Self> {
        let instant = NaiveDateTime::parse_from_str(iso, calendar::ISO_FORMAT).map_err(|e| {
            tracing::debug!(iso, error = %e, "Serialized instant is malformed");
            UnitError::Deserialization(format!("invalid instant `{iso}`: {e}"))
        })?;

        calendar::normalize(instant)
            .map(|instant| Self::from_valid(instant, unit))
            .map_err(|e| UnitError::Deserialization(e.to_string()))
    }
}

/// ## Summary
/// Parses the leading unit order of a serialized id or range.
///
/// ## Errors
/// Returns `UnitError::Deserialization` if `order` is not an integer in `0..=7`.
pub(crate) fn parse_unit_order(order: &str) -> UnitResult<Unit> {
    let value = order.parse::<u8>().map_err(|e| {
        UnitError::Deserialization(format!("invalid unit order `{order}`: {e}"))
    })?;

    Unit::from_order(value).map_err(|e| UnitError::Deserialization(e.to_string()))
}

fn fields_of(instant: NaiveDateTime, unit: Unit) -> Vec<i64> {
    let year = i64::from(instant.year());
    match unit {
        Unit::Century => vec![year.div_euclid(100)],
        Unit::Decade => vec![year.div_euclid(100), year.div_euclid(10)],
        _ => {
            let all = [
                year,
                i64::from(instant.month()),
                i64::from(instant.day()),
                i64::from(instant.hour()),
                i64::from(instant.minute()),
                i64::from(instant.second()),
            ];
            all[..usize::from(unit.order() - 1)].to_vec()
        }
    }
}

/// Hex SHA-256 over the fields, each encoded as 8 little-endian bytes.
fn hash_fields(fields: &[i64]) -> String {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

impl PartialEq for UnitId {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.cmp_bucket(other) == Ordering::Equal
    }
}

impl Eq for UnitId {}

impl Hash for UnitId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.hash(state);
        self.uid.hash(state);
    }
}

impl PartialOrd for UnitId {
    /// Buckets of the same unit are ordered chronologically; ids of
    /// different units are incomparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.unit == other.unit).then(|| self.cmp_bucket(other))
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&unitid_core::config::LabelConfig::default()))
    }
}

impl From<UnitId> for String {
    fn from(id: UnitId) -> Self {
        id.serialize()
    }
}

impl TryFrom<String> for UnitId {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::deserialize(&value)
    }
}
