//! Closed intervals of unit ids.
//!
//! ## Summary
//! A [`UnitIdRange`] always covers whole buckets: its start is the first
//! instant of its first bucket and its end the last instant of its last
//! bucket, both at the range's unit, with `start <= end`.
//!
//! Ranges built from arbitrary endpoints are promoted to the coarsest unit
//! that covers exactly the same instants, so Jan..Dec of one year at month
//! unit becomes that single year.

mod ids;

use serde::{Deserialize, Serialize};

pub use ids::Ids;

use crate::error::{UnitError, UnitResult};
use crate::unit::Unit;
use crate::unit_id::{IntoInstant, UnitId, parse_unit_order};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr", into = "RangeRepr")]
pub struct UnitIdRange {
    start: UnitId,
    end: UnitId,
    unit: Unit,
}

/// JSON shape of a range: `{ "unit": <order>, "start": <ISO>, "end": <ISO> }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RangeRepr {
    unit: u8,
    start: String,
    end: String,
}

impl UnitIdRange {
    /// ## Summary
    /// Builds the range spanning `a` and `b` in either order, snapped to whole
    /// buckets and promoted to the coarsest exact unit.
    ///
    /// ## Errors
    /// Returns `UnitError::UnitMismatch` if `a` and `b` have different units.
    pub fn from_unit_ids(a: &UnitId, b: &UnitId) -> UnitResult<Self> {
        if a.unit() != b.unit() {
            return Err(UnitError::UnitMismatch {
                expected: a.unit(),
                found: b.unit(),
            });
        }

        Ok(Self::from_bounds(a.clone(), b.clone()).promote())
    }

    /// ## Summary
    /// Builds both endpoints from date configurations, then delegates to
    /// [`UnitIdRange::from_unit_ids`].
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` if either date is invalid.
    pub fn from_instants(
        start: impl IntoInstant,
        end: impl IntoInstant,
        unit: Unit,
    ) -> UnitResult<Self> {
        let start = UnitId::from_instant(start, unit)?;
        let end = UnitId::from_instant(end, unit)?;
        Self::from_unit_ids(&start, &end)
    }

    /// Orders and snaps two same-unit ids without promoting.
    pub(crate) fn from_bounds(a: UnitId, b: UnitId) -> Self {
        let (low, high) = if b.is_before(&a) { (b, a) } else { (a, b) };
        let unit = low.unit();
        Self {
            start: low.start(),
            end: high.end(),
            unit,
        }
    }

    /// ## Summary
    /// Re-expresses the range at coarser units for as long as the coarser
    /// buckets cover exactly the same instants.
    ///
    /// Stops at the first unit whose buckets would extend past either
    /// endpoint, or at century.
    #[must_use]
    pub fn promote(&self) -> Self {
        let mut range = self.clone();

        while let Some(upper) = range.unit.upper() {
            let start = range.start.as_unit(upper);
            let end = range.end.as_unit(upper);
            if !(start.is_start() && end.is_end()) {
                break;
            }

            tracing::trace!(from = %range.unit, to = %upper, "Promoting range unit");
            range = Self { start, end, unit: upper };
        }

        if range.unit != self.unit {
            tracing::debug!(
                requested = %self.unit,
                unit = %range.unit,
                "Range normalized to coarser unit"
            );
        }

        range
    }

    #[must_use]
    pub fn start(&self) -> &UnitId {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &UnitId {
        &self.end
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Every id from start to end at the range's unit, in order.
    ///
    /// Each call returns a fresh iterator.
    #[must_use]
    pub fn ids(&self) -> Ids {
        Ids::new(self.start.clone(), self.length())
    }

    /// Number of buckets in the range.
    #[must_use]
    pub fn length(&self) -> u64 {
        self.end.diff_unchecked(&self.start).unsigned_abs() + 1
    }

    /// ## Summary
    /// Shifts both endpoints by `count` units of the range's unit.
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` if either endpoint leaves the
    /// supported years.
    pub fn add(&self, count: i64) -> UnitResult<Self> {
        Ok(Self::from_bounds(
            self.start.add(count)?,
            self.end.add(count)?,
        ))
    }

    /// ## Summary
    /// Equivalent to `add(-count)`.
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` if either endpoint leaves the
    /// supported years.
    pub fn sub(&self, count: i64) -> UnitResult<Self> {
        Ok(Self::from_bounds(
            self.start.sub(count)?,
            self.end.sub(count)?,
        ))
    }

    /// Views the same span at another unit, snapping the endpoints to that
    /// unit's buckets.
    #[must_use]
    pub fn as_unit(&self, unit: Unit) -> Self {
        Self::from_bounds(self.start.as_unit(unit), self.end.as_unit(unit))
    }

    /// ## Summary
    /// Whether the two ranges overlap.
    ///
    /// Endpoints are compared as instants, so ranges promoted to different
    /// units still compare by the time they cover. The comparison is strict
    /// on both sides: ranges that only touch at a boundary instant do not
    /// intersect.
    #[must_use]
    pub fn is_intersect(&self, other: &Self) -> bool {
        self.start.instant() < other.end.instant() && self.end.instant() > other.start.instant()
    }

    /// Whether the whole bucket of `id` lies inside this range, at any unit.
    #[must_use]
    pub fn contains(&self, id: &UnitId) -> bool {
        self.start.instant() <= id.start().instant() && id.end().instant() <= self.end.instant()
    }

    /// Renders `"<unit order>_<ISO start>_<ISO end>"`.
    #[must_use]
    pub fn serialize(&self) -> String {
        format!(
            "{}_{}_{}",
            self.unit.order(),
            self.start.iso(),
            self.end.iso()
        )
    }

    /// ## Summary
    /// Parses the output of [`UnitIdRange::serialize`].
    ///
    /// The stored unit is kept as is; no promotion happens.
    ///
    /// ## Errors
    /// Returns `UnitError::Deserialization` if either separator is missing,
    /// the order is not a unit order, or an instant cannot be parsed.
    pub fn deserialize(input: &str) -> UnitResult<Self> {
        let mut parts = input.splitn(3, '_');
        let (Some(order), Some(start), Some(end)) = (parts.next(), parts.next(), parts.next())
        else {
            tracing::debug!(input, "Serialized range is missing a separator");
            return Err(UnitError::Deserialization(format!(
                "expected `<unit>_<start>_<end>`, got `{input}`"
            )));
        };

        let unit = parse_unit_order(order)?;
        Ok(Self::from_bounds(
            UnitId::parse_serialized_instant(start, unit)?,
            UnitId::parse_serialized_instant(end, unit)?,
        ))
    }
}

impl IntoIterator for &UnitIdRange {
    type Item = UnitId;
    type IntoIter = Ids;

    fn into_iter(self) -> Self::IntoIter {
        self.ids()
    }
}

impl From<UnitIdRange> for RangeRepr {
    fn from(range: UnitIdRange) -> Self {
        Self {
            unit: range.unit.order(),
            start: range.start.iso(),
            end: range.end.iso(),
        }
    }
}

impl TryFrom<RangeRepr> for UnitIdRange {
    type Error = UnitError;

    fn try_from(repr: RangeRepr) -> Result<Self, Self::Error> {
        let unit = Unit::from_order(repr.unit)?;
        Ok(Self::from_bounds(
            UnitId::parse_serialized_instant(&repr.start, unit)?,
            UnitId::parse_serialized_instant(&repr.end, unit)?,
        ))
    }
}
