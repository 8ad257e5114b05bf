//! Hierarchical calendar-unit identifiers.
//!
//! A [`UnitId`] names one calendar bucket (a century, a decade, a year, down
//! to a single second) and supports navigation between granularities,
//! arithmetic in whole units, and a stable text form. A [`UnitIdRange`] spans
//! two such buckets at a single unit.
//!
//! ```rust
//! # use unitid::{Unit, UnitId, UnitIdRange};
//! let month = UnitId::from_instant("2024-03-15T10:30:00", Unit::Month).unwrap();
//! assert_eq!(month.to_unit_string(), "3月");
//! assert_eq!(month.parent().unwrap().to_unit_string(), "2024年");
//!
//! let range = UnitIdRange::from_instants("2020-01-01", "2020-12-31", Unit::Month).unwrap();
//! assert_eq!(range.unit(), Unit::Year);
//! assert_eq!(range.length(), 1);
//! ```

pub mod error;
pub mod range;
pub mod unit;
pub mod unit_id;

pub use error::{UnitError, UnitResult};
pub use range::{Ids, UnitIdRange};
pub use unit::Unit;
pub use unit_id::{Inclusivity, IntoInstant, UnitId};
