//! Calendar arithmetic over `chrono::NaiveDateTime`.
//!
//! Instants are wall-clock values without a time zone, truncated to whole
//! seconds. Century and decade are not native calendar fields, so every
//! operation here maps them onto years.

use std::ops::RangeInclusive;

use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta,
    TimeZone, Timelike,
};

use crate::error::{UnitError, UnitResult};
use crate::unit::Unit;

/// Years an instant may fall in.
///
/// Every century bucket of a year in this window starts and ends inside it,
/// and all of them print as plain four-digit ISO years.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 0..=9999;

/// Format used by the serialized forms of ids and ranges.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// A flexible date configuration that can be turned into a calendar instant.
pub trait IntoInstant {
    /// ## Summary
    /// Converts `self` into a wall-clock instant.
    ///
    /// ## Errors
    /// Returns `UnitError::InvalidDate` if the value cannot be interpreted
    /// as a calendar instant.
    fn into_instant(self) -> UnitResult<NaiveDateTime>;
}

impl IntoInstant for NaiveDateTime {
    fn into_instant(self) -> UnitResult<NaiveDateTime> {
        Ok(self)
    }
}

impl IntoInstant for NaiveDate {
    fn into_instant(self) -> UnitResult<NaiveDateTime> {
        Ok(self.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> IntoInstant for DateTime<Tz> {
    fn into_instant(self) -> UnitResult<NaiveDateTime> {
        Ok(self.naive_local())
    }
}

impl IntoInstant for &str {
    fn into_instant(self) -> UnitResult<NaiveDateTime> {
        parse_instant(self)
    }
}

impl IntoInstant for String {
    fn into_instant(self) -> UnitResult<NaiveDateTime> {
        parse_instant(&self)
    }
}

impl IntoInstant for &String {
    fn into_instant(self) -> UnitResult<NaiveDateTime> {
        parse_instant(self)
    }
}

/// ## Summary
/// Parses the textual date forms accepted by [`IntoInstant`].
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, date-times with `T` or a space
/// separator (optionally without seconds or with a fraction), and RFC 3339
/// with an offset, whose local wall clock is kept.
///
/// ## Errors
/// Returns `UnitError::InvalidDate` if no accepted form matches.
pub fn parse_instant(input: &str) -> UnitResult<NaiveDateTime> {
    let s = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant.naive_local());
    }

    if let Some(instant) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    {
        return Ok(instant);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    let date = match s.len() {
        7 => NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok(),
        4 if s.bytes().all(|b| b.is_ascii_digit()) => s
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        _ => None,
    };

    date.map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| UnitError::InvalidDate(format!("cannot parse `{input}` as a date")))
}

/// ## Summary
/// Truncates `instant` to whole seconds and checks it lies in
/// [`SUPPORTED_YEARS`].
///
/// ## Errors
/// Returns `UnitError::InvalidDate` if the year is outside the window.
pub fn normalize(instant: NaiveDateTime) -> UnitResult<NaiveDateTime> {
    if SUPPORTED_YEARS.contains(&instant.year()) {
        Ok(instant.trunc_subsecs(0))
    } else {
        Err(UnitError::InvalidDate(format!(
            "year {} is outside {}..={}",
            instant.year(),
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )))
    }
}

/// ## Summary
/// Shifts `instant` by `count` whole units.
///
/// Year-based shifts (century, decade, year, month) clamp the day to the
/// length of the target month; finer shifts are exact.
///
/// ## Errors
/// Returns `UnitError::InvalidDate` if the result leaves the supported years.
pub fn shift(instant: NaiveDateTime, unit: Unit, count: i64) -> UnitResult<NaiveDateTime> {
    let shifted = match unit {
        Unit::Century => shift_months(instant, count.checked_mul(1200)),
        Unit::Decade => shift_months(instant, count.checked_mul(120)),
        Unit::Year => shift_months(instant, count.checked_mul(12)),
        Unit::Month => shift_months(instant, Some(count)),
        Unit::Day => shift_exact(instant, TimeDelta::try_days(count)),
        Unit::Hour => shift_exact(instant, TimeDelta::try_hours(count)),
        Unit::Minute => shift_exact(instant, TimeDelta::try_minutes(count)),
        Unit::Second => shift_exact(instant, TimeDelta::try_seconds(count)),
    };

    shifted
        .ok_or_else(|| UnitError::InvalidDate(format!("shifting by {count} {unit} overflows")))
        .and_then(normalize)
}

fn shift_months(instant: NaiveDateTime, months: Option<i64>) -> Option<NaiveDateTime> {
    let months = months?;
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        instant.checked_add_months(magnitude)
    } else {
        instant.checked_sub_months(magnitude)
    }
}

fn shift_exact(instant: NaiveDateTime, delta: Option<TimeDelta>) -> Option<NaiveDateTime> {
    instant.checked_add_signed(delta?)
}

/// Whole calendar months from `from` to `to`, truncated toward zero.
fn months_between(to: NaiveDateTime, from: NaiveDateTime) -> i64 {
    let whole = (i64::from(to.year()) - i64::from(from.year())) * 12
        + (i64::from(to.month()) - i64::from(from.month()));

    let Some(anchor) = shift_months(from, Some(whole)) else {
        return whole;
    };

    if to >= from && anchor > to {
        whole - 1
    } else if to < from && anchor < to {
        whole + 1
    } else {
        whole
    }
}

/// Whole `unit`s from `from` to `to`.
///
/// Native fields truncate toward zero; century and decade floor-divide the
/// whole-year difference.
pub fn diff(to: NaiveDateTime, from: NaiveDateTime, unit: Unit) -> i64 {
    let delta = to - from;
    match unit {
        Unit::Century => (months_between(to, from) / 12).div_euclid(100),
        Unit::Decade => (months_between(to, from) / 12).div_euclid(10),
        Unit::Year => months_between(to, from) / 12,
        Unit::Month => months_between(to, from),
        Unit::Day => delta.num_days(),
        Unit::Hour => delta.num_hours(),
        Unit::Minute => delta.num_minutes(),
        Unit::Second => delta.num_seconds(),
    }
}

/// The first year of the century or decade containing `year`.
pub fn bucket_first_year(year: i32, unit: Unit) -> i32 {
    match unit {
        Unit::Century => year.div_euclid(100) * 100,
        Unit::Decade => year.div_euclid(10) * 10,
        _ => year,
    }
}

#[expect(
    clippy::expect_used,
    reason = "Bucket boundaries of an instant inside SUPPORTED_YEARS are valid dates"
)]
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("bucket boundary is a valid date")
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    date(next_year, next_month, 1).pred_opt().map_or(28, |d| d.day())
}

/// The earliest instant of the `unit` bucket containing `instant`.
pub fn start_of(instant: NaiveDateTime, unit: Unit) -> NaiveDateTime {
    let (year, month) = (instant.year(), instant.month());
    let (hour, minute) = (instant.hour(), instant.minute());

    let time = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN);

    match unit {
        Unit::Century | Unit::Decade | Unit::Year => {
            date(bucket_first_year(year, unit), 1, 1).and_time(NaiveTime::MIN)
        }
        Unit::Month => date(year, month, 1).and_time(NaiveTime::MIN),
        Unit::Day => instant.date().and_time(NaiveTime::MIN),
        Unit::Hour => instant.date().and_time(time(hour, 0, 0)),
        Unit::Minute => instant.date().and_time(time(hour, minute, 0)),
        Unit::Second => instant,
    }
}

/// The latest whole-second instant of the `unit` bucket containing `instant`.
pub fn end_of(instant: NaiveDateTime, unit: Unit) -> NaiveDateTime {
    let (year, month) = (instant.year(), instant.month());
    let (hour, minute) = (instant.hour(), instant.minute());

    let time = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap_or(END_OF_DAY);

    match unit {
        Unit::Century => date(bucket_first_year(year, unit) + 99, 12, 31).and_time(END_OF_DAY),
        Unit::Decade => date(bucket_first_year(year, unit) + 9, 12, 31).and_time(END_OF_DAY),
        Unit::Year => date(year, 12, 31).and_time(END_OF_DAY),
        Unit::Month => date(year, month, last_day_of_month(year, month)).and_time(END_OF_DAY),
        Unit::Day => instant.date().and_time(END_OF_DAY),
        Unit::Hour => instant.date().and_time(time(hour, 59, 59)),
        Unit::Minute => instant.date().and_time(time(hour, minute, 59)),
        Unit::Second => instant,
    }
}

/// Hierarchical coordinates of `instant`: century (counted from 1), decade
/// digit, year digit, month, day, hour, minute, second.
pub fn coordinates(instant: NaiveDateTime) -> [i64; 8] {
    let year = i64::from(instant.year());
    [
        year.div_euclid(100) + 1,
        year.rem_euclid(100) / 10,
        year.rem_euclid(10),
        i64::from(instant.month()),
        i64::from(instant.day()),
        i64::from(instant.hour()),
        i64::from(instant.minute()),
        i64::from(instant.second()),
    ]
}

/// ## Summary
/// Builds an instant from a prefix of [`coordinates`]; missing fields take
/// their minimum.
///
/// ## Errors
/// Returns `UnitError::Range` if a decade or year digit is outside `0..=9`,
/// and `UnitError::InvalidDate` if the fields do not name a supported
/// calendar instant.
pub fn from_coordinates(coords: &[i64]) -> UnitResult<NaiveDateTime> {
    let field = |index: usize, min: i64| coords.get(index).copied().unwrap_or(min);

    for (index, name) in [(1, "decade"), (2, "year")] {
        let digit = field(index, 0);
        if !(0..=9).contains(&digit) {
            return Err(UnitError::Range(format!(
                "{name} digit must be within 0..=9, got {digit}"
            )));
        }
    }

    let year = field(0, 1)
        .checked_sub(1)
        .and_then(|centuries| centuries.checked_mul(100))
        .and_then(|y| y.checked_add(field(1, 0) * 10 + field(2, 0)))
        .and_then(|y| i32::try_from(y).ok());
    let narrow = |value: i64| u32::try_from(value).ok();

    let instant = year
        .zip(narrow(field(3, 1)))
        .zip(narrow(field(4, 1)))
        .and_then(|((year, month), day)| NaiveDate::from_ymd_opt(year, month, day))
        .zip(
            narrow(field(5, 0))
                .zip(narrow(field(6, 0)))
                .zip(narrow(field(7, 0)))
                .and_then(|((hour, minute), second)| NaiveTime::from_hms_opt(hour, minute, second)),
        )
        .map(|(date, time)| date.and_time(time))
        .ok_or_else(|| UnitError::InvalidDate(format!("coordinates {coords:?} are not a date")))?;

    normalize(instant)
}
