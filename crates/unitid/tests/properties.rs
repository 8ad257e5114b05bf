//! Property tests over the public unit id and range API.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use unitid::{Unit, UnitId, UnitIdRange};

fn instant() -> impl Strategy<Value = NaiveDateTime> {
    (2100..5000i32, 1..=12u32, 1..=28u32, 0..24u32, 0..60u32, 0..60u32).prop_map(
        |(year, month, day, hour, minute, second)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(hour, minute, second))
                .expect("generated fields are always valid")
        },
    )
}

fn unit() -> impl Strategy<Value = Unit> {
    (0..8u8).prop_map(|order| Unit::from_order(order).expect("order is in range"))
}

fn unit_id() -> impl Strategy<Value = UnitId> {
    (instant(), unit()).prop_map(|(instant, unit)| {
        UnitId::from_instant(instant, unit).expect("generated instant is valid")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn construction_keeps_unit(instant in instant(), unit in unit()) {
        let id = UnitId::from_instant(instant, unit).unwrap();
        prop_assert_eq!(id.unit().order(), unit.order());
    }

    #[test]
    fn serialization_round_trips(id in unit_id()) {
        let back = UnitId::deserialize(&id.serialize()).unwrap();
        prop_assert_eq!(back.instant(), id.instant());
        prop_assert_eq!(back, id);
    }

    #[test]
    fn add_then_sub_is_identity(id in unit_id(), n in -20i64..20) {
        let there = id.add(n).unwrap();
        prop_assert_eq!(there.sub(n).unwrap(), id);
    }

    #[test]
    fn add_diff_reaches_other_bucket(a in instant(), b in instant(), unit in unit()) {
        let a = UnitId::from_instant(a, unit).unwrap();
        let b = UnitId::from_instant(b, unit).unwrap();

        let steps = b.diff(&a).unwrap();
        prop_assert_eq!(a.add(steps).unwrap(), b.clone());
        prop_assert_eq!(steps == 0, a == b);
        prop_assert_eq!(a.is_before(&b), steps > 0);
    }

    #[test]
    fn coordinates_round_trip(id in unit_id()) {
        prop_assert_eq!(UnitId::from_coordinates(&id.coordinates()).unwrap(), id);
    }

    #[test]
    fn uid_tracks_equality(id in unit_id()) {
        let start = id.start();
        let end = id.end();
        prop_assert_eq!(start.uid(), id.uid());
        prop_assert_eq!(end.uid(), id.uid());
    }

    #[test]
    fn start_and_end_are_fixed_points(id in unit_id()) {
        prop_assert!(id.start().is_start());
        prop_assert!(id.end().is_end());
        prop_assert_eq!(id.start(), id.clone());
        prop_assert!(!id.end().is_before(&id.start()));
    }

    #[test]
    fn parent_children_are_inverse(id in unit_id()) {
        prop_assume!(id.unit() != Unit::Century);

        let parent = id.parent().unwrap();
        prop_assert_eq!(parent.unit().lower(), Some(id.unit()));
        prop_assert!(parent.children().unwrap().contains(&id));
    }

    #[test]
    fn children_step_from_start(id in unit_id()) {
        prop_assume!(id.unit() != Unit::Second);

        let lower = id.unit().lower().unwrap();
        let first = id.start().as_unit(lower);
        for (k, child) in id.children().unwrap().into_iter().enumerate() {
            let k = i64::try_from(k).unwrap();
            prop_assert_eq!(first.add(k).unwrap(), child);
        }
    }

    #[test]
    fn range_length_matches_ids(id in unit_id(), span in 0i64..40) {
        let other = id.add(span).unwrap();
        let range = UnitIdRange::from_unit_ids(&other, &id).unwrap();

        prop_assert!(range.unit() <= id.unit());
        prop_assert!(!range.end().is_before(range.start()));
        prop_assert_eq!(u64::try_from(range.ids().count()).unwrap(), range.length());
    }

    #[test]
    fn range_serialization_round_trips(id in unit_id(), span in 0i64..40) {
        let range = UnitIdRange::from_unit_ids(&id, &id.add(span).unwrap()).unwrap();
        let back = UnitIdRange::deserialize(&range.serialize()).unwrap();
        prop_assert_eq!(&back, &range);

        let finer = range.as_unit(Unit::Second);
        prop_assert_eq!(UnitIdRange::deserialize(&finer.serialize()).unwrap(), finer);
    }

    #[test]
    fn promotion_is_idempotent(id in unit_id(), span in 0i64..40) {
        let range = UnitIdRange::from_unit_ids(&id, &id.add(span).unwrap()).unwrap();
        prop_assert_eq!(range.promote(), range.clone());
        prop_assert_eq!(
            UnitIdRange::from_unit_ids(range.start(), range.end()).unwrap(),
            range
        );
    }

    #[test]
    fn range_shift_round_trips(id in unit_id(), span in 0i64..10, n in -10i64..10) {
        let range = UnitIdRange::from_unit_ids(&id, &id.add(span).unwrap()).unwrap();
        let moved = range.add(n).unwrap();
        prop_assert_eq!(moved.unit(), range.unit());
        prop_assert_eq!(moved.sub(n).unwrap(), range);
    }
}

#[test]
fn month_example() {
    let a = UnitId::from_instant("2024-03-15T10:30:00", Unit::Month).unwrap();
    let b = UnitId::from_instant("2024-03-01T00:00:00", Unit::Month).unwrap();

    assert_eq!(a.uid(), b.uid());
    assert_eq!(a.to_unit_string(), "3月");
    assert_eq!(a.start().serialize(), "3_2024-03-01T00:00:00");
    assert_eq!(a.end().serialize(), "3_2024-03-31T23:59:59");
}

#[test]
fn century_example() {
    let century = UnitId::from_instant("2024-01-01", Unit::Century).unwrap();
    assert_eq!(century.to_unit_string(), "21世纪");
}

#[test]
fn year_of_months_example() {
    let range = UnitIdRange::from_instants("2020-01-01", "2020-12-31", Unit::Month).unwrap();
    assert_eq!(range.unit(), Unit::Year);
    assert_eq!(range.length(), 1);
    assert_eq!(range.start().serialize(), "2_2020-01-01T00:00:00");
    assert_eq!(range.end().serialize(), "2_2020-12-31T23:59:59");
}
