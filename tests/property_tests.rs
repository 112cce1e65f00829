//! Property-based tests for the invariants the filter and sort paths rely
//! on, in particular that ISO-formatted dates order the same way as the
//! calendar dates they encode.

use chrono::NaiveDate;
use pourtrack_api::{
    entities::{input, pour},
    services::{
        inputs::next_input_code,
        period::Period,
        pours::{parse_volume, sort_pours, PourSortKey, SortDirection},
    },
    store::RegistrySnapshot,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn volume_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000, 0u32..=2).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn stub_pour(date: NaiveDate, volume: Decimal) -> pour::Model {
    pour::Model {
        id: Uuid::new_v4(),
        date,
        invoice_number: String::new(),
        location_id: Uuid::new_v4(),
        device_id: None,
        supplier_id: Uuid::new_v4(),
        concrete_type_id: Uuid::new_v4(),
        volume_delivered: volume,
        truck_id: None,
        notes: None,
        weather: None,
    }
}

fn stub_input(code: i32) -> input::Model {
    input::Model {
        id: Uuid::new_v4(),
        code,
        name: String::new(),
        unit: input::Unit::Kilogram,
        price: Decimal::ONE,
    }
}

proptest! {
    // The invariant behind every date-range filter: lexicographic order of
    // the zero-padded ISO form agrees with chronological order.
    #[test]
    fn iso_date_strings_order_chronologically(a in date_strategy(), b in date_strategy()) {
        let (sa, sb) = (a.to_string(), b.to_string());
        prop_assert_eq!(sa.cmp(&sb), a.cmp(&b));
    }

    #[test]
    fn period_bounds_are_inclusive(a in date_strategy(), b in date_strategy()) {
        let period = Period::new(a.min(b), a.max(b));
        prop_assert!(period.contains(period.start));
        prop_assert!(period.contains(period.end));
    }

    // Direction toggling is a deterministic reversal when keys are distinct.
    #[test]
    fn volume_sort_desc_is_the_reverse_of_asc(volumes in prop::collection::hash_set(0u32..1_000_000, 2..40)) {
        let snap = RegistrySnapshot::default();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut pours: Vec<_> = volumes
            .into_iter()
            .map(|v| stub_pour(date, Decimal::from(v)))
            .collect();

        sort_pours(&mut pours, PourSortKey::Volume, SortDirection::Asc, &snap);
        let ascending: Vec<_> = pours.iter().map(|p| p.id).collect();

        sort_pours(&mut pours, PourSortKey::Volume, SortDirection::Desc, &snap);
        let descending: Vec<_> = pours.iter().map(|p| p.id).collect();

        let reversed: Vec<_> = ascending.into_iter().rev().collect();
        prop_assert_eq!(reversed, descending);
    }

    #[test]
    fn date_sort_orders_chronologically(dates in prop::collection::vec(date_strategy(), 1..40)) {
        let snap = RegistrySnapshot::default();
        let mut pours: Vec<_> = dates
            .into_iter()
            .map(|d| stub_pour(d, Decimal::ONE))
            .collect();

        sort_pours(&mut pours, PourSortKey::Date, SortDirection::Asc, &snap);
        prop_assert!(pours.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn next_code_is_always_max_plus_one(codes in prop::collection::hash_set(1i32..10_000, 0..50)) {
        let inputs: Vec<_> = codes.iter().copied().map(stub_input).collect();
        let expected = codes.iter().max().map_or(1, |max| max + 1);
        prop_assert_eq!(next_input_code(&inputs), expected);
    }

    #[test]
    fn volume_text_parses_exactly_when_it_is_a_non_negative_decimal(
        whole in 0u32..100_000,
        frac in 0u32..100,
    ) {
        let text = format!("{}.{:02}", whole, frac);
        let parsed = parse_volume(&text).expect("valid decimal text");
        let expected = Decimal::new(i64::from(whole) * 100 + i64::from(frac), 2);
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn non_numeric_volume_text_never_parses(text in "[a-zA-Z ]{1,12}") {
        prop_assert!(parse_volume(&text).is_err());
    }

    #[test]
    fn negative_volumes_are_rejected(volume in volume_strategy()) {
        let negative_text = format!("-{}", volume + Decimal::ONE);
        prop_assert!(parse_volume(&negative_text).is_err());
    }
}
