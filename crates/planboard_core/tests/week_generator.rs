use chrono::{Datelike, Days, NaiveDate, Weekday};
use planboard_core::{
    current_week_start, generate_weeks, validate_weeks, BoardValidationError, WeekColumn,
};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn single_friday_yields_preceding_sunday() {
    let weeks = generate_weeks(date(2024, 11, 1), date(2024, 11, 1));

    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].start_date, date(2024, 10, 27));
    assert!(!weeks[0].is_hidden);
    assert_eq!(weeks[0].style, None);
}

#[test]
fn default_seed_range_spans_62_sundays() {
    let weeks = generate_weeks(date(2024, 11, 1), date(2025, 12, 31));

    assert_eq!(weeks.len(), 62);
    assert_eq!(weeks.first().unwrap().start_date, date(2024, 10, 27));
    assert_eq!(weeks.last().unwrap().start_date, date(2025, 12, 28));
}

#[test]
fn end_before_anchor_yields_empty_axis() {
    let weeks = generate_weeks(date(2024, 11, 1), date(2024, 10, 20));
    assert!(weeks.is_empty());
}

#[test]
fn generation_is_idempotent() {
    let first = generate_weeks(date(2025, 1, 15), date(2025, 6, 1));
    let second = generate_weeks(date(2025, 1, 15), date(2025, 6, 1));
    assert_eq!(first, second);
}

#[test]
fn current_week_start_is_the_sunday_on_or_before_today() {
    assert_eq!(current_week_start(date(2026, 10, 18)), date(2026, 10, 18));
    assert_eq!(current_week_start(date(2026, 10, 21)), date(2026, 10, 18));
}

#[test]
fn validate_weeks_rejects_non_sunday_and_gaps() {
    let shifted = vec![WeekColumn::new(date(2024, 10, 28))];
    assert_eq!(
        validate_weeks(&shifted),
        Err(BoardValidationError::WeekNotSunday(date(2024, 10, 28)))
    );

    let gapped = vec![
        WeekColumn::new(date(2024, 10, 27)),
        WeekColumn::new(date(2024, 11, 10)),
    ];
    assert_eq!(
        validate_weeks(&gapped),
        Err(BoardValidationError::WeekGap {
            previous: date(2024, 10, 27),
            next: date(2024, 11, 10),
        })
    );

    let duplicated = vec![
        WeekColumn::new(date(2024, 10, 27)),
        WeekColumn::new(date(2024, 10, 27)),
    ];
    assert!(validate_weeks(&duplicated).is_err());
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~40 years.
    (0u64..15_000).prop_map(|offset| date(2000, 1, 1) + Days::new(offset))
}

proptest! {
    #[test]
    fn generated_axis_is_sunday_anchored_and_contiguous(
        start in any_date(),
        span in 0u64..800,
    ) {
        let end = start + Days::new(span);
        let weeks = generate_weeks(start, end);

        prop_assert!(!weeks.is_empty());
        prop_assert!(weeks[0].start_date <= start);
        prop_assert!((start - weeks[0].start_date).num_days() < 7);
        prop_assert!(weeks.last().unwrap().start_date <= end);
        prop_assert!(end - weeks.last().unwrap().start_date < chrono::TimeDelta::days(7));
        for week in &weeks {
            prop_assert_eq!(week.start_date.weekday(), Weekday::Sun);
        }
        for pair in weeks.windows(2) {
            prop_assert_eq!((pair[1].start_date - pair[0].start_date).num_days(), 7);
        }
        prop_assert!(validate_weeks(&weeks).is_ok());
    }
}
