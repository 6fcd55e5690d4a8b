//! Week column axis and its generator.
//!
//! # Responsibility
//! - Define the week column record that forms the board's column axis.
//! - Generate the canonical Sunday-anchored sequence between two dates.
//! - Check that a persisted axis still has the generated shape.
//!
//! # Invariants
//! - Every `start_date` is a Sunday.
//! - Generated sequences are strictly ascending in 7-day steps.
//! - Generation is pure: equal bounds yield equal output.

use crate::model::board::BoardValidationError;
use crate::model::style::Style;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const DAYS_PER_WEEK: u64 = 7;

/// One weekly column of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekColumn {
    /// Sunday that opens this week; also the cell key inside experiments.
    pub start_date: NaiveDate,
    /// Default visibility only; hidden columns keep their data.
    pub is_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl WeekColumn {
    /// Creates a visible, unstyled column.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            is_hidden: false,
            style: None,
        }
    }

    /// Returns the header label, see [`week_label`].
    pub fn label(&self) -> String {
        week_label(self.start_date)
    }
}

/// Returns the Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset))
        // Only reachable in the first days of `NaiveDate::MIN`.
        .unwrap_or(date)
}

/// Returns the week start containing `today`, used to highlight the current column.
pub fn current_week_start(today: NaiveDate) -> NaiveDate {
    week_start(today)
}

/// Generates one visible column per week from the week of `range_start`
/// through the last Sunday not after `range_end`.
///
/// Returns an empty sequence when `range_end` precedes the anchor Sunday.
pub fn generate_weeks(range_start: NaiveDate, range_end: NaiveDate) -> Vec<WeekColumn> {
    let mut weeks = Vec::new();
    let mut current = week_start(range_start);

    while current <= range_end {
        weeks.push(WeekColumn::new(current));
        match current.checked_add_days(Days::new(DAYS_PER_WEEK)) {
            Some(next) => current = next,
            None => break,
        }
    }

    weeks
}

/// Checks that `weeks` is Sunday-anchored and contiguous in 7-day steps.
///
/// This is the shape [`generate_weeks`] produces; it implies strict
/// ascending order and no duplicates. An empty axis is valid.
pub fn validate_weeks(weeks: &[WeekColumn]) -> Result<(), BoardValidationError> {
    for week in weeks {
        if week.start_date.weekday() != Weekday::Sun {
            return Err(BoardValidationError::WeekNotSunday(week.start_date));
        }
    }

    for pair in weeks.windows(2) {
        let (previous, next) = (pair[0].start_date, pair[1].start_date);
        if (next - previous).num_days() != DAYS_PER_WEEK as i64 {
            return Err(BoardValidationError::WeekGap { previous, next });
        }
    }

    Ok(())
}

/// Formats a week header as `day/month` without leading zeros or year.
pub fn week_label(date: NaiveDate) -> String {
    format!("{}/{}", date.day(), date.month())
}

#[cfg(test)]
mod tests {
    use super::{week_label, week_start};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_keeps_sundays() {
        assert_eq!(week_start(date(2024, 10, 27)), date(2024, 10, 27));
    }

    #[test]
    fn week_start_moves_saturday_back_six_days() {
        assert_eq!(week_start(date(2024, 11, 2)), date(2024, 10, 27));
    }

    #[test]
    fn label_has_no_leading_zeros() {
        assert_eq!(week_label(date(2025, 3, 2)), "2/3");
        assert_eq!(week_label(date(2024, 11, 17)), "17/11");
    }
}
