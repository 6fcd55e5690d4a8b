//! Bootstrap board used when no saved state exists.

use crate::model::board::{Board, Cell, Experiment};
use crate::model::task::Task;
use crate::model::week::generate_weeks;
use chrono::NaiveDate;

/// First day covered by the seeded week axis.
pub fn default_range_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 1).unwrap_or(NaiveDate::MIN)
}

/// Last day covered by the seeded week axis.
pub fn default_range_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or(NaiveDate::MIN)
}

/// Builds the demo board: the default week range and three experiments,
/// the first of which has tasks in its third and fourth weeks.
pub fn seed_board() -> Board {
    let weeks = generate_weeks(default_range_start(), default_range_end());

    let mut first = Experiment::with_id("exp_1", "ניסוי ראשון");
    if let (Some(third), Some(fourth)) = (weeks.get(2), weeks.get(3)) {
        first.cells.insert(
            third.start_date,
            Cell::new(vec![
                Task::with_id("task_1", "הכנת חומרים")
                    .described("איסוף כל הריאגנטים הדרושים.")
                    .completed(true),
                Task::with_id("task_2", "כיול ציוד").described("לוודא שכל המכשירים מכוילים."),
            ]),
        );
        first.cells.insert(
            fourth.start_date,
            Cell::new(vec![Task::with_id("task_3", "הרצה ראשונית")
                .described("ניסוי מקדים לבדיקת הפרוטוקול.")]),
        );
    }

    Board {
        experiments: vec![
            first,
            Experiment::with_id("exp_2", "ניסוי בקרה"),
            Experiment::with_id("exp_3", "פיתוח פרוטוקול חדש"),
        ],
        weeks,
    }
}
