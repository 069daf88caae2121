//! Urgency evaluator: days-until-due mapped onto a fixed ladder.
//!
//! | days until due | urgency                          |
//! |----------------|----------------------------------|
//! | no due date    | 50                               |
//! | overdue        | 100 + 10 per day late, max 130   |
//! | 0              | 100                              |
//! | 1              | 90                               |
//! | 2-3            | 75                               |
//! | 4-7            | 55                               |
//! | > 7            | 30                               |

use chrono::NaiveDate;

/// "No deadline" is not "no urgency".
pub const NO_DUE_DATE_URGENCY: f64 = 50.0;
pub const DUE_TODAY_URGENCY: f64 = 100.0;
pub const OVERDUE_STEP_PER_DAY: f64 = 10.0;
pub const MAX_URGENCY: f64 = 130.0;

/// Signed whole days from `today` to `due`; negative when overdue.
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

pub fn urgency_score(due_date: Option<NaiveDate>, today: NaiveDate) -> f64 {
    match due_date {
        None => NO_DUE_DATE_URGENCY,
        Some(due) => urgency_for_days(days_until_due(due, today)),
    }
}

/// Ladder lookup. Non-increasing in `days`.
pub fn urgency_for_days(days: i64) -> f64 {
    match days {
        d if d < 0 => {
            let late = d.unsigned_abs() as f64;
            (DUE_TODAY_URGENCY + late * OVERDUE_STEP_PER_DAY).min(MAX_URGENCY)
        }
        0 => DUE_TODAY_URGENCY,
        1 => 90.0,
        2..=3 => 75.0,
        4..=7 => 55.0,
        _ => 30.0,
    }
}
