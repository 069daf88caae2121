//! Demonstration batch used by `taskrank suggest` when no input is given.

use chrono::{Duration, NaiveDate};
use taskrank_core::Task;

pub fn demo_tasks(today: NaiveDate) -> Vec<Task> {
    vec![
        Task::new("Complete urgent client request")
            .with_due_date(today)
            .with_hours(2.0)
            .with_importance(9),
        Task::new("Fix critical bug in production")
            .with_due_date(today)
            .with_hours(3.0)
            .with_importance(10)
            .with_dependencies(vec![1]),
        Task::new("Prepare weekly team report")
            .with_due_date(today + Duration::days(1))
            .with_hours(1.0)
            .with_importance(7),
        Task::new("Research new technology")
            .with_due_date(today + Duration::days(9))
            .with_hours(4.0)
            .with_importance(6),
    ]
}
