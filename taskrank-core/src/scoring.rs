//! Priority combiner and rationale generation.
//!
//! `final = (urgency*w_u + importance*w_i + effort*w_e) * dependency_multiplier`,
//! rounded to two decimals and clamped to `[0, SCORE_CEILING]`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dependency::{CycleReport, dependency_multiplier};
use crate::effort::{effort_score, floor_hours};
use crate::importance::{clamp_importance, importance_score};
use crate::strategy::{Strategy, Weights};
use crate::task::Task;
use crate::urgency::{days_until_due, urgency_score};

pub const SCORE_FLOOR: f64 = 0.0;
pub const SCORE_CEILING: f64 = 100.0;

/// Importance at or above this earns the "High importance" fragment.
pub const HIGH_IMPORTANCE: i64 = 8;
/// Importance at or below this earns the "Low importance" fragment.
pub const LOW_IMPORTANCE: i64 = 3;
pub const QUICK_WIN_HOURS: f64 = 2.0;
pub const TIME_CONSUMING_HOURS: f64 = 6.0;
/// Due within this many days (but not today) reads as "Due soon".
pub const DUE_SOON_DAYS: i64 = 2;

pub const BALANCED_PRIORITY: &str = "Balanced priority";

/// Every input that went into one task's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub strategy: Strategy,
    pub weights: Weights,
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency_multiplier: f64,
    /// The task blocks a task that lies on a dependency cycle.
    pub circular: bool,
    pub total: f64,
}

/// Score one task.
///
/// Pass `cycles` when the whole batch is known; without it the dependency
/// factor only reflects fan-out.
pub fn score_task(
    task: &Task,
    strategy: Strategy,
    today: NaiveDate,
    cycles: Option<&CycleReport>,
) -> ScoreBreakdown {
    let weights = strategy.weights();
    let urgency = urgency_score(task.due_date, today);
    let importance = importance_score(task.importance);
    let effort = effort_score(task.estimated_hours);
    let multiplier = dependency_multiplier(task, cycles);

    let weighted =
        urgency * weights.urgency + importance * weights.importance + effort * weights.effort;
    let total = round2(weighted * multiplier).clamp(SCORE_FLOOR, SCORE_CEILING);

    ScoreBreakdown {
        strategy,
        weights,
        urgency,
        importance,
        effort,
        dependency_multiplier: multiplier,
        circular: cycles.is_some_and(|c| c.references_cycle(task)),
        total,
    }
}

pub fn priority_score(
    task: &Task,
    strategy: Strategy,
    today: NaiveDate,
    cycles: Option<&CycleReport>,
) -> f64 {
    score_task(task, strategy, today, cycles).total
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Human-readable rationale. Fragments always appear in the order urgency,
/// importance, effort, dependencies.
pub fn explain(task: &Task, today: NaiveDate, breakdown: &ScoreBreakdown) -> String {
    let mut fragments: Vec<String> = Vec::new();

    if let Some(due) = task.due_date {
        match days_until_due(due, today) {
            d if d < 0 => {
                let late = d.unsigned_abs();
                fragments.push(format!("Overdue by {late} {}", plural(late, "day", "days")));
            }
            0 => fragments.push("Due today".into()),
            d if d <= DUE_SOON_DAYS => fragments.push("Due soon".into()),
            _ => {}
        }
    }

    let importance = clamp_importance(task.importance);
    if importance >= HIGH_IMPORTANCE {
        fragments.push("High importance".into());
    } else if importance <= LOW_IMPORTANCE {
        fragments.push("Low importance".into());
    }

    let hours = floor_hours(task.estimated_hours);
    if hours <= QUICK_WIN_HOURS {
        fragments.push("Quick win".into());
    } else if hours >= TIME_CONSUMING_HOURS {
        fragments.push("Time-consuming".into());
    }

    let blocked = task.dependencies.len();
    if blocked > 0 {
        let mut fragment = format!("Blocks {blocked} {}", plural(blocked as u64, "task", "tasks"));
        if breakdown.circular {
            fragment.push_str(" (circular dependency)");
        }
        fragments.push(fragment);
    }

    if fragments.is_empty() {
        BALANCED_PRIORITY.to_string()
    } else {
        fragments.join(", ")
    }
}

fn plural(n: u64, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}
