//! Batch scoring and ranking.
//!
//! Cycle detection runs once per batch as a single-threaded prepass. Each task
//! is then scored from its own fields plus the read-only [`CycleReport`], so
//! the per-task pass can run on rayon when the `parallel` feature is on.
//!
//! The ranked output is itself a consistent batch: in-range dependency
//! references are renumbered to positions in the output, so scoring the
//! output again reproduces the same graph and the same scores.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::dependency::{CycleReport, dangling_references, resolve_reference};
use crate::scoring::{explain, score_task};
use crate::strategy::Strategy;
use crate::task::{ScoredTask, Task};

/// Default number of suggestions.
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Coarse classification of a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub const HIGH_THRESHOLD: f64 = 70.0;
    pub const MEDIUM_THRESHOLD: f64 = 40.0;

    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= Self::HIGH_THRESHOLD => PriorityBand::High,
            s if s >= Self::MEDIUM_THRESHOLD => PriorityBand::Medium,
            _ => PriorityBand::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl ScoredTask {
    pub fn band(&self) -> PriorityBand {
        PriorityBand::from_score(self.priority_score)
    }
}

/// Score every task and return copies sorted by descending priority.
///
/// Unknown strategy names fall back to `smart_balance`.
pub fn score_and_rank(tasks: &[Task], strategy: &str, today: NaiveDate) -> Vec<ScoredTask> {
    rank_with(tasks, Strategy::resolve(strategy), today)
}

/// [`score_and_rank`] with an already-resolved strategy.
///
/// The sort is stable, so equal scores keep their input order. Dependencies in
/// the returned tasks refer to output positions.
pub fn rank_with(tasks: &[Task], strategy: Strategy, today: NaiveDate) -> Vec<ScoredTask> {
    let cycles = CycleReport::analyze(tasks);
    if cycles.has_cycle() {
        debug!(members = ?cycles.member_positions(), "circular dependencies detected");
    }
    let dangling = dangling_references(tasks).len();
    if dangling > 0 {
        debug!(dangling, "ignoring dependencies outside the batch");
    }

    let mut scored = score_all(tasks, strategy, today, &cycles);
    scored.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    renumber_dependencies(&mut scored);

    debug!(
        strategy = strategy.name(),
        tasks = scored.len(),
        top = ?scored.first().map(|s| s.priority_score),
        "ranked batch"
    );
    scored
}

/// The `limit` highest-priority tasks.
///
/// References to tasks cut by `limit` keep their output positions, so they
/// dangle in the truncated list.
pub fn suggest(
    tasks: &[Task],
    strategy: Strategy,
    today: NaiveDate,
    limit: usize,
) -> Vec<ScoredTask> {
    let mut ranked = rank_with(tasks, strategy, today);
    ranked.truncate(limit);
    ranked
}

/// Rewrite in-range references from input positions to output positions.
/// Out-of-range references are left untouched and stay out of range.
fn renumber_dependencies(ranked: &mut [ScoredTask]) {
    let len = ranked.len();
    let mut output_position = vec![0i64; len];
    for (rank, scored) in ranked.iter().enumerate() {
        output_position[scored.position - 1] = rank as i64 + 1;
    }
    for scored in ranked.iter_mut() {
        for reference in scored.task.dependencies.iter_mut() {
            if let Some(index) = resolve_reference(*reference, len) {
                *reference = output_position[index];
            }
        }
    }
}

fn score_one(
    index: usize,
    task: &Task,
    strategy: Strategy,
    today: NaiveDate,
    cycles: &CycleReport,
) -> ScoredTask {
    let breakdown = score_task(task, strategy, today, Some(cycles));
    ScoredTask {
        task: task.clone(),
        position: index + 1,
        priority_score: breakdown.total,
        explanation: explain(task, today, &breakdown),
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all(
    tasks: &[Task],
    strategy: Strategy,
    today: NaiveDate,
    cycles: &CycleReport,
) -> Vec<ScoredTask> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| score_one(i, t, strategy, today, cycles))
        .collect()
}

#[cfg(feature = "parallel")]
fn score_all(
    tasks: &[Task],
    strategy: Strategy,
    today: NaiveDate,
    cycles: &CycleReport,
) -> Vec<ScoredTask> {
    use rayon::prelude::*;

    tasks
        .par_iter()
        .enumerate()
        .map(|(i, t)| score_one(i, t, strategy, today, cycles))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 26).unwrap()
    }

    fn titles(ranked: &[ScoredTask]) -> Vec<&str> {
        ranked.iter().map(|s| s.title()).collect()
    }

    fn mixed_batch() -> Vec<Task> {
        vec![
            Task::new("Quick Important Task")
                .with_due_date(today())
                .with_hours(1.0)
                .with_importance(9),
            Task::new("Long Less Important Task")
                .with_due_date(today() + Duration::days(14))
                .with_hours(8.0)
                .with_importance(5),
            Task::new("Blocking Task")
                .with_due_date(today() + Duration::days(2))
                .with_hours(3.0)
                .with_importance(7)
                .with_dependencies(vec![1, 2]),
        ]
    }

    #[test]
    fn test_rank_orders_by_descending_score() {
        let ranked = score_and_rank(&mixed_batch(), "smart_balance", today());
        assert_eq!(
            titles(&ranked),
            vec!["Blocking Task", "Quick Important Task", "Long Less Important Task"]
        );
        assert_eq!(ranked[0].priority_score, 97.5);
        assert_eq!(ranked[2].priority_score, 33.0);
        assert_eq!(ranked[0].position, 3);
        assert_eq!(ranked[0].explanation, "Due soon, Blocks 2 tasks");
        // Blocks "Quick Important Task" and "Long Less Important Task", now 2nd and 3rd.
        assert_eq!(ranked[0].task.dependencies, vec![2, 3]);
    }

    #[test]
    fn test_dependencies_follow_reordering() {
        let batch = vec![
            Task::new("low")
                .with_importance(1)
                .with_hours(20.0)
                .with_dependencies(vec![2, 9]),
            Task::new("high")
                .with_importance(10)
                .with_hours(1.0)
                .with_due_date(today()),
        ];
        let ranked = rank_with(&batch, Strategy::SmartBalance, today());
        assert_eq!(titles(&ranked), vec!["high", "low"]);
        assert_eq!(ranked[1].position, 1);
        // In range: renumbered to "high"'s new slot. Dangling: left alone.
        assert_eq!(ranked[1].task.dependencies, vec![1, 9]);
        assert_eq!(batch[0].dependencies, vec![2, 9]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let batch = mixed_batch();
        let before = batch.clone();
        let ranked = score_and_rank(&batch, "smart_balance", today());
        assert_eq!(batch, before);
        assert_eq!(ranked.len(), batch.len());
    }

    #[test]
    fn test_strategies_change_ranking() {
        let batch = vec![
            Task::new("High Importance Task")
                .with_due_date(today() + Duration::days(9))
                .with_hours(6.0)
                .with_importance(10),
            Task::new("Quick Task")
                .with_due_date(today() + Duration::days(14))
                .with_hours(1.0)
                .with_importance(5),
            Task::new("Urgent Task")
                .with_due_date(today())
                .with_hours(4.0)
                .with_importance(7),
        ];

        let smart = rank_with(&batch, Strategy::SmartBalance, today());
        let fastest = rank_with(&batch, Strategy::FastestWins, today());
        let impact = rank_with(&batch, Strategy::HighImpact, today());
        let deadline = rank_with(&batch, Strategy::DeadlineDriven, today());

        assert_eq!(titles(&smart), vec!["Urgent Task", "High Importance Task", "Quick Task"]);
        assert_eq!(titles(&fastest), vec!["Urgent Task", "Quick Task", "High Importance Task"]);
        assert_eq!(impact[0].title(), "High Importance Task");
        assert_eq!(deadline[0].title(), "Urgent Task");
    }

    #[test]
    fn test_unknown_strategy_matches_smart_balance() {
        let batch = mixed_batch();
        assert_eq!(
            score_and_rank(&batch, "no_such_strategy", today()),
            score_and_rank(&batch, "smart_balance", today())
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let batch: Vec<Task> = ["first", "second", "third"]
            .into_iter()
            .map(|t| Task::new(t).with_importance(5).with_hours(3.0))
            .collect();
        let ranked = rank_with(&batch, Strategy::SmartBalance, today());
        assert_eq!(titles(&ranked), vec!["first", "second", "third"]);
        assert_eq!(ranked.iter().map(|s| s.position).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_cycle_members_are_penalized_in_batch() {
        let batch = vec![
            Task::new("Task 1").with_hours(3.0).with_importance(8).with_dependencies(vec![2]),
            Task::new("Task 2").with_hours(3.0).with_importance(8).with_dependencies(vec![1]),
            Task::new("Task 3").with_hours(3.0).with_importance(8),
        ];
        let ranked = rank_with(&batch, Strategy::SmartBalance, today());
        assert_eq!(ranked[0].title(), "Task 3");
        assert_eq!(ranked[1].priority_score, ranked[0].priority_score * 0.5);
        assert!(ranked[1].explanation.contains("circular dependency"));
    }

    #[test]
    fn test_suggest_truncates() {
        let batch = mixed_batch();
        let top = suggest(&batch, Strategy::SmartBalance, today(), 2);
        assert_eq!(titles(&top), vec!["Blocking Task", "Quick Important Task"]);
        assert_eq!(suggest(&batch, Strategy::SmartBalance, today(), 10).len(), 3);
        assert!(suggest(&[], Strategy::SmartBalance, today(), DEFAULT_SUGGESTIONS).is_empty());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let batch: Vec<Task> = (1..=200i64)
            .map(|i| {
                Task::new(format!("t{i}"))
                    .with_importance(i % 12)
                    .with_hours((i % 15) as f64 - 1.0)
                    .with_due_date(today() + Duration::days(i % 20 - 5))
                    .with_dependencies(vec![(i * 7) % 230, (i * 3) % 200 + 1])
            })
            .collect();
        // t115 references itself.
        let cycles = CycleReport::analyze(&batch);
        assert!(cycles.is_member(114));

        for strategy in Strategy::ALL {
            let sequential: Vec<ScoredTask> = batch
                .iter()
                .enumerate()
                .map(|(i, t)| score_one(i, t, strategy, today(), &cycles))
                .collect();
            assert_eq!(score_all(&batch, strategy, today(), &cycles), sequential);
        }
    }

    #[test]
    fn test_priority_bands() {
        assert_eq!(PriorityBand::from_score(97.5), PriorityBand::High);
        assert_eq!(PriorityBand::from_score(70.0), PriorityBand::High);
        assert_eq!(PriorityBand::from_score(69.99), PriorityBand::Medium);
        assert_eq!(PriorityBand::from_score(40.0), PriorityBand::Medium);
        assert_eq!(PriorityBand::from_score(33.0), PriorityBand::Low);
        assert_eq!(PriorityBand::Medium.to_string(), "medium");
    }
}
