//! taskrank-core: priority scoring and ranking for task batches.
//!
//! [`score_and_rank`] is the entry point. It is a pure function from a task
//! batch to a ranked, annotated copy; nothing here performs I/O or keeps
//! state between calls.

pub mod dependency;
pub mod effort;
pub mod importance;
pub mod ranking;
pub mod scoring;
pub mod strategy;
pub mod task;
pub mod time;
pub mod urgency;
pub mod validation;

pub use dependency::{CycleReport, dependency_multiplier};
pub use effort::effort_score;
pub use importance::importance_score;
pub use ranking::{DEFAULT_SUGGESTIONS, PriorityBand, rank_with, score_and_rank, suggest};
pub use scoring::{ScoreBreakdown, explain, priority_score, score_task};
pub use strategy::{FALLBACK_STRATEGY, Strategy, UnknownStrategy, Weights};
pub use task::{ScoredTask, Task};
pub use time::{TimeError, parse_date, today_in};
pub use urgency::urgency_score;
pub use validation::{ValidationError, validate_tasks};
