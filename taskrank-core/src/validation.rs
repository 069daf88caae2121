//! Boundary checks for callers that accept task batches from outside.
//!
//! The engine itself never fails: it clamps importance, floors hours and
//! ignores dangling references. A request layer should still refuse
//! malformed input so the caller gets an explicit error instead of a
//! silently clamped score. This module is that refusal policy.

use thiserror::Error;
use tracing::warn;

use crate::dependency::dangling_references;
use crate::importance::{MAX_IMPORTANCE, MIN_IMPORTANCE};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("task {position}: title is required")]
    MissingTitle { position: usize },

    #[error("task {position} ({title}): importance must be between 1 and 10, got {importance}")]
    ImportanceOutOfRange {
        position: usize,
        title: String,
        importance: i64,
    },

    #[error("task {position} ({title}): estimated hours cannot be negative, got {hours}")]
    NegativeHours {
        position: usize,
        title: String,
        hours: f64,
    },

    #[error("task {position} ({title}): estimated hours must be a finite number")]
    NonFiniteHours { position: usize, title: String },
}

/// Check one task; `position` is 1-based and only used in the error.
pub fn validate_task(position: usize, task: &Task) -> Result<(), ValidationError> {
    if task.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle { position });
    }
    if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&task.importance) {
        return Err(ValidationError::ImportanceOutOfRange {
            position,
            title: task.title.clone(),
            importance: task.importance,
        });
    }
    if !task.estimated_hours.is_finite() {
        return Err(ValidationError::NonFiniteHours {
            position,
            title: task.title.clone(),
        });
    }
    if task.estimated_hours < 0.0 {
        return Err(ValidationError::NegativeHours {
            position,
            title: task.title.clone(),
            hours: task.estimated_hours,
        });
    }
    Ok(())
}

/// Reject the first invalid task in input order.
///
/// Dependencies that point outside the batch are tolerated (the engine
/// ignores them) but logged.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationError> {
    for (i, task) in tasks.iter().enumerate() {
        validate_task(i + 1, task)?;
    }
    for (position, reference) in dangling_references(tasks) {
        warn!(position, reference, "dependency references a task outside the batch");
    }
    Ok(())
}
