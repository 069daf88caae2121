//! Task model for the priority-scoring engine.
//!
//! Tasks reference each other by 1-based position inside the batch being
//! scored, so a `Task` on its own has no stable identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_importance() -> i64 {
    5
}

/// A unit of work to be ranked.
///
/// Fields are deliberately loose (`i64` importance, signed hours): the engine
/// clamps out-of-range values instead of rejecting them. Strict checks live in
/// [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub title: String,

    /// Optional deadline; `None` means no deadline pressure.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Nominally 1-10.
    #[serde(default = "default_importance")]
    pub importance: i64,

    /// Hours of work. Non-positive values are floored by the effort evaluator.
    #[serde(default)]
    pub estimated_hours: f64,

    /// 1-based positions of the tasks in the same batch that this task blocks.
    #[serde(default)]
    pub dependencies: Vec<i64>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            importance: default_importance(),
            estimated_hours: 1.0,
            dependencies: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<i64>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// A task annotated with its computed priority.
///
/// In a ranked list, `task.dependencies` refer to 1-based positions in that
/// list, so the list can be scored again as a batch of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,

    /// 1-based position of the task in the input batch.
    pub position: usize,

    pub priority_score: f64,
    pub explanation: String,
}

impl ScoredTask {
    pub fn title(&self) -> &str {
        &self.task.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let task: Task = serde_json::from_str(r#"{"title": "write report"}"#).unwrap();
        assert_eq!(task.title, "write report");
        assert_eq!(task.importance, 5);
        assert_eq!(task.estimated_hours, 0.0);
        assert!(task.due_date.is_none());
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn test_due_date_parses_iso_date() {
        let task: Task =
            serde_json::from_str(r#"{"title": "t", "due_date": "2025-11-26"}"#).unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 11, 26));
    }

    #[test]
    fn test_scored_task_flattens_task_fields() {
        let scored = ScoredTask {
            task: Task::new("ship it").with_dependencies(vec![2]),
            position: 1,
            priority_score: 61.5,
            explanation: "Blocks 1 task".into(),
        };

        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["title"], "ship it");
        assert_eq!(value["dependencies"][0], 2);
        assert_eq!(value["priority_score"], 61.5);
        assert_eq!(value["explanation"], "Blocks 1 task");

        let back: ScoredTask = serde_json::from_value(value).unwrap();
        assert_eq!(back, scored);
    }
}
