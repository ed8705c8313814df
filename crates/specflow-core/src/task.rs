use crate::error::{Result, SpecflowError};
use crate::types::Status;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub status: Status,
    pub description: String,
}

impl Task {
    pub fn new(id: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            status: Status::Pending,
            description: description.into(),
        }
    }

    /// Succeeds only when `target` is the immediate successor of the current status.
    pub fn can_advance_to(&self, target: Status) -> Result<()> {
        if self.status.next() == Some(target) {
            return Ok(());
        }
        let reason = match self.status.next() {
            Some(next) if target > next => format!("cannot skip '{next}'"),
            Some(_) => "transitions are forward-only".to_string(),
            None => format!("task {} is already completed", self.id),
        };
        Err(SpecflowError::InvalidTransition {
            from: self.status.to_string(),
            to: target.to_string(),
            reason,
        })
    }

    /// Copy of this task carrying `status`; every other field is kept.
    pub fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Task list operations (operate on a task slice)
// ---------------------------------------------------------------------------

pub fn find(tasks: &[Task], id: u32) -> Result<&Task> {
    tasks
        .iter()
        .find(|t| t.id == id)
        .ok_or(SpecflowError::TaskNotFound(id))
}

/// Return the first task, in execution order, that is not yet completed.
pub fn next_task(tasks: &[Task]) -> Option<&Task> {
    tasks.iter().find(|t| t.status != Status::Completed)
}

pub fn count_with(tasks: &[Task], status: Status) -> usize {
    tasks.iter().filter(|t| t.status == status).count()
}

/// Human-readable summary: "3/7 completed, 1 in progress"
pub fn summarize(tasks: &[Task]) -> String {
    let total = tasks.len();
    let done = count_with(tasks, Status::Completed);
    let in_progress = count_with(tasks, Status::InProgress);
    format!("{done}/{total} completed, {in_progress} in progress")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
