use crate::error::SpecflowError;
use crate::task::{self, Task};
use crate::templates::TemplateSource;
use crate::types::{DocumentKind, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SpecId
// ---------------------------------------------------------------------------

/// Creation-time derived identifier (milliseconds since the Unix epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecId(pub u64);

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SpecId {
    type Err = SpecflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(SpecId)
            .map_err(|_| SpecflowError::InvalidSpecId(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// TaskProgress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub id: SpecId,
    pub title: String,
    pub prompt: String,
    pub status: Status,
    pub requirements: String,
    pub design: String,
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
}

impl Specification {
    /// Build a specification from an already-trimmed, non-empty prompt.
    pub(crate) fn generate(
        id: SpecId,
        prompt: &str,
        title_max_chars: usize,
        templates: &dyn TemplateSource,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: truncate_title(prompt, title_max_chars.max(1)),
            prompt: prompt.to_string(),
            status: Status::InProgress,
            requirements: templates.requirements(prompt),
            design: templates.design(prompt),
            tasks: templates.tasks(prompt),
            created_at,
        }
    }

    /// New value with `tasks` replaced; identity and documents are shared.
    pub(crate) fn with_tasks(&self, tasks: Vec<Task>, status: Status) -> Self {
        Self {
            tasks,
            status,
            ..self.clone()
        }
    }

    pub fn task(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        task::count_with(&self.tasks, Status::Completed)
    }

    pub fn progress(&self) -> TaskProgress {
        TaskProgress {
            completed: self.completed_count(),
            in_progress: task::count_with(&self.tasks, Status::InProgress),
            pending: task::count_with(&self.tasks, Status::Pending),
            total: self.task_count(),
        }
    }

    pub fn document(&self, kind: DocumentKind) -> String {
        match kind {
            DocumentKind::Requirements => self.requirements.clone(),
            DocumentKind::Design => self.design.clone(),
            DocumentKind::Tasks => render_task_list(&self.tasks),
        }
    }
}

/// Status a specification would have given its tasks: completed when every
/// task is completed, pending when every task is pending, otherwise in progress.
pub fn derived_status(tasks: &[Task]) -> Status {
    if tasks.is_empty() {
        return Status::Pending;
    }
    if tasks.iter().all(|t| t.status == Status::Completed) {
        Status::Completed
    } else if tasks.iter().all(|t| t.status == Status::Pending) {
        Status::Pending
    } else {
        Status::InProgress
    }
}

/// First `max_chars` characters of `prompt`; never splits a code point.
pub fn truncate_title(prompt: &str, max_chars: usize) -> String {
    match prompt.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => prompt[..byte_idx].to_string(),
        None => prompt.to_string(),
    }
}

fn render_task_list(tasks: &[Task]) -> String {
    let mut out = String::from("# Implementation Tasks\n");
    for t in tasks {
        let mark = match t.status {
            Status::Completed => "x",
            Status::InProgress => "~",
            Status::Pending => " ",
        };
        out.push_str(&format!(
            "\n- [{mark}] {}. {}\n  {}\n",
            t.id, t.title, t.description
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
