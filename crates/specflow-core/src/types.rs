use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state shared by tasks and specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[Status::Pending, Status::InProgress, Status::Completed]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The only status a task may move to from `self`.
    pub fn next(self) -> Option<Status> {
        Status::all().get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = crate::error::SpecflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(crate::error::SpecflowError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// The three generated documents of a specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Requirements,
    Design,
    Tasks,
}

impl DocumentKind {
    pub fn all() -> &'static [DocumentKind] {
        &[
            DocumentKind::Requirements,
            DocumentKind::Design,
            DocumentKind::Tasks,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Requirements => "requirements",
            DocumentKind::Design => "design",
            DocumentKind::Tasks => "tasks",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = crate::error::SpecflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requirements" | "req" => Ok(DocumentKind::Requirements),
            "design" => Ok(DocumentKind::Design),
            "tasks" => Ok(DocumentKind::Tasks),
            _ => Err(crate::error::SpecflowError::InvalidDocument(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
