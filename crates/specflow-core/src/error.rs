use crate::spec::SpecId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecflowError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("specification not found: {0}")]
    SpecNotFound(SpecId),

    #[error("no active specification: create or open one first")]
    NoActiveSpecification,

    #[error("task not found: {0}")]
    TaskNotFound(u32),

    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("invalid status '{0}': expected pending, in-progress or completed")]
    InvalidStatus(String),

    #[error("invalid document '{0}': expected requirements, design or tasks")]
    InvalidDocument(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid specification id '{0}'")]
    InvalidSpecId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpecflowError>;
