use crate::error::{Result, SpecflowError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const CONFIG_FILE: &str = ".specflow.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// How `advance_task` treats the requested target status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Only the immediate successor of the current status is accepted.
    #[default]
    Strict,
    /// Any target is applied as requested.
    Lenient,
}

/// How a specification's status follows its tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Recomputed from the task list after every task change.
    #[default]
    Derived,
    /// Stays at the value set on creation.
    Fixed,
}

// ---------------------------------------------------------------------------
// ServerEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Connected,
    Disconnected,
}

/// A tool server shown alongside the specifications. Listing only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub name: String,
    pub status: ServerStatus,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl ServerEntry {
    fn connected(name: &str, tools: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            status: ServerStatus::Connected,
            tools: tools.iter().map(|t| t.to_string()).collect(),
        }
    }
}

fn default_servers() -> Vec<ServerEntry> {
    vec![
        ServerEntry::connected(
            "GitLab",
            &["get_issue", "list_project_issues", "create_merge_request"],
        ),
        ServerEntry::connected("Database", &["query", "schema_info"]),
    ]
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
    #[serde(default)]
    pub transitions: TransitionPolicy,
    #[serde(default)]
    pub status_policy: StatusPolicy,
    #[serde(default = "default_servers")]
    pub servers: Vec<ServerEntry>,
}

fn default_version() -> u32 {
    1
}

fn default_title_max_chars() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            title_max_chars: default_title_max_chars(),
            transitions: TransitionPolicy::default(),
            status_policy: StatusPolicy::default(),
            servers: default_servers(),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_yaml::to_string(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn connected_servers(&self) -> impl Iterator<Item = &ServerEntry> {
        self.servers
            .iter()
            .filter(|s| s.status == ServerStatus::Connected)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.title_max_chars == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "title_max_chars must be at least 1".to_string(),
            });
        }

        if self.transitions == TransitionPolicy::Lenient {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "transitions: lenient lets tasks skip or reverse stages".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for server in &self.servers {
            if server.name.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "server entry has an empty name".to_string(),
                });
            } else if !seen.insert(server.name.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("server '{}' is listed more than once", server.name),
                });
            }
            if server.tools.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("server '{}' exposes no tools", server.name),
                });
            }
        }

        warnings
    }

    /// Fail with every error-level problem [`Config::validate`] reports.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SpecflowError::InvalidConfig(errors.join("; ")))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
