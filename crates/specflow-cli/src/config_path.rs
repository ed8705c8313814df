use specflow_core::config::CONFIG_FILE;
use std::path::{Path, PathBuf};

/// Resolve which config file to read.
///
/// Priority:
/// 1. `--config` flag / `SPECFLOW_CONFIG` env var (passed in as `explicit`)
/// 2. Walk upward from `start` looking for `.specflow.yaml`
/// 3. `.specflow.yaml` in `start` (may not exist; defaults apply)
pub fn resolve_config(explicit: Option<&Path>, start: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return candidate;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    start.join(CONFIG_FILE)
}
