use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Result, SpecflowError};
use crate::spec::{SpecId, Specification};
use crate::templates::{DefaultTemplates, TemplateSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StoreSnapshot
// ---------------------------------------------------------------------------

/// Immutable copy of the store handed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub specs: Vec<Specification>,
    pub active: Option<SpecId>,
}

impl StoreSnapshot {
    pub fn active(&self) -> Option<&Specification> {
        let id = self.active?;
        self.specs.iter().find(|s| s.id == id)
    }
}

// ---------------------------------------------------------------------------
// SpecStore
// ---------------------------------------------------------------------------

/// Owns every specification created in this process and the active pointer.
///
/// `specs` is append-only and kept in creation order. `active`, when set,
/// always names a member of `specs`.
pub struct SpecStore {
    config: Config,
    templates: Box<dyn TemplateSource>,
    clock: Box<dyn Clock>,
    specs: Vec<Specification>,
    active: Option<SpecId>,
    last_id: Option<SpecId>,
}

impl Default for SpecStore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl SpecStore {
    pub fn new(config: Config) -> Self {
        Self::with_templates(config, Box::new(DefaultTemplates))
    }

    pub fn with_templates(config: Config, templates: Box<dyn TemplateSource>) -> Self {
        Self {
            config,
            templates,
            clock: Box::new(SystemClock),
            specs: Vec::new(),
            active: None,
            last_id: None,
        }
    }

    /// Replace the time source used for ids and `created_at`.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Generate a specification from `prompt` and make it active.
    ///
    /// A blank prompt is ignored: nothing changes and `None` is returned.
    pub fn create_from_prompt(&mut self, prompt: &str) -> Option<Specification> {
        match self.try_create_from_prompt(prompt) {
            Ok(spec) => Some(spec),
            Err(_) => {
                tracing::debug!("ignoring blank prompt");
                None
            }
        }
    }

    /// Like [`SpecStore::create_from_prompt`] but rejects a blank prompt with
    /// [`SpecflowError::EmptyPrompt`].
    pub fn try_create_from_prompt(&mut self, prompt: &str) -> Result<Specification> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SpecflowError::EmptyPrompt);
        }

        let now = self.clock.now();
        let id = self.next_id(now);
        let spec = Specification::generate(
            id,
            prompt,
            self.config.title_max_chars,
            self.templates.as_ref(),
            now,
        );

        tracing::debug!(id = %spec.id, title = %spec.title, "created specification");
        self.specs.push(spec.clone());
        self.active = Some(id);
        Ok(spec)
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> SpecId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last_id {
            Some(SpecId(last)) if millis <= last => SpecId(last + 1),
            _ => SpecId(millis),
        };
        self.last_id = Some(id);
        id
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn select(&mut self, id: SpecId) -> Result<()> {
        if self.get(id).is_none() {
            return Err(SpecflowError::SpecNotFound(id));
        }
        tracing::debug!(%id, "selected specification");
        self.active = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        if let Some(id) = self.active.take() {
            tracing::debug!(%id, "closed specification");
        }
    }

    pub fn active_id(&self) -> Option<SpecId> {
        self.active
    }

    pub fn active(&self) -> Option<&Specification> {
        self.active.and_then(|id| self.get(id))
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn get(&self, id: SpecId) -> Option<&Specification> {
        self.specs.iter().find(|s| s.id == id)
    }

    pub fn specs(&self) -> &[Specification] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            specs: self.specs.clone(),
            active: self.active,
        }
    }

    // -----------------------------------------------------------------------
    // Replacement (used by the task controller)
    // -----------------------------------------------------------------------

    /// Swap in `spec` for the member with the same id and make it active.
    pub(crate) fn replace(&mut self, spec: Specification) -> Result<()> {
        let slot = self
            .specs
            .iter_mut()
            .find(|s| s.id == spec.id)
            .ok_or(SpecflowError::SpecNotFound(spec.id))?;
        self.active = Some(spec.id);
        *slot = spec;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
