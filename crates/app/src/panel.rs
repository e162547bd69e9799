//! Instrument panel: the nickname registry of field targets.
//!
//! The panel is the scheduler's view of the dashboard: every instrument
//! widget registers here under its nickname, and scripts address
//! instruments by that nickname only.

use std::collections::BTreeMap;

use labhub_domain::error::{LabHubError, ValidationError};

use crate::ports::FieldTarget;

/// All registered instruments, keyed by nickname.
#[derive(Default)]
pub struct InstrumentPanel {
    targets: BTreeMap<String, Box<dyn FieldTarget>>,
}

impl InstrumentPanel {
    /// An empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instrument under its own nickname.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyNickname`] or
    /// [`ValidationError::DuplicateNickname`] when the nickname cannot be
    /// used as a key.
    pub fn register(&mut self, target: Box<dyn FieldTarget>) -> Result<(), LabHubError> {
        let nickname = target.nickname().to_string();
        if nickname.is_empty() {
            return Err(ValidationError::EmptyNickname.into());
        }
        if self.targets.contains_key(&nickname) {
            return Err(ValidationError::DuplicateNickname(nickname).into());
        }
        self.targets.insert(nickname, target);
        Ok(())
    }

    /// Look up an instrument by nickname.
    #[must_use]
    pub fn resolve(&self, nickname: &str) -> Option<&dyn FieldTarget> {
        self.targets.get(nickname).map(|target| &**target)
    }

    /// Look up an instrument by nickname, mutably.
    pub fn resolve_mut(&mut self, nickname: &str) -> Option<&mut (dyn FieldTarget + 'static)> {
        self.targets.get_mut(nickname).map(|target| &mut **target)
    }

    /// Registered nicknames, sorted.
    #[must_use]
    pub fn nicknames(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }

    /// Number of registered instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no instrument has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
