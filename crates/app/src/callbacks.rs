//! Callback registry: named user functions for `call` steps.
//!
//! Scripts cannot carry code, only names; the host registers the actual
//! functions before any script referencing them is loaded. Whether a
//! callback wants the instrument panel is declared at registration
//! rather than discovered at call time.

use std::collections::BTreeMap;

use labhub_domain::error::NotFoundError;

use crate::panel::InstrumentPanel;

type PlainFn = Box<dyn FnMut() -> anyhow::Result<()> + Send>;
type PanelFn = Box<dyn FnMut(&mut InstrumentPanel) -> anyhow::Result<()> + Send>;

/// A registered user callback.
pub enum Callback {
    /// Runs with no arguments.
    Plain(PlainFn),
    /// Runs with mutable access to the instrument panel.
    WithPanel(PanelFn),
}

/// All registered callbacks, keyed by the name scripts use.
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: BTreeMap<String, Callback>,
}

impl CallbackRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a no-argument callback. A later registration under the
    /// same name replaces the earlier one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        callback: impl FnMut() -> anyhow::Result<()> + Send + 'static,
    ) {
        self.callbacks
            .insert(name.into(), Callback::Plain(Box::new(callback)));
    }

    /// Register a callback that receives the instrument panel.
    pub fn register_with_panel(
        &mut self,
        name: impl Into<String>,
        callback: impl FnMut(&mut InstrumentPanel) -> anyhow::Result<()> + Send + 'static,
    ) {
        self.callbacks
            .insert(name.into(), Callback::WithPanel(Box::new(callback)));
    }

    /// Whether a callback is registered under this name. Script loading
    /// checks this before queueing a `call` step.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.callbacks.keys().map(String::as_str).collect()
    }

    /// Invoke a callback by name, dispatching on its declared shape.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unregistered name, or whatever
    /// the callback itself fails with.
    pub fn invoke(&mut self, name: &str, panel: &mut InstrumentPanel) -> anyhow::Result<()> {
        let callback = self.callbacks.get_mut(name).ok_or_else(|| NotFoundError {
            entity: "callback",
            id: name.to_string(),
        })?;
        match callback {
            Callback::Plain(run) => run(),
            Callback::WithPanel(run) => run(panel),
        }
    }
}
