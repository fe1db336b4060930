//! Lexically nested symbol tables for build-file evaluation.
//!
//! A scope is confined to the thread evaluating its toolchain; the argument
//! registry is the only state shared across threads. Child scopes borrow
//! their parent and share the parent's Settings binding.

use crate::diag::Diag;
use crate::origin::Origin;
use crate::settings::Settings;
use crate::value::Value;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Ordered name → value map exchanged between scopes and the argument
/// registry. Ordered so bulk views and audits iterate deterministically.
pub type KeyValueMap = BTreeMap<String, Value>;

/// One evaluation context's symbol table.
pub struct Scope<'a> {
    settings: Arc<Settings>,
    parent: Option<&'a Scope<'a>>,
    values: FxHashMap<String, Value>,
    used: FxHashSet<String>,
    read_only: bool,
}

impl<'a> Scope<'a> {
    /// Create a root scope bound to a toolchain.
    pub fn new(settings: Arc<Settings>) -> Scope<'static> {
        Scope {
            settings,
            parent: None,
            values: FxHashMap::default(),
            used: FxHashSet::default(),
            read_only: false,
        }
    }

    /// Create a nested scope. The child shares the parent's toolchain
    /// binding and falls back to the parent chain on lookup.
    pub fn child(&self) -> Scope<'_> {
        Scope {
            settings: Arc::clone(&self.settings),
            parent: Some(self),
            values: FxHashMap::default(),
            used: FxHashSet::default(),
            read_only: false,
        }
    }

    /// The toolchain this scope evaluates under. Stable for the scope's
    /// lifetime.
    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Insert or replace a binding, updating its origin. Last write wins.
    ///
    /// Fails only when the scope has been sealed with
    /// [`set_read_only`](Scope::set_read_only).
    pub fn set_value(
        &mut self,
        name: impl Into<String>,
        mut value: Value,
        origin: Option<Origin>,
    ) -> Result<(), Diag> {
        let name = name.into();
        if self.read_only {
            return Err(Diag::new(
                origin,
                "Assignment to a sealed scope.",
                format!(
                    "The variable \"{}\" can't be set here because this scope \
                     no longer accepts writes.",
                    name
                ),
            ));
        }
        value.set_origin(origin);
        self.values.insert(name, value);
        Ok(())
    }

    /// Look up a binding, walking the parent chain. Does not mark the name
    /// used.
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        match self.values.get(name) {
            Some(value) => Some(value),
            None => self.parent.and_then(|parent| parent.get_value(name)),
        }
    }

    /// Record that a name was consumed. Idempotent; may precede the write.
    pub fn mark_used(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Snapshot the local bindings only; parents and used-marks are not
    /// included.
    pub fn current_scope_values(&self) -> KeyValueMap {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Seal the scope against further writes. Used by the evaluator when
    /// freezing imported files.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}
