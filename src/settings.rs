//! Per-toolchain evaluation context descriptors.

use std::cmp::Ordering as CmpOrdering;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter handing each Settings a creation id, used as the final ordering
/// tie-break so the toolchain order stays total within a run.
static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Describes one toolchain evaluation context.
///
/// The front-end allocates one instance per toolchain it evaluates and binds
/// it to every scope of that context. The argument registry keys its
/// per-toolchain tables by instance identity, so the same label evaluated
/// twice (which happens for the default toolchain when `declare_args`
/// appears in the root argument file or its imports) stays two distinct
/// contexts.
#[derive(Debug)]
pub struct Settings {
    toolchain_label: String,
    is_default: bool,
    instance_id: u64,
}

impl Settings {
    /// Create a toolchain descriptor. An empty label marks the default
    /// toolchain.
    pub fn new(toolchain_label: impl Into<String>) -> Arc<Settings> {
        let toolchain_label = toolchain_label.into();
        let is_default = toolchain_label.is_empty();
        Arc::new(Settings {
            toolchain_label,
            is_default,
            instance_id: INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed),
        })
    }

    pub fn toolchain_label(&self) -> &str {
        &self.toolchain_label
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Deterministic toolchain order: defaults first, then label ascending,
    /// then creation order. Creation order keeps the ordering total when
    /// several default instances exist.
    pub fn toolchain_cmp(a: &Settings, b: &Settings) -> CmpOrdering {
        b.is_default
            .cmp(&a.is_default)
            .then_with(|| a.toolchain_label.cmp(&b.toolchain_label))
            .then_with(|| a.instance_id.cmp(&b.instance_id))
    }
}

/// Identity-keyed handle for per-toolchain registry tables.
///
/// Equality and hashing go through the `Arc` pointer, not the label: two
/// default-toolchain instances with identical labels are distinct keys.
#[derive(Debug, Clone)]
pub(crate) struct SettingsKey(pub Arc<Settings>);

impl PartialEq for SettingsKey {
    fn eq(&self, other: &SettingsKey) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SettingsKey {}

impl Hash for SettingsKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}
