//! The process-wide build-argument registry.
//!
//! Build arguments are declared by `declare_args` blocks with default
//! values and overridden from outside (command line, root argument file, or
//! a toolchain's `toolchain_args` block). The registry records every
//! declaration and override, applies the effective value to the declaring
//! scope, and audits for overrides that never matched a declaration.
//!
//! Overrides of not-yet-declared names are held pending rather than
//! rejected: they apply the moment the matching `declare_args` block is
//! evaluated, in whichever toolchain that happens. Only
//! [`Args::verify_all_overrides_used`], run after all toolchains finish,
//! reports the ones that never found a home.
//!
//! One instance serves every toolchain of an evaluation run. All state sits
//! behind a single mutex, so concurrent toolchain evaluation observes a
//! serial interleaving.

use crate::diag::Diag;
use crate::host;
use crate::scope::{KeyValueMap, Scope};
use crate::settings::{Settings, SettingsKey};
use crate::spellcheck::spellcheck_string;
use crate::value::Value;
use crate::variables;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace};

/// A declared argument's default plus any override, as reported by
/// [`Args::get_all_arguments`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValueWithOverride {
    /// Default value given in the `declare_args` block.
    pub default_value: Value,
    /// Override from the command line or root argument file, when present.
    pub override_value: Option<Value>,
}

/// Sorted view of all declared arguments.
pub type ValueWithOverrideMap = std::collections::BTreeMap<String, ValueWithOverride>;

#[derive(Default)]
struct ArgsState {
    /// Global overrides: command line plus root-argument-file assignments.
    overrides: KeyValueMap,
    /// Every override ever observed, including per-toolchain ones. Feeds
    /// the unused-override audit; default overrides never land here.
    all_overrides: KeyValueMap,
    /// Per toolchain, the arguments declared so far and their defaults.
    declared_per_toolchain: FxHashMap<SettingsKey, KeyValueMap>,
    /// Overrides scoped to a single toolchain, held until the matching
    /// declarations arrive.
    toolchain_overrides: FxHashMap<SettingsKey, KeyValueMap>,
    /// Build description files that can affect argument values.
    arg_dependency_files: BTreeSet<String>,
}

impl ArgsState {
    /// Toolchains in deterministic order: defaults first, then label
    /// ascending, then creation order.
    fn sorted_toolchains(&self) -> Vec<SettingsKey> {
        let mut toolchains: Vec<SettingsKey> =
            self.declared_per_toolchain.keys().cloned().collect();
        toolchains.sort_by(|a, b| Settings::toolchain_cmp(&a.0, &b.0));
        toolchains
    }

    /// Seed the system variables into `dest`, record them as declared for
    /// the scope's toolchain, and mark them used so a build config file can
    /// overwrite them without a warning.
    fn set_system_vars(&mut self, key: &SettingsKey, dest: &mut Scope<'_>) -> Result<(), Diag> {
        let os_value = Value::string(host::host_os());
        let cpu_value = Value::string(host::host_cpu());
        let empty = Value::string("");

        let seeded = [
            (variables::HOST_OS, &os_value),
            (variables::CURRENT_OS, &empty),
            (variables::TARGET_OS, &empty),
            (variables::HOST_CPU, &cpu_value),
            (variables::CURRENT_CPU, &empty),
            (variables::TARGET_CPU, &empty),
        ];

        let declared = self.declared_per_toolchain.entry(key.clone()).or_default();
        for (name, value) in seeded {
            dest.set_value(name, value.clone(), None)?;
            declared.insert(name.to_string(), value.clone());
            dest.mark_used(name);
        }
        Ok(())
    }
}

/// Writes each value whose name is already declared for the scope's
/// toolchain. Overrides of undeclared names stay pending until the matching
/// `declare_args` block shows up.
fn apply_declared_overrides(
    declared: &KeyValueMap,
    values: &KeyValueMap,
    scope: &mut Scope<'_>,
) -> Result<(), Diag> {
    for (name, value) in values {
        if !declared.contains_key(name) {
            continue;
        }
        scope.set_value(name.clone(), value.clone(), value.origin())?;
    }
    Ok(())
}

/// Process-wide registry of declared build arguments and their overrides.
///
/// Within a toolchain, the required call order is
/// [`setup_root_scope`](Args::setup_root_scope), then any number of
/// [`declare_args`](Args::declare_args), and finally, once *every* toolchain
/// has finished declaring, [`verify_all_overrides_used`](Args::verify_all_overrides_used).
#[derive(Default)]
pub struct Args {
    state: Mutex<ArgsState>,
}

impl Args {
    pub fn new() -> Args {
        Args::default()
    }

    fn lock(&self) -> MutexGuard<'_, ArgsState> {
        self.state.lock().unwrap()
    }

    /// Register a global override, normally from the command line.
    pub fn add_arg_override(&self, name: &str, value: Value) {
        trace!(arg = name, "registering argument override");
        let mut state = self.lock();
        state.overrides.insert(name.to_string(), value.clone());
        state.all_overrides.insert(name.to_string(), value);
    }

    /// Bulk form of [`add_arg_override`](Args::add_arg_override).
    pub fn add_arg_overrides(&self, overrides: &KeyValueMap) {
        trace!(count = overrides.len(), "registering argument overrides");
        let mut state = self.lock();
        for (name, value) in overrides {
            state.overrides.insert(name.clone(), value.clone());
            state.all_overrides.insert(name.clone(), value.clone());
        }
    }

    /// Register default overrides from the root argument file. These shape
    /// the build like any other override but are exempt from the
    /// unused-override audit: they exist to provide defaults that may or
    /// may not be consumed.
    pub fn add_default_arg_overrides(&self, overrides: &KeyValueMap) {
        trace!(count = overrides.len(), "registering default overrides");
        let mut state = self.lock();
        for (name, value) in overrides {
            state.overrides.insert(name.clone(), value.clone());
        }
    }

    /// The recorded override for `name`, from any channel the audit tracks.
    pub fn get_arg_override(&self, name: &str) -> Option<Value> {
        self.lock().all_overrides.get(name).cloned()
    }

    /// Resolve `name` against everything the registry knows: overrides
    /// first, then declared defaults, walking toolchains in deterministic
    /// order so the default toolchain answers first.
    pub fn get_arg_from_all_arguments(&self, name: &str) -> Option<Value> {
        let state = self.lock();
        if let Some(value) = state.all_overrides.get(name) {
            return Some(value.clone());
        }
        for key in state.sorted_toolchains() {
            if let Some(value) = state
                .declared_per_toolchain
                .get(&key)
                .and_then(|declared| declared.get(name))
            {
                return Some(value.clone());
            }
        }
        None
    }

    /// Set up the root scope of a toolchain: seed the system variables,
    /// apply whatever overrides target already-declared names (only the
    /// system variables at this point), and save the toolchain overrides so
    /// later `declare_args` blocks in this toolchain can consume them.
    pub fn setup_root_scope(
        &self,
        dest: &mut Scope<'_>,
        toolchain_overrides: KeyValueMap,
    ) -> Result<(), Diag> {
        debug!(
            toolchain = dest.settings().toolchain_label(),
            "seeding root scope"
        );
        let mut state = self.lock();
        let key = SettingsKey(Arc::clone(dest.settings()));
        state.set_system_vars(&key, dest)?;

        if let Some(declared) = state.declared_per_toolchain.get(&key) {
            apply_declared_overrides(declared, &state.overrides, dest)?;
            apply_declared_overrides(declared, &toolchain_overrides, dest)?;
        }

        for (name, value) in &toolchain_overrides {
            state.all_overrides.insert(name.clone(), value.clone());
        }
        state.toolchain_overrides.insert(key, toolchain_overrides);
        Ok(())
    }

    /// Process one `declare_args` block for the scope's toolchain.
    ///
    /// Each argument is recorded as declared, then written to the scope at
    /// its effective value: the toolchain override if one exists, else the
    /// global override, else the declared default. Every declared name is
    /// marked used regardless of which value won: a name consumed only in
    /// one toolchain must not trip unused-variable checks in another, and a
    /// build file may overwrite the value without reading it first.
    ///
    /// A name already declared for this toolchain from a *different* origin
    /// is a duplicate declaration and fails; the same origin re-declaring
    /// (the same file evaluated under several toolchains) is accepted.
    pub fn declare_args(
        &self,
        args: &KeyValueMap,
        scope_to_set: &mut Scope<'_>,
    ) -> Result<(), Diag> {
        trace!(
            count = args.len(),
            toolchain = scope_to_set.settings().toolchain_label(),
            "declaring build arguments"
        );
        let mut guard = self.lock();
        let state = &mut *guard;
        let key = SettingsKey(Arc::clone(scope_to_set.settings()));
        let declared = state.declared_per_toolchain.entry(key.clone()).or_default();
        let toolchain_overrides = state.toolchain_overrides.entry(key).or_default();

        for (name, value) in args {
            if let Some(previous) = declared.get(name) {
                if previous.origin() != value.origin() {
                    let mut err = Diag::new(
                        value.origin(),
                        "Duplicate build argument declaration.",
                        format!(
                            "The argument \"{}\" was already declared elsewhere. \
                             Each argument may be declared only once in the entire \
                             build, so there is one canonical place for its \
                             documentation and default value. Move the declaration \
                             to a file imported everywhere it is needed.",
                            name
                        ),
                    );
                    err.append_sub_err(Diag::new(
                        previous.origin(),
                        "Previous declaration.",
                        String::new(),
                    ));
                    return Err(err);
                }
            } else {
                declared.insert(name.clone(), value.clone());
            }

            if let Some(override_value) = toolchain_overrides.get(name) {
                scope_to_set.set_value(
                    name.clone(),
                    override_value.clone(),
                    override_value.origin(),
                )?;
            } else if let Some(override_value) = state.overrides.get(name) {
                scope_to_set.set_value(
                    name.clone(),
                    override_value.clone(),
                    override_value.origin(),
                )?;
            } else {
                scope_to_set.set_value(name.clone(), value.clone(), value.origin())?;
            }
            scope_to_set.mark_used(name);
        }

        Ok(())
    }

    /// Report overrides that never matched a declaration in any toolchain.
    ///
    /// Sound only after every toolchain has finished declaring. One
    /// representative offender is reported, with a spelling suggestion
    /// drawn from all declared names when one is close enough.
    pub fn verify_all_overrides_used(&self) -> Result<(), Diag> {
        let state = self.lock();
        let mut unused = state.all_overrides.clone();
        for declared in state.declared_per_toolchain.values() {
            unused.retain(|name, _| !declared.contains_key(name));
        }

        let Some((name, value)) = unused.into_iter().next() else {
            return Ok(());
        };
        debug!(arg = %name, "override never matched a declaration");

        let mut help = format!(
            "The variable \"{}\" was set as a build argument\n\
             but never appeared in a declare_args() block in any build file.",
            name
        );
        let candidates = state
            .declared_per_toolchain
            .values()
            .flat_map(|declared| declared.keys())
            .map(String::as_str);
        if let Some(suggestion) = spellcheck_string(&name, candidates) {
            help = format!("Did you mean \"{}\"?\n\n{}", suggestion, help);
        }
        Err(Diag::new(
            value.origin(),
            "Build argument has no effect.",
            help,
        ))
    }

    /// All declared arguments with their defaults and overrides, sorted by
    /// name. The default toolchain's defaults are authoritative when the
    /// same argument is declared in several toolchains; overrides whose
    /// name is declared nowhere are omitted (the audit is where they
    /// surface).
    pub fn get_all_arguments(&self) -> ValueWithOverrideMap {
        let state = self.lock();
        let mut result = ValueWithOverrideMap::new();

        for key in state.sorted_toolchains() {
            if let Some(declared) = state.declared_per_toolchain.get(&key) {
                for (name, default) in declared {
                    result
                        .entry(name.clone())
                        .or_insert_with(|| ValueWithOverride {
                            default_value: default.clone(),
                            override_value: None,
                        });
                }
            }
        }

        for (name, value) in &state.overrides {
            if let Some(entry) = result.get_mut(name) {
                entry.override_value = Some(value.clone());
            }
        }

        result
    }

    /// Build description files that can affect argument values.
    pub fn arg_dependency_files(&self) -> BTreeSet<String> {
        self.lock().arg_dependency_files.clone()
    }

    pub fn set_arg_dependency_files(&self, files: BTreeSet<String>) {
        self.lock().arg_dependency_files = files;
    }
}
