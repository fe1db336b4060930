//! # Gravel - Build-Argument Resolution Core
//!
//! Gravel is the argument subsystem of a meta-build generator: it evaluates
//! a declarative build description across one or more toolchain contexts
//! and resolves externally supplied overrides against `declare_args`
//! declarations.
//!
//! ## Quick Start
//!
//! ```
//! use gravel::{Args, KeyValueMap, Scope, Settings, Value};
//!
//! let args = Args::new();
//! args.add_arg_override("enable_opt", Value::boolean(true));
//!
//! let settings = Settings::new("");
//! let mut scope = Scope::new(settings);
//! args.setup_root_scope(&mut scope, KeyValueMap::new()).unwrap();
//!
//! let mut declarations = KeyValueMap::new();
//! declarations.insert("enable_opt".to_string(), Value::boolean(false));
//! args.declare_args(&declarations, &mut scope).unwrap();
//!
//! assert_eq!(scope.get_value("enable_opt"), Some(&Value::boolean(true)));
//! assert!(args.verify_all_overrides_used().is_ok());
//! ```
//!
//! ## Architecture
//!
//! Evaluation flows through a few pieces:
//!
//! 1. **Scope** - lexically nested symbol tables, one tree per toolchain
//! 2. **Args** - the shared registry of declarations and overrides
//! 3. **Value / Origin** - typed results tagged with the AST node that
//!    produced them
//! 4. **Diag** - structured diagnostics anchored at origins
//!
//! The front-end parses the build description, creates a root [`Scope`]
//! per toolchain [`Settings`], and drives [`Args`]: seed system variables
//! with [`Args::setup_root_scope`], feed each `declare_args` block through
//! [`Args::declare_args`], and finish the run with
//! [`Args::verify_all_overrides_used`]. Toolchains may evaluate on
//! parallel threads; the registry serializes them behind one mutex.

pub mod args;
pub mod diag;
pub mod host;
pub mod origin;
pub mod scope;
pub mod settings;
pub mod spellcheck;
pub mod value;
pub mod variables;

pub use args::{Args, ValueWithOverride, ValueWithOverrideMap};
pub use diag::Diag;
pub use origin::Origin;
pub use scope::{KeyValueMap, Scope};
pub use settings::Settings;
pub use spellcheck::spellcheck_string;
pub use value::{Value, ValueKind, ValueType};
