//! Structured diagnostics anchored at build-file origins.
//!
//! Every failure path in the argument core produces a [`Diag`] whose origin
//! points at the site the user can act on. Rendering with source context is
//! the front-end's concern; this module only guarantees the structure.

use crate::origin::Origin;
use crate::value::ValueType;
use std::error::Error as StdError;
use std::fmt;

/// A diagnostic: what went wrong, where, and any related sites.
///
/// The `title` is a short stable summary (some titles are contract-visible
/// and asserted by tests); `help` is the longer explanation. Sub-diagnostics
/// point at related locations, like the previous declaration in a duplicate
/// report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    origin: Option<Origin>,
    title: String,
    help: String,
    sub_errs: Vec<Diag>,
}

impl Diag {
    pub fn new(
        origin: Option<Origin>,
        title: impl Into<String>,
        help: impl Into<String>,
    ) -> Diag {
        Diag {
            origin,
            title: title.into(),
            help: help.into(),
            sub_errs: Vec::new(),
        }
    }

    /// Create a type mismatch diagnostic anchored at the value's origin.
    pub fn type_mismatch(origin: Option<Origin>, expected: ValueType, got: ValueType) -> Diag {
        Diag::new(
            origin,
            "Type mismatch.",
            format!("Expected {}, got {}.", expected, got),
        )
    }

    /// Append a related sub-diagnostic. Order of appends is preserved.
    pub fn append_sub_err(&mut self, sub: Diag) {
        self.sub_errs.push(sub);
    }

    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn sub_errs(&self) -> &[Diag] {
        &self.sub_errs
    }
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if !self.help.is_empty() {
            write!(f, "\n{}", self.help)?;
        }
        for sub in &self.sub_errs {
            for line in sub.to_string().lines() {
                write!(f, "\n  {}", line)?;
            }
        }
        Ok(())
    }
}

impl StdError for Diag {}
