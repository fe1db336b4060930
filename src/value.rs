//! Typed values produced by build-expression evaluation.

use crate::diag::Diag;
use crate::origin::Origin;
use crate::scope::KeyValueMap;
use std::fmt;
use std::sync::Arc;

/// Variant tag for `Value`, used in type checks and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    String,
    List,
    Scope,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "boolean",
            ValueType::Int => "integer",
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Scope => "scope",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload of a `Value`.
///
/// Heap payloads are `Arc`-shared: values flow into the argument registry
/// and back out across evaluation threads, so clones must be cheap and
/// thread-safe.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Null,
    Bool(bool),
    Int(i64),
    String(Arc<str>),
    List(Arc<Vec<Value>>),
    Scope(Arc<KeyValueMap>),
}

/// A build-expression result plus the origin that produced it.
///
/// Equality is structural over the payload; the origin never participates.
/// Two values read from different declarations compare equal as long as
/// their payloads match.
#[derive(Debug, Clone)]
pub struct Value {
    kind: ValueKind,
    origin: Option<Origin>,
}

impl Value {
    /// The "unset" placeholder.
    pub fn null() -> Value {
        Value {
            kind: ValueKind::Null,
            origin: None,
        }
    }

    pub fn boolean(b: bool) -> Value {
        Value {
            kind: ValueKind::Bool(b),
            origin: None,
        }
    }

    pub fn integer(n: i64) -> Value {
        Value {
            kind: ValueKind::Int(n),
            origin: None,
        }
    }

    pub fn string(s: impl AsRef<str>) -> Value {
        Value {
            kind: ValueKind::String(Arc::from(s.as_ref())),
            origin: None,
        }
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value {
            kind: ValueKind::List(Arc::new(items)),
            origin: None,
        }
    }

    /// A snapshot of a scope's local bindings.
    pub fn scope(snapshot: KeyValueMap) -> Value {
        Value {
            kind: ValueKind::Scope(Arc::new(snapshot)),
            origin: None,
        }
    }

    /// Attach the AST node this value came from.
    pub fn with_origin(mut self, origin: Origin) -> Value {
        self.origin = Some(origin);
        self
    }

    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Option<Origin>) {
        self.origin = origin;
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn value_type(&self) -> ValueType {
        match self.kind {
            ValueKind::Null => ValueType::Null,
            ValueKind::Bool(_) => ValueType::Bool,
            ValueKind::Int(_) => ValueType::Int,
            ValueKind::String(_) => ValueType::String,
            ValueKind::List(_) => ValueType::List,
            ValueKind::Scope(_) => ValueType::Scope,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, ValueKind::Null)
    }

    pub fn as_bool(&self) -> Result<bool, Diag> {
        match self.kind {
            ValueKind::Bool(b) => Ok(b),
            _ => Err(self.type_mismatch(ValueType::Bool)),
        }
    }

    pub fn as_int(&self) -> Result<i64, Diag> {
        match self.kind {
            ValueKind::Int(n) => Ok(n),
            _ => Err(self.type_mismatch(ValueType::Int)),
        }
    }

    pub fn as_string(&self) -> Result<&str, Diag> {
        match &self.kind {
            ValueKind::String(s) => Ok(s),
            _ => Err(self.type_mismatch(ValueType::String)),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], Diag> {
        match &self.kind {
            ValueKind::List(items) => Ok(items),
            _ => Err(self.type_mismatch(ValueType::List)),
        }
    }

    pub fn as_scope(&self) -> Result<&KeyValueMap, Diag> {
        match &self.kind {
            ValueKind::Scope(snapshot) => Ok(snapshot),
            _ => Err(self.type_mismatch(ValueType::Scope)),
        }
    }

    /// Checks the variant tag, producing a diagnostic anchored at this
    /// value's origin on mismatch.
    pub fn verify_type_is(&self, expected: ValueType) -> Result<(), Diag> {
        if self.value_type() == expected {
            Ok(())
        } else {
            Err(self.type_mismatch(expected))
        }
    }

    fn type_mismatch(&self, expected: ValueType) -> Diag {
        Diag::type_mismatch(self.origin, expected, self.value_type())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Null => write!(f, "<null>"),
            ValueKind::Bool(b) => write!(f, "{}", b),
            ValueKind::Int(n) => write!(f, "{}", n),
            ValueKind::String(s) => write!(f, "\"{}\"", s),
            ValueKind::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ValueKind::Scope(snapshot) => {
                write!(f, "{{")?;
                for (i, (name, value)) in snapshot.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
