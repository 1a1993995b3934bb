//! The polymorphic setter argument.
//!
//! Public setters accept one positional value that may be a raw scalar, a
//! live record instance, or a model class handle. Which write path the value
//! takes is decided at call time from what the value actually is, never from
//! a declared parameter type: callers should not need to know which form
//! their model exposes.

use recordmodel_core::Value;

use crate::model::ModelDescriptor;
use crate::record::Record;

/// A value assignable through a public setter.
#[derive(Debug, Clone)]
pub enum Settable {
    /// A raw scalar column value.
    Value(Value),
    /// A live record instance.
    Record(Record),
    /// A model class handle passed where an instance would normally go.
    Class(&'static ModelDescriptor),
}

impl Settable {
    /// The model class this value belongs to, if any.
    ///
    /// A class handle is used directly; an instance contributes its own
    /// class; a scalar has none. This is the effective-type rule the
    /// dual-purpose setter dispatches on.
    #[must_use]
    pub fn record_class(&self) -> Option<&'static ModelDescriptor> {
        match self {
            Settable::Class(class) => Some(class),
            Settable::Record(record) => Some(record.class()),
            Settable::Value(_) => None,
        }
    }

    /// True if this is a raw scalar.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Settable::Value(_))
    }
}

impl From<Value> for Settable {
    fn from(v: Value) -> Self {
        Settable::Value(v)
    }
}

impl From<Record> for Settable {
    fn from(r: Record) -> Self {
        Settable::Record(r)
    }
}

impl From<&Record> for Settable {
    fn from(r: &Record) -> Self {
        Settable::Record(r.clone())
    }
}

impl From<&'static ModelDescriptor> for Settable {
    fn from(class: &'static ModelDescriptor) -> Self {
        Settable::Class(class)
    }
}

impl From<bool> for Settable {
    fn from(v: bool) -> Self {
        Settable::Value(Value::Bool(v))
    }
}

impl From<i32> for Settable {
    fn from(v: i32) -> Self {
        Settable::Value(Value::Int(v))
    }
}

impl From<i64> for Settable {
    fn from(v: i64) -> Self {
        Settable::Value(Value::BigInt(v))
    }
}

impl From<f64> for Settable {
    fn from(v: f64) -> Self {
        Settable::Value(Value::Double(v))
    }
}

impl From<&str> for Settable {
    fn from(v: &str) -> Self {
        Settable::Value(Value::Text(v.to_string()))
    }
}

impl From<String> for Settable {
    fn from(v: String) -> Self {
        Settable::Value(Value::Text(v))
    }
}
