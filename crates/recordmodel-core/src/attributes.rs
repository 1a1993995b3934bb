//! Per-instance attribute storage.
//!
//! `AttributeSet` owns the raw column values of one record instance and
//! implements the **raw attribute writer** primitive: cast to the column
//! type, run attribute-level validation, track dirty state, store. It knows
//! nothing about associations; callers address it exclusively by storage
//! name.

use std::collections::HashMap;

use crate::attribute::AttributeInfo;
use crate::error::{Error, Result, ValidationErrorKind};
use crate::validate::matches_pattern;
use crate::value::Value;

/// Attribute storage plus dirty tracking for one record instance.
#[derive(Debug, Clone)]
pub struct AttributeSet {
    /// Model name, for error messages.
    model: &'static str,
    /// Attribute metadata, shared by all instances of the model.
    attrs: &'static [AttributeInfo],
    /// Current values keyed by storage name.
    values: HashMap<&'static str, Value>,
    /// Value each changed column held before its first write.
    originals: HashMap<&'static str, Value>,
}

impl AttributeSet {
    /// Create empty storage for a model's attributes.
    #[must_use]
    pub fn new(model: &'static str, attrs: &'static [AttributeInfo]) -> Self {
        Self {
            model,
            attrs,
            values: HashMap::new(),
            originals: HashMap::new(),
        }
    }

    /// The attribute metadata this storage was created with.
    #[must_use]
    pub fn attributes(&self) -> &'static [AttributeInfo] {
        self.attrs
    }

    /// Find an attribute by its storage name.
    #[must_use]
    pub fn attribute_by_storage(&self, storage_name: &str) -> Option<&'static AttributeInfo> {
        self.attrs.iter().find(|a| a.storage_name() == storage_name)
    }

    /// The raw attribute writer.
    ///
    /// Casts `value` to the column type, enforces NOT NULL and the column's
    /// pattern, records the original value on first change, stores, and
    /// returns the value as written.
    pub fn write(&mut self, storage_name: &str, value: Value) -> Result<Value> {
        let Some(attr) = self.attribute_by_storage(storage_name) else {
            return Err(Error::unknown_attribute(self.model, storage_name));
        };

        let cast = attr.column_type.cast(attr.storage_name(), value)?;

        if cast.is_null() && !attr.nullable {
            return Err(Error::validation(
                ValidationErrorKind::NotNull,
                attr.storage_name(),
                "column is not nullable",
            ));
        }
        if let (Some(pattern), Value::Text(s)) = (attr.pattern, &cast) {
            if !matches_pattern(s, pattern) {
                return Err(Error::validation(
                    ValidationErrorKind::Pattern,
                    attr.storage_name(),
                    format!("value does not match pattern `{pattern}`"),
                ));
            }
        }

        let key = attr.storage_name();
        let previous = self.values.get(key).cloned().unwrap_or(Value::Null);
        self.originals.entry(key).or_insert(previous);
        self.values.insert(key, cast.clone());

        tracing::trace!(
            model = self.model,
            column = key,
            value = ?cast,
            "Wrote attribute"
        );
        Ok(cast)
    }

    /// Read a value by storage name. Unset columns read as `None`.
    #[must_use]
    pub fn read(&self, storage_name: &str) -> Option<&Value> {
        self.values.get(storage_name)
    }

    /// Whether the column currently differs from its original value.
    #[must_use]
    pub fn is_changed(&self, storage_name: &str) -> bool {
        match self.originals.get(storage_name) {
            Some(original) => self.values.get(storage_name) != Some(original),
            None => false,
        }
    }

    /// Storage names of all columns that currently differ from their
    /// original values.
    #[must_use]
    pub fn changed(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .originals
            .keys()
            .copied()
            .filter(|name| self.is_changed(name))
            .collect();
        names.sort_unstable();
        names
    }

    /// The value a changed column held before its first write.
    #[must_use]
    pub fn original(&self, storage_name: &str) -> Option<&Value> {
        self.originals.get(storage_name)
    }

    /// Forget all recorded changes, keeping current values.
    pub fn clear_changes(&mut self) {
        self.originals.clear();
    }
}
