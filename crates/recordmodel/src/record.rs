//! Live record instances.
//!
//! A `Record` is a shared handle to one row's in-memory state: attribute
//! storage, cached association targets, and a readonly flag. Handles are
//! cheap to clone and safe to use from multiple threads; every method takes
//! the instance lock only for its own duration.

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use recordmodel_core::{
    AttributeSet, Error, PersistenceErrorKind, Result, Value,
};

use crate::associations::{self, AssociationCache};
use crate::model::ModelDescriptor;
use crate::settable::Settable;

struct RecordState {
    attributes: AttributeSet,
    associations: AssociationCache,
    readonly: bool,
}

/// A shared handle to one live record instance.
#[derive(Clone)]
pub struct Record {
    class: &'static ModelDescriptor,
    state: Arc<RwLock<RecordState>>,
}

/// A non-owning handle to a record, used for inverse association caches so
/// that mutually-linked records do not keep each other alive.
#[derive(Clone)]
pub struct WeakRecord {
    class: &'static ModelDescriptor,
    state: Weak<RwLock<RecordState>>,
}

impl Record {
    /// Instantiate a record of `class`.
    ///
    /// The first instantiation of a class runs the association-builder
    /// pipeline for it; a definition problem (such as an undeclared
    /// reflection option) surfaces here.
    pub fn new(class: &'static ModelDescriptor) -> Result<Self> {
        class.build()?;
        Ok(Self {
            class,
            state: Arc::new(RwLock::new(RecordState {
                attributes: AttributeSet::new(class.name(), class.attribute_infos()),
                associations: AssociationCache::new(),
                readonly: false,
            })),
        })
    }

    /// The model class of this instance.
    #[must_use]
    pub fn class(&self) -> &'static ModelDescriptor {
        self.class
    }

    /// Whether two handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(a: &Record, b: &Record) -> bool {
        Arc::ptr_eq(&a.state, &b.state)
    }

    /// Downgrade to a non-owning handle.
    #[must_use]
    pub fn downgrade(&self) -> WeakRecord {
        WeakRecord {
            class: self.class,
            state: Arc::downgrade(&self.state),
        }
    }

    /// The public setter.
    ///
    /// Resolution order: a generated method installed for `name`, then the
    /// association writer if `name` is a declared association, then the raw
    /// attribute writer under the resolved storage name.
    pub fn set(&self, name: &str, value: impl Into<Settable>) -> Result<Value> {
        let value = value.into();

        if let Some(setter) = self.class.generated_methods().get(name) {
            return setter(self, value);
        }
        if let Some(reflection) = self.class.find_reflection(name) {
            return associations::write(self, reflection, value);
        }
        if let Some(attr) = self.class.attribute(name) {
            return match value {
                Settable::Value(v) => self.write_attribute(attr.storage_name(), v),
                other => Err(Error::type_cast(
                    attr.storage_name(),
                    attr.column_type.sql_name(),
                    Value::Null,
                    format!(
                        "attribute `{name}` takes a scalar, got a record of `{}`",
                        other.record_class().map_or("?", |c| c.name())
                    ),
                )),
            };
        }
        Err(Error::unknown_attribute(self.class.name(), name))
    }

    /// Read an attribute by public name (name or alias).
    #[must_use]
    pub fn get(&self, public_name: &str) -> Option<Value> {
        let storage = self.class.storage_name_of(public_name)?;
        self.read_attribute(storage)
    }

    /// The raw attribute writer entry point: write `value` under a storage
    /// name, bypassing association logic.
    pub fn write_attribute(&self, storage_name: &str, value: Value) -> Result<Value> {
        let mut state = self.state.write().unwrap();
        if state.readonly {
            return Err(Error::persistence(
                PersistenceErrorKind::ReadonlyRecord,
                self.class.name(),
                "record is marked readonly",
            ));
        }
        state.attributes.write(storage_name, value)
    }

    /// Read an attribute by storage name.
    #[must_use]
    pub fn read_attribute(&self, storage_name: &str) -> Option<Value> {
        self.state.read().unwrap().attributes.read(storage_name).cloned()
    }

    /// The current primary-key value, if the model declares a primary key
    /// and this instance has one set.
    #[must_use]
    pub fn primary_key_value(&self) -> Option<Value> {
        let pk = self.class.primary_key()?;
        self.read_attribute(pk.storage_name())
    }

    /// Whether the column behind `storage_name` has changed.
    #[must_use]
    pub fn is_changed(&self, storage_name: &str) -> bool {
        self.state.read().unwrap().attributes.is_changed(storage_name)
    }

    /// Storage names of all changed columns.
    #[must_use]
    pub fn changed(&self) -> Vec<&'static str> {
        self.state.read().unwrap().attributes.changed()
    }

    /// Forget all recorded changes, keeping current values.
    pub fn clear_changes(&self) {
        self.state.write().unwrap().attributes.clear_changes();
    }

    /// Mark this instance readonly. Subsequent writes fail with a
    /// persistence error.
    pub fn mark_readonly(&self) {
        self.state.write().unwrap().readonly = true;
    }

    /// Whether this instance is readonly.
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.state.read().unwrap().readonly
    }

    /// The cached target of an association, if one is cached and still
    /// alive.
    #[must_use]
    pub fn association(&self, name: &str) -> Option<Record> {
        self.state.read().unwrap().associations.get(name)
    }

    pub(crate) fn cache_association(&self, name: &'static str, target: Record) {
        self.state
            .write()
            .unwrap()
            .associations
            .set_strong(name, target);
    }

    pub(crate) fn cache_inverse(&self, name: &'static str, source: WeakRecord) {
        self.state
            .write()
            .unwrap()
            .associations
            .set_weak(name, source);
    }

    pub(crate) fn clear_association(&self, name: &str) {
        self.state.write().unwrap().associations.clear(name);
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("class", &self.class.name())
            .field("primary_key", &self.primary_key_value())
            .finish_non_exhaustive()
    }
}

impl WeakRecord {
    /// The model class of the referenced instance.
    #[must_use]
    pub fn class(&self) -> &'static ModelDescriptor {
        self.class
    }

    /// Upgrade back to a strong handle, if the instance is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Record> {
        self.state.upgrade().map(|state| Record {
            class: self.class,
            state,
        })
    }
}

impl fmt::Debug for WeakRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakRecord")
            .field("class", &self.class.name())
            .field("alive", &(self.state.strong_count() > 0))
            .finish()
    }
}
