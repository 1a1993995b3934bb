//! The association writer.
//!
//! Assigning through an association owns all linking semantics: the foreign
//! key is written from the target's primary key (which marks it dirty), the
//! target is cached on the receiver, and a configured inverse is wired on
//! the target. Dispatch layers delegate here and never duplicate any of it.

use recordmodel_core::{
    AssociationErrorKind, Error, PersistenceErrorKind, Result, Value,
};

use crate::model::ModelDescriptor;
use crate::record::Record;
use crate::reflection::Reflection;
use crate::settable::Settable;

/// Assign `value` to `reflection` on `receiver`.
///
/// Accepts a record instance of the target class, or `Null` to unlink.
/// A class handle or any other scalar is rejected with a type mismatch.
/// Returns the foreign-key value as written; failures from the underlying
/// attribute write (cast, nullability) propagate unchanged.
pub fn write(
    receiver: &Record,
    reflection: &'static Reflection,
    value: Settable,
) -> Result<Value> {
    if receiver.is_readonly() {
        return Err(Error::persistence(
            PersistenceErrorKind::ReadonlyRecord,
            receiver.class().name(),
            "record is marked readonly",
        ));
    }

    match value {
        Settable::Record(target) => assign(receiver, reflection, target),
        Settable::Value(Value::Null) => {
            let storage = foreign_key_storage(receiver.class(), reflection);
            let written = receiver.write_attribute(storage, Value::Null)?;
            receiver.clear_association(reflection.name());
            Ok(written)
        }
        Settable::Class(class) => Err(Error::association(
            AssociationErrorKind::TypeMismatch,
            reflection.name(),
            format!(
                "expected an instance of `{}`, got the `{}` class itself",
                reflection.target().name(),
                class.name()
            ),
        )),
        Settable::Value(v) => Err(Error::association(
            AssociationErrorKind::TypeMismatch,
            reflection.name(),
            format!(
                "expected an instance of `{}`, got a {} value",
                reflection.target().name(),
                v.kind_name()
            ),
        )),
    }
}

fn assign(receiver: &Record, reflection: &'static Reflection, target: Record) -> Result<Value> {
    let target_class = target.class();
    if !target_class.is(reflection.target()) {
        return Err(Error::association(
            AssociationErrorKind::TypeMismatch,
            reflection.name(),
            format!(
                "expected an instance of `{}`, got `{}`",
                reflection.target().name(),
                target_class.name()
            ),
        ));
    }
    if target_class.primary_key().is_none() {
        return Err(Error::persistence(
            PersistenceErrorKind::MissingPrimaryKey,
            target_class.name(),
            "target model declares no primary key",
        ));
    }

    // An unsaved target has no key yet; the foreign key follows it on save.
    let fk_value = target.primary_key_value().unwrap_or(Value::Null);
    let storage = foreign_key_storage(receiver.class(), reflection);
    let written = receiver.write_attribute(storage, fk_value)?;
    if Record::ptr_eq(receiver, &target) {
        // A record linked to itself is held weakly, like an inverse, so the
        // cache entry cannot keep the instance alive through itself.
        receiver.cache_inverse(reflection.name(), receiver.downgrade());
    } else {
        receiver.cache_association(reflection.name(), target.clone());
    }

    if let Some(inverse) = reflection.inverse() {
        wire_inverse(receiver, reflection, &target, inverse);
    }

    tracing::debug!(
        model = receiver.class().name(),
        association = reflection.name(),
        foreign_key = storage,
        "Assigned association target"
    );
    Ok(written)
}

/// Cache a weak back-reference on the target under the inverse reflection.
fn wire_inverse(
    receiver: &Record,
    reflection: &'static Reflection,
    target: &Record,
    inverse: &'static str,
) {
    if target.class().find_reflection(inverse).is_none() {
        tracing::warn!(
            model = receiver.class().name(),
            association = reflection.name(),
            inverse = inverse,
            "Configured inverse does not name a reflection on the target"
        );
        return;
    }
    target.cache_inverse(inverse, receiver.downgrade());
}

/// Resolve the reflection's foreign key to the storage name it is written
/// under. An undeclared foreign-key attribute is passed through untouched
/// and rejected by attribute storage.
fn foreign_key_storage(
    model: &'static ModelDescriptor,
    reflection: &'static Reflection,
) -> &'static str {
    let foreign_key = reflection.foreign_key_or_default();
    model.storage_name_of(foreign_key).unwrap_or(foreign_key)
}
