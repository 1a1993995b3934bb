//! Dual-purpose setters for self-referential associations.
//!
//! When an association's configured foreign key carries the same name as the
//! association itself (a `parent` association stored in a `parent` column),
//! the attribute setter and the association setter compete for one method
//! name. This extension installs a single setter under that name that
//! decides, per call, from what the argument actually is: a record instance
//! or class handle goes through the association writer, anything else is
//! written straight to attribute storage.

use std::sync::Arc;

use crate::associations::{self, BuilderExtension, RegisteredExtension};
use crate::methods::SetterFn;
use crate::model::ModelDescriptor;
use crate::record::Record;
use crate::reflection::Reflection;
use crate::settable::Settable;

/// Builder extension generating dual-purpose setters.
pub struct RecursiveAssociationExtension;

impl RecursiveAssociationExtension {
    /// Whether `reflection` needs a dual-purpose setter: only when a foreign
    /// key is configured and is exactly the association's own name. Anything
    /// else leaves attribute and association setters unambiguous.
    #[must_use]
    pub fn should_generate(reflection: &Reflection) -> bool {
        reflection.configured_foreign_key() == Some(reflection.name())
    }
}

impl BuilderExtension for RecursiveAssociationExtension {
    fn eligible_for(&self, reflection: &Reflection) -> bool {
        Self::should_generate(reflection)
    }

    fn apply(&self, model: &'static ModelDescriptor, reflection: &'static Reflection) {
        // Resolve the colliding attribute's storage name once, at generation
        // time; the public name may be an alias for a differently-named
        // column.
        let storage = model
            .storage_name_of(reflection.name())
            .unwrap_or(reflection.name());

        let setter: SetterFn = Arc::new(move |record: &Record, value: Settable| {
            match value {
                // A raw scalar bypasses association logic entirely.
                Settable::Value(v) => record.write_attribute(storage, v),
                // An instance, or a class handle passed where an instance
                // would go, belongs to the association writer; linking
                // semantics live there.
                value @ (Settable::Record(_) | Settable::Class(_)) => {
                    associations::write(record, reflection, value)
                }
            }
        });

        model.generated_methods().install(reflection.name(), setter);
        tracing::debug!(
            model = model.name(),
            association = reflection.name(),
            column = storage,
            "Installed dual-purpose setter"
        );
    }

    fn declared_options(&self) -> &'static [&'static str] {
        &[]
    }
}

inventory::submit! {
    RegisteredExtension(&RecursiveAssociationExtension)
}

#[cfg(test)]
mod tests {
    use super::*;

    static TARGET: ModelDescriptor = ModelDescriptor::new("Node", "nodes");

    fn target() -> &'static ModelDescriptor {
        &TARGET
    }

    #[test]
    fn test_should_generate_requires_exact_collision() {
        let colliding = Reflection::new("parent", target).foreign_key("parent");
        assert!(RecursiveAssociationExtension::should_generate(&colliding));

        let conventional = Reflection::new("parent", target).foreign_key("parent_id");
        assert!(!RecursiveAssociationExtension::should_generate(
            &conventional
        ));

        let unconfigured = Reflection::new("parent", target);
        assert!(!RecursiveAssociationExtension::should_generate(
            &unconfigured
        ));
    }

    #[test]
    fn test_declares_no_options() {
        assert!(RecursiveAssociationExtension.declared_options().is_empty());
    }
}
