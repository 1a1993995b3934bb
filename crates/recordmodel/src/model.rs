//! Model class descriptors.
//!
//! A `ModelDescriptor` is the runtime "class object" of a model: static
//! attribute and reflection metadata plus the per-class generated-methods
//! namespace. Descriptors are declared as `static` items; class identity is
//! pointer identity.

use std::fmt;
use std::sync::OnceLock;

use recordmodel_core::{AttributeInfo, Result};

use crate::associations::builder;
use crate::methods::MethodTable;
use crate::reflection::Reflection;

/// Static metadata and per-class runtime state for one model.
pub struct ModelDescriptor {
    /// Model name.
    name: &'static str,
    /// Backing table name.
    table_name: &'static str,
    /// Attribute metadata.
    attributes: &'static [AttributeInfo],
    /// Declared associations.
    reflections: &'static [Reflection],
    /// Generated-methods namespace, created lazily on first use.
    methods: OnceLock<MethodTable>,
    /// Outcome of the one-time association build.
    build_state: OnceLock<Result<()>>,
}

impl ModelDescriptor {
    /// Create a descriptor with no attributes or reflections.
    #[must_use]
    pub const fn new(name: &'static str, table_name: &'static str) -> Self {
        Self {
            name,
            table_name,
            attributes: &[],
            reflections: &[],
            methods: OnceLock::new(),
            build_state: OnceLock::new(),
        }
    }

    /// Set the attribute metadata.
    #[must_use]
    pub const fn attributes(mut self, attributes: &'static [AttributeInfo]) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the declared associations.
    #[must_use]
    pub const fn reflections(mut self, reflections: &'static [Reflection]) -> Self {
        self.reflections = reflections;
        self
    }

    /// The model name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The backing table name.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        self.table_name
    }

    /// All attribute metadata.
    #[must_use]
    pub const fn attribute_infos(&self) -> &'static [AttributeInfo] {
        self.attributes
    }

    /// All declared reflections.
    #[must_use]
    pub const fn reflection_infos(&self) -> &'static [Reflection] {
        self.reflections
    }

    /// Class identity: descriptors are compared by pointer.
    #[must_use]
    pub fn is(&self, other: &ModelDescriptor) -> bool {
        std::ptr::eq(self, other)
    }

    /// Find an attribute by public name (name or alias).
    #[must_use]
    pub fn attribute(&self, public_name: &str) -> Option<&'static AttributeInfo> {
        self.attributes
            .iter()
            .find(|a| a.matches_public_name(public_name))
    }

    /// Find an attribute by storage name.
    #[must_use]
    pub fn attribute_by_storage(&self, storage_name: &str) -> Option<&'static AttributeInfo> {
        self.attributes
            .iter()
            .find(|a| a.storage_name() == storage_name)
    }

    /// Resolve a public attribute name to the name its value is stored
    /// under.
    #[must_use]
    pub fn storage_name_of(&self, public_name: &str) -> Option<&'static str> {
        self.attribute(public_name).map(|a| a.storage_name())
    }

    /// The primary-key attribute, if one is declared.
    #[must_use]
    pub fn primary_key(&self) -> Option<&'static AttributeInfo> {
        self.attributes.iter().find(|a| a.primary_key)
    }

    /// Find a reflection by association name.
    #[must_use]
    pub fn find_reflection(&self, name: &str) -> Option<&'static Reflection> {
        self.reflections.iter().find(|r| r.name() == name)
    }

    /// The generated-methods namespace for this class.
    #[must_use]
    pub fn generated_methods(&self) -> &MethodTable {
        self.methods.get_or_init(MethodTable::new)
    }

    /// Run the association-builder pipeline for this class.
    ///
    /// The pipeline runs at most once per descriptor; later calls return the
    /// recorded outcome. Building validates reflection options and lets every
    /// registered extension inspect each reflection.
    pub fn build(&'static self) -> Result<()> {
        self.build_state
            .get_or_init(|| builder::build_associations(self))
            .clone()
    }
}

impl PartialEq for ModelDescriptor {
    /// Class identity: descriptors are compared by pointer.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for ModelDescriptor {}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("name", &self.name)
            .field("table_name", &self.table_name)
            .field("attributes", &self.attributes.len())
            .field("reflections", &self.reflections.len())
            .finish_non_exhaustive()
    }
}
