//! Active Record-style models and associations for Rust.
//!
//! `recordmodel` layers a runtime model system on top of
//! [`recordmodel_core`]: model class descriptors with static attribute and
//! reflection metadata, live [`Record`] instances with dirty-tracked
//! attribute storage, an association writer that owns linking semantics, and
//! an extensible association-builder pipeline.
//!
//! # Role In The Architecture
//!
//! - **Class layer**: [`ModelDescriptor`] is the runtime class object:
//!   metadata, the generated-methods namespace, and the one-time
//!   association build.
//! - **Instance layer**: [`Record`] is a cheap shared handle to one row's
//!   in-memory state; [`Record::set`] is the single public write entry.
//! - **Association layer**: the writer in [`associations`] assigns targets,
//!   maintains foreign keys and inverse caches; the builder pipeline lets
//!   [`associations::BuilderExtension`]s act on every declared reflection.
//! - **Dual-purpose setters**: [`recursive::RecursiveAssociationExtension`]
//!   resolves the name collision between an association and its same-named
//!   foreign-key column by dispatching on what the assigned value is.
//!
//! # Example
//!
//! ```
//! use recordmodel::prelude::*;
//!
//! static ATTRS: [AttributeInfo; 2] = [
//!     AttributeInfo::new("id", ColumnType::BigInt).primary_key(true),
//!     AttributeInfo::new("parent", ColumnType::BigInt).nullable(true),
//! ];
//! static REFLECTIONS: [Reflection; 1] =
//!     [Reflection::new("parent", page).foreign_key("parent")];
//! static PAGE: ModelDescriptor = ModelDescriptor::new("Page", "pages")
//!     .attributes(&ATTRS)
//!     .reflections(&REFLECTIONS);
//! fn page() -> &'static ModelDescriptor {
//!     &PAGE
//! }
//!
//! fn main() -> Result<()> {
//!     let root = Record::new(&PAGE)?;
//!     root.write_attribute("id", Value::BigInt(1))?;
//!
//!     let child = Record::new(&PAGE)?;
//!     // Assigning a record routes through the association writer.
//!     child.set("parent", &root)?;
//!     assert_eq!(child.get("parent"), Some(Value::BigInt(1)));
//!
//!     // Assigning a scalar routes straight to the column.
//!     child.set("parent", 42i64)?;
//!     assert_eq!(child.get("parent"), Some(Value::BigInt(42)));
//!     Ok(())
//! }
//! ```

pub mod associations;
pub mod methods;
pub mod model;
pub mod record;
pub mod recursive;
pub mod reflection;
pub mod settable;

pub use associations::{
    AssociationCache, BuilderExtension, RegisteredExtension, for_each_extension,
    register_extension,
};
pub use methods::{MethodTable, SetterFn};
pub use model::ModelDescriptor;
pub use record::{Record, WeakRecord};
pub use recursive::RecursiveAssociationExtension;
pub use reflection::{ModelRef, Reflection};
pub use settable::Settable;

// Re-export the core contract layer so applications can depend on the
// facade alone.
pub use recordmodel_core::{
    AttributeInfo, AttributeSet, ColumnType, Error, Result, Value,
};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::associations::{BuilderExtension, register_extension};
    pub use crate::model::ModelDescriptor;
    pub use crate::record::{Record, WeakRecord};
    pub use crate::recursive::RecursiveAssociationExtension;
    pub use crate::reflection::{ModelRef, Reflection};
    pub use crate::settable::Settable;
    pub use recordmodel_core::{
        AttributeInfo, ColumnType, Error, Result, Value,
    };
}
