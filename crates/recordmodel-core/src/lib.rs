//! Core types for recordmodel.
//!
//! `recordmodel-core` is the contract layer the rest of the workspace builds
//! on. It defines the scalar [`Value`] model, the [`Error`] taxonomy shared
//! by every writer seam, attribute metadata, and per-instance attribute
//! storage with dirty tracking.
//!
//! # Role In The Architecture
//!
//! - **Data model**: `Value` and `ColumnType` represent column content and
//!   casting between Rust scalars and SQL types.
//! - **Attribute storage**: `AttributeSet` is the raw attribute writer
//!   (cast, validate, dirty-track, store), addressed by storage name only.
//! - **Errors**: the `TypeCast`/`Validation`/`Association`/`Persistence`
//!   taxonomy is defined here so both writer seams fail with the same types.
//!
//! The `recordmodel` facade layers model descriptors, reflections, records,
//! and the association machinery on top of this crate.

pub mod attribute;
pub mod attributes;
pub mod error;
pub mod types;
pub mod validate;
pub mod value;

pub use attribute::AttributeInfo;
pub use attributes::AttributeSet;
pub use error::{
    AssociationError, AssociationErrorKind, Error, PersistenceError, PersistenceErrorKind, Result,
    TypeCastError, ValidationError, ValidationErrorKind,
};
pub use types::ColumnType;
pub use validate::matches_pattern;
pub use value::Value;
