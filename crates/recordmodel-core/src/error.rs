//! Error types shared across the recordmodel crates.
//!
//! The taxonomy mirrors the two writer seams: the raw attribute writer fails
//! with `TypeCast` or `Validation`, the association writer fails with
//! `Association` or `Persistence`. Dispatch layers never wrap or translate
//! these; whatever a writer raises is what the caller sees.

use std::fmt;

use crate::value::Value;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A value could not be cast to the column's type.
    TypeCast(TypeCastError),
    /// A value was rejected by attribute-level validation.
    Validation(ValidationError),
    /// An association assignment was rejected.
    Association(AssociationError),
    /// The record cannot be written in its current state.
    Persistence(PersistenceError),
    /// No attribute with the given name exists on the model.
    UnknownAttribute {
        /// Model name.
        model: String,
        /// The attribute name that failed to resolve.
        name: String,
    },
}

/// Failure to coerce a value into a column type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCastError {
    /// Storage name of the column being written.
    pub column: String,
    /// SQL name of the expected type.
    pub expected: &'static str,
    /// The offending value.
    pub value: Value,
    /// Human-readable detail.
    pub message: String,
}

/// What kind of validation rejected the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// NULL written to a NOT NULL column.
    NotNull,
    /// Text value did not match the column's pattern.
    Pattern,
}

/// A value was rejected by attribute-level validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Which rule rejected the value.
    pub kind: ValidationErrorKind,
    /// Storage name of the column being written.
    pub column: String,
    /// Human-readable detail.
    pub message: String,
}

/// What went wrong while assigning an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationErrorKind {
    /// The assigned value is not an instance of the association's target.
    TypeMismatch,
    /// No association with the given name is declared.
    UnknownAssociation,
    /// A reflection carried an option no registered extension declares.
    InvalidOption,
}

/// An association assignment was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationError {
    /// Which rule rejected the assignment.
    pub kind: AssociationErrorKind,
    /// Name of the association involved.
    pub association: String,
    /// Human-readable detail.
    pub message: String,
}

/// Why the record could not be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorKind {
    /// The record was marked readonly.
    ReadonlyRecord,
    /// The model declares no primary key attribute.
    MissingPrimaryKey,
}

/// The record cannot be written in its current state.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceError {
    /// Which rule rejected the write.
    pub kind: PersistenceErrorKind,
    /// Name of the model involved.
    pub model: String,
    /// Human-readable detail.
    pub message: String,
}

impl Error {
    /// Build a `TypeCast` error.
    pub fn type_cast(
        column: impl Into<String>,
        expected: &'static str,
        value: Value,
        message: impl Into<String>,
    ) -> Self {
        Error::TypeCast(TypeCastError {
            column: column.into(),
            expected,
            value,
            message: message.into(),
        })
    }

    /// Build a `Validation` error.
    pub fn validation(
        kind: ValidationErrorKind,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Validation(ValidationError {
            kind,
            column: column.into(),
            message: message.into(),
        })
    }

    /// Build an `Association` error.
    pub fn association(
        kind: AssociationErrorKind,
        association: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Association(AssociationError {
            kind,
            association: association.into(),
            message: message.into(),
        })
    }

    /// Build a `Persistence` error.
    pub fn persistence(
        kind: PersistenceErrorKind,
        model: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Persistence(PersistenceError {
            kind,
            model: model.into(),
            message: message.into(),
        })
    }

    /// Build an `UnknownAttribute` error.
    pub fn unknown_attribute(model: impl Into<String>, name: impl Into<String>) -> Self {
        Error::UnknownAttribute {
            model: model.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeCast(e) => write!(
                f,
                "cannot cast {} to {} for column `{}`: {}",
                e.value.kind_name(),
                e.expected,
                e.column,
                e.message
            ),
            Error::Validation(e) => {
                write!(f, "validation failed for column `{}`: {}", e.column, e.message)
            }
            Error::Association(e) => write!(
                f,
                "association `{}` assignment failed: {}",
                e.association, e.message
            ),
            Error::Persistence(e) => {
                write!(f, "cannot write record of `{}`: {}", e.model, e.message)
            }
            Error::UnknownAttribute { model, name } => {
                write!(f, "unknown attribute `{}` on model `{}`", name, model)
            }
        }
    }
}

impl std::error::Error for Error {}
