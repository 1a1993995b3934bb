//! Attribute (column) metadata.
//!
//! Attributes are defined once per model as static metadata and consulted by
//! attribute storage for casting, validation, and name resolution. The public
//! name callers use may differ from the storage name the column is kept
//! under, either because `column` renames it or because `alias` adds a second
//! public name.

use crate::types::ColumnType;

/// Metadata about one model attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    /// Public attribute name.
    pub name: &'static str,
    /// Storage (column) name; defaults to `name`.
    pub column_name: &'static str,
    /// The column's SQL type.
    pub column_type: ColumnType,
    /// Whether NULL is an acceptable stored value.
    pub nullable: bool,
    /// Whether this attribute is the primary key.
    pub primary_key: bool,
    /// Alternative public name accepted on reads and writes.
    pub alias: Option<&'static str>,
    /// Regex a `Text` value must match to be written.
    pub pattern: Option<&'static str>,
}

impl AttributeInfo {
    /// Create a new attribute with the storage name equal to `name`.
    #[must_use]
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_name: name,
            column_type,
            nullable: false,
            primary_key: false,
            alias: None,
            pattern: None,
        }
    }

    /// Set the storage (column) name.
    #[must_use]
    pub const fn column(mut self, name: &'static str) -> Self {
        self.column_name = name;
        self
    }

    /// Set the nullable flag.
    #[must_use]
    pub const fn nullable(mut self, value: bool) -> Self {
        self.nullable = value;
        self
    }

    /// Set the primary-key flag.
    #[must_use]
    pub const fn primary_key(mut self, value: bool) -> Self {
        self.primary_key = value;
        self
    }

    /// Set an alias accepted as an alternative public name.
    #[must_use]
    pub const fn alias(mut self, name: &'static str) -> Self {
        self.alias = Some(name);
        self
    }

    /// Require `Text` values to match `pattern`.
    #[must_use]
    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// The name the value is stored under.
    #[must_use]
    pub const fn storage_name(&self) -> &'static str {
        self.column_name
    }

    /// Whether `input` addresses this attribute publicly (name or alias).
    #[must_use]
    pub fn matches_public_name(&self, input: &str) -> bool {
        input == self.name || self.alias == Some(input)
    }
}
