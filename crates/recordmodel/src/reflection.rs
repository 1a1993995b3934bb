//! Association metadata.
//!
//! A `Reflection` describes one declared association: its name, its target
//! model, and its foreign-key configuration. Reflections are defined once as
//! static metadata at model-definition time and are immutable afterwards;
//! the builder pipeline and the association writer only ever read them.

use std::fmt;
use std::sync::OnceLock;

use crate::model::ModelDescriptor;

/// Late-bound handle to a model class.
///
/// A plain `&'static ModelDescriptor` cannot be stored in const metadata for
/// self-referential associations (the static would mention itself), so the
/// target is reached through a function pointer instead.
pub type ModelRef = fn() -> &'static ModelDescriptor;

/// Metadata about one declared association.
pub struct Reflection {
    /// Association name.
    name: &'static str,
    /// The target model class.
    target: ModelRef,
    /// Explicitly configured foreign-key attribute name, if any.
    foreign_key: Option<&'static str>,
    /// Name of the reflection on the target that points back here.
    inverse_of: Option<&'static str>,
    /// Extension-facing option flags, validated by the builder pipeline
    /// against the options registered extensions declare.
    options: &'static [&'static str],
    /// Lazily formatted `{name}_id` fallback.
    default_foreign_key: OnceLock<String>,
}

impl Reflection {
    /// Create a reflection for `name` targeting `target`.
    #[must_use]
    pub const fn new(name: &'static str, target: ModelRef) -> Self {
        Self {
            name,
            target,
            foreign_key: None,
            inverse_of: None,
            options: &[],
            default_foreign_key: OnceLock::new(),
        }
    }

    /// Set the configured foreign-key attribute name.
    #[must_use]
    pub const fn foreign_key(mut self, name: &'static str) -> Self {
        self.foreign_key = Some(name);
        self
    }

    /// Set the inverse reflection name on the target model.
    #[must_use]
    pub const fn inverse_of(mut self, name: &'static str) -> Self {
        self.inverse_of = Some(name);
        self
    }

    /// Set extension-facing option flags.
    #[must_use]
    pub const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    /// The association name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The target model class.
    #[must_use]
    pub fn target(&self) -> &'static ModelDescriptor {
        (self.target)()
    }

    /// The explicitly configured foreign key, if one was given.
    #[must_use]
    pub const fn configured_foreign_key(&self) -> Option<&'static str> {
        self.foreign_key
    }

    /// The inverse reflection name on the target model, if configured.
    #[must_use]
    pub const fn inverse(&self) -> Option<&'static str> {
        self.inverse_of
    }

    /// Extension-facing option flags.
    #[must_use]
    pub const fn extension_options(&self) -> &'static [&'static str] {
        self.options
    }

    /// The effective foreign-key attribute name: the configured one, or the
    /// conventional `{name}_id`.
    #[must_use]
    pub fn foreign_key_or_default(&'static self) -> &'static str {
        match self.foreign_key {
            Some(key) => key,
            None => self
                .default_foreign_key
                .get_or_init(|| format!("{}_id", self.name))
                .as_str(),
        }
    }
}

impl fmt::Debug for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reflection")
            .field("name", &self.name)
            .field("foreign_key", &self.foreign_key)
            .field("inverse_of", &self.inverse_of)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelDescriptor;

    static TARGET: ModelDescriptor = ModelDescriptor::new("Target", "targets");

    fn target() -> &'static ModelDescriptor {
        &TARGET
    }

    static CONFIGURED: Reflection = Reflection::new("parent", target).foreign_key("parent");
    static DEFAULTED: Reflection = Reflection::new("parent", target);

    #[test]
    fn test_builder_chain() {
        let reflection = Reflection::new("owner", target)
            .foreign_key("owner")
            .inverse_of("items");

        assert_eq!(reflection.name(), "owner");
        assert_eq!(reflection.configured_foreign_key(), Some("owner"));
        assert_eq!(reflection.inverse(), Some("items"));
        assert!(reflection.extension_options().is_empty());
        assert!(reflection.target().is(&TARGET));
    }

    #[test]
    fn test_foreign_key_or_default_prefers_configured() {
        assert_eq!(CONFIGURED.foreign_key_or_default(), "parent");
    }

    #[test]
    fn test_foreign_key_defaults_to_name_id() {
        assert_eq!(DEFAULTED.foreign_key_or_default(), "parent_id");
        assert_eq!(DEFAULTED.configured_foreign_key(), None);
    }
}
