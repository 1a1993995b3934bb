//! The association-builder pipeline and its extension registry.
//!
//! Whenever a model class is built, every registered extension is consulted
//! for every declared reflection. The registry is process-wide and
//! append-only: extensions compiled into the binary register at load time
//! through `inventory`, applications can append more at bootstrap through
//! [`register_extension`]. There is no removal API. Extensions run in
//! registration order, but none may assume it runs first or last.

use std::sync::{Arc, OnceLock, RwLock};

use recordmodel_core::{AssociationErrorKind, Error, Result};

use crate::model::ModelDescriptor;
use crate::reflection::Reflection;

/// A generator consulted whenever an association is built.
///
/// Extensions are pure observers of reflection metadata: an extension that
/// is not interested in a reflection reports ineligibility and is skipped.
/// That is a silent no-op, not a failure.
pub trait BuilderExtension: Send + Sync {
    /// Whether this extension wants to act on `reflection`.
    fn eligible_for(&self, reflection: &Reflection) -> bool;

    /// Act on an eligible reflection, typically by installing a generated
    /// method on `model`. Called at most once per reflection by the
    /// pipeline; a second call must be behaviorally idempotent.
    fn apply(&self, model: &'static ModelDescriptor, reflection: &'static Reflection);

    /// Reflection options this extension understands. The pipeline rejects
    /// any reflection option no registered extension declares.
    fn declared_options(&self) -> &'static [&'static str] {
        &[]
    }
}

/// A load-time registry entry.
pub struct RegisteredExtension(pub &'static dyn BuilderExtension);

inventory::collect!(RegisteredExtension);

/// Extensions appended at runtime, after load.
fn runtime_extensions() -> &'static RwLock<Vec<Arc<dyn BuilderExtension>>> {
    static EXTENSIONS: OnceLock<RwLock<Vec<Arc<dyn BuilderExtension>>>> = OnceLock::new();
    EXTENSIONS.get_or_init(|| RwLock::new(Vec::new()))
}

/// Append an extension to the process-wide registry.
///
/// Call during application bootstrap, before the first model is built;
/// models already built will not see the new extension.
pub fn register_extension(extension: Arc<dyn BuilderExtension>) {
    runtime_extensions().write().unwrap().push(extension);
}

/// Visit every registered extension in registration order: load-time
/// entries first, then runtime-registered ones.
pub fn for_each_extension(mut f: impl FnMut(&dyn BuilderExtension)) {
    for entry in inventory::iter::<RegisteredExtension> {
        f(entry.0);
    }
    for extension in runtime_extensions().read().unwrap().iter() {
        f(extension.as_ref());
    }
}

/// Build every declared association of `model`.
///
/// Validates each reflection's extension options against what registered
/// extensions declare, then gives every extension a chance to act on every
/// reflection it reports eligibility for.
pub(crate) fn build_associations(model: &'static ModelDescriptor) -> Result<()> {
    tracing::debug!(
        model = model.name(),
        reflections = model.reflection_infos().len(),
        "Building associations"
    );

    for reflection in model.reflection_infos() {
        validate_options(reflection)?;
        for_each_extension(|extension| {
            if extension.eligible_for(reflection) {
                extension.apply(model, reflection);
            }
        });
    }
    Ok(())
}

/// Reject any reflection option no registered extension declares.
fn validate_options(reflection: &'static Reflection) -> Result<()> {
    for option in reflection.extension_options() {
        let mut declared = false;
        for_each_extension(|extension| {
            declared = declared || extension.declared_options().contains(option);
        });
        if !declared {
            return Err(Error::association(
                AssociationErrorKind::InvalidOption,
                reflection.name(),
                format!("unknown option `{option}`"),
            ));
        }
    }
    Ok(())
}
