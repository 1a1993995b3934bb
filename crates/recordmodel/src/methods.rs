//! Per-model generated method table.
//!
//! Extensions install setter strategies here instead of generating source
//! text: each entry is a dispatcher function invoked when the public setter
//! of that name is called. The table is created lazily on first use, grows
//! during association building, and is only read afterwards, so it is
//! guarded like any lazily-populated shared cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use recordmodel_core::{Result, Value};

use crate::record::Record;
use crate::settable::Settable;

/// A generated setter: receives the record the method was called on and the
/// single polymorphic argument, returns whatever the underlying writer
/// returned.
pub type SetterFn = Arc<dyn Fn(&Record, Settable) -> Result<Value> + Send + Sync>;

/// The generated-methods namespace of one model class.
pub struct MethodTable {
    methods: RwLock<HashMap<&'static str, SetterFn>>,
}

impl MethodTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            methods: RwLock::new(HashMap::new()),
        }
    }

    /// Install (or redefine) a setter under `name`.
    ///
    /// Redefinition replaces the previous entry; installing an equivalent
    /// setter twice is behaviorally identical to installing it once.
    pub fn install(&self, name: &'static str, setter: SetterFn) {
        self.methods.write().unwrap().insert(name, setter);
    }

    /// Look up a setter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SetterFn> {
        self.methods.read().unwrap().get(name).cloned()
    }

    /// Whether a setter named `name` is installed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.methods.read().unwrap().contains_key(name)
    }

    /// Number of installed setters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.read().unwrap().len()
    }

    /// True if no setter is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
