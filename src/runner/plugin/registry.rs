//! Built-in registry for managing built-in objects.

use std::collections::HashMap;

use super::types::{BuiltInFn, BuiltInObject};
use crate::runner::std_lib::register_core_builtins;

/// Name of the object holding global functions such as `print`.
pub const GLOBAL_OBJECT: &str = "globalThis";

/// Error type for registry and configuration operations.
#[derive(Debug)]
pub enum PluginError {
    /// Configuration file could not be read or parsed.
    ConfigError(String),
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for PluginError {}

/// Registry for built-in objects.
pub struct BuiltInRegistry {
    objects: HashMap<String, BuiltInObject>,
}

impl BuiltInRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltInRegistry {
            objects: HashMap::new(),
        }
    }

    /// Create a registry with core built-ins (`Array`, `console`, `print`).
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        register_core_builtins(&mut registry);
        registry
    }

    pub fn register_object(&mut self, obj: BuiltInObject) {
        self.objects.insert(obj.name.clone(), obj);
    }

    pub fn get_method(&self, object: &str, method: &str) -> Option<&BuiltInFn> {
        self.objects
            .get(object)
            .and_then(|obj| obj.methods.get(method))
    }

    pub fn get_constructor(&self, object: &str) -> Option<&BuiltInFn> {
        self.objects
            .get(object)
            .and_then(|obj| obj.constructor.as_ref())
    }

    /// A global function such as `print`.
    pub fn get_global_function(&self, name: &str) -> Option<&BuiltInFn> {
        self.get_method(GLOBAL_OBJECT, name)
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        Self::with_core()
    }
}
