//! Core types shared by the evaluator and the built-ins.

use std::collections::HashMap;
use std::rc::Rc;

use super::config::HarnessConfig;
use super::registry::BuiltInRegistry;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::storage::StorageConfig;
use crate::runner::ds::value::JsValue;

/// Execution context passed to native functions.
pub struct EvalContext {
    /// Script-level `var` bindings.
    globals: HashMap<String, JsValue>,
    pub registry: Rc<BuiltInRegistry>,
    /// Storage settings for every array the script creates.
    pub storage: StorageConfig,
    /// Lines written by `print` and `console.log`.
    output: Vec<String>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::with_registry(BuiltInRegistry::with_core(), StorageConfig::default())
    }

    pub fn with_registry(registry: BuiltInRegistry, storage: StorageConfig) -> Self {
        EvalContext {
            globals: HashMap::new(),
            registry: Rc::new(registry),
            storage,
            output: Vec::new(),
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::with_registry(BuiltInRegistry::with_core(), config.storage)
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    pub fn get_binding(&self, name: &str) -> Result<JsValue, JErrorType> {
        self.globals
            .get(name)
            .cloned()
            .ok_or_else(|| JErrorType::ReferenceError(format!("{} is not defined", name)))
    }

    /// `var name;` keeps an existing value, like a redeclaration does.
    pub fn declare_binding(&mut self, name: &str) {
        self.globals
            .entry(name.to_string())
            .or_insert(JsValue::Undefined);
    }

    pub fn set_binding(&mut self, name: &str, value: JsValue) {
        self.globals.insert(name.to_string(), value);
    }

    pub fn write_line(&mut self, line: String) {
        self.output.push(line);
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Drains the buffered output lines.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Function signature for built-in methods.
/// Native functions receive the evaluation context, `this` value, and arguments.
pub type NativeFn = fn(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType>;

/// Built-in function.
pub enum BuiltInFn {
    /// Direct function pointer for compiled-in functions.
    Native(NativeFn),
}

impl BuiltInFn {
    pub fn call(
        &self,
        ctx: &mut EvalContext,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JErrorType> {
        match self {
            BuiltInFn::Native(f) => f(ctx, this, args),
        }
    }
}

/// Built-in object definition, e.g. `Array` or `console`.
pub struct BuiltInObject {
    pub name: String,

    /// Methods, looked up by name at call time.
    pub methods: HashMap<String, BuiltInFn>,

    /// Called for `new Name(..)` and `Name(..)`.
    pub constructor: Option<BuiltInFn>,
}

impl BuiltInObject {
    pub fn new(name: impl Into<String>) -> Self {
        BuiltInObject {
            name: name.into(),
            methods: HashMap::new(),
            constructor: None,
        }
    }

    pub fn add_method(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.methods.insert(name.into(), BuiltInFn::Native(func));
        self
    }

    pub fn with_constructor(mut self, constructor: NativeFn) -> Self {
        self.constructor = Some(BuiltInFn::Native(constructor));
        self
    }
}
