//! Core types for the evaluation engine.

use crate::runner::ds::array_object::PropertyKey;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;

/// Completion record.
/// Every statement evaluation returns one; scripts have no abrupt
/// completions other than errors, which travel as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// The value, if any.
    pub value: Option<JsValue>,
}

impl Completion {
    /// Create a normal completion with no value.
    pub fn normal() -> Self {
        Completion { value: None }
    }

    /// Create a normal completion with a value.
    pub fn normal_with_value(value: JsValue) -> Self {
        Completion { value: Some(value) }
    }

    /// Get the value, or undefined if none.
    pub fn get_value(&self) -> JsValue {
        self.value.clone().unwrap_or(JsValue::Undefined)
    }

    /// Keep the previous value when this completion is empty, so a script's
    /// result is its last value-producing statement.
    pub fn update_empty(self, previous: Option<JsValue>) -> Self {
        match self.value {
            Some(_) => self,
            None => Completion { value: previous },
        }
    }
}

/// Resolved target of an assignment or `delete`.
#[derive(Debug, Clone)]
pub enum Reference {
    /// A script-level binding.
    Binding(String),
    /// A property on a value.
    Property { base: JsValue, key: PropertyKey },
}

/// Result type for evaluation operations.
pub type EvalResult = Result<Completion, JErrorType>;

/// Result type for value-returning operations.
pub type ValueResult = Result<JsValue, JErrorType>;

/// Result type for reference-returning operations.
pub type ReferenceResult = Result<Reference, JErrorType>;
