//! Host-side array object.
//!
//! A `JsArrayObject` is a [`Sequence`] of values plus a bag of named
//! properties. Keys are routed by [`PropertyKey`]: array indices go to the
//! sequence, everything else (including `"4294967295"`) is a named property
//! and never touches `length`.

use std::collections::HashMap;
use std::fmt;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::relative_index::MAX_INDEX;
use crate::runner::ds::operations::type_conversion::{
    canonical_array_index, to_f64, to_number, to_string,
};
use crate::runner::ds::sequence::Sequence;
use crate::runner::ds::storage::StorageConfig;
use crate::runner::ds::value::{JsNumberType, JsValue};

lazy_static! {
    pub static ref ARRAY_LENGTH_PROP: PropertyKey = PropertyKey::Str("length".to_string());
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Index(u32),
    Str(String),
}
impl PropertyKey {
    pub fn from_name(name: &str) -> Self {
        match canonical_array_index(name) {
            Some(idx) => PropertyKey::Index(idx),
            None => PropertyKey::Str(name.to_string()),
        }
    }

    pub fn from_value(v: &JsValue) -> Result<Self, JErrorType> {
        if let JsValue::Number(n) = v {
            let f = n.to_f64();
            if f >= 0.0 && f.fract() == 0.0 && f <= MAX_INDEX as f64 {
                return Ok(PropertyKey::Index(f as u32));
            }
        }
        Ok(PropertyKey::from_name(&to_string(v)?))
    }
}
impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Index(i) => write!(f, "{}", i),
            PropertyKey::Str(s) => write!(f, "{}", s),
        }
    }
}

pub struct JsArrayObject {
    elements: Sequence<JsValue>,
    properties: HashMap<String, JsValue>,
}

impl JsArrayObject {
    pub fn new(config: StorageConfig) -> Self {
        Self::from_sequence(Sequence::with_config(config))
    }

    pub fn from_sequence(elements: Sequence<JsValue>) -> Self {
        JsArrayObject {
            elements,
            properties: HashMap::new(),
        }
    }

    pub fn elements(&self) -> &Sequence<JsValue> {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Sequence<JsValue> {
        &mut self.elements
    }

    pub fn length(&self) -> u32 {
        self.elements.len()
    }

    /// Holes and missing named properties read as `undefined`.
    pub fn get(&self, key: &PropertyKey) -> JsValue {
        if *key == *ARRAY_LENGTH_PROP {
            return JsValue::Number(JsNumberType::Integer(self.length() as i64));
        }
        let value = match key {
            PropertyKey::Index(idx) => self.elements.get(*idx),
            PropertyKey::Str(name) => self.properties.get(name),
        };
        value.cloned().unwrap_or(JsValue::Undefined)
    }

    pub fn has_property(&self, key: &PropertyKey) -> bool {
        match key {
            PropertyKey::Index(idx) => self.elements.get(*idx).is_some(),
            PropertyKey::Str(name) => {
                *key == *ARRAY_LENGTH_PROP || self.properties.contains_key(name)
            }
        }
    }

    pub fn define_own_property(
        &mut self,
        key: PropertyKey,
        value: JsValue,
    ) -> Result<(), JErrorType> {
        if key == *ARRAY_LENGTH_PROP {
            return array_set_length(self, &value);
        }
        match key {
            PropertyKey::Index(idx) => {
                self.elements.set(idx, value)?;
            }
            PropertyKey::Str(name) => {
                self.properties.insert(name, value);
            }
        }
        Ok(())
    }

    /// `length` cannot be deleted; everything else can.
    pub fn delete(&mut self, key: &PropertyKey) -> bool {
        if *key == *ARRAY_LENGTH_PROP {
            return false;
        }
        match key {
            PropertyKey::Index(idx) => {
                self.elements.delete(*idx);
            }
            PropertyKey::Str(name) => {
                self.properties.remove(name);
            }
        }
        true
    }
}

/// Assigns `length`. The value must convert to an integer in
/// `0 ..= 2^32 - 1` without loss, otherwise it is a `RangeError`.
pub fn array_set_length(array: &mut JsArrayObject, value: &JsValue) -> Result<(), JErrorType> {
    let requested = to_number(value)?;
    array
        .elements
        .set_length(requested.to_f64())
        .map_err(|_| JErrorType::RangeError(format!("Invalid array length {}", requested)))
}

/// `new Array(len)` for a numeric `len`.
pub fn array_create(length: &JsValue, config: StorageConfig) -> Result<JsArrayObject, JErrorType> {
    let mut array = JsArrayObject::new(config);
    let requested = to_f64(length)?;
    array
        .elements
        .set_length(requested)
        .map_err(|_| JErrorType::RangeError(format!("Invalid array length {}", length)))?;
    Ok(array)
}
