use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::relative_index::MAX_INDEX;
use crate::runner::ds::value::{JsArrayRef, JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";

/// Longest string `join` will build.
pub const MAX_STRING_LENGTH: u64 = (1 << 29) - 24;

pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Array(_) => TYPE_STR_OBJECT,
    }
}

pub fn to_number(v: &JsValue) -> Result<JsNumberType, JErrorType> {
    Ok(match v {
        JsValue::Undefined => JsNumberType::NaN,
        JsValue::Null => JsNumberType::Integer(0),
        JsValue::Boolean(b) => JsNumberType::Integer(match *b {
            true => 1,
            false => 0,
        }),
        JsValue::String(s) => JsNumberType::from_f64(string_to_number(s)),
        JsValue::Number(n) => n.clone(),
        JsValue::Array(_) => JsNumberType::from_f64(string_to_number(&to_string(v)?)),
    })
}

/// `to_number` as a plain `f64`, the form the sequence operations take.
pub fn to_f64(v: &JsValue) -> Result<f64, JErrorType> {
    Ok(to_number(v)?.to_f64())
}

pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in &[("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return match u64::from_str_radix(digits, *radix) {
                Ok(n) => n as f64,
                Err(_) => f64::NAN,
            };
        }
    }
    // Rust also accepts "inf" and "nan", which are not numeric literals here.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn to_string(v: &JsValue) -> Result<String, JErrorType> {
    to_string_guarded(v, &mut Vec::new())
}

fn to_string_guarded(v: &JsValue, seen: &mut Vec<JsArrayRef>) -> Result<String, JErrorType> {
    Ok(match v {
        JsValue::Undefined => TYPE_STR_UNDEFINED.to_string(),
        JsValue::Null => TYPE_STR_NULL.to_string(),
        JsValue::Boolean(b) => b.to_string(),
        JsValue::String(s) => s.clone(),
        JsValue::Number(n) => n.to_string(),
        JsValue::Array(a) => join_guarded(a, ",", seen)?,
    })
}

/// `Array.prototype.join`: holes, `undefined` and `null` become empty
/// strings. An array that contains itself joins to an empty string at the
/// point of recursion.
pub fn join_array(array: &JsArrayRef, separator: &str) -> Result<String, JErrorType> {
    join_guarded(array, separator, &mut Vec::new())
}

fn join_guarded(
    array: &JsArrayRef,
    separator: &str,
    seen: &mut Vec<JsArrayRef>,
) -> Result<String, JErrorType> {
    if seen.iter().any(|s| Rc::ptr_eq(s, array)) {
        return Ok(String::new());
    }
    let a = array.borrow();
    let elements = a.elements();
    let length = elements.len();
    if length == 0 {
        return Ok(String::new());
    }
    if (length as u64 - 1) * separator.len() as u64 > MAX_STRING_LENGTH {
        return Err(JErrorType::RangeError("Invalid string length".to_string()));
    }

    seen.push(array.clone());
    let mut out = String::new();
    let mut separators = 0;
    for (index, value) in elements.entries() {
        out.push_str(&separator.repeat((index - separators) as usize));
        separators = index;
        match value {
            JsValue::Undefined | JsValue::Null => {}
            v => out.push_str(&to_string_guarded(v, seen)?),
        }
        if out.len() as u64 > MAX_STRING_LENGTH {
            seen.pop();
            return Err(JErrorType::RangeError("Invalid string length".to_string()));
        }
    }
    out.push_str(&separator.repeat((length - 1 - separators) as usize));
    seen.pop();
    Ok(out)
}

/// Parses `s` as an array index: the canonical decimal form of an integer in
/// `0 ..= 2^32 - 2`. `"4294967295"` is a valid number but not an index.
pub fn canonical_array_index(s: &str) -> Option<u32> {
    if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.parse::<u64>() {
        Ok(n) if n <= MAX_INDEX as u64 => Some(n as u32),
        _ => None,
    }
}
