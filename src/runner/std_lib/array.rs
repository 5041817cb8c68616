//! Array built-in.
//!
//! Provides the Array constructor and the methods scripts call on arrays.
//! Arguments are converted with ToNumber here so the sequence operations
//! only ever see `f64` positions.

use std::cell::Ref;

use crate::runner::ds::array_object::{array_create, JsArrayObject};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::relative_index::relative_start;
use crate::runner::ds::operations::type_conversion::{join_array, to_f64, to_string};
use crate::runner::ds::sequence::{ConcatArg, Sequence};
use crate::runner::ds::value::{JsArrayRef, JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

/// Register the Array built-in with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let array = BuiltInObject::new("Array")
        .with_constructor(array_constructor)
        .add_method("push", array_push)
        .add_method("pop", array_pop)
        .add_method("shift", array_shift)
        .add_method("unshift", array_unshift)
        .add_method("slice", array_slice)
        .add_method("splice", array_splice)
        .add_method("concat", array_concat)
        .add_method("indexOf", array_index_of)
        .add_method("includes", array_includes)
        .add_method("join", array_join)
        .add_method("reverse", array_reverse)
        .add_method("isArray", is_array);

    registry.register_object(array);
}

fn this_array(this: &JsValue, method: &str) -> Result<JsArrayRef, JErrorType> {
    match this {
        JsValue::Array(a) => Ok(a.clone()),
        _ => Err(JErrorType::TypeError(format!(
            "Array.prototype.{} called on non-array",
            method
        ))),
    }
}

/// The argument at `index` as a number, or `None` when it was not passed.
fn number_arg(args: &[JsValue], index: usize) -> Result<Option<f64>, JErrorType> {
    match args.get(index) {
        Some(v) => Ok(Some(to_f64(v)?)),
        None => Ok(None),
    }
}

/// Like [`number_arg`], but an explicit `undefined` also counts as absent.
fn optional_number_arg(args: &[JsValue], index: usize) -> Result<Option<f64>, JErrorType> {
    match args.get(index) {
        Some(JsValue::Undefined) | None => Ok(None),
        Some(v) => Ok(Some(to_f64(v)?)),
    }
}

fn new_array_value(elements: Sequence<JsValue>) -> JsValue {
    JsValue::new_array(JsArrayObject::from_sequence(elements))
}

fn length_value(length: u32) -> JsValue {
    JsValue::Number(JsNumberType::Integer(length as i64))
}

/// `new Array(len)` makes `len` holes; any other argument list becomes the
/// elements.
fn array_constructor(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    if let [len @ JsValue::Number(_)] = args.as_slice() {
        return Ok(JsValue::new_array(array_create(len, ctx.storage)?));
    }
    Ok(new_array_value(Sequence::from_values_with_config(
        args,
        ctx.storage,
    )))
}

/// Array.prototype.push
fn array_push(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "push")?;
    let mut array = array.borrow_mut();
    let elements = array.elements_mut();
    if elements.len() as u64 + args.len() as u64 > u32::MAX as u64 {
        return Err(JErrorType::TypeError(
            "Pushing elements past the maximum array length".to_string(),
        ));
    }
    for value in args {
        elements.push(value)?;
    }
    Ok(length_value(elements.len()))
}

/// Array.prototype.pop
fn array_pop(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "pop")?;
    let popped = array.borrow_mut().elements_mut().pop();
    Ok(popped.unwrap_or(JsValue::Undefined))
}

/// Array.prototype.shift
fn array_shift(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "shift")?;
    let shifted = array.borrow_mut().elements_mut().shift();
    Ok(shifted.unwrap_or(JsValue::Undefined))
}

/// Array.prototype.unshift
fn array_unshift(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "unshift")?;
    let length = array.borrow_mut().elements_mut().unshift(args)?;
    Ok(length_value(length))
}

/// Array.prototype.slice
fn array_slice(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "slice")?;
    let start = number_arg(&args, 0)?;
    let end = optional_number_arg(&args, 1)?;
    let sliced = array.borrow().elements().slice(start, end);
    Ok(new_array_value(sliced))
}

/// Array.prototype.splice
fn array_splice(
    _ctx: &mut EvalContext,
    this: JsValue,
    mut args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "splice")?;
    let start = number_arg(&args, 0)?;
    let delete_count = number_arg(&args, 1)?;
    let items = if args.len() > 2 {
        args.split_off(2)
    } else {
        Vec::new()
    };
    let removed = array
        .borrow_mut()
        .elements_mut()
        .splice(start, delete_count, items)?;
    Ok(new_array_value(removed))
}

/// Array.prototype.concat
///
/// Array arguments are spread slot by slot, holes included; anything else
/// is appended as one element.
fn array_concat(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "concat")?;
    let this_ref = array.borrow();
    let borrowed: Vec<Option<Ref<'_, JsArrayObject>>> = args
        .iter()
        .map(|arg| match arg {
            JsValue::Array(a) => Some(a.borrow()),
            _ => None,
        })
        .collect();
    let concat_args = args
        .iter()
        .zip(borrowed.iter())
        .map(|(arg, spread)| match spread {
            Some(other) => ConcatArg::Spread(other.elements()),
            None => ConcatArg::Value(arg.clone()),
        })
        .collect();
    let joined = this_ref.elements().concat(concat_args)?;
    Ok(new_array_value(joined))
}

/// Resolves the `fromIndex` argument shared by `indexOf` and `includes`.
fn search_start(args: &[JsValue], length: u32) -> Result<u32, JErrorType> {
    Ok(match number_arg(args, 1)? {
        Some(from) => relative_start(from, length),
        None => 0,
    })
}

/// Array.prototype.indexOf
///
/// Strict equality; holes are skipped and `NaN` is never found.
fn array_index_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "indexOf")?;
    let array = array.borrow();
    let elements = array.elements();
    let search = args.first().cloned().unwrap_or(JsValue::Undefined);
    let from = search_start(&args, elements.len())?;
    let found = elements
        .entries()
        .skip_while(|(i, _)| *i < from)
        .find(|(_, v)| **v == search)
        .map(|(i, _)| i as i64)
        .unwrap_or(-1);
    Ok(JsValue::integer(found))
}

/// Array.prototype.includes
///
/// SameValueZero, so `NaN` finds `NaN`. Holes read as `undefined`.
fn array_includes(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "includes")?;
    let array = array.borrow();
    let elements = array.elements();
    let search = args.first().cloned().unwrap_or(JsValue::Undefined);
    let from = search_start(&args, elements.len())?;

    let mut present_in_range: u64 = 0;
    for (_, value) in elements.entries().skip_while(|(i, _)| *i < from) {
        if same_value_zero(value, &search) {
            return Ok(JsValue::Boolean(true));
        }
        present_in_range += 1;
    }
    let range = (elements.len() - from) as u64;
    let has_hole = present_in_range < range;
    Ok(JsValue::Boolean(
        matches!(search, JsValue::Undefined) && has_hole,
    ))
}

fn same_value_zero(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Number(x), JsValue::Number(y)) => {
            let (x, y) = (x.to_f64(), y.to_f64());
            x == y || (x.is_nan() && y.is_nan())
        }
        _ => a == b,
    }
}

/// Array.prototype.join
fn array_join(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "join")?;
    let separator = match args.first() {
        Some(JsValue::Undefined) | None => ",".to_string(),
        Some(sep) => to_string(sep)?,
    };
    Ok(JsValue::String(join_array(&array, &separator)?))
}

/// Array.prototype.reverse
fn array_reverse(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let array = this_array(&this, "reverse")?;
    array.borrow_mut().elements_mut().reverse();
    Ok(this)
}

/// Array.isArray - Check if value is an array.
fn is_array(
    _ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    Ok(JsValue::Boolean(matches!(args.first(), Some(JsValue::Array(_)))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array_of(values: Vec<i64>) -> JsValue {
        new_array_value(Sequence::from_values(
            values.into_iter().map(JsValue::integer).collect::<Vec<_>>(),
        ))
    }

    fn joined(v: &JsValue) -> String {
        match v {
            JsValue::Array(a) => join_array(a, ",").unwrap(),
            other => panic!("not an array: {:?}", other),
        }
    }

    #[test]
    fn test_splice_coerces_arguments() {
        let mut ctx = EvalContext::new();
        let a = array_of(vec![1, 2, 3, 4]);
        let removed = array_splice(
            &mut ctx,
            a.clone(),
            vec![JsValue::String("1".to_string()), JsValue::Boolean(true)],
        )
        .unwrap();
        assert_eq!(joined(&removed), "2");
        assert_eq!(joined(&a), "1,3,4");
    }

    #[test]
    fn test_splice_undefined_delete_count_removes_nothing() {
        let mut ctx = EvalContext::new();
        let a = array_of(vec![1, 2, 3]);
        let removed =
            array_splice(&mut ctx, a.clone(), vec![JsValue::integer(0), JsValue::Undefined])
                .unwrap();
        assert_eq!(joined(&removed), "");
        assert_eq!(joined(&a), "1,2,3");
    }

    #[test]
    fn test_slice_undefined_end_means_length() {
        let mut ctx = EvalContext::new();
        let a = array_of(vec![1, 2, 3]);
        let s = array_slice(&mut ctx, a, vec![JsValue::integer(1), JsValue::Undefined]).unwrap();
        assert_eq!(joined(&s), "2,3");
    }

    #[test]
    fn test_includes_sees_holes_as_undefined() {
        let mut ctx = EvalContext::new();
        let a = new_array_value(Sequence::from_slots(vec![Some(JsValue::integer(1)), None]));
        let found = array_includes(&mut ctx, a.clone(), vec![JsValue::Undefined]).unwrap();
        assert_eq!(found, JsValue::Boolean(true));
        let found = array_index_of(&mut ctx, a, vec![JsValue::Undefined]).unwrap();
        assert_eq!(found, JsValue::integer(-1));
    }

    #[test]
    fn test_nan_search() {
        let mut ctx = EvalContext::new();
        let a = new_array_value(Sequence::from_values(vec![JsValue::from_f64(f64::NAN)]));
        let nan = JsValue::from_f64(f64::NAN);
        assert_eq!(
            array_includes(&mut ctx, a.clone(), vec![nan.clone()]).unwrap(),
            JsValue::Boolean(true)
        );
        assert_eq!(
            array_index_of(&mut ctx, a, vec![nan]).unwrap(),
            JsValue::integer(-1)
        );
    }

    #[test]
    fn test_methods_reject_non_arrays() {
        let mut ctx = EvalContext::new();
        let err = array_push(&mut ctx, JsValue::Null, vec![]);
        assert!(matches!(err, Err(JErrorType::TypeError(_))));
    }

    #[test]
    fn test_constructor_forms() {
        let mut ctx = EvalContext::new();
        let holes = array_constructor(&mut ctx, JsValue::Undefined, vec![JsValue::integer(3)])
            .unwrap();
        assert_eq!(joined(&holes), ",,");
        let values = array_constructor(
            &mut ctx,
            JsValue::Undefined,
            vec![JsValue::integer(3), JsValue::integer(4)],
        )
        .unwrap();
        assert_eq!(joined(&values), "3,4");
        let err = array_constructor(&mut ctx, JsValue::Undefined, vec![JsValue::from_f64(-1.0)]);
        assert!(matches!(err, Err(JErrorType::RangeError(_))));
    }
}
