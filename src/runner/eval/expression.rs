//! Expression evaluation.

use crate::parser::ast::{ExpressionType, LiteralType, MemberProperty, UnaryOperator};
use crate::runner::ds::array_object::{JsArrayObject, PropertyKey, ARRAY_LENGTH_PROP};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::{get_type, to_f64};
use crate::runner::ds::sequence::Sequence;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

use super::types::{Reference, ReferenceResult, ValueResult};

/// Evaluate an expression and return its value.
pub fn evaluate_expression(expr: &ExpressionType, ctx: &mut EvalContext) -> ValueResult {
    match expr {
        ExpressionType::Literal(lit) => Ok(evaluate_literal(lit)),

        ExpressionType::Identifier(name) => ctx.get_binding(name),

        ExpressionType::ArrayExpression(elements) => evaluate_array_expression(elements, ctx),

        ExpressionType::UnaryExpression { operator, argument } => {
            let value = to_f64(&evaluate_expression(argument, ctx)?)?;
            Ok(JsValue::from_f64(match operator {
                UnaryOperator::Minus => -value,
                UnaryOperator::Plus => value,
            }))
        }

        ExpressionType::MemberExpression { object, property } => {
            let base = evaluate_expression(object, ctx)?;
            let key = evaluate_property_key(property, ctx)?;
            get_property(&base, &key)
        }

        ExpressionType::CallExpression { callee, arguments } => {
            evaluate_call_expression(callee, arguments, ctx)
        }

        ExpressionType::NewExpression { callee, arguments } => {
            let args = evaluate_arguments(arguments, ctx)?;
            call_constructor(callee, args, ctx)
        }
    }
}

fn evaluate_literal(lit: &LiteralType) -> JsValue {
    match lit {
        LiteralType::NumberLiteral(n) => JsValue::from_f64(*n),
        LiteralType::StringLiteral(s) => JsValue::String(s.clone()),
        LiteralType::BooleanLiteral(b) => JsValue::Boolean(*b),
        LiteralType::NullLiteral => JsValue::Null,
        LiteralType::UndefinedLiteral => JsValue::Undefined,
    }
}

fn evaluate_array_expression(
    elements: &[Option<ExpressionType>],
    ctx: &mut EvalContext,
) -> ValueResult {
    let mut slots = Vec::with_capacity(elements.len());
    for element in elements {
        slots.push(match element {
            Some(expr) => Some(evaluate_expression(expr, ctx)?),
            None => None,
        });
    }
    let elements = Sequence::from_slots_with_config(slots, ctx.storage);
    Ok(JsValue::new_array(JsArrayObject::from_sequence(elements)))
}

fn evaluate_arguments(arguments: &[ExpressionType], ctx: &mut EvalContext) -> Result<Vec<JsValue>, JErrorType> {
    arguments
        .iter()
        .map(|arg| evaluate_expression(arg, ctx))
        .collect()
}

fn evaluate_property_key(property: &MemberProperty, ctx: &mut EvalContext) -> Result<PropertyKey, JErrorType> {
    match property {
        MemberProperty::Name(name) => Ok(PropertyKey::from_name(name)),
        MemberProperty::Computed(expr) => {
            let value = evaluate_expression(expr, ctx)?;
            PropertyKey::from_value(&value)
        }
    }
}

/// Resolve an assignment or `delete` target.
pub fn evaluate_reference(expr: &ExpressionType, ctx: &mut EvalContext) -> ReferenceResult {
    match expr {
        ExpressionType::Identifier(name) => Ok(Reference::Binding(name.clone())),
        ExpressionType::MemberExpression { object, property } => {
            let base = evaluate_expression(object, ctx)?;
            let key = evaluate_property_key(property, ctx)?;
            Ok(Reference::Property { base, key })
        }
        _ => Err(JErrorType::SyntaxError(
            "Invalid left-hand side in assignment".to_string(),
        )),
    }
}

fn property_base_error(base: &JsValue, key: &PropertyKey) -> JErrorType {
    JErrorType::TypeError(format!(
        "Cannot access property '{}' of {}",
        key,
        get_type(base)
    ))
}

/// Read `base[key]`. Only arrays and strings carry properties; other
/// primitives read as `undefined`.
pub fn get_property(base: &JsValue, key: &PropertyKey) -> ValueResult {
    match base {
        JsValue::Array(a) => Ok(a.borrow().get(key)),
        JsValue::String(s) => Ok(match key {
            PropertyKey::Str(name) if name == "length" => {
                JsValue::integer(s.encode_utf16().count() as i64)
            }
            PropertyKey::Index(i) => s
                .encode_utf16()
                .nth(*i as usize)
                .map(|unit| JsValue::String(String::from_utf16_lossy(&[unit])))
                .unwrap_or(JsValue::Undefined),
            _ => JsValue::Undefined,
        }),
        JsValue::Undefined | JsValue::Null => Err(property_base_error(base, key)),
        _ => Ok(JsValue::Undefined),
    }
}

/// Write through a reference. Writes to primitive bases are dropped.
pub fn put_value(reference: Reference, value: JsValue, ctx: &mut EvalContext) -> Result<(), JErrorType> {
    match reference {
        Reference::Binding(name) => {
            ctx.set_binding(&name, value);
            Ok(())
        }
        Reference::Property { base, key } => match base {
            JsValue::Array(a) => {
                // Coercing `length` can read this same array, so it happens
                // before the mutable borrow.
                let value = if key == *ARRAY_LENGTH_PROP {
                    JsValue::from_f64(to_f64(&value)?)
                } else {
                    value
                };
                a.borrow_mut().define_own_property(key, value)
            }
            JsValue::Undefined | JsValue::Null => Err(property_base_error(&base, &key)),
            _ => Ok(()),
        },
    }
}

/// `delete` through a reference. Returns whether the property is gone.
pub fn delete_reference(reference: Reference) -> Result<bool, JErrorType> {
    match reference {
        Reference::Binding(_) => Ok(false),
        Reference::Property { base, key } => match base {
            JsValue::Array(a) => Ok(a.borrow_mut().delete(&key)),
            JsValue::Undefined | JsValue::Null => Err(property_base_error(&base, &key)),
            _ => Ok(true),
        },
    }
}

/// `Array`, `console` and friends, unless a script binding shadows them.
fn builtin_object_name<'a>(object: &'a ExpressionType, ctx: &EvalContext) -> Option<&'a str> {
    match object {
        ExpressionType::Identifier(name)
            if !ctx.has_binding(name) && ctx.registry.has_object(name) =>
        {
            Some(name.as_str())
        }
        _ => None,
    }
}

fn evaluate_call_expression(
    callee: &ExpressionType,
    arguments: &[ExpressionType],
    ctx: &mut EvalContext,
) -> ValueResult {
    if let ExpressionType::MemberExpression {
        object,
        property: MemberProperty::Name(method),
    } = callee
    {
        if let Some(object_name) = builtin_object_name(object, ctx) {
            let args = evaluate_arguments(arguments, ctx)?;
            return call_builtin_method(object_name, method, JsValue::Undefined, args, ctx);
        }
    }

    match callee {
        ExpressionType::MemberExpression { object, property } => {
            let this = evaluate_expression(object, ctx)?;
            let key = evaluate_property_key(property, ctx)?;
            let method = match (&this, &key) {
                (JsValue::Array(_), PropertyKey::Str(method)) => method.clone(),
                _ => {
                    return Err(JErrorType::TypeError(format!(
                        "{}.{} is not a function",
                        get_type(&this),
                        key
                    )))
                }
            };
            let args = evaluate_arguments(arguments, ctx)?;
            call_builtin_method("Array", &method, this, args, ctx)
        }

        ExpressionType::Identifier(name) if !ctx.has_binding(name) => {
            let args = evaluate_arguments(arguments, ctx)?;
            let registry = ctx.registry.clone();
            if let Some(f) = registry.get_global_function(name) {
                f.call(ctx, JsValue::Undefined, args)
            } else if registry.get_constructor(name).is_some() {
                call_constructor(name, args, ctx)
            } else {
                Err(JErrorType::ReferenceError(format!("{} is not defined", name)))
            }
        }

        _ => {
            let value = evaluate_expression(callee, ctx)?;
            Err(JErrorType::TypeError(format!(
                "{} is not a function",
                get_type(&value)
            )))
        }
    }
}

fn call_builtin_method(
    object: &str,
    method: &str,
    this: JsValue,
    args: Vec<JsValue>,
    ctx: &mut EvalContext,
) -> ValueResult {
    let registry = ctx.registry.clone();
    match registry.get_method(object, method) {
        Some(f) => f.call(ctx, this, args),
        None => Err(JErrorType::TypeError(format!(
            "{}.{} is not a function",
            object, method
        ))),
    }
}

fn call_constructor(name: &str, args: Vec<JsValue>, ctx: &mut EvalContext) -> ValueResult {
    let registry = ctx.registry.clone();
    match registry.get_constructor(name) {
        Some(f) => f.call(ctx, JsValue::Undefined, args),
        None => Err(JErrorType::TypeError(format!("{} is not a constructor", name))),
    }
}
