//! `console.log` and the global `print` function.
//!
//! Both append one line to the context output instead of writing to stdout;
//! the caller decides where the lines go.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::{BuiltInRegistry, GLOBAL_OBJECT};
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

/// Register `console` and the global functions with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    let console = BuiltInObject::new("console").add_method("log", console_log);
    registry.register_object(console);

    let global = BuiltInObject::new(GLOBAL_OBJECT).add_method("print", print);
    registry.register_object(global);
}

/// Format all arguments as one output line. Arrays print like `join(",")`.
fn format_args(args: &[JsValue]) -> Result<String, JErrorType> {
    let parts = args.iter().map(to_string).collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(" "))
}

fn console_log(
    ctx: &mut EvalContext,
    _this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let line = format_args(&args)?;
    ctx.write_line(line);
    Ok(JsValue::Undefined)
}

fn print(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    console_log(ctx, this, args)
}
