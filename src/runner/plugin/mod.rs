//! Built-in registry, evaluation context and harness configuration.
//!
//! Built-ins are plain Rust functions registered by name on a
//! [`BuiltInObject`]. The evaluator never holds references into the
//! registry while a built-in runs: it clones the `Rc<BuiltInRegistry>` out
//! of the [`EvalContext`](types::EvalContext) and calls through that, so a
//! built-in is free to take `&mut EvalContext`.
//!
//! ```
//! use sparse_seq::runner::plugin::registry::BuiltInRegistry;
//! use sparse_seq::runner::plugin::types::EvalContext;
//! use sparse_seq::runner::ds::value::JsValue;
//!
//! let mut ctx = EvalContext::new();
//! let registry = BuiltInRegistry::with_core();
//! let print = registry.get_global_function("print").unwrap();
//! print.call(&mut ctx, JsValue::Undefined, vec![JsValue::integer(3)]).unwrap();
//! assert_eq!(ctx.output(), &["3".to_string()]);
//! ```

pub mod config;
pub mod registry;
pub mod types;

pub use config::HarnessConfig;
pub use registry::BuiltInRegistry;
pub use types::{BuiltInFn, BuiltInObject, EvalContext, NativeFn};
