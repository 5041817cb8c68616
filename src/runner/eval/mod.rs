//! Evaluation of parsed scripts against an [`EvalContext`].
//!
//! ```
//! use sparse_seq::runner::eval::evaluate_script;
//! use sparse_seq::runner::plugin::types::EvalContext;
//!
//! let mut ctx = EvalContext::new();
//! evaluate_script("var a = [1, 2, 3, 4]; print(a.splice(1, 2)); print(a);", &mut ctx).unwrap();
//! assert_eq!(ctx.output(), &["2,3".to_string(), "1,4".to_string()]);
//! ```

pub mod expression;
pub mod statement;
pub mod types;

pub use types::{Completion, Reference};

use crate::parser::ScriptParser;
use crate::runner::ds::error::JErrorType;
use crate::runner::plugin::types::EvalContext;

use self::statement::execute_program;
use self::types::EvalResult;

/// Parse and run `code`. Parse failures surface as `SyntaxError`.
pub fn evaluate_script(code: &str, ctx: &mut EvalContext) -> EvalResult {
    let program = ScriptParser::parse_to_ast_from_str(code)
        .map_err(|e| JErrorType::SyntaxError(e.to_string()))?;
    execute_program(&program, ctx)
}
