//! Statement execution.

use crate::parser::ast::{ProgramData, StatementType, VariableDeclarator};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

use super::expression::{delete_reference, evaluate_expression, evaluate_reference, put_value};
use super::types::{Completion, EvalResult};

/// Execute a statement and return its completion.
pub fn execute_statement(stmt: &StatementType, ctx: &mut EvalContext) -> EvalResult {
    match stmt {
        StatementType::EmptyStatement => Ok(Completion::normal()),

        StatementType::VarDeclaration(declarations) => {
            execute_var_declaration(declarations, ctx)?;
            Ok(Completion::normal())
        }

        StatementType::AssignmentStatement { target, value } => {
            let reference = evaluate_reference(target, ctx)?;
            let value = evaluate_expression(value, ctx)?;
            put_value(reference, value.clone(), ctx)?;
            Ok(Completion::normal_with_value(value))
        }

        StatementType::DeleteStatement(target) => {
            let reference = evaluate_reference(target, ctx)?;
            let deleted = delete_reference(reference)?;
            Ok(Completion::normal_with_value(JsValue::Boolean(deleted)))
        }

        StatementType::ExpressionStatement(expression) => {
            let value = evaluate_expression(expression, ctx)?;
            Ok(Completion::normal_with_value(value))
        }
    }
}

fn execute_var_declaration(
    declarations: &[VariableDeclarator],
    ctx: &mut EvalContext,
) -> Result<(), JErrorType> {
    for declarator in declarations {
        match &declarator.init {
            Some(init) => {
                let value = evaluate_expression(init, ctx)?;
                ctx.set_binding(&declarator.id, value);
            }
            None => ctx.declare_binding(&declarator.id),
        }
    }
    Ok(())
}

/// Execute every statement in order. The completion value is that of the
/// last statement that produced one.
pub fn execute_program(program: &ProgramData, ctx: &mut EvalContext) -> EvalResult {
    let mut last = Completion::normal();
    for stmt in &program.body {
        last = execute_statement(stmt, ctx)?.update_empty(last.value);
    }
    Ok(last)
}
