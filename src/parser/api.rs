use pest::error::{Error, ErrorVariant};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

use super::ast::*;

#[derive(Parser)]
#[grammar = "parser/script_grammar.pest"] // relative to src
pub struct ScriptParser;

const TAB_WIDTH: usize = 2;

impl ScriptParser {
    pub fn parse_to_ast_from_str(script: &str) -> Result<ProgramData, Error<Rule>> {
        parse_to_ast(script)
    }
}

pub fn parse_to_token_tree(script: &str) -> Result<String, String> {
    let mut tree = vec![];
    match ScriptParser::parse(Rule::script, script) {
        Ok(pairs) => {
            for pair in pairs {
                tree.push(pair_to_string(pair, 0).join("\n"));
            }
        }
        Err(rule) => {
            return Err(format!("Parse error due to {:?}", rule));
        }
    }
    Ok(tree.join("\n"))
}

fn pair_to_string(pair: Pair<Rule>, level: usize) -> Vec<String> {
    let mut tree = vec![];
    let span = pair.as_span();
    let rule_name = format!(
        "{:?} => ({},{}) #{:?}",
        pair.as_rule(),
        span.start(),
        span.end(),
        span.as_str()
    );
    tree.push(format!("{}{}", " ".repeat(level * TAB_WIDTH), rule_name));
    for child_pair in pair.into_inner() {
        tree.append(pair_to_string(child_pair, level + 1).as_mut());
    }
    tree
}

pub fn parse_to_ast(script: &str) -> Result<ProgramData, Error<Rule>> {
    let mut pairs = ScriptParser::parse(Rule::script, script)?;
    match pairs.next() {
        Some(script_pair) => build_ast_from_script(script_pair.into_inner()),
        None => Ok(ProgramData { body: vec![] }),
    }
}

fn build_ast_from_script(pairs: Pairs<Rule>) -> Result<ProgramData, Error<Rule>> {
    let mut body = vec![];
    for pair in pairs {
        match pair.as_rule() {
            Rule::EOI => { /* Do nothing */ }
            _ => body.push(build_ast_from_statement(pair)?),
        }
    }
    Ok(ProgramData { body })
}

fn build_ast_from_statement(pair: Pair<Rule>) -> Result<StatementType, Error<Rule>> {
    Ok(match pair.as_rule() {
        Rule::empty_statement => StatementType::EmptyStatement,
        Rule::var_statement => {
            let mut declarations = vec![];
            for binding in pair.into_inner() {
                if binding.as_rule() == Rule::var_binding {
                    declarations.push(build_variable_declarator(binding)?);
                }
            }
            StatementType::VarDeclaration(declarations)
        }
        Rule::delete_statement => {
            let target = expect_inner(&pair, Rule::expression, 1)?;
            StatementType::DeleteStatement(build_ast_from_expression(target)?)
        }
        Rule::assignment_statement => {
            let mut inner = pair.clone().into_inner();
            let (target, value) = match (inner.next(), inner.next()) {
                (Some(t), Some(v)) => (t, v),
                _ => return Err(get_unexpected_error(2, &pair)),
            };
            let target = build_ast_from_postfix_expression(target)?;
            match target {
                ExpressionType::Identifier(_) | ExpressionType::MemberExpression { .. } => {}
                _ => {
                    return Err(Error::new_from_span(
                        ErrorVariant::CustomError {
                            message: "Invalid left-hand side in assignment".to_string(),
                        },
                        pair.as_span(),
                    ))
                }
            }
            StatementType::AssignmentStatement {
                target,
                value: build_ast_from_expression(value)?,
            }
        }
        Rule::expression_statement => {
            let expr = expect_inner(&pair, Rule::expression, 0)?;
            StatementType::ExpressionStatement(build_ast_from_expression(expr)?)
        }
        _ => return Err(get_unexpected_error(1, &pair)),
    })
}

fn build_variable_declarator(pair: Pair<Rule>) -> Result<VariableDeclarator, Error<Rule>> {
    let mut inner = pair.clone().into_inner();
    let id = match inner.next() {
        Some(id) => id.as_str().to_string(),
        None => return Err(get_unexpected_error(3, &pair)),
    };
    let init = match inner.next() {
        Some(expr) => Some(build_ast_from_expression(expr)?),
        None => None,
    };
    Ok(VariableDeclarator { id, init })
}

fn expect_inner<'a>(
    pair: &Pair<'a, Rule>,
    rule: Rule,
    id: i32,
) -> Result<Pair<'a, Rule>, Error<Rule>> {
    pair.clone()
        .into_inner()
        .find(|p| p.as_rule() == rule)
        .ok_or_else(|| get_unexpected_error(id, pair))
}

fn get_unexpected_error(id: i32, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!("Unexpected state reached [{:?}] - {}", pair.as_rule(), id);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn build_ast_from_expression(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let mut operators = vec![];
    let mut operand = None;
    for inner in pair.clone().into_inner() {
        match inner.as_rule() {
            Rule::prefix_operator => operators.push(match inner.as_str() {
                "-" => UnaryOperator::Minus,
                _ => UnaryOperator::Plus,
            }),
            Rule::postfix_expression => operand = Some(build_ast_from_postfix_expression(inner)?),
            _ => return Err(get_unexpected_error(10, &inner)),
        }
    }
    let mut expr = operand.ok_or_else(|| get_unexpected_error(11, &pair))?;
    // Innermost operator binds first: `-+x` is `-(+x)`.
    for operator in operators.into_iter().rev() {
        expr = ExpressionType::UnaryExpression {
            operator,
            argument: Box::new(expr),
        };
    }
    Ok(expr)
}

fn build_ast_from_postfix_expression(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let mut inner = pair.clone().into_inner();
    let primary = inner.next().ok_or_else(|| get_unexpected_error(20, &pair))?;
    let mut expr = build_ast_from_primary(primary)?;
    for accessor in inner {
        expr = match accessor.as_rule() {
            Rule::call_arguments => ExpressionType::CallExpression {
                callee: Box::new(expr),
                arguments: build_arguments(accessor)?,
            },
            Rule::index_accessor => {
                let index = expect_inner(&accessor, Rule::expression, 21)?;
                ExpressionType::MemberExpression {
                    object: Box::new(expr),
                    property: MemberProperty::Computed(Box::new(build_ast_from_expression(index)?)),
                }
            }
            Rule::property_accessor => {
                let name = expect_inner(&accessor, Rule::property_name, 22)?;
                ExpressionType::MemberExpression {
                    object: Box::new(expr),
                    property: MemberProperty::Name(name.as_str().to_string()),
                }
            }
            _ => return Err(get_unexpected_error(23, &accessor)),
        };
    }
    Ok(expr)
}

fn build_arguments(pair: Pair<Rule>) -> Result<Vec<ExpressionType>, Error<Rule>> {
    pair.into_inner().map(build_ast_from_expression).collect()
}

fn build_ast_from_primary(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    Ok(match pair.as_rule() {
        Rule::expression => build_ast_from_expression(pair)?,
        Rule::identifier => ExpressionType::Identifier(pair.as_str().to_string()),
        Rule::numeric_literal => {
            ExpressionType::Literal(LiteralType::NumberLiteral(build_number(pair)?))
        }
        Rule::string_literal => {
            let chars = pair.clone().into_inner().next();
            let raw = chars.map(|c| c.as_str()).unwrap_or("");
            ExpressionType::Literal(LiteralType::StringLiteral(unescape(raw)))
        }
        Rule::true_literal => ExpressionType::Literal(LiteralType::BooleanLiteral(true)),
        Rule::false_literal => ExpressionType::Literal(LiteralType::BooleanLiteral(false)),
        Rule::null_literal => ExpressionType::Literal(LiteralType::NullLiteral),
        Rule::undefined_literal => ExpressionType::Literal(LiteralType::UndefinedLiteral),
        Rule::nan_literal => ExpressionType::Literal(LiteralType::NumberLiteral(f64::NAN)),
        Rule::infinity_literal => {
            ExpressionType::Literal(LiteralType::NumberLiteral(f64::INFINITY))
        }
        Rule::array_literal => build_array_literal(pair)?,
        Rule::new_expression => {
            let mut callee = None;
            let mut arguments = vec![];
            for inner in pair.clone().into_inner() {
                match inner.as_rule() {
                    Rule::kw_new => {}
                    Rule::identifier => callee = Some(inner.as_str().to_string()),
                    Rule::call_arguments => arguments = build_arguments(inner)?,
                    _ => return Err(get_unexpected_error(30, &inner)),
                }
            }
            ExpressionType::NewExpression {
                callee: callee.ok_or_else(|| get_unexpected_error(31, &pair))?,
                arguments,
            }
        }
        _ => return Err(get_unexpected_error(32, &pair)),
    })
}

fn build_array_literal(pair: Pair<Rule>) -> Result<ExpressionType, Error<Rule>> {
    let mut elements = vec![];
    let mut after_element = false;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::array_comma => {
                if !after_element {
                    elements.push(None);
                }
                after_element = false;
            }
            Rule::expression => {
                if after_element {
                    return Err(Error::new_from_span(
                        ErrorVariant::CustomError {
                            message: "Expected ',' between array elements".to_string(),
                        },
                        inner.as_span(),
                    ));
                }
                elements.push(Some(build_ast_from_expression(inner)?));
                after_element = true;
            }
            _ => return Err(get_unexpected_error(40, &inner)),
        }
    }
    Ok(ExpressionType::ArrayExpression(elements))
}

fn build_number(pair: Pair<Rule>) -> Result<f64, Error<Rule>> {
    let inner = pair
        .clone()
        .into_inner()
        .next()
        .ok_or_else(|| get_unexpected_error(50, &pair))?;
    let text = inner.as_str();
    let parsed = match inner.as_rule() {
        Rule::hex_literal => u64::from_str_radix(&text[2..], 16).map(|n| n as f64).ok(),
        Rule::decimal_literal => text.parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        Error::new_from_span(
            ErrorVariant::CustomError {
                message: format!("Invalid numeric literal {}", text),
            },
            inner.as_span(),
        )
    })
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
