//! `if`/`while` condition checking
//!
//! Conditions are a flat list of operands joined by `&&` or `||`. There is no
//! precedence and no grouping, so parentheses inside a condition make the
//! operand invalid.

use crate::error::ErrorKind;
use crate::scope::{ScopeId, ScopeTree};
use crate::values::read_variable;
use sj_syntax::{is_boolean_literal, is_double_literal, is_int_literal, is_reserved, is_variable_name};

const OPERATORS: [&str; 2] = ["&&", "||"];

/// Validate `condition` as read from `scope`.
///
/// Operator placement is judged on the condition with surrounding blanks
/// removed, so `( || a)` and `(a || )` are both misplaced operators rather
/// than empty operands.
///
/// # Errors
///
/// Condition errors for operator placement and operand shape; identifier
/// operands report undeclared or uninitialized variables as variable errors.
pub fn check_condition(tree: &ScopeTree, scope: ScopeId, condition: &str) -> Result<(), ErrorKind> {
    let trimmed = condition.trim();
    if OPERATORS
        .iter()
        .any(|op| trimmed.starts_with(op) || trimmed.ends_with(op))
    {
        return Err(ErrorKind::MisplacedOperator(condition.to_owned()));
    }

    for operand in operands(trimmed) {
        if operand.is_empty() {
            return Err(ErrorKind::EmptyOperand(condition.to_owned()));
        }
        check_operand(tree, scope, operand)?;
    }
    Ok(())
}

/// Split on both operators and trim each piece
fn operands(condition: &str) -> impl Iterator<Item = &str> {
    condition
        .split("||")
        .flat_map(|part| part.split("&&"))
        .map(str::trim)
}

fn check_operand(tree: &ScopeTree, scope: ScopeId, operand: &str) -> Result<(), ErrorKind> {
    if is_boolean_literal(operand) || is_int_literal(operand) || is_double_literal(operand) {
        return Ok(());
    }
    if !is_variable_name(operand) || is_reserved(operand) {
        return Err(ErrorKind::InvalidOperand(operand.to_owned()));
    }

    let ty = read_variable(tree, scope, operand)?;
    if ty.is_condition_operand() {
        Ok(())
    } else {
        Err(ErrorKind::OperandType {
            name: operand.to_owned(),
            ty,
        })
    }
}
