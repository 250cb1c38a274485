use crate::{
    ast::Expression,
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::core::{EvalResult, eval_expression},
        object::{Env, Object},
    },
};

/// Evaluates an expression that must produce a value.
///
/// The result may still be a `ReturnValue` or `Break` marker coming out of an
/// `if` block; callers go through `operand!` to hand those upward.
///
/// # Errors
/// Propagates runtime errors and fails with `MissingValue` when the
/// expression produced nothing, such as an assignment.
pub fn eval_child(expression: &Expression, env: &Env) -> EvalResult<Object> {
    eval_expression(expression, env)?.ok_or_else(|| {
                                         RuntimeError::at(ErrorKind::MissingValue, expression.line())
                                     })
}

/// Evaluates an operand with [`eval_child`] and yields its value.
///
/// A control marker is not a value: it is returned from the enclosing
/// function as its result, so it keeps unwinding toward the call or loop it
/// targets. Works in functions returning `EvalResult<Object>` and
/// `EvalResult<Option<Object>>`.
macro_rules! operand {
    ($expression:expr, $env:expr) => {
        match $crate::interpreter::evaluator::utils::eval_child($expression, $env)? {
            marker if $crate::interpreter::evaluator::utils::is_control(&marker) => {
                return Ok(marker.into());
            },
            value => value,
        }
    };
}

/// Evaluates operands left to right with [`operand!`], collecting their
/// values. Stops at the first error or control marker.
macro_rules! operands {
    ($expressions:expr, $env:expr) => {{
        let expressions: &[$crate::ast::Expression] = $expressions;
        let mut values = Vec::with_capacity(expressions.len());
        for expression in expressions {
            values.push($crate::interpreter::evaluator::utils::operand!(expression, $env));
        }
        values
    }};
}

pub(crate) use {operand, operands};

/// Returns `true` for the markers that unwind blocks: `ReturnValue` and
/// `Break`.
#[must_use]
pub const fn is_control(object: &Object) -> bool {
    matches!(object, Object::ReturnValue(_) | Object::Break)
}
