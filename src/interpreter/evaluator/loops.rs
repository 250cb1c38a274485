use crate::{
    ast::{BlockStatement, Expression, Statement},
    interpreter::{
        evaluator::{
            core::{EvalResult, eval_block, eval_expression, eval_statement},
            utils::{is_control, operand},
        },
        object::{Env, Environment, Object},
    },
};

/// What a loop should do after one run of its body.
enum Step {
    Continue,
    Exit,
    Return(Object),
}

/// Runs the body once in a fresh scope nested inside `env`.
///
/// Each iteration gets its own scope, so a `let` in the body declares a new
/// binding every time around instead of colliding with the previous one.
fn run_body(body: &BlockStatement, env: &Env) -> EvalResult<Step> {
    let scope = Environment::new_enclosed(env);
    Ok(match eval_block(body, &scope)? {
        Some(Object::Break) => Step::Exit,
        Some(value @ Object::ReturnValue(_)) => Step::Return(value),
        _ => Step::Continue,
    })
}

/// Evaluates `while (condition) { body }`.
///
/// The condition is re-evaluated before every iteration. `break` leaves the
/// loop; `return` and runtime errors inside the body leave it too and keep
/// travelling upward. A loop produces no value.
///
/// Only the body is the loop's own: a `break` reached while evaluating the
/// condition unwinds to the enclosing loop.
///
/// # Errors
/// Returns the first error raised by the condition or the body.
///
/// # Example
/// ```
/// use marmoset::get_result;
///
/// let source = "let i = 0; while (i < 10) { if (i == 3) { break; } i = i + 1; } i;";
/// assert_eq!(get_result(source).unwrap().unwrap().to_string(), "3");
/// ```
pub fn eval_while(condition: &Expression, body: &BlockStatement, env: &Env) -> EvalResult<Option<Object>> {
    while operand!(condition, env).is_truthy() {
        match run_body(body, env)? {
            Step::Continue => {},
            Step::Exit => break,
            Step::Return(value) => return Ok(Some(value)),
        }
    }

    Ok(None)
}

/// Evaluates `for (init; condition; update) { body }`.
///
/// `init` runs once in a scope that wraps the whole loop, so a variable it
/// declares is visible to the condition, the update and the body but not
/// after the loop. `update` runs after every iteration that was not left with
/// `break`.
///
/// # Errors
/// Returns the first error raised by any part of the loop.
pub fn eval_for(init: Option<&Statement>,
                condition: &Expression,
                update: Option<&Expression>,
                body: &BlockStatement,
                env: &Env)
                -> EvalResult<Option<Object>> {
    let loop_env = Environment::new_enclosed(env);

    if let Some(init) = init
       && let Some(marker) = eval_statement(init, &loop_env)?.filter(is_control)
    {
        return Ok(Some(marker));
    }

    while operand!(condition, &loop_env).is_truthy() {
        match run_body(body, &loop_env)? {
            Step::Continue => {},
            Step::Exit => break,
            Step::Return(value) => return Ok(Some(value)),
        }
        if let Some(update) = update
           && let Some(marker) = eval_expression(update, &loop_env)?.filter(is_control)
        {
            return Ok(Some(marker));
        }
    }

    Ok(None)
}
