use std::rc::Rc;

use crate::{
    ast::{BlockStatement, Expression, Identifier, Program, Statement},
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::{
            binary::core::eval_infix,
            function::core::{eval_call, lookup_builtin},
            index::{eval_hash_literal, eval_index},
            loops::{eval_for, eval_while},
            unary::eval_prefix,
            utils::{is_control, operand, operands},
        },
        object::{Closure, Env, NULL, Object},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Evaluates a whole program and returns its value.
///
/// This is the boundary between the evaluator and its callers: a runtime
/// error comes back as an [`Object::Error`], a top-level `return` ends the
/// program with the returned value, and a program whose last statement
/// produces nothing (such as a `let`) returns `None`.
///
/// # Example
/// ```
/// use marmoset::interpreter::{
///     evaluator::eval_program,
///     object::{Environment, Object},
///     parser::parse,
/// };
///
/// let (program, _) = parse("let a = 5; let b = a + 5; b;");
/// let env = Environment::new();
///
/// assert_eq!(eval_program(&program, &env), Some(Object::Integer(10)));
/// ```
#[must_use]
pub fn eval_program(program: &Program, env: &Env) -> Option<Object> {
    run_program(program, env).unwrap_or_else(|error| Some(Object::Error(error)))
}

/// Runs the statements of a program in order.
///
/// # Errors
/// Returns the first runtime error, or `BreakOutsideLoop` when a `break`
/// reaches the top level.
pub fn run_program(program: &Program, env: &Env) -> EvalResult<Option<Object>> {
    let mut result = None;

    for statement in &program.statements {
        match eval_statement(statement, env)? {
            Some(Object::ReturnValue(value)) => return Ok(Some(*value)),
            Some(Object::Break) => {
                return Err(RuntimeError::at(ErrorKind::BreakOutsideLoop, statement.line()));
            },
            value => result = value,
        }
    }

    Ok(result)
}

/// Evaluates the statements of a block in `env`.
///
/// A `ReturnValue` or `Break` marker stops the block and is handed upward
/// unchanged so that the enclosing call or loop can act on it.
///
/// # Errors
/// Returns the first runtime error raised by a statement.
pub fn eval_block(block: &BlockStatement, env: &Env) -> EvalResult<Option<Object>> {
    let mut result = None;

    for statement in &block.statements {
        result = eval_statement(statement, env)?;
        if result.as_ref().is_some_and(is_control) {
            break;
        }
    }

    Ok(result)
}

/// Evaluates a single statement.
///
/// `let`, assignments used as statements, and loops produce no value.
///
/// # Errors
/// Returns any runtime error raised while evaluating the statement, stamped
/// with the statement's line if no inner node claimed it.
pub fn eval_statement(statement: &Statement, env: &Env) -> EvalResult<Option<Object>> {
    eval_statement_inner(statement, env).map_err(|error| error.or_line(statement.line()))
}

fn eval_statement_inner(statement: &Statement, env: &Env) -> EvalResult<Option<Object>> {
    match statement {
        Statement::Let { name, value, line } => eval_let(name, value, *line, env),
        Statement::Return { value, .. } => {
            let value = operand!(value, env);
            Ok(Some(Object::ReturnValue(Box::new(value))))
        },
        Statement::Expression { expression, .. } => eval_expression(expression, env),
        Statement::While { condition, body, .. } => eval_while(condition, body, env),
        Statement::For { init,
                         condition,
                         update,
                         body,
                         .. } => eval_for(init.as_deref(), condition, update.as_ref(), body, env),
        Statement::Break { .. } => Ok(Some(Object::Break)),
    }
}

/// Binds a new name in the current scope.
///
/// Names bound in an enclosing scope may be shadowed; names already bound in
/// this very scope may not.
fn eval_let(name: &Identifier, value: &Expression, line: usize, env: &Env) -> EvalResult<Option<Object>> {
    let value = operand!(value, env);

    if env.borrow().contains_local(&name.name) {
        return Err(RuntimeError::at(ErrorKind::AlreadyExists { name: name.name.clone() }, line));
    }
    env.borrow_mut().set(name.name.clone(), value);

    Ok(None)
}

/// Evaluates an expression.
///
/// Every variant is matched here; the heavier cases are delegated to their
/// own modules. Assignments produce no value.
///
/// A `return` or `break` reached inside an operand, such as
/// `[if (done) { break; }]`, abandons the expression and comes back as the
/// marker itself.
///
/// # Errors
/// Returns any runtime error raised while evaluating the expression, stamped
/// with the expression's line if no inner node claimed it.
pub fn eval_expression(expression: &Expression, env: &Env) -> EvalResult<Option<Object>> {
    eval_expression_inner(expression, env).map_err(|error| error.or_line(expression.line()))
}

fn eval_expression_inner(expression: &Expression, env: &Env) -> EvalResult<Option<Object>> {
    let value = match expression {
        Expression::Identifier(identifier) => eval_identifier(identifier, env)?,
        Expression::IntegerLiteral { value, .. } => Object::Integer(*value),
        Expression::FloatLiteral { value, .. } => Object::Float(*value),
        Expression::BooleanLiteral { value, .. } => Object::from_bool(*value),
        Expression::StringLiteral { value, .. } => Object::from(value.as_str()),
        Expression::ArrayLiteral { elements, .. } => Object::array(operands!(elements, env)),
        Expression::HashLiteral { pairs, .. } => eval_hash_literal(pairs, env)?,
        Expression::Prefix { operator, right, .. } => {
            let right = operand!(right, env);
            eval_prefix(*operator, &right)?
        },
        Expression::Infix { left,
                            operator,
                            right,
                            .. } => {
            let left = operand!(left, env);
            let right = operand!(right, env);
            eval_infix(*operator, &left, &right)?
        },
        Expression::If { condition,
                         consequence,
                         alternative,
                         .. } => {
            return eval_if(condition, consequence, alternative.as_ref(), env);
        },
        Expression::Function { parameters, body, .. } => {
            Object::Function(Rc::new(Closure { parameters: parameters.clone(),
                                               body:       body.clone(),
                                               env:        Rc::clone(env), }))
        },
        Expression::Macro { parameters, body, .. } => {
            Object::Macro(Rc::new(Closure { parameters: parameters.clone(),
                                            body:       body.clone(),
                                            env:        Rc::clone(env), }))
        },
        Expression::Call { function, arguments, .. } => eval_call(function, arguments, env)?,
        Expression::Index { left, index, .. } => {
            let left = operand!(left, env);
            let index = operand!(index, env);
            eval_index(&left, &index)?
        },
        Expression::Assign { name, value, line } => {
            let value = operand!(value, env);
            eval_assign(name, value, *line, env)?;
            return Ok(None);
        },
        Expression::Error { message, line } => {
            return Err(RuntimeError::at(ErrorKind::Custom(message.clone()), *line));
        },
    };

    Ok(Some(value))
}

/// Resolves a name through the scope chain, then the builtin table.
fn eval_identifier(identifier: &Identifier, env: &Env) -> EvalResult<Object> {
    if let Some(value) = env.borrow().get(&identifier.name) {
        return Ok(value);
    }
    lookup_builtin(&identifier.name).map(Object::Builtin)
                                    .ok_or_else(|| {
                                        RuntimeError::at(ErrorKind::IdentifierNotFound { name: identifier.name.clone() },
                                                         identifier.line)
                                    })
}

/// Evaluates the branch selected by the condition. Without an `else`, a false
/// condition yields `null`.
fn eval_if(condition: &Expression,
           consequence: &BlockStatement,
           alternative: Option<&BlockStatement>,
           env: &Env)
           -> EvalResult<Option<Object>> {
    let condition = operand!(condition, env);

    if condition.is_truthy() {
        eval_block(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env)
    } else {
        Ok(Some(NULL))
    }
}

/// Overwrites an existing binding in the scope that owns it.
fn eval_assign(name: &Identifier, value: Object, line: usize, env: &Env) -> EvalResult<()> {
    if env.borrow_mut().assign(&name.name, value) {
        Ok(())
    } else {
        Err(RuntimeError::at(ErrorKind::NotDefined { name: name.name.clone() }, line))
    }
}
