use std::fmt;

use crate::{
    ast::{Expression, Identifier},
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::{
            core::{EvalResult, eval_block},
            function::{builtin, print},
            quote::quote,
            utils::{operand, operands},
        },
        object::{Closure, Env, Environment, NULL, Object},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values. Argument counts
/// are checked against the table before the handler runs.
type BuiltinFn = fn(&[Object]) -> EvalResult<Object>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Variadic` accepts any number of arguments.
#[derive(Debug, Clone, Copy)]
enum Arity {
    Exact(usize),
    Variadic,
}

/// One entry of the builtin table.
pub struct BuiltinDef {
    /// The name the builtin is called by.
    pub name: &'static str,
    arity:    Arity,
    func:     BuiltinFn,
}

impl fmt::Debug for BuiltinDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinDef")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// Defines builtin functions by generating their lookup table.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces `BUILTIN_TABLE`, searched by [`lookup_builtin`].
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "len"    => { arity: Arity::Exact(1), func: builtin::len },
    "first"  => { arity: Arity::Exact(1), func: builtin::first },
    "last"   => { arity: Arity::Exact(1), func: builtin::last },
    "rest"   => { arity: Arity::Exact(1), func: builtin::rest },
    "push"   => { arity: Arity::Exact(2), func: builtin::push },
    "append" => { arity: Arity::Exact(2), func: builtin::append },
    "add"    => { arity: Arity::Exact(3), func: builtin::add },
    "print"  => { arity: Arity::Variadic, func: print::print },
}

impl Arity {
    /// Fails with `wrong number of arguments` when `n` is not permitted.
    fn check(self, n: usize) -> EvalResult<()> {
        match self {
            Self::Exact(want) if n != want => {
                Err(RuntimeError::new(ErrorKind::WrongArgumentCount { got: n, want }))
            },
            _ => Ok(()),
        }
    }
}

impl BuiltinDef {
    /// Checks the argument count and runs the builtin.
    ///
    /// # Errors
    /// Fails on a wrong argument count or whatever the builtin rejects.
    pub fn call(&self, arguments: &[Object]) -> EvalResult<Object> {
        self.arity.check(arguments.len())?;
        (self.func)(arguments)
    }
}

/// Finds a builtin by name.
///
/// # Example
/// ```
/// use marmoset::interpreter::evaluator::function::core::lookup_builtin;
///
/// assert!(lookup_builtin("len").is_some());
/// assert!(lookup_builtin("printf").is_none());
/// ```
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)
}

/// Evaluates a call expression.
///
/// `quote(...)` is a special form recognized by the callee's name: its
/// argument is not evaluated but captured as syntax. For every other call the
/// callee and then the arguments are evaluated left to right, stopping at the
/// first error or control marker, and the result is applied.
///
/// # Errors
/// Propagates errors from the callee, the arguments, and the call itself.
pub fn eval_call(function: &Expression, arguments: &[Expression], env: &Env) -> EvalResult<Object> {
    if is_named(function, "quote") {
        return quote(arguments, env);
    }

    let callee = operand!(function, env);
    let arguments = operands!(arguments, env);
    apply_function(&callee, &arguments)
}

/// Returns `true` if `expression` is the identifier `name`.
pub(crate) fn is_named(expression: &Expression, name: &str) -> bool {
    matches!(expression, Expression::Identifier(Identifier { name: n, .. }) if n == name)
}

/// Applies a function object to evaluated arguments.
///
/// User-defined functions run their body in a new scope enclosed by the scope
/// they were defined in; a `return` inside is unwrapped here, and a body that
/// produces nothing returns `null`.
///
/// # Errors
/// - `not a function` when `function` is not callable.
/// - `break outside of a loop` when a `break` escapes the body.
/// - Anything the body or the builtin raises.
pub fn apply_function(function: &Object, arguments: &[Object]) -> EvalResult<Object> {
    match function {
        Object::Function(closure) => {
            let env = extend_env(closure, arguments);
            unwrap_return(eval_block(&closure.body, &env)?)
        },
        Object::Builtin(builtin) => builtin.call(arguments),
        other => Err(RuntimeError::new(ErrorKind::NotAFunction { object_type: other.object_type() })),
    }
}

/// Creates the scope for one call of `closure`.
///
/// Parameters are bound positionally. Surplus arguments are ignored and
/// parameters without an argument are bound to `null`.
#[must_use]
pub fn extend_env(closure: &Closure, arguments: &[Object]) -> Env {
    let env = Environment::new_enclosed(&closure.env);
    {
        let mut scope = env.borrow_mut();
        for (index, parameter) in closure.parameters.iter().enumerate() {
            let argument = arguments.get(index).cloned().unwrap_or(NULL);
            scope.set(parameter.name.clone(), argument);
        }
    }
    env
}

/// Turns the outcome of a body into the value of the call.
///
/// # Errors
/// A `break` that escaped every loop in the body.
pub fn unwrap_return(result: Option<Object>) -> EvalResult<Object> {
    match result {
        Some(Object::ReturnValue(value)) => Ok(*value),
        Some(Object::Break) => Err(RuntimeError::new(ErrorKind::BreakOutsideLoop)),
        Some(value) => Ok(value),
        None => Ok(NULL),
    }
}
