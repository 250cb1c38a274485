use std::{convert::Infallible, rc::Rc};

use log::debug;

use crate::{
    ast::{Expression, Identifier, Program, Statement, modify::modify_program},
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::{
            core::eval_block,
            function::core::{extend_env, unwrap_return},
        },
        object::{Closure, Env, Object},
    },
};

/// Moves top-level macro definitions out of `program` into `macro_env`.
///
/// A definition is a statement of the form `let <name> = macro(...) { ... };`
/// at the top level of the program. Each one is bound in `macro_env` and
/// removed from the program; every other statement keeps its place. Macros
/// defined inside blocks are left alone and evaluate like ordinary values.
///
/// # Example
/// ```
/// use marmoset::interpreter::{
///     macro_expansion::define_macros,
///     object::Environment,
///     parser::parse,
/// };
///
/// let (mut program, _) = parse("let number = 1; let mymacro = macro(x, y) { x + y; };");
/// let macro_env = Environment::new();
/// define_macros(&mut program, &macro_env);
///
/// assert_eq!(program.statements.len(), 1);
/// assert!(macro_env.borrow().get("mymacro").is_some());
/// assert!(macro_env.borrow().get("number").is_none());
/// ```
pub fn define_macros(program: &mut Program, macro_env: &Env) {
    let statements = std::mem::take(&mut program.statements);

    for statement in statements {
        match statement {
            Statement::Let { name,
                             value: Expression::Macro { parameters, body, .. },
                             .. } => {
                debug!("defining macro `{}` with {} parameter(s)", name.name, parameters.len());
                let closure = Closure { parameters,
                                        body,
                                        env: Rc::clone(macro_env) };
                macro_env.borrow_mut()
                         .set(name.name, Object::Macro(Rc::new(closure)));
            },
            other => program.statements.push(other),
        }
    }
}

/// Replaces every call to a macro bound in `macro_env` with the syntax the
/// macro returns.
///
/// Arguments are handed to the macro unevaluated, as quotes. The macro body
/// runs in a scope enclosed by the macro's defining scope and must return a
/// quote, whose syntax is spliced in place of the call. A macro that fails or
/// returns anything else leaves an error node behind, which raises the error
/// once the program is evaluated.
///
/// # Example
/// ```
/// use marmoset::interpreter::{
///     macro_expansion::{define_macros, expand_macros},
///     object::Environment,
///     parser::parse,
/// };
///
/// let source = "let reverse = macro(a, b) { quote(unquote(b) - unquote(a)); };
///               reverse(2 + 2, 10 - 5);";
/// let (mut program, _) = parse(source);
/// let macro_env = Environment::new();
/// define_macros(&mut program, &macro_env);
///
/// let expanded = expand_macros(program, &macro_env);
/// assert_eq!(expanded.to_string(), "((10 - 5) - (2 + 2));");
/// ```
#[must_use]
pub fn expand_macros(program: Program, macro_env: &Env) -> Program {
    let expanded = modify_program(program, &mut |expression| {
        Ok::<_, Infallible>(expand_call(expression, macro_env))
    });
    match expanded {
        Ok(program) => program,
        Err(never) => match never {},
    }
}

/// Expands `expression` if it is a call to a known macro.
fn expand_call(expression: Expression, macro_env: &Env) -> Expression {
    let Expression::Call { function, arguments, line } = expression else {
        return expression;
    };
    let Some(closure) = lookup_macro(&function, macro_env) else {
        return Expression::Call { function, arguments, line };
    };

    debug!("expanding macro call on line {line}");
    let arguments = arguments.into_iter()
                             .map(|argument| Object::Quote(Rc::new(argument)))
                             .collect::<Vec<_>>();
    let env = extend_env(&closure, &arguments);

    match eval_block(&closure.body, &env).and_then(unwrap_return) {
        Ok(Object::Quote(node)) => Rc::unwrap_or_clone(node),
        Ok(_) => error_node(RuntimeError::at(ErrorKind::MacroResultNotAst, line), line),
        Err(error) => error_node(error, line),
    }
}

fn lookup_macro(function: &Expression, macro_env: &Env) -> Option<Rc<Closure>> {
    let Expression::Identifier(Identifier { name, .. }) = function else {
        return None;
    };
    match macro_env.borrow().get(name) {
        Some(Object::Macro(closure)) => Some(closure),
        _ => None,
    }
}

fn error_node(error: RuntimeError, line: usize) -> Expression {
    Expression::Error { message: error.message(),
                        line:    error.line.unwrap_or(line), }
}
