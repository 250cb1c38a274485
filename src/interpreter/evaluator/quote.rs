use std::rc::Rc;

use crate::{
    ast::{BlockStatement, Expression, modify::modify_expression},
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::is_named,
            utils::{eval_child, is_control},
        },
        object::{Env, Object},
    },
};

/// Evaluates the `quote(...)` special form.
///
/// The single argument is captured as syntax. Every `unquote(expr)` nested in
/// it is evaluated in `env`, the scope the `quote` call runs in, and the
/// resulting value is spliced back in as syntax.
///
/// # Errors
/// - `wrong number of arguments` unless exactly one argument is given.
/// - Any error raised by an unquoted expression.
/// - `cannot unquote a value of type ...` for values with no literal form.
///
/// # Example
/// ```
/// use marmoset::get_result;
///
/// let result = get_result("quote(unquote(4 + 4) + 1);").unwrap().unwrap();
/// assert_eq!(result.to_string(), "QUOTE((8 + 1))");
/// ```
pub fn quote(arguments: &[Expression], env: &Env) -> EvalResult<Object> {
    let [argument] = arguments else {
        return Err(RuntimeError::new(ErrorKind::WrongArgumentCount { got:  arguments.len(),
                                                                     want: 1, }));
    };

    match modify_expression(argument.clone(), &mut |expression| unquote(expression, env)) {
        Ok(node) => Ok(Object::Quote(Rc::new(node))),
        Err(Halt::Unwind(marker)) => Ok(marker),
        Err(Halt::Error(error)) => Err(error),
    }
}

/// Why splicing stopped before the whole argument was rebuilt.
enum Halt {
    Error(RuntimeError),
    /// A `return` or `break` reached inside an unquoted expression.
    Unwind(Object),
}

impl From<RuntimeError> for Halt {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Replaces an `unquote(expr)` call with the literal form of `expr`'s value.
/// Any other node passes through unchanged.
fn unquote(expression: Expression, env: &Env) -> Result<Expression, Halt> {
    let Expression::Call { function, arguments, line } = expression else {
        return Ok(expression);
    };
    if !is_named(&function, "unquote") {
        return Ok(Expression::Call { function, arguments, line });
    }

    let [argument] = arguments.as_slice() else {
        return Err(RuntimeError::at(ErrorKind::WrongArgumentCount { got:  arguments.len(),
                                                                    want: 1, },
                                    line).into());
    };
    let value = eval_child(argument, env)?;
    if is_control(&value) {
        return Err(Halt::Unwind(value));
    }
    Ok(object_to_node(&value, line)?)
}

/// Converts a value back into an expression that evaluates to an equal value.
///
/// Quotes unwrap to the syntax they carry. Collections become literals of
/// their converted elements.
///
/// # Errors
/// - Functions, builtins, macros and control markers have no literal form.
/// - A collection that contains itself has no finite literal.
///
/// # Example
/// ```
/// use marmoset::interpreter::{evaluator::quote::object_to_node, object::Object};
///
/// let node = object_to_node(&Object::Integer(8), 1).unwrap();
/// assert_eq!(node.to_string(), "8");
///
/// let list = Object::array(vec![Object::from(true), Object::from("a")]);
/// assert_eq!(object_to_node(&list, 1).unwrap().to_string(), "[true, \"a\"]");
/// ```
pub fn object_to_node(object: &Object, line: usize) -> EvalResult<Expression> {
    to_node(object, line, &mut Vec::new())
}

/// `open` holds the collections currently being converted, outermost first.
fn to_node(object: &Object, line: usize, open: &mut Vec<*const ()>) -> EvalResult<Expression> {
    let Some(address) = object.collection_address() else {
        return scalar_to_node(object, line);
    };
    if open.contains(&address) {
        return Err(RuntimeError::at(ErrorKind::UnquoteCycle { object_type: object.object_type() },
                                    line));
    }

    open.push(address);
    let node = match object {
        Object::Array(elements) => {
            let elements = elements.borrow()
                                   .iter()
                                   .map(|element| to_node(element, line, open))
                                   .collect::<EvalResult<Vec<_>>>()?;
            Expression::ArrayLiteral { elements, line }
        },
        Object::Hash(hash) => {
            let pairs = hash.borrow()
                            .iter()
                            .map(|pair| Ok((to_node(&pair.key, line, open)?, to_node(&pair.value, line, open)?)))
                            .collect::<EvalResult<Vec<_>>>()?;
            Expression::HashLiteral { pairs, line }
        },
        other => return scalar_to_node(other, line),
    };
    open.pop();

    Ok(node)
}

fn scalar_to_node(object: &Object, line: usize) -> EvalResult<Expression> {
    Ok(match object {
        Object::Integer(value) => Expression::IntegerLiteral { value: *value, line },
        Object::Float(value) => Expression::FloatLiteral { value: *value, line },
        Object::Boolean(value) => Expression::BooleanLiteral { value: *value, line },
        Object::String(value) => Expression::StringLiteral { value: value.to_string(),
                                                             line },
        Object::Quote(node) => node.as_ref().clone(),
        // No null literal exists; an `if` without `else` on a false condition
        // evaluates to null.
        Object::Null => Expression::If { condition: Box::new(Expression::BooleanLiteral { value: false,
                                                                                          line }),
                                         consequence: BlockStatement { statements: Vec::new(),
                                                                       line },
                                         alternative: None,
                                         line },
        other => {
            return Err(RuntimeError::at(ErrorKind::UnquoteUnsupported { object_type: other.object_type() },
                                        line));
        },
    })
}
