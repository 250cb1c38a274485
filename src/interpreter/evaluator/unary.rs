use crate::{
    ast::PrefixOperator,
    error::{ErrorKind, RuntimeError},
    interpreter::{evaluator::core::EvalResult, object::Object},
    util::num::int_to_float,
};

/// Applies a prefix operator to an evaluated operand.
///
/// `!` negates truthiness and accepts any operand. `-` negates integers and
/// floats; an integer that cannot be negated in range becomes a float.
///
/// # Errors
/// `-` on anything but a number is an `unknown operator` error.
///
/// # Example
/// ```
/// use marmoset::{
///     ast::PrefixOperator,
///     interpreter::{evaluator::unary::eval_prefix, object::Object},
/// };
///
/// assert_eq!(eval_prefix(PrefixOperator::Bang, &Object::Integer(0)).unwrap(),
///            Object::Boolean(true));
/// assert_eq!(eval_prefix(PrefixOperator::Minus, &Object::Float(2.5)).unwrap(),
///            Object::Float(-2.5));
/// assert!(eval_prefix(PrefixOperator::Minus, &Object::Boolean(true)).is_err());
/// ```
pub fn eval_prefix(operator: PrefixOperator, right: &Object) -> EvalResult<Object> {
    match operator {
        PrefixOperator::Bang => Ok(Object::from_bool(!right.is_truthy())),
        PrefixOperator::Minus => eval_minus(right),
    }
}

fn eval_minus(right: &Object) -> EvalResult<Object> {
    match right {
        Object::Integer(value) => {
            Ok(value.checked_neg()
                    .map_or_else(|| Object::Float(-int_to_float(*value)), Object::Integer))
        },
        Object::Float(value) => Ok(Object::Float(-value)),
        other => Err(RuntimeError::new(ErrorKind::UnknownPrefixOperator { operator: PrefixOperator::Minus.to_string(),
                                                                           operand:  other.object_type(), })),
    }
}
