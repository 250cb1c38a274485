use crate::{
    ast::InfixOperator,
    interpreter::{evaluator::core::EvalResult, object::Object},
    util::num::{int_to_float, truncate_to_int},
};

/// Applies an arithmetic or comparison operator to two numbers.
///
/// Both operands are widened to `f64` and the operation runs there. When both
/// operands were integers, an arithmetic result is truncated toward zero and
/// returned as an integer; a result that is not finite or does not fit an
/// `i64` (such as `1 / 0`) stays a float. Division by zero is not an error.
///
/// # Example
/// ```
/// use marmoset::{
///     ast::InfixOperator,
///     interpreter::{evaluator::binary::scalar::eval_number_infix, object::Object},
/// };
///
/// let quotient = eval_number_infix(InfixOperator::Slash, &Object::Integer(7), &Object::Integer(2));
/// assert_eq!(quotient.unwrap(), Object::Integer(3));
///
/// let negative = eval_number_infix(InfixOperator::Slash, &Object::Integer(-7), &Object::Integer(2));
/// assert_eq!(negative.unwrap(), Object::Integer(-3));
/// ```
///
/// # Errors
/// Never fails for numeric operands.
#[allow(clippy::float_cmp)]
pub fn eval_number_infix(operator: InfixOperator, left: &Object, right: &Object) -> EvalResult<Object> {
    let both_integers = matches!((left, right), (Object::Integer(_), Object::Integer(_)));
    let l = as_float(left);
    let r = as_float(right);

    let result = match operator {
        InfixOperator::Plus => l + r,
        InfixOperator::Minus => l - r,
        InfixOperator::Asterisk => l * r,
        InfixOperator::Slash => l / r,
        comparison => {
            let outcome = match comparison {
                InfixOperator::Lt => l < r,
                InfixOperator::Gt => l > r,
                InfixOperator::LtEq => l <= r,
                InfixOperator::GtEq => l >= r,
                InfixOperator::Eq => l == r,
                _ => l != r,
            };
            return Ok(Object::from_bool(outcome));
        },
    };

    Ok(make_number(result, both_integers))
}

fn as_float(object: &Object) -> f64 {
    match object {
        Object::Integer(value) => int_to_float(*value),
        Object::Float(value) => *value,
        _ => f64::NAN,
    }
}

fn make_number(value: f64, as_integer: bool) -> Object {
    if as_integer && let Some(integer) = truncate_to_int(value) {
        return Object::Integer(integer);
    }
    Object::Float(value)
}
