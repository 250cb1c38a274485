use crate::{
    ast::InfixOperator,
    interpreter::{
        evaluator::{binary::core::unknown_operator, core::EvalResult},
        object::Object,
    },
};

/// `+` concatenates; `==` and `!=` compare contents.
///
/// # Errors
/// Any other operator is an `unknown operator: STRING <op> STRING` error.
pub fn eval_string_infix(operator: InfixOperator, left: &str, right: &str) -> EvalResult<Object> {
    match operator {
        InfixOperator::Plus => Ok(Object::from(format!("{left}{right}"))),
        InfixOperator::Eq => Ok(Object::from_bool(left == right)),
        InfixOperator::NotEq => Ok(Object::from_bool(left != right)),
        _ => Err(unknown_operator(operator, &Object::from(left), &Object::from(right))),
    }
}
