use std::rc::Rc;

use crate::{
    ast::InfixOperator,
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::{
            binary::{scalar::eval_number_infix, string::eval_string_infix},
            core::EvalResult,
        },
        object::Object,
    },
};

/// Applies an infix operator to two evaluated operands.
///
/// Dispatch follows the operand types:
/// - two numbers (integers or floats in any mix) use number arithmetic,
/// - two strings concatenate or compare by value,
/// - `==` and `!=` on anything else compare identity,
/// - other combinations are errors.
///
/// # Errors
/// `type mismatch` when the operand types differ, `unknown operator` when
/// they agree but the operator is not defined for them.
///
/// # Example
/// ```
/// use marmoset::{
///     ast::InfixOperator,
///     interpreter::{evaluator::binary::core::eval_infix, object::Object},
/// };
///
/// let sum = eval_infix(InfixOperator::Plus, &Object::Integer(5), &Object::Float(0.5));
/// assert_eq!(sum.unwrap(), Object::Float(5.5));
///
/// let error = eval_infix(InfixOperator::Plus, &Object::Integer(5), &Object::Boolean(true));
/// assert_eq!(error.unwrap_err().message(), "type mismatch: INTEGER + BOOLEAN");
/// ```
pub fn eval_infix(operator: InfixOperator, left: &Object, right: &Object) -> EvalResult<Object> {
    match (left, right) {
        (Object::Integer(_) | Object::Float(_), Object::Integer(_) | Object::Float(_)) => {
            eval_number_infix(operator, left, right)
        },
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        _ if operator == InfixOperator::Eq => Ok(Object::from_bool(is_identical(left, right))),
        _ if operator == InfixOperator::NotEq => Ok(Object::from_bool(!is_identical(left, right))),
        _ if left.object_type() != right.object_type() => {
            Err(RuntimeError::new(ErrorKind::TypeMismatch { left:     left.object_type(),
                                                            operator: operator.to_string(),
                                                            right:    right.object_type(), }))
        },
        _ => Err(unknown_operator(operator, left, right)),
    }
}

/// The `unknown operator: L op R` error.
pub(super) fn unknown_operator(operator: InfixOperator, left: &Object, right: &Object) -> RuntimeError {
    RuntimeError::new(ErrorKind::UnknownInfixOperator { left:     left.object_type(),
                                                        operator: operator.to_string(),
                                                        right:    right.object_type(), })
}

/// Identity as seen by `==`.
///
/// Booleans and `null` are shared values and compare by value; collections,
/// closures and quotes compare by reference.
fn is_identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Null, Object::Null) => true,
        (Object::Array(l), Object::Array(r)) => Rc::ptr_eq(l, r),
        (Object::Hash(l), Object::Hash(r)) => Rc::ptr_eq(l, r),
        (Object::Function(l), Object::Function(r)) | (Object::Macro(l), Object::Macro(r)) => {
            Rc::ptr_eq(l, r)
        },
        (Object::Builtin(l), Object::Builtin(r)) => l.name == r.name,
        (Object::Quote(l), Object::Quote(r)) => Rc::ptr_eq(l, r),
        _ => false,
    }
}
