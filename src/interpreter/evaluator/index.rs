use crate::{
    ast::Expression,
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::{core::EvalResult, utils::operand},
        object::{Env, HashObject, NULL, Object},
    },
    util::num::checked_index,
};

/// Evaluates `left[index]` on already evaluated operands.
///
/// Arrays take integer indices; an index below zero or past the end yields
/// `null`. Hashes take any hashable key; a missing key yields `null`.
///
/// # Errors
/// - `unusable as hash key` when indexing a hash with an unhashable value.
/// - `index operator not supported` for every other combination.
///
/// # Example
/// ```
/// use marmoset::interpreter::{evaluator::index::eval_index, object::Object};
///
/// let array = Object::array(vec![Object::Integer(1), Object::Integer(2)]);
///
/// assert_eq!(eval_index(&array, &Object::Integer(1)).unwrap(), Object::Integer(2));
/// assert_eq!(eval_index(&array, &Object::Integer(2)).unwrap(), Object::Null);
/// assert_eq!(eval_index(&array, &Object::Integer(-1)).unwrap(), Object::Null);
/// ```
pub fn eval_index(left: &Object, index: &Object) -> EvalResult<Object> {
    match (left, index) {
        (Object::Array(elements), Object::Integer(position)) => {
            let elements = elements.borrow();
            Ok(checked_index(*position, elements.len()).and_then(|position| elements.get(position))
                                                       .cloned()
                                                       .unwrap_or(NULL))
        },
        (Object::Hash(hash), key) => {
            let key = key.try_hash_key()?;
            Ok(hash.borrow()
                   .get(&key)
                   .map_or(NULL, |pair| pair.value.clone()))
        },
        _ => Err(RuntimeError::new(ErrorKind::IndexNotSupported { left:  left.object_type(),
                                                                  index: index.object_type(), })),
    }
}

/// Builds a hash from `{key: value, ...}`.
///
/// Pairs are evaluated in source order, key before value. A later duplicate
/// key overwrites the earlier value. A control marker raised by a pair is
/// returned in place of the hash.
///
/// # Errors
/// Propagates errors from the pair expressions and fails with `unusable as
/// hash key` for keys that are not integers, booleans or strings.
pub fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> EvalResult<Object> {
    let mut hash = HashObject::new();

    for (key_node, value_node) in pairs {
        let key = operand!(key_node, env);
        key.try_hash_key()
           .map_err(|error| error.or_line(key_node.line()))?;
        let value = operand!(value_node, env);
        hash.insert(key, value)?;
    }

    Ok(Object::hash(hash))
}
