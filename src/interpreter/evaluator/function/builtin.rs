use std::{cell::RefCell, rc::Rc};

use crate::{
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::core::EvalResult,
        object::{HashObject, NULL, Object, ObjectType},
    },
    util::num::len_to_int,
};

/// Borrows the array behind the first argument of `function`.
///
/// Fails with `argument to <function> must be ARRAY` for anything else.
fn expect_array(function: &'static str, argument: &Object) -> EvalResult<Rc<RefCell<Vec<Object>>>> {
    match argument {
        Object::Array(elements) => Ok(Rc::clone(elements)),
        other => Err(unexpected(function, ObjectType::Array, other)),
    }
}

fn expect_hash(function: &'static str, argument: &Object) -> EvalResult<Rc<RefCell<HashObject>>> {
    match argument {
        Object::Hash(hash) => Ok(Rc::clone(hash)),
        other => Err(unexpected(function, ObjectType::Hash, other)),
    }
}

/// Views `args` as exactly `N` arguments.
///
/// Fails with `wrong number of arguments` otherwise, so the builtins are safe
/// to call directly and not only through the builtin table.
fn arguments<const N: usize>(args: &[Object]) -> EvalResult<&[Object; N]> {
    args.try_into().map_err(|_| {
                        RuntimeError::new(ErrorKind::WrongArgumentCount { got:  args.len(),
                                                                          want: N, })
                    })
}

fn unexpected(function: &'static str, expected: ObjectType, got: &Object) -> RuntimeError {
    RuntimeError::new(ErrorKind::UnexpectedArgument { function,
                                                      expected,
                                                      got: got.object_type() })
}

/// Returns the length of a string in bytes or of an array in elements.
///
/// # Errors
/// - Any other argument is `argument to `len` not supported`.
/// - Exactly one argument is required.
///
/// # Example
/// ```
/// use marmoset::interpreter::{evaluator::function::builtin::len, object::Object};
///
/// assert_eq!(len(&[Object::from("four")]).unwrap(), Object::Integer(4));
/// assert_eq!(len(&[Object::array(vec![])]).unwrap(), Object::Integer(0));
/// assert_eq!(len(&[Object::Integer(1)]).unwrap_err().message(),
///            "argument to `len` not supported, got INTEGER");
/// ```
pub fn len(args: &[Object]) -> EvalResult<Object> {
    let [argument] = arguments(args)?;
    match argument {
        Object::String(value) => Ok(Object::Integer(len_to_int(value.len()))),
        Object::Array(elements) => Ok(Object::Integer(len_to_int(elements.borrow().len()))),
        other => Err(RuntimeError::new(ErrorKind::UnsupportedArgument { function: "len",
                                                                        got:      other.object_type(), })),
    }
}

/// Generates a builtin that picks one element of an array, or `null` when the
/// array is empty.
macro_rules! element_builtin {
    ($fname:ident, $pick:ident) => {
        #[doc = concat!("Returns the ", stringify!($pick), " element of an array, or `null` when it is empty.")]
        ///
        /// # Errors
        /// Fails when the argument is not an array.
        pub fn $fname(args: &[Object]) -> EvalResult<Object> {
            let [argument] = arguments(args)?;
            let elements = expect_array(stringify!($fname), argument)?;
            let element = elements.borrow().$pick().cloned();
            Ok(element.unwrap_or(NULL))
        }
    };
}

element_builtin!(first, first);
element_builtin!(last, last);

/// Returns a new array holding every element but the first.
///
/// An empty array has no rest and yields `null`.
///
/// # Errors
/// Fails when the argument is not an array.
pub fn rest(args: &[Object]) -> EvalResult<Object> {
    let [argument] = arguments(args)?;
    let elements = expect_array("rest", argument)?;
    let elements = elements.borrow();
    match elements.split_first() {
        Some((_, tail)) => Ok(Object::array(tail.to_vec())),
        None => Ok(NULL),
    }
}

/// Returns a new array with the second argument added at the end. The
/// original array is left untouched.
///
/// # Errors
/// Fails when the first argument is not an array.
pub fn push(args: &[Object]) -> EvalResult<Object> {
    let [array, value] = arguments(args)?;
    let elements = expect_array("push", array)?;
    let mut copy = elements.borrow().clone();
    copy.push(value.clone());
    Ok(Object::array(copy))
}

/// Appends the second argument to the array in place and returns that same
/// array. Every binding that refers to the array sees the new element.
///
/// # Errors
/// Fails when the first argument is not an array.
///
/// # Example
/// ```
/// use marmoset::interpreter::{evaluator::function::builtin::append, object::Object};
///
/// let array = Object::array(vec![Object::Integer(1)]);
/// append(&[array.clone(), Object::Integer(2)]).unwrap();
///
/// assert_eq!(array.to_string(), "[1, 2]");
/// ```
pub fn append(args: &[Object]) -> EvalResult<Object> {
    let [array, value] = arguments(args)?;
    let elements = expect_array("append", array)?;
    elements.borrow_mut().push(value.clone());
    Ok(array.clone())
}

/// Inserts a key and a value into a hash in place and returns the hash.
///
/// # Errors
/// - The first argument is not a hash.
/// - The key is not hashable.
pub fn add(args: &[Object]) -> EvalResult<Object> {
    let [target, key, value] = arguments(args)?;
    let hash = expect_hash("add", target)?;
    hash.borrow_mut().insert(key.clone(), value.clone())?;
    Ok(target.clone())
}
