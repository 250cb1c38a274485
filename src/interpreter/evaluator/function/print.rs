use crate::interpreter::{
    evaluator::core::EvalResult,
    object::{NULL, Object},
};

/// Prints every argument to standard output, one per line, and returns
/// `null`.
///
/// Arguments are rendered with [`Object::inspect`], so strings appear without
/// quotes.
///
/// # Example
/// ```
/// use marmoset::interpreter::{evaluator::function::print::print, object::Object};
///
/// // The function prints to stdout; the doctest only checks the result.
/// let result = print(&[Object::Integer(42), Object::from("hi")]).unwrap();
///
/// assert_eq!(result, Object::Null);
/// ```
pub fn print(args: &[Object]) -> EvalResult<Object> {
    for argument in args {
        println!("{}", argument.inspect());
    }
    Ok(NULL)
}
