/// Calls, argument binding, and the builtin table.
pub mod core;

/// Collection builtins: `len`, `first`, `last`, `rest`, `push`, `append` and
/// `add`.
pub mod builtin;

/// The `print` builtin.
///
/// Writes each argument's rendering to standard output.
pub mod print;
