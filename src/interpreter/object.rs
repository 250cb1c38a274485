/// Runtime values and their rendering.
///
/// Defines the [`Object`] enum that every evaluation step produces, the type
/// tags used in error messages, and truthiness.
pub mod core;
/// Hash keys and the insertion-ordered hash map behind hash objects.
pub mod hash;
/// Lexical scopes.
///
/// An [`Environment`] maps names to objects and optionally points at the scope
/// that encloses it. Closures keep their defining scope alive by holding a
/// shared reference to it.
pub mod environment;

pub use self::{
    core::{Closure, FALSE, NULL, Object, ObjectType, TRUE},
    environment::{Env, Environment},
    hash::{HashKey, HashObject, HashPair},
};
