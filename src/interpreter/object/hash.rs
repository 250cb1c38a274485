use std::{collections::HashMap, fmt};

use sha2::{Digest, Sha256};

use crate::{
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::core::EvalResult,
        object::{Object, ObjectType},
    },
};

/// The key under which a hashable object is stored in a hash.
///
/// Keys carry the type tag, so `1`, `true` and `"1"` never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    /// Type of the original key object.
    pub object_type: ObjectType,
    /// The derived key value.
    pub value:       u64,
}

impl Object {
    /// Derives the hash key of an integer, boolean or string.
    ///
    /// Integers map to their two's-complement bits, booleans to `0` and `1`,
    /// and strings to the first eight bytes of the SHA-256 digest of their
    /// UTF-8 content. Other objects have no key.
    ///
    /// # Example
    /// ```
    /// use marmoset::interpreter::object::Object;
    ///
    /// let hello1 = Object::from("Hello World");
    /// let hello2 = Object::from("Hello World");
    /// let other = Object::from("My name is johnny");
    ///
    /// assert_eq!(hello1.hash_key(), hello2.hash_key());
    /// assert_ne!(hello1.hash_key(), other.hash_key());
    /// assert_eq!(Object::Null.hash_key(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Self::Integer(value) => *value as u64,
            Self::Boolean(value) => u64::from(*value),
            Self::String(value) => string_digest(value),
            _ => return None,
        };
        Some(HashKey { object_type: self.object_type(),
                       value })
    }

    /// Like [`Object::hash_key`], failing with `unusable as hash key` for
    /// objects without one.
    ///
    /// # Errors
    /// Returns `UnusableHashKey` for anything but integers, booleans and
    /// strings.
    pub fn try_hash_key(&self) -> EvalResult<HashKey> {
        self.hash_key().ok_or_else(|| {
                           RuntimeError::new(ErrorKind::UnusableHashKey { object_type: self.object_type() })
                       })
    }
}

fn string_digest(value: &str) -> u64 {
    let digest = Sha256::digest(value.as_bytes());
    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// One entry of a hash: the original key object and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    /// The key as the program wrote it.
    pub key:   Object,
    /// The stored value.
    pub value: Object,
}

/// The map behind hash objects.
///
/// Lookups go through [`HashKey`]s; iteration and rendering follow insertion
/// order. Overwriting a key keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct HashObject {
    pairs: HashMap<HashKey, HashPair>,
    order: Vec<HashKey>,
}

impl HashObject {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` mapped to `value`, replacing any previous value.
    ///
    /// # Errors
    /// Fails when `key` is not hashable.
    pub fn insert(&mut self, key: Object, value: Object) -> EvalResult<()> {
        let hash_key = key.try_hash_key()?;
        if self.pairs.insert(hash_key, HashPair { key, value }).is_none() {
            self.order.push(hash_key);
        }
        Ok(())
    }

    /// Looks up the pair stored under `key`.
    #[must_use]
    pub fn get(&self, key: &HashKey) -> Option<&HashPair> {
        self.pairs.get(key)
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HashPair> {
        self.order.iter().filter_map(|key| self.pairs.get(key))
    }
}

impl PartialEq for HashObject {
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl HashObject {
    pub(super) fn render(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<*const ()>) -> fmt::Result {
        f.write_str("{")?;
        for (i, pair) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            pair.key.render(f, open)?;
            f.write_str(": ")?;
            pair.value.render(f, open)?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for HashObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &mut Vec::new())
    }
}
