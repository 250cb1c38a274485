use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::{BlockStatement, Expression, Identifier},
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::BuiltinDef,
        object::{Env, HashObject},
    },
};

/// The type tag of an [`Object`], as it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// `INTEGER`
    Integer,
    /// `FLOAT`
    Float,
    /// `BOOLEAN`
    Boolean,
    /// `STRING`
    String,
    /// `ARRAY`
    Array,
    /// `HASH`
    Hash,
    /// `FUNCTION`
    Function,
    /// `BUILTIN`
    Builtin,
    /// `RETURN_VALUE`
    ReturnValue,
    /// `ERROR`
    Error,
    /// `NULL`
    Null,
    /// `QUOTE`
    Quote,
    /// `MACRO`
    Macro,
    /// `BREAK`
    Break,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Integer => "INTEGER",
                        Self::Float => "FLOAT",
                        Self::Boolean => "BOOLEAN",
                        Self::String => "STRING",
                        Self::Array => "ARRAY",
                        Self::Hash => "HASH",
                        Self::Function => "FUNCTION",
                        Self::Builtin => "BUILTIN",
                        Self::ReturnValue => "RETURN_VALUE",
                        Self::Error => "ERROR",
                        Self::Null => "NULL",
                        Self::Quote => "QUOTE",
                        Self::Macro => "MACRO",
                        Self::Break => "BREAK",
                    })
    }
}

/// A user-defined function or macro together with the scope it was created
/// in.
pub struct Closure {
    /// Parameter names, bound positionally on each call.
    pub parameters: Vec<Identifier>,
    /// The body.
    pub body:       BlockStatement,
    /// The defining scope.
    pub env:        Env,
}

impl Closure {
    fn fmt_with_keyword(&self, keyword: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters = self.parameters
                             .iter()
                             .map(|p| p.name.as_str())
                             .collect::<Vec<_>>()
                             .join(", ");
        write!(f, "{keyword}({parameters}) {{\n{}\n}}", self.body)
    }
}

/// The captured scope is left out: it may contain the closure itself.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
         .field("parameters", &self.parameters)
         .field("body", &self.body)
         .finish_non_exhaustive()
    }
}

/// A runtime value.
///
/// Scalars are plain values. Arrays and hashes are shared and mutable, so two
/// bindings can alias the same collection. `ReturnValue` and `Break` are
/// control-flow markers that never escape the construct they target.
#[derive(Debug, Clone)]
pub enum Object {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit float.
    Float(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// An immutable string.
    String(Rc<str>),
    /// A shared, mutable list.
    Array(Rc<RefCell<Vec<Self>>>),
    /// A shared, mutable map.
    Hash(Rc<RefCell<HashObject>>),
    /// A user-defined function.
    Function(Rc<Closure>),
    /// A host function from the builtin table.
    Builtin(&'static BuiltinDef),
    /// A value travelling up to the enclosing function call.
    ReturnValue(Box<Self>),
    /// A runtime failure as a value.
    Error(RuntimeError),
    /// The null value.
    Null,
    /// A piece of syntax captured by `quote`.
    Quote(Rc<Expression>),
    /// A macro, only ever bound in the macro scope.
    Macro(Rc<Closure>),
    /// Leaves the innermost loop.
    Break,
}

/// The shared null value.
pub const NULL: Object = Object::Null;
/// The shared `true` value.
pub const TRUE: Object = Object::Boolean(true);
/// The shared `false` value.
pub const FALSE: Object = Object::Boolean(false);

impl Object {
    /// The type tag used in error messages.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Integer(_) => ObjectType::Integer,
            Self::Float(_) => ObjectType::Float,
            Self::Boolean(_) => ObjectType::Boolean,
            Self::String(_) => ObjectType::String,
            Self::Array(_) => ObjectType::Array,
            Self::Hash(_) => ObjectType::Hash,
            Self::Function(_) => ObjectType::Function,
            Self::Builtin(_) => ObjectType::Builtin,
            Self::ReturnValue(_) => ObjectType::ReturnValue,
            Self::Error(_) => ObjectType::Error,
            Self::Null => ObjectType::Null,
            Self::Quote(_) => ObjectType::Quote,
            Self::Macro(_) => ObjectType::Macro,
            Self::Break => ObjectType::Break,
        }
    }

    /// Converts a Rust boolean into the shared boolean objects.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }

    /// Wraps a list of objects into a new array.
    #[must_use]
    pub fn array(elements: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(elements)))
    }

    /// Wraps a hash map into a new hash object.
    #[must_use]
    pub fn hash(hash: HashObject) -> Self {
        Self::Hash(Rc::new(RefCell::new(hash)))
    }

    /// Truthiness: `null`, `false` and numeric zero are false, everything else
    /// is true.
    ///
    /// # Example
    /// ```
    /// use marmoset::interpreter::object::Object;
    ///
    /// assert!(!Object::Null.is_truthy());
    /// assert!(!Object::Integer(0).is_truthy());
    /// assert!(!Object::Float(0.0).is_truthy());
    /// assert!(Object::from("").is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(value) => *value,
            Self::Integer(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            _ => true,
        }
    }

    /// The human-readable rendering used by the REPL and by `print`.
    #[must_use]
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Object {
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<RuntimeError> for Object {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Structural equality for data, identity for closures and builtins.
///
/// This is the comparison used by tests and by the host. The language's own
/// `==` operator lives in the evaluator and compares collections by identity.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Hash(a), Self::Hash(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Function(a), Self::Function(b)) | (Self::Macro(a), Self::Macro(b)) => {
                Rc::ptr_eq(a, b)
            },
            (Self::Builtin(a), Self::Builtin(b)) => a.name == b.name,
            (Self::ReturnValue(a), Self::ReturnValue(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Quote(a), Self::Quote(b)) => a == b,
            (Self::Null, Self::Null) | (Self::Break, Self::Break) => true,
            _ => false,
        }
    }
}

impl Object {
    /// The address of the shared storage behind an array or hash, used to
    /// spot a collection that contains itself.
    #[must_use]
    pub(crate) fn collection_address(&self) -> Option<*const ()> {
        match self {
            Self::Array(elements) => Some(Rc::as_ptr(elements).cast()),
            Self::Hash(hash) => Some(Rc::as_ptr(hash).cast()),
            _ => None,
        }
    }

    /// Writes the rendering of `self`. `open` holds the collections whose
    /// rendering is in progress; meeting one of them again prints `[...]` or
    /// `{...}` instead of recursing.
    pub(super) fn render(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<*const ()>) -> fmt::Result {
        if let Some(address) = self.collection_address() {
            if open.contains(&address) {
                return f.write_str(if matches!(self, Self::Hash(_)) { "{...}" } else { "[...]" });
            }
            open.push(address);
            let result = match self {
                Self::Array(elements) => render_elements(&elements.borrow(), f, open),
                Self::Hash(hash) => hash.borrow().render(f, open),
                _ => Ok(()),
            };
            open.pop();
            return result;
        }

        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::Function(closure) => closure.fmt_with_keyword("fn", f),
            Self::Macro(closure) => closure.fmt_with_keyword("macro", f),
            Self::Builtin(_) => f.write_str("builtin function"),
            Self::ReturnValue(value) => value.render(f, open),
            Self::Error(error) => write!(f, "ERROR: {}", error.message()),
            Self::Null => f.write_str("null"),
            Self::Quote(node) => write!(f, "QUOTE({node})"),
            Self::Break => f.write_str("break"),
            Self::Array(_) | Self::Hash(_) => Ok(()),
        }
    }
}

fn render_elements(elements: &[Object], f: &mut fmt::Formatter<'_>, open: &mut Vec<*const ()>) -> fmt::Result {
    f.write_str("[")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        element.render(f, open)?;
    }
    f.write_str("]")
}

/// Collections that contain themselves render the inner occurrence as
/// `[...]` or `{...}`.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &mut Vec::new())
    }
}
