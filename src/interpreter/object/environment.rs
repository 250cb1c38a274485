use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::interpreter::object::Object;

/// A shared handle to a scope. Children and closures hold one each, so a scope
/// lives as long as its longest holder.
pub type Env = Rc<RefCell<Environment>>;

/// A single scope: its own bindings plus an optional enclosing scope.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    /// Creates an empty global scope.
    #[must_use]
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates an empty scope nested inside `outer`.
    ///
    /// # Example
    /// ```
    /// use marmoset::interpreter::object::{Environment, Object};
    ///
    /// let global = Environment::new();
    /// global.borrow_mut().set("x", Object::Integer(1));
    ///
    /// let inner = Environment::new_enclosed(&global);
    /// assert_eq!(inner.borrow().get("x"), Some(Object::Integer(1)));
    /// assert!(!inner.borrow().contains_local("x"));
    /// ```
    #[must_use]
    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self { store: HashMap::new(),
                                    outer: Some(Rc::clone(outer)), }))
    }

    /// Resolves `name` in this scope, then outward.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Returns `true` if this scope itself binds `name`.
    #[must_use]
    pub fn contains_local(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Binds `name` in this scope, shadowing outer bindings.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.store.insert(name.into(), value);
    }

    /// Overwrites an existing binding in the scope that owns it.
    ///
    /// Returns `false`, changing nothing, when no scope in the chain binds
    /// `name`.
    pub fn assign(&mut self, name: &str, value: Object) -> bool {
        if let Some(slot) = self.store.get_mut(name) {
            *slot = value;
            return true;
        }
        self.outer
            .as_ref()
            .is_some_and(|outer| outer.borrow_mut().assign(name, value))
    }
}

/// Only the names are shown; values may refer back to this scope.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.store.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("Environment")
         .field("names", &names)
         .field("has_outer", &self.outer.is_some())
         .finish()
    }
}
