use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// Represents a lexical scope: a mapping of names to values with a link to
/// the enclosing scope. A new environment is created on block entry, function
/// call and method binding; closures keep their environment alive after the
/// block that created it exits.
#[derive(Debug)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            values: HashMap::new(),
        }
    }

    /// Binds a name in this scope, overwriting any previous binding.
    pub fn define(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_string(), value);
    }

    /// Returns the environment `distance` hops up the enclosing chain.
    /// The resolver guarantees the chain is deep enough for every distance
    /// it hands out.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let parent = self.enclosing.clone()
            .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", 1));
        let mut environment = Rc::clone(&parent);

        for depth in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", depth + 1));
            environment = parent;
        }

        environment
    }

    /// Looks a name up through the scope chain.
    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Reads a name from the scope a known distance away.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Object> {
        if distance == 0 {
            self.values.get(name).cloned()
        } else {
            self.ancestor(distance).borrow().values.get(name).cloned()
        }
    }

    /// Assigns to an existing name, searching up the scope chain.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    /// Assigns to a name in the scope a known distance away.
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Object) {
        if distance == 0 {
            self.values.insert(name.to_string(), value);
        } else {
            self.ancestor(distance).borrow_mut().values.insert(name.to_string(), value);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}
