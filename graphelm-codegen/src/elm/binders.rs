//! Local variable naming.
//!
//! Elm rejects any local name that shadows a top-level value or an
//! enclosing binder. [`Binders`] hands out names that are free in the
//! current scope, numbering them when the preferred name is taken.

use std::collections::HashSet;

/// Names in scope while rendering a declaration body.
#[derive(Debug, Clone, Default)]
pub struct Binders<'a> {
    reserved: Option<&'a HashSet<String>>,
    bound: Vec<String>,
}

impl<'a> Binders<'a> {
    /// Creates a scope on top of the module's top-level values.
    #[must_use]
    pub fn new(reserved: &'a HashSet<String>) -> Self {
        Self {
            reserved: Some(reserved),
            bound: Vec::new(),
        }
    }

    /// Returns true if `name` is a top-level value or already bound.
    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        self.reserved.is_some_and(|r| r.contains(name)) || self.bound.iter().any(|b| b == name)
    }

    /// Binds a fresh name based on `base` and returns it.
    ///
    /// `base` is used as is when free, otherwise `base1`, `base2`, ...
    pub fn bind(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut n = 1;
        while self.is_taken(&name) {
            name = format!("{base}{n}");
            n += 1;
        }
        self.bound.push(name.clone());
        name
    }

    /// Binds one fresh name per entry of `bases`, in order.
    pub fn bind_all(&mut self, bases: &[String]) -> Vec<String> {
        bases.iter().map(|base| self.bind(base)).collect()
    }

    /// Releases the `count` most recently bound names.
    pub fn release(&mut self, count: usize) {
        let keep = self.bound.len().saturating_sub(count);
        self.bound.truncate(keep);
    }
}
