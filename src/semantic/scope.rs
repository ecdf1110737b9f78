//! Lexical scope stack
//!
//! Scopes are pushed when the analyzer enters a function, an `if` or a
//! `while`, and popped when it leaves. Lookups search from the innermost
//! scope outwards; definitions only ever touch the innermost scope.

use crate::parser::ast::Type;
use rustc_hash::FxHashMap;

/// Stack of name -> type bindings, innermost last
#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<FxHashMap<String, Type>>,
}

impl ScopeStack {
    /// A stack holding only the empty global scope
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope. The global scope is never popped.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Innermost binding of `name`
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Bind `name` in the innermost scope.
    ///
    /// Returns false, leaving the existing binding untouched, when the name
    /// is already bound in that scope.
    pub fn define(&mut self, name: &str, ty: Type) -> bool {
        let Some(scope) = self.scopes.last_mut() else {
            return false;
        };
        if scope.contains_key(name) {
            return false;
        }
        scope.insert(name.to_string(), ty);
        true
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::BaseType;

    #[test]
    fn test_lookup_prefers_innermost() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.define("x", Type::int()));
        scopes.push();
        assert!(scopes.define("x", Type::new(BaseType::Byte)));

        assert_eq!(scopes.lookup("x"), Some(&Type::new(BaseType::Byte)));
        scopes.pop();
        assert_eq!(scopes.lookup("x"), Some(&Type::int()));
    }

    #[test]
    fn test_redefinition_keeps_first_binding() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.define("x", Type::int()));
        assert!(!scopes.define("x", Type::new(BaseType::Long)));
        assert_eq!(scopes.lookup("x"), Some(&Type::int()));
    }

    #[test]
    fn test_inner_names_vanish_on_pop() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        assert!(scopes.define("tmp", Type::int()));
        assert_eq!(scopes.lookup("tmp"), Some(&Type::int()));
        scopes.pop();

        assert_eq!(scopes.lookup("tmp"), None);
        assert!(scopes.define("tmp", Type::int()));
    }

    #[test]
    fn test_global_scope_survives_extra_pop() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.define("g", Type::int()));
        scopes.pop();
        scopes.pop();

        assert_eq!(scopes.lookup("g"), Some(&Type::int()));
        assert!(!scopes.define("g", Type::int()));
    }
}
