//! Scope Manager (§3.6): a lexical scope stack for name resolution.
//!
//! Grounded on the teacher's `compile::scope` module, which pushes one
//! frame per struct/array wrapper while compiling a query; here a frame is
//! pushed per block-like construct (function body, `if`/`while`/`for`
//! body, `match` arm) and resolution walks outward until a binding or the
//! module scope is found.

use std::collections::HashMap;

use lattice_core::{DeclId, StrId};

struct Scope {
    bindings: HashMap<StrId, DeclId>,
}

pub struct ScopeManager {
    scopes: Vec<Scope>,
}

impl ScopeManager {
    /// Starts with one module-level scope; it is never popped.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope { bindings: HashMap::new() }],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope { bindings: HashMap::new() });
    }

    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "module scope must never be popped");
        self.scopes.pop();
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Binds `name` in the innermost scope, returning the previous binding
    /// it shadows, if any (same name rebound in the same scope).
    pub fn define(&mut self, name: StrId, decl: DeclId) -> Option<DeclId> {
        self.scopes.last_mut().unwrap().bindings.insert(name, decl)
    }

    /// Walks from the innermost scope outward, returning the first match.
    pub fn resolve(&self, name: StrId) -> Option<DeclId> {
        self.scopes.iter().rev().find_map(|scope| scope.bindings.get(&name).copied())
    }
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::Interner;

    #[test]
    fn inner_binding_shadows_outer() {
        let interner = Interner::new();
        let mut scopes = ScopeManager::new();
        let name = interner.intern_str("x");
        scopes.define(name, DeclId::new(0));
        scopes.push_scope();
        scopes.define(name, DeclId::new(1));
        assert_eq!(scopes.resolve(name), Some(DeclId::new(1)));
        scopes.pop_scope();
        assert_eq!(scopes.resolve(name), Some(DeclId::new(0)));
    }

    #[test]
    fn unbound_name_resolves_to_none() {
        let interner = Interner::new();
        let scopes = ScopeManager::new();
        assert_eq!(scopes.resolve(interner.intern_str("missing")), None);
    }
}
