//! Profile gates restricting the accepted language subset (§4.4.5, Design
//! Note §9: "Rewrite [ambient singletons] as explicit context objects passed
//! into the parser and resolvers rather than ambient singletons").
//!
//! `Profile` is the per-compilation feature-subset selector (`min`,
//! `sovereign`, `service`, ...). `GateStack` is lexically scoped: a parser
//! pushes a gate on entering a restricted construct and the guard pops it on
//! drop, mirroring the teacher's recursion-fuel-as-RAII pattern in
//! `plotnik-lib::parser::core` (`enter_recursion`/`exit_recursion`).

use std::collections::HashSet;

/// A named profile, e.g. `"min"`, `"sovereign"`, `"service"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Profile(pub String);

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// A lexically scoped restriction on the accepted source-kind set, keyed by
/// an opaque `u32` tag the host assigns to each distinct source token kind
/// (the Token Mapper's input taxonomy, §6). `S0` in the spec is one such
/// gate; hosts may define others per profile.
#[derive(Debug, Clone)]
pub struct Gate {
    pub name: &'static str,
    allowed: HashSet<u32>,
}

impl Gate {
    pub fn new(name: &'static str, allowed: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name,
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn allows(&self, source_kind_tag: u32) -> bool {
        self.allowed.contains(&source_kind_tag)
    }
}

/// Stack of active gates. `push` returns a guard; dropping the guard pops the
/// gate, so a single misplaced `?` or early return can't leave a gate active
/// past its lexical scope.
#[derive(Debug, Default)]
pub struct GateStack {
    stack: Vec<Gate>,
}

impl GateStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `gate`, returning a guard that pops it again on drop.
    pub fn push(&mut self, gate: Gate) -> GateGuard<'_> {
        self.stack.push(gate);
        GateGuard { stack: self }
    }

    /// True iff every active gate allows `source_kind_tag`; vacuously true
    /// with no active gates.
    pub fn allows(&self, source_kind_tag: u32) -> bool {
        self.stack.iter().all(|g| g.allows(source_kind_tag))
    }

    /// The innermost active gate that rejects `source_kind_tag`, if any.
    pub fn first_violation(&self, source_kind_tag: u32) -> Option<&Gate> {
        self.stack.iter().rev().find(|g| !g.allows(source_kind_tag))
    }
}

/// RAII guard popping its gate when dropped.
pub struct GateGuard<'a> {
    stack: &'a mut GateStack,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.stack.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_restricts_and_unwinds_on_drop() {
        let mut gates = GateStack::new();
        assert!(gates.allows(7));
        {
            let _guard = gates.push(Gate::new("S0", [1, 2, 3]));
            assert!(gates.allows(1));
            assert!(!gates.allows(7));
        }
        assert!(gates.allows(7));
    }

    #[test]
    fn nested_gates_intersect() {
        let mut gates = GateStack::new();
        let _outer = gates.push(Gate::new("S0", [1, 2, 3]));
        {
            let _inner = gates.push(Gate::new("S0-strict", [1]));
            assert!(gates.allows(1));
            assert!(!gates.allows(2));
        }
        assert!(gates.allows(2));
    }
}
