//! Type Registry (§3.6): interned named types arranged in a single-parent
//! supertype hierarchy, the substrate the Specificity Analyzer and
//! Conversion Registry both build on.

use std::collections::HashMap;

use lattice_core::{StrId, TypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRelation {
    Same,
    Subtype,
    Supertype,
    Unrelated,
}

struct TypeEntry {
    name: StrId,
    supertype: Option<TypeId>,
    depth: u32,
}

/// Registers every named type a Unit declares (structs, enums, unions,
/// primitives) and answers subtype/depth queries in O(depth).
///
/// Grounded on the teacher's `analyze::type_check::symbol` table: types are
/// registered once, by name, and referred to everywhere else by id.
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    by_name: HashMap<StrId, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register `name` with the given supertype (`None` for a root type).
    /// Idempotent: re-registering an already-known name returns its
    /// existing id, ignoring the supertype argument.
    pub fn register(&mut self, name: StrId, supertype: Option<TypeId>) -> TypeId {
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let depth = supertype.map_or(0, |s| self.entries[s.index()].depth + 1);
        let id = TypeId::new(self.entries.len() as u32);
        self.entries.push(TypeEntry { name, supertype, depth });
        self.by_name.insert(name, id);
        id
    }

    pub fn lookup(&self, name: StrId) -> Option<TypeId> {
        self.by_name.get(&name).copied()
    }

    pub fn name(&self, id: TypeId) -> StrId {
        self.entries[id.index()].name
    }

    pub fn supertype(&self, id: TypeId) -> Option<TypeId> {
        self.entries[id.index()].supertype
    }

    pub fn depth(&self, id: TypeId) -> u32 {
        self.entries[id.index()].depth
    }

    /// Walks from `id` toward the root, collecting itself first.
    pub fn ancestry(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.supertype(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    pub fn is_subtype(&self, sub: TypeId, of: TypeId) -> bool {
        sub == of || self.ancestry(sub).contains(&of)
    }

    pub fn relation(&self, a: TypeId, b: TypeId) -> TypeRelation {
        if a == b {
            TypeRelation::Same
        } else if self.is_subtype(a, b) {
            TypeRelation::Subtype
        } else if self.is_subtype(b, a) {
            TypeRelation::Supertype
        } else {
            TypeRelation::Unrelated
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::Interner;

    #[test]
    fn registering_the_same_name_twice_is_idempotent() {
        let interner = Interner::new();
        let mut registry = TypeRegistry::new();
        let name = interner.intern_str("Animal");
        let a = registry.register(name, None);
        let b = registry.register(name, None);
        assert_eq!(a, b);
    }

    #[test]
    fn subtype_chain_walks_to_root() {
        let interner = Interner::new();
        let mut registry = TypeRegistry::new();
        let animal = registry.register(interner.intern_str("Animal"), None);
        let dog = registry.register(interner.intern_str("Dog"), Some(animal));
        let puppy = registry.register(interner.intern_str("Puppy"), Some(dog));
        assert!(registry.is_subtype(puppy, animal));
        assert_eq!(registry.depth(puppy), 2);
        assert_eq!(registry.relation(puppy, animal), TypeRelation::Subtype);
        assert_eq!(registry.relation(animal, puppy), TypeRelation::Supertype);
    }

    #[test]
    fn unrelated_types_report_unrelated() {
        let interner = Interner::new();
        let mut registry = TypeRegistry::new();
        let a = registry.register(interner.intern_str("A"), None);
        let b = registry.register(interner.intern_str("B"), None);
        assert_eq!(registry.relation(a, b), TypeRelation::Unrelated);
    }
}
