//! Signature Analyzer (§3.6): groups function implementations into
//! families keyed by `(name, arity)`, the unit the Specificity Analyzer
//! then orders.

use std::collections::HashMap;

use lattice_core::{FunctionId, StrId, TypeId};

#[derive(Debug, Clone)]
pub struct Signature {
    pub name: StrId,
    pub param_types: Vec<TypeId>,
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }
}

/// All implementations registered under the same `(name, arity)` key.
#[derive(Debug, Clone, Default)]
pub struct FunctionFamily {
    pub implementations: Vec<FunctionId>,
}

/// Registers signatures and groups them by `(name, arity)`. Grounded on
/// the teacher's `analyze::type_check::symbol` table, generalized from a
/// single-binding symbol table to one that tolerates many bindings sharing
/// a name as long as their arity or parameter types differ.
pub struct SignatureRegistry {
    signatures: Vec<Signature>,
    families: HashMap<(StrId, usize), FunctionFamily>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self {
            signatures: Vec::new(),
            families: HashMap::new(),
        }
    }

    pub fn register(&mut self, id: FunctionId, signature: Signature) {
        let key = (signature.name, signature.arity());
        if self.signatures.len() <= id.index() {
            self.signatures.resize_with(id.index() + 1, || Signature {
                name: StrId::EMPTY,
                param_types: Vec::new(),
            });
        }
        self.signatures[id.index()] = signature;
        self.families.entry(key).or_default().implementations.push(id);
    }

    pub fn signature(&self, id: FunctionId) -> &Signature {
        &self.signatures[id.index()]
    }

    pub fn family(&self, name: StrId, arity: usize) -> Option<&FunctionFamily> {
        self.families.get(&(name, arity))
    }

    /// Every registered `(name, arity)` family, for callers that need to
    /// enumerate the whole registry (e.g. building a `DispatchEntry` list
    /// for the Dispatch Compressor) rather than looking up one at a time.
    pub fn families(&self) -> impl Iterator<Item = ((StrId, usize), &FunctionFamily)> {
        self.families.iter().map(|(&key, family)| (key, family))
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::Interner;

    #[test]
    fn same_name_different_arity_are_distinct_families() {
        let interner = Interner::new();
        let mut registry = SignatureRegistry::new();
        let name = interner.intern_str("speak");
        registry.register(
            FunctionId::new(0),
            Signature {
                name,
                param_types: vec![TypeId::new(0)],
            },
        );
        registry.register(
            FunctionId::new(1),
            Signature {
                name,
                param_types: vec![TypeId::new(0), TypeId::new(1)],
            },
        );
        assert_eq!(registry.family(name, 1).unwrap().implementations.len(), 1);
        assert_eq!(registry.family(name, 2).unwrap().implementations.len(), 1);
        assert!(registry.family(name, 3).is_none());
    }
}
