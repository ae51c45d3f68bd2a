//! Specificity Analyzer (§3.6): a partial order over same-family
//! signatures, with deterministic tie-breakers so "most specific" is a
//! total function even when the pure subtype order can't decide.

use lattice_core::FunctionId;

use crate::signature::{FunctionFamily, Signature, SignatureRegistry};
use crate::types::{TypeRegistry, TypeRelation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecificityOrdering {
    MoreSpecific,
    LessSpecific,
    Equal,
    Incomparable,
}

pub struct SpecificityAnalyzer<'a> {
    types: &'a TypeRegistry,
}

impl<'a> SpecificityAnalyzer<'a> {
    pub fn new(types: &'a TypeRegistry) -> Self {
        Self { types }
    }

    /// Compares two signatures of the same arity parameter-wise: `a` is
    /// more specific than `b` iff every parameter of `a` is a subtype-or-
    /// equal of the corresponding parameter of `b`, and at least one is a
    /// strict subtype. Mismatched shapes are incomparable by construction.
    pub fn compare(&self, a: &Signature, b: &Signature) -> SpecificityOrdering {
        if a.arity() != b.arity() {
            return SpecificityOrdering::Incomparable;
        }
        let mut any_strict_a = false;
        let mut any_strict_b = false;
        for (ta, tb) in a.param_types.iter().zip(&b.param_types) {
            match self.types.relation(*ta, *tb) {
                TypeRelation::Same => {}
                TypeRelation::Subtype => any_strict_a = true,
                TypeRelation::Supertype => any_strict_b = true,
                TypeRelation::Unrelated => return SpecificityOrdering::Incomparable,
            }
        }
        match (any_strict_a, any_strict_b) {
            (true, false) => SpecificityOrdering::MoreSpecific,
            (false, true) => SpecificityOrdering::LessSpecific,
            (false, false) => SpecificityOrdering::Equal,
            (true, true) => SpecificityOrdering::Incomparable,
        }
    }

    /// Picks the single most-specific implementation in `family`, breaking
    /// subtype ties by (1) fewer required conversions, supplied by the
    /// caller as `conversion_cost`, then (2) earliest declaration order —
    /// both deterministic, so this never returns an arbitrary choice.
    /// `conversion_cost` takes `&mut` access since it typically walks a
    /// cached shortest-path search (the Conversion Registry) that fills its
    /// cache as it goes.
    pub fn most_specific(
        &self,
        family: &FunctionFamily,
        signatures: &SignatureRegistry,
        mut conversion_cost: impl FnMut(FunctionId) -> u32,
    ) -> Option<FunctionId> {
        let mut candidates: Vec<FunctionId> = family.implementations.clone();
        candidates.retain(|&id| {
            !family.implementations.iter().any(|&other| {
                other != id
                    && self.compare(signatures.signature(other), signatures.signature(id))
                        == SpecificityOrdering::MoreSpecific
            })
        });

        candidates.sort_by(|&a, &b| {
            conversion_cost(a)
                .cmp(&conversion_cost(b))
                .then_with(|| a.as_u32().cmp(&b.as_u32()))
        });
        candidates.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::Interner;

    #[test]
    fn subtype_parameter_makes_a_signature_more_specific() {
        let interner = Interner::new();
        let mut types = TypeRegistry::new();
        let animal = types.register(interner.intern_str("Animal"), None);
        let dog = types.register(interner.intern_str("Dog"), Some(animal));
        let analyzer = SpecificityAnalyzer::new(&types);

        let speak_dog = Signature {
            name: interner.intern_str("speak"),
            param_types: vec![dog],
        };
        let speak_animal = Signature {
            name: interner.intern_str("speak"),
            param_types: vec![animal],
        };
        assert_eq!(analyzer.compare(&speak_dog, &speak_animal), SpecificityOrdering::MoreSpecific);
        assert_eq!(analyzer.compare(&speak_animal, &speak_dog), SpecificityOrdering::LessSpecific);
    }

    #[test]
    fn unrelated_parameter_types_are_incomparable() {
        let interner = Interner::new();
        let mut types = TypeRegistry::new();
        let a = types.register(interner.intern_str("A"), None);
        let b = types.register(interner.intern_str("B"), None);
        let analyzer = SpecificityAnalyzer::new(&types);
        let sig_a = Signature {
            name: interner.intern_str("f"),
            param_types: vec![a],
        };
        let sig_b = Signature {
            name: interner.intern_str("f"),
            param_types: vec![b],
        };
        assert_eq!(analyzer.compare(&sig_a, &sig_b), SpecificityOrdering::Incomparable);
    }
}
