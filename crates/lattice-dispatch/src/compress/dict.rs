//! Type and pattern dictionaries (§4.13 layers 1-2).
//!
//! The type dictionary assigns dense indices to every `TypeId` that
//! appears in a family's dispatch entries, most frequent first, so common
//! types pack into the smallest varints once delta-encoded. The pattern
//! dictionary then deduplicates equal type-pattern sequences (expressed in
//! terms of those dictionary indices) so repeated signatures store once.

use std::collections::HashMap;

use lattice_core::TypeId;

/// Dense dictionary index into `TypeDictionary`'s entries. Index 0 is the
/// most frequently occurring `TypeId` in the family being compressed.
pub type DictIndex = u16;

pub struct TypeDictionary {
    /// entries[i] is the TypeId assigned dictionary index i.
    entries: Vec<TypeId>,
    by_type: HashMap<TypeId, DictIndex>,
}

impl TypeDictionary {
    /// Builds a dictionary from every `TypeId` occurring in `patterns`,
    /// ordered by descending frequency, ties broken by first appearance.
    pub fn build(patterns: &[Vec<TypeId>]) -> Self {
        let mut counts: HashMap<TypeId, usize> = HashMap::new();
        let mut first_seen: HashMap<TypeId, usize> = HashMap::new();
        let mut order = 0usize;
        for pattern in patterns {
            for &ty in pattern {
                *counts.entry(ty).or_insert(0) += 1;
                first_seen.entry(ty).or_insert_with(|| {
                    let seen = order;
                    order += 1;
                    seen
                });
            }
        }

        let mut types: Vec<TypeId> = counts.keys().copied().collect();
        types.sort_by_key(|ty| (std::cmp::Reverse(counts[ty]), first_seen[ty]));

        let by_type = types
            .iter()
            .enumerate()
            .map(|(i, &ty)| (ty, i as DictIndex))
            .collect();

        Self { entries: types, by_type }
    }

    pub fn index_of(&self, ty: TypeId) -> Option<DictIndex> {
        self.by_type.get(&ty).copied()
    }

    pub fn type_at(&self, index: DictIndex) -> Option<TypeId> {
        self.entries.get(index as usize).copied()
    }

    pub fn encode_pattern(&self, pattern: &[TypeId]) -> Option<Vec<DictIndex>> {
        pattern.iter().map(|&ty| self.index_of(ty)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Deduplicates equal encoded patterns (§4.13 layer 2): each unique
/// sequence of dictionary indices is stored once, and entries reference
/// it by a `PatternId`.
pub type PatternId = u32;

#[derive(Default)]
pub struct PatternDictionary {
    patterns: Vec<Vec<DictIndex>>,
    by_pattern: HashMap<Vec<DictIndex>, PatternId>,
}

impl PatternDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, pattern: Vec<DictIndex>) -> PatternId {
        if let Some(&id) = self.by_pattern.get(&pattern) {
            return id;
        }
        let id = self.patterns.len() as PatternId;
        self.by_pattern.insert(pattern.clone(), id);
        self.patterns.push(pattern);
        id
    }

    pub fn pattern(&self, id: PatternId) -> &[DictIndex] {
        &self.patterns[id as usize]
    }

    pub fn unique_count(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_frequent_type_gets_index_zero() {
        let a = TypeId::new(1);
        let b = TypeId::new(2);
        let patterns = vec![vec![a, b], vec![a], vec![a]];
        let dict = TypeDictionary::build(&patterns);
        assert_eq!(dict.index_of(a), Some(0));
        assert_eq!(dict.index_of(b), Some(1));
    }

    #[test]
    fn pattern_dictionary_deduplicates_equal_sequences() {
        let mut patterns = PatternDictionary::new();
        let first = patterns.intern(vec![0, 1]);
        let second = patterns.intern(vec![0, 1]);
        let third = patterns.intern(vec![1, 0]);
        assert_eq!(first, second);
        assert_ne!(first, third);
        assert_eq!(patterns.unique_count(), 2);
    }
}
