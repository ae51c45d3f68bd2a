//! Dispatch Compressor (§4.13): turns a finalized family's dispatch entries
//! into a `CompressedDispatchTable` through four layers — type dictionary,
//! pattern dictionary, delta compression, bloom filter — plus a decision
//! tree for sublinear lookup. Lookup walks the tree to a leaf, then
//! verifies the full pattern against each leaf candidate before returning
//! an entry index, since bloom/type-set predicates only narrow candidates.

pub mod bloom;
pub mod decision_tree;
pub mod delta;
pub mod dict;
pub mod dump;

use lattice_core::{FunctionId, StrId, TypeId};

use bloom::{bits_for_pattern, BloomBits};
use decision_tree::DecisionNode;
use delta::DeltaEncoded;
use dict::{PatternDictionary, TypeDictionary};

/// One row handed to the compressor, mirroring what the Semantic Resolver
/// has already computed for a finalized `FunctionFamily`.
#[derive(Debug, Clone)]
pub struct DispatchEntry {
    pub type_pattern: Vec<TypeId>,
    pub function_name: StrId,
    pub module_name: StrId,
    pub signature_hash: u64,
    pub specificity_score: u32,
    pub call_frequency: u32,
    pub hot_path: bool,
    pub fallback: Option<FunctionId>,
}

pub struct CompressedDispatchTable {
    entries: Vec<DispatchEntry>,
    type_dict: TypeDictionary,
    pattern_dict: PatternDictionary,
    /// Parallel to `entries`: each entry's pattern dictionary id.
    entry_patterns: Vec<u32>,
    /// Each entry's type pattern, delta-encoded over the type dictionary's
    /// dense indices (as `u32`), for round-trip-exact storage.
    entry_deltas: Vec<DeltaEncoded>,
    entry_bloom: Vec<BloomBits>,
    tree: DecisionNode,
    original_size_bytes: usize,
}

impl CompressedDispatchTable {
    pub fn entry(&self, index: usize) -> &DispatchEntry {
        &self.entries[index]
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Decompresses entry `index`'s type pattern back to `TypeId`s,
    /// verifying the delta/dictionary round trip is exact.
    pub fn decompress_pattern(&self, index: usize) -> Vec<TypeId> {
        let dict_indices = delta::decompress(&self.entry_deltas[index]);
        dict_indices
            .into_iter()
            .map(|i| self.type_dict.type_at(i as u16).expect("dictionary index out of range"))
            .collect()
    }

    /// Walks the decision tree for `query_types`, then verifies the full
    /// pattern of each surviving candidate, returning the first exact
    /// match's entry index.
    pub fn lookup(&self, query_types: &[TypeId]) -> Option<usize> {
        let query_bits = bits_for_pattern(query_types);
        let candidates = self.tree.lookup(query_types, query_bits);
        candidates
            .iter()
            .copied()
            .find(|&i| self.decompress_pattern(i) == query_types)
    }

    /// Total bytes estimated for the compressed form: one dictionary
    /// index per unique type, one stored pattern per unique sequence, and
    /// the delta-encoded per-entry references into that pattern table.
    pub fn compressed_size_bytes(&self) -> usize {
        let dict_bytes = self.type_dict.len() * 4;
        let pattern_bytes: usize = (0..self.pattern_dict.unique_count())
            .map(|id| self.pattern_dict.pattern(id as u32).len() * 2)
            .sum();
        let delta_bytes: usize = self.entry_deltas.iter().map(delta::encoded_size_bytes).sum();
        let bloom_bytes = self.entry_bloom.len() * 8;
        dict_bytes + pattern_bytes + delta_bytes + bloom_bytes
    }

    pub fn original_size_bytes(&self) -> usize {
        self.original_size_bytes
    }

    pub fn compression_ratio(&self) -> f64 {
        if self.original_size_bytes == 0 {
            return 1.0;
        }
        self.compressed_size_bytes() as f64 / self.original_size_bytes as f64
    }
}

pub fn compress(entries: Vec<DispatchEntry>) -> CompressedDispatchTable {
    let patterns: Vec<Vec<TypeId>> = entries.iter().map(|e| e.type_pattern.clone()).collect();
    let original_size_bytes = patterns.iter().map(|p| p.len() * 4).sum::<usize>() + entries.len() * 24;

    let type_dict = TypeDictionary::build(&patterns);
    let mut pattern_dict = PatternDictionary::new();

    let mut entry_patterns = Vec::with_capacity(entries.len());
    let mut entry_deltas = Vec::with_capacity(entries.len());
    let mut entry_bloom = Vec::with_capacity(entries.len());

    for pattern in &patterns {
        let encoded = type_dict.encode_pattern(pattern).expect("pattern types come from the same dictionary");
        let pattern_id = pattern_dict.intern(encoded.clone());
        entry_patterns.push(pattern_id);
        let as_u32: Vec<u32> = encoded.iter().map(|&i| i as u32).collect();
        entry_deltas.push(delta::compress(&as_u32));
        entry_bloom.push(bits_for_pattern(pattern));
    }

    let tree = decision_tree::build(&patterns);

    CompressedDispatchTable {
        entries,
        type_dict,
        pattern_dict,
        entry_patterns,
        entry_deltas,
        entry_bloom,
        tree,
        original_size_bytes,
    }
}

/// Deterministic debug rendering of a compressed table, analogous to the
/// teacher's bytecode module dump: fixed section order, no randomized map
/// iteration, suitable for `insta` snapshotting and `latticec
/// dump-dispatch` output.
pub use dump::render as dump_table;

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pattern: Vec<TypeId>, name: StrId) -> DispatchEntry {
        DispatchEntry {
            type_pattern: pattern,
            function_name: name,
            module_name: StrId::EMPTY,
            signature_hash: 0,
            specificity_score: 0,
            call_frequency: 1,
            hot_path: false,
            fallback: None,
        }
    }

    #[test]
    fn lookup_returns_the_entry_whose_pattern_matches_exactly() {
        let a = TypeId::new(1);
        let b = TypeId::new(2);
        let entries = vec![entry(vec![a], StrId::EMPTY), entry(vec![b], StrId::EMPTY)];
        let table = compress(entries);

        assert_eq!(table.lookup(&[b]), Some(1));
        assert_eq!(table.lookup(&[a]), Some(0));
    }

    #[test]
    fn lookup_returns_none_for_an_unregistered_pattern() {
        let a = TypeId::new(1);
        let table = compress(vec![entry(vec![a], StrId::EMPTY)]);
        assert_eq!(table.lookup(&[TypeId::new(99)]), None);
    }

    #[test]
    fn every_entrys_pattern_round_trips_through_delta_and_dictionary() {
        let a = TypeId::new(1);
        let b = TypeId::new(2);
        let pattern = vec![a, b, a];
        let table = compress(vec![entry(pattern.clone(), StrId::EMPTY)]);
        assert_eq!(table.decompress_pattern(0), pattern);
    }

    #[test]
    fn sequential_patterns_compress_to_roughly_the_expected_ratio() {
        let entries: Vec<DispatchEntry> = (0..20)
            .map(|i| entry(vec![TypeId::new(i), TypeId::new(i + 1)], StrId::EMPTY))
            .collect();
        let table = compress(entries);
        assert!(table.compression_ratio() <= 0.8);
    }

    #[test]
    fn heavily_repeated_patterns_compress_well_below_sequential_ones() {
        let pattern = vec![TypeId::new(1), TypeId::new(2)];
        let entries: Vec<DispatchEntry> = (0..20).map(|_| entry(pattern.clone(), StrId::EMPTY)).collect();
        let table = compress(entries);
        assert!(table.compression_ratio() <= 0.4);
    }
}
