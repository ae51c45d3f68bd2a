//! Decision tree for compressed dispatch lookup (§4.13 layer 5).
//!
//! A predicate DAG over the patterns registered for one family. Each
//! interior node tests one thing about the query's argument types; leaves
//! hold the indices of entries that survived every predicate on the path
//! to them. A lookup must still verify the full pattern against a leaf's
//! candidates before returning one, since `TypeInSet`/`BloomFilter` nodes
//! narrow but don't guarantee an exact match.

use std::collections::HashMap;

use lattice_core::TypeId;

use super::bloom::BloomBits;

pub enum DecisionNode {
    TypeEquals {
        arg_idx: usize,
        type_id: TypeId,
        if_true: Box<DecisionNode>,
        if_false: Box<DecisionNode>,
    },
    TypeInSet {
        arg_idx: usize,
        set: Vec<TypeId>,
        if_true: Box<DecisionNode>,
        if_false: Box<DecisionNode>,
    },
    BloomFilter {
        bits: BloomBits,
        if_true: Box<DecisionNode>,
        if_false: Box<DecisionNode>,
    },
    AlwaysTrue(Box<DecisionNode>),
    AlwaysFalse,
    Leaf(Vec<usize>),
}

impl DecisionNode {
    /// Walks the tree against `query_types`, returning the candidate entry
    /// indices at the reached leaf (empty if an `AlwaysFalse` branch is
    /// taken). Candidates still need a full-pattern check by the caller.
    pub fn lookup(&self, query_types: &[TypeId], query_bits: BloomBits) -> &[usize] {
        match self {
            DecisionNode::TypeEquals { arg_idx, type_id, if_true, if_false } => {
                if query_types.get(*arg_idx) == Some(type_id) {
                    if_true.lookup(query_types, query_bits)
                } else {
                    if_false.lookup(query_types, query_bits)
                }
            }
            DecisionNode::TypeInSet { arg_idx, set, if_true, if_false } => {
                let matches = query_types.get(*arg_idx).is_some_and(|ty| set.contains(ty));
                if matches {
                    if_true.lookup(query_types, query_bits)
                } else {
                    if_false.lookup(query_types, query_bits)
                }
            }
            DecisionNode::BloomFilter { bits, if_true, if_false } => {
                if query_bits.is_subset_of(*bits) {
                    if_true.lookup(query_types, query_bits)
                } else {
                    if_false.lookup(query_types, query_bits)
                }
            }
            DecisionNode::AlwaysTrue(next) => next.lookup(query_types, query_bits),
            DecisionNode::AlwaysFalse => &[],
            DecisionNode::Leaf(indices) => indices,
        }
    }
}

/// Builds a decision tree over `patterns` (indexed by entry index) by
/// repeatedly splitting on the most common type at the next argument
/// position, the way a handwritten dispatch `match` would narrow on its
/// first differing argument before falling back to the rest.
pub fn build(patterns: &[Vec<TypeId>]) -> DecisionNode {
    let all_indices: Vec<usize> = (0..patterns.len()).collect();
    build_rec(patterns, all_indices, 0)
}

fn build_rec(patterns: &[Vec<TypeId>], indices: Vec<usize>, arg_idx: usize) -> DecisionNode {
    if indices.len() <= 1 {
        return DecisionNode::Leaf(indices);
    }

    let mut counts: HashMap<TypeId, usize> = HashMap::new();
    for &i in &indices {
        if let Some(&ty) = patterns[i].get(arg_idx) {
            *counts.entry(ty).or_insert(0) += 1;
        }
    }

    let Some((&chosen, _)) = counts.iter().max_by_key(|(_, &count)| count) else {
        // No entry has an argument at this position left to split on.
        return DecisionNode::Leaf(indices);
    };

    let (matching, rest): (Vec<usize>, Vec<usize>) =
        indices.into_iter().partition(|&i| patterns[i].get(arg_idx) == Some(&chosen));

    if rest.is_empty() {
        // Every remaining candidate agrees at this position; move on to
        // the next argument without branching.
        return build_rec(patterns, matching, arg_idx + 1);
    }

    DecisionNode::TypeEquals {
        arg_idx,
        type_id: chosen,
        if_true: Box::new(build_rec(patterns, matching, arg_idx + 1)),
        if_false: Box::new(build_rec(patterns, rest, arg_idx)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::bloom::bits_for_pattern;

    #[test]
    fn lookup_finds_the_unique_matching_entry() {
        let int_ty = TypeId::new(1);
        let str_ty = TypeId::new(2);
        let patterns = vec![vec![int_ty], vec![str_ty]];
        let tree = build(&patterns);

        let query = [str_ty];
        let candidates = tree.lookup(&query, bits_for_pattern(&query));
        assert_eq!(candidates, &[1]);
    }

    #[test]
    fn single_pattern_family_always_has_one_leaf() {
        let patterns = vec![vec![TypeId::new(1), TypeId::new(2)]];
        let tree = build(&patterns);
        let query = [TypeId::new(1), TypeId::new(2)];
        assert_eq!(tree.lookup(&query, bits_for_pattern(&query)), &[0]);
    }
}
