//! Bloom filter over a dispatch entry's pattern types (§4.13 layer 4).
//!
//! Each entry's bloom bits summarize the set of types in its pattern. A
//! query's bits must be a subset of an entry's bits for the entry to be a
//! candidate: false positives are acceptable (the decision tree's leaf
//! check filters those out), false negatives are not — an entry that
//! truly matches must never be excluded by its bloom bits.

use lattice_core::TypeId;

const WIDTH: u32 = 64;
const HASH_COUNT: u32 = 3;

/// 64-bit bitset, fixed width so bits fit in one `u64` comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BloomBits(pub u64);

impl BloomBits {
    pub const EMPTY: BloomBits = BloomBits(0);

    /// True when every bit set in `self` is also set in `other` — the
    /// query-subset-of-entry test the lookup relies on.
    pub fn is_subset_of(self, other: BloomBits) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn union(self, other: BloomBits) -> BloomBits {
        BloomBits(self.0 | other.0)
    }
}

/// Fixed, documented hash: splitmix64 on the `TypeId`'s raw value, then
/// three bit positions are derived by successive 16-bit slices of the
/// mixed output so repeated calls with the same `TypeId` always agree.
fn mix(value: u32) -> u64 {
    let mut z = (value as u64).wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

pub fn bits_for_type(ty: TypeId) -> BloomBits {
    let mixed = mix(ty.as_u32());
    let mut bits = 0u64;
    for i in 0..HASH_COUNT {
        let slice = (mixed >> (i * 16)) & 0xFFFF;
        bits |= 1u64 << (slice % WIDTH as u64);
    }
    BloomBits(bits)
}

pub fn bits_for_pattern(pattern: &[TypeId]) -> BloomBits {
    pattern.iter().fold(BloomBits::EMPTY, |acc, &ty| acc.union(bits_for_type(ty)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_types_own_bits_are_always_a_subset_of_themselves() {
        let ty = TypeId::new(7);
        let bits = bits_for_type(ty);
        assert!(bits.is_subset_of(bits));
    }

    #[test]
    fn pattern_bits_are_a_superset_of_each_members_bits() {
        let a = TypeId::new(1);
        let b = TypeId::new(2);
        let pattern_bits = bits_for_pattern(&[a, b]);
        assert!(bits_for_type(a).is_subset_of(pattern_bits));
        assert!(bits_for_type(b).is_subset_of(pattern_bits));
    }

    #[test]
    fn same_type_id_always_hashes_to_the_same_bits() {
        let ty = TypeId::new(99);
        assert_eq!(bits_for_type(ty), bits_for_type(ty));
    }
}
