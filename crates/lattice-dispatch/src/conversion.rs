//! Conversion Registry (§4.8): a directed cost graph over types, with
//! shortest-path costs cached after first use so repeated dispatch
//! decisions don't re-run the search.

use std::collections::HashMap;

use lattice_core::{StrId, TypeId};

/// One directed conversion edge. `method` names the conversion function
/// (or trait method) that performs it; `template` optionally names a
/// generic template it was instantiated from, for conversions synthesized
/// by the Generic Dispatcher rather than declared directly.
#[derive(Debug, Clone, Copy)]
pub struct ConversionEdge {
    pub to: TypeId,
    pub cost: u32,
    pub lossy: bool,
    pub method: StrId,
    pub template: Option<StrId>,
}

/// A resolved conversion path's total cost and whether any edge along it
/// was lossy — callers use this to prefer an all-exact path over one that
/// narrows precision, per §4.8's two-tier fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionCost {
    pub total: u32,
    pub lossy: bool,
}

/// `from -> to` at `cost`, tagged `lossy`/`method`/`template`. Multiple
/// edges between the same pair keep only the cheapest per lossy tier
/// (`register_conversion` is monotone-decreasing within a tier).
pub struct ConversionRegistry {
    edges: HashMap<TypeId, Vec<ConversionEdge>>,
    cache: HashMap<(TypeId, TypeId), Option<ConversionCost>>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    pub fn register_conversion(&mut self, from: TypeId, to: TypeId, cost: u32, lossy: bool, method: StrId, template: Option<StrId>) {
        let list = self.edges.entry(from).or_default();
        if let Some(entry) = list.iter_mut().find(|e| e.to == to && e.lossy == lossy) {
            if cost < entry.cost {
                entry.cost = cost;
                entry.method = method;
                entry.template = template;
            }
        } else {
            list.push(ConversionEdge { to, cost, lossy, method, template });
        }
        self.cache.clear();
    }

    /// Cheapest total conversion cost from `from` to `to`: the minimum-cost
    /// path using only non-lossy edges, or — when no such path exists — the
    /// minimum-cost path allowing lossy edges (§4.8). `from == to` costs 0
    /// and is never lossy.
    pub fn cost(&mut self, from: TypeId, to: TypeId) -> Option<u32> {
        self.find_conversion(from, to).map(|c| c.total)
    }

    pub fn find_conversion(&mut self, from: TypeId, to: TypeId) -> Option<ConversionCost> {
        if from == to {
            return Some(ConversionCost { total: 0, lossy: false });
        }
        if let Some(&cached) = self.cache.get(&(from, to)) {
            return cached;
        }
        let result = self
            .dijkstra(from, to, false)
            .map(|total| ConversionCost { total, lossy: false })
            .or_else(|| {
                self.dijkstra(from, to, true)
                    .map(|total| ConversionCost { total, lossy: true })
            });
        self.cache.insert((from, to), result);
        result
    }

    fn dijkstra(&self, from: TypeId, to: TypeId, allow_lossy: bool) -> Option<u32> {
        use std::cmp::Reverse;
        use std::collections::BinaryHeap;

        let mut best: HashMap<TypeId, u32> = HashMap::new();
        let mut heap = BinaryHeap::new();
        best.insert(from, 0);
        heap.push(Reverse((0u32, from)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            if node == to {
                return Some(cost);
            }
            if best.get(&node).is_some_and(|&b| b < cost) {
                continue;
            }
            for edge in self.edges.get(&node).map(Vec::as_slice).unwrap_or(&[]) {
                if edge.lossy && !allow_lossy {
                    continue;
                }
                let next_cost = cost + edge.cost;
                if best.get(&edge.to).is_none_or(|&b| next_cost < b) {
                    best.insert(edge.to, next_cost);
                    heap.push(Reverse((next_cost, edge.to)));
                }
            }
        }
        None
    }
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(n: u32) -> StrId {
        StrId::from_raw(n)
    }

    #[test]
    fn direct_conversion_costs_its_registered_weight() {
        let mut registry = ConversionRegistry::new();
        let a = TypeId::new(0);
        let b = TypeId::new(1);
        registry.register_conversion(a, b, 3, false, method(0), None);
        assert_eq!(registry.cost(a, b), Some(3));
    }

    #[test]
    fn transitive_path_is_found_and_cached() {
        let mut registry = ConversionRegistry::new();
        let a = TypeId::new(0);
        let b = TypeId::new(1);
        let c = TypeId::new(2);
        registry.register_conversion(a, b, 1, false, method(0), None);
        registry.register_conversion(b, c, 1, false, method(1), None);
        assert_eq!(registry.cost(a, c), Some(2));
        assert_eq!(registry.cost(a, c), Some(2)); // served from cache
    }

    #[test]
    fn cheaper_of_two_registered_edges_wins() {
        let mut registry = ConversionRegistry::new();
        let a = TypeId::new(0);
        let b = TypeId::new(1);
        registry.register_conversion(a, b, 5, false, method(0), None);
        registry.register_conversion(a, b, 2, false, method(1), None);
        assert_eq!(registry.cost(a, b), Some(2));
    }

    #[test]
    fn unreachable_target_has_no_cost() {
        let mut registry = ConversionRegistry::new();
        let a = TypeId::new(0);
        let b = TypeId::new(1);
        assert_eq!(registry.cost(a, b), None);
    }

    #[test]
    fn non_lossy_path_is_preferred_over_a_cheaper_lossy_one() {
        let mut registry = ConversionRegistry::new();
        let a = TypeId::new(0);
        let b = TypeId::new(1);
        registry.register_conversion(a, b, 1, true, method(0), None);
        registry.register_conversion(a, b, 9, false, method(1), None);
        let found = registry.find_conversion(a, b).unwrap();
        assert_eq!(found.total, 9);
        assert!(!found.lossy);
    }

    #[test]
    fn lossy_path_is_used_only_when_no_non_lossy_path_exists() {
        let mut registry = ConversionRegistry::new();
        let a = TypeId::new(0);
        let b = TypeId::new(1);
        registry.register_conversion(a, b, 4, true, method(0), None);
        let found = registry.find_conversion(a, b).unwrap();
        assert_eq!(found.total, 4);
        assert!(found.lossy);
    }
}
