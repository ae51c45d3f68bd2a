//! Generic Dispatcher (§4.12): caches one `MonomorphizationId` per distinct
//! `(FunctionId, type arguments)` pairing so repeated calls with the same
//! concrete types reuse a single instantiation instead of re-specializing.

use std::collections::HashMap;

use lattice_core::{FunctionId, MonomorphizationId, TypeId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonomorphizationKey {
    pub generic: FunctionId,
    pub type_args: Vec<TypeId>,
}

pub struct GenericDispatcher {
    cache: HashMap<MonomorphizationKey, MonomorphizationId>,
    next: u32,
}

impl GenericDispatcher {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            next: 0,
        }
    }

    /// Returns the existing instantiation for `key`, or mints and caches a
    /// fresh one. The bool reports whether this call minted a new id.
    pub fn get_or_create(&mut self, key: MonomorphizationKey) -> (MonomorphizationId, bool) {
        if let Some(&id) = self.cache.get(&key) {
            return (id, false);
        }
        let id = MonomorphizationId::new(self.next);
        self.next += 1;
        self.cache.insert(key, id);
        (id, true)
    }

    pub fn instantiation_count(&self) -> usize {
        self.cache.len()
    }
}

impl Default for GenericDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_type_arguments_reuse_the_cached_instantiation() {
        let mut dispatcher = GenericDispatcher::new();
        let key = MonomorphizationKey {
            generic: FunctionId::new(0),
            type_args: vec![TypeId::new(1)],
        };
        let (first, minted_first) = dispatcher.get_or_create(key.clone());
        let (second, minted_second) = dispatcher.get_or_create(key);
        assert_eq!(first, second);
        assert!(minted_first);
        assert!(!minted_second);
        assert_eq!(dispatcher.instantiation_count(), 1);
    }

    #[test]
    fn different_type_arguments_get_distinct_instantiations() {
        let mut dispatcher = GenericDispatcher::new();
        let a = dispatcher.get_or_create(MonomorphizationKey {
            generic: FunctionId::new(0),
            type_args: vec![TypeId::new(1)],
        });
        let b = dispatcher.get_or_create(MonomorphizationKey {
            generic: FunctionId::new(0),
            type_args: vec![TypeId::new(2)],
        });
        assert_ne!(a.0, b.0);
    }
}
