//! String interning for efficient string deduplication and comparison.
//!
//! Converts byte strings into cheap integer handles (`StrId`). Comparing two
//! `StrId`s is O(1) integer comparison (Testable Property 4).
//!
//! The interner is a process-wide, lifecycle-managed structure (§5): reads are
//! common and writes are rare, so it is protected by a single mutex around an
//! append-only arena rather than given per-call locking games.

use std::collections::HashMap;
use std::sync::Mutex;

/// A lightweight handle to an interned byte string.
///
/// `StrId(0)` is reserved for the empty string and is always valid for any
/// `Interner`. Ordering is insertion order, not lexicographic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct StrId(u32);

impl StrId {
    /// The empty string, valid in every interner without a lookup.
    pub const EMPTY: StrId = StrId(0);

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Construct from a raw index. Only meaningful against the interner that
    /// produced it; use only when round-tripping a serialized id.
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl PartialOrd for StrId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StrId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

#[derive(Debug, Default)]
struct InternerState {
    map: HashMap<Box<[u8]>, StrId>,
    storage: Vec<Box<[u8]>>,
}

impl InternerState {
    fn new() -> Self {
        let mut state = Self::default();
        // StrId(0) is reserved for the empty string (§4.1).
        state.storage.push(Box::from(&b""[..]));
        state.map.insert(Box::from(&b""[..]), StrId::EMPTY);
        state
    }
}

/// Interns source strings into stable `StrId`s.
///
/// `intern` is idempotent: interning equal byte content twice returns the
/// same id (Testable Property 4). Safe to share across threads if the host
/// chooses to parse multiple Units in parallel (§5).
#[derive(Debug)]
pub struct Interner {
    state: Mutex<InternerState>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(InternerState::new()),
        }
    }

    /// Intern `bytes`, returning a stable `StrId`. Idempotent.
    pub fn intern(&self, bytes: &[u8]) -> StrId {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(&id) = state.map.get(bytes) {
            return id;
        }
        let id = StrId(state.storage.len() as u32);
        let boxed: Box<[u8]> = Box::from(bytes);
        state.storage.push(boxed.clone());
        state.map.insert(boxed, id);
        id
    }

    /// Convenience wrapper over [`Interner::intern`] for UTF-8 text.
    #[inline]
    pub fn intern_str(&self, s: &str) -> StrId {
        self.intern(s.as_bytes())
    }

    /// Resolve a `StrId` back to its bytes.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this interner.
    pub fn resolve(&self, id: StrId) -> Vec<u8> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.storage[id.0 as usize].to_vec()
    }

    /// Resolve a `StrId` to a UTF-8 string.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this interner, or its bytes are not
    /// valid UTF-8.
    pub fn resolve_str(&self, id: StrId) -> String {
        String::from_utf8(self.resolve(id)).expect("interned bytes are valid UTF-8")
    }

    pub fn try_resolve_str(&self, id: StrId) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .storage
            .get(id.0 as usize)
            .and_then(|b| String::from_utf8(b.to_vec()).ok())
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).storage.len()
    }

    pub fn is_empty(&self) -> bool {
        // Never empty: StrId(0) is always present.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_strid_zero() {
        let interner = Interner::new();
        assert_eq!(interner.intern_str(""), StrId::EMPTY);
    }

    #[test]
    fn intern_is_idempotent() {
        let interner = Interner::new();
        let a = interner.intern_str("hello");
        let b = interner.intern_str("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_get_distinct_ids() {
        let interner = Interner::new();
        let a = interner.intern_str("foo");
        let b = interner.intern_str("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let interner = Interner::new();
        let id = interner.intern_str("round trip");
        assert_eq!(interner.resolve_str(id), "round trip");
    }

    #[test]
    fn interning_across_threads_is_consistent() {
        use std::sync::Arc;
        let interner = Arc::new(Interner::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let interner = Arc::clone(&interner);
            handles.push(std::thread::spawn(move || interner.intern_str("shared")));
        }
        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
    }
}
