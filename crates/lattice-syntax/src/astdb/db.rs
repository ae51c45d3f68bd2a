//! The ASTDB itself: a content-addressed store of Units (§4.1, §4.2).

use std::collections::HashMap;

use lattice_core::{Interner, StrId, UnitId};

use crc32fast::Hasher;

use super::snapshot::Snapshot;
use super::token_mapper::map_tokens;
use super::unit::{Unit, UnitBuilder};
use crate::parser;
use crate::tokenizer::lex;

/// Owns every parsed Unit plus the interner they share. `add_unit` is
/// idempotent on filename: re-adding the same filename with the same
/// source text returns the existing `UnitId` rather than re-parsing, and
/// re-adding it with different source text replaces it in place (the
/// hot-reload path the Module Dispatcher relies on).
pub struct AstDb {
    interner: Interner,
    units: Vec<Unit>,
    by_filename: HashMap<StrId, UnitId>,
    source_digest: HashMap<StrId, u32>,
}

impl AstDb {
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            units: Vec::new(),
            by_filename: HashMap::new(),
            source_digest: HashMap::new(),
        }
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Parse `source` and either insert it as a new Unit or, if `filename`
    /// is already present, atomically replace the old Unit in place
    /// (same `UnitId`, fresh content) when the digest differs, or return
    /// the existing id unchanged when it's identical.
    pub fn add_unit(&mut self, filename: &str, source: &str) -> UnitId {
        let filename_id = self.interner.intern_str(filename);
        let digest = content_digest(source);

        if let Some(&existing) = self.by_filename.get(&filename_id) {
            if self.source_digest.get(&filename_id) == Some(&digest) {
                return existing;
            }
            self.units[existing.index()] = self.build_unit(filename_id, source);
            self.source_digest.insert(filename_id, digest);
            return existing;
        }

        let unit = self.build_unit(filename_id, source);
        let id = UnitId::new(self.units.len() as u32);
        self.units.push(unit);
        self.by_filename.insert(filename_id, id);
        self.source_digest.insert(filename_id, digest);
        id
    }

    fn build_unit(&self, filename: StrId, source: &str) -> Unit {
        let source_tokens = lex(source);
        let (tokens, trivia) = map_tokens(&source_tokens, &self.interner);
        let builder = UnitBuilder::new(filename, source.to_string(), tokens, trivia);
        parser::parse(builder, &self.interner)
    }

    pub fn get_unit(&self, id: UnitId) -> &Unit {
        &self.units[id.index()]
    }

    pub fn unit_by_filename(&self, filename: &str) -> Option<UnitId> {
        self.by_filename.get(&self.interner.intern_str(filename)).copied()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn create_snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.units)
    }
}

impl Default for AstDb {
    fn default() -> Self {
        Self::new()
    }
}

/// CRC32 over the raw bytes, stable across process runs unlike `Hash`'s
/// default randomized state — digests are compared across `add_unit`
/// calls to decide whether a reparse actually changed anything.
fn content_digest(source: &str) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(source.as_bytes());
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_adding_identical_source_reuses_unit_id() {
        let mut db = AstDb::new();
        let a = db.add_unit("main.lat", "let x := 1");
        let b = db.add_unit("main.lat", "let x := 1");
        assert_eq!(a, b);
        assert_eq!(db.unit_count(), 1);
    }

    #[test]
    fn re_adding_changed_source_keeps_id_but_updates_content() {
        let mut db = AstDb::new();
        let a = db.add_unit("main.lat", "let x := 1");
        let b = db.add_unit("main.lat", "let x := 2");
        assert_eq!(a, b);
        assert_eq!(db.unit_count(), 1);
    }

    #[test]
    fn distinct_filenames_get_distinct_units() {
        let mut db = AstDb::new();
        let a = db.add_unit("a.lat", "let x := 1");
        let b = db.add_unit("b.lat", "let x := 1");
        assert_ne!(a, b);
    }
}
