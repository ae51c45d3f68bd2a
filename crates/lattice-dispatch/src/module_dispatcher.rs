//! Module Dispatcher (§4.11): cross-module export/import plus hot-reload.
//!
//! A module publishes a name -> `FunctionId` export table. Re-registering
//! a module (hot reload) atomically swaps its table and reports exactly
//! which call sites that table affects, so a host can invalidate only the
//! dispatch-table entries that actually changed instead of recompiling
//! everything downstream of the reload.

use std::collections::HashMap;

use lattice_core::{FunctionId, ModuleId, StrId};

/// Digest identifying one call site for consistency reporting — a stable
/// stand-in for "this call expression, wherever it sits" that survives
/// across a reload without needing the call site's own `NodeId` (which
/// would be invalidated by any edit to the calling Unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSiteDigest(pub u64);

/// What changed for one call site after a hot reload: before/after
/// resolution, either of which may be absent (newly broken / newly fixed).
#[derive(Debug, Clone)]
pub struct ConsistencyReport {
    pub changed: Vec<(CallSiteDigest, Option<FunctionId>, Option<FunctionId>)>,
}

pub struct ModuleDispatcher {
    exports: HashMap<ModuleId, HashMap<StrId, FunctionId>>,
    /// What each call site last resolved to, so a reload can diff against it.
    resolutions: HashMap<CallSiteDigest, FunctionId>,
    /// Which module and name a call site depends on, so a reload of that
    /// module knows which call sites to re-check.
    dependents: HashMap<(ModuleId, StrId), Vec<CallSiteDigest>>,
}

impl ModuleDispatcher {
    pub fn new() -> Self {
        Self {
            exports: HashMap::new(),
            resolutions: HashMap::new(),
            dependents: HashMap::new(),
        }
    }

    pub fn register_module(&mut self, module: ModuleId, exports: HashMap<StrId, FunctionId>) {
        self.exports.insert(module, exports);
    }

    pub fn import(&self, module: ModuleId, name: StrId) -> Option<FunctionId> {
        self.exports.get(&module)?.get(&name).copied()
    }

    /// Records that `call_site` resolved to `module::name -> function`, so
    /// a later reload of `module` can tell whether this call site changed.
    pub fn record_resolution(&mut self, call_site: CallSiteDigest, module: ModuleId, name: StrId, function: FunctionId) {
        self.resolutions.insert(call_site, function);
        self.dependents.entry((module, name)).or_default().push(call_site);
    }

    /// Atomically replaces `module`'s export table and reports every
    /// previously-recorded call site whose resolution changed as a
    /// result — `None` on either side of the tuple means "no longer
    /// resolves" / "did not resolve before".
    pub fn hot_reload(&mut self, module: ModuleId, new_exports: HashMap<StrId, FunctionId>) -> ConsistencyReport {
        let mut changed = Vec::new();
        let affected_names: Vec<StrId> = self
            .dependents
            .keys()
            .filter(|(m, _)| *m == module)
            .map(|(_, name)| *name)
            .collect();

        for name in affected_names {
            let new_fn = new_exports.get(&name).copied();
            if let Some(sites) = self.dependents.get(&(module, name)) {
                for &site in sites {
                    let old_fn = self.resolutions.get(&site).copied();
                    if old_fn != new_fn {
                        changed.push((site, old_fn, new_fn));
                        match new_fn {
                            Some(f) => {
                                self.resolutions.insert(site, f);
                            }
                            None => {
                                self.resolutions.remove(&site);
                            }
                        }
                    }
                }
            }
        }

        self.exports.insert(module, new_exports);
        ConsistencyReport { changed }
    }
}

impl Default for ModuleDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::Interner;

    #[test]
    fn hot_reload_reports_only_call_sites_whose_target_changed() {
        let interner = Interner::new();
        let mut dispatcher = ModuleDispatcher::new();
        let module = ModuleId::new(0);
        let name = interner.intern_str("speak");
        let old_fn = FunctionId::new(0);
        let new_fn = FunctionId::new(1);

        let mut exports = HashMap::new();
        exports.insert(name, old_fn);
        dispatcher.register_module(module, exports);

        let site = CallSiteDigest(42);
        dispatcher.record_resolution(site, module, name, old_fn);

        let mut reloaded = HashMap::new();
        reloaded.insert(name, new_fn);
        let report = dispatcher.hot_reload(module, reloaded);

        assert_eq!(report.changed.len(), 1);
        assert_eq!(report.changed[0], (site, Some(old_fn), Some(new_fn)));
    }

    #[test]
    fn hot_reload_with_no_changes_reports_nothing() {
        let interner = Interner::new();
        let mut dispatcher = ModuleDispatcher::new();
        let module = ModuleId::new(0);
        let name = interner.intern_str("speak");
        let f = FunctionId::new(0);

        let mut exports = HashMap::new();
        exports.insert(name, f);
        dispatcher.register_module(module, exports.clone());
        dispatcher.record_resolution(CallSiteDigest(1), module, name, f);

        let report = dispatcher.hot_reload(module, exports);
        assert!(report.changed.is_empty());
    }

    #[test]
    fn removing_an_export_reports_a_broken_call_site() {
        let interner = Interner::new();
        let mut dispatcher = ModuleDispatcher::new();
        let module = ModuleId::new(0);
        let name = interner.intern_str("speak");
        let f = FunctionId::new(0);

        let mut exports = HashMap::new();
        exports.insert(name, f);
        dispatcher.register_module(module, exports);
        dispatcher.record_resolution(CallSiteDigest(7), module, name, f);

        let report = dispatcher.hot_reload(module, HashMap::new());
        assert_eq!(report.changed, vec![(CallSiteDigest(7), Some(f), None)]);
    }
}
