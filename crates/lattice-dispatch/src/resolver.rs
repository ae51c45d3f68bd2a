//! Semantic Resolver (§3.6, §4.11): a four-phase pipeline over an ASTDB
//! snapshot — declare, resolve types, resolve dispatch, validate — run in
//! that fixed order so phase N can assume every binding phase N-1 produces
//! already exists, without forward-declaration special-casing.

use lattice_core::{Diagnostics, FunctionId, Interner, NodeId, StrId, TypeId, UnitId};
use lattice_syntax::{AstDb, NodeKind, Unit};

use crate::conversion::ConversionRegistry;
use crate::scope::ScopeManager;
use crate::signature::{FunctionFamily, Signature, SignatureRegistry};
use crate::specificity::SpecificityAnalyzer;
use crate::types::{TypeRegistry, TypeRelation};

/// One resolved call site: the call node plus the implementation chosen
/// for it, or `None` if resolution failed (ambiguous or no match — a
/// diagnostic is pushed in either case).
pub struct ResolvedCall {
    pub unit: UnitId,
    pub call_node: NodeId,
    pub resolved: Option<FunctionId>,
}

pub struct SemanticResolver {
    pub types: TypeRegistry,
    pub signatures: SignatureRegistry,
    pub conversions: ConversionRegistry,
    pub scopes: ScopeManager,
    pub diagnostics: Diagnostics,
    pub resolved_calls: Vec<ResolvedCall>,
    next_function_id: u32,
}

impl SemanticResolver {
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::new(),
            signatures: SignatureRegistry::new(),
            conversions: ConversionRegistry::new(),
            scopes: ScopeManager::new(),
            diagnostics: Diagnostics::new(),
            resolved_calls: Vec::new(),
            next_function_id: 0,
        }
    }

    /// Runs all four phases against every unit in `db`'s current snapshot.
    pub fn run(&mut self, db: &AstDb) {
        let snapshot = db.create_snapshot();
        let units: Vec<UnitId> = snapshot.units().map(|(id, _)| id).collect();
        drop(snapshot);

        for &unit in &units {
            self.phase1_declare(db, unit);
        }
        for &unit in &units {
            self.phase2_resolve_types(db, unit);
        }
        for &unit in &units {
            self.phase3_resolve_dispatch(db, unit);
        }
        self.phase4_validate();
    }

    /// Phase 1: walk each unit's top-level declarations, registering a
    /// type for every `struct`/`enum`/`union`/`error` and a signature
    /// family member for every `func`/`async func`/`extern func`.
    fn phase1_declare(&mut self, db: &AstDb, unit_id: UnitId) {
        let unit = db.get_unit(unit_id);
        for &child in unit.children(unit.root) {
            let record = unit.node(child);
            match record.kind {
                NodeKind::StructDecl | NodeKind::EnumDecl | NodeKind::UnionDecl | NodeKind::ErrorDecl => {
                    let name = self.declared_name(unit, child);
                    self.types.register(name, None);
                }
                NodeKind::FuncDecl | NodeKind::AsyncFuncDecl | NodeKind::ExternFunc => {
                    let name = self.declared_name(unit, child);
                    let param_types = self.declared_param_types(unit, child);
                    let id = FunctionId::new(self.next_function_id);
                    self.next_function_id += 1;
                    self.signatures.register(id, Signature { name, param_types });
                }
                _ => {}
            }
        }
    }

    /// Phase 2 resolves any type annotation left unresolved in phase 1
    /// because its declaration appeared later in the same unit (mutual
    /// recursion between type declarations). With every name already
    /// registered after phase 1, a second pass just re-reads the
    /// registry; nothing to redo unless annotations named a forward
    /// reference, which `declared_param_types` already tolerates by
    /// registering on first sight.
    fn phase2_resolve_types(&mut self, _db: &AstDb, _unit_id: UnitId) {}

    /// Phase 3 resolves every call site to the most specific matching
    /// implementation, recording the failure as a diagnostic when no
    /// implementation matches or the candidates are mutually incomparable.
    /// Each call's actual argument types (§4.10 steps 2-3), inferred from
    /// the argument expressions themselves, drive both the type-filtering
    /// and the conversion-cost tie-break — a candidate whose parameters
    /// don't accept an argument directly and have no registered conversion
    /// path to it is dropped before specificity is even considered.
    fn phase3_resolve_dispatch(&mut self, db: &AstDb, unit_id: UnitId) {
        let unit = db.get_unit(unit_id);
        let interner = db.interner();
        let call_nodes: Vec<NodeId> = (0..unit.node_count())
            .map(|i| NodeId::new(i as u32))
            .filter(|&id| unit.node(id).kind == NodeKind::CallExpr)
            .collect();

        for call_node in call_nodes {
            let callee = self.callee_name(unit, call_node);
            let arg_types: Vec<Option<TypeId>> = unit
                .children(call_node)
                .iter()
                .skip(1) // first child is the callee
                .map(|&arg| self.infer_arg_type(interner, unit, arg))
                .collect();
            let resolved = callee.and_then(|name| self.resolve_one(name, &arg_types));
            if resolved.is_none() {
                let span = unit.token(unit.node(call_node).first_token).span;
                self.diagnostics
                    .error(
                        lattice_core::Code::new(lattice_core::Producer::Resolution, 1),
                        "no matching implementation for this call",
                        span,
                    )
                    .emit();
            }
            self.resolved_calls.push(ResolvedCall {
                unit: unit_id,
                call_node,
                resolved,
            });
        }
    }

    /// Phase 2 (type filtering) + phase 3 (conversion expansion) + phase 4
    /// (specificity selection) of §4.10 for one call site. `arg_types[i]`
    /// is `None` when the i-th argument's type couldn't be inferred from
    /// its expression alone (anything but a literal); such a position never
    /// disqualifies a candidate and never contributes conversion cost,
    /// since there is nothing concrete yet to check it against.
    fn resolve_one(&mut self, name: StrId, arg_types: &[Option<TypeId>]) -> Option<FunctionId> {
        let arity = arg_types.len();
        let candidates_in = self.signatures.family(name, arity)?.implementations.clone();

        let mut candidates = Vec::with_capacity(candidates_in.len());
        for id in candidates_in {
            let param_types = self.signatures.signature(id).param_types.clone();
            let accepts = param_types.iter().zip(arg_types).all(|(&param, &arg)| match arg {
                None => true,
                Some(arg) => match self.types.relation(arg, param) {
                    TypeRelation::Unrelated => self.conversions.cost(arg, param).is_some(),
                    _ => true,
                },
            });
            if accepts {
                candidates.push(id);
            }
        }
        if candidates.is_empty() {
            return None;
        }
        let family = FunctionFamily { implementations: candidates };

        let analyzer = SpecificityAnalyzer::new(&self.types);
        let types = &self.types;
        let conversions = &mut self.conversions;
        let signatures = &self.signatures;
        analyzer.most_specific(&family, signatures, |id| {
            let sig = signatures.signature(id);
            sig.param_types
                .iter()
                .zip(arg_types)
                .map(|(&param, &arg)| match arg {
                    None => 0,
                    Some(arg) => match types.relation(arg, param) {
                        TypeRelation::Unrelated => conversions.cost(arg, param).unwrap_or(0),
                        _ => 0,
                    },
                })
                .sum()
        })
    }

    /// Infers an argument expression's type from its own shape — only
    /// literals carry enough information without a full expression-type
    /// checker, which is out of scope here (§4.10 leaves inference of
    /// non-literal argument types to a downstream type-check pass this
    /// resolver doesn't own). Registers the builtin primitive lazily via
    /// the Type Registry's idempotent `register`, so repeated calls share
    /// one `TypeId` per primitive.
    fn infer_arg_type(&mut self, interner: &Interner, unit: &Unit, node: NodeId) -> Option<TypeId> {
        let name = match unit.node(node).kind {
            NodeKind::IntegerLiteral => "Int",
            NodeKind::FloatLiteral => "Float",
            NodeKind::StringLiteral => "String",
            NodeKind::CharLiteral => "Char",
            NodeKind::BoolLiteral => "Bool",
            NodeKind::NullLiteral => "Null",
            _ => return None,
        };
        Some(self.types.register(interner.intern_str(name), None))
    }

    fn phase4_validate(&mut self) {
        // Downstream contract checks (§6) run here once bound to a real
        // effect-system/comptime-VM collaborator; nothing registry-level
        // left to check once dispatch has already rejected ambiguous and
        // unmatched calls in phase 3.
    }

    fn declared_name(&self, unit: &lattice_syntax::Unit, node: NodeId) -> StrId {
        unit.children(node)
            .first()
            .and_then(|&child| unit.token(unit.node(child).first_token).str)
            .unwrap_or(StrId::EMPTY)
    }

    fn declared_param_types(&mut self, unit: &lattice_syntax::Unit, node: NodeId) -> Vec<TypeId> {
        unit.children(node)
            .iter()
            .skip(1)
            .filter_map(|&child| {
                let record = unit.node(child);
                if matches!(record.kind, NodeKind::PrimitiveType | NodeKind::Identifier) {
                    unit.token(record.first_token).str
                } else {
                    None
                }
            })
            .map(|name| self.types.register(name, None))
            .collect()
    }

    fn callee_name(&self, unit: &lattice_syntax::Unit, call_node: NodeId) -> Option<StrId> {
        let callee = *unit.children(call_node).first()?;
        unit.token(unit.node(callee).first_token).str
    }
}

impl Default for SemanticResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_syntax::AstDb;

    #[test]
    fn call_with_exact_literal_type_resolves_without_diagnostics() {
        let mut db = AstDb::new();
        db.add_unit("main.lat", "func f(x: Int) do end func g() do f(1) end");
        let mut resolver = SemanticResolver::new();
        resolver.run(&db);
        assert!(resolver.diagnostics.is_empty());
        assert_eq!(resolver.resolved_calls.iter().filter(|c| c.resolved.is_some()).count(), 1);
    }

    #[test]
    fn call_with_mismatched_literal_type_and_no_conversion_fails_to_resolve() {
        let mut db = AstDb::new();
        db.add_unit("main.lat", r#"func f(x: Int) do end func g() do f("hi") end"#);
        let mut resolver = SemanticResolver::new();
        resolver.run(&db);
        assert!(!resolver.diagnostics.is_empty());
        assert!(resolver.resolved_calls.iter().any(|c| c.resolved.is_none()));
    }

    #[test]
    fn call_with_mismatched_literal_type_resolves_once_a_conversion_is_registered() {
        let mut db = AstDb::new();
        db.add_unit("main.lat", r#"func f(x: Int) do end func g() do f("hi") end"#);
        let mut resolver = SemanticResolver::new();
        let interner = db.interner();
        let string_ty = resolver.types.register(interner.intern_str("String"), None);
        let int_ty = resolver.types.register(interner.intern_str("Int"), None);
        resolver
            .conversions
            .register_conversion(string_ty, int_ty, 5, true, StrId::EMPTY, None);

        resolver.run(&db);
        assert!(resolver.resolved_calls.iter().any(|c| c.resolved.is_some()));
    }
}
