//! Recursive-descent + Pratt parser producing ASTDB nodes directly (§4.4).

mod core;
mod decl;
mod expr;
pub mod precedence;
mod stmt;

use lattice_core::Interner;

use crate::astdb::{Unit, UnitBuilder};

/// Parses a Unit's token column end to end, producing a finished `Unit`
/// rooted at a `source_file` node. Never fails outright: unparseable
/// spans become `ErrorNode`s with a diagnostic attached (§4.4.4), so every
/// input — however malformed — yields a Unit.
pub fn parse(builder: UnitBuilder, _interner: &Interner) -> Unit {
    let mut parser = core::Parser::new(builder);
    let root = decl::parse_source_file(&mut parser);
    parser.finish(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astdb::{map_tokens, NodeKind};
    use crate::tokenizer::lex;

    fn parse_source(source: &str) -> Unit {
        let interner = Interner::new();
        let filename = interner.intern_str("test.lat");
        let source_tokens = lex(source);
        let (tokens, trivia) = map_tokens(&source_tokens, &interner);
        let builder = UnitBuilder::new(filename, source.to_string(), tokens, trivia);
        parse(builder, &interner)
    }

    #[test]
    fn parses_empty_source_into_an_empty_source_file() {
        let unit = parse_source("");
        assert_eq!(unit.node(unit.root).kind, NodeKind::SourceFile);
        assert!(unit.children(unit.root).is_empty());
        assert!(unit.diagnostics.is_empty());
    }

    #[test]
    fn parses_a_function_with_typed_parameters() {
        let unit = parse_source("func add(a: int, b: int) -> int do return a end");
        let top = unit.children(unit.root);
        assert_eq!(top.len(), 1);
        assert_eq!(unit.node(top[0]).kind, NodeKind::FuncDecl);
    }

    #[test]
    fn struct_literal_vs_block_disambiguation() {
        let unit = parse_source("func f() do x := { a: 1 } end");
        assert!(unit.diagnostics.is_empty());
        let func = unit.children(unit.root)[0];
        let body = *unit.children(func).last().unwrap();
        let binding = unit.children(body)[0];
        assert_eq!(unit.node(binding).kind, NodeKind::LetStmt);
    }

    #[test]
    fn walrus_split_inside_using_is_a_resource_bind() {
        let unit = parse_source("func f() do using lock := acquire() do end end");
        let func = unit.children(unit.root)[0];
        let body = *unit.children(func).last().unwrap();
        let using_stmt = unit.children(body)[0];
        assert_eq!(unit.node(using_stmt).kind, NodeKind::UsingResourceStmt);
    }

    #[test]
    fn using_with_type_annotation_is_a_shared_declaration() {
        let unit = parse_source("func f() do using conn: Connection do end end");
        let func = unit.children(unit.root)[0];
        let body = *unit.children(func).last().unwrap();
        let using_stmt = unit.children(body)[0];
        assert_eq!(unit.node(using_stmt).kind, NodeKind::UsingSharedStmt);
    }

    #[test]
    fn slice_vs_index_disambiguation() {
        let indexed = parse_source("func f() do x := a[0] end");
        let sliced = parse_source("func f() do x := a[0..1] end");

        let indexed_value = |unit: &Unit| {
            let func = unit.children(unit.root)[0];
            let body = *unit.children(func).last().unwrap();
            let binding = unit.children(body)[0];
            *unit.children(binding).last().unwrap()
        };
        assert_eq!(indexed.node(indexed_value(&indexed)).kind, NodeKind::IndexExpr);
        assert_eq!(sliced.node(indexed_value(&sliced)).kind, NodeKind::SliceInclusiveExpr);
    }

    #[test]
    fn pipeline_desugars_into_a_call_with_lhs_prepended() {
        let unit = parse_source("func f() do x := a |> g(b) end");
        let func = unit.children(unit.root)[0];
        let body = *unit.children(func).last().unwrap();
        let binding = unit.children(body)[0];
        let value = *unit.children(binding).last().unwrap();
        assert_eq!(unit.node(value).kind, NodeKind::CallExpr);
        assert_eq!(unit.children(value).len(), 3); // g, a, b
    }

    #[test]
    fn postfix_unless_wraps_the_statement_expression() {
        let unit = parse_source("func f() do x := 1 unless ready end");
        let func = unit.children(unit.root)[0];
        let body = *unit.children(func).last().unwrap();
        let binding = unit.children(body)[0];
        let value = *unit.children(binding).last().unwrap();
        assert_eq!(unit.node(value).kind, NodeKind::PostfixUnless);

        // Property #10: the condition's subtree must precede the wrapped
        // statement's subtree in node order, and the children edges must
        // list the condition first.
        let children = unit.children(value);
        assert_eq!(children.len(), 2);
        let (cond, stmt) = (children[0], children[1]);
        assert!(cond.index() < stmt.index());
        assert_eq!(unit.node(cond).kind, NodeKind::Identifier);
    }

    #[test]
    fn use_selective_form_dispatches_on_dot_brace() {
        let unit = parse_source("use collections.{ List, Map }");
        let stmt = unit.children(unit.root)[0];
        assert_eq!(unit.node(stmt).kind, NodeKind::UseSelective);
        let children = unit.children(stmt);
        assert_eq!(children.len(), 3); // collections, List, Map
    }

    #[test]
    fn use_path_form_dispatches_on_dot() {
        let unit = parse_source("use collections.list");
        assert_eq!(unit.node(unit.children(unit.root)[0]).kind, NodeKind::UseStmt);
    }

    #[test]
    fn use_unaliased_graft_form_dispatches_on_string_literal() {
        let unit = parse_source(r#"use vendor "vendor/lib.lat""#);
        let stmt = unit.children(unit.root)[0];
        assert_eq!(unit.node(stmt).kind, NodeKind::Graft);
        let children = unit.children(stmt);
        assert_eq!(children.len(), 2); // origin, path
        assert_eq!(unit.node(children[0]).kind, NodeKind::Identifier);
        assert_eq!(unit.node(children[1]).kind, NodeKind::StringLiteral);
    }

    #[test]
    fn use_aliased_graft_form_dispatches_on_eq() {
        let unit = parse_source(r#"use lib = vendor "vendor/lib.lat""#);
        let stmt = unit.children(unit.root)[0];
        assert_eq!(unit.node(stmt).kind, NodeKind::Graft);
        let children = unit.children(stmt);
        assert_eq!(children.len(), 3); // alias, origin, path
        assert_eq!(unit.node(children[0]).kind, NodeKind::Identifier);
        assert_eq!(unit.node(children[1]).kind, NodeKind::Identifier);
        assert_eq!(unit.node(children[2]).kind, NodeKind::StringLiteral);
    }

    #[test]
    fn malformed_top_level_input_recovers_to_an_error_node() {
        let unit = parse_source("@@@ func ok() do end");
        assert!(!unit.diagnostics.is_empty());
        let top = unit.children(unit.root);
        assert_eq!(unit.node(top[0]).kind, NodeKind::ErrorNode);
        assert_eq!(unit.node(top[1]).kind, NodeKind::FuncDecl);
    }

    #[test]
    fn contract_clause_parses_as_a_clause_node_under_the_default_ungated_profile() {
        let unit = parse_source("func f() do requires x > 0 end");
        assert!(unit.diagnostics.is_empty());
        let func = unit.children(unit.root)[0];
        let body = *unit.children(func).last().unwrap();
        assert_eq!(unit.node(unit.children(body)[0]).kind, NodeKind::RequiresClause);
    }
}
