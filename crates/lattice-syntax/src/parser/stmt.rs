//! Statement grammar: `do ... end` blocks, control flow, `match`/`select`,
//! and the `requires`/`ensures`/`invariant` contract clauses gated behind
//! a profile (§4.4.5).

use lattice_core::NodeId;

use super::core::Parser;
use super::expr::parse_expr;
use crate::astdb::{AstKind, NodeKind};

pub fn parse_block(p: &mut Parser) -> NodeId {
    let first = p.expect(AstKind::KwDo, "`do`");
    let mut children = Vec::new();
    while !p.at(AstKind::KwEnd) && !p.at_eof() && p.tick() {
        children.push(parse_stmt(p));
    }
    let last = p.expect(AstKind::KwEnd, "`end`");
    p.push_node(NodeKind::BlockStmt, first, last, &children)
}

pub fn parse_stmt(p: &mut Parser) -> NodeId {
    match p.peek() {
        AstKind::KwReturn => parse_simple_value_stmt(p, AstKind::KwReturn, NodeKind::ReturnStmt, true),
        AstKind::KwFail => parse_simple_value_stmt(p, AstKind::KwFail, NodeKind::FailStmt, true),
        AstKind::KwBreak => parse_simple_value_stmt(p, AstKind::KwBreak, NodeKind::BreakStmt, false),
        AstKind::KwContinue => parse_simple_value_stmt(p, AstKind::KwContinue, NodeKind::ContinueStmt, false),
        AstKind::KwDefer => {
            let first = p.bump();
            let inner = parse_stmt(p);
            let last = p.builder_last_token(inner);
            p.push_node(NodeKind::DeferStmt, first, last, &[inner])
        }
        AstKind::KwIf => parse_if(p),
        AstKind::KwWhile => parse_while(p),
        AstKind::KwFor => parse_for(p),
        AstKind::KwMatch => parse_match(p),
        AstKind::KwNursery => parse_nursery(p),
        AstKind::KwSelect => parse_select(p),
        AstKind::KwRequires => parse_contract_clause(p, AstKind::KwRequires, NodeKind::RequiresClause),
        AstKind::KwEnsures => parse_contract_clause(p, AstKind::KwEnsures, NodeKind::EnsuresClause),
        AstKind::KwInvariant => parse_contract_clause(p, AstKind::KwInvariant, NodeKind::InvariantClause),
        AstKind::KwDo => parse_block(p),
        AstKind::KwConst | AstKind::KwLet | AstKind::KwVar => parse_local_binding(p),
        _ => {
            let first = p.current_token();
            let expr = parse_expr(p);
            let last = p.builder_last_token(expr);
            p.push_node(NodeKind::ExprStmt, first, last, &[expr])
        }
    }
}

fn parse_simple_value_stmt(p: &mut Parser, keyword: AstKind, kind: NodeKind, takes_value: bool) -> NodeId {
    let first = p.expect(keyword, "a statement keyword");
    let mut children = Vec::new();
    let mut last = first;
    if takes_value && !matches!(p.peek(), AstKind::KwEnd | AstKind::Newline | AstKind::Eof) && !starts_trailing_keyword(p) {
        let value = parse_expr(p);
        last = p.builder_last_token(value);
        children.push(value);
    }
    p.push_node(kind, first, last, &children)
}

fn starts_trailing_keyword(p: &Parser) -> bool {
    matches!(p.peek(), AstKind::KwWhen | AstKind::KwUnless)
}

fn parse_local_binding(p: &mut Parser) -> NodeId {
    let (keyword, kind) = match p.peek() {
        AstKind::KwConst => (AstKind::KwConst, NodeKind::ConstStmt),
        AstKind::KwVar => (AstKind::KwVar, NodeKind::VarStmt),
        _ => (AstKind::KwLet, NodeKind::LetStmt),
    };
    let first = p.bump();
    let _ = keyword;
    let name = p.expect(AstKind::Identifier, "a name");
    let name_node = p.push_node(NodeKind::Identifier, name, name, &[]);
    let mut children = vec![name_node];
    if p.eat(AstKind::Colon).is_some() {
        children.push(super::decl::parse_type(p));
    }
    p.expect(AstKind::Eq, "`=` (or `:=`)");
    children.push(parse_expr(p));
    let last = p.builder_last_token(*children.last().unwrap());
    p.push_node(kind, first, last, &children)
}

fn parse_if(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `if`
    let cond = parse_expr(p);
    let then_block = parse_block_or_else(p);
    let mut children = vec![cond, then_block];
    let mut last = p.builder_last_token(then_block);
    if p.eat(AstKind::KwElse).is_some() {
        let else_branch = if p.at(AstKind::KwIf) { parse_if(p) } else { parse_block(p) };
        last = p.builder_last_token(else_branch);
        children.push(else_branch);
    }
    p.push_node(NodeKind::IfStmt, first, last, &children)
}

/// `if`/`while` bodies are ordinary `do ... end` blocks but must stop at
/// `else` as well as `end`.
fn parse_block_or_else(p: &mut Parser) -> NodeId {
    let first = p.expect(AstKind::KwDo, "`do`");
    let mut children = Vec::new();
    while !matches!(p.peek(), AstKind::KwEnd | AstKind::KwElse) && !p.at_eof() && p.tick() {
        children.push(parse_stmt(p));
    }
    let last = if p.at(AstKind::KwElse) { p.current_token() } else { p.expect(AstKind::KwEnd, "`end`") };
    p.push_node(NodeKind::BlockStmt, first, last, &children)
}

fn parse_while(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `while`
    let cond = parse_expr(p);
    let body = parse_block(p);
    let last = p.builder_last_token(body);
    p.push_node(NodeKind::WhileStmt, first, last, &[cond, body])
}

fn parse_for(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `for`
    let binder = p.expect(AstKind::Identifier, "a loop variable");
    let binder_node = p.push_node(NodeKind::Identifier, binder, binder, &[]);
    p.expect(AstKind::KwIn, "`in`");
    let iter = parse_expr(p);
    let body = parse_block(p);
    let last = p.builder_last_token(body);
    p.push_node(NodeKind::ForStmt, first, last, &[binder_node, iter, body])
}

fn parse_match(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `match`
    let subject = parse_expr(p);
    p.expect(AstKind::KwDo, "`do`");
    let mut children = vec![subject];
    while p.at(AstKind::KwCase) && p.tick() {
        let case_first = p.bump();
        let pattern = parse_expr(p);
        p.expect(AstKind::FatArrow, "`=>`");
        let body = parse_stmt(p);
        let last = p.builder_last_token(body);
        children.push(p.push_node(NodeKind::MatchArm, case_first, last, &[pattern, body]));
    }
    if p.eat(AstKind::KwDefault).is_some() {
        p.expect(AstKind::FatArrow, "`=>`");
        let default_first = p.current_token();
        let body = parse_stmt(p);
        let last = p.builder_last_token(body);
        children.push(p.push_node(NodeKind::MatchArm, default_first, last, &[body]));
    }
    let last = p.expect(AstKind::KwEnd, "`end`");
    p.push_node(NodeKind::MatchStmt, first, last, &children)
}

fn parse_nursery(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `nursery`
    let body = parse_block(p);
    let last = p.builder_last_token(body);
    p.push_node(NodeKind::NurseryStmt, first, last, &[body])
}

fn parse_select(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `select`
    p.expect(AstKind::KwDo, "`do`");
    let mut children = Vec::new();
    while !p.at(AstKind::KwEnd) && !p.at_eof() && p.tick() {
        children.push(match p.peek() {
            AstKind::KwCase => {
                let case_first = p.bump();
                let expr = parse_expr(p);
                p.expect(AstKind::FatArrow, "`=>`");
                let body = parse_stmt(p);
                let last = p.builder_last_token(body);
                p.push_node(NodeKind::SelectCase, case_first, last, &[expr, body])
            }
            AstKind::KwTimeout => {
                let timeout_first = p.bump();
                let duration = parse_expr(p);
                p.expect(AstKind::FatArrow, "`=>`");
                let body = parse_stmt(p);
                let last = p.builder_last_token(body);
                p.push_node(NodeKind::SelectTimeout, timeout_first, last, &[duration, body])
            }
            AstKind::KwDefault => {
                let default_first = p.bump();
                p.expect(AstKind::FatArrow, "`=>`");
                let body = parse_stmt(p);
                let last = p.builder_last_token(body);
                p.push_node(NodeKind::SelectDefault, default_first, last, &[body])
            }
            _ => p.recover_to_next_decl("expected `case`, `timeout`, or `default` inside `select`"),
        });
    }
    let last = p.expect(AstKind::KwEnd, "`end`");
    p.push_node(NodeKind::SelectStmt, first, last, &children)
}

/// Contract clauses (`requires`/`ensures`/`invariant`) are gated: they
/// only parse as first-class nodes under a profile that allows their
/// token tag (§4.4.5). Under a profile that rejects them they still get
/// consumed — so a single misplaced clause doesn't cascade into error
/// recovery for the rest of the function — but surface as a diagnostic
/// instead of a clause node.
fn parse_contract_clause(p: &mut Parser, keyword: AstKind, kind: NodeKind) -> NodeId {
    let first = p.current_token();
    let gated_out = !p.gates.allows(keyword.gate_tag());
    if gated_out {
        p.error_here("contract clauses are not enabled under the active profile");
    }
    p.bump();
    let cond = parse_expr(p);
    let last = p.builder_last_token(cond);
    if gated_out {
        p.push_node(NodeKind::ErrorNode, first, last, &[cond])
    } else {
        p.push_node(kind, first, last, &[cond])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astdb::{map_tokens, UnitBuilder};
    use crate::parser::core::Parser;
    use crate::tokenizer::lex;
    use lattice_core::{Gate, Interner};

    #[test]
    fn contract_clause_is_rejected_under_a_gate_that_excludes_it() {
        let interner = Interner::new();
        let filename = interner.intern_str("t.lat");
        let source = "requires x > 0";
        let source_tokens = lex(source);
        let (tokens, trivia) = map_tokens(&source_tokens, &interner);
        let builder = UnitBuilder::new(filename, source.to_string(), tokens, trivia);
        let mut parser = Parser::new(builder);
        let _guard = parser.gates.push(Gate::new("no-contracts", []));

        let node = parse_contract_clause(&mut parser, AstKind::KwRequires, NodeKind::RequiresClause);
        let unit = parser.finish(node);
        assert!(unit.diagnostics.has_errors());
        assert_eq!(unit.node(node).kind, NodeKind::ErrorNode);
    }
}
