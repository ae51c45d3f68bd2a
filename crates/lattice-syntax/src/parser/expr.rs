//! Expression grammar: Pratt climbing over `precedence::infix_binding_power`
//! plus the postfix chain (call / field / index / slice / try / await) and
//! three of the five disambiguation rules (§4.4.3): struct-literal-vs-block,
//! slice-vs-index, and pipeline desugaring.

use lattice_core::{NodeId, TokenId};

use super::core::Parser;
use super::precedence::{infix_binding_power, is_unary_prefix, Precedence, UNARY_PRECEDENCE};
use crate::astdb::{AstKind, NodeKind};

/// Whether `{` after an expression head starts a struct literal or a block
/// (rule 1). A struct literal's brace is immediately followed by either
/// `}` (empty literal) or `identifier :`/`identifier ,` (a field); any
/// other shape — a statement keyword, a bare expression, `}` after a
/// non-identifier — is a block.
fn brace_starts_struct_literal(p: &Parser) -> bool {
    if p.peek() != AstKind::BraceOpen {
        return false;
    }
    match p.peek_at(1) {
        AstKind::BraceClose => true,
        AstKind::Identifier => matches!(p.peek_at(2), AstKind::Colon | AstKind::Comma),
        _ => false,
    }
}

pub fn parse_expr(p: &mut Parser) -> NodeId {
    parse_expr_bp(p, Precedence::NONE)
}

fn parse_expr_bp(p: &mut Parser, min_bp: Precedence) -> NodeId {
    let mut lhs = parse_prefix(p);

    while p.tick() {
        let Some((left_bp, right_bp)) = infix_binding_power(p.peek()) else {
            break;
        };
        if left_bp < min_bp {
            break;
        }
        let is_pipeline = p.peek() == AstKind::Pipeline;
        p.bump();
        let rhs = parse_expr_bp(p, right_bp);
        let first = first_token_of(p, lhs);
        lhs = if is_pipeline {
            desugar_pipeline(p, lhs, rhs, first)
        } else {
            let last = last_token_of(p, rhs);
            p.push_node(NodeKind::BinaryExpr, first, last, &[lhs, rhs])
        };
    }
    lhs
}

/// Desugars `a |> f(b)` into `f(a, b)` by copying `f`'s existing call
/// children into a new call node with `a` prepended (§4.4.2) — children
/// are copied into a fresh `ChildRange`, never aliased, so the original
/// `f(b)` subtree remains independently addressable for diagnostics that
/// still want to point at it.
fn desugar_pipeline(p: &mut Parser, lhs: NodeId, rhs: NodeId, first: TokenId) -> NodeId {
    let last = last_token_of(p, rhs);
    if p.builder_node_kind(rhs) == NodeKind::CallExpr {
        let mut children = vec![p.builder_children(rhs)[0]];
        children.push(lhs);
        children.extend(p.builder_children(rhs)[1..].iter().copied());
        p.push_node(NodeKind::CallExpr, first, last, &children)
    } else {
        // Pipelining into a non-call expression is still well-formed: treat
        // the right-hand side as a unary callee applied to `lhs`.
        p.push_node(NodeKind::CallExpr, first, last, &[rhs, lhs])
    }
}

fn parse_prefix(p: &mut Parser) -> NodeId {
    if is_unary_prefix(p.peek()) {
        let first = p.bump();
        let operand = parse_expr_bp(p, UNARY_PRECEDENCE);
        let last = last_token_of(p, operand);
        return p.push_node(NodeKind::UnaryExpr, first, last, &[operand]);
    }
    parse_postfix(p)
}

fn parse_postfix(p: &mut Parser) -> NodeId {
    let subtree_start = p.node_count();
    let mut node = parse_primary(p);
    loop {
        node = match p.peek() {
            AstKind::Dot => {
                p.bump();
                let field_tok = p.expect(AstKind::Identifier, "a field name");
                p.push_node(NodeKind::FieldExpr, first_token_of(p, node), field_tok, &[node])
            }
            AstKind::OptChain => {
                p.bump();
                let field_tok = p.expect(AstKind::Identifier, "a field name");
                p.push_node(NodeKind::FieldExpr, first_token_of(p, node), field_tok, &[node])
            }
            AstKind::ParenOpen => parse_call_args(p, node),
            AstKind::BracketOpen => parse_index_or_slice(p, node),
            AstKind::Question => {
                let tok = p.bump();
                p.push_node(NodeKind::TryExpr, first_token_of(p, node), tok, &[node])
            }
            AstKind::KwAwait => {
                let tok = p.bump();
                p.push_node(NodeKind::AwaitExpr, first_token_of(p, node), tok, &[node])
            }
            // Rule: struct literal vs. block (§4.4.3), named form. An
            // identifier (or qualified `T.V`, already folded into `node`
            // by the `Dot` arm above) followed by `{` is a struct literal
            // with `node` as its type-name edge.
            AstKind::BraceOpen if brace_starts_struct_literal(p) => parse_struct_literal(p, Some(node)),
            AstKind::KwWhen => {
                p.bump();
                rotate_postfix_condition(p, subtree_start, node, NodeKind::PostfixWhen)
            }
            AstKind::KwUnless => {
                p.bump();
                rotate_postfix_condition(p, subtree_start, node, NodeKind::PostfixUnless)
            }
            _ => break,
        };
    }
    node
}

/// Parses the condition of a postfix `when`/`unless` and rotates it ahead
/// of the already-parsed statement/expression in node order (§4.4.3),
/// then builds the wrapping node from the rotated ids so its children are
/// `[condition, statement]` in both node order and edge order, per
/// Testable Property #10.
fn rotate_postfix_condition(p: &mut Parser, subtree_start: u32, node: NodeId, kind: NodeKind) -> NodeId {
    let node_end = p.node_count();
    let cond = parse_expr(p);
    let cond_end = p.node_count();

    p.swap_node_regions(subtree_start, node_end, cond_end);
    let node = p.remap_after_swap(subtree_start, node_end, cond_end, node);
    let cond = p.remap_after_swap(subtree_start, node_end, cond_end, cond);

    let first = first_token_of(p, node);
    let last = last_token_of(p, cond);
    p.push_node(kind, first, last, &[cond, node])
}

fn parse_call_args(p: &mut Parser, callee: NodeId) -> NodeId {
    let first = first_token_of(p, callee);
    p.bump(); // `(`
    let mut children = vec![callee];
    while !p.at(AstKind::ParenClose) && !p.at_eof() && p.tick() {
        children.push(parse_expr(p));
        if p.eat(AstKind::Comma).is_none() {
            break;
        }
    }
    let last = p.expect(AstKind::ParenClose, "`)`");
    p.push_node(NodeKind::CallExpr, first, last, &children)
}

/// Rule: slice-vs-index (§4.4.3). `a[i]` is an index; `a[i..j]` or
/// `a[i..<j]` (either bound optional) is a slice. Disambiguated by
/// scanning for a range operator before the closing bracket at depth 0.
fn parse_index_or_slice(p: &mut Parser, target: NodeId) -> NodeId {
    let first = first_token_of(p, target);
    p.bump(); // `[`

    if p.at(AstKind::BracketClose) {
        let last = p.bump();
        return p.push_node(NodeKind::IndexExpr, first, last, &[target]);
    }

    let lo = if matches!(p.peek(), AstKind::RangeInclusiveOp | AstKind::RangeExclusiveOp) {
        None
    } else {
        Some(parse_expr(p))
    };

    if matches!(p.peek(), AstKind::RangeInclusiveOp | AstKind::RangeExclusiveOp) {
        let kind = p.peek();
        p.bump();
        let hi = if p.at(AstKind::BracketClose) { None } else { Some(parse_expr(p)) };
        let last = p.expect(AstKind::BracketClose, "`]`");
        let mut children = vec![target];
        children.extend(lo);
        children.extend(hi);
        let node_kind = if kind == AstKind::RangeInclusiveOp {
            NodeKind::SliceInclusiveExpr
        } else {
            NodeKind::SliceExclusiveExpr
        };
        return p.push_node(node_kind, first, last, &children);
    }

    let last = p.expect(AstKind::BracketClose, "`]`");
    let index = lo.unwrap_or(target);
    p.push_node(NodeKind::IndexExpr, first, last, &[target, index])
}

fn parse_primary(p: &mut Parser) -> NodeId {
    let first = p.current_token();
    match p.peek() {
        AstKind::IntegerLiteral => {
            let tok = p.bump();
            p.push_node(NodeKind::IntegerLiteral, tok, tok, &[])
        }
        AstKind::FloatLiteral => {
            let tok = p.bump();
            p.push_node(NodeKind::FloatLiteral, tok, tok, &[])
        }
        AstKind::StringLiteral => {
            let tok = p.bump();
            p.push_node(NodeKind::StringLiteral, tok, tok, &[])
        }
        AstKind::CharLiteral => {
            let tok = p.bump();
            p.push_node(NodeKind::CharLiteral, tok, tok, &[])
        }
        AstKind::KwTrue | AstKind::KwFalse => {
            let tok = p.bump();
            p.push_node(NodeKind::BoolLiteral, tok, tok, &[])
        }
        AstKind::KwNull => {
            let tok = p.bump();
            p.push_node(NodeKind::NullLiteral, tok, tok, &[])
        }
        AstKind::KwSpawn => {
            p.bump();
            let inner = parse_expr(p);
            let last = last_token_of(p, inner);
            p.push_node(NodeKind::SpawnExpr, first, last, &[inner])
        }
        AstKind::ParenOpen => {
            p.bump();
            let inner = parse_expr(p);
            p.expect(AstKind::ParenClose, "`)`");
            inner
        }
        AstKind::BraceOpen if brace_starts_struct_literal(p) => parse_struct_literal(p, None),
        AstKind::BracketOpen => parse_array_literal(p),
        AstKind::Identifier => {
            let tok = p.bump();
            p.push_node(NodeKind::Identifier, tok, tok, &[])
        }
        _ => {
            p.error_here("expected an expression");
            let tok = p.bump();
            p.push_node(NodeKind::ErrorNode, tok, tok, &[])
        }
    }
}

/// Parses `{ field: value, ... }`, optionally prefixed by an already-parsed
/// type-name edge (`name`) for the named form `Point { x: 1, y: 2 }` (rule
/// 1, §4.4.3; scenario S1). `name` is `None` for the anonymous form, where
/// `{` itself starts the primary expression.
fn parse_struct_literal(p: &mut Parser, name: Option<NodeId>) -> NodeId {
    let brace = p.bump(); // `{`
    let first = name.map(|n| first_token_of(p, n)).unwrap_or(brace);
    let mut children: Vec<NodeId> = name.into_iter().collect();
    while !p.at(AstKind::BraceClose) && !p.at_eof() && p.tick() {
        let field_first = p.expect(AstKind::Identifier, "a field name");
        p.expect(AstKind::Colon, "`:`");
        let value = parse_expr(p);
        let last = last_token_of(p, value);
        children.push(p.push_node(NodeKind::FieldExpr, field_first, last, &[value]));
        if p.eat(AstKind::Comma).is_none() {
            break;
        }
    }
    let last = p.expect(AstKind::BraceClose, "`}`");
    p.push_node(NodeKind::StructLiteral, first, last, &children)
}

fn parse_array_literal(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `[`
    let mut children = Vec::new();
    while !p.at(AstKind::BracketClose) && !p.at_eof() && p.tick() {
        children.push(parse_expr(p));
        if p.eat(AstKind::Comma).is_none() {
            break;
        }
    }
    let last = p.expect(AstKind::BracketClose, "`]`");
    p.push_node(NodeKind::ArrayLit, first, last, &children)
}

fn first_token_of(p: &Parser, node: NodeId) -> TokenId {
    p.builder_first_token(node)
}

fn last_token_of(p: &Parser, node: NodeId) -> TokenId {
    p.builder_last_token(node)
}
