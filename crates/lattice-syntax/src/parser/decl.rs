//! Top-level declarations and the `use`/`using` families, including
//! disambiguation rules 2 and 4 (§4.4.3).

use lattice_core::{NodeId, TokenId};

use super::core::Parser;
use super::expr::parse_expr;
use super::stmt::parse_block;
use crate::astdb::{AstKind, NodeKind};

pub fn parse_source_file(p: &mut Parser) -> NodeId {
    let first = p.current_token();
    let mut children = Vec::new();
    while !p.at_eof() {
        if !p.tick() {
            break;
        }
        children.push(parse_top_level(p));
    }
    let last = p.current_token();
    p.push_node(NodeKind::SourceFile, first, last, &children)
}

fn parse_top_level(p: &mut Parser) -> NodeId {
    let pub_first = p.eat(AstKind::KwPub);
    let node = match p.peek() {
        AstKind::KwFunc => parse_func(p, false),
        AstKind::KwAsync => parse_func(p, true),
        AstKind::KwExtern => parse_extern_func(p),
        AstKind::KwForeign => parse_foreign_block(p),
        AstKind::KwStruct => parse_record(p, NodeKind::StructDecl),
        AstKind::KwEnum => parse_record(p, NodeKind::EnumDecl),
        AstKind::KwUnion => parse_record(p, NodeKind::UnionDecl),
        AstKind::KwError => parse_record(p, NodeKind::ErrorDecl),
        AstKind::KwTest => parse_test_decl(p),
        AstKind::KwConst => parse_binding(p, AstKind::KwConst, NodeKind::ConstStmt),
        AstKind::KwLet => parse_binding(p, AstKind::KwLet, NodeKind::LetStmt),
        AstKind::KwVar => parse_binding(p, AstKind::KwVar, NodeKind::VarStmt),
        AstKind::KwImport => parse_import(p),
        AstKind::KwUse => parse_use(p),
        AstKind::KwUsing => parse_using(p),
        AstKind::KwGraft => parse_graft(p),
        _ => return p.recover_to_next_decl("expected a top-level declaration"),
    };
    let _ = pub_first; // `pub` only toggles export visibility, not shape
    node
}

fn parse_func(p: &mut Parser, is_async: bool) -> NodeId {
    let first = p.current_token();
    if is_async {
        p.expect(AstKind::KwAsync, "`async`");
    }
    p.expect(AstKind::KwFunc, "`func`");
    let name = p.expect(AstKind::Identifier, "a function name");
    let name_node = p.push_node(NodeKind::Identifier, name, name, &[]);

    p.expect(AstKind::ParenOpen, "`(`");
    let mut children = vec![name_node];
    while !p.at(AstKind::ParenClose) && !p.at_eof() && p.tick() {
        p.expect(AstKind::Identifier, "a parameter name");
        p.expect(AstKind::Colon, "`:`");
        children.push(parse_type(p));
        if p.eat(AstKind::Comma).is_none() {
            break;
        }
    }
    p.expect(AstKind::ParenClose, "`)`");

    if p.eat(AstKind::Arrow).is_some() {
        parse_type(p);
    }

    let body = parse_block(p);
    children.push(body);
    let last = p.builder_last_token(body);
    let kind = if is_async { NodeKind::AsyncFuncDecl } else { NodeKind::FuncDecl };
    p.push_node(kind, first, last, &children)
}

fn parse_extern_func(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `extern`
    p.expect(AstKind::KwFunc, "`func`");
    let name = p.expect(AstKind::Identifier, "a function name");
    let name_node = p.push_node(NodeKind::Identifier, name, name, &[]);

    p.expect(AstKind::ParenOpen, "`(`");
    let mut children = vec![name_node];
    while !p.at(AstKind::ParenClose) && !p.at_eof() && p.tick() {
        p.expect(AstKind::Identifier, "a parameter name");
        p.expect(AstKind::Colon, "`:`");
        children.push(parse_type(p));
        if p.eat(AstKind::Comma).is_none() {
            break;
        }
    }
    let last = p.expect(AstKind::ParenClose, "`)`");
    if p.eat(AstKind::Arrow).is_some() {
        parse_type(p);
    }
    p.push_node(NodeKind::ExternFunc, first, last, &children)
}

fn parse_foreign_block(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `foreign`
    p.expect(AstKind::BraceOpen, "`{`");
    let mut children = Vec::new();
    while !p.at(AstKind::BraceClose) && !p.at_eof() && p.tick() {
        if p.at(AstKind::KwExtern) {
            children.push(parse_extern_func(p));
        } else {
            p.recover_to_next_decl("expected an extern function inside a foreign block");
        }
    }
    let last = p.expect(AstKind::BraceClose, "`}`");
    p.push_node(NodeKind::ForeignBlock, first, last, &children)
}

fn parse_record(p: &mut Parser, kind: NodeKind) -> NodeId {
    let first = p.bump(); // struct/enum/union/error keyword
    let name = p.expect(AstKind::Identifier, "a type name");
    let name_node = p.push_node(NodeKind::Identifier, name, name, &[]);
    let mut children = vec![name_node];

    p.expect(AstKind::KwDo, "`do`");
    while !p.at(AstKind::KwEnd) && !p.at_eof() && p.tick() {
        let field = p.expect(AstKind::Identifier, "a field name");
        let field_node = p.push_node(NodeKind::Identifier, field, field, &[]);
        if p.eat(AstKind::Colon).is_some() {
            let ty = parse_type(p);
            let last = p.builder_last_token(ty);
            children.push(p.push_node(NodeKind::FieldExpr, field, last, &[field_node, ty]));
        } else {
            children.push(field_node);
        }
        p.eat(AstKind::Comma);
    }
    let last = p.expect(AstKind::KwEnd, "`end`");
    p.push_node(kind, first, last, &children)
}

fn parse_test_decl(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `test`
    p.expect(AstKind::StringLiteral, "a test name");
    let body = parse_block(p);
    let last = p.builder_last_token(body);
    p.push_node(NodeKind::TestDecl, first, last, &[body])
}

fn parse_binding(p: &mut Parser, keyword: AstKind, kind: NodeKind) -> NodeId {
    let first = p.expect(keyword, "a binding keyword");
    let name = p.expect(AstKind::Identifier, "a name");
    let name_node = p.push_node(NodeKind::Identifier, name, name, &[]);
    let mut children = vec![name_node];
    if p.eat(AstKind::Colon).is_some() {
        children.push(parse_type(p));
    }
    p.expect(AstKind::Eq, "`=` (or `:=`)");
    children.push(parse_expr(p));
    let last = p.builder_last_token(*children.last().unwrap());
    p.push_node(kind, first, last, &children)
}

fn parse_import(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `import`
    let last = p.expect(AstKind::StringLiteral, "a module path");
    p.push_node(NodeKind::ImportStmt, first, last, &[])
}

/// Rule 4: use-form dispatch (SPEC_FULL.md §4 Open Question 1). Decided
/// strictly on the token immediately after `use`'s first identifier: `=`
/// means the identifier was an alias for an aliased graft, a string
/// literal makes it the origin of an unaliased graft, `.` continues a
/// dotted module path (selective import is then chosen only where a `.`
/// is itself followed by `{`), and anything else ends a single-segment
/// path `use`. `use zig` is the one lexical exception, gated on the first
/// token rather than the second since there is no leading name.
fn parse_use(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `use`

    if p.eat(AstKind::KwZig).is_some() {
        let last = p.expect(AstKind::StringLiteral, "a zig source path");
        return p.push_node(NodeKind::UseZig, first, last, &[]);
    }

    let head = p.expect(AstKind::Identifier, "a module path");
    let head_node = p.push_node(NodeKind::Identifier, head, head, &[]);

    match p.peek() {
        AstKind::Eq => parse_aliased_graft(p, first, head_node),
        AstKind::StringLiteral => parse_unaliased_graft(p, first, head_node),
        _ => parse_use_path(p, first, head_node),
    }
}

/// `use alias = origin "mod"`: `head_node` was the alias.
fn parse_aliased_graft(p: &mut Parser, first: TokenId, alias_node: NodeId) -> NodeId {
    p.bump(); // `=`
    let origin = p.expect(AstKind::Identifier, "an origin module name");
    let origin_node = p.push_node(NodeKind::Identifier, origin, origin, &[]);
    let path = p.expect(AstKind::StringLiteral, "a graft path");
    let path_node = p.push_node(NodeKind::StringLiteral, path, path, &[]);
    p.push_node(NodeKind::Graft, first, path, &[alias_node, origin_node, path_node])
}

/// `use origin "mod"`: `head_node` was the origin, unaliased.
fn parse_unaliased_graft(p: &mut Parser, first: TokenId, origin_node: NodeId) -> NodeId {
    let path = p.expect(AstKind::StringLiteral, "a graft path");
    let path_node = p.push_node(NodeKind::StringLiteral, path, path, &[]);
    p.push_node(NodeKind::Graft, first, path, &[origin_node, path_node])
}

/// `use a.b` or, where a `.` is immediately followed by `{`, the
/// selective-import form `use a.b.{x, y}`.
fn parse_use_path(p: &mut Parser, first: TokenId, head_node: NodeId) -> NodeId {
    let mut segments = vec![head_node];
    let mut last = p.builder_last_token(head_node);
    while p.at(AstKind::Dot) {
        if p.peek_at(1) == AstKind::BraceOpen {
            p.bump(); // `.`
            p.bump(); // `{`
            let mut children = segments;
            while !p.at(AstKind::BraceClose) && !p.at_eof() && p.tick() {
                let item = p.expect(AstKind::Identifier, "an imported name");
                children.push(p.push_node(NodeKind::Identifier, item, item, &[]));
                if p.eat(AstKind::Comma).is_none() {
                    break;
                }
            }
            let last = p.expect(AstKind::BraceClose, "`}`");
            return p.push_node(NodeKind::UseSelective, first, last, &children);
        }
        p.bump(); // `.`
        let seg = p.expect(AstKind::Identifier, "a path segment");
        last = seg;
        segments.push(p.push_node(NodeKind::Identifier, seg, seg, &[]));
    }
    p.push_node(NodeKind::UseStmt, first, last, &segments)
}

/// Rule 2: walrus-vs-type-annotation inside `using`. After `using name`,
/// a `:` immediately followed by a contiguous `=` (i.e. the source wrote
/// `:=`) is a resource binding; a `:` that is *not* followed by a
/// contiguous `=` is a type annotation on a shared declaration.
fn parse_using(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `using`
    let name = p.expect(AstKind::Identifier, "a name");
    let name_node = p.push_node(NodeKind::Identifier, name, name, &[]);

    let is_walrus_bind = p.at(AstKind::Colon) && p.peek_at(1) == AstKind::Eq && p.colon_eq_are_contiguous();

    if is_walrus_bind {
        p.bump(); // `:`
        p.bump(); // `=`
        let value = parse_expr(p);
        let body = parse_block(p);
        let last = p.builder_last_token(body);
        p.push_node(NodeKind::UsingResourceStmt, first, last, &[name_node, value, body])
    } else {
        p.expect(AstKind::Colon, "`:`");
        let ty = parse_type(p);
        let body = parse_block(p);
        let last = p.builder_last_token(body);
        p.push_node(NodeKind::UsingSharedStmt, first, last, &[name_node, ty, body])
    }
}

fn parse_graft(p: &mut Parser) -> NodeId {
    let first = p.bump(); // `graft`
    let last = p.expect(AstKind::StringLiteral, "a graft path");
    p.push_node(NodeKind::Graft, first, last, &[])
}

pub fn parse_type(p: &mut Parser) -> NodeId {
    let first = p.current_token();
    match p.peek() {
        AstKind::BracketOpen => {
            p.bump();
            if p.eat(AstKind::BracketClose).is_some() {
                let inner = parse_type(p);
                let last = p.builder_last_token(inner);
                return p.push_node(NodeKind::SliceType, first, last, &[inner]);
            }
            let _size = p.expect(AstKind::IntegerLiteral, "an array length");
            p.expect(AstKind::BracketClose, "`]`");
            let inner = parse_type(p);
            let last = p.builder_last_token(inner);
            p.push_node(NodeKind::ArrayType, first, last, &[inner])
        }
        AstKind::Star => {
            p.bump();
            let inner = parse_type(p);
            let last = p.builder_last_token(inner);
            p.push_node(NodeKind::PointerType, first, last, &[inner])
        }
        AstKind::Question => {
            p.bump();
            let inner = parse_type(p);
            let last = p.builder_last_token(inner);
            p.push_node(NodeKind::OptionalType, first, last, &[inner])
        }
        AstKind::Bang => {
            p.bump();
            let inner = parse_type(p);
            let last = p.builder_last_token(inner);
            p.push_node(NodeKind::ErrorUnionType, first, last, &[inner])
        }
        AstKind::Identifier => {
            let tok = p.bump();
            p.push_node(NodeKind::Identifier, tok, tok, &[])
        }
        _ => {
            let tok = p.bump();
            p.push_node(NodeKind::PrimitiveType, tok, tok, &[])
        }
    }
}
