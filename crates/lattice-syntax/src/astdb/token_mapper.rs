//! Token Mapper (§4.3): total mapping from the external tokenizer's
//! `SourceKind` to the ASTDB's own `AstKind`, splitting `:=` into `:` + `=`
//! and interning literal lexemes.

use lattice_core::Interner;

use super::token::{AstKind, AstToken};
use crate::tokenizer::{SourceKind, SourceToken};

/// Output of mapping one external token: usually one `AstToken`, except for
/// `:=` which always produces exactly two (Testable Property 3).
enum Mapped {
    One(AstToken),
    Split(AstToken, AstToken),
}

fn map_kind(kind: SourceKind) -> AstKind {
    use AstKind as T;
    use SourceKind as S;
    match kind {
        S::KwFunc => T::KwFunc,
        S::KwLet => T::KwLet,
        S::KwVar => T::KwVar,
        S::KwConst => T::KwConst,
        S::KwIf => T::KwIf,
        S::KwElse => T::KwElse,
        S::KwFor => T::KwFor,
        S::KwWhile => T::KwWhile,
        S::KwDo => T::KwDo,
        S::KwEnd => T::KwEnd,
        S::KwReturn => T::KwReturn,
        S::KwFail => T::KwFail,
        S::KwDefer => T::KwDefer,
        S::KwBreak => T::KwBreak,
        S::KwContinue => T::KwContinue,
        S::KwMatch => T::KwMatch,
        S::KwWhen => T::KwWhen,
        S::KwUnless => T::KwUnless,
        S::KwUse => T::KwUse,
        S::KwUsing => T::KwUsing,
        S::KwImport => T::KwImport,
        S::KwGraft => T::KwGraft,
        S::KwZig => T::KwZig,
        S::KwPub => T::KwPub,
        S::KwStruct => T::KwStruct,
        S::KwEnum => T::KwEnum,
        S::KwUnion => T::KwUnion,
        S::KwError => T::KwError,
        S::KwExtern => T::KwExtern,
        S::KwAsync => T::KwAsync,
        S::KwAwait => T::KwAwait,
        S::KwNursery => T::KwNursery,
        S::KwSpawn => T::KwSpawn,
        S::KwShared => T::KwShared,
        S::KwSelect => T::KwSelect,
        S::KwTimeout => T::KwTimeout,
        S::KwCase => T::KwCase,
        S::KwDefault => T::KwDefault,
        S::KwTest => T::KwTest,
        S::KwRequires => T::KwRequires,
        S::KwEnsures => T::KwEnsures,
        S::KwInvariant => T::KwInvariant,
        S::KwGhost => T::KwGhost,
        S::KwIn => T::KwIn,
        S::KwType => T::KwType,
        S::KwTrue => T::KwTrue,
        S::KwFalse => T::KwFalse,
        S::KwNull => T::KwNull,
        S::KwAnd => T::KwAnd,
        S::KwOr => T::KwOr,
        S::KwNot => T::KwNot,
        S::KwForeign => T::KwForeign,
        S::KwAs => T::KwAs,
        S::Identifier => T::Identifier,
        S::IntegerLiteral => T::IntegerLiteral,
        S::FloatLiteral => T::FloatLiteral,
        S::StringLiteral => T::StringLiteral,
        S::CharLiteral => T::CharLiteral,
        S::Pipeline => T::Pipeline,
        S::NullCoalesce => T::NullCoalesce,
        S::OptChain => T::OptChain,
        S::RangeInclusiveOp => T::RangeInclusiveOp,
        S::RangeExclusiveOp => T::RangeExclusiveOp,
        S::Arrow => T::Arrow,
        S::FatArrow => T::FatArrow,
        S::EqEq => T::EqEq,
        S::NotEq => T::NotEq,
        S::Lt => T::Lt,
        S::LtEq => T::LtEq,
        S::Gt => T::Gt,
        S::GtEq => T::GtEq,
        S::Shl => T::Shl,
        S::Shr => T::Shr,
        S::ShlEq => T::ShlEq,
        S::ShrEq => T::ShrEq,
        S::Pow => T::Pow,
        S::PlusEq => T::PlusEq,
        S::MinusEq => T::MinusEq,
        S::StarEq => T::StarEq,
        S::SlashEq => T::SlashEq,
        S::PercentEq => T::PercentEq,
        S::AmpEq => T::AmpEq,
        S::PipeEq => T::PipeEq,
        S::CaretEq => T::CaretEq,
        S::Plus => T::Plus,
        S::Minus => T::Minus,
        S::Star => T::Star,
        S::Slash => T::Slash,
        S::Percent => T::Percent,
        S::Amp => T::Amp,
        S::Pipe => T::Pipe,
        S::Caret => T::Caret,
        S::Tilde => T::Tilde,
        S::Bang => T::Bang,
        S::Question => T::Question,
        S::Colon => T::Colon,
        S::Semi => T::Semi,
        S::Comma => T::Comma,
        S::Dot => T::Dot,
        S::ParenOpen => T::ParenOpen,
        S::ParenClose => T::ParenClose,
        S::BracketOpen => T::BracketOpen,
        S::BracketClose => T::BracketClose,
        S::BraceOpen => T::BraceOpen,
        S::BraceClose => T::BraceClose,
        S::Underscore => T::Underscore,
        S::Newline => T::Newline,
        S::Comment => T::Comment,
        S::Eq => T::Eq,
        S::Walrus => unreachable!("Walrus is split before map_kind, never mapped directly"),
        S::Invalid => T::Invalid,
        S::Eof => T::Eof,
    }
}

fn interns_lexeme(kind: AstKind) -> bool {
    matches!(
        kind,
        AstKind::Identifier
            | AstKind::IntegerLiteral
            | AstKind::FloatLiteral
            | AstKind::StringLiteral
            | AstKind::CharLiteral
            | AstKind::KwTrue
            | AstKind::KwFalse
            | AstKind::Underscore
    )
}

fn map_one(token: &SourceToken, interner: &Interner) -> Mapped {
    if token.kind == SourceKind::Walrus {
        // Split `:=` into `:` then `=` with contiguous spans summing to the
        // original range (Testable Property 3).
        let mid_byte = token.span.start.byte + 1;
        let mid = lattice_core::Position::new(mid_byte, token.span.start.line, token.span.start.column + 1);
        let colon = AstToken {
            kind: AstKind::Colon,
            str: None,
            span: lattice_core::Span::new(token.span.start, mid),
            trivia_lo: 0,
            trivia_hi: 0,
        };
        let eq = AstToken {
            kind: AstKind::Eq,
            str: None,
            span: lattice_core::Span::new(mid, token.span.end),
            trivia_lo: 0,
            trivia_hi: 0,
        };
        debug_assert!(colon.span.is_contiguous_with(eq.span));
        return Mapped::Split(colon, eq);
    }

    let kind = map_kind(token.kind);
    let str = if interns_lexeme(kind) {
        Some(interner.intern_str(&token.lexeme))
    } else {
        None
    };
    Mapped::One(AstToken {
        kind,
        str,
        span: token.span,
        trivia_lo: 0,
        trivia_hi: 0,
    })
}

/// Map a full external token stream into ASTDB's token column, splitting
/// `:=`, interning literal lexemes, and attaching trivia ranges.
///
/// Returns `(tokens, trivia)`: `tokens` holds only non-trivia tokens with
/// `trivia_lo..trivia_hi` indexing into `trivia`.
pub fn map_tokens(source_tokens: &[SourceToken], interner: &Interner) -> (Vec<AstToken>, Vec<AstToken>) {
    let mut tokens = Vec::with_capacity(source_tokens.len());
    let mut trivia: Vec<AstToken> = Vec::new();
    let mut pending_trivia_lo: u32 = 0;

    for src in source_tokens {
        match map_one(src, interner) {
            Mapped::One(tok) if tok.kind.is_trivia() => {
                trivia.push(tok);
            }
            Mapped::One(mut tok) => {
                tok.trivia_lo = pending_trivia_lo;
                tok.trivia_hi = trivia.len() as u32;
                pending_trivia_lo = trivia.len() as u32;
                tokens.push(tok);
            }
            Mapped::Split(mut a, mut b) => {
                a.trivia_lo = pending_trivia_lo;
                a.trivia_hi = trivia.len() as u32;
                pending_trivia_lo = trivia.len() as u32;
                tokens.push(a);
                b.trivia_lo = pending_trivia_lo;
                b.trivia_hi = trivia.len() as u32;
                tokens.push(b);
            }
        }
    }

    (tokens, trivia)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::lex;

    #[test]
    fn walrus_splits_into_contiguous_colon_and_eq() {
        let interner = Interner::new();
        let src = lex("x := 1");
        let (tokens, _) = map_tokens(&src, &interner);
        let colon = tokens.iter().find(|t| t.kind == AstKind::Colon).unwrap();
        let eq = tokens.iter().find(|t| t.kind == AstKind::Eq).unwrap();
        assert!(colon.span.is_contiguous_with(eq.span));
        assert_eq!(colon.span.start.byte, eq.span.start.byte - 1);
    }

    #[test]
    fn unknown_kind_maps_to_invalid() {
        let interner = Interner::new();
        let src = lex("a`b");
        let (tokens, _) = map_tokens(&src, &interner);
        assert!(tokens.iter().any(|t| t.kind == AstKind::Invalid));
    }

    #[test]
    fn identifiers_are_interned() {
        let interner = Interner::new();
        let src = lex("hello");
        let (tokens, _) = map_tokens(&src, &interner);
        let ident = tokens.iter().find(|t| t.kind == AstKind::Identifier).unwrap();
        assert_eq!(interner.resolve_str(ident.str.unwrap()), "hello");
    }

    #[test]
    fn newlines_and_comments_become_trivia() {
        let interner = Interner::new();
        let src = lex("// hi\nx");
        let (tokens, trivia) = map_tokens(&src, &interner);
        assert_eq!(trivia.len(), 2); // comment + newline
        let x = tokens.iter().find(|t| t.kind == AstKind::Identifier).unwrap();
        assert_eq!(x.trivia_hi - x.trivia_lo, 2);
    }
}
