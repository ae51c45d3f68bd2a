//! ASTDB's own token representation (§3.2), target of the Token Mapper.

use lattice_core::{Span, StrId};

/// ASTDB token kind — distinct from the external tokenizer's `SourceKind`.
/// The Token Mapper is the total function from one to the other (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstKind {
    // Keywords
    KwFunc,
    KwLet,
    KwVar,
    KwConst,
    KwIf,
    KwElse,
    KwFor,
    KwWhile,
    KwDo,
    KwEnd,
    KwReturn,
    KwFail,
    KwDefer,
    KwBreak,
    KwContinue,
    KwMatch,
    KwWhen,
    KwUnless,
    KwUse,
    KwUsing,
    KwImport,
    KwGraft,
    KwZig,
    KwPub,
    KwStruct,
    KwEnum,
    KwUnion,
    KwError,
    KwExtern,
    KwAsync,
    KwAwait,
    KwNursery,
    KwSpawn,
    KwShared,
    KwSelect,
    KwTimeout,
    KwCase,
    KwDefault,
    KwTest,
    KwRequires,
    KwEnsures,
    KwInvariant,
    KwGhost,
    KwIn,
    KwType,
    KwTrue,
    KwFalse,
    KwNull,
    KwAnd,
    KwOr,
    KwNot,
    KwForeign,
    KwAs,

    // Literals
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,

    // Operators — note there is no `Walrus`: it is always split (§3.2).
    Colon,
    Eq,
    Pipeline,
    NullCoalesce,
    OptChain,
    RangeInclusiveOp,
    RangeExclusiveOp,
    Arrow,
    FatArrow,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    ShlEq,
    ShrEq,
    Pow,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    Question,

    // Punctuation
    Semi,
    Comma,
    Dot,
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    Underscore,

    Newline,
    Comment,
    Eof,
    Invalid,
}

impl AstKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, AstKind::Newline | AstKind::Comment)
    }

    /// Stable tag for profile-gate membership tests (§4.4.5), mirroring
    /// `SourceKind::gate_tag`.
    pub fn gate_tag(self) -> u32 {
        self as u32
    }
}

/// `{ kind, str: Option<StrId>, span, trivia_lo, trivia_hi }` (§3.2).
///
/// `trivia_lo..trivia_hi` indexes into the Unit's trivia-token buffer
/// (comments/newlines flushed immediately before this token).
#[derive(Debug, Clone, Copy)]
pub struct AstToken {
    pub kind: AstKind,
    pub str: Option<StrId>,
    pub span: Span,
    pub trivia_lo: u32,
    pub trivia_hi: u32,
}
