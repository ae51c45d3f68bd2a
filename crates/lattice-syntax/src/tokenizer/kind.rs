//! The external tokenizer's token kinds (§6 input contract).
//!
//! This enum is the *input* taxonomy the Token Mapper consumes; it is not
//! the ASTDB's own `TokenKind` (see `crate::astdb::TokenKind`). Keeping them
//! as separate types — rather than reusing one enum for both sides of the
//! mapping — is what makes the Token Mapper's "total mapping table" (§4.3) a
//! real function instead of an identity cast.

use logos::Logos;

/// Raw kinds produced by the (out-of-scope, external) byte tokenizer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\f]+")]
pub enum SourceKind {
    // Keywords
    #[token("func")]
    KwFunc,
    #[token("let")]
    KwLet,
    #[token("var")]
    KwVar,
    #[token("const")]
    KwConst,
    #[token("if")]
    KwIf,
    #[token("else")]
    KwElse,
    #[token("for")]
    KwFor,
    #[token("while")]
    KwWhile,
    #[token("do")]
    KwDo,
    #[token("end")]
    KwEnd,
    #[token("return")]
    KwReturn,
    #[token("fail")]
    KwFail,
    #[token("defer")]
    KwDefer,
    #[token("break")]
    KwBreak,
    #[token("continue")]
    KwContinue,
    #[token("match")]
    KwMatch,
    #[token("when")]
    KwWhen,
    #[token("unless")]
    KwUnless,
    #[token("use")]
    KwUse,
    #[token("using")]
    KwUsing,
    #[token("import")]
    KwImport,
    #[token("graft")]
    KwGraft,
    #[token("zig")]
    KwZig,
    #[token("pub")]
    KwPub,
    #[token("struct")]
    KwStruct,
    #[token("enum")]
    KwEnum,
    #[token("union")]
    KwUnion,
    #[token("error")]
    KwError,
    #[token("extern")]
    KwExtern,
    #[token("async")]
    KwAsync,
    #[token("await")]
    KwAwait,
    #[token("nursery")]
    KwNursery,
    #[token("spawn")]
    KwSpawn,
    #[token("shared")]
    KwShared,
    #[token("select")]
    KwSelect,
    #[token("timeout")]
    KwTimeout,
    #[token("case")]
    KwCase,
    #[token("default")]
    KwDefault,
    #[token("test")]
    KwTest,
    #[token("requires")]
    KwRequires,
    #[token("ensures")]
    KwEnsures,
    #[token("invariant")]
    KwInvariant,
    #[token("ghost")]
    KwGhost,
    #[token("in")]
    KwIn,
    #[token("type")]
    KwType,
    #[token("true")]
    KwTrue,
    #[token("false")]
    KwFalse,
    #[token("null")]
    KwNull,
    #[token("and")]
    KwAnd,
    #[token("or")]
    KwOr,
    #[token("not")]
    KwNot,
    #[token("foreign")]
    KwForeign,
    #[token("as")]
    KwAs,

    // Literals
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r"[0-9][0-9_]*")]
    IntegerLiteral,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*")]
    FloatLiteral,
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[regex(r"'([^'\\]|\\.)'")]
    CharLiteral,

    // Operators
    #[token(":=")]
    Walrus,
    #[token("|>")]
    Pipeline,
    #[token("??")]
    NullCoalesce,
    #[token("?.")]
    OptChain,
    #[token("..<")]
    RangeExclusiveOp,
    #[token("..")]
    RangeInclusiveOp,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("**")]
    Pow,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("?")]
    Question,

    // Punctuation
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("_")]
    Underscore,

    #[regex(r"\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    Comment,

    Eof,
    Invalid,
}

impl SourceKind {
    /// A stable numeric tag for profile-gate membership tests
    /// (`lattice_core::profile::Gate` keys gates by this tag rather than by
    /// the enum directly, so gates stay independent of this crate).
    pub fn gate_tag(self) -> u32 {
        self as u32
    }

    pub fn is_keyword(self) -> bool {
        (SourceKind::KwFunc as u32) <= (self as u32) && (self as u32) <= (SourceKind::KwAs as u32)
    }
}
