//! ASTDB node taxonomy and the columnar node record (§3.3, §3.1).

use lattice_core::{ChildRange, TokenId};

/// Every syntax construct the parser can build a node for. Grouped by family
/// the way §3.3 groups them; the grouping has no runtime meaning, it just
/// keeps this enum navigable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceFile,

    // Declarations
    FuncDecl,
    AsyncFuncDecl,
    ExternFunc,
    StructDecl,
    EnumDecl,
    UnionDecl,
    ErrorDecl,
    TestDecl,
    ConstStmt,
    LetStmt,
    VarStmt,
    ImportStmt,
    UseStmt,
    UseSelective,
    UseZig,
    UsingDecl,
    UsingResourceStmt,
    UsingSharedStmt,
    Graft,
    ForeignBlock,

    // Statements
    ReturnStmt,
    FailStmt,
    DeferStmt,
    BreakStmt,
    ContinueStmt,
    IfStmt,
    WhileStmt,
    ForStmt,
    MatchStmt,
    MatchArm,
    BlockStmt,
    ExprStmt,
    NurseryStmt,
    SelectStmt,
    SelectCase,
    SelectTimeout,
    SelectDefault,
    PostfixWhen,
    PostfixUnless,
    RequiresClause,
    EnsuresClause,
    InvariantClause,

    // Expressions
    BinaryExpr,
    UnaryExpr,
    CallExpr,
    FieldExpr,
    IndexExpr,
    SliceInclusiveExpr,
    SliceExclusiveExpr,
    RangeInclusiveExpr,
    RangeExclusiveExpr,
    TryExpr,
    CatchExpr,
    AwaitExpr,
    SpawnExpr,
    StructLiteral,
    ArrayLit,

    // Literals
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,
    NullLiteral,
    Identifier,

    // Types
    PrimitiveType,
    ArrayType,
    SliceType,
    PointerType,
    OptionalType,
    ErrorUnionType,

    /// Emitted by error recovery (§4.4.4) for a span that could not be
    /// parsed as any known construct.
    ErrorNode,
}

/// One entry in the columnar node table (§3.1): `{kind, first_token,
/// last_token, child_lo, child_hi}`. Children are looked up by slicing the
/// Unit's flat edge array with `children`, never by following pointers.
#[derive(Debug, Clone, Copy)]
pub struct NodeRecord {
    pub kind: NodeKind,
    pub first_token: TokenId,
    pub last_token: TokenId,
    pub children: ChildRange,
}

impl NodeRecord {
    pub fn new(kind: NodeKind, first_token: TokenId, last_token: TokenId, children: ChildRange) -> Self {
        Self {
            kind,
            first_token,
            last_token,
            children,
        }
    }
}
