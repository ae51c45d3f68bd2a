//! Parser core: cursor over the ASTDB token column, fuel-limited recursion,
//! and the node-building primitives every grammar production shares.
//!
//! Unlike the teacher's `rowan::GreenNodeBuilder`, which needs a
//! checkpoint/`start_node_at` pair to retroactively wrap an already-emitted
//! run of siblings (its tree is built bottom-up from a flat event stream),
//! this parser always knows a node's children *before* the node itself is
//! finalized: a child production returns its `NodeId` once parsed, and the
//! parent just collects those ids with `push_children` + `push_node`. That
//! makes checkpoints unnecessary here — Pratt's "wrap the already-parsed
//! lhs under a new binary node" falls out of `push_children(&[lhs, rhs])`
//! directly.

use lattice_core::{ChildRange, Diagnostic, GateStack, NodeId, Span, TokenId};

use crate::astdb::{AstKind, AstToken, NodeKind, NodeRecord, Unit, UnitBuilder};

/// Parses fail past this many recursive-descent steps without consuming a
/// token, rather than looping forever on a construct no production
/// recognizes.
const FUEL: u32 = 256;

pub struct Parser {
    tokens: Vec<AstToken>,
    pos: usize,
    builder: UnitBuilder,
    fuel: u32,
    pub gates: GateStack,
}

impl Parser {
    pub fn new(builder: UnitBuilder) -> Self {
        let tokens = builder.tokens().to_vec();
        Self {
            tokens,
            pos: 0,
            builder,
            fuel: FUEL,
            gates: GateStack::new(),
        }
    }

    pub fn peek(&self) -> AstKind {
        self.peek_at(0)
    }

    pub fn peek_at(&self, offset: usize) -> AstKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(AstKind::Eof)
    }

    pub fn current_token(&self) -> TokenId {
        TokenId::new(self.pos.min(self.tokens.len().saturating_sub(1)) as u32)
    }

    pub fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or_else(|| self.tokens.last().map(|t| t.span).unwrap())
    }

    pub fn at(&self, kind: AstKind) -> bool {
        self.peek() == kind
    }

    pub fn at_eof(&self) -> bool {
        self.at(AstKind::Eof)
    }

    /// Consumes the current token and returns its index, resetting the
    /// recursion-fuel counter since real progress was made.
    pub fn bump(&mut self) -> TokenId {
        let id = self.current_token();
        if self.pos < self.tokens.len() - 1 || self.peek() != AstKind::Eof {
            self.pos += 1;
        }
        self.fuel = FUEL;
        id
    }

    pub fn eat(&mut self, kind: AstKind) -> Option<TokenId> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    pub fn expect(&mut self, kind: AstKind, what: &str) -> TokenId {
        if let Some(id) = self.eat(kind) {
            return id;
        }
        self.error_here(format!("expected {what}"));
        self.current_token()
    }

    /// Decrements the no-progress fuel counter; returns `false` once
    /// exhausted so a caller's `while` loop can bail instead of spinning.
    pub fn tick(&mut self) -> bool {
        if self.fuel == 0 {
            return false;
        }
        self.fuel -= 1;
        true
    }

    pub fn error_here(&mut self, message: impl Into<String>) {
        let span = self.current_span();
        self.builder
            .diagnostics_mut()
            .error(lattice_core::Code::new(lattice_core::Producer::Parser, 1), message, span)
            .emit();
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.builder.diagnostics_mut().push(diagnostic);
    }

    /// Consumes tokens up to (not including) the next token that looks
    /// like the start of a top-level declaration, or EOF — the error
    /// recovery point (§4.4.4). Returns an `ErrorNode` covering the
    /// skipped span.
    pub fn recover_to_next_decl(&mut self, message: impl Into<String>) -> NodeId {
        let start = self.current_token();
        self.error_here(message);
        while !self.at_eof() && !starts_top_level_decl(self.peek()) && self.tick() {
            self.bump();
        }
        let end = TokenId::new(self.pos.saturating_sub(1).max(start.index()) as u32);
        self.push_node(NodeKind::ErrorNode, start, end, &[])
    }

    pub fn push_children(&mut self, children: &[NodeId]) -> ChildRange {
        self.builder.push_children(children)
    }

    pub fn push_node(&mut self, kind: NodeKind, first: TokenId, last: TokenId, children: &[NodeId]) -> NodeId {
        let range = self.push_children(children);
        self.builder.push_node(NodeRecord::new(kind, first, last, range))
    }

    pub fn finish(self, root: NodeId) -> Unit {
        self.builder.finish(root)
    }

    pub fn builder_first_token(&self, node: NodeId) -> TokenId {
        self.builder.node_record(node).first_token
    }

    pub fn builder_last_token(&self, node: NodeId) -> TokenId {
        self.builder.node_record(node).last_token
    }

    pub fn builder_node_kind(&self, node: NodeId) -> NodeKind {
        self.builder.node_record(node).kind
    }

    pub fn builder_children(&self, node: NodeId) -> &[NodeId] {
        let range = self.builder.node_record(node).children;
        self.builder.children_of(range)
    }

    pub fn node_count(&self) -> u32 {
        self.builder.node_count() as u32
    }

    /// See [`UnitBuilder::swap_node_regions`]: reorders two adjacent
    /// subtrees so the second (`[split, b_end)`) precedes the first
    /// (`[a_start, split)`) in node order, fixing up every edge that
    /// references into either region.
    pub fn swap_node_regions(&mut self, a_start: u32, split: u32, b_end: u32) {
        self.builder.swap_node_regions(a_start, split, b_end);
    }

    /// Maps a `NodeId` captured before a `swap_node_regions` call to its
    /// post-swap position.
    pub fn remap_after_swap(&self, a_start: u32, split: u32, b_end: u32, id: NodeId) -> NodeId {
        UnitBuilder::remap_after_swap(a_start, split, b_end, id)
    }

    /// True when the current token and the next one have spans that touch
    /// with no gap, i.e. the source actually wrote them adjacently (as
    /// `:=` always does once split by the Token Mapper).
    pub fn colon_eq_are_contiguous(&self) -> bool {
        match (self.tokens.get(self.pos), self.tokens.get(self.pos + 1)) {
            (Some(a), Some(b)) => a.span.is_contiguous_with(b.span),
            _ => false,
        }
    }
}

pub fn starts_top_level_decl(kind: AstKind) -> bool {
    matches!(
        kind,
        AstKind::KwFunc
            | AstKind::KwAsync
            | AstKind::KwExtern
            | AstKind::KwStruct
            | AstKind::KwEnum
            | AstKind::KwUnion
            | AstKind::KwError
            | AstKind::KwTest
            | AstKind::KwConst
            | AstKind::KwLet
            | AstKind::KwVar
            | AstKind::KwImport
            | AstKind::KwUse
            | AstKind::KwUsing
            | AstKind::KwGraft
            | AstKind::KwForeign
            | AstKind::KwPub
    )
}
