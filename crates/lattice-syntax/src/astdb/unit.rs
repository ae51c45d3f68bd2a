//! A Unit: one source file's tokens, nodes and diagnostics (§3.1, §4.2).
//!
//! Units are built up in a [`UnitBuilder`] and only become visible to the
//! rest of the ASTDB via [`UnitBuilder::finish`], which moves the finished
//! columns into an immutable [`Unit`] in one step. There is no way to hand
//! out a reference to a `Unit` that is still being mutated, so a reader
//! never observes a parse half-way through (atomic commit, §4.2).

use lattice_core::{ChildRange, Diagnostics, EdgeIndex, NodeId, StrId, TokenId};

use super::node::NodeRecord;
use super::token::AstToken;

/// An immutable, fully-parsed source file.
#[derive(Debug)]
pub struct Unit {
    pub filename: StrId,
    pub source: String,
    pub tokens: Vec<AstToken>,
    pub trivia: Vec<AstToken>,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<NodeId>,
    pub root: NodeId,
    pub diagnostics: Diagnostics,
}

impl Unit {
    pub fn token(&self, id: TokenId) -> &AstToken {
        &self.tokens[id.index()]
    }

    pub fn node(&self, id: NodeId) -> &NodeRecord {
        &self.nodes[id.index()]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        let range = self.node(id).children;
        &self.edges[range.lo.index()..range.hi.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Accumulates a Unit's columns during parsing. Node finalization appends
/// to `edges` and `nodes` in one shot per call, the same discipline the
/// teacher's `GreenNodeBuilder::finish_node` uses to keep a tree node's
/// children contiguous.
pub struct UnitBuilder {
    filename: StrId,
    source: String,
    tokens: Vec<AstToken>,
    trivia: Vec<AstToken>,
    nodes: Vec<NodeRecord>,
    edges: Vec<NodeId>,
    diagnostics: Diagnostics,
}

impl UnitBuilder {
    pub fn new(filename: StrId, source: String, tokens: Vec<AstToken>, trivia: Vec<AstToken>) -> Self {
        Self {
            filename,
            source,
            tokens,
            trivia,
            nodes: Vec::new(),
            edges: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn tokens(&self) -> &[AstToken] {
        &self.tokens
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Reserve a node slot before its children are known; `push_node`
    /// records the record once its child range is final. Mirrors the
    /// teacher's checkpoint/start-node-at pair for retroactively wrapping
    /// an already-parsed run of siblings (used by Pratt binary-expr
    /// building and the struct-literal-vs-block disambiguation).
    pub fn push_children(&mut self, children: &[NodeId]) -> ChildRange {
        let lo = EdgeIndex::new(self.edges.len() as u32);
        self.edges.extend_from_slice(children);
        let hi = EdgeIndex::new(self.edges.len() as u32);
        ChildRange::new(lo, hi)
    }

    pub fn push_node(&mut self, record: NodeRecord) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(record);
        id
    }

    /// Reads back an already-pushed node; parser productions use this to
    /// inspect a child they just built (its token span, its own children)
    /// without needing a separate shadow representation.
    pub fn node_record(&self, id: NodeId) -> &NodeRecord {
        &self.nodes[id.index()]
    }

    pub fn children_of(&self, range: ChildRange) -> &[NodeId] {
        &self.edges[range.lo.index()..range.hi.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Swaps two adjacent, contiguous node regions `[a_start, split)` and
    /// `[split, b_end)` so the second comes first, remapping every edge
    /// that references a node inside either region. Used by the postfix
    /// `when`/`unless` rule (§4.4.3) to move a condition's subtree
    /// (parsed second) ahead of the already-parsed statement's subtree in
    /// node order without re-parsing either one.
    ///
    /// Both regions must be self-contained: every edge whose value falls
    /// in `[a_start, b_end)` must point at a node also inside that range.
    /// That holds for any two subtrees parsed back-to-back with nothing
    /// else pushed in between, since the parser never aliases a child
    /// from outside the subtree currently being built.
    pub fn swap_node_regions(&mut self, a_start: u32, split: u32, b_end: u32) {
        let a_len = split - a_start;
        let b_len = b_end - split;

        let a_region: Vec<NodeRecord> = self.nodes[a_start as usize..split as usize].to_vec();
        let b_region: Vec<NodeRecord> = self.nodes[split as usize..b_end as usize].to_vec();
        self.nodes[a_start as usize..(a_start + b_len) as usize].clone_from_slice(&b_region);
        self.nodes[(a_start + b_len) as usize..b_end as usize].clone_from_slice(&a_region);

        for edge in &mut self.edges {
            let old = edge.index() as u32;
            if old < a_start || old >= b_end {
                continue;
            }
            let new = if old < split { old + b_len } else { old - a_len };
            *edge = NodeId::new(new);
        }
    }

    /// Maps a `NodeId` captured before a [`swap_node_regions`] call to
    /// where its content now lives afterward.
    pub fn remap_after_swap(a_start: u32, split: u32, b_end: u32, id: NodeId) -> NodeId {
        let old = id.index() as u32;
        if old < a_start || old >= b_end {
            return id;
        }
        if old < split {
            NodeId::new(old + (b_end - split))
        } else {
            NodeId::new(old - (split - a_start))
        }
    }

    /// Move the accumulated columns into a finished, immutable `Unit`.
    /// `root` must name a node already pushed via `push_node`.
    pub fn finish(self, root: NodeId) -> Unit {
        Unit {
            filename: self.filename,
            source: self.source,
            tokens: self.tokens,
            trivia: self.trivia,
            nodes: self.nodes,
            edges: self.edges,
            root,
            diagnostics: self.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astdb::node::NodeKind;
    use lattice_core::Interner;

    #[test]
    fn children_slice_matches_pushed_range() {
        let interner = Interner::new();
        let filename = interner.intern_str("test.lat");
        let mut builder = UnitBuilder::new(filename, String::new(), Vec::new(), Vec::new());

        let leaf_a = builder.push_node(NodeRecord::new(NodeKind::Identifier, TokenId::new(0), TokenId::new(0), ChildRange::EMPTY));
        let leaf_b = builder.push_node(NodeRecord::new(NodeKind::Identifier, TokenId::new(1), TokenId::new(1), ChildRange::EMPTY));
        let children = builder.push_children(&[leaf_a, leaf_b]);
        let root = builder.push_node(NodeRecord::new(NodeKind::SourceFile, TokenId::new(0), TokenId::new(1), children));

        let unit = builder.finish(root);
        assert_eq!(unit.children(root), &[leaf_a, leaf_b]);
        assert_eq!(unit.node_count(), 3);
    }
}
