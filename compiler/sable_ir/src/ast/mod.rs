//! Template AST.
//!
//! Nodes and expressions are stored in a `NodeArena` and referenced by
//! compact `NodeId` / `ExprId` indices instead of `Box` chains, keeping
//! the tree contiguous and trivially immutable once built.
//!
//! The arena is append-only: construction allocates children before
//! parents, and nothing is ever removed, so every id handed out stays
//! valid for the arena's lifetime. Templates carry their own shared
//! arena (see `registry`), so a call evaluates the callee's body against
//! the callee's arena.

// Arc is the implementation of SharedArena - templates share one arena
// per compiled file.
#![allow(clippy::disallowed_types)]

mod expr;
mod node;
mod operators;

use std::sync::Arc;

pub use expr::{ExprId, ExprKind};
pub use node::{CallParam, IfBranch, NodeId, NodeKind};
pub use operators::{BinaryOp, UnaryOp};

/// Arena owning the nodes and expressions of one compiled template file.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<NodeKind>,
    exprs: Vec<ExprKind>,
}

/// Thread-safe shared handle to a `NodeArena`.
///
/// Templates registered from the same file share one arena; the handle
/// is cloned into each `Template`.
pub type SharedArena = Arc<NodeArena>;

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        NodeArena::default()
    }

    /// Allocate a node, returning its id.
    pub fn alloc_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(kind);
        id
    }

    /// Allocate an expression, returning its id.
    pub fn alloc_expr(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId::from_index(self.exprs.len());
        self.exprs.push(kind);
        id
    }

    /// Get the node for an id.
    #[inline]
    pub fn node(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()]
    }

    /// Get the expression for an id.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()]
    }

    /// Number of allocated nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of allocated expressions.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Freeze the arena into a shared handle.
    pub fn shared(self) -> SharedArena {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests;
