//! Template command nodes.
//!
//! `NodeKind` is the closed set of template constructs the evaluator
//! understands. Children are ordered `NodeId` lists into the owning
//! `NodeArena`; kind-specific attributes are read-only after
//! construction.

use super::expr::ExprId;
use crate::Name;

/// Index of a node in its `NodeArena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(
            u32::try_from(index).is_ok(),
            "node arena exhausted the u32 id space"
        );
        NodeId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// The arena index this id refers to.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One branch of an `If` node: condition plus block.
#[derive(Clone, PartialEq, Debug)]
pub struct IfBranch {
    pub cond: ExprId,
    pub children: Vec<NodeId>,
}

/// A named argument passed to a `Call` or `CallDelegate` node.
#[derive(Clone, PartialEq, Debug)]
pub struct CallParam {
    pub name: Name,
    pub value: ExprId,
}

/// Template command node.
#[derive(Clone, PartialEq, Debug)]
pub enum NodeKind {
    /// Literal template text.
    RawText(String),
    /// Print command: evaluate `expr`, pipe through the attached
    /// directives (children must be `PrintDirective` nodes), append
    /// the coerced text.
    Print {
        expr: ExprId,
        directives: Vec<NodeId>,
    },
    /// A print directive application. Valid only as a child of `Print`.
    PrintDirective { name: Name, args: Vec<ExprId> },
    /// Conditional: first branch whose condition is truthy renders;
    /// otherwise the `otherwise` block renders.
    If {
        branches: Vec<IfBranch>,
        otherwise: Vec<NodeId>,
    },
    /// Loop over a list value, binding `var` per iteration. The
    /// `if_empty` block renders when the list is empty.
    Foreach {
        var: Name,
        collection: ExprId,
        body: Vec<NodeId>,
        if_empty: Vec<NodeId>,
    },
    /// Local binding visible to the remainder of the enclosing block.
    Let { var: Name, value: ExprId },
    /// Ordinary call to another template, resolved statically through
    /// the template registry.
    Call {
        callee: Name,
        params: Vec<CallParam>,
        /// Pass the caller's full data record to the callee in addition
        /// to the explicit params.
        pass_data: bool,
    },
    /// Delegate call, resolved at runtime by priority among the
    /// implementations registered for the slot.
    CallDelegate { name: Name, params: Vec<CallParam> },
    /// Translatable message with its source content as children. The id
    /// keys the runtime message catalog.
    MsgFallbackGroup { id: u64, children: Vec<NodeId> },
    /// Codegen-only message definition (binds the rendered message to
    /// `var` for later reference).
    MsgDef { var: Name, children: Vec<NodeId> },
    /// Codegen-only reference to a previously defined message.
    MsgRef { var: Name },
    /// CSS class reference, rewritten by the runtime renaming map.
    CssRef { selector: Name },
    /// Side-channel log statement; renders its children to the log
    /// output, never to the template output.
    Log { children: Vec<NodeId> },
    /// Debugger breakpoint marker.
    Debugger,
}

impl NodeKind {
    /// Short human-readable name of this construct, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::RawText(_) => "raw text",
            NodeKind::Print { .. } => "print",
            NodeKind::PrintDirective { .. } => "print directive",
            NodeKind::If { .. } => "if",
            NodeKind::Foreach { .. } => "foreach",
            NodeKind::Let { .. } => "let",
            NodeKind::Call { .. } => "call",
            NodeKind::CallDelegate { .. } => "delegate call",
            NodeKind::MsgFallbackGroup { .. } => "message fallback group",
            NodeKind::MsgDef { .. } => "message definition",
            NodeKind::MsgRef { .. } => "message reference",
            NodeKind::CssRef { .. } => "CSS reference",
            NodeKind::Log { .. } => "log",
            NodeKind::Debugger => "debugger",
        }
    }
}
