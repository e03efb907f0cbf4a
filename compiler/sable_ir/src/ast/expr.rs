//! Expression nodes.
//!
//! Expressions reference each other through `ExprId` indices into the
//! owning `NodeArena`.

use super::operators::{BinaryOp, UnaryOp};
use crate::Name;

/// Index of an expression in its `NodeArena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(
            u32::try_from(index).is_ok(),
            "expression arena exhausted the u32 id space"
        );
        ExprId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// The arena index this id refers to.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Expression node.
///
/// String literals are interned; `Var` resolves against the lexical
/// environment first and the template data record second. `Ij` resolves
/// against the injected data record, which only exists at runtime.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// `null` literal.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal (interned).
    Str(Name),
    /// Data or local reference: `$name`.
    Var(Name),
    /// Injected data reference: `$ij.name`.
    Ij(Name),
    /// Field access on a record value: `base.field`.
    Field { base: ExprId, field: Name },
    /// Index access on a list or record value: `base[index]`.
    Index { base: ExprId, index: ExprId },
    /// Unary operation.
    Unary { op: UnaryOp, operand: ExprId },
    /// Binary operation.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// Ternary conditional: `cond ? then_expr : else_expr`.
    Conditional {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    /// List literal.
    List(Vec<ExprId>),
}
