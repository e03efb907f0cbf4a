//! Expression evaluation.
//!
//! Expressions are evaluated against a read-only context: the arena
//! they were allocated in, the interner that owns their names, the
//! template's data record, optional injected data, and the local
//! environment. Evaluation has no side effects, so the same context can
//! back any number of evaluations.

use sable_data::{Record, Value};
use sable_ir::{ExprId, ExprKind, NodeArena, StringInterner};

use crate::environment::Environment;
use crate::errors::{
    ij_unavailable, index_out_of_bounds, key_not_found, type_mismatch, undefined_field,
    undefined_variable, EvalResult,
};
use crate::operators::{evaluate_binary, evaluate_unary};

/// Everything expression evaluation can read.
pub struct ExprContext<'a> {
    /// Arena holding the expression nodes.
    pub arena: &'a NodeArena,
    /// Interner resolving `Name` ids to text.
    pub interner: &'a StringInterner,
    /// The template's data record.
    pub data: &'a Record,
    /// Injected data, when the mode admits it.
    pub ij: Option<&'a Record>,
    /// Local bindings (`let` variables, loop variables, params).
    pub env: &'a Environment,
}

/// Evaluate one expression to a value.
pub fn eval_expr(ctx: &ExprContext<'_>, id: ExprId) -> EvalResult {
    match ctx.arena.expr(id) {
        ExprKind::Null => Ok(Value::Null),
        ExprKind::Bool(b) => Ok(Value::Bool(*b)),
        ExprKind::Int(i) => Ok(Value::Int(*i)),
        ExprKind::Float(f) => Ok(Value::Float(*f)),
        ExprKind::Str(name) => Ok(Value::str(ctx.interner.lookup(*name))),
        ExprKind::Var(name) => {
            // Locals shadow data record fields.
            if let Some(value) = ctx.env.lookup(*name) {
                return Ok(value);
            }
            let text = ctx.interner.lookup(*name);
            ctx.data
                .get(text)
                .cloned()
                .ok_or_else(|| undefined_variable(text))
        }
        ExprKind::Ij(name) => {
            let text = ctx.interner.lookup(*name);
            let Some(ij) = ctx.ij else {
                return Err(ij_unavailable(text));
            };
            ij.get(text)
                .cloned()
                .ok_or_else(|| undefined_variable(format!("ij.{text}")))
        }
        ExprKind::Field { base, field } => {
            let base = eval_expr(ctx, *base)?;
            let text = ctx.interner.lookup(*field);
            match base {
                Value::Record(record) => {
                    record.get(text).cloned().ok_or_else(|| undefined_field(text))
                }
                other => Err(type_mismatch("record", other.type_name())),
            }
        }
        ExprKind::Index { base, index } => {
            let base = eval_expr(ctx, *base)?;
            let index = eval_expr(ctx, *index)?;
            eval_index(base, index)
        }
        ExprKind::Unary { op, operand } => {
            let operand = eval_expr(ctx, *operand)?;
            evaluate_unary(operand, *op)
        }
        ExprKind::Binary { op, left, right } if op.is_lazy() => {
            let left = eval_expr(ctx, *left)?;
            match op {
                sable_ir::BinaryOp::And => {
                    if !left.is_truthy() {
                        return Ok(Value::Bool(false));
                    }
                }
                _ => {
                    if left.is_truthy() {
                        return Ok(Value::Bool(true));
                    }
                }
            }
            let right = eval_expr(ctx, *right)?;
            Ok(Value::Bool(right.is_truthy()))
        }
        ExprKind::Binary { op, left, right } => {
            let left = eval_expr(ctx, *left)?;
            let right = eval_expr(ctx, *right)?;
            evaluate_binary(left, right, *op)
        }
        ExprKind::Conditional {
            cond,
            then_expr,
            else_expr,
        } => {
            let cond = eval_expr(ctx, *cond)?;
            if cond.is_truthy() {
                eval_expr(ctx, *then_expr)
            } else {
                eval_expr(ctx, *else_expr)
            }
        }
        ExprKind::List(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(eval_expr(ctx, *item)?);
            }
            Ok(Value::list(values))
        }
    }
}

/// Index a list by int or a record by string key.
fn eval_index(base: Value, index: Value) -> EvalResult {
    match (base, index) {
        (Value::List(items), Value::Int(i)) => {
            let idx = usize::try_from(i).ok();
            idx.and_then(|idx| items.get(idx).cloned())
                .ok_or_else(|| index_out_of_bounds(i))
        }
        (Value::Record(record), Value::Str(key)) => record
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| key_not_found(key.as_str())),
        (Value::List(_), other) => Err(type_mismatch("int", other.type_name())),
        (Value::Record(_), other) => Err(type_mismatch("string", other.type_name())),
        (other, _) => Err(type_mismatch("list or record", other.type_name())),
    }
}
