//! Binary and unary operator implementations.
//!
//! Direct enum-based dispatch: the value type set is fixed, so pattern
//! matching is preferred over trait objects for exhaustiveness
//! checking. `and` / `or` short-circuit and never reach this module;
//! they are handled lazily in expression evaluation.

use sable_data::Value;
use sable_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op,
    invalid_unary_op, modulo_by_zero, EvalResult,
};

/// Checked integer arithmetic with overflow handling.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate a binary operation using direct pattern matching.
///
/// Mixed int/float operands promote to float. Equality with `null` is
/// defined (`null == null` is true, `null == x` is false); every other
/// cross-type combination is an error.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    debug_assert!(!op.is_lazy(), "lazy operators are evaluated in eval_expr");
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(_) | Value::Int(_), Value::Float(_) | Value::Int(_)) => {
            // At least one side is a float here; pure int pairs matched above.
            match (left.as_float(), right.as_float()) {
                (Some(a), Some(b)) => eval_float_binary(a, b, op),
                _ => Err(binary_type_mismatch(left.type_name(), right.type_name(), op)),
            }
        }
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinaryOp::Eq => Ok(Value::Bool(a == b)),
            BinaryOp::NotEq => Ok(Value::Bool(a != b)),
            _ => Err(invalid_binary_op("bool", op)),
        },
        (Value::Null, Value::Null) => match op {
            BinaryOp::Eq => Ok(Value::Bool(true)),
            BinaryOp::NotEq => Ok(Value::Bool(false)),
            _ => Err(invalid_binary_op("null", op)),
        },
        (Value::Null, _) | (_, Value::Null) => match op {
            BinaryOp::Eq => Ok(Value::Bool(false)),
            BinaryOp::NotEq => Ok(Value::Bool(true)),
            _ => Err(binary_type_mismatch(left.type_name(), right.type_name(), op)),
        },
        (Value::List(a), Value::List(b)) => match op {
            BinaryOp::Eq => Ok(Value::Bool(a == b)),
            BinaryOp::NotEq => Ok(Value::Bool(a != b)),
            _ => Err(invalid_binary_op("list", op)),
        },
        (Value::Record(a), Value::Record(b)) => match op {
            BinaryOp::Eq => Ok(Value::Bool(a == b)),
            BinaryOp::NotEq => Ok(Value::Bool(a != b)),
            _ => Err(invalid_binary_op("record", op)),
        },
        _ => Err(binary_type_mismatch(left.type_name(), right.type_name(), op)),
    }
}

/// Binary operations on integers. All arithmetic is checked.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(a.checked_rem(b), "remainder")
            }
        }
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::And | BinaryOp::Or => Err(invalid_binary_op("int", op)),
    }
}

/// Binary operations on floats (or int/float mixes, promoted).
///
/// Float division by zero follows IEEE 754 (infinity / NaN), matching
/// the runtime renderer's numeric model.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::And | BinaryOp::Or => Err(invalid_binary_op("float", op)),
    }
}

/// Binary operations on strings.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::str(format!("{a}{b}"))),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op("string", op)),
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(operand: Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Int(i) => checked_arith(i.checked_neg(), "negation"),
            Value::Float(f) => Ok(Value::Float(-f)),
            other => Err(invalid_unary_op(other.type_name(), op)),
        },
    }
}
