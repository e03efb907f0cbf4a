//! Error types and factory constructors for the evaluator.
//!
//! Two families, mirroring the two levels of the evaluator:
//!
//! - `EvalError`: expression evaluation failed (bad operand types,
//!   undefined reference, overflow, ...).
//! - `RenderError`: a render attempt failed. Prerender-policy
//!   rejections and runtime dispatch failures are born as
//!   `RenderError`s; expression errors are wrapped exactly once at the
//!   rendering boundary via `From<EvalError>`, keeping the original as
//!   the cause.
//!
//! Factory functions (e.g. `division_by_zero()`) populate both the
//! structured kind and the display message.

use std::fmt;

use sable_data::Value;
use sable_ir::{BinaryOp, UnaryOp};

/// Result of expression evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Result of rendering.
pub type RenderResult<T = ()> = Result<T, RenderError>;

/// Typed category for expression evaluation errors.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    // Arithmetic
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow { operation: &'static str },

    // Type/Operator
    TypeMismatch { expected: &'static str, got: &'static str },
    InvalidBinaryOp { type_name: &'static str, op: BinaryOp },
    BinaryTypeMismatch { left: &'static str, right: &'static str, op: BinaryOp },
    InvalidUnaryOp { type_name: &'static str, op: UnaryOp },

    // Access
    UndefinedVariable { name: String },
    UndefinedField { field: String },
    KeyNotFound { key: String },
    IndexOutOfBounds { index: i64 },
    IjUnavailable { name: String },

    // Output
    CannotPrint { type_name: &'static str },

    // Directive application
    DirectiveArg { directive: &'static str, message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::InvalidBinaryOp { type_name, op } => {
                write!(f, "operator `{}` cannot be applied to {type_name}", op.as_symbol())
            }
            Self::BinaryTypeMismatch { left, right, op } => {
                write!(f, "operator `{}` cannot be applied to {left} and {right}", op.as_symbol())
            }
            Self::InvalidUnaryOp { type_name, op } => {
                write!(f, "operator `{}` cannot be applied to {type_name}", op.as_symbol())
            }
            Self::UndefinedVariable { name } => write!(f, "undefined variable: ${name}"),
            Self::UndefinedField { field } => write!(f, "no field {field} on record"),
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),
            Self::IndexOutOfBounds { index } => write!(f, "index {index} out of bounds"),
            Self::IjUnavailable { name } => {
                write!(f, "no injected data available for $ij.{name}")
            }
            Self::CannotPrint { type_name } => {
                write!(f, "cannot print value of type {type_name}")
            }
            Self::DirectiveArg { directive, message } => {
                write!(f, "print directive |{directive}: {message}")
            }
        }
    }
}

/// Expression evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message (equals `kind.to_string()`).
    pub message: String,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Expression error factories.

pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

pub fn invalid_binary_op(type_name: &'static str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp { type_name, op })
}

pub fn binary_type_mismatch(left: &'static str, right: &'static str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { left, right, op })
}

pub fn invalid_unary_op(type_name: &'static str, op: UnaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp { type_name, op })
}

pub fn undefined_variable(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable { name: name.into() })
}

pub fn undefined_field(field: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedField {
        field: field.into(),
    })
}

pub fn key_not_found(key: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound { key: key.into() })
}

pub fn index_out_of_bounds(index: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index })
}

pub fn ij_unavailable(name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IjUnavailable { name: name.into() })
}

pub fn cannot_print(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotPrint { type_name })
}

pub fn directive_arg(directive: &'static str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DirectiveArg {
        directive,
        message: message.into(),
    })
}

/// Typed category for render errors.
///
/// The `CannotPrerender*` variants are the prerender policy's fixed
/// rejections; their messages never vary, so a driver can log them
/// without leaking data values.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderErrorKind {
    // Prerender policy rejections
    CannotPrerenderMsgFallbackGroup,
    CannotPrerenderMsgDef,
    CannotPrerenderMsgRef,
    CannotPrerenderCssRef,
    CannotPrerenderDelegateCall,
    CannotPrerenderLog,
    CannotPrerenderDebugger,
    /// A print directive attached to the node is unregistered or impure.
    ImpurePrintDirective { name: String },

    // Dispatch failures
    UndefinedTemplate { name: String },
    UndefinedDirective { name: String },
    DelegateNotFound { name: String },
    UnsupportedNode { construct: &'static str },
    DirectiveOutsidePrint,
    MalformedPrint,
    CallDepthExceeded { limit: usize },

    /// A lower-level expression evaluation error, wrapped at the
    /// rendering boundary.
    Evaluation,
}

impl fmt::Display for RenderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CannotPrerenderMsgFallbackGroup => {
                write!(f, "cannot prerender message fallback group")
            }
            Self::CannotPrerenderMsgDef => write!(f, "cannot prerender message definition"),
            Self::CannotPrerenderMsgRef => write!(f, "cannot prerender message reference"),
            Self::CannotPrerenderCssRef => write!(f, "cannot prerender CSS reference"),
            Self::CannotPrerenderDelegateCall => write!(f, "cannot prerender delegate call"),
            Self::CannotPrerenderLog => write!(f, "cannot prerender log node"),
            Self::CannotPrerenderDebugger => write!(f, "cannot prerender debugger node"),
            // Fixed message: the name is available structurally, but the
            // message must not vary between unregistered and impure.
            Self::ImpurePrintDirective { .. } => {
                write!(f, "cannot prerender node with impure print directive")
            }
            Self::UndefinedTemplate { name } => write!(f, "undefined template: {name}"),
            Self::UndefinedDirective { name } => write!(f, "undefined print directive: |{name}"),
            Self::DelegateNotFound { name } => {
                write!(f, "no active implementation for delegate: {name}")
            }
            Self::UnsupportedNode { construct } => {
                write!(f, "{construct} is not supported in server-side rendering")
            }
            Self::DirectiveOutsidePrint => {
                write!(f, "print directive outside of a print node")
            }
            Self::MalformedPrint => {
                write!(f, "print node children must be print directives")
            }
            Self::CallDepthExceeded { limit } => {
                write!(f, "maximum template call depth exceeded (limit: {limit})")
            }
            Self::Evaluation => write!(f, "evaluation failed"),
        }
    }
}

/// Render failure: the single error type observable by render callers.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderError {
    /// Structured error category.
    pub kind: RenderErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Wrapped lower-level evaluation error, when `kind` is `Evaluation`.
    pub cause: Option<EvalError>,
}

impl RenderError {
    fn from_kind(kind: RenderErrorKind) -> Self {
        let message = kind.to_string();
        RenderError {
            kind,
            message,
            cause: None,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// The single conversion point from expression errors into the render
/// failure family. The original error stays reachable via `source()`.
impl From<EvalError> for RenderError {
    fn from(cause: EvalError) -> Self {
        RenderError {
            kind: RenderErrorKind::Evaluation,
            message: format!("evaluation failed: {cause}"),
            cause: Some(cause),
        }
    }
}

// Render error factories.

pub fn cannot_prerender_msg_fallback_group() -> RenderError {
    RenderError::from_kind(RenderErrorKind::CannotPrerenderMsgFallbackGroup)
}

pub fn cannot_prerender_msg_def() -> RenderError {
    RenderError::from_kind(RenderErrorKind::CannotPrerenderMsgDef)
}

pub fn cannot_prerender_msg_ref() -> RenderError {
    RenderError::from_kind(RenderErrorKind::CannotPrerenderMsgRef)
}

pub fn cannot_prerender_css_ref() -> RenderError {
    RenderError::from_kind(RenderErrorKind::CannotPrerenderCssRef)
}

pub fn cannot_prerender_delegate_call() -> RenderError {
    RenderError::from_kind(RenderErrorKind::CannotPrerenderDelegateCall)
}

pub fn cannot_prerender_log() -> RenderError {
    RenderError::from_kind(RenderErrorKind::CannotPrerenderLog)
}

pub fn cannot_prerender_debugger() -> RenderError {
    RenderError::from_kind(RenderErrorKind::CannotPrerenderDebugger)
}

pub fn impure_print_directive(name: impl Into<String>) -> RenderError {
    RenderError::from_kind(RenderErrorKind::ImpurePrintDirective { name: name.into() })
}

pub fn undefined_template(name: impl Into<String>) -> RenderError {
    RenderError::from_kind(RenderErrorKind::UndefinedTemplate { name: name.into() })
}

pub fn undefined_directive(name: impl Into<String>) -> RenderError {
    RenderError::from_kind(RenderErrorKind::UndefinedDirective { name: name.into() })
}

pub fn delegate_not_found(name: impl Into<String>) -> RenderError {
    RenderError::from_kind(RenderErrorKind::DelegateNotFound { name: name.into() })
}

pub fn unsupported_node(construct: &'static str) -> RenderError {
    RenderError::from_kind(RenderErrorKind::UnsupportedNode { construct })
}

pub fn directive_outside_print() -> RenderError {
    RenderError::from_kind(RenderErrorKind::DirectiveOutsidePrint)
}

pub fn malformed_print() -> RenderError {
    RenderError::from_kind(RenderErrorKind::MalformedPrint)
}

pub fn call_depth_exceeded(limit: usize) -> RenderError {
    RenderError::from_kind(RenderErrorKind::CallDepthExceeded { limit })
}
