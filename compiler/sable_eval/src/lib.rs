//! Sable Eval - tree-walking renderer for Sable templates.
//!
//! One renderer serves both evaluation policies (see `RenderMode`):
//!
//! - `Runtime`: the general-purpose interpreter, with runtime-only
//!   facilities (message catalog, CSS renaming, delegate selection)
//!   supplied through the `RuntimeFacilities` trait and a `LogHandler`.
//! - `Prerender`: compile-time evaluation against fully-known data.
//!   Node kinds whose output depends on any runtime-only facility fail
//!   fast with a fixed diagnostic instead of baking in wrong output.
//!
//! The mode is fixed at construction; the node-kind policy lives in one
//! place (`RenderMode::intercept`) rather than in an override hierarchy.
//!
//! # Errors
//!
//! Expression evaluation reports `EvalError`; rendering reports
//! `RenderError`. Every `EvalError` crossing into rendering is wrapped
//! exactly once (`From<EvalError> for RenderError`), so callers of a
//! render see a single failure family with the original preserved as
//! the cause.

mod directive;
mod environment;
pub mod errors;
mod eval_mode;
mod expr;
mod facilities;
mod log_handler;
mod operators;
mod render;
mod shared;

pub use directive::{builtin_registry, DirectiveFn, DirectiveRegistry, PrintDirective};
pub use environment::{Environment, LocalScope, Scope};
pub use errors::{EvalError, EvalErrorKind, EvalResult, RenderError, RenderErrorKind, RenderResult};
pub use eval_mode::RenderMode;
pub use expr::{eval_expr, ExprContext};
pub use facilities::{NoFacilities, RuntimeFacilities};
pub use log_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferLogHandler, LogHandler,
    SharedLogHandler, StdoutLogHandler,
};
pub use operators::{evaluate_binary, evaluate_unary};
pub use render::Renderer;
pub use shared::SharedRegistry;

#[cfg(test)]
mod tests;
