//! Sable IR - Template tree representation for the Sable compiler.
//!
//! This crate provides the immutable AST for Sable templates, the
//! arena that owns it, and the registries built on top of it:
//!
//! - `NodeArena`: contiguous storage for nodes and expressions
//!   (index-based, no `Box` chains)
//! - `NodeKind` / `ExprKind`: the closed set of template constructs
//! - `TemplateRegistry`: name -> template lookup for call dispatch
//! - `requirecss`: parsing and validation of the `requirecss`
//!   dependency attribute
//!
//! Identifiers are interned through `StringInterner` and referenced
//! everywhere as compact `Name` handles.

pub mod ast;
mod interner;
mod name;
pub mod registry;
pub mod requirecss;

pub use ast::{
    BinaryOp, CallParam, ExprId, ExprKind, IfBranch, NodeArena, NodeId, NodeKind, SharedArena,
    UnaryOp,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use registry::{Template, TemplateRegistry};
pub use requirecss::{is_dotted_identifier, is_identifier, parse_requirecss_attr, InvalidRequireCss};
