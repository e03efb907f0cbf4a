//! Sable Opti - compile-time optimization passes.
//!
//! The passes here run inside the compiler, after parsing and before
//! codegen. The central one is prerendering: evaluating template
//! subtrees whose data is fully known at compile time and replacing
//! them with their literal output. A subtree qualifies only if nothing
//! in it depends on per-request state; the attempt fails fast otherwise
//! and the caller keeps the subtree as-is.

mod prerender;

pub use prerender::Prerenderer;
