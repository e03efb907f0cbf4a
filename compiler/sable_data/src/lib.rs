//! Sable Data - runtime values for template rendering.
//!
//! Values are supplied by the embedding application as a `Record` and
//! are never mutated during evaluation. The `Value` enum keeps scalars
//! inline and puts composite data behind the `Heap` wrapper, which
//! enforces that every heap allocation goes through a `Value` factory
//! method.

mod heap;
mod record;
mod value;

pub use heap::Heap;
pub use record::Record;
pub use value::Value;
