//! Renderer tests: expression evaluation, operators, and end-to-end
//! rendering in both modes.

mod render_tests;

use sable_data::Record;
use sable_ir::{NodeArena, NodeId, StringInterner};

use crate::{builtin_registry, RenderError, RenderMode, Renderer};

/// Render `body` against `data` with the builtin directive registry and
/// no templates, facilities, or log handler.
pub(crate) fn render_to_string(
    mode: RenderMode,
    arena: &NodeArena,
    interner: &StringInterner,
    body: &[NodeId],
    data: &Record,
) -> Result<String, RenderError> {
    let directives = builtin_registry(interner);
    let mut out = String::new();
    Renderer::new(mode, arena, interner, &directives, data).render(body, &mut out)?;
    Ok(out)
}
