//! Print directives and their registry.
//!
//! A print directive post-processes the text of a print node. Each
//! registered directive carries a purity flag: pure directives depend
//! only on their input and arguments, impure ones consult per-request
//! state (locale, bidi direction, renaming maps). Compile-time
//! evaluation refuses to run impure directives, and treats any
//! unregistered directive as impure.

use rustc_hash::FxHashMap;
use sable_data::Value;
use sable_ir::{Name, StringInterner};

use crate::errors::{cannot_print, directive_arg, EvalError};

/// Implementation of a print directive: input value and evaluated
/// arguments in, transformed value out.
pub type DirectiveFn = fn(Value, &[Value]) -> Result<Value, EvalError>;

/// A registered print directive.
#[derive(Clone, Copy)]
pub struct PrintDirective {
    apply: DirectiveFn,
    pure: bool,
}

impl PrintDirective {
    /// Create a directive from its implementation and purity flag.
    pub fn new(apply: DirectiveFn, pure: bool) -> Self {
        PrintDirective { apply, pure }
    }

    /// Apply the directive to a value.
    pub fn apply(&self, input: Value, args: &[Value]) -> Result<Value, EvalError> {
        (self.apply)(input, args)
    }

    /// Whether the directive's output depends only on its inputs.
    pub fn is_pure(&self) -> bool {
        self.pure
    }
}

/// Registry mapping directive names to implementations.
///
/// Built once at startup and shared read-only between renderers
/// (see `SharedRegistry`).
#[derive(Default)]
pub struct DirectiveRegistry {
    directives: FxHashMap<Name, PrintDirective>,
}

impl DirectiveRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        DirectiveRegistry::default()
    }

    /// Register a directive under a name. Replaces any previous entry.
    pub fn register(&mut self, name: Name, directive: PrintDirective) {
        self.directives.insert(name, directive);
    }

    /// Look up a directive by name.
    pub fn get(&self, name: Name) -> Option<&PrintDirective> {
        self.directives.get(&name)
    }

    /// Purity of the named directive. Unregistered names are impure:
    /// nothing is known about them, so they must not run at compile
    /// time.
    pub fn is_pure(&self, name: Name) -> bool {
        self.directives.get(&name).is_some_and(PrintDirective::is_pure)
    }

    /// Number of registered directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Build the registry of built-in directives.
pub fn builtin_registry(interner: &StringInterner) -> DirectiveRegistry {
    let mut registry = DirectiveRegistry::new();
    registry.register(interner.intern("escape_html"), PrintDirective::new(escape_html, true));
    registry.register(interner.intern("upper"), PrintDirective::new(upper, true));
    registry.register(interner.intern("lower"), PrintDirective::new(lower, true));
    registry.register(interner.intern("truncate"), PrintDirective::new(truncate, true));
    // Impure: output depends on per-request locale / bidi state.
    registry.register(interner.intern("bidi_wrap"), PrintDirective::new(bidi_wrap, false));
    registry.register(
        interner.intern("format_number"),
        PrintDirective::new(format_number, false),
    );
    registry
}

/// Coerce a directive input to text, as printing would.
fn input_text(input: &Value) -> Result<String, EvalError> {
    input.render_text().ok_or_else(|| cannot_print(input.type_name()))
}

fn escape_html(input: Value, _args: &[Value]) -> Result<Value, EvalError> {
    let text = input_text(&input)?;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Ok(Value::str(out))
}

fn upper(input: Value, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::str(input_text(&input)?.to_uppercase()))
}

fn lower(input: Value, _args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::str(input_text(&input)?.to_lowercase()))
}

/// `truncate(max_len)`: cap the text at `max_len` characters, appending
/// an ellipsis when anything was cut. The result never exceeds
/// `max_len`: caps of 3 or fewer leave no room for an ellipsis and cut
/// plain. Counts are in chars, never bytes, so multibyte text is not
/// split mid-character.
fn truncate(input: Value, args: &[Value]) -> Result<Value, EvalError> {
    let text = input_text(&input)?;
    let max_len = match args.first() {
        Some(Value::Int(n)) if *n >= 0 => *n as usize,
        Some(other) => {
            return Err(directive_arg(
                "truncate",
                format!("expected a non-negative int length, got {}", other.type_name()),
            ));
        }
        None => return Err(directive_arg("truncate", "missing length argument")),
    };
    if text.chars().count() <= max_len {
        return Ok(Value::str(text));
    }
    if max_len <= 3 {
        let kept: String = text.chars().take(max_len).collect();
        return Ok(Value::str(kept));
    }
    let kept: String = text.chars().take(max_len - 3).collect();
    Ok(Value::str(format!("{kept}...")))
}

/// Wraps text in Unicode bidi isolation marks for the active global
/// direction. Impure: the direction comes from per-request state.
fn bidi_wrap(input: Value, _args: &[Value]) -> Result<Value, EvalError> {
    let text = input_text(&input)?;
    Ok(Value::str(format!("\u{2068}{text}\u{2069}")))
}

/// Formats a number per the active locale's conventions. Impure: the
/// grouping and decimal separators come from per-request state.
fn format_number(input: Value, _args: &[Value]) -> Result<Value, EvalError> {
    let text = input_text(&input)?;
    Ok(Value::str(text))
}
