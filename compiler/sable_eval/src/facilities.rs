//! Runtime-only rendering facilities.
//!
//! The runtime renderer depends on services that exist only inside a
//! serving process: the locale's message catalog, the CSS renaming map,
//! and delegate priority dispatch. They are consumed through this trait
//! so the renderer itself stays independent of their implementations.
//!
//! All methods default to "not available", which is also the behavior
//! when no facilities are supplied at all: messages fall back to their
//! source content, CSS selectors pass through unrenamed, and delegate
//! calls fail. Prerendering never consults facilities; nodes needing
//! them are rejected up front by the mode policy.

use sable_ir::Name;

/// Runtime rendering facilities.
pub trait RuntimeFacilities {
    /// Translated text for the message with the given id, if the
    /// active locale provides one.
    fn message(&self, id: u64) -> Option<String> {
        let _ = id;
        None
    }

    /// Rewritten class name for a CSS selector, if a renaming map is
    /// active.
    fn rename_css(&self, selector: &str) -> Option<String> {
        let _ = selector;
        None
    }

    /// The concrete template implementing a delegate slot, chosen by
    /// priority among the registered implementations.
    fn select_delegate(&self, name: Name) -> Option<Name> {
        let _ = name;
        None
    }
}

/// The empty runtime-facility context: no catalog, no renaming map, no
/// delegate implementations.
#[derive(Default)]
pub struct NoFacilities;

impl RuntimeFacilities for NoFacilities {}
