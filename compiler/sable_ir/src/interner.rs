//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup with thread-safe access via a
//! single `RwLock`. Interned strings live for the process lifetime, so
//! lookups hand out `&'static str` without holding the lock.

// Arc is needed for SharedInterner - the interner is shared between the
// registries and every evaluator instance.
#![allow(clippy::disallowed_types)]

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::Name;

struct Inner {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents.
    strings: Vec<&'static str>,
}

impl Inner {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        Inner {
            map,
            strings: vec![empty],
        }
    }
}

/// String interner.
///
/// Provides O(1) lookup and equality comparison for interned strings.
/// Interning leaks the string contents; identifiers are small and the
/// set is bounded by the compiled sources, so this is acceptable for a
/// compiler process.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at `Name::EMPTY`.
    pub fn new() -> Self {
        StringInterner {
            inner: RwLock::new(Inner::with_empty()),
        }
    }

    /// Intern a string, returning its compact `Name` handle.
    ///
    /// Interning the same content twice returns the same `Name`.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&idx) = self.inner.read().map.get(s) {
            return Name::from_raw(idx);
        }
        let mut inner = self.inner.write();
        // Re-check under the write lock: another thread may have interned
        // the string between our read and write acquisitions.
        if let Some(&idx) = inner.map.get(s) {
            return Name::from_raw(idx);
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        debug_assert!(
            u32::try_from(inner.strings.len()).is_ok(),
            "interner exhausted the u32 id space"
        );
        let idx = u32::try_from(inner.strings.len()).unwrap_or(u32::MAX);
        inner.strings.push(leaked);
        inner.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Look up the contents of an interned name.
    ///
    /// Returns the empty string for names this interner never produced.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner
            .read()
            .strings
            .get(name.raw() as usize)
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Whether the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared handle to a `StringInterner`.
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a shared handle around a fresh interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Clone for SharedInterner {
    fn clone(&self) -> Self {
        SharedInterner(Arc::clone(&self.0))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("foo"), interner.intern("bar"));
    }

    #[test]
    fn lookup_round_trips() {
        let interner = StringInterner::new();
        let name = interner.intern("userName");
        assert_eq!(interner.lookup(name), "userName");
    }

    #[test]
    fn empty_string_is_preinterned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn shared_interner_clones_share_storage() {
        let shared = SharedInterner::default();
        let clone = shared.clone();
        let name = shared.intern("x");
        assert_eq!(clone.lookup(name), "x");
    }
}
