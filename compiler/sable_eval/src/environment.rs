//! Environment for local bindings during rendering.
//!
//! Uses a scope stack (not cloning) for efficient scope management.
//! Template locals (`let` bindings, loop variables) are immutable, so
//! the environment exposes define-and-lookup only.

// Rc is the intentional implementation detail of LocalScope<T>.
#![allow(clippy::disallowed_types)]

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use sable_data::Value;
use sable_ir::Name;

/// A single-threaded scope wrapper for reference-counted interior
/// mutability.
///
/// Wraps `Rc<RefCell<T>>` so all scope allocations go through the
/// `LocalScope::new()` factory. `Rc` (not `Arc`) is intentional: one
/// renderer instance never crosses threads.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    /// Create a new `LocalScope` wrapping the given value.
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

/// A single scope containing local bindings.
#[derive(Debug, Default)]
pub struct Scope {
    /// Bindings in this scope (`FxHashMap` for fast hashing with `Name` keys).
    bindings: FxHashMap<Name, Value>,
    /// Parent scope (for lexical scoping).
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Create a new empty scope with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Create a new scope with a parent.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define a local in this scope. Shadows any outer binding.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a local by name, walking outward through parents.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }
}

/// Environment for the renderer using a scope stack.
///
/// Scopes are pushed at block entry and popped at block exit; lookup
/// walks from the innermost scope outward.
pub struct Environment {
    /// Stack of scopes, with the current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
}

impl Environment {
    /// Create a new environment with a single root scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![LocalScope::new(Scope::new())],
        }
    }

    /// Current scope depth.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a new scope onto the stack.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope from the stack. The root scope stays.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current_scope(&self) -> LocalScope<Scope> {
        // The stack always holds the root scope; last() only returns
        // None on an empty Vec.
        self.scopes
            .last()
            .cloned()
            .unwrap_or_else(|| LocalScope::new(Scope::new()))
    }

    /// Define a local in the current scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        if let Some(scope) = self.scopes.last() {
            scope.borrow_mut().define(name, value);
        }
    }

    /// Look up a local by name.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.scopes.last().and_then(|s| s.borrow().lookup(name))
    }

    /// Snapshot all visible bindings, innermost binding winning.
    ///
    /// Used to seed an independent environment for a prerender attempt
    /// without sharing scope cells with the original.
    pub fn capture(&self) -> FxHashMap<Name, Value> {
        fn collect(scope: &Scope, captures: &mut FxHashMap<Name, Value>) {
            for (name, value) in &scope.bindings {
                captures.entry(*name).or_insert_with(|| value.clone());
            }
            if let Some(parent) = &scope.parent {
                collect(&parent.borrow(), captures);
            }
        }
        let mut captures = FxHashMap::default();
        collect(&self.current_scope().borrow(), &mut captures);
        captures
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .finish()
    }
}
