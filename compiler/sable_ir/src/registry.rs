//! Template registry: name -> template lookup for call dispatch.
//!
//! The registry is built once after all files are compiled and is
//! read-only afterward, so evaluator instances share it by reference
//! (or behind an `Arc`) without locking.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::{NodeId, NodeKind, SharedArena};
use crate::Name;

/// A compiled template: its body plus the arena that owns it.
///
/// Each template carries a handle to its file's arena, so a caller
/// evaluates the callee's body against the callee's arena rather than
/// its own.
#[derive(Clone, Debug)]
pub struct Template {
    name: Name,
    params: Vec<Name>,
    body: Vec<NodeId>,
    arena: SharedArena,
    required_css: Vec<String>,
}

impl Template {
    /// Create a template with no declared params or CSS namespaces.
    pub fn new(name: Name, arena: SharedArena, body: Vec<NodeId>) -> Self {
        Template {
            name,
            params: Vec::new(),
            body,
            arena,
            required_css: Vec::new(),
        }
    }

    /// Declare the template's parameters.
    #[must_use]
    pub fn with_params(mut self, params: Vec<Name>) -> Self {
        self.params = params;
        self
    }

    /// Attach the CSS namespaces parsed from the template's
    /// `requirecss` attribute (see `requirecss::parse_requirecss_attr`).
    #[must_use]
    pub fn with_required_css(mut self, namespaces: Vec<String>) -> Self {
        self.required_css = namespaces;
        self
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn params(&self) -> &[Name] {
        &self.params
    }

    pub fn body(&self) -> &[NodeId] {
        &self.body
    }

    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    /// CSS namespaces this template declares directly.
    pub fn required_css(&self) -> &[String] {
        &self.required_css
    }
}

/// Registry of all compiled templates, keyed by name.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: FxHashMap<Name, Template>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        TemplateRegistry::default()
    }

    /// Register a template. Replaces any previous template of the same name.
    pub fn insert(&mut self, template: Template) {
        self.templates.insert(template.name(), template);
    }

    /// Look up a template by name.
    pub fn get(&self, name: Name) -> Option<&Template> {
        self.templates.get(&name)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// CSS namespaces required by `name` and, transitively, by every
    /// template it statically calls. First occurrence wins the ordering;
    /// repeats across templates are dropped. Delegate calls are not
    /// followed (their targets are unknown until runtime).
    ///
    /// Call cycles are tolerated: each template contributes once.
    pub fn required_css_transitive(&self, name: Name) -> Vec<String> {
        let mut merged = Vec::new();
        let mut seen_css = FxHashSet::default();
        let mut visited = FxHashSet::default();
        self.collect_required_css(name, &mut merged, &mut seen_css, &mut visited);
        merged
    }

    fn collect_required_css(
        &self,
        name: Name,
        merged: &mut Vec<String>,
        seen_css: &mut FxHashSet<String>,
        visited: &mut FxHashSet<Name>,
    ) {
        if !visited.insert(name) {
            return;
        }
        let Some(template) = self.get(name) else {
            return;
        };
        for ns in template.required_css() {
            if seen_css.insert(ns.clone()) {
                merged.push(ns.clone());
            }
        }
        let mut callees = Vec::new();
        collect_callees(template.arena(), template.body(), &mut callees);
        for callee in callees {
            self.collect_required_css(callee, merged, seen_css, visited);
        }
    }
}

/// Collect the names of templates statically called from `nodes`, in
/// document order.
fn collect_callees(arena: &SharedArena, nodes: &[NodeId], out: &mut Vec<Name>) {
    for &id in nodes {
        match arena.node(id) {
            NodeKind::Call { callee, .. } => out.push(*callee),
            NodeKind::If {
                branches,
                otherwise,
            } => {
                for branch in branches {
                    collect_callees(arena, &branch.children, out);
                }
                collect_callees(arena, otherwise, out);
            }
            NodeKind::Foreach { body, if_empty, .. } => {
                collect_callees(arena, body, out);
                collect_callees(arena, if_empty, out);
            }
            NodeKind::MsgFallbackGroup { children, .. }
            | NodeKind::MsgDef { children, .. }
            | NodeKind::Log { children } => collect_callees(arena, children, out),
            _ => {}
        }
    }
}
