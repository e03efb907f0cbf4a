//! Compile-time prerendering of template subtrees.
//!
//! A `Prerenderer` attempts to evaluate a subtree against data the
//! compiler already knows. On success the subtree's exact runtime
//! output is appended to the caller's buffer; on failure nothing is
//! appended, so a failed attempt is always safe to discard. Failure is
//! the expected outcome for any subtree touching per-request state
//! (messages, CSS renaming, delegates, logging, injected data, impure
//! print directives) and is not a compile error.

use sable_data::Record;
use sable_ir::{NodeArena, NodeId, StringInterner, TemplateRegistry};
use sable_eval::{DirectiveRegistry, Environment, RenderMode, RenderResult, Renderer};

/// Prerenders template subtrees against compile-time-known data.
///
/// One instance is configured per optimization pass and reused across
/// candidate subtrees; each `execute` call is an independent attempt.
pub struct Prerenderer<'a> {
    interner: &'a StringInterner,
    directives: &'a DirectiveRegistry,
    templates: Option<&'a TemplateRegistry>,
    data: &'a Record,
    env: Option<Environment>,
}

impl<'a> Prerenderer<'a> {
    /// Create a prerenderer over the given data record.
    pub fn new(
        interner: &'a StringInterner,
        directives: &'a DirectiveRegistry,
        data: &'a Record,
    ) -> Self {
        Prerenderer {
            interner,
            directives,
            templates: None,
            data,
            env: None,
        }
    }

    /// Supply the template registry, so static calls inside candidate
    /// subtrees can be followed.
    #[must_use]
    pub fn with_templates(mut self, templates: &'a TemplateRegistry) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Seed local bindings visible at the candidate subtree's position
    /// (e.g. enclosing `let` bindings the constant-propagation pass has
    /// already resolved).
    #[must_use]
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// A prerenderer for a nested attempt over different data, sharing
    /// this one's registries. Local bindings do not carry over.
    pub fn create_sub_instance(&self, data: &'a Record) -> Prerenderer<'a> {
        Prerenderer {
            interner: self.interner,
            directives: self.directives,
            templates: self.templates,
            data,
            env: None,
        }
    }

    /// Attempt to prerender a node sequence, appending its exact
    /// runtime output to `out`.
    ///
    /// All-or-nothing: the attempt renders into a scratch buffer and
    /// `out` is only touched on success, so partial output never leaks
    /// into the caller's buffer.
    pub fn execute(&self, arena: &NodeArena, nodes: &[NodeId], out: &mut String) -> RenderResult {
        let mut scratch = String::new();
        let mut renderer = Renderer::new(
            RenderMode::Prerender,
            arena,
            self.interner,
            self.directives,
            self.data,
        )
        .with_env(self.attempt_env());
        if let Some(templates) = self.templates {
            renderer = renderer.with_templates(templates);
        }
        renderer.render(nodes, &mut scratch)?;
        out.push_str(&scratch);
        Ok(())
    }

    /// Attempt to prerender a single node. See [`Prerenderer::execute`].
    pub fn execute_node(&self, arena: &NodeArena, node: NodeId, out: &mut String) -> RenderResult {
        self.execute(arena, &[node], out)
    }

    /// Build a fresh environment for one attempt, seeded with a
    /// snapshot of the configured bindings. Attempts never share scope
    /// cells, so a failed attempt cannot leave bindings behind for the
    /// next one.
    fn attempt_env(&self) -> Environment {
        let mut env = Environment::new();
        if let Some(seed) = &self.env {
            for (name, value) in seed.capture() {
                env.define(name, value);
            }
        }
        env
    }
}
