//! The tree-walking renderer.
//!
//! One `Renderer` walks a template's node tree and appends the rendered
//! text to an output buffer. Its behavior is parameterized by
//! `RenderMode`: runtime rendering consults the optional
//! `RuntimeFacilities` and `LogHandler`, prerendering rejects every
//! node that would need them (see `RenderMode::intercept`) and checks
//! print-directive purity before evaluating anything.
//!
//! Template calls spawn a fresh renderer over the callee's arena with
//! the callee's data record and a clean environment; registries, mode,
//! facilities, and the output buffer carry over.

use sable_data::{Record, Value};
use sable_ir::{
    CallParam, ExprId, Name, NodeArena, NodeId, NodeKind, StringInterner, TemplateRegistry,
};

use crate::directive::DirectiveRegistry;
use crate::environment::Environment;
use crate::errors::{self, RenderError, RenderResult};
use crate::eval_mode::RenderMode;
use crate::expr::{eval_expr, ExprContext};
use crate::facilities::RuntimeFacilities;
use crate::log_handler::LogHandler;

/// Tree-walking renderer over one arena.
pub struct Renderer<'a> {
    mode: RenderMode,
    arena: &'a NodeArena,
    interner: &'a StringInterner,
    directives: &'a DirectiveRegistry,
    templates: Option<&'a TemplateRegistry>,
    data: &'a Record,
    ij: Option<&'a Record>,
    facilities: Option<&'a dyn RuntimeFacilities>,
    log: Option<&'a LogHandler>,
    env: Environment,
    depth: usize,
}

impl<'a> Renderer<'a> {
    /// Create a renderer with the minimum context: mode, arena, names,
    /// directive registry, and data. Everything else is opt-in through
    /// the builder methods.
    pub fn new(
        mode: RenderMode,
        arena: &'a NodeArena,
        interner: &'a StringInterner,
        directives: &'a DirectiveRegistry,
        data: &'a Record,
    ) -> Self {
        Renderer {
            mode,
            arena,
            interner,
            directives,
            templates: None,
            data,
            ij: None,
            facilities: None,
            log: None,
            env: Environment::new(),
            depth: 0,
        }
    }

    /// Supply the template registry, enabling `call` nodes.
    #[must_use]
    pub fn with_templates(mut self, templates: &'a TemplateRegistry) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Supply injected data. Read only in runtime mode; prerendering
    /// fails closed on `$ij` regardless.
    #[must_use]
    pub fn with_ij(mut self, ij: &'a Record) -> Self {
        self.ij = Some(ij);
        self
    }

    /// Supply the runtime facilities (message catalog, CSS renaming,
    /// delegate selection).
    #[must_use]
    pub fn with_facilities(mut self, facilities: &'a dyn RuntimeFacilities) -> Self {
        self.facilities = Some(facilities);
        self
    }

    /// Supply a log handler for `log` nodes. Without one, log output is
    /// discarded.
    #[must_use]
    pub fn with_log(mut self, log: &'a LogHandler) -> Self {
        self.log = Some(log);
        self
    }

    /// Replace the environment, seeding pre-existing local bindings.
    #[must_use]
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Render a sequence of nodes, appending to `out`.
    ///
    /// On error, text already appended stays in `out`; callers that
    /// need all-or-nothing behavior render into a scratch buffer.
    pub fn render(&mut self, nodes: &[NodeId], out: &mut String) -> RenderResult {
        self.render_children(nodes, out)
    }

    /// Render a single node, appending to `out`.
    pub fn render_node(&mut self, id: NodeId, out: &mut String) -> RenderResult {
        let arena = self.arena;
        let node = arena.node(id);
        if let Some(err) = self.mode.intercept(node) {
            return Err(err);
        }
        match node {
            NodeKind::RawText(text) => {
                out.push_str(text);
                Ok(())
            }
            NodeKind::Print { expr, directives } => self.render_print(*expr, directives, out),
            NodeKind::PrintDirective { name, .. } => {
                // A stray directive node is malformed input, but an
                // impure one is still rejected first during prerender,
                // mirroring the print path's check order.
                if self.mode.is_prerender() && !self.directives.is_pure(*name) {
                    return Err(errors::impure_print_directive(self.interner.lookup(*name)));
                }
                Err(errors::directive_outside_print())
            }
            NodeKind::If {
                branches,
                otherwise,
            } => {
                for branch in branches {
                    if self.eval(branch.cond)?.is_truthy() {
                        return self.render_block(&branch.children, out);
                    }
                }
                self.render_block(otherwise, out)
            }
            NodeKind::Foreach {
                var,
                collection,
                body,
                if_empty,
            } => self.render_foreach(*var, *collection, body, if_empty, out),
            NodeKind::Let { var, value } => {
                let value = self.eval(*value)?;
                self.env.define(*var, value);
                Ok(())
            }
            NodeKind::Call {
                callee,
                params,
                pass_data,
            } => self.render_call(*callee, params, *pass_data, out),
            NodeKind::CallDelegate { name, params } => {
                let selected = self
                    .facilities
                    .and_then(|f| f.select_delegate(*name))
                    .ok_or_else(|| errors::delegate_not_found(self.interner.lookup(*name)))?;
                self.render_call(selected, params, false, out)
            }
            NodeKind::MsgFallbackGroup { id, children } => {
                if let Some(translated) = self.facilities.and_then(|f| f.message(*id)) {
                    out.push_str(&translated);
                    return Ok(());
                }
                // No catalog entry: the source content is the fallback.
                self.render_children(children, out)
            }
            NodeKind::MsgDef { .. } | NodeKind::MsgRef { .. } => {
                Err(errors::unsupported_node(node.describe()))
            }
            NodeKind::CssRef { selector } => {
                let selector = self.interner.lookup(*selector);
                match self.facilities.and_then(|f| f.rename_css(selector)) {
                    Some(renamed) => out.push_str(&renamed),
                    None => out.push_str(selector),
                }
                Ok(())
            }
            NodeKind::Log { children } => {
                let mut line = String::new();
                self.render_children(children, &mut line)?;
                if let Some(log) = self.log {
                    log.log(&line);
                }
                Ok(())
            }
            NodeKind::Debugger => Ok(()),
        }
    }

    fn render_children(&mut self, nodes: &[NodeId], out: &mut String) -> RenderResult {
        for &id in nodes {
            self.render_node(id, out)?;
        }
        Ok(())
    }

    /// Render a block in its own scope, so `let` bindings inside it
    /// don't leak out.
    fn render_block(&mut self, nodes: &[NodeId], out: &mut String) -> RenderResult {
        self.env.push_scope();
        let result = self.render_children(nodes, out);
        self.env.pop_scope();
        result
    }

    /// Render a print node: check directive purity (prerender only,
    /// before any evaluation), evaluate the expression, thread it
    /// through the directives, and append the coerced text.
    fn render_print(
        &mut self,
        expr: ExprId,
        directive_ids: &[NodeId],
        out: &mut String,
    ) -> RenderResult {
        if self.mode.is_prerender() {
            // Every attached directive must be known-pure before the
            // expression is evaluated; an unregistered name counts as
            // impure.
            for &dir_id in directive_ids {
                let NodeKind::PrintDirective { name, .. } = self.arena.node(dir_id) else {
                    return Err(errors::malformed_print());
                };
                if !self.directives.is_pure(*name) {
                    return Err(errors::impure_print_directive(self.interner.lookup(*name)));
                }
            }
        }

        let mut value = self.eval(expr)?;
        for &dir_id in directive_ids {
            let NodeKind::PrintDirective { name, args } = self.arena.node(dir_id) else {
                return Err(errors::malformed_print());
            };
            let Some(directive) = self.directives.get(*name) else {
                return Err(errors::undefined_directive(self.interner.lookup(*name)));
            };
            let mut arg_values = Vec::with_capacity(args.len());
            for &arg in args {
                arg_values.push(self.eval(arg)?);
            }
            value = directive.apply(value, &arg_values)?;
        }

        match value.render_text() {
            Some(text) => {
                out.push_str(&text);
                Ok(())
            }
            None => Err(errors::cannot_print(value.type_name()).into()),
        }
    }

    fn render_foreach(
        &mut self,
        var: Name,
        collection: ExprId,
        body: &[NodeId],
        if_empty: &[NodeId],
        out: &mut String,
    ) -> RenderResult {
        let collection = self.eval(collection)?;
        let Some(items) = collection.as_list() else {
            return Err(errors::type_mismatch("list", collection.type_name()).into());
        };
        if items.is_empty() {
            return self.render_block(if_empty, out);
        }
        for item in items {
            self.env.push_scope();
            self.env.define(var, item.clone());
            let result = self.render_children(body, out);
            self.env.pop_scope();
            result?;
        }
        Ok(())
    }

    /// Render a static template call: build the callee's data record
    /// (caller data if `pass_data`, plus evaluated params), then render
    /// the callee's body with a fresh renderer over its arena.
    fn render_call(
        &mut self,
        callee: Name,
        params: &[CallParam],
        pass_data: bool,
        out: &mut String,
    ) -> RenderResult {
        let template = self
            .templates
            .and_then(|t| t.get(callee))
            .ok_or_else(|| errors::undefined_template(self.interner.lookup(callee)))?;

        let limit = self.mode.max_call_depth();
        if self.depth + 1 > limit {
            return Err(errors::call_depth_exceeded(limit));
        }

        let mut callee_data = if pass_data {
            self.data.clone()
        } else {
            Record::new()
        };
        for param in params {
            let value = self.eval(param.value)?;
            callee_data.insert(self.interner.lookup(param.name), value);
        }

        let mut sub = Renderer {
            mode: self.mode,
            arena: template.arena().as_ref(),
            interner: self.interner,
            directives: self.directives,
            templates: self.templates,
            data: &callee_data,
            ij: self.ij,
            facilities: self.facilities,
            log: self.log,
            env: Environment::new(),
            depth: self.depth + 1,
        };
        sub.render(template.body(), out)
    }

    fn eval(&self, id: ExprId) -> Result<Value, RenderError> {
        let ctx = ExprContext {
            arena: self.arena,
            interner: self.interner,
            data: self.data,
            ij: if self.mode.allows_injected_data() {
                self.ij
            } else {
                None
            },
            env: &self.env,
        };
        Ok(eval_expr(&ctx, id)?)
    }
}
