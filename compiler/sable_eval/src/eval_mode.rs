//! Evaluation modes for the Sable renderer.
//!
//! One renderer serves both rendering policies; `RenderMode` is chosen
//! at construction and consulted through policy methods. This replaces
//! an override hierarchy (a prerender subclass of the runtime renderer)
//! with a single match-dispatched policy table.

use sable_ir::NodeKind;

use crate::errors::{self, RenderError};

/// Rendering mode: determines renderer behavior via match dispatch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Server-side rendering with the full set of runtime facilities.
    #[default]
    Runtime,
    /// Compile-time prerendering: no runtime facilities exist, so any
    /// node that would need one fails fast with a fixed diagnostic.
    Prerender,
}

impl RenderMode {
    /// Whether this mode is the compile-time prerender policy.
    #[inline]
    pub fn is_prerender(self) -> bool {
        matches!(self, RenderMode::Prerender)
    }

    /// Whether injected data (`$ij.*`) may be read.
    ///
    /// Injected data is bound per request; it does not exist at compile
    /// time, so prerendering fails closed on any `$ij` reference.
    #[inline]
    pub fn allows_injected_data(self) -> bool {
        matches!(self, RenderMode::Runtime)
    }

    /// Maximum template call depth.
    ///
    /// Nothing validates the call graph for cycles before rendering, so
    /// both modes carry an explicit guard. Prerendering uses a tight
    /// budget (it runs inside the compiler, per candidate subtree);
    /// runtime rendering is generous but still bounded.
    #[inline]
    pub fn max_call_depth(self) -> usize {
        match self {
            RenderMode::Runtime => 500,
            RenderMode::Prerender => 64,
        }
    }

    /// The node-kind policy: `None` delegates the node to the generic
    /// rendering rule, `Some(err)` rejects it without inspecting its
    /// children.
    ///
    /// Rejected kinds all depend on a facility that exists only at
    /// runtime: the locale's message catalog, the CSS renaming map,
    /// delegate priority dispatch, or the log/debug side channel.
    /// Print nodes are not decided here — their eligibility depends on
    /// the purity of the attached directives, which the renderer checks
    /// against the directive registry before evaluating the printed
    /// expression.
    pub fn intercept(self, node: &NodeKind) -> Option<RenderError> {
        if !self.is_prerender() {
            return None;
        }
        match node {
            NodeKind::MsgFallbackGroup { .. } => Some(errors::cannot_prerender_msg_fallback_group()),
            NodeKind::MsgDef { .. } => Some(errors::cannot_prerender_msg_def()),
            NodeKind::MsgRef { .. } => Some(errors::cannot_prerender_msg_ref()),
            NodeKind::CssRef { .. } => Some(errors::cannot_prerender_css_ref()),
            NodeKind::CallDelegate { .. } => Some(errors::cannot_prerender_delegate_call()),
            NodeKind::Log { .. } => Some(errors::cannot_prerender_log()),
            NodeKind::Debugger => Some(errors::cannot_prerender_debugger()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RenderErrorKind;
    use sable_ir::Name;

    #[test]
    fn default_is_runtime() {
        assert_eq!(RenderMode::default(), RenderMode::Runtime);
    }

    #[test]
    fn runtime_allows_injected_data() {
        assert!(RenderMode::Runtime.allows_injected_data());
    }

    #[test]
    fn prerender_forbids_injected_data() {
        assert!(!RenderMode::Prerender.allows_injected_data());
    }

    #[test]
    fn prerender_call_depth_is_tight() {
        assert!(RenderMode::Prerender.max_call_depth() < RenderMode::Runtime.max_call_depth());
    }

    #[test]
    fn runtime_intercepts_nothing() {
        assert!(RenderMode::Runtime.intercept(&NodeKind::Debugger).is_none());
        assert!(RenderMode::Runtime
            .intercept(&NodeKind::MsgFallbackGroup {
                id: 1,
                children: vec![]
            })
            .is_none());
    }

    #[test]
    fn prerender_rejects_runtime_only_kinds() {
        let cases: Vec<(NodeKind, RenderErrorKind)> = vec![
            (
                NodeKind::MsgFallbackGroup {
                    id: 1,
                    children: vec![],
                },
                RenderErrorKind::CannotPrerenderMsgFallbackGroup,
            ),
            (
                NodeKind::MsgDef {
                    var: Name::EMPTY,
                    children: vec![],
                },
                RenderErrorKind::CannotPrerenderMsgDef,
            ),
            (
                NodeKind::MsgRef { var: Name::EMPTY },
                RenderErrorKind::CannotPrerenderMsgRef,
            ),
            (
                NodeKind::CssRef {
                    selector: Name::EMPTY,
                },
                RenderErrorKind::CannotPrerenderCssRef,
            ),
            (
                NodeKind::CallDelegate {
                    name: Name::EMPTY,
                    params: vec![],
                },
                RenderErrorKind::CannotPrerenderDelegateCall,
            ),
            (
                NodeKind::Log { children: vec![] },
                RenderErrorKind::CannotPrerenderLog,
            ),
            (NodeKind::Debugger, RenderErrorKind::CannotPrerenderDebugger),
        ];
        for (node, expected) in cases {
            let err = RenderMode::Prerender
                .intercept(&node)
                .unwrap_or_else(|| panic!("expected interception for {}", node.describe()));
            assert_eq!(err.kind, expected, "for {}", node.describe());
        }
    }

    #[test]
    fn prerender_delegates_plain_kinds() {
        let mut arena = sable_ir::NodeArena::new();
        let value = arena.alloc_expr(sable_ir::ExprKind::Int(1));
        assert!(RenderMode::Prerender
            .intercept(&NodeKind::RawText(String::new()))
            .is_none());
        assert!(RenderMode::Prerender
            .intercept(&NodeKind::Let {
                var: Name::EMPTY,
                value
            })
            .is_none());
    }
}
