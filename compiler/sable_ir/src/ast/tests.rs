use super::*;
use crate::StringInterner;
use pretty_assertions::assert_eq;

#[test]
fn arena_round_trips_nodes() {
    let mut arena = NodeArena::new();
    let text = arena.alloc_node(NodeKind::RawText("hello".to_owned()));
    assert_eq!(arena.node(text), &NodeKind::RawText("hello".to_owned()));
    assert_eq!(arena.node_count(), 1);
}

#[test]
fn arena_round_trips_exprs() {
    let mut arena = NodeArena::new();
    let lit = arena.alloc_expr(ExprKind::Int(7));
    assert_eq!(arena.expr(lit), &ExprKind::Int(7));
    assert_eq!(arena.expr_count(), 1);
}

#[test]
fn ids_are_stable_across_later_allocations() {
    let mut arena = NodeArena::new();
    let first = arena.alloc_expr(ExprKind::Bool(true));
    for i in 0..10 {
        arena.alloc_expr(ExprKind::Int(i));
    }
    assert_eq!(arena.expr(first), &ExprKind::Bool(true));
}

#[test]
fn print_node_holds_directive_children() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let expr = arena.alloc_expr(ExprKind::Str(interner.intern("x")));
    let directive = arena.alloc_node(NodeKind::PrintDirective {
        name: interner.intern("upper"),
        args: vec![],
    });
    let print = arena.alloc_node(NodeKind::Print {
        expr,
        directives: vec![directive],
    });
    match arena.node(print) {
        NodeKind::Print { directives, .. } => assert_eq!(directives.len(), 1),
        other => panic!("expected print node, got {other:?}"),
    }
}

#[test]
fn describe_names_every_kind() {
    assert_eq!(NodeKind::Debugger.describe(), "debugger");
    assert_eq!(
        NodeKind::MsgFallbackGroup {
            id: 1,
            children: vec![]
        }
        .describe(),
        "message fallback group"
    );
    assert_eq!(
        NodeKind::CssRef {
            selector: crate::Name::EMPTY
        }
        .describe(),
        "CSS reference"
    );
}

#[test]
fn lazy_operators() {
    assert!(BinaryOp::And.is_lazy());
    assert!(BinaryOp::Or.is_lazy());
    assert!(!BinaryOp::Add.is_lazy());
}

#[test]
fn operator_symbols() {
    assert_eq!(BinaryOp::NotEq.as_symbol(), "!=");
    assert_eq!(UnaryOp::Not.as_symbol(), "not");
}
