#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use sable_data::{Record, Value};
use sable_ir::{
    CallParam, ExprId, ExprKind, IfBranch, Name, NodeArena, NodeId, NodeKind, StringInterner,
    Template, TemplateRegistry,
};

use super::render_to_string;
use crate::errors::RenderErrorKind;
use crate::{
    buffer_handler, builtin_registry, RenderMode, Renderer, RuntimeFacilities, SharedRegistry,
};

fn print_node(arena: &mut NodeArena, expr: ExprId) -> NodeId {
    arena.alloc_node(NodeKind::Print {
        expr,
        directives: vec![],
    })
}

fn print_with_directive(arena: &mut NodeArena, expr: ExprId, name: Name) -> NodeId {
    let directive = arena.alloc_node(NodeKind::PrintDirective { name, args: vec![] });
    arena.alloc_node(NodeKind::Print {
        expr,
        directives: vec![directive],
    })
}

struct TestFacilities {
    delegate_target: Option<Name>,
}

impl RuntimeFacilities for TestFacilities {
    fn message(&self, id: u64) -> Option<String> {
        (id == 42).then(|| "bonjour".to_owned())
    }

    fn rename_css(&self, selector: &str) -> Option<String> {
        Some(format!("{selector}-v2"))
    }

    fn select_delegate(&self, _name: Name) -> Option<Name> {
        self.delegate_target
    }
}

#[test]
fn raw_text_renders_verbatim() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let body = vec![
        arena.alloc_node(NodeKind::RawText("Hello, ".to_owned())),
        arena.alloc_node(NodeKind::RawText("world!".to_owned())),
    ];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "Hello, world!");
}

#[test]
fn print_coerces_scalars_to_text() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let int = arena.alloc_expr(ExprKind::Int(3));
    let float = arena.alloc_expr(ExprKind::Float(2.0));
    let flag = arena.alloc_expr(ExprKind::Bool(true));
    let null = arena.alloc_expr(ExprKind::Null);
    let body = vec![
        print_node(&mut arena, int),
        print_node(&mut arena, float),
        print_node(&mut arena, flag),
        print_node(&mut arena, null),
    ];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "32.0truenull");
}

#[test]
fn print_threads_value_through_directives() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let expr = arena.alloc_expr(ExprKind::Str(interner.intern("hello world")));
    let upper = arena.alloc_node(NodeKind::PrintDirective {
        name: interner.intern("upper"),
        args: vec![],
    });
    let len = arena.alloc_expr(ExprKind::Int(8));
    let truncate = arena.alloc_node(NodeKind::PrintDirective {
        name: interner.intern("truncate"),
        args: vec![len],
    });
    let body = vec![arena.alloc_node(NodeKind::Print {
        expr,
        directives: vec![upper, truncate],
    })];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "HELLO...");
}

#[test]
fn printing_a_list_fails() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let one = arena.alloc_expr(ExprKind::Int(1));
    let list = arena.alloc_expr(ExprKind::List(vec![one]));
    let body = vec![print_node(&mut arena, list)];
    let err = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new())
        .unwrap_err();
    assert_eq!(err.kind, RenderErrorKind::Evaluation);
}

#[test]
fn if_renders_first_truthy_branch() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let cond_a = arena.alloc_expr(ExprKind::Bool(false));
    let cond_b = arena.alloc_expr(ExprKind::Bool(true));
    let a = arena.alloc_node(NodeKind::RawText("a".to_owned()));
    let b = arena.alloc_node(NodeKind::RawText("b".to_owned()));
    let c = arena.alloc_node(NodeKind::RawText("c".to_owned()));
    let body = vec![arena.alloc_node(NodeKind::If {
        branches: vec![
            IfBranch {
                cond: cond_a,
                children: vec![a],
            },
            IfBranch {
                cond: cond_b,
                children: vec![b],
            },
        ],
        otherwise: vec![c],
    })];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "b");
}

#[test]
fn if_falls_through_to_otherwise() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let cond = arena.alloc_expr(ExprKind::Bool(false));
    let a = arena.alloc_node(NodeKind::RawText("a".to_owned()));
    let c = arena.alloc_node(NodeKind::RawText("fallback".to_owned()));
    let body = vec![arena.alloc_node(NodeKind::If {
        branches: vec![IfBranch {
            cond,
            children: vec![a],
        }],
        otherwise: vec![c],
    })];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "fallback");
}

#[test]
fn foreach_binds_loop_variable_per_iteration() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let item = interner.intern("item");
    let collection = arena.alloc_expr(ExprKind::Var(interner.intern("items")));
    let var = arena.alloc_expr(ExprKind::Var(item));
    let print = print_node(&mut arena, var);
    let sep = arena.alloc_node(NodeKind::RawText(",".to_owned()));
    let body = vec![arena.alloc_node(NodeKind::Foreach {
        var: item,
        collection,
        body: vec![print, sep],
        if_empty: vec![],
    })];
    let data = Record::new().with(
        "items",
        Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]),
    );
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &data);
    assert_eq!(out.unwrap(), "1,2,3,");
}

#[test]
fn foreach_renders_if_empty_for_empty_list() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let collection = arena.alloc_expr(ExprKind::Var(interner.intern("items")));
    let none = arena.alloc_node(NodeKind::RawText("none".to_owned()));
    let body = vec![arena.alloc_node(NodeKind::Foreach {
        var: interner.intern("item"),
        collection,
        body: vec![],
        if_empty: vec![none],
    })];
    let data = Record::new().with("items", Value::list(vec![]));
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &data);
    assert_eq!(out.unwrap(), "none");
}

#[test]
fn foreach_over_non_list_fails() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let collection = arena.alloc_expr(ExprKind::Int(5));
    let body = vec![arena.alloc_node(NodeKind::Foreach {
        var: interner.intern("item"),
        collection,
        body: vec![],
        if_empty: vec![],
    })];
    let err = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new())
        .unwrap_err();
    assert_eq!(err.kind, RenderErrorKind::Evaluation);
}

#[test]
fn let_binds_for_the_rest_of_the_block() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let x = interner.intern("x");
    let value = arena.alloc_expr(ExprKind::Int(9));
    let let_node = arena.alloc_node(NodeKind::Let { var: x, value });
    let var = arena.alloc_expr(ExprKind::Var(x));
    let body = vec![let_node, print_node(&mut arena, var)];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "9");
}

#[test]
fn let_inside_branch_does_not_leak_out() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let x = interner.intern("x");
    let value = arena.alloc_expr(ExprKind::Int(9));
    let let_node = arena.alloc_node(NodeKind::Let { var: x, value });
    let cond = arena.alloc_expr(ExprKind::Bool(true));
    let branch = arena.alloc_node(NodeKind::If {
        branches: vec![IfBranch {
            cond,
            children: vec![let_node],
        }],
        otherwise: vec![],
    });
    let var = arena.alloc_expr(ExprKind::Var(x));
    let body = vec![branch, print_node(&mut arena, var)];
    let err = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new())
        .unwrap_err();
    assert_eq!(err.kind, RenderErrorKind::Evaluation);
}

fn greeting_registry(interner: &StringInterner) -> TemplateRegistry {
    let mut arena = NodeArena::new();
    let hello = arena.alloc_node(NodeKind::RawText("Hello, ".to_owned()));
    let name = arena.alloc_expr(ExprKind::Var(interner.intern("name")));
    let print = arena.alloc_node(NodeKind::Print {
        expr: name,
        directives: vec![],
    });
    let template = Template::new(interner.intern("greet"), arena.shared(), vec![hello, print])
        .with_params(vec![interner.intern("name")]);
    let mut registry = TemplateRegistry::new();
    registry.insert(template);
    registry
}

#[test]
fn call_passes_evaluated_params() {
    let interner = StringInterner::new();
    let templates = greeting_registry(&interner);
    let directives = builtin_registry(&interner);

    let mut arena = NodeArena::new();
    let value = arena.alloc_expr(ExprKind::Str(interner.intern("ada")));
    let body = vec![arena.alloc_node(NodeKind::Call {
        callee: interner.intern("greet"),
        params: vec![CallParam {
            name: interner.intern("name"),
            value,
        }],
        pass_data: false,
    })];

    let data = Record::new();
    let mut out = String::new();
    Renderer::new(RenderMode::Runtime, &arena, &interner, &directives, &data)
        .with_templates(&templates)
        .render(&body, &mut out)
        .unwrap();
    assert_eq!(out, "Hello, ada");
}

#[test]
fn call_with_pass_data_forwards_caller_record() {
    let interner = StringInterner::new();
    let templates = greeting_registry(&interner);
    let directives = builtin_registry(&interner);

    let mut arena = NodeArena::new();
    let body = vec![arena.alloc_node(NodeKind::Call {
        callee: interner.intern("greet"),
        params: vec![],
        pass_data: true,
    })];

    let data = Record::new().with("name", Value::str("grace"));
    let mut out = String::new();
    Renderer::new(RenderMode::Runtime, &arena, &interner, &directives, &data)
        .with_templates(&templates)
        .render(&body, &mut out)
        .unwrap();
    assert_eq!(out, "Hello, grace");
}

#[test]
fn shared_registries_serve_independent_renderers_concurrently() {
    let interner = StringInterner::new();
    let directives = SharedRegistry::new(builtin_registry(&interner));
    let templates = SharedRegistry::new(greeting_registry(&interner));

    let mut arena = NodeArena::new();
    let value = arena.alloc_expr(ExprKind::Str(interner.intern("ada")));
    let body = vec![arena.alloc_node(NodeKind::Call {
        callee: interner.intern("greet"),
        params: vec![CallParam {
            name: interner.intern("name"),
            value,
        }],
        pass_data: false,
    })];

    // Registries are built once and shared by handle; each thread runs
    // its own renderer instance over them.
    std::thread::scope(|scope| {
        for _ in 0..2 {
            let directives = directives.clone();
            let templates = templates.clone();
            let arena = &arena;
            let interner = &interner;
            let body = &body;
            scope.spawn(move || {
                let data = Record::new();
                let mut out = String::new();
                Renderer::new(RenderMode::Runtime, arena, interner, &directives, &data)
                    .with_templates(&templates)
                    .render(body, &mut out)
                    .unwrap();
                assert_eq!(out, "Hello, ada");
            });
        }
    });
}

#[test]
fn call_to_unknown_template_fails() {
    let interner = StringInterner::new();
    let templates = TemplateRegistry::new();
    let directives = builtin_registry(&interner);

    let mut arena = NodeArena::new();
    let body = vec![arena.alloc_node(NodeKind::Call {
        callee: interner.intern("ghost"),
        params: vec![],
        pass_data: false,
    })];

    let data = Record::new();
    let mut out = String::new();
    let err = Renderer::new(RenderMode::Runtime, &arena, &interner, &directives, &data)
        .with_templates(&templates)
        .render(&body, &mut out)
        .unwrap_err();
    assert_eq!(
        err.kind,
        RenderErrorKind::UndefinedTemplate {
            name: "ghost".to_owned()
        }
    );
}

#[test]
fn recursive_calls_hit_the_depth_guard() {
    let interner = StringInterner::new();
    let name = interner.intern("spin");

    let mut arena = NodeArena::new();
    let call = arena.alloc_node(NodeKind::Call {
        callee: name,
        params: vec![],
        pass_data: false,
    });
    let template = Template::new(name, arena.shared(), vec![call]);
    let mut templates = TemplateRegistry::new();
    templates.insert(template);

    let directives = builtin_registry(&interner);
    let mut caller_arena = NodeArena::new();
    let body = vec![caller_arena.alloc_node(NodeKind::Call {
        callee: name,
        params: vec![],
        pass_data: false,
    })];

    let data = Record::new();
    let mut out = String::new();
    let err = Renderer::new(
        RenderMode::Prerender,
        &caller_arena,
        &interner,
        &directives,
        &data,
    )
    .with_templates(&templates)
    .render(&body, &mut out)
    .unwrap_err();
    assert!(matches!(err.kind, RenderErrorKind::CallDepthExceeded { .. }));
}

#[test]
fn delegate_call_dispatches_through_facilities() {
    let interner = StringInterner::new();
    let templates = greeting_registry(&interner);
    let directives = builtin_registry(&interner);
    let facilities = TestFacilities {
        delegate_target: Some(interner.intern("greet")),
    };

    let mut arena = NodeArena::new();
    let value = arena.alloc_expr(ExprKind::Str(interner.intern("bob")));
    let body = vec![arena.alloc_node(NodeKind::CallDelegate {
        name: interner.intern("greeting.slot"),
        params: vec![CallParam {
            name: interner.intern("name"),
            value,
        }],
    })];

    let data = Record::new();
    let mut out = String::new();
    Renderer::new(RenderMode::Runtime, &arena, &interner, &directives, &data)
        .with_templates(&templates)
        .with_facilities(&facilities)
        .render(&body, &mut out)
        .unwrap();
    assert_eq!(out, "Hello, bob");
}

#[test]
fn delegate_call_without_implementation_fails() {
    let interner = StringInterner::new();
    let directives = builtin_registry(&interner);

    let mut arena = NodeArena::new();
    let body = vec![arena.alloc_node(NodeKind::CallDelegate {
        name: interner.intern("greeting.slot"),
        params: vec![],
    })];

    let data = Record::new();
    let mut out = String::new();
    let err = Renderer::new(RenderMode::Runtime, &arena, &interner, &directives, &data)
        .render(&body, &mut out)
        .unwrap_err();
    assert!(matches!(err.kind, RenderErrorKind::DelegateNotFound { .. }));
}

#[test]
fn msg_renders_source_content_without_a_catalog() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let hello = arena.alloc_node(NodeKind::RawText("Hello".to_owned()));
    let body = vec![arena.alloc_node(NodeKind::MsgFallbackGroup {
        id: 42,
        children: vec![hello],
    })];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "Hello");
}

#[test]
fn msg_prefers_the_catalog_translation() {
    let interner = StringInterner::new();
    let directives = builtin_registry(&interner);
    let facilities = TestFacilities {
        delegate_target: None,
    };

    let mut arena = NodeArena::new();
    let hello = arena.alloc_node(NodeKind::RawText("Hello".to_owned()));
    let body = vec![arena.alloc_node(NodeKind::MsgFallbackGroup {
        id: 42,
        children: vec![hello],
    })];

    let data = Record::new();
    let mut out = String::new();
    Renderer::new(RenderMode::Runtime, &arena, &interner, &directives, &data)
        .with_facilities(&facilities)
        .render(&body, &mut out)
        .unwrap();
    assert_eq!(out, "bonjour");
}

#[test]
fn css_ref_passes_through_without_a_renaming_map() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let body = vec![arena.alloc_node(NodeKind::CssRef {
        selector: interner.intern("menu-item"),
    })];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "menu-item");
}

#[test]
fn css_ref_uses_the_renaming_map() {
    let interner = StringInterner::new();
    let directives = builtin_registry(&interner);
    let facilities = TestFacilities {
        delegate_target: None,
    };

    let mut arena = NodeArena::new();
    let body = vec![arena.alloc_node(NodeKind::CssRef {
        selector: interner.intern("menu-item"),
    })];

    let data = Record::new();
    let mut out = String::new();
    Renderer::new(RenderMode::Runtime, &arena, &interner, &directives, &data)
        .with_facilities(&facilities)
        .render(&body, &mut out)
        .unwrap();
    assert_eq!(out, "menu-item-v2");
}

#[test]
fn log_goes_to_the_handler_not_the_output() {
    let interner = StringInterner::new();
    let directives = builtin_registry(&interner);
    let handler = buffer_handler();

    let mut arena = NodeArena::new();
    let msg = arena.alloc_node(NodeKind::RawText("debug info".to_owned()));
    let log = arena.alloc_node(NodeKind::Log {
        children: vec![msg],
    });
    let text = arena.alloc_node(NodeKind::RawText("visible".to_owned()));
    let body = vec![log, text];

    let data = Record::new();
    let mut out = String::new();
    Renderer::new(RenderMode::Runtime, &arena, &interner, &directives, &data)
        .with_log(&handler)
        .render(&body, &mut out)
        .unwrap();
    assert_eq!(out, "visible");
    assert_eq!(handler.get_output(), "debug info\n");
}

#[test]
fn debugger_is_a_runtime_no_op() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let body = vec![
        arena.alloc_node(NodeKind::Debugger),
        arena.alloc_node(NodeKind::RawText("after".to_owned())),
    ];
    let out = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new());
    assert_eq!(out.unwrap(), "after");
}

#[test]
fn prerender_matches_runtime_on_pure_content() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let name = arena.alloc_expr(ExprKind::Var(interner.intern("name")));
    let upper = print_with_directive(&mut arena, name, interner.intern("upper"));
    let text = arena.alloc_node(NodeKind::RawText("Hi ".to_owned()));
    let body = vec![text, upper];

    let data = Record::new().with("name", Value::str("ada"));
    let runtime = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &data).unwrap();
    let prerender =
        render_to_string(RenderMode::Prerender, &arena, &interner, &body, &data).unwrap();
    assert_eq!(prerender, runtime);
    assert_eq!(prerender, "Hi ADA");
}

#[test]
fn prerender_rejects_impure_directives_before_evaluating() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    // The expression would fail to evaluate; the purity check must win.
    let ghost = arena.alloc_expr(ExprKind::Var(interner.intern("ghost")));
    let body = vec![print_with_directive(
        &mut arena,
        ghost,
        interner.intern("bidi_wrap"),
    )];
    let err = render_to_string(RenderMode::Prerender, &arena, &interner, &body, &Record::new())
        .unwrap_err();
    assert_eq!(
        err.kind,
        RenderErrorKind::ImpurePrintDirective {
            name: "bidi_wrap".to_owned()
        }
    );
}

#[test]
fn prerender_treats_unregistered_directives_as_impure() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let value = arena.alloc_expr(ExprKind::Int(1));
    let body = vec![print_with_directive(
        &mut arena,
        value,
        interner.intern("mystery"),
    )];
    let err = render_to_string(RenderMode::Prerender, &arena, &interner, &body, &Record::new())
        .unwrap_err();
    assert!(matches!(err.kind, RenderErrorKind::ImpurePrintDirective { .. }));
}

#[test]
fn runtime_reports_unregistered_directives_as_undefined() {
    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let value = arena.alloc_expr(ExprKind::Int(1));
    let body = vec![print_with_directive(
        &mut arena,
        value,
        interner.intern("mystery"),
    )];
    let err = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new())
        .unwrap_err();
    assert_eq!(
        err.kind,
        RenderErrorKind::UndefinedDirective {
            name: "mystery".to_owned()
        }
    );
}

#[test]
fn prerender_fails_closed_on_injected_data() {
    let interner = StringInterner::new();
    let directives = builtin_registry(&interner);

    let mut arena = NodeArena::new();
    let ij = arena.alloc_expr(ExprKind::Ij(interner.intern("uid")));
    let body = vec![print_node(&mut arena, ij)];

    // Injected data is supplied but must still be unreadable.
    let data = Record::new();
    let injected = Record::new().with("uid", Value::int(1));
    let mut out = String::new();
    let err = Renderer::new(RenderMode::Prerender, &arena, &interner, &directives, &data)
        .with_ij(&injected)
        .render(&body, &mut out)
        .unwrap_err();
    assert_eq!(err.kind, RenderErrorKind::Evaluation);
}

#[test]
fn evaluation_failures_carry_their_cause() {
    use std::error::Error as _;

    let interner = StringInterner::new();
    let mut arena = NodeArena::new();
    let one = arena.alloc_expr(ExprKind::Int(1));
    let zero = arena.alloc_expr(ExprKind::Int(0));
    let divide = arena.alloc_expr(ExprKind::Binary {
        op: sable_ir::BinaryOp::Div,
        left: one,
        right: zero,
    });
    let body = vec![print_node(&mut arena, divide)];
    let err = render_to_string(RenderMode::Runtime, &arena, &interner, &body, &Record::new())
        .unwrap_err();
    assert_eq!(err.kind, RenderErrorKind::Evaluation);
    assert!(err.source().is_some());
}
