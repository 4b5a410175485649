//! Tests for the statement-by-statement type checker

use super::TypeChecker;
use crate::analyzer::{Expression, TypeError};
use crate::syntax::Expr;
use crate::test_utils::*;
use crate::types::{Monotype, Polytype, tag};
use pretty_assertions::assert_eq;

#[test]
fn test_minimal_program_checks() {
    init_test_logging();
    let source = program(vec![fun("main", "int", vec![], vec![ret(int(0))])]);

    assert!(TypeChecker::new().check(&source).is_ok());
}

#[test]
fn test_builtins_register_ahead_of_declared_functions() {
    let source = program(vec![fun("main", "int", vec![], vec![ret(int(0))])]);
    let checked = TypeChecker::new().check(&source).unwrap();

    assert_eq!(checked.functions[0].name, "echo");
    assert_eq!(checked.functions[1].name, "main");
}

#[test]
fn test_function_signatures_are_curried() {
    let source = program(vec![
        fun(
            "pick",
            "int",
            vec![param("left", "int"), param("right", "int")],
            vec![ret(var("left"))],
        ),
        fun("main", "int", vec![], vec![ret(call("pick", vec![int(1), int(2)]))]),
    ]);
    let checked = TypeChecker::new().check(&source).unwrap();

    let int = Monotype::nullary(tag::INT);
    assert_eq!(
        checked.context.get("pick"),
        Some(&Polytype::Mono(Monotype::function(
            int.clone(),
            Monotype::function(int.clone(), int),
        ))),
    );
}

#[test]
fn test_arguments_bind_inside_the_function_scope() {
    let source = program(vec![
        fun("id", "int", vec![param("n", "int")], vec![ret(var("n"))]),
        fun("main", "int", vec![], vec![ret(call("id", vec![int(7)]))]),
    ]);
    let checked = TypeChecker::new().check(&source).unwrap();

    assert_eq!(
        checked.context.get("id.n"),
        Some(&Polytype::Mono(Monotype::nullary(tag::INT))),
    );
}

#[test]
fn test_unknown_variable_fails_with_scoped_name() {
    let source = program(vec![fun("main", "int", vec![], vec![ret(var("nope"))])]);
    let result = TypeChecker::new().check(&source);

    assert_eq!(
        result.unwrap_err().to_string(),
        "Variable 'main.nope' does not exist",
    );
}

#[test]
fn test_redeclaration_fails() {
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![let_("x", int(1)), let_("x", int(2)), ret(var("x"))],
    )]);

    assert_eq!(
        TypeChecker::new().check(&source).unwrap_err(),
        TypeError::RedeclaredVariable { name: "x".into() },
    );
}

#[test]
fn test_redeclaration_in_child_scope_fails() {
    // Shadowing is not a thing; the inner definition sees the outer one.
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![
            let_("x", int(1)),
            if_(boolean(true), vec![let_("x", int(2))]),
            ret(var("x")),
        ],
    )]);

    assert_eq!(
        TypeChecker::new().check(&source).unwrap_err(),
        TypeError::RedeclaredVariable { name: "x".into() },
    );
}

#[test]
fn test_reassigning_undeclared_variable_fails() {
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![assign("x", int(1)), ret(int(0))],
    )]);

    assert_eq!(
        TypeChecker::new().check(&source).unwrap_err(),
        TypeError::UndeclaredReassignment { name: "x".into() },
    );
}

#[test]
fn test_reassignment_keeps_the_declared_type() {
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![let_("x", int(1)), assign("x", str_("s")), ret(var("x"))],
    )]);

    assert_eq!(
        TypeChecker::new().check(&source).unwrap_err(),
        TypeError::ConstructorMismatch {
            left: "int".into(),
            right: "string".into(),
        },
    );
}

#[test]
fn test_condition_must_be_boolean() {
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![if_(int(1), vec![]), ret(int(0))],
    )]);
    let result = TypeChecker::new().check(&source);

    assert_eq!(
        result.unwrap_err().to_string(),
        "Failed to unify types, different type constructors 'bool' and 'int'",
    );
}

#[test]
fn test_return_type_mismatch_names_the_function() {
    let source = program(vec![
        fun("foo", "bool", vec![], vec![ret(int(1))]),
        fun("main", "int", vec![], vec![ret(int(0))]),
    ]);
    let result = TypeChecker::new().check(&source);

    assert_eq!(
        result.unwrap_err().to_string(),
        "Function \"foo\" was expected to have return type \"bool\", found \"int\"",
    );
}

#[test]
fn test_bare_return_satisfies_unit() {
    let source = program(vec![
        fun("noop", "unit", vec![], vec![ret_unit()]),
        fun("main", "int", vec![], vec![ret(int(0))]),
    ]);

    assert!(TypeChecker::new().check(&source).is_ok());
}

#[test]
fn test_recursive_calls_check_against_the_registered_signature() {
    let source = program(vec![
        fun(
            "fib",
            "int",
            vec![param("n", "int")],
            vec![
                if_(lt(var("n"), int(2)), vec![ret(var("n"))]),
                ret(add(
                    call("fib", vec![sub(var("n"), int(1))]),
                    call("fib", vec![sub(var("n"), int(2))]),
                )),
            ],
        ),
        fun("main", "int", vec![], vec![ret(call("fib", vec![int(8)]))]),
    ]);

    assert!(TypeChecker::new().check(&source).is_ok());
}

#[test]
fn test_missing_arguments_are_rejected() {
    // A partial application would be a perfectly fine lambda term, so the
    // call-site pass has to enforce the declared count.
    let source = program(vec![
        fun(
            "add2",
            "int",
            vec![param("a", "int"), param("b", "int")],
            vec![ret(add(var("a"), var("b")))],
        ),
        fun(
            "main",
            "int",
            vec![],
            vec![expr_stmt(call("add2", vec![int(1)])), ret(int(0))],
        ),
    ]);
    let result = TypeChecker::new().check(&source);

    assert_eq!(
        result.unwrap_err().to_string(),
        "Wrong number of arguments to 'add2'",
    );
}

#[test]
fn test_extra_arguments_name_the_function() {
    // The call-site pass runs ahead of inference, so the error names the
    // over-applied function instead of reporting a unification failure.
    let source = program(vec![
        fun("zero", "int", vec![], vec![ret(int(0))]),
        fun("main", "int", vec![], vec![ret(call("zero", vec![int(1)]))]),
    ]);

    assert_eq!(
        TypeChecker::new().check(&source).unwrap_err(),
        TypeError::WrongArgumentCount {
            function: "zero".into(),
        },
    );
}

#[test]
fn test_argument_counts_are_checked_inside_loops() {
    let source = program(vec![
        fun(
            "tick",
            "int",
            vec![param("a", "int"), param("b", "int")],
            vec![ret(var("a"))],
        ),
        fun(
            "main",
            "int",
            vec![],
            vec![
                while_(boolean(false), vec![expr_stmt(call("tick", vec![int(1)]))]),
                ret(int(0)),
            ],
        ),
    ]);

    assert_eq!(
        TypeChecker::new().check(&source).unwrap_err(),
        TypeError::WrongArgumentCount {
            function: "tick".into(),
        },
    );
}

#[test]
fn test_grouped_callee_is_rejected_by_the_call_site_pass() {
    let source = program(vec![
        fun("zero", "int", vec![], vec![ret(int(0))]),
        fun(
            "main",
            "int",
            vec![],
            vec![ret(Expr::Call {
                callee: Box::new(group(var("zero"))),
                arguments: vec![],
            })],
        ),
    ]);

    assert_eq!(
        TypeChecker::new().check(&source).unwrap_err(),
        TypeError::NonIdentifierCallee,
    );
}

#[test]
fn test_unknown_callee_surfaces_as_unbound_variable() {
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![ret(call("missing", vec![]))],
    )]);

    assert_eq!(
        TypeChecker::new().check(&source).unwrap_err(),
        TypeError::UnboundVariable {
            name: "main.missing".into(),
        },
    );
}

#[test]
fn test_block_value_takes_the_type_of_its_first_return() {
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![let_("x", block_expr(vec![ret(int(5))])), ret(var("x"))],
    )]);

    assert!(TypeChecker::new().check(&source).is_ok());
}

#[test]
fn test_block_value_first_return_descends_into_ifs() {
    // The first return in order wins, even through an if body; later
    // returns do not participate in the block's type.
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![
            let_(
                "x",
                block_expr(vec![
                    if_(boolean(true), vec![ret(int(5))]),
                    ret(str_("unreached")),
                ]),
            ),
            ret(var("x")),
        ],
    )]);

    assert!(TypeChecker::new().check(&source).is_ok());
}

#[test]
fn test_block_value_without_return_is_unit() {
    let source = program(vec![fun(
        "main",
        "unit",
        vec![],
        vec![let_("x", block_expr(vec![let_("y", int(1))])), ret_unit()],
    )]);

    assert!(TypeChecker::new().check(&source).is_ok());
}

#[test]
fn test_equality_accepts_mixed_operand_types() {
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![if_(eq(int(1), str_("one")), vec![]), ret(int(0))],
    )]);

    assert!(TypeChecker::new().check(&source).is_ok());
}

#[test]
fn test_transient_scope_names_count_up() {
    let source = program(vec![fun(
        "main",
        "int",
        vec![],
        vec![
            let_("i", int(0)),
            while_(lt(var("i"), int(1)), vec![let_("j", var("i"))]),
            if_(boolean(true), vec![let_("k", int(2))]),
            ret(var("i")),
        ],
    )]);
    let checked = TypeChecker::new().check(&source).unwrap();

    assert!(checked.context.get("main.while1.j").is_some());
    assert!(checked.context.get("main.if2.k").is_some());
}

// Lowering internals, driven directly against a checker instance.

fn checker_with_main_scope() -> (TypeChecker, super::ScopeId) {
    let mut checker = TypeChecker::new();
    let root = checker.scopes.root();
    let scope = checker.scopes.child(root, "main");
    (checker, scope)
}

#[test]
fn test_lowering_literals_erase_their_values() {
    let (mut checker, scope) = checker_with_main_scope();

    let lowered = checker.lower_expression(scope, &int(42), None).unwrap();
    assert_eq!(lowered, Expression::variable("int"));

    let lowered = checker.lower_expression(scope, &str_("s"), None).unwrap();
    assert_eq!(lowered, Expression::variable("string"));

    let lowered = checker.lower_expression(scope, &boolean(true), None).unwrap();
    assert_eq!(lowered, Expression::variable("bool"));
}

#[test]
fn test_lowering_definition_registers_the_name() {
    let (mut checker, scope) = checker_with_main_scope();

    let lowered = checker
        .lower_statement(scope, &let_("x", int(1)), None)
        .unwrap();

    assert_eq!(lowered, Expression::variable("int"));
    assert_eq!(checker.scopes.lookup(scope, "x"), Some("main.x"));
}

#[test]
fn test_lowering_reassignment_applies_the_reassignment_operator() {
    let (mut checker, scope) = checker_with_main_scope();
    checker.scopes.register(scope, "x");

    let lowered = checker
        .lower_statement(scope, &assign("x", int(2)), None)
        .unwrap();

    assert_eq!(
        lowered,
        Expression::application(
            Expression::application(
                Expression::variable(tag::REASSIGNMENT),
                Expression::variable("main.x"),
            ),
            Expression::variable("int"),
        ),
    );
}

#[test]
fn test_lowering_binary_operators_curry_their_operands() {
    let (mut checker, scope) = checker_with_main_scope();

    let lowered = checker
        .lower_expression(scope, &add(int(1), int(2)), None)
        .unwrap();

    assert_eq!(
        lowered,
        Expression::application(
            Expression::application(
                Expression::variable(tag::INT_ADDITION),
                Expression::variable("int"),
            ),
            Expression::variable("int"),
        ),
    );
}

#[test]
fn test_lowering_return_binds_the_value() {
    let (mut checker, scope) = checker_with_main_scope();

    let lowered = checker
        .lower_statement(scope, &ret(int(1)), None)
        .unwrap();

    assert_eq!(
        lowered,
        Expression::binding("ret", Expression::variable("int"), Expression::variable("ret")),
    );
}

#[test]
fn test_lowering_break_leaves_unit() {
    let (mut checker, scope) = checker_with_main_scope();

    let lowered = checker
        .lower_statement(scope, &crate::syntax::Statement::Break, None)
        .unwrap();

    assert_eq!(lowered, Expression::variable("unit"));
}

#[test]
fn test_lowering_call_folds_arguments_left_to_right() {
    let (mut checker, scope) = checker_with_main_scope();
    let root = checker.scopes.root();
    checker.scopes.register(root, "f");

    let lowered = checker
        .lower_expression(scope, &call("f", vec![int(1), str_("s")]), None)
        .unwrap();

    assert_eq!(
        lowered,
        Expression::application(
            Expression::application(Expression::variable("f"), Expression::variable("int")),
            Expression::variable("string"),
        ),
    );
}

#[test]
fn test_lowering_call_with_continuation_wraps_in_a_binding() {
    let (mut checker, scope) = checker_with_main_scope();
    let root = checker.scopes.root();
    checker.scopes.register(root, "f");
    let continuation = Expression::variable("unit");

    let lowered = checker
        .lower_expression(scope, &call("f", vec![int(1)]), Some(&continuation))
        .unwrap();

    assert_eq!(
        lowered,
        Expression::binding(
            "_let1",
            Expression::application(Expression::variable("f"), Expression::variable("int")),
            Expression::variable("unit"),
        ),
    );
}

#[test]
fn test_lowering_unwraps_one_layer_of_callee_parentheses() {
    let (mut checker, scope) = checker_with_main_scope();
    let root = checker.scopes.root();
    checker.scopes.register(root, "f");

    let lowered = checker
        .lower_expression(
            scope,
            &Expr::Call {
                callee: Box::new(group(var("f"))),
                arguments: vec![],
            },
            None,
        )
        .unwrap();

    assert_eq!(lowered, Expression::variable("f"));
}

#[test]
fn test_lowering_rejects_literal_callees() {
    let (mut checker, scope) = checker_with_main_scope();

    let result = checker.lower_expression(
        scope,
        &Expr::Call {
            callee: Box::new(int(1)),
            arguments: vec![],
        },
        None,
    );

    assert_eq!(result, Err(TypeError::UnsupportedCallee));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Cannot call function on this type",
    );
}
