//! Tests for the bytecode disassembler

use expect_test::{Expect, expect};

use crate::analyzer::TypeChecker;
use crate::compiler::compile;
use crate::syntax::Program;
use crate::test_utils::*;

use super::disassemble;

fn check(source: &Program, expected: Expect) {
    let checked = TypeChecker::new().check(source).unwrap();
    let bytes = compile(&checked).unwrap();
    expected.assert_eq(&disassemble(&bytes).unwrap());
}

#[test]
fn test_disassembles_arithmetic() {
    check(
        &program(vec![fun(
            "main",
            "int",
            vec![],
            vec![ret(add(int(4), int(5)))],
        )]),
        expect![[r#"
            echo:
                LOAD value
                ECHO
                RET
            main:
                PUSH_INT 4
                PUSH_INT 5
                ADD
                RET
            CALL main
            END
        "#]],
    );
}

#[test]
fn test_disassembles_branches() {
    check(
        &program(vec![fun(
            "main",
            "int",
            vec![],
            vec![
                let_("x", int(1)),
                if_(boolean(true), vec![assign("x", int(5))]),
                ret(var("x")),
            ],
        )]),
        expect![[r#"
            echo:
                LOAD value
                ECHO
                RET
            main:
                PUSH_INT 1
                LET x
                PUSH_BOOL 1
                PUSH_INT 0
                JUMP RELATIVE_BYTES 21
                PUSH_INT 5
                LET x
                LOAD x
                RET
            CALL main
            END
        "#]],
    );
}

#[test]
fn test_indents_nested_frames() {
    check(
        &program(vec![fun(
            "main",
            "int",
            vec![],
            vec![
                let_("x", block_expr(vec![ret(int(6))])),
                ret(var("x")),
            ],
        )]),
        expect![[r#"
            echo:
                LOAD value
                ECHO
                RET
            main:
                START_FRAME
                    PUSH_INT 6
                RET
                LET x
                LOAD x
                RET
            CALL main
            END
        "#]],
    );
}

#[test]
fn test_disassembles_loops() {
    check(
        &program(vec![fun(
            "main",
            "int",
            vec![],
            vec![
                let_("i", int(0)),
                while_(
                    lt(var("i"), int(2)),
                    vec![assign("i", add(var("i"), int(1)))],
                ),
                ret(var("i")),
            ],
        )]),
        expect![[r#"
            echo:
                LOAD value
                ECHO
                RET
            main:
                PUSH_INT 0
                LET i
                MARK while0
                LOAD i
                PUSH_INT 2
                LT
                MARK while0break
                PUSH_INT 0
                JUMP RELATIVE_BYTES 62
                LOAD i
                PUSH_INT 1
                ADD
                LET i
                PUSH_INT 1
                JUMP MARKER while0
                LOAD i
                RET
            CALL main
            END
        "#]],
    );
}

#[test]
fn test_quotes_string_operands() {
    check(
        &program(vec![fun(
            "main",
            "unit",
            vec![],
            vec![expr_stmt(call("echo", vec![str_("AB")])), ret_unit()],
        )]),
        expect![[r#"
            echo:
                LOAD value
                ECHO
                RET
            main:
                PUSH_STRING "AB"
                CALL echo
                PUSH_UNIT
                RET
            CALL main
            END
        "#]],
    );
}
