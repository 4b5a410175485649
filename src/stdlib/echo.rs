use crate::compiler::{Opcode, encode_op, encode_op_str};
use crate::types::{Monotype, Polytype, tag};

use super::Builtin;

/// `echo(value)`: writes the string on top of the operand stack to the
/// program's output sink. The operand is peeked rather than popped, so the
/// string survives as the call's result.
pub(super) fn builtin() -> Builtin {
    let mut bytecode = encode_op_str(Opcode::Load, "value");
    bytecode.extend(encode_op(Opcode::Echo));
    bytecode.extend(encode_op(Opcode::Ret));

    Builtin {
        name: "echo",
        arguments: &["value"],
        scheme: Polytype::quantifier(
            "t",
            Polytype::Mono(Monotype::function(
                Monotype::variable("t"),
                Monotype::nullary(tag::UNIT),
            )),
        ),
        bytecode,
    }
}

#[cfg(test)]
#[path = "echo_test.rs"]
mod echo_test;
