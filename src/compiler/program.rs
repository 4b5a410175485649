use crate::analyzer::{CheckedProgram, RegisteredKind};

use super::error::CompileError;
use super::function::FunctionCompiler;
use super::opcode::{Opcode, StructureTag};
use super::writer::{encode_op, encode_op_str, encode_str, encode_u16, encode_u64};

/// Compiles a checked program into the full wire format.
///
/// The output starts with the structure section: one record per registered
/// function (builtins first) carrying its name, argument names and
/// length-prefixed body bytes, closed by an end tag. The epilogue calls
/// `main` and ends the program with whatever `main` returned as the exit
/// value.
pub fn compile(checked: &CheckedProgram) -> Result<Vec<u8>, CompileError> {
    if checked.function("main").is_none() {
        return Err(CompileError::MissingMain);
    }

    let mut bytes = Vec::new();
    for function in &checked.functions {
        let body = match &function.kind {
            RegisteredKind::Builtin(builtin) => builtin.bytecode.clone(),
            RegisteredKind::Declared(index) => {
                FunctionCompiler::new().compile(&checked.program.functions[*index])?
            }
        };

        bytes.extend(encode_u16(StructureTag::Function as u16));
        bytes.extend(encode_str(&function.name));
        bytes.extend(encode_u16(function.arguments.len() as u16));
        for argument in &function.arguments {
            bytes.extend(encode_str(argument));
        }
        bytes.extend(encode_u64(body.len() as u64));
        bytes.extend(body);
    }
    bytes.extend(encode_u16(StructureTag::End as u16));

    bytes.extend(encode_op_str(Opcode::Call, "main"));
    bytes.extend(encode_op(Opcode::End));
    Ok(bytes)
}

#[cfg(test)]
#[path = "program_test.rs"]
mod program_test;
