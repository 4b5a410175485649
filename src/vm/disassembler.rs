use crate::compiler::{JumpKind, Opcode};

use super::error::RuntimeError;
use super::reader::{ByteReader, read_function_table};

/// Renders a compiled byte stream as one mnemonic line per instruction.
///
/// Function bodies print under a `name:` header at one indent level per
/// `START_FRAME`/`RET` nesting step; the epilogue prints flush left. The
/// declared body length from the structure section decides where each
/// function's instructions end.
pub fn disassemble(bytecode: &[u8]) -> Result<String, RuntimeError> {
    let mut reader = ByteReader::new(bytecode);
    let functions = read_function_table(&mut reader)?;
    let epilogue = reader.position();

    let mut out = String::new();
    for function in &functions {
        out.push_str(&function.name);
        out.push_str(":\n");
        reader.seek(function.offset);
        let end = function.offset + function.length;
        let mut depth = 1;
        while reader.position() < end {
            let (opcode, text) = render_instruction(&mut reader)?;
            match opcode {
                Opcode::StartFrame => {
                    push_line(&mut out, depth, &text);
                    depth += 1;
                }
                Opcode::Ret => {
                    if depth > 1 {
                        depth -= 1;
                    }
                    push_line(&mut out, depth, &text);
                }
                _ => push_line(&mut out, depth, &text),
            }
        }
    }

    reader.seek(epilogue);
    loop {
        let (opcode, text) = render_instruction(&mut reader)?;
        push_line(&mut out, 0, &text);
        if opcode == Opcode::End {
            return Ok(out);
        }
    }
}

/// Decodes one instruction and renders its mnemonic plus operands.
fn render_instruction(reader: &mut ByteReader) -> Result<(Opcode, String), RuntimeError> {
    let opcode = reader.read_opcode()?;
    let text = match opcode {
        Opcode::PushInt => format!("{} {}", opcode.mnemonic(), reader.read_i64()?),
        Opcode::PushBool => format!("{} {}", opcode.mnemonic(), reader.read_u16()?),
        Opcode::PushString => format!("{} {:?}", opcode.mnemonic(), reader.read_str()?),

        Opcode::Call | Opcode::Load | Opcode::Let | Opcode::Mark => {
            format!("{} {}", opcode.mnemonic(), reader.read_str()?)
        }

        Opcode::Jump => {
            let kind = reader.read_jump_kind()?;
            match kind {
                JumpKind::RelativeBytes => format!(
                    "{} {} {}",
                    opcode.mnemonic(),
                    kind.mnemonic(),
                    reader.read_u64()?
                ),
                JumpKind::Marker => format!(
                    "{} {} {}",
                    opcode.mnemonic(),
                    kind.mnemonic(),
                    reader.read_str()?
                ),
            }
        }

        other => other.mnemonic().to_string(),
    };
    Ok((opcode, text))
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("    ");
    }
    out.push_str(text);
    out.push('\n');
}

#[cfg(test)]
#[path = "disassembler_test.rs"]
mod disassembler_test;
