use super::error::CompileError;
use super::opcode::Opcode;

/// Buffers instruction byte strings during function compilation.
///
/// A group collects instructions whose total length has to be known before
/// they land in the stream; ending the group hands the buffered instructions
/// back so the caller can emit a forward jump over them first. Groups nest,
/// writes always go to the innermost open group.
#[derive(Debug, Default)]
pub struct InstructionWriter {
    instructions: Vec<Vec<u8>>,
    groups: Vec<Vec<Vec<u8>>>,
}

impl InstructionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, instruction: Vec<u8>) {
        match self.groups.last_mut() {
            Some(group) => group.push(instruction),
            None => self.instructions.push(instruction),
        }
    }

    pub fn start_group(&mut self) {
        self.groups.push(Vec::new());
    }

    pub fn end_group(&mut self) -> Result<Vec<Vec<u8>>, CompileError> {
        self.groups.pop().ok_or(CompileError::NoOpenGroup)
    }

    pub fn finish(self) -> Result<Vec<u8>, CompileError> {
        if !self.groups.is_empty() {
            return Err(CompileError::UnfinishedGroup);
        }
        Ok(self.instructions.concat())
    }
}

pub(crate) fn encode_u16(value: u16) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub(crate) fn encode_u64(value: u64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// Length-prefixed string: a `u64` byte count followed by the raw bytes.
pub(crate) fn encode_str(text: &str) -> Vec<u8> {
    let mut out = encode_u64(text.len() as u64);
    out.extend_from_slice(text.as_bytes());
    out
}

pub(crate) fn encode_op(opcode: Opcode) -> Vec<u8> {
    encode_u16(opcode as u16)
}

pub(crate) fn encode_op_u16(opcode: Opcode, value: u16) -> Vec<u8> {
    let mut out = encode_op(opcode);
    out.extend(encode_u16(value));
    out
}

pub(crate) fn encode_op_u64(opcode: Opcode, value: u64) -> Vec<u8> {
    let mut out = encode_op(opcode);
    out.extend(encode_u64(value));
    out
}

pub(crate) fn encode_op_str(opcode: Opcode, text: &str) -> Vec<u8> {
    let mut out = encode_op(opcode);
    out.extend(encode_str(text));
    out
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod writer_test;
