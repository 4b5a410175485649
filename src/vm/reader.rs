use crate::compiler::{JumpKind, Opcode, StructureTag};

use super::error::RuntimeError;

/// Cursor over a bytecode stream.
///
/// All multi-byte reads are little-endian, matching the writer. Reads past
/// the end fail with the offset they were attempted at.
#[derive(Debug)]
pub struct ByteReader<'b> {
    bytes: &'b [u8],
    position: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(bytes: &'b [u8]) -> Self {
        ByteReader { bytes, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Moves forward without reading. Skipping past the end is not an error
    /// until the next read.
    pub fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    fn take(&mut self, count: usize) -> Result<&'b [u8], RuntimeError> {
        let end = self
            .position
            .checked_add(count)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(RuntimeError::TruncatedStream {
                offset: self.position,
            })?;
        let bytes = &self.bytes[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    pub fn read_u16(&mut self) -> Result<u16, RuntimeError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, RuntimeError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    /// Integer operands travel as `u64`; the value is the two's-complement
    /// reinterpretation.
    pub fn read_i64(&mut self) -> Result<i64, RuntimeError> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_str(&mut self) -> Result<String, RuntimeError> {
        let offset = self.position;
        let length = self.read_u64()? as usize;
        let bytes = self.take(length)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| RuntimeError::MalformedString { offset })
    }

    pub fn read_opcode(&mut self) -> Result<Opcode, RuntimeError> {
        let offset = self.position;
        let raw = self.read_u16()?;
        Opcode::try_from(raw).map_err(|opcode| RuntimeError::UnknownOpcode { opcode, offset })
    }

    pub fn read_jump_kind(&mut self) -> Result<JumpKind, RuntimeError> {
        let offset = self.position;
        let raw = self.read_u16()?;
        JumpKind::try_from(raw).map_err(|kind| RuntimeError::UnknownJumpKind { kind, offset })
    }

    pub fn read_structure_tag(&mut self) -> Result<StructureTag, RuntimeError> {
        let offset = self.position;
        let raw = self.read_u16()?;
        StructureTag::try_from(raw).map_err(|tag| RuntimeError::UnknownStructureTag { tag, offset })
    }
}

/// A function parsed out of the structure section.
#[derive(Debug)]
pub struct FunctionRecord {
    pub name: String,
    /// Argument names in declaration order.
    pub arguments: Vec<String>,
    /// Offset of the body's first instruction within the stream.
    pub offset: usize,
    /// Body length in bytes.
    pub length: usize,
}

/// Reads the structure section, registering each function in stream order
/// and leaving the reader at the first epilogue instruction. Bodies are
/// skipped, not decoded.
pub fn read_function_table(reader: &mut ByteReader) -> Result<Vec<FunctionRecord>, RuntimeError> {
    let mut functions = Vec::new();
    loop {
        match reader.read_structure_tag()? {
            StructureTag::End => return Ok(functions),
            StructureTag::Function => {
                let name = reader.read_str()?;
                let argument_count = reader.read_u16()?;
                let mut arguments = Vec::with_capacity(argument_count as usize);
                for _ in 0..argument_count {
                    arguments.push(reader.read_str()?);
                }
                let length = reader.read_u64()? as usize;
                let offset = reader.position();
                reader.skip(length);
                functions.push(FunctionRecord {
                    name,
                    arguments,
                    offset,
                    length,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod reader_test;
