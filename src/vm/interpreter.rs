use std::io;

use crate::compiler::{JumpKind, JumpMode, Opcode};

use super::error::RuntimeError;
use super::frame::{FrameStack, StackFrame};
use super::reader::{ByteReader, FunctionRecord, read_function_table};
use super::value::Value;

/// Executes a compiled byte stream against a caller-supplied output sink.
///
/// Instructions are decoded on the fly from the stream; the interpreter owns
/// the call stack and a single program counter. One interpreter runs one
/// program to completion.
pub struct Interpreter<'b, 'w> {
    reader: ByteReader<'b>,
    functions: Vec<FunctionRecord>,
    frames: FrameStack,
    output: &'w mut dyn io::Write,
    max_call_depth: usize,
}

impl<'b, 'w> Interpreter<'b, 'w> {
    pub fn new(bytecode: &'b [u8], output: &'w mut dyn io::Write, max_call_depth: usize) -> Self {
        Interpreter {
            reader: ByteReader::new(bytecode),
            functions: Vec::new(),
            frames: FrameStack::new(),
            output,
            max_call_depth,
        }
    }

    /// Runs the program to the top-level `END` and returns its exit code.
    pub fn run(mut self) -> Result<i64, RuntimeError> {
        self.functions = read_function_table(&mut self.reader)?;
        loop {
            let opcode = self.reader.read_opcode()?;
            tracing::trace!(
                opcode = opcode.mnemonic(),
                offset = self.reader.position(),
                "dispatch"
            );
            match opcode {
                Opcode::PushInt => {
                    let value = self.reader.read_i64()?;
                    self.frames.push_value(Value::Integer(value));
                }
                Opcode::PushString => {
                    let value = self.reader.read_str()?;
                    self.frames.push_value(Value::String(value));
                }
                Opcode::PushBool => {
                    // Any non-zero operand counts as true.
                    let raw = self.reader.read_u16()?;
                    self.frames.push_value(Value::Boolean(raw != 0));
                }
                Opcode::PushUnit => self.frames.push_value(Value::Unit),

                Opcode::Load => {
                    let name = self.reader.read_str()?;
                    let Some(value) = self.frames.read_named(&name) else {
                        return Err(RuntimeError::UnknownName { name });
                    };
                    let value = value.clone();
                    self.frames.push_value(value);
                }
                Opcode::Let => {
                    let name = self.reader.read_str()?;
                    let value = self.pop(Opcode::Let)?;
                    self.frames.write_named(&name, value);
                }

                Opcode::Mark => {
                    let name = self.reader.read_str()?;
                    self.frames.record_marker(name, self.reader.position());
                }
                Opcode::Jump => self.jump()?,

                Opcode::Call => self.call()?,
                Opcode::StartFrame => {
                    let frame = StackFrame::nested(self.frames.current_id());
                    self.push_frame(frame)?;
                }
                Opcode::Ret => self.ret()?,

                Opcode::Echo => self.echo()?,

                Opcode::Add => self.int_arithmetic(opcode, i64::wrapping_add)?,
                Opcode::Sub => self.int_arithmetic(opcode, i64::wrapping_sub)?,
                Opcode::NegateInt => {
                    let value = self.pop_int(opcode)?;
                    self.frames.push_value(Value::Integer(value.wrapping_neg()));
                }
                Opcode::NegateBool => {
                    let value = self.pop_bool(opcode)?;
                    self.frames.push_value(Value::Boolean(!value));
                }

                Opcode::GreaterThan => self.int_comparison(opcode, |l, r| l > r)?,
                Opcode::GreaterThanEqual => self.int_comparison(opcode, |l, r| l >= r)?,
                Opcode::LessThan => self.int_comparison(opcode, |l, r| l < r)?,
                Opcode::LessThanEqual => self.int_comparison(opcode, |l, r| l <= r)?,
                Opcode::Equals => {
                    let right = self.pop(opcode)?;
                    let left = self.pop(opcode)?;
                    self.frames.push_value(Value::Boolean(left == right));
                }

                Opcode::End => return self.exit_code(),
            }
        }
    }

    /// Exit value left for the global frame. A `unit` return from `main`
    /// exits cleanly.
    fn exit_code(&mut self) -> Result<i64, RuntimeError> {
        match self.pop(Opcode::End)? {
            Value::Integer(code) => Ok(code),
            Value::Unit => Ok(0),
            other => Err(RuntimeError::BadExitValue {
                actual: other.kind(),
            }),
        }
    }

    fn jump(&mut self) -> Result<(), RuntimeError> {
        let target = match self.reader.read_jump_kind()? {
            JumpKind::RelativeBytes => JumpTarget::Relative(self.reader.read_u64()? as usize),
            JumpKind::Marker => JumpTarget::Marker(self.reader.read_str()?),
        };
        let flag = self.pop_int(Opcode::Jump)?;
        let Some(mode) = JumpMode::from_flag(flag) else {
            return Err(RuntimeError::UnknownJumpMode { flag });
        };
        let taken = match mode {
            JumpMode::Always => true,
            JumpMode::IfFalse => !self.pop_bool(Opcode::Jump)?,
        };
        if !taken {
            return Ok(());
        }
        match target {
            // Relative targets count from the end of the jump's operands.
            JumpTarget::Relative(count) => self.reader.skip(count),
            JumpTarget::Marker(name) => {
                let Some(offset) = self.frames.marker(&name) else {
                    return Err(RuntimeError::UnknownMarker { name });
                };
                self.reader.seek(offset);
            }
        }
        Ok(())
    }

    fn call(&mut self) -> Result<(), RuntimeError> {
        let name = self.reader.read_str()?;
        let return_offset = self.reader.position();
        let Some(record) = self.functions.iter().find(|f| f.name == name) else {
            return Err(RuntimeError::UnknownFunction { name });
        };
        tracing::debug!(function = %record.name, "call");
        let arguments = record.arguments.clone();
        let body_offset = record.offset;

        let caller = self.frames.current_id();
        let parent = self.frames.get(caller).parent();
        let mut frame = StackFrame::call(parent, caller, return_offset);
        // Arguments sit on the caller's stack in declaration order, so the
        // last one is on top.
        for argument in arguments.into_iter().rev() {
            let value = self.pop(Opcode::Call)?;
            frame.bind(argument, value);
        }
        self.push_frame(frame)?;
        self.reader.seek(body_offset);
        Ok(())
    }

    fn ret(&mut self) -> Result<(), RuntimeError> {
        let opcode = Opcode::Ret.mnemonic();
        let Some(mut frame) = self.frames.pop() else {
            return Err(RuntimeError::FrameUnderflow { opcode });
        };
        let Some(value) = frame.pop_value() else {
            return Err(RuntimeError::StackUnderflow { opcode });
        };
        if let Some(offset) = frame.return_offset() {
            self.reader.seek(offset);
        }
        match frame.previous() {
            Some(previous) => self.frames.get_mut(previous).push_value(value),
            None => return Err(RuntimeError::FrameUnderflow { opcode }),
        }
        Ok(())
    }

    /// Prints the string on top of the stack without consuming it; the
    /// value doubles as the surrounding call frame's return value.
    fn echo(&mut self) -> Result<(), RuntimeError> {
        let opcode = Opcode::Echo.mnemonic();
        let Some(value) = self.frames.peek_value() else {
            return Err(RuntimeError::StackUnderflow { opcode });
        };
        let Value::String(text) = value else {
            return Err(RuntimeError::OperandMismatch {
                opcode,
                expected: "string",
                actual: value.kind(),
            });
        };
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn push_frame(&mut self, frame: StackFrame) -> Result<(), RuntimeError> {
        if self.frames.depth() >= self.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                limit: self.max_call_depth,
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    fn int_arithmetic(&mut self, opcode: Opcode, apply: fn(i64, i64) -> i64) -> Result<(), RuntimeError> {
        let right = self.pop_int(opcode)?;
        let left = self.pop_int(opcode)?;
        self.frames.push_value(Value::Integer(apply(left, right)));
        Ok(())
    }

    fn int_comparison(&mut self, opcode: Opcode, apply: fn(i64, i64) -> bool) -> Result<(), RuntimeError> {
        let right = self.pop_int(opcode)?;
        let left = self.pop_int(opcode)?;
        self.frames.push_value(Value::Boolean(apply(left, right)));
        Ok(())
    }

    fn pop(&mut self, opcode: Opcode) -> Result<Value, RuntimeError> {
        self.frames.pop_value().ok_or(RuntimeError::StackUnderflow {
            opcode: opcode.mnemonic(),
        })
    }

    fn pop_int(&mut self, opcode: Opcode) -> Result<i64, RuntimeError> {
        match self.pop(opcode)? {
            Value::Integer(value) => Ok(value),
            other => Err(RuntimeError::OperandMismatch {
                opcode: opcode.mnemonic(),
                expected: "integer",
                actual: other.kind(),
            }),
        }
    }

    fn pop_bool(&mut self, opcode: Opcode) -> Result<bool, RuntimeError> {
        match self.pop(opcode)? {
            Value::Boolean(value) => Ok(value),
            other => Err(RuntimeError::OperandMismatch {
                opcode: opcode.mnemonic(),
                expected: "boolean",
                actual: other.kind(),
            }),
        }
    }
}

enum JumpTarget {
    Relative(usize),
    Marker(String),
}

#[cfg(test)]
#[path = "interpreter_test.rs"]
mod interpreter_test;
