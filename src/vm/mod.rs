//! Stack-based virtual machine for the compiled wire format.
//!
//! [`Interpreter`] loads the structure section into a function table and
//! then dispatches opcodes straight off the byte stream. Call frames carry
//! their own operand stack, named bindings and jump markers; named-value
//! resolution walks the frame parent chain, which is what makes reassignment
//! inside nested blocks visible outside them while keeping callees away from
//! caller locals. [`disassemble`] is the matching read path for humans.

mod disassembler;
mod error;
mod frame;
mod interpreter;
mod reader;
mod value;

pub use disassembler::disassemble;
pub use error::RuntimeError;
pub use interpreter::Interpreter;
pub use value::Value;
