//! Bytecode emission.
//!
//! Forward jumps are resolved by grouping: a branch body is written into a
//! buffered instruction group first, so its byte length is known by the time
//! the jump that skips it is emitted. Nothing is ever backpatched.

mod error;
mod function;
mod opcode;
mod program;
mod writer;

pub use error::CompileError;
pub use function::FunctionCompiler;
pub use opcode::{JumpKind, JumpMode, Opcode, StructureTag};
pub use program::compile;
pub use writer::InstructionWriter;

pub(crate) use writer::{encode_op, encode_op_str, encode_op_u16, encode_op_u64, encode_str, encode_u16, encode_u64};
