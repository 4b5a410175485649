use std::io;

use thiserror::Error;

/// Errors raised while loading or executing a byte stream.
///
/// Decoding errors carry the stream offset they were detected at; execution
/// errors name the opcode that failed. None of these are recoverable within
/// a run.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Unexpected end of bytecode at offset {offset}")]
    TruncatedStream { offset: usize },

    #[error("Malformed string operand at offset {offset}")]
    MalformedString { offset: usize },

    #[error("Unknown opcode {opcode} at offset {offset}")]
    UnknownOpcode { opcode: u16, offset: usize },

    #[error("Unknown structure tag {tag} at offset {offset}")]
    UnknownStructureTag { tag: u16, offset: usize },

    #[error("Unknown jump addressing mode {kind} at offset {offset}")]
    UnknownJumpKind { kind: u16, offset: usize },

    #[error("Unknown jump mode flag {flag}")]
    UnknownJumpMode { flag: i64 },

    #[error("Call to unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("Jump to unknown marker '{name}'")]
    UnknownMarker { name: String },

    #[error("No value named '{name}' in scope")]
    UnknownName { name: String },

    #[error("{opcode} expects a {expected} operand, found {actual}")]
    OperandMismatch {
        opcode: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{opcode} on an empty value stack")]
    StackUnderflow { opcode: &'static str },

    #[error("{opcode} without a frame to return to")]
    FrameUnderflow { opcode: &'static str },

    #[error("Call depth limit of {limit} exceeded")]
    CallDepthExceeded { limit: usize },

    #[error("Program finished with a {actual} exit value")]
    BadExitValue { actual: &'static str },

    #[error(transparent)]
    Io(#[from] io::Error),
}
