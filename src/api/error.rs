//! Public error type for the engine API.

use thiserror::Error;

use crate::analyzer::TypeError;
use crate::compiler::CompileError;
use crate::vm::RuntimeError;

/// Any failure surfaced by an [`Engine`] operation.
///
/// The variant tells which phase failed; a program that fails the check
/// phase never reaches compilation, and a compile failure never runs.
///
/// [`Engine`]: super::Engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Type check failed: {0}")]
    Check(#[from] TypeError),

    #[error("Compilation failed: {0}")]
    Compile(#[from] CompileError),

    #[error("Runtime failure: {0}")]
    Runtime(#[from] RuntimeError),
}
