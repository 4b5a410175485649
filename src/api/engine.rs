//! The compilation and execution engine.

use std::io;

use crate::analyzer::{CheckedProgram, TypeChecker};
use crate::compiler;
use crate::syntax::Program;
use crate::vm::{self, Interpreter};

use super::error::Error;

/// Engine-wide configuration.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Upper bound on live call frames. Runaway recursion aborts with a
    /// resource error once the bound is hit, instead of exhausting the host
    /// stack.
    pub max_call_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            max_call_depth: 1000,
        }
    }
}

/// Checks, compiles and runs programs.
///
/// One engine serves any number of programs; every run gets a fresh call
/// stack. `echo` output goes to the sink the caller passes in, and the
/// returned integer is the program's exit code.
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Engine { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Type checks a program.
    pub fn check<'p>(&self, program: &'p Program) -> Result<CheckedProgram<'p>, Error> {
        Ok(TypeChecker::new().check(program)?)
    }

    /// Type checks a program and compiles it to the wire format.
    pub fn compile(&self, program: &Program) -> Result<Vec<u8>, Error> {
        let checked = self.check(program)?;
        Ok(compiler::compile(&checked)?)
    }

    /// Runs compiled bytecode and returns its exit code.
    pub fn run(&self, bytecode: &[u8], output: &mut dyn io::Write) -> Result<i64, Error> {
        let exit_code = Interpreter::new(bytecode, output, self.options.max_call_depth).run()?;
        Ok(exit_code)
    }

    /// Checks, compiles and runs a program in one step.
    pub fn evaluate(&self, program: &Program, output: &mut dyn io::Write) -> Result<i64, Error> {
        let bytecode = self.compile(program)?;
        self.run(&bytecode, output)
    }

    /// Renders compiled bytecode as one instruction line per opcode.
    pub fn disassemble(&self, bytecode: &[u8]) -> Result<String, Error> {
        Ok(vm::disassemble(bytecode)?)
    }
}
