use crate::syntax::{BinaryOp, Block, Expr, FunctionDeclaration, Statement};

use super::error::CompileError;
use super::opcode::{JumpKind, JumpMode, Opcode};
use super::writer::{
    InstructionWriter, encode_op, encode_op_str, encode_op_u16, encode_op_u64, encode_str,
    encode_u64,
};

/// Compiles a single function body to its instruction bytes.
///
/// Branch bodies are written into instruction groups, so a forward jump can
/// be emitted with the exact byte count it has to skip. A compiler instance
/// is good for one function; the loop-label counter restarts at `while0` in
/// every function.
pub struct FunctionCompiler {
    instructions: InstructionWriter,
    label_counter: u32,
    had_return: bool,
}

impl FunctionCompiler {
    pub fn new() -> Self {
        FunctionCompiler {
            instructions: InstructionWriter::new(),
            label_counter: 0,
            had_return: false,
        }
    }

    pub fn compile(mut self, function: &FunctionDeclaration) -> Result<Vec<u8>, CompileError> {
        tracing::debug!(function = %function.name, "compiling function body");
        self.write_code_block(&function.body, false, true, None)?;
        self.instructions.finish()
    }

    fn next_label(&mut self) -> u32 {
        let label = self.label_counter;
        self.label_counter += 1;
        label
    }

    fn write_code_block(
        &mut self,
        block: &Block,
        start_frame: bool,
        force_return: bool,
        loop_label: Option<&str>,
    ) -> Result<(), CompileError> {
        if start_frame {
            self.instructions.write(encode_op(Opcode::StartFrame));
        }

        for statement in &block.statements {
            match statement {
                Statement::Return(value) => {
                    match value {
                        Some(value) => self.write_expression(value)?,
                        None => self.instructions.write(encode_op(Opcode::PushUnit)),
                    }
                    self.instructions.write(encode_op(Opcode::Ret));
                    // Anything after a return in the same block is dead.
                    return Ok(());
                }

                Statement::Break => {
                    let Some(label) = loop_label else {
                        return Err(CompileError::BreakOutsideLoop);
                    };
                    // A fake condition result short-circuits the conditional
                    // jump sitting right after the break target.
                    self.instructions.write(encode_op_u16(Opcode::PushBool, 0));
                    self.instructions
                        .write(encode_op_u64(Opcode::PushInt, JumpMode::Always.flag()));
                    self.write_marker_jump(&format!("{label}break"));
                }

                Statement::Define { name, value } | Statement::Assign { name, value } => {
                    self.write_expression(value)?;
                    self.instructions.write(encode_op_str(Opcode::Let, name));
                }

                Statement::If { condition, body } => {
                    self.had_return = self.had_return || block_returns(body);
                    self.instructions.start_group();
                    self.write_code_block(body, false, false, loop_label)?;
                    let body_bytes = self.instructions.end_group()?.concat();

                    self.write_expression(condition)?;
                    self.instructions
                        .write(encode_op_u64(Opcode::PushInt, JumpMode::IfFalse.flag()));
                    self.write_relative_jump(body_bytes.len() as u64);
                    self.instructions.write(body_bytes);
                }

                Statement::While { condition, body } => {
                    let label = format!("while{}", self.next_label());
                    let break_label = format!("{label}break");

                    self.instructions.start_group();
                    self.write_code_block(body, false, false, Some(&label))?;
                    // Loop back to re-evaluate the condition.
                    self.instructions
                        .write(encode_op_u64(Opcode::PushInt, JumpMode::Always.flag()));
                    self.write_marker_jump(&label);
                    let body_bytes = self.instructions.end_group()?.concat();

                    self.instructions.write(encode_op_str(Opcode::Mark, &label));
                    self.write_expression(condition)?;
                    self.instructions
                        .write(encode_op_str(Opcode::Mark, &break_label));
                    self.instructions
                        .write(encode_op_u64(Opcode::PushInt, JumpMode::IfFalse.flag()));
                    self.write_relative_jump(body_bytes.len() as u64);
                    self.instructions.write(body_bytes);
                }

                // An orphaned block runs in a frame of its own and never
                // inherits the loop context.
                Statement::Block(inner) => self.write_code_block(inner, true, true, None)?,

                Statement::Expr(expr) => self.write_expression(expr)?,
            }
        }

        if force_return && !self.had_return {
            self.instructions.write(encode_op(Opcode::PushUnit));
            self.instructions.write(encode_op(Opcode::Ret));
        }
        Ok(())
    }

    fn write_expression(&mut self, expr: &Expr) -> Result<(), CompileError> {
        match expr {
            Expr::Int(value) => self
                .instructions
                .write(encode_op_u64(Opcode::PushInt, *value as u64)),

            Expr::Str(value) => self
                .instructions
                .write(encode_op_str(Opcode::PushString, value)),

            Expr::Bool(value) => self
                .instructions
                .write(encode_op_u16(Opcode::PushBool, *value as u16)),

            Expr::Identifier(name) => {
                self.instructions.write(encode_op_str(Opcode::Load, name))
            }

            Expr::Group(inner) => self.write_expression(inner)?,

            Expr::Negate(operand) => {
                self.write_expression(operand)?;
                self.instructions.write(encode_op(Opcode::NegateInt));
            }

            Expr::Not(operand) => {
                self.write_expression(operand)?;
                self.instructions.write(encode_op(Opcode::NegateBool));
            }

            Expr::Binary { op, left, right } => {
                self.write_expression(left)?;
                self.write_expression(right)?;
                self.instructions.write(encode_op(binary_opcode(*op)));
            }

            Expr::Block(block) => self.write_code_block(block, true, true, None)?,

            Expr::Call { callee, arguments } => {
                let Expr::Identifier(name) = callee.as_ref() else {
                    return Err(CompileError::CalleeNotIdentifier);
                };
                for argument in arguments {
                    self.write_expression(argument)?;
                }
                self.instructions.write(encode_op_str(Opcode::Call, name));
            }
        }
        Ok(())
    }

    fn write_relative_jump(&mut self, byte_count: u64) {
        let mut jump = encode_op_u16(Opcode::Jump, JumpKind::RelativeBytes as u16);
        jump.extend(encode_u64(byte_count));
        self.instructions.write(jump);
    }

    fn write_marker_jump(&mut self, label: &str) {
        let mut jump = encode_op_u16(Opcode::Jump, JumpKind::Marker as u16);
        jump.extend(encode_str(label));
        self.instructions.write(jump);
    }
}

impl Default for FunctionCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the block contains a `return` at its top level or anywhere down a
/// chain of `if` bodies. Loop bodies and orphaned blocks do not count.
fn block_returns(block: &Block) -> bool {
    block.statements.iter().any(|statement| match statement {
        Statement::Return(_) => true,
        Statement::If { body, .. } => block_returns(body),
        _ => false,
    })
}

fn binary_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Add => Opcode::Add,
        BinaryOp::Subtract => Opcode::Sub,
        BinaryOp::GreaterThan => Opcode::GreaterThan,
        BinaryOp::GreaterThanEqual => Opcode::GreaterThanEqual,
        BinaryOp::LessThan => Opcode::LessThan,
        BinaryOp::LessThanEqual => Opcode::LessThanEqual,
        BinaryOp::Equal => Opcode::Equals,
    }
}

#[cfg(test)]
#[path = "function_test.rs"]
mod function_test;
