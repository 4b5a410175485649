//! Surface syntax trees.
//!
//! These are the input contract of the toolchain: an external parser is
//! expected to produce [`Program`] values, which the analyzer checks and the
//! compiler turns into bytecode.

mod ast;

pub use ast::{
    BinaryOp, Block, Expr, FunctionDeclaration, Parameter, Program, Statement,
};
