//! Tolka - a toolchain core for a small statically-typed language.
//!
//! # Overview
//!
//! Tolka takes a surface syntax tree (produced by an external parser), checks
//! it with Hindley-Milner type inference, compiles it to a compact bytecode
//! wire format, and executes it on a stack-based virtual machine. A
//! disassembler provides the companion read path over the same bytes.
//!
//! The pipeline is exposed through [`api::Engine`]:
//!
//! 1. **Check**: lower every function body into a small lambda-calculus IR
//!    and infer types with Algorithm W ([`analyzer`]).
//! 2. **Compile**: emit the structure section and instruction stream
//!    ([`compiler`]).
//! 3. **Run**: interpret the bytes, writing `echo` output to a caller-supplied
//!    sink and returning the program's exit code ([`vm`]).
//!
//! # Quick Start
//!
//! ```
//! use tolka::api::{Engine, EngineOptions};
//! use tolka::syntax::{BinaryOp, Block, Expr, FunctionDeclaration, Program, Statement};
//!
//! // fn int main() { return 4 + 5; }
//! let program = Program {
//!     functions: vec![FunctionDeclaration {
//!         name: "main".into(),
//!         arguments: vec![],
//!         return_type: "int".into(),
//!         body: Block {
//!             statements: vec![Statement::Return(Some(Expr::Binary {
//!                 op: BinaryOp::Add,
//!                 left: Box::new(Expr::Int(4)),
//!                 right: Box::new(Expr::Int(5)),
//!             }))],
//!         },
//!     }],
//! };
//!
//! let engine = Engine::new(EngineOptions::default());
//! let mut output = Vec::new();
//! let exit_code = engine.evaluate(&program, &mut output).unwrap();
//! assert_eq!(exit_code, 9);
//! ```

pub mod analyzer;
pub mod api;
pub mod compiler;
pub mod stdlib;
pub mod syntax;
pub mod types;
pub mod vm;
