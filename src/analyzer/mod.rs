//! Static analysis: scope resolution, lowering and Hindley-Milner inference.
//!
//! Function bodies are lowered statement by statement into a small
//! lambda-calculus IR ([`Expression`]) and fed through Algorithm W. Two
//! follow-up passes validate declared return types and call-site argument
//! counts before anything reaches the compiler.

mod check;
mod error;
mod hir;
mod infer;
mod scope;

pub use check::{CheckedProgram, RegisteredFunction, RegisteredKind, TypeChecker};
pub use error::TypeError;
pub use hir::Expression;
pub use infer::{InferenceEngine, unify};
