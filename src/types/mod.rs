//! Type terms, substitutions and typing contexts for Hindley-Milner inference.

mod context;
mod subst;
mod term;

pub use context::Context;
pub use subst::Substitution;
pub use term::{Monotype, Polytype, tag};
