//! Public API for checking, compiling and running programs.
//!
//! [`Engine`] ties the pipeline together; each phase is also callable on its
//! own, so a caller can stop after type checking or keep compiled bytecode
//! around for repeated runs. Internal error types are converted to the
//! public [`Error`] at this boundary.

pub mod engine;
pub mod error;

pub use engine::{Engine, EngineOptions};
pub use error::Error;
