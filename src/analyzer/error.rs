use thiserror::Error;

/// Errors raised while checking a program.
///
/// Messages carry source-level names only; scoped names appear exactly as the
/// lowering qualified them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Variable '{name}' does not exist")]
    UnboundVariable { name: String },

    #[error("Recursive type dependency detected")]
    RecursiveType,

    #[error("Failed to unify types, different type constructors '{left}' and '{right}'")]
    ConstructorMismatch { left: String, right: String },

    #[error("Failed to unify types, different argument lengths for type constructors")]
    ArityMismatch,

    #[error("Cannot re-declare variable named '{name}'")]
    RedeclaredVariable { name: String },

    #[error("Cannot re-assign undeclared variable named '{name}'")]
    UndeclaredReassignment { name: String },

    #[error("Cannot call function on this type")]
    UnsupportedCallee,

    #[error("Calling functions not supported on non-identifiers")]
    NonIdentifierCallee,

    #[error("Wrong number of arguments to '{function}'")]
    WrongArgumentCount { function: String },

    #[error("Function \"{function}\" was expected to have return type \"{declared}\", found \"{actual}\"")]
    ReturnTypeMismatch {
        function: String,
        declared: String,
        actual: String,
    },

    #[error("Could not type-check return statement.")]
    UntypedReturn,

    #[error("Return type '{type_name}' of function '{function}' does not resolve to a concrete type")]
    UnresolvableReturnType { function: String, type_name: String },

    #[error("Argument '{argument}' of function '{function}' does not resolve to a concrete type")]
    UnresolvableArgumentType { function: String, argument: String },
}
