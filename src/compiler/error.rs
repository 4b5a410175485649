use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("program has no main function")]
    MissingMain,

    #[error("cannot break outside of a loop")]
    BreakOutsideLoop,

    #[error("calling is only supported on plain identifiers")]
    CalleeNotIdentifier,

    #[error("no active instruction group to end")]
    NoOpenGroup,

    #[error("cannot finish writing with an open instruction group")]
    UnfinishedGroup,
}
