/// A whole program: a flat list of function declarations.
///
/// Execution starts at the function named `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub functions: Vec<FunctionDeclaration>,
}

/// A top-level function with declared argument and return types.
///
/// Type names are plain strings; the analyzer resolves them against the
/// base-type table when the program is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub arguments: Vec<Parameter>,
    pub return_type: String,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let name = value;`
    Define { name: String, value: Expr },
    /// `name = value;` where `name` was declared earlier.
    Assign { name: String, value: Expr },
    /// `if (condition) { ... }` with no else branch.
    If { condition: Expr, body: Block },
    /// `while (condition) { ... }`
    While { condition: Expr, body: Block },
    /// `break;` out of the innermost enclosing loop.
    Break,
    /// `return;` or `return value;`
    Return(Option<Expr>),
    /// A bare block statement, executed in a frame of its own.
    Block(Block),
    /// An expression evaluated for its effect, e.g. a call.
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Str(String),
    Bool(bool),
    Identifier(String),
    /// Integer negation, `-operand`.
    Negate(Box<Expr>),
    /// Boolean negation, `!operand`.
    Not(Box<Expr>),
    /// A parenthesised expression.
    Group(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// A block in value position; it evaluates to its first `return`.
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    Equal,
}
