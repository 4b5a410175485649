use crate::stdlib::{self, Builtin};
use crate::syntax::{BinaryOp, Block, Expr, FunctionDeclaration, Program, Statement};
use crate::types::{Context, Monotype, Polytype};
use crate::types::tag;

use super::error::TypeError;
use super::hir::Expression;
use super::infer::InferenceEngine;
use super::scope::{ScopeId, ScopeTree};

/// A program that passed type checking, ready for compilation.
///
/// Holds the function registry in registration order (builtins first, then
/// declarations in source order) and the final typing context.
#[derive(Debug)]
pub struct CheckedProgram<'p> {
    pub program: &'p Program,
    pub functions: Vec<RegisteredFunction>,
    pub context: Context,
}

#[derive(Debug)]
pub struct RegisteredFunction {
    pub name: String,
    pub arguments: Vec<String>,
    pub kind: RegisteredKind,
}

#[derive(Debug)]
pub enum RegisteredKind {
    /// A builtin with pre-assembled bytecode.
    Builtin(&'static Builtin),
    /// Index into the checked program's declarations.
    Declared(usize),
}

impl CheckedProgram<'_> {
    pub fn function(&self, name: &str) -> Option<&RegisteredFunction> {
        self.functions.iter().find(|function| function.name == name)
    }
}

/// Per-block bookkeeping collected while checking statements.
#[derive(Debug, Default)]
struct BlockSummary {
    /// Type of the first `return` found in order, descending into `if`
    /// bodies but not into loops or nested bare blocks.
    first_return: Option<Monotype>,
    /// Types of this block's own top-level `return` statements, in order.
    return_types: Vec<Monotype>,
}

#[derive(Debug)]
struct StatementChecked {
    inferred: Option<Monotype>,
    first_return: Option<Monotype>,
}

/// Statement-by-statement type checker.
///
/// Each statement is lowered to the lambda IR and inferred against the
/// context built up so far; variable definitions bind their inferred monotype
/// for the statements that follow. A checker instance is good for one
/// program.
pub struct TypeChecker {
    engine: InferenceEngine,
    scopes: ScopeTree,
    context: Context,
    transient_counter: u32,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            engine: InferenceEngine::new(),
            scopes: ScopeTree::new(),
            context: stdlib::base_context(),
            transient_counter: 0,
        }
    }

    pub fn check<'p>(mut self, program: &'p Program) -> Result<CheckedProgram<'p>, TypeError> {
        let root = self.scopes.root();
        self.scopes.register(root, tag::UNIT);

        let mut functions: Vec<RegisteredFunction> = Vec::new();
        for builtin in stdlib::builtins() {
            self.scopes.register(root, builtin.name);
            self.context.insert(builtin.name, builtin.scheme.clone());
            register(
                &mut functions,
                RegisteredFunction {
                    name: builtin.name.to_string(),
                    arguments: builtin.arguments.iter().map(|s| s.to_string()).collect(),
                    kind: RegisteredKind::Builtin(builtin),
                },
            );
        }

        // Declared functions are registered up front so bodies can call
        // forward and recursively.
        for (index, declaration) in program.functions.iter().enumerate() {
            let signature = self.function_signature(declaration)?;
            let qualified = self.scopes.register(root, &declaration.name);
            self.context.insert(qualified, signature);
            register(
                &mut functions,
                RegisteredFunction {
                    name: declaration.name.clone(),
                    arguments: declaration
                        .arguments
                        .iter()
                        .map(|parameter| parameter.name.clone())
                        .collect(),
                    kind: RegisteredKind::Declared(index),
                },
            );
        }

        // Arity errors surface before inference; an over-applied call never
        // reaches unification.
        check_argument_counts(program, &functions)?;

        let mut function_returns = Vec::new();
        for (index, declaration) in program.functions.iter().enumerate() {
            tracing::debug!(function = %declaration.name, "type checking function");
            let function_scope = self.scopes.child(root, &declaration.name);
            for parameter in &declaration.arguments {
                let argument_type = self.resolve_argument_type(declaration, parameter)?;
                let qualified = self.scopes.register(function_scope, &parameter.name);
                self.context.insert(qualified, argument_type);
            }
            let summary =
                self.check_statements(function_scope, &declaration.body.statements)?;
            function_returns.push((index, summary.return_types));
        }

        self.check_return_types(program, &function_returns)?;

        Ok(CheckedProgram {
            program,
            functions,
            context: self.context,
        })
    }

    /// The curried function type built from the declared argument and return
    /// type names.
    fn function_signature(
        &self,
        declaration: &FunctionDeclaration,
    ) -> Result<Monotype, TypeError> {
        let mut signature = match self.context.resolve_type_name(&declaration.return_type) {
            Polytype::Mono(mono) => mono,
            Polytype::Quantifier { .. } => {
                return Err(TypeError::UnresolvableReturnType {
                    function: declaration.name.clone(),
                    type_name: declaration.return_type.clone(),
                });
            }
        };
        for parameter in declaration.arguments.iter().rev() {
            let argument_type = self.resolve_argument_type(declaration, parameter)?;
            signature = Monotype::function(argument_type, signature);
        }
        Ok(signature)
    }

    fn resolve_argument_type(
        &self,
        declaration: &FunctionDeclaration,
        parameter: &crate::syntax::Parameter,
    ) -> Result<Monotype, TypeError> {
        match self.context.resolve_type_name(&parameter.type_name) {
            Polytype::Mono(mono) => Ok(mono),
            Polytype::Quantifier { .. } => Err(TypeError::UnresolvableArgumentType {
                function: declaration.name.clone(),
                argument: parameter.name.clone(),
            }),
        }
    }

    fn next_transient(&mut self) -> u32 {
        self.transient_counter += 1;
        self.transient_counter
    }

    fn check_statements(
        &mut self,
        scope: ScopeId,
        statements: &[Statement],
    ) -> Result<BlockSummary, TypeError> {
        let mut summary = BlockSummary::default();
        for statement in statements {
            let checked = self.check_statement(scope, statement)?;
            if let Statement::Return(_) = statement {
                if let Some(inferred) = &checked.inferred {
                    summary.return_types.push(inferred.clone());
                }
            }
            if summary.first_return.is_none() {
                summary.first_return = checked.first_return;
            }
        }
        Ok(summary)
    }

    fn check_statement(
        &mut self,
        scope: ScopeId,
        statement: &Statement,
    ) -> Result<StatementChecked, TypeError> {
        match statement {
            Statement::If { condition, body } => {
                // The bare condition is checked on its own before the
                // statement is lowered into the `_boolCondition` wrapper.
                self.check_expression(scope, condition)?;
                let name = format!("if{}", self.next_transient());
                let child = self.scopes.child(scope, name);
                let body_summary = self.check_statements(child, &body.statements)?;
                let inferred = self.infer_statement(scope, statement)?;
                Ok(StatementChecked {
                    inferred: Some(inferred),
                    first_return: body_summary.first_return,
                })
            }

            Statement::While { condition, body } => {
                self.check_expression(scope, condition)?;
                let name = format!("while{}", self.next_transient());
                let child = self.scopes.child(scope, name);
                self.check_statements(child, &body.statements)?;
                let inferred = self.infer_statement(scope, statement)?;
                Ok(StatementChecked {
                    inferred: Some(inferred),
                    first_return: None,
                })
            }

            Statement::Block(block) => {
                self.check_value_block(scope, block)?;
                Ok(StatementChecked {
                    inferred: None,
                    first_return: None,
                })
            }

            other => {
                let inferred = self.infer_statement(scope, other)?;
                if let Statement::Define { name, .. } = other {
                    // The definition registered its name while lowering; bind
                    // the inferred monotype for the statements that follow.
                    if let Some(qualified) = self.scopes.lookup(scope, name) {
                        let qualified = qualified.to_string();
                        self.context.insert(qualified, inferred.clone());
                    }
                }
                let first_return = match other {
                    Statement::Return(_) => Some(inferred.clone()),
                    _ => None,
                };
                Ok(StatementChecked {
                    inferred: Some(inferred),
                    first_return,
                })
            }
        }
    }

    fn infer_statement(
        &mut self,
        scope: ScopeId,
        statement: &Statement,
    ) -> Result<Monotype, TypeError> {
        let expression = self.lower_statement(scope, statement, None)?;
        let (_, inferred) = self.engine.infer(&self.context, &expression)?;
        Ok(inferred)
    }

    fn check_expression(&mut self, scope: ScopeId, expr: &Expr) -> Result<Monotype, TypeError> {
        let expression = self.lower_expression(scope, expr, None)?;
        let (_, inferred) = self.engine.infer(&self.context, &expression)?;
        Ok(inferred)
    }

    /// Types a block in value position: a fresh `codeBlock{N}` scope is
    /// opened, the statements are checked, and the block's type is the type
    /// of its first `return` (or `unit` when it never returns).
    fn check_value_block(&mut self, scope: ScopeId, block: &Block) -> Result<Monotype, TypeError> {
        let name = format!("codeBlock{}", self.next_transient());
        let child = self.scopes.child(scope, name);
        let summary = self.check_statements(child, &block.statements)?;
        Ok(summary
            .first_return
            .unwrap_or_else(|| Monotype::nullary(tag::UNIT)))
    }

    fn lower_statement(
        &mut self,
        scope: ScopeId,
        statement: &Statement,
        continuation: Option<&Expression>,
    ) -> Result<Expression, TypeError> {
        match statement {
            Statement::Define { name, value } => {
                if self.scopes.lookup(scope, name).is_some() {
                    return Err(TypeError::RedeclaredVariable { name: name.clone() });
                }
                self.scopes.register(scope, name);
                self.lower_expression(scope, value, continuation)
            }

            Statement::Assign { name, value } => {
                let Some(qualified) = self.scopes.lookup(scope, name).map(str::to_string) else {
                    return Err(TypeError::UndeclaredReassignment { name: name.clone() });
                };
                let value = self.lower_expression(scope, value, continuation)?;
                Ok(Expression::application(
                    Expression::application(
                        Expression::variable(tag::REASSIGNMENT),
                        Expression::variable(qualified),
                    ),
                    value,
                ))
            }

            Statement::If { condition, .. } | Statement::While { condition, .. } => {
                let condition = self.lower_expression(scope, condition, continuation)?;
                Ok(Expression::application(
                    Expression::variable(tag::BOOL_CONDITION),
                    condition,
                ))
            }

            // Break leaves no value behind.
            Statement::Break => Ok(Expression::variable(tag::UNIT)),

            Statement::Return(None) => Ok(Expression::variable(tag::UNIT)),

            Statement::Return(Some(value)) => {
                let value = self.lower_expression(scope, value, continuation)?;
                Ok(Expression::binding("ret", value, Expression::variable("ret")))
            }

            Statement::Block(block) => {
                let block_type = self.check_value_block(scope, block)?;
                Ok(Expression::variable(block_type.name().to_string()))
            }

            Statement::Expr(expr) => self.lower_expression(scope, expr, continuation),
        }
    }

    fn lower_expression(
        &mut self,
        scope: ScopeId,
        expr: &Expr,
        continuation: Option<&Expression>,
    ) -> Result<Expression, TypeError> {
        match expr {
            // Literal values vanish in the lowering; only their type
            // matters, and the seeded context binds these names to the
            // matching base type.
            Expr::Int(_) => Ok(Expression::variable(tag::INT)),
            Expr::Str(_) => Ok(Expression::variable(tag::STRING)),
            Expr::Bool(_) => Ok(Expression::variable(tag::BOOL)),

            Expr::Identifier(name) => Ok(Expression::variable(self.scoped_variable(scope, name))),

            Expr::Negate(operand) => {
                let operand = self.lower_expression(scope, operand, None)?;
                Ok(Expression::application(
                    Expression::variable(tag::INT_NEGATION),
                    operand,
                ))
            }

            Expr::Not(operand) => {
                let operand = self.lower_expression(scope, operand, None)?;
                Ok(Expression::application(
                    Expression::variable(tag::BOOL_NEGATION),
                    operand,
                ))
            }

            Expr::Group(inner) => self.lower_expression(scope, inner, continuation),

            Expr::Binary { op, left, right } => {
                let left = self.lower_expression(scope, left, None)?;
                let right = self.lower_expression(scope, right, None)?;
                Ok(Expression::application(
                    Expression::application(Expression::variable(operator_name(*op)), left),
                    right,
                ))
            }

            Expr::Block(block) => {
                let block_type = self.check_value_block(scope, block)?;
                Ok(Expression::variable(block_type.name().to_string()))
            }

            Expr::Call { callee, arguments } => {
                // A single layer of parentheses around the callee is peeled
                // off; anything else has to be an identifier or a nested
                // call.
                let callee = match callee.as_ref() {
                    Expr::Group(inner) => inner.as_ref(),
                    other => other,
                };
                let mut call = match callee {
                    Expr::Identifier(name) => {
                        Expression::variable(self.scoped_variable(scope, name))
                    }
                    Expr::Call { .. } => self.lower_expression(scope, callee, None)?,
                    _ => return Err(TypeError::UnsupportedCallee),
                };
                for argument in arguments {
                    let argument = self.lower_expression(scope, argument, None)?;
                    call = Expression::application(call, argument);
                }
                match continuation {
                    Some(continuation) => Ok(Expression::binding(
                        format!("_let{}", self.next_transient()),
                        call,
                        continuation.clone(),
                    )),
                    None => Ok(call),
                }
            }
        }
    }

    /// The qualified name for an identifier: its registration if one is in
    /// scope, otherwise the name as it would be registered here. Unknown
    /// names then surface as unbound variables during inference.
    fn scoped_variable(&self, scope: ScopeId, name: &str) -> String {
        match self.scopes.lookup(scope, name) {
            Some(qualified) => qualified.to_string(),
            None => self.scopes.qualified(scope, name),
        }
    }

    /// Validates every declared function's top-level `return` statements
    /// against its declared return type.
    fn check_return_types(
        &self,
        program: &Program,
        function_returns: &[(usize, Vec<Monotype>)],
    ) -> Result<(), TypeError> {
        for (index, return_types) in function_returns {
            let declaration = &program.functions[*index];
            let mut recorded = return_types.iter();
            for statement in &declaration.body.statements {
                if !matches!(statement, Statement::Return(_)) {
                    continue;
                }
                let Some(return_type) = recorded.next() else {
                    return Err(TypeError::UntypedReturn);
                };
                let actual = return_type.name();
                if actual != declaration.return_type {
                    return Err(TypeError::ReturnTypeMismatch {
                        function: declaration.name.clone(),
                        declared: declaration.return_type.clone(),
                        actual: actual.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn register(functions: &mut Vec<RegisteredFunction>, function: RegisteredFunction) {
    match functions.iter_mut().find(|f| f.name == function.name) {
        Some(existing) => *existing = function,
        None => functions.push(function),
    }
}

fn operator_name(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => tag::INT_ADDITION,
        BinaryOp::Subtract => tag::INT_SUBTRACTION,
        BinaryOp::GreaterThan => tag::INT_GREATER_THAN,
        BinaryOp::GreaterThanEqual => tag::INT_GREATER_THAN_EQ,
        BinaryOp::LessThan => tag::INT_LESS_THAN,
        BinaryOp::LessThanEqual => tag::INT_LESS_THAN_EQ,
        BinaryOp::Equal => tag::EQUALITY,
    }
}

/// Validates call sites: callees have to be bare identifiers, and calls to
/// registered functions have to pass exactly as many arguments as declared.
fn check_argument_counts(
    program: &Program,
    functions: &[RegisteredFunction],
) -> Result<(), TypeError> {
    for declaration in &program.functions {
        check_statements_syntax(&declaration.body.statements, functions)?;
    }
    Ok(())
}

fn check_statements_syntax(
    statements: &[Statement],
    functions: &[RegisteredFunction],
) -> Result<(), TypeError> {
    for statement in statements {
        match statement {
            Statement::Define { value, .. } | Statement::Assign { value, .. } => {
                check_expr_syntax(value, functions)?;
            }
            Statement::If { condition, body } | Statement::While { condition, body } => {
                check_expr_syntax(condition, functions)?;
                check_statements_syntax(&body.statements, functions)?;
            }
            Statement::Return(Some(value)) => check_expr_syntax(value, functions)?,
            Statement::Return(None) | Statement::Break => {}
            Statement::Block(block) => check_statements_syntax(&block.statements, functions)?,
            Statement::Expr(expr) => check_expr_syntax(expr, functions)?,
        }
    }
    Ok(())
}

fn check_expr_syntax(expr: &Expr, functions: &[RegisteredFunction]) -> Result<(), TypeError> {
    match expr {
        Expr::Int(_) | Expr::Str(_) | Expr::Bool(_) | Expr::Identifier(_) => Ok(()),

        Expr::Negate(operand) | Expr::Not(operand) | Expr::Group(operand) => {
            check_expr_syntax(operand, functions)
        }

        Expr::Binary { left, right, .. } => {
            check_expr_syntax(left, functions)?;
            check_expr_syntax(right, functions)
        }

        Expr::Block(block) => check_statements_syntax(&block.statements, functions),

        Expr::Call { callee, arguments } => {
            let Expr::Identifier(name) = callee.as_ref() else {
                return Err(TypeError::NonIdentifierCallee);
            };
            if let Some(function) = functions.iter().find(|f| &f.name == name) {
                if function.arguments.len() != arguments.len() {
                    return Err(TypeError::WrongArgumentCount {
                        function: name.clone(),
                    });
                }
            }
            for argument in arguments {
                check_expr_syntax(argument, functions)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "check_test.rs"]
mod check_test;
