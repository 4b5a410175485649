//! Builtin functions and the seeded typing context.
//!
//! Builtins are registered ahead of declared functions and carry
//! pre-assembled bytecode instead of a surface-syntax body. The seeded
//! context binds the base types, the boolean literals and the operator
//! builtins that lowering targets.

mod echo;

use lazy_static::lazy_static;

use crate::types::{Context, Monotype, Polytype, tag};

/// A function the toolchain ships with every program.
#[derive(Debug)]
pub struct Builtin {
    pub name: &'static str,
    pub arguments: &'static [&'static str],
    pub scheme: Polytype,
    pub bytecode: Vec<u8>,
}

lazy_static! {
    static ref BUILTINS: Vec<Builtin> = vec![echo::builtin()];
    static ref BASE_CONTEXT: Context = seed_context();
}

/// Every builtin, in registration order.
pub fn builtins() -> &'static [Builtin] {
    &BUILTINS
}

/// A fresh copy of the seeded typing context.
pub fn base_context() -> Context {
    BASE_CONTEXT.clone()
}

fn seed_context() -> Context {
    let comparison = binary_operator(int(), int(), boolean());
    let arithmetic = binary_operator(int(), int(), int());

    Context::new()
        .with(tag::STRING, Monotype::nullary(tag::STRING))
        .with(tag::INT, int())
        .with(tag::BOOL, boolean())
        .with(tag::UNIT, Monotype::nullary(tag::UNIT))
        .with("true", boolean())
        .with("false", boolean())
        .with(tag::BOOL_NEGATION, Monotype::function(boolean(), boolean()))
        .with(tag::BOOL_CONDITION, Monotype::function(boolean(), boolean()))
        .with(tag::INT_NEGATION, Monotype::function(int(), int()))
        .with(tag::INT_GREATER_THAN, comparison.clone())
        .with(tag::INT_GREATER_THAN_EQ, comparison.clone())
        .with(tag::INT_LESS_THAN, comparison.clone())
        .with(tag::INT_LESS_THAN_EQ, comparison)
        .with(tag::INT_ADDITION, arithmetic.clone())
        .with(tag::INT_SUBTRACTION, arithmetic)
        .with(tag::EQUALITY, equality_scheme())
        .with(tag::REASSIGNMENT, reassignment_scheme())
}

fn int() -> Monotype {
    Monotype::nullary(tag::INT)
}

fn boolean() -> Monotype {
    Monotype::nullary(tag::BOOL)
}

fn binary_operator(left: Monotype, right: Monotype, result: Monotype) -> Monotype {
    Monotype::function(left, Monotype::function(right, result))
}

/// `_equality` compares any two values: `forall l. forall r. l -> r -> bool`.
fn equality_scheme() -> Polytype {
    Polytype::quantifier(
        "l",
        Polytype::quantifier(
            "r",
            Polytype::Mono(binary_operator(
                Monotype::variable("l"),
                Monotype::variable("r"),
                boolean(),
            )),
        ),
    )
}

/// `_reassignment` pins both sides to the declared type:
/// `forall l. l -> l -> l`.
fn reassignment_scheme() -> Polytype {
    Polytype::quantifier(
        "l",
        Polytype::Mono(binary_operator(
            Monotype::variable("l"),
            Monotype::variable("l"),
            Monotype::variable("l"),
        )),
    )
}
