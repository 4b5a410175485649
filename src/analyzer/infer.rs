use std::collections::HashMap;

use crate::types::{Context, Monotype, Polytype, Substitution};

use super::error::TypeError;
use super::hir::Expression;

/// Algorithm W over the lowered IR.
///
/// The engine owns the fresh-variable counter, so every checked program gets
/// its own deterministic `x_0`, `x_1`, ... sequence.
pub struct InferenceEngine {
    fresh_counter: u64,
}

impl InferenceEngine {
    pub fn new() -> Self {
        InferenceEngine { fresh_counter: 0 }
    }

    /// A type variable no other call site has handed out yet.
    pub fn fresh_variable(&mut self) -> Monotype {
        let name = format!("x_{}", self.fresh_counter);
        self.fresh_counter += 1;
        Monotype::Variable(name)
    }

    /// Replaces every quantified variable of `scheme` with a fresh one.
    pub fn instantiate(&mut self, scheme: &Polytype) -> Monotype {
        let mut mappings = HashMap::new();
        self.instantiate_scheme(scheme, &mut mappings)
    }

    // Quantifiers nest linearly, so mappings never need unwinding; an inner
    // binder reusing a name simply overwrites the outer entry.
    fn instantiate_scheme(
        &mut self,
        scheme: &Polytype,
        mappings: &mut HashMap<String, Monotype>,
    ) -> Monotype {
        match scheme {
            Polytype::Mono(mono) => instantiate_mono(mono, mappings),
            Polytype::Quantifier { bound, body } => {
                mappings.insert(bound.clone(), self.fresh_variable());
                self.instantiate_scheme(body, mappings)
            }
        }
    }

    /// Infers the type of `expression` under `context`.
    ///
    /// Returns the substitution learned along the way together with the
    /// inferred monotype; callers thread the substitution through any
    /// follow-up inference of sibling expressions.
    pub fn infer(
        &mut self,
        context: &Context,
        expression: &Expression,
    ) -> Result<(Substitution, Monotype), TypeError> {
        match expression {
            Expression::Variable(name) => match context.get(name) {
                Some(scheme) => Ok((Substitution::new(), self.instantiate(scheme))),
                None => Err(TypeError::UnboundVariable { name: name.clone() }),
            },

            Expression::Let {
                variable,
                value,
                body,
            } => {
                let (s1, value_type) = self.infer(context, value)?;
                // Generalisation runs against the original context; the
                // extended context sees the substitution.
                let scheme = context.generalise(&value_type);
                let extended = context.apply(&s1).with(variable.clone(), scheme);
                let (s2, body_type) = self.infer(&extended, body)?;
                Ok((s2.combine(&s1), body_type))
            }

            Expression::Abstraction { argument, body } => {
                let argument_type = self.fresh_variable();
                let extended = context.clone().with(argument.clone(), argument_type.clone());
                let (s1, body_type) = self.infer(&extended, body)?;
                let function_type = s1.apply(&Monotype::function(argument_type, body_type));
                Ok((s1, function_type))
            }

            Expression::Application { left, right } => {
                let (s1, left_type) = self.infer(context, left)?;
                let (s2, right_type) = self.infer(&context.apply(&s1), right)?;
                let result_type = self.fresh_variable();
                let s3 = unify(
                    &s2.apply(&left_type),
                    &Monotype::function(right_type, result_type.clone()),
                )?;
                Ok((s3.combine(&s2.combine(&s1)), s3.apply(&result_type)))
            }
        }
    }
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn instantiate_mono(term: &Monotype, mappings: &HashMap<String, Monotype>) -> Monotype {
    match term {
        Monotype::Variable(name) => match mappings.get(name) {
            Some(fresh) => fresh.clone(),
            None => term.clone(),
        },
        Monotype::Application {
            constructor,
            arguments,
        } => Monotype::Application {
            constructor: constructor.clone(),
            arguments: arguments
                .iter()
                .map(|argument| instantiate_mono(argument, mappings))
                .collect(),
        },
    }
}

/// Computes the most general substitution making both terms equal.
pub fn unify(a: &Monotype, b: &Monotype) -> Result<Substitution, TypeError> {
    tracing::trace!(left = %a, right = %b, "unify");
    match (a, b) {
        (Monotype::Variable(x), Monotype::Variable(y)) if x == y => Ok(Substitution::new()),

        (Monotype::Variable(name), term) => {
            if term.contains(name) {
                return Err(TypeError::RecursiveType);
            }
            Ok(Substitution::singleton(name.clone(), term.clone()))
        }

        (term, Monotype::Variable(_)) => unify(b, term),

        (
            Monotype::Application {
                constructor: left_constructor,
                arguments: left_arguments,
            },
            Monotype::Application {
                constructor: right_constructor,
                arguments: right_arguments,
            },
        ) => {
            if left_constructor != right_constructor {
                return Err(TypeError::ConstructorMismatch {
                    left: left_constructor.clone(),
                    right: right_constructor.clone(),
                });
            }
            if left_arguments.len() != right_arguments.len() {
                return Err(TypeError::ArityMismatch);
            }

            let mut substitution = Substitution::new();
            for (left_argument, right_argument) in left_arguments.iter().zip(right_arguments) {
                let step = unify(
                    &substitution.apply(left_argument),
                    &substitution.apply(right_argument),
                )?;
                substitution = substitution.combine(&step);
            }
            Ok(substitution)
        }
    }
}

#[cfg(test)]
#[path = "infer_test.rs"]
mod infer_test;
