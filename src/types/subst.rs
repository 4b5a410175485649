use std::collections::HashMap;

use super::term::{Monotype, Polytype};

/// A mapping from type variable names to monotypes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    mappings: HashMap<String, Monotype>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(name: impl Into<String>, term: Monotype) -> Self {
        let mut substitution = Self::new();
        substitution.insert(name, term);
        substitution
    }

    pub fn insert(&mut self, name: impl Into<String>, term: Monotype) {
        self.mappings.insert(name.into(), term);
    }

    pub fn get(&self, name: &str) -> Option<&Monotype> {
        self.mappings.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Applies the substitution to a monotype, replacing mapped variables.
    pub fn apply(&self, term: &Monotype) -> Monotype {
        match term {
            Monotype::Variable(name) => match self.mappings.get(name) {
                Some(mapped) => mapped.clone(),
                None => term.clone(),
            },
            Monotype::Application {
                constructor,
                arguments,
            } => Monotype::Application {
                constructor: constructor.clone(),
                arguments: arguments.iter().map(|argument| self.apply(argument)).collect(),
            },
        }
    }

    /// Applies the substitution underneath quantifiers. Binders are kept as
    /// they are; fresh variables never collide with quantified names, so no
    /// capture avoidance is needed.
    pub fn apply_polytype(&self, scheme: &Polytype) -> Polytype {
        match scheme {
            Polytype::Mono(mono) => Polytype::Mono(self.apply(mono)),
            Polytype::Quantifier { bound, body } => Polytype::Quantifier {
                bound: bound.clone(),
                body: Box::new(self.apply_polytype(body)),
            },
        }
    }

    /// Composes two substitutions such that
    /// `self.combine(other).apply(t) == self.apply(other.apply(t))`.
    ///
    /// Every term mapped by `other` is rewritten through `self`; on a shared
    /// variable name the rewritten `other` entry wins.
    pub fn combine(&self, other: &Substitution) -> Substitution {
        let mut mappings = self.mappings.clone();
        for (name, term) in &other.mappings {
            mappings.insert(name.clone(), self.apply(term));
        }
        Substitution { mappings }
    }
}

#[cfg(test)]
#[path = "subst_test.rs"]
mod subst_test;
