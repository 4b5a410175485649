use std::collections::{HashMap, HashSet};

use super::subst::Substitution;
use super::term::{Monotype, Polytype};

/// A typing context mapping scoped variable names to type schemes.
#[derive(Debug, Clone, Default)]
pub struct Context {
    bindings: HashMap<String, Polytype>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Polytype> {
        self.bindings.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, scheme: impl Into<Polytype>) {
        self.bindings.insert(name.into(), scheme.into());
    }

    /// Builder-style insert, used when seeding contexts.
    pub fn with(mut self, name: impl Into<String>, scheme: impl Into<Polytype>) -> Self {
        self.insert(name, scheme);
        self
    }

    /// A copy of the context with the substitution applied to every binding.
    pub fn apply(&self, substitution: &Substitution) -> Context {
        Context {
            bindings: self
                .bindings
                .iter()
                .map(|(name, scheme)| (name.clone(), substitution.apply_polytype(scheme)))
                .collect(),
        }
    }

    fn free_variables(&self) -> HashSet<String> {
        self.bindings
            .values()
            .flat_map(|scheme| scheme.free_variables())
            .collect()
    }

    /// Quantifies the variables of `term` that are not free in the context.
    ///
    /// Candidates are collected in traversal order, first occurrence wins;
    /// each candidate wraps the scheme built so far, so the last one ends up
    /// outermost.
    pub fn generalise(&self, term: &Monotype) -> Polytype {
        let context_variables = self.free_variables();
        let mut quantified = Vec::new();
        for name in term.free_variables() {
            if !context_variables.contains(&name) && !quantified.contains(&name) {
                quantified.push(name);
            }
        }

        let mut scheme = Polytype::Mono(term.clone());
        for name in quantified {
            scheme = Polytype::quantifier(name, scheme);
        }
        scheme
    }

    /// Resolves a declared type name against the context.
    ///
    /// Known names (the base types `int`, `string`, `bool`, `unit`) yield
    /// their registered scheme; anything else falls back to a type variable
    /// of the same name and surfaces during unification.
    pub fn resolve_type_name(&self, name: &str) -> Polytype {
        match self.bindings.get(name) {
            Some(scheme) => scheme.clone(),
            None => Polytype::Mono(Monotype::variable(name)),
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
