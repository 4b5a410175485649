use std::fmt;

/// Well-known type constructor and builtin names shared across the pipeline.
pub mod tag {
    /// Function types are curried applications of this constructor.
    pub const FN: &str = "_fn";

    pub const INT: &str = "int";
    pub const STRING: &str = "string";
    pub const BOOL: &str = "bool";
    pub const UNIT: &str = "unit";

    pub const BOOL_NEGATION: &str = "_boolNegation";
    pub const BOOL_CONDITION: &str = "_boolCondition";
    pub const INT_NEGATION: &str = "_intNegation";
    pub const INT_ADDITION: &str = "_intAddition";
    pub const INT_SUBTRACTION: &str = "_intSubtraction";
    pub const INT_GREATER_THAN: &str = "_intGreaterThan";
    pub const INT_GREATER_THAN_EQ: &str = "_intGreaterThanEq";
    pub const INT_LESS_THAN: &str = "_intLessThan";
    pub const INT_LESS_THAN_EQ: &str = "_intLessThanEq";
    pub const EQUALITY: &str = "_equality";
    pub const REASSIGNMENT: &str = "_reassignment";
}

/// A monomorphic type term.
///
/// Types are either variables (`x_0`) or applications of a named constructor
/// to zero or more argument types. Base types like `int` are nullary
/// applications; function types are right-nested binary applications of
/// [`tag::FN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Monotype {
    Variable(String),
    Application {
        constructor: String,
        arguments: Vec<Monotype>,
    },
}

impl Monotype {
    pub fn variable(name: impl Into<String>) -> Self {
        Monotype::Variable(name.into())
    }

    /// A nullary constructor application, e.g. the base type `int`.
    pub fn nullary(constructor: impl Into<String>) -> Self {
        Monotype::Application {
            constructor: constructor.into(),
            arguments: vec![],
        }
    }

    pub fn application(constructor: impl Into<String>, arguments: Vec<Monotype>) -> Self {
        Monotype::Application {
            constructor: constructor.into(),
            arguments,
        }
    }

    /// A single-argument function type `from -> to`.
    pub fn function(from: Monotype, to: Monotype) -> Self {
        Monotype::application(tag::FN, vec![from, to])
    }

    /// The variable name or constructor name at the root of the term.
    pub fn name(&self) -> &str {
        match self {
            Monotype::Variable(name) => name,
            Monotype::Application { constructor, .. } => constructor,
        }
    }

    /// Free variables in depth-first, left-to-right order. A variable that
    /// occurs more than once is reported more than once.
    pub fn free_variables(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_free_variables(&mut out);
        out
    }

    fn collect_free_variables(&self, out: &mut Vec<String>) {
        match self {
            Monotype::Variable(name) => out.push(name.clone()),
            Monotype::Application { arguments, .. } => {
                for argument in arguments {
                    argument.collect_free_variables(out);
                }
            }
        }
    }

    /// Occurs check: does `name` appear anywhere in this term?
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Monotype::Variable(own) => own == name,
            Monotype::Application { arguments, .. } => {
                arguments.iter().any(|argument| argument.contains(name))
            }
        }
    }
}

impl fmt::Display for Monotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Monotype::Variable(name) => write!(f, "{name}"),
            Monotype::Application {
                constructor,
                arguments,
            } => {
                if arguments.is_empty() {
                    return write!(f, "{constructor}");
                }
                write!(f, "{constructor}(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A possibly-quantified type scheme.
///
/// Quantifiers nest: `forall l. forall r. l -> r -> bool` is a chain of two
/// [`Polytype::Quantifier`] nodes around a monotype body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polytype {
    Mono(Monotype),
    Quantifier { bound: String, body: Box<Polytype> },
}

impl Polytype {
    pub fn quantifier(bound: impl Into<String>, body: Polytype) -> Self {
        Polytype::Quantifier {
            bound: bound.into(),
            body: Box::new(body),
        }
    }

    /// Free variables of the scheme, excluding quantified binders.
    pub fn free_variables(&self) -> Vec<String> {
        match self {
            Polytype::Mono(mono) => mono.free_variables(),
            Polytype::Quantifier { bound, body } => body
                .free_variables()
                .into_iter()
                .filter(|name| name != bound)
                .collect(),
        }
    }
}

impl From<Monotype> for Polytype {
    fn from(mono: Monotype) -> Self {
        Polytype::Mono(mono)
    }
}

impl fmt::Display for Polytype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polytype::Mono(mono) => write!(f, "{mono}"),
            Polytype::Quantifier { bound, body } => write!(f, "forall {bound}. {body}"),
        }
    }
}

#[cfg(test)]
#[path = "term_test.rs"]
mod term_test;
