/// The lambda-calculus IR that inference runs on.
///
/// Surface statements are lowered into this four-variant calculus; literal
/// values disappear in the process (an integer literal lowers to the variable
/// `int`, which the seeded context binds to the `int` base type).
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Variable(String),
    Application {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Abstraction {
        argument: String,
        body: Box<Expression>,
    },
    Let {
        variable: String,
        value: Box<Expression>,
        body: Box<Expression>,
    },
}

impl Expression {
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    pub fn application(left: Expression, right: Expression) -> Self {
        Expression::Application {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn abstraction(argument: impl Into<String>, body: Expression) -> Self {
        Expression::Abstraction {
            argument: argument.into(),
            body: Box::new(body),
        }
    }

    pub fn binding(variable: impl Into<String>, value: Expression, body: Expression) -> Self {
        Expression::Let {
            variable: variable.into(),
            value: Box::new(value),
            body: Box::new(body),
        }
    }
}
