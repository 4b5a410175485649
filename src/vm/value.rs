/// A runtime value on a frame's operand stack.
///
/// Equality is tag-strict: values of different tags never compare equal, and
/// `Unit` only equals itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    String(String),
    Boolean(bool),
    Unit,
}

impl Value {
    /// Tag name used in runtime error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Unit => "unit",
        }
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod value_test;
