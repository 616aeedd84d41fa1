//! Comparison operators for filter clauses

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Error, Result};

/// Comparison operator used between a field and its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator(&'static str);

impl Operator {
    pub const EQ: Self = Operator("=");
    pub const GT: Self = Operator(">");
    pub const LT: Self = Operator("<");
    pub const GTE: Self = Operator(">=");
    pub const LTE: Self = Operator("<=");
    pub const NEQ: Self = Operator("!=");

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Operator {
    fn default() -> Self {
        Operator::EQ
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "=" => Ok(Operator::EQ),
            ">" => Ok(Operator::GT),
            "<" => Ok(Operator::LT),
            ">=" => Ok(Operator::GTE),
            "<=" => Ok(Operator::LTE),
            "!=" => Ok(Operator::NEQ),
            other => Err(Error::validation(format!(
                "unknown operator '{other}', expected one of =, >, <, >=, <=, !="
            ))),
        }
    }
}

/// Trait for types that can be converted to comparison operators
pub trait IntoOperator {
    fn into_operator(self) -> Result<Operator>;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Result<Operator> {
        Ok(self)
    }
}

impl IntoOperator for &str {
    fn into_operator(self) -> Result<Operator> {
        self.parse()
    }
}

/// Convenience module for operator constants
pub mod op {
    use super::Operator;

    pub const EQ: Operator = Operator::EQ;
    pub const GT: Operator = Operator::GT;
    pub const LT: Operator = Operator::LT;
    pub const GTE: Operator = Operator::GTE;
    pub const LTE: Operator = Operator::LTE;
    pub const NEQ: Operator = Operator::NEQ;
}
