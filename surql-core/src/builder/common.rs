//! Common types and traits shared by the statement builders

use std::fmt::{self, Display};

use crate::{IntoOperator, Operator, Result, Value};

/// Core trait for builders that render a single statement string
pub trait StatementBuilder {
    /// The statement kind selector, `()` for builders with a single output
    type Kind;

    /// Render the statement text
    fn to_statement(&self, kind: Self::Kind) -> Result<String>;
}

/// Trait for conditions that can be used as filter clauses
pub trait IntoCondition {
    fn into_condition(self) -> Result<(String, Operator, Value)>;
}

// Shorthand equality: filter(("age", 18))
impl<T> IntoCondition for (&str, T)
where
    T: Into<Value>,
{
    fn into_condition(self) -> Result<(String, Operator, Value)> {
        Ok((self.0.to_string(), Operator::EQ, self.1.into()))
    }
}

// Explicit operators: filter(("age", op::GT, 18)) or filter(("age", ">", 18))
impl<T, O> IntoCondition for (&str, O, T)
where
    T: Into<Value>,
    O: IntoOperator,
{
    fn into_condition(self) -> Result<(String, Operator, Value)> {
        Ok((self.0.to_string(), self.1.into_operator()?, self.2.into()))
    }
}

/// Logical token emitted after a clause when another clause follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

impl Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-clause options with documented defaults: `=` and `AND`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub operator: Operator,
    pub conjunction: Conjunction,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn conjunction(mut self, conjunction: Conjunction) -> Self {
        self.conjunction = conjunction;
        self
    }
}

/// One predicate plus the conjunction that links it to the next clause
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
    pub conjunction: Conjunction,
}

impl FilterClause {
    /// Render the predicate without its conjunction, e.g. `age >= '30'`
    pub fn predicate(&self) -> String {
        format!("{} {} {}", self.field, self.operator, self.value.to_literal())
    }
}

/// Join clauses in order, emitting each conjunction only between clauses.
///
/// The last clause's conjunction never appears in the output.
pub fn render_where(clauses: &[FilterClause]) -> String {
    let mut fragment = String::new();

    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            fragment.push(' ');
            fragment.push_str(clauses[i - 1].conjunction.as_str());
            fragment.push(' ');
        }
        fragment.push_str(&clause.predicate());
    }

    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::op;

    fn clause(field: &str, operator: Operator, value: impl Into<Value>, conjunction: Conjunction) -> FilterClause {
        FilterClause {
            field: field.to_string(),
            operator,
            value: value.into(),
            conjunction,
        }
    }

    #[test]
    fn test_condition_trait_implementations() {
        let (field, operator, value) = ("age", 18).into_condition().unwrap();
        assert_eq!(field, "age");
        assert_eq!(operator, Operator::EQ);
        assert_eq!(value, Value::I32(18));

        let (_, operator, _) = ("age", op::GT, 18).into_condition().unwrap();
        assert_eq!(operator, Operator::GT);

        let (_, operator, value) = ("status", "!=", "active").into_condition().unwrap();
        assert_eq!(operator, Operator::NEQ);
        assert_eq!(value, Value::String("active".to_string()));
    }

    #[test]
    fn test_condition_with_unknown_operator_fails() {
        assert!(("age", "~", 18).into_condition().is_err());
    }

    #[test]
    fn test_filter_options_defaults() {
        let options = FilterOptions::default();
        assert_eq!(options.operator, Operator::EQ);
        assert_eq!(options.conjunction, Conjunction::And);

        let options = FilterOptions::new().operator(op::LT).conjunction(Conjunction::Or);
        assert_eq!(options.operator, Operator::LT);
        assert_eq!(options.conjunction, Conjunction::Or);
    }

    #[test]
    fn test_render_where_drops_final_conjunction() {
        let clauses = vec![
            clause("age", op::GTE, 30, Conjunction::Or),
            clause("name", op::EQ, "John", Conjunction::Or),
            clause("status", op::NEQ, "active", Conjunction::Or),
        ];
        assert_eq!(
            render_where(&clauses),
            "age >= '30' OR name = 'John' OR status != 'active'"
        );
    }

    #[test]
    fn test_render_where_keeps_values_ending_in_conjunction_text() {
        let clauses = vec![
            clause("brand", op::EQ, "AND", Conjunction::And),
            clause("city", op::EQ, "PORTLAND OR", Conjunction::Or),
        ];
        assert_eq!(render_where(&clauses), "brand = 'AND' AND city = 'PORTLAND OR'");
    }

    #[test]
    fn test_render_single_clause() {
        let clauses = vec![clause("id", op::EQ, 1, Conjunction::Or)];
        assert_eq!(render_where(&clauses), "id = '1'");
    }
}
