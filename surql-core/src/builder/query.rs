//! Filter query builder: accumulates per-table state and renders
//! SELECT, CREATE, UPDATE or DELETE statements.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::common::{render_where, Conjunction, FilterClause, FilterOptions, IntoCondition, StatementBuilder};
use crate::transport::Transport;
use crate::{Error, Result, Value};

/// Statement kind rendered by [`FilterQueryBuilder::build_query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Select => "SELECT",
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Ok(Operation::Select),
            "CREATE" => Ok(Operation::Create),
            "UPDATE" => Ok(Operation::Update),
            "DELETE" => Ok(Operation::Delete),
            _ => Err(Error::invalid_operation(s)),
        }
    }
}

/// The namespace/database/query triple handed to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    pub namespace: String,
    pub db_name: String,
    pub query: String,
}

/// Filter query builder
///
/// # Examples
/// ```
/// use surql_core::{table, op, Operation};
///
/// let query = table("person")?
///     .namespace_and_db("app", "main")?
///     .filter(("age", op::GTE, 30))?
///     .sort("name")?
///     .limit(10)?
///     .build_query(Operation::Select)?;
///
/// assert_eq!(query, "SELECT * FROM person WHERE age >= '30' ORDER BY name LIMIT 10");
/// # Ok::<(), surql_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilterQueryBuilder {
    table_name: String,
    namespace: Option<String>,
    database: Option<String>,
    filters: Vec<FilterClause>,
    sort_field: Option<String>,
    limit_value: Option<u64>,
    data: Option<serde_json::Map<String, serde_json::Value>>,
}

fn require(argument: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::empty_argument(argument));
    }
    Ok(())
}

impl FilterQueryBuilder {
    /// Create a new builder for the given table
    pub fn new(table: &str) -> Result<Self> {
        require("table", table)?;

        Ok(Self {
            table_name: table.to_string(),
            namespace: None,
            database: None,
            filters: Vec::new(),
            sort_field: None,
            limit_value: None,
            data: None,
        })
    }

    /// Create a new builder with namespace and database already set
    pub fn with_target(table: &str, namespace: &str, database: &str) -> Result<Self> {
        Self::new(table)?.namespace_and_db(namespace, database)
    }

    /// Set namespace and database together
    pub fn namespace_and_db(self, namespace: &str, database: &str) -> Result<Self> {
        self.namespace(namespace)?.database(database)
    }

    /// Set the namespace
    pub fn namespace(mut self, namespace: &str) -> Result<Self> {
        require("namespace", namespace)?;
        self.namespace = Some(namespace.to_string());
        Ok(self)
    }

    /// Set the database
    pub fn database(mut self, database: &str) -> Result<Self> {
        require("database", database)?;
        self.database = Some(database.to_string());
        Ok(self)
    }

    /// Add a filter clause followed by `AND`
    ///
    /// # Examples
    /// ```
    /// use surql_core::{table, op};
    ///
    /// let query = table("users")?
    ///     .filter(("age", op::GT, 18))?
    ///     .filter(("name", "John"))?;
    /// # Ok::<(), surql_core::Error>(())
    /// ```
    pub fn filter<C>(self, condition: C) -> Result<Self>
    where
        C: IntoCondition,
    {
        self.push_condition(condition, Conjunction::And)
    }

    /// Add a filter clause followed by `OR`.
    ///
    /// The conjunction links this clause to the *next* one, so
    /// `.or_filter(a)?.filter(b)?` renders `a OR b`.
    pub fn or_filter<C>(self, condition: C) -> Result<Self>
    where
        C: IntoCondition,
    {
        self.push_condition(condition, Conjunction::Or)
    }

    /// Add a filter clause with explicit operator and conjunction
    pub fn filter_with<V>(mut self, field: &str, value: V, options: FilterOptions) -> Result<Self>
    where
        V: Into<Value>,
    {
        require("filter field", field)?;

        self.filters.push(FilterClause {
            field: field.to_string(),
            operator: options.operator,
            value: value.into(),
            conjunction: options.conjunction,
        });

        Ok(self)
    }

    fn push_condition<C>(self, condition: C, conjunction: Conjunction) -> Result<Self>
    where
        C: IntoCondition,
    {
        let (field, operator, value) = condition.into_condition()?;
        let options = FilterOptions::new().operator(operator).conjunction(conjunction);
        self.filter_with(&field, value, options)
    }

    /// Set the ORDER BY field, replacing any previous one
    pub fn sort(mut self, field: &str) -> Result<Self> {
        require("sort field", field)?;
        self.sort_field = Some(field.to_string());
        Ok(self)
    }

    /// Set the LIMIT clause, replacing any previous one
    pub fn limit(mut self, count: i64) -> Result<Self> {
        if count <= 0 {
            return Err(Error::validation(format!(
                "limit must be a positive integer, got {count}"
            )));
        }
        self.limit_value = Some(count.unsigned_abs());
        Ok(self)
    }

    /// Set the record written by CREATE and UPDATE.
    ///
    /// Anything that serializes to a JSON object is accepted; field order is
    /// kept exactly as serialized.
    pub fn data<T>(mut self, data: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(data)? {
            serde_json::Value::Object(map) => {
                self.data = Some(map);
                Ok(self)
            }
            other => Err(Error::validation(format!(
                "data must serialize to an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn namespace_name(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn database_name(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn filters(&self) -> &[FilterClause] {
        &self.filters
    }

    fn target(&self) -> Result<(&str, &str)> {
        let namespace = self
            .namespace
            .as_deref()
            .ok_or_else(|| Error::validation("namespace must be set before building a query"))?;
        let database = self
            .database
            .as_deref()
            .ok_or_else(|| Error::validation("database must be set before building a query"))?;
        Ok((namespace, database))
    }

    fn content(&self, operation: Operation) -> Result<String> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| Error::missing_data(operation.as_str()))?;
        Ok(serde_json::to_string(data)?)
    }

    fn push_where(&self, sql: &mut String) {
        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&render_where(&self.filters));
        }
    }

    /// Render the statement for the given operation
    pub fn build_query(&self, operation: Operation) -> Result<String> {
        self.target()?;

        let mut sql = String::new();

        match operation {
            Operation::Select => {
                sql.push_str("SELECT * FROM ");
                sql.push_str(&self.table_name);

                self.push_where(&mut sql);

                if let Some(sort) = &self.sort_field {
                    sql.push_str(" ORDER BY ");
                    sql.push_str(sort);
                }

                if let Some(limit) = self.limit_value {
                    sql.push_str(&format!(" LIMIT {limit}"));
                }
            }
            Operation::Create => {
                let content = self.content(operation)?;
                sql.push_str(&format!("CREATE {} CONTENT {content}", self.table_name));
            }
            Operation::Update => {
                let content = self.content(operation)?;
                sql.push_str(&format!("UPDATE {} CONTENT {content}", self.table_name));

                self.push_where(&mut sql);
            }
            Operation::Delete => {
                sql.push_str("DELETE FROM ");
                sql.push_str(&self.table_name);

                self.push_where(&mut sql);
            }
        }

        debug!(
            table = %self.table_name,
            operation = %operation,
            clauses = self.filters.len(),
            "rendered query"
        );

        Ok(sql)
    }

    /// Render the statement from an operation token such as `"SELECT"`
    pub fn build_query_str(&self, operation: &str) -> Result<String> {
        self.build_query(operation.parse()?)
    }

    /// Render the statement and wrap it with its namespace and database
    pub fn query_payload(&self, operation: Operation) -> Result<QueryPayload> {
        let query = self.build_query(operation)?;
        let (namespace, database) = self.target()?;

        Ok(QueryPayload {
            namespace: namespace.to_string(),
            db_name: database.to_string(),
            query,
        })
    }

    /// Build the payload and submit it through the given transport
    pub async fn execute<T>(&self, operation: Operation, transport: &T) -> Result<serde_json::Value>
    where
        T: Transport,
    {
        let payload = self.query_payload(operation)?;
        transport.send(&payload).await
    }
}

impl StatementBuilder for FilterQueryBuilder {
    type Kind = Operation;

    fn to_statement(&self, kind: Operation) -> Result<String> {
        self.build_query(kind)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
