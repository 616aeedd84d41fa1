//! surql-core - fluent statement builders for SurrealQL
//!
//! Two independent builders live here:
//!
//! - [`FilterQueryBuilder`] accumulates filters, ordering, limits and record
//!   data for one table and renders SELECT, CREATE, UPDATE or DELETE text, or
//!   a [`QueryPayload`] ready for a [`Transport`].
//! - [`SchemaBuilder`] accumulates field and index descriptors and renders
//!   `DEFINE TABLE` / `DEFINE FIELD` / `DEFINE INDEX` statements.
//!
//! ```
//! use surql_core::{table, op, Operation};
//!
//! let sql = table("person")?
//!     .namespace_and_db("app", "main")?
//!     .filter(("age", 30))?
//!     .or_filter(("name", "John"))?
//!     .filter(("status", "active"))?
//!     .build_query(Operation::Select)?;
//!
//! assert_eq!(sql, "SELECT * FROM person WHERE age = '30' AND name = 'John' OR status = 'active'");
//! # Ok::<(), surql_core::Error>(())
//! ```

pub mod builder;
pub mod error;
pub mod operator;
pub mod schema;
pub mod transport;
pub mod value;

// Re-export main types
pub use builder::{
    Conjunction, FilterClause, FilterOptions, FilterQueryBuilder, IntoCondition, Operation,
    QueryPayload, StatementBuilder,
};
pub use error::{Error, Result};
pub use operator::{op, IntoOperator, Operator};
pub use schema::{FieldDescriptor, FieldType, IndexDescriptor, SchemaBuilder, SchemaMode, TableSchema};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{Transport, TransportConfig};
pub use value::Value;

/// Create a new filter query builder for the given table
pub fn table(name: &str) -> Result<FilterQueryBuilder> {
    FilterQueryBuilder::new(name)
}

/// Create a new schema definition builder for the given table
pub fn define_table(name: &str, mode: SchemaMode) -> Result<SchemaBuilder> {
    SchemaBuilder::new(name, mode)
}
