//! Filter query builder module

pub mod common;
pub mod query;

// Re-export types from submodules
pub use common::{Conjunction, FilterClause, FilterOptions, IntoCondition, StatementBuilder};
pub use query::{FilterQueryBuilder, Operation, QueryPayload};
