//! Schema definition builder module

pub mod definition;
pub mod field;
pub mod index;

pub use definition::{SchemaBuilder, SchemaMode, TableSchema};
pub use field::{FieldDescriptor, FieldType};
pub use index::IndexDescriptor;
