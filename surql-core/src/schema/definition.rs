//! Schema definition builder: renders DEFINE TABLE / FIELD / INDEX statements

use std::fmt::{self, Display};

use tracing::debug;

use super::field::FieldDescriptor;
use super::index::IndexDescriptor;
use crate::builder::common::StatementBuilder;
use crate::{Error, Result};

/// Whether a table enforces its declared fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaMode {
    #[default]
    Schemafull,
    Schemaless,
}

impl SchemaMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaMode::Schemafull => "SCHEMAFULL",
            SchemaMode::Schemaless => "SCHEMALESS",
        }
    }
}

impl Display for SchemaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated table definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table: String,
    pub mode: SchemaMode,
    pub fields: Vec<(String, FieldDescriptor)>,
    pub indexes: Vec<IndexDescriptor>,
}

impl TableSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, descriptor)| descriptor)
    }
}

/// Schema definition builder
///
/// # Examples
/// ```
/// use surql_core::{define_table, FieldDescriptor, IndexDescriptor, SchemaMode};
///
/// let statement = define_table("person", SchemaMode::Schemafull)?
///     .field("name", FieldDescriptor::string())?
///     .field("company", FieldDescriptor::record("company").optional())?
///     .index(IndexDescriptor::new("idx_name", ["name"])?.unique())
///     .generate();
///
/// assert_eq!(
///     statement,
///     "DEFINE TABLE IF NOT EXISTS person SCHEMAFULL;\n\
///      DEFINE FIELD name ON TABLE person TYPE string;\n\
///      DEFINE FIELD company ON TABLE person TYPE option<id> REFERENCES TABLE company;\n\
///      DEFINE INDEX idx_name ON TABLE person FIELDS name UNIQUE;"
/// );
/// # Ok::<(), surql_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema: TableSchema,
    target: Option<(String, String)>,
}

impl SchemaBuilder {
    /// Create a new builder for the given table and mode
    pub fn new(table: &str, mode: SchemaMode) -> Result<Self> {
        if table.trim().is_empty() {
            return Err(Error::empty_argument("table"));
        }

        Ok(Self {
            schema: TableSchema {
                table: table.to_string(),
                mode,
                fields: Vec::new(),
                indexes: Vec::new(),
            },
            target: None,
        })
    }

    /// Create a builder from an ordered field mapping
    pub fn with_fields<I, K>(table: &str, mode: SchemaMode, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, FieldDescriptor)>,
        K: AsRef<str>,
    {
        fields
            .into_iter()
            .try_fold(Self::new(table, mode)?, |builder, (name, descriptor)| {
                builder.field(name.as_ref(), descriptor)
            })
    }

    /// Add a field, or replace an existing one in place
    pub fn field(mut self, name: &str, descriptor: FieldDescriptor) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::empty_argument("field name"));
        }

        match self.schema.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, existing)) => *existing = descriptor,
            None => self.schema.fields.push((name.to_string(), descriptor)),
        }

        Ok(self)
    }

    /// Add fields declared as raw type tokens, e.g. `("company", "record(company)")`.
    ///
    /// Every token is validated before any field is added.
    pub fn define_schema<I, K, V>(self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let parsed = fields
            .into_iter()
            .map(|(name, token)| {
                let name = name.as_ref();
                FieldDescriptor::parse(name, token.as_ref()).map(|descriptor| (name.to_string(), descriptor))
            })
            .collect::<Result<Vec<_>>>()?;

        parsed
            .into_iter()
            .try_fold(self, |builder, (name, descriptor)| builder.field(&name, descriptor))
    }

    /// Add an index
    pub fn index(mut self, index: IndexDescriptor) -> Self {
        self.schema.indexes.push(index);
        self
    }

    /// Use the namespaced header `DEFINE TABLE <ns>.<db>.<table> <mode> FIELDS ...;`
    pub fn qualified(mut self, namespace: &str, database: &str) -> Result<Self> {
        if namespace.trim().is_empty() {
            return Err(Error::empty_argument("namespace"));
        }
        if database.trim().is_empty() {
            return Err(Error::empty_argument("database"));
        }
        self.target = Some((namespace.to_string(), database.to_string()));
        Ok(self)
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn header(&self) -> String {
        let schema = &self.schema;
        match &self.target {
            None => format!("DEFINE TABLE IF NOT EXISTS {} {};", schema.table, schema.mode),
            Some((namespace, database)) => {
                let pairs: Vec<String> = schema
                    .fields
                    .iter()
                    .map(|(name, descriptor)| format!("{name}: {}", descriptor.token()))
                    .collect();
                format!(
                    "DEFINE TABLE {namespace}.{database}.{} {} FIELDS {};",
                    schema.table,
                    schema.mode,
                    pairs.join(", ")
                )
            }
        }
    }

    /// Render header, field lines and index lines, newline-separated
    pub fn generate(&self) -> String {
        let schema = &self.schema;

        let mut lines = Vec::with_capacity(1 + schema.fields.len() + schema.indexes.len());
        lines.push(self.header());
        lines.extend(
            schema
                .fields
                .iter()
                .map(|(name, descriptor)| descriptor.definition(name, &schema.table)),
        );
        lines.extend(schema.indexes.iter().map(|index| index.definition(&schema.table)));

        debug!(
            table = %schema.table,
            fields = schema.fields.len(),
            indexes = schema.indexes.len(),
            "generated schema definition"
        );

        lines.join("\n")
    }
}

impl StatementBuilder for SchemaBuilder {
    type Kind = ();

    fn to_statement(&self, _kind: ()) -> Result<String> {
        Ok(self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> SchemaBuilder {
        SchemaBuilder::new("person", SchemaMode::Schemafull).unwrap()
    }

    #[test]
    fn test_header_only() {
        assert_eq!(person().generate(), "DEFINE TABLE IF NOT EXISTS person SCHEMAFULL;");

        let logs = SchemaBuilder::new("log", SchemaMode::Schemaless).unwrap();
        assert_eq!(logs.generate(), "DEFINE TABLE IF NOT EXISTS log SCHEMALESS;");
    }

    #[test]
    fn test_empty_table_fails() {
        assert!(SchemaBuilder::new("", SchemaMode::Schemafull).is_err());
    }

    #[test]
    fn test_fields_then_indexes_in_declaration_order() {
        let sql = person()
            .index(IndexDescriptor::new("idx_email", ["email"]).unwrap().unique())
            .field("name", FieldDescriptor::string())
            .unwrap()
            .field("email", FieldDescriptor::string())
            .unwrap()
            .field("tags", FieldDescriptor::array_of(FieldDescriptor::string()).optional())
            .unwrap()
            .field("settings", FieldDescriptor::flexible_object())
            .unwrap()
            .generate();

        assert_eq!(
            sql,
            "DEFINE TABLE IF NOT EXISTS person SCHEMAFULL;\n\
             DEFINE FIELD name ON TABLE person TYPE string;\n\
             DEFINE FIELD email ON TABLE person TYPE string;\n\
             DEFINE FIELD tags ON TABLE person TYPE option<array<string>>;\n\
             DEFINE FIELD settings ON TABLE person TYPE FLEXIBLE TYPE object;\n\
             DEFINE INDEX idx_email ON TABLE person FIELDS email UNIQUE;"
        );
    }

    #[test]
    fn test_with_fields_keeps_mapping_order() {
        let builder = SchemaBuilder::with_fields(
            "post",
            SchemaMode::Schemafull,
            vec![
                ("title", FieldDescriptor::string()),
                ("author", FieldDescriptor::record("user")),
                ("published", FieldDescriptor::boolean()),
            ],
        )
        .unwrap();

        let names: Vec<&str> = builder.schema().fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["title", "author", "published"]);
        assert!(builder
            .generate()
            .contains("DEFINE FIELD author ON TABLE post TYPE id REFERENCES TABLE user;"));
    }

    #[test]
    fn test_redefining_a_field_keeps_its_position() {
        let builder = person()
            .field("age", FieldDescriptor::string())
            .unwrap()
            .field("name", FieldDescriptor::string())
            .unwrap()
            .field("age", FieldDescriptor::number())
            .unwrap();

        assert_eq!(builder.schema().fields[0].0, "age");
        assert_eq!(builder.schema().field("age"), Some(&FieldDescriptor::number()));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let builder = person()
            .field("name", FieldDescriptor::string())
            .unwrap()
            .index(IndexDescriptor::new("idx_name", ["name"]).unwrap());

        assert_eq!(builder.generate(), builder.generate());
    }

    #[test]
    fn test_define_schema_from_tokens() {
        let sql = person()
            .define_schema([("name", "string"), ("age", "int"), ("company", "record(company)")])
            .unwrap()
            .generate();

        assert!(sql.contains("DEFINE FIELD age ON TABLE person TYPE int;"));
        assert!(sql.contains("DEFINE FIELD company ON TABLE person TYPE id REFERENCES TABLE company;"));
    }

    #[test]
    fn test_define_schema_rejects_empty_record() {
        let err = person()
            .define_schema([("name", "string"), ("company", "record()")])
            .unwrap_err();

        assert!(matches!(err, Error::InvalidRecordReference { ref field, .. } if field == "company"));
        assert!(err.to_string().contains("company"));
    }

    #[test]
    fn test_qualified_header() {
        let sql = person()
            .qualified("app", "main")
            .unwrap()
            .define_schema([("name", "string"), ("company", "record(company)")])
            .unwrap()
            .generate();

        let header = sql.lines().next().unwrap();
        assert_eq!(
            header,
            "DEFINE TABLE app.main.person SCHEMAFULL FIELDS name: string, company: record(company);"
        );
        assert_eq!(sql.lines().count(), 3);
    }

    #[test]
    fn test_qualified_header_uses_builder_mode() {
        let sql = SchemaBuilder::new("log", SchemaMode::Schemaless)
            .unwrap()
            .qualified("app", "main")
            .unwrap()
            .field("message", FieldDescriptor::string())
            .unwrap()
            .generate();

        assert_eq!(
            sql,
            "DEFINE TABLE app.main.log SCHEMALESS FIELDS message: string;\n\
             DEFINE FIELD message ON TABLE log TYPE string;"
        );
    }

    #[test]
    fn test_qualified_requires_names() {
        assert!(person().qualified("", "main").is_err());
        assert!(person().qualified("app", " ").is_err());
    }

    #[test]
    fn test_statement_builder_trait() {
        let builder = person();
        assert_eq!(builder.to_statement(()).unwrap(), builder.generate());
    }
}
