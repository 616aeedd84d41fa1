//! Field type descriptors and raw type-token parsing

use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Result};

/// Base type tag of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Record id, optionally pointing at another table
    Id { reference: Option<String> },
    String,
    Number,
    Boolean,
    Int,
    Float,
    Datetime,
    Any,
    /// Array, optionally with a declared item type
    Array { item: Option<Box<FieldDescriptor>> },
    /// Object; flexible objects accept undeclared nested fields
    Object { flexible: bool },
}

/// A field's type plus the optional wrapper
///
/// # Examples
/// ```
/// use surql_core::FieldDescriptor;
///
/// let tags = FieldDescriptor::array_of(FieldDescriptor::string()).optional();
/// assert_eq!(tags.type_text(), "option<array<string>>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    kind: FieldType,
    optional: bool,
}

fn record_pattern() -> &'static Regex {
    static RECORD_RE: OnceLock<Regex> = OnceLock::new();
    RECORD_RE.get_or_init(|| {
        Regex::new(r"^record\(([A-Za-z_][A-Za-z0-9_]*)\)$").expect("invalid built-in record regex")
    })
}

impl FieldDescriptor {
    pub fn new(kind: FieldType) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    pub fn id() -> Self {
        Self::new(FieldType::Id { reference: None })
    }

    /// Record id referencing `table`
    pub fn record(table: &str) -> Self {
        Self::new(FieldType::Id {
            reference: Some(table.to_string()),
        })
    }

    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    pub fn int() -> Self {
        Self::new(FieldType::Int)
    }

    pub fn float() -> Self {
        Self::new(FieldType::Float)
    }

    pub fn datetime() -> Self {
        Self::new(FieldType::Datetime)
    }

    pub fn any() -> Self {
        Self::new(FieldType::Any)
    }

    /// Array without a declared item type
    pub fn array() -> Self {
        Self::new(FieldType::Array { item: None })
    }

    pub fn array_of(item: FieldDescriptor) -> Self {
        Self::new(FieldType::Array {
            item: Some(Box::new(item)),
        })
    }

    pub fn object() -> Self {
        Self::new(FieldType::Object { flexible: false })
    }

    pub fn flexible_object() -> Self {
        Self::new(FieldType::Object { flexible: true })
    }

    /// Wrap the field as `option<...>`
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn kind(&self) -> &FieldType {
        &self.kind
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Referenced table, for id fields only
    pub fn reference(&self) -> Option<&str> {
        match &self.kind {
            FieldType::Id { reference } => reference.as_deref(),
            _ => None,
        }
    }

    fn base_text(&self) -> String {
        match &self.kind {
            FieldType::Id { .. } => "id".to_string(),
            FieldType::String => "string".to_string(),
            FieldType::Number => "number".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Int => "int".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::Datetime => "datetime".to_string(),
            FieldType::Any => "any".to_string(),
            FieldType::Array { item: None } => "array".to_string(),
            FieldType::Array { item: Some(item) } => format!("array<{}>", item.item_text()),
            FieldType::Object { flexible: false } => "object".to_string(),
            FieldType::Object { flexible: true } => "FLEXIBLE TYPE object".to_string(),
        }
    }

    // Item types render their base tag only: no option wrapper, no FLEXIBLE
    fn item_text(&self) -> String {
        match &self.kind {
            FieldType::Object { .. } => "object".to_string(),
            FieldType::Array { item: Some(item) } => format!("array<{}>", item.item_text()),
            _ => self.base_text(),
        }
    }

    /// Rendered type text, `option<...>` applied last
    pub fn type_text(&self) -> String {
        let base = self.base_text();
        if self.optional {
            format!("option<{base}>")
        } else {
            base
        }
    }

    /// ` REFERENCES TABLE <table>` for id fields with a reference, else empty
    pub fn reference_suffix(&self) -> String {
        match self.reference() {
            Some(table) => format!(" REFERENCES TABLE {table}"),
            None => String::new(),
        }
    }

    /// `DEFINE FIELD <name> ON TABLE <table> TYPE <type><suffix>;`
    pub fn definition(&self, name: &str, table: &str) -> String {
        format!(
            "DEFINE FIELD {name} ON TABLE {table} TYPE {}{};",
            self.type_text(),
            self.reference_suffix()
        )
    }

    /// Raw type token, e.g. `record(company)` or `option<string>`.
    ///
    /// Type tokens have no flexible form, so a flexible object yields `object`;
    /// the flag only shows up in [`FieldDescriptor::definition`].
    pub fn token(&self) -> String {
        let base = match &self.kind {
            FieldType::Id {
                reference: Some(table),
            } => format!("record({table})"),
            FieldType::Id { reference: None } => "id".to_string(),
            FieldType::Boolean => "bool".to_string(),
            FieldType::Array { item: Some(item) } => format!("array<{}>", item.token()),
            FieldType::Object { .. } => "object".to_string(),
            _ => self.base_text(),
        };
        if self.optional {
            format!("option<{base}>")
        } else {
            base
        }
    }

    /// Parse a raw type token declared for `field`.
    ///
    /// Tokens starting with `record` must be exactly `record(<table>)`.
    pub fn parse(field: &str, token: &str) -> Result<Self> {
        let token = token.trim();

        if token.starts_with("record") {
            return match record_pattern().captures(token) {
                Some(caps) => Ok(Self::record(&caps[1])),
                None => Err(Error::invalid_record_reference(field, token)),
            };
        }

        if let Some(inner) = strip_wrapper(token, "option") {
            return Ok(Self::parse(field, inner)?.optional());
        }

        if let Some(inner) = strip_wrapper(token, "array") {
            return Ok(Self::array_of(Self::parse(field, inner)?));
        }

        let descriptor = match token {
            "id" => Self::id(),
            "string" => Self::string(),
            "number" => Self::number(),
            "bool" | "boolean" => Self::boolean(),
            "int" => Self::int(),
            "float" => Self::float(),
            "datetime" => Self::datetime(),
            "any" => Self::any(),
            "array" => Self::array(),
            "object" => Self::object(),
            other => {
                return Err(Error::validation(format!(
                    "unsupported type '{other}' for field '{field}'"
                )))
            }
        };

        Ok(descriptor)
    }
}

// "option<string>" -> Some("string")
fn strip_wrapper<'a>(token: &'a str, wrapper: &str) -> Option<&'a str> {
    token
        .strip_prefix(wrapper)?
        .strip_prefix('<')?
        .strip_suffix('>')
}
