//! Index descriptors

use crate::{Error, Result};

/// A named index over one or more fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub name: String,
    pub fields: Vec<String>,
    pub unique: bool,
}

impl IndexDescriptor {
    /// Create a non-unique index; `fields` must contain at least one non-empty name
    pub fn new<I, S>(name: &str, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if name.trim().is_empty() {
            return Err(Error::empty_argument("index name"));
        }

        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(Error::validation(format!(
                "index '{name}' must cover at least one field"
            )));
        }
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(Error::empty_argument("index field"));
        }

        Ok(Self {
            name: name.to_string(),
            fields,
            unique: false,
        })
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// `DEFINE INDEX <name> ON TABLE <table> FIELDS <fields>[ UNIQUE];`
    pub fn definition(&self, table: &str) -> String {
        format!(
            "DEFINE INDEX {} ON TABLE {table} FIELDS {}{};",
            self.name,
            self.fields.join(", "),
            if self.unique { " UNIQUE" } else { "" }
        )
    }
}
