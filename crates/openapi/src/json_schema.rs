//! JSON-Schema shaped nodes embedded in the OpenAPI document.

use indexmap::IndexMap;
use serde::Serialize;

/// The JSON value kind a schema node describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
}

/// A schema object as it appears under `components`/`content` in OpenAPI 3.0.
///
/// Non-null GraphQL types never produce a node-level nullability flag; they
/// only show up in the `required` list of the containing object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl SchemaNode {
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            format: None,
            description: None,
            enum_values: Vec::new(),
            items: None,
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }

    #[must_use]
    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    #[must_use]
    pub fn object() -> Self {
        Self::new(SchemaKind::Object)
    }

    #[must_use]
    pub fn array(items: Self) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaKind::Array)
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Add an object property, listing it as required when asked to.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Self, required: bool) -> Self {
        let name = name.into();
        if required && !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }
}
