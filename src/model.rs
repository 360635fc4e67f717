//! Decoded frame model
//!
//! Values produced by the decoder. Everything here is built fresh for each
//! decode call and never mutated once handed to the caller.

use std::fmt;

use serde::Serialize;

/// Declared type of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Float,
    Integer,
    String,
    Coords,
}

impl AttributeType {
    /// Name as written on the wire; same text serde emits
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Float => "float",
            AttributeType::Integer => "integer",
            AttributeType::String => "string",
            AttributeType::Coords => "coords",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata entry attached to an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub value: String,
}

/// One named, typed fact extracted from a module report
///
/// The value stays as the raw text the stack sent; `kind` tells the
/// consumer how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(rename = "metadatas", skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<Metadata>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            metadata: Vec::new(),
        }
    }

    pub fn float(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, AttributeType::Float)
    }

    pub fn integer(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, AttributeType::Integer)
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, AttributeType::String)
    }

    pub fn coords(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, AttributeType::Coords)
    }

    /// Attach a metadata entry, keeping insertion order
    pub fn with_metadata(
        mut self,
        name: impl Into<String>,
        kind: AttributeType,
        value: impl Into<String>,
    ) -> Self {
        self.metadata.push(Metadata {
            name: name.into(),
            kind,
            value: value.into(),
        });
        self
    }
}

/// Requested next-report timing and the condition gating it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SleepDirective {
    pub value: String,
    pub condition: String,
}

/// One decoded module segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    /// Echoed id from field 0 of the segment
    pub id: String,

    /// Module code as sent (`K1`, `GPS`, ...)
    pub module: String,

    pub attributes: Vec<Attribute>,

    /// Attribute names whose current value the broker should fetch
    pub queries: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<SleepDirective>,

    pub stack_id: String,

    /// Black Button selector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    /// Black Button request correlation id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ModuleRecord {
    /// Look up the first attribute with the given name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Result of decoding a whole frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedPayload {
    /// Stack id from the frame header
    pub id: String,

    /// One record per module segment, in frame order
    pub modules: Vec<ModuleRecord>,
}
