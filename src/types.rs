//! Core types for formsync

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

/// Navigation parameters and reconciled state both use JSON objects
pub type Parameters = Map<String, Value>;

/// A file selected in a file input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    /// File name as reported by the input
    pub file_name: String,
    /// MIME type, if known
    pub content_type: Option<String>,
    /// File contents
    pub bytes: Vec<u8>,
}

impl FileBlob {
    /// Create a file blob without a content type
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Set the MIME type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Value of a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text, number and checkbox inputs, coerced to string
    Text(String),
    /// File input
    File(FileBlob),
}

impl FieldValue {
    /// Coerce any displayable value (numbers, booleans) to a text value
    pub fn coerce(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    /// String used when the field is encoded into a query string.
    ///
    /// Files contribute their file name.
    pub fn as_query_value(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::File(file) => &file.file_name,
        }
    }

    /// Whether this is a file value
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<FileBlob> for FieldValue {
    fn from(value: FileBlob) -> Self {
        Self::File(value)
    }
}

/// One (name, value) pair extracted from a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: FieldValue,
}

/// Ordered field set extracted from a submitted form.
///
/// Names may repeat; order is extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFieldSet {
    fields: Vec<FormField>,
}

impl FormFieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, keeping any existing fields with the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push(FormField {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Builder-style [`append`](Self::append)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.append(name, value);
        self
    }

    /// All values submitted under `name`, in order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldValue> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.name == name)
            .map(|f| &f.value)
    }

    /// Iterate fields in extraction order
    pub fn iter(&self) -> std::slice::Iter<'_, FormField> {
        self.fields.iter()
    }

    /// Number of fields (repeated names counted separately)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether any field carries a file
    pub fn has_files(&self) -> bool {
        self.fields.iter().any(|f| f.value.is_file())
    }
}

impl<'a> IntoIterator for &'a FormFieldSet {
    type Item = &'a FormField;
    type IntoIter = std::slice::Iter<'a, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormFieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.append(name, value);
        }
        set
    }
}

/// Transport strategy a form method normalizes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Fields encoded into the query string of a GET request
    Query,
    /// Fields sent as a multipart body of a POST request
    Body,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
        }
    }
}

/// Resolved strategy and target for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionIntent {
    /// Transport strategy
    pub strategy: Strategy,
    /// Absolute request URL
    pub target: Url,
    /// Query string written to history on success (`None` clears it)
    pub query: Option<String>,
}

/// Server instruction to navigate client-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationDirective {
    /// Destination page id
    #[serde(alias = "target")]
    pub page: String,
    /// Page parameters
    #[serde(default)]
    pub parameters: Parameters,
    /// Location the page lives at, if the server supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Unified response contract: flat payloads become an envelope with no directive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
    /// Values the state container is reconciled to
    pub data: Parameters,
    /// Optional navigation directive
    pub navigate: Option<NavigationDirective>,
}

/// A page id plus parameters, as produced by a page resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRoute {
    /// Page id
    pub page: String,
    /// Page parameters
    #[serde(default)]
    pub parameters: Parameters,
}
