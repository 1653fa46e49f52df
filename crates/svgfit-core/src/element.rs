//! Events produced by the tokenizer and consumed by the pipeline.

use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use svgfit_path::number::{format_number, parse_number};

/// An attribute value: source text, or a number computed by a transform.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Text(text) => parse_number(text),
            AttrValue::Number(v) => Some(*v),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            AttrValue::Text(text) => Cow::Borrowed(text),
            AttrValue::Number(v) => Cow::Owned(format_number(*v)),
        }
    }

    /// JS truthiness of the value: empty text and zero are "unset".
    pub(crate) fn is_set(&self) -> bool {
        match self {
            AttrValue::Text(text) => !text.is_empty(),
            AttrValue::Number(v) => *v != 0.0 && !v.is_nan(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

/// Attributes in source order. Inserting an existing key keeps its position; new keys go last.
pub type Attributes = IndexMap<String, AttrValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct ElementEvent {
    pub name: String,
    pub attributes: Attributes,
}

impl ElementEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn text_attr(&self, key: &str) -> Option<Cow<'_, str>> {
        self.attributes.get(key).map(AttrValue::as_text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlEvent {
    Open(ElementEvent),
    Close(String),
    Text(String),
    CData(String),
}
