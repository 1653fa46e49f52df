use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How `"` characters inside attribute values are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuoteEscape {
    /// Escape only the first `"` of each value. Matches the output of the icon pipelines this
    /// tool replaces; a value with several quotes produces malformed XML.
    #[default]
    #[serde(rename = "first")]
    FirstOnly,
    /// Escape every `&`, `<` and `"`.
    #[serde(rename = "all")]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOptions {
    /// Scale applied when no target `width` is set. Default: 1
    pub scale: f64,
    /// Target edge length of the square viewport. Overrides `scale` when set.
    pub width: Option<f64>,
    /// Re-emit character data and CDATA. Default: false (only tags are written)
    pub preserve_text: bool,
    pub quote_escape: QuoteEscape,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            width: None,
            preserve_text: false,
            quote_escape: QuoteEscape::FirstOnly,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    scale: Option<f64>,
    width: Option<f64>,
    preserve_text: Option<bool>,
    quote_escape: Option<QuoteEscape>,
}

impl TransformOptions {
    /// Builds options from a JSON object such as `{"width": 24}` or
    /// `{"scale": 2, "quoteEscape": "all"}`. `null` fields fall back to defaults.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::config("options need an object"));
        }
        let raw: RawOptions =
            serde_json::from_value(value).map_err(|e| Error::config(e.to_string()))?;
        let defaults = Self::default();
        let options = Self {
            scale: raw.scale.unwrap_or(defaults.scale),
            width: raw.width,
            preserve_text: raw.preserve_text.unwrap_or(defaults.preserve_text),
            quote_escape: raw.quote_escape.unwrap_or(defaults.quote_escape),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_width(mut self, width: Option<f64>) -> Self {
        self.width = width;
        self
    }

    pub fn with_preserve_text(mut self, preserve_text: bool) -> Self {
        self.preserve_text = preserve_text;
        self
    }

    pub fn with_quote_escape(mut self, quote_escape: QuoteEscape) -> Self {
        self.quote_escape = quote_escape;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::config(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if let Some(width) = self.width {
            if !(width.is_finite() && width > 0.0) {
                return Err(Error::config(format!(
                    "width must be a positive number, got {width}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_is_rejected() {
        for value in [json!(5), json!("width"), json!([1, 2]), Value::Null] {
            let err = TransformOptions::from_value(value).unwrap_err();
            assert_eq!(err.to_string(), "invalid options: options need an object");
        }
    }

    #[test]
    fn empty_object_gives_defaults() {
        let options = TransformOptions::from_value(json!({})).unwrap();
        assert_eq!(options, TransformOptions::default());
    }

    #[test]
    fn reads_camel_case_fields() {
        let options = TransformOptions::from_value(json!({
            "scale": 2,
            "width": 24,
            "preserveText": true,
            "quoteEscape": "all",
            "somethingElse": "ignored"
        }))
        .unwrap();
        assert_eq!(options.scale, 2.0);
        assert_eq!(options.width, Some(24.0));
        assert!(options.preserve_text);
        assert_eq!(options.quote_escape, QuoteEscape::All);
    }

    #[test]
    fn null_fields_use_defaults() {
        let options = TransformOptions::from_value(json!({"scale": null, "width": null})).unwrap();
        assert_eq!(options.scale, 1.0);
        assert_eq!(options.width, None);
    }

    #[test]
    fn rejects_wrong_types_and_non_positive_sizes() {
        assert!(TransformOptions::from_value(json!({"scale": "2"})).is_err());
        assert!(TransformOptions::from_value(json!({"scale": 0})).is_err());
        assert!(TransformOptions::from_value(json!({"width": -4})).is_err());
        assert!(TransformOptions::from_value(json!({"quoteEscape": "some"})).is_err());
    }
}
