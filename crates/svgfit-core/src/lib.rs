#![forbid(unsafe_code)]

//! Streaming SVG normalizer.
//!
//! Rewrites an SVG document in one pass so its artwork is uniformly scaled and, optionally,
//! centered inside a square viewport:
//! - the root `<svg>` loses `width`/`height` and gets a `viewBox` of `0 0 W H`
//! - paths, basic shapes, gradients and point lists are scaled and offset
//! - stroked elements get a scaled `stroke-width`
//!
//! No DOM is built: tags are rewritten and echoed as the tokenizer reports them.
//!
//! ```
//! use svgfit_core::{Normalizer, TransformOptions};
//!
//! let normalizer = Normalizer::new(TransformOptions::default().with_width(Some(24.0)))?;
//! let out = normalizer.transform_sync(r#"<svg viewBox="0 0 48 48"><circle cx="24" cy="24" r="20"/></svg>"#)?;
//! assert_eq!(
//!     out,
//!     r#"<?xml version="1.0"?><svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="10"></circle></svg>"#
//! );
//! # Ok::<(), svgfit_core::Error>(())
//! ```

pub mod element;
pub mod error;
pub mod geometry;
pub mod options;
pub mod pipeline;
pub mod serialize;
pub mod tokenizer;
pub mod transform;
pub mod viewport;

pub use element::{AttrValue, Attributes, ElementEvent, XmlEvent};
pub use error::{Error, Result};
pub use geometry::GeometryState;
pub use options::{QuoteEscape, TransformOptions};
pub use pipeline::{Stage, XML_PROLOG, transform};
pub use tokenizer::Tokenizer;

/// Reusable transformer bound to one set of validated options.
///
/// Holds no per-document state, so one instance can serve any number of documents, from any
/// number of threads.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: TransformOptions,
}

impl Normalizer {
    pub fn new(options: TransformOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Builds a normalizer from JSON options, e.g. `{"width": 24}`.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(Self {
            options: TransformOptions::from_value(value)?,
        })
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Synchronous variant of [`Normalizer::transform`].
    pub fn transform_sync(&self, text: &str) -> Result<String> {
        pipeline::transform(text, &self.options)
    }

    pub async fn transform(&self, text: &str) -> Result<String> {
        self.transform_sync(text)
    }
}
