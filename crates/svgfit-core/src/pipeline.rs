//! Single-pass rewrite of a whole document.
//!
//! The pipeline is a two-stage state machine driven by tokenizer events. It starts in
//! [`Stage::AwaitingRoot`]; the first open tag must be `<svg>`, which fixes the
//! [`GeometryState`] for every element that follows.

use crate::element::XmlEvent;
use crate::error::{Error, Result};
use crate::geometry::GeometryState;
use crate::options::TransformOptions;
use crate::serialize::{write_cdata, write_close_tag, write_open_tag, write_text};
use crate::tokenizer::Tokenizer;
use crate::transform::{ShapeKind, apply_shape, scale_stroke_width};
use crate::viewport::normalize_viewport;

pub const XML_PROLOG: &str = r#"<?xml version="1.0"?>"#;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    /// No element seen yet; `scale` is the configured one.
    AwaitingRoot { scale: f64 },
    Normalized(GeometryState),
}

impl Stage {
    pub fn start(options: &TransformOptions) -> Self {
        Self::AwaitingRoot {
            scale: options.scale,
        }
    }

    /// Scale in effect for the next element.
    pub fn scale(&self) -> f64 {
        match self {
            Self::AwaitingRoot { scale } => *scale,
            Self::Normalized(state) => state.scale,
        }
    }
}

/// Consumes one event and returns the next stage plus the serialized fragment.
pub fn step(stage: Stage, event: XmlEvent, options: &TransformOptions) -> Result<(Stage, String)> {
    let mut out = String::new();
    let next = match event {
        XmlEvent::Open(mut node) => {
            scale_stroke_width(&mut node, stage.scale());
            let kind = ShapeKind::from_tag(&node.name);
            let next = match stage {
                Stage::AwaitingRoot { scale } => {
                    if kind != ShapeKind::Root {
                        return Err(Error::MissingRoot {
                            element: Some(node.name),
                        });
                    }
                    Stage::Normalized(normalize_viewport(&mut node, options, scale)?)
                }
                Stage::Normalized(state) => {
                    if kind == ShapeKind::Root {
                        tracing::trace!("nested <svg> passed through");
                    } else {
                        tracing::trace!(element = %node.name, kind = ?kind, "dispatch");
                    }
                    apply_shape(kind, &mut node, &state)?;
                    stage
                }
            };
            write_open_tag(&mut out, &node, options.quote_escape);
            next
        }
        XmlEvent::Close(name) => {
            write_close_tag(&mut out, &name);
            stage
        }
        XmlEvent::Text(text) => {
            if options.preserve_text {
                write_text(&mut out, &text);
            }
            stage
        }
        XmlEvent::CData(data) => {
            if options.preserve_text {
                write_cdata(&mut out, &data);
            }
            stage
        }
    };
    Ok((next, out))
}

/// Rewrites `text` and returns the new document, prolog included.
///
/// Nothing is returned until the whole input has been consumed; any error aborts the transform.
pub fn transform(text: &str, options: &TransformOptions) -> Result<String> {
    options.validate()?;

    let mut out = String::with_capacity(text.len() + XML_PROLOG.len());
    out.push_str(XML_PROLOG);

    let mut stage = Stage::start(options);
    for event in Tokenizer::new(text) {
        let (next, fragment) = step(stage, event?, options)?;
        out.push_str(&fragment);
        stage = next;
    }

    if let Stage::AwaitingRoot { .. } = stage {
        return Err(Error::MissingRoot { element: None });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementEvent;

    #[test]
    fn root_fixes_the_geometry() {
        let options = TransformOptions::default().with_width(Some(100.0));
        let root = ElementEvent::new("svg").with_attr("viewBox", "0 0 200 100");
        let (stage, fragment) = step(Stage::start(&options), XmlEvent::Open(root), &options).unwrap();
        assert_eq!(fragment, r#"<svg viewBox="0 0 100 100">"#);
        let Stage::Normalized(state) = stage else {
            panic!("root did not normalize: {stage:?}");
        };
        assert_eq!((state.scale, state.dx, state.dy), (0.5, 0.0, 50.0));
    }

    #[test]
    fn first_element_must_be_svg() {
        let options = TransformOptions::default();
        let err = step(
            Stage::start(&options),
            XmlEvent::Open(ElementEvent::new("g")),
            &options,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingRoot { element: Some(ref name) } if name == "g"));
    }

    #[test]
    fn text_is_dropped_unless_preserved() {
        let stage = Stage::Normalized(GeometryState::default());
        let options = TransformOptions::default();
        let (_, fragment) = step(stage, XmlEvent::Text("a < b".into()), &options).unwrap();
        assert_eq!(fragment, "");

        let options = options.with_preserve_text(true);
        let (_, fragment) = step(stage, XmlEvent::Text("a < b".into()), &options).unwrap();
        assert_eq!(fragment, "a &lt; b");
    }
}
