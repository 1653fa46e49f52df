//! Root `<svg>` handling: derive the source size, pick scale and centering offset, and rewrite
//! the viewport so `viewBox` is the only sizing source left.

use crate::element::{AttrValue, ElementEvent};
use crate::error::{Error, Result};
use crate::geometry::GeometryState;
use crate::options::TransformOptions;
use std::str::FromStr;
use svgfit_path::number::{format_number, parse_number};

/// Normalizes the root element in place and returns the geometry for the rest of the document.
///
/// `scale` is the configured scale; it is replaced when `options.width` requests a square
/// viewport.
pub fn normalize_viewport(
    node: &mut ElementEvent,
    options: &TransformOptions,
    scale: f64,
) -> Result<GeometryState> {
    let (width, height) = source_size(node)?;
    let mut state = GeometryState::with_scale(scale);

    let (out_width, out_height) = match options.width {
        Some(target) => {
            state.base_size = Some(target);
            // Pad the shorter side so the artwork ends up centered.
            if width >= height {
                state.scale = target / width;
                state.dy = (width - height) / 2.0;
            } else {
                state.scale = target / height;
                state.dx = (height - width) / 2.0;
            }
            (target, target)
        }
        None => (width * state.scale, height * state.scale),
    };

    node.attributes.shift_remove("width");
    node.attributes.shift_remove("height");
    node.attributes.insert(
        "viewBox".to_string(),
        AttrValue::Text(format!(
            "0 0 {} {}",
            format_number(out_width),
            format_number(out_height)
        )),
    );

    tracing::debug!(
        source_width = width,
        source_height = height,
        scale = state.scale,
        dx = state.dx,
        dy = state.dy,
        "normalized root viewport"
    );
    Ok(state)
}

/// Source `(width, height)`: explicit attributes when both are present, else the `viewBox`.
pub fn source_size(node: &ElementEvent) -> Result<(f64, f64)> {
    let explicit = |key: &str| node.attr(key).filter(|v| v.is_set());
    let (width, height) = match (explicit("width"), explicit("height")) {
        (Some(width), Some(height)) => (
            parse_length(node, "width", width)?,
            parse_length(node, "height", height)?,
        ),
        _ => view_box_size(node)?,
    };

    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(Error::geometry(
            &node.name,
            format!(
                "source size must be positive, got {}x{}",
                format_number(width),
                format_number(height)
            ),
        ));
    }
    Ok((width, height))
}

/// Leading number of a length such as `24`, `24px` or `100%` (units are ignored).
fn parse_length(node: &ElementEvent, key: &str, value: &AttrValue) -> Result<f64> {
    if let AttrValue::Number(v) = value {
        return Ok(*v);
    }
    let text = value.as_text();
    svgtypes::Length::from_str(text.trim())
        .map(|length| length.number)
        .map_err(|_| Error::geometry(&node.name, format!("invalid `{key}` value `{text}`")))
}

fn view_box_size(node: &ElementEvent) -> Result<(f64, f64)> {
    let Some(view_box) = node.text_attr("viewBox") else {
        return Err(Error::geometry(
            &node.name,
            "needs `width` and `height` or a `viewBox`",
        ));
    };
    let fields: Vec<&str> = view_box
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|field| !field.is_empty())
        .collect();
    let field = |index: usize| fields.get(index).copied().and_then(parse_number);
    match (field(2), field(3)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(Error::geometry(
            &node.name,
            format!("invalid `viewBox` value `{view_box}`"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svg() -> ElementEvent {
        ElementEvent::new("svg")
    }

    #[test]
    fn landscape_is_centered_vertically() {
        let mut node = svg().with_attr("viewBox", "0 0 200 100");
        let options = TransformOptions::default().with_width(Some(100.0));
        let state = normalize_viewport(&mut node, &options, 1.0).unwrap();
        assert_eq!(state.scale, 0.5);
        assert_eq!(state.dx, 0.0);
        assert_eq!(state.dy, 50.0);
        assert_eq!(state.base_size, Some(100.0));
        assert_eq!(node.text_attr("viewBox").as_deref(), Some("0 0 100 100"));
    }

    #[test]
    fn portrait_is_centered_horizontally() {
        let mut node = svg().with_attr("width", "50").with_attr("height", "100");
        let options = TransformOptions::default().with_width(Some(10.0));
        let state = normalize_viewport(&mut node, &options, 1.0).unwrap();
        assert_eq!(state.scale, 0.1);
        assert_eq!(state.dx, 25.0);
        assert_eq!(state.dy, 0.0);
    }

    #[test]
    fn without_target_width_the_configured_scale_is_kept() {
        let mut node = svg()
            .with_attr("width", "10px")
            .with_attr("height", "20")
            .with_attr("viewBox", "0 0 1 1")
            .with_attr("id", "icon");
        let state = normalize_viewport(&mut node, &TransformOptions::default(), 2.0).unwrap();
        assert_eq!(state, GeometryState::with_scale(2.0));

        let keys: Vec<_> = node.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["viewBox", "id"]);
        assert_eq!(node.text_attr("viewBox").as_deref(), Some("0 0 20 40"));
    }

    #[test]
    fn single_explicit_dimension_falls_back_to_view_box() {
        let mut node = svg().with_attr("width", "500").with_attr("viewBox", "0,0,30,15");
        normalize_viewport(&mut node, &TransformOptions::default(), 1.0).unwrap();
        assert_eq!(node.attr("width"), None);
        assert_eq!(node.text_attr("viewBox").as_deref(), Some("0 0 30 15"));
    }

    #[test]
    fn missing_size_is_a_geometry_error() {
        let mut node = svg().with_attr("id", "x");
        let err = normalize_viewport(&mut node, &TransformOptions::default(), 1.0).unwrap_err();
        assert!(matches!(err, Error::Geometry { ref element, .. } if element == "svg"));
    }

    #[test]
    fn short_view_box_is_a_geometry_error() {
        let mut node = svg().with_attr("viewBox", "0 0 24");
        assert!(normalize_viewport(&mut node, &TransformOptions::default(), 1.0).is_err());
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut node = svg().with_attr("viewBox", "0 0 0 10");
        let options = TransformOptions::default().with_width(Some(24.0));
        assert!(normalize_viewport(&mut node, &options, 1.0).is_err());
    }
}
