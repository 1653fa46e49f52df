use crate::element::{AttrValue, ElementEvent};
use svgfit_path::number::round_to;

/// Scales `stroke-width` of any stroked element, defaulting it to `1` first.
pub fn scale_stroke_width(node: &mut ElementEvent, scale: f64) {
    if !node.attr("stroke").is_some_and(AttrValue::is_set) {
        return;
    }

    let ElementEvent { name, attributes } = node;
    let width = attributes
        .entry("stroke-width".to_string())
        .or_insert(AttrValue::Number(1.0));
    if !width.is_set() {
        *width = AttrValue::Number(1.0);
    }

    match width.as_number() {
        Some(v) => *width = AttrValue::Number(round_to(v * scale, 2)),
        None => tracing::warn!(
            element = %name,
            value = %width,
            "stroke-width is not a plain number; left unchanged"
        ),
    }
}
