use crate::element::{AttrValue, ElementEvent};
use crate::geometry::GeometryState;
use svgfit_path::number::round_to;

const SCALED: &[&str] = &[
    "width", "height", "rx", "ry", "r", "cx", "x", "x1", "x2", "cy", "y", "y1", "y2",
];
const SHIFTED_X: &[&str] = &["cx", "x", "x1", "x2"];
const SHIFTED_Y: &[&str] = &["cy", "y", "y1", "y2"];

/// Scales size and position attributes of attribute-based shapes and gradient anchors.
///
/// Positions get `dx`/`dy` added after scaling. Every touched value is rounded to two decimals.
pub fn scale_basic_shape(node: &mut ElementEvent, state: &GeometryState) {
    let ElementEvent { name, attributes } = node;
    for (key, value) in attributes.iter_mut() {
        let key = key.as_str();
        let scaled = SCALED.contains(&key);
        let shift_x = SHIFTED_X.contains(&key);
        let shift_y = SHIFTED_Y.contains(&key);
        if !(scaled || shift_x || shift_y) {
            continue;
        }

        let Some(mut v) = value.as_number() else {
            tracing::warn!(
                element = %name,
                attribute = key,
                value = %value,
                "geometry attribute is not a plain number; left unchanged"
            );
            continue;
        };
        if scaled {
            v *= state.scale;
        }
        if shift_x {
            v += state.dx;
        }
        if shift_y {
            v += state.dy;
        }
        *value = AttrValue::Number(round_to(v, 2));
    }
}
