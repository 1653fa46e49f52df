//! Per-element geometry rules.
//!
//! Every open tag first goes through [`scale_stroke_width`], then the rule picked by
//! [`ShapeKind::from_tag`]. Tags without a rule pass through unchanged.

mod basic;
mod path;
mod points;
mod stroke;

pub use basic::scale_basic_shape;
pub use path::{PATH_PRECISION, transform_path};
pub use points::scale_point_list;
pub use stroke::scale_stroke_width;

use crate::element::ElementEvent;
use crate::error::Result;
use crate::geometry::GeometryState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// `<svg>`; only the first one normalizes the viewport.
    Root,
    Path,
    /// Shapes and gradients positioned by discrete numeric attributes.
    Basic,
    PointList,
    Other,
}

impl ShapeKind {
    pub fn from_tag(name: &str) -> Self {
        match name {
            "svg" => Self::Root,
            "path" => Self::Path,
            "rect" | "line" | "circle" | "ellipse" | "linearGradient" | "radialGradient" => {
                Self::Basic
            }
            "polyline" | "polygon" => Self::PointList,
            _ => Self::Other,
        }
    }
}

/// Applies the geometry rule for a non-root element. `Root` and `Other` are no-ops here.
pub fn apply_shape(kind: ShapeKind, node: &mut ElementEvent, state: &GeometryState) -> Result<()> {
    match kind {
        ShapeKind::Path => transform_path(node, state),
        ShapeKind::Basic => {
            scale_basic_shape(node, state);
            Ok(())
        }
        ShapeKind::PointList => scale_point_list(node, state),
        ShapeKind::Root | ShapeKind::Other => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_map_to_rules() {
        assert_eq!(ShapeKind::from_tag("svg"), ShapeKind::Root);
        assert_eq!(ShapeKind::from_tag("path"), ShapeKind::Path);
        assert_eq!(ShapeKind::from_tag("radialGradient"), ShapeKind::Basic);
        assert_eq!(ShapeKind::from_tag("polygon"), ShapeKind::PointList);
        assert_eq!(ShapeKind::from_tag("g"), ShapeKind::Other);
        // Tag names are case-sensitive.
        assert_eq!(ShapeKind::from_tag("Rect"), ShapeKind::Other);
    }

    #[test]
    fn other_tags_pass_through() {
        let mut node = ElementEvent::new("text").with_attr("x", "10");
        let before = node.clone();
        apply_shape(ShapeKind::Other, &mut node, &GeometryState::with_scale(3.0)).unwrap();
        assert_eq!(node, before);
    }
}
