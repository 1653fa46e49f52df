use crate::element::{AttrValue, ElementEvent};
use crate::error::{Error, Result};
use crate::geometry::GeometryState;
use svgfit_path::number::{parse_number, push_number};

/// Maps every `x,y` pair of `points` through `x * scale + dx`, `y * scale + dy`.
///
/// Unlike the other shape rules the result is not rounded.
pub fn scale_point_list(node: &mut ElementEvent, state: &GeometryState) -> Result<()> {
    let Some(points) = node
        .text_attr("points")
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.into_owned())
    else {
        return Err(Error::geometry(&node.name, "missing `points` attribute"));
    };

    let mut out = String::with_capacity(points.len() + 8);
    let mut buf = ryu_js::Buffer::new();
    for (index, pair) in points.split_whitespace().enumerate() {
        let Some((x, y)) = parse_pair(pair) else {
            return Err(Error::geometry(
                &node.name,
                format!("malformed point `{pair}` in `points`"),
            ));
        };
        if index > 0 {
            out.push(' ');
        }
        push_number(&mut out, state.map_x(x), &mut buf);
        out.push(',');
        push_number(&mut out, state.map_y(y), &mut buf);
    }

    node.attributes
        .insert("points".to_string(), AttrValue::Text(out));
    Ok(())
}

fn parse_pair(pair: &str) -> Option<(f64, f64)> {
    let (x, y) = pair.split_once(',')?;
    Some((parse_number(x)?, parse_number(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(scale: f64, dx: f64, dy: f64) -> GeometryState {
        GeometryState {
            scale,
            dx,
            dy,
            base_size: None,
        }
    }

    fn points(node: &ElementEvent) -> String {
        node.text_attr("points").unwrap().into_owned()
    }

    #[test]
    fn maps_each_pair() {
        let mut node = ElementEvent::new("polyline").with_attr("points", "0,0 10,10");
        scale_point_list(&mut node, &state(2.0, 1.0, 1.0)).unwrap();
        assert_eq!(points(&node), "1,1 21,21");
    }

    #[test]
    fn trims_and_collapses_whitespace() {
        let mut node = ElementEvent::new("polygon").with_attr("points", "  0,0\n\t10,10  ");
        scale_point_list(&mut node, &state(2.0, 1.0, 1.0)).unwrap();
        assert_eq!(points(&node), "1,1 21,21");
    }

    #[test]
    fn values_are_not_rounded() {
        let mut node = ElementEvent::new("polygon").with_attr("points", "1,2");
        scale_point_list(&mut node, &state(1.0 / 3.0, 0.0, 0.0)).unwrap();
        assert_eq!(points(&node), "0.3333333333333333,0.6666666666666666");
    }

    #[test]
    fn missing_points_is_a_geometry_error() {
        let mut node = ElementEvent::new("polygon").with_attr("fill", "red");
        let err = scale_point_list(&mut node, &state(1.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err.to_string(), "<polygon>: missing `points` attribute");
    }

    #[test]
    fn malformed_pair_is_a_geometry_error() {
        let mut node = ElementEvent::new("polyline").with_attr("points", "0,0 10");
        let err = scale_point_list(&mut node, &state(1.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err.to_string(), "<polyline>: malformed point `10` in `points`");
    }
}
