use crate::element::{AttrValue, ElementEvent};
use crate::error::{Error, Result};
use crate::geometry::GeometryState;
use svgfit_path::PathData;

/// Decimals kept in rewritten path data.
pub const PATH_PRECISION: u32 = 2;

/// Rewrites `d` as `translate(dx, dy)` then `scale`, re-encoded relative with two decimals.
///
/// The offset is applied before scaling, so path coordinates end up at `(x + dx) * scale`.
pub fn transform_path(node: &mut ElementEvent, state: &GeometryState) -> Result<()> {
    let Some(d) = node.text_attr("d").map(|d| d.into_owned()) else {
        return Err(Error::geometry(&node.name, "missing `d` attribute"));
    };

    let path = PathData::parse(&d).map_err(|source| Error::PathData {
        element: node.name.clone(),
        source,
    })?;
    let rewritten = path
        .translate(state.dx, state.dy)
        .scale(state.scale)
        .to_absolute()
        .round(PATH_PRECISION)
        .to_relative()
        .round(PATH_PRECISION)
        .to_string();

    node.attributes
        .insert("d".to_string(), AttrValue::Text(rewritten));
    Ok(())
}
