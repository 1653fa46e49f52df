use crate::ellipse::Ellipse;
use crate::error::{Error, Result};
use crate::number::{js_number_to_string, to_fixed};
use crate::segment::{Command, Segment};
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// A parsed SVG path description.
///
/// Operations consume and return `self` so they chain the way path-data pipelines are usually
/// written:
///
/// ```
/// use svgfit_path::PathData;
///
/// let d = PathData::parse("M0 0 L10 10")?
///     .translate(5.0, 5.0)
///     .scale(2.0)
///     .to_absolute()
///     .round(2)
///     .to_relative()
///     .round(2)
///     .to_string();
/// assert_eq!(d, "M10 10l20 20");
/// # Ok::<(), svgfit_path::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    segments: Vec<Segment>,
}

impl PathData {
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for seg in svgtypes::PathParser::from(text) {
            let seg = seg.map_err(|e| Error::Parse {
                message: e.to_string(),
            })?;
            segments.push(Segment::from(seg));
        }
        Ok(Self { segments })
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Moves absolute coordinates by `(dx, dy)`; relative offsets are unaffected.
    ///
    /// A leading relative moveto is positioned from the origin, so it is moved as well. Arcs are
    /// normalized as described on [`PathData::scale`] unless the offset is zero.
    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        if dx == 0.0 && dy == 0.0 {
            return self;
        }
        self.map_arcs(1.0);
        for (index, seg) in self.segments.iter_mut().enumerate() {
            if seg.abs || (index == 0 && seg.command == Command::MoveTo) {
                seg.offset(dx, dy);
            }
        }
        self
    }

    /// Uniform scale about the origin. A factor of `1` leaves the path untouched.
    ///
    /// Arc radii go through the ellipse transform: circles lose their rotation, an arc whose
    /// `ry` is the longer axis is written with swapped radii and a rotation 90 degrees further,
    /// and zero-length or flat arcs become linetos.
    pub fn scale(mut self, factor: f64) -> Self {
        if factor == 1.0 {
            return self;
        }
        self.map_arcs(factor);
        for seg in &mut self.segments {
            seg.scale(factor);
        }
        self
    }

    /// Rewrites arc radii and rotation for a uniform `factor`, before any endpoint moves.
    fn map_arcs(&mut self, factor: f64) {
        let mut current = (0.0, 0.0);
        let mut start = (0.0, 0.0);
        for seg in &mut self.segments {
            let end = seg.end_point(current, start);
            if seg.command == Command::MoveTo {
                start = end;
            }
            if seg.command == Command::EllipticalArc {
                let (x, y) = (seg.args[5], seg.args[6]);
                let empty = if seg.abs {
                    (x, y) == current
                } else {
                    x == 0.0 && y == 0.0
                };
                let ellipse = Ellipse::new(seg.args[0], seg.args[1], seg.args[2])
                    .transform([factor, 0.0, 0.0, factor]);
                if empty || ellipse.is_degenerate() {
                    *seg = Segment::new(Command::LineTo, seg.abs, vec![x, y]);
                } else {
                    seg.args[0] = ellipse.rx;
                    seg.args[1] = ellipse.ry;
                    seg.args[2] = ellipse.ax;
                }
            }
            current = end;
        }
    }

    pub fn to_absolute(mut self) -> Self {
        let mut current = (0.0, 0.0);
        let mut start = (0.0, 0.0);
        for seg in &mut self.segments {
            let end = seg.end_point(current, start);
            if !seg.abs {
                seg.offset(current.0, current.1);
                seg.abs = true;
            }
            if seg.command == Command::MoveTo {
                start = end;
            }
            current = end;
        }
        self
    }

    /// Re-encodes every segment relative to the previous pen position. The first moveto stays
    /// absolute.
    pub fn to_relative(mut self) -> Self {
        let mut current = (0.0, 0.0);
        let mut start = (0.0, 0.0);
        for (index, seg) in self.segments.iter_mut().enumerate() {
            let end = seg.end_point(current, start);
            let keep_absolute = index == 0 && seg.command == Command::MoveTo;
            if seg.abs && !keep_absolute {
                seg.offset(-current.0, -current.1);
                seg.abs = false;
            }
            if seg.command == Command::MoveTo {
                start = end;
            }
            current = end;
        }
        self
    }

    /// Rounds all coordinates to `digits` decimals with `Number#toFixed` semantics (see
    /// [`to_fixed`](crate::number::to_fixed)).
    ///
    /// The rounding error of each endpoint is carried into the next relative endpoint, so a long
    /// run of relative segments does not drift. `z` restores the error recorded at the start of
    /// the contour. Arc rotation keeps two extra decimals.
    pub fn round(mut self, digits: u32) -> Self {
        let mut contour_start_delta = (0.0, 0.0);
        let mut delta = (0.0, 0.0);

        for seg in &mut self.segments {
            let relative = !seg.abs;
            let args = &mut seg.args;
            match seg.command {
                Command::HorizontalLineTo => {
                    if relative {
                        args[0] += delta.0;
                    }
                    let rounded = to_fixed(args[0], digits);
                    delta.0 = args[0] - rounded;
                    args[0] = rounded;
                }
                Command::VerticalLineTo => {
                    if relative {
                        args[0] += delta.1;
                    }
                    let rounded = to_fixed(args[0], digits);
                    delta.1 = args[0] - rounded;
                    args[0] = rounded;
                }
                Command::ClosePath => {
                    delta = contour_start_delta;
                }
                Command::MoveTo => {
                    if relative {
                        args[0] += delta.0;
                        args[1] += delta.1;
                    }
                    delta = carry_endpoint(args, 0, digits);
                    contour_start_delta = delta;
                    args[0] = to_fixed(args[0], digits);
                    args[1] = to_fixed(args[1], digits);
                }
                Command::EllipticalArc => {
                    if relative {
                        args[5] += delta.0;
                        args[6] += delta.1;
                    }
                    delta = carry_endpoint(args, 5, digits);
                    args[0] = to_fixed(args[0], digits);
                    args[1] = to_fixed(args[1], digits);
                    args[2] = to_fixed(args[2], digits + 2);
                    args[5] = to_fixed(args[5], digits);
                    args[6] = to_fixed(args[6], digits);
                }
                _ => {
                    let n = args.len();
                    if relative {
                        args[n - 2] += delta.0;
                        args[n - 1] += delta.1;
                    }
                    delta = carry_endpoint(args, n - 2, digits);
                    for v in args.iter_mut() {
                        *v = to_fixed(*v, digits);
                    }
                }
            }
        }
        self
    }
}

fn carry_endpoint(args: &[f64], at: usize, digits: u32) -> (f64, f64) {
    (
        args[at] - to_fixed(args[at], digits),
        args[at + 1] - to_fixed(args[at + 1], digits),
    )
}

impl FromStr for PathData {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = ryu_js::Buffer::new();
        let mut prev: Option<char> = None;

        for seg in &self.segments {
            let cmd = seg.command.letter(seg.abs);
            // Repeated commands are implied, except movetos which would turn into linetos.
            let skipped = prev == Some(cmd) && seg.command != Command::MoveTo;
            if !skipped {
                // Some importers mis-read "zm", keep them apart.
                if cmd == 'm' && prev == Some('z') {
                    f.write_char(' ')?;
                }
                f.write_char(cmd)?;
            }

            for (pos, &v) in seg.args.iter().enumerate() {
                let needs_space = if pos == 0 { skipped } else { true };
                if needs_space && v >= 0.0 {
                    f.write_char(' ')?;
                }
                f.write_str(js_number_to_string(v, &mut buf))?;
            }
            prev = Some(cmd);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(d: &str) -> PathData {
        PathData::parse(d).unwrap()
    }

    #[test]
    fn serializes_compactly() {
        assert_eq!(path("M 10 10 L 20 20").to_string(), "M10 10L20 20");
        assert_eq!(path("M10 10 L20 20 L30 -5").to_string(), "M10 10L20 20 30-5");
        assert_eq!(path("M0 0 z m 1 1").to_string(), "M0 0z m1 1");
    }

    #[test]
    fn implicit_lineto_after_moveto() {
        let p = path("M10 10 20 20");
        assert_eq!(p.segments()[1].command, Command::LineTo);
        assert_eq!(p.to_string(), "M10 10L20 20");
    }

    #[test]
    fn to_absolute_tracks_subpaths() {
        let p = path("m10 10 l5 5 h5 v-5 z m1 1 l1 1").to_absolute();
        assert_eq!(p.to_string(), "M10 10L15 15H20V10ZM11 11L12 12");
    }

    #[test]
    fn to_relative_keeps_first_moveto() {
        let p = path("M10 10 L20 20 L20 30 Z").to_relative();
        assert_eq!(p.to_string(), "M10 10l10 10 0 10z");
    }

    #[test]
    fn translate_then_scale_maps_absolute_points() {
        let p = path("M0 0 l10 10").translate(5.0, 10.0).scale(2.0);
        assert_eq!(p.to_string(), "M10 20l20 20");
    }

    #[test]
    fn leading_relative_moveto_is_translated() {
        let p = path("m1 1 l1 1").translate(10.0, 10.0);
        assert_eq!(p.to_string(), "m11 11l1 1");
    }

    #[test]
    fn scale_maps_arc_radii_and_keeps_flags() {
        let p = path("M0 0 A10 20 30 1 0 40 50").scale(2.0).round(2);
        assert_eq!(p.to_string(), "M0 0A20 40 30 1 0 80 100");
    }

    #[test]
    fn scaled_circular_arc_drops_rotation() {
        let p = path("M0 0 A5 5 45 0 1 10 0").scale(2.0).round(2);
        assert_eq!(p.to_string(), "M0 0A10 10 0 0 1 20 0");
    }

    #[test]
    fn scaled_upright_ellipse_swaps_radii() {
        let p = path("M0 0 A10 20 0 0 1 10 10").scale(2.0);
        assert_eq!(p.to_string(), "M0 0A40 20 90 0 1 20 20");
    }

    #[test]
    fn empty_and_flat_arcs_become_lines() {
        assert_eq!(
            path("M5 5 A3 3 0 0 1 5 5").scale(2.0).to_string(),
            "M10 10L10 10"
        );
        assert_eq!(
            path("M5 5 a3 3 0 0 1 0 0").scale(2.0).to_string(),
            "M10 10l0 0"
        );
        assert_eq!(
            path("M0 0 A0 5 0 0 1 10 0").scale(2.0).to_string(),
            "M0 0L20 0"
        );
        assert_eq!(
            path("M0 0 A3 3 0 0 1 0 0").translate(1.0, 1.0).to_string(),
            "M1 1L1 1"
        );
    }

    #[test]
    fn identity_transforms_leave_arcs_alone() {
        let d = "M0 0A5 5 45 0 1 10 0";
        assert_eq!(path(d).translate(0.0, 0.0).scale(1.0).to_string(), d);
    }

    #[test]
    fn round_uses_to_fixed_not_math_round() {
        let p = path("M1.115 -0.125 L2.675 0").to_absolute().round(2);
        assert_eq!(p.to_string(), "M1.11-0.13L2.67 0");
    }

    #[test]
    fn round_carries_error_across_relative_segments() {
        let p = path("M0.004 0 l1.004 0 l1.004 0").round(2);
        assert_eq!(p.to_string(), "M0 0l1.01 0 1 0");
    }

    #[test]
    fn identity_pipeline_is_stable() {
        let once = |d: &str| {
            path(d)
                .translate(0.0, 0.0)
                .scale(1.0)
                .to_absolute()
                .round(2)
                .to_relative()
                .round(2)
                .to_string()
        };
        let first = once("M3.14159 2.71828 c1.1 2.2 3.3 4.4 5.55555 6.66666 s1 1 2 2 q3 3 4 4 t1 1 a5 5 0 0 1 10 10 z");
        assert_eq!(once(&first), first);
    }

    #[test]
    fn empty_path_serializes_empty() {
        assert!(path("").is_empty());
        assert_eq!(path("").to_string(), "");
    }

    #[test]
    fn rejects_garbage() {
        assert!(PathData::parse("M10 10 L foo").is_err());
    }
}
