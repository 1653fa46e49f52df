use svgtypes::PathSegment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CurveTo,
    SmoothCurveTo,
    Quadratic,
    SmoothQuadratic,
    EllipticalArc,
    ClosePath,
}

/// Role of a single segment argument under an affine map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arg {
    X,
    Y,
    Radius,
    Angle,
    Flag,
}

impl Command {
    pub fn letter(self, abs: bool) -> char {
        let upper = match self {
            Command::MoveTo => 'M',
            Command::LineTo => 'L',
            Command::HorizontalLineTo => 'H',
            Command::VerticalLineTo => 'V',
            Command::CurveTo => 'C',
            Command::SmoothCurveTo => 'S',
            Command::Quadratic => 'Q',
            Command::SmoothQuadratic => 'T',
            Command::EllipticalArc => 'A',
            Command::ClosePath => 'Z',
        };
        if abs {
            upper
        } else {
            upper.to_ascii_lowercase()
        }
    }

    pub(crate) fn args(self) -> &'static [Arg] {
        use Arg::*;
        match self {
            Command::MoveTo | Command::LineTo | Command::SmoothQuadratic => &[X, Y],
            Command::HorizontalLineTo => &[X],
            Command::VerticalLineTo => &[Y],
            Command::CurveTo => &[X, Y, X, Y, X, Y],
            Command::SmoothCurveTo | Command::Quadratic => &[X, Y, X, Y],
            Command::EllipticalArc => &[Radius, Radius, Angle, Flag, Flag, X, Y],
            Command::ClosePath => &[],
        }
    }
}

/// One path command with its numeric arguments, in source order.
///
/// Arc flags are stored as `0.0`/`1.0` so every argument can be printed the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub command: Command,
    pub abs: bool,
    pub args: Vec<f64>,
}

impl Segment {
    pub fn new(command: Command, abs: bool, args: Vec<f64>) -> Self {
        debug_assert_eq!(command.args().len(), args.len());
        Self { command, abs, args }
    }

    /// Absolute position of the pen after this segment, given the pen position before it and
    /// the start of the current subpath.
    pub(crate) fn end_point(&self, current: (f64, f64), start: (f64, f64)) -> (f64, f64) {
        let (base_x, base_y) = if self.abs { (0.0, 0.0) } else { current };
        match self.command {
            Command::ClosePath => start,
            Command::HorizontalLineTo => (base_x + self.args[0], current.1),
            Command::VerticalLineTo => (current.0, base_y + self.args[0]),
            _ => {
                let n = self.args.len();
                (base_x + self.args[n - 2], base_y + self.args[n - 1])
            }
        }
    }

    /// Shifts every positional argument by `(dx, dy)`.
    pub(crate) fn offset(&mut self, dx: f64, dy: f64) {
        for (value, arg) in self.args.iter_mut().zip(self.command.args()) {
            match arg {
                Arg::X => *value += dx,
                Arg::Y => *value += dy,
                Arg::Radius | Arg::Angle | Arg::Flag => {}
            }
        }
    }

    /// Scales positional arguments only. Arc radii are rewritten separately, see
    /// `PathData::scale`.
    pub(crate) fn scale(&mut self, factor: f64) {
        for (value, arg) in self.args.iter_mut().zip(self.command.args()) {
            match arg {
                Arg::X | Arg::Y => *value *= factor,
                Arg::Radius | Arg::Angle | Arg::Flag => {}
            }
        }
    }
}

fn flag(v: bool) -> f64 {
    if v { 1.0 } else { 0.0 }
}

impl From<PathSegment> for Segment {
    fn from(seg: PathSegment) -> Self {
        match seg {
            PathSegment::MoveTo { abs, x, y } => Segment::new(Command::MoveTo, abs, vec![x, y]),
            PathSegment::LineTo { abs, x, y } => Segment::new(Command::LineTo, abs, vec![x, y]),
            PathSegment::HorizontalLineTo { abs, x } => {
                Segment::new(Command::HorizontalLineTo, abs, vec![x])
            }
            PathSegment::VerticalLineTo { abs, y } => {
                Segment::new(Command::VerticalLineTo, abs, vec![y])
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => Segment::new(Command::CurveTo, abs, vec![x1, y1, x2, y2, x, y]),
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                Segment::new(Command::SmoothCurveTo, abs, vec![x2, y2, x, y])
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                Segment::new(Command::Quadratic, abs, vec![x1, y1, x, y])
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                Segment::new(Command::SmoothQuadratic, abs, vec![x, y])
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => Segment::new(
                Command::EllipticalArc,
                abs,
                vec![rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y],
            ),
            PathSegment::ClosePath { abs } => Segment::new(Command::ClosePath, abs, Vec::new()),
        }
    }
}
