//! Arc radii under a linear map, normalized the way `svgpath` writes them back.

const EPSILON: f64 = 0.000_000_000_1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ellipse {
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the x axis, in degrees.
    pub ax: f64,
}

impl Ellipse {
    pub fn new(rx: f64, ry: f64, ax: f64) -> Self {
        Self { rx, ry, ax }
    }

    /// Applies the linear part `[a, b, c, d]` of an affine matrix.
    ///
    /// Circles come out with rotation `0`. Otherwise `rx` is the semi-axis closest to the x
    /// axis and the rotation lies in `[0, 180)`.
    pub fn transform(self, m: [f64; 4]) -> Self {
        let (sin, cos) = self.ax.to_radians().sin_cos();
        let ma = [
            self.rx * (m[0] * cos + m[2] * sin),
            self.rx * (m[1] * cos + m[3] * sin),
            self.ry * (-m[0] * sin + m[2] * cos),
            self.ry * (-m[1] * sin + m[3] * cos),
        ];

        let j = ma[0] * ma[0] + ma[2] * ma[2];
        let k = ma[1] * ma[1] + ma[3] * ma[3];
        let d = ((ma[0] - ma[3]).powi(2) + (ma[2] + ma[1]).powi(2))
            * ((ma[0] + ma[3]).powi(2) + (ma[2] - ma[1]).powi(2));
        let jk = (j + k) / 2.0;

        if d < EPSILON * jk {
            let r = jk.sqrt();
            return Self::new(r, r, 0.0);
        }

        let l = ma[0] * ma[1] + ma[2] * ma[3];
        let d = d.sqrt();
        let l1 = jk + d / 2.0;
        let l2 = jk - d / 2.0;

        let ax = if l.abs() < EPSILON && (l1 - k).abs() < EPSILON {
            90.0
        } else {
            let slope = if l.abs() > (l1 - k).abs() {
                (l1 - j) / l
            } else {
                l / (l1 - k)
            };
            slope.atan().to_degrees()
        };

        if ax >= 0.0 {
            Self::new(l1.sqrt(), l2.sqrt(), ax)
        } else {
            Self::new(l2.sqrt(), l1.sqrt(), ax + 90.0)
        }
    }

    /// One radius vanishes next to the other: the arc is drawn as a straight line.
    pub fn is_degenerate(&self) -> bool {
        self.rx < EPSILON * self.ry || self.ry < EPSILON * self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_loses_its_rotation() {
        let e = Ellipse::new(5.0, 5.0, 45.0).transform([2.0, 0.0, 0.0, 2.0]);
        assert!((e.rx - 10.0).abs() < 1e-9 && (e.ry - 10.0).abs() < 1e-9, "{e:?}");
        assert_eq!(e.ax, 0.0);
    }

    #[test]
    fn taller_ellipse_is_rotated_a_quarter_turn() {
        let e = Ellipse::new(10.0, 20.0, 0.0).transform([2.0, 0.0, 0.0, 2.0]);
        assert_eq!(e, Ellipse::new(40.0, 20.0, 90.0));
    }

    #[test]
    fn zero_radius_is_degenerate() {
        let e = Ellipse::new(0.0, 5.0, 0.0).transform([1.0, 0.0, 0.0, 1.0]);
        assert!(e.is_degenerate());
        assert!(!Ellipse::new(3.0, 4.0, 0.0).is_degenerate());
    }
}
