/// Coordinate transform shared by every element of one document.
///
/// Set once from the root `<svg>` and read-only afterwards; nested elements never get a local
/// transform of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryState {
    pub scale: f64,
    pub dx: f64,
    pub dy: f64,
    /// Edge length of the square viewport, when one was requested.
    pub base_size: Option<f64>,
}

impl Default for GeometryState {
    fn default() -> Self {
        Self::with_scale(1.0)
    }
}

impl GeometryState {
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            dx: 0.0,
            dy: 0.0,
            base_size: None,
        }
    }

    /// `x * scale + dx`, the mapping used by attribute-based shapes and point lists.
    pub fn map_x(&self, x: f64) -> f64 {
        x * self.scale + self.dx
    }

    pub fn map_y(&self, y: f64) -> f64 {
        y * self.scale + self.dy
    }
}
