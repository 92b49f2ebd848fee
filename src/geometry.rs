use crate::Float;
use crate::Point;

/// Cubic Bernstein blend of four control scalars.
pub fn bezier_point(a: Float, b: Float, c: Float, d: Float, t: Float) -> Float {
    let u = 1.0 - t;
    u * u * u * a + 3.0 * u * u * t * b + 3.0 * u * t * t * c + t * t * t * d
}

/// Derivative of [`bezier_point`] with respect to `t`.
pub fn bezier_tangent(a: Float, b: Float, c: Float, d: Float, t: Float) -> Float {
    3.0 * t * t * (-a + 3.0 * b - 3.0 * c + d) + 6.0 * t * (a - 2.0 * b + c) + 3.0 * (-a + b)
}

/// Uniform Catmull-Rom position between `b` and `c`.
pub fn spline_point(a: Float, b: Float, c: Float, d: Float, t: Float) -> Float {
    0.5 * ((2.0 * b)
        + (-a + c) * t
        + (2.0 * a - 5.0 * b + 4.0 * c - d) * t * t
        + (-a + 3.0 * b - 3.0 * c + d) * t * t * t)
}

/// Derivative of [`spline_point`] with respect to `t`.
pub fn spline_tangent(a: Float, b: Float, c: Float, d: Float, t: Float) -> Float {
    0.5 * ((-a + c)
        + 2.0 * (2.0 * a - 5.0 * b + 4.0 * c - d) * t
        + 3.0 * (-a + 3.0 * b - 3.0 * c + d) * t * t)
}

/// Converts the span `p1 → p2` of a spline into cubic bezier
/// `[ctrl0, ctrl1, end]`; `p0` and `p3` only steer the tangents.
///
/// A tightness of 0 yields a standard Catmull-Rom curve, 1 yields
/// straight lines.
pub fn spline_segment(p0: Point, p1: Point, p2: Point, p3: Point, tightness: Float) -> [Point; 3] {
    let s = 1.0 - tightness;
    let ctrl0 = Point::new(
        p1.x + (s * p2.x - s * p0.x) / 6.0,
        p1.y + (s * p2.y - s * p0.y) / 6.0,
    );
    let ctrl1 = Point::new(
        p2.x + (s * p1.x - s * p3.x) / 6.0,
        p2.y + (s * p1.y - s * p3.y) / 6.0,
    );
    [ctrl0, ctrl1, p2]
}

/// Samples a Catmull-Rom chain at `t`, where each whole unit of `t`
/// advances by one span. `t` wraps around the number of spans.
///
/// Returns `None` when fewer than four points are given.
pub fn lerp_spline(points: &[Point], t: Float) -> Option<Point> {
    let spans = points.len().checked_sub(3).filter(|s| *s > 0)?;
    let t = t % (spans as Float);
    let i = t as isize;
    let t = t - (i as Float);

    let window = match i {
        -1 => [points[0], points[0], points[1], points[2]],
        i if i >= 0 && (i as usize) + 3 < points.len() => {
            let i = i as usize;
            [points[i], points[i + 1], points[i + 2], points[i + 3]]
        }
        i if i >= 0 && (i as usize) + 2 < points.len() => {
            let i = i as usize;
            [points[i], points[i + 1], points[i + 2], points[i + 2]]
        }
        _ => return None,
    };

    let [a, b, c, d] = window;
    Some(Point::new(
        spline_point(a.x, b.x, c.x, d.x, t),
        spline_point(a.y, b.y, c.y, d.y, t),
    ))
}

/// Per-corner radii of a rounded rectangle, clockwise from the top left.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: Float,
    pub top_right: Float,
    pub bottom_right: Float,
    pub bottom_left: Float,
}

impl CornerRadii {
    pub const fn new(top_left: Float, top_right: Float, bottom_right: Float, bottom_left: Float) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub const fn uniform(radius: Float) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    /// Partial-radius shorthand:
    /// - `r1` alone is replicated to every corner
    /// - `r1, r2` gives `(r1, r2, 0, 0)`
    /// - `r1, r2, r3` gives `(r1, r2, r3, 0)`
    /// - all four pass through
    ///
    /// The first missing radius decides the case, so a missing `r2`
    /// replicates `r1` even when `r3` or `r4` are present.
    pub fn normalize(r1: Float, r2: Option<Float>, r3: Option<Float>, r4: Option<Float>) -> Self {
        match (r2, r3, r4) {
            (None, _, _) => Self::uniform(r1),
            (Some(r2), None, _) => Self::new(r1, r2, 0.0, 0.0),
            (Some(r2), Some(r3), None) => Self::new(r1, r2, r3, 0.0),
            (Some(r2), Some(r3), Some(r4)) => Self::new(r1, r2, r3, r4),
        }
    }

    pub fn as_array(&self) -> [Float; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}

impl From<Float> for CornerRadii {
    fn from(radius: Float) -> Self {
        Self::normalize(radius, None, None, None)
    }
}

impl From<[Float; 2]> for CornerRadii {
    fn from([r1, r2]: [Float; 2]) -> Self {
        Self::normalize(r1, Some(r2), None, None)
    }
}

impl From<[Float; 3]> for CornerRadii {
    fn from([r1, r2, r3]: [Float; 3]) -> Self {
        Self::normalize(r1, Some(r2), Some(r3), None)
    }
}

impl From<[Float; 4]> for CornerRadii {
    fn from([r1, r2, r3, r4]: [Float; 4]) -> Self {
        Self::normalize(r1, Some(r2), Some(r3), Some(r4))
    }
}

/// How `rect(x, y, w, h)` interprets its arguments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RectMode {
    /// `(x, y)` is the top left corner
    #[default]
    Corner,
    /// `(x, y)` and `(w, h)` are opposite corners
    Corners,
    /// `(x, y)` is the center
    Center,
    /// `(x, y)` is the center, `(w, h)` are half extents
    Radius,
}

impl RectMode {
    /// Returns `[x, y, w, h]` with `(x, y)` the top left corner.
    pub fn normalize(self, x: Float, y: Float, w: Float, h: Float) -> [Float; 4] {
        match self {
            RectMode::Corner => [x, y, w, h],
            RectMode::Corners => [x, y, w - x, h - y],
            RectMode::Center => [x - w / 2.0, y - h / 2.0, w, h],
            RectMode::Radius => {
                let (w, h) = (w * 2.0, h * 2.0);
                [x - w / 2.0, y - h / 2.0, w, h]
            }
        }
    }
}

/// How `ellipse(x, y, w, h)` interprets its arguments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EllipseMode {
    Corner,
    Corners,
    #[default]
    Center,
    Radius,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EllipseFrame {
    pub center: Point,
    pub radii: Point,
}

impl EllipseMode {
    pub fn normalize(self, x: Float, y: Float, w: Float, h: Float) -> EllipseFrame {
        let corner = |x: Float, y: Float, w: Float, h: Float| EllipseFrame {
            center: Point::new(x + w / 2.0, y + h / 2.0),
            radii: Point::new(w / 2.0, h / 2.0),
        };

        match self {
            EllipseMode::Center => EllipseFrame {
                center: Point::new(x, y),
                radii: Point::new(w / 2.0, h / 2.0),
            },
            EllipseMode::Radius => EllipseFrame {
                center: Point::new(x, y),
                radii: Point::new(w, h),
            },
            EllipseMode::Corner => corner(x, y, w, h),
            EllipseMode::Corners => corner(x, y, w - x, h - y),
        }
    }
}

/// How `image(img, x, y, w, h)` interprets its arguments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ImageMode {
    #[default]
    Corner,
    Corners,
    Center,
}

impl ImageMode {
    /// Returns `[x, y, w, h]` with `(x, y)` the top left corner.
    pub fn normalize(self, x: Float, y: Float, w: Float, h: Float) -> [Float; 4] {
        match self {
            ImageMode::Corner => [x, y, w, h],
            ImageMode::Corners => [x, y, w - x, h - y],
            ImageMode::Center => [x - w / 2.0, y - h / 2.0, w, h],
        }
    }
}
