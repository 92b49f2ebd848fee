use crate::Float;
use crate::Point;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

/// 2D affine matrix in canvas order:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub a: Float,
    pub b: Float,
    pub c: Float,
    pub d: Float,
    pub e: Float,
    pub f: Float,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn translation(x: Float, y: Float) -> Self {
        Self {
            e: x,
            f: y,
            ..Self::IDENTITY
        }
    }

    pub const fn scaling(x: Float, y: Float) -> Self {
        Self {
            a: x,
            d: y,
            ..Self::IDENTITY
        }
    }

    pub fn rotation(radians: Float) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// `self × other`: `other` is applied to points first.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// `None` for degenerate matrices.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 {
            return None;
        }

        let inv = 1.0 / det;
        Some(Transform {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    /// Length scale along x, used to size strokes and radii.
    pub fn scale_x(&self) -> Float {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    pub fn scale_y(&self) -> Float {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_order() {
        // translate, then scale: the scale acts in translated space
        let m = Transform::translation(10.0, 20.0).then(&Transform::scaling(2.0, 3.0));
        assert_eq!(m.apply(Point::new(1.0, 1.0)), Point::new(12.0, 23.0));
        assert_eq!(m.scale_x(), 2.0);
        assert_eq!(m.scale_y(), 3.0);
        assert!(Transform::default().is_identity());
    }

    #[test]
    fn inversion() {
        let m = Transform::translation(10.0, 20.0).then(&Transform::scaling(2.0, 4.0));
        let inv = m.invert().unwrap();
        assert_eq!(inv.apply(Point::new(12.0, 24.0)), Point::new(1.0, 1.0));
        assert_eq!(Transform::scaling(0.0, 1.0).invert(), None);
    }
}
