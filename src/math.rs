use crate::Float;
use crate::Vec3;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use core::f32::consts::PI;

/// Unit used by every angle-taking call of a `Canvas`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    pub fn to_radians(self, angle: Float) -> Float {
        match self {
            AngleMode::Degrees => radians(angle),
            AngleMode::Radians => angle,
        }
    }

    pub fn from_radians(self, angle: Float) -> Float {
        match self {
            AngleMode::Degrees => degrees(angle),
            AngleMode::Radians => angle,
        }
    }

    pub fn sin(self, angle: Float) -> Float {
        self.to_radians(angle).sin()
    }

    pub fn cos(self, angle: Float) -> Float {
        self.to_radians(angle).cos()
    }

    pub fn tan(self, angle: Float) -> Float {
        self.to_radians(angle).tan()
    }

    pub fn atan2(self, y: Float, x: Float) -> Float {
        self.from_radians(y.atan2(x))
    }
}

pub fn radians(degrees: Float) -> Float {
    degrees * PI / 180.0
}

pub fn degrees(radians: Float) -> Float {
    radians * 180.0 / PI
}

pub fn constrain(n: Float, min: Float, max: Float) -> Float {
    if n > max {
        max
    } else if n < min {
        min
    } else {
        n
    }
}

pub fn sq(n: Float) -> Float {
    n * n
}

/// Re-maps `v` from `[start1, stop1]` onto `[start2, stop2]`, without clamping.
pub fn map(v: Float, start1: Float, stop1: Float, start2: Float, stop2: Float) -> Float {
    start2 + (stop2 - start2) * ((v - start1) / (stop1 - start1))
}

pub fn lerp(a: Float, b: Float, amount: Float) -> Float {
    (b - a) * amount + a
}

pub fn dist(x1: Float, y1: Float, x2: Float, y2: Float) -> Float {
    (sq(x1 - x2) + sq(y1 - y2)).sqrt()
}

pub fn dist3(a: Vec3, b: Vec3) -> Float {
    (sq(a.x - b.x) + sq(a.y - b.y) + sq(a.z - b.z)).sqrt()
}

/// Unit vector along `v`; a zero vector is returned unchanged.
pub fn normalize(v: Vec3) -> Vec3 {
    let m = (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
    match m > 0.0 {
        true => Vec3::new(v.x / m, v.y / m, v.z / m),
        false => v,
    }
}

pub fn dot(a: Vec3, b: Vec3) -> Float {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}
