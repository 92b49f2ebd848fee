//! Hit tests between simple 2D and 3D shapes, plus ray casts.
//!
//! Shapes take the same arguments as their drawing calls: rects and
//! arcs by corner or center as noted, circles and spheres by diameter.
//! 3D boxes are centered on their position.

use crate::Float;
use crate::Point;
use crate::Vec3;
use crate::math::{cross, dot};

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use core::f32::consts::{PI, TAU};

const LINE_TOLERANCE: Float = 0.05;

pub fn point_point(p: Point, q: Point) -> bool {
    p == q
}

/// True when `p` lies on the segment `a → b`, within a small tolerance.
pub fn point_line(a: Point, b: Point, p: Point) -> bool {
    let total = a.distance(b);
    let seg1 = p.distance(a);
    let seg2 = p.distance(b);
    (total - seg1 - seg2).abs() < LINE_TOLERANCE
}

pub fn point_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let w1 = (a.x * (c.y - a.y) + (p.y - a.y) * (c.x - a.x) - p.x * (c.y - a.y))
        / ((b.y - a.y) * (c.x - a.x) - (b.x - a.x) * (c.y - a.y));
    let w2 = (a.x * (b.y - a.y) + (p.y - a.y) * (b.x - a.x) - p.x * (b.y - a.y))
        / ((c.y - a.y) * (b.x - a.x) - (c.x - a.x) * (b.y - a.y));
    w1 >= 0.0 && w2 >= 0.0 && w1 + w2 <= 1.0
}

/// Strict: points on the border are outside.
pub fn point_rect(p: Point, origin: Point, size: Point) -> bool {
    p.x > origin.x && p.x < origin.x + size.x && p.y > origin.y && p.y < origin.y + size.y
}

pub fn point_circle(p: Point, center: Point, diameter: Float) -> bool {
    let r = diameter / 2.0;
    p.distance_squared(center) < r * r
}

pub fn point_ellipse(p: Point, center: Point, size: Point) -> bool {
    let d = p - center;
    let r = size / 2.0;
    (d.x * d.x) / (r.x * r.x) + (d.y * d.y) / (r.y * r.y) <= 1.0
}

/// Pie-slice test; `start` and `stop` are in radians, clockwise from +x.
pub fn point_arc(p: Point, center: Point, size: Point, start: Float, stop: Float) -> bool {
    let d = p - center;
    let r = size / 2.0;
    if (d.x * d.x) / (r.x * r.x) + (d.y * d.y) / (r.y * r.y) > 1.0 {
        return false;
    }

    let (mut start, mut stop) = (start, stop);
    while start < 0.0 {
        start += TAU;
        stop += TAU;
    }
    while stop > TAU {
        start -= TAU;
        stop -= TAU;
    }
    if stop - start >= TAU {
        return true;
    }

    let inverted = start < 0.0 && start < stop;
    if inverted {
        core::mem::swap(&mut start, &mut stop);
    }

    // parametric angles to polar angles on the ellipse
    let polar = |a: Float| {
        let angle = (a.sin() * r.y).atan2(a.cos() * r.x);
        match angle < 0.0 {
            true => angle + TAU,
            false => angle,
        }
    };

    let angle = (-d.y).atan2(-d.x) + PI;
    let within = angle > polar(start) && angle < polar(stop);
    within != inverted
}

/// Proper crossing of two segments; touching or parallel segments don't count.
pub fn line_line(a: Point, b: Point, c: Point, d: Point) -> bool {
    let det = (b.x - a.x) * (d.y - c.y) - (d.x - c.x) * (b.y - a.y);
    if det == 0.0 {
        return false;
    }

    let lambda = ((d.y - c.y) * (d.x - a.x) + (c.x - d.x) * (d.y - a.y)) / det;
    let gamma = ((a.y - b.y) * (d.x - a.x) + (b.x - a.x) * (d.y - a.y)) / det;
    (0.0 < lambda && lambda < 1.0) && (0.0 < gamma && gamma < 1.0)
}

/// True when the segment has an end inside the rect or crosses one of
/// its edges.
pub fn line_rect(a: Point, b: Point, origin: Point, size: Point) -> bool {
    let max = origin + size;
    let inside = |q: Point| q.x >= origin.x && q.x <= max.x && q.y >= origin.y && q.y <= max.y;
    if inside(a) || inside(b) {
        return true;
    }

    let corners = [origin, Point::new(max.x, origin.y), max, Point::new(origin.x, max.y)];
    (0..4).any(|i| line_line(a, b, corners[i], corners[(i + 1) % 4]))
}

/// Inclusive: a tangent segment touches the circle.
pub fn line_circle(a: Point, b: Point, center: Point, diameter: Float) -> bool {
    let r = diameter / 2.0;
    let ab = b - a;
    let len_sq = ab.magnitude_squared();
    let t = match len_sq == 0.0 {
        true => 0.0,
        false => ((center - a).dot(ab) / len_sq).max(0.0).min(1.0),
    };
    let closest = a + ab * t;
    center.distance_squared(closest) <= r * r
}

/// Inclusive: touching rects overlap.
pub fn rect_rect(o1: Point, s1: Point, o2: Point, s2: Point) -> bool {
    !(o1.x + s1.x < o2.x || o1.x > o2.x + s2.x || o1.y + s1.y < o2.y || o1.y > o2.y + s2.y)
}

pub fn rect_circle(origin: Point, size: Point, center: Point, diameter: Float) -> bool {
    let nearest = Point::new(
        center.x.max(origin.x).min(origin.x + size.x),
        center.y.max(origin.y).min(origin.y + size.y),
    );
    let r = diameter / 2.0;
    center.distance_squared(nearest) <= r * r
}

pub fn circle_circle(c1: Point, d1: Float, c2: Point, d2: Float) -> bool {
    let r = d1 / 2.0 + d2 / 2.0;
    c1.distance_squared(c2) <= r * r
}

/// Approximation that treats both ellipses as one scaled circle test.
pub fn ellipse_ellipse(c1: Point, s1: Point, c2: Point, s2: Point) -> bool {
    let dx = (c1.x - c2.x) / (s1.x + s2.x);
    let dy = (c1.y - c2.y) / (s1.y + s2.y);
    (dx * dx + dy * dy) * 4.0 <= 1.0
}

/// `origin` is the minimum corner here, unlike the centered boxes below.
pub fn point_box(p: Vec3, origin: Vec3, size: Vec3) -> bool {
    let max = origin + size;
    (p.x >= origin.x && p.x <= max.x) && (p.y >= origin.y && p.y <= max.y) && (p.z >= origin.z && p.z <= max.z)
}

pub fn point_sphere(p: Vec3, center: Vec3, diameter: Float) -> bool {
    let r = diameter / 2.0;
    p.distance_squared(center) < r * r
}

pub fn box_box(c1: Vec3, s1: Vec3, c2: Vec3, s2: Vec3) -> bool {
    let [min1, max1] = [c1 - s1 / 2.0, c1 + s1 / 2.0];
    let [min2, max2] = [c2 - s2 / 2.0, c2 + s2 / 2.0];
    (min1.x <= max2.x && max1.x >= min2.x)
        && (min1.y <= max2.y && max1.y >= min2.y)
        && (min1.z <= max2.z && max1.z >= min2.z)
}

pub fn box_sphere(center: Vec3, size: Vec3, sphere: Vec3, diameter: Float) -> bool {
    let half = size / 2.0;
    let nearest = Vec3::new(
        sphere.x.min(center.x + half.x).max(center.x - half.x),
        sphere.y.min(center.y + half.y).max(center.y - half.y),
        sphere.z.min(center.z + half.z).max(center.z - half.z),
    );
    let r = diameter / 2.0;
    nearest.distance_squared(sphere) < r * r
}

pub fn sphere_sphere(c1: Vec3, d1: Float, c2: Vec3, d2: Float) -> bool {
    let r = d1 / 2.0 + d2 / 2.0;
    c1.distance_squared(c2) < r * r
}

/// Half line starting at `origin`; distances are in units of `velocity`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub velocity: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, velocity: Vec3) -> Self {
        Self { origin, velocity }
    }

    pub fn at(&self, t: Float) -> Vec3 {
        self.origin + self.velocity * t
    }
}

/// Distance to the near side of the sphere, `None` when missed or
/// when the sphere is behind the ray.
pub fn ray_sphere(ray: &Ray, center: Vec3, diameter: Float) -> Option<Float> {
    let r = diameter / 2.0;
    let l = ray.origin - center;
    let v = ray.velocity;

    let a = dot(v, v);
    let b = 2.0 * dot(v, l);
    let c = dot(l, l) - r * r;
    let discr = b * b - 4.0 * a * c;

    match discr < 0.0 || b > 0.0 {
        true => None,
        false => Some((-b - discr.sqrt()) / (2.0 * a)),
    }
}

/// Slab test against a centered box. Rays starting inside hit the far side.
pub fn ray_box(ray: &Ray, center: Vec3, size: Vec3) -> Option<Float> {
    let min = center - size / 2.0;
    let max = center + size / 2.0;

    let mut t_min = Float::NEG_INFINITY;
    let mut t_max = Float::INFINITY;
    for (o, v, lo, hi) in [
        (ray.origin.x, ray.velocity.x, min.x, max.x),
        (ray.origin.y, ray.velocity.y, min.y, max.y),
        (ray.origin.z, ray.velocity.z, min.z, max.z),
    ] {
        let inv = 1.0 / v;
        let t1 = (lo - o) * inv;
        let t2 = (hi - o) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max < t_min {
        return None;
    }

    let d = match t_min < 0.0 {
        true => t_max,
        false => t_min,
    };

    match d < 0.0 {
        true => None,
        false => Some(d),
    }
}

/// Plane extent along its axes.
const PLANE_EXTENT: Float = 1000.0;

/// Casts against a finite axis-aligned plane slab around `point`; every
/// non-zero `normal` axis is flattened.
pub fn ray_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<Float> {
    let thickness = |n: Float| match n != 0.0 {
        true => Float::EPSILON,
        false => PLANE_EXTENT,
    };
    let size = Vec3::new(thickness(normal.x), thickness(normal.y), thickness(normal.z));
    ray_box(ray, point, size)
}

/// Möller–Trumbore; hits at or behind the origin are ignored.
pub fn ray_triangle(ray: &Ray, [v1, v2, v3]: [Vec3; 3]) -> Option<Float> {
    let edge1 = v2 - v1;
    let edge2 = v3 - v1;
    let h = cross(ray.velocity, edge2);
    let a = dot(edge1, h);
    if a > -Float::EPSILON && a < Float::EPSILON {
        // parallel
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v1;
    let u = f * dot(s, h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = cross(s, edge1);
    let v = f * dot(ray.velocity, q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * dot(edge2, q);
    match t > Float::EPSILON {
        true => Some(t),
        false => None,
    }
}
