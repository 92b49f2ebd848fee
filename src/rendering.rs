use crate::Backend;
use crate::Color;
use crate::CornerRadii;
use crate::Float;
use crate::Image;
use crate::LineCap;
use crate::LineJoin;
use crate::Point;
use crate::Transform;

use wizdraw::push_cubic_bezier_segments;
use wizdraw::stroke;
use wizdraw::fill;

use vek::bezier::CubicBezier2;
use vek::bezier::QuadraticBezier2;
use vek::vec::Vec2;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use rgb::RGBA8;

use core::f32::consts::{FRAC_PI_2, PI};
use alloc::{vec, vec::Vec};

#[derive(Debug, Clone, Default)]
struct Subpath {
    /// flattened, in device space
    points: Vec<Point>,
    closed: bool,
}

/// Software [`Backend`] painting into an RGBA8 surface with wizdraw.
///
/// Paths are flattened into device space as they are built, so the
/// transform in effect at each path call is the one that applies.
/// `SSAA` is the supersampling factor per axis and `SSAA_SQ` its square.
///
/// Joins come from wizdraw's stroker; caps other than `Butt` are
/// emulated on open subpaths.
pub struct Rasterizer<const SSAA: usize, const SSAA_SQ: usize> {
    surface: Image,
    mask: Vec<u8>,
    subpaths: Vec<Subpath>,
    fill_color: Color,
    stroke_color: Color,
    line_width: Float,
    line_cap: LineCap,
    line_join: LineJoin,
    transform: Transform,
}

impl<const SSAA: usize, const SSAA_SQ: usize> Rasterizer<SSAA, SSAA_SQ> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            surface: Image::new(width, height),
            mask: vec![0; width * height],
            subpaths: Vec::new(),
            fill_color: Color::WHITE,
            stroke_color: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            transform: Transform::IDENTITY,
        }
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    pub fn surface(&self) -> &Image {
        &self.surface
    }

    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }

    pub fn into_image(self) -> Image {
        self.surface
    }

    fn device(&self, p: Point) -> Point {
        self.transform.apply(p)
    }

    fn mask_size(&self) -> Vec2<usize> {
        Vec2::new(self.surface.width(), self.surface.height())
    }

    fn current(&mut self) -> Option<&mut Subpath> {
        self.subpaths.last_mut().filter(|s| !s.closed)
    }

    fn last_point(&self) -> Option<Point> {
        self.subpaths.last().filter(|s| !s.closed)?.points.last().copied()
    }

    /// Starts a new subpath when there is no open one. After a closed
    /// subpath, the new one starts where the closed one did.
    fn ensure_subpath(&mut self, device: Point) {
        if self.current().is_none() {
            let start = self.subpaths.last().and_then(|s| s.points.first().copied());
            let points = match start {
                Some(start) if start != device => vec![start, device],
                _ => vec![device],
            };
            self.subpaths.push(Subpath { points, closed: false });
        }
    }

    fn push_device(&mut self, device: Point) {
        match self.current() {
            Some(subpath) => subpath.points.push(device),
            None => self.ensure_subpath(device),
        }
    }

    /// Joins the current point to the first point of a curve, then
    /// samples `steps + 1` points of `f` over `[0, 1]`.
    fn push_sampled<F: Fn(Float) -> Point>(&mut self, steps: usize, f: F) {
        let steps = steps.max(1);
        for i in 0..=steps {
            let p = self.device(f((i as Float) / (steps as Float)));
            self.push_device(p);
        }
    }

    fn composite(&mut self, color: Color) {
        let src: RGBA8 = color.into();
        for (dst, q) in self.surface.pixels_mut().iter_mut().zip(self.mask.iter()) {
            if *q != 0 {
                blend_pixel(dst, src, *q, true);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 || color.a == 0 {
            return;
        }

        let mut closed = Vec::with_capacity(points.len() + 1);
        closed.extend_from_slice(points);
        closed.push(points[0]);

        let mask_size = self.mask_size();
        self.mask.fill(0);
        fill::<SSAA, SSAA_SQ>(&closed, &mut self.mask, mask_size);
        self.composite(color);
    }

    fn stroke_polyline(&mut self, points: &[Point], closed: bool, color: Color) {
        if points.len() < 2 || color.a == 0 {
            return;
        }

        let width = self.line_width * (self.transform.scale_x() + self.transform.scale_y()) / 2.0;
        let mut line = Vec::with_capacity(points.len() + 1);
        line.extend_from_slice(points);
        match closed {
            true => line.push(points[0]),
            false => {
                if self.line_cap == LineCap::Square {
                    extend_ends(&mut line, width / 2.0);
                }
            }
        }

        let mask_size = self.mask_size();
        self.mask.fill(0);
        stroke::<SSAA>(&line, &mut self.mask, mask_size, width);
        self.composite(color);

        if !closed && self.line_cap == LineCap::Round {
            for end in [points[0], points[points.len() - 1]] {
                let disc = disc_points(end, width / 2.0);
                self.fill_polygon(&disc, color);
            }
        }
    }

    fn device_rect(&self, origin: Point, size: Point) -> [Point; 4] {
        [
            self.device(origin),
            self.device(Point::new(origin.x + size.x, origin.y)),
            self.device(origin + size),
            self.device(Point::new(origin.x, origin.y + size.y)),
        ]
    }
}

impl<const SSAA: usize, const SSAA_SQ: usize> Default for Rasterizer<SSAA, SSAA_SQ> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<const SSAA: usize, const SSAA_SQ: usize> Backend for Rasterizer<SSAA, SSAA_SQ> {
    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, p: Point) {
        let device = self.device(p);
        self.subpaths.push(Subpath {
            points: vec![device],
            closed: false,
        });
    }

    fn line_to(&mut self, p: Point) {
        let device = self.device(p);
        self.push_device(device);
    }

    fn quad_to(&mut self, ctrl: Point, end: Point) {
        let (ctrl, end) = (self.device(ctrl), self.device(end));
        let start = self.last_point().unwrap_or(ctrl);
        self.ensure_subpath(start);

        let curve = QuadraticBezier2 { start, ctrl, end }.into_cubic();
        if let Some(subpath) = self.current() {
            push_cubic_bezier_segments::<8>(&curve, 0.6, &mut subpath.points);
            subpath.points.push(end);
        }
    }

    fn cubic_to(&mut self, ctrl0: Point, ctrl1: Point, end: Point) {
        let (ctrl0, ctrl1, end) = (self.device(ctrl0), self.device(ctrl1), self.device(end));
        let start = self.last_point().unwrap_or(ctrl0);
        self.ensure_subpath(start);

        let curve = CubicBezier2 { start, ctrl0, ctrl1, end };
        if let Some(subpath) = self.current() {
            push_cubic_bezier_segments::<8>(&curve, 0.6, &mut subpath.points);
            subpath.points.push(end);
        }
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.current() {
            subpath.closed = true;
        }
    }

    fn circle_arc(&mut self, center: Point, radius: Float, start: Float, end: Float) {
        self.ellipse_arc(center, Point::new(radius, radius), start, end);
    }

    fn ellipse_arc(&mut self, center: Point, radii: Point, start: Float, end: Float) {
        let angle = end - start;
        let scale = self.transform.scale_x().max(self.transform.scale_y());
        let max_r = radii.x.abs().max(radii.y.abs()) * scale;
        let steps = (max_r * angle.abs()).round() as usize;

        self.push_sampled(steps, |t| {
            let (sin, cos) = (start + angle * t).sin_cos();
            Point::new(center.x + cos * radii.x, center.y + sin * radii.y)
        });
    }

    fn rounded_rect(&mut self, origin: Point, size: Point, radii: CornerRadii) {
        let (x, y) = (origin.x.min(origin.x + size.x), origin.y.min(origin.y + size.y));
        let (w, h) = (size.x.abs(), size.y.abs());
        let max = w.min(h) / 2.0;
        let [tl, tr, br, bl] = radii.as_array().map(|r| r.abs().min(max));

        self.move_to(Point::new(x + tl, y));
        self.circle_arc(Point::new(x + w - tr, y + tr), tr, -FRAC_PI_2, 0.0);
        self.circle_arc(Point::new(x + w - br, y + h - br), br, 0.0, FRAC_PI_2);
        self.circle_arc(Point::new(x + bl, y + h - bl), bl, FRAC_PI_2, PI);
        self.circle_arc(Point::new(x + tl, y + tl), tl, PI, PI + FRAC_PI_2);
        self.close_path();
    }

    fn fill_path(&mut self) {
        let subpaths = core::mem::take(&mut self.subpaths);
        for subpath in &subpaths {
            self.fill_polygon(&subpath.points, self.fill_color);
        }
        self.subpaths = subpaths;
    }

    fn stroke_path(&mut self) {
        let subpaths = core::mem::take(&mut self.subpaths);
        for subpath in &subpaths {
            self.stroke_polyline(&subpath.points, subpath.closed, self.stroke_color);
        }
        self.subpaths = subpaths;
    }

    fn fill_rect(&mut self, origin: Point, size: Point) {
        let corners = self.device_rect(origin, size);
        self.fill_polygon(&corners, self.fill_color);
    }

    fn stroke_rect(&mut self, origin: Point, size: Point) {
        let corners = self.device_rect(origin, size);
        self.stroke_polyline(&corners, true, self.stroke_color);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: Float) {
        self.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.line_join = join;
    }

    fn set_transform(&mut self, transform: &Transform) {
        self.transform = *transform;
    }

    /// Nearest-neighbour blit over the transformed destination rect.
    fn draw_image(&mut self, image: &Image, origin: Point, size: Point) {
        let inverse = match self.transform.invert() {
            Some(inverse) => inverse,
            None => return,
        };
        if image.width() == 0 || image.height() == 0 || size.x == 0.0 || size.y == 0.0 {
            return;
        }

        let corners = self.device_rect(origin, size);
        let (w, h) = (self.width(), self.height());
        let clamp = |v: Float, max: usize| (v.max(0.0) as usize).min(max);
        let x0 = clamp(corners.iter().map(|c| c.x).fold(Float::INFINITY, Float::min).floor(), w);
        let x1 = clamp(corners.iter().map(|c| c.x).fold(Float::NEG_INFINITY, Float::max).ceil(), w);
        let y0 = clamp(corners.iter().map(|c| c.y).fold(Float::INFINITY, Float::min).floor(), h);
        let y1 = clamp(corners.iter().map(|c| c.y).fold(Float::NEG_INFINITY, Float::max).ceil(), h);

        for y in y0..y1 {
            for x in x0..x1 {
                let user = inverse.apply(Point::new(x as Float + 0.5, y as Float + 0.5));
                let u = (user.x - origin.x) / size.x;
                let v = (user.y - origin.y) / size.y;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }

                let sx = ((u * image.width() as Float) as usize).min(image.width() - 1);
                let sy = ((v * image.height() as Float) as usize).min(image.height() - 1);
                if let Some(src) = image.get(sx, sy) {
                    let dst = &mut self.surface.pixels_mut()[y * w + x];
                    blend_pixel(dst, src.into(), 255, true);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.surface.fill(Color::TRANSPARENT);
    }

    fn resize(&mut self, width: usize, height: usize) {
        log::debug!("surface resized to {}x{}", width, height);
        self.surface = Image::new(width, height);
        self.mask = vec![0; width * height];
        self.subpaths.clear();
    }

    fn read_pixels(&self, x: usize, y: usize, w: usize, h: usize) -> Option<Image> {
        Some(self.surface.region(x, y, w, h))
    }

    fn write_pixels(&mut self, image: &Image, x: usize, y: usize) -> bool {
        self.surface.paste(image, x, y);
        true
    }
}

/// Lengthens the first and last segments of an open polyline.
fn extend_ends(line: &mut [Point], by: Float) {
    let n = line.len();
    if n < 2 {
        return;
    }

    let push_out = |from: Point, to: Point| {
        let d = to - from;
        let len = d.magnitude();
        match len > 0.0 {
            true => to + d * (by / len),
            false => to,
        }
    };

    line[0] = push_out(line[1], line[0]);
    line[n - 1] = push_out(line[n - 2], line[n - 1]);
}

fn disc_points(center: Point, radius: Float) -> Vec<Point> {
    let steps = ((radius * 2.0 * PI).round() as usize).max(8);
    (0..steps)
        .map(|i| {
            let (sin, cos) = (2.0 * PI * (i as Float) / (steps as Float)).sin_cos();
            Point::new(center.x + cos * radius, center.y + sin * radius)
        })
        .collect()
}

/// Source-over blending of `src_pixel`, weighted by `mask_alpha`.
///
/// With `alpha_blend_dst` unset, the destination is overwritten by the
/// weighted source instead.
#[inline(always)]
pub fn blend_pixel(dst_pixel: &mut RGBA8, src_pixel: RGBA8, mask_alpha: u8, alpha_blend_dst: bool) {
    if src_pixel.a == 255 && mask_alpha == 255 {
        *dst_pixel = src_pixel;
        return;
    }

    let src_alpha = ((src_pixel.a as u32) * (mask_alpha as u32)) / 255;
    let u8_max = u8::MAX as u32;
    let dst_alpha = u8_max - src_alpha;

    let for_each = |src: u8, dst: &mut u8| {
        let src_scaled = (src as u32) * src_alpha;
        *dst = match alpha_blend_dst {
            true => ((src_scaled + (*dst as u32) * dst_alpha) / u8_max) as u8,
            false => (src_scaled / u8_max) as u8,
        };
    };

    for_each(src_pixel.r, &mut dst_pixel.r);
    for_each(src_pixel.g, &mut dst_pixel.g);
    for_each(src_pixel.b, &mut dst_pixel.b);

    // coverage accumulates on the alpha channel
    dst_pixel.a = match alpha_blend_dst {
        true => (src_alpha + (dst_pixel.a as u32) * dst_alpha / u8_max) as u8,
        false => src_alpha as u8,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    type Raster = Rasterizer<4, 16>;

    #[test]
    fn fills_rects() {
        let mut r = Raster::new(10, 10);
        r.set_fill_color(Color::rgb(255, 0, 0));
        r.fill_rect(Point::new(2.0, 2.0), Point::new(6.0, 6.0));

        assert_eq!(r.surface().get(5, 5), Some(Color::rgb(255, 0, 0)));
        assert_eq!(r.surface().get(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(r.surface().get(9, 9), Some(Color::TRANSPARENT));
    }

    #[test]
    fn transformed_paths() {
        let mut r = Raster::new(20, 20);
        r.set_transform(&Transform::translation(10.0, 10.0));
        r.set_fill_color(Color::WHITE);
        r.begin_path();
        r.circle_arc(Point::zero(), 5.0, 0.0, 2.0 * PI);
        r.fill_path();

        assert_eq!(r.surface().get(10, 10), Some(Color::WHITE));
        assert_eq!(r.surface().get(2, 2), Some(Color::TRANSPARENT));
    }

    #[test]
    fn blending() {
        let mut dst = RGBA8::new(0, 0, 0, 255);
        blend_pixel(&mut dst, RGBA8::new(255, 255, 255, 255), 255, true);
        assert_eq!(dst, RGBA8::new(255, 255, 255, 255));

        let mut dst = RGBA8::new(0, 0, 0, 255);
        blend_pixel(&mut dst, RGBA8::new(255, 0, 0, 255), 51, true);
        assert_eq!(dst, RGBA8::new(51, 0, 0, 255));
    }

    #[test]
    fn pixel_round_trip() {
        let mut r = Raster::new(4, 4);
        let mut img = Image::new(2, 1);
        img.fill(Color::rgb(1, 2, 3));
        assert!(r.write_pixels(&img, 2, 3));
        assert_eq!(r.read_pixels(2, 3, 2, 1), Some(img));
        r.clear();
        assert_eq!(r.surface().get(2, 3), Some(Color::TRANSPARENT));
    }

    #[test]
    fn image_blit() {
        let mut src = Image::new(2, 2);
        src.fill(Color::rgb(0, 0, 255));
        let mut r = Raster::new(8, 8);
        r.draw_image(&src, Point::new(2.0, 2.0), Point::new(4.0, 4.0));
        assert_eq!(r.surface().get(3, 3), Some(Color::rgb(0, 0, 255)));
        assert_eq!(r.surface().get(6, 6), Some(Color::TRANSPARENT));
    }
}
