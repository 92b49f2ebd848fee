use crate::Color;
use crate::CornerRadii;
use crate::Float;
use crate::Image;
use crate::Point;
use crate::Transform;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Retained path/fill/stroke surface a [`Canvas`](crate::Canvas) draws on.
///
/// The model follows a 2D canvas context: path calls accumulate into a
/// current path that `fill_path` and `stroke_path` paint with the last
/// colors set. Angles are in radians, coordinates in user space (the
/// backend applies the current transform).
pub trait Backend {
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, end: Point);
    fn cubic_to(&mut self, ctrl0: Point, ctrl1: Point, end: Point);
    fn close_path(&mut self);

    /// Appends a circular arc, joined to the current point if any.
    fn circle_arc(&mut self, center: Point, radius: Float, start: Float, end: Float);
    fn ellipse_arc(&mut self, center: Point, radii: Point, start: Float, end: Float);
    /// Appends a closed rounded rectangle subpath.
    fn rounded_rect(&mut self, origin: Point, size: Point, radii: CornerRadii);

    fn fill_path(&mut self);
    fn stroke_path(&mut self);

    /// Fills a rectangle without touching the current path.
    fn fill_rect(&mut self, origin: Point, size: Point);
    /// Strokes a rectangle without touching the current path.
    fn stroke_rect(&mut self, origin: Point, size: Point);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: Float);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_transform(&mut self, transform: &Transform);

    /// Blits `image` stretched over `origin .. origin + size`.
    fn draw_image(&mut self, image: &Image, origin: Point, size: Point);

    /// Sets every pixel to transparent black.
    fn clear(&mut self);
    fn resize(&mut self, width: usize, height: usize);

    /// Copies a pixel region out; `None` when the backend keeps no pixels.
    fn read_pixels(&self, _x: usize, _y: usize, _w: usize, _h: usize) -> Option<Image> {
        None
    }

    /// Writes `image` at `(x, y)`, ignoring transform and blending.
    /// Returns false when the backend keeps no pixels.
    fn write_pixels(&mut self, _image: &Image, _x: usize, _y: usize) -> bool {
        false
    }
}
