use crate::Backend;
use crate::Canvas;
use crate::CornerRadii;
use crate::EndMode;
use crate::Float;
use crate::Point;
use crate::ShapeResult;
use crate::Topology;
use crate::Vertex;
use crate::geometry::{bezier_point, bezier_tangent, spline_point, spline_tangent, spline_segment};

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use core::f32::consts::TAU;

impl<B: Backend> Canvas<B> {
    /// Fills then strokes the current path, each only when its color is set.
    fn paint_path(&mut self) {
        if let Some(fill) = self.style.fill {
            self.backend.set_fill_color(fill);
            self.backend.fill_path();
        }
        if let Some(stroke) = self.style.stroke {
            self.backend.set_stroke_color(stroke);
            self.backend.stroke_path();
        }
    }

    fn polygon(&mut self, points: &[Point]) {
        let [first, rest @ ..] = points else {
            return;
        };

        self.backend.begin_path();
        self.backend.move_to(*first);
        for p in rest {
            self.backend.line_to(*p);
        }
        self.backend.close_path();
        self.paint_path();
    }

    // shapes

    /// Starts a shape; `None` draws a path whose vertex kinds decide
    /// each step. Any unfinished shape is dropped.
    pub fn begin_shape(&mut self, topology: Option<Topology>) {
        self.shape.begin(topology);
    }

    pub fn vertex(&mut self, x: Float, y: Float) {
        self.shape.vertex(x, y);
    }

    /// Quadratic step through control point `(cx, cy)`.
    pub fn curve_vertex(&mut self, cx: Float, cy: Float, x: Float, y: Float) {
        self.shape.curve_vertex(cx, cy, x, y);
    }

    pub fn bezier_vertex(&mut self, cx0: Float, cy0: Float, cx1: Float, cy1: Float, x: Float, y: Float) {
        self.shape.bezier_vertex(cx0, cy0, cx1, cy1, x, y);
    }

    pub fn spline_vertex(&mut self, x: Float, y: Float) {
        self.shape.spline_vertex(x, y);
    }

    /// Draws the accumulated shape.
    ///
    /// Fails with `EmptyShape` when no vertex was added. List, strip and
    /// fan topologies ignore vertices that don't complete a primitive.
    pub fn end_shape(&mut self, mode: Option<EndMode>) -> ShapeResult<()> {
        let topology = self.shape.finish()?;
        let shape = core::mem::take(&mut self.shape);
        let nodes = shape.vertices();
        let p = |i: usize| nodes[i].position();

        log::debug!(
            "end_shape: {} vertices as {}",
            nodes.len(),
            topology.map(Topology::as_text).unwrap_or("Path"),
        );

        match topology {
            None => self.shape_path(nodes, mode),
            Some(Topology::Points) => {
                for node in nodes {
                    let pos = node.position();
                    self.point(pos.x, pos.y);
                }
            }
            Some(Topology::Lines) => {
                for pair in nodes.chunks_exact(2) {
                    let [a, b] = [pair[0].position(), pair[1].position()];
                    self.line(a.x, a.y, b.x, b.y);
                }
            }
            Some(Topology::Triangles) => {
                for tri in nodes.chunks_exact(3) {
                    self.polygon(&[tri[0].position(), tri[1].position(), tri[2].position()]);
                }
            }
            Some(Topology::TriangleStrip) => {
                for i in 0..nodes.len().saturating_sub(2) {
                    self.polygon(&[p(i), p(i + 1), p(i + 2)]);
                }
            }
            Some(Topology::TriangleFan) => {
                for i in 1..nodes.len().saturating_sub(1) {
                    self.polygon(&[p(0), p(i), p(i + 1)]);
                }
            }
            Some(Topology::Quads) => {
                for q in nodes.chunks_exact(4) {
                    self.polygon(&[q[0].position(), q[1].position(), q[2].position(), q[3].position()]);
                }
            }
            Some(Topology::QuadStrip) => {
                // rails pair up, so the window's last two nodes swap
                let mut i = 0;
                while i + 3 < nodes.len() {
                    self.polygon(&[p(i), p(i + 1), p(i + 3), p(i + 2)]);
                    i += 2;
                }
            }
        }

        // keep the finished vertices readable until the next begin_shape
        self.shape = shape;
        Ok(())
    }

    fn shape_path(&mut self, nodes: &[Vertex], mode: Option<EndMode>) {
        self.backend.begin_path();

        let has_spline = nodes.iter().any(Vertex::is_spline);
        match has_spline && nodes.len() > 3 {
            true => {
                let s = self.style.spline_tightness;
                let p = |i: usize| nodes[i].position();
                self.backend.move_to(p(1));
                for i in 1..nodes.len() - 2 {
                    let [ctrl0, ctrl1, end] = spline_segment(p(i - 1), p(i), p(i + 1), p(i + 2), s);
                    self.backend.cubic_to(ctrl0, ctrl1, end);
                }
            }
            false => {
                self.backend.move_to(nodes[0].position());
                for node in &nodes[1..] {
                    match *node {
                        Vertex::Line(p) => self.backend.line_to(p),
                        Vertex::Quadratic { ctrl, end } => self.backend.quad_to(ctrl, end),
                        Vertex::Bezier { ctrl0, ctrl1, end } => self.backend.cubic_to(ctrl0, ctrl1, end),
                        // too few nodes to smooth
                        Vertex::Spline(_) => (),
                    }
                }
            }
        }

        if mode == Some(EndMode::Close) {
            self.backend.close_path();
        }
        self.paint_path();
    }

    /// Smooth curve from `(x2, y2)` to `(x3, y3)`, steered by the outer points.
    #[allow(clippy::too_many_arguments)]
    pub fn spline(&mut self, x1: Float, y1: Float, x2: Float, y2: Float, x3: Float, y3: Float, x4: Float, y4: Float) {
        let nodes = [(x1, y1), (x2, y2), (x3, y3), (x4, y4)].map(|(x, y)| Vertex::Spline(Point::new(x, y)));
        self.shape_path(&nodes, None);
    }

    // primitives

    /// Disc of diameter `stroke_weight` in the stroke color; nothing
    /// without a stroke.
    pub fn point(&mut self, x: Float, y: Float) {
        let Some(stroke) = self.style.stroke else {
            return;
        };

        log::trace!("point ({}, {})", x, y);
        self.backend.set_fill_color(stroke);
        self.backend.begin_path();
        self.backend.circle_arc(Point::new(x, y), self.style.stroke_weight / 2.0, 0.0, TAU);
        self.backend.fill_path();
    }

    pub fn line(&mut self, x1: Float, y1: Float, x2: Float, y2: Float) {
        let Some(stroke) = self.style.stroke else {
            return;
        };

        self.backend.set_stroke_color(stroke);
        self.backend.begin_path();
        self.backend.move_to(Point::new(x1, y1));
        self.backend.line_to(Point::new(x2, y2));
        self.backend.stroke_path();
    }

    /// Plain rectangle placed per the rect mode. The stroke is offset by
    /// half a pixel so 1px outlines land on pixel centers.
    pub fn rect(&mut self, x: Float, y: Float, w: Float, h: Float) {
        let [x, y, w, h] = self.style.rect_mode.normalize(x, y, w, h);
        log::trace!("rect ({}, {}) {}x{}", x, y, w, h);

        let size = Point::new(w, h);
        if let Some(fill) = self.style.fill {
            self.backend.set_fill_color(fill);
            self.backend.fill_rect(Point::new(x, y), size);
        }
        if let Some(stroke) = self.style.stroke {
            self.backend.set_stroke_color(stroke);
            self.backend.stroke_rect(Point::new(x + 0.5, y + 0.5), size);
        }
    }

    /// Rectangle with rounded corners; a single radius, `[r1, r2]`,
    /// `[r1, r2, r3]` or all four corners, see [`CornerRadii::normalize`].
    pub fn rounded_rect<R: Into<CornerRadii>>(&mut self, x: Float, y: Float, w: Float, h: Float, radii: R) {
        let [x, y, w, h] = self.style.rect_mode.normalize(x, y, w, h);
        let radii = radii.into();
        log::trace!("rounded rect ({}, {}) {}x{} {:?}", x, y, w, h, radii.as_array());

        self.backend.begin_path();
        self.backend.rounded_rect(Point::new(x, y), Point::new(w, h), radii);
        self.paint_path();
    }

    pub fn ellipse(&mut self, x: Float, y: Float, w: Float, h: Float) {
        let frame = self.style.ellipse_mode.normalize(x, y, w, h);
        self.backend.begin_path();
        self.backend.ellipse_arc(frame.center, frame.radii, 0.0, TAU);
        self.paint_path();
    }

    /// `d` is the diameter.
    pub fn circle(&mut self, x: Float, y: Float, d: Float) {
        self.backend.begin_path();
        self.backend.circle_arc(Point::new(x, y), d / 2.0, 0.0, TAU);
        self.paint_path();
    }

    /// Elliptic arc of a `w × h` ellipse centered on `(x, y)`, from
    /// `start` towards `stop` (angle mode units).
    ///
    /// The outline is sampled every `arc_step`: angles `start`,
    /// `start + step`, … while below `stop`. The fill is a sector closed
    /// through the center, the stroke only follows the outline.
    pub fn arc(&mut self, x: Float, y: Float, w: Float, h: Float, start: Float, stop: Float) {
        let (rx, ry) = (w / 2.0, h / 2.0);
        let mode = self.style.angle_mode;
        let step = self.style.arc_step;
        let at = |a: Float| Point::new(x + mode.cos(a) * rx, y + mode.sin(a) * ry);
        let steps = match stop > start {
            true => ((stop - start) / step).ceil() as usize,
            false => 0,
        };
        let angles = (0..steps).map(|k| start + k as Float * step);

        if let Some(fill) = self.style.fill {
            self.backend.set_fill_color(fill);
            self.backend.begin_path();
            self.backend.move_to(Point::new(x, y));
            for a in angles.clone() {
                self.backend.line_to(at(a));
            }
            self.backend.fill_path();
        }

        if let Some(stroke) = self.style.stroke {
            self.backend.set_stroke_color(stroke);
            self.backend.begin_path();
            self.backend.move_to(at(start));
            for a in angles {
                self.backend.line_to(at(a));
            }
            self.backend.stroke_path();
        }
    }

    pub fn triangle(&mut self, x1: Float, y1: Float, x2: Float, y2: Float, x3: Float, y3: Float) {
        self.polygon(&[Point::new(x1, y1), Point::new(x2, y2), Point::new(x3, y3)]);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn quad(&mut self, x1: Float, y1: Float, x2: Float, y2: Float, x3: Float, y3: Float, x4: Float, y4: Float) {
        self.polygon(&[
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x3, y3),
            Point::new(x4, y4),
        ]);
    }

    /// Cubic curve from `(x1, y1)` to `(x4, y4)`.
    #[allow(clippy::too_many_arguments)]
    pub fn bezier(&mut self, x1: Float, y1: Float, x2: Float, y2: Float, x3: Float, y3: Float, x4: Float, y4: Float) {
        self.backend.begin_path();
        self.backend.move_to(Point::new(x1, y1));
        self.backend.cubic_to(Point::new(x2, y2), Point::new(x3, y3), Point::new(x4, y4));
        self.paint_path();
    }

    // curve math, also usable without drawing

    pub fn bezier_point(&self, a: Float, b: Float, c: Float, d: Float, t: Float) -> Float {
        bezier_point(a, b, c, d, t)
    }

    pub fn bezier_tangent(&self, a: Float, b: Float, c: Float, d: Float, t: Float) -> Float {
        bezier_tangent(a, b, c, d, t)
    }

    pub fn spline_point(&self, a: Float, b: Float, c: Float, d: Float, t: Float) -> Float {
        spline_point(a, b, c, d, t)
    }

    pub fn spline_tangent(&self, a: Float, b: Float, c: Float, d: Float, t: Float) -> Float {
        spline_tangent(a, b, c, d, t)
    }

    /// Vertices of the last shape, finished or not.
    pub fn shape_vertices(&self) -> &[Vertex] {
        self.shape.vertices()
    }
}
