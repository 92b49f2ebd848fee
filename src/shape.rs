use crate::Float;
use crate::Point;

use alloc::vec::Vec;

use ShapeError::*;

/// One typed entry of an in-progress shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Vertex {
    Line(Point),
    /// quadratic curve ending at `end`
    Quadratic { ctrl: Point, end: Point },
    /// cubic curve ending at `end`
    Bezier { ctrl0: Point, ctrl1: Point, end: Point },
    Spline(Point),
}

impl Vertex {
    /// The point this vertex ends on.
    pub fn position(&self) -> Point {
        match self {
            Vertex::Line(p) => *p,
            Vertex::Quadratic { end, .. } => *end,
            Vertex::Bezier { end, .. } => *end,
            Vertex::Spline(p) => *p,
        }
    }

    pub fn is_spline(&self) -> bool {
        matches!(self, Vertex::Spline(_))
    }
}

/// How `end_shape` consumes the accumulated vertices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Topology {
    Points,
    Lines,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Quads,
    QuadStrip,
}

impl Topology {
    pub fn as_text(self) -> &'static str {
        match self {
            Topology::Points => "Points",
            Topology::Lines => "Lines",
            Topology::Triangles => "Triangles",
            Topology::TriangleStrip => "TriangleStrip",
            Topology::TriangleFan => "TriangleFan",
            Topology::Quads => "Quads",
            Topology::QuadStrip => "QuadStrip",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndMode {
    Close,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeError {
    EmptyShape,
}

pub type ShapeResult<T> = Result<T, ShapeError>;

/// Vertex accumulator between `begin_shape` and `end_shape`.
///
/// `topology == None` is the generic path mode, where vertex tags
/// decide how each step is drawn.
#[derive(Debug, Clone, Default)]
pub struct ShapeBuilder {
    vertices: Vec<Vertex>,
    topology: Option<Topology>,
    open: bool,
}

impl ShapeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops any unfinished shape.
    pub fn begin(&mut self, topology: Option<Topology>) {
        self.vertices.clear();
        self.topology = topology;
        self.open = true;
    }

    pub fn push(&mut self, vertex: Vertex) {
        if !self.open {
            log::warn!("{:?} added outside of begin_shape/end_shape", vertex);
        }
        self.vertices.push(vertex);
    }

    pub fn vertex(&mut self, x: Float, y: Float) {
        self.push(Vertex::Line(Point::new(x, y)));
    }

    pub fn curve_vertex(&mut self, cx: Float, cy: Float, x: Float, y: Float) {
        self.push(Vertex::Quadratic {
            ctrl: Point::new(cx, cy),
            end: Point::new(x, y),
        });
    }

    pub fn bezier_vertex(&mut self, cx0: Float, cy0: Float, cx1: Float, cy1: Float, x: Float, y: Float) {
        self.push(Vertex::Bezier {
            ctrl0: Point::new(cx0, cy0),
            ctrl1: Point::new(cx1, cy1),
            end: Point::new(x, y),
        });
    }

    pub fn spline_vertex(&mut self, x: Float, y: Float) {
        self.push(Vertex::Spline(Point::new(x, y)));
    }

    /// Marks the shape as finished; the vertices stay readable until
    /// the next `begin`.
    pub fn finish(&mut self) -> ShapeResult<Option<Topology>> {
        self.open = false;
        match self.vertices.is_empty() {
            true => Err(EmptyShape),
            false => Ok(self.topology),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn topology(&self) -> Option<Topology> {
        self.topology
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True when any vertex asks for spline smoothing.
    pub fn has_spline(&self) -> bool {
        self.vertices.iter().any(Vertex::is_spline)
    }
}
