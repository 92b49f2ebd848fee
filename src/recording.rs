use crate::Backend;
use crate::Color;
use crate::CornerRadii;
use crate::Float;
use crate::Image;
use crate::LineCap;
use crate::LineJoin;
use crate::Point;
use crate::Transform;

use alloc::vec::Vec;

/// One backend call, as captured by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    ClosePath,
    CircleArc {
        center: Point,
        radius: Float,
        start: Float,
        end: Float,
    },
    EllipseArc {
        center: Point,
        radii: Point,
        start: Float,
        end: Float,
    },
    RoundedRect {
        origin: Point,
        size: Point,
        radii: CornerRadii,
    },
    FillPath,
    StrokePath,
    FillRect(Point, Point),
    StrokeRect(Point, Point),
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(Float),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetTransform(Transform),
    /// image size, destination origin and size
    DrawImage {
        width: usize,
        height: usize,
        origin: Point,
        size: Point,
    },
    Clear,
    Resize(usize, usize),
    WritePixels {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl Command {
    pub fn as_text(&self) -> &'static str {
        match self {
            Command::BeginPath => "BeginPath",
            Command::MoveTo(_) => "MoveTo",
            Command::LineTo(_) => "LineTo",
            Command::QuadTo(..) => "QuadTo",
            Command::CubicTo(..) => "CubicTo",
            Command::ClosePath => "ClosePath",
            Command::CircleArc { .. } => "CircleArc",
            Command::EllipseArc { .. } => "EllipseArc",
            Command::RoundedRect { .. } => "RoundedRect",
            Command::FillPath => "FillPath",
            Command::StrokePath => "StrokePath",
            Command::FillRect(..) => "FillRect",
            Command::StrokeRect(..) => "StrokeRect",
            Command::SetFillColor(_) => "SetFillColor",
            Command::SetStrokeColor(_) => "SetStrokeColor",
            Command::SetLineWidth(_) => "SetLineWidth",
            Command::SetLineCap(_) => "SetLineCap",
            Command::SetLineJoin(_) => "SetLineJoin",
            Command::SetTransform(_) => "SetTransform",
            Command::DrawImage { .. } => "DrawImage",
            Command::Clear => "Clear",
            Command::Resize(..) => "Resize",
            Command::WritePixels { .. } => "WritePixels",
        }
    }

    /// True for the calls that put paint on the surface.
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            Command::FillPath | Command::StrokePath | Command::FillRect(..) | Command::StrokeRect(..) | Command::DrawImage { .. }
        )
    }
}

/// Backend that paints nothing and keeps every call in order.
///
/// An optional pixel store makes `read_pixels`/`write_pixels` work, so
/// pixel round trips can be checked without rasterizing.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    commands: Vec<Command>,
    pixels: Option<Image>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keeps a transparent `width × height` pixel store.
    pub fn with_pixels(width: usize, height: usize) -> Self {
        Self {
            commands: Vec::new(),
            pixels: Some(Image::new(width, height)),
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        core::mem::take(&mut self.commands)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Commands that put paint on the surface, in order.
    pub fn paint_commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(|c| c.is_paint())
    }

    fn push(&mut self, command: Command) {
        log::trace!("{}", command.as_text());
        self.commands.push(command);
    }
}

impl Backend for RecordingBackend {
    fn begin_path(&mut self) {
        self.push(Command::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.push(Command::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(Command::LineTo(p));
    }

    fn quad_to(&mut self, ctrl: Point, end: Point) {
        self.push(Command::QuadTo(ctrl, end));
    }

    fn cubic_to(&mut self, ctrl0: Point, ctrl1: Point, end: Point) {
        self.push(Command::CubicTo(ctrl0, ctrl1, end));
    }

    fn close_path(&mut self) {
        self.push(Command::ClosePath);
    }

    fn circle_arc(&mut self, center: Point, radius: Float, start: Float, end: Float) {
        self.push(Command::CircleArc { center, radius, start, end });
    }

    fn ellipse_arc(&mut self, center: Point, radii: Point, start: Float, end: Float) {
        self.push(Command::EllipseArc { center, radii, start, end });
    }

    fn rounded_rect(&mut self, origin: Point, size: Point, radii: CornerRadii) {
        self.push(Command::RoundedRect { origin, size, radii });
    }

    fn fill_path(&mut self) {
        self.push(Command::FillPath);
    }

    fn stroke_path(&mut self) {
        self.push(Command::StrokePath);
    }

    fn fill_rect(&mut self, origin: Point, size: Point) {
        self.push(Command::FillRect(origin, size));
    }

    fn stroke_rect(&mut self, origin: Point, size: Point) {
        self.push(Command::StrokeRect(origin, size));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(Command::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(Command::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: Float) {
        self.push(Command::SetLineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.push(Command::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.push(Command::SetLineJoin(join));
    }

    fn set_transform(&mut self, transform: &Transform) {
        self.push(Command::SetTransform(*transform));
    }

    fn draw_image(&mut self, image: &Image, origin: Point, size: Point) {
        self.push(Command::DrawImage {
            width: image.width(),
            height: image.height(),
            origin,
            size,
        });
    }

    fn clear(&mut self) {
        if let Some(pixels) = &mut self.pixels {
            pixels.fill(Color::TRANSPARENT);
        }
        self.push(Command::Clear);
    }

    fn resize(&mut self, width: usize, height: usize) {
        if let Some(pixels) = &mut self.pixels {
            *pixels = Image::new(width, height);
        }
        self.push(Command::Resize(width, height));
    }

    fn read_pixels(&self, x: usize, y: usize, w: usize, h: usize) -> Option<Image> {
        self.pixels.as_ref().map(|p| p.region(x, y, w, h))
    }

    fn write_pixels(&mut self, image: &Image, x: usize, y: usize) -> bool {
        let written = match &mut self.pixels {
            Some(pixels) => {
                pixels.paste(image, x, y);
                true
            }
            None => false,
        };

        self.push(Command::WritePixels {
            x,
            y,
            width: image.width(),
            height: image.height(),
        });

        written
    }
}
