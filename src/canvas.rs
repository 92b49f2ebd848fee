use crate::AngleMode;
use crate::Backend;
use crate::Color;
use crate::ColorMode;
use crate::EllipseMode;
use crate::Filter;
use crate::Float;
use crate::Image;
use crate::ImageError;
use crate::ImageMode;
use crate::ImageResult;
use crate::LineCap;
use crate::LineJoin;
use crate::Point;
use crate::RectMode;
use crate::Transform;
use crate::frame::{FrameClock, FrameRate, Input};
use crate::random::{PerlinNoise, Random};
use crate::shape::ShapeBuilder;

use alloc::vec::Vec;

/// Persistent drawing state read by every drawing call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    /// `None` disables filling
    pub fill: Option<Color>,
    /// `None` disables stroking
    pub stroke: Option<Color>,
    pub stroke_weight: Float,
    pub stroke_cap: LineCap,
    pub stroke_join: LineJoin,
    pub rect_mode: RectMode,
    pub ellipse_mode: EllipseMode,
    pub image_mode: ImageMode,
    pub angle_mode: AngleMode,
    pub color_mode: ColorMode,
    /// 0 is a plain Catmull-Rom curve
    pub spline_tightness: Float,
    /// angle increment of `arc`, in `angle_mode` units
    pub arc_step: Float,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: Some(Color::BLACK),
            stroke_weight: 1.0,
            stroke_cap: LineCap::default(),
            stroke_join: LineJoin::default(),
            rect_mode: RectMode::default(),
            ellipse_mode: EllipseMode::default(),
            image_mode: ImageMode::default(),
            angle_mode: AngleMode::default(),
            color_mode: ColorMode::default(),
            spline_tightness: 0.0,
            arc_step: 1.0,
        }
    }
}

/// Immediate-mode drawing context over a [`Backend`].
///
/// Each canvas owns its style, shape accumulator and transform stack;
/// canvases never share them.
pub struct Canvas<B: Backend> {
    pub(crate) backend: B,
    width: usize,
    height: usize,
    pub(crate) style: Style,
    pub(crate) shape: ShapeBuilder,
    transform: Transform,
    matrix_stack: Vec<Transform>,
    pixels: Image,
    pub(crate) clock: FrameClock,
    pub(crate) input: Input,
    pub(crate) frame_rate: FrameRate,
    pub(crate) random: Random,
    pub(crate) noise: PerlinNoise,
}

impl<B: Backend> Canvas<B> {
    pub fn new(backend: B, width: usize, height: usize) -> Self {
        let mut canvas = Self {
            backend,
            width: 0,
            height: 0,
            style: Style::default(),
            shape: ShapeBuilder::new(),
            transform: Transform::IDENTITY,
            matrix_stack: Vec::new(),
            pixels: Image::new(0, 0),
            clock: FrameClock::default(),
            input: Input::default(),
            frame_rate: FrameRate::default(),
            random: Random::default(),
            noise: PerlinNoise::default(),
        };
        canvas.size(width, height);
        canvas
    }

    /// A new canvas of the same backend type, with its own state.
    pub fn create_graphics(&self, width: usize, height: usize) -> Canvas<B>
    where
        B: Default,
    {
        Canvas::new(B::default(), width, height)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Resizes the surface. Like a canvas element, this resets the
    /// transform and drops saved matrices.
    pub fn size(&mut self, width: usize, height: usize) {
        log::debug!("canvas size {}x{}", width, height);
        self.width = width;
        self.height = height;
        self.backend.resize(width, height);
        self.pixels = Image::new(width, height);

        self.matrix_stack.clear();
        self.transform = Transform::IDENTITY;
        self.backend.set_transform(&self.transform);
        self.backend.set_line_width(self.style.stroke_weight);
        self.backend.set_line_cap(self.style.stroke_cap);
        self.backend.set_line_join(self.style.stroke_join);
    }

    // style

    /// Builds a color from `components` read in the current color mode.
    pub fn color(&self, components: &[Float]) -> Color {
        Color::from_components(self.style.color_mode, components)
    }

    pub fn fill(&mut self, color: Color) {
        self.style.fill = Some(color);
    }

    pub fn no_fill(&mut self) {
        self.style.fill = None;
    }

    pub fn stroke(&mut self, color: Color) {
        self.style.stroke = Some(color);
    }

    pub fn no_stroke(&mut self) {
        self.style.stroke = None;
    }

    pub fn stroke_weight(&mut self, weight: Float) {
        self.style.stroke_weight = weight;
        self.backend.set_line_width(weight);
    }

    pub fn stroke_cap(&mut self, cap: LineCap) {
        self.style.stroke_cap = cap;
        self.backend.set_line_cap(cap);
    }

    pub fn stroke_join(&mut self, join: LineJoin) {
        self.style.stroke_join = join;
        self.backend.set_line_join(join);
    }

    pub fn rect_mode(&mut self, mode: RectMode) {
        self.style.rect_mode = mode;
    }

    pub fn ellipse_mode(&mut self, mode: EllipseMode) {
        self.style.ellipse_mode = mode;
    }

    pub fn image_mode(&mut self, mode: ImageMode) {
        self.style.image_mode = mode;
    }

    pub fn angle_mode(&mut self, mode: AngleMode) {
        self.style.angle_mode = mode;
    }

    pub fn color_mode(&mut self, mode: ColorMode) {
        self.style.color_mode = mode;
    }

    pub fn spline_tightness(&mut self, tightness: Float) {
        self.style.spline_tightness = tightness;
    }

    /// Angle increment used by `arc`; values that are not strictly
    /// positive are ignored.
    pub fn arc_step(&mut self, step: Float) {
        match step > 0.0 {
            true => self.style.arc_step = step,
            false => log::warn!("ignoring arc step {}", step),
        }
    }

    // transforms

    pub fn push_matrix(&mut self) {
        self.matrix_stack.push(self.transform);
    }

    pub fn pop_matrix(&mut self) {
        match self.matrix_stack.pop() {
            Some(transform) => self.set_transform(transform),
            None => log::warn!("pop_matrix without a matching push_matrix"),
        }
    }

    pub fn reset_matrix(&mut self) {
        self.set_transform(Transform::IDENTITY);
    }

    pub fn translate(&mut self, x: Float, y: Float) {
        self.set_transform(self.transform.then(&Transform::translation(x, y)));
    }

    pub fn scale(&mut self, x: Float, y: Float) {
        self.set_transform(self.transform.then(&Transform::scaling(x, y)));
    }

    pub fn scale_uniform(&mut self, s: Float) {
        self.scale(s, s);
    }

    /// `angle` is read in the current angle mode.
    pub fn rotate(&mut self, angle: Float) {
        let radians = self.style.angle_mode.to_radians(angle);
        self.set_transform(self.transform.then(&Transform::rotation(radians)));
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.backend.set_transform(&transform);
    }

    // images and pixels

    /// Covers the whole surface with `color`, ignoring the transform.
    /// Translucent colors first clear the surface.
    pub fn background(&mut self, color: Color) {
        if color.a < 255 {
            self.backend.clear();
        }

        let size = Point::new(self.width as Float, self.height as Float);
        self.backend.set_transform(&Transform::IDENTITY);
        self.backend.set_fill_color(color);
        self.backend.fill_rect(Point::zero(), size);
        self.backend.set_transform(&self.transform);
    }

    /// Draws `image` at its natural size, placed per the image mode.
    pub fn image(&mut self, image: &Image, x: Float, y: Float) {
        let (w, h) = (image.width() as Float, image.height() as Float);
        let [x, y, w, h] = match self.style.image_mode {
            ImageMode::Corners => [x, y, w, h],
            mode => mode.normalize(x, y, w, h),
        };
        self.backend.draw_image(image, Point::new(x, y), Point::new(w, h));
    }

    /// Draws `image` stretched per the image mode.
    pub fn image_sized(&mut self, image: &Image, x: Float, y: Float, w: Float, h: Float) {
        let [x, y, w, h] = self.style.image_mode.normalize(x, y, w, h);
        log::trace!("image at ({}, {}) size {}x{}", x, y, w, h);
        self.backend.draw_image(image, Point::new(x, y), Point::new(w, h));
    }

    fn read_pixels(&self, x: usize, y: usize, w: usize, h: usize) -> ImageResult<Image> {
        self.backend.read_pixels(x, y, w, h).ok_or_else(|| {
            log::warn!("the backend keeps no pixels");
            ImageError::Unsupported
        })
    }

    /// Copies the whole surface.
    pub fn snip(&self) -> ImageResult<Image> {
        self.read_pixels(0, 0, self.width, self.height)
    }

    /// Copies a region of the surface, clipped to it.
    pub fn snip_region(&self, x: usize, y: usize, w: usize, h: usize) -> ImageResult<Image> {
        self.read_pixels(x, y, w, h)
    }

    pub fn snip_pixel(&self, x: usize, y: usize) -> ImageResult<Color> {
        self.read_pixels(x, y, 1, 1)?.get(0, 0).ok_or(ImageError::OutOfBounds)
    }

    /// Refreshes [`Canvas::pixels`] from the surface.
    pub fn load_pixels(&mut self) -> ImageResult<()> {
        self.pixels = self.snip()?;
        Ok(())
    }

    /// Writes [`Canvas::pixels`] back to the surface.
    pub fn update_pixels(&mut self) -> ImageResult<()> {
        match self.backend.write_pixels(&self.pixels, 0, 0) {
            true => Ok(()),
            false => {
                log::warn!("the backend keeps no pixels");
                Err(ImageError::Unsupported)
            }
        }
    }

    pub fn pixels(&self) -> &Image {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut Image {
        &mut self.pixels
    }

    /// Applies `filter` to the whole surface.
    pub fn filter(&mut self, filter: Filter) -> ImageResult<()> {
        self.filter_region(filter, 0, 0, self.width, self.height)
    }

    pub fn filter_region(&mut self, filter: Filter, x: usize, y: usize, w: usize, h: usize) -> ImageResult<()> {
        let mut region = self.read_pixels(x, y, w, h)?;
        filter.apply(&mut region);
        match self.backend.write_pixels(&region, x, y) {
            true => Ok(()),
            false => Err(ImageError::Unsupported),
        }
    }
}
