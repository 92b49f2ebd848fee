#![no_std]
extern crate alloc;

pub mod backend;
pub mod canvas;
pub mod color;
pub mod drawing;
pub mod filter;
pub mod frame;
pub mod geometry;
pub mod image;
pub mod math;
pub mod random;
pub mod recording;
pub mod rendering;
pub mod shape;
pub mod touch;
pub mod transform;

#[cfg(test)]
mod tests;

pub type Float = f32;
pub type Point = vek::vec::repr_c::vec2::Vec2<Float>;
pub type Vec3 = vek::vec::repr_c::vec3::Vec3<Float>;

#[doc(inline)]
pub use {
    backend::Backend,
    backend::LineCap,
    backend::LineJoin,
    canvas::Canvas,
    canvas::Style,
    color::Color,
    color::ColorMode,
    filter::Filter,
    frame::FrameRate,
    frame::Input,
    frame::InputEvent,
    frame::MouseButton,
    frame::Sketch,
    geometry::CornerRadii,
    geometry::EllipseMode,
    geometry::ImageMode,
    geometry::RectMode,
    image::Image,
    image::ImageError,
    image::ImageResult,
    math::AngleMode,
    random::PerlinNoise,
    random::Random,
    recording::Command,
    recording::RecordingBackend,
    rendering::Rasterizer,
    shape::EndMode,
    shape::ShapeError,
    shape::ShapeResult,
    shape::Topology,
    shape::Vertex,
    transform::Transform,
};
