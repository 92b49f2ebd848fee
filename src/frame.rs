//! Per-frame callback and input mirroring.
//!
//! The library owns no timer and no window: the host calls
//! [`Canvas::frame`] at the cadence given by [`Canvas::target_frame_rate`]
//! and forwards its input events to [`Canvas::handle_event`].

use crate::Backend;
use crate::Canvas;
use crate::Float;

use core::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    MouseMove { x: Float, y: Float },
    /// host key code
    KeyDown(u32),
    KeyUp(u32),
    Focus,
    Blur,
}

/// Last known input state, updated by [`Canvas::handle_event`].
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Input {
    pub mouse_x: Float,
    pub mouse_y: Float,
    /// position before the last move
    pub pmouse_x: Float,
    pub pmouse_y: Float,
    pub mouse_is_pressed: bool,
    pub mouse_button: MouseButton,
    pub key_is_pressed: bool,
    pub key_code: Option<u32>,
    pub focused: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameRate {
    /// follow the host's display refresh
    Native,
    Fps(u32),
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate::Fps(60)
    }
}

impl FrameRate {
    /// Time between two frames, `None` when the host decides.
    pub fn interval(self) -> Option<Duration> {
        match self {
            FrameRate::Native => None,
            FrameRate::Fps(0) => None,
            FrameRate::Fps(n) => Some(Duration::from_secs(1) / n),
        }
    }
}

/// Frame counter plus frames counted over each elapsed second.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FrameClock {
    frame_count: u64,
    fps: u32,
    counter: u32,
    last_check: Option<u64>,
}

impl FrameClock {
    /// Counts one frame finished at `now_ms` (host milliseconds).
    pub fn tick(&mut self, now_ms: u64) {
        self.frame_count += 1;
        self.counter += 1;

        let last = *self.last_check.get_or_insert(now_ms);
        if now_ms.saturating_sub(last) >= 1000 {
            self.last_check = Some(now_ms);
            self.fps = self.counter;
            self.counter = 0;
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames counted over the last full second.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// User code driven by a canvas. Only `draw` is required.
pub trait Sketch<B: Backend> {
    fn draw(&mut self, canvas: &mut Canvas<B>);

    fn mouse_pressed(&mut self, _canvas: &mut Canvas<B>) {}
    fn mouse_released(&mut self, _canvas: &mut Canvas<B>) {}
    fn mouse_moved(&mut self, _canvas: &mut Canvas<B>) {}
    /// called after `mouse_moved` while a button is held
    fn mouse_dragged(&mut self, _canvas: &mut Canvas<B>) {}
    fn key_pressed(&mut self, _canvas: &mut Canvas<B>, _key: u32) {}
    fn key_released(&mut self, _canvas: &mut Canvas<B>, _key: u32) {}
}

impl<B: Backend> Canvas<B> {
    /// Runs one `draw` and counts the frame.
    pub fn frame<S: Sketch<B>>(&mut self, sketch: &mut S, now_ms: u64) {
        sketch.draw(self);
        self.clock.tick(now_ms);
    }

    pub fn handle_event<S: Sketch<B>>(&mut self, sketch: &mut S, event: InputEvent) {
        match event {
            InputEvent::MouseDown(button) => {
                self.input.mouse_button = button;
                self.input.mouse_is_pressed = true;
                sketch.mouse_pressed(self);
            }
            InputEvent::MouseUp(_) => {
                self.input.mouse_is_pressed = false;
                sketch.mouse_released(self);
            }
            InputEvent::MouseMove { x, y } => {
                self.input.pmouse_x = self.input.mouse_x;
                self.input.pmouse_y = self.input.mouse_y;
                self.input.mouse_x = x;
                self.input.mouse_y = y;
                sketch.mouse_moved(self);
                if self.input.mouse_is_pressed {
                    sketch.mouse_dragged(self);
                }
            }
            InputEvent::KeyDown(key) => {
                self.input.key_is_pressed = true;
                self.input.key_code = Some(key);
                sketch.key_pressed(self, key);
            }
            InputEvent::KeyUp(key) => {
                self.input.key_is_pressed = false;
                sketch.key_released(self, key);
            }
            InputEvent::Focus => self.input.focused = true,
            InputEvent::Blur => self.input.focused = false,
        }
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Measured frames per second.
    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }

    pub fn frame_rate(&mut self, rate: FrameRate) {
        log::debug!("target frame rate {:?}", rate);
        self.frame_rate = rate;
    }

    pub fn target_frame_rate(&self) -> FrameRate {
        self.frame_rate
    }
}
