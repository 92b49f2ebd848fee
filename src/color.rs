use crate::Float;
use crate::math::lerp;

use rgb::RGBA8;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use core::fmt;
use alloc::{format, string::String};

/// How color components given to `Canvas::color` are read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// red, green, blue in 0..=255
    #[default]
    Rgb,
    /// hue in degrees, saturation and brightness in percent
    Hsb,
}

/// 8-bit RGBA color.
///
/// `Display` renders it as a CSS color string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v, 255)
    }

    pub const fn gray_alpha(v: u8, a: u8) -> Self {
        Self::new(v, v, v, a)
    }

    /// `h` in degrees, `s` and `b` in percent.
    pub fn hsb(h: Float, s: Float, b: Float, a: u8) -> Self {
        let [r, g, b] = hsb_to_rgb(h, s, b);
        Self::new(r, g, b, a)
    }

    /// Builds a color from up to four components read in `mode`.
    ///
    /// - one component: gray
    /// - two: gray and alpha
    /// - three: color, opaque
    /// - four: color and alpha
    ///
    /// Hsb mode always reads the first three components as hue,
    /// saturation and brightness.
    pub fn from_components(mode: ColorMode, components: &[Float]) -> Self {
        let channel = |v: Float| v as u8;
        match mode {
            ColorMode::Rgb => match *components {
                [] => Color::BLACK,
                [v] => Color::gray(channel(v)),
                [v, a] => Color::gray_alpha(channel(v), channel(a)),
                [r, g, b] => Color::rgb(channel(r), channel(g), channel(b)),
                [r, g, b, a, ..] => Color::new(channel(r), channel(g), channel(b), channel(a)),
            },
            ColorMode::Hsb => {
                let get = |i: usize| components.get(i).copied().unwrap_or(0.0);
                let alpha = components.get(3).map(|a| channel(*a)).unwrap_or(255);
                Color::hsb(get(0), get(1), get(2), alpha)
            }
        }
    }

    /// Unpacks `0xAABBGGRR`; an alpha byte of 0 means opaque.
    pub fn from_int(num: u32) -> Self {
        let a = (num >> 24) as u8;
        Self::new(
            num as u8,
            (num >> 8) as u8,
            (num >> 16) as u8,
            if a == 0 { 255 } else { a },
        )
    }

    /// Packs into `0xAABBGGRR`; opaque colors store 0 as alpha.
    pub fn to_int(&self) -> u32 {
        let a = if self.a < 255 { self.a as u32 } else { 0 };
        a << 24 | (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let nibble = |c: u8| (c as char).to_digit(16).map(|d| d as u8);
        let byte = |i: usize| -> Option<u8> {
            let bytes = hex.as_bytes();
            Some(nibble(*bytes.get(i)?)? << 4 | nibble(*bytes.get(i + 1)?)?)
        };

        match hex.len() {
            3 => {
                let bytes = hex.as_bytes();
                let mut c = [0; 3];
                for (i, b) in bytes.iter().enumerate() {
                    let n = nibble(*b)?;
                    c[i] = n << 4 | n;
                }
                Some(Self::rgb(c[0], c[1], c[2]))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// `#rrggbb`, with a trailing alpha byte when not opaque.
    pub fn to_hex(&self) -> String {
        match self.a {
            255 => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
            a => format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a),
        }
    }

    /// `[hue, saturation, brightness]`, see [`rgb_to_hsb`].
    pub fn to_hsb(&self) -> [Float; 3] {
        rgb_to_hsb(self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            255 => write!(f, "rgb({},{},{})", self.r, self.g, self.b),
            a => write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, (a as Float) / 255.0),
        }
    }
}

impl From<RGBA8> for Color {
    fn from(c: RGBA8) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Color> for RGBA8 {
    fn from(c: Color) -> Self {
        RGBA8::new(c.r, c.g, c.b, c.a)
    }
}

/// Component-wise interpolation, truncating like the channel setters do.
pub fn lerp_color(c1: Color, c2: Color, amount: Float) -> Color {
    let mix = |a: u8, b: u8| lerp(a as Float, b as Float, amount) as u8;
    Color::new(mix(c1.r, c2.r), mix(c1.g, c2.g), mix(c1.b, c2.b), mix(c1.a, c2.a))
}

/// Returns `[hue in degrees, saturation %, brightness %]`.
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> [Float; 3] {
    let r = r as Float / 255.0;
    let g = g as Float / 255.0;
    let b = b as Float / 255.0;
    let v = r.max(g).max(b);
    let n = v - r.min(g).min(b);

    let h = if n == 0.0 {
        0.0
    } else if v == r {
        (g - b) / n
    } else if v == g {
        2.0 + (b - r) / n
    } else {
        4.0 + (r - g) / n
    };

    let h = 60.0 * if h < 0.0 { h + 6.0 } else { h };
    let s = if v == 0.0 { 0.0 } else { (n / v) * 100.0 };
    [h, s, v * 100.0]
}

/// `h` in degrees, `s` and `b` in percent; channels are truncated.
pub fn hsb_to_rgb(h: Float, s: Float, b: Float) -> [u8; 3] {
    let s = s / 100.0;
    let b = b / 100.0;
    let f = |n: Float| {
        let k = (n + h / 60.0) % 6.0;
        let v = b * (1.0 - s * k.min(4.0 - k).min(1.0).max(0.0));
        (v * 255.0) as u8
    };
    [f(5.0), f(3.0), f(1.0)]
}
