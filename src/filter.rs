use crate::Color;
use crate::Float;
use crate::Image;
use crate::math::constrain;

use rgb::RGBA8;

use alloc::{vec, vec::Vec};

#[allow(unused_imports)]
use vek::num_traits::real::Real;

/// Image filters.
///
/// Amounts in `0..=1` blend between the source and the fully filtered
/// pixel where that makes sense; the other parameters are documented
/// per variant. Alpha is left untouched except by `Opacity`, `Blur`
/// and `MedianCut`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Filter {
    /// pixels darker than the level (in `0..=1`) turn black, the others white
    Threshold(Float),
    Grayscale(Float),
    /// sets alpha to `amount * 255`
    Opacity(Float),
    Invert(Float),
    /// number of levels per channel, clamped to `2..=255`
    Posterize(Float),
    /// channel multiplier
    Brightness(Float),
    /// degrees
    HueRotate(Float),
    /// saturation multiplier
    Saturate(Float),
    /// contrast multiplier around mid gray
    Contrast(Float),
    Sepia(Float),
    /// gaussian blur of standard deviation `sigma`, at least 0.5
    Blur(Float),
    /// reduces the image to at most this many colors, opaque
    MedianCut(usize),
}

impl Filter {
    pub const THRESHOLD: Filter = Filter::Threshold(0.5);
    pub const GRAYSCALE: Filter = Filter::Grayscale(1.0);
    pub const OPACITY: Filter = Filter::Opacity(1.0);
    pub const INVERT: Filter = Filter::Invert(1.0);
    pub const BRIGHTNESS: Filter = Filter::Brightness(1.0);
    pub const HUE_ROTATE: Filter = Filter::HueRotate(0.0);
    pub const SATURATE: Filter = Filter::Saturate(1.0);
    pub const CONTRAST: Filter = Filter::Contrast(1.0);
    pub const SEPIA: Filter = Filter::Sepia(1.0);
    pub const BLUR: Filter = Filter::Blur(1.0);
    pub const MEDIAN_CUT: Filter = Filter::MedianCut(128);

    pub fn as_text(&self) -> &'static str {
        match self {
            Filter::Threshold(_) => "Threshold",
            Filter::Grayscale(_) => "Grayscale",
            Filter::Opacity(_) => "Opacity",
            Filter::Invert(_) => "Invert",
            Filter::Posterize(_) => "Posterize",
            Filter::Brightness(_) => "Brightness",
            Filter::HueRotate(_) => "HueRotate",
            Filter::Saturate(_) => "Saturate",
            Filter::Contrast(_) => "Contrast",
            Filter::Sepia(_) => "Sepia",
            Filter::Blur(_) => "Blur",
            Filter::MedianCut(_) => "MedianCut",
        }
    }

    pub fn apply(&self, image: &mut Image) {
        log::trace!("{} filter over {}x{}", self.as_text(), image.width(), image.height());
        match *self {
            Filter::Blur(sigma) => blur(image, sigma),
            Filter::MedianCut(colors) => median_cut(image, colors),
            _ => {
                for pixel in image.pixels_mut() {
                    *pixel = self.apply_pixel(*pixel);
                }
            }
        }
    }

    /// Filters a lone pixel; `Blur` and `MedianCut` need the whole image
    /// and leave it as is.
    pub fn apply_pixel(&self, px: RGBA8) -> RGBA8 {
        let [r, g, b] = [px.r as Float, px.g as Float, px.b as Float];
        let rgb = |r: Float, g: Float, b: Float| RGBA8::new(clamp_u8(r), clamp_u8(g), clamp_u8(b), px.a);
        let mix = |amount: Float, [fr, fg, fb]: [Float; 3]| {
            let inv = 1.0 - amount;
            rgb(r * inv + fr * amount, g * inv + fg * amount, b * inv + fb * amount)
        };

        match *self {
            Filter::Threshold(level) => match (r + g + b) / 3.0 < level * 255.0 {
                true => rgb(0.0, 0.0, 0.0),
                false => rgb(255.0, 255.0, 255.0),
            },
            Filter::Grayscale(amount) => {
                let gray = (r + g + b) / 3.0;
                mix(constrain(amount, 0.0, 1.0), [gray; 3])
            }
            Filter::Opacity(amount) => RGBA8::new(px.r, px.g, px.b, clamp_u8(amount * 255.0)),
            Filter::Invert(amount) => mix(constrain(amount, 0.0, 1.0), [255.0 - r, 255.0 - g, 255.0 - b]),
            Filter::Posterize(levels) => {
                let levels = constrain(levels, 2.0, 255.0) as u32;
                let level = |c: u8| (((c as u32 * levels) >> 8) * 255) as Float / levels as Float;
                rgb(level(px.r), level(px.g), level(px.b))
            }
            Filter::Brightness(factor) => rgb(r * factor, g * factor, b * factor),
            Filter::HueRotate(degrees) => {
                let [h, s, v] = Color::from(px).to_hsb();
                let c = Color::hsb((h + degrees) % 360.0, s, v, px.a);
                RGBA8::new(c.r, c.g, c.b, px.a)
            }
            Filter::Saturate(factor) => {
                let [h, s, v] = Color::from(px).to_hsb();
                let c = Color::hsb(h, s * factor, v, px.a);
                RGBA8::new(c.r, c.g, c.b, px.a)
            }
            Filter::Contrast(factor) => {
                let stretch = |c: Float| factor * (c - 128.0) + 128.0;
                rgb(stretch(r), stretch(g), stretch(b))
            }
            Filter::Sepia(amount) => mix(
                constrain(amount, 0.0, 1.0),
                [
                    r * 0.393 + g * 0.769 + b * 0.189,
                    r * 0.349 + g * 0.686 + b * 0.168,
                    r * 0.272 + g * 0.534 + b * 0.131,
                ],
            ),
            Filter::Blur(_) | Filter::MedianCut(_) => px,
        }
    }
}

type Channels = [Float; 4];

/// Recursive gaussian coefficients (Young & van Vliet).
struct Gaussian {
    a0: Float,
    a1: Float,
    a2: Float,
    a3: Float,
    b1: Float,
    b2: Float,
    left_edge: Float,
    right_edge: Float,
}

impl Gaussian {
    fn new(sigma: Float) -> Self {
        let sigma = sigma.max(0.5);
        let a = (0.726 as Float * 0.726).exp() / sigma;
        let g1 = (-a).exp();
        let g2 = (-2.0 * a).exp();
        let k = (1.0 - g1) * (1.0 - g1) / (1.0 + 2.0 * a * g1 - g2);

        let (a0, a1, a2, a3) = (k, k * (a - 1.0) * g1, k * (a + 1.0) * g1, -k * g2);
        let (b1, b2) = (2.0 * g1, -g2);
        Self {
            a0,
            a1,
            a2,
            a3,
            b1,
            b2,
            left_edge: (a0 + a1) / (1.0 - b1 - b2),
            right_edge: (a2 + a3) / (1.0 - b1 - b2),
        }
    }

    fn step(&self, x0: Channels, x1: Channels, y1: Channels, y2: Channels, c0: Float, c1: Float) -> Channels {
        core::array::from_fn(|c| x0[c] * c0 + x1[c] * c1 + y1[c] * self.b1 + y2[c] * self.b2)
    }

    /// Blurs each of the `height` rows of `src` and writes them
    /// transposed into `out`, so two calls blur both axes.
    fn convolve(&self, src: &[Channels], out: &mut [Channels], line: &mut [Channels], width: usize, height: usize) {
        for i in 0..height {
            let row = &src[i * width..][..width];

            let mut prev_src = row[0];
            let mut prev_out = prev_src.map(|c| c * self.left_edge);
            let mut prev_prev_out = prev_out;
            for (j, curr) in row.iter().enumerate() {
                let y = self.step(*curr, prev_src, prev_out, prev_prev_out, self.a0, self.a1);
                prev_prev_out = prev_out;
                prev_out = y;
                prev_src = *curr;
                line[j] = y;
            }

            let last = row[width - 1];
            let (mut curr_src, mut prev_src) = (last, last);
            let mut prev_out = last.map(|c| c * self.right_edge);
            let mut prev_prev_out = prev_out;
            for j in (0..width).rev() {
                let y = self.step(curr_src, prev_src, prev_out, prev_prev_out, self.a2, self.a3);
                prev_prev_out = prev_out;
                prev_out = y;
                prev_src = curr_src;
                curr_src = row[j];
                out[j * height + i] = core::array::from_fn(|c| line[j][c] + y[c]);
            }
        }
    }
}

fn blur(image: &mut Image, sigma: Float) {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return;
    }

    let gaussian = Gaussian::new(sigma);
    let mut src: Vec<Channels> = image
        .pixels()
        .iter()
        .map(|p| [p.r as Float, p.g as Float, p.b as Float, p.a as Float])
        .collect();
    let mut transposed = vec![[0.0; 4]; w * h];
    let mut line = vec![[0.0; 4]; w.max(h)];

    gaussian.convolve(&src, &mut transposed, &mut line, w, h);
    gaussian.convolve(&transposed, &mut src, &mut line, h, w);

    for (pixel, [r, g, b, a]) in image.pixels_mut().iter_mut().zip(src) {
        *pixel = RGBA8::new(clamp_u8(r), clamp_u8(g), clamp_u8(b), clamp_u8(a));
    }
}

fn channel(px: &RGBA8, c: usize) -> u8 {
    match c {
        0 => px.r,
        1 => px.g,
        _ => px.b,
    }
}

/// Widest channel of a bucket and its range.
fn widest_channel(bucket: &[RGBA8]) -> (usize, u8) {
    (0..3)
        .map(|c| {
            let (min, max) = bucket
                .iter()
                .map(|px| channel(px, c))
                .fold((u8::MAX, 0), |(min, max), v| (min.min(v), max.max(v)));
            (c, max.saturating_sub(min))
        })
        .fold((0, 0), |best, cur| match cur.1 > best.1 {
            true => cur,
            false => best,
        })
}

/// Splits the widest bucket at its median until there are `colors`
/// buckets, then maps each pixel to the nearest bucket median.
fn median_cut(image: &mut Image, colors: usize) {
    let colors = colors.max(1);
    let mut buckets: Vec<Vec<RGBA8>> = vec![image.pixels().to_vec()];

    while buckets.len() < colors {
        let widest = buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() > 1)
            .map(|(i, b)| (i, widest_channel(b)))
            .filter(|(_, (_, range))| *range > 0)
            .max_by_key(|(_, (_, range))| *range);

        let Some((i, (c, _))) = widest else {
            break;
        };
        let bucket = &mut buckets[i];
        bucket.sort_unstable_by_key(|px| channel(px, c));
        let upper = bucket.split_off(bucket.len() / 2);
        buckets.push(upper);
    }

    let palette: Vec<RGBA8> = buckets
        .iter()
        .filter_map(|b| b.get(b.len() / 2))
        .map(|px| RGBA8::new(px.r, px.g, px.b, 255))
        .collect();
    log::debug!("median cut to {} colors", palette.len());

    let distance = |a: &RGBA8, b: &RGBA8| {
        let d = |x: u8, y: u8| (x as i32 - y as i32).pow(2);
        d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
    };
    for pixel in image.pixels_mut() {
        if let Some(nearest) = palette.iter().min_by_key(|c| distance(&*pixel, *c)) {
            *pixel = *nearest;
        }
    }
}

/// Rounds and saturates a channel value.
pub fn clamp_u8(v: Float) -> u8 {
    constrain(v.round(), 0.0, 255.0) as u8
}
