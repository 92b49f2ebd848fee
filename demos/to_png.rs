use std::env::args;
use std::fs::write;
use png::Encoder;
use png::ColorType::Rgba;
use png::BitDepth::Eight;
use drawlite::*;
use std::time::Instant;
use rgb::ComponentBytes;

struct Flower {
	petals: usize,
}

impl<B: Backend> Sketch<B> for Flower {
	fn draw(&mut self, c: &mut Canvas<B>) {
		let (w, h) = (c.width() as f32, c.height() as f32);
		c.background(Color::from_hex("#203040").unwrap());

		c.no_stroke();
		c.fill(Color::new(255, 200, 80, 120));
		c.push_matrix();
		c.translate(w / 2.0, h / 2.0);
		for _ in 0..self.petals {
			c.rotate(360.0 / self.petals as f32);
			c.ellipse(w / 5.0, 0.0, w / 3.0, h / 10.0);
		}
		c.pop_matrix();

		c.stroke(Color::WHITE);
		c.stroke_weight(3.0);
		c.stroke_cap(LineCap::Round);
		c.no_fill();
		c.begin_shape(None);
		for i in 0..8 {
			let x = i as f32 * w / 7.0;
			let y = h * 0.85 + (i % 2) as f32 * h * 0.08;
			c.spline_vertex(x, y);
		}
		c.end_shape(None).unwrap();

		c.fill(Color::rgb(240, 90, 90));
		c.stroke(Color::BLACK);
		c.stroke_weight(2.0);
		c.rounded_rect(10.0, 10.0, w / 4.0, h / 8.0, [12.0, 0.0]);
		c.circle(w / 2.0, h / 2.0, w / 8.0);
	}
}

fn main() {
	let png_name = format!("{}.png", args().last().unwrap());
	let (w, h) = (300, 300);

	let mut canvas = Canvas::new(Rasterizer::<6, 36>::default(), w, h);
	let mut sketch = Flower { petals: 12 };

	let runs = 10;
	let now = Instant::now();
	for i in 0..runs {
		canvas.frame(&mut sketch, i * 16);
	}
	println!("rendered {} times in {}ms.", runs, now.elapsed().as_millis());

	let image = canvas.snip().unwrap();
	let mut png_buf = Vec::new();
	{
		let mut encoder = Encoder::new(&mut png_buf, w as u32, h as u32);
		encoder.set_color(Rgba);
		encoder.set_depth(Eight);
		let mut writer = encoder.write_header().unwrap();
		writer.write_image_data(image.pixels().as_bytes()).unwrap();
	}
	write(&png_name, &png_buf).unwrap();
}
