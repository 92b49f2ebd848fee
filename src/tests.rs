use crate::*;
use crate::Command::*;

use alloc::vec::Vec;

fn recording() -> Canvas<RecordingBackend> {
    let mut canvas = Canvas::new(RecordingBackend::with_pixels(100, 100), 100, 100);
    canvas.backend_mut().clear_commands();
    canvas
}

fn commands(canvas: &mut Canvas<RecordingBackend>) -> Vec<Command> {
    canvas.backend_mut().take_commands()
}

/// Path calls between a `BeginPath` and the following paint, per path.
fn paths(commands: &[Command]) -> Vec<Vec<Command>> {
    let mut paths = Vec::new();
    let mut current: Option<Vec<Command>> = None;
    for c in commands {
        match c {
            BeginPath => current = Some(Vec::new()),
            FillPath | StrokePath => {
                if let Some(path) = current.take() {
                    paths.push(path);
                }
            }
            MoveTo(_) | LineTo(_) | QuadTo(..) | CubicTo(..) | ClosePath | CircleArc { .. }
            | EllipseArc { .. } | RoundedRect { .. } => {
                if let Some(path) = current.as_mut() {
                    path.push(c.clone());
                }
            }
            _ => (),
        }
    }
    paths
}

fn pt(x: Float, y: Float) -> Point {
    Point::new(x, y)
}

#[test]
fn line_path_keeps_insertion_order() {
    let mut c = recording();
    let input = [pt(0.0, 0.0), pt(30.0, 5.0), pt(12.0, 40.0), pt(-3.0, 7.5)];
    c.begin_shape(None);
    for p in input {
        c.vertex(p.x, p.y);
    }
    c.end_shape(None).unwrap();

    let cmds = commands(&mut c);
    let visited: Vec<Point> = cmds
        .iter()
        .filter_map(|c| match c {
            MoveTo(p) | LineTo(p) => Some(*p),
            _ => None,
        })
        .collect();

    // default style fills then strokes the same path
    assert_eq!(visited.len(), input.len());
    assert_eq!(visited, input);
    assert!(cmds.contains(&FillPath));
    assert!(cmds.contains(&StrokePath));
    assert!(!cmds.contains(&ClosePath));
}

#[test]
fn mixed_path_segments() {
    let mut c = recording();
    c.no_stroke();
    c.begin_shape(None);
    c.vertex(0.0, 0.0);
    c.curve_vertex(5.0, 10.0, 10.0, 0.0);
    c.bezier_vertex(12.0, 1.0, 14.0, 2.0, 16.0, 3.0);
    c.end_shape(Some(EndMode::Close)).unwrap();

    assert_eq!(
        paths(&commands(&mut c)),
        [[
            MoveTo(pt(0.0, 0.0)),
            QuadTo(pt(5.0, 10.0), pt(10.0, 0.0)),
            CubicTo(pt(12.0, 1.0), pt(14.0, 2.0), pt(16.0, 3.0)),
            ClosePath,
        ]]
    );
}

#[test]
fn closed_fill_only_scenario() {
    let mut c = recording();
    c.fill(Color::rgb(255, 0, 0));
    c.no_stroke();
    c.begin_shape(None);
    c.vertex(0.0, 0.0);
    c.vertex(10.0, 0.0);
    c.vertex(10.0, 10.0);
    c.end_shape(Some(EndMode::Close)).unwrap();

    assert_eq!(
        commands(&mut c),
        [
            BeginPath,
            MoveTo(pt(0.0, 0.0)),
            LineTo(pt(10.0, 0.0)),
            LineTo(pt(10.0, 10.0)),
            ClosePath,
            SetFillColor(Color::rgb(255, 0, 0)),
            FillPath,
        ]
    );
}

#[test]
fn empty_shape_is_an_error() {
    let mut c = recording();
    c.begin_shape(None);
    assert_eq!(c.end_shape(None), Err(ShapeError::EmptyShape));
    c.begin_shape(Some(Topology::Triangles));
    assert_eq!(c.end_shape(None), Err(ShapeError::EmptyShape));
    assert!(commands(&mut c).is_empty());
}

#[test]
fn vertices_survive_until_next_shape() {
    let mut c = recording();
    c.begin_shape(Some(Topology::Points));
    c.vertex(1.0, 2.0);
    c.end_shape(None).unwrap();
    assert_eq!(c.shape_vertices(), [Vertex::Line(pt(1.0, 2.0))]);

    c.begin_shape(None);
    assert!(c.shape_vertices().is_empty());
}

#[test]
fn spline_segment_hits_inner_points() {
    let points = [pt(0.0, 0.0), pt(10.0, 20.0), pt(40.0, 25.0), pt(50.0, 0.0)];
    for tightness in [-1.0, 0.0, 0.5, 1.0, 3.0] {
        let mut c = recording();
        c.spline_tightness(tightness);
        c.begin_shape(None);
        for p in points {
            c.spline_vertex(p.x, p.y);
        }
        c.end_shape(None).unwrap();

        let path = &paths(&commands(&mut c))[0];
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], MoveTo(points[1]));
        match path[1] {
            CubicTo(_, _, end) => assert_eq!(end, points[2]),
            ref other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn spline_controls_follow_tightness() {
    let mut c = recording();
    c.spline(0.0, 0.0, 6.0, 0.0, 12.0, 6.0, 18.0, 6.0);
    let path = &paths(&commands(&mut c))[0];
    // s = 1: ctrl0 = p1 + (p2 - p0) / 6, ctrl1 = p2 + (p1 - p3) / 6
    assert_eq!(path[1], CubicTo(pt(8.0, 1.0), pt(10.0, 5.0), pt(12.0, 6.0)));

    c.spline_tightness(1.0);
    c.spline(0.0, 0.0, 6.0, 0.0, 12.0, 6.0, 18.0, 6.0);
    let path = &paths(&commands(&mut c))[0];
    assert_eq!(path[1], CubicTo(pt(6.0, 0.0), pt(12.0, 6.0), pt(12.0, 6.0)));
}

#[test]
fn long_spline_emits_one_curve_per_span() {
    let mut c = recording();
    c.begin_shape(None);
    c.vertex(0.0, 0.0);
    for i in 1..6 {
        c.spline_vertex(i as Float * 10.0, 0.0);
    }
    c.end_shape(None).unwrap();

    let path = &paths(&commands(&mut c))[0];
    // six nodes, spans 1→2, 2→3, 3→4
    assert_eq!(path[0], MoveTo(pt(10.0, 0.0)));
    assert_eq!(path.iter().filter(|c| matches!(c, CubicTo(..))).count(), 3);
}

#[test]
fn short_spline_draws_no_curve() {
    let mut c = recording();
    c.begin_shape(None);
    c.spline_vertex(0.0, 0.0);
    c.spline_vertex(5.0, 5.0);
    c.spline_vertex(9.0, 0.0);
    c.end_shape(None).unwrap();

    let path = &paths(&commands(&mut c))[0];
    assert_eq!(path, &[MoveTo(pt(0.0, 0.0))]);
}

fn polygons(commands: &[Command]) -> Vec<Vec<Point>> {
    let mut polygons = Vec::new();
    for path in paths(commands) {
        let points: Vec<Point> = path
            .iter()
            .filter_map(|c| match c {
                MoveTo(p) | LineTo(p) => Some(*p),
                _ => None,
            })
            .collect();
        if path.last() == Some(&ClosePath) {
            polygons.push(points);
        }
    }
    polygons
}

#[test]
fn spline_keeps_open_shape() {
    let mut c = recording();
    c.begin_shape(None);
    c.vertex(1.0, 1.0);
    c.spline(0.0, 0.0, 6.0, 0.0, 12.0, 6.0, 18.0, 6.0);
    c.vertex(2.0, 2.0);
    assert_eq!(c.shape_vertices().len(), 2);
    c.end_shape(None).unwrap();

    let paths = paths(&commands(&mut c));
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[1], [MoveTo(pt(1.0, 1.0)), LineTo(pt(2.0, 2.0))]);
}

fn painted(path: &[Command]) -> Vec<Command> {
    let mut all = Vec::from([BeginPath]);
    all.extend_from_slice(path);
    all.extend([
        SetFillColor(Color::WHITE),
        FillPath,
        SetStrokeColor(Color::BLACK),
        StrokePath,
    ]);
    all
}

#[test]
fn triangle_and_quad_close_themselves() {
    let mut c = recording();
    c.triangle(0.0, 0.0, 10.0, 0.0, 5.0, 8.0);
    assert_eq!(
        commands(&mut c),
        painted(&[
            MoveTo(pt(0.0, 0.0)),
            LineTo(pt(10.0, 0.0)),
            LineTo(pt(5.0, 8.0)),
            ClosePath,
        ])
    );

    c.quad(0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0);
    assert_eq!(
        commands(&mut c),
        painted(&[
            MoveTo(pt(0.0, 0.0)),
            LineTo(pt(10.0, 0.0)),
            LineTo(pt(10.0, 10.0)),
            LineTo(pt(0.0, 10.0)),
            ClosePath,
        ])
    );

    c.no_fill();
    c.triangle(0.0, 0.0, 10.0, 0.0, 5.0, 8.0);
    let cmds = commands(&mut c);
    assert!(!cmds.contains(&FillPath));
    assert_eq!(cmds.last(), Some(&StrokePath));
}

#[test]
fn bezier_and_circle_are_single_segments() {
    let mut c = recording();
    c.bezier(0.0, 0.0, 5.0, 10.0, 15.0, 10.0, 20.0, 0.0);
    assert_eq!(
        commands(&mut c),
        painted(&[MoveTo(pt(0.0, 0.0)), CubicTo(pt(5.0, 10.0), pt(15.0, 10.0), pt(20.0, 0.0))])
    );

    c.circle(30.0, 40.0, 16.0);
    assert_eq!(
        commands(&mut c),
        painted(&[CircleArc {
            center: pt(30.0, 40.0),
            radius: 8.0,
            start: 0.0,
            end: core::f32::consts::TAU,
        }])
    );
}

#[test]
fn lines_need_a_stroke() {
    let mut c = recording();
    c.line(1.0, 2.0, 3.0, 4.0);
    assert_eq!(
        commands(&mut c),
        [
            SetStrokeColor(Color::BLACK),
            BeginPath,
            MoveTo(pt(1.0, 2.0)),
            LineTo(pt(3.0, 4.0)),
            StrokePath,
        ]
    );

    c.no_stroke();
    c.line(1.0, 2.0, 3.0, 4.0);
    assert!(commands(&mut c).is_empty());
}

#[test]
fn quad_strip_swaps_window_tail() {
    let [a, b, cc, d, e, f] = [
        pt(0.0, 0.0),
        pt(0.0, 10.0),
        pt(10.0, 0.0),
        pt(10.0, 10.0),
        pt(20.0, 0.0),
        pt(20.0, 10.0),
    ];
    let mut c = recording();
    c.no_stroke();
    c.begin_shape(Some(Topology::QuadStrip));
    for p in [a, b, cc, d, e, f] {
        c.vertex(p.x, p.y);
    }
    c.end_shape(None).unwrap();

    assert_eq!(polygons(&commands(&mut c)), [[a, b, d, cc], [cc, d, f, e]]);
}

#[test]
fn triangle_fan_and_strip() {
    let nodes: Vec<Point> = (0..5).map(|i| pt(i as Float, (i * i) as Float)).collect();
    let n = |i: usize| nodes[i];

    let mut c = recording();
    c.no_stroke();
    c.begin_shape(Some(Topology::TriangleFan));
    for p in &nodes {
        c.vertex(p.x, p.y);
    }
    c.end_shape(None).unwrap();
    assert_eq!(
        polygons(&commands(&mut c)),
        [[n(0), n(1), n(2)], [n(0), n(2), n(3)], [n(0), n(3), n(4)]]
    );

    c.begin_shape(Some(Topology::TriangleStrip));
    for p in &nodes {
        c.vertex(p.x, p.y);
    }
    c.end_shape(None).unwrap();
    assert_eq!(
        polygons(&commands(&mut c)),
        [[n(0), n(1), n(2)], [n(1), n(2), n(3)], [n(2), n(3), n(4)]]
    );
}

#[test]
fn list_topologies_drop_remainders() {
    let mut c = recording();
    c.no_stroke();
    c.begin_shape(Some(Topology::Triangles));
    for i in 0..8 {
        c.vertex(i as Float, 0.0);
    }
    c.end_shape(None).unwrap();
    assert_eq!(commands(&mut c).iter().filter(|c| **c == FillPath).count(), 2);

    c.begin_shape(Some(Topology::Quads));
    for i in 0..7 {
        c.vertex(i as Float, 0.0);
    }
    c.end_shape(None).unwrap();
    assert_eq!(commands(&mut c).iter().filter(|c| **c == FillPath).count(), 1);

    c.stroke(Color::BLACK);
    c.begin_shape(Some(Topology::Lines));
    for i in 0..5 {
        c.vertex(i as Float, 0.0);
    }
    c.end_shape(None).unwrap();
    let cmds = commands(&mut c);
    assert_eq!(cmds.iter().filter(|c| **c == StrokePath).count(), 2);
    assert!(!cmds.contains(&FillPath));
}

#[test]
fn points_use_stroke_color() {
    let mut c = recording();
    c.fill(Color::rgb(1, 2, 3));
    c.stroke(Color::rgb(9, 9, 9));
    c.stroke_weight(6.0);
    c.backend_mut().clear_commands();

    c.begin_shape(Some(Topology::Points));
    c.vertex(5.0, 5.0);
    c.end_shape(None).unwrap();
    assert_eq!(
        commands(&mut c),
        [
            SetFillColor(Color::rgb(9, 9, 9)),
            BeginPath,
            CircleArc {
                center: pt(5.0, 5.0),
                radius: 3.0,
                start: 0.0,
                end: core::f32::consts::TAU,
            },
            FillPath,
        ]
    );

    c.no_stroke();
    c.point(1.0, 1.0);
    assert!(commands(&mut c).is_empty());
}

#[test]
fn rounded_rect_single_call() {
    let mut c = recording();
    c.rounded_rect(0.0, 0.0, 100.0, 50.0, 10.0);

    let cmds = commands(&mut c);
    let rounded: Vec<&Command> = cmds.iter().filter(|c| matches!(c, RoundedRect { .. })).collect();
    assert_eq!(
        rounded,
        [&RoundedRect {
            origin: pt(0.0, 0.0),
            size: pt(100.0, 50.0),
            radii: CornerRadii::new(10.0, 10.0, 10.0, 10.0),
        }]
    );
    assert!(cmds.contains(&FillPath));
    assert!(cmds.contains(&StrokePath));

    c.rounded_rect(0.0, 0.0, 100.0, 50.0, [5.0, 5.0, 5.0, 5.0]);
    let four = commands(&mut c);
    c.rounded_rect(0.0, 0.0, 100.0, 50.0, 5.0);
    assert_eq!(commands(&mut c), four);
}

#[test]
fn plain_rect_offsets_stroke() {
    let mut c = recording();
    c.rect_mode(RectMode::Center);
    c.rect(50.0, 50.0, 20.0, 10.0);
    assert_eq!(
        commands(&mut c),
        [
            SetFillColor(Color::WHITE),
            FillRect(pt(40.0, 45.0), pt(20.0, 10.0)),
            SetStrokeColor(Color::BLACK),
            StrokeRect(pt(40.5, 45.5), pt(20.0, 10.0)),
        ]
    );
}

#[test]
fn ellipse_corner_matches_center() {
    let mut c = recording();
    c.ellipse_mode(EllipseMode::Corner);
    c.ellipse(10.0, 10.0, 20.0, 20.0);
    let corner = commands(&mut c);

    c.ellipse_mode(EllipseMode::Center);
    c.ellipse(20.0, 20.0, 20.0, 20.0);
    let center = commands(&mut c);

    assert_eq!(corner, center);
    assert!(corner.contains(&EllipseArc {
        center: pt(20.0, 20.0),
        radii: pt(10.0, 10.0),
        start: 0.0,
        end: core::f32::consts::TAU,
    }));
}

#[test]
fn arc_steps_per_angle_unit() {
    let mut c = recording();
    c.no_fill();
    c.arc(0.0, 0.0, 20.0, 20.0, 0.0, 90.0);
    let cmds = commands(&mut c);

    // move to the start, then one line per whole degree in [0, 90)
    assert_eq!(cmds.iter().filter(|c| matches!(c, LineTo(_))).count(), 90);
    assert_eq!(cmds[2], MoveTo(pt(10.0, 0.0)));
    assert_eq!(cmds.last(), Some(&StrokePath));

    c.arc_step(10.0);
    c.no_stroke();
    c.fill(Color::WHITE);
    c.arc(0.0, 0.0, 20.0, 20.0, 0.0, 90.0);
    let cmds = commands(&mut c);
    // sector starts at the center
    assert_eq!(cmds[2], MoveTo(pt(0.0, 0.0)));
    assert_eq!(cmds.iter().filter(|c| matches!(c, LineTo(_))).count(), 9);

    c.arc(0.0, 0.0, 20.0, 20.0, 90.0, 0.0);
    assert_eq!(commands(&mut c).iter().filter(|c| matches!(c, LineTo(_))).count(), 0);
}

#[test]
fn transforms_reach_the_backend() {
    let mut c = recording();
    c.push_matrix();
    c.translate(10.0, 20.0);
    c.scale(2.0, 2.0);
    assert_eq!(c.transform().apply(pt(1.0, 1.0)), pt(12.0, 22.0));
    c.pop_matrix();
    assert!(c.transform().is_identity());

    // unbalanced pop is ignored
    c.pop_matrix();
    assert!(c.transform().is_identity());

    c.rotate(90.0);
    let p = c.transform().apply(pt(1.0, 0.0));
    assert!(p.x.abs() < 1e-6 && (p.y - 1.0).abs() < 1e-6);
    c.reset_matrix();

    let sets = commands(&mut c).iter().filter(|c| matches!(c, SetTransform(_))).count();
    assert_eq!(sets, 5);
}

#[test]
fn random_and_noise_follow_seeds() {
    let mut c = recording();
    c.random_seed(42);
    let first: Vec<Float> = (0..4).map(|_| c.random(100.0)).collect();
    c.random_seed(42);
    let again: Vec<Float> = (0..4).map(|_| c.random(100.0)).collect();
    assert_eq!(first, again);
    assert!(first.iter().all(|v| (0.0..100.0).contains(v)));

    let v = c.random_range(-2.0, 2.0);
    assert!((-2.0..2.0).contains(&v));

    c.noise_detail(2, 0.5);
    c.noise_seed(9);
    let n = c.noise(0.3, 0.7, 0.0);
    c.noise_seed(9);
    assert_eq!(c.noise(0.3, 0.7, 0.0), n);
    // two octaves sum to at most 0.75
    assert!((0.0..0.75).contains(&n));
}

#[test]
fn blur_through_the_canvas() {
    let mut c = recording();
    c.load_pixels().unwrap();
    c.pixels_mut().set(50, 50, Color::WHITE).unwrap();
    c.update_pixels().unwrap();
    c.filter(Filter::Blur(1.5)).unwrap();

    let center = c.snip_pixel(50, 50).unwrap();
    let near = c.snip_pixel(51, 50).unwrap();
    assert!(center.a < 255 && center.a > 0);
    assert!(near.a > 0);
}

#[test]
fn pixels_round_trip() {
    let mut c = recording();
    c.load_pixels().unwrap();
    assert_eq!(c.pixels().width(), 100);

    c.pixels_mut().set(3, 4, Color::rgb(7, 8, 9)).unwrap();
    c.update_pixels().unwrap();
    assert_eq!(c.snip_pixel(3, 4), Ok(Color::rgb(7, 8, 9)));
    assert_eq!(c.snip_region(2, 3, 2, 2).unwrap().get(1, 1), Some(Color::rgb(7, 8, 9)));

    c.filter(Filter::INVERT).unwrap();
    assert_eq!(c.snip_pixel(3, 4), Ok(Color::rgb(248, 247, 246)));
    assert_eq!(c.snip_pixel(100, 0), Err(ImageError::OutOfBounds));

    let mut bare = Canvas::new(RecordingBackend::new(), 10, 10);
    assert_eq!(bare.snip(), Err(ImageError::Unsupported));
    assert_eq!(bare.update_pixels(), Err(ImageError::Unsupported));
}

#[test]
fn offscreen_graphics_have_their_own_state() {
    let mut c = recording();
    c.no_fill();
    c.rect_mode(RectMode::Center);
    let g = c.create_graphics(20, 10);
    assert_eq!((g.width(), g.height()), (20, 10));
    assert_eq!(*g.style(), Style::default());
}

#[test]
fn image_modes() {
    let img = Image::new(4, 2);
    let mut c = recording();
    c.image_mode(ImageMode::Center);
    c.image(&img, 10.0, 10.0);
    c.image_mode(ImageMode::Corners);
    c.image_sized(&img, 10.0, 10.0, 30.0, 20.0);

    assert_eq!(
        commands(&mut c),
        [
            DrawImage {
                width: 4,
                height: 2,
                origin: pt(8.0, 9.0),
                size: pt(4.0, 2.0),
            },
            DrawImage {
                width: 4,
                height: 2,
                origin: pt(10.0, 10.0),
                size: pt(20.0, 10.0),
            },
        ]
    );
}

struct Counter {
    draws: usize,
    drags: usize,
    keys: Vec<u32>,
}

impl<B: Backend> Sketch<B> for Counter {
    fn draw(&mut self, canvas: &mut Canvas<B>) {
        self.draws += 1;
        canvas.background(Color::BLACK);
    }

    fn mouse_dragged(&mut self, _canvas: &mut Canvas<B>) {
        self.drags += 1;
    }

    fn key_pressed(&mut self, _canvas: &mut Canvas<B>, key: u32) {
        self.keys.push(key);
    }
}

#[test]
fn frames_and_input() {
    let mut c = recording();
    let mut sketch = Counter { draws: 0, drags: 0, keys: Vec::new() };

    for ms in [0, 16, 33] {
        c.frame(&mut sketch, ms);
    }
    assert_eq!(sketch.draws, 3);
    assert_eq!(c.frame_count(), 3);

    c.handle_event(&mut sketch, InputEvent::MouseMove { x: 5.0, y: 6.0 });
    c.handle_event(&mut sketch, InputEvent::MouseDown(MouseButton::Right));
    c.handle_event(&mut sketch, InputEvent::MouseMove { x: 7.0, y: 8.0 });
    c.handle_event(&mut sketch, InputEvent::MouseUp(MouseButton::Right));
    c.handle_event(&mut sketch, InputEvent::KeyDown(32));
    c.handle_event(&mut sketch, InputEvent::Focus);

    let input = c.input();
    assert_eq!((input.pmouse_x, input.pmouse_y), (5.0, 6.0));
    assert_eq!((input.mouse_x, input.mouse_y), (7.0, 8.0));
    assert_eq!(input.mouse_button, MouseButton::Right);
    assert!(!input.mouse_is_pressed);
    assert!(input.key_is_pressed);
    assert!(input.focused);
    assert_eq!(sketch.drags, 1);
    assert_eq!(sketch.keys, [32]);
}

#[test]
fn rasterized_shape() {
    let mut c = Canvas::new(Rasterizer::<4, 16>::default(), 0, 0);
    c.size(32, 32);
    c.background(Color::BLACK);
    c.no_stroke();
    c.fill(Color::rgb(0, 255, 0));
    c.begin_shape(None);
    c.vertex(4.0, 4.0);
    c.vertex(28.0, 4.0);
    c.vertex(28.0, 28.0);
    c.vertex(4.0, 28.0);
    c.end_shape(Some(EndMode::Close)).unwrap();

    assert_eq!(c.snip_pixel(16, 16), Ok(Color::rgb(0, 255, 0)));
    assert_eq!(c.snip_pixel(1, 1), Ok(Color::BLACK));
}
