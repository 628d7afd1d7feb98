use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Point;
use crate::core::data::trajectory::{MarkerRect, TrajectoryOverlay};
use crate::core::data::view_state::ViewState;
use crate::core::util::screen_mapping::{fractal_to_screen, screen_to_fractal};

/// Computes the orbit of the point under `click` and projects it onto the window.
///
/// Points past the first are clamped to `[0, width] x [0, height]` for line
/// drawing; clamped points get no marker. Returns `None` when the orbit is empty.
#[must_use]
pub fn trace_trajectory<Alg>(
    view: &ViewState,
    algorithm: &Alg,
    max_iterations: u32,
    click: Point,
    marker_size: u32,
) -> Option<TrajectoryOverlay>
where
    Alg: FractalAlgorithm + ?Sized,
{
    let mapping = view.mapping();
    let window = view.window();
    let max_x = i32::try_from(window.width).unwrap_or(i32::MAX);
    let max_y = i32::try_from(window.height).unwrap_or(i32::MAX);

    let c = screen_to_fractal(f64::from(click.x), f64::from(click.y), &mapping);
    let orbit = algorithm.trajectory(c, max_iterations);
    let (start, rest) = orbit.split_first()?;

    let (start_x, start_y) = fractal_to_screen(*start, &mapping);
    let mut polyline = Vec::with_capacity(orbit.len());
    let mut markers = Vec::with_capacity(rest.len());

    polyline.push(Point {
        x: start_x as i32,
        y: start_y as i32,
    });

    for &z in rest {
        let (x, y) = fractal_to_screen(z, &mapping);
        let (x, y) = (x as i32, y as i32);
        let clamped = Point {
            x: x.clamp(0, max_x),
            y: y.clamp(0, max_y),
        };

        if clamped.x == x && clamped.y == y {
            markers.push(MarkerRect::centred_on(f64::from(x), f64::from(y), marker_size));
        }

        polyline.push(clamped);
    }

    Some(TrajectoryOverlay {
        polyline,
        markers,
        start_marker: MarkerRect::centred_on(start_x, start_y, marker_size),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::complex::Complex;
    use crate::core::data::resolution::Resolution;
    use crate::core::fractals::fractal_kinds::FractalKind;
    use crate::core::limits::ExplorerLimits;

    /// Replays a fixed orbit regardless of input.
    struct FixedOrbit(Vec<Complex>);

    impl FractalAlgorithm for FixedOrbit {
        fn evaluate(&self, _c: Complex, _max_iterations: u32) -> Colour {
            Colour::default()
        }

        fn trajectory(&self, _c: Complex, max_iterations: u32) -> Vec<Complex> {
            self.0.iter().copied().take(max_iterations as usize).collect()
        }
    }

    fn square_view() -> ViewState {
        // 400x400 at zoom 1: 100 pixels per unit, origin at (200, 200)
        ViewState::new(Resolution::new(400, 400))
    }

    #[test]
    fn polyline_starts_near_click_for_escape_families() {
        let view = square_view();
        let click = Point { x: 150, y: 260 };

        for kind in [FractalKind::Mandelbrot, FractalKind::Tricorn, FractalKind::BurningShip] {
            let overlay = trace_trajectory(&view, &kind, 50, click, 4).unwrap();
            let start = overlay.polyline[0];

            assert!((start.x - click.x).abs() <= 1, "{kind}");
            assert!((start.y - click.y).abs() <= 1, "{kind}");
        }
    }

    #[test]
    fn out_of_window_points_are_clamped_and_unmarked() {
        let view = square_view();
        let orbit = FixedOrbit(vec![
            Complex::new(0.0, 0.0),
            Complex::new(1.0, 1.0),
            Complex::new(5.0, 0.0),
            Complex::new(-1.0, -9.0),
            Complex::new(-0.5, 0.5),
        ]);

        let overlay = trace_trajectory(&view, &orbit, 10, Point::default(), 4).unwrap();

        assert_eq!(
            overlay.polyline,
            vec![
                Point { x: 200, y: 200 },
                Point { x: 300, y: 100 },
                Point { x: 400, y: 200 },
                Point { x: 100, y: 400 },
                Point { x: 150, y: 150 },
            ]
        );
        assert_eq!(
            overlay.markers,
            vec![
                MarkerRect::centred_on(300.0, 100.0, 4),
                MarkerRect::centred_on(150.0, 150.0, 4),
            ]
        );
        assert_eq!(overlay.start_marker, MarkerRect::centred_on(200.0, 200.0, 4));
    }

    #[test]
    fn start_point_is_never_clamped() {
        let view = square_view();
        let orbit = FixedOrbit(vec![Complex::new(-3.0, 0.0), Complex::new(0.0, 0.0)]);

        let overlay = trace_trajectory(&view, &orbit, 10, Point::default(), 4).unwrap();

        assert_eq!(overlay.polyline[0], Point { x: -100, y: 200 });
        assert_eq!(overlay.start_marker.top_left, Point { x: -102, y: 198 });
        assert_eq!(overlay.markers.len(), 1);
    }

    #[test]
    fn orbit_length_follows_the_budget() {
        let view = square_view();
        let overlay = trace_trajectory(&view, &FractalKind::Mandelbrot, 17, Point { x: 200, y: 200 }, 4).unwrap();

        // the origin never escapes, so every iteration is kept
        assert_eq!(overlay.polyline.len(), 17);
        assert!(overlay.markers.len() <= 16);
    }

    #[test]
    fn empty_orbit_gives_no_overlay() {
        let view = square_view();

        assert!(trace_trajectory(&view, &FractalKind::Mandelbrot, 0, Point::default(), 4).is_none());
        assert!(trace_trajectory(&view, &FixedOrbit(Vec::new()), 10, Point::default(), 4).is_none());
    }

    #[test]
    fn projection_follows_the_view_offset() {
        let limits = ExplorerLimits::default();
        let mut view = square_view();
        view.set_offset(Complex::new(1.0, 0.0), &limits);

        let orbit = FixedOrbit(vec![Complex::new(1.0, 0.0)]);
        let overlay = trace_trajectory(&view, &orbit, 10, Point::default(), 4).unwrap();

        assert_eq!(overlay.polyline, vec![Point { x: 200, y: 200 }]);
        assert!(overlay.markers.is_empty());
    }
}
