use crate::core::data::complex::Complex;

/// Affine screen ↔ fractal-plane transform for one view.
///
/// Screen y grows downward while the imaginary axis grows upward, so the
/// vertical term is flipped.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenMapping {
    pub half_width: f64,
    pub half_height: f64,
    pub width_ratio: f64,
    pub height_ratio: f64,
    pub offset: Complex,
}

#[must_use]
pub fn screen_to_fractal(px: f64, py: f64, mapping: &ScreenMapping) -> Complex {
    Complex {
        real: (px - mapping.half_width) * mapping.width_ratio + mapping.offset.real,
        imag: (mapping.half_height - py) * mapping.height_ratio + mapping.offset.imag,
    }
}

#[must_use]
pub fn fractal_to_screen(z: Complex, mapping: &ScreenMapping) -> (f64, f64) {
    let px = (z.real - mapping.offset.real) / mapping.width_ratio + mapping.half_width;
    let py = mapping.half_height - (z.imag - mapping.offset.imag) / mapping.height_ratio;

    (px, py)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ScreenMapping {
        // 800x600 window at zoom 1: height spans 4, width spans 4 * 4/3
        ScreenMapping {
            half_width: 400.0,
            half_height: 300.0,
            width_ratio: (4.0 * 800.0 / 600.0) / 800.0,
            height_ratio: 4.0 / 600.0,
            offset: Complex::new(-0.5, 0.25),
        }
    }

    #[test]
    fn screen_centre_maps_to_offset() {
        let m = mapping();
        assert_eq!(screen_to_fractal(400.0, 300.0, &m), m.offset);
    }

    #[test]
    fn top_left_is_negative_real_positive_imag() {
        let m = mapping();
        let z = screen_to_fractal(0.0, 0.0, &m);

        assert!((z.real - (-0.5 - 8.0 / 3.0)).abs() < 1e-12);
        assert!((z.imag - (0.25 + 2.0)).abs() < 1e-12);
    }

    #[test]
    fn moving_down_the_screen_decreases_imag() {
        let m = mapping();
        let upper = screen_to_fractal(100.0, 100.0, &m);
        let lower = screen_to_fractal(100.0, 200.0, &m);

        assert!(lower.imag < upper.imag);
        assert_eq!(lower.real, upper.real);
    }

    #[test]
    fn round_trip_reproduces_on_screen_pixels() {
        let m = mapping();

        for px in (0..800).step_by(37) {
            for py in (0..600).step_by(29) {
                let z = screen_to_fractal(f64::from(px), f64::from(py), &m);
                let (x, y) = fractal_to_screen(z, &m);

                assert!((x - f64::from(px)).abs() < 1.0, "x {x} vs {px}");
                assert!((y - f64::from(py)).abs() < 1.0, "y {y} vs {py}");
            }
        }
    }

    #[test]
    fn round_trip_holds_at_deep_zoom() {
        let m = ScreenMapping {
            width_ratio: 4e-12 / 600.0,
            height_ratio: 4e-12 / 600.0,
            offset: Complex::new(-0.743643887037151, 0.131825904205330),
            ..mapping()
        };

        let z = screen_to_fractal(123.0, 456.0, &m);
        let (x, y) = fractal_to_screen(z, &m);

        assert!((x - 123.0).abs() < 1.0);
        assert!((y - 456.0).abs() < 1.0);
    }
}
