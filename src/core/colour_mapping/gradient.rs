use crate::core::data::colour::Colour;

/// Colour of points that never escaped or converged.
pub const INTERIOR_COLOUR: Colour = Colour::new(0, 0, 0);

const GRADIENT_STOPS: [Colour; 5] = [
    Colour::new(0, 7, 100),
    Colour::new(32, 107, 203),
    Colour::new(237, 255, 255),
    Colour::new(255, 170, 0),
    Colour::new(0, 2, 0),
];

/// Per-channel linear interpolation. `t` is not clamped.
#[must_use]
pub fn colour_lerp(a: Colour, b: Colour, t: f32) -> Colour {
    let channel = |from: u8, to: u8| -> u8 {
        let from = f32::from(from);
        (from + (f32::from(to) - from) * t) as u8
    };

    Colour {
        r: channel(a.r, b.r),
        g: channel(a.g, b.g),
        b: channel(a.b, b.b),
    }
}

/// Maps an escape iteration onto the gradient stops.
///
/// The square root of the normalised count spreads the low iteration counts,
/// where most escaping pixels land, over more of the palette.
#[must_use]
pub fn colour_gradient(iteration: u32, max_iterations: u32) -> Colour {
    let max_iterations = max_iterations.max(1);
    let ratio = iteration.min(max_iterations) as f32 / max_iterations as f32;
    let t = ratio.sqrt();

    let segments = (GRADIENT_STOPS.len() - 1) as f32;
    let scaled = t * segments;
    let segment = (scaled as usize).min(GRADIENT_STOPS.len() - 2);
    let local_t = scaled - segment as f32;

    colour_lerp(GRADIENT_STOPS[segment], GRADIENT_STOPS[segment + 1], local_t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Colour::new(0, 100, 200);
        let b = Colour::new(200, 100, 0);

        assert_eq!(colour_lerp(a, b, 0.0), a);
        assert_eq!(colour_lerp(a, b, 1.0), b);
        assert_eq!(colour_lerp(a, b, 0.5), Colour::new(100, 100, 100));
    }

    #[test]
    fn lerp_saturates_outside_unit_interval() {
        let a = Colour::new(100, 100, 100);
        let b = Colour::new(200, 0, 100);

        assert_eq!(colour_lerp(a, b, 2.0), Colour::new(255, 0, 100));
    }

    #[test]
    fn gradient_endpoints_are_first_and_last_stop() {
        assert_eq!(colour_gradient(0, 100), GRADIENT_STOPS[0]);
        assert_eq!(colour_gradient(100, 100), GRADIENT_STOPS[4]);
    }

    #[test]
    fn gradient_endpoints_differ_from_interior() {
        for max in [1, 50, 5000] {
            assert_ne!(colour_gradient(0, max), INTERIOR_COLOUR);
            assert_ne!(colour_gradient(max, max), INTERIOR_COLOUR);
        }
    }

    #[test]
    fn gradient_is_idempotent() {
        for i in 0..=64 {
            assert_eq!(colour_gradient(i, 64), colour_gradient(i, 64));
        }
    }

    #[test]
    fn gradient_hits_inner_stops() {
        // sqrt(1/16) = 0.25 and sqrt(1/4) = 0.5 land exactly on stop boundaries
        assert_eq!(colour_gradient(1, 16), GRADIENT_STOPS[1]);
        assert_eq!(colour_gradient(4, 16), GRADIENT_STOPS[2]);
    }

    #[test]
    fn gradient_tolerates_degenerate_inputs() {
        assert_eq!(colour_gradient(5, 0), GRADIENT_STOPS[4]);
        assert_eq!(colour_gradient(200, 100), GRADIENT_STOPS[4]);
    }
}
