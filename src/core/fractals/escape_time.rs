use crate::core::colour_mapping::gradient::{colour_gradient, INTERIOR_COLOUR};
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;

pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;
pub const PERIODICITY_CHECK_INTERVAL: u32 = 20;
pub const PERIODICITY_TOLERANCE: f64 = 1e-12;

// Orbits are rarely long enough to need more up front.
const ORBIT_CAPACITY_HINT: u32 = 256;

/// Runs `step` from `z0 = 0` until escape or the iteration cap.
///
/// Iterations are counted from 1, so a point escaping on the first step is
/// coloured `colour_gradient(1, max_iterations)`. When `check_periodicity`
/// is set the orbit is compared against a snapshot every
/// [`PERIODICITY_CHECK_INTERVAL`] steps and classified interior on a match.
pub(crate) fn escape_time_colour<F>(max_iterations: u32, check_periodicity: bool, step: F) -> Colour
where
    F: Fn(Complex) -> Complex,
{
    let mut z = Complex::ZERO;
    let mut snapshot = z;

    for iteration in 1..=max_iterations {
        z = step(z);

        if z.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
            return colour_gradient(iteration, max_iterations);
        }

        if check_periodicity && iteration % PERIODICITY_CHECK_INTERVAL == 0 {
            if is_periodic(z, snapshot) {
                return INTERIOR_COLOUR;
            }

            snapshot = z;
        }
    }

    INTERIOR_COLOUR
}

/// Collects `z_1, z_2, ...` up to and including the first escaping point.
pub(crate) fn escape_time_orbit<F>(max_iterations: u32, step: F) -> Vec<Complex>
where
    F: Fn(Complex) -> Complex,
{
    let mut orbit = Vec::with_capacity(max_iterations.min(ORBIT_CAPACITY_HINT) as usize);
    let mut z = Complex::ZERO;

    for _ in 0..max_iterations {
        z = step(z);

        if !z.is_finite() {
            break;
        }

        orbit.push(z);

        if z.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
            break;
        }
    }

    orbit
}

/// True when `z` has returned to `snapshot` in both magnitude and direction.
///
/// Near the origin direction is meaningless, so tiny values fall back to a
/// plain distance test.
fn is_periodic(z: Complex, snapshot: Complex) -> bool {
    let magnitude = z.magnitude();
    let snapshot_magnitude = snapshot.magnitude();
    let magnitude_product = magnitude * snapshot_magnitude;

    if magnitude_product < PERIODICITY_TOLERANCE * PERIODICITY_TOLERANCE {
        return (z - snapshot).magnitude_squared() < PERIODICITY_TOLERANCE * PERIODICITY_TOLERANCE;
    }

    if (magnitude - snapshot_magnitude).abs() >= PERIODICITY_TOLERANCE {
        return false;
    }

    let dot = (z.real * snapshot.real + z.imag * snapshot.imag) / magnitude_product;
    let cross = (z.real * snapshot.imag - z.imag * snapshot.real) / magnitude_product;

    dot > 1.0 - PERIODICITY_TOLERANCE && cross.abs() < PERIODICITY_TOLERANCE
}
