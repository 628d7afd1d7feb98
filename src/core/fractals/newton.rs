use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::colour_mapping::gradient::INTERIOR_COLOUR;
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;

pub const ROOT_TOLERANCE: f64 = 1e-6;

const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;

/// Cube roots of unity, each paired with the colour of its basin.
pub const ROOTS: [(Complex, Colour); 3] = [
    (Complex::new(1.0, 0.0), Colour::new(220, 60, 60)),
    (Complex::new(-0.5, HALF_SQRT_3), Colour::new(60, 180, 75)),
    (Complex::new(-0.5, -HALF_SQRT_3), Colour::new(65, 105, 225)),
];

/// Newton's method on `f(z) = z^3 - 1`, seeded with the point itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Newton;

fn newton_step(z: Complex) -> Complex {
    let z_squared = z * z;
    let f = z_squared * z - 1.0;
    let f_prime = z_squared * 3.0;

    z - f / f_prime
}

fn converged_root(z: Complex) -> Option<Colour> {
    ROOTS
        .iter()
        .find(|(root, _)| {
            (z.real - root.real).abs() < ROOT_TOLERANCE && (z.imag - root.imag).abs() < ROOT_TOLERANCE
        })
        .map(|&(_, colour)| colour)
}

impl FractalAlgorithm for Newton {
    fn evaluate(&self, c: Complex, max_iterations: u32) -> Colour {
        let mut z = c;

        for _ in 0..max_iterations {
            z = newton_step(z);

            // f'(0) = 0 sends the origin to infinity
            if !z.is_finite() {
                return INTERIOR_COLOUR;
            }

            if let Some(colour) = converged_root(z) {
                return colour;
            }
        }

        INTERIOR_COLOUR
    }

    fn trajectory(&self, c: Complex, max_iterations: u32) -> Vec<Complex> {
        if max_iterations == 0 || !c.is_finite() {
            return Vec::new();
        }

        let mut orbit = vec![c];
        let mut z = c;

        while orbit.len() < max_iterations as usize && converged_root(z).is_none() {
            z = newton_step(z);

            if !z.is_finite() {
                break;
            }

            orbit.push(z);
        }

        orbit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_one_from_nearby_real_point() {
        assert_eq!(Newton.evaluate(Complex::new(1.1, 0.0), 50), ROOTS[0].1);
    }

    #[test]
    fn converges_to_complex_roots() {
        assert_eq!(Newton.evaluate(Complex::new(-0.4, 0.8), 50), ROOTS[1].1);
        assert_eq!(Newton.evaluate(Complex::new(-0.4, -0.8), 50), ROOTS[2].1);
    }

    #[test]
    fn root_colours_are_distinct_and_not_interior() {
        for (i, (_, a)) in ROOTS.iter().enumerate() {
            assert_ne!(*a, INTERIOR_COLOUR);
            for (_, b) in &ROOTS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn origin_is_interior() {
        assert_eq!(Newton.evaluate(Complex::ZERO, 50), INTERIOR_COLOUR);
        assert!(Newton.trajectory(Complex::ZERO, 50).iter().all(Complex::is_finite));
    }

    #[test]
    fn too_few_iterations_is_interior() {
        assert_eq!(Newton.evaluate(Complex::new(5.0, 5.0), 1), INTERIOR_COLOUR);
    }

    #[test]
    fn trajectory_starts_at_seed_and_ends_at_root() {
        let seed = Complex::new(1.1, 0.0);
        let orbit = Newton.trajectory(seed, 50);

        assert_eq!(orbit[0], seed);
        assert!(orbit.len() < 10);
        assert_eq!(orbit.last().copied().and_then(converged_root), Some(ROOTS[0].1));
    }

    #[test]
    fn trajectory_respects_the_cap() {
        let orbit = Newton.trajectory(Complex::new(40.0, -13.0), 4);
        assert_eq!(orbit.len(), 4);
        assert!(Newton.trajectory(Complex::new(1.0, 0.0), 0).is_empty());
    }

    #[test]
    fn roots_are_cube_roots_of_unity() {
        for (root, _) in ROOTS {
            let cube = root * root * root;
            assert!((cube.real - 1.0).abs() < 1e-12);
            assert!(cube.imag.abs() < 1e-12);
        }
    }
}
