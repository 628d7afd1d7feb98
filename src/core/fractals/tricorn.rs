use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::{escape_time_colour, escape_time_orbit};

/// `z_{n+1} = conj(z_n)^2 + c`, the Mandelbar set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tricorn {
    check_periodicity: bool,
}

impl Tricorn {
    #[cfg(test)]
    pub(crate) const fn without_periodicity_check() -> Self {
        Self {
            check_periodicity: false,
        }
    }
}

impl Default for Tricorn {
    fn default() -> Self {
        Self {
            check_periodicity: true,
        }
    }
}

fn step(z: Complex, c: Complex) -> Complex {
    let conjugate = z.conjugate();
    conjugate * conjugate + c
}

impl FractalAlgorithm for Tricorn {
    fn evaluate(&self, c: Complex, max_iterations: u32) -> Colour {
        escape_time_colour(max_iterations, self.check_periodicity, |z| step(z, c))
    }

    fn trajectory(&self, c: Complex, max_iterations: u32) -> Vec<Complex> {
        escape_time_orbit(max_iterations, |z| step(z, c))
    }
}
