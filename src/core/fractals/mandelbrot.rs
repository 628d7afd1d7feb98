use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::colour_mapping::gradient::INTERIOR_COLOUR;
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::{escape_time_colour, escape_time_orbit};

/// `z_{n+1} = z_n^2 + c` from `z_0 = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mandelbrot {
    check_periodicity: bool,
}

impl Mandelbrot {
    #[cfg(test)]
    pub(crate) const fn without_periodicity_check() -> Self {
        Self {
            check_periodicity: false,
        }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self {
            check_periodicity: true,
        }
    }
}

/// Closed-form test for the main cardioid and the period-2 bulb.
#[must_use]
pub fn is_in_main_cardioid_or_bulb(c: Complex) -> bool {
    let x = c.real;
    let y2 = c.imag * c.imag;

    let shifted = x - 0.25;
    let q = shifted * shifted + y2;
    if q * (q + shifted) <= 0.25 * y2 {
        return true;
    }

    let bulb = x + 1.0;
    bulb * bulb + y2 <= 0.0625
}

impl FractalAlgorithm for Mandelbrot {
    fn evaluate(&self, c: Complex, max_iterations: u32) -> Colour {
        if is_in_main_cardioid_or_bulb(c) {
            return INTERIOR_COLOUR;
        }

        escape_time_colour(max_iterations, self.check_periodicity, |z| z * z + c)
    }

    fn trajectory(&self, c: Complex, max_iterations: u32) -> Vec<Complex> {
        escape_time_orbit(max_iterations, |z| z * z + c)
    }
}
