use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::{escape_time_colour, escape_time_orbit};

/// `z_{n+1} = (|Re z_n| + i|Im z_n|)^2 + c`.
///
/// `c` is conjugated on the way in so the ship renders upright with the
/// imaginary axis pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurningShip {
    check_periodicity: bool,
}

impl BurningShip {
    #[cfg(test)]
    pub(crate) const fn without_periodicity_check() -> Self {
        Self {
            check_periodicity: false,
        }
    }
}

impl Default for BurningShip {
    fn default() -> Self {
        Self {
            check_periodicity: true,
        }
    }
}

fn step(z: Complex, c: Complex) -> Complex {
    let folded = Complex::new(z.real.abs(), z.imag.abs());
    folded * folded + c
}

impl FractalAlgorithm for BurningShip {
    fn evaluate(&self, c: Complex, max_iterations: u32) -> Colour {
        let c = c.conjugate();
        escape_time_colour(max_iterations, self.check_periodicity, |z| step(z, c))
    }

    /// Points are reflected back so they line up with the rendered image.
    fn trajectory(&self, c: Complex, max_iterations: u32) -> Vec<Complex> {
        let reflected = c.conjugate();

        escape_time_orbit(max_iterations, |z| step(z, reflected))
            .into_iter()
            .map(|z| z.conjugate())
            .collect()
    }
}
