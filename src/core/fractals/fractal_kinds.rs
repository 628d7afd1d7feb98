use std::fmt;

use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;
use crate::core::fractals::burning_ship::BurningShip;
use crate::core::fractals::mandelbrot::Mandelbrot;
use crate::core::fractals::newton::Newton;
use crate::core::fractals::tricorn::Tricorn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Tricorn,
    BurningShip,
    Newton,
}

impl FractalKind {
    /// Selection order, matching indices 0 to 3.
    pub const ALL: &'static [Self] = &[Self::Mandelbrot, Self::Tricorn, Self::BurningShip, Self::Newton];

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Mandelbrot => 0,
            Self::Tricorn => 1,
            Self::BurningShip => 2,
            Self::Newton => 3,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot Set",
            Self::Tricorn => "Tricorn",
            Self::BurningShip => "Burning Ship",
            Self::Newton => "Newton Fractal",
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FractalAlgorithm for FractalKind {
    fn evaluate(&self, c: Complex, max_iterations: u32) -> Colour {
        match self {
            Self::Mandelbrot => Mandelbrot::default().evaluate(c, max_iterations),
            Self::Tricorn => Tricorn::default().evaluate(c, max_iterations),
            Self::BurningShip => BurningShip::default().evaluate(c, max_iterations),
            Self::Newton => Newton.evaluate(c, max_iterations),
        }
    }

    fn trajectory(&self, c: Complex, max_iterations: u32) -> Vec<Complex> {
        match self {
            Self::Mandelbrot => Mandelbrot::default().trajectory(c, max_iterations),
            Self::Tricorn => Tricorn::default().trajectory(c, max_iterations),
            Self::BurningShip => BurningShip::default().trajectory(c, max_iterations),
            Self::Newton => Newton.trajectory(c, max_iterations),
        }
    }
}
