use crate::core::data::colour::Colour;
use crate::core::data::complex::Complex;

/// One iteration family, evaluated per fractal-plane point.
///
/// Both operations take the same input: the point `c` under test and the
/// iteration cap. Implementations are pure and shared across worker threads.
pub trait FractalAlgorithm: Send + Sync {
    fn evaluate(&self, c: Complex, max_iterations: u32) -> Colour;

    /// Orbit of `c`, stopping early on escape or convergence.
    ///
    /// Never longer than `max_iterations` and never contains non-finite points.
    fn trajectory(&self, c: Complex, max_iterations: u32) -> Vec<Complex>;
}
