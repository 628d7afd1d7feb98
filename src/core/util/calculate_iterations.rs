/// Zoom-scaled iteration cap: `clamp(num_zoom_steps * increment + initial, 1, cap)`.
///
/// Deeper views need more iterations to resolve the boundary; `cap` bounds the
/// per-pixel cost. The product is rounded so zoom steps recovered from a
/// logarithm, such as 2.9999999999999996, count as whole steps.
#[must_use]
pub fn calculate_iterations(num_zoom_steps: f64, initial: u32, increment: u32, cap: u32) -> u32 {
    let cap = cap.max(1);
    let scaled = num_zoom_steps.max(0.0) * f64::from(increment) + f64::from(initial);

    // `as` saturates, and NaN becomes 0 which the clamp lifts to 1
    (scaled.round() as u32).clamp(1, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_steps_gives_initial() {
        assert_eq!(calculate_iterations(0.0, 96, 40, 5000), 96);
        assert_eq!(calculate_iterations(0.0, 7, 1000, 5000), 7);
    }

    #[test]
    fn each_step_adds_increment() {
        assert_eq!(calculate_iterations(1.0, 96, 40, 5000), 136);
        assert_eq!(calculate_iterations(10.0, 96, 40, 5000), 496);
        assert_eq!(calculate_iterations(2.5, 96, 40, 5000), 196);
    }

    #[test]
    fn steps_recovered_from_logarithms_count_whole() {
        let steps = 8f64.log10() / 2f64.log10();

        assert_eq!(calculate_iterations(steps, 96, 40, 5000), 216);
        assert_eq!(calculate_iterations(2.999_999_999_999_999_6, 96, 40, 5000), 216);
    }

    #[test]
    fn never_exceeds_cap() {
        assert_eq!(calculate_iterations(1000.0, 96, 40, 5000), 5000);
        assert_eq!(calculate_iterations(f64::INFINITY, 96, 40, 300), 300);
    }

    #[test]
    fn never_below_one() {
        assert_eq!(calculate_iterations(0.0, 0, 40, 5000), 1);
        assert_eq!(calculate_iterations(f64::NAN, 0, 0, 5000), 1);
        assert_eq!(calculate_iterations(0.0, 96, 40, 0), 1);
    }

    #[test]
    fn non_decreasing_in_zoom_steps() {
        let mut previous = 0;

        for step in 0..400 {
            let iterations = calculate_iterations(f64::from(step) * 0.25, 96, 40, 10_000);
            assert!(iterations >= previous);
            previous = iterations;
        }
    }
}
