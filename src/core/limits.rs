#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerLimits {
    /// Centre offsets are clamped to `[-max_offset_abs, max_offset_abs]` on both axes.
    pub max_offset_abs: f64,
    /// Zoom multiplier applied per scroll step; also the base of `num_zoom_steps`.
    pub zoom_scale_factor: f64,
    /// Decimal exponent past which f64 pixel spacing stops resolving detail.
    pub max_zoom_power: f64,
    pub initial_iterations: u32,
    pub iteration_increment: u32,
    pub default_max_iterations: u32,
    pub max_iterations_limit: u32,
    pub trajectory_marker_size: u32,
}

impl ExplorerLimits {
    #[must_use]
    pub fn clamp_offset(&self, value: f64) -> f64 {
        value.clamp(-self.max_offset_abs, self.max_offset_abs)
    }

    /// Clamps a user-entered iteration cap, rejecting non-positive input.
    #[must_use]
    pub fn clamp_max_iterations(&self, requested: i64) -> Option<u32> {
        if requested <= 0 {
            return None;
        }

        Some(requested.min(i64::from(self.max_iterations_limit)) as u32)
    }
}

impl Default for ExplorerLimits {
    fn default() -> Self {
        Self {
            max_offset_abs: 2.5,
            zoom_scale_factor: 2.0,
            max_zoom_power: 13.0,
            initial_iterations: 96,
            iteration_increment: 40,
            default_max_iterations: 5000,
            max_iterations_limit: 10_000,
            trajectory_marker_size: 4,
        }
    }
}
