use crate::core::data::complex::Complex;
use crate::core::data::resolution::Resolution;
use crate::core::limits::ExplorerLimits;
use crate::core::util::screen_mapping::ScreenMapping;

const INITIAL_ZOOM: f64 = 1.0;
const BASE_SPAN: f64 = 4.0;

/// Zoom, centre and window size of the explored view.
///
/// The fractal-plane span and pixel ratios are derived state; every mutator
/// refreshes them so they always agree with the current zoom and aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    zoom: f64,
    num_zoom_steps: f64,
    offset: Complex,
    window: Resolution,
    fractal_width: f64,
    fractal_height: f64,
    width_ratio: f64,
    height_ratio: f64,
}

impl ViewState {
    /// Zero window dimensions are raised to one pixel.
    #[must_use]
    pub fn new(window: Resolution) -> Self {
        let mut view = Self {
            zoom: INITIAL_ZOOM,
            num_zoom_steps: 0.0,
            offset: Complex::ZERO,
            window: non_empty(window),
            fractal_width: BASE_SPAN,
            fractal_height: BASE_SPAN,
            width_ratio: 0.0,
            height_ratio: 0.0,
        };

        view.refresh_fractal_size();
        view
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Decimal exponent of the zoom factor.
    #[must_use]
    pub fn zoom_power(&self) -> f64 {
        self.zoom.log10()
    }

    /// Zoom expressed as a count of scale-factor steps, fractional in general.
    #[must_use]
    pub fn num_zoom_steps(&self) -> f64 {
        self.num_zoom_steps
    }

    #[must_use]
    pub fn offset(&self) -> Complex {
        self.offset
    }

    #[must_use]
    pub fn window(&self) -> Resolution {
        self.window
    }

    #[must_use]
    pub fn fractal_width(&self) -> f64 {
        self.fractal_width
    }

    #[must_use]
    pub fn fractal_height(&self) -> f64 {
        self.fractal_height
    }

    #[must_use]
    pub fn width_ratio(&self) -> f64 {
        self.width_ratio
    }

    #[must_use]
    pub fn height_ratio(&self) -> f64 {
        self.height_ratio
    }

    #[must_use]
    pub fn mapping(&self) -> ScreenMapping {
        ScreenMapping {
            half_width: f64::from(self.window.width) / 2.0,
            half_height: f64::from(self.window.height) / 2.0,
            width_ratio: self.width_ratio,
            height_ratio: self.height_ratio,
            offset: self.offset,
        }
    }

    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.zoom == INITIAL_ZOOM && self.offset == Complex::ZERO
    }

    /// Returns `false` when the size is unchanged.
    pub fn set_window_size(&mut self, window: Resolution) -> bool {
        let window = non_empty(window);

        if window == self.window {
            return false;
        }

        self.window = window;
        self.refresh_fractal_size();
        true
    }

    pub fn set_offset(&mut self, offset: Complex, limits: &ExplorerLimits) {
        self.offset = Complex {
            real: limits.clamp_offset(offset.real),
            imag: limits.clamp_offset(offset.imag),
        };
    }

    /// Sets `zoom = 10^zoom_power`. Negative or non-finite powers are rejected.
    pub fn set_zoom_power(&mut self, zoom_power: f64, limits: &ExplorerLimits) -> bool {
        if !zoom_power.is_finite() || zoom_power < 0.0 {
            return false;
        }

        self.zoom = 10f64.powf(zoom_power);
        self.num_zoom_steps = zoom_power / limits.zoom_scale_factor.log10();
        self.refresh_fractal_size();
        true
    }

    pub fn reset(&mut self) {
        self.zoom = INITIAL_ZOOM;
        self.num_zoom_steps = 0.0;
        self.offset = Complex::ZERO;
        self.refresh_fractal_size();
    }

    /// The shorter window side spans `4 / zoom`; the longer side is scaled by
    /// the aspect ratio so the image is never stretched.
    pub fn refresh_fractal_size(&mut self) {
        let width = f64::from(self.window.width);
        let height = f64::from(self.window.height);
        let aspect_ratio = width / height;

        if self.window.width < self.window.height {
            self.fractal_width = BASE_SPAN / self.zoom;
            self.fractal_height = self.fractal_width / aspect_ratio;
        } else {
            self.fractal_height = BASE_SPAN / self.zoom;
            self.fractal_width = self.fractal_height * aspect_ratio;
        }

        self.width_ratio = self.fractal_width / width;
        self.height_ratio = self.fractal_height / height;
    }
}

fn non_empty(window: Resolution) -> Resolution {
    Resolution::new(window.width.max(1), window.height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_window_gives_height_the_base_span() {
        let view = ViewState::new(Resolution::new(1600, 900));

        assert_eq!(view.fractal_height(), 4.0);
        assert!((view.fractal_width() - 4.0 * 1600.0 / 900.0).abs() < 1e-12);
        assert!((view.width_ratio() - view.height_ratio()).abs() < 1e-15);
    }

    #[test]
    fn portrait_window_gives_width_the_base_span() {
        let view = ViewState::new(Resolution::new(450, 600));

        assert_eq!(view.fractal_width(), 4.0);
        assert!((view.fractal_height() - 4.0 * 600.0 / 450.0).abs() < 1e-12);
        assert!((view.width_ratio() - view.height_ratio()).abs() < 1e-15);
    }

    #[test]
    fn zoom_power_updates_span_and_steps() {
        let limits = ExplorerLimits::default();
        let mut view = ViewState::new(Resolution::new(800, 800));

        assert!(view.set_zoom_power(2.0_f64.log10() * 3.0, &limits));

        assert!((view.zoom() - 8.0).abs() < 1e-9);
        assert!((view.num_zoom_steps() - 3.0).abs() < 1e-9);
        assert!((view.fractal_width() - 0.5).abs() < 1e-9);
        assert!((view.zoom() - limits.zoom_scale_factor.powf(view.num_zoom_steps())).abs() < 1e-9);
    }

    #[test]
    fn negative_zoom_power_is_rejected() {
        let limits = ExplorerLimits::default();
        let mut view = ViewState::new(Resolution::new(800, 600));

        assert!(!view.set_zoom_power(-0.5, &limits));
        assert!(!view.set_zoom_power(f64::NAN, &limits));
        assert_eq!(view.zoom(), 1.0);
    }

    #[test]
    fn offset_is_clamped_per_axis() {
        let limits = ExplorerLimits::default();
        let mut view = ViewState::new(Resolution::new(800, 600));

        view.set_offset(Complex::new(7.0, -0.75), &limits);

        assert_eq!(view.offset(), Complex::new(2.5, -0.75));
    }

    #[test]
    fn resize_reports_change_and_refreshes_ratios() {
        let mut view = ViewState::new(Resolution::new(800, 600));
        let before = view.width_ratio();

        assert!(!view.set_window_size(Resolution::new(800, 600)));
        assert!(view.set_window_size(Resolution::new(1200, 600)));
        assert_ne!(view.width_ratio(), before);
        assert_eq!(view.window(), Resolution::new(1200, 600));
    }

    #[test]
    fn zero_sized_window_is_raised_to_one_pixel() {
        let view = ViewState::new(Resolution::new(0, 0));

        assert_eq!(view.window(), Resolution::new(1, 1));
        assert!(view.width_ratio().is_finite());
    }

    #[test]
    fn reset_restores_initial_view() {
        let limits = ExplorerLimits::default();
        let mut view = ViewState::new(Resolution::new(800, 600));
        view.set_zoom_power(3.0, &limits);
        view.set_offset(Complex::new(-1.0, 0.2), &limits);
        assert!(!view.is_initial());

        view.reset();

        assert!(view.is_initial());
        assert_eq!(view, ViewState::new(Resolution::new(800, 600)));
    }

    #[test]
    fn mapping_uses_half_window_and_offset() {
        let limits = ExplorerLimits::default();
        let mut view = ViewState::new(Resolution::new(801, 600));
        view.set_offset(Complex::new(0.5, 0.5), &limits);

        let mapping = view.mapping();

        assert_eq!(mapping.half_width, 400.5);
        assert_eq!(mapping.half_height, 300.0);
        assert_eq!(mapping.offset, Complex::new(0.5, 0.5));
    }
}
