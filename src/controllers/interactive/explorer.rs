use std::sync::Arc;

use tracing::debug;

use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::data::render_status::RenderState;
use crate::controllers::interactive::errors::render_error::RenderSetupError;
use crate::controllers::interactive::ports::presenter_port::InteractiveControllerPresenterPort;
use crate::controllers::interactive::scheduler::RenderScheduler;
use crate::core::actions::trace_trajectory::trace_trajectory;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::data::resolution::{Resolution, ResolutionScale};
use crate::core::data::trajectory::TrajectoryOverlay;
use crate::core::data::view_state::ViewState;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::limits::ExplorerLimits;
use crate::core::util::calculate_iterations::calculate_iterations;
use crate::core::util::screen_mapping::screen_to_fractal;

// Absorbs rounding in 10^log10(zoom) so zooming back out lands on exactly 1.
const ZOOM_POWER_EPSILON: f64 = 1e-9;

/// Generation of the render an input started, or `None` when it changed nothing.
pub type RenderTrigger = Result<Option<u64>, RenderSetupError>;

/// Read-only snapshot for info panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewInfo {
    pub zoom_power: f64,
    pub real: f64,
    pub imag: f64,
    /// Cap used by the most recent render.
    pub iterations: u32,
    /// User-configured ceiling.
    pub max_iterations: u32,
    pub progress: f32,
    pub state: RenderState,
    pub fractal: FractalKind,
    pub resolution: ResolutionScale,
}

/// One exploration session: the view, the selections and the render scheduler.
///
/// Every input that changes what is on screen restarts the render and drops
/// any trajectory overlay, which would no longer line up with the image.
pub struct Explorer {
    limits: ExplorerLimits,
    view: ViewState,
    fractal: FractalKind,
    resolution: ResolutionScale,
    max_iterations: u32,
    current_iterations: u32,
    trajectory: Option<TrajectoryOverlay>,
    scheduler: RenderScheduler,
}

impl Explorer {
    pub fn new(
        window: Resolution,
        limits: ExplorerLimits,
        presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
    ) -> Self {
        let view = ViewState::new(window);
        let max_iterations = limits.default_max_iterations.min(limits.max_iterations_limit);
        let current_iterations = zoom_scaled_iterations(&view, &limits, max_iterations);

        Self {
            limits,
            view,
            fractal: FractalKind::default(),
            resolution: ResolutionScale::default(),
            max_iterations,
            current_iterations,
            trajectory: None,
            scheduler: RenderScheduler::new(presenter_port),
        }
    }

    /// Renders with the zoom-scaled iteration budget.
    pub fn render(&mut self) -> Result<u64, RenderSetupError> {
        let iterations = zoom_scaled_iterations(&self.view, &self.limits, self.max_iterations);
        self.start_render(iterations)
    }

    /// Renders with the user maximum, ignoring zoom depth.
    pub fn full_render(&mut self) -> Result<u64, RenderSetupError> {
        self.start_render(self.max_iterations)
    }

    /// Centres the view on the point under `click`.
    pub fn recentre(&mut self, click: Point) -> Result<u64, RenderSetupError> {
        let target = screen_to_fractal(f64::from(click.x), f64::from(click.y), &self.view.mapping());

        self.view.set_offset(target, &self.limits);
        self.trajectory = None;
        debug!(real = self.view.offset().real, imag = self.view.offset().imag, "recentred");

        self.render()
    }

    /// Traces the orbit under `click` with the budget of the last render.
    ///
    /// Independent of the scheduler; a running render is left alone.
    pub fn trace(&mut self, click: Point) -> Option<&TrajectoryOverlay> {
        self.trajectory = trace_trajectory(
            &self.view,
            &self.fractal,
            self.current_iterations,
            click,
            self.limits.trajectory_marker_size,
        );

        debug!(
            x = click.x,
            y = click.y,
            points = self.trajectory.as_ref().map_or(0, |overlay| overlay.polyline.len()),
            "traced trajectory"
        );

        self.trajectory.as_ref()
    }

    pub fn clear_trajectory(&mut self) {
        self.trajectory = None;
    }

    /// Zooms in for positive `delta` and out for negative, one scale step per call.
    ///
    /// Steps that would leave `[1, 10^max_zoom_power]` are ignored.
    pub fn scroll(&mut self, delta: f32) -> RenderTrigger {
        if delta == 0.0 || delta.is_nan() {
            return Ok(None);
        }

        let zoom = if delta > 0.0 {
            self.view.zoom() * self.limits.zoom_scale_factor
        } else {
            self.view.zoom() / self.limits.zoom_scale_factor
        };

        let Some(zoom_power) = self.admissible_zoom_power(zoom.log10()) else {
            return Ok(None);
        };

        self.view.set_zoom_power(zoom_power, &self.limits);
        self.trajectory = None;
        debug!(zoom_power, "zoomed");

        self.render().map(Some)
    }

    /// Jumps straight to a zoom power and centre. The initial view acts as a reset.
    pub fn set_view(&mut self, zoom_power: f64, real: f64, imag: f64) -> RenderTrigger {
        if zoom_power == 0.0 && real == 0.0 && imag == 0.0 {
            return self.reset();
        }

        if !real.is_finite() || !imag.is_finite() {
            return Ok(None);
        }

        let Some(zoom_power) = self.admissible_zoom_power(zoom_power) else {
            return Ok(None);
        };

        self.view.set_offset(Complex::new(real, imag), &self.limits);
        self.view.set_zoom_power(zoom_power, &self.limits);
        self.trajectory = None;
        debug!(zoom_power, real, imag, "view set");

        self.render().map(Some)
    }

    pub fn reset(&mut self) -> RenderTrigger {
        if self.view.is_initial() {
            return Ok(None);
        }

        self.view.reset();
        self.trajectory = None;
        debug!("view reset");

        self.render().map(Some)
    }

    /// Selects a formula by index 0 to 3.
    pub fn select_fractal(&mut self, index: usize) -> RenderTrigger {
        let Some(fractal) = FractalKind::from_index(index) else {
            return Ok(None);
        };

        if fractal == self.fractal {
            return Ok(None);
        }

        self.fractal = fractal;
        self.trajectory = None;
        debug!(%fractal, "fractal selected");

        self.render().map(Some)
    }

    pub fn select_resolution(&mut self, index: usize) -> RenderTrigger {
        let Some(resolution) = ResolutionScale::from_index(index) else {
            return Ok(None);
        };

        if resolution == self.resolution {
            return Ok(None);
        }

        self.resolution = resolution;
        debug!(%resolution, "resolution selected");

        self.render().map(Some)
    }

    /// Non-positive caps are ignored; larger ones are clamped to the hard limit.
    pub fn set_max_iterations(&mut self, requested: i64) -> RenderTrigger {
        let Some(max_iterations) = self.limits.clamp_max_iterations(requested) else {
            return Ok(None);
        };

        self.max_iterations = max_iterations;
        debug!(max_iterations, "iteration cap set");

        self.render().map(Some)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> RenderTrigger {
        if !self.view.set_window_size(Resolution::new(width, height)) {
            return Ok(None);
        }

        self.trajectory = None;
        debug!(width, height, "window resized");

        self.render().map(Some)
    }

    /// Blocks until the running render, if any, has finished.
    pub fn wait(&mut self) {
        self.scheduler.wait();
    }

    #[must_use]
    pub fn info(&self) -> ViewInfo {
        let offset = self.view.offset();

        ViewInfo {
            zoom_power: self.view.zoom_power(),
            real: offset.real,
            imag: offset.imag,
            iterations: self.current_iterations,
            max_iterations: self.max_iterations,
            progress: self.scheduler.progress().fraction(),
            state: self.scheduler.state(),
            fractal: self.fractal,
            resolution: self.resolution,
        }
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn limits(&self) -> &ExplorerLimits {
        &self.limits
    }

    #[must_use]
    pub fn fractal(&self) -> FractalKind {
        self.fractal
    }

    #[must_use]
    pub fn resolution(&self) -> ResolutionScale {
        self.resolution
    }

    #[must_use]
    pub fn trajectory(&self) -> Option<&TrajectoryOverlay> {
        self.trajectory.as_ref()
    }

    #[must_use]
    pub fn current_frame(&self) -> Option<Arc<PixelBuffer>> {
        self.scheduler.current_frame()
    }

    #[must_use]
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    fn start_render(&mut self, iterations: u32) -> Result<u64, RenderSetupError> {
        self.current_iterations = iterations;

        self.scheduler.start(RenderRequest {
            view: self.view,
            fractal: self.fractal,
            resolution: self.resolution,
            max_iterations: iterations,
        })
    }

    fn admissible_zoom_power(&self, zoom_power: f64) -> Option<f64> {
        if !zoom_power.is_finite()
            || zoom_power < -ZOOM_POWER_EPSILON
            || zoom_power > self.limits.max_zoom_power + ZOOM_POWER_EPSILON
        {
            return None;
        }

        Some(zoom_power.clamp(0.0, self.limits.max_zoom_power))
    }
}

fn zoom_scaled_iterations(view: &ViewState, limits: &ExplorerLimits, max_iterations: u32) -> u32 {
    calculate_iterations(
        view.num_zoom_steps(),
        limits.initial_iterations,
        limits.iteration_increment,
        max_iterations,
    )
}
