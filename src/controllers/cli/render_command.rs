use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, info_span, warn};

use crate::controllers::interactive::{
    InteractiveControllerPresenterPort, RenderEvent, RenderRequest, RenderScheduler,
    RenderSetupError, RenderState,
};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::{Resolution, ResolutionScale};
use crate::core::data::view_state::ViewState;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::limits::ExplorerLimits;
use crate::core::util::calculate_iterations::calculate_iterations;

/// Everything one headless render needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub fractal: FractalKind,
    pub zoom_power: f64,
    pub real: f64,
    pub imag: f64,
    /// Overrides the limits' default cap when set.
    pub max_iterations: Option<i64>,
    /// Render with the full cap instead of the zoom-scaled budget.
    pub full: bool,
    pub resolution: ResolutionScale,
    pub output: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fractal: FractalKind::default(),
            zoom_power: 0.0,
            real: 0.0,
            imag: 0.0,
            max_iterations: None,
            full: false,
            resolution: ResolutionScale::Full,
            output: PathBuf::from("output/fractal.ppm"),
        }
    }
}

#[derive(Debug)]
pub enum RenderCommandError {
    InvalidMaxIterations(i64),
    InvalidZoomPower(f64),
    Setup(RenderSetupError),
    /// The job ended without publishing a frame.
    NoFrame(RenderState),
    Write(std::io::Error),
}

impl fmt::Display for RenderCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaxIterations(value) => {
                write!(f, "max iterations must be positive, got {}", value)
            }
            Self::InvalidZoomPower(value) => {
                write!(f, "zoom power must be a finite non-negative number, got {}", value)
            }
            Self::Setup(err) => write!(f, "{}", err),
            Self::NoFrame(state) => write!(f, "render finished in state {:?} without a frame", state),
            Self::Write(err) => write!(f, "could not write image: {}", err),
        }
    }
}

impl Error for RenderCommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Setup(err) => Some(err),
            Self::Write(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderSetupError> for RenderCommandError {
    fn from(err: RenderSetupError) -> Self {
        Self::Setup(err)
    }
}

/// Logs scheduler events; the command pulls the finished frame itself.
struct LoggingPresenterPort;

impl InteractiveControllerPresenterPort for LoggingPresenterPort {
    fn present(&self, event: RenderEvent) {
        match event {
            RenderEvent::Frame(frame) => info!(
                generation = frame.generation,
                max_iterations = frame.max_iterations,
                elapsed_ms = frame.render_duration.as_millis() as u64,
                "frame ready"
            ),
            RenderEvent::Error(err) => warn!(generation = err.generation, "{}", err.message),
        }
    }
}

/// Renders one frame through the scheduler and hands it to a file presenter.
pub struct RenderCommand<P: FilePresenterPort> {
    presenter: P,
    limits: ExplorerLimits,
}

impl<P: FilePresenterPort> RenderCommand<P> {
    pub fn new(presenter: P, limits: ExplorerLimits) -> Self {
        Self { presenter, limits }
    }

    /// Resolves the settings into the request a scheduler job would receive.
    pub fn request(&self, settings: &RenderSettings) -> Result<RenderRequest, RenderCommandError> {
        if !settings.zoom_power.is_finite() || settings.zoom_power < 0.0 {
            return Err(RenderCommandError::InvalidZoomPower(settings.zoom_power));
        }

        let cap = match settings.max_iterations {
            Some(requested) => self
                .limits
                .clamp_max_iterations(requested)
                .ok_or(RenderCommandError::InvalidMaxIterations(requested))?,
            None => self.limits.default_max_iterations,
        };

        let mut view = ViewState::new(Resolution::new(settings.width, settings.height));
        view.set_zoom_power(settings.zoom_power.min(self.limits.max_zoom_power), &self.limits);
        view.set_offset(Complex::new(settings.real, settings.imag), &self.limits);

        let max_iterations = if settings.full {
            cap
        } else {
            calculate_iterations(
                view.num_zoom_steps(),
                self.limits.initial_iterations,
                self.limits.iteration_increment,
                cap,
            )
        };

        Ok(RenderRequest {
            view,
            fractal: settings.fractal,
            resolution: settings.resolution,
            max_iterations,
        })
    }

    pub fn run(&self, settings: &RenderSettings) -> Result<(), RenderCommandError> {
        let span = info_span!("render-command", fractal = %settings.fractal);
        let _guard = span.enter();

        let request = self.request(settings)?;
        let resolution = request.render_resolution();

        info!(
            width = resolution.width,
            height = resolution.height,
            zoom_power = settings.zoom_power,
            max_iterations = request.max_iterations,
            "rendering"
        );

        let mut scheduler = RenderScheduler::new(Arc::new(LoggingPresenterPort));
        scheduler.start(request)?;
        scheduler.wait();

        let frame = scheduler
            .current_frame()
            .ok_or(RenderCommandError::NoFrame(scheduler.state()))?;

        self.write(&frame, &settings.output)?;
        info!(path = %settings.output.display(), "image written");

        Ok(())
    }

    fn write(&self, frame: &PixelBuffer, path: &Path) -> Result<(), RenderCommandError> {
        self.presenter
            .present(frame, path)
            .map_err(RenderCommandError::Write)
    }
}
