use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, error, info, info_span, warn};

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::data::render_status::{RenderProgress, RenderState};
use crate::controllers::interactive::errors::render_error::{RenderError, RenderSetupError};
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::InteractiveControllerPresenterPort;
use crate::core::actions::cancellation::{CancelFlag, CancelToken};
use crate::core::actions::render_columns::{
    render_columns_parallel, transpose_columns_into, ColumnRenderPlan,
};
use crate::core::data::colour::PackedColour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::Resolution;
use crate::core::util::calculate_column_bands::{available_workers, calculate_column_bands};

/// Presented frame, the buffer waiting to be reused and the job state.
///
/// Guarded by one mutex so a frame swap and its state change are seen together.
struct FrameSlots {
    state: RenderState,
    current: Option<Arc<PixelBuffer>>,
    spare: Option<PixelBuffer>,
}

struct SharedState {
    cancel: CancelFlag,
    completed_columns: AtomicU32,
    total_columns: AtomicU32,
    slots: Mutex<FrameSlots>,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

impl SharedState {
    fn slots(&self) -> MutexGuard<'_, FrameSlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Runs at most one render job at a time and publishes complete frames only.
///
/// Each job gets a fresh orchestrator thread which fans out one scoped worker
/// per column band. Starting a job cancels and joins the previous one first.
pub struct RenderScheduler {
    shared: Arc<SharedState>,
    generation: u64,
    job: Option<JoinHandle<Vec<PackedColour>>>,
    scratch: Vec<PackedColour>,
}

impl RenderScheduler {
    pub fn new(presenter_port: Arc<dyn InteractiveControllerPresenterPort>) -> Self {
        Self {
            shared: Arc::new(SharedState {
                cancel: CancelFlag::default(),
                completed_columns: AtomicU32::new(0),
                total_columns: AtomicU32::new(0),
                slots: Mutex::new(FrameSlots {
                    state: RenderState::Idle,
                    current: None,
                    spare: None,
                }),
                presenter_port,
            }),
            generation: 0,
            job: None,
            scratch: Vec::new(),
        }
    }

    /// Supersedes any running job and launches `request`.
    ///
    /// Setup failures are reported to the presenter as well as returned; the
    /// scheduler goes back to `Idle` and the presented frame is left alone.
    pub fn start(&mut self, request: RenderRequest) -> Result<u64, RenderSetupError> {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        self.shared.slots().state = RenderState::Idle;

        match self.launch(generation, request) {
            Ok(()) => Ok(generation),
            Err(err) => {
                warn!(generation, error = %err, "render setup failed");
                self.shared.slots().state = RenderState::Idle;
                self.shared
                    .presenter_port
                    .present(RenderEvent::Error(RenderError {
                        generation,
                        message: err.to_string(),
                    }));

                Err(err)
            }
        }
    }

    /// Stops the running job, if any, and waits for its workers to exit.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.job.take() {
            self.shared.cancel.raise();
            self.join(handle);
            self.shared.cancel.lower();
        }
    }

    /// Blocks until the running job, if any, has finished or been cancelled.
    pub fn wait(&mut self) {
        if let Some(handle) = self.job.take() {
            self.join(handle);
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn state(&self) -> RenderState {
        self.shared.slots().state
    }

    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.state() == RenderState::Rendering
    }

    #[must_use]
    pub fn progress(&self) -> RenderProgress {
        RenderProgress {
            completed_columns: self.shared.completed_columns.load(Ordering::Relaxed),
            total_columns: self.shared.total_columns.load(Ordering::Relaxed),
        }
    }

    /// Most recently completed frame. Never a partially written buffer.
    #[must_use]
    pub fn current_frame(&self) -> Option<Arc<PixelBuffer>> {
        self.shared.slots().current.clone()
    }

    fn launch(&mut self, generation: u64, request: RenderRequest) -> Result<(), RenderSetupError> {
        let resolution = request.render_resolution();

        if resolution.is_empty() {
            return Err(RenderSetupError::EmptyResolution(resolution));
        }

        let mut scratch = std::mem::take(&mut self.scratch);
        let pixel_count = resolution.pixel_count();
        if pixel_count > scratch.len() {
            scratch.try_reserve_exact(pixel_count - scratch.len())?;
        }
        scratch.resize(pixel_count, 0);

        let spare = self.shared.slots().spare.take();
        let frame = match spare {
            Some(mut buffer) => {
                buffer.try_resize(resolution)?;
                buffer
            }
            None => PixelBuffer::try_new(resolution)?,
        };

        self.shared.completed_columns.store(0, Ordering::Relaxed);
        self.shared.total_columns.store(resolution.width, Ordering::Relaxed);
        self.shared.slots().state = RenderState::Rendering;

        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(format!("render-{generation}"))
            .spawn(move || run_job(&shared, generation, &request, scratch, frame))?;

        self.job = Some(handle);

        Ok(())
    }

    fn join(&mut self, handle: JoinHandle<Vec<PackedColour>>) {
        match handle.join() {
            Ok(scratch) => self.scratch = scratch,
            Err(_) => {
                error!(generation = self.generation, "render thread panicked");
                self.shared.slots().state = RenderState::Idle;
            }
        }
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Plan the workers follow for `request` at its render resolution.
#[must_use]
pub fn column_plan(request: &RenderRequest) -> ColumnRenderPlan {
    ColumnRenderPlan {
        resolution: request.render_resolution(),
        mapping: request.view.mapping(),
        pixel_scale: request.resolution.length_factor(),
        max_iterations: request.max_iterations,
    }
}

fn run_job(
    shared: &SharedState,
    generation: u64,
    request: &RenderRequest,
    mut scratch: Vec<PackedColour>,
    mut frame: PixelBuffer,
) -> Vec<PackedColour> {
    let span = info_span!("render-job", generation);
    let _guard = span.enter();

    let plan = column_plan(request);
    let Resolution { width, height } = plan.resolution;
    let bands = calculate_column_bands(available_workers(), width);
    let started = Instant::now();

    debug!(
        generation,
        width,
        height,
        max_iterations = plan.max_iterations,
        fractal = %request.fractal,
        bands = bands.len(),
        "render started"
    );

    let result = render_columns_parallel(
        &request.fractal,
        &plan,
        &bands,
        &mut scratch,
        &shared.cancel,
        &shared.completed_columns,
    );

    if result.is_ok() {
        transpose_columns_into(&scratch, &mut frame);
    }

    let mut slots = shared.slots();

    if result.is_err() || shared.is_cancelled() {
        slots.state = RenderState::Cancelled;
        slots.spare = Some(frame);
        drop(slots);

        debug!(generation, "render cancelled");
        return scratch;
    }

    let frame = Arc::new(frame);

    if let Some(previous) = slots.current.replace(Arc::clone(&frame)) {
        // still held by a presenter, so it cannot be recycled yet
        if let Ok(buffer) = Arc::try_unwrap(previous) {
            slots.spare = Some(buffer);
        }
    }

    slots.state = RenderState::Completed;
    drop(slots);

    let render_duration = started.elapsed();

    info!(
        generation,
        width,
        height,
        max_iterations = plan.max_iterations,
        fractal = %request.fractal,
        elapsed = ?render_duration,
        "render completed"
    );

    shared.presenter_port.present(RenderEvent::Frame(FrameData {
        generation,
        pixel_buffer: frame,
        max_iterations: plan.max_iterations,
        render_duration,
    }));

    scratch
}
