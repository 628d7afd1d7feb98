use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use rayon::prelude::*;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::PackedColour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::Resolution;
use crate::core::util::calculate_column_bands::{available_workers, calculate_column_bands};
use crate::core::util::screen_mapping::{screen_to_fractal, ScreenMapping};

/// Everything a worker needs to colour its columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRenderPlan {
    /// Size of the rendered image, possibly smaller than the window.
    pub resolution: Resolution,
    /// Window-space mapping of the view being rendered.
    pub mapping: ScreenMapping,
    /// Rendered pixels per window pixel along each axis.
    pub pixel_scale: f64,
    pub max_iterations: u32,
}

#[derive(Debug)]
pub enum RenderFrameError {
    Allocation(TryReserveError),
    Cancelled(Cancelled),
}

impl fmt::Display for RenderFrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(err) => write!(f, "could not allocate frame: {}", err),
            Self::Cancelled(err) => write!(f, "{}", err),
        }
    }
}

impl Error for RenderFrameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation(err) => Some(err),
            Self::Cancelled(err) => Some(err),
        }
    }
}

impl From<Cancelled> for RenderFrameError {
    fn from(err: Cancelled) -> Self {
        Self::Cancelled(err)
    }
}

impl From<TryReserveError> for RenderFrameError {
    fn from(err: TryReserveError) -> Self {
        Self::Allocation(err)
    }
}

/// Colours `columns` into `out`, laid out column-major with `plan.resolution.height`
/// pixels per column.
///
/// The token is polled before every pixel; `progress` is bumped once per finished column.
pub fn render_column_band<Alg, Cancel>(
    algorithm: &Alg,
    plan: &ColumnRenderPlan,
    columns: Range<u32>,
    out: &mut [PackedColour],
    cancel: &Cancel,
    progress: &AtomicU32,
) -> Result<(), Cancelled>
where
    Alg: FractalAlgorithm + ?Sized,
    Cancel: CancelToken + ?Sized,
{
    let height = plan.resolution.height as usize;
    if height == 0 {
        return Ok(());
    }

    for (x, column) in columns.zip(out.chunks_exact_mut(height)) {
        let px = f64::from(x) / plan.pixel_scale;

        for (y, pixel) in column.iter_mut().enumerate() {
            cancel.check()?;

            let py = y as f64 / plan.pixel_scale;
            let c = screen_to_fractal(px, py, &plan.mapping);

            *pixel = algorithm.evaluate(c, plan.max_iterations).to_packed();
        }

        progress.fetch_add(1, Ordering::Relaxed);
    }

    Ok(())
}

/// Renders the whole image on one scoped thread per band.
///
/// Each worker owns a disjoint slice of `scratch`, so no locking happens while
/// pixels are computed. `scratch` must hold exactly `width * height` pixels.
pub fn render_columns_parallel<Alg, Cancel>(
    algorithm: &Alg,
    plan: &ColumnRenderPlan,
    bands: &[Range<u32>],
    scratch: &mut [PackedColour],
    cancel: &Cancel,
    progress: &AtomicU32,
) -> Result<(), Cancelled>
where
    Alg: FractalAlgorithm + ?Sized,
    Cancel: CancelToken + ?Sized,
{
    let height = plan.resolution.height as usize;

    thread::scope(|scope| {
        let mut remaining = scratch;

        let handles = bands
            .iter()
            .cloned()
            .map(|band| {
                let band_len = (band.end - band.start) as usize * height;
                let (band_out, rest) = std::mem::take(&mut remaining).split_at_mut(band_len);
                remaining = rest;

                scope.spawn(move || render_column_band(algorithm, plan, band, band_out, cancel, progress))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<(), Cancelled>>()
    })
}

/// Copies a column-major image into the row-major layout of `target`.
pub fn transpose_columns_into(column_major: &[PackedColour], target: &mut PixelBuffer) {
    let Resolution { width, height } = target.resolution();
    let (width, height) = (width as usize, height as usize);

    if width == 0 || height == 0 {
        return;
    }

    target
        .buffer_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = column_major[x * height + y];
            }
        });
}

/// Renders one complete frame on the calling thread's behalf.
///
/// Used where no scheduler is running, such as headless export and benchmarks.
pub fn render_frame<Alg, Cancel>(
    algorithm: &Alg,
    plan: &ColumnRenderPlan,
    cancel: &Cancel,
) -> Result<PixelBuffer, RenderFrameError>
where
    Alg: FractalAlgorithm + ?Sized,
    Cancel: CancelToken + ?Sized,
{
    let mut scratch = Vec::new();
    scratch.try_reserve_exact(plan.resolution.pixel_count())?;
    scratch.resize(plan.resolution.pixel_count(), 0);

    let mut frame = PixelBuffer::try_new(plan.resolution)?;
    let bands = calculate_column_bands(available_workers(), plan.resolution.width);
    let progress = AtomicU32::new(0);

    render_columns_parallel(algorithm, plan, &bands, &mut scratch, cancel, &progress)?;
    transpose_columns_into(&scratch, &mut frame);

    Ok(frame)
}
