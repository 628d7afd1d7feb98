use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;
use std::io;

use crate::core::data::resolution::Resolution;

/// Reported to the presenter when a job could not be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub generation: u64,
    pub message: String,
}

/// Job setup failures. The previously presented frame stays on screen.
#[derive(Debug)]
pub enum RenderSetupError {
    EmptyResolution(Resolution),
    Allocation(TryReserveError),
    Spawn(io::Error),
}

impl fmt::Display for RenderSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyResolution(resolution) => write!(
                f,
                "render resolution {}x{} has no pixels",
                resolution.width, resolution.height
            ),
            Self::Allocation(err) => write!(f, "could not allocate render buffers: {}", err),
            Self::Spawn(err) => write!(f, "could not start render thread: {}", err),
        }
    }
}

impl Error for RenderSetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyResolution(_) => None,
            Self::Allocation(err) => Some(err),
            Self::Spawn(err) => Some(err),
        }
    }
}

impl From<TryReserveError> for RenderSetupError {
    fn from(err: TryReserveError) -> Self {
        Self::Allocation(err)
    }
}

impl From<io::Error> for RenderSetupError {
    fn from(err: io::Error) -> Self {
        Self::Spawn(err)
    }
}
