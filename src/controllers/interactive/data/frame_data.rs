use std::sync::Arc;
use std::time::Duration;

use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug, Clone)]
pub struct FrameData {
    pub generation: u64,
    /// Shared with the scheduler's presented slot; never written again once published.
    pub pixel_buffer: Arc<PixelBuffer>,
    pub max_iterations: u32,
    pub render_duration: Duration,
}
