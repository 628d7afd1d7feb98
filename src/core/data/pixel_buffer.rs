use crate::core::data::colour::{Colour, PackedColour};
use crate::core::data::point::Point;
use crate::core::data::resolution::Resolution;
use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        resolution: Resolution,
    },
    BoundsMismatch {
        resolution_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                resolution_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "resolution size {} does not match buffer size {}",
                    resolution_size, buffer_size
                )
            }
            Self::PixelOutsideBounds { pixel, resolution } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {}x{} buffer",
                    pixel.x, pixel.y, resolution.width, resolution.height
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<PackedColour>;

/// Row-major frame, one packed RGBA colour per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    resolution: Resolution,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            buffer: vec![0; resolution.pixel_count()],
        }
    }

    /// Allocates without aborting the process when memory is short.
    pub fn try_new(resolution: Resolution) -> Result<Self, TryReserveError> {
        let mut buffer = PixelBufferData::new();
        buffer.try_reserve_exact(resolution.pixel_count())?;
        buffer.resize(resolution.pixel_count(), 0);

        Ok(Self { resolution, buffer })
    }

    pub fn from_data(
        resolution: Resolution,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let resolution_size = resolution.pixel_count();

        if resolution_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                resolution_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { resolution, buffer })
    }

    /// Reuses the existing allocation when it is already large enough.
    pub fn try_resize(&mut self, resolution: Resolution) -> Result<(), TryReserveError> {
        let pixel_count = resolution.pixel_count();

        if pixel_count > self.buffer.len() {
            self.buffer.try_reserve_exact(pixel_count - self.buffer.len())?;
        }

        self.buffer.resize(pixel_count, 0);
        self.resolution = resolution;

        Ok(())
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut [PackedColour] {
        &mut self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn pixel(&self, pixel: Point) -> Option<Colour> {
        self.index_of(pixel)
            .map(|index| Colour::from_packed(self.buffer[index]))
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let Some(index) = self.index_of(pixel) else {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                resolution: self.resolution,
            });
        };

        self.buffer[index] = colour.to_packed();

        Ok(())
    }

    /// Tightly packed RGB bytes, as written by binary PPM.
    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.buffer
            .iter()
            .flat_map(|&packed| {
                let [r, g, b, _] = packed.to_le_bytes();
                [r, g, b]
            })
            .collect()
    }

    /// RGBA bytes, ready for texture upload.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.buffer
            .iter()
            .flat_map(|&packed| packed.to_le_bytes())
            .collect()
    }

    fn index_of(&self, pixel: Point) -> Option<usize> {
        let x = u32::try_from(pixel.x).ok()?;
        let y = u32::try_from(pixel.y).ok()?;

        if x >= self.resolution.width || y >= self.resolution.height {
            return None;
        }

        Some(y as usize * self.resolution.width as usize + x as usize)
    }
}
