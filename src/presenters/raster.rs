//! Drawing into RGBA8 framebuffers for window presentation.

use rayon::prelude::*;

use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::data::resolution::Resolution;
use crate::core::data::trajectory::{MarkerRect, TrajectoryOverlay};

const BYTES_PER_PIXEL: usize = 4;

pub const TRAJECTORY_LINE_COLOUR: Colour = Colour::new(160, 0, 160);
pub const TRAJECTORY_MARKER_COLOUR: Colour = Colour::new(255, 255, 255);

/// Mutable view over an RGBA8 framebuffer of a known size.
pub struct RgbaCanvas<'a> {
    bytes: &'a mut [u8],
    size: Resolution,
}

impl<'a> RgbaCanvas<'a> {
    /// # Panics
    /// Panics if `bytes` is not exactly `4 * width * height` long.
    pub fn new(bytes: &'a mut [u8], size: Resolution) -> Self {
        assert_eq!(
            bytes.len(),
            size.pixel_count() * BYTES_PER_PIXEL,
            "framebuffer length {} does not match {}x{}",
            bytes.len(),
            size.width,
            size.height
        );

        Self { bytes, size }
    }

    #[must_use]
    pub fn size(&self) -> Resolution {
        self.size
    }

    pub fn fill(&mut self, colour: Colour) {
        let rgba = colour.to_packed().to_le_bytes();

        for pixel in self.bytes.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Nearest-neighbour stretch of `frame` over the whole canvas.
    ///
    /// Canvas pixel `x` samples source column `x * src_width / dst_width`, the
    /// inverse of the scale the frame was rendered at.
    pub fn blit_scaled(&mut self, frame: &PixelBuffer) {
        let src = frame.resolution();

        if src.is_empty() || self.size.is_empty() {
            return;
        }

        let src_pixels = frame.buffer();
        let dst_width = self.size.width as usize;
        let scale_x = f64::from(src.width) / f64::from(self.size.width);
        let scale_y = f64::from(src.height) / f64::from(self.size.height);
        let last_col = src.width as usize - 1;
        let last_row = src.height as usize - 1;

        self.bytes
            .par_chunks_mut(dst_width * BYTES_PER_PIXEL)
            .enumerate()
            .for_each(|(y, row)| {
                let src_y = ((y as f64 * scale_y) as usize).min(last_row);
                let src_row = &src_pixels[src_y * src.width as usize..][..src.width as usize];

                for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                    let src_x = ((x as f64 * scale_x) as usize).min(last_col);
                    pixel.copy_from_slice(&src_row[src_x].to_le_bytes());
                }
            });
    }

    /// Writes one pixel; anything outside the canvas is dropped.
    pub fn plot(&mut self, point: Point, colour: Colour) {
        let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
            return;
        };

        if x >= self.size.width || y >= self.size.height {
            return;
        }

        let offset = (y as usize * self.size.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.bytes[offset..offset + BYTES_PER_PIXEL]
            .copy_from_slice(&colour.to_packed().to_le_bytes());
    }

    /// Bresenham line, both ends inclusive.
    pub fn draw_line(&mut self, from: Point, to: Point, colour: Colour) {
        let (mut x, mut y) = (i64::from(from.x), i64::from(from.y));
        let (x1, y1) = (i64::from(to.x), i64::from(to.y));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let step_x = if x < x1 { 1 } else { -1 };
        let step_y = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if let (Ok(px), Ok(py)) = (i32::try_from(x), i32::try_from(y)) {
                self.plot(Point { x: px, y: py }, colour);
            }

            if x == x1 && y == y1 {
                break;
            }

            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += step_x;
            }
            if doubled <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    pub fn fill_rect(&mut self, rect: MarkerRect, colour: Colour) {
        let size = i32::try_from(rect.size).unwrap_or(i32::MAX);

        for dy in 0..size {
            for dx in 0..size {
                self.plot(
                    Point {
                        x: rect.top_left.x.saturating_add(dx),
                        y: rect.top_left.y.saturating_add(dy),
                    },
                    colour,
                );
            }
        }
    }

    /// Polyline first, then the orbit markers, then the start marker on top.
    pub fn draw_trajectory(&mut self, overlay: &TrajectoryOverlay) {
        for segment in overlay.polyline.windows(2) {
            self.draw_line(segment[0], segment[1], TRAJECTORY_LINE_COLOUR);
        }

        for &marker in &overlay.markers {
            self.fill_rect(marker, TRAJECTORY_MARKER_COLOUR);
        }

        self.fill_rect(overlay.start_marker, TRAJECTORY_MARKER_COLOUR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_at(bytes: &[u8], width: u32, x: u32, y: u32) -> Colour {
        let offset = (y * width + x) as usize * BYTES_PER_PIXEL;
        Colour::new(bytes[offset], bytes[offset + 1], bytes[offset + 2])
    }

    #[test]
    fn fill_sets_every_pixel_opaque() {
        let mut bytes = vec![0; 3 * 2 * BYTES_PER_PIXEL];
        RgbaCanvas::new(&mut bytes, Resolution::new(3, 2)).fill(Colour::new(1, 2, 3));

        for pixel in bytes.chunks_exact(BYTES_PER_PIXEL) {
            assert_eq!(pixel, [1, 2, 3, 255]);
        }
    }

    #[test]
    fn blit_at_same_size_copies_the_frame() {
        let size = Resolution::new(2, 2);
        let colours = [
            Colour::new(255, 0, 0),
            Colour::new(0, 255, 0),
            Colour::new(0, 0, 255),
            Colour::new(255, 255, 255),
        ];
        let frame =
            PixelBuffer::from_data(size, colours.iter().map(|c| c.to_packed()).collect()).unwrap();
        let mut bytes = vec![0; 2 * 2 * BYTES_PER_PIXEL];

        RgbaCanvas::new(&mut bytes, size).blit_scaled(&frame);

        assert_eq!(
            bytes,
            vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 255]
        );
    }

    #[test]
    fn blit_upscales_with_nearest_neighbour() {
        let red = Colour::new(255, 0, 0);
        let blue = Colour::new(0, 0, 255);
        let frame =
            PixelBuffer::from_data(Resolution::new(2, 1), vec![red.to_packed(), blue.to_packed()])
                .unwrap();
        let mut bytes = vec![0; 4 * 2 * BYTES_PER_PIXEL];

        RgbaCanvas::new(&mut bytes, Resolution::new(4, 2)).blit_scaled(&frame);

        for y in 0..2 {
            assert_eq!(pixel_at(&bytes, 4, 0, y), red);
            assert_eq!(pixel_at(&bytes, 4, 1, y), red);
            assert_eq!(pixel_at(&bytes, 4, 2, y), blue);
            assert_eq!(pixel_at(&bytes, 4, 3, y), blue);
        }
    }

    #[test]
    fn plot_ignores_points_outside() {
        let mut bytes = vec![0; 2 * 2 * BYTES_PER_PIXEL];
        let mut canvas = RgbaCanvas::new(&mut bytes, Resolution::new(2, 2));

        canvas.plot(Point { x: -1, y: 0 }, Colour::new(9, 9, 9));
        canvas.plot(Point { x: 2, y: 0 }, Colour::new(9, 9, 9));
        canvas.plot(Point { x: 0, y: 2 }, Colour::new(9, 9, 9));

        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn line_covers_both_endpoints_and_the_diagonal() {
        let mut bytes = vec![0; 5 * 5 * BYTES_PER_PIXEL];
        let colour = Colour::new(7, 8, 9);

        RgbaCanvas::new(&mut bytes, Resolution::new(5, 5)).draw_line(
            Point { x: 0, y: 0 },
            Point { x: 4, y: 4 },
            colour,
        );

        for i in 0..5 {
            assert_eq!(pixel_at(&bytes, 5, i, i), colour);
        }
        assert_eq!(pixel_at(&bytes, 5, 4, 0), Colour::default());
    }

    #[test]
    fn line_is_clipped_at_the_edge() {
        let mut bytes = vec![0; 4 * BYTES_PER_PIXEL];
        let colour = Colour::new(1, 1, 1);

        RgbaCanvas::new(&mut bytes, Resolution::new(4, 1)).draw_line(
            Point { x: -10, y: 0 },
            Point { x: 10, y: 0 },
            colour,
        );

        for x in 0..4 {
            assert_eq!(pixel_at(&bytes, 4, x, 0), colour);
        }
    }

    #[test]
    fn trajectory_draws_line_under_markers() {
        let size = Resolution::new(10, 10);
        let mut bytes = vec![0; size.pixel_count() * BYTES_PER_PIXEL];
        let overlay = TrajectoryOverlay {
            polyline: vec![Point { x: 1, y: 5 }, Point { x: 8, y: 5 }],
            markers: vec![MarkerRect::centred_on(8.0, 5.0, 2)],
            start_marker: MarkerRect::centred_on(1.0, 5.0, 2),
        };

        RgbaCanvas::new(&mut bytes, size).draw_trajectory(&overlay);

        assert_eq!(pixel_at(&bytes, 10, 4, 5), TRAJECTORY_LINE_COLOUR);
        assert_eq!(pixel_at(&bytes, 10, 8, 5), TRAJECTORY_MARKER_COLOUR);
        assert_eq!(pixel_at(&bytes, 10, 0, 4), TRAJECTORY_MARKER_COLOUR);
        assert_eq!(pixel_at(&bytes, 10, 4, 0), Colour::default());
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn mismatched_framebuffer_is_rejected() {
        let mut bytes = vec![0; 3];
        let _ = RgbaCanvas::new(&mut bytes, Resolution::new(1, 1));
    }
}
