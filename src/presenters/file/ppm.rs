use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug, Default)]
pub struct PpmFilePresenter;

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
        if let Some(parent) = filepath.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = BufWriter::new(File::create(filepath)?);
        write_ppm(buffer, &mut file)?;
        file.flush()
    }
}

/// Binary PPM: a `P6` header with width, height and max channel value, then RGB bytes.
pub fn write_ppm<W: Write>(buffer: &PixelBuffer, out: &mut W) -> std::io::Result<()> {
    let resolution = buffer.resolution();

    writeln!(out, "P6")?;
    writeln!(out, "{} {}", resolution.width, resolution.height)?;
    writeln!(out, "255")?;
    out.write_all(&buffer.to_rgb_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::point::Point;
    use crate::core::data::resolution::Resolution;

    #[test]
    fn header_and_pixels_are_written_in_order() {
        let mut buffer = PixelBuffer::new(Resolution::new(2, 1));
        buffer.set_pixel(Point { x: 0, y: 0 }, Colour::new(1, 2, 3)).unwrap();
        buffer.set_pixel(Point { x: 1, y: 0 }, Colour::new(4, 5, 6)).unwrap();

        let mut out = Vec::new();
        write_ppm(&buffer, &mut out).unwrap();

        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(out, expected);
    }

    #[test]
    fn presenter_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("ppm-presenter-{}", std::process::id()));
        let path = dir.join("nested").join("frame.ppm");
        let buffer = PixelBuffer::new(Resolution::new(3, 2));

        PpmFilePresenter::new().present(&buffer, &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(written.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
