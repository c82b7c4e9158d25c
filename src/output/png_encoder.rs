//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate. The figure's dpi is recorded in
//! the `pHYs` chunk so viewers and print tools size the image correctly.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const METERS_PER_INCH: f32 = 0.0254;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P, dpi: f32) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::encode(fb, &mut writer, dpi)?;
        writer.flush()?;
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer, dpi: f32) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(fb, &mut buffer, dpi)?;
        Ok(buffer)
    }

    fn encode<W: Write>(fb: &Framebuffer, out: W, dpi: f32) -> Result<()> {
        let mut encoder = png::Encoder::new(out, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if dpi.is_finite() && dpi > 0.0 {
            let ppm = (dpi / METERS_PER_INCH).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));
        }

        let mut writer = encoder.write_header()?;
        // compact rows drop the SIMD stride padding
        writer.write_image_data(&fb.to_compact_pixels())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        (0..width * height).flat_map(|_| rgb).collect()
    }

    #[test]
    fn test_png_to_bytes() {
        let fb = Framebuffer::from_rgb(10, 10, &solid(10, 10, [255, 0, 0])).unwrap();

        let bytes = PngEncoder::to_bytes(&fb, 100.0).unwrap();
        // PNG magic bytes
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_png_round_trip_keeps_pixels_and_dpi() {
        let mut rgb = solid(4, 3, [255, 255, 255]);
        let blue = (2 * 4 + 1) * 3;
        rgb[blue..blue + 3].copy_from_slice(&[0, 0, 255]);
        let fb = Framebuffer::from_rgb(4, 3, &rgb).unwrap();
        let bytes = PngEncoder::to_bytes(&fb, 100.0).unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let dims = reader.info().pixel_dims.unwrap();
        assert_eq!(dims.xppu, 3937);
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (4, 3));
        let idx = (2 * 4 + 1) * 4;
        assert_eq!(&buf[idx..idx + 4], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let fb = Framebuffer::from_rgb(2, 2, &solid(2, 2, [0, 0, 0])).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        assert!(matches!(
            PngEncoder::write_to_file(&fb, path, 100.0),
            Err(crate::Error::Io(_))
        ));
    }
}
