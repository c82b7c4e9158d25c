//! Output formats and encoders (PNG, SVG, data URIs).

mod png_encoder;

pub use png_encoder::PngEncoder;

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;

/// Image format, chosen from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raster PNG.
    Png,
    /// Vector SVG.
    Svg,
}

impl ImageFormat {
    /// Format for `path`'s extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// MIME type.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

/// Encode image bytes as a `data:` URI for inline HTML embedding.
#[must_use]
pub fn data_uri(bytes: &[u8], format: ImageFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// Write an SVG document.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_svg<P: AsRef<Path>>(document: &str, path: P) -> Result<()> {
    std::fs::write(path, document)?;
    Ok(())
}
