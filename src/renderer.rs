//! The grid renderer: validate, plan, draw, save.

use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::grid::GridSpec;
use crate::layout::{FigureLayout, FigureSummary};
use crate::output::{self, ImageFormat, PngEncoder};
use crate::panel::SubplotSpec;
use crate::render::{draw_figure, ensure_font};
use log::{debug, info};
use plotters::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Caller-owned record of rendered figures: key to output paths.
pub type ResultRegistry = HashMap<String, Vec<PathBuf>>;

/// Outcome of a successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    /// Written file.
    pub path: PathBuf,
    /// Format of the written file.
    pub format: ImageFormat,
    /// What was drawn.
    pub summary: FigureSummary,
}

impl RenderResult {
    /// Read the written image back as a base64 `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can no longer be read.
    pub fn data_uri(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path)?;
        Ok(output::data_uri(&bytes, self.format))
    }
}

/// Renders a grid of panels to one image file.
///
/// # Example
///
/// ```no_run
/// use gridplot::prelude::*;
/// use std::sync::Arc;
///
/// let table = Arc::new(
///     DataTable::new()
///         .with_column("t", vec![0.0, 1.0, 2.0])?
///         .with_column("v", vec![1.0, 4.0, 9.0])?,
/// );
/// let panel = SubplotSpec::new().series(SeriesConfig::new(table, "t", "v").label("v"));
/// let grid = GridSpec::new(1, 1, "figure.png").titles(["growth"]);
///
/// let result = GridPlotRenderer::new().render(&grid, &[panel])?;
/// assert_eq!(result.summary.panels[0].primary_legend, vec!["v".to_string()]);
/// # Ok::<(), gridplot::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GridPlotRenderer {
    viewer: Option<String>,
}

impl GridPlotRenderer {
    /// Create a renderer that shows figures with the system default viewer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show figures with `app` instead of the system default viewer.
    #[must_use]
    pub fn viewer(mut self, app: impl Into<String>) -> Self {
        self.viewer = Some(app.into());
        self
    }

    /// Render `panels` into the file named by `grid.output`.
    ///
    /// # Errors
    ///
    /// Fails before drawing on invalid configuration, and afterwards on encoding
    /// or I/O errors (including a missing output directory). When `grid.show` is
    /// set, a viewer that cannot be launched is reported as [`Error::Viewer`]
    /// after the file has been written.
    pub fn render(&self, grid: &GridSpec, panels: &[SubplotSpec]) -> Result<RenderResult> {
        let result = save(grid, panels)?;
        if grid.show {
            self.show(&result.path)?;
        }
        Ok(result)
    }

    /// Render, record `{key: [path]}` in `registry`, then show.
    ///
    /// # Errors
    ///
    /// Same as [`GridPlotRenderer::render`]. The registry is untouched when the
    /// figure could not be saved; a viewer failure leaves the entry recorded.
    pub fn render_recorded(
        &self,
        grid: &GridSpec,
        panels: &[SubplotSpec],
        registry: &mut ResultRegistry,
        key: &str,
    ) -> Result<RenderResult> {
        let result = save(grid, panels)?;
        registry.insert(key.to_string(), vec![result.path.clone()]);
        debug!("recorded '{key}' -> {}", result.path.display());
        if grid.show {
            self.show(&result.path)?;
        }
        Ok(result)
    }

    /// Render to encoded bytes without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Same validation and drawing errors as [`GridPlotRenderer::render`].
    pub fn render_to_bytes(
        &self,
        grid: &GridSpec,
        panels: &[SubplotSpec],
        format: ImageFormat,
    ) -> Result<(Vec<u8>, FigureSummary)> {
        grid.validate(panels)?;
        let layout = FigureLayout::plan(grid, panels)?;
        let bytes = match format {
            ImageFormat::Png => PngEncoder::to_bytes(&rasterize(&layout, grid)?, layout.dpi)?,
            ImageFormat::Svg => vector(&layout, grid)?.into_bytes(),
        };
        Ok((bytes, layout.summary()))
    }
}

/// Validate, plan, draw and write the figure.
fn save(grid: &GridSpec, panels: &[SubplotSpec]) -> Result<RenderResult> {
    grid.validate(panels)?;
    let format = ImageFormat::from_path(grid.output())?;
    let layout = FigureLayout::plan(grid, panels)?;
    debug!(
        "planned {}x{} figure: {} panels in a {}x{} grid",
        layout.width,
        layout.height,
        layout.panels.len(),
        grid.nrows,
        grid.ncols
    );

    let path = grid.output().to_path_buf();
    match format {
        ImageFormat::Png => {
            let fb = rasterize(&layout, grid)?;
            PngEncoder::write_to_file(&fb, &path, layout.dpi)?;
        }
        ImageFormat::Svg => output::write_svg(&vector(&layout, grid)?, &path)?,
    }
    info!(
        "saved {}x{} figure with {} panels to {}",
        layout.width,
        layout.height,
        layout.panels.len(),
        path.display()
    );

    Ok(RenderResult { path, format, summary: layout.summary() })
}

fn rasterize(layout: &FigureLayout, grid: &GridSpec) -> Result<Framebuffer> {
    ensure_font()?;
    let (w, h) = (layout.width, layout.height);
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (w, h)).into_drawing_area();
        draw_figure(&root, layout, &grid.theme, grid.overall_title.as_deref())?;
    }
    Framebuffer::from_rgb(w, h, &rgb)
}

fn vector(layout: &FigureLayout, grid: &GridSpec) -> Result<String> {
    ensure_font()?;
    let mut document = String::new();
    {
        let root =
            SVGBackend::with_string(&mut document, (layout.width, layout.height)).into_drawing_area();
        draw_figure(&root, layout, &grid.theme, grid.overall_title.as_deref())?;
    }
    Ok(document)
}

impl GridPlotRenderer {
    fn show(&self, path: &Path) -> Result<()> {
        let launched = match &self.viewer {
            Some(app) => open::with(path, app.as_str()),
            None => open::that(path),
        };
        launched.map_err(|e| Error::Viewer(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;
    use crate::series::SeriesConfig;
    use std::sync::Arc;

    fn panel() -> SubplotSpec {
        let table = Arc::new(
            DataTable::new()
                .with_column("t", vec![0.0, 1.0, 2.0])
                .unwrap()
                .with_column("v", vec![2.0, 0.0, 1.0])
                .unwrap(),
        );
        SubplotSpec::new().series(SeriesConfig::new(table, "t", "v").label("v"))
    }

    #[test]
    fn test_rasterize_leaves_margin_band_blank() {
        let grid = GridSpec::new(1, 1, "unused.png").titles(["A"]).dpi(20.0);
        let layout = FigureLayout::plan(&grid, &[panel()]).unwrap();
        let fb = rasterize(&layout, &grid).unwrap();

        assert_eq!((fb.width(), fb.height()), (200, 100));
        let white = [255u8; 4];
        let rows: Vec<usize> = fb
            .to_compact_pixels()
            .chunks_exact(200 * 4)
            .map(|row| row.chunks_exact(4).filter(|px| *px != white).count())
            .collect();
        let band = layout.title_band.height as usize;
        assert!(rows[..band].iter().all(|&n| n == 0));
        assert!(rows.iter().sum::<usize>() > 0);
    }

    #[test]
    fn test_vector_document() {
        let grid = GridSpec::new(1, 1, "unused.svg").titles(["A"]).dpi(20.0);
        let layout = FigureLayout::plan(&grid, &[panel()]).unwrap();
        let document = vector(&layout, &grid).unwrap();
        assert!(document.contains("<svg"));
        assert!(document.contains("width=\"200\""));
    }

    #[test]
    fn test_render_to_bytes_validates_first() {
        let grid = GridSpec::new(1, 1, "unused.png").dpi(20.0);
        let err = GridPlotRenderer::new()
            .render_to_bytes(&grid, &[panel()], ImageFormat::Png)
            .unwrap_err();
        assert!(matches!(err, Error::PanelCountMismatch { panels: 1, titles: 0 }));
    }
}
