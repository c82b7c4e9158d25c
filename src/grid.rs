//! Figure-level configuration.

use crate::error::{Error, Result};
use crate::panel::SubplotSpec;
use crate::series::{DrawKind, Marker};
use crate::theme::Theme;
use std::path::{Path, PathBuf};

/// Default resolution in pixels per inch.
pub const DEFAULT_DPI: f32 = 100.0;

/// Width of one grid column in inches.
pub const INCHES_PER_COL: f32 = 10.0;

/// Height of one grid row in inches.
pub const INCHES_PER_ROW: f32 = 5.0;

/// Grid shape, titles, output and figure-wide defaults.
///
/// # Example
///
/// ```
/// use gridplot::grid::GridSpec;
///
/// let grid = GridSpec::new(1, 2, "out.png").titles(["left", "right"]).overall_title("Run 7");
/// assert_eq!(grid.figure_size(), (20.0, 5.0));
/// ```
#[derive(Debug, Clone)]
pub struct GridSpec {
    /// Number of grid rows.
    pub nrows: usize,
    /// Number of grid columns.
    pub ncols: usize,
    /// One title per panel.
    pub subplot_titles: Vec<String>,
    /// Title drawn across the top of the figure.
    pub overall_title: Option<String>,
    /// Chart function for 2D series.
    pub kind: DrawKind,
    /// Output file; the extension selects the format.
    pub output: PathBuf,
    /// Non-data appearance.
    pub theme: Theme,
    /// Open the saved file in the platform viewer.
    pub show: bool,
    /// Draw every panel as a 3D surface.
    pub three_d: bool,
    /// Z axis label for 3D panels.
    pub z_label: Option<String>,
    /// Marker for series that do not set one.
    pub default_marker: Option<Marker>,
    /// Marker size in points for series that do not set one.
    pub default_marker_size: Option<f32>,
    /// Figure size override in inches.
    pub figsize: Option<(f32, f32)>,
    /// Pixels per inch.
    pub dpi: f32,
}

impl GridSpec {
    /// Create a grid writing to `output`.
    #[must_use]
    pub fn new(nrows: usize, ncols: usize, output: impl Into<PathBuf>) -> Self {
        Self {
            nrows,
            ncols,
            subplot_titles: Vec::new(),
            overall_title: None,
            kind: DrawKind::Line,
            output: output.into(),
            theme: Theme::default(),
            show: false,
            three_d: false,
            z_label: None,
            default_marker: None,
            default_marker_size: None,
            figsize: None,
            dpi: DEFAULT_DPI,
        }
    }

    /// Set the panel titles.
    #[must_use]
    pub fn titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subplot_titles = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Set the overall title.
    #[must_use]
    pub fn overall_title(mut self, title: impl Into<String>) -> Self {
        self.overall_title = Some(title.into());
        self
    }

    /// Set the draw kind.
    #[must_use]
    pub fn kind(mut self, kind: DrawKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Open the result in the platform viewer after saving.
    #[must_use]
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Switch every panel to a 3D projection.
    #[must_use]
    pub fn three_d(mut self, z_label: Option<String>) -> Self {
        self.three_d = true;
        self.z_label = z_label;
        self
    }

    /// Set the default marker.
    #[must_use]
    pub fn default_marker(mut self, marker: Marker) -> Self {
        self.default_marker = Some(marker);
        self
    }

    /// Set the default marker size in points.
    #[must_use]
    pub fn default_marker_size(mut self, size: f32) -> Self {
        self.default_marker_size = Some(size.max(0.0));
        self
    }

    /// Override the figure size in inches.
    #[must_use]
    pub fn figsize(mut self, width: f32, height: f32) -> Self {
        self.figsize = Some((width, height));
        self
    }

    /// Set the resolution.
    #[must_use]
    pub fn dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Output path.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Number of grid cells.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nrows * self.ncols
    }

    /// Figure size in inches: the override, or 10 per column by 5 per row.
    #[must_use]
    pub fn figure_size(&self) -> (f32, f32) {
        self.figsize.unwrap_or((
            INCHES_PER_COL * self.ncols as f32,
            INCHES_PER_ROW * self.nrows as f32,
        ))
    }

    /// Figure size in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either side rounds to zero.
    pub fn pixel_size(&self) -> Result<(u32, u32)> {
        let (w, h) = self.figure_size();
        let to_px = |inches: f32| {
            let px = (inches * self.dpi).round();
            if px.is_finite() && px >= 1.0 {
                px.min(u32::MAX as f32) as u32
            } else {
                0
            }
        };
        let (width, height) = (to_px(w), to_px(h));
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok((width, height))
    }

    /// Check the grid against its panels before anything is drawn.
    ///
    /// # Errors
    ///
    /// Fails on an empty grid shape, a title count that differs from the panel
    /// count, more panels than cells, or a series referencing a missing column.
    pub fn validate(&self, panels: &[SubplotSpec]) -> Result<()> {
        if self.nrows == 0 || self.ncols == 0 {
            return Err(Error::InvalidDimensions {
                width: self.ncols as u32,
                height: self.nrows as u32,
            });
        }
        if panels.len() != self.subplot_titles.len() {
            return Err(Error::PanelCountMismatch {
                panels: panels.len(),
                titles: self.subplot_titles.len(),
            });
        }
        if panels.len() > self.capacity() {
            return Err(Error::TooManyPanels {
                panels: panels.len(),
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        self.pixel_size()?;
        for panel in panels {
            for series in &panel.series {
                series.validate(self.three_d)?;
            }
        }
        Ok(())
    }
}
