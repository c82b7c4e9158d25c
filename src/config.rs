//! Declarative figure descriptions in YAML.
//!
//! A [`FigureConfig`] names CSV tables, the grid, panel options and the series of
//! every panel. [`FigureConfig::resolve`] loads the tables and produces the same
//! [`GridSpec`] and [`SubplotSpec`]s a caller would build by hand.
//!
//! ```yaml
//! tables:
//!   runs: runs.csv
//! grid:
//!   rows: 1
//!   cols: 2
//!   titles: [Loss, Accuracy]
//!   output: training.png
//! panel_options:
//!   x_label: epoch
//!   log_scale_y: [true, false]
//! panels:
//!   - - { table: runs, x: epoch, y: loss, label: train }
//!   - - { table: runs, x: epoch, y: acc, label: train }
//! ```

use crate::color::Rgba;
use crate::data::DataTable;
use crate::error::{Error, Result};
use crate::grid::{GridSpec, DEFAULT_DPI};
use crate::panel::{LegendLocation, PanelAttributes, PerPanel, SubplotSpec};
use crate::series::{DrawKind, LineStyle, Marker, SeriesConfig};
use crate::theme::Theme;
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Grid section.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Grid rows.
    #[serde(default = "default_one")]
    pub rows: usize,

    /// Grid columns.
    #[serde(default = "default_one")]
    pub cols: usize,

    /// One title per panel.
    #[serde(default)]
    pub titles: Vec<String>,

    /// Overall figure title.
    #[serde(default)]
    pub title: Option<String>,

    /// `line` or `scatter`.
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Output file (`.png` or `.svg`).
    pub output: PathBuf,

    /// Theme name.
    #[serde(default = "default_style")]
    pub style: String,

    /// Draw every panel in 3D.
    #[serde(default)]
    pub three_d: bool,

    /// Z axis label for 3D panels.
    #[serde(default)]
    pub z_label: Option<String>,

    /// Default marker code.
    #[serde(default)]
    pub marker: Option<String>,

    /// Default marker size in points.
    #[serde(default)]
    pub markersize: Option<f32>,

    /// Figure size in inches.
    #[serde(default)]
    pub figsize: Option<(f32, f32)>,

    /// Pixels per inch.
    #[serde(default = "default_dpi")]
    pub dpi: f32,

    /// Open the saved figure.
    #[serde(default)]
    pub show: bool,
}

fn default_one() -> usize {
    1
}
fn default_kind() -> String {
    "line".to_string()
}
fn default_style() -> String {
    "whitegrid".to_string()
}
fn default_dpi() -> f32 {
    DEFAULT_DPI
}

/// Panel options, each a scalar for all panels or a list indexed by panel.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelOptionsConfig {
    /// X axis labels.
    #[serde(default)]
    pub x_label: PerPanel<Option<String>>,

    /// Y axis labels.
    #[serde(default)]
    pub y_label: PerPanel<Option<String>>,

    /// Logarithmic x axes.
    #[serde(default)]
    pub log_scale_x: PerPanel<bool>,

    /// Logarithmic y axes.
    #[serde(default)]
    pub log_scale_y: PerPanel<bool>,

    /// Secondary y axes.
    #[serde(default)]
    pub secondary_y: PerPanel<bool>,

    /// Secondary y axis labels.
    #[serde(default)]
    pub secondary_y_label: PerPanel<Option<String>>,

    /// Legend locations (matplotlib names).
    #[serde(default = "default_legend_loc")]
    pub legend_loc: PerPanel<String>,

    /// Legend column counts.
    #[serde(default = "default_legend_ncol")]
    pub legend_ncol: PerPanel<usize>,
}

fn default_legend_loc() -> PerPanel<String> {
    PerPanel::All("best".to_string())
}
fn default_legend_ncol() -> PerPanel<usize> {
    PerPanel::All(1)
}

impl Default for PanelOptionsConfig {
    fn default() -> Self {
        Self {
            x_label: PerPanel::default(),
            y_label: PerPanel::default(),
            log_scale_x: PerPanel::default(),
            log_scale_y: PerPanel::default(),
            secondary_y: PerPanel::default(),
            secondary_y_label: PerPanel::default(),
            legend_loc: default_legend_loc(),
            legend_ncol: default_legend_ncol(),
        }
    }
}

impl PanelOptionsConfig {
    /// Parse legend names into [`PanelAttributes`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for an unknown legend location.
    pub fn to_attributes(&self) -> Result<PanelAttributes> {
        Ok(PanelAttributes {
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            log_x: self.log_scale_x.clone(),
            log_y: self.log_scale_y.clone(),
            secondary_y: self.secondary_y.clone(),
            secondary_y_label: self.secondary_y_label.clone(),
            legend_loc: self.legend_loc.try_map(|s| s.parse::<LegendLocation>())?,
            legend_ncol: self.legend_ncol.clone(),
        })
    }
}

/// One series in a panel.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesEntry {
    /// Table name from `tables`.
    pub table: String,
    /// X column.
    pub x: String,
    /// Y column.
    pub y: String,
    /// Z column (3D).
    #[serde(default)]
    pub z: Option<String>,
    /// Color text.
    #[serde(default)]
    pub color: Option<String>,
    /// Legend label.
    #[serde(default)]
    pub label: Option<String>,
    /// Marker code.
    #[serde(default)]
    pub marker: Option<String>,
    /// Marker size in points.
    #[serde(default)]
    pub markersize: Option<f32>,
    /// Line style code.
    #[serde(default)]
    pub linestyle: Option<String>,
    /// Line width in points.
    #[serde(default)]
    pub linewidth: Option<f32>,
    /// Draw against the secondary axis.
    #[serde(default)]
    pub use_secondary: bool,
    /// Connect line points in ascending x order.
    #[serde(default = "default_sort")]
    pub sort: bool,
}

fn default_sort() -> bool {
    true
}

/// A whole figure.
#[derive(Debug, Clone, Deserialize)]
pub struct FigureConfig {
    /// Table name to CSV path.
    #[serde(default)]
    pub tables: BTreeMap<String, PathBuf>,

    /// Grid section.
    pub grid: GridConfig,

    /// Panel options.
    #[serde(default)]
    pub panel_options: PanelOptionsConfig,

    /// Series lists, one per panel.
    #[serde(default)]
    pub panels: Vec<Vec<SeriesEntry>>,
}

impl FigureConfig {
    /// Load from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML or missing required keys.
    pub fn parse(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load tables and build the grid and panels.
    ///
    /// Relative table and output paths are taken relative to `base_dir` when
    /// one is given.
    ///
    /// # Errors
    ///
    /// Fails on unknown names (style, kind, marker, line style, color, legend
    /// location, table), attribute lists of the wrong length, unreadable CSV
    /// files, and every check of [`GridSpec::validate`].
    pub fn resolve(&self, base_dir: Option<&Path>) -> Result<(GridSpec, Vec<SubplotSpec>)> {
        let locate = |p: &Path| match base_dir {
            Some(dir) if p.is_relative() => dir.join(p),
            _ => p.to_path_buf(),
        };

        let g = &self.grid;
        let mut grid = GridSpec::new(g.rows, g.cols, locate(&g.output))
            .titles(g.titles.iter().cloned())
            .kind(g.kind.parse::<DrawKind>()?)
            .theme(Theme::by_name(&g.style)?)
            .show(g.show)
            .dpi(g.dpi);
        grid.overall_title = g.title.clone();
        grid.figsize = g.figsize;
        if g.three_d {
            grid = grid.three_d(g.z_label.clone());
        }
        if let Some(marker) = &g.marker {
            grid = grid.default_marker(marker.parse::<Marker>()?);
        }
        if let Some(size) = g.markersize {
            grid = grid.default_marker_size(size);
        }

        let options = self
            .panel_options
            .to_attributes()?
            .resolve_all(self.panels.len(), grid.capacity())?;

        let mut tables: HashMap<&str, Arc<DataTable>> = HashMap::new();
        for (name, path) in &self.tables {
            let table = DataTable::from_csv(locate(path))?;
            debug!("loaded table '{name}': {} rows, {} columns", table.n_rows(), table.n_cols());
            tables.insert(name.as_str(), Arc::new(table));
        }

        let panels = self
            .panels
            .iter()
            .zip(options)
            .map(|(entries, opts)| {
                let mut spec = SubplotSpec::new().options(opts);
                for entry in entries {
                    spec = spec.series(entry.to_series(&tables)?);
                }
                Ok(spec)
            })
            .collect::<Result<Vec<_>>>()?;

        grid.validate(&panels)?;
        Ok((grid, panels))
    }
}

impl SeriesEntry {
    fn to_series(&self, tables: &HashMap<&str, Arc<DataTable>>) -> Result<SeriesConfig> {
        let table = tables
            .get(self.table.as_str())
            .cloned()
            .ok_or_else(|| Error::UnknownTable(self.table.clone()))?;

        let mut series = SeriesConfig::new(table, self.x.as_str(), self.y.as_str())
            .secondary(self.use_secondary)
            .sort(self.sort);
        if let Some(z) = &self.z {
            series = series.z(z.as_str());
        }
        if let Some(color) = &self.color {
            series = series.color(Rgba::parse(color)?);
        }
        if let Some(label) = &self.label {
            series = series.label(label.as_str());
        }
        if let Some(marker) = &self.marker {
            series = series.marker(marker.parse::<Marker>()?);
        }
        if let Some(size) = self.markersize {
            series = series.marker_size(size);
        }
        if let Some(style) = &self.linestyle {
            series = series.line_style(style.parse::<LineStyle>()?);
        }
        if let Some(width) = self.linewidth {
            series = series.line_width(width);
        }
        Ok(series)
    }
}

/// Load a YAML figure file and resolve it relative to the file's directory.
///
/// # Errors
///
/// See [`FigureConfig::load`] and [`FigureConfig::resolve`].
pub fn load_figure(path: impl AsRef<Path>) -> Result<(GridSpec, Vec<SubplotSpec>)> {
    let path = path.as_ref();
    let config = FigureConfig::load(path)?;
    config.resolve(path.parent())
}
