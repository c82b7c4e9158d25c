//! Figure planning.
//!
//! [`FigureLayout::plan`] turns a validated [`GridSpec`] and its panels into
//! everything drawing needs: pixel geometry, transformed series coordinates,
//! axis ranges, colors and legends. Planning touches no drawing backend, so every
//! decision it makes can be inspected through [`FigureSummary`].

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Rect;
use crate::grid::GridSpec;
use crate::panel::{LegendLocation, SubplotSpec};
use crate::scale::{AxisRange, AxisScale};
use crate::series::{DrawKind, LineStyle, Marker, SeriesConfig};
use crate::triangulate::triangulate;
use log::{debug, warn};

/// Fraction of the figure height reserved above the panel grid.
pub const TOP_BAND: f32 = 0.05;

/// Fraction of the figure height reserved below the panel grid.
pub const BOTTOM_BAND: f32 = 0.03;

/// Marker size in points when neither the series nor the grid sets one.
pub const DEFAULT_MARKER_SIZE: f32 = 6.0;

/// Secondary axis label when none is given.
pub const DEFAULT_SECONDARY_LABEL: &str = "Secondary Y-axis";

/// Panel projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Cartesian 2D axes.
    TwoD,
    /// 3D axes.
    ThreeD,
}

/// Which y axis a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    /// The panel's own y axis.
    Primary,
    /// The twin y axis on the right.
    Secondary,
}

/// One resolved axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPlan {
    /// Data placement.
    pub scale: AxisScale,
    /// Visible range in chart coordinates.
    pub range: AxisRange,
    /// Axis label.
    pub label: Option<String>,
}

/// Drawable coordinates of a series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesGeometry {
    /// 2D polyline runs in primary chart coordinates, broken at undrawable values.
    Path(Vec<Vec<(f32, f32)>>),
    /// 3D points in chart coordinates plus triangles indexing them.
    Surface {
        /// `(x, y, z)` per sample.
        points: Vec<(f32, f32, f32)>,
        /// Triangles as index triples, ordered back to front.
        triangles: Vec<[usize; 3]>,
    },
}

/// One series ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPlan {
    /// Legend label, if any.
    pub label: Option<String>,
    /// Target axis.
    pub axis: AxisSide,
    /// Resolved color.
    pub color: Rgba,
    /// Marker drawn at each point.
    pub marker: Option<Marker>,
    /// Marker size in points.
    pub marker_size: f32,
    /// Connecting line style; `Hidden` for scatter.
    pub line_style: LineStyle,
    /// Line width in points.
    pub line_width: f32,
    /// Coordinates.
    pub geometry: SeriesGeometry,
}

/// One legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Entry text.
    pub label: String,
    /// Swatch color.
    pub color: Rgba,
    /// Swatch marker.
    pub marker: Option<Marker>,
    /// Swatch line style.
    pub line_style: LineStyle,
}

/// A legend box attached to one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendPlan {
    /// Axis whose series are listed.
    pub axis: AxisSide,
    /// Resolved anchor (never `Best`).
    pub location: LegendLocation,
    /// Column count.
    pub ncol: usize,
    /// Entries in series order.
    pub entries: Vec<LegendEntry>,
}

/// Everything needed to draw one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelPlan {
    /// Panel index.
    pub index: usize,
    /// Panel title.
    pub title: String,
    /// Cell in figure pixels.
    pub cell: Rect,
    /// Projection.
    pub projection: Projection,
    /// X axis.
    pub x: AxisPlan,
    /// Primary y axis.
    pub y: AxisPlan,
    /// Secondary y axis (2D only).
    pub secondary: Option<AxisPlan>,
    /// Z axis (3D only).
    pub z: Option<AxisPlan>,
    /// Series in draw order.
    pub series: Vec<SeriesPlan>,
    /// Primary legend, then secondary legend.
    pub legends: Vec<LegendPlan>,
    /// Values dropped because a log axis cannot place them.
    pub dropped: usize,
}

impl PanelPlan {
    /// Legend for `axis`, if one is drawn.
    #[must_use]
    pub fn legend(&self, axis: AxisSide) -> Option<&LegendPlan> {
        self.legends.iter().find(|l| l.axis == axis)
    }

    fn summary(&self) -> PanelSummary {
        let labels = |axis| {
            self.legend(axis)
                .map(|l| l.entries.iter().map(|e| e.label.clone()).collect::<Vec<_>>())
                .unwrap_or_default()
        };
        let count = |axis| self.series.iter().filter(|s| s.axis == axis).count();
        PanelSummary {
            title: self.title.clone(),
            projection: self.projection,
            x_scale: self.x.scale,
            y_scale: self.y.scale,
            secondary: self.secondary.as_ref().map(|a| a.scale),
            primary_legend: labels(AxisSide::Primary),
            secondary_legend: labels(AxisSide::Secondary),
            legend_location: self.legend(AxisSide::Primary).map(|l| l.location),
            primary_series: count(AxisSide::Primary),
            secondary_series: count(AxisSide::Secondary),
            dropped_values: self.dropped,
        }
    }
}

/// Planned figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixels per inch.
    pub dpi: f32,
    /// Band holding the overall title.
    pub title_band: Rect,
    /// Area shared by the panel cells.
    pub grid_area: Rect,
    /// Panels in index order.
    pub panels: Vec<PanelPlan>,
}

/// What a render drew, per panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSummary {
    /// Panel title.
    pub title: String,
    /// Projection.
    pub projection: Projection,
    /// X axis scale.
    pub x_scale: AxisScale,
    /// Primary y axis scale.
    pub y_scale: AxisScale,
    /// Secondary y axis scale, when the panel has one.
    pub secondary: Option<AxisScale>,
    /// Primary legend labels.
    pub primary_legend: Vec<String>,
    /// Secondary legend labels.
    pub secondary_legend: Vec<String>,
    /// Where the primary legend went.
    pub legend_location: Option<LegendLocation>,
    /// Series drawn against the primary axis.
    pub primary_series: usize,
    /// Series drawn against the secondary axis.
    pub secondary_series: usize,
    /// Values a log axis could not place.
    pub dropped_values: usize,
}

/// What a render drew.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSummary {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Per-panel summaries.
    pub panels: Vec<PanelSummary>,
}

impl FigureLayout {
    /// Plan a figure. `grid` must already be validated against `panels`.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure size is invalid or a column is missing.
    pub fn plan(grid: &GridSpec, panels: &[SubplotSpec]) -> Result<Self> {
        let (width, height) = grid.pixel_size()?;
        let (w, h) = (width as f32, height as f32);
        let title_band = Rect::new(0.0, 0.0, w, h * TOP_BAND);
        let grid_area = Rect::new(0.0, h * TOP_BAND, w, h * (1.0 - TOP_BAND - BOTTOM_BAND));
        let cells = grid_area.grid(grid.nrows, grid.ncols);

        let panels = panels
            .iter()
            .zip(cells)
            .enumerate()
            .map(|(index, (spec, cell))| {
                let title = grid.subplot_titles.get(index).cloned().unwrap_or_default();
                if grid.three_d {
                    plan_3d(grid, index, title, cell, spec)
                } else {
                    plan_2d(grid, index, title, cell, spec)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { width, height, dpi: grid.dpi, title_band, grid_area, panels })
    }

    /// Summarize the plan.
    #[must_use]
    pub fn summary(&self) -> FigureSummary {
        FigureSummary {
            width: self.width,
            height: self.height,
            panels: self.panels.iter().map(PanelPlan::summary).collect(),
        }
    }
}

/// Split a series into drawable runs, counting values a log axis rejects.
fn trace(
    xs: &[f32],
    ys: &[f32],
    x_scale: AxisScale,
    y_scale: AxisScale,
) -> (Vec<Vec<(f32, f32)>>, usize) {
    let mut runs = Vec::new();
    let mut run = Vec::new();
    let mut dropped = 0;
    for (&x, &y) in xs.iter().zip(ys) {
        match (x_scale.transform(x), y_scale.transform(y)) {
            (Some(cx), Some(cy)) => run.push((cx, cy)),
            _ => {
                let rejected = |v: f32, s: AxisScale| v.is_finite() && s.transform(v).is_none();
                if rejected(x, x_scale) || rejected(y, y_scale) {
                    dropped += 1;
                }
                if !run.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
            }
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
    (runs, dropped)
}

/// Rows reordered by ascending x, ties by y.
fn sorted_by_x(xs: &[f32], ys: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let mut rows: Vec<(f32, f32)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    rows.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    rows.into_iter().unzip()
}

/// Position of `v` within `range`, 0 at `min` and 1 at `max`.
fn fraction(v: f32, range: AxisRange) -> f64 {
    (f64::from(v) - f64::from(range.min)) / f64::from(range.span())
}

/// Map `v` from `from` onto `to`.
fn remap(v: f32, from: AxisRange, to: AxisRange) -> f32 {
    (f64::from(to.min) + fraction(v, from) * f64::from(to.span())) as f32
}

/// Per-axis color cycles.
struct ColorCycles<'a> {
    palette: &'a crate::color::Palette,
    primary: usize,
    secondary: usize,
}

impl ColorCycles<'_> {
    fn next(&mut self, explicit: Option<Rgba>, axis: AxisSide) -> Rgba {
        if let Some(color) = explicit {
            return color;
        }
        let slot = match axis {
            AxisSide::Primary => &mut self.primary,
            AxisSide::Secondary => &mut self.secondary,
        };
        let color = self.palette.get(*slot);
        *slot += 1;
        color
    }
}

fn warn_dropped(index: usize, series: &SeriesConfig, dropped: usize) {
    if dropped > 0 {
        warn!(
            "panel {index}: {dropped} non-positive values of '{}'/'{}' cannot be placed on a log axis",
            series.x_col, series.y_col
        );
    }
}

fn plan_2d(
    grid: &GridSpec,
    index: usize,
    title: String,
    cell: Rect,
    spec: &SubplotSpec,
) -> Result<PanelPlan> {
    let opts = &spec.options;
    let has_secondary = opts.secondary_y;
    let x_scale = AxisScale::from_flag(opts.log_x);
    let (y_scale, sec_scale) = if has_secondary {
        (AxisScale::Linear, AxisScale::from_flag(opts.log_y))
    } else {
        (AxisScale::from_flag(opts.log_y), AxisScale::Linear)
    };
    debug!(
        "panel {index}: x={x_scale:?} y={y_scale:?} secondary={}",
        if has_secondary { format!("{sec_scale:?}") } else { "none".to_string() }
    );

    let mut cycles =
        ColorCycles { palette: &grid.theme.palette, primary: 0, secondary: 0 };
    let mut series = Vec::with_capacity(spec.series.len());
    let mut dropped = 0;

    for s in &spec.series {
        let axis = if s.use_secondary && has_secondary {
            AxisSide::Secondary
        } else {
            AxisSide::Primary
        };
        let scale = if axis == AxisSide::Secondary { sec_scale } else { y_scale };
        let (xs, ys) = (s.table.column(&s.x_col)?, s.table.column(&s.y_col)?);
        let (runs, n_dropped) = if grid.kind == DrawKind::Line && s.sort {
            let (xs, ys) = sorted_by_x(xs, ys);
            trace(&xs, &ys, x_scale, scale)
        } else {
            trace(xs, ys, x_scale, scale)
        };
        warn_dropped(index, s, n_dropped);
        if runs.is_empty() {
            warn!("panel {index}: series '{}'/'{}' has no drawable points", s.x_col, s.y_col);
        }
        dropped += n_dropped;

        let (marker, line_style) = match grid.kind {
            DrawKind::Line => {
                (s.marker.or(grid.default_marker), s.line_style.unwrap_or_default())
            }
            DrawKind::Scatter => (
                Some(s.marker.or(grid.default_marker).unwrap_or(Marker::Circle)),
                LineStyle::Hidden,
            ),
        };

        series.push(SeriesPlan {
            label: s.legend_label().map(str::to_string),
            axis,
            color: cycles.next(s.color, axis),
            marker,
            marker_size: s
                .marker_size
                .or(grid.default_marker_size)
                .unwrap_or(DEFAULT_MARKER_SIZE),
            line_style,
            line_width: s.line_width.unwrap_or(grid.theme.line_width),
            geometry: SeriesGeometry::Path(runs),
        });
    }

    let coords = |side: AxisSide, pick: fn(&(f32, f32)) -> f32| -> Vec<f32> {
        series
            .iter()
            .filter(|s| s.axis == side)
            .flat_map(|s| match &s.geometry {
                SeriesGeometry::Path(runs) => runs.iter().flatten().map(pick).collect::<Vec<f32>>(),
                SeriesGeometry::Surface { .. } => Vec::new(),
            })
            .collect()
    };
    let mut xs = coords(AxisSide::Primary, |p| p.0);
    xs.extend(coords(AxisSide::Secondary, |p| p.0));
    let x_range = AxisRange::covering(&xs);
    let y_range = AxisRange::covering(&coords(AxisSide::Primary, |p| p.1));
    let secondary = has_secondary.then(|| AxisPlan {
        scale: sec_scale,
        range: AxisRange::covering(&coords(AxisSide::Secondary, |p| p.1)),
        label: Some(
            opts.secondary_y_label.clone().unwrap_or_else(|| DEFAULT_SECONDARY_LABEL.to_string()),
        ),
    });

    // secondary series are drawn in primary chart coordinates
    if let Some(sec) = &secondary {
        for s in series.iter_mut().filter(|s| s.axis == AxisSide::Secondary) {
            if let SeriesGeometry::Path(runs) = &mut s.geometry {
                for p in runs.iter_mut().flatten() {
                    p.1 = remap(p.1, sec.range, y_range);
                }
            }
        }
    }

    let x = AxisPlan { scale: x_scale, range: x_range, label: opts.x_label.clone() };
    let y = AxisPlan { scale: y_scale, range: y_range, label: opts.y_label.clone() };

    let secondary_entries = legend_entries(&series, AxisSide::Secondary);
    let mut legends = Vec::new();
    let primary_entries = legend_entries(&series, AxisSide::Primary);
    if !primary_entries.is_empty() {
        let location = match opts.legend_loc {
            LegendLocation::Best => {
                best_location(&series, &x.range, &y.range, !secondary_entries.is_empty())
            }
            loc => loc,
        };
        legends.push(LegendPlan {
            axis: AxisSide::Primary,
            location,
            ncol: opts.legend_ncol.max(1),
            entries: primary_entries,
        });
    }
    if !secondary_entries.is_empty() {
        legends.push(LegendPlan {
            axis: AxisSide::Secondary,
            location: LegendLocation::UpperRight,
            ncol: 1,
            entries: secondary_entries,
        });
    }

    Ok(PanelPlan {
        index,
        title,
        cell,
        projection: Projection::TwoD,
        x,
        y,
        secondary,
        z: None,
        series,
        legends,
        dropped,
    })
}

fn plan_3d(
    grid: &GridSpec,
    index: usize,
    title: String,
    cell: Rect,
    spec: &SubplotSpec,
) -> Result<PanelPlan> {
    let opts = &spec.options;
    let x_scale = AxisScale::from_flag(opts.log_x);
    let y_scale = AxisScale::from_flag(opts.log_y);
    debug!("panel {index}: 3D surface x={x_scale:?} y={y_scale:?}");

    let mut cycles =
        ColorCycles { palette: &grid.theme.palette, primary: 0, secondary: 0 };
    let mut series = Vec::with_capacity(spec.series.len());
    let mut dropped = 0;

    for s in &spec.series {
        let z_col = s.z_col.as_deref().unwrap_or(s.y_col.as_str());
        let xs = s.table.column(&s.x_col)?;
        let ys = s.table.column(&s.y_col)?;
        let zs = s.table.column(z_col)?;

        let mut points = Vec::with_capacity(xs.len());
        let mut n_dropped = 0;
        for ((&x, &y), &z) in xs.iter().zip(ys).zip(zs) {
            match (x_scale.transform(x), y_scale.transform(y), AxisScale::Linear.transform(z)) {
                (Some(cx), Some(cy), Some(cz)) => points.push((cx, cy, cz)),
                _ if x.is_finite() && y.is_finite() && z.is_finite() => n_dropped += 1,
                _ => {}
            }
        }
        warn_dropped(index, s, n_dropped);
        dropped += n_dropped;

        let flat: Vec<(f32, f32)> = points.iter().map(|p| (p.0, p.1)).collect();
        let mut triangles = triangulate(&flat);
        if triangles.is_empty() {
            warn!("panel {index}: series '{}'/'{}' has no surface to draw", s.x_col, s.y_col);
        }
        depth_sort(&points, &mut triangles);

        series.push(SeriesPlan {
            label: s.legend_label().map(str::to_string),
            axis: AxisSide::Primary,
            color: cycles.next(s.color, AxisSide::Primary),
            marker: None,
            marker_size: 0.0,
            line_style: LineStyle::Solid,
            line_width: s.line_width.unwrap_or(grid.theme.line_width),
            geometry: SeriesGeometry::Surface { points, triangles },
        });
    }

    let gather = |pick: fn(&(f32, f32, f32)) -> f32| -> Vec<f32> {
        series
            .iter()
            .flat_map(|s| match &s.geometry {
                SeriesGeometry::Surface { points, .. } => {
                    points.iter().map(pick).collect::<Vec<f32>>()
                }
                SeriesGeometry::Path(_) => Vec::new(),
            })
            .collect()
    };

    let x = AxisPlan {
        scale: x_scale,
        range: AxisRange::covering(&gather(|p| p.0)),
        label: opts.x_label.clone(),
    };
    let y = AxisPlan {
        scale: y_scale,
        range: AxisRange::covering(&gather(|p| p.1)),
        label: opts.y_label.clone(),
    };
    let z = AxisPlan {
        scale: AxisScale::Linear,
        range: AxisRange::covering(&gather(|p| p.2)),
        label: grid.z_label.clone(),
    };

    let entries = legend_entries(&series, AxisSide::Primary);
    let legends = if entries.is_empty() {
        Vec::new()
    } else {
        let location = match opts.legend_loc {
            LegendLocation::Best => LegendLocation::UpperRight,
            loc => loc,
        };
        vec![LegendPlan {
            axis: AxisSide::Primary,
            location,
            ncol: opts.legend_ncol.max(1),
            entries,
        }]
    };

    Ok(PanelPlan {
        index,
        title,
        cell,
        projection: Projection::ThreeD,
        x,
        y,
        secondary: None,
        z: Some(z),
        series,
        legends,
        dropped,
    })
}

/// Order triangles far to near for the default view (largest `y` first).
fn depth_sort(points: &[(f32, f32, f32)], triangles: &mut [[usize; 3]]) {
    let depth = |t: &[usize; 3]| t.iter().map(|&i| points[i].1 - points[i].0).sum::<f32>();
    triangles.sort_by(|a, b| depth(b).total_cmp(&depth(a)));
}

fn legend_entries(series: &[SeriesPlan], axis: AxisSide) -> Vec<LegendEntry> {
    series
        .iter()
        .filter(|s| s.axis == axis)
        .filter_map(|s| {
            s.label.as_ref().map(|label| LegendEntry {
                label: label.clone(),
                color: s.color,
                marker: s.marker,
                line_style: s.line_style,
            })
        })
        .collect()
}

/// Corner of the plot holding the fewest points.
fn best_location(
    series: &[SeriesPlan],
    x: &AxisRange,
    y: &AxisRange,
    secondary_legend: bool,
) -> LegendLocation {
    let mut counts = [0usize; 4];
    for s in series {
        if let SeriesGeometry::Path(runs) = &s.geometry {
            for &(px, py) in runs.iter().flatten() {
                let right = fraction(px, *x) >= 0.5;
                let upper = fraction(py, *y) >= 0.5;
                let slot = match (upper, right) {
                    (true, true) => 0,
                    (true, false) => 1,
                    (false, false) => 2,
                    (false, true) => 3,
                };
                counts[slot] += 1;
            }
        }
    }

    let corners = [
        LegendLocation::UpperRight,
        LegendLocation::UpperLeft,
        LegendLocation::LowerLeft,
        LegendLocation::LowerRight,
    ];
    corners
        .iter()
        .zip(counts)
        .filter(|(loc, _)| !(secondary_legend && **loc == LegendLocation::UpperRight))
        .min_by_key(|(_, n)| *n)
        .map_or(LegendLocation::UpperLeft, |(loc, _)| *loc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;
    use crate::panel::PanelOptions;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn table() -> Arc<DataTable> {
        Arc::new(
            DataTable::new()
                .with_column("t", vec![1.0, 2.0, 3.0, 4.0])
                .unwrap()
                .with_column("up", vec![1.0, 10.0, 100.0, 1000.0])
                .unwrap()
                .with_column("down", vec![4.0, 3.0, 2.0, 1.0])
                .unwrap()
                .with_column("signed", vec![-1.0, 0.0, 10.0, 100.0])
                .unwrap()
                .with_column("z", vec![0.0, 1.0, 0.5, 2.0])
                .unwrap(),
        )
    }

    fn grid(n: usize) -> GridSpec {
        GridSpec::new(1, n, "out.png").titles((0..n).map(|i| format!("p{i}"))).dpi(20.0)
    }

    #[test]
    fn test_band_and_cells() {
        let spec = SubplotSpec::new().series(SeriesConfig::new(table(), "t", "up"));
        let layout = FigureLayout::plan(&grid(2), &[spec.clone(), spec]).unwrap();
        assert_eq!((layout.width, layout.height), (400, 100));
        assert_relative_eq!(layout.grid_area.y, 5.0);
        assert_relative_eq!(layout.grid_area.height, 92.0);
        assert_relative_eq!(layout.panels[1].cell.x, 200.0);
        assert_eq!(layout.panels[1].title, "p1");
    }

    #[test]
    fn test_log_axes_in_summary() {
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "up"))
            .options(PanelOptions::new().log_x(true).log_y(true));
        let summary = FigureLayout::plan(&grid(1), &[spec]).unwrap().summary();
        let p = &summary.panels[0];
        assert_eq!(p.x_scale, AxisScale::Log10);
        assert_eq!(p.y_scale, AxisScale::Log10);
        assert_eq!(p.secondary, None);
    }

    #[test]
    fn test_log_y_moves_to_secondary_axis() {
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "down"))
            .series(SeriesConfig::new(table(), "t", "up").secondary(true))
            .options(PanelOptions::new().log_y(true).secondary_y(true));
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let p = &layout.panels[0];
        assert_eq!(p.y.scale, AxisScale::Linear);
        let sec = p.secondary.as_ref().unwrap();
        assert_eq!(sec.scale, AxisScale::Log10);
        assert_eq!(sec.label.as_deref(), Some(DEFAULT_SECONDARY_LABEL));
        // log10(1..1000) padded
        assert_relative_eq!(sec.range.min, -0.15, epsilon = 1e-5);
        assert_relative_eq!(sec.range.max, 3.15, epsilon = 1e-5);
    }

    #[test]
    fn test_secondary_points_mapped_to_primary_range() {
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "down"))
            .series(SeriesConfig::new(table(), "t", "up").secondary(true))
            .options(PanelOptions::new().secondary_y(true));
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let p = &layout.panels[0];
        let SeriesGeometry::Path(runs) = &p.series[1].geometry else { panic!("expected path") };
        let sec = p.secondary.as_ref().unwrap().range;
        let first = runs[0][0].1;
        assert_relative_eq!(first, remap(1.0, sec, p.y.range), epsilon = 1e-4);
        assert!(first >= p.y.range.min && first <= p.y.range.max);
    }

    #[test]
    fn test_secondary_request_without_axis_lands_on_primary() {
        let spec = SubplotSpec::new().series(SeriesConfig::new(table(), "t", "up").secondary(true));
        let summary = FigureLayout::plan(&grid(1), &[spec]).unwrap().summary();
        assert_eq!(summary.panels[0].primary_series, 1);
        assert_eq!(summary.panels[0].secondary_series, 0);
        assert_eq!(summary.panels[0].secondary, None);
    }

    #[test]
    fn test_log_drops_non_positive_values() {
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "signed"))
            .options(PanelOptions::new().log_y(true));
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let p = &layout.panels[0];
        assert_eq!(p.dropped, 2);
        let SeriesGeometry::Path(runs) = &p.series[0].geometry else { panic!("expected path") };
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 2);
    }

    fn unordered() -> Arc<DataTable> {
        Arc::new(
            DataTable::new()
                .with_column("x", vec![2.0, 0.0, 1.0])
                .unwrap()
                .with_column("y", vec![5.0, 3.0, 4.0])
                .unwrap(),
        )
    }

    fn path_of(grid: &GridSpec, series: SeriesConfig) -> Vec<(f32, f32)> {
        let layout = FigureLayout::plan(grid, &[SubplotSpec::new().series(series)]).unwrap();
        let SeriesGeometry::Path(runs) = &layout.panels[0].series[0].geometry else {
            panic!("expected path")
        };
        runs.concat()
    }

    #[test]
    fn test_line_rows_sorted_by_x() {
        let path = path_of(&grid(1), SeriesConfig::new(unordered(), "x", "y"));
        assert_eq!(path, vec![(0.0, 3.0), (1.0, 4.0), (2.0, 5.0)]);
    }

    #[test]
    fn test_row_order_kept_when_unsorted_or_scatter() {
        let expected = vec![(2.0, 5.0), (0.0, 3.0), (1.0, 4.0)];
        let unsorted = path_of(&grid(1), SeriesConfig::new(unordered(), "x", "y").sort(false));
        assert_eq!(unsorted, expected);

        let scatter = path_of(
            &grid(1).kind(DrawKind::Scatter),
            SeriesConfig::new(unordered(), "x", "y"),
        );
        assert_eq!(scatter, expected);
    }

    #[test]
    fn test_sorted_by_x_breaks_ties_on_y() {
        let (xs, ys) = sorted_by_x(&[1.0, 0.0, 1.0], &[9.0, 5.0, 2.0]);
        assert_eq!(xs, vec![0.0, 1.0, 1.0]);
        assert_eq!(ys, vec![5.0, 2.0, 9.0]);
    }

    #[test]
    fn test_extreme_values_plan_finite_ranges() {
        let t = Arc::new(
            DataTable::new()
                .with_column("x", vec![0.0, 1.0])
                .unwrap()
                .with_column("y", vec![-3e38, 3e38])
                .unwrap()
                .with_column("small", vec![0.0, 1.0])
                .unwrap(),
        );
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(Arc::clone(&t), "x", "small"))
            .series(SeriesConfig::new(t, "x", "y").secondary(true))
            .options(PanelOptions::new().secondary_y(true));
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let p = &layout.panels[0];
        let sec = p.secondary.as_ref().unwrap().range;
        assert!(sec.span().is_finite());

        let SeriesGeometry::Path(runs) = &p.series[1].geometry else { panic!("expected path") };
        assert!(runs.concat().iter().all(|&(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn test_nan_breaks_runs() {
        let t = Arc::new(
            DataTable::new()
                .with_column("x", vec![0.0, 1.0, 2.0, 3.0])
                .unwrap()
                .with_column("y", vec![1.0, f32::NAN, 2.0, 3.0])
                .unwrap(),
        );
        let spec = SubplotSpec::new().series(SeriesConfig::new(t, "x", "y"));
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let SeriesGeometry::Path(runs) = &layout.panels[0].series[0].geometry else {
            panic!("expected path")
        };
        assert_eq!(runs.len(), 2);
        assert_eq!(layout.panels[0].dropped, 0);
    }

    #[test]
    fn test_colors_cycle_per_axis() {
        let theme = &grid(1).theme;
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "up"))
            .series(SeriesConfig::new(table(), "t", "down").color(Rgba::BLACK))
            .series(SeriesConfig::new(table(), "t", "down"))
            .series(SeriesConfig::new(table(), "t", "up").secondary(true))
            .options(PanelOptions::new().secondary_y(true));
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let colors: Vec<Rgba> = layout.panels[0].series.iter().map(|s| s.color).collect();
        assert_eq!(colors[0], theme.palette.get(0));
        assert_eq!(colors[1], Rgba::BLACK);
        assert_eq!(colors[2], theme.palette.get(1));
        assert_eq!(colors[3], theme.palette.get(0));
    }

    #[test]
    fn test_legend_only_for_labelled_series() {
        let unlabelled = SubplotSpec::new().series(SeriesConfig::new(table(), "t", "up"));
        let labelled = SubplotSpec::new().series(SeriesConfig::new(table(), "t", "up").label("up"));
        let summary = FigureLayout::plan(&grid(2), &[unlabelled, labelled]).unwrap().summary();
        assert!(summary.panels[0].primary_legend.is_empty());
        assert_eq!(summary.panels[0].legend_location, None);
        assert_eq!(summary.panels[1].primary_legend, vec!["up".to_string()]);
    }

    #[test]
    fn test_secondary_legend_upper_right() {
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "down").label("a"))
            .series(SeriesConfig::new(table(), "t", "up").label("b").secondary(true))
            .options(PanelOptions::new().secondary_y(true));
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let p = &layout.panels[0];
        let sec = p.legend(AxisSide::Secondary).unwrap();
        assert_eq!(sec.location, LegendLocation::UpperRight);
        assert_ne!(p.legend(AxisSide::Primary).unwrap().location, LegendLocation::UpperRight);
    }

    #[test]
    fn test_best_location_avoids_data() {
        // "up" hugs the bottom until its last point, which sits upper right
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "up").label("up"))
            .options(PanelOptions::new());
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let loc = layout.panels[0].legend(AxisSide::Primary).unwrap().location;
        assert_eq!(loc, LegendLocation::UpperLeft);
    }

    #[test]
    fn test_explicit_legend_location_kept() {
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "up").label("up"))
            .options(PanelOptions::new().legend_loc(LegendLocation::LowerCenter).legend_ncol(2));
        let layout = FigureLayout::plan(&grid(1), &[spec]).unwrap();
        let legend = layout.panels[0].legend(AxisSide::Primary).unwrap();
        assert_eq!(legend.location, LegendLocation::LowerCenter);
        assert_eq!(legend.ncol, 2);
    }

    #[test]
    fn test_scatter_defaults_to_circle_marker() {
        let g = grid(1).kind(DrawKind::Scatter);
        let spec = SubplotSpec::new().series(SeriesConfig::new(table(), "t", "up"));
        let layout = FigureLayout::plan(&g, &[spec]).unwrap();
        let s = &layout.panels[0].series[0];
        assert_eq!(s.marker, Some(Marker::Circle));
        assert_eq!(s.line_style, LineStyle::Hidden);
        assert_relative_eq!(s.marker_size, DEFAULT_MARKER_SIZE);
    }

    #[test]
    fn test_marker_falls_back_to_grid_default() {
        let g = grid(1).default_marker(Marker::Square).default_marker_size(3.0);
        let spec = SubplotSpec::new()
            .series(SeriesConfig::new(table(), "t", "up"))
            .series(SeriesConfig::new(table(), "t", "down").marker(Marker::Plus).marker_size(9.0));
        let layout = FigureLayout::plan(&g, &[spec]).unwrap();
        let s = &layout.panels[0].series;
        assert_eq!(s[0].marker, Some(Marker::Square));
        assert_relative_eq!(s[0].marker_size, 3.0);
        assert_eq!(s[1].marker, Some(Marker::Plus));
        assert_relative_eq!(s[1].marker_size, 9.0);
    }

    #[test]
    fn test_three_d_ignores_secondary_and_markers() {
        let g = grid(1).three_d(Some("height".into())).default_marker(Marker::Square);
        let spec = SubplotSpec::new()
            .series(
                SeriesConfig::new(table(), "t", "down")
                    .z("z")
                    .marker(Marker::Cross)
                    .secondary(true)
                    .label("surface"),
            )
            .options(PanelOptions::new().secondary_y(true));
        let layout = FigureLayout::plan(&g, &[spec]).unwrap();
        let p = &layout.panels[0];
        assert_eq!(p.projection, Projection::ThreeD);
        assert!(p.secondary.is_none());
        assert_eq!(p.series[0].axis, AxisSide::Primary);
        assert_eq!(p.series[0].marker, None);
        assert_eq!(p.z.as_ref().unwrap().label.as_deref(), Some("height"));
        let summary = layout.summary();
        assert_eq!(summary.panels[0].secondary, None);
        assert_eq!(summary.panels[0].primary_legend, vec!["surface".to_string()]);
    }

    #[test]
    fn test_three_d_collinear_has_no_triangles() {
        let g = grid(1).three_d(None);
        let spec = SubplotSpec::new().series(SeriesConfig::new(table(), "t", "down").z("z"));
        let layout = FigureLayout::plan(&g, &[spec]).unwrap();
        let SeriesGeometry::Surface { points, triangles } = &layout.panels[0].series[0].geometry
        else {
            panic!("expected surface")
        };
        assert_eq!(points.len(), 4);
        assert!(triangles.is_empty());
    }

    #[test]
    fn test_best_location_counts_corners() {
        let s = SeriesPlan {
            label: None,
            axis: AxisSide::Primary,
            color: Rgba::BLACK,
            marker: None,
            marker_size: 0.0,
            line_style: LineStyle::Solid,
            line_width: 1.0,
            geometry: SeriesGeometry::Path(vec![vec![(0.9, 0.9), (0.1, 0.9), (0.1, 0.1)]]),
        };
        let r = AxisRange::new(0.0, 1.0);
        assert_eq!(best_location(&[s.clone()], &r, &r, false), LegendLocation::LowerRight);
        assert_eq!(best_location(&[s], &r, &r, true), LegendLocation::LowerRight);
        assert_eq!(best_location(&[], &r, &r, true), LegendLocation::UpperLeft);
    }
}
