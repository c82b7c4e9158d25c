//! Per-series drawing configuration.

use crate::color::Rgba;
use crate::data::DataTable;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Chart function used for every 2D series of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawKind {
    /// Connected line through the points (with optional markers).
    #[default]
    Line,
    /// Unconnected markers.
    Scatter,
}

impl FromStr for DrawKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" | "lineplot" | "plot" => Ok(DrawKind::Line),
            "scatter" | "scatterplot" => Ok(DrawKind::Scatter),
            _ => Err(Error::InvalidOption { kind: "draw kind", value: s.to_string() }),
        }
    }
}

/// Marker shape, parsed from matplotlib marker codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `"o"`
    Circle,
    /// `"."`
    Point,
    /// `"s"`
    Square,
    /// `"^"`
    Triangle,
    /// `"D"` or `"d"`
    Diamond,
    /// `"x"`
    Cross,
    /// `"+"`
    Plus,
}

impl FromStr for Marker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "o" | "circle" => Ok(Marker::Circle),
            "." | "point" => Ok(Marker::Point),
            "s" | "square" => Ok(Marker::Square),
            "^" | "triangle" => Ok(Marker::Triangle),
            "D" | "d" | "diamond" => Ok(Marker::Diamond),
            "x" | "X" | "cross" => Ok(Marker::Cross),
            "+" | "P" | "plus" => Ok(Marker::Plus),
            _ => Err(Error::InvalidOption { kind: "marker", value: s.to_string() }),
        }
    }
}

/// Line dash style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// `"-"`
    #[default]
    Solid,
    /// `"--"`
    Dashed,
    /// `":"`
    Dotted,
    /// `"-."`
    DashDot,
    /// `""` or `"None"`: markers only.
    Hidden,
}

impl LineStyle {
    /// On/off lengths in units of line width (matplotlib's scaled dash patterns).
    #[must_use]
    pub fn pattern(self) -> &'static [f32] {
        match self {
            LineStyle::Solid | LineStyle::Hidden => &[],
            LineStyle::Dashed => &[3.7, 1.6],
            LineStyle::Dotted => &[1.0, 1.65],
            LineStyle::DashDot => &[6.4, 1.6, 1.0, 1.6],
        }
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            "" | " " | "None" | "none" => Ok(LineStyle::Hidden),
            _ => Err(Error::InvalidOption { kind: "line style", value: s.to_string() }),
        }
    }
}

/// One drawable series: columns of a shared table plus styling.
#[derive(Clone)]
pub struct SeriesConfig {
    /// Source table.
    pub table: Arc<DataTable>,
    /// X column name.
    pub x_col: String,
    /// Y column name.
    pub y_col: String,
    /// Z column name (3D figures only).
    pub z_col: Option<String>,
    /// Explicit color; `None` takes the next palette color.
    pub color: Option<Rgba>,
    /// Legend label; `None` or empty keeps the series out of the legend.
    pub label: Option<String>,
    /// Marker; `None` falls back to the figure default.
    pub marker: Option<Marker>,
    /// Marker size in points; `None` falls back to the figure default.
    pub marker_size: Option<f32>,
    /// Dash style for line charts.
    pub line_style: Option<LineStyle>,
    /// Line width in points; `None` uses the theme default.
    pub line_width: Option<f32>,
    /// Draw against the panel's secondary y-axis when it has one.
    pub use_secondary: bool,
    /// Connect line points in ascending x order instead of row order.
    pub sort: bool,
}

impl fmt::Debug for SeriesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesConfig")
            .field("rows", &self.table.n_rows())
            .field("x_col", &self.x_col)
            .field("y_col", &self.y_col)
            .field("z_col", &self.z_col)
            .field("label", &self.label)
            .field("use_secondary", &self.use_secondary)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}

impl SeriesConfig {
    /// Create a series drawing `y_col` against `x_col`.
    #[must_use]
    pub fn new(table: Arc<DataTable>, x_col: impl Into<String>, y_col: impl Into<String>) -> Self {
        Self {
            table,
            x_col: x_col.into(),
            y_col: y_col.into(),
            z_col: None,
            color: None,
            label: None,
            marker: None,
            marker_size: None,
            line_style: None,
            line_width: None,
            use_secondary: false,
            sort: true,
        }
    }

    /// Set the z column (3D surfaces).
    #[must_use]
    pub fn z(mut self, z_col: impl Into<String>) -> Self {
        self.z_col = Some(z_col.into());
        self
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the legend label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Set the marker size in points.
    #[must_use]
    pub fn marker_size(mut self, size: f32) -> Self {
        self.marker_size = Some(size.max(0.0));
        self
    }

    /// Set the dash style.
    #[must_use]
    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    /// Set the line width in points.
    #[must_use]
    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width.max(0.0));
        self
    }

    /// Request the panel's secondary y-axis.
    #[must_use]
    pub fn secondary(mut self, use_secondary: bool) -> Self {
        self.use_secondary = use_secondary;
        self
    }

    /// Choose whether line charts sort points by x (on by default).
    #[must_use]
    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Label if present and non-empty.
    #[must_use]
    pub fn legend_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    /// Check that every referenced column exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] for an absent column, or
    /// [`Error::MissingZColumn`] when `three_d` is set and no z column is given.
    pub fn validate(&self, three_d: bool) -> Result<()> {
        self.table.column(&self.x_col)?;
        self.table.column(&self.y_col)?;
        if three_d {
            let z = self.z_col.as_deref().ok_or_else(|| Error::MissingZColumn {
                x: self.x_col.clone(),
                y: self.y_col.clone(),
            })?;
            self.table.column(z)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Arc<DataTable> {
        Arc::new(
            DataTable::new()
                .with_column("t", vec![0.0, 1.0])
                .unwrap()
                .with_column("v", vec![1.0, 2.0])
                .unwrap(),
        )
    }

    #[test]
    fn test_parse_marker_codes() {
        assert_eq!("o".parse::<Marker>().unwrap(), Marker::Circle);
        assert_eq!("D".parse::<Marker>().unwrap(), Marker::Diamond);
        assert_eq!("+".parse::<Marker>().unwrap(), Marker::Plus);
        assert!("?".parse::<Marker>().is_err());
    }

    #[test]
    fn test_parse_line_styles() {
        assert_eq!("--".parse::<LineStyle>().unwrap(), LineStyle::Dashed);
        assert_eq!("-.".parse::<LineStyle>().unwrap(), LineStyle::DashDot);
        assert_eq!("None".parse::<LineStyle>().unwrap(), LineStyle::Hidden);
        assert!(LineStyle::Solid.pattern().is_empty());
        assert_eq!(LineStyle::DashDot.pattern().len(), 4);
    }

    #[test]
    fn test_parse_draw_kind() {
        assert_eq!("lineplot".parse::<DrawKind>().unwrap(), DrawKind::Line);
        assert_eq!("Scatter".parse::<DrawKind>().unwrap(), DrawKind::Scatter);
        assert!("bar".parse::<DrawKind>().is_err());
    }

    #[test]
    fn test_builder() {
        let s = SeriesConfig::new(table(), "t", "v")
            .label("speed")
            .marker(Marker::Square)
            .marker_size(-3.0)
            .secondary(true);
        assert_eq!(s.legend_label(), Some("speed"));
        assert_eq!(s.marker, Some(Marker::Square));
        assert_eq!(s.marker_size, Some(0.0));
        assert!(s.use_secondary);
    }

    #[test]
    fn test_empty_label_is_not_a_legend_entry() {
        let s = SeriesConfig::new(table(), "t", "v").label("");
        assert_eq!(s.legend_label(), None);
    }

    #[test]
    fn test_validate_columns() {
        assert!(SeriesConfig::new(table(), "t", "v").validate(false).is_ok());
        let err = SeriesConfig::new(table(), "t", "w").validate(false).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { .. }));
    }

    #[test]
    fn test_validate_three_d_needs_z() {
        let s = SeriesConfig::new(table(), "t", "v");
        assert!(matches!(s.validate(true), Err(Error::MissingZColumn { .. })));
        assert!(s.clone().z("v").validate(true).is_ok());
        assert!(matches!(s.z("q").validate(true), Err(Error::MissingColumn { .. })));
    }
}
