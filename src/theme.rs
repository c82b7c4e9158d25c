//! Figure themes.
//!
//! A [`Theme`] controls the non-data appearance of a figure. It is a plain value
//! carried by the [`GridSpec`](crate::grid::GridSpec), so rendering one figure
//! never changes how another is drawn. The named constructors follow seaborn's
//! five styles.

use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};

/// seaborn's "EAEAF2" panel tint used by the dark styles.
const SEABORN_PANEL: Rgba = Rgba::rgb(234, 234, 242);
/// seaborn's ".15" text and spine grey.
const SEABORN_INK: Rgba = Rgba::rgb(38, 38, 38);
/// seaborn's ".8" light grey.
const SEABORN_LIGHT: Rgba = Rgba::rgb(204, 204, 204);

/// Theme specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Style name this theme was built from.
    pub name: String,
    /// Figure background color.
    pub background: Rgba,
    /// Panel (axes) background color.
    pub panel_background: Rgba,
    /// Grid line color.
    pub grid_color: Rgba,
    /// Axis line and tick color.
    pub axis_color: Rgba,
    /// Text color.
    pub text_color: Rgba,
    /// Show grid lines.
    pub show_grid: bool,
    /// Draw a frame around each panel.
    pub show_panel_border: bool,
    /// Color cycle for series without an explicit color.
    pub palette: Palette,
    /// Default series line width in points.
    pub line_width: f32,
    /// Figure title size in points.
    pub suptitle_size: f32,
    /// Panel title size in points.
    pub title_size: f32,
    /// Axis label size in points.
    pub label_size: f32,
    /// Tick label size in points.
    pub tick_size: f32,
    /// Legend text size in points.
    pub legend_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::whitegrid()
    }
}

impl Theme {
    fn base(name: &str) -> Self {
        Self {
            name: name.to_string(),
            background: Rgba::WHITE,
            panel_background: Rgba::WHITE,
            grid_color: SEABORN_LIGHT,
            axis_color: SEABORN_INK,
            text_color: SEABORN_INK,
            show_grid: false,
            show_panel_border: true,
            palette: Palette::tab10(),
            line_width: 1.5,
            suptitle_size: 14.0,
            title_size: 12.0,
            label_size: 11.0,
            tick_size: 10.0,
            legend_size: 10.0,
        }
    }

    /// White panels with light grid lines (seaborn's default style).
    #[must_use]
    pub fn whitegrid() -> Self {
        Self { show_grid: true, axis_color: SEABORN_LIGHT, ..Self::base("whitegrid") }
    }

    /// Tinted panels with white grid lines.
    #[must_use]
    pub fn darkgrid() -> Self {
        Self {
            panel_background: SEABORN_PANEL,
            grid_color: Rgba::WHITE,
            show_grid: true,
            show_panel_border: false,
            ..Self::base("darkgrid")
        }
    }

    /// White panels, no grid.
    #[must_use]
    pub fn white() -> Self {
        Self::base("white")
    }

    /// Tinted panels, no grid.
    #[must_use]
    pub fn dark() -> Self {
        Self { panel_background: SEABORN_PANEL, show_panel_border: false, ..Self::base("dark") }
    }

    /// White panels with a dark frame and ticks.
    #[must_use]
    pub fn ticks() -> Self {
        Self::base("ticks")
    }

    /// Look up a theme by seaborn style name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStyle`] for any other name.
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "whitegrid" => Ok(Self::whitegrid()),
            "darkgrid" => Ok(Self::darkgrid()),
            "white" => Ok(Self::white()),
            "dark" => Ok(Self::dark()),
            "ticks" => Ok(Self::ticks()),
            _ => Err(Error::UnknownStyle(name.to_string())),
        }
    }

    /// Replace the color cycle.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the figure background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Enable or disable grid lines.
    #[must_use]
    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Set the default series line width in points.
    #[must_use]
    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = width.max(0.1);
        self
    }
}

/// Convert a size in points to pixels at `dpi`.
#[must_use]
pub fn points_to_px(points: f32, dpi: f32) -> f32 {
    points * dpi / 72.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_whitegrid() {
        let t = Theme::default();
        assert_eq!(t.name, "whitegrid");
        assert!(t.show_grid);
        assert_eq!(t.panel_background, Rgba::WHITE);
    }

    #[test]
    fn test_by_name_all_styles() {
        for name in ["whitegrid", "darkgrid", "white", "dark", "ticks"] {
            assert_eq!(Theme::by_name(name).unwrap().name, name);
        }
        assert_eq!(Theme::by_name(" DarkGrid ").unwrap().name, "darkgrid");
    }

    #[test]
    fn test_unknown_style() {
        assert!(matches!(Theme::by_name("ggplot"), Err(Error::UnknownStyle(_))));
    }

    #[test]
    fn test_dark_styles_tint_panels() {
        assert_eq!(Theme::darkgrid().panel_background, SEABORN_PANEL);
        assert_eq!(Theme::dark().panel_background, SEABORN_PANEL);
        assert!(!Theme::dark().show_grid);
        assert!(!Theme::white().show_grid);
    }

    #[test]
    fn test_customization() {
        let t = Theme::white().grid(true).line_width(0.0).background(Rgba::BLACK);
        assert!(t.show_grid);
        assert!((t.line_width - 0.1).abs() < 1e-6);
        assert_eq!(t.background, Rgba::BLACK);
    }

    #[test]
    fn test_themes_are_independent_values() {
        let a = Theme::whitegrid();
        let b = a.clone().palette(Palette::deep());
        assert_eq!(a.palette, Palette::tab10());
        assert_eq!(b.palette, Palette::deep());
    }

    #[test]
    fn test_points_to_px() {
        assert!((points_to_px(72.0, 100.0) - 100.0).abs() < 1e-4);
    }
}
