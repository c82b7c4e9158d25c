//! Drawing a planned figure onto a plotters backend.
//!
//! Everything here is generic over [`DrawingBackend`], so the same code writes
//! the in-memory bitmap behind PNG output and the SVG document.
//!
//! Text is set in DejaVu Sans, embedded in the binary and registered once with
//! plotters under the `sans-serif` family.

mod chart2d;
mod chart3d;
mod legend;
mod markers;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::layout::{FigureLayout, Projection};
use crate::theme::{points_to_px, Theme};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use std::sync::OnceLock;

static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

static FONT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

const FONT_FAMILY: &str = "sans-serif";

/// Register the embedded font. Safe to call from any thread, any number of times.
pub(crate) fn ensure_font() -> Result<()> {
    FONT.get_or_init(|| {
        register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
            .map_err(|_| "embedded DejaVu Sans could not be parsed".to_string())
    })
    .clone()
    .map_err(Error::Font)
}

/// Theme values converted to pixels at the figure's dpi.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FigureStyle<'a> {
    pub(crate) theme: &'a Theme,
    pub(crate) dpi: f32,
}

impl FigureStyle<'_> {
    /// Points to pixels.
    pub(crate) fn px(&self, points: f32) -> f32 {
        points_to_px(points, self.dpi)
    }

    pub(crate) fn font(&self, size_pt: f32) -> TextStyle<'static> {
        (FONT_FAMILY, f64::from(self.px(size_pt).max(1.0)))
            .into_font()
            .color(&self.theme.text_color.to_plotters())
    }

    pub(crate) fn stroke(&self, color: Rgba, width_pt: f32) -> ShapeStyle {
        ShapeStyle {
            color: color.to_plotters(),
            filled: false,
            stroke_width: self.px(width_pt).round().max(1.0) as u32,
        }
    }

    pub(crate) fn fill(color: Rgba) -> ShapeStyle {
        ShapeStyle { color: color.to_plotters(), filled: true, stroke_width: 1 }
    }
}

/// Draw every panel and the overall title, then flush the backend.
pub(crate) fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &FigureLayout,
    theme: &Theme,
    overall_title: Option<&str>,
) -> Result<()> {
    let style = FigureStyle { theme, dpi: layout.dpi };
    root.fill(&theme.background.to_plotters()).map_err(Error::plotting)?;

    if let Some(title) = overall_title.filter(|t| !t.is_empty()) {
        let band = layout.title_band;
        let font = style.font(theme.suptitle_size).pos(Pos::new(HPos::Center, VPos::Center));
        let at = band.center();
        root.draw_text(title, &font, (at.x as i32, at.y as i32)).map_err(Error::plotting)?;
    }

    for panel in &layout.panels {
        let cell = panel.cell;
        let area = root.clone().shrink(
            (cell.x.round() as i32, cell.y.round() as i32),
            (cell.width.round() as u32, cell.height.round() as u32),
        );
        match panel.projection {
            Projection::TwoD => chart2d::draw_panel(&area, panel, &style)?,
            Projection::ThreeD => chart3d::draw_panel(&area, panel, &style)?,
        }
    }

    root.present().map_err(Error::plotting)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_registration_is_idempotent() {
        assert!(ensure_font().is_ok());
        assert!(ensure_font().is_ok());
    }

    #[test]
    fn test_style_conversions() {
        let theme = Theme::default();
        let style = FigureStyle { theme: &theme, dpi: 144.0 };
        assert!((style.px(10.0) - 20.0).abs() < 1e-4);
        assert_eq!(style.stroke(Rgba::BLACK, 1.0).stroke_width, 2);
        assert!(FigureStyle::fill(Rgba::RED).filled);
    }
}
