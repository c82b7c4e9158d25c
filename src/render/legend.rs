//! Framed legends with line and marker swatches.

use super::markers::draw_marker;
use super::FigureStyle;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::layout::LegendPlan;
use crate::panel::LegendLocation;
use crate::series::LineStyle;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Top-left corner of a `size` box anchored at `loc` inside an `area`, kept
/// `inset` pixels from the edges it touches.
pub(super) fn anchor(loc: LegendLocation, area: (u32, u32), size: (u32, u32), inset: i32) -> (i32, i32) {
    let (aw, ah) = (area.0 as i32, area.1 as i32);
    let (bw, bh) = (size.0 as i32, size.1 as i32);
    let left = inset;
    let right = aw - bw - inset;
    let hmid = (aw - bw) / 2;
    let top = inset;
    let bottom = ah - bh - inset;
    let vmid = (ah - bh) / 2;

    match loc {
        LegendLocation::Best | LegendLocation::UpperRight => (right, top),
        LegendLocation::UpperLeft => (left, top),
        LegendLocation::LowerLeft => (left, bottom),
        LegendLocation::LowerRight => (right, bottom),
        LegendLocation::Right | LegendLocation::CenterRight => (right, vmid),
        LegendLocation::CenterLeft => (left, vmid),
        LegendLocation::LowerCenter => (hmid, bottom),
        LegendLocation::UpperCenter => (hmid, top),
        LegendLocation::Center => (hmid, vmid),
    }
}

/// Entry `i` of `n` laid out column-major into `ncol` columns: `(column, row)`.
pub(super) fn slot(i: usize, n: usize, ncol: usize) -> (usize, usize) {
    let nrows = n.div_ceil(ncol.max(1)).max(1);
    (i / nrows, i % nrows)
}

pub(super) fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    legend: &LegendPlan,
    style: &FigureStyle<'_>,
) -> Result<()> {
    let n = legend.entries.len();
    if n == 0 {
        return Ok(());
    }
    let ncol = legend.ncol.clamp(1, n);
    let nrows = n.div_ceil(ncol);

    let font = style.font(style.theme.legend_size);
    let em = style.px(style.theme.legend_size).max(1.0);
    let pad = (0.4 * em).round() as i32;
    let swatch = (2.0 * em).round() as i32;
    let gap = (0.6 * em).round() as i32;
    let row_h = (1.4 * em).round() as i32;

    let mut text = Vec::with_capacity(n);
    for entry in &legend.entries {
        text.push(area.estimate_text_size(&entry.label, &font).map_err(Error::plotting)?);
    }

    let mut col_w = vec![0i32; ncol];
    for (i, (w, _)) in text.iter().enumerate() {
        let (c, _) = slot(i, n, ncol);
        col_w[c] = col_w[c].max(swatch + gap + *w as i32);
    }
    let box_w = col_w.iter().sum::<i32>() + gap * (ncol as i32 - 1) + 2 * pad;
    let box_h = row_h * nrows as i32 + 2 * pad;

    let (x0, y0) =
        anchor(legend.location, area.dim_in_pixel(), (box_w as u32, box_h as u32), pad);

    let frame_fill = style.theme.panel_background.with_alpha(204);
    area.draw(&Rectangle::new([(x0, y0), (x0 + box_w, y0 + box_h)], FigureStyle::fill(frame_fill)))
        .map_err(Error::plotting)?;
    area.draw(&Rectangle::new(
        [(x0, y0), (x0 + box_w, y0 + box_h)],
        style.stroke(Rgba::rgb(204, 204, 204), 0.8),
    ))
    .map_err(Error::plotting)?;

    for (i, entry) in legend.entries.iter().enumerate() {
        let (c, r) = slot(i, n, ncol);
        let cx = x0 + pad + col_w[..c].iter().sum::<i32>() + gap * c as i32;
        let cy = y0 + pad + row_h * r as i32;
        let mid = cy + row_h / 2;

        if entry.line_style != LineStyle::Hidden {
            area.draw(&PathElement::new(
                vec![(cx, mid), (cx + swatch, mid)],
                style.stroke(entry.color, style.theme.line_width),
            ))
            .map_err(Error::plotting)?;
        }
        if let Some(marker) = entry.marker {
            let size = style.px(6.0);
            draw_marker(area, marker, (cx + swatch / 2, mid), size, entry.color)?;
        }

        let (_, th) = text[i];
        area.draw_text(&entry.label, &font, (cx + swatch + gap, mid - th as i32 / 2))
            .map_err(Error::plotting)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_corners() {
        let area = (200, 100);
        let size = (50, 20);
        assert_eq!(anchor(LegendLocation::UpperLeft, area, size, 4), (4, 4));
        assert_eq!(anchor(LegendLocation::UpperRight, area, size, 4), (146, 4));
        assert_eq!(anchor(LegendLocation::LowerLeft, area, size, 4), (4, 76));
        assert_eq!(anchor(LegendLocation::LowerRight, area, size, 4), (146, 76));
    }

    #[test]
    fn test_anchor_centres() {
        let area = (200, 100);
        let size = (50, 20);
        assert_eq!(anchor(LegendLocation::Center, area, size, 4), (75, 40));
        assert_eq!(anchor(LegendLocation::UpperCenter, area, size, 4), (75, 4));
        assert_eq!(anchor(LegendLocation::Right, area, size, 4), (146, 40));
        assert_eq!(anchor(LegendLocation::CenterLeft, area, size, 4), (4, 40));
    }

    #[test]
    fn test_slots_fill_columns_first() {
        // 5 entries in 2 columns: 3 rows, column-major
        assert_eq!(slot(0, 5, 2), (0, 0));
        assert_eq!(slot(2, 5, 2), (0, 2));
        assert_eq!(slot(3, 5, 2), (1, 0));
        assert_eq!(slot(4, 5, 2), (1, 1));
        assert_eq!(slot(1, 2, 1), (0, 1));
    }
}
