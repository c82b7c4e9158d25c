//! Marker glyphs drawn in pixel space.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::series::Marker;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Draw `marker` centred on pixel `at` of `area`, `size_px` across.
pub(super) fn draw_marker<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    marker: Marker,
    at: (i32, i32),
    size_px: f32,
    color: Rgba,
) -> Result<()> {
    let (x, y) = at;
    let r = (size_px / 2.0).round().max(1.0) as i32;
    let fill = ShapeStyle { color: color.to_plotters(), filled: true, stroke_width: 1 };
    let stroke = ShapeStyle {
        color: color.to_plotters(),
        filled: false,
        stroke_width: (size_px / 6.0).round().max(1.0) as u32,
    };

    match marker {
        Marker::Circle => area.draw(&Circle::new(at, r, fill)),
        Marker::Point => area.draw(&Circle::new(at, (r / 2).max(1), fill)),
        Marker::Square => area.draw(&Rectangle::new([(x - r, y - r), (x + r, y + r)], fill)),
        Marker::Triangle => area.draw(&TriangleMarker::new(at, r, fill)),
        Marker::Diamond => {
            area.draw(&Polygon::new(vec![(x, y - r), (x + r, y), (x, y + r), (x - r, y)], fill))
        }
        Marker::Cross => area.draw(&Cross::new(at, r, stroke)),
        Marker::Plus => area
            .draw(&PathElement::new(vec![(x - r, y), (x + r, y)], stroke))
            .and_then(|()| area.draw(&PathElement::new(vec![(x, y - r), (x, y + r)], stroke))),
    }
    .map_err(Error::plotting)
}
