//! Triangulated surface panels.
//!
//! plotters draws 3D charts with `y` as the vertical axis, so data `(x, y, z)` is
//! handed over as `(x, z, y)`.

use super::legend::draw_legend;
use super::FigureStyle;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::layout::{PanelPlan, SeriesGeometry};
use crate::scale::{AxisRange, AxisScale};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const YAW: f64 = 0.6;
const PITCH: f64 = 0.35;
const SCALE: f64 = 0.85;

/// Fill color of a facet whose mean height sits at `t` (0 low, 1 high).
pub(super) fn facet_color(base: Rgba, t: f32) -> Rgba {
    let low = base.lerp(Rgba::BLACK, 0.35);
    let high = base.lerp(Rgba::WHITE, 0.35);
    low.lerp(high, t)
}

pub(super) fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plan: &PanelPlan,
    style: &FigureStyle<'_>,
) -> Result<()> {
    let theme = style.theme;
    let z_range = plan.z.as_ref().map_or(AxisRange::new(0.0, 1.0), |z| z.range);

    let mut builder = ChartBuilder::on(area);
    builder.margin(style.px(12.0).round() as u32);
    if !plan.title.is_empty() {
        builder.caption(&plan.title, style.font(theme.title_size));
    }
    let mut chart = builder
        .build_cartesian_3d(plan.x.range.as_range(), z_range.as_range(), plan.y.range.as_range())
        .map_err(Error::plotting)?;
    chart.with_projection(|mut pb| {
        pb.yaw = YAW;
        pb.pitch = PITCH;
        pb.scale = SCALE;
        pb.into_matrix()
    });

    let x_fmt = |v: &f32| plan.x.scale.format_tick(*v);
    let up_fmt = |v: &f32| AxisScale::Linear.format_tick(*v);
    let depth_fmt = |v: &f32| plan.y.scale.format_tick(*v);
    chart
        .configure_axes()
        .label_style(style.font(theme.tick_size))
        .bold_grid_style(style.stroke(theme.grid_color, 0.8))
        .light_grid_style(style.stroke(Rgba::TRANSPARENT, 0.0))
        .axis_panel_style(FigureStyle::fill(theme.panel_background.with_alpha(128)))
        .max_light_lines(1)
        .x_formatter(&x_fmt)
        .y_formatter(&up_fmt)
        .z_formatter(&depth_fmt)
        .draw()
        .map_err(Error::plotting)?;

    for series in &plan.series {
        let SeriesGeometry::Surface { points, triangles } = &series.geometry else {
            continue;
        };
        chart
            .draw_series(triangles.iter().map(|t| {
                let verts: Vec<(f32, f32, f32)> = t
                    .iter()
                    .map(|&i| {
                        let (x, y, z) = points[i];
                        (x, z, y)
                    })
                    .collect();
                let mean = t.iter().map(|&i| points[i].2).sum::<f32>() / 3.0;
                let shade = ((mean - z_range.min) / z_range.span()).clamp(0.0, 1.0);
                Polygon::new(verts, FigureStyle::fill(facet_color(series.color, shade)))
            }))
            .map_err(Error::plotting)?;
    }

    draw_axis_labels(area, plan, style)?;

    let plotting = chart.plotting_area().strip_coord_spec();
    for legend in &plan.legends {
        draw_legend(&plotting, legend, style)?;
    }
    Ok(())
}

/// plotters has no axis titles for 3D charts; place them around the panel.
fn draw_axis_labels<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plan: &PanelPlan,
    style: &FigureStyle<'_>,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let edge = style.px(4.0).round() as i32;
    let font = style.font(style.theme.label_size);

    let labels = [
        (plan.x.label.as_deref(), (w / 2, h - edge), Pos::new(HPos::Center, VPos::Bottom)),
        (plan.y.label.as_deref(), (w - edge, h - edge), Pos::new(HPos::Right, VPos::Bottom)),
        (
            plan.z.as_ref().and_then(|z| z.label.as_deref()),
            (edge, h / 2),
            Pos::new(HPos::Left, VPos::Center),
        ),
    ];
    for (text, at, pos) in labels {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            area.draw_text(text, &font.pos(pos), at).map_err(Error::plotting)?;
        }
    }
    Ok(())
}
