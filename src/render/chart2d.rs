//! Cartesian panels with an optional twin y axis.

use super::legend::draw_legend;
use super::markers::draw_marker;
use super::FigureStyle;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{dash_polyline, Point};
use crate::layout::{AxisPlan, PanelPlan, SeriesGeometry};
use crate::series::LineStyle;
use plotters::coord::combinators::WithKeyPoints;
use plotters::coord::types::RangedCoordf32;
use plotters::coord::Shift;
use plotters::prelude::*;

type Axis = WithKeyPoints<RangedCoordf32>;
type Chart2d = Cartesian2d<Axis, Axis>;

/// Axis spec ticked where the plan's scale puts its ticks.
fn axis(plan: &AxisPlan) -> Axis {
    plan.range.as_range().with_key_points(plan.scale.ticks(plan.range))
}

const MAX_TICKS: usize = 12;

/// Label area sizes in pixels: (x axis, y axis).
fn label_areas(style: &FigureStyle<'_>) -> (u32, u32) {
    let tick = style.px(style.theme.tick_size);
    let label = style.px(style.theme.label_size);
    ((tick * 1.8 + label * 1.8).round() as u32, (tick * 4.5 + label * 1.8).round() as u32)
}

pub(super) fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plan: &PanelPlan,
    style: &FigureStyle<'_>,
) -> Result<()> {
    let theme = style.theme;
    let (x_area, y_area) = label_areas(style);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(style.px(10.0).round() as u32)
        .x_label_area_size(x_area)
        .y_label_area_size(y_area);
    if plan.secondary.is_some() {
        builder.right_y_label_area_size(y_area);
    }
    if !plan.title.is_empty() {
        builder.caption(&plan.title, style.font(theme.title_size));
    }
    let mut chart = builder
        .build_cartesian_2d(axis(&plan.x), axis(&plan.y))
        .map_err(Error::plotting)?;

    chart
        .plotting_area()
        .fill(&theme.panel_background.to_plotters())
        .map_err(Error::plotting)?;

    let x_fmt = |v: &f32| plan.x.scale.format_tick(*v);
    let y_fmt = |v: &f32| plan.y.scale.format_tick(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_labels(MAX_TICKS)
            .y_labels(MAX_TICKS)
            .label_style(style.font(theme.tick_size))
            .axis_desc_style(style.font(theme.label_size))
            .axis_style(style.stroke(theme.axis_color, 0.8))
            .bold_line_style(style.stroke(theme.grid_color, 0.8))
            .light_line_style(style.stroke(Rgba::TRANSPARENT, 0.0));
        if let Some(label) = &plan.x.label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &plan.y.label {
            mesh.y_desc(label.as_str());
        }
        if !theme.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(Error::plotting)?;
    }

    match &plan.secondary {
        Some(sec) => {
            let sec_fmt = |v: &f32| sec.scale.format_tick(*v);
            let mut chart = chart.set_secondary_coord(axis(&plan.x), axis(sec));
            {
                let mut axes = chart.configure_secondary_axes();
                axes.y_label_formatter(&sec_fmt)
                    .y_labels(MAX_TICKS)
                    .label_style(style.font(theme.tick_size))
                    .axis_desc_style(style.font(theme.label_size))
                    .axis_style(style.stroke(theme.axis_color, 0.8));
                if let Some(label) = &sec.label {
                    axes.y_desc(label.as_str());
                }
                axes.draw().map_err(Error::plotting)?;
            }
            draw_body(&mut chart, plan, style)
        }
        None => draw_body(&mut chart, plan, style),
    }
}

/// Series, frame and legends on the primary coordinates.
fn draw_body<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Chart2d>,
    plan: &PanelPlan,
    style: &FigureStyle<'_>,
) -> Result<()> {
    for series in &plan.series {
        let SeriesGeometry::Path(runs) = &series.geometry else {
            continue;
        };

        let width_px = style.px(series.line_width);
        if series.line_style != LineStyle::Hidden && width_px > 0.0 {
            let line = style.stroke(series.color, series.line_width);
            let pattern: Vec<f32> =
                series.line_style.pattern().iter().map(|p| p * width_px).collect();
            for run in runs {
                let data: Vec<Point> = run.iter().map(|&(x, y)| Point::new(x, y)).collect();
                let screen: Vec<Point> = run
                    .iter()
                    .map(|p| {
                        let (px, py) = chart.backend_coord(p);
                        Point::new(px as f32, py as f32)
                    })
                    .collect();
                let pieces = dash_polyline(&screen, &data, &pattern);
                chart
                    .draw_series(pieces.into_iter().map(|piece| {
                        PathElement::new(
                            piece.into_iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(),
                            line,
                        )
                    }))
                    .map_err(Error::plotting)?;
            }
        }

        if let Some(marker) = series.marker {
            let size = style.px(series.marker_size);
            let plotting = chart.plotting_area().strip_coord_spec();
            let (bx, by) = plotting.get_base_pixel();
            for p in runs.iter().flatten() {
                let (px, py) = chart.backend_coord(p);
                draw_marker(&plotting, marker, (px - bx, py - by), size, series.color)?;
            }
        }
    }

    let plotting = chart.plotting_area().strip_coord_spec();
    if style.theme.show_panel_border {
        let (w, h) = plotting.dim_in_pixel();
        plotting
            .draw(&Rectangle::new(
                [(0, 0), (w as i32 - 1, h as i32 - 1)],
                style.stroke(style.theme.axis_color, 0.8),
            ))
            .map_err(Error::plotting)?;
    }
    for legend in &plan.legends {
        draw_legend(&plotting, legend, style)?;
    }
    Ok(())
}
