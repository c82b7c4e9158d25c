//! Axis scales and data ranges.
//!
//! Every chart coordinate system is linear. A log axis is drawn by mapping data
//! through `log10` before it reaches the chart and mapping tick positions back
//! with [`AxisScale::invert`] when labelling.

use crate::data::extent;

/// Fraction of the data span added on each side of an axis.
pub const AXIS_PADDING: f32 = 0.05;

/// Largest magnitude of an axis bound.
pub const RANGE_LIMIT: f32 = f32::MAX / 2.0;

/// Tick count aimed for on each axis.
const TARGET_TICKS: f64 = 6.0;

/// How data values are placed along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    /// Identity placement.
    #[default]
    Linear,
    /// Base-10 logarithmic placement; non-positive values are not drawable.
    Log10,
}

impl AxisScale {
    /// `Log10` when `log` is set, `Linear` otherwise.
    #[must_use]
    pub const fn from_flag(log: bool) -> Self {
        if log {
            AxisScale::Log10
        } else {
            AxisScale::Linear
        }
    }

    /// Map a data value into chart coordinates.
    ///
    /// Returns `None` when the value cannot be placed (non-finite, or
    /// non-positive on a log axis).
    #[must_use]
    pub fn transform(self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        match self {
            AxisScale::Linear => Some(value),
            AxisScale::Log10 if value > 0.0 => Some(value.log10()),
            AxisScale::Log10 => None,
        }
    }

    /// Map a chart coordinate back into data units.
    #[must_use]
    pub fn invert(self, coord: f32) -> f32 {
        match self {
            AxisScale::Linear => coord,
            AxisScale::Log10 => 10f32.powf(coord),
        }
    }

    /// Tick label for a chart coordinate.
    #[must_use]
    pub fn format_tick(self, coord: f32) -> String {
        format_number(self.invert(coord))
    }

    /// Tick positions in chart coordinates inside `range`.
    ///
    /// Log axes tick whole decades (every n-th one on wide ranges). A log range
    /// holding fewer than two decades falls back to evenly stepped ticks.
    #[must_use]
    pub fn ticks(self, range: AxisRange) -> Vec<f32> {
        if self == AxisScale::Log10 {
            let first = f64::from(range.min).ceil();
            let last = f64::from(range.max).floor();
            if last - first >= 1.0 {
                let every = ((last - first + 1.0) / (TARGET_TICKS + 2.0)).ceil().max(1.0);
                let every_i = every as i64;
                return (first as i64..=last as i64)
                    .filter(|k| k.rem_euclid(every_i) == 0)
                    .map(|k| k as f32)
                    .collect();
            }
        }
        nice_ticks(range)
    }
}

/// Multiples of a 1-2-5 step covering `range`.
fn nice_ticks(range: AxisRange) -> Vec<f32> {
    let (min, max) = (f64::from(range.min), f64::from(range.max));
    let span = max - min;
    if !(span.is_finite() && span > 0.0) {
        return vec![range.min];
    }

    let raw = span / TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = match raw / magnitude {
        n if n < 1.5 => 1.0,
        n if n < 3.0 => 2.0,
        n if n < 7.0 => 5.0,
        _ => 10.0,
    } * magnitude;

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| (k as f64 * step) as f32).collect()
}

/// Compact number formatting for tick labels.
#[must_use]
pub fn format_number(value: f32) -> String {
    let abs = value.abs();
    if value == 0.0 {
        return "0".to_string();
    }
    if !(1e-3..1e5).contains(&abs) {
        return format!("{value:.1e}");
    }
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// A closed interval of chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl AxisRange {
    /// Create a range, ordering the bounds.
    #[must_use]
    pub fn new(a: f32, b: f32) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Padded range covering `coords` (already transformed).
    ///
    /// An empty input gives `[0, 1]`. A single distinct value `v` gives
    /// `v ± 0.5`, or `v ± 5%` of `|v|` when that is larger. Bounds are clamped
    /// to `±RANGE_LIMIT` so the span stays finite.
    #[must_use]
    pub fn covering(coords: &[f32]) -> Self {
        let finite: Vec<f32> = coords.iter().copied().filter(|v| v.is_finite()).collect();
        let Some((lo, hi)) = extent(&finite) else {
            return Self::new(0.0, 1.0);
        };

        let (lo, hi) = (f64::from(lo), f64::from(hi));
        let pad = f64::from(AXIS_PADDING);
        let span = hi - lo;
        let (a, b) = if span <= f64::from(f32::EPSILON) * lo.abs().max(1.0) {
            let half = (lo.abs() * pad).max(0.5);
            (lo - half, hi + half)
        } else {
            (lo - span * pad, hi + span * pad)
        };

        let limit = f64::from(RANGE_LIMIT);
        Self::new(a.clamp(-limit, limit) as f32, b.clamp(-limit, limit) as f32)
    }

    /// Width of the range.
    #[must_use]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Convert to a half-open range for chart construction.
    #[must_use]
    pub fn as_range(&self) -> std::ops::Range<f32> {
        self.min..self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_scale_transform() {
        assert_eq!(AxisScale::Linear.transform(-3.0), Some(-3.0));
        assert_relative_eq!(AxisScale::Log10.transform(1000.0).unwrap(), 3.0);
        assert_eq!(AxisScale::Log10.transform(0.0), None);
        assert_eq!(AxisScale::Log10.transform(-1.0), None);
        assert_eq!(AxisScale::Linear.transform(f32::NAN), None);
    }

    #[test]
    fn test_axis_scale_invert() {
        assert_relative_eq!(AxisScale::Log10.invert(2.0), 100.0, epsilon = 1e-3);
        assert_relative_eq!(AxisScale::Linear.invert(2.0), 2.0);
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(AxisScale::from_flag(true), AxisScale::Log10);
        assert_eq!(AxisScale::from_flag(false), AxisScale::Linear);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(1.0e6), "1.0e6");
        assert_eq!(AxisScale::Log10.format_tick(2.0), "100");
    }

    #[test]
    fn test_range_covering_pads() {
        let r = AxisRange::covering(&[0.0, 10.0]);
        assert_relative_eq!(r.min, -0.5);
        assert_relative_eq!(r.max, 10.5);
    }

    #[test]
    fn test_range_covering_degenerate() {
        let r = AxisRange::covering(&[3.0, 3.0]);
        assert_relative_eq!(r.min, 2.5);
        assert_relative_eq!(r.max, 3.5);

        let big = AxisRange::covering(&[100.0]);
        assert_relative_eq!(big.min, 95.0);
        assert_relative_eq!(big.max, 105.0);
    }

    #[test]
    fn test_range_covering_extreme_values_stays_finite() {
        let r = AxisRange::covering(&[-3e38, 3e38]);
        assert!(r.min.is_finite() && r.max.is_finite());
        assert!(r.span().is_finite());
        assert!(r.min < 0.0 && r.max > 0.0);
        assert_eq!(r.max, RANGE_LIMIT);
    }

    #[test]
    fn test_range_covering_large_but_safe_values_untouched() {
        let r = AxisRange::covering(&[0.0, 1e30]);
        assert_relative_eq!(r.max, 1.05e30, max_relative = 1e-5);
    }

    #[test]
    fn test_linear_ticks_use_round_steps() {
        let ticks = AxisScale::Linear.ticks(AxisRange::new(-0.5, 10.5));
        assert_eq!(ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let small = AxisScale::Linear.ticks(AxisRange::new(0.0, 0.3));
        assert_eq!(small.len(), 7);
        assert_relative_eq!(small[1], 0.05);
    }

    #[test]
    fn test_log_ticks_on_decades() {
        let ticks = AxisScale::Log10.ticks(AxisRange::new(-0.1, 3.2));
        assert_eq!(ticks, vec![0.0, 1.0, 2.0, 3.0]);
        let labels: Vec<String> =
            ticks.iter().map(|&t| AxisScale::Log10.format_tick(t)).collect();
        assert_eq!(labels, vec!["1", "10", "100", "1000"]);
    }

    #[test]
    fn test_log_ticks_thin_out_wide_ranges() {
        let ticks = AxisScale::Log10.ticks(AxisRange::new(-30.0, 30.0));
        assert!(ticks.len() <= 10);
        assert!(ticks.iter().all(|t| t.fract() == 0.0));
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn test_log_ticks_fall_back_inside_one_decade() {
        let ticks = AxisScale::Log10.ticks(AxisRange::new(0.2, 0.8));
        assert!(ticks.len() >= 2);
        assert!(ticks.iter().all(|t| (0.2..=0.8).contains(t)));
    }

    #[test]
    fn test_range_covering_empty() {
        assert_eq!(AxisRange::covering(&[]), AxisRange::new(0.0, 1.0));
        assert_eq!(AxisRange::covering(&[f32::NAN]), AxisRange::new(0.0, 1.0));
    }
}
