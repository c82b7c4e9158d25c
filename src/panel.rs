//! Panel-level configuration.
//!
//! Each [`SubplotSpec`] carries one explicit [`PanelOptions`]. Callers who want the
//! "one value for every panel, or one value per panel" convenience describe it
//! with [`PanelAttributes`]. [`PanelAttributes::resolve_all`] expands that once,
//! up front, into one `PanelOptions` per panel.

use crate::error::{Error, Result};
use crate::series::SeriesConfig;
use std::str::FromStr;

/// Where a legend is anchored inside its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLocation {
    /// The corner with the fewest data points.
    #[default]
    Best,
    /// Top right corner.
    UpperRight,
    /// Top left corner.
    UpperLeft,
    /// Bottom left corner.
    LowerLeft,
    /// Bottom right corner.
    LowerRight,
    /// Right edge, vertically centred.
    Right,
    /// Left edge, vertically centred.
    CenterLeft,
    /// Same as `Right`.
    CenterRight,
    /// Bottom edge, horizontally centred.
    LowerCenter,
    /// Top edge, horizontally centred.
    UpperCenter,
    /// Panel centre.
    Center,
}

impl FromStr for LegendLocation {
    type Err = Error;

    /// Accepts matplotlib's location strings and numeric codes.
    fn from_str(s: &str) -> Result<Self> {
        let loc = match s.trim().to_ascii_lowercase().as_str() {
            "best" | "0" => LegendLocation::Best,
            "upper right" | "1" => LegendLocation::UpperRight,
            "upper left" | "2" => LegendLocation::UpperLeft,
            "lower left" | "3" => LegendLocation::LowerLeft,
            "lower right" | "4" => LegendLocation::LowerRight,
            "right" | "5" => LegendLocation::Right,
            "center left" | "6" => LegendLocation::CenterLeft,
            "center right" | "7" => LegendLocation::CenterRight,
            "lower center" | "8" => LegendLocation::LowerCenter,
            "upper center" | "9" => LegendLocation::UpperCenter,
            "center" | "10" => LegendLocation::Center,
            _ => return Err(Error::InvalidOption { kind: "legend location", value: s.to_string() }),
        };
        Ok(loc)
    }
}

/// Resolved settings for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOptions {
    /// X axis label.
    pub x_label: Option<String>,
    /// Primary y axis label.
    pub y_label: Option<String>,
    /// Logarithmic x axis.
    pub log_x: bool,
    /// Logarithmic y axis (applies to the secondary axis when there is one).
    pub log_y: bool,
    /// Add a secondary y axis sharing x.
    pub secondary_y: bool,
    /// Secondary y axis label.
    pub secondary_y_label: Option<String>,
    /// Primary legend location.
    pub legend_loc: LegendLocation,
    /// Number of legend columns (at least 1).
    pub legend_ncol: usize,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            x_label: None,
            y_label: None,
            log_x: false,
            log_y: false,
            secondary_y: false,
            secondary_y_label: None,
            legend_loc: LegendLocation::Best,
            legend_ncol: 1,
        }
    }
}

impl PanelOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the x label.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Set the y label.
    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Enable a logarithmic x axis.
    #[must_use]
    pub fn log_x(mut self, log: bool) -> Self {
        self.log_x = log;
        self
    }

    /// Enable a logarithmic y axis.
    #[must_use]
    pub fn log_y(mut self, log: bool) -> Self {
        self.log_y = log;
        self
    }

    /// Add a secondary y axis.
    #[must_use]
    pub fn secondary_y(mut self, enabled: bool) -> Self {
        self.secondary_y = enabled;
        self
    }

    /// Set the secondary y label.
    #[must_use]
    pub fn secondary_y_label(mut self, label: impl Into<String>) -> Self {
        self.secondary_y_label = Some(label.into());
        self
    }

    /// Set the legend location.
    #[must_use]
    pub fn legend_loc(mut self, loc: LegendLocation) -> Self {
        self.legend_loc = loc;
        self
    }

    /// Set the legend column count.
    #[must_use]
    pub fn legend_ncol(mut self, ncol: usize) -> Self {
        self.legend_ncol = ncol.max(1);
        self
    }
}

/// One panel: ordered series sharing an axes region, plus its options.
#[derive(Debug, Clone, Default)]
pub struct SubplotSpec {
    /// Series drawn in order.
    pub series: Vec<SeriesConfig>,
    /// Panel options.
    pub options: PanelOptions,
}

impl SubplotSpec {
    /// Create an empty panel with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a series.
    #[must_use]
    pub fn series(mut self, series: SeriesConfig) -> Self {
        self.series.push(series);
        self
    }

    /// Replace the options.
    #[must_use]
    pub fn options(mut self, options: PanelOptions) -> Self {
        self.options = options;
        self
    }
}

/// Repeat `value` once per panel.
#[must_use]
pub fn broadcast<T: Clone>(value: T, n: usize) -> Vec<T> {
    vec![value; n]
}

/// A panel attribute given once for all panels or once per panel position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize), serde(untagged))]
pub enum PerPanel<T> {
    /// Same value for every panel.
    All(T),
    /// Value for panel `i` at index `i`.
    Each(Vec<T>),
}

impl<T: Default> Default for PerPanel<T> {
    fn default() -> Self {
        PerPanel::All(T::default())
    }
}

impl<T> From<T> for PerPanel<T> {
    fn from(value: T) -> Self {
        PerPanel::All(value)
    }
}

impl<T> PerPanel<T> {
    /// Convert every value, keeping the scalar-or-list shape.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, F>(&self, mut f: F) -> Result<PerPanel<U>>
    where
        F: FnMut(&T) -> Result<U>,
    {
        Ok(match self {
            PerPanel::All(v) => PerPanel::All(f(v)?),
            PerPanel::Each(values) => {
                PerPanel::Each(values.iter().map(f).collect::<Result<Vec<_>>>()?)
            }
        })
    }
}

impl<T: Clone> PerPanel<T> {
    /// Expand to exactly `panels` values.
    ///
    /// A list must cover every panel and may not be longer than the grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeLength`] when a list is shorter than `panels` or
    /// longer than `capacity`.
    pub fn resolve(&self, attribute: &str, panels: usize, capacity: usize) -> Result<Vec<T>> {
        match self {
            PerPanel::All(v) => Ok(broadcast(v.clone(), panels)),
            PerPanel::Each(values) => {
                if values.len() < panels || values.len() > capacity.max(panels) {
                    return Err(Error::AttributeLength {
                        attribute: attribute.to_string(),
                        len: values.len(),
                        panels,
                        capacity,
                    });
                }
                Ok(values[..panels].to_vec())
            }
        }
    }
}

/// Scalar-or-list panel attributes, resolved into per-panel [`PanelOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct PanelAttributes {
    /// X axis labels.
    pub x_label: PerPanel<Option<String>>,
    /// Y axis labels.
    pub y_label: PerPanel<Option<String>>,
    /// Logarithmic x axis flags.
    pub log_x: PerPanel<bool>,
    /// Logarithmic y axis flags.
    pub log_y: PerPanel<bool>,
    /// Secondary axis flags.
    pub secondary_y: PerPanel<bool>,
    /// Secondary axis labels.
    pub secondary_y_label: PerPanel<Option<String>>,
    /// Legend locations.
    pub legend_loc: PerPanel<LegendLocation>,
    /// Legend column counts.
    pub legend_ncol: PerPanel<usize>,
}

impl Default for PanelAttributes {
    fn default() -> Self {
        Self {
            x_label: PerPanel::All(None),
            y_label: PerPanel::All(None),
            log_x: PerPanel::All(false),
            log_y: PerPanel::All(false),
            secondary_y: PerPanel::All(false),
            secondary_y_label: PerPanel::All(None),
            legend_loc: PerPanel::All(LegendLocation::Best),
            legend_ncol: PerPanel::All(1),
        }
    }
}

impl PanelAttributes {
    /// Resolve into one [`PanelOptions`] per panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeLength`] naming the first attribute whose list
    /// length does not fit.
    pub fn resolve_all(&self, panels: usize, capacity: usize) -> Result<Vec<PanelOptions>> {
        let x_label = self.x_label.resolve("x_label", panels, capacity)?;
        let y_label = self.y_label.resolve("y_label", panels, capacity)?;
        let log_x = self.log_x.resolve("log_scale_x", panels, capacity)?;
        let log_y = self.log_y.resolve("log_scale_y", panels, capacity)?;
        let secondary_y = self.secondary_y.resolve("secondary_y", panels, capacity)?;
        let secondary_y_label =
            self.secondary_y_label.resolve("secondary_y_label", panels, capacity)?;
        let legend_loc = self.legend_loc.resolve("legend_loc", panels, capacity)?;
        let legend_ncol = self.legend_ncol.resolve("legend_ncol", panels, capacity)?;

        Ok((0..panels)
            .map(|i| PanelOptions {
                x_label: x_label[i].clone(),
                y_label: y_label[i].clone(),
                log_x: log_x[i],
                log_y: log_y[i],
                secondary_y: secondary_y[i],
                secondary_y_label: secondary_y_label[i].clone(),
                legend_loc: legend_loc[i],
                legend_ncol: legend_ncol[i].max(1),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_legend_location_parse() {
        assert_eq!("upper left".parse::<LegendLocation>().unwrap(), LegendLocation::UpperLeft);
        assert_eq!("Lower Right".parse::<LegendLocation>().unwrap(), LegendLocation::LowerRight);
        assert_eq!("9".parse::<LegendLocation>().unwrap(), LegendLocation::UpperCenter);
        assert!("top".parse::<LegendLocation>().is_err());
    }

    #[test]
    fn test_options_builder() {
        let o = PanelOptions::new().x_label("t").log_y(true).legend_ncol(0);
        assert_eq!(o.x_label.as_deref(), Some("t"));
        assert!(o.log_y);
        assert_eq!(o.legend_ncol, 1);
    }

    #[test]
    fn test_scalar_applies_to_every_panel() {
        let attrs = PanelAttributes { log_y: PerPanel::All(true), ..Default::default() };
        let opts = attrs.resolve_all(3, 4).unwrap();
        assert!(opts.iter().all(|o| o.log_y));
    }

    #[test]
    fn test_list_indexed_by_panel() {
        let attrs = PanelAttributes {
            secondary_y: PerPanel::Each(vec![true, false]),
            y_label: PerPanel::Each(vec![Some("a".into()), None]),
            ..Default::default()
        };
        let opts = attrs.resolve_all(2, 2).unwrap();
        assert!(opts[0].secondary_y);
        assert!(!opts[1].secondary_y);
        assert_eq!(opts[0].y_label.as_deref(), Some("a"));
        assert_eq!(opts[1].y_label, None);
    }

    #[test]
    fn test_list_as_long_as_grid_is_accepted() {
        // 3 panels in a 2x2 grid, list sized to the grid
        let attrs = PanelAttributes {
            log_x: PerPanel::Each(vec![false, true, false, true]),
            ..Default::default()
        };
        let opts = attrs.resolve_all(3, 4).unwrap();
        assert_eq!(opts.len(), 3);
        assert!(opts[1].log_x);
    }

    #[test]
    fn test_short_list_fails_fast() {
        let attrs =
            PanelAttributes { log_x: PerPanel::Each(vec![true]), ..Default::default() };
        let err = attrs.resolve_all(2, 4).unwrap_err();
        assert!(matches!(err, Error::AttributeLength { ref attribute, .. } if attribute == "log_scale_x"));
    }

    #[test]
    fn test_long_list_fails_fast() {
        let attrs = PanelAttributes {
            legend_ncol: PerPanel::Each(vec![1, 2, 3]),
            ..Default::default()
        };
        assert!(attrs.resolve_all(2, 2).is_err());
    }

    #[test]
    fn test_try_map_keeps_shape() {
        let names = PerPanel::Each(vec!["best".to_string(), "3".to_string()]);
        let locs = names.try_map(|s| s.parse::<LegendLocation>()).unwrap();
        assert_eq!(locs, PerPanel::Each(vec![LegendLocation::Best, LegendLocation::LowerLeft]));

        let bad = PerPanel::All("sideways".to_string());
        assert!(bad.try_map(|s| s.parse::<LegendLocation>()).is_err());
    }

    proptest! {
        #[test]
        fn prop_broadcast_repeats(value in any::<u8>(), n in 0usize..32) {
            let v = broadcast(value, n);
            prop_assert_eq!(v.len(), n);
            prop_assert!(v.iter().all(|x| *x == value));
        }

        #[test]
        fn prop_each_resolves_by_position(values in proptest::collection::vec(any::<bool>(), 1..12)) {
            let n = values.len();
            let resolved = PerPanel::Each(values.clone()).resolve("flag", n, n).unwrap();
            prop_assert_eq!(resolved, values);
        }
    }
}
