//! # Gridplot
//!
//! Grids of statistical charts rendered to a single image.
//!
//! A figure is a [`grid::GridSpec`] (rows, columns, titles, style, output file)
//! plus one [`panel::SubplotSpec`] per filled cell. Each panel holds series drawn
//! from shared [`data::DataTable`]s and may carry its own axis labels, log scales,
//! a secondary y axis and a legend. Figures can also be drawn as 3D surfaces.
//!
//! ## Features
//!
//! - **Pure Rust**: plotters backends with an embedded font, PNG or SVG output
//! - **Shared styling**: seaborn-like themes and per-panel color cycles
//! - **Secondary axes**: independently scaled right-hand y axes with their own legend
//! - **Declarative figures**: YAML descriptions over CSV tables (`config` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gridplot::prelude::*;
//! use std::sync::Arc;
//!
//! let table = Arc::new(
//!     DataTable::new()
//!         .with_column("step", vec![1.0, 2.0, 3.0])?
//!         .with_column("loss", vec![0.9, 0.4, 0.2])?
//!         .with_column("lr", vec![1e-3, 5e-4, 1e-4])?,
//! );
//!
//! let panel = SubplotSpec::new()
//!     .series(SeriesConfig::new(Arc::clone(&table), "step", "loss").label("loss"))
//!     .series(SeriesConfig::new(table, "step", "lr").label("lr").secondary(true))
//!     .options(PanelOptions::new().log_y(true).secondary_y(true));
//!
//! let grid = GridSpec::new(1, 1, "training.png").titles(["Training"]);
//! GridPlotRenderer::new().render(&grid, &[panel])?;
//! # Ok::<(), gridplot::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config` (default): YAML figure descriptions and CSV table loading

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color-name parsing.
pub mod color;

/// RGBA pixel buffer handed to the PNG encoder.
pub mod framebuffer;

/// Geometric primitives (points, rectangles, dash splitting).
pub mod geometry;

/// Linear and logarithmic axis scales.
pub mod scale;

/// Named numeric columns shared between series.
pub mod data;

/// Figure styles.
pub mod theme;

// ============================================================================
// Figure Description
// ============================================================================

/// Series configuration.
pub mod series;

/// Panels and per-panel options.
pub mod panel;

/// Grid shape, titles and output settings.
pub mod grid;

/// Declarative YAML figures.
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub mod config;

// ============================================================================
// Rendering
// ============================================================================

/// Delaunay triangulation for 3D surfaces.
pub mod triangulate;

/// Figure planning: pixel areas, axis ranges, colors and legends.
pub mod layout;

mod render;

/// Output encoders (PNG, SVG, data URIs).
pub mod output;

/// The grid renderer.
pub mod renderer;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for gridplot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use gridplot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Palette, Rgba};
    #[cfg(feature = "config")]
    pub use crate::config::{load_figure, FigureConfig};
    pub use crate::data::DataTable;
    pub use crate::error::{Error, Result};
    pub use crate::grid::GridSpec;
    pub use crate::layout::{FigureSummary, PanelSummary, Projection};
    pub use crate::output::ImageFormat;
    pub use crate::panel::{
        broadcast, LegendLocation, PanelAttributes, PanelOptions, PerPanel, SubplotSpec,
    };
    pub use crate::renderer::{GridPlotRenderer, RenderResult, ResultRegistry};
    pub use crate::scale::AxisScale;
    pub use crate::series::{DrawKind, LineStyle, Marker, SeriesConfig};
    pub use crate::theme::Theme;
}
