//! Error types for gridplot operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or rendering a grid figure.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (missing output directory, unreadable file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A series references a column its table does not have.
    #[error("Column '{column}' not found in table (available: {available})")]
    MissingColumn {
        /// Requested column name.
        column: String,
        /// Comma separated list of the table's columns.
        available: String,
    },

    /// Columns of one table differ in length.
    #[error("Data length mismatch: column '{column}' has {len} rows, expected {expected}")]
    DataLengthMismatch {
        /// Offending column.
        column: String,
        /// Its length.
        len: usize,
        /// Length of the table's first column.
        expected: usize,
    },

    /// Number of panels and subplot titles differ.
    #[error("{panels} panels but {titles} subplot titles")]
    PanelCountMismatch {
        /// Number of panels.
        panels: usize,
        /// Number of titles.
        titles: usize,
    },

    /// More panels than grid cells.
    #[error("{panels} panels do not fit a {nrows}x{ncols} grid")]
    TooManyPanels {
        /// Number of panels.
        panels: usize,
        /// Grid rows.
        nrows: usize,
        /// Grid columns.
        ncols: usize,
    },

    /// A per-panel attribute list has the wrong length.
    #[error("Attribute '{attribute}' has {len} values for {panels} panels (grid holds {capacity})")]
    AttributeLength {
        /// Attribute name.
        attribute: String,
        /// Supplied length.
        len: usize,
        /// Number of panels.
        panels: usize,
        /// Grid capacity (rows * cols).
        capacity: usize,
    },

    /// A 3D figure has a series without a z column.
    #[error("3D series '{x}/{y}' has no z column")]
    MissingZColumn {
        /// X column of the series.
        x: String,
        /// Y column of the series.
        y: String,
    },

    /// Unknown named style.
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Unknown marker, line style, legend location or draw kind name.
    #[error("Invalid {kind}: {value}")]
    InvalidOption {
        /// What was being parsed.
        kind: &'static str,
        /// The rejected text.
        value: String,
    },

    /// Output extension has no encoder.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Error reported by the chart drawing backend.
    #[error("Plotting error: {0}")]
    Plotting(String),

    /// Font registration failed.
    #[error("Font error: {0}")]
    Font(String),

    /// The platform viewer could not be launched.
    #[error("Viewer error: {0}")]
    Viewer(String),

    /// YAML configuration error.
    #[cfg(feature = "config")]
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// CSV table error.
    #[cfg(feature = "config")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unknown table name in a figure configuration.
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

impl Error {
    /// Wrap a drawing backend error.
    pub(crate) fn plotting(err: impl std::fmt::Display) -> Self {
        Error::Plotting(err.to_string())
    }
}
