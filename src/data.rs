//! Columnar numeric tables referenced by series.

use crate::error::{Error, Result};
use std::collections::HashMap;
use trueno::Vector;

/// Min and max of `values` using trueno's SIMD reductions.
///
/// Returns `None` for an empty slice. Callers filter non-finite values first.
#[must_use]
pub fn extent(values: &[f32]) -> Option<(f32, f32)> {
    if values.is_empty() {
        return None;
    }
    let vec = Vector::from_vec(values.to_vec());
    match (vec.min(), vec.max()) {
        (Ok(min), Ok(max)) => Some((min, max)),
        _ => None,
    }
}

/// A table of named `f32` columns of equal length.
///
/// Column order is preserved. Lookups are by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    names: Vec<String>,
    columns: Vec<Vec<f32>>,
    index: HashMap<String, usize>,
}

impl DataTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the table already has rows and
    /// `values` has a different length.
    ///
    /// # Example
    ///
    /// ```
    /// use gridplot::data::DataTable;
    ///
    /// let table = DataTable::new()
    ///     .with_column("t", vec![0.0, 1.0, 2.0])?
    ///     .with_column("v", vec![1.0, 4.0, 9.0])?;
    /// assert_eq!(table.n_rows(), 3);
    /// # Ok::<(), gridplot::Error>(())
    /// ```
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f32>) -> Result<Self> {
        self.insert(name, values)?;
        Ok(self)
    }

    /// In-place version of [`DataTable::with_column`].
    ///
    /// # Errors
    ///
    /// Same as [`DataTable::with_column`].
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f32>) -> Result<()> {
        let name = name.into();
        let replacing = self.index.get(&name).copied();
        let others = self.columns.iter().enumerate().find(|(i, _)| Some(*i) != replacing);
        if let Some((_, other)) = others {
            if other.len() != values.len() {
                return Err(Error::DataLengthMismatch {
                    column: name,
                    len: values.len(),
                    expected: other.len(),
                });
            }
        }

        match replacing {
            Some(i) => self.columns[i] = values,
            None => {
                self.index.insert(name.clone(), self.columns.len());
                self.names.push(name);
                self.columns.push(values);
            }
        }
        Ok(())
    }

    /// Look up a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if no column has that name.
    pub fn column(&self, name: &str) -> Result<&[f32]> {
        self.index.get(name).map(|&i| self.columns[i].as_slice()).ok_or_else(|| {
            Error::MissingColumn { column: name.to_string(), available: self.names.join(", ") }
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Load a table from a CSV file with a header row.
    ///
    /// Empty cells become `NaN`. Columns holding any non-numeric text are
    /// skipped, so referencing them later fails with [`Error::MissingColumn`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[cfg(feature = "config")]
    pub fn from_csv(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Load a table from any CSV source with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed.
    #[cfg(feature = "config")]
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut columns: Vec<Option<Vec<f32>>> = vec![Some(Vec::new()); headers.len()];
        for record in rdr.records() {
            let record = record?;
            for (col, cell) in columns.iter_mut().zip(record.iter()) {
                let parsed =
                    if cell.is_empty() { Some(f32::NAN) } else { cell.parse::<f32>().ok() };
                match parsed {
                    Some(v) => {
                        if let Some(values) = col.as_mut() {
                            values.push(v);
                        }
                    }
                    None => *col = None,
                }
            }
        }

        let mut table = Self::new();
        for (name, col) in headers.into_iter().zip(columns) {
            match col {
                Some(values) => table.insert(name, values)?,
                None => log::debug!("skipping non-numeric CSV column '{name}'"),
            }
        }
        Ok(table)
    }
}
