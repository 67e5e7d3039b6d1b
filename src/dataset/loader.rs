//! Dataset loading utilities

use crate::error::{Result, StayriskError};
use polars::prelude::*;
use std::fs::File;

use super::table::BookingTable;

/// Loader for the delimited booking dataset
pub struct DatasetLoader {
    delimiter: u8,
    infer_schema_rows: usize,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    /// Create a new loader for comma-separated files
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            infer_schema_rows: 100,
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set how many rows to sample for schema inference
    pub fn with_infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = rows;
        self
    }

    /// Load a delimited file with a header row into a DataFrame
    pub fn load_csv(&self, path: &str) -> Result<DataFrame> {
        let file = File::open(path)
            .map_err(|e| StayriskError::DatasetError(format!("cannot open {path}: {e}")))?;

        let parse_opts = CsvParseOptions::default().with_separator(self.delimiter);

        let reader = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.infer_schema_rows))
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file);

        reader
            .finish()
            .map_err(|e| StayriskError::DatasetError(format!("cannot parse {path}: {e}")))
    }

    /// Load and validate a booking table in one step
    pub fn load_table(&self, path: &str) -> Result<BookingTable> {
        let df = self.load_csv(path)?;
        BookingTable::from_dataframe(&df)
    }
}
