//! Booking dataset: CSV loading and the immutable in-memory table
//!
//! The table is loaded once at startup and only read afterwards. A missing
//! or unparseable dataset is recoverable: the service runs degraded and
//! reports itself unavailable instead of crashing.

mod loader;
mod table;

pub use loader::DatasetLoader;
pub use table::{
    BookingRecord, BookingTable, FeatureVector, FieldValue, LABEL_COLUMN, REQUIRED_COLUMNS,
};
