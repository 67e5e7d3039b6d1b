//! In-memory booking table and record types

use crate::error::{Result, StayriskError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::loader::DatasetLoader;

/// Columns every booking dataset must provide
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "customer_name",
    "hotel",
    "arrival_date_year",
    "arrival_date_month",
    "adults",
    "children",
    "babies",
    "meal",
    "market_segment",
    "distribution_channel",
    "reserved_room_type",
    "assigned_room_type",
    "adr",
];

/// Historical outcome column. Optional: a dataset without it is unlabeled
/// data, not an error.
pub const LABEL_COLUMN: &str = "is_canceled";

/// One booking row. Created at dataset load, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub hotel: String,
    pub arrival_date_year: i32,
    pub arrival_date_month: String,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    pub meal: String,
    pub market_segment: String,
    pub distribution_channel: String,
    pub reserved_room_type: String,
    pub assigned_room_type: String,
    pub adr: f64,
    pub customer_name: String,
    pub is_canceled: Option<bool>,
}

/// A single field value carried into feature transformation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            FieldValue::Number(_) => None,
        }
    }
}

/// The ordered `(column, value)` view of a record handed to the feature
/// transformer: every field except the historical label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    fields: Vec<(String, FieldValue)>,
}

impl FeatureVector {
    pub fn new(fields: Vec<(String, FieldValue)>) -> Self {
        Self { fields }
    }

    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a field by column name
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl BookingRecord {
    /// Derive the feature vector: every field except `is_canceled`, in
    /// dataset column order. The transformer decides which columns it
    /// actually encodes.
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector::new(vec![
            ("customer_name".to_string(), FieldValue::Text(self.customer_name.clone())),
            ("hotel".to_string(), FieldValue::Text(self.hotel.clone())),
            ("arrival_date_year".to_string(), FieldValue::Number(self.arrival_date_year as f64)),
            ("arrival_date_month".to_string(), FieldValue::Text(self.arrival_date_month.clone())),
            ("adults".to_string(), FieldValue::Number(self.adults as f64)),
            ("children".to_string(), FieldValue::Number(self.children as f64)),
            ("babies".to_string(), FieldValue::Number(self.babies as f64)),
            ("meal".to_string(), FieldValue::Text(self.meal.clone())),
            ("market_segment".to_string(), FieldValue::Text(self.market_segment.clone())),
            ("distribution_channel".to_string(), FieldValue::Text(self.distribution_channel.clone())),
            ("reserved_room_type".to_string(), FieldValue::Text(self.reserved_room_type.clone())),
            ("assigned_room_type".to_string(), FieldValue::Text(self.assigned_room_type.clone())),
            ("adr".to_string(), FieldValue::Number(self.adr)),
        ])
    }
}

/// Immutable in-memory booking table, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct BookingTable {
    records: Vec<BookingRecord>,
}

impl BookingTable {
    /// Build a table from records already in memory
    pub fn from_records(records: Vec<BookingRecord>) -> Self {
        Self { records }
    }

    /// Load a table from a CSV file
    pub fn load(path: &str) -> Result<Self> {
        DatasetLoader::new().load_table(path)
    }

    /// Load a table, falling back to degraded mode (no table) on any
    /// failure. Deployments without local data use this path; the service
    /// then answers every query as unavailable instead of crashing.
    pub fn load_or_degraded(path: &str) -> Option<Self> {
        match Self::load(path) {
            Ok(table) => {
                info!(rows = table.len(), path = %path, "booking dataset loaded");
                Some(table)
            }
            Err(e) => {
                warn!(error = %e, path = %path, "booking dataset unavailable, serving degraded");
                None
            }
        }
    }

    /// Extract typed records from a DataFrame, validating the schema
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let present: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !present.iter().any(|p| p == c))
            .collect();
        if !missing.is_empty() {
            return Err(StayriskError::DatasetError(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }

        let customer_name = str_values(df, "customer_name")?;
        let hotel = str_values(df, "hotel")?;
        let arrival_date_year = f64_values(df, "arrival_date_year")?;
        let arrival_date_month = str_values(df, "arrival_date_month")?;
        let adults = f64_values(df, "adults")?;
        let children = f64_values(df, "children")?;
        let babies = f64_values(df, "babies")?;
        let meal = str_values(df, "meal")?;
        let market_segment = str_values(df, "market_segment")?;
        let distribution_channel = str_values(df, "distribution_channel")?;
        let reserved_room_type = str_values(df, "reserved_room_type")?;
        let assigned_room_type = str_values(df, "assigned_room_type")?;
        let adr = f64_values(df, "adr")?;

        let labels: Option<Vec<Option<bool>>> = if present.iter().any(|p| p == LABEL_COLUMN) {
            Some(label_values(df)?)
        } else {
            None
        };

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            records.push(BookingRecord {
                hotel: hotel[i].clone(),
                arrival_date_year: arrival_date_year[i] as i32,
                arrival_date_month: arrival_date_month[i].clone(),
                adults: count_from(adults[i]),
                children: count_from(children[i]),
                babies: count_from(babies[i]),
                meal: meal[i].clone(),
                market_segment: market_segment[i].clone(),
                distribution_channel: distribution_channel[i].clone(),
                reserved_room_type: reserved_room_type[i].clone(),
                assigned_room_type: assigned_room_type[i].clone(),
                adr: adr[i],
                customer_name: customer_name[i].clone(),
                is_canceled: labels.as_ref().and_then(|l| l[i]),
            });
        }

        Ok(Self { records })
    }

    /// Records in dataset row order
    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn column_series(df: &DataFrame, name: &str) -> Result<Series> {
    Ok(df
        .column(name)
        .map_err(|_| StayriskError::DatasetError(format!("missing required column: {name}")))?
        .as_materialized_series()
        .clone())
}

fn str_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let casted = column_series(df, name)?
        .cast(&DataType::String)
        .map_err(|e| StayriskError::DatasetError(format!("column `{name}`: {e}")))?;
    let ca = casted
        .str()
        .map_err(|e| StayriskError::DatasetError(format!("column `{name}`: {e}")))?;
    // Null cells become empty strings; an empty name can never match a query.
    Ok(ca.into_iter().map(|v| v.unwrap_or_default().to_string()).collect())
}

fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let casted = column_series(df, name)?
        .cast(&DataType::Float64)
        .map_err(|e| StayriskError::DatasetError(format!("column `{name}`: {e}")))?;
    let ca = casted
        .f64()
        .map_err(|e| StayriskError::DatasetError(format!("column `{name}`: {e}")))?;
    Ok(ca.into_iter().map(|v| v.unwrap_or(0.0)).collect())
}

fn label_values(df: &DataFrame) -> Result<Vec<Option<bool>>> {
    let casted = column_series(df, LABEL_COLUMN)?
        .cast(&DataType::Float64)
        .map_err(|e| StayriskError::DatasetError(format!("column `{LABEL_COLUMN}`: {e}")))?;
    let ca = casted
        .f64()
        .map_err(|e| StayriskError::DatasetError(format!("column `{LABEL_COLUMN}`: {e}")))?;
    Ok(ca.into_iter().map(|v| v.map(|x| x != 0.0)).collect())
}

fn count_from(value: f64) -> u32 {
    if value.is_finite() {
        value.max(0.0) as u32
    } else {
        0
    }
}
