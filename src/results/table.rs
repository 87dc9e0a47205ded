use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use super::filter::RatingRange;
use crate::search::RawResultSet;
use crate::types::{CategoryField, DishRecord};

/// Why a result set produced no table.
#[derive(Debug, Error, PartialEq)]
pub enum FlattenError {
    #[error("no records returned")]
    Empty,
    #[error("malformed result set: {0}")]
    Malformed(String),
}

/// Flat view of one result set: one row per record.
#[derive(Debug, Clone)]
pub struct ResultTable {
    rows: Vec<DishRecord>,
}

impl ResultTable {
    pub fn from_rows(rows: Vec<DishRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[DishRecord] {
        &self.rows
    }

    /// Smallest and largest coerced rating, ignoring missing values.
    pub fn rating_bounds(&self) -> Option<RatingRange> {
        self.rows
            .iter()
            .filter_map(|r| r.restaurant_rating)
            .fold(None, |acc: Option<RatingRange>, v| {
                Some(match acc {
                    None => RatingRange::new(v, v),
                    Some(r) => RatingRange::new(r.min.min(v), r.max.max(v)),
                })
            })
    }
}

/// Flatten `data.Get.<collection>` into a table, preserving upstream order.
pub fn flatten(raw: &RawResultSet) -> Result<ResultTable, FlattenError> {
    let records = match raw.records() {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(FlattenError::Malformed(format!(
                "expected a list under data.Get.{}, got {}",
                raw.collection,
                kind(other)
            )))
        }
        None => return Err(FlattenError::Empty),
    };

    if records.is_empty() {
        return Err(FlattenError::Empty);
    }

    let mut rows = Vec::with_capacity(records.len());
    for (i, item) in records.iter().enumerate() {
        let fields = item.as_object().ok_or_else(|| {
            FlattenError::Malformed(format!("record {} is {}, not an object", i, kind(item)))
        })?;
        rows.push(DishRecord::from_fields(fields));
    }

    Ok(ResultTable::from_rows(rows))
}

/// Distinct non-missing values of `field`, in order of first appearance.
pub fn options(table: &ResultTable, field: CategoryField) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .rows()
        .iter()
        .filter_map(|r| r.category(field))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
