//! Conversion of API payloads into tables.
//!
//! Two payload shapes are supported:
//!
//! - a JSON array of flat objects, one object per row
//!   ([`table_from_records`]);
//! - a JSON object whose values are flat objects, keyed by an identifier
//!   ([`table_from_keyed_records`]). The key becomes the first column and the
//!   table's index.
//!
//! Columns appear in the order they are first seen across the records. A
//! record that lacks a field contributes a null. Column types are inferred
//! from the values: integers, floats, booleans, and everything else as text
//! (nested arrays and objects keep their JSON form).
//!
//! `null`, `[]` and `{}` all produce [`Table::empty`].

use crate::{Result, Table, TableError};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::HashSet;

type Record = Map<String, Value>;

/// Builds a table from an array of records.
///
/// # Errors
///
/// Returns [`TableError::UnexpectedShape`] if the payload is not an array of
/// objects.
pub fn table_from_records(payload: &Value) -> Result<Table> {
    if is_empty_payload(payload) {
        return Ok(Table::empty());
    }

    let Value::Array(items) = payload else {
        return Err(TableError::UnexpectedShape(format!(
            "expected an array of records, got {}",
            kind_of(payload)
        )));
    };

    let records = items
        .iter()
        .map(as_record)
        .collect::<Result<Vec<&Record>>>()?;

    let columns = record_columns(&records);
    if columns.is_empty() {
        // Records with no fields still count as rows.
        // polars 0.46 has no `empty_with_height`; an empty schema gives the
        // same zero-column frame with the height kept.
        return Ok(Table::new(DataFrame::full_null(
            &Schema::default(),
            records.len(),
        )));
    }
    Ok(Table::new(DataFrame::new(columns)?))
}

/// Builds a table from an object of records keyed by identifier.
///
/// The keys are placed, in input order, into a leading column named
/// `index_name`, which is also recorded as the table's index. Keys that are
/// all written as plain integers (`"101"`, not `"0101"` or `"+101"`) produce
/// an integer column; otherwise the column holds the keys as text.
///
/// # Errors
///
/// Returns [`TableError::UnexpectedShape`] if the payload is not an object
/// whose values are objects.
pub fn table_from_keyed_records(payload: &Value, index_name: &str) -> Result<Table> {
    if is_empty_payload(payload) {
        return Ok(Table::empty());
    }

    let Value::Object(entries) = payload else {
        return Err(TableError::UnexpectedShape(format!(
            "expected an object of keyed records, got {}",
            kind_of(payload)
        )));
    };

    let mut keys = Vec::with_capacity(entries.len());
    let mut records = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        keys.push(key.as_str());
        records.push(as_record(value)?);
    }

    let mut columns = Vec::with_capacity(1 + records.first().map_or(0, |r| r.len()));
    columns.push(key_column(index_name, &keys));

    for column in record_columns(&records) {
        if column.name().as_str() == index_name {
            return Err(TableError::UnexpectedShape(format!(
                "record field {index_name} collides with the index column"
            )));
        }
        columns.push(column);
    }

    Ok(Table::with_index(DataFrame::new(columns)?, index_name))
}

fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        _ => false,
    }
}

fn as_record(value: &Value) -> Result<&Record> {
    value.as_object().ok_or_else(|| {
        TableError::UnexpectedShape(format!("expected a record object, got {}", kind_of(value)))
    })
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Field names in first-seen order across all records.
fn field_names<'a>(records: &[&'a Record]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        for name in record.keys() {
            if seen.insert(name.as_str()) {
                names.push(name.as_str());
            }
        }
    }
    names
}

fn record_columns(records: &[&Record]) -> Vec<Column> {
    field_names(records)
        .into_iter()
        .map(|name| {
            let cells: Vec<Option<&Value>> = records
                .iter()
                .map(|record| record.get(name).filter(|v| !v.is_null()))
                .collect();
            build_column(name, &cells)
        })
        .collect()
}

fn key_column(name: &str, keys: &[&str]) -> Column {
    let parsed: Option<Vec<i64>> = keys
        .iter()
        .map(|k| k.parse::<i64>().ok().filter(|id| id.to_string() == *k))
        .collect();
    match parsed {
        Some(ids) => Column::from(Series::new(name.into(), ids)),
        None => Column::from(Series::new(name.into(), keys)),
    }
}

/// The narrowest column type able to hold every non-null cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
}

impl CellKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() => Self::Int,
            Value::Number(_) => Self::Float,
            _ => Self::Text,
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Null, k) | (k, Self::Null) => k,
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Self::Float,
            (a, b) if a == b => a,
            _ => Self::Text,
        }
    }
}

fn build_column(name: &str, cells: &[Option<&Value>]) -> Column {
    let kind = cells
        .iter()
        .flatten()
        .fold(CellKind::Null, |acc, v| acc.merge(CellKind::of(v)));

    let series = match kind {
        CellKind::Bool => {
            let values: Vec<Option<bool>> = cells.iter().map(|c| c.and_then(Value::as_bool)).collect();
            Series::new(name.into(), values)
        }
        CellKind::Int => {
            let values: Vec<Option<i64>> = cells.iter().map(|c| c.and_then(Value::as_i64)).collect();
            Series::new(name.into(), values)
        }
        CellKind::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(|c| c.and_then(Value::as_f64)).collect();
            Series::new(name.into(), values)
        }
        CellKind::Null | CellKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(|c| c.map(cell_text)).collect();
            Series::new(name.into(), values)
        }
    };
    Column::from(series)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
