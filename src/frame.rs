//! Minimal labelled table used for exports: named columns, a string row
//! index and JSON cell values (`null` for missing).

use crate::error::Result;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataFrame {
    columns: Vec<String>,
    index: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataFrame {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|column| column.to_string()).collect(),
            index: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Appends `record` as a row. Fields are matched to columns by name;
    /// fields without a column are dropped and columns without a field get
    /// `null`.
    pub fn push_record<T: Serialize>(&mut self, label: &str, record: &T) -> Result<()> {
        let mut fields = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        let row = self
            .columns
            .iter()
            .map(|column| fields.remove(column).unwrap_or(Value::Null))
            .collect();
        self.index.push(label.to_string());
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.index.iter().position(|existing| existing == label)
    }

    /// Row `label` as column name to value. Use `to_json` when column order
    /// matters; this map is keyed for lookup.
    pub fn row(&self, label: &str) -> Option<Map<String, Value>> {
        let row = &self.rows[self.position(label)?];
        Some(
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect(),
        )
    }

    pub fn value(&self, label: &str, column: &str) -> Option<&Value> {
        let row = self.position(label)?;
        let column = self.columns.iter().position(|existing| existing == column)?;
        self.rows[row].get(column)
    }

    /// Rows as JSON objects in index order, paired with their label.
    pub fn to_records(&self) -> Vec<(String, Map<String, Value>)> {
        self.index
            .iter()
            .filter_map(|label| self.row(label).map(|row| (label.clone(), row)))
            .collect()
    }

    /// Pretty JSON object keyed by index label. Labels keep index order and
    /// each row keeps column order.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&OrderedRecords(self))?)
    }
}

struct OrderedRecords<'a>(&'a DataFrame);

impl Serialize for OrderedRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let frame = self.0;
        let mut map = serializer.serialize_map(Some(frame.index.len()))?;
        for (label, values) in frame.index.iter().zip(&frame.rows) {
            map.serialize_entry(
                label,
                &OrderedRow {
                    columns: &frame.columns,
                    values,
                },
            )?;
        }
        map.end()
    }
}

struct OrderedRow<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl Serialize for OrderedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
