//! Schema-less table rows and their grouping by location.
//!
//! Column sets are only known once a reply arrives, so a [`Row`] is an
//! ordered list of field name/value pairs rather than a fixed record.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Field used to bucket rows into per-location tables.
pub const LOCATION_FIELD: &str = "final location";

/// Bucket label for rows without a usable location.
pub const GENERAL_DATA_LABEL: &str = "General Data";

/// One table row, fields kept in the order the server emitted them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from pairs; a repeated name overwrites the earlier value in place.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut row = Self::new();
        for (name, value) in pairs {
            row.insert(name, value);
        }
        row
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bucket label for this row: the location when truthy, else "General Data".
    pub fn group_label(&self) -> String {
        match self.get(LOCATION_FIELD) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => GENERAL_DATA_LABEL.to_string(),
            Some(Value::String(text)) if text.is_empty() => GENERAL_DATA_LABEL.to_string(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => GENERAL_DATA_LABEL.to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Bool(true)) => "true".to_string(),
            Some(other) => cell_text(Some(other)),
        }
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a table row object")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Row, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut row = Row::new();
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    row.insert(name, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Rows sharing one location, with the columns taken from the first row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGroup {
    pub location: String,
    /// Field names of the first member row, in its order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableGroup {
    /// Display text for every row, one cell per column. Fields absent from a
    /// row render empty; fields outside `columns` are not shown.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| cell_text(row.get(column)))
                    .collect()
            })
            .collect()
    }
}

/// Groups rows by location, preserving first-seen group order and row order.
///
/// Returns `None` for absent or empty input.
pub fn render_table(rows: Option<&[Row]>) -> Option<Vec<TableGroup>> {
    let rows = rows.filter(|rows| !rows.is_empty())?;

    let mut groups: Vec<TableGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let location = row.group_label();
        match index.get(&location) {
            Some(&i) => groups[i].rows.push(row.clone()),
            None => {
                index.insert(location.clone(), groups.len());
                groups.push(TableGroup {
                    location,
                    columns: row.field_names().map(str::to_string).collect(),
                    rows: vec![row.clone()],
                });
            }
        }
    }

    Some(groups)
}

/// Display text for a scalar cell. Null, booleans and missing fields render empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(_)) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}
