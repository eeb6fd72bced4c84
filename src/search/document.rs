//! Flat index documents

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of one document field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(s) => Some(s),
            FieldValue::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            FieldValue::Multi(v) => Some(v),
            FieldValue::Single(_) => None,
        }
    }

    /// Every value, whether single or multi
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(s) => vec![s.as_str()],
            FieldValue::Multi(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Single(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Single(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::Multi(v)
    }
}

/// Field name to value map, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexDocument {
    fields: IndexMap<String, FieldValue>,
}

impl IndexDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Add values to a multi-valued field, keeping what is already there
    pub fn extend_multi(&mut self, name: impl Into<String>, values: impl IntoIterator<Item = String>) {
        let entry = self
            .fields
            .entry(name.into())
            .or_insert_with(|| FieldValue::Multi(Vec::new()));
        match entry {
            FieldValue::Multi(existing) => existing.extend(values),
            FieldValue::Single(s) => {
                let mut merged = vec![std::mem::take(s)];
                merged.extend(values);
                *entry = FieldValue::Multi(merged);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
