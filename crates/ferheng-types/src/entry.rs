use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;

use crate::schema::EntrySchema;

/// Field name to value. Absent names read as the empty string.
pub type FieldValues = BTreeMap<String, String>;

/// Identifier assigned by the store, kept opaque
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(integral(n).unwrap_or_else(|| n.to_string()))),
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }
}

/// Integer form of a JSON number, so `7.0` and `7` name the same entry
fn integral(n: &serde_json::Number) -> Option<String> {
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then(|| (f as i64).to_string())
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EntryDecodeError {
    #[error("Expected an entry object, got {0}")]
    NotAnObject(String),

    #[error("Entry has no usable id")]
    MissingId,
}

/// A dictionary record, with an id once persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: Option<EntryId>,
    pub fields: FieldValues,
}

impl Entry {
    pub fn empty(schema: &EntrySchema) -> Self {
        Self {
            id: None,
            fields: schema.empty_values(),
        }
    }

    pub fn with_id(id: EntryId, fields: FieldValues) -> Self {
        Self {
            id: Some(id),
            fields,
        }
    }

    pub fn value(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Decode a persisted entry from the store.
    ///
    /// Every schema field ends up present: missing keys and `null` become
    /// `""`, scalars are stringified, and keys outside the schema are dropped.
    pub fn from_json(value: &Value, schema: &EntrySchema) -> Result<Self, EntryDecodeError> {
        let Value::Object(object) = value else {
            return Err(EntryDecodeError::NotAnObject(kind_of(value).to_string()));
        };

        let id = object
            .get("id")
            .and_then(EntryId::from_json)
            .ok_or(EntryDecodeError::MissingId)?;

        let fields = schema
            .fields()
            .iter()
            .map(|spec| {
                let text = match object.get(&spec.name) {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                (spec.name.clone(), text)
            })
            .collect();

        Ok(Self::with_id(id, fields))
    }
}

/// Request body for create/update: every schema field, NFC-normalized, no id
pub fn payload(fields: &FieldValues, schema: &EntrySchema) -> Map<String, Value> {
    schema
        .fields()
        .iter()
        .map(|spec| {
            let text: String = fields
                .get(&spec.name)
                .map(|v| v.nfc().collect())
                .unwrap_or_default();
            (spec.name.clone(), Value::String(text))
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::FieldSpec;

    fn schema() -> EntrySchema {
        EntrySchema::new(vec![
            FieldSpec::new("headword", "Headword").rtl().required(),
            FieldSpec::new("english", "English"),
            FieldSpec::new("plural", "Plural"),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_json_normalizes_fields() {
        let raw = json!({
            "id": 7,
            "headword": "av",
            "english": null,
            "note": "not in schema"
        });

        let entry = Entry::from_json(&raw, &schema()).unwrap();
        assert_eq!(entry.id, Some(EntryId::from(7)));
        assert_eq!(entry.value("headword"), "av");
        assert_eq!(entry.value("english"), "");
        assert_eq!(entry.value("plural"), "");
        assert!(!entry.fields.contains_key("note"));
    }

    #[test]
    fn test_from_json_accepts_string_ids() {
        let raw = json!({"id": "a1", "headword": "ئاو"});
        let entry = Entry::from_json(&raw, &schema()).unwrap();
        assert_eq!(entry.id.unwrap().as_str(), "a1");
    }

    #[test]
    fn test_from_json_float_ids_read_as_integers() {
        let entry = Entry::from_json(&json!({"id": 7.0, "headword": "av"}), &schema()).unwrap();
        assert_eq!(entry.id, Some(EntryId::from(7)));

        let entry = Entry::from_json(&json!({"id": -3, "headword": "av"}), &schema()).unwrap();
        assert_eq!(entry.id.unwrap().as_str(), "-3");

        let entry = Entry::from_json(&json!({"id": 7.5, "headword": "av"}), &schema()).unwrap();
        assert_eq!(entry.id.unwrap().as_str(), "7.5");
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert_eq!(
            Entry::from_json(&json!([1, 2]), &schema()).unwrap_err(),
            EntryDecodeError::NotAnObject("array".to_string())
        );
        assert_eq!(
            Entry::from_json(&json!({"headword": "av"}), &schema()).unwrap_err(),
            EntryDecodeError::MissingId
        );
    }

    #[test]
    fn test_payload_fills_missing_and_composes_nfc() {
        let mut fields = FieldValues::new();
        // "e" followed by a combining acute accent
        fields.insert("headword".to_string(), "e\u{301}".to_string());
        fields.insert("stray".to_string(), "x".to_string());

        let body = payload(&fields, &schema());
        assert_eq!(body.len(), 3);
        assert_eq!(body["headword"], json!("\u{e9}"));
        assert_eq!(body["english"], json!(""));
        assert!(!body.contains_key("stray"));
        assert!(!body.contains_key("id"));
    }
}
