use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entry::FieldValues;

/// Number of leading fields shown as columns in the entry list
pub const SUMMARY_FIELD_COUNT: usize = 8;

/// Writing direction hint for a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// One recognized entry field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Wire key, unique within a schema
    pub name: String,
    /// Display label, may itself be right-to-left
    pub label: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            direction: Direction::Ltr,
            multiline: false,
            required: false,
        }
    }

    pub fn rtl(mut self) -> Self {
        self.direction = Direction::Rtl;
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema has no fields")]
    Empty,

    #[error("Field with empty name at position {0}")]
    EmptyName(usize),

    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    #[error("Schema has no required field")]
    NoRequiredField,
}

/// Ordered catalog of the fields an entry may carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldSpec>", into = "Vec<FieldSpec>")]
pub struct EntrySchema {
    fields: Vec<FieldSpec>,
}

impl EntrySchema {
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::new();
        for (position, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyName(position));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        if !fields.iter().any(|f| f.required) {
            return Err(SchemaError::NoRequiredField);
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Fields used as list columns
    pub fn summary_fields(&self) -> &[FieldSpec] {
        &self.fields[..self.fields.len().min(SUMMARY_FIELD_COUNT)]
    }

    /// Every field mapped to the empty string
    pub fn empty_values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), String::new()))
            .collect()
    }
}

impl TryFrom<Vec<FieldSpec>> for EntrySchema {
    type Error = SchemaError;

    fn try_from(fields: Vec<FieldSpec>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<EntrySchema> for Vec<FieldSpec> {
    fn from(schema: EntrySchema) -> Self {
        schema.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headword_schema() -> EntrySchema {
        EntrySchema::new(vec![
            FieldSpec::new("headword", "Headword").rtl().required(),
            FieldSpec::new("english", "English"),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = EntrySchema::new(vec![
            FieldSpec::new("word", "Word").required(),
            FieldSpec::new("word", "Again"),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("word".to_string()));
    }

    #[test]
    fn test_requires_a_required_field() {
        let err = EntrySchema::new(vec![FieldSpec::new("english", "English")]).unwrap_err();
        assert_eq!(err, SchemaError::NoRequiredField);
        assert_eq!(EntrySchema::new(vec![]).unwrap_err(), SchemaError::Empty);
    }

    #[test]
    fn test_empty_values_cover_every_field() {
        let values = headword_schema().empty_values();
        assert_eq!(values.len(), 2);
        assert!(values.values().all(String::is_empty));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[{"name":"word","label":"وشە","direction":"rtl","required":true},{"name":"ipa","label":"IPA"}]"#;
        let schema: EntrySchema = serde_json::from_str(json).unwrap();
        assert!(schema.field("word").unwrap().is_rtl());
        assert!(!schema.field("ipa").unwrap().required);

        let bad = r#"[{"name":"ipa","label":"IPA"}]"#;
        assert!(serde_json::from_str::<EntrySchema>(bad).is_err());
    }
}
