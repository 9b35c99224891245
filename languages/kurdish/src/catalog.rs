use ferheng_types::{EntrySchema, FieldSpec};

pub const CATALOG_NAMES: &[&str] = &["sorani", "compact"];

/// Full Sorani entry form: headword, transliterations, translations and usage notes
pub fn sorani() -> EntrySchema {
    build(vec![
        FieldSpec::new("word", "وشە (کوردی)").rtl().required(),
        FieldSpec::new("latin", "Latin"),
        FieldSpec::new("plural", "Plural"),
        FieldSpec::new("ipa", "IPA"),
        FieldSpec::new("definition", "پێناسە").rtl().multiline(),
        FieldSpec::new("english", "English"),
        FieldSpec::new("kurmanji", "Kurmanji"),
        FieldSpec::new("arabic", "Arabic").rtl(),
        FieldSpec::new("farsi", "Farsi").rtl(),
        FieldSpec::new("phrase", "Phrase").multiline(),
        FieldSpec::new("note", "Note").multiline(),
        FieldSpec::new("synonyms", "Synonyms").multiline(),
        FieldSpec::new("antonyms", "Antonyms").multiline(),
        FieldSpec::new("example", "Example").multiline(),
        FieldSpec::new("regional", "Regional").multiline(),
    ])
}

/// Smaller form without the usage sections
pub fn compact() -> EntrySchema {
    build(vec![
        FieldSpec::new("word", "وشە (کوردی)").rtl().required(),
        FieldSpec::new("latin", "Latin"),
        FieldSpec::new("ipa", "IPA"),
        FieldSpec::new("definition", "پێناسە").rtl().multiline(),
        FieldSpec::new("english", "English"),
        FieldSpec::new("kurmanji", "Kurmanji"),
        FieldSpec::new("arabic", "Arabic").rtl(),
        FieldSpec::new("farsi", "Farsi").rtl(),
        FieldSpec::new("example", "Example").multiline(),
    ])
}

pub fn by_name(name: &str) -> Option<EntrySchema> {
    match name.to_ascii_lowercase().as_str() {
        "sorani" => Some(sorani()),
        "compact" => Some(compact()),
        _ => None,
    }
}

fn build(fields: Vec<FieldSpec>) -> EntrySchema {
    EntrySchema::new(fields).expect("built-in catalog is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogs_are_valid() {
        for name in CATALOG_NAMES {
            let schema = by_name(name).unwrap();
            assert!(schema.contains("word"));
            assert!(schema.contains("definition"));
            assert!(schema.field("word").unwrap().required);
        }
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(sorani().fields().len(), 15);
        assert_eq!(compact().fields().len(), 9);
        assert_eq!(sorani().summary_fields().len(), 8);
    }

    #[test]
    fn test_rtl_fields() {
        let schema = sorani();
        let rtl: Vec<_> = schema
            .fields()
            .iter()
            .filter(|f| f.is_rtl())
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(rtl, ["word", "definition", "arabic", "farsi"]);
    }

    #[test]
    fn test_unknown_catalog() {
        assert!(by_name("kurmanji-only").is_none());
        assert!(by_name("SORANI").is_some());
    }
}
