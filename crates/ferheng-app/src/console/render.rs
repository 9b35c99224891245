use std::fmt::Write;

use ferheng_types::{Direction, Entry, EntrySchema, FieldSpec, FieldValues, ListState, Mode};

/// Right-to-left isolate
const RLI: char = '\u{2067}';
/// Pop directional isolate
const PDI: char = '\u{2069}';

/// Wrap right-to-left text in an isolate so it doesn't reorder its neighbours
pub fn directional(text: &str, direction: Direction) -> String {
    match direction {
        Direction::Rtl if !text.is_empty() => format!("{RLI}{text}{PDI}"),
        _ => text.to_string(),
    }
}

pub fn list(state: &ListState, schema: &EntrySchema) -> String {
    let mut out = String::from("Words List\n");

    let columns = schema.summary_fields();
    let header: Vec<String> = columns
        .iter()
        .map(|f| directional(&f.label, f.direction))
        .collect();
    let _ = writeln!(out, "id | {}", header.join(" | "));

    match state {
        ListState::Loaded(entries) => {
            for entry in entries {
                let id = entry.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
                let cells: Vec<String> = columns
                    .iter()
                    .map(|f| directional(&single_line(entry.value(&f.name)), f.direction))
                    .collect();
                let _ = writeln!(out, "{id} | {}", cells.join(" | "));
            }
        }
        ListState::Empty => out.push_str("No words found.\n"),
        ListState::FetchFailed(reason) => {
            let _ = writeln!(out, "No words shown: the store could not be reached ({reason})");
        }
    }

    out
}

pub fn draft(mode: &Mode, values: &FieldValues, schema: &EntrySchema) -> String {
    let mut out = match mode {
        Mode::Creating => String::from("New word\n"),
        Mode::Editing(id) => format!("Editing word {id}\n"),
    };

    for spec in schema.fields() {
        let value = values.get(&spec.name).map(String::as_str).unwrap_or("");
        field(&mut out, spec, value);
    }

    out
}

pub fn entry(entry: &Entry, schema: &EntrySchema) -> String {
    let mut out = match &entry.id {
        Some(id) => format!("Word {id}\n"),
        None => String::from("Unsaved word\n"),
    };

    for spec in schema.fields() {
        field(&mut out, spec, entry.value(&spec.name));
    }

    out
}

/// Field catalog, one line per field
pub fn fields(schema: &EntrySchema) -> String {
    let mut out = String::new();
    for spec in schema.fields() {
        let mut flags = Vec::new();
        if spec.required {
            flags.push("required");
        }
        if spec.is_rtl() {
            flags.push("rtl");
        }
        if spec.multiline {
            flags.push("multiline");
        }
        let _ = writeln!(
            out,
            "{:<12} {} {}",
            spec.name,
            directional(&spec.label, spec.direction),
            if flags.is_empty() {
                String::new()
            } else {
                format!("({})", flags.join(", "))
            }
        );
    }
    out
}

fn field(out: &mut String, spec: &FieldSpec, value: &str) {
    let marker = if spec.required { "*" } else { "" };
    let label = directional(&spec.label, spec.direction);

    if spec.multiline && value.contains('\n') {
        let _ = writeln!(out, "  {}{} [{}]:", label, marker, spec.name);
        for line in value.lines() {
            let _ = writeln!(out, "      {}", directional(line, spec.direction));
        }
    } else {
        let _ = writeln!(
            out,
            "  {}{} [{}]: {}",
            label,
            marker,
            spec.name,
            directional(value, spec.direction)
        );
    }
}

fn single_line(value: &str) -> String {
    value.lines().collect::<Vec<_>>().join(" / ")
}
