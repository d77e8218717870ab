use std::fmt;

use crate::{FieldPath, FormDefinition, Snapshot};

/// One rendered field of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub path: FieldPath,
    pub prompt: String,
    pub value: String,
}

/// Display strings for an accepted submission, in form order.
///
/// Radio codes and select values are shown by their labels; text is passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    lines: Vec<SummaryLine>,
}

impl Summary {
    pub fn new(definition: &FormDefinition, snapshot: &Snapshot) -> Self {
        let lines = definition
            .fields()
            .iter()
            .map(|field| SummaryLine {
                path: field.path().clone(),
                prompt: field.ask().to_string(),
                value: snapshot
                    .get(field.path())
                    .and_then(|value| field.display_value(value))
                    .unwrap_or_default(),
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    /// The display string for one field.
    pub fn value_of(&self, path: impl Into<FieldPath>) -> Option<&str> {
        let path = path.into();
        self.lines
            .iter()
            .find(|line| line.path == path)
            .map(|line| line.value.as_str())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}: {}", line.prompt, line.value)?;
        }
        Ok(())
    }
}

/// Render a snapshot, or nothing when there is none.
pub fn render(definition: &FormDefinition, snapshot: Option<&Snapshot>) -> Option<Summary> {
    snapshot.map(|snapshot| Summary::new(definition, snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldKind, FieldSchema, FieldValue, FormValues, OneOfField, SelectField, Variant};

    fn definition() -> FormDefinition {
        FormDefinition::new(vec![
            FieldSchema::new(
                "pet",
                "Favourite pet",
                FieldKind::OneOf(OneOfField::new(vec![
                    Variant::new("cat", "A cat"),
                    Variant::new("dog", "A dog"),
                ])),
            ),
            FieldSchema::new(
                "treats",
                "Treats per day",
                FieldKind::Select(SelectField::with_pattern(&[1, 2], "{} treats")),
            ),
            FieldSchema::new("name", "Name", FieldKind::Input),
        ])
    }

    #[test]
    fn renders_nothing_without_snapshot() {
        assert!(render(&definition(), None).is_none());
    }

    #[test]
    fn maps_codes_to_labels() {
        let mut values = FormValues::new();
        values.insert("pet", FieldValue::ChosenVariant(1));
        values.insert("treats", FieldValue::Int(2));
        values.insert("name", "Rex");
        let snapshot = Snapshot::new(values);

        let summary = render(&definition(), Some(&snapshot)).unwrap();
        assert_eq!(summary.value_of("pet"), Some("A dog"));
        assert_eq!(summary.value_of("treats"), Some("2 treats"));
        assert_eq!(summary.value_of("name"), Some("Rex"));
        assert_eq!(summary.value_of("age"), None);
        assert_eq!(
            summary.to_string(),
            "Favourite pet: A dog\nTreats per day: 2 treats\nName: Rex\n"
        );
    }

    #[test]
    fn unset_optional_field_renders_empty() {
        let mut values = FormValues::new();
        values.insert("pet", FieldValue::ChosenVariant(0));
        let summary = Summary::new(&definition(), &Snapshot::new(values));
        assert_eq!(summary.value_of("name"), Some(""));
        assert_eq!(summary.lines().len(), 3);
    }
}
