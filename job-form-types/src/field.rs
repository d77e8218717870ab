use crate::{DefaultValue, FieldPath, FieldValue, Rule};

/// Message for a choice field holding something outside its option set.
pub const NOT_AN_OPTION: &str = "Please choose one of the listed options";

/// Message for a text field holding a non-text value.
pub const NOT_TEXT: &str = "Please enter text";

/// A single field in a form.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// The path to this field's value in `FormValues`.
    path: FieldPath,

    /// The prompt text shown next to the field.
    ask: String,

    /// The kind of field (determines the input widget and accepted values).
    kind: FieldKind,

    /// Validation rules, applied in order.
    rules: Vec<Rule>,

    /// Default value for this field.
    default: DefaultValue,
}

impl FieldSchema {
    /// Create a new field without rules.
    pub fn new(path: impl Into<FieldPath>, ask: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            ask: ask.into(),
            kind,
            rules: Vec::new(),
            default: DefaultValue::None,
        }
    }

    /// Append a validation rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Pre-fill the field with a value the user can modify.
    pub fn with_suggestion(mut self, value: impl Into<FieldValue>) -> Self {
        self.set_suggestion(value);
        self
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn ask(&self) -> &str {
        &self.ask
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default(&self) -> &DefaultValue {
        &self.default
    }

    /// Set a suggested default value.
    pub fn set_suggestion(&mut self, value: impl Into<FieldValue>) {
        self.default = DefaultValue::Suggested(value.into());
    }

    /// Whether a required rule is attached.
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(Rule::is_required)
    }

    /// The value the field holds before the user touches it.
    ///
    /// Suggestions win; otherwise selects start at their first option and
    /// everything else starts unset.
    pub fn initial_value(&self) -> Option<FieldValue> {
        if let Some(suggested) = self.default.value() {
            return Some(self.normalize(suggested.clone()));
        }
        match &self.kind {
            FieldKind::Select(select) => select.options.first().map(|o| FieldValue::Int(o.value)),
            _ => None,
        }
    }

    /// Convert raw input into the representation this field stores.
    ///
    /// Radio codes become `ChosenVariant`, numeric select values become `Int`.
    /// Values that can't be converted are returned unchanged and fail validation.
    pub fn normalize(&self, value: FieldValue) -> FieldValue {
        match (&self.kind, value) {
            (FieldKind::OneOf(one_of), FieldValue::String(code)) => match one_of.position(&code) {
                Some(idx) => FieldValue::ChosenVariant(idx),
                None => FieldValue::String(code),
            },
            (FieldKind::Select(_), FieldValue::String(raw)) => match raw.trim().parse::<i64>() {
                Ok(n) => FieldValue::Int(n),
                Err(_) => FieldValue::String(raw),
            },
            (_, value) => value,
        }
    }

    /// Validate a value for this field.
    ///
    /// The required check runs first, then the kind's membership check, then
    /// the remaining rules in declaration order. The first failure wins.
    /// A blank value on an optional choice field still has to be an option.
    pub fn validate(&self, value: Option<&FieldValue>) -> Result<(), String> {
        let required = self.rules.iter().find_map(|rule| match rule {
            Rule::Required { message } => Some(message),
            _ => None,
        });

        let value = match value {
            Some(value) if !value.is_blank() => value,
            Some(value) if self.kind.is_choice() && required.is_none() => {
                return self.kind.check_membership(value);
            }
            _ => return required.map_or(Ok(()), |message| Err(message.clone())),
        };

        self.kind.check_membership(value)?;

        for rule in self.rules.iter().filter(|r| !r.is_required()) {
            rule.check(value)?;
        }
        Ok(())
    }

    /// Human-readable form of a stored value.
    pub fn display_value(&self, value: &FieldValue) -> Option<String> {
        match (&self.kind, value) {
            (FieldKind::Input | FieldKind::Multiline, FieldValue::String(s)) => Some(s.clone()),
            (FieldKind::OneOf(one_of), FieldValue::ChosenVariant(idx)) => {
                one_of.variants.get(*idx).map(|v| v.label.clone())
            }
            (FieldKind::Select(select), FieldValue::Int(n)) => select
                .options
                .iter()
                .find(|o| o.value == *n)
                .map(|o| o.label.clone()),
            _ => None,
        }
    }
}

/// The kind of field, determining the input widget and accepted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Input,

    /// Multi-line text input (textarea).
    Multiline,

    /// Pick exactly one of a group of coded options (radio buttons).
    OneOf(OneOfField),

    /// Pick one of a list of numeric options (select box).
    Select(SelectField),
}

impl FieldKind {
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::OneOf(_) | Self::Select(_))
    }

    fn check_membership(&self, value: &FieldValue) -> Result<(), String> {
        let accepted = match (self, value) {
            (Self::Input | Self::Multiline, FieldValue::String(_)) => true,
            (Self::Input | Self::Multiline, _) => return Err(NOT_TEXT.to_string()),
            (Self::OneOf(one_of), FieldValue::ChosenVariant(idx)) => *idx < one_of.variants.len(),
            (Self::Select(select), FieldValue::Int(n)) => {
                select.options.iter().any(|o| o.value == *n)
            }
            _ => false,
        };
        if accepted {
            Ok(())
        } else {
            Err(NOT_AN_OPTION.to_string())
        }
    }
}

/// One option of a radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// The submitted value, e.g. `"sales"`.
    pub code: String,

    /// Text shown for this option, e.g. `"Sales"`.
    pub label: String,
}

impl Variant {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Configuration for a radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOfField {
    pub variants: Vec<Variant>,
}

impl OneOfField {
    pub fn new(variants: Vec<Variant>) -> Self {
        Self { variants }
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Index of the variant with the given code.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.code == code)
    }
}

/// One option of a select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Configuration for a select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub options: Vec<SelectOption>,
}

impl SelectField {
    /// Build options whose labels come from a `{}` pattern, e.g. `"${}K"`.
    pub fn with_pattern(values: &[i64], pattern: &str) -> Self {
        Self {
            options: values
                .iter()
                .map(|v| SelectOption::new(*v, pattern.replace("{}", &v.to_string())))
                .collect(),
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Index of the option with the given value.
    pub fn position(&self, value: i64) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }
}
