//! The form controller: live values, per-field errors and the submit snapshot.
//!
//! Every edit and every submit is handled to completion before the next one;
//! the controller is owned by whatever drives it and is never shared.

use tracing::{debug, info};

use crate::{
    FieldPath, FieldValue, FormDefinition, FormError, FormValues, Snapshot, Summary,
    ValidationState,
};

type Observer = Box<dyn FnMut(&ValidationState)>;

/// Handle returned by [`FormController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum SubmitOutcome {
    /// Every field passed; a new snapshot is available.
    Accepted,

    /// At least one field failed; any previous snapshot was discarded.
    Rejected {
        /// Failing fields, in form order.
        failed: Vec<FieldPath>,
    },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Holds a form's current values and validation state.
pub struct FormController {
    definition: FormDefinition,
    values: FormValues,
    validation: ValidationState,
    snapshot: Option<Snapshot>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: usize,
    submit_count: usize,
}

impl FormController {
    /// Create a controller with every field at its initial value.
    pub fn new(definition: FormDefinition) -> Self {
        let mut values = FormValues::new();
        for field in definition.fields() {
            if let Some(initial) = field.initial_value() {
                values.insert(field.path().clone(), initial);
            }
        }

        Self {
            definition,
            values,
            validation: ValidationState::new(),
            snapshot: None,
            observers: Vec::new(),
            next_subscription: 0,
            submit_count: 0,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, path: impl Into<FieldPath>) -> Option<&FieldValue> {
        self.values.get(&path.into())
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    /// The error currently shown for a field.
    pub fn error(&self, path: impl Into<FieldPath>) -> Option<&str> {
        self.validation.error(&path.into())
    }

    /// The values of the last accepted submit, if the latest submit was accepted.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// The rendered snapshot, if there is one.
    pub fn summary(&self) -> Option<Summary> {
        crate::summary::render(&self.definition, self.snapshot.as_ref())
    }

    /// Number of submit attempts so far.
    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Update a field and re-validate it.
    ///
    /// Radio codes and numeric strings are converted to the field's stored form.
    /// Only this field's error changes; the snapshot is left alone.
    pub fn set_field_value(
        &mut self,
        path: impl Into<FieldPath>,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let path = path.into();
        let field = self
            .definition
            .field(&path)
            .ok_or_else(|| FormError::UnknownField(path.clone()))?;

        let value = field.normalize(value.into());
        let outcome = field.validate(Some(&value));
        self.values.insert(path.clone(), value);
        self.record(path, outcome);
        Ok(())
    }

    /// Return a field to its initial value and re-validate it.
    pub fn clear_field(&mut self, path: impl Into<FieldPath>) -> Result<(), FormError> {
        let path = path.into();
        let field = self
            .definition
            .field(&path)
            .ok_or_else(|| FormError::UnknownField(path.clone()))?;

        let initial = field.initial_value();
        let outcome = field.validate(initial.as_ref());
        match initial {
            Some(value) => {
                self.values.insert(path.clone(), value);
            }
            None => {
                self.values.remove(&path);
            }
        }
        self.record(path, outcome);
        Ok(())
    }

    /// Check a field's current value without touching any state.
    ///
    /// Returns the first failing rule's message, or `None` when the value passes.
    pub fn validate_field(&self, path: impl Into<FieldPath>) -> Result<Option<String>, FormError> {
        let path = path.into();
        let field = self
            .definition
            .field(&path)
            .ok_or_else(|| FormError::UnknownField(path.clone()))?;
        Ok(field.validate(self.values.get(&path)).err())
    }

    /// Validate every field, then either capture a snapshot or discard the old one.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.submit_count += 1;

        let mut validation = ValidationState::new();
        let mut failed = Vec::new();
        for field in self.definition.fields() {
            let outcome = field.validate(self.values.get(field.path()));
            if outcome.is_err() {
                failed.push(field.path().clone());
            }
            validation.set(field.path().clone(), outcome);
        }
        self.validation = validation;

        let outcome = if failed.is_empty() {
            info!(attempt = self.submit_count, "submission accepted");
            self.snapshot = Some(Snapshot::new(self.values.clone()));
            SubmitOutcome::Accepted
        } else {
            info!(
                attempt = self.submit_count,
                failed = failed.len(),
                "submission rejected"
            );
            self.snapshot = None;
            SubmitOutcome::Rejected { failed }
        };

        self.notify();
        outcome
    }

    /// Register an observer of the aggregate validation state.
    ///
    /// Observers run after every edit and every submit attempt.
    pub fn subscribe(&mut self, observer: impl FnMut(&ValidationState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    fn record(&mut self, path: FieldPath, outcome: Result<(), String>) {
        match &outcome {
            Ok(()) => debug!(field = %path, "field valid"),
            Err(message) => debug!(field = %path, %message, "field invalid"),
        }
        self.validation.set(path, outcome);
        self.notify();
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.validation);
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("values", &self.values)
            .field("validation", &self.validation)
            .field("snapshot", &self.snapshot)
            .field("observers", &self.observers.len())
            .field("submit_count", &self.submit_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{FieldKind, FieldSchema, OneOfField, Rule, SelectField, Variant};

    fn definition() -> FormDefinition {
        FormDefinition::new(vec![
            FieldSchema::new(
                "team",
                "Team",
                FieldKind::OneOf(OneOfField::new(vec![
                    Variant::new("red", "Red team"),
                    Variant::new("blue", "Blue team"),
                ])),
            )
            .with_rule(Rule::required()),
            FieldSchema::new(
                "budget",
                "Budget",
                FieldKind::Select(SelectField::with_pattern(&[10, 20], "{} coins")),
            ),
            FieldSchema::new("motto", "Motto", FieldKind::Multiline)
                .with_rule(Rule::required())
                .with_rule(Rule::min_length(4, "longer please")),
        ])
    }

    #[test]
    fn starts_with_select_defaults() {
        let controller = FormController::new(definition());
        assert_eq!(controller.value("budget"), Some(&FieldValue::Int(10)));
        assert_eq!(controller.value("team"), None);
        assert!(controller.validation().is_valid());
        assert!(controller.snapshot().is_none());
    }

    #[test]
    fn edit_validates_only_that_field() {
        let mut controller = FormController::new(definition());
        controller.set_field_value("motto", "go").unwrap();

        assert_eq!(controller.error("motto"), Some("longer please"));
        assert_eq!(controller.error("team"), None);
        assert_eq!(controller.validation().len(), 1);

        controller.set_field_value("motto", "go team").unwrap();
        assert_eq!(controller.error("motto"), None);
    }

    #[test]
    fn unknown_field_is_an_error() {
        let mut controller = FormController::new(definition());
        let err = controller.set_field_value("nickname", "x").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(p) if p.as_str() == "nickname"));
        assert!(controller.validate_field("nickname").is_err());
        assert!(controller.clear_field("nickname").is_err());
    }

    #[test]
    fn validate_field_is_pure() {
        let mut controller = FormController::new(definition());
        controller.set_field_value("motto", "ok").unwrap();

        let first = controller.validate_field("team").unwrap();
        let second = controller.validate_field("team").unwrap();
        assert_eq!(first, Some("*required".to_string()));
        assert_eq!(first, second);
        // Still only the edited field carries an error.
        assert_eq!(controller.error("team"), None);
    }

    #[test]
    fn rejected_submit_reports_failures_in_order() {
        let mut controller = FormController::new(definition());
        let outcome = controller.submit();

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                failed: vec![FieldPath::new("team"), FieldPath::new("motto")]
            }
        );
        assert_eq!(controller.error("team"), Some("*required"));
        assert_eq!(controller.error("motto"), Some("*required"));
        assert!(controller.snapshot().is_none());
        assert_eq!(controller.submit_count(), 1);
    }

    #[test]
    fn accepted_submit_captures_snapshot() {
        let mut controller = FormController::new(definition());
        controller.set_field_value("team", "blue").unwrap();
        controller.set_field_value("budget", "20").unwrap();
        controller.set_field_value("motto", "onwards").unwrap();

        assert!(controller.submit().is_accepted());
        let snapshot = controller.snapshot().unwrap();
        assert_eq!(snapshot.values(), controller.values());
        assert_eq!(
            snapshot.get(&FieldPath::new("team")),
            Some(&FieldValue::ChosenVariant(1))
        );

        // Edits after submit don't reach the snapshot.
        controller.set_field_value("motto", "x").unwrap();
        let snapshot = controller.snapshot().unwrap();
        assert_eq!(
            snapshot.get(&FieldPath::new("motto")),
            Some(&FieldValue::from("onwards"))
        );
    }

    #[test]
    fn invalid_resubmit_clears_snapshot() {
        let mut controller = FormController::new(definition());
        controller.set_field_value("team", "red").unwrap();
        controller.set_field_value("motto", "onwards").unwrap();
        assert!(controller.submit().is_accepted());

        controller.set_field_value("motto", "no").unwrap();
        assert!(!controller.submit().is_accepted());
        assert!(controller.snapshot().is_none());
        assert!(controller.summary().is_none());
    }

    #[test]
    fn clear_field_restores_initial_value() {
        let mut controller = FormController::new(definition());
        controller.set_field_value("budget", 20).unwrap();
        controller.clear_field("budget").unwrap();
        assert_eq!(controller.value("budget"), Some(&FieldValue::Int(10)));

        controller.set_field_value("team", "red").unwrap();
        controller.clear_field("team").unwrap();
        assert_eq!(controller.value("team"), None);
        assert_eq!(controller.error("team"), Some("*required"));
    }

    #[test]
    fn observers_see_every_change() {
        let mut controller = FormController::new(definition());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = controller.subscribe(move |state| sink.borrow_mut().push(state.len()));

        controller.set_field_value("motto", "no").unwrap();
        let _ = controller.submit();
        assert_eq!(*seen.borrow(), vec![1, 2]);

        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        controller.set_field_value("motto", "enough").unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }
}
