//! Integration tests for job-form

use std::cell::RefCell;
use std::rc::Rc;

use job_form::{
    Choice, FieldKind, FieldValue, Form, FormError, REQUIRED_MESSAGE, ScriptedBackend,
    SubmitOutcome, ValidationState,
};

#[derive(Choice, Debug, Clone, Copy, PartialEq)]
enum Size {
    Small,
    #[value("m")]
    Medium,
    #[label("Extra large")]
    ExtraLarge,
}

pub fn no_spaces(value: &FieldValue) -> Result<(), String> {
    match value.as_str() {
        Some(text) if text.contains(' ') => Err("No spaces allowed".into()),
        _ => Ok(()),
    }
}

#[derive(Form, Debug, PartialEq)]
#[title("Order")]
#[prelude("Welcome to the shop!")]
#[epilogue("Place order")]
struct Order {
    #[ask("Which size?")]
    #[required("Pick a size")]
    size: Size,

    #[select(-1, 0, 1)]
    #[display("{} step")]
    offset: i64,

    #[required]
    #[validate(no_spaces)]
    #[min_len(3, "Too short")]
    user_name: String,

    #[ask("Notes")]
    #[multiline]
    notes: String,
}

fn valid_script() -> ScriptedBackend {
    ScriptedBackend::new()
        .with_choice("size", "m")
        .with_int("offset", -1)
        .with_string("user_name", "alice")
}

#[test]
fn test_definition_from_attributes() {
    let definition = Order::definition();

    assert_eq!(definition.title.as_deref(), Some("Order"));
    assert_eq!(definition.prelude.as_deref(), Some("Welcome to the shop!"));
    assert_eq!(definition.epilogue.as_deref(), Some("Place order"));
    assert_eq!(definition.len(), 4);

    let fields = definition.fields();
    assert_eq!(fields[0].ask(), "Which size?");
    // Prompt falls back to the field name
    assert_eq!(fields[2].ask(), "User Name");
    assert!(matches!(fields[3].kind(), FieldKind::Multiline));
    assert!(!fields[3].is_required());

    let FieldKind::OneOf(one_of) = fields[0].kind() else {
        panic!("size should be a radio group");
    };
    let labels: Vec<_> = one_of.variants().iter().map(|v| v.label.as_str()).collect();
    assert_eq!(labels, ["Small", "Medium", "Extra large"]);
}

#[test]
fn test_choice_codes() {
    assert_eq!(Size::Small.code(), "small");
    assert_eq!(Size::Medium.code(), "m");
    assert_eq!(Size::ExtraLarge.code(), "extralarge");
    assert_eq!(Size::ExtraLarge.label(), "Extra large");
    assert_eq!(Size::from_code("m"), Some(Size::Medium));
    assert_eq!(Size::from_code("medium"), None);
    assert_eq!(Size::from_index(3), None);
}

#[test]
fn test_run_with_scripted_backend() {
    let order = Order::builder().run(valid_script().submit()).unwrap();

    assert_eq!(
        order,
        Some(Order {
            size: Size::Medium,
            offset: -1,
            user_name: "alice".to_string(),
            notes: String::new(),
        })
    );
}

#[test]
fn test_run_without_submit_yields_nothing() {
    let order = Order::builder().run(valid_script()).unwrap();
    assert_eq!(order, None);
}

#[test]
fn test_run_after_rejected_submit_yields_nothing() {
    let script = valid_script()
        .submit()
        .with_string("user_name", "al ice")
        .submit();
    assert_eq!(Order::builder().run(script).unwrap(), None);
}

#[test]
fn test_last_accepted_submission_wins() {
    let script = valid_script()
        .submit()
        .with_choice("size", "small")
        .with_string("user_name", "bob")
        .submit()
        .with_string("user_name", "x");

    let order = Order::builder().run(script).unwrap().unwrap();
    assert_eq!(order.size, Size::Small);
    assert_eq!(order.user_name, "bob");
}

#[test]
fn test_unknown_field_is_an_error() {
    let err = Order::builder()
        .run(ScriptedBackend::new().with_string("nickname", "al"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown field: nickname");

    let mut controller = Order::builder().controller();
    assert!(matches!(
        controller.set_field_value("nickname", "al"),
        Err(FormError::UnknownField(_))
    ));
}

#[test]
fn test_rules_in_declaration_order() {
    let mut controller = Order::builder().controller();

    controller.set_field_value("user_name", "").unwrap();
    assert_eq!(controller.error("user_name"), Some(REQUIRED_MESSAGE));

    // Custom validator is declared before min_len
    controller.set_field_value("user_name", "a b").unwrap();
    assert_eq!(controller.error("user_name"), Some("No spaces allowed"));

    controller.set_field_value("user_name", "ab").unwrap();
    assert_eq!(controller.error("user_name"), Some("Too short"));

    controller.set_field_value("user_name", "abc").unwrap();
    assert_eq!(controller.error("user_name"), None);
}

#[test]
fn test_custom_required_message_and_membership() {
    let mut controller = Order::builder().controller();
    assert_eq!(
        controller.submit(),
        SubmitOutcome::Rejected {
            failed: vec!["size".into(), "user_name".into()]
        }
    );
    assert_eq!(controller.error("size"), Some("Pick a size"));
    assert_eq!(controller.error("offset"), None);

    controller.set_field_value("size", "huge").unwrap();
    assert_eq!(
        controller.error("size"),
        Some("Please choose one of the listed options")
    );

    controller.set_field_value("offset", 7).unwrap();
    assert_eq!(
        controller.error("offset"),
        Some("Please choose one of the listed options")
    );
}

#[test]
fn test_validate_field_is_idempotent() {
    let mut controller = Order::builder().controller();
    controller.set_field_value("user_name", "a b").unwrap();

    let first = controller.validate_field("user_name").unwrap();
    let second = controller.validate_field("user_name").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("No spaces allowed"));
    assert_eq!(controller.submit_count(), 0);
}

#[test]
fn test_clear_field_restores_initial_value() {
    let mut controller = Order::builder().suggest_user_name("carol").controller();
    assert_eq!(controller.value("offset"), Some(&FieldValue::Int(-1)));

    controller.set_field_value("offset", 1).unwrap();
    controller.clear_field("offset").unwrap();
    assert_eq!(controller.value("offset"), Some(&FieldValue::Int(-1)));

    controller.set_field_value("user_name", "dave").unwrap();
    controller.clear_field("user_name").unwrap();
    assert_eq!(
        controller.value("user_name"),
        Some(&FieldValue::String("carol".to_string()))
    );

    controller.set_field_value("size", "small").unwrap();
    controller.clear_field("size").unwrap();
    assert_eq!(controller.value("size"), None);
    assert_eq!(controller.error("size"), Some("Pick a size"));
}

#[test]
fn test_observers_see_every_change() {
    let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
    let mut controller = Order::builder().controller();

    let sink = Rc::clone(&seen);
    let id = controller.subscribe(move |state: &ValidationState| {
        sink.borrow_mut().push(state.len());
    });

    controller.set_field_value("user_name", "a").unwrap();
    let _ = controller.submit();
    assert_eq!(*seen.borrow(), [1, 2]);

    assert!(controller.unsubscribe(id));
    assert!(!controller.unsubscribe(id));

    controller.set_field_value("user_name", "alice").unwrap();
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_summary_after_submit() {
    let mut controller = Order::builder()
        .suggest_size(Size::ExtraLarge)
        .suggest_offset(1)
        .suggest_user_name("erin")
        .controller();

    assert!(controller.summary().is_none());
    assert!(controller.submit().is_accepted());

    let summary = controller.summary().unwrap();
    assert_eq!(summary.value_of("size"), Some("Extra large"));
    assert_eq!(summary.value_of("offset"), Some("1 step"));
    assert_eq!(summary.value_of("notes"), Some(""));
    assert_eq!(
        summary.to_string(),
        "Which size?: Extra large\nOffset: 1 step\nUser Name: erin\nNotes: \n"
    );
}
