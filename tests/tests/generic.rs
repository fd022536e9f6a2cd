//! The generic `assert_validates` form.

use modelspec_tests::fixtures::EMAIL_PATTERN;
use modelspec_tests::prelude::*;
use pretty_assertions::assert_eq;

fn registry() -> Registry {
    fixtures::init_tracing();
    fixtures::registry().unwrap()
}

fn pattern(source: &str) -> Value {
    Value::pattern(source).unwrap()
}

#[test]
fn test_identical_pattern_passes() {
    let registry = registry();

    assert_validates(
        registry.model("Account").unwrap(),
        "email",
        &options! { "format" => options! { "with" => pattern(EMAIL_PATTERN) } },
    );
}

#[test]
fn test_different_pattern_fails() {
    // GIVEN Account.email declared with the email pattern
    let registry = registry();
    let mut inspector = Inspector::with_sink(Collector::new());

    // WHEN asserting a different pattern
    let verdict = inspector
        .assert_validates(
            registry.model("Account").unwrap(),
            "email",
            &options! { "format" => options! { "with" => pattern(r"@") } },
        )
        .unwrap();

    // THEN it fails as an options mismatch
    assert_eq!(verdict.failure().map(Failure::category), Some("options mismatch"));
    assert_eq!(
        inspector.sink().reports()[0].message.as_deref(),
        Some(
            r"Account.email: format options expected { format: { with: /@/ } }, found { with: /\A[^@\s]+@[^@\s]+\z/ }"
        )
    );
}

#[test]
fn test_wrapped_configuration_accepted() {
    // GIVEN a rule whose declared options are themselves wrapped in the kind name
    let spec = options! { "length" => options! { "maximum" => 100 } };
    let mut builder = RegistryBuilder::new();
    builder
        .add_model("Post")
        .validates_length_of(&["title"], spec.clone())
        .validates_length_of(&["body"], options! { "maximum" => 100 })
        .done()
        .unwrap();
    let registry = builder.build().unwrap();
    let post = registry.model("Post").unwrap();

    // THEN the same spec matches both the wrapped and the bare declaration
    assert_validates(post, "title", &spec);
    assert_validates(post, "body", &spec);
}

#[test]
fn test_range_option() {
    let registry = registry();

    assert_validates(
        registry.model("Account").unwrap(),
        "password",
        &options! { "length" => options! { "within" => 8..=64 } },
    );
}

#[test]
fn test_every_kind_name_resolves() {
    let registry = registry();
    let account = registry.model("Account").unwrap();
    let mut inspector = Inspector::with_sink(Collector::new());

    for kind in ConstraintKind::ALL {
        let result = inspector.assert_validates(account, "nickname", &options! { kind.name() => options!() });
        assert_eq!(
            result.map(|v| v.failure().cloned()),
            Ok(Some(Failure::missing_constraint("Account", "nickname")))
        );
    }
    assert_eq!(inspector.sink().len(), ConstraintKind::ALL.len());
}

#[test]
fn test_unknown_kind_name_reports_nothing() {
    let registry = registry();
    let mut inspector = Inspector::with_sink(Collector::new());

    let result = inspector.assert_validates(
        registry.model("Account").unwrap(),
        "email",
        &options! { "formats" => options!() },
    );

    assert_eq!(result, Err(InspectorError::UnknownKindName("formats".into())));
    assert!(inspector.sink().is_empty());
}

#[test]
#[should_panic(expected = "invalid constraint spec: constraint spec must have exactly one entry, found 2")]
fn test_free_function_panics_on_malformed_spec() {
    let registry = registry();

    assert_validates(
        registry.model("Account").unwrap(),
        "email",
        &options! { "format" => options!(), "length" => options!() },
    );
}

#[test]
#[should_panic(expected = "assert_validates failed: Account.email: expected length, found format")]
fn test_free_function_panics_on_kind_mismatch() {
    let registry = registry();

    assert_validates(
        registry.model("Account").unwrap(),
        "email",
        &options! { "length" => options! { "maximum" => 100 } },
    );
}
