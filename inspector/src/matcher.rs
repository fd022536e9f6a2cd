//! Per-kind matchers.
//!
//! Each matcher is a pure function of the model metadata and the
//! expectation: it locates descriptors, checks the kind, compares options and
//! returns a [`Verdict`]. Nothing is reported from here.

use modelspec_core::{Options, Value};
use modelspec_registry::{AssociationKind, ConstraintDescriptor, ConstraintKind, ModelMetadata};
use tracing::trace;

use crate::options;
use crate::verdict::{Failure, InspectorError, InspectorResult, Verdict};

/// The model declares association `name` of `expected` kind, with every
/// expected option declared with an equal value.
pub fn association<M: ModelMetadata + ?Sized>(
    model: &M,
    expected: AssociationKind,
    name: &str,
    expected_options: &Options,
) -> Verdict {
    check_association(model, expected, name, expected_options).into()
}

fn check_association<M: ModelMetadata + ?Sized>(
    model: &M,
    expected: AssociationKind,
    name: &str,
    expected_options: &Options,
) -> Result<(), Failure> {
    let descriptor = model
        .association_for(name)
        .ok_or_else(|| Failure::missing_association(model.model_name(), name))?;
    trace!(model = model.model_name(), name, kind = %descriptor.kind, "found association");

    if descriptor.kind != expected {
        return Err(Failure::kind_mismatch(
            model.model_name(),
            name,
            expected.name(),
            vec![descriptor.kind.name().to_string()],
        ));
    }

    match options::first_difference(&descriptor.options, expected_options) {
        None => Ok(()),
        Some(diff) => Err(Failure::OptionsMismatch {
            model: model.model_name().to_string(),
            subject: name.to_string(),
            kind: expected.name().to_string(),
            key: Some(diff.key.to_string()),
            expected: diff.expected.clone(),
            actual: diff.actual.cloned(),
        }),
    }
}

/// The model declares a presence constraint over `attribute`.
pub fn presence<M: ModelMetadata + ?Sized>(model: &M, attribute: &str) -> Verdict {
    kind_only(model, attribute, ConstraintKind::Presence)
}

/// The model declares a numericality constraint over `attribute`.
pub fn numericality<M: ModelMetadata + ?Sized>(model: &M, attribute: &str) -> Verdict {
    kind_only(model, attribute, ConstraintKind::Numericality)
}

fn kind_only<M: ModelMetadata + ?Sized>(model: &M, attribute: &str, kind: ConstraintKind) -> Verdict {
    lookup(model, attribute)
        .and_then(|descriptors| first_of_kind(model, attribute, &descriptors, kind).map(|_| ()))
        .into()
}

/// The model declares one uniqueness constraint covering exactly
/// `attributes`, in any order.
///
/// Attributes are visited in the order given; the first one with no
/// declarations at all fails the assertion without looking further.
pub fn uniqueness<M: ModelMetadata + ?Sized>(model: &M, attributes: &[&str]) -> Verdict {
    check_uniqueness(model, attributes).into()
}

fn check_uniqueness<M: ModelMetadata + ?Sized>(
    model: &M,
    attributes: &[&str],
) -> Result<(), Failure> {
    let mut found = false;
    let mut declared_sets: Vec<&[String]> = Vec::new();
    let mut seen_kinds: Vec<ConstraintKind> = Vec::new();

    for attribute in attributes {
        let descriptors = lookup(model, attribute)?;

        for descriptor in descriptors {
            if !seen_kinds.contains(&descriptor.kind) {
                seen_kinds.push(descriptor.kind);
            }
            if descriptor.kind != ConstraintKind::Uniqueness {
                continue;
            }
            if options::same_attribute_set(&descriptor.attributes, attributes) {
                found = true;
            } else if !declared_sets
                .iter()
                .any(|&set| options::same_attribute_set(set, &descriptor.attributes))
            {
                declared_sets.push(&descriptor.attributes);
            }
        }
    }

    if found {
        return Ok(());
    }

    let subject = attribute_list(attributes);
    if declared_sets.is_empty() {
        return Err(Failure::kind_mismatch(
            model.model_name(),
            subject,
            ConstraintKind::Uniqueness.name(),
            seen_kinds.iter().map(|k| k.name().to_string()).collect(),
        ));
    }

    Err(Failure::OptionsMismatch {
        model: model.model_name().to_string(),
        subject,
        kind: ConstraintKind::Uniqueness.name().to_string(),
        key: None,
        expected: sorted_attributes(attributes),
        actual: Some(Value::List(
            declared_sets.iter().map(|&set| sorted_attributes(set)).collect(),
        )),
    })
}

/// The model declares an inclusion constraint over `attribute`; when
/// `expected_options` is non-empty, the first one must carry exactly those
/// options.
pub fn inclusion<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    expected_options: &Options,
) -> Verdict {
    configured(model, attribute, ConstraintKind::Inclusion, expected_options)
}

/// Exclusion counterpart of [`inclusion`].
pub fn exclusion<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    expected_options: &Options,
) -> Verdict {
    configured(model, attribute, ConstraintKind::Exclusion, expected_options)
}

/// Confirmation counterpart of [`inclusion`].
pub fn confirmation<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    expected_options: &Options,
) -> Verdict {
    configured(model, attribute, ConstraintKind::Confirmation, expected_options)
}

fn configured<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    kind: ConstraintKind,
    expected_options: &Options,
) -> Verdict {
    check_configured(model, attribute, kind, expected_options).into()
}

fn check_configured<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    kind: ConstraintKind,
    expected_options: &Options,
) -> Result<(), Failure> {
    let descriptors = lookup(model, attribute)?;
    let descriptor = first_of_kind(model, attribute, &descriptors, kind)?;

    if expected_options.is_empty() || options::exact(&descriptor.options, expected_options) {
        return Ok(());
    }

    Err(Failure::OptionsMismatch {
        model: model.model_name().to_string(),
        subject: attribute.to_string(),
        kind: kind.name().to_string(),
        key: None,
        expected: Value::Map(expected_options.clone()),
        actual: Some(Value::Map(descriptor.options.clone())),
    })
}

/// The model declares the constraint described by a `{kind: configuration}`
/// spec, such as `{length: {maximum: 100}}`.
///
/// The declared options may equal either the whole spec or the bare
/// configuration; see [`options::wrapped_or_bare`]. A spec naming an unknown
/// kind is an error in the test itself and is returned as `Err` before the
/// model is consulted.
pub fn validates<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    spec: &Options,
) -> InspectorResult<Verdict> {
    let kind = resolve_spec(spec)?;
    Ok(check_validates(model, attribute, kind, spec).into())
}

/// Resolve the constraint kind named by a single-entry spec.
pub fn resolve_spec(spec: &Options) -> InspectorResult<ConstraintKind> {
    let mut entries = spec.keys();
    match (entries.next(), entries.next()) {
        (Some(name), None) => ConstraintKind::from_name(name)
            .ok_or_else(|| InspectorError::UnknownKindName(name.clone())),
        _ => Err(InspectorError::MalformedSpec {
            entries: spec.len(),
        }),
    }
}

fn check_validates<M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    kind: ConstraintKind,
    spec: &Options,
) -> Result<(), Failure> {
    let descriptors = lookup(model, attribute)?;
    let descriptor = first_of_kind(model, attribute, &descriptors, kind)?;

    if options::wrapped_or_bare(&descriptor.options, kind.name(), spec) {
        return Ok(());
    }

    Err(Failure::OptionsMismatch {
        model: model.model_name().to_string(),
        subject: attribute.to_string(),
        kind: kind.name().to_string(),
        key: None,
        expected: Value::Map(spec.clone()),
        actual: Some(Value::Map(descriptor.options.clone())),
    })
}

/// Fetch the descriptors for `attribute`, failing when there are none.
fn lookup<'m, M: ModelMetadata + ?Sized>(
    model: &'m M,
    attribute: &str,
) -> Result<Vec<&'m ConstraintDescriptor>, Failure> {
    let descriptors = model.constraints_for(attribute);
    trace!(
        model = model.model_name(),
        attribute,
        count = descriptors.len(),
        "looked up constraints"
    );
    if descriptors.is_empty() {
        return Err(Failure::missing_constraint(model.model_name(), attribute));
    }
    Ok(descriptors)
}

/// The first descriptor of `kind`, failing with the kinds that were declared.
fn first_of_kind<'d, M: ModelMetadata + ?Sized>(
    model: &M,
    attribute: &str,
    descriptors: &[&'d ConstraintDescriptor],
    kind: ConstraintKind,
) -> Result<&'d ConstraintDescriptor, Failure> {
    descriptors
        .iter()
        .copied()
        .find(|d| d.kind == kind)
        .ok_or_else(|| {
            Failure::kind_mismatch(
                model.model_name(),
                attribute,
                kind.name(),
                declared_kinds(descriptors),
            )
        })
}

/// Distinct kinds in declaration order.
fn declared_kinds(descriptors: &[&ConstraintDescriptor]) -> Vec<String> {
    let mut kinds: Vec<String> = Vec::new();
    for descriptor in descriptors {
        let name = descriptor.kind.name();
        if !kinds.iter().any(|k| k == name) {
            kinds.push(name.to_string());
        }
    }
    kinds
}

fn attribute_list(attributes: &[&str]) -> String {
    match attributes {
        [single] => single.to_string(),
        _ => format!("[{}]", attributes.join(", ")),
    }
}

fn sorted_attributes<S: AsRef<str>>(attributes: &[S]) -> Value {
    Value::List(
        options::attribute_set(attributes)
            .into_iter()
            .map(Value::from)
            .collect(),
    )
}
