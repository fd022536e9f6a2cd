//! Option comparison policies.
//!
//! Each assertion compares expected against declared configuration with one
//! of these policies:
//!
//! - [`exact`]: the whole mapping must be equal (inclusion, exclusion,
//!   confirmation).
//! - [`first_difference`]: every expected key must be declared with an equal
//!   value; extra declared keys are ignored (associations).
//! - [`wrapped_or_bare`]: dual acceptance for `{kind: configuration}` specs.
//! - [`same_attribute_set`]: order-independent attribute lists (uniqueness).

use modelspec_core::{Options, Value};
use std::collections::BTreeSet;

/// First expected option the declared options do not satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDiff<'a> {
    pub key: &'a str,
    pub expected: &'a Value,
    /// `None` when the key is not declared at all.
    pub actual: Option<&'a Value>,
}

/// Exact mapping equality: same keys, equal values.
pub fn exact(actual: &Options, expected: &Options) -> bool {
    actual == expected
}

/// Find the first expected key whose declared value is missing or different.
pub fn first_difference<'a>(actual: &'a Options, expected: &'a Options) -> Option<OptionDiff<'a>> {
    expected.iter().find_map(|(key, value)| {
        let declared = actual.get(key);
        (declared != Some(value)).then_some(OptionDiff {
            key,
            expected: value,
            actual: declared,
        })
    })
}

/// Compare declared options against a `{kind_name: configuration}` spec.
///
/// Accepts EITHER shape: the declared options may equal the whole spec
/// mapping, or the configuration nested under `kind_name`. Both branches are
/// part of the contract; callers rely on passing the constraint either
/// wrapped in its kind name or bare.
pub fn wrapped_or_bare(actual: &Options, kind_name: &str, spec: &Options) -> bool {
    let wrapped = exact(actual, spec);
    let bare = spec
        .get(kind_name)
        .and_then(Value::as_map)
        .is_some_and(|inner| exact(actual, inner));
    wrapped || bare
}

/// Attribute lists compared as sets.
pub fn attribute_set<S: AsRef<str>>(attributes: &[S]) -> BTreeSet<&str> {
    attributes.iter().map(AsRef::as_ref).collect()
}

/// Check two attribute lists cover the same attributes, ignoring order.
///
/// Repeated attributes collapse: `[username, email, email]` equals `[email, username]`.
pub fn same_attribute_set<A: AsRef<str>, B: AsRef<str>>(left: &[A], right: &[B]) -> bool {
    attribute_set(left) == attribute_set(right)
}
