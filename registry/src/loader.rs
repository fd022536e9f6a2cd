//! Loader for JSON model files.
//!
//! A model file lists models with their declared validations and
//! associations:
//!
//! ```json
//! { "models": [
//!   { "name": "Like",
//!     "validations": [ { "kind": "presence", "attributes": ["email"] } ],
//!     "associations": [ { "kind": "belongs_to", "name": "likeable",
//!                         "options": { "polymorphic": true } } ] } ] }
//! ```
//!
//! Option values are plain JSON, except for single-key objects tagged
//! `$symbol`, `$pattern` or `$range`, which become symbols, patterns and
//! inclusive ranges.

use std::path::Path;

use modelspec_core::{Options, Value};
use serde::Deserialize;
use serde_json::Map;
use tracing::debug;

use crate::builder::{RegistryError, RegistryResult};
use crate::{AssociationKind, ConstraintKind, Registry, RegistryBuilder};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelFile {
    models: Vec<ModelSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelSpec {
    name: String,
    #[serde(default)]
    validations: Vec<ValidationSpec>,
    #[serde(default)]
    associations: Vec<AssociationSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ValidationSpec {
    kind: String,
    attributes: Vec<String>,
    #[serde(default)]
    options: Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AssociationSpec {
    kind: String,
    name: String,
    #[serde(default)]
    options: Map<String, serde_json::Value>,
}

impl Registry {
    /// Parse a registry from a JSON model document.
    pub fn from_json_str(source: &str) -> RegistryResult<Self> {
        let file: ModelFile = serde_json::from_str(source)?;
        let mut builder = RegistryBuilder::new();

        for model in file.models {
            let mut model_builder = builder.add_model(model.name);

            for validation in model.validations {
                let kind = ConstraintKind::from_name(&validation.kind)
                    .ok_or(RegistryError::UnknownConstraintKind(validation.kind))?;
                let attributes: Vec<&str> =
                    validation.attributes.iter().map(String::as_str).collect();
                model_builder =
                    model_builder.validates(kind, &attributes, convert_options(&validation.options)?);
            }

            for association in model.associations {
                let kind = AssociationKind::from_name(&association.kind)
                    .ok_or(RegistryError::UnknownAssociationKind(association.kind))?;
                model_builder = model_builder.association(
                    kind,
                    association.name,
                    convert_options(&association.options)?,
                );
            }

            model_builder.done()?;
        }

        builder.build()
    }

    /// Load a registry from a JSON model file on disk.
    pub fn load(path: &Path) -> RegistryResult<Self> {
        let source =
            std::fs::read_to_string(path).map_err(|e| RegistryError::file_read(path, e))?;
        let registry = Self::from_json_str(&source)?;
        debug!(path = %path.display(), models = registry.model_count(), "loaded model file");
        Ok(registry)
    }
}

fn convert_options(map: &Map<String, serde_json::Value>) -> RegistryResult<Options> {
    map.iter()
        .map(|(key, value)| Ok((key.clone(), convert_value(value)?)))
        .collect()
}

/// Convert a JSON value into an option value.
fn convert_value(json: &serde_json::Value) -> RegistryResult<Value> {
    use serde_json::Value as Json;

    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Int(i)),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| RegistryError::invalid_value(format!("number out of range: {}", n))),
        },
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(convert_value)
            .collect::<RegistryResult<Vec<_>>>()
            .map(Value::List),
        Json::Object(map) => match tagged_entry(map) {
            Some((tag, inner)) => convert_tagged(tag, inner),
            None => convert_options(map).map(Value::Map),
        },
    }
}

/// A single-key object whose key starts with `$`.
fn tagged_entry(map: &Map<String, serde_json::Value>) -> Option<(&str, &serde_json::Value)> {
    if map.len() != 1 {
        return None;
    }
    map.iter()
        .next()
        .filter(|(key, _)| key.starts_with('$'))
        .map(|(key, value)| (key.as_str(), value))
}

fn convert_tagged(tag: &str, inner: &serde_json::Value) -> RegistryResult<Value> {
    match tag {
        "$symbol" => inner
            .as_str()
            .map(Value::symbol)
            .ok_or_else(|| RegistryError::invalid_value("$symbol expects a string")),
        "$pattern" => {
            let source = inner
                .as_str()
                .ok_or_else(|| RegistryError::invalid_value("$pattern expects a string"))?;
            Ok(Value::pattern(source)?)
        }
        "$range" => {
            let bounds: Option<Vec<i64>> = inner
                .as_array()
                .map(|items| items.iter().filter_map(|v| v.as_i64()).collect());
            match bounds.as_deref() {
                Some(&[start, end]) if inner.as_array().map(Vec::len) == Some(2) => {
                    Ok(Value::range(start, end)?)
                }
                _ => Err(RegistryError::invalid_value(
                    "$range expects [start, end] integers",
                )),
            }
        }
        other => Err(RegistryError::invalid_value(format!(
            "unknown value tag {}",
            other
        ))),
    }
}
