//! Moving YAML values into the JSON document model.
//!
//! YAML is the richer model: it has non-finite floats, tagged values and
//! mapping keys of any type. Scalar keys become their string form (`1`,
//! `true`, `~` turn into `"1"`, `"true"`, `"null"`), tags are dropped, and
//! anything with no JSON form is reported with its dotted location.

use std::path::Path;

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use crate::error::ArtifactError;

const NON_FINITE: &str = "NaN and infinite numbers have no JSON form";
const COLLECTION_KEY: &str = "mapping keys must be scalars";

/// A YAML value with no JSON counterpart, and where it sits.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Unrepresentable {
    pub(crate) location: String,
    pub(crate) reason: &'static str,
}

impl Unrepresentable {
    pub(crate) fn in_file(self, path: &Path) -> ArtifactError {
        ArtifactError::Unrepresentable {
            path: path.to_path_buf(),
            location: self.location,
            reason: self.reason,
        }
    }
}

/// Convert a parsed YAML value into a JSON value.
pub(crate) fn yaml_to_json(value: YamlValue) -> Result<Value, Unrepresentable> {
    convert(value, "")
}

/// The first NaN or infinite number inside `value`, if any.
pub(crate) fn find_non_finite(value: &YamlValue) -> Option<Unrepresentable> {
    scan(value, "").map(|location| Unrepresentable {
        location,
        reason: NON_FINITE,
    })
}

fn convert(value: YamlValue, location: &str) -> Result<Value, Unrepresentable> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => Value::Number(number(&n, location)?),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| convert(item, &child(location, &index.to_string())))
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut entries = Map::with_capacity(mapping.len());
            for (key, item) in mapping {
                let Some(key) = scalar_key(&key) else {
                    return Err(unrepresentable(location, COLLECTION_KEY));
                };
                let item = convert(item, &child(location, &key))?;
                entries.insert(key, item);
            }
            Value::Object(entries)
        }
        YamlValue::Tagged(tagged) => convert(tagged.value, location)?,
    })
}

fn number(n: &serde_yaml::Number, location: &str) -> Result<Number, Unrepresentable> {
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| unrepresentable(location, NON_FINITE))
}

fn scan(value: &YamlValue, location: &str) -> Option<String> {
    match value {
        YamlValue::Number(n) if n.is_nan() || n.is_infinite() => Some(display_location(location)),
        YamlValue::Sequence(items) => items
            .iter()
            .enumerate()
            .find_map(|(index, item)| scan(item, &child(location, &index.to_string()))),
        YamlValue::Mapping(mapping) => mapping.iter().find_map(|(key, item)| {
            let key = scalar_key(key).unwrap_or_else(|| "?".to_string());
            scan(item, &child(location, &key))
        }),
        YamlValue::Tagged(tagged) => scan(&tagged.value, location),
        _ => None,
    }
}

/// String form of a scalar mapping key, or `None` for a collection key.
fn scalar_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some("null".to_string()),
        YamlValue::Tagged(tagged) => scalar_key(&tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

fn child(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

fn display_location(location: &str) -> String {
    if location.is_empty() {
        "(top level)".to_string()
    } else {
        location.to_string()
    }
}

fn unrepresentable(location: &str, reason: &'static str) -> Unrepresentable {
    Unrepresentable {
        location: display_location(location),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> YamlValue {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_plain_mapping_converts() {
        let value = yaml_to_json(parse("a: 1\nb: [x, -2, 0.5]\nc: ~\n")).unwrap();
        assert_eq!(value, json!({ "a": 1, "b": ["x", -2, 0.5], "c": null }));
    }

    #[test]
    fn test_scalar_keys_become_strings() {
        let value = yaml_to_json(parse("1: one\ntrue: enabled\n~: nothing\n1.5: half\n")).unwrap();
        assert_eq!(
            value,
            json!({ "1": "one", "true": "enabled", "null": "nothing", "1.5": "half" })
        );
    }

    #[test]
    fn test_non_finite_float_is_rejected_with_location() {
        let err = yaml_to_json(parse("training:\n  thresholds: [0.5, .inf]\n")).unwrap_err();
        assert_eq!(
            err,
            Unrepresentable {
                location: "training.thresholds.1".to_string(),
                reason: NON_FINITE,
            }
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        let err = yaml_to_json(parse("missing: .nan\n")).unwrap_err();
        assert_eq!(err.location, "missing");
    }

    #[test]
    fn test_collection_key_is_rejected() {
        let err = yaml_to_json(parse("grid:\n  ? [1, 2]\n  : cell\n")).unwrap_err();
        assert_eq!(err.location, "grid");
        assert_eq!(err.reason, COLLECTION_KEY);
    }

    #[test]
    fn test_tags_are_dropped() {
        let value = yaml_to_json(parse("size: !px [224, 224]\n")).unwrap();
        assert_eq!(value, json!({ "size": [224, 224] }));
    }

    #[test]
    fn test_find_non_finite() {
        assert_eq!(find_non_finite(&parse("a: 1\nb: [2.5]\n")), None);
        let found = find_non_finite(&parse("history:\n  loss: [0.9, .nan]\n")).unwrap();
        assert_eq!(found.location, "history.loss.1");
        assert_eq!(found.reason, NON_FINITE);
        assert_eq!(find_non_finite(&parse("-.inf")).unwrap().location, "(top level)");
    }
}
