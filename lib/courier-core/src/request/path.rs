use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::warn;

use super::argument::scalar_to_string;
use crate::CourierError;
use crate::contract::placeholders;

/// Everything but the unreserved characters of RFC 3986.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Converts a segment value to text, arrays of scalars are joined with `,`.
fn path_value(name: &str, value: &serde_json::Value) -> Result<String, CourierError> {
    let text = match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(",")),
        value => scalar_to_string(value),
    };

    text.ok_or_else(|| CourierError::UnsupportedPathValue {
        parameter: name.to_string(),
        value: value.clone(),
    })
}

pub(super) fn resolve_path(
    template: &str,
    segments: &IndexMap<&str, &serde_json::Value>,
) -> Result<String, CourierError> {
    let mut names = placeholders(template);
    if names.is_empty() {
        return Ok(template.to_string());
    }

    let mut path = template.to_string();
    for (name, value) in segments {
        let Some(index) = names.iter().position(|candidate| candidate == name) else {
            warn!(?name, "path segment not found in template");
            continue;
        };
        names.swap_remove(index);

        let encoded_value = encode_path_param_value(&path_value(name, value)?);
        path = replace_path_param(&path, name, &encoded_value);
    }

    if names.is_empty() {
        Ok(path)
    } else {
        Err(CourierError::PathUnresolved {
            path,
            missings: names.into_iter().map(str::to_string).collect(),
        })
    }
}
