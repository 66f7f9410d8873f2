//! Compact text encoding of multi-valued parameters.
//!
//! Nested lists are stored inside the JSON parameter blob as a single
//! string of bracketed groups separated by semicolons:
//!
//! ```text
//! [1,2];[3,4]        <=>  [[1, 2], [3, 4]]
//! [a,b]              <=>  [["a", "b"]]
//! ```
//!
//! Items that read as JSON numbers, booleans or `null` decode to those
//! values, everything else decodes to a string.
use serde_json::Value;

use crate::plugin_list::error::PluginListError;
use crate::plugin_system::traits::Parameters;

const GROUP_SEPARATOR: char = ';';
const ITEM_SEPARATOR: char = ',';
const RESERVED: [char; 4] = [GROUP_SEPARATOR, ITEM_SEPARATOR, '[', ']'];

/// Decode a compact list string into an array of arrays.
///
/// Returns a description of the first grammar violation on failure.
pub fn decode_compact_list(text: &str) -> Result<Value, String> {
    text.split(GROUP_SEPARATOR)
        .enumerate()
        .map(|(n, group)| decode_group(group).map_err(|reason| format!("group {}: {}", n + 1, reason)))
        .collect::<Result<Vec<Value>, String>>()
        .map(Value::Array)
}

fn decode_group(group: &str) -> Result<Value, String> {
    let inner = group
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| format!("'{}' is not enclosed in brackets", group.trim()))?;
    if inner.contains(['[', ']']) {
        return Err(format!("'{}' contains nested brackets", group.trim()));
    }
    if inner.trim().is_empty() {
        return Ok(Value::Array(Vec::new()));
    }
    inner
        .split(ITEM_SEPARATOR)
        .map(|item| {
            let item = item.trim();
            if item.is_empty() {
                Err("empty item".to_string())
            } else {
                Ok(scalar_from_text(item))
            }
        })
        .collect::<Result<Vec<Value>, String>>()
        .map(Value::Array)
}

fn scalar_from_text(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => v,
        _ => Value::String(text.to_string()),
    }
}

fn scalar_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(_) | Value::Bool(_) | Value::Null => Some(value.to_string()),
        Value::String(s) => {
            let representable = !s.is_empty()
                && s.trim() == s
                && !s.contains(RESERVED)
                && matches!(scalar_from_text(s), Value::String(_));
            representable.then(|| s.clone())
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Encode a value as a compact list string.
///
/// Only non-empty arrays of arrays of scalars are encoded, and only when
/// decoding the result gives the value back. Anything else returns `None`
/// and is stored as plain JSON.
pub fn encode_compact_list(value: &Value) -> Option<String> {
    let groups = value.as_array().filter(|groups| !groups.is_empty())?;
    let encoded = groups
        .iter()
        .map(|group| {
            let items = group.as_array()?;
            let items = items.iter().map(scalar_to_text).collect::<Option<Vec<String>>>()?;
            Some(format!("[{}]", items.join(&ITEM_SEPARATOR.to_string())))
        })
        .collect::<Option<Vec<String>>>()?;
    Some(encoded.join(&GROUP_SEPARATOR.to_string()))
}

/// Whether a stored string value uses the compact list encoding
pub fn is_compact_list_text(text: &str) -> bool {
    text.contains('[')
}

/// Replace every compact list string in `parameters` by its decoded value
pub fn decode_parameters(parameters: &mut Parameters) -> Result<(), PluginListError> {
    for (name, value) in parameters.iter_mut() {
        let decoded = match value {
            Value::String(text) if is_compact_list_text(text) => {
                decode_compact_list(text).map_err(|reason| PluginListError::MalformedListParameter {
                    parameter: name.clone(),
                    text: text.clone(),
                    reason,
                })?
            }
            _ => continue,
        };
        *value = decoded;
    }
    Ok(())
}

/// Copy `parameters` with nested lists replaced by their compact encoding.
///
/// Fails on plain string values that would be read back as a compact list,
/// since the stored file would not load them as the same value.
pub fn encode_parameters(parameters: &Parameters) -> Result<Parameters, PluginListError> {
    parameters
        .iter()
        .map(|(name, value)| {
            let stored = match value {
                Value::String(text) if is_compact_list_text(text) => {
                    let reason = match decode_compact_list(text) {
                        Ok(_) => "plain text would be read back as a nested list".to_string(),
                        Err(reason) => reason,
                    };
                    return Err(PluginListError::MalformedListParameter {
                        parameter: name.clone(),
                        text: text.clone(),
                        reason,
                    });
                }
                _ => encode_compact_list(value)
                    .map(Value::String)
                    .unwrap_or_else(|| value.clone()),
            };
            Ok((name.clone(), stored))
        })
        .collect()
}
