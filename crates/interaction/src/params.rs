//! Raw parameter normalization.
//!
//! Form builders send multi-part values as separate keys, one per select:
//!
//! ```text
//! start(1i)=2012  start(2i)=1  start(3i)=2  start(4i)=3
//! ```
//!
//! `group_params` folds every `name(N)` / `name(Nx)` key into a single
//! `GroupedInput` stored under `name`, slot `N`. The trailing letter is a
//! type hint from the form builder and is ignored.

use filters::Params;
use inputs::{GroupedInput, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("params must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("malformed params: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Split `start(3i)` into `("start", "3")`.
///
/// Returns `None` for keys that are not grouped parts.
pub fn split_grouped_key(key: &str) -> Option<(&str, &str)> {
    let inner = key.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let (name, part) = (&inner[..open], &inner[open + 1..]);

    let digits = part.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let hint_len = part.len() - digits.len();
    if name.is_empty() || digits.is_empty() || hint_len > 1 {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((name, digits))
}

/// Text stored in a slot for one grouped part
fn slot_text(value: &Value) -> Option<String> {
    match value {
        Value::Nil => None,
        Value::String(s) | Value::Symbol(s) => Some(s.clone()),
        other => Some(other.to_json().to_string()),
    }
}

/// Fold grouped keys into `GroupedInput` values.
///
/// Other keys pass through unchanged. When a plain key and grouped parts
/// share a name, the grouped input wins.
pub fn group_params(raw: Params) -> Params {
    let mut params = Params::new();
    let mut groups: BTreeMap<String, GroupedInput> = BTreeMap::new();

    for (key, value) in raw {
        match split_grouped_key(&key) {
            Some((name, slot)) => {
                let group = groups.entry(name.to_string()).or_default();
                if let Some(text) = slot_text(&value) {
                    group.insert(slot, text);
                }
            }
            None => {
                params.insert(key, value);
            }
        }
    }

    for (name, group) in groups {
        debug!("Grouped {} parts under {}", group.len(), name);
        params.insert(name, Value::Grouped(group));
    }
    params
}

/// Convert a JSON object into params, grouping multi-part keys
pub fn params_from_json(json: &serde_json::Value) -> Result<Params, ParamsError> {
    match Value::from_json(json) {
        Value::Hash(map) => Ok(group_params(map)),
        other => Err(ParamsError::NotAnObject(other.type_name())),
    }
}

/// Parse a JSON document holding one params object
pub fn parse_params(json: &str) -> Result<Params, ParamsError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    params_from_json(&value)
}
