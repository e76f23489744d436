//! Small helpers over mappings.

use crate::error::GrammarError;
use crate::value::{Mapping, NestedValue};

/// Check that every key is present in `source`.
///
/// # Example
///
/// ```
/// use json_keymap::{keys_exist, NestedValue};
/// use serde_json::json;
///
/// let doc = NestedValue::from(json!({"a": 1, "b": null}));
/// let map = doc.as_mapping().unwrap();
/// assert!(keys_exist(&["a", "b"], map));
/// assert!(!keys_exist(&["a", "c"], map));
/// ```
pub fn keys_exist<K: AsRef<str>>(keys: &[K], source: &Mapping) -> bool {
    keys.iter().all(|key| source.contains_key(key.as_ref()))
}

/// Get several keymaps at once, keyed by their text.
///
/// Unlike a `a,b` key list, absent entries are kept as `Null`.
pub fn get_by_keys<K: AsRef<str>>(keymaps: &[K], source: &NestedValue) -> Result<Mapping, GrammarError> {
    keymaps
        .iter()
        .map(|text| {
            let keymap = crate::compile(text.as_ref())?;
            Ok((text.as_ref().to_string(), source.get_at(&keymap)))
        })
        .collect()
}

pub fn first_key(map: &Mapping) -> Option<&str> {
    map.keys().next().map(String::as_str)
}

pub fn first(map: &Mapping) -> Option<&NestedValue> {
    map.values().next()
}
