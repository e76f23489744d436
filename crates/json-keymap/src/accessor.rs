//! Reading and writing a [`NestedValue`] through compiled keymaps.
//!
//! `get` and `remove` never create anything; a missing key resolves to
//! `Null` or a no-op. `set` and `add` create missing intermediate containers
//! on the way down.

use crate::types::{Keymap, KeymapPath, PathStep};
use crate::value::{Mapping, NestedValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    /// Terminal position is overwritten.
    Set,
    /// Terminal sequence is appended to, anything else is overwritten.
    Add,
}

/// Get the value(s) addressed by `keymap`.
///
/// A keymap with a single alternative returns the addressed value. With
/// several alternatives the results are not merged into one tree: the
/// result is a `Sequence` holding one entry per alternative, in keymap order.
///
/// # Example
///
/// ```
/// use json_keymap::{compile, get, NestedValue};
/// use serde_json::json;
///
/// let doc = NestedValue::from(json!({"user": {"id": 7, "email": "a@b.c", "pw": "x"}}));
/// let keymap = compile("user:id,email").unwrap();
/// assert_eq!(get(&keymap, &doc), NestedValue::from(json!({"id": 7, "email": "a@b.c"})));
/// ```
pub fn get(keymap: &Keymap, source: &NestedValue) -> NestedValue {
    source.get_at(keymap)
}

/// Write `value` at every position addressed by `keymap`, overwriting.
///
/// # Example
///
/// ```
/// use json_keymap::{compile, set, NestedValue};
/// use serde_json::json;
///
/// let keymap = compile("user:address:city").unwrap();
/// let doc = set(&keymap, NestedValue::Null, NestedValue::from("Oslo"));
/// assert_eq!(doc, NestedValue::from(json!({"user": {"address": {"city": "Oslo"}}})));
/// ```
pub fn set(keymap: &Keymap, mut source: NestedValue, value: NestedValue) -> NestedValue {
    source.set_at(keymap, value);
    source
}

/// Like [`set`], but appends when the terminal position holds a sequence.
pub fn add(keymap: &Keymap, mut source: NestedValue, value: NestedValue) -> NestedValue {
    source.add_at(keymap, value);
    source
}

/// Remove every position addressed by `keymap`.
///
/// Returns `true` if at least one key existed and was deleted. A subarray
/// strips its interior from every element of that one sequence level; a
/// subarray nested inside it is not descended, so `a[b[c]]` removes nothing.
pub fn remove(keymap: &Keymap, source: &mut NestedValue) -> bool {
    source.remove_at(keymap)
}

/// [`get`] followed by [`remove`]; returns the value as it was before removal.
pub fn splice(keymap: &Keymap, source: &mut NestedValue) -> NestedValue {
    source.splice_at(keymap)
}

impl NestedValue {
    pub fn get_at(&self, keymap: &Keymap) -> NestedValue {
        match keymap.paths() {
            [] => NestedValue::Null,
            [path] => path.get(self),
            // One entry per alternative, no merge.
            paths => NestedValue::Sequence(paths.iter().map(|path| path.get(self)).collect()),
        }
    }

    pub fn set_at(&mut self, keymap: &Keymap, value: NestedValue) {
        for path in keymap {
            write_steps(path.steps(), self, value.clone(), WriteMode::Set);
        }
    }

    pub fn add_at(&mut self, keymap: &Keymap, value: NestedValue) {
        for path in keymap {
            write_steps(path.steps(), self, value.clone(), WriteMode::Add);
        }
    }

    pub fn remove_at(&mut self, keymap: &Keymap) -> bool {
        keymap
            .iter()
            .fold(false, |removed, path| remove_steps(path.steps(), self, false) | removed)
    }

    pub fn splice_at(&mut self, keymap: &Keymap) -> NestedValue {
        let taken = self.get_at(keymap);
        self.remove_at(keymap);
        taken
    }
}

impl KeymapPath {
    /// Get the addressed value, `Null` if any key on the way is missing.
    pub fn get(&self, source: &NestedValue) -> NestedValue {
        get_steps(self.steps(), source)
    }

    pub fn set(&self, mut source: NestedValue, value: NestedValue) -> NestedValue {
        write_steps(self.steps(), &mut source, value, WriteMode::Set);
        source
    }

    pub fn add(&self, mut source: NestedValue, value: NestedValue) -> NestedValue {
        write_steps(self.steps(), &mut source, value, WriteMode::Add);
        source
    }

    pub fn remove(&self, source: &mut NestedValue) -> bool {
        remove_steps(self.steps(), source, false)
    }

    pub fn splice(&self, source: &mut NestedValue) -> NestedValue {
        let taken = self.get(source);
        self.remove(source);
        taken
    }
}

fn get_steps(steps: &[PathStep], source: &NestedValue) -> NestedValue {
    let mut current = source;
    for step in steps {
        match step {
            PathStep::Key(key) => match current.as_mapping().and_then(|map| map.get(key)) {
                Some(child) => current = child,
                None => return NestedValue::Null,
            },
            PathStep::KeyList(keys) => {
                let Some(map) = current.as_mapping() else {
                    return NestedValue::Null;
                };
                // Absent keys are left out rather than filled with Null.
                return NestedValue::Mapping(
                    keys.iter()
                        .filter_map(|key| map.get(key).map(|v| (key.clone(), v.clone())))
                        .collect(),
                );
            }
            PathStep::Push => return NestedValue::Null,
            PathStep::Subarray(inner) => {
                return match current.as_sequence() {
                    Some(items) => NestedValue::Sequence(
                        items.iter().map(|item| get_steps(inner, item)).collect(),
                    ),
                    None => NestedValue::Null,
                };
            }
        }
    }
    current.clone()
}

/// Container to create for a missing key when `next` is the following step.
fn placeholder_for(next: &PathStep) -> NestedValue {
    match next {
        PathStep::Push | PathStep::Subarray(_) => NestedValue::Sequence(Vec::new()),
        PathStep::Key(_) | PathStep::KeyList(_) => NestedValue::empty_mapping(),
    }
}

fn write_steps(steps: &[PathStep], target: &mut NestedValue, value: NestedValue, mode: WriteMode) {
    let Some((last, parents)) = steps.split_last() else {
        *target = value;
        return;
    };

    let mut current = target;
    for (idx, step) in parents.iter().enumerate() {
        let PathStep::Key(key) = step else {
            return;
        };
        let next = &steps[idx + 1];
        current = current
            .coerce_mapping()
            .entry(key.clone())
            .or_insert_with(|| placeholder_for(next));
    }

    match last {
        PathStep::Key(key) => write_key(current.coerce_mapping(), key, value, mode),
        PathStep::KeyList(keys) => {
            let map = current.coerce_mapping();
            for key in keys {
                write_key(map, key, value.clone(), mode);
            }
        }
        PathStep::Push => current.ensure_sequence().push(value),
        PathStep::Subarray(inner) => {
            // Elements are written only when the position already holds a sequence.
            if let NestedValue::Sequence(items) = current {
                for item in items {
                    write_steps(inner, item, value.clone(), mode);
                }
            }
        }
    }
}

fn write_key(map: &mut Mapping, key: &str, value: NestedValue, mode: WriteMode) {
    if mode == WriteMode::Add {
        if let Some(NestedValue::Sequence(items)) = map.get_mut(key) {
            items.push(value);
            return;
        }
    }
    map.insert(key.to_string(), value);
}

fn remove_steps(steps: &[PathStep], target: &mut NestedValue, in_subarray: bool) -> bool {
    let Some((last, parents)) = steps.split_last() else {
        return false;
    };

    let mut current = target;
    for step in parents {
        let PathStep::Key(key) = step else {
            return false;
        };
        match current.as_mapping_mut().and_then(|map| map.get_mut(key)) {
            Some(child) => current = child,
            None => return false,
        }
    }

    match last {
        PathStep::Key(key) => current
            .as_mapping_mut()
            .is_some_and(|map| map.shift_remove(key).is_some()),
        PathStep::KeyList(keys) => match current.as_mapping_mut() {
            Some(map) => keys
                .iter()
                .fold(false, |removed, key| map.shift_remove(key).is_some() | removed),
            None => false,
        },
        PathStep::Push => false,
        // Batch strip covers a single sequence level.
        PathStep::Subarray(_) if in_subarray => false,
        PathStep::Subarray(inner) => match current {
            NestedValue::Sequence(items) => items
                .iter_mut()
                .fold(false, |removed, item| remove_steps(inner, item, true) | removed),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use serde_json::json;

    fn km(text: &str) -> Keymap {
        compile(text).unwrap()
    }

    fn v(json: serde_json::Value) -> NestedValue {
        NestedValue::from(json)
    }

    #[test]
    fn test_get_missing_intermediate_is_null() {
        let doc = v(json!({"a": {"b": 1}}));
        assert_eq!(get(&km("a:x:y"), &doc), NestedValue::Null);
        assert_eq!(get(&km("a:b:c"), &doc), NestedValue::Null);
    }

    #[test]
    fn test_get_key_list_omits_absent() {
        let doc = v(json!({"a": 1, "b": 2}));
        assert_eq!(get(&km("a,c"), &doc), v(json!({"a": 1})));
    }

    #[test]
    fn test_get_subarray() {
        let doc = v(json!({"orders": [
            {"id": 1, "details": {"sku": "x"}},
            {"id": 2},
        ]}));
        assert_eq!(get(&km("orders[id]"), &doc), v(json!([1, 2])));
        assert_eq!(get(&km("orders[details:sku]"), &doc), v(json!(["x", null])));
        assert_eq!(get(&km("id[x]"), &doc), NestedValue::Null);
    }

    #[test]
    fn test_get_union_returns_one_entry_per_alternative() {
        let doc = v(json!({"user": {"id": 1}, "order": {"number": 9}}));
        assert_eq!(get(&km("user:id|order:number|nope"), &doc), v(json!([1, 9, null])));
    }

    #[test]
    fn test_set_creates_intermediates() {
        let doc = set(&km("a:b:c"), NestedValue::Null, v(json!(1)));
        assert_eq!(doc, v(json!({"a": {"b": {"c": 1}}})));
    }

    #[test]
    fn test_set_overwrites_sequence() {
        let doc = set(&km("a"), v(json!({"a": [1, 2]})), v(json!({"x": 1})));
        assert_eq!(doc, v(json!({"a": {"x": 1}})));
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let doc = set(&km("a:b"), v(json!({"a": 5})), v(json!(1)));
        assert_eq!(doc, v(json!({"a": {"b": 1}})));
    }

    #[test]
    fn test_set_key_list_and_subarray() {
        let doc = set(&km("a,b"), NestedValue::Null, v(json!(0)));
        assert_eq!(doc, v(json!({"a": 0, "b": 0})));

        let doc = set(
            &km("items[flag]"),
            v(json!({"items": [{"id": 1}, {"id": 2, "flag": false}]})),
            v(json!(true)),
        );
        assert_eq!(
            doc,
            v(json!({"items": [{"id": 1, "flag": true}, {"id": 2, "flag": true}]}))
        );
    }

    #[test]
    fn test_set_subarray_on_missing_key_creates_empty_sequence() {
        let doc = set(&km("items[flag]"), NestedValue::Null, v(json!(true)));
        assert_eq!(doc, v(json!({"items": []})));
    }

    #[test]
    fn test_add_appends_to_sequence() {
        let doc = add(&km("tags"), v(json!({"tags": ["a"]})), v(json!("b")));
        assert_eq!(doc, v(json!({"tags": ["a", "b"]})));
    }

    #[test]
    fn test_add_overwrites_scalar() {
        let doc = add(&km("k"), NestedValue::empty_mapping(), v(json!("v")));
        let doc = add(&km("k"), doc, v(json!("w")));
        assert_eq!(doc, v(json!({"k": "w"})));
    }

    #[test]
    fn test_add_push() {
        let doc = add(&km("[]"), v(json!([])), v(json!("x")));
        let doc = add(&km("[]"), doc, v(json!("y")));
        assert_eq!(doc, v(json!(["x", "y"])));

        let doc = add(&km("user:tags:[]"), NestedValue::Null, v(json!("a")));
        assert_eq!(doc, v(json!({"user": {"tags": ["a"]}})));
    }

    #[test]
    fn test_add_push_replaces_non_sequence() {
        let doc = add(&km("tags:[]"), v(json!({"tags": "old"})), v(json!("new")));
        assert_eq!(doc, v(json!({"tags": ["new"]})));
    }

    #[test]
    fn test_remove_key_and_key_list() {
        let mut doc = v(json!({"a": 1, "b": 2, "c": 3}));
        assert!(remove(&km("a,x"), &mut doc));
        assert_eq!(doc, v(json!({"b": 2, "c": 3})));
        assert!(!remove(&km("x,y"), &mut doc));
    }

    #[test]
    fn test_remove_missing_intermediate_is_noop() {
        let mut doc = v(json!({"a": {"b": 1}}));
        assert!(!remove(&km("x:b"), &mut doc));
        assert!(!remove(&km("a:b:c"), &mut doc));
        assert_eq!(doc, v(json!({"a": {"b": 1}})));
    }

    #[test]
    fn test_remove_through_subarray_strips_every_element() {
        let mut doc = v(json!({"user": {"orders": [
            {"id": 1, "status": "new", "total": 5},
            {"id": 2, "total": 7},
        ]}}));
        assert!(remove(&km("user:orders[id,status]"), &mut doc));
        assert_eq!(doc, v(json!({"user": {"orders": [{"total": 5}, {"total": 7}]}})));
    }

    #[test]
    fn test_remove_stops_at_first_sequence_level() {
        let original = v(json!({"a": [{"b": [{"c": 1, "d": 2}]}, {"b": [{"c": 3}]}]}));
        let mut doc = original.clone();
        assert!(!remove(&km("a[b[c]]"), &mut doc));
        assert_eq!(doc, original);

        // The first level itself is still stripped.
        assert!(remove(&km("a[b]"), &mut doc));
        assert_eq!(doc, v(json!({"a": [{}, {}]})));
    }

    #[test]
    fn test_union_get_is_not_merged() {
        let doc = v(json!({"user": {"id": 1}, "order": {"id": 2}}));
        assert_eq!(get(&km("user:id|order:id"), &doc), v(json!([1, 2])));
        assert_eq!(get(&km("user|order"), &doc), v(json!([{"id": 1}, {"id": 2}])));
    }

    #[test]
    fn test_remove_keeps_key_order() {
        let mut doc = v(json!({"a": 1, "b": 2, "c": 3}));
        remove(&km("b"), &mut doc);
        let keys: Vec<_> = doc.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_splice_takes_value() {
        let mut doc = v(json!({"user": {"id": 1, "pw": "secret"}}));
        assert_eq!(splice(&km("user:pw"), &mut doc), v(json!("secret")));
        assert_eq!(doc, v(json!({"user": {"id": 1}})));
        assert_eq!(get(&km("user:pw"), &doc), NestedValue::Null);
    }

    #[test]
    fn test_union_set_and_remove() {
        let keymap = km("a:x|b");
        let mut doc = set(&keymap, NestedValue::Null, v(json!(1)));
        assert_eq!(doc, v(json!({"a": {"x": 1}, "b": 1})));
        assert!(remove(&keymap, &mut doc));
        assert_eq!(doc, v(json!({"a": {}})));
    }

    #[test]
    fn test_empty_keymap_is_inert() {
        let keymap = km("");
        let mut doc = v(json!({"a": 1}));
        assert_eq!(get(&keymap, &doc), NestedValue::Null);
        assert!(!remove(&keymap, &mut doc));
        assert_eq!(set(&keymap, doc.clone(), v(json!(2))), doc);
    }
}
