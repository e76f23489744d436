//! Grouping projector: builds a nested tree out of flat records.
//!
//! A projection map is itself a [`NestedValue`]:
//!
//! - `":field": {...}` buckets records by the value of `record[field]`;
//! - `"key": {...}` (or `"key": [...]`) writes into a fixed bucket;
//! - `"field"` / `"field|alias"` copies `record[field]` into `alias`;
//! - a tree inside a sequence pushes a fresh slot per record.
//!
//! ```
//! use json_keymap::{project, NestedValue};
//! use serde_json::json;
//!
//! let records: Vec<NestedValue> = vec![
//!     json!({"dept": "A", "name": "Bob"}).into(),
//!     json!({"dept": "A", "name": "Sue"}).into(),
//!     json!({"dept": "B", "name": "Al"}).into(),
//! ];
//! let map = NestedValue::from(json!({":dept": [["name|who"]]}));
//! assert_eq!(
//!     project(&records, &map).unwrap(),
//!     NestedValue::from(json!({"A": [{"who": "Bob"}, {"who": "Sue"}], "B": [{"who": "Al"}]})),
//! );
//! ```

use json_keymap_util::strings::{begins_with, strip_beginning};
use tracing::{debug, trace};

use crate::error::InvalidMapError;
use crate::options::ProjectOptions;
use crate::value::{Mapping, NestedValue};

const GROUPING_PREFIX: &str = ":";
const ALIAS_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Group { field: String, body: Vec<Directive> },
    Bucket { key: String, body: Vec<Directive> },
    Project { field: String, alias: String },
    Slot { body: Vec<Directive> },
}

/// A validated projection map, reusable across record sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionMap {
    directives: Vec<Directive>,
}

impl ProjectionMap {
    pub fn compile(map: &NestedValue) -> Result<Self, InvalidMapError> {
        Self::compile_with(map, &ProjectOptions::default())
    }

    /// Validate `map` and turn it into directives.
    ///
    /// # Errors
    ///
    /// - `InvalidMapError::UnsupportedValue` if the map holds a null, number
    ///   or bool where a directive is expected
    /// - `InvalidMapError::TooDeep` if nesting exceeds `options.max_depth`
    pub fn compile_with(map: &NestedValue, options: &ProjectOptions) -> Result<Self, InvalidMapError> {
        let compiler = DirectiveCompiler {
            max_depth: options.max_depth,
        };
        Ok(Self {
            directives: compiler.compile(map, "", 0)?,
        })
    }

    /// Run every record through the map, accumulating into one tree.
    ///
    /// Records that are not mappings are skipped.
    pub fn project(&self, records: &[NestedValue]) -> NestedValue {
        let mut grouped = NestedValue::empty_mapping();
        for record in records {
            match record.as_mapping() {
                Some(record) => apply(&self.directives, record, &mut grouped),
                None => trace!(kind = record.kind(), "skipping non-mapping record"),
            }
        }
        debug!(records = records.len(), "projected records");
        grouped
    }
}

/// Group and project `records` according to `map`.
pub fn project(records: &[NestedValue], map: &NestedValue) -> Result<NestedValue, InvalidMapError> {
    Ok(ProjectionMap::compile(map)?.project(records))
}

pub fn project_with(
    records: &[NestedValue],
    map: &NestedValue,
    options: &ProjectOptions,
) -> Result<NestedValue, InvalidMapError> {
    Ok(ProjectionMap::compile_with(map, options)?.project(records))
}

struct DirectiveCompiler {
    max_depth: usize,
}

impl DirectiveCompiler {
    fn compile(&self, map: &NestedValue, at: &str, depth: usize) -> Result<Vec<Directive>, InvalidMapError> {
        if depth > self.max_depth {
            return Err(InvalidMapError::TooDeep {
                max_depth: self.max_depth,
            });
        }
        match map {
            NestedValue::Mapping(entries) => entries
                .iter()
                .map(|(key, value)| self.compile_entry(key, value, depth))
                .collect(),
            NestedValue::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    NestedValue::Mapping(_) | NestedValue::Sequence(_) => Ok(Directive::Slot {
                        body: self.compile(item, &idx.to_string(), depth + 1)?,
                    }),
                    other => self.compile_projection(other, &idx.to_string()),
                })
                .collect(),
            other => Ok(vec![self.compile_projection(other, at)?]),
        }
    }

    fn compile_entry(&self, key: &str, value: &NestedValue, depth: usize) -> Result<Directive, InvalidMapError> {
        if begins_with(GROUPING_PREFIX, key) {
            return Ok(Directive::Group {
                field: strip_beginning(GROUPING_PREFIX, key).to_string(),
                body: self.compile(value, key, depth + 1)?,
            });
        }
        if value.as_str().is_some() {
            return self.compile_projection(value, key);
        }
        Ok(Directive::Bucket {
            key: key.to_string(),
            body: self.compile(value, key, depth + 1)?,
        })
    }

    fn compile_projection(&self, value: &NestedValue, at: &str) -> Result<Directive, InvalidMapError> {
        let Some(text) = value.as_str() else {
            return Err(InvalidMapError::UnsupportedValue {
                kind: value.kind(),
                at: at.to_string(),
            });
        };
        let (field, alias) = match text.split(ALIAS_SEPARATOR).collect::<Vec<_>>()[..] {
            [field, alias] => (field, alias),
            _ => (text, text),
        };
        Ok(Directive::Project {
            field: field.to_string(),
            alias: alias.to_string(),
        })
    }
}

fn apply(directives: &[Directive], record: &Mapping, acc: &mut NestedValue) {
    for directive in directives {
        match directive {
            Directive::Project { field, alias } => match record.get(field) {
                Some(value) => {
                    acc.coerce_mapping().insert(alias.clone(), value.clone());
                }
                None => trace!(field = field.as_str(), "field absent, projection skipped"),
            },
            Directive::Group { field, body } => match record.get(field).and_then(bucket_key) {
                Some(key) => {
                    let bucket = acc
                        .coerce_mapping()
                        .entry(key)
                        .or_insert_with(NestedValue::empty_mapping);
                    apply(body, record, bucket);
                }
                None => trace!(field = field.as_str(), "no bucket key, grouping skipped"),
            },
            Directive::Bucket { key, body } => {
                let bucket = acc
                    .coerce_mapping()
                    .entry(key.clone())
                    .or_insert_with(NestedValue::empty_mapping);
                apply(body, record, bucket);
            }
            Directive::Slot { body } => apply(body, record, push_slot(acc)),
        }
    }
}

/// `Null` buckets under the empty key; containers have no key.
fn bucket_key(value: &NestedValue) -> Option<String> {
    match value {
        NestedValue::Null => Some(String::new()),
        NestedValue::Scalar(scalar) => Some(scalar.to_key()),
        NestedValue::Sequence(_) | NestedValue::Mapping(_) => None,
    }
}

/// Appends an empty mapping to `acc` and returns it.
///
/// A non-empty mapping receives the slot under its next free integer key.
fn push_slot(acc: &mut NestedValue) -> &mut NestedValue {
    let keyed = matches!(acc, NestedValue::Mapping(map) if !map.is_empty());
    if keyed {
        let map = acc.coerce_mapping();
        let key = next_index_key(map);
        return map.entry(key).or_insert_with(NestedValue::empty_mapping);
    }
    let items = acc.ensure_sequence();
    items.push(NestedValue::empty_mapping());
    let last = items.len() - 1;
    &mut items[last]
}

fn next_index_key(map: &Mapping) -> String {
    map.keys()
        .filter_map(|key| key.parse::<u64>().ok())
        .max()
        .map_or(0, |max| max + 1)
        .to_string()
}
