//! Keymap paths and record projection for JSON-like trees.
//!
//! A keymap is a compact string addressing positions inside a nested tree:
//!
//! | keymap                       | addresses                                   |
//! |------------------------------|---------------------------------------------|
//! | `id`                         | key `id`                                    |
//! | `id,email`                   | keys `id` and `email`                       |
//! | `user:id,email`              | `id` and `email` inside `user`              |
//! | `user:orders[id,status]`     | `id` and `status` of every order            |
//! | `user:orders[details:id]`    | `details.id` of every order                 |
//! | `[id,email]`                 | `id` and `email` of every root element      |
//! | `tags:[]`                    | append position of the `tags` sequence      |
//! | `user:id\|order:number`      | two independent alternatives                |
//!
//! Keymaps are compiled once with [`compile`] and then drive [`get`],
//! [`set`], [`add`], [`remove`] and [`splice`]. The [`project`] function is
//! the second interpreter: it groups and reshapes flat records according to
//! a tree-shaped projection map.
//!
//! # Example
//!
//! ```
//! use json_keymap::{add, compile, get, splice, NestedValue};
//! use serde_json::json;
//!
//! let keymap = compile("user:orders[id]").unwrap();
//! let doc = NestedValue::from(json!({"user": {"orders": [{"id": 1}, {"id": 2}]}}));
//! assert_eq!(get(&keymap, &doc), NestedValue::from(json!([1, 2])));
//!
//! let mut doc = add(&compile("user:tags:[]").unwrap(), doc, NestedValue::from("vip"));
//! let taken = splice(&compile("user:tags").unwrap(), &mut doc);
//! assert_eq!(taken, NestedValue::from(json!(["vip"])));
//! ```

mod accessor;
mod error;
mod options;
mod parser;
mod projector;
mod types;
mod util;
mod value;

pub use accessor::{add, get, remove, set, splice};
pub use error::{GrammarError, InvalidMapError, KeymapError};
pub use options::{CompileOptions, ProjectOptions};
pub use parser::KeymapParser;
pub use projector::{project, project_with, ProjectionMap};
pub use types::{Keymap, KeymapPath, PathStep};
pub use util::{first, first_key, get_by_keys, keys_exist};
pub use value::{Mapping, NestedValue, Scalar};

/// Compile keymap text with default options.
///
/// # Errors
///
/// Returns a [`GrammarError`] for a comma list outside the final segment,
/// unbalanced brackets, or a subarray that is not the last part of its
/// alternative.
///
/// # Example
///
/// ```
/// use json_keymap::{compile, PathStep};
///
/// let keymap = compile("user:id,email").unwrap();
/// assert_eq!(
///     keymap.paths()[0].steps(),
///     &[
///         PathStep::Key("user".into()),
///         PathStep::KeyList(vec!["id".into(), "email".into()]),
///     ]
/// );
/// assert_eq!(keymap, compile("user:id,email").unwrap());
/// assert!(compile("a,b:c").is_err());
/// ```
pub fn compile(text: &str) -> Result<Keymap, GrammarError> {
    KeymapParser::default().parse(text)
}

pub fn compile_with(text: &str, options: &CompileOptions) -> Result<Keymap, GrammarError> {
    KeymapParser::new(options).parse(text)
}
