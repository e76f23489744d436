//! json-keymap-util - helpers shared by the json-keymap crates.

pub mod random;
pub mod strings;

pub use random::random_hex;
pub use strings::{begins_with, camel_to_snake_case, strip_beginning};
