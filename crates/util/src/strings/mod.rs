//! String utilities.
//!
//! Prefix checks and case conversion used when translating field names
//! between record sets and nested documents.

mod case;
mod prefix;

pub use case::camel_to_snake_case;
pub use prefix::{begins_with, strip_beginning};
