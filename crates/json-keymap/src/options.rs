//! Tunables for compiling keymaps and projection maps.
//!
//! Both option structs deserialize with every field optional, so they can be
//! embedded in a caller's configuration file.

use serde::{Deserialize, Serialize};

/// Options for [`compile_with`](crate::compile_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Maximum subarray nesting, e.g. `a[b[c]]` is two levels deep.
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

/// Options for [`ProjectionMap::compile_with`](crate::ProjectionMap::compile_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    /// Maximum nesting of mappings and sequences inside a projection map.
    pub max_depth: usize,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}
