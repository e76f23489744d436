use thiserror::Error;

/// Malformed keymap text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Comma list is only allowed in the final segment: {0}")]
    CommaInNonTerminal(String),
    #[error("Unbalanced subarray brackets: {0}")]
    UnbalancedBracket(String),
    #[error("Subarray must be the last part of the keymap: {0}")]
    TrailingAfterSubarray(String),
    #[error("Subarray may not contain alternatives: {0}")]
    UnionInSubarray(String),
    #[error("Exactly one key may precede a subarray: {0}")]
    KeyListBeforeSubarray(String),
    #[error("Step must be the last one in the path: {0}")]
    StepNotTerminal(String),
    #[error("Empty path")]
    EmptyPath,
    #[error("Subarray nesting exceeds {max_depth} levels")]
    TooDeep { max_depth: usize },
}

/// Projection map containing something other than a directive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidMapError {
    #[error("Map can only contain string, mapping or sequence values. Got {kind} at {at:?}")]
    UnsupportedValue { kind: &'static str, at: String },
    #[error("Projection map nesting exceeds {max_depth} levels")]
    TooDeep { max_depth: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeymapError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    InvalidMap(#[from] InvalidMapError),
}
