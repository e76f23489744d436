//! Compiled keymap types.

use std::fmt;
use std::str::FromStr;

use crate::error::GrammarError;
use crate::options::CompileOptions;

/// One parsed unit of a keymap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Descend into a mapping by key: `user`
    Key(String),
    /// Fan out over several sibling keys: `id,email`
    KeyList(Vec<String>),
    /// Append without a key: `[]`
    Push,
    /// Apply the inner steps to every element of a sequence: `[id]`
    Subarray(Vec<PathStep>),
}

impl PathStep {
    /// Whether further steps may follow this one.
    pub fn is_descending(&self) -> bool {
        matches!(self, PathStep::Key(_))
    }
}

/// A single keymap alternative.
///
/// Every step but the last is a [`PathStep::Key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeymapPath {
    steps: Vec<PathStep>,
}

impl KeymapPath {
    /// Builds a path from hand-assembled steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, if a step other than a
    /// [`PathStep::Key`] is followed by further steps, or if a subarray
    /// interior breaks the same rules.
    ///
    /// # Example
    ///
    /// ```
    /// use json_keymap::{KeymapPath, PathStep};
    ///
    /// let path = KeymapPath::new(vec![
    ///     PathStep::Key("user".into()),
    ///     PathStep::KeyList(vec!["id".into(), "email".into()]),
    /// ])
    /// .unwrap();
    /// assert_eq!(path.to_string(), "user:id,email");
    ///
    /// assert!(KeymapPath::new(vec![PathStep::Push, PathStep::Key("a".into())]).is_err());
    /// ```
    pub fn new(steps: Vec<PathStep>) -> Result<Self, GrammarError> {
        Self::new_with(steps, &CompileOptions::default())
    }

    /// Like [`KeymapPath::new`], with the subarray nesting cap taken from
    /// `options`.
    pub fn new_with(steps: Vec<PathStep>, options: &CompileOptions) -> Result<Self, GrammarError> {
        validate_steps(&steps, 0, options.max_depth)?;
        Ok(Self { steps })
    }

    pub(crate) fn from_parsed(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn validate_steps(steps: &[PathStep], depth: usize, max_depth: usize) -> Result<(), GrammarError> {
    let Some((last, parents)) = steps.split_last() else {
        return Err(GrammarError::EmptyPath);
    };
    if let Some(step) = parents.iter().find(|step| !step.is_descending()) {
        return Err(GrammarError::StepNotTerminal(step_text(step)));
    }
    if let PathStep::Subarray(inner) = last {
        if depth >= max_depth {
            return Err(GrammarError::TooDeep { max_depth });
        }
        validate_steps(inner, depth + 1, max_depth)?;
    }
    Ok(())
}

fn step_text(step: &PathStep) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_step(&mut out, step, true);
    out
}

fn write_step(f: &mut impl fmt::Write, step: &PathStep, first: bool) -> fmt::Result {
    match step {
        PathStep::Subarray(inner) => {
            f.write_char('[')?;
            write_steps(f, inner)?;
            f.write_char(']')
        }
        other => {
            if !first {
                f.write_char(':')?;
            }
            match other {
                PathStep::Key(key) => f.write_str(key),
                PathStep::KeyList(keys) => f.write_str(&keys.join(",")),
                _ => f.write_str("[]"),
            }
        }
    }
}

fn write_steps(f: &mut impl fmt::Write, steps: &[PathStep]) -> fmt::Result {
    for (idx, step) in steps.iter().enumerate() {
        write_step(f, step, idx == 0)?;
    }
    Ok(())
}

impl fmt::Display for KeymapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_steps(f, &self.steps)
    }
}

/// A compiled keymap: one [`KeymapPath`] per `|`-separated alternative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Keymap {
    paths: Vec<KeymapPath>,
}

impl Keymap {
    pub(crate) fn from_paths(paths: Vec<KeymapPath>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[KeymapPath] {
        &self.paths
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeymapPath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_paths(self) -> Vec<KeymapPath> {
        self.paths
    }
}

impl From<KeymapPath> for Keymap {
    fn from(path: KeymapPath) -> Self {
        Self { paths: vec![path] }
    }
}

impl<'a> IntoIterator for &'a Keymap {
    type Item = &'a KeymapPath;
    type IntoIter = std::slice::Iter<'a, KeymapPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl fmt::Display for Keymap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, path) in self.paths.iter().enumerate() {
            if idx > 0 {
                f.write_str("|")?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

impl FromStr for Keymap {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::compile(s)
    }
}
