//! Keymap grammar.
//!
//! ```text
//! path     := alt ('|' alt)*
//! alt      := segment (':' segment)*
//! segment  := keyname ('[' alt ']')?
//! keyname  := identifier (',' identifier)*
//! ```
//!
//! Empty segments left by stray or doubled delimiters are skipped.

use tracing::debug;

use crate::error::GrammarError;
use crate::options::CompileOptions;
use crate::types::{Keymap, KeymapPath, PathStep};

/// Keymap parser.
#[derive(Debug, Clone)]
pub struct KeymapParser {
    max_depth: usize,
}

impl Default for KeymapParser {
    fn default() -> Self {
        Self::new(&CompileOptions::default())
    }
}

impl KeymapParser {
    pub fn new(options: &CompileOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    /// Parse keymap text into one path per `|`-alternative.
    pub fn parse(&self, input: &str) -> Result<Keymap, GrammarError> {
        let mut paths = Vec::new();
        for alternative in split_alternatives(input)? {
            if let Some(steps) = self.parse_alternative(alternative, 0)? {
                paths.push(KeymapPath::from_parsed(steps));
            }
        }
        debug!(keymap = input, alternatives = paths.len(), "compiled keymap");
        Ok(Keymap::from_paths(paths))
    }

    fn parse_alternative(
        &self,
        text: &str,
        depth: usize,
    ) -> Result<Option<Vec<PathStep>>, GrammarError> {
        let (head, interior) = match text.find('[') {
            Some(open) => {
                let close = matching_bracket(text, open)
                    .ok_or_else(|| GrammarError::UnbalancedBracket(text.to_string()))?;
                if close + 1 != text.len() {
                    return Err(GrammarError::TrailingAfterSubarray(text.to_string()));
                }
                (&text[..open], Some(&text[open + 1..close]))
            }
            None => (text, None),
        };

        let segments: Vec<&str> = head.split(':').filter(|s| !s.is_empty()).collect();
        let mut steps = Vec::with_capacity(segments.len() + 1);

        if let Some((last, parents)) = segments.split_last() {
            for segment in parents {
                if segment.contains(',') {
                    return Err(GrammarError::CommaInNonTerminal(text.to_string()));
                }
                steps.push(PathStep::Key(segment.to_string()));
            }

            let mut names: Vec<String> = last
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            match (names.len(), interior) {
                (0, _) => {}
                (1, _) => steps.push(PathStep::Key(names.remove(0))),
                (_, Some(_)) => {
                    return Err(GrammarError::KeyListBeforeSubarray(text.to_string()));
                }
                (_, None) => steps.push(PathStep::KeyList(names)),
            }
        }

        if let Some(interior) = interior {
            steps.push(self.parse_subarray(text, interior, depth)?);
        }

        Ok(if steps.is_empty() { None } else { Some(steps) })
    }

    fn parse_subarray(
        &self,
        text: &str,
        interior: &str,
        depth: usize,
    ) -> Result<PathStep, GrammarError> {
        // Empty alternatives are dropped, as at the top level.
        let parts: Vec<&str> = split_alternatives(interior)?
            .into_iter()
            .filter(|part| part.chars().any(|c| c != ':' && c != ','))
            .collect();
        let inner = match parts[..] {
            [] => return Ok(PathStep::Push),
            [inner] => inner,
            _ => return Err(GrammarError::UnionInSubarray(text.to_string())),
        };
        if depth >= self.max_depth {
            return Err(GrammarError::TooDeep {
                max_depth: self.max_depth,
            });
        }
        Ok(match self.parse_alternative(inner, depth + 1)? {
            Some(inner) => PathStep::Subarray(inner),
            None => PathStep::Push,
        })
    }
}

/// Splits on `|` outside of brackets and checks that brackets balance.
fn split_alternatives(input: &str) -> Result<Vec<&str>, GrammarError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in input.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| GrammarError::UnbalancedBracket(input.to_string()))?;
            }
            '|' if depth == 0 => {
                parts.push(&input[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(GrammarError::UnbalancedBracket(input.to_string()));
    }
    parts.push(&input[start..]);
    Ok(parts)
}

fn matching_bracket(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text[open..].char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}
