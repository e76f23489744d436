/// Convert a camelCase or PascalCase identifier to snake_case.
///
/// Runs of capitals are kept together as one word, so acronyms survive the
/// conversion. Characters that are not ASCII letters or digits separate
/// words and are dropped.
///
/// # Examples
///
/// ```
/// use json_keymap_util::strings::camel_to_snake_case;
///
/// assert_eq!(camel_to_snake_case("camelCase"), "camel_case");
/// assert_eq!(camel_to_snake_case("HTMLParser"), "html_parser");
/// assert_eq!(camel_to_snake_case("userID"), "user_id");
/// ```
pub fn camel_to_snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        match next_word(&chars, pos) {
            Some(end) => {
                words.push(normalize_word(&chars[pos..end]));
                pos = end;
            }
            None => pos += 1,
        }
    }
    words.join("_")
}

/// End of the word starting at `start`, if one starts there.
fn next_word(chars: &[char], start: usize) -> Option<usize> {
    let is_lower_or_digit = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let first = chars[start];

    // An acronym: capitals (and digits) ending at the end of input or right
    // before a capitalised word.
    if first.is_ascii_uppercase() {
        let mut greedy = start + 1;
        while greedy < chars.len() && (chars[greedy].is_ascii_uppercase() || chars[greedy].is_ascii_digit()) {
            greedy += 1;
        }
        for end in (start + 1..=greedy).rev() {
            let at_end = end == chars.len();
            let before_word = chars.get(end).is_some_and(|c| c.is_ascii_uppercase())
                && chars.get(end + 1).is_some_and(|&c| is_lower_or_digit(c));
            if at_end || before_word {
                return Some(end);
            }
        }
    }

    if first.is_ascii_alphabetic() {
        let mut end = start + 1;
        while end < chars.len() && is_lower_or_digit(chars[end]) {
            end += 1;
        }
        if end > start + 1 {
            return Some(end);
        }
    }
    None
}

fn normalize_word(word: &[char]) -> String {
    let word: String = word.iter().collect();
    if word == word.to_uppercase() {
        return word.to_lowercase();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => word,
    }
}
