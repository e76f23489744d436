/// Check if `haystack` starts with `needle`.
///
/// # Examples
///
/// ```
/// use json_keymap_util::strings::begins_with;
///
/// assert!(begins_with(":", ":dept"));
/// assert!(begins_with("", "anything"));
/// assert!(!begins_with("dept", "de"));
/// ```
pub fn begins_with(needle: &str, haystack: &str) -> bool {
    haystack.starts_with(needle)
}

/// Remove `needle` from the start of `haystack` if it is there.
///
/// # Examples
///
/// ```
/// use json_keymap_util::strings::strip_beginning;
///
/// assert_eq!(strip_beginning(":", ":dept"), "dept");
/// assert_eq!(strip_beginning(":", "dept"), "dept");
/// ```
pub fn strip_beginning<'a>(needle: &str, haystack: &'a str) -> &'a str {
    haystack.strip_prefix(needle).unwrap_or(haystack)
}
