use rand::RngCore;

/// Generate a random lowercase hex string of exactly `length` characters.
///
/// # Examples
///
/// ```
/// use json_keymap_util::random_hex;
///
/// let s = random_hex(7);
/// assert_eq!(s.len(), 7);
/// assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn random_hex(length: usize) -> String {
    let mut bytes = vec![0u8; length.div_ceil(2)];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut out: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    out.truncate(length);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_length() {
        assert_eq!(random_hex(0), "");
    }

    proptest! {
        #[test]
        fn prop_random_hex_length(len in 0usize..200) {
            let s = random_hex(len);
            prop_assert_eq!(s.len(), len);
            prop_assert!(s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}
