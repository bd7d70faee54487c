//! Sort-order keys for cards within a column.
//!
//! Keys are compared lexicographically. New cards get `"a"` followed by a
//! random base-36 token. This is not true fractional indexing: it does not
//! produce a key between two given neighbours, and two replicas inserting at
//! the same time get an arbitrary relative order.

use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const PREFIX: char = 'a';
const SUFFIX_LEN: usize = 8;

/// Generates a sort key for a newly added card
pub fn generate_position() -> String {
    let mut rng = rand::thread_rng();
    let mut key = String::with_capacity(SUFFIX_LEN + 1);
    key.push(PREFIX);
    for _ in 0..SUFFIX_LEN {
        key.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_shape() {
        let key = generate_position();

        assert_eq!(key.len(), SUFFIX_LEN + 1);
        assert!(key.starts_with(PREFIX));
        assert!(key[1..]
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn test_positions_differ() {
        assert_ne!(generate_position(), generate_position());
    }

    #[test]
    fn test_positions_sort_before_z() {
        // "z" is the conventional key for "end of column" used by callers
        assert!(generate_position().as_str() < "z");
    }
}
