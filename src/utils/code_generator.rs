//! Short code generation and numeric code encoding.
//!
//! Random codes are the create-path primary; the positional encoder is a
//! secondary helper that maps sequence numbers to compact strings.

use rand::Rng;

/// Symbols used for random short codes.
///
/// The stray uppercase `Z` is part of the published code space and must stay
/// in place, in this order, for existing links to remain reproducible.
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzZ0123456789";

/// Default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Symbols used by [`encode_base62`] / [`decode_base62`], in digit order.
pub const SEQUENCE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Codes that would shadow top-level routes.
pub const RESERVED_CODES: &[&str] = &["api", "health", "static", "admin", "favicon.ico"];

/// Errors returned by [`decode_base62`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty input")]
    Empty,

    #[error("invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("value does not fit in 64 bits")]
    Overflow,
}

/// Generates a random short code of `length` symbols.
///
/// Each symbol is drawn independently and uniformly from [`CODE_ALPHABET`].
/// Uniqueness is not guaranteed here; callers check against storage.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` collides with a reserved route name.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Encodes a non-negative integer with [`SEQUENCE_ALPHABET`].
///
/// The radix is the alphabet length (36). Zero encodes to `"0"`.
///
/// # Examples
///
/// ```
/// use minilink::utils::code_generator::encode_base62;
///
/// assert_eq!(encode_base62(0), "0");
/// assert_eq!(encode_base62(35), "z");
/// assert_eq!(encode_base62(36), "10");
/// ```
pub fn encode_base62(mut num: u64) -> String {
    if num == 0 {
        return "0".to_string();
    }

    let radix = SEQUENCE_ALPHABET.len() as u64;
    let mut digits = Vec::new();

    while num > 0 {
        digits.push(SEQUENCE_ALPHABET[(num % radix) as usize]);
        num /= radix;
    }

    digits.iter().rev().map(|&b| b as char).collect()
}

/// Decodes a string produced by [`encode_base62`].
///
/// # Errors
///
/// Returns [`DecodeError`] for empty input, symbols outside the alphabet,
/// or values larger than `u64::MAX`.
pub fn decode_base62(input: &str) -> Result<u64, DecodeError> {
    if input.is_empty() {
        return Err(DecodeError::Empty);
    }

    let radix = SEQUENCE_ALPHABET.len() as u64;

    input.chars().try_fold(0u64, |acc, c| {
        let digit = SEQUENCE_ALPHABET
            .iter()
            .position(|&b| b as char == c)
            .ok_or(DecodeError::InvalidCharacter(c))? as u64;

        acc.checked_mul(radix)
            .and_then(|v| v.checked_add(digit))
            .ok_or(DecodeError::Overflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_is_preserved_exactly() {
        assert_eq!(
            std::str::from_utf8(CODE_ALPHABET).unwrap(),
            "abcdefghijklmnopqrstuvwxyzZ0123456789"
        );
        assert_eq!(CODE_ALPHABET.len(), 37);
    }

    #[test]
    fn test_generate_code_default_length() {
        let code = generate_code(DEFAULT_CODE_LENGTH);
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn test_generate_code_custom_length() {
        assert_eq!(generate_code(10).len(), 10);
        assert!(generate_code(0).is_empty());
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..500 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn test_generate_code_is_random() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code(8)).collect();
        // 37^8 possibilities; 1000 draws colliding more than once is vanishingly unlikely
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_generate_code_can_produce_uppercase_z() {
        let seen = (0..5000)
            .flat_map(|_| generate_code(DEFAULT_CODE_LENGTH).into_bytes())
            .any(|b| b == b'Z');
        assert!(seen);
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved("health"));
        assert!(is_reserved("api"));
        assert!(!is_reserved("abc123"));
    }

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode_base62(0), "0");
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode_base62(9), "9");
        assert_eq!(encode_base62(10), "a");
        assert_eq!(encode_base62(35), "z");
        assert_eq!(encode_base62(36), "10");
        assert_eq!(encode_base62(1295), "zz");
        assert_eq!(encode_base62(123), "3f");
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode_base62("0"), Ok(0));
        assert_eq!(decode_base62("z"), Ok(35));
        assert_eq!(decode_base62("10"), Ok(36));
        assert_eq!(decode_base62("3f"), Ok(123));
    }

    #[test]
    fn test_decode_inverts_encode_at_extremes() {
        assert_eq!(decode_base62(&encode_base62(u64::MAX)), Ok(u64::MAX));
        assert_eq!(decode_base62(&encode_base62(1_234_567_890)), Ok(1_234_567_890));
    }

    #[test]
    fn test_decode_rejects_invalid() {
        assert_eq!(decode_base62(""), Err(DecodeError::Empty));
        assert_eq!(decode_base62("ab-c"), Err(DecodeError::InvalidCharacter('-')));
        assert_eq!(decode_base62("Z"), Err(DecodeError::InvalidCharacter('Z')));
    }

    #[test]
    fn test_decode_overflow() {
        let too_big = format!("{}0", encode_base62(u64::MAX));
        assert_eq!(decode_base62(&too_big), Err(DecodeError::Overflow));
    }
}
