use crate::bits::bits_to_bytes;
use crate::table::DefinitionTable;
use std::fmt;

/// Errors that can occur during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A group of characters in the input has no reverse mapping.
    /// The input is corrupted, or was encoded with a different dictionary.
    UnknownRepresentation { representation: String },
    /// After padding correction the bit length is not a multiple of 8,
    /// which means the dictionary/padding pairing does not match the one
    /// used to encode.
    MalformedLength { bits: usize },
    /// The trailing padding run is longer than any encode can produce:
    /// it would strip every bit of the final group's key.
    InvalidPadding { padding_count: usize },
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8(std::str::Utf8Error),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownRepresentation { representation } => write!(
                f,
                "no binary key in the encoding dictionary maps to representation [{}]",
                representation
            ),
            DecodeError::MalformedLength { bits } => write!(
                f,
                "decoded bit length {} is not a multiple of 8; the input does not \
                 match this dictionary and padding character",
                bits
            ),
            DecodeError::InvalidPadding { padding_count } => write!(
                f,
                "a padding run of {} characters would remove every bit of the \
                 final group; the input does not match this dictionary and \
                 padding character",
                padding_count
            ),
            DecodeError::InvalidUtf8(err) => {
                write!(f, "decoded bytes are not valid UTF-8: {}", err)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Splits encoded text into representation groups, walking tail to head.
///
/// Only the final group of an encoded string can carry padding, so groups
/// must be recovered from the end backward. Trailing padding characters are
/// stripped up front and their count attributed to the first group yielded.
struct GroupSplitter {
    chars: Vec<char>,
    group_length: usize,
    position: usize,
}

impl GroupSplitter {
    /// Strips trailing padding from `encoded` and returns the splitter
    /// together with the number of padding characters removed.
    fn new(encoded: &str, padding: char, group_length: usize) -> (Self, usize) {
        let mut chars: Vec<char> = encoded.chars().collect();
        let mut padding_count = 0;
        while chars.last() == Some(&padding) {
            chars.pop();
            padding_count += 1;
        }
        let position = chars.len();
        (
            GroupSplitter {
                chars,
                group_length,
                position,
            },
            padding_count,
        )
    }
}

impl Iterator for GroupSplitter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.position == 0 {
            return None;
        }
        let start = self.position.saturating_sub(self.group_length);
        let group = self.chars[start..self.position].iter().collect();
        self.position = start;
        Some(group)
    }
}

/// Decodes text back to bytes against a validated table.
///
/// Groups are recovered tail-to-head. The group adjacent to the stripped
/// padding run has its binary key truncated by one bit per padding
/// character (two bits per character when the key length is even), the
/// exact inverse of the encoder's padding arithmetic.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownRepresentation`] when a group has no
/// reverse mapping, [`DecodeError::InvalidPadding`] when the padding run is
/// longer than the final group's key can absorb, or
/// [`DecodeError::MalformedLength`] when the corrected bit string is not a
/// whole number of bytes.
pub fn decode(encoded: &str, table: &DefinitionTable) -> Result<Vec<u8>, DecodeError> {
    let (splitter, padding_count) =
        GroupSplitter::new(encoded, table.padding(), table.value_length());
    let divisor = if table.even_key_length() { 2 } else { 1 };

    // A valid encode leaves at least one real bit in the final key, so the
    // trimmed run is always shorter than the key itself and always has a
    // group in front of it.
    let trimmed_bits = padding_count * divisor;
    if padding_count > 0 && (splitter.position == 0 || trimmed_bits >= table.key_length()) {
        return Err(DecodeError::InvalidPadding { padding_count });
    }

    let mut keys: Vec<String> = Vec::new();
    for (index, group) in splitter.enumerate() {
        let key = table
            .reverse_lookup(&group)
            .ok_or_else(|| DecodeError::UnknownRepresentation {
                representation: group.clone(),
            })?;

        // The first group walked is the last of the encoded string and the
        // only one whose key can end in synthetic zero-fill bits.
        if index == 0 && padding_count > 0 {
            keys.push(key[..key.len() - trimmed_bits].to_string());
        } else {
            keys.push(key.to_string());
        }
    }

    keys.reverse();
    let bit_string = keys.concat();
    bits_to_bytes(&bit_string).ok_or(DecodeError::MalformedLength {
        bits: bit_string.len(),
    })
}

/// Decodes text back to a string against a validated table.
///
/// # Errors
///
/// Fails like [`decode`], plus [`DecodeError::InvalidUtf8`] when the
/// decoded bytes are not valid UTF-8.
pub fn decode_str(encoded: &str, table: &DefinitionTable) -> Result<String, DecodeError> {
    let bytes = decode(encoded, table)?;
    String::from_utf8(bytes).map_err(|err| DecodeError::InvalidUtf8(err.utf8_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use std::collections::HashMap;

    fn table(pairs: &[(&str, &str)], padding: &str) -> DefinitionTable {
        let mappings: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DefinitionTable::new(&mappings, padding).unwrap()
    }

    #[test]
    fn test_decode_empty_input() {
        let t = table(&[("00", "a"), ("01", "b"), ("10", "c"), ("11", "d")], "=");
        assert_eq!(decode("", &t).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_without_padding() {
        let t = table(&[("00", "a"), ("01", "b"), ("10", "c"), ("11", "d")], "=");
        assert_eq!(decode("abcd", &t).unwrap(), vec![0x1B]);
    }

    #[test]
    fn test_decode_with_padding_correction() {
        // Inverse of the encoder's short-chunk handling with key length 3.
        let mappings: Vec<(String, String)> = (0..8)
            .map(|i| (format!("{:03b}", i), format!("{}", i)))
            .collect();
        let pairs: Vec<(&str, &str)> = mappings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let t = table(&pairs, "=");
        assert_eq!(decode("776=", &t).unwrap(), vec![0xFF]);
    }

    #[test]
    fn test_decode_unknown_representation() {
        let t = table(&[("00", "a"), ("01", "b"), ("10", "c"), ("11", "d")], "=");
        let err = decode("abcz", &t).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownRepresentation {
                representation: "z".to_string()
            }
        );
    }

    #[test]
    fn test_decode_short_leading_group_fails_lookup() {
        let t = table(&[("00", "aa"), ("01", "bb"), ("10", "cc"), ("11", "dd")], "=");
        // Five characters cannot split evenly into two-character groups; the
        // single leftover head character surfaces as an unknown representation.
        let err = decode("aaabb", &t).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownRepresentation {
                representation: "a".to_string()
            }
        );
    }

    #[test]
    fn test_decode_malformed_bit_length() {
        // Three 3-bit keys make 9 bits, which is not a whole byte.
        let mappings: Vec<(String, String)> = (0..8)
            .map(|i| (format!("{:03b}", i), format!("{}", i)))
            .collect();
        let pairs: Vec<(&str, &str)> = mappings
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let t = table(&pairs, "=");
        let err = decode("777", &t).unwrap_err();
        assert_eq!(err, DecodeError::MalformedLength { bits: 9 });
    }

    #[test]
    fn test_decode_rejects_padding_consuming_whole_key() {
        // Key length 2 with an even divisor means even one padding
        // character claims the entire final key.
        let t = table(&[("00", "a"), ("01", "b"), ("10", "c"), ("11", "d")], "=");
        let err = decode("aa=", &t).unwrap_err();
        assert_eq!(err, DecodeError::InvalidPadding { padding_count: 1 });
    }

    #[test]
    fn test_decode_rejects_padding_without_group() {
        let t = table(&[("00", "a"), ("01", "b"), ("10", "c"), ("11", "d")], "=");
        let err = decode("==", &t).unwrap_err();
        assert_eq!(err, DecodeError::InvalidPadding { padding_count: 2 });
    }

    #[test]
    fn test_decode_str_rejects_invalid_utf8() {
        let t = table(&[("00", "a"), ("01", "b"), ("10", "c"), ("11", "d")], "=");
        let encoded = encode(&[0xFF, 0xFE], &t).unwrap();
        assert!(matches!(
            decode_str(&encoded, &t).unwrap_err(),
            DecodeError::InvalidUtf8(_)
        ));
    }

    #[test]
    fn test_multi_character_representations_round_trip() {
        let t = table(&[("0", "xy"), ("1", "xz")], "=");
        let encoded = encode(b"K", &t).unwrap();
        assert_eq!(decode(&encoded, &t).unwrap(), b"K".to_vec());
    }
}
