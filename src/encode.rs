use crate::bits::{BitChunks, bytes_to_bits};
use crate::pad::rpad;
use crate::table::DefinitionTable;
use std::fmt;

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The dictionary has no entry for a required binary key.
    /// Only possible with a dictionary that does not cover the full key space.
    UnknownKey { key: String },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnknownKey { key } => write!(
                f,
                "encoding dictionary has no binary key matching [{}]",
                key
            ),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Encodes bytes to text against a validated table.
///
/// The input becomes a bit string (8 bits per byte, MSB first), which is
/// split into key-length groups and substituted through the table. A short
/// final group is zero-filled to key length and the padding character is
/// appended once per missing bit (once per missing bit pair when the key
/// length is even), which is what yields base64's familiar `=` runs.
///
/// # Errors
///
/// Returns [`EncodeError::UnknownKey`] when a required key has no entry.
pub fn encode(data: &[u8], table: &DefinitionTable) -> Result<String, EncodeError> {
    let bits = bytes_to_bits(data);
    let key_length = table.key_length();
    let group_count = bits.len().div_ceil(key_length);
    let mut encoded = String::with_capacity(group_count * table.value_length());

    for chunk in BitChunks::new(&bits, key_length) {
        if chunk.len() == key_length {
            let representation = table.lookup(chunk).ok_or_else(|| EncodeError::UnknownKey {
                key: chunk.to_string(),
            })?;
            encoded.push_str(representation);
            continue;
        }

        // Short final chunk: zero-fill to key length, then mark how many
        // bits were synthetic with a run of padding characters.
        let filled = rpad(chunk, key_length, '0');
        let representation = table.lookup(&filled).ok_or_else(|| EncodeError::UnknownKey {
            key: filled.clone(),
        })?;
        encoded.push_str(representation);

        let divisor = if table.even_key_length() { 2 } else { 1 };
        let missing_bits = key_length - chunk.len();
        debug_assert_eq!(missing_bits % divisor, 0);
        for _ in 0..missing_bits / divisor {
            encoded.push(table.padding());
        }
    }

    Ok(encoded)
}

/// Encodes a string's UTF-8 bytes to text against a validated table.
pub fn encode_str(text: &str, table: &DefinitionTable) -> Result<String, EncodeError> {
    encode(text.as_bytes(), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn two_bit_table() -> DefinitionTable {
        let mappings: HashMap<String, String> = [("00", "a"), ("01", "b"), ("10", "c"), ("11", "d")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DefinitionTable::new(&mappings, "=").unwrap()
    }

    #[test]
    fn test_encode_empty_input() {
        let table = two_bit_table();
        assert_eq!(encode(b"", &table).unwrap(), "");
    }

    #[test]
    fn test_encode_single_byte_no_padding() {
        let table = two_bit_table();
        // 0x1B = 00 01 10 11
        assert_eq!(encode(&[0x1B], &table).unwrap(), "abcd");
    }

    #[test]
    fn test_encode_unknown_key() {
        let mappings: HashMap<String, String> =
            [("00".to_string(), "a".to_string())].into_iter().collect();
        let table = DefinitionTable::new(&mappings, "=").unwrap();
        let err = encode(&[0xFF], &table).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownKey {
                key: "11".to_string()
            }
        );
    }

    #[test]
    fn test_encode_pads_short_final_chunk() {
        // Key length 3 over a single byte leaves a trailing 2-bit chunk;
        // one synthetic bit means one padding character (odd key length).
        let mappings: HashMap<String, String> = (0..8)
            .map(|i| (format!("{:03b}", i), format!("{}", i)))
            .collect();
        let table = DefinitionTable::new(&mappings, "=").unwrap();
        // 0xFF = 111 111 11 -> "77", then 11 + fill 0 -> 110 = "6" plus one '='
        assert_eq!(encode(&[0xFF], &table).unwrap(), "776=");
    }
}
