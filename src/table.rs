use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A raw encoding dictionary: a padding character plus a map of binary keys
/// to their encoded representations.
///
/// This is the serializable form produced by the generator and persisted to
/// disk. It carries no validity guarantee; build a [`DefinitionTable`] from
/// it before encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingDictionary {
    /// The padding character appended to a partial trailing group
    pub padding: char,
    /// Map of binary keys (strings over `0`/`1`) to representations
    pub mappings: HashMap<String, String>,
}

/// Errors raised while validating an encoding dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The dictionary has no entries
    Empty,
    /// Keys have zero length
    ZeroLengthKey,
    /// A key's length differs from the first key's length
    KeyLengthMismatch { key: String, expected: usize },
    /// A key contains a character other than `0` or `1`
    NonBinaryKey { key: String },
    /// Values have zero length
    ZeroLengthValue,
    /// A value's length differs from the first value's length
    ValueLengthMismatch { value: String, expected: usize },
    /// The padding string is not exactly one character
    PaddingNotSingleChar { padding: String },
    /// A value ends with the padding character, making decode ambiguous
    PaddingCollision { padding: char, key: String, value: String },
    /// Two keys map to the same value, making reverse lookup ambiguous
    DuplicateValue { value: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Empty => {
                write!(f, "encoding dictionary must contain at least one entry")
            }
            TableError::ZeroLengthKey => {
                write!(f, "binary key length must be greater than zero")
            }
            TableError::KeyLengthMismatch { key, expected } => write!(
                f,
                "binary key [{}] does not match the first key's length of {}",
                key, expected
            ),
            TableError::NonBinaryKey { key } => write!(
                f,
                "binary key [{}] may only contain the characters 0 and 1",
                key
            ),
            TableError::ZeroLengthValue => {
                write!(f, "representation length must be greater than zero")
            }
            TableError::ValueLengthMismatch { value, expected } => write!(
                f,
                "representation [{}] does not match the first representation's length of {}",
                value, expected
            ),
            TableError::PaddingNotSingleChar { padding } => write!(
                f,
                "padding must be a single character, got [{}]",
                padding
            ),
            TableError::PaddingCollision {
                padding,
                key,
                value,
            } => write!(
                f,
                "character [{}] cannot be used for padding: it matches the trailing \
                 character of representation [{}] for binary key [{}]",
                padding, value, key
            ),
            TableError::DuplicateValue { value } => write!(
                f,
                "representation [{}] is mapped by more than one binary key",
                value
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// A validated, immutable encoding definition table.
///
/// Construction checks every structural invariant of the dictionary, then
/// materializes a reverse map so decode lookups are constant time. Once
/// built, the table is read-only and safe to share across threads.
#[derive(Debug, Clone)]
pub struct DefinitionTable {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
    padding: char,
    key_length: usize,
    value_length: usize,
    even_key_length: bool,
}

impl DefinitionTable {
    /// Validates `mappings` and `padding` and builds a table.
    ///
    /// # Errors
    ///
    /// Fails fast with the [`TableError`] describing the first violated
    /// invariant: empty dictionary, non-uniform or non-binary keys,
    /// non-uniform values, multi-character padding, a value ending in the
    /// padding character, or two keys sharing a value.
    pub fn new(mappings: &HashMap<String, String>, padding: &str) -> Result<Self, TableError> {
        let mut entries = mappings.iter();
        let (first_key, first_value) = entries.next().ok_or(TableError::Empty)?;

        let key_length = first_key.chars().count();
        let value_length = first_value.chars().count();

        Self::validate_keys(mappings, key_length)?;
        Self::validate_values(mappings, value_length)?;
        let padding = Self::validate_padding(mappings, padding)?;
        let reverse = Self::build_reverse(mappings)?;

        Ok(DefinitionTable {
            forward: mappings.clone(),
            reverse,
            padding,
            key_length,
            value_length,
            even_key_length: key_length % 2 == 0,
        })
    }

    /// Validates a raw [`EncodingDictionary`] and builds a table from it.
    pub fn from_dictionary(dictionary: &EncodingDictionary) -> Result<Self, TableError> {
        let padding = dictionary.padding.to_string();
        Self::new(&dictionary.mappings, &padding)
    }

    fn validate_keys(
        mappings: &HashMap<String, String>,
        key_length: usize,
    ) -> Result<(), TableError> {
        if key_length == 0 {
            return Err(TableError::ZeroLengthKey);
        }
        for key in mappings.keys() {
            if key.chars().count() != key_length {
                return Err(TableError::KeyLengthMismatch {
                    key: key.clone(),
                    expected: key_length,
                });
            }
            if key.chars().any(|c| c != '0' && c != '1') {
                return Err(TableError::NonBinaryKey { key: key.clone() });
            }
        }
        Ok(())
    }

    fn validate_values(
        mappings: &HashMap<String, String>,
        value_length: usize,
    ) -> Result<(), TableError> {
        if value_length == 0 {
            return Err(TableError::ZeroLengthValue);
        }
        for value in mappings.values() {
            if value.chars().count() != value_length {
                return Err(TableError::ValueLengthMismatch {
                    value: value.clone(),
                    expected: value_length,
                });
            }
        }
        Ok(())
    }

    fn validate_padding(
        mappings: &HashMap<String, String>,
        padding: &str,
    ) -> Result<char, TableError> {
        let mut chars = padding.chars();
        let padding_char = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(TableError::PaddingNotSingleChar {
                    padding: padding.to_string(),
                });
            }
        };
        for (key, value) in mappings {
            if value.ends_with(padding_char) {
                return Err(TableError::PaddingCollision {
                    padding: padding_char,
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(padding_char)
    }

    fn build_reverse(
        mappings: &HashMap<String, String>,
    ) -> Result<HashMap<String, String>, TableError> {
        let mut reverse = HashMap::with_capacity(mappings.len());
        for (key, value) in mappings {
            if reverse.insert(value.clone(), key.clone()).is_some() {
                return Err(TableError::DuplicateValue {
                    value: value.clone(),
                });
            }
        }
        Ok(reverse)
    }

    /// The length of every binary key in the table.
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// The length (in characters) of every representation in the table.
    pub fn value_length(&self) -> usize {
        self.value_length
    }

    /// Whether the key length is even.
    ///
    /// An even key length halves the number of padding characters emitted
    /// per missing bit pair, matching standard base64's one-or-two `=`.
    pub fn even_key_length(&self) -> bool {
        self.even_key_length
    }

    /// The padding character.
    pub fn padding(&self) -> char {
        self.padding
    }

    /// Looks up the representation for a binary key.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.forward.get(key).map(String::as_str)
    }

    /// Looks up the binary key for a representation.
    pub fn reverse_lookup(&self, value: &str) -> Option<&str> {
        self.reverse.get(value).map(String::as_str)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the table has no entries. Never true for a validated table.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
