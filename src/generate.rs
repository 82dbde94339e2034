use crate::pad::lpad;
use crate::table::EncodingDictionary;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Characters never used in generated representations, on top of the
/// padding character: they need escaping in common config formats.
const EXCLUDED_CHARACTERS: &str = "\\\"`'";

/// ASCII punctuation, as offered alongside the letters.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Upper bound on redraws for a single representation before giving up.
/// The feasibility check makes hitting this astronomically unlikely.
const MAX_DRAW_ATTEMPTS: usize = 10_000;

/// Largest supported binary key length. The generator materializes every
/// key, so the dictionary holds `2^K` entries; 24 bits is already sixteen
/// million of them.
const MAX_KEY_LENGTH: usize = 24;

/// Errors raised while generating an encoding dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The binary key length is zero
    InvalidKeyLength,
    /// The binary key length exceeds the supported maximum
    KeyLengthTooLarge { key_length: usize, max: usize },
    /// The representation length is zero
    InvalidValueLength,
    /// The padding string is not exactly one character
    InvalidPadding { padding: String },
    /// The representation length cannot cover the requested key space
    Infeasible { combinations: u128, required: u128 },
    /// Rejection sampling failed to find a free representation
    Exhausted { attempts: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InvalidKeyLength => {
                write!(f, "binary key length must be greater than zero")
            }
            GenerateError::KeyLengthTooLarge { key_length, max } => write!(
                f,
                "a binary key length of {} would generate 2^{} dictionary \
                 entries; the maximum supported length is {}",
                key_length, key_length, max
            ),
            GenerateError::InvalidValueLength => {
                write!(f, "representation length must be greater than zero")
            }
            GenerateError::InvalidPadding { padding } => write!(
                f,
                "padding must be a single character, got [{}]",
                padding
            ),
            GenerateError::Infeasible {
                combinations,
                required,
            } => write!(
                f,
                "the representation length allows {} unique combinations but the \
                 binary key length requires {} to be available",
                combinations, required
            ),
            GenerateError::Exhausted { attempts } => write!(
                f,
                "gave up after {} attempts to draw an unused representation",
                attempts
            ),
        }
    }
}

impl std::error::Error for GenerateError {}

/// Generates a pseudo-random encoding dictionary usable with the encoder
/// and decoder in this crate.
///
/// Every `key_length`-bit binary string is assigned a unique random
/// `value_length`-character representation drawn from ASCII letters and
/// punctuation, excluding the padding character and characters that need
/// escaping in config files. The result satisfies every
/// [`DefinitionTable`](crate::DefinitionTable) invariant.
///
/// # Errors
///
/// Fails when a length is zero, the key length exceeds the supported
/// maximum of 24 bits, the padding is not a single character, or the
/// alphabet cannot provide enough unique representations for the requested
/// key space.
pub fn generate_dictionary(
    key_length: usize,
    value_length: usize,
    padding: &str,
) -> Result<EncodingDictionary, GenerateError> {
    if key_length == 0 {
        return Err(GenerateError::InvalidKeyLength);
    }
    if key_length > MAX_KEY_LENGTH {
        return Err(GenerateError::KeyLengthTooLarge {
            key_length,
            max: MAX_KEY_LENGTH,
        });
    }
    if value_length == 0 {
        return Err(GenerateError::InvalidValueLength);
    }
    let mut padding_chars = padding.chars();
    let padding_char = match (padding_chars.next(), padding_chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(GenerateError::InvalidPadding {
                padding: padding.to_string(),
            });
        }
    };

    let alphabet = available_characters(padding_char);
    check_feasibility(&alphabet, key_length, value_length)?;

    let mut rng = rand::rng();
    let mut used: HashSet<String> = HashSet::new();
    let mut mappings: HashMap<String, String> = HashMap::new();

    for key in generate_keys(key_length) {
        let mut attempts = 0;
        let representation = loop {
            let candidate = draw_representation(&alphabet, value_length, &mut rng);
            if used.insert(candidate.clone()) {
                break candidate;
            }
            attempts += 1;
            if attempts >= MAX_DRAW_ATTEMPTS {
                return Err(GenerateError::Exhausted { attempts });
            }
        };
        mappings.insert(key, representation);
    }

    Ok(EncodingDictionary {
        padding: padding_char,
        mappings,
    })
}

/// The candidate alphabet: letters and punctuation, minus the padding
/// character and the exclusion set.
fn available_characters(padding: char) -> Vec<char> {
    ('A'..='Z')
        .chain('a'..='z')
        .chain(PUNCTUATION.chars())
        .filter(|&c| c != padding && !EXCLUDED_CHARACTERS.contains(c))
        .collect()
}

/// Requires strictly more representation combinations than the highest key
/// value, so every key can be assigned a unique representation.
fn check_feasibility(
    alphabet: &[char],
    key_length: usize,
    value_length: usize,
) -> Result<(), GenerateError> {
    let max_key_value = max_value_for_bit_count(key_length);
    let combinations = (alphabet.len() as u128).checked_pow(value_length as u32);
    match combinations {
        // An overflowed combination count dwarfs any key space.
        None => Ok(()),
        Some(combinations) if max_key_value < combinations => Ok(()),
        Some(combinations) => Err(GenerateError::Infeasible {
            combinations,
            required: max_key_value,
        }),
    }
}

/// The highest value representable in `bit_count` bits.
fn max_value_for_bit_count(bit_count: usize) -> u128 {
    if bit_count >= 128 {
        u128::MAX
    } else {
        (1u128 << bit_count) - 1
    }
}

/// Every binary key from all-zeros to all-ones, zero-filled to length.
fn generate_keys(key_length: usize) -> impl Iterator<Item = String> {
    let max = max_value_for_bit_count(key_length);
    (0..=max).map(move |value| lpad(&format!("{:b}", value), key_length, '0'))
}

fn draw_representation(alphabet: &[char], length: usize, rng: &mut impl Rng) -> String {
    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}
