mod bits;
mod config;
mod decode;
mod encode;
mod generate;
mod pad;
mod table;

pub use config::{DEFAULT_DICTIONARY, DictionaryConfig, DictionaryRegistry};
pub use decode::{DecodeError, decode, decode_str};
pub use encode::{EncodeError, encode, encode_str};
pub use generate::{GenerateError, generate_dictionary};
pub use table::{DefinitionTable, EncodingDictionary, TableError};
