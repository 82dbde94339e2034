use base_k::{
    DEFAULT_DICTIONARY, DefinitionTable, DictionaryConfig, DictionaryRegistry, decode, decode_str,
    encode, encode_str, generate_dictionary,
};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "base-k")]
#[command(version)]
#[command(about = "Encode and decode data against custom bit-key dictionaries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a string or a file
    #[command(subcommand)]
    Encode(EncodeCommands),
    /// Decode an encoded string
    #[command(subcommand)]
    Decode(DecodeCommands),
    /// Generate a new randomized dictionary
    Generate(GenerateArgs),
    /// List available dictionaries
    List,
}

#[derive(Subcommand)]
enum EncodeCommands {
    /// Encode a literal string
    String {
        value: String,
        #[command(flatten)]
        dictionary: DictionaryArgs,
    },
    /// Encode a file's contents
    File {
        file: PathBuf,
        #[command(flatten)]
        dictionary: DictionaryArgs,
    },
}

#[derive(Subcommand)]
enum DecodeCommands {
    /// Decode to a UTF-8 string
    String {
        value: String,
        #[command(flatten)]
        dictionary: DictionaryArgs,
    },
    /// Decode to a file
    File {
        value: String,
        output: PathBuf,
        #[command(flatten)]
        dictionary: DictionaryArgs,
    },
}

/// How to pick the dictionary for an encode or decode command.
#[derive(Args)]
struct DictionaryArgs {
    /// Named dictionary from the registry
    #[arg(short = 'd', long, default_value = DEFAULT_DICTIONARY)]
    dictionary: String,

    /// Standalone dictionary file (takes precedence over --dictionary)
    #[arg(short = 'f', long, value_name = "PATH")]
    dictionary_file: Option<String>,
}

impl DictionaryArgs {
    fn load_table(&self) -> Result<DefinitionTable, Box<dyn std::error::Error>> {
        let config = if let Some(path) = &self.dictionary_file {
            let expanded = shellexpand::tilde(path);
            DictionaryConfig::load_from_file(Path::new(expanded.as_ref()))?
        } else {
            let registry = DictionaryRegistry::load_with_overrides()?;
            registry
                .get_dictionary(&self.dictionary)
                .ok_or_else(|| {
                    format!(
                        "Dictionary '{}' not found. Use `base-k list` to see available dictionaries.",
                        self.dictionary
                    )
                })?
                .clone()
        };
        Ok(config.to_table()?)
    }
}

#[derive(Args)]
struct GenerateArgs {
    /// Length of each binary key, in bits
    key_length: usize,

    /// Length of each encoded representation, in characters
    value_length: usize,

    /// Padding character for the new dictionary
    #[arg(short = 'p', long, default_value = "=")]
    padding: String,

    /// Write the dictionary to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(EncodeCommands::String { value, dictionary }) => {
            let table = dictionary.load_table()?;
            println!("{}", encode_str(&value, &table)?);
        }
        Commands::Encode(EncodeCommands::File { file, dictionary }) => {
            let table = dictionary.load_table()?;
            let data = fs::read(&file)?;
            println!("{}", encode(&data, &table)?);
        }
        Commands::Decode(DecodeCommands::String { value, dictionary }) => {
            let table = dictionary.load_table()?;
            println!("{}", decode_str(&value, &table)?);
        }
        Commands::Decode(DecodeCommands::File {
            value,
            output,
            dictionary,
        }) => {
            let table = dictionary.load_table()?;
            let decoded = decode(&value, &table)?;
            fs::write(&output, decoded)?;
        }
        Commands::Generate(args) => {
            let dictionary =
                generate_dictionary(args.key_length, args.value_length, &args.padding)?;
            let serialized = toml::to_string(&dictionary)?;
            match args.output {
                Some(path) => fs::write(&path, serialized)?,
                None => print!("{}", serialized),
            }
        }
        Commands::List => {
            let registry = DictionaryRegistry::load_with_overrides()?;
            println!("Available dictionaries:\n");
            let mut entries: Vec<_> = registry.dictionaries.iter().collect();
            entries.sort_by_key(|(name, _)| *name);
            for (name, config) in entries {
                let key_length = config
                    .mappings
                    .keys()
                    .next()
                    .map(|key| key.chars().count())
                    .unwrap_or(0);
                println!(
                    "  {:<15} {:>4} entries  key length {:>2}  padding {}",
                    name,
                    config.mappings.len(),
                    key_length,
                    config.padding
                );
            }
        }
    }

    Ok(())
}
