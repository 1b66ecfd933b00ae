//! Memento CLI
//!
//! Command-line interface for reading and writing a preference store.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use memento::{Config, MementoError, Store, WriteStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// Memento CLI
#[derive(Parser, Debug)]
#[command(name = "memento")]
#[command(about = "Read and write a local key-value preference store")]
#[command(version)]
struct Args {
    /// Directory holding the store file (must exist)
    #[arg(short, long, default_value = "./memento")]
    dir: PathBuf,

    /// Store name; the file is {dir}/{name}.csv
    #[arg(short, long, default_value = "user_prefs")]
    name: String,

    /// Write through a temp file and rename instead of truncating in place
    #[arg(long)]
    atomic: bool,

    /// fsync the store file after every write
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value stored under a key
    Get {
        /// The key to read
        key: String,

        /// How to decode the stored value
        #[arg(short, long, value_enum, default_value = "string")]
        kind: Kind,

        /// Value printed when the key is missing (or does not decode)
        #[arg(long)]
        default: Option<String>,
    },

    /// Store a value under a key
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Logical type of the value
        #[arg(short, long, value_enum, default_value = "string")]
        kind: Kind,
    },

    /// Remove a key
    Remove {
        /// The key to remove
        key: String,
    },

    /// Print every entry as key=value
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Bool,
    Int,
    Float,
    String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,memento=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), MementoError> {
    let strategy = if args.atomic {
        WriteStrategy::AtomicRename
    } else {
        WriteStrategy::Truncate
    };

    let config = Config::builder()
        .name(args.name)
        .dir(args.dir)
        .write_strategy(strategy)
        .sync_on_write(args.sync)
        .build();

    let mut store = Store::open_with_config(config)?;
    tracing::debug!(path = %store.path().display(), entries = store.len(), "store ready");

    match args.command {
        Commands::Get { key, kind, default } => {
            println!("{}", get_value(&store, &key, kind, default.as_deref())?);
        }
        Commands::Set { key, value, kind } => {
            set_value(&mut store, &key, value, kind)?;
            tracing::info!(key = %key, "stored");
        }
        Commands::Remove { key } => {
            if store.remove(&key)? {
                tracing::info!(key = %key, "removed");
            } else {
                tracing::info!(key = %key, "not present");
            }
        }
        Commands::List => {
            for (key, value) in &store {
                println!("{}={}", key, value);
            }
        }
    }

    Ok(())
}

/// Decode `key` as `kind`, using `default` (or the type's zero value)
fn get_value(
    store: &Store,
    key: &str,
    kind: Kind,
    default: Option<&str>,
) -> Result<String, MementoError> {
    let out = match kind {
        Kind::Bool => store.get_bool(key, parse_arg(default, false)?).to_string(),
        Kind::Int => store.get_int(key, parse_arg(default, 0)?).to_string(),
        Kind::Float => store.get_float(key, parse_arg(default, 0.0)?).to_string(),
        Kind::String => store.get_string(key, default.unwrap_or("")),
    };
    Ok(out)
}

/// Validate `value` against `kind` and store it
fn set_value(store: &mut Store, key: &str, value: String, kind: Kind) -> Result<(), MementoError> {
    match kind {
        Kind::Bool => store.set_bool(key, parse_arg(Some(value.as_str()), false)?),
        Kind::Int => store.set_int(key, parse_arg(Some(value.as_str()), 0)?),
        Kind::Float => store.set_float(key, parse_arg(Some(value.as_str()), 0.0)?),
        Kind::String => store.set_string(key, value),
    }
}

/// Parse a command-line value, falling back to `zero` when absent
fn parse_arg<T>(raw: Option<&str>, zero: T) -> Result<T, MementoError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(zero),
        Some(raw) => raw
            .parse()
            .map_err(|e| MementoError::Config(format!("invalid value {:?}: {}", raw, e))),
    }
}
