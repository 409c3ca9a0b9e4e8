//! Stowage CLI - inspect and edit an application's content files.
//!
//! Usage:
//!   stowage path <name>                 # Where <name> is stored
//!   stowage save <name> [--input FILE]  # Store raw bytes (stdin by default)
//!   stowage load <name>                 # Print raw bytes
//!   stowage put-json <name> <json>      # Store a JSON document
//!   stowage get-json <name>             # Print a JSON document
//!   stowage list                        # List content files
//!   stowage remove <name>               # Delete a content file
//!   stowage resource <name>             # Print a bundled JSON resource

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use stowage::{load_bundled_resource, ContentStore, DirectoryBundle, StoreConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Stowage - JSON content files in your app's documents", long_about = None)]
struct Cli {
    /// Storage root (default: from config, else the documents directory)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the path a content file is stored at
    Path { name: String },

    /// Store raw bytes as a content file
    Save {
        name: String,

        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print a content file's raw bytes
    Load { name: String },

    /// Store a JSON document
    PutJson {
        name: String,

        /// The document, e.g. '{"a": 1}'
        json: String,
    },

    /// Print a stored JSON document
    GetJson {
        name: String,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// List stored content files
    List,

    /// Delete a content file
    Remove { name: String },

    /// Print a bundled JSON resource
    Resource {
        name: String,

        /// Resources directory (default: resources_dir from config)
        #[arg(short, long)]
        bundle: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    if let Some(root) = cli.root {
        config.root = Some(root);
    }

    let store = ContentStore::open(config)?;
    tracing::debug!(root = %store.root().display(), "using storage root");

    match cli.command {
        Commands::Path { name } => {
            println!("{}", store.content_file_path(&name)?.display());
        }

        Commands::Save { name, input } => {
            let data = match input {
                Some(path) => std::fs::read(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            let path = store.try_save_content_file(&name, &data)?;
            println!("{}", path.display());
        }

        Commands::Load { name } => match store.load_content_file(&name) {
            Some(bytes) => io::stdout().write_all(&bytes)?,
            None => {
                eprintln!("No content file named {name}");
                return Ok(ExitCode::from(2));
            }
        },

        Commands::PutJson { name, json } => {
            let value: serde_json::Value =
                serde_json::from_str(&json).context("argument is not valid JSON")?;
            let path = store.try_save_json(&value, &name)?;
            println!("{}", path.display());
        }

        Commands::GetJson { name, pretty } => match store.load_json(&name) {
            Some(value) => {
                let text = if pretty {
                    serde_json::to_string_pretty(&value)?
                } else {
                    value.to_string()
                };
                println!("{text}");
            }
            None => {
                eprintln!("No JSON document named {name}");
                return Ok(ExitCode::from(2));
            }
        },

        Commands::List => {
            for name in store.list_content_files()? {
                println!("{name}");
            }
        }

        Commands::Remove { name } => {
            if !store.remove_content_file(&name)? {
                eprintln!("No content file named {name}");
                return Ok(ExitCode::from(2));
            }
        }

        Commands::Resource { name, bundle } => {
            let dir = bundle
                .or_else(|| store.config().resources_dir.clone())
                .ok_or_else(|| {
                    anyhow!("no resources directory: pass --bundle or set resources_dir")
                })?;
            if !dir.is_dir() {
                bail!("resources directory {} does not exist", dir.display());
            }

            let bundle = DirectoryBundle::new(dir);
            match load_bundled_resource(&bundle, &name)? {
                Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                None => {
                    eprintln!("Resource {name} is present but unreadable");
                    return Ok(ExitCode::from(2));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
