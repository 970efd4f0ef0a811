//! confstack CLI
//!
//! Reads a layered set of YAML configuration files, deep-merges them, and
//! gets, sets, or deletes values by dotted key path. Writes go back to the
//! last file in the list; earlier files are read-only inputs.

use anyhow::Result;
use clap::Parser;
use confstack::cli::{Cli, Command};
use confstack::{ConfigStore, LoadOptions};
use std::fs::OpenOptions;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let mut store = ConfigStore::new(&cli.files)?;
    store
        .load(LoadOptions {
            ignore_non_existing: cli.ignore_missing,
        })
        .await?;

    match cli.command {
        Command::Get { path } => {
            let path = path.unwrap_or_default();
            match store.get_with(&path, &cli.separator) {
                Some(value) => print!("{}", serde_yaml::to_string(value)?),
                None => {
                    eprintln!("no value at path '{path}'");
                    std::process::exit(1);
                }
            }
        }
        Command::Set { path, value } => {
            let value: serde_json::Value = serde_yaml::from_str(&value)?;
            store.set_with(&path, value, &cli.separator);
            store.save()?;
        }
        Command::Delete { path } => {
            store.delete_with(&path, &cli.separator);
            store.save()?;
        }
        Command::Merge => {
            print!("{}", serde_yaml::to_string(store.working())?);
        }
    }

    Ok(())
}
