//! CLI command definitions for confstack
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Layered YAML configuration store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; repeatable, later files override earlier ones
    /// and the last one is the write target
    #[arg(short, long = "file", value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Key-path separator
    #[arg(short, long, default_value = ".", global = true)]
    pub separator: String,

    /// Skip configuration files that do not exist
    #[arg(long, global = true)]
    pub ignore_missing: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value at a key path (or the whole merged tree) as YAML
    Get {
        /// Key path; omit for the full merged tree
        path: Option<String>,
    },

    /// Set a key path to a value and write the target file back
    Set {
        /// Key path to write
        path: String,

        /// New value, parsed as YAML (strings, numbers, booleans, lists, maps)
        value: String,
    },

    /// Delete a key path and write the target file back
    Delete {
        /// Key path to remove
        path: String,
    },

    /// Print the merged configuration tree as YAML
    Merge,
}
