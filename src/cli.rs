//! Command line definitions.
//!
//! Kept in the library so `xtask` can render the man page from them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Video bot - branching video playback with option menus, forms and redirects
#[derive(Debug, Parser)]
#[command(name = "vidbot")]
#[command(version = crate::VERSION)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a video graph for malformed actions and options
    Check {
        /// Graph file (JSON)
        graph: PathBuf,
    },
    /// Play a video graph against a simulated device
    ///
    /// Reads one command per line: activate, tick [ms], canplay, end,
    /// select <n>, close, fs-exit, disable, root <id>, status, quit.
    Play {
        /// Graph file (JSON)
        graph: PathBuf,

        /// Preview video shown while collapsed
        #[arg(long, default_value = "preview.mp4")]
        preview: String,

        /// Simulated viewport width in pixels (defaults to the config value)
        #[arg(long)]
        width: Option<u32>,

        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Show, locate or create the configuration
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write a config file with the default values
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
