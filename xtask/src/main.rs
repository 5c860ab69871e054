//! Development tasks for vidbot.
//!
//! Usage: `cargo run -p xtask -- man [--out <dir>]`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Render the vidbot man page
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => man(&out),
    }
}

fn man(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

    let cmd = vidbot::cli::Cli::command();
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buffer)?;

    let path = out.join("vidbot.1");
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
