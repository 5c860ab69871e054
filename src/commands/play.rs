//! Play subcommand handler

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use vidbot::driver::{Command, Driver, Flow};
use vidbot::graph::load_graph;
use vidbot::Config;

/// Run the engine against the simulated device.
///
/// Commands come from `script` when given, otherwise from stdin. Invalid
/// commands are reported and skipped.
pub fn handle(
    config: &Config,
    graph: &Path,
    preview: &str,
    width: u32,
    script: Option<&Path>,
) -> Result<()> {
    let root = load_graph(graph)?;
    let mut driver = Driver::new(config.engine_config(), preview, root, width);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    writeln!(stdout, "{}", driver.status())?;

    match script {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            for line in content.lines() {
                if step(&mut driver, line, &mut stdout)? == Flow::Quit {
                    break;
                }
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                if step(&mut driver, &line?, &mut stdout)? == Flow::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn step(driver: &mut Driver, line: &str, out: &mut impl Write) -> Result<Flow> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Flow::Continue);
    }

    writeln!(out, "> {}", line)?;
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            writeln!(out, "error: {:#}", e)?;
            return Ok(Flow::Continue);
        }
    };

    let mut transcript = String::new();
    let flow = driver.run(&command, &mut transcript);
    write!(out, "{}", transcript)?;
    Ok(flow)
}
