mod commands;

use anyhow::Result;
use clap::Parser;

use vidbot::cli::{Cli, Commands, ConfigCommands};
use vidbot::Config;

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load()?;
    let level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    vidbot::logging::init(level);

    match cli.command {
        Commands::Check { graph } => commands::check::handle(&graph),
        Commands::Play {
            graph,
            preview,
            width,
            script,
        } => {
            let width = width.unwrap_or(config.player.viewport_width);
            commands::play::handle(&config, &graph, &preview, width, script.as_deref())?;
            Ok(0)
        }
        Commands::Config(ConfigCommands::Show) => {
            commands::config::handle_show(&config)?;
            Ok(0)
        }
        Commands::Config(ConfigCommands::Path) => {
            commands::config::handle_path()?;
            Ok(0)
        }
        Commands::Config(ConfigCommands::Init { force }) => {
            commands::config::handle_init(force)?;
            Ok(0)
        }
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(0)
        }
    }
}
