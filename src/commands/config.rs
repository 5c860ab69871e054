//! Config subcommands handler

use anyhow::{bail, Result};

use vidbot::Config;

/// Show the effective configuration as TOML.
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Print where the configuration file lives.
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write the default configuration to the config file path.
pub fn handle_init(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
