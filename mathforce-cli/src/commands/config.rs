use anyhow::Result;
use clap::{Args, Subcommand};
use mathforce_engine::Role;

use super::Context;
use crate::config::ConfigLoader;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged)
    Show,
    /// Show configuration file paths
    Path,
}

pub fn run(args: ConfigArgs, role: Option<Role>) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(role),
        ConfigCommands::Path => show_paths(),
    }
}

fn show_config(role: Option<Role>) -> Result<()> {
    let ctx = Context::load(role)?;
    let toml_str = toml::to_string_pretty(&ctx.config)?;
    println!("{}", toml_str);
    Ok(())
}

fn show_paths() -> Result<()> {
    println!("User config:    {}", ConfigLoader::user_config_path().display());
    println!("Project config: {}", ConfigLoader::project_config_path().display());
    println!("Data dir:       {}", mathforce_paths::data_dir().display());
    Ok(())
}
