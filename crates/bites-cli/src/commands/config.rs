//! Config command - manage configuration and list presets.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use bites_core::{BitesConfig, DateOrder, Preset};

use super::{default_config_path, load_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Show configuration file path
    Path,

    /// List the available presets
    Presets,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Preset recorded in the new file
    #[arg(short, long, default_value = "default")]
    preset: String,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Path => show_path(),
        ConfigCommand::Presets => list_presets(),
    }
}

fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    if config_path.is_none() && !default_config_path().exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let mut config = load_config(config_path)?;
    config.normalization = Some(config.normalization_config()?);

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    let preset: Preset = args.preset.parse()?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = BitesConfig {
        preset: Some(preset.name().to_string()),
        ..Default::default()
    };
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'bites config init' to create a configuration file.");
    }

    Ok(())
}

fn list_presets() -> anyhow::Result<()> {
    println!(
        "{:<22} {:<20} {:>10}  {:<11} {}",
        "PRESET", "LANGUAGES", "MIN CONF", "DATES", "CURRENCIES"
    );

    for preset in Preset::ALL {
        let config = preset.config();
        let date_order = match config.date_order() {
            DateOrder::MonthFirst => "month-first",
            DateOrder::DayFirst => "day-first",
        };
        let currencies: Vec<&str> = config.currency_codes().iter().map(String::as_str).collect();

        println!(
            "{:<22} {:<20} {:>10.2}  {:<11} {}",
            preset.name(),
            config.languages().join(","),
            config.min_confidence(),
            date_order,
            currencies.join(",")
        );
    }

    Ok(())
}
