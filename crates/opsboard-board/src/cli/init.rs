/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When BoardConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

use opsboard_board::config::BoardConfig;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to opsboard init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a board configuration.").dim()
    );

    let theme = ColorfulTheme::default();

    println!("\n{}", style("--- Backend ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Task service URL")
        .default("http://localhost:8000".to_string())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            BoardConfig::new(input.clone())
                .validate()
                .map_err(|err| err.to_string())
        })
        .interact_text()?;

    let token: String = Input::with_theme(&theme)
        .with_prompt("API token (leave empty for none)")
        .allow_empty(true)
        .interact_text()?;

    println!("\n{}", style("--- Board ---").bold());
    let project_id: String = Input::with_theme(&theme)
        .with_prompt("Project ID filter (leave empty for all projects)")
        .allow_empty(true)
        .interact_text()?;

    let refresh_interval_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Refresh interval (seconds)")
        .default(15)
        .interact_text()?;

    println!("\n{}", style("--- Logging ---").bold());
    let level_selection = Select::with_theme(&theme)
        .with_prompt("Log level")
        .items(&LOG_LEVELS)
        .default(2)
        .interact()?;

    let write_file_log = Confirm::with_theme(&theme)
        .with_prompt("Write a daily rolling log file?")
        .default(false)
        .interact()?;
    let directory = if write_file_log {
        let directory: String = Input::with_theme(&theme)
            .with_prompt("Log directory")
            .default(default_log_directory(&output))
            .interact_text()?;
        Some(PathBuf::from(directory))
    } else {
        None
    };

    let mut config = BoardConfig::new(base_url);
    config.api.token = non_empty(token);
    config.board.project_id = non_empty(project_id);
    config.board.refresh_interval_secs = refresh_interval_secs;
    config.logging.level = LOG_LEVELS[level_selection].to_string();
    config.logging.directory = directory;
    config.validate()?;

    let yaml = config.to_yaml()?;
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn default_log_directory(output: &Path) -> String {
    output
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(|parent| parent.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
        .display()
        .to_string()
}
