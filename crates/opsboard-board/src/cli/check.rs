/*
[INPUT]:  Loaded board configuration
[OUTPUT]: Human-readable configuration summary on stdout
[POS]:    CLI check command
[UPDATE]: When BoardConfig gains user-visible settings
*/

use console::style;

use opsboard_board::config::BoardConfig;

pub fn run_check(config: &BoardConfig) {
    println!("{}", style("Configuration OK").bold().green());
    for line in summary_lines(config) {
        println!("  {line}");
    }
}

fn summary_lines(config: &BoardConfig) -> Vec<String> {
    vec![
        format!("api.base_url: {}", config.api.base_url),
        format!(
            "api.token: {}",
            if config.api.token.is_some() { "set" } else { "none" }
        ),
        format!(
            "api.timeout: {}s (connect {}s)",
            config.api.timeout_secs, config.api.connect_timeout_secs
        ),
        format!(
            "board.project_id: {}",
            config.board.project_id.as_deref().unwrap_or("(all)")
        ),
        format!(
            "board.refresh_interval: {}s",
            config.board.refresh_interval_secs
        ),
        format!("logging.level: {}", config.logging.level),
        format!(
            "logging.directory: {}",
            config
                .logging
                .directory
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "(disabled)".to_string())
        ),
    ]
}
