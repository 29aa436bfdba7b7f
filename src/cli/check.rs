//! Check command implementation.

use std::io::Write;

use anyhow::Result;
use html_upsert::config::UpsertConfig;
use html_upsert::log;

/// Print the resolved template options as JSON.
///
/// Loading already validated the config; reaching this point means it is
/// usable.
pub fn run_check(config: &UpsertConfig) -> Result<()> {
    match &config.config_path {
        Some(path) => log!("config"; "{} is valid", path.display()),
        None => log!("config"; "no config file, using defaults"),
    }

    let json = resolved_json(config)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

fn resolved_json(config: &UpsertConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(&config.template)?)
}
