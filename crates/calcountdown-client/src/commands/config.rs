//! Configuration commands.

use std::path::Path;

use crate::config::CountdownConfig;
use crate::error::ClientResult;

/// Dump the parsed configuration to stdout.
pub fn dump(path: &Path) -> ClientResult<()> {
    let config = CountdownConfig::load_from(path)?;
    println!("// {}", path.display());
    println!("{}", config.to_json_pretty()?);
    Ok(())
}

/// Validate the configuration.
pub fn validate(path: &Path) -> ClientResult<()> {
    let config = CountdownConfig::load_from(path)?;
    println!("{}", summary(&config));
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

fn summary(config: &CountdownConfig) -> String {
    let identifiers: usize = config.calendars.iter().map(|c| c.identifiers.len()).sum();
    format!(
        "{} calendar(s), {} identifier(s)",
        config.calendars.len(),
        identifiers
    )
}
