//! Configuration and CLI argument handling

use std::sync::Arc;

use anyhow::anyhow;
use clap::Parser;

use crate::services::{AlertNotifier, CommandAlert, LogAlert};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "study-clock")]
#[command(about = "A state-managed HTTP server hosting a clock, a stopwatch and a countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial countdown duration in minutes (at most 23h59m)
    #[arg(short, long, default_value = "25", value_parser = clap::value_parser!(u64).range(0..=1439))]
    pub timer: u64,

    /// Command that plays the alert sound when a countdown completes,
    /// e.g. "paplay /usr/share/sounds/alarm.oga"
    #[arg(long)]
    pub alert_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial countdown duration in seconds
    pub fn timer_seconds(&self) -> u64 {
        self.timer * 60
    }

    /// Build the completion alert from the configured command
    pub fn alert_notifier(&self) -> anyhow::Result<Arc<dyn AlertNotifier>> {
        match &self.alert_command {
            Some(line) => {
                let alert = CommandAlert::parse(line)
                    .ok_or_else(|| anyhow!("Invalid alert command: {:?}", line))?;
                Ok(Arc::new(alert))
            }
            None => Ok(Arc::new(LogAlert)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["study-clock"]);
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.timer_seconds(), 1500);
        assert_eq!(config.log_level(), "info");
        assert!(config.alert_command.is_none());
    }

    #[test]
    fn rejects_timer_beyond_a_day() {
        assert!(Config::try_parse_from(["study-clock", "--timer", "1440"]).is_err());
    }

    #[test]
    fn rejects_unparseable_alert_command() {
        let config = Config::parse_from(["study-clock", "--alert-command", "play 'oops"]);
        assert!(config.alert_notifier().is_err());
    }
}
