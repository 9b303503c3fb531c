//! Patterns command - shows the registry an extraction would run

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sieve_core::PatternRegistry;

use super::resolve_config;

#[derive(Args, Debug)]
pub struct PatternsArgs {
    /// Use this config file instead of searching for sieve.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl PatternsArgs {
    pub fn run(&self) -> Result<()> {
        let config = resolve_config(self.config.as_deref(), &PathBuf::from("."))?;
        let registry = config.pattern_registry()?;
        print!("{}", render(&registry));
        Ok(())
    }
}

fn render(registry: &PatternRegistry) -> String {
    let width = registry.list().iter().map(|name| name.len()).max().unwrap_or(0);
    registry
        .iter()
        .map(|(name, regex)| format!("{:<width$}  {}\n", name.cyan(), regex.as_str()))
        .collect()
}
