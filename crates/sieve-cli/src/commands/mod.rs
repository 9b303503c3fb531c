//! CLI command implementations

pub mod extract;
pub mod patterns;

pub use extract::ExtractArgs;
pub use patterns::PatternsArgs;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use sieve_core::config::{Config, load_config, load_config_or_default_with_warnings};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract facts from a file or every source file under a directory
    Extract(ExtractArgs),

    /// List the regex patterns matched against each source
    Patterns(PatternsArgs),
}

/// Loads `explicit` when given, otherwise the nearest `sieve.toml` above `start`.
pub(crate) fn resolve_config(explicit: Option<&Path>, start: &Path) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Ok(load_config(path)?);
    }

    let start_dir: PathBuf = if start.is_file() {
        start
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    } else {
        start.to_path_buf()
    };
    // unknown keys are reported through tracing by the loader
    Ok(load_config_or_default_with_warnings(&start_dir).config)
}
