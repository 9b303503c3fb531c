//! Sieve CLI - extract structured facts from JavaScript/TypeScript sources

mod commands;
mod logging;
mod output;

use clap::{Parser, ValueEnum};
use commands::Commands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sieve",
    author,
    version,
    about = "Extract strings, functions, variables, classes and module edges from JS/TS",
    long_about = "Sieve parses JavaScript and TypeScript sources and reports what they contain:\n\
                  string literals by category, functions with complexity, variables with\n\
                  usage counts, classes, imports, exports, comments and regex pattern hits."
)]
pub struct Cli {
    #[arg(
        long,
        value_enum,
        default_value = "warn",
        global = true,
        help = "Set the log level"
    )]
    pub log_level: LogLevel,

    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level, cli.log_json);

    match cli.command {
        Commands::Extract(args) => args.run(),
        Commands::Patterns(args) => args.run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_extract_command() {
        let cli = Cli::try_parse_from(["sieve", "extract", "./src"]).unwrap();
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.path.to_str().unwrap(), "./src");
                assert_eq!(args.format, "pretty");
                assert!(args.min_length.is_none());
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn cli_parses_extract_with_format() {
        let cli = Cli::try_parse_from(["sieve", "extract", "app.js", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Extract(args) => assert_eq!(args.format, "json"),
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn cli_parses_category_toggles() {
        let cli = Cli::try_parse_from([
            "sieve",
            "extract",
            "app.js",
            "--no-strings",
            "--no-exports",
            "--min-length",
            "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract(args) => {
                assert!(args.no_strings);
                assert!(args.no_exports);
                assert!(!args.no_functions);
                assert_eq!(args.min_length, Some(4));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn cli_requires_a_path_for_extract() {
        assert!(Cli::try_parse_from(["sieve", "extract"]).is_err());
    }

    #[test]
    fn cli_parses_patterns_command() {
        let cli = Cli::try_parse_from(["sieve", "patterns", "--config", "sieve.toml"]).unwrap();
        match cli.command {
            Commands::Patterns(args) => {
                assert_eq!(args.config.unwrap().to_str().unwrap(), "sieve.toml");
            }
            _ => panic!("Expected Patterns command"),
        }
    }

    #[test]
    fn cli_parses_global_log_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sieve",
            "extract",
            "app.js",
            "--log-level",
            "debug",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert!(cli.log_json);
    }

    #[test]
    fn cli_defaults_to_warn_logging() {
        let cli = Cli::try_parse_from(["sieve", "patterns"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert!(!cli.log_json);
    }

    #[test]
    fn cli_help_shows_commands() {
        let mut cmd = Cli::command();
        let help = cmd.render_help().to_string();
        assert!(help.contains("extract"));
        assert!(help.contains("patterns"));
        assert!(help.contains("--log-level"));
    }

    #[test]
    fn log_level_converts_to_tracing_level() {
        assert_eq!(LogLevel::Debug.as_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Info.as_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Warn.as_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Error.as_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Trace.as_tracing_level(), tracing::Level::TRACE);
    }
}
