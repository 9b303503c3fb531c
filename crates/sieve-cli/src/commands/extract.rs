//! Extract command - runs the extractor over files and prints what it found

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use sieve_core::parser::{Language, ParseOptions, detect_language};
use sieve_core::{Extractor, OptionsUpdate};
use walkdir::WalkDir;

use super::resolve_config;
use crate::output::json::JsonFormatter;
use crate::output::pretty::PrettyFormatter;
use crate::output::{FileFailure, FileReport};

const SUPPORTED_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to file or directory to extract from
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format (pretty, json)
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Use this config file instead of searching for sieve.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shortest string literal to keep
    #[arg(long, value_name = "N")]
    pub min_length: Option<usize>,

    /// Skip string literals
    #[arg(long)]
    pub no_strings: bool,

    /// Skip functions
    #[arg(long)]
    pub no_functions: bool,

    /// Skip variables
    #[arg(long)]
    pub no_variables: bool,

    /// Skip classes
    #[arg(long)]
    pub no_classes: bool,

    /// Skip imports
    #[arg(long)]
    pub no_imports: bool,

    /// Skip exports
    #[arg(long)]
    pub no_exports: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl ExtractArgs {
    pub fn run(&self) -> Result<()> {
        self.configure_colors();
        if !matches!(self.format.as_str(), "pretty" | "json") {
            anyhow::bail!("Invalid format '{}'. Valid values: pretty, json", self.format);
        }

        let config = resolve_config(self.config.as_deref(), &self.path)?;
        let mut extractor = Extractor::from_config(&config)?;
        extractor.set_options(self.overrides());

        let files = discover_files(&self.path)?;
        if files.is_empty() {
            println!("No JavaScript/TypeScript files found.");
            return Ok(());
        }
        tracing::info!(files = files.len(), "extracting");

        let mut reports = Vec::new();
        let mut failures = Vec::new();
        for file in &files {
            let path = file.to_string_lossy().to_string();
            match extract_file(&mut extractor, file) {
                Ok(report) => reports.push(report),
                Err(error) => {
                    tracing::debug!(path = %path, %error, "file skipped");
                    failures.push(FileFailure {
                        path,
                        error: format!("{:#}", error),
                    });
                }
            }
        }

        let statistics = extractor.get_statistics();
        match self.format.as_str() {
            "json" => println!(
                "{}",
                JsonFormatter::new().format(&reports, &failures, &statistics)
            ),
            _ => print!(
                "{}",
                PrettyFormatter::new().format(&reports, &failures, &statistics)
            ),
        }
        extractor.dispose();

        if !failures.is_empty() {
            process::exit(1);
        }
        Ok(())
    }

    fn overrides(&self) -> OptionsUpdate {
        let off = |flag: bool| flag.then_some(false);
        OptionsUpdate {
            extract_strings: off(self.no_strings),
            extract_functions: off(self.no_functions),
            extract_variables: off(self.no_variables),
            extract_classes: off(self.no_classes),
            extract_imports: off(self.no_imports),
            extract_exports: off(self.no_exports),
            string_min_length: self.min_length,
            ..OptionsUpdate::default()
        }
    }

    fn configure_colors(&self) {
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        if self.no_color || no_color_env {
            colored::control::set_override(false);
        }
    }
}

fn extract_file(extractor: &mut Extractor, file: &Path) -> Result<FileReport> {
    let path = file.to_string_lossy().to_string();
    let code = fs::read_to_string(file).with_context(|| format!("Failed to read {}", path))?;
    let output = extractor.extract_with(&code, &parse_override(&path))?;
    Ok(FileReport { path, output })
}

/// Plain TypeScript files are parsed without JSX so `<T>expr` casts work;
/// everything else uses the configured parse options.
fn parse_override(path: &str) -> OptionsUpdate {
    let parse_options = match detect_language(path) {
        Language::TypeScript => Some(ParseOptions::for_language(Language::TypeScript)),
        _ => None,
    };
    OptionsUpdate {
        parse_options,
        ..OptionsUpdate::default()
    }
}

fn discover_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        if is_supported_file(path) {
            return Ok(vec![path.to_path_buf()]);
        } else {
            return Ok(vec![]);
        }
    }

    let files: Vec<PathBuf> = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_supported_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    Ok(files)
}

fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name == "node_modules")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn args(path: &Path) -> ExtractArgs {
        ExtractArgs {
            path: path.to_path_buf(),
            format: "json".to_string(),
            config: None,
            min_length: None,
            no_strings: false,
            no_functions: false,
            no_variables: false,
            no_classes: false,
            no_imports: false,
            no_exports: false,
            no_color: true,
        }
    }

    #[test]
    fn discover_files_finds_single_js_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.js");
        File::create(&file_path).unwrap();

        let files = discover_files(&file_path).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0], file_path);
    }

    #[test]
    fn discover_files_finds_files_in_directory_sorted() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.tsx")).unwrap();
        File::create(dir.path().join("a.js")).unwrap();
        File::create(dir.path().join("b.mjs")).unwrap();

        let files = discover_files(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.js", "b.mjs", "c.tsx"]);
    }

    #[test]
    fn discover_files_ignores_unsupported_extensions() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("test.cjs")).unwrap();
        File::create(dir.path().join("readme.md")).unwrap();
        File::create(dir.path().join("config.json")).unwrap();

        let files = discover_files(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn discover_files_skips_hidden_directories_and_node_modules() {
        let dir = tempdir().unwrap();
        let hidden_dir = dir.path().join(".cache");
        fs::create_dir(&hidden_dir).unwrap();
        File::create(hidden_dir.join("hidden.js")).unwrap();
        let nm_dir = dir.path().join("node_modules");
        fs::create_dir(&nm_dir).unwrap();
        File::create(nm_dir.join("dep.js")).unwrap();
        File::create(dir.path().join("visible.js")).unwrap();

        let files = discover_files(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().contains("visible.js"));
    }

    #[test]
    fn discover_files_rejects_missing_path() {
        let dir = tempdir().unwrap();

        let result = discover_files(&dir.path().join("missing"));

        assert!(result.is_err());
    }

    #[test]
    fn overrides_only_touch_flagged_categories() {
        let dir = tempdir().unwrap();
        let mut extract_args = args(dir.path());
        extract_args.no_strings = true;
        extract_args.min_length = Some(3);

        let update = extract_args.overrides();

        assert_eq!(update.extract_strings, Some(false));
        assert_eq!(update.extract_functions, None);
        assert_eq!(update.string_min_length, Some(3));
        assert!(update.parse_options.is_none());
    }

    #[test]
    fn typescript_files_are_parsed_without_jsx() {
        let update = parse_override("src/cast.ts");
        let mut extractor = Extractor::new();

        let output = extractor
            .extract_with("const n = <number>value;", &update)
            .unwrap();

        assert_eq!(output.results.variable_count(), 1);
        assert!(parse_override("src/view.tsx").parse_options.is_none());
    }

    #[test]
    fn extract_file_reports_path_and_results() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("api.js");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "export const BASE = 'https://api.example.com';").unwrap();

        let mut extractor = Extractor::new();
        let report = extract_file(&mut extractor, &file_path).unwrap();

        assert!(report.path.ends_with("api.js"));
        assert_eq!(report.output.results.export_count(), 1);
        assert_eq!(extractor.get_statistics().total_extractions, 1);
    }

    #[test]
    fn extract_file_surfaces_syntax_errors() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.js");
        fs::write(&file_path, "function (").unwrap();

        let mut extractor = Extractor::new();
        let error = extract_file(&mut extractor, &file_path).unwrap_err();

        assert!(error.to_string().starts_with("Extraction failed"));
    }

    #[test]
    fn run_rejects_unknown_format() {
        let dir = tempdir().unwrap();
        let mut extract_args = args(dir.path());
        extract_args.format = "sarif".to_string();

        let error = extract_args.run().unwrap_err();

        assert!(error.to_string().contains("Invalid format"));
    }
}
