//! Human-readable terminal output

use std::fmt::Write;

use colored::Colorize;
use sieve_core::{ExtractionResults, Statistics};

use super::{FileFailure, FileReport};

pub struct PrettyFormatter;

impl PrettyFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(
        &self,
        reports: &[FileReport],
        failures: &[FileFailure],
        statistics: &Statistics,
    ) -> String {
        let mut out = String::new();

        for report in reports {
            let _ = writeln!(
                out,
                "{} {}",
                report.path.bold(),
                format!("({:.2}ms)", report.output.duration).dimmed()
            );
            self.format_results(&mut out, &report.output.results);
            out.push('\n');
        }

        for failure in failures {
            let _ = writeln!(
                out,
                "{} {}: {}",
                "error:".red().bold(),
                failure.path,
                failure.error
            );
        }
        if !failures.is_empty() {
            out.push('\n');
        }

        self.format_statistics(&mut out, statistics);
        out
    }

    fn format_results(&self, out: &mut String, results: &ExtractionResults) {
        if let Some(strings) = &results.strings {
            let _ = writeln!(
                out,
                "  {:<10} {} ({} urls, {} paths, {} messages, {} identifiers, {} other)",
                "strings".cyan(),
                strings.all.len(),
                strings.urls.len(),
                strings.paths.len(),
                strings.messages.len(),
                strings.identifiers.len(),
                strings.other.len()
            );
        }

        if let Some(functions) = &results.functions {
            let _ = writeln!(out, "  {:<10} {}", "functions".cyan(), functions.len());
            for function in functions {
                let complexity = function
                    .complexity
                    .map(|c| format!(" complexity {}", c))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "    {} {}{}",
                    function.name,
                    format!("{}:{}", function.location.line, function.location.column).dimmed(),
                    complexity
                );
            }
        }

        if let Some(variables) = &results.variables {
            let _ = writeln!(
                out,
                "  {:<10} {} ({} unused)",
                "variables".cyan(),
                variables.all.len(),
                variables.unused.len()
            );
        }

        if let Some(classes) = &results.classes {
            let _ = writeln!(out, "  {:<10} {}", "classes".cyan(), classes.len());
            for class in classes {
                let parent = class
                    .super_class_name
                    .as_deref()
                    .map(|name| format!(" extends {}", name))
                    .unwrap_or_default();
                let _ = writeln!(out, "    {}{}", class.name, parent);
            }
        }

        if let Some(imports) = &results.imports {
            let _ = writeln!(out, "  {:<10} {}", "imports".cyan(), imports.len());
            for import in imports {
                let marker = if import.is_local { "local" } else { "package" };
                let _ = writeln!(out, "    {} {}", import.source, marker.dimmed());
            }
        }

        if let Some(exports) = &results.exports {
            let _ = writeln!(out, "  {:<10} {}", "exports".cyan(), exports.len());
        }

        let hits: Vec<String> = results
            .patterns
            .names()
            .filter_map(|name| {
                let count = results.patterns.get(name).map_or(0, <[_]>::len);
                (count > 0).then(|| format!("{} {}", name, count))
            })
            .collect();
        if !hits.is_empty() {
            let _ = writeln!(out, "  {:<10} {}", "patterns".cyan(), hits.join(", "));
        }

        let mut flags = Vec::new();
        if results.metadata.has_use_strict {
            flags.push("use strict");
        }
        if results.metadata.top_level_await {
            flags.push("top-level await");
        }
        if !flags.is_empty() {
            let _ = writeln!(out, "  {:<10} {}", "metadata".cyan(), flags.join(", "));
        }
    }

    fn format_statistics(&self, out: &mut String, statistics: &Statistics) {
        let _ = writeln!(
            out,
            "{} {} extraction(s), {} strings, {} functions, {} variables, {} classes, {} imports, {} exports",
            "Total:".green().bold(),
            statistics.total_extractions,
            statistics.total_strings,
            statistics.total_functions,
            statistics.total_variables,
            statistics.total_classes,
            statistics.total_imports,
            statistics.total_exports
        );
        let _ = writeln!(
            out,
            "{} {:.2}ms",
            "Average extraction time:".green(),
            statistics.average_extraction_time
        );
    }
}
