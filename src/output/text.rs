//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use colored::*;
use std::collections::BTreeMap;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show the offending template text
    pub show_source: bool,

    /// Show help text
    pub show_help: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_source: true,
            show_help: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
            Severity::Info => s.blue(),
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_location(&self, diag: &Diagnostic) -> String {
        format!(
            "{}:{}:{}",
            diag.location.file.display(),
            diag.location.line,
            diag.location.column
        )
    }

    fn count(&self, n: usize, singular: &str, plural: &str, color: Color) -> String {
        let s = format!("{} {}", n, if n == 1 { singular } else { plural });
        self.paint(&s, color)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        // Group diagnostics by file
        let mut by_file: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for diag in &result.diagnostics {
            by_file
                .entry(diag.location.file.clone())
                .or_default()
                .push(diag);
        }

        for (file, diagnostics) in &by_file {
            if self.colored {
                output.push_str(&format!("{}\n", file.display().to_string().underline()));
            } else {
                output.push_str(&format!("{}\n", file.display()));
            }

            for diag in diagnostics {
                output.push_str(&self.format_diagnostic(diag));
                output.push('\n');
            }
        }

        if self.show_stats {
            output.push_str(&format!(
                "{} {} processed",
                result.files_processed,
                if result.files_processed == 1 {
                    "file"
                } else {
                    "files"
                }
            ));

            let mut counts = Vec::new();
            if result.error_count > 0 {
                counts.push(self.count(result.error_count, "error", "errors", Color::Red));
            }
            if result.warning_count > 0 {
                counts.push(self.count(result.warning_count, "warning", "warnings", Color::Yellow));
            }
            if result.info_count > 0 {
                counts.push(self.count(result.info_count, "info", "infos", Color::Blue));
            }

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_diagnostic(&self, diag: &Diagnostic) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}: {}[{}]: {}\n",
            self.format_location(diag),
            self.severity_str(diag.severity),
            self.paint(&diag.rule_id, Color::Cyan),
            diag.message
        ));

        if self.show_source && !diag.source.is_empty() {
            let bar = self.paint("|", Color::Blue);
            output.push_str(&format!("     {}\n", bar));

            for (offset, line) in diag.source.lines().enumerate() {
                let line_num = format!("{:>4}", diag.location.line + offset);
                output.push_str(&format!(
                    "{} {} {}\n",
                    self.paint(&line_num, Color::Blue),
                    bar,
                    line
                ));
            }

            // Underline a single-line snippet; the snippet starts at the column
            if !diag.source.contains('\n') {
                let underline = "^".repeat(diag.source.chars().count().max(1));
                output.push_str(&format!(
                    "     {} {}\n",
                    bar,
                    self.paint(&underline, Color::Red)
                ));
            }
        }

        if self.show_help {
            if let Some(help) = &diag.help {
                output.push_str(&format!(
                    "     {} help: {}\n",
                    self.paint("=", Color::Blue),
                    help
                ));
            }
        }

        output
    }
}
